//! Signal scoring engine for the Aruma beauty-market dashboard.
//!
//! Pure and synchronous: given whichever of the four source documents could
//! be loaded (trends, tiktok, meta, analytics), produce the signal score set,
//! the ordered insight list and per-source status. All arithmetic is decimal,
//! so the one-decimal rounding the dashboard displays is exact.

pub mod aggregate;
pub mod document;
pub mod insight;
pub mod score;
pub mod strategy;

pub use aggregate::{aggregate, ScoreReport, SourceBundle, SourceStatus};
pub use document::{
    AnalyticsDocument, AnalyticsOverview, HashtagRecord, KeywordRecord, MetaDocument,
    TiktokDocument, TopicRecord, TrendsDocument,
};
pub use insight::{build_insights, Insight};
pub use score::{round1, SignalScores};
