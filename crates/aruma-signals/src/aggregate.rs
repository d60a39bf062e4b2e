//! Report assembly.
//!
//! Takes whatever subset of source documents loaded cleanly and produces an
//! immutable [`ScoreReport`]: the score set, the insight cards, and one
//! status row per source for the dashboard's data layer. Nothing here
//! mutates the inputs; every refresh builds a fresh report from scratch.

use chrono::{DateTime, Utc};
use serde::Serialize;

use aruma_core::SourceKind;

use crate::document::{AnalyticsDocument, MetaDocument, TiktokDocument, TrendsDocument};
use crate::insight::{build_insights, Insight};
use crate::score::SignalScores;

/// The four source documents of one load cycle, any of which may be absent.
#[derive(Debug, Clone, Default)]
pub struct SourceBundle {
    pub trends: Option<TrendsDocument>,
    pub tiktok: Option<TiktokDocument>,
    pub meta: Option<MetaDocument>,
    pub analytics: Option<AnalyticsDocument>,
}

impl SourceBundle {
    #[must_use]
    pub fn available_count(&self) -> usize {
        usize::from(self.trends.is_some())
            + usize::from(self.tiktok.is_some())
            + usize::from(self.meta.is_some())
            + usize::from(self.analytics.is_some())
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.available_count() == 0
    }
}

/// Per-source status row: whether the document loaded, how many records it
/// carried, and display-only envelope fields.
#[derive(Debug, Clone, Serialize)]
pub struct SourceStatus {
    pub source: SourceKind,
    pub name: String,
    pub available: bool,
    pub records: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub timestamp: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub region: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub method: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl SourceStatus {
    fn missing(source: SourceKind) -> Self {
        Self {
            source,
            name: source.display_name().to_string(),
            available: false,
            records: 0,
            timestamp: None,
            region: None,
            method: None,
            error: None,
        }
    }

    fn present(
        source: SourceKind,
        records: usize,
        timestamp: Option<&String>,
        region: Option<&String>,
        method: Option<&String>,
        error: Option<&String>,
    ) -> Self {
        Self {
            source,
            name: source.display_name().to_string(),
            available: true,
            records,
            timestamp: timestamp.cloned(),
            region: region.cloned(),
            method: method.cloned(),
            error: error.cloned(),
        }
    }
}

fn trends_status(doc: Option<&TrendsDocument>) -> SourceStatus {
    match doc {
        Some(doc) => SourceStatus::present(
            SourceKind::Trends,
            doc.keywords.len(),
            doc.timestamp.as_ref(),
            doc.region.as_ref(),
            doc.metadata.method.as_ref(),
            doc.error.as_ref(),
        ),
        None => SourceStatus::missing(SourceKind::Trends),
    }
}

fn tiktok_status(doc: Option<&TiktokDocument>) -> SourceStatus {
    match doc {
        Some(doc) => SourceStatus::present(
            SourceKind::Tiktok,
            doc.trends.hashtags.len(),
            doc.timestamp.as_ref(),
            doc.region.as_ref(),
            doc.metadata.method.as_ref(),
            doc.error.as_ref(),
        ),
        None => SourceStatus::missing(SourceKind::Tiktok),
    }
}

fn meta_status(doc: Option<&MetaDocument>) -> SourceStatus {
    match doc {
        Some(doc) => SourceStatus::present(
            SourceKind::Meta,
            doc.aggregated_topics.len(),
            doc.timestamp.as_ref(),
            doc.region.as_ref(),
            doc.metadata.method.as_ref(),
            doc.error.as_ref(),
        ),
        None => SourceStatus::missing(SourceKind::Meta),
    }
}

fn analytics_status(doc: Option<&AnalyticsDocument>) -> SourceStatus {
    match doc {
        Some(doc) => SourceStatus::present(
            SourceKind::Analytics,
            usize::from(doc.overview.is_some()),
            doc.timestamp.as_ref(),
            doc.region.as_ref(),
            doc.metadata.method.as_ref(),
            None,
        ),
        None => SourceStatus::missing(SourceKind::Analytics),
    }
}

/// One aggregation pass over a bundle of source documents.
#[derive(Debug, Clone, Serialize)]
pub struct ScoreReport {
    pub scores: SignalScores,
    pub insights: Vec<Insight>,
    pub sources: Vec<SourceStatus>,
    pub generated_at: DateTime<Utc>,
}

impl ScoreReport {
    /// Report for when nothing has loaded yet: neutral scores, no insights,
    /// every source marked missing.
    #[must_use]
    pub fn empty() -> Self {
        aggregate(&SourceBundle::default())
    }
}

/// Build the full report from whichever documents are present.
#[must_use]
pub fn aggregate(bundle: &SourceBundle) -> ScoreReport {
    let trends = bundle.trends.as_ref();
    let tiktok = bundle.tiktok.as_ref();
    let meta = bundle.meta.as_ref();
    let analytics = bundle.analytics.as_ref();

    ScoreReport {
        scores: SignalScores::compute(trends, tiktok, meta, analytics),
        insights: build_insights(trends, tiktok, meta, analytics),
        sources: vec![
            trends_status(trends),
            tiktok_status(tiktok),
            meta_status(meta),
            analytics_status(analytics),
        ],
        generated_at: Utc::now(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::document::{
        AnalyticsOverview, DocumentMetadata, HashtagRecord, KeywordRecord, Sentiment, TiktokTrends,
        TopicRecord, TrendDirection,
    };
    use crate::score::round1;
    use rand::Rng;
    use rust_decimal::Decimal;
    use std::collections::BTreeMap;

    fn dec(s: &str) -> Decimal {
        s.parse().unwrap()
    }

    fn full_bundle() -> SourceBundle {
        SourceBundle {
            trends: Some(TrendsDocument {
                timestamp: Some("2026-08-25T06:00:00Z".to_string()),
                region: Some("PE".to_string()),
                category: Some("Beauty & Fitness".to_string()),
                source: Some("Google Trends".to_string()),
                keywords: vec![KeywordRecord {
                    keyword: "skincare".to_string(),
                    average_interest: dec("80"),
                    peak_score: 92,
                    growth_3m: Some("+45%".to_string()),
                    trend: TrendDirection::Rising,
                    top_regions: BTreeMap::new(),
                }],
                metadata: DocumentMetadata {
                    method: Some("curated".to_string()),
                    ..DocumentMetadata::default()
                },
                error: None,
            }),
            tiktok: Some(TiktokDocument {
                timestamp: Some("2026-08-25T06:00:00Z".to_string()),
                source: Some("TikTok Creative Center".to_string()),
                region: Some("PE".to_string()),
                category: None,
                trends: TiktokTrends {
                    hashtags: vec![
                        HashtagRecord {
                            hashtag: "#skincare".to_string(),
                            views: "2.8M".to_string(),
                            posts: "18.5K".to_string(),
                            growth: None,
                            relevance_score: dec("90"),
                            region: None,
                        },
                        HashtagRecord {
                            hashtag: "#cerave".to_string(),
                            views: "950K".to_string(),
                            posts: "6.2K".to_string(),
                            growth: None,
                            relevance_score: dec("70"),
                            region: None,
                        },
                    ],
                    sounds: Vec::new(),
                    creators: Vec::new(),
                },
                metadata: DocumentMetadata::default(),
                error: None,
            }),
            meta: Some(MetaDocument {
                timestamp: Some("2026-08-25T06:00:00Z".to_string()),
                source: None,
                region: Some("PE".to_string()),
                category: None,
                pages: Vec::new(),
                aggregated_topics: vec![
                    TopicRecord {
                        topic: "Skincare Natural".to_string(),
                        mentions: 1450,
                        engagement_score: dec("9.2"),
                        growth: None,
                        sentiment: Sentiment::Positive,
                        top_brands: Vec::new(),
                        avg_reactions: None,
                        avg_comments: None,
                        avg_shares: None,
                        discussion_volume: None,
                        top_queries: Vec::new(),
                    },
                    TopicRecord {
                        topic: "Limpiador Facial".to_string(),
                        mentions: 750,
                        engagement_score: dec("7.3"),
                        growth: None,
                        sentiment: Sentiment::Neutral,
                        top_brands: Vec::new(),
                        avg_reactions: None,
                        avg_comments: None,
                        avg_shares: None,
                        discussion_volume: None,
                        top_queries: Vec::new(),
                    },
                ],
                metadata: DocumentMetadata::default(),
                error: None,
            }),
            analytics: Some(AnalyticsDocument {
                timestamp: Some("2026-08-25T06:00:00Z".to_string()),
                source: None,
                region: Some("PE".to_string()),
                overview: Some(AnalyticsOverview {
                    total_users: 118_420,
                    conversions: 5_684,
                    conversion_rate: dec("0.048"),
                    bounce_rate: dec("0.41"),
                }),
                top_pages: Vec::new(),
                search_terms: Vec::new(),
                ecommerce: None,
                metadata: DocumentMetadata::default(),
            }),
        }
    }

    #[test]
    fn full_bundle_produces_expected_report() {
        let report = aggregate(&full_bundle());
        assert_eq!(report.scores.search, dec("8.0"));
        assert_eq!(report.scores.trend, dec("8.0"));
        assert_eq!(report.scores.emotion, dec("8.3"));
        assert_eq!(report.scores.intent, dec("9.6"));
        assert_eq!(report.scores.overall, dec("8.5"));
        // skincare overlaps "Skincare Natural", so the wide card is present
        assert_eq!(report.insights.len(), 5);
        assert!(report.insights[4].wide);
        assert_eq!(report.sources.len(), 4);
        assert!(report.sources.iter().all(|s| s.available));
    }

    #[test]
    fn status_rows_carry_record_counts() {
        let report = aggregate(&full_bundle());
        assert_eq!(report.sources[0].records, 1);
        assert_eq!(report.sources[1].records, 2);
        assert_eq!(report.sources[2].records, 2);
        assert_eq!(report.sources[3].records, 1);
        assert_eq!(report.sources[0].method.as_deref(), Some("curated"));
    }

    #[test]
    fn empty_bundle_yields_neutral_report() {
        let report = ScoreReport::empty();
        assert_eq!(report.scores.overall, dec("5.0"));
        assert!(report.insights.is_empty());
        assert_eq!(report.sources.len(), 4);
        assert!(report.sources.iter().all(|s| !s.available));
        assert!(report.sources.iter().all(|s| s.records == 0));
    }

    #[test]
    fn partial_bundle_mixes_real_and_neutral_scores() {
        let mut bundle = full_bundle();
        bundle.tiktok = None;
        bundle.analytics = None;
        let report = aggregate(&bundle);
        assert_eq!(report.scores.search, dec("8.0"));
        assert_eq!(report.scores.trend, dec("5.0"));
        assert_eq!(report.scores.intent, dec("5.0"));
        assert_eq!(report.scores.emotion, dec("8.3"));
        // search + emotion insights plus the cross card
        assert_eq!(report.insights.len(), 3);
        assert!(!report.sources[1].available);
        assert!(!report.sources[3].available);
    }

    #[test]
    fn overall_is_rounded_mean_of_subscores() {
        let mut rng = rand::rng();
        for _ in 0..20 {
            let mut bundle = full_bundle();
            if let Some(trends) = bundle.trends.as_mut() {
                for kw in &mut trends.keywords {
                    kw.average_interest = Decimal::from(rng.random_range(0..=100_i64));
                }
            }
            if let Some(tiktok) = bundle.tiktok.as_mut() {
                for tag in &mut tiktok.trends.hashtags {
                    tag.relevance_score = Decimal::from(rng.random_range(0..=100_i64));
                }
            }
            if let Some(meta) = bundle.meta.as_mut() {
                for topic in &mut meta.aggregated_topics {
                    topic.engagement_score = Decimal::new(rng.random_range(0..=100_i64), 1);
                }
            }
            if let Some(analytics) = bundle.analytics.as_mut() {
                if let Some(overview) = analytics.overview.as_mut() {
                    overview.conversion_rate = Decimal::new(rng.random_range(1..=80_i64), 3);
                }
            }
            let report = aggregate(&bundle);
            let scores = report.scores;
            let mean =
                (scores.search + scores.trend + scores.intent + scores.emotion) / Decimal::from(4);
            assert_eq!(scores.overall, round1(mean));
            for sub in [scores.search, scores.trend, scores.intent, scores.emotion] {
                assert!(sub >= Decimal::ZERO && sub <= Decimal::TEN);
            }
        }
    }

    #[test]
    fn bundle_counts_available_sources() {
        let bundle = full_bundle();
        assert_eq!(bundle.available_count(), 4);
        assert!(!bundle.is_empty());
        assert_eq!(SourceBundle::default().available_count(), 0);
        assert!(SourceBundle::default().is_empty());
    }

    #[test]
    fn report_serializes_scores_with_one_decimal() {
        let report = aggregate(&full_bundle());
        let json = serde_json::to_value(&report).unwrap();
        assert_eq!(json["scores"]["overall"], serde_json::json!(8.5));
        assert_eq!(json["scores"]["search"], serde_json::json!(8.0));
        assert_eq!(json["sources"][0]["source"], serde_json::json!("trends"));
        assert_eq!(
            json["sources"][3]["name"],
            serde_json::json!("Google Analytics 4")
        );
    }
}
