//! Data collection for the Aruma dashboard.
//!
//! Four producers write source documents under the data directory, one
//! subdirectory per source, as a dated snapshot plus an always-current
//! pointer file. Producers that can reach a real upstream (the Meta Graph
//! API) fall back to a curated document when the credential is absent or
//! the call fails, so a collection cycle always leaves readable documents
//! behind. [`SnapshotStore`] is the single read/write path for those files.

pub mod error;
pub mod sources;
pub mod store;

pub use error::CollectError;
pub use sources::{collect_all, preview_document, CollectOutcome, CollectSummary};
pub use store::SnapshotStore;
