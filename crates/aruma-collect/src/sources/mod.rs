//! The four source producers and the collection cycle that runs them.
//!
//! A cycle builds each requested document and writes it through the
//! [`SnapshotStore`]; a producer or write failure is confined to its source
//! and the cycle still visits the rest. The summary carries one outcome per
//! source for CLI output and scheduler logs.

pub mod analytics;
pub mod meta;
pub mod tiktok;
pub mod trends;

use std::path::PathBuf;

use aruma_core::{AppConfig, SourceKind, WatchlistFile};

use crate::error::CollectError;
use crate::store::SnapshotStore;

/// One producer's result within a collection cycle.
#[derive(Debug)]
pub struct CollectOutcome {
    pub source: SourceKind,
    /// Scoreable records in the document the producer built.
    pub records: usize,
    pub result: Result<PathBuf, CollectError>,
}

impl CollectOutcome {
    #[must_use]
    pub fn is_ok(&self) -> bool {
        self.result.is_ok()
    }
}

/// Rollup of one collection cycle.
#[derive(Debug, Default)]
pub struct CollectSummary {
    pub outcomes: Vec<CollectOutcome>,
}

impl CollectSummary {
    fn push(&mut self, outcome: CollectOutcome) {
        match &outcome.result {
            Ok(path) => tracing::info!(
                source = %outcome.source,
                records = outcome.records,
                path = %path.display(),
                "collected source"
            ),
            Err(e) => tracing::error!(
                source = %outcome.source,
                error = %e,
                "source collection failed"
            ),
        }
        self.outcomes.push(outcome);
    }

    #[must_use]
    pub fn succeeded(&self) -> usize {
        self.outcomes.iter().filter(|o| o.is_ok()).count()
    }

    #[must_use]
    pub fn failed(&self) -> usize {
        self.outcomes.len() - self.succeeded()
    }

    #[must_use]
    pub fn all_ok(&self) -> bool {
        self.failed() == 0
    }
}

/// Runs the producers for `sources` and writes each document through the
/// store.
pub async fn collect_all(
    config: &AppConfig,
    watchlist: &WatchlistFile,
    store: &SnapshotStore,
    sources: &[SourceKind],
) -> CollectSummary {
    let mut summary = CollectSummary::default();
    for source in sources {
        summary.push(collect_one(config, watchlist, store, *source).await);
    }
    summary
}

async fn collect_one(
    config: &AppConfig,
    watchlist: &WatchlistFile,
    store: &SnapshotStore,
    source: SourceKind,
) -> CollectOutcome {
    match source {
        SourceKind::Trends => {
            let doc = trends::build_document(watchlist, &config.region);
            CollectOutcome {
                source,
                records: doc.keywords.len(),
                result: store.write_document(source, &doc),
            }
        }
        SourceKind::Tiktok => {
            let doc = tiktok::build_document(&config.region);
            CollectOutcome {
                source,
                records: doc.trends.hashtags.len(),
                result: store.write_document(source, &doc),
            }
        }
        SourceKind::Meta => {
            let doc = meta::collect(config, watchlist).await;
            CollectOutcome {
                source,
                records: doc.aggregated_topics.len(),
                result: store.write_document(source, &doc),
            }
        }
        SourceKind::Analytics => {
            let doc = analytics::build_document(&config.region);
            CollectOutcome {
                source,
                records: usize::from(doc.overview.is_some()),
                result: store.write_document(source, &doc),
            }
        }
    }
}

/// Builds one source document without writing it, as loose JSON. Backs the
/// CLI's dry-run preview.
///
/// # Errors
///
/// Returns [`CollectError::Serialize`] if the document cannot be encoded.
pub async fn preview_document(
    config: &AppConfig,
    watchlist: &WatchlistFile,
    source: SourceKind,
) -> Result<serde_json::Value, CollectError> {
    let value = match source {
        SourceKind::Trends => {
            serde_json::to_value(trends::build_document(watchlist, &config.region))
        }
        SourceKind::Tiktok => serde_json::to_value(tiktok::build_document(&config.region)),
        SourceKind::Meta => serde_json::to_value(meta::collect(config, watchlist).await),
        SourceKind::Analytics => serde_json::to_value(analytics::build_document(&config.region)),
    };
    value.map_err(CollectError::Serialize)
}
