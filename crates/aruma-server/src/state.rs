//! Shared report state.

use std::sync::Arc;

use tokio::sync::RwLock;

use aruma_collect::SnapshotStore;
use aruma_signals::{aggregate, ScoreReport};

/// The latest aggregated report, shared between handlers and refresh tasks.
///
/// Readers take an `Arc` snapshot under a brief read lock; a refresh builds
/// the new report off to the side and swaps the pointer, so a request never
/// observes a half-built report.
#[derive(Clone)]
pub struct SharedReport {
    inner: Arc<RwLock<Arc<ScoreReport>>>,
}

impl SharedReport {
    /// Starts from the all-neutral report, before any documents are read.
    #[must_use]
    pub fn empty() -> Self {
        Self {
            inner: Arc::new(RwLock::new(Arc::new(ScoreReport::empty()))),
        }
    }

    /// The current report snapshot.
    pub async fn current(&self) -> Arc<ScoreReport> {
        Arc::clone(&*self.inner.read().await)
    }

    /// Rebuilds the report from the latest on-disk documents and publishes
    /// it. Returns the freshly published report.
    pub async fn refresh(&self, store: &SnapshotStore) -> Arc<ScoreReport> {
        let bundle = store.load_bundle_concurrent().await;
        let report = Arc::new(aggregate(&bundle));
        tracing::info!(
            sources = bundle.available_count(),
            overall = %report.scores.overall,
            "published refreshed report"
        );
        *self.inner.write().await = Arc::clone(&report);
        report
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use aruma_core::SourceKind;

    use super::*;

    #[tokio::test]
    async fn starts_neutral_and_picks_up_documents() {
        let dir = tempfile::tempdir().expect("tempdir");
        let store = SnapshotStore::new(dir.path());
        let shared = SharedReport::empty();

        let initial = shared.current().await;
        assert_eq!(initial.scores.overall.to_string(), "5.0");
        assert!(initial.insights.is_empty());

        store
            .write_document(
                SourceKind::Trends,
                &json!({ "keywords": [{ "keyword": "skincare", "average_interest": 80 }] }),
            )
            .expect("write should succeed");

        let refreshed = shared.refresh(&store).await;
        assert_eq!(refreshed.scores.search.to_string(), "8.0");

        let current = shared.current().await;
        assert_eq!(current.scores.search, refreshed.scores.search);
    }

    #[tokio::test]
    async fn readers_keep_their_snapshot_across_a_refresh() {
        let dir = tempfile::tempdir().expect("tempdir");
        let store = SnapshotStore::new(dir.path());
        let shared = SharedReport::empty();

        let before = shared.current().await;
        store
            .write_document(
                SourceKind::Trends,
                &json!({ "keywords": [{ "keyword": "cerave", "average_interest": 90 }] }),
            )
            .expect("write should succeed");
        shared.refresh(&store).await;

        // The old snapshot is unchanged; only new readers see the update.
        assert_eq!(before.scores.search.to_string(), "5.0");
        assert_eq!(shared.current().await.scores.search.to_string(), "9.0");
    }
}
