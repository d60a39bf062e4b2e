//! Snapshot persistence.
//!
//! Each source owns one subdirectory of the data directory. A collection
//! cycle writes a dated snapshot (`<prefix>_<YYYYMMDD>.json`) and replaces
//! the pointer file the dashboard reads (`latest.json`, or `ga4_data.json`
//! for the analytics mock). The pointer is written to a temp file and
//! renamed so readers never observe a half-written document.

use std::fs;
use std::path::{Path, PathBuf};

use chrono::Local;
use serde::de::DeserializeOwned;
use serde::Serialize;

use aruma_core::SourceKind;
use aruma_signals::{
    AnalyticsDocument, MetaDocument, SourceBundle, TiktokDocument, TrendsDocument,
};

use crate::error::CollectError;

/// Read/write access to the on-disk source documents.
#[derive(Debug, Clone)]
pub struct SnapshotStore {
    data_dir: PathBuf,
}

impl SnapshotStore {
    pub fn new(data_dir: impl Into<PathBuf>) -> Self {
        Self {
            data_dir: data_dir.into(),
        }
    }

    #[must_use]
    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }

    fn source_dir(&self, source: SourceKind) -> PathBuf {
        self.data_dir.join(source.dir_name())
    }

    /// Path of the pointer file for a source.
    #[must_use]
    pub fn latest_path(&self, source: SourceKind) -> PathBuf {
        self.source_dir(source).join(source.latest_file())
    }

    /// Writes the dated snapshot and atomically replaces the pointer file.
    /// Returns the dated snapshot path.
    ///
    /// # Errors
    ///
    /// Returns [`CollectError::Serialize`] if the document cannot be encoded,
    /// or [`CollectError::Io`] on any filesystem failure.
    pub fn write_document<T: Serialize>(
        &self,
        source: SourceKind,
        document: &T,
    ) -> Result<PathBuf, CollectError> {
        let dir = self.source_dir(source);
        fs::create_dir_all(&dir).map_err(|e| CollectError::Io {
            path: dir.clone(),
            source: e,
        })?;

        let body = serde_json::to_vec_pretty(document).map_err(CollectError::Serialize)?;

        let dated = dir.join(format!(
            "{}_{}.json",
            source.snapshot_prefix(),
            Local::now().format("%Y%m%d")
        ));
        fs::write(&dated, &body).map_err(|e| CollectError::Io {
            path: dated.clone(),
            source: e,
        })?;

        let latest = dir.join(source.latest_file());
        let tmp = dir.join(format!("{}.tmp", source.latest_file()));
        fs::write(&tmp, &body).map_err(|e| CollectError::Io {
            path: tmp.clone(),
            source: e,
        })?;
        fs::rename(&tmp, &latest).map_err(|e| CollectError::Io {
            path: latest.clone(),
            source: e,
        })?;

        tracing::debug!(
            source = %source,
            path = %dated.display(),
            "wrote source snapshot"
        );
        Ok(dated)
    }

    /// Reads and parses the pointer file for a source. Any failure, from a
    /// missing file to malformed JSON, degrades to `None` so a bad document
    /// never takes down an aggregation pass.
    #[must_use]
    pub fn read_latest<T: DeserializeOwned>(&self, source: SourceKind) -> Option<T> {
        let path = self.latest_path(source);
        let text = match fs::read_to_string(&path) {
            Ok(text) => text,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                tracing::debug!(source = %source, path = %path.display(), "no document yet");
                return None;
            }
            Err(e) => {
                tracing::warn!(source = %source, error = %e, "failed to read source document");
                return None;
            }
        };
        match serde_json::from_str(&text) {
            Ok(document) => Some(document),
            Err(e) => {
                tracing::warn!(
                    source = %source,
                    error = %e,
                    "malformed source document, treating as missing"
                );
                None
            }
        }
    }

    /// Reads the pointer file as raw JSON, for serving documents verbatim.
    #[must_use]
    pub fn read_latest_raw(&self, source: SourceKind) -> Option<serde_json::Value> {
        self.read_latest(source)
    }

    /// Loads whichever of the four documents are present and parseable.
    #[must_use]
    pub fn load_bundle(&self) -> SourceBundle {
        SourceBundle {
            trends: self.read_latest(SourceKind::Trends),
            tiktok: self.read_latest(SourceKind::Tiktok),
            meta: self.read_latest(SourceKind::Meta),
            analytics: self.read_latest(SourceKind::Analytics),
        }
    }

    /// Like [`load_bundle`](Self::load_bundle), but reads the four documents
    /// concurrently off the blocking pool. This is the load path the server's
    /// refresh uses so a slow disk never stalls the request runtime.
    pub async fn load_bundle_concurrent(&self) -> SourceBundle {
        let (trends, tiktok, meta, analytics) = futures::join!(
            self.read_latest_off_thread::<TrendsDocument>(SourceKind::Trends),
            self.read_latest_off_thread::<TiktokDocument>(SourceKind::Tiktok),
            self.read_latest_off_thread::<MetaDocument>(SourceKind::Meta),
            self.read_latest_off_thread::<AnalyticsDocument>(SourceKind::Analytics),
        );
        SourceBundle {
            trends,
            tiktok,
            meta,
            analytics,
        }
    }

    async fn read_latest_off_thread<T>(&self, source: SourceKind) -> Option<T>
    where
        T: DeserializeOwned + Send + 'static,
    {
        let store = self.clone();
        match tokio::task::spawn_blocking(move || store.read_latest::<T>(source)).await {
            Ok(document) => document,
            Err(e) => {
                tracing::error!(source = %source, error = %e, "document read task failed");
                None
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use aruma_signals::TrendsDocument;
    use serde_json::json;

    fn store() -> (tempfile::TempDir, SnapshotStore) {
        let dir = tempfile::tempdir().expect("tempdir");
        let store = SnapshotStore::new(dir.path());
        (dir, store)
    }

    #[test]
    fn write_document_creates_dated_and_pointer_files() {
        let (_dir, store) = store();
        let doc = json!({
            "timestamp": "2026-08-25T06:00:00Z",
            "keywords": [{ "keyword": "skincare", "average_interest": 78 }]
        });
        let dated = store
            .write_document(SourceKind::Trends, &doc)
            .expect("write should succeed");

        assert!(dated.exists());
        let name = dated.file_name().unwrap().to_string_lossy().into_owned();
        assert!(name.starts_with("trends_") && name.ends_with(".json"), "{name}");

        let latest = store.latest_path(SourceKind::Trends);
        assert!(latest.exists());
        assert_eq!(
            fs::read(&dated).unwrap(),
            fs::read(&latest).unwrap(),
            "pointer must match the dated snapshot"
        );
    }

    #[test]
    fn analytics_pointer_uses_mock_layout() {
        let (_dir, store) = store();
        let doc = json!({ "overview": { "totalUsers": 1, "conversions": 1 } });
        let dated = store
            .write_document(SourceKind::Analytics, &doc)
            .expect("write should succeed");

        assert!(dated.to_string_lossy().contains("mock"));
        assert!(dated
            .file_name()
            .unwrap()
            .to_string_lossy()
            .starts_with("ga4_"));
        assert!(store.data_dir().join("mock/ga4_data.json").exists());
    }

    #[test]
    fn read_latest_round_trips_a_document() {
        let (_dir, store) = store();
        let doc = json!({
            "region": "PE",
            "keywords": [{ "keyword": "cerave", "average_interest": 85 }]
        });
        store
            .write_document(SourceKind::Trends, &doc)
            .expect("write should succeed");

        let parsed: TrendsDocument = store.read_latest(SourceKind::Trends).expect("should parse");
        assert_eq!(parsed.region.as_deref(), Some("PE"));
        assert_eq!(parsed.keywords.len(), 1);
        assert_eq!(parsed.keywords[0].keyword, "cerave");
    }

    #[test]
    fn read_latest_returns_none_when_missing() {
        let (_dir, store) = store();
        let parsed: Option<TrendsDocument> = store.read_latest(SourceKind::Trends);
        assert!(parsed.is_none());
    }

    #[test]
    fn read_latest_returns_none_on_malformed_json() {
        let (_dir, store) = store();
        let dir = store.data_dir().join("tiktok");
        fs::create_dir_all(&dir).unwrap();
        fs::write(dir.join("latest.json"), b"{ not json").unwrap();

        let parsed: Option<serde_json::Value> = store.read_latest(SourceKind::Tiktok);
        assert!(parsed.is_none());
    }

    #[test]
    fn load_bundle_tolerates_partial_data() {
        let (_dir, store) = store();
        store
            .write_document(
                SourceKind::Trends,
                &json!({ "keywords": [{ "keyword": "retinol", "average_interest": 65 }] }),
            )
            .expect("write should succeed");

        let bundle = store.load_bundle();
        assert!(bundle.trends.is_some());
        assert!(bundle.tiktok.is_none());
        assert!(bundle.meta.is_none());
        assert!(bundle.analytics.is_none());
        assert_eq!(bundle.available_count(), 1);
    }

    #[tokio::test]
    async fn concurrent_load_matches_sequential_load() {
        let (_dir, store) = store();
        store
            .write_document(
                SourceKind::Trends,
                &json!({ "keywords": [{ "keyword": "skincare", "average_interest": 78 }] }),
            )
            .expect("write should succeed");
        store
            .write_document(
                SourceKind::Analytics,
                &json!({ "overview": { "totalUsers": 100, "conversionRate": 0.05 } }),
            )
            .expect("write should succeed");

        let bundle = store.load_bundle_concurrent().await;
        assert!(bundle.trends.is_some());
        assert!(bundle.tiktok.is_none());
        assert!(bundle.meta.is_none());
        assert!(bundle.analytics.is_some());
        assert_eq!(bundle.available_count(), store.load_bundle().available_count());
    }
}
