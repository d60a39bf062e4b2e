use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

/// The four signal sources the pipeline knows about, together with the
/// on-disk layout each producer writes.
///
/// The analytics source predates the snapshot convention: its latest pointer
/// lives at `mock/ga4_data.json` rather than `analytics/latest.json`, and the
/// dashboard consumer depends on that path.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SourceKind {
    Trends,
    Tiktok,
    Meta,
    Analytics,
}

impl SourceKind {
    pub const ALL: [SourceKind; 4] = [
        SourceKind::Trends,
        SourceKind::Tiktok,
        SourceKind::Meta,
        SourceKind::Analytics,
    ];

    #[must_use]
    pub fn slug(self) -> &'static str {
        match self {
            SourceKind::Trends => "trends",
            SourceKind::Tiktok => "tiktok",
            SourceKind::Meta => "meta",
            SourceKind::Analytics => "analytics",
        }
    }

    /// Directory under the data dir this source writes into.
    #[must_use]
    pub fn dir_name(self) -> &'static str {
        match self {
            SourceKind::Analytics => "mock",
            _ => self.slug(),
        }
    }

    /// File name of the always-current pointer within [`dir_name`](Self::dir_name).
    #[must_use]
    pub fn latest_file(self) -> &'static str {
        match self {
            SourceKind::Analytics => "ga4_data.json",
            _ => "latest.json",
        }
    }

    /// Prefix for dated snapshot files, e.g. `trends_20251031.json`.
    #[must_use]
    pub fn snapshot_prefix(self) -> &'static str {
        match self {
            SourceKind::Analytics => "ga4",
            _ => self.slug(),
        }
    }

    /// Human-readable name used in insight `source` labels.
    #[must_use]
    pub fn display_name(self) -> &'static str {
        match self {
            SourceKind::Trends => "Google Trends",
            SourceKind::Tiktok => "TikTok",
            SourceKind::Meta => "Meta/Facebook",
            SourceKind::Analytics => "Google Analytics 4",
        }
    }

    /// Full path of this source's latest pointer under `data_dir`.
    #[must_use]
    pub fn latest_path(self, data_dir: &Path) -> PathBuf {
        data_dir.join(self.dir_name()).join(self.latest_file())
    }
}

impl std::fmt::Display for SourceKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.slug())
    }
}

impl std::str::FromStr for SourceKind {
    type Err = String;

    /// Accepts the canonical slug; `ga4` is tolerated as an operator alias
    /// for `analytics`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "trends" => Ok(SourceKind::Trends),
            "tiktok" => Ok(SourceKind::Tiktok),
            "meta" => Ok(SourceKind::Meta),
            "analytics" | "ga4" => Ok(SourceKind::Analytics),
            other => Err(format!(
                "unknown source '{other}'; expected one of trends, tiktok, meta, analytics"
            )),
        }
    }
}
