pub mod app_config;
pub mod config;
pub mod sources;
pub mod watchlist;

use thiserror::Error;

pub use app_config::{AppConfig, Environment};
pub use config::{load_app_config, load_app_config_from_env};
pub use sources::SourceKind;
pub use watchlist::{load_watchlist, PageConfig, WatchlistFile};

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid value for env var {var}: {reason}")]
    InvalidEnvVar { var: String, reason: String },

    #[error("failed to read watchlist file {path}: {source}")]
    WatchlistIo {
        path: String,
        source: std::io::Error,
    },

    #[error("failed to parse watchlist file: {0}")]
    WatchlistParse(#[from] serde_yaml::Error),

    #[error("watchlist validation failed: {0}")]
    Validation(String),
}
