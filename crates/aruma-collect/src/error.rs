use std::path::PathBuf;

use thiserror::Error;

/// Errors raised while collecting or persisting source documents.
#[derive(Debug, Error)]
pub enum CollectError {
    /// Network or TLS failure from the underlying HTTP client.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The Graph API returned an error envelope.
    #[error("Graph API error: {0}")]
    Api(String),

    /// A response body could not be deserialized into the expected type.
    #[error("JSON deserialization error for {context}: {source}")]
    Deserialize {
        context: String,
        #[source]
        source: serde_json::Error,
    },

    /// A document could not be serialized for writing.
    #[error("JSON serialization error: {0}")]
    Serialize(#[source] serde_json::Error),

    /// Filesystem failure while writing a snapshot.
    #[error("I/O error at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}
