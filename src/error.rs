//! Error types for the I/O boundaries of the dashboard.
//!
//! Classification and aggregation never fail; only fetching signals and
//! loading configuration assets can.

use thiserror::Error;

/// Failure talking to the signal backend.
#[derive(Debug, Error)]
pub enum SourceError {
    #[error("backend request failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("backend returned HTTP status {0}")]
    Status(u16),

    #[error("failed to decode backend payload: {0}")]
    Decode(#[from] serde_json::Error),

    #[error("invalid backend url: {0}")]
    Url(#[from] url::ParseError),
}

impl SourceError {
    /// Whether retrying the same request may succeed.
    pub fn is_transient(&self) -> bool {
        match self {
            SourceError::Transport(_) => true,
            SourceError::Status(code) => *code >= 500,
            SourceError::Decode(_) | SourceError::Url(_) => false,
        }
    }
}

/// Failure loading a configuration asset.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse {path}: {source}")]
    Parse {
        path: String,
        #[source]
        source: serde_json::Error,
    },
}
