//! ydb-metrics error types
//!
//! Errors only surface while loading configuration. Recording metrics never
//! returns an error: names always resolve to something usable, and backend
//! registration failures panic at setup time.

use std::path::PathBuf;

/// Configuration loading errors
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("failed to read config file {path:?}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse metrics config: {0}")]
    Parse(#[from] toml::de::Error),

    /// A `names` entry referenced a metric kind that does not exist.
    #[error("unknown metric kind: {0}")]
    UnknownKind(String),

    #[error("invalid delimiter {0:?}: must not be blank")]
    InvalidDelimiter(String),
}

/// Result type alias for configuration operations
pub type Result<T> = std::result::Result<T, Error>;
