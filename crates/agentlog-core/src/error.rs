//! Error types for the agent logging facility

use std::path::PathBuf;

use thiserror::Error;

/// Main error type for logging operations
#[derive(Error, Debug)]
pub enum LogError {
    /// Log directory or log file could not be set up when the logger was built
    #[error("Failed to initialize log destination {path}: {source}")]
    Init {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Writing to a console or file medium failed
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON payload could not be serialized or parsed
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Record pattern references an unknown placeholder or is unbalanced
    #[error("Invalid record pattern: {0}")]
    Pattern(String),

    /// Unknown level name
    #[error("Unknown log level: {0}")]
    UnknownLevel(String),
}

impl LogError {
    pub(crate) fn init(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Init {
            path: path.into(),
            source,
        }
    }
}

/// Result type alias using LogError
pub type LogResult<T> = Result<T, LogError>;
