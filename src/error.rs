//! Error types for the latency tracker

use thiserror::Error;

/// Errors surfaced by tracking, statistics and import/export operations
#[derive(Error, Debug)]
pub enum TrackerError {
    /// `stop` was called for a label that was never started or has no pending start
    #[error("unknown label '{0}': no pending start to stop")]
    UnknownLabel(String),

    /// Statistics requested for a label without completed measurements
    #[error("series '{0}' has no completed measurements")]
    EmptySeries(String),

    /// An imported table could not be interpreted
    #[error("malformed import from {origin}: {reason}")]
    MalformedImport { origin: String, reason: String },

    #[error("label must not be empty")]
    EmptyLabel,

    /// Label cannot be used as a file stem
    #[error("label '{0}' cannot be used as a table file name")]
    UnsafeTableName(String),

    /// A workload pause that is not a representable duration
    #[error("invalid pause of {0} seconds")]
    InvalidDuration(f64),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl TrackerError {
    pub(crate) fn malformed(origin: impl Into<String>, reason: impl Into<String>) -> Self {
        TrackerError::MalformedImport {
            origin: origin.into(),
            reason: reason.into(),
        }
    }
}

/// Result alias used throughout the library
pub type Result<T> = std::result::Result<T, TrackerError>;
