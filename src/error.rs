//! Error types for Crocus.
//!
//! Query-time problems caused by user input (unknown qualifiers, queries
//! that tokenize to nothing) are never errors; they degrade to empty ids or
//! a diagnostic carried on [`crate::Results`]. Only load-time and
//! configuration failures surface as [`CrocusError`].

use std::path::PathBuf;

use thiserror::Error;

/// Crate-wide result alias.
pub type Result<T> = std::result::Result<T, CrocusError>;

/// All errors produced by Crocus.
#[derive(Debug, Error)]
pub enum CrocusError {
    /// The registry has no index under the requested name.
    #[error("unknown index: {name}")]
    UnknownIndex { name: String },

    /// A snapshot file was expected at `path` but does not exist.
    #[error("snapshot missing: {path}")]
    SnapshotMissing { path: PathBuf },

    /// A schema or category was configured inconsistently.
    #[error("invalid configuration: {message}")]
    InvalidConfig { message: String },

    /// Snapshot I/O failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Snapshot (de)serialization failed.
    #[error("snapshot format error: {0}")]
    Json(#[from] serde_json::Error),
}

impl CrocusError {
    /// Create an unknown-index error.
    pub fn unknown_index(name: impl Into<String>) -> Self {
        CrocusError::UnknownIndex { name: name.into() }
    }

    /// Create a snapshot-missing error.
    pub fn snapshot_missing(path: impl Into<PathBuf>) -> Self {
        CrocusError::SnapshotMissing { path: path.into() }
    }

    /// Create an invalid-configuration error.
    pub fn invalid_config(message: impl Into<String>) -> Self {
        CrocusError::InvalidConfig {
            message: message.into(),
        }
    }
}
