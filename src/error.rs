//! Error types for diskkv
//!
//! Provides a unified error type for all operations.

use std::path::PathBuf;

use thiserror::Error;

/// Result type alias using KvError
pub type Result<T> = std::result::Result<T, KvError>;

/// Unified error type for diskkv operations
#[derive(Debug, Error)]
pub enum KvError {
    // -------------------------------------------------------------------------
    // Codec Errors
    // -------------------------------------------------------------------------
    #[error("Encoding error: {0}")]
    Encoding(#[source] serde_json::Error),

    #[error("Parse error: {0}")]
    Parse(#[source] serde_json::Error),

    #[error("Decoding error: invalid token {token:?}: {source}")]
    Decoding {
        token: String,
        #[source]
        source: base64::DecodeError,
    },

    // -------------------------------------------------------------------------
    // Storage Errors
    // -------------------------------------------------------------------------
    #[error("Storage error: failed to {context} {}: {source}", .path.display())]
    Storage {
        context: &'static str,
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    // -------------------------------------------------------------------------
    // Configuration Errors
    // -------------------------------------------------------------------------
    #[error("Configuration error: {0}")]
    Config(String),

    // -------------------------------------------------------------------------
    // Runtime Errors
    // -------------------------------------------------------------------------
    #[error("Store task failed: {0}")]
    TaskJoin(String),
}

impl KvError {
    /// Wrap an I/O error with the step and path that produced it
    pub fn storage(context: &'static str, path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        KvError::Storage {
            context,
            path: path.into(),
            source,
        }
    }

    /// True for failures of the underlying file system
    pub fn is_storage(&self) -> bool {
        matches!(self, KvError::Storage { .. })
    }
}
