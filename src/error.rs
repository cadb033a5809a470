//! Error types for CaskKV
//!
//! Provides a unified error type for all operations.

use thiserror::Error;

/// Result type alias using CaskError
pub type Result<T> = std::result::Result<T, CaskError>;

/// Unified error type for CaskKV operations
#[derive(Debug, Error)]
pub enum CaskError {
    // -------------------------------------------------------------------------
    // I/O Errors
    // -------------------------------------------------------------------------
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    // -------------------------------------------------------------------------
    // Log Errors
    // -------------------------------------------------------------------------
    #[error("Log corruption detected: {0}")]
    Corruption(String),

    #[error("Record too large: {0}")]
    RecordTooLarge(String),

    #[error("Log full: record of {size} bytes at offset {offset} exceeds the u32 offset space")]
    LogFull { offset: u32, size: usize },

    /// The appended record could not be confirmed on stable storage.
    ///
    /// Fatal: the store is poisoned and must not be retried.
    #[error("Failed to sync log to disk: {0}")]
    SyncFailed(#[source] std::io::Error),

    // -------------------------------------------------------------------------
    // Store State Errors
    // -------------------------------------------------------------------------
    #[error("Store is poisoned by an earlier fatal error")]
    Poisoned,

    #[error("Store is still shared by other handles")]
    StillShared,

    // -------------------------------------------------------------------------
    // Configuration Errors
    // -------------------------------------------------------------------------
    #[error("Configuration error: {0}")]
    Config(String),
}

impl CaskError {
    /// Whether the error leaves the store unusable.
    pub fn is_fatal(&self) -> bool {
        matches!(self, CaskError::SyncFailed(_) | CaskError::Poisoned)
    }
}
