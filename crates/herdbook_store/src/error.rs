//! Error types for store operations.

use std::io;
use thiserror::Error;

/// Result type for store operations.
pub type StoreResult<T> = Result<T, StoreError>;

/// Errors that can occur while persisting or loading a catalog.
#[derive(Debug, Error)]
pub enum StoreError {
    /// An I/O error occurred.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// JSON document could not be produced.
    #[error("JSON codec error: {0}")]
    Json(#[from] serde_json::Error),

    /// Key-value store error.
    #[error("key-value store error: {0}")]
    Kv(#[from] sled::Error),

    /// SQL store error.
    #[error("SQL store error: {0}")]
    Sql(#[from] rusqlite::Error),

    /// Stored data is present but unreadable.
    #[error("store corrupted: {message}")]
    Corrupt {
        /// Description of what could not be read.
        message: String,
    },

    /// Any other backend failure.
    #[error("backend error: {message}")]
    Backend {
        /// Description of the failure.
        message: String,
    },
}

impl StoreError {
    /// Creates a corruption error.
    pub fn corrupt(message: impl Into<String>) -> Self {
        Self::Corrupt {
            message: message.into(),
        }
    }

    /// Creates a generic backend error.
    pub fn backend(message: impl Into<String>) -> Self {
        Self::Backend {
            message: message.into(),
        }
    }
}
