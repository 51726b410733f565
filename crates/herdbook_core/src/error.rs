//! Error types for catalog operations.

use herdbook_model::LoanStatus;
use herdbook_store::StoreError;
use thiserror::Error;

/// Result type for catalog operations.
pub type CatalogResult<T> = Result<T, CatalogError>;

/// Errors reported by catalog operations.
///
/// Every variant is a user-facing rejection: none of them should
/// terminate the process, and apart from [`CatalogError::Persist`] none
/// of them leaves any state changed.
#[derive(Debug, Error)]
pub enum CatalogError {
    /// No record matched the lookup.
    #[error("no record matches {lookup}")]
    NotFound {
        /// The lookup in display form.
        lookup: String,
    },

    /// A record with this identifier already exists.
    #[error("a record with key {key} already exists")]
    DuplicateKey {
        /// The conflicting identifier.
        key: String,
    },

    /// A borrow or return was attempted against the wrong status.
    #[error("cannot {action} record {key}: it is {status}")]
    InvalidTransition {
        /// The record's identifier.
        key: String,
        /// The attempted action, `"borrow"` or `"return"`.
        action: &'static str,
        /// The status the record actually has.
        status: LoanStatus,
    },

    /// The in-memory mutation succeeded but writing it to durable
    /// storage failed.
    ///
    /// In-memory state is now ahead of durable state; there is no
    /// automatic retry or rollback.
    #[error("catalog changed in memory but persisting failed: {0}")]
    Persist(#[from] StoreError),
}
