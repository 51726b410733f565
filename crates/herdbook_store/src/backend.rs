//! Store trait definition and the durable snapshot shape.

use crate::error::StoreResult;
use herdbook_model::LoanEntry;
use serde::{Deserialize, Serialize};

/// The durable representation of a catalog: the ordered record sequence
/// plus the append-only loan ledger.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(bound(serialize = "R: Serialize", deserialize = "R: Deserialize<'de>"))]
pub struct Snapshot<R> {
    /// Records in catalog order.
    #[serde(default)]
    pub records: Vec<R>,
    /// Loan ledger entries, oldest first.
    #[serde(default)]
    pub loans: Vec<LoanEntry>,
}

impl<R> Default for Snapshot<R> {
    fn default() -> Self {
        Self {
            records: Vec::new(),
            loans: Vec::new(),
        }
    }
}

/// A persistence backend for one catalog.
///
/// The catalog service depends only on this trait, so backends are
/// swappable without touching service logic.
///
/// # Contract
///
/// - `load` is called once at service start. A store that does not exist
///   yet loads as an empty snapshot; a store whose content is unreadable
///   loads as an empty snapshot with a warning. Only genuine access
///   failures (permissions, locked files) are errors.
/// - `save` overwrites the whole durable representation from the given
///   snapshot.
/// - The targeted hooks (`insert`, `update`, `remove`, `append_loan`) are
///   invoked after the corresponding in-memory mutation, with the already
///   mutated snapshot. Whole-document backends keep the defaults, which
///   rewrite everything; row-oriented backends override them with
///   per-record statements.
pub trait CatalogStore<R>: Send {
    /// Reads the entire catalog.
    ///
    /// # Errors
    ///
    /// Returns an error only when the backend cannot be accessed at all;
    /// missing or unreadable content is an empty snapshot, not an error.
    fn load(&mut self) -> StoreResult<Snapshot<R>>;

    /// Overwrites the entire durable representation.
    ///
    /// # Errors
    ///
    /// Returns an error if the write fails; the caller's in-memory state
    /// is then ahead of durable state.
    fn save(&mut self, snapshot: &Snapshot<R>) -> StoreResult<()>;

    /// Persists one newly added record.
    ///
    /// # Errors
    ///
    /// See [`CatalogStore::save`].
    fn insert(&mut self, record: &R, snapshot: &Snapshot<R>) -> StoreResult<()> {
        let _ = record;
        self.save(snapshot)
    }

    /// Persists one modified record.
    ///
    /// # Errors
    ///
    /// See [`CatalogStore::save`].
    fn update(&mut self, record: &R, snapshot: &Snapshot<R>) -> StoreResult<()> {
        let _ = record;
        self.save(snapshot)
    }

    /// Persists one removal.
    ///
    /// # Errors
    ///
    /// See [`CatalogStore::save`].
    fn remove(&mut self, record: &R, snapshot: &Snapshot<R>) -> StoreResult<()> {
        let _ = record;
        self.save(snapshot)
    }

    /// Persists one new loan ledger entry.
    ///
    /// The default is a no-op: whole-document backends already wrote the
    /// ledger as part of the `update` that accompanies every borrow and
    /// return. Row-oriented backends override this with an append.
    ///
    /// # Errors
    ///
    /// See [`CatalogStore::save`].
    fn append_loan(&mut self, entry: &LoanEntry, snapshot: &Snapshot<R>) -> StoreResult<()> {
        let _ = (entry, snapshot);
        Ok(())
    }
}
