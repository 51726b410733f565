//! In-memory store for testing and ephemeral catalogs.

use crate::backend::{CatalogStore, Snapshot};
use crate::error::{StoreError, StoreResult};
use herdbook_model::CatalogRecord;

/// A store that keeps the snapshot in memory.
///
/// Suitable for unit tests and for catalogs that do not need to survive
/// the process. The failure switch makes persist-failure handling
/// testable: a failing store still loads, but every write errors.
///
/// # Example
///
/// ```rust
/// use herdbook_model::Animal;
/// use herdbook_store::{CatalogStore, MemoryStore};
///
/// let mut store: MemoryStore<Animal> = MemoryStore::new();
/// assert!(store.load().unwrap().records.is_empty());
/// ```
#[derive(Debug, Default)]
pub struct MemoryStore<R> {
    snapshot: Snapshot<R>,
    fail_saves: bool,
}

impl<R> MemoryStore<R> {
    /// Creates an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self {
            snapshot: Snapshot::default(),
            fail_saves: false,
        }
    }

    /// Creates a store pre-seeded with a snapshot.
    ///
    /// Useful for testing restart scenarios.
    #[must_use]
    pub fn with_snapshot(snapshot: Snapshot<R>) -> Self {
        Self {
            snapshot,
            fail_saves: false,
        }
    }

    /// Creates a store that loads normally but fails every write.
    #[must_use]
    pub fn failing() -> Self {
        Self {
            snapshot: Snapshot::default(),
            fail_saves: true,
        }
    }

    /// Returns the currently persisted snapshot.
    #[must_use]
    pub fn snapshot(&self) -> &Snapshot<R> {
        &self.snapshot
    }
}

impl<R: CatalogRecord> CatalogStore<R> for MemoryStore<R> {
    fn load(&mut self) -> StoreResult<Snapshot<R>> {
        Ok(self.snapshot.clone())
    }

    fn save(&mut self, snapshot: &Snapshot<R>) -> StoreResult<()> {
        if self.fail_saves {
            return Err(StoreError::backend("memory store is set to fail writes"));
        }
        self.snapshot = snapshot.clone();
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use herdbook_model::Book;

    #[test]
    fn save_then_load_round_trips() {
        let mut store: MemoryStore<Book> = MemoryStore::new();

        let mut snapshot = store.load().unwrap();
        snapshot
            .records
            .push(Book::digital("Dune", "Frank Herbert", 1965, "epub", 2048));
        store.save(&snapshot).unwrap();

        let loaded = store.load().unwrap();
        assert_eq!(loaded.records, snapshot.records);
    }

    #[test]
    fn failing_store_loads_but_rejects_writes() {
        let mut store: MemoryStore<Book> = MemoryStore::failing();

        assert!(store.load().is_ok());
        let err = store.save(&Snapshot::default()).unwrap_err();
        assert!(matches!(err, StoreError::Backend { .. }));
    }
}
