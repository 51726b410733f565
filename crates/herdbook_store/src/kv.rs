//! Embedded key-value store backed by sled.

use crate::backend::{CatalogStore, Snapshot};
use crate::error::{StoreError, StoreResult};
use herdbook_model::CatalogRecord;
use std::marker::PhantomData;
use std::path::Path;
use tracing::warn;

/// The single entry holding the whole catalog.
const CATALOG_KEY: &[u8] = b"catalog";

/// A store that keeps the whole catalog under one named entry of an
/// embedded key-value store.
///
/// There are no per-record keys: every save encodes the full snapshot
/// as CBOR and replaces the entry. A missing entry loads as an empty
/// catalog; an entry that fails to decode loads as an empty catalog with
/// a warning.
pub struct SledStore<R> {
    db: sled::Db,
    _marker: PhantomData<R>,
}

impl<R> SledStore<R> {
    /// Opens or creates the store at the given directory path.
    ///
    /// # Errors
    ///
    /// Returns an error if the underlying database cannot be opened
    /// (for example when another process holds it).
    pub fn open(path: impl AsRef<Path>) -> StoreResult<Self> {
        Ok(Self {
            db: sled::open(path)?,
            _marker: PhantomData,
        })
    }

    /// Opens a temporary store that is discarded on drop.
    ///
    /// # Errors
    ///
    /// Returns an error if the temporary database cannot be created.
    pub fn temporary() -> StoreResult<Self> {
        Ok(Self {
            db: sled::Config::new().temporary(true).open()?,
            _marker: PhantomData,
        })
    }
}

impl<R: CatalogRecord> CatalogStore<R> for SledStore<R> {
    fn load(&mut self) -> StoreResult<Snapshot<R>> {
        let Some(bytes) = self.db.get(CATALOG_KEY)? else {
            return Ok(Snapshot::default());
        };

        match ciborium::de::from_reader(bytes.as_ref()) {
            Ok(snapshot) => Ok(snapshot),
            Err(e) => {
                warn!("catalog entry is unreadable ({e}), starting empty");
                Ok(Snapshot::default())
            }
        }
    }

    fn save(&mut self, snapshot: &Snapshot<R>) -> StoreResult<()> {
        let mut buf = Vec::new();
        ciborium::ser::into_writer(snapshot, &mut buf)
            .map_err(|e| StoreError::backend(format!("CBOR encoding failed: {e}")))?;

        self.db.insert(CATALOG_KEY, buf)?;
        self.db.flush()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use herdbook_model::{Animal, AnimalKind, Book, LoanStatus};
    use tempfile::tempdir;

    #[test]
    fn empty_store_loads_empty() {
        let mut store: SledStore<Book> = SledStore::temporary().unwrap();
        let snapshot = store.load().unwrap();
        assert!(snapshot.records.is_empty());
    }

    #[test]
    fn save_then_load_round_trips() {
        let mut store: SledStore<Animal> = SledStore::temporary().unwrap();

        let snapshot = Snapshot {
            records: vec![Animal::new(
                "C-01",
                "Misha",
                3,
                4.2,
                AnimalKind::Cat {
                    fur_colour: "grey".into(),
                },
            )],
            loans: Vec::new(),
        };
        store.save(&snapshot).unwrap();

        let loaded = store.load().unwrap();
        assert_eq!(loaded.records, snapshot.records);
    }

    #[test]
    fn catalog_survives_reopen() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("register");

        {
            let mut store: SledStore<Book> = SledStore::open(&path).unwrap();
            let mut book = Book::digital("Dune", "Frank Herbert", 1965, "epub", 2048);
            book.id = 1;
            book.status = LoanStatus::Borrowed;
            store
                .save(&Snapshot {
                    records: vec![book],
                    loans: Vec::new(),
                })
                .unwrap();
        }

        let mut reopened: SledStore<Book> = SledStore::open(&path).unwrap();
        let loaded = reopened.load().unwrap();
        assert_eq!(loaded.records.len(), 1);
        assert_eq!(loaded.records[0].status, LoanStatus::Borrowed);
    }

    #[test]
    fn corrupt_entry_loads_empty() {
        let mut store: SledStore<Book> = SledStore::temporary().unwrap();
        store.db.insert(CATALOG_KEY, &b"garbage"[..]).unwrap();

        let snapshot = store.load().unwrap();
        assert!(snapshot.records.is_empty());
    }
}
