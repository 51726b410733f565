//! Whole-document JSON file store.

use crate::backend::{CatalogStore, Snapshot};
use crate::error::StoreResult;
use herdbook_model::CatalogRecord;
use std::fs;
use std::io;
use std::marker::PhantomData;
use std::path::{Path, PathBuf};
use tracing::warn;

/// A store that keeps the whole catalog in one JSON document.
///
/// Every save rewrites the document atomically: the new content is
/// written to a sibling temp file and renamed over the old one, so a
/// crash mid-write leaves the previous document intact.
///
/// A missing file loads as an empty catalog. A file that exists but does
/// not parse loads as an empty catalog with a warning - the old content
/// stays on disk until the first save overwrites it.
pub struct JsonFileStore<R> {
    path: PathBuf,
    _marker: PhantomData<R>,
}

impl<R> JsonFileStore<R> {
    /// Creates a store backed by the given file path.
    ///
    /// No I/O happens here; the file is first touched by `load` or
    /// `save`.
    pub fn open(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            _marker: PhantomData,
        }
    }

    /// Returns the document path.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl<R: CatalogRecord> CatalogStore<R> for JsonFileStore<R> {
    fn load(&mut self) -> StoreResult<Snapshot<R>> {
        let bytes = match fs::read(&self.path) {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(Snapshot::default()),
            Err(e) => return Err(e.into()),
        };

        match serde_json::from_slice(&bytes) {
            Ok(snapshot) => Ok(snapshot),
            Err(e) => {
                warn!(
                    "catalog document {} is unreadable ({e}), starting empty",
                    self.path.display()
                );
                Ok(Snapshot::default())
            }
        }
    }

    fn save(&mut self, snapshot: &Snapshot<R>) -> StoreResult<()> {
        let json = serde_json::to_vec_pretty(snapshot)?;

        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }

        let tmp = self.path.with_extension("tmp");
        fs::write(&tmp, &json)?;
        fs::rename(&tmp, &self.path)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use herdbook_model::{Book, LoanEntry, LoanStatus};
    use tempfile::tempdir;

    fn sample_snapshot() -> Snapshot<Book> {
        let mut book = Book::printed("Dune", "Frank Herbert", 1965, 412, 540);
        book.id = 1;
        book.status = LoanStatus::Borrowed;

        Snapshot {
            records: vec![book],
            loans: vec![LoanEntry {
                record: "1".into(),
                title: "Dune".into(),
                borrower: "Paul".into(),
                status: LoanStatus::Borrowed,
            }],
        }
    }

    #[test]
    fn missing_file_loads_empty() {
        let dir = tempdir().unwrap();
        let mut store: JsonFileStore<Book> = JsonFileStore::open(dir.path().join("catalog.json"));

        let snapshot = store.load().unwrap();
        assert!(snapshot.records.is_empty());
        assert!(snapshot.loans.is_empty());
    }

    #[test]
    fn save_then_load_round_trips() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("catalog.json");
        let snapshot = sample_snapshot();

        let mut store: JsonFileStore<Book> = JsonFileStore::open(&path);
        store.save(&snapshot).unwrap();

        // A fresh store over the same path sees the same content.
        let mut reopened: JsonFileStore<Book> = JsonFileStore::open(&path);
        let loaded = reopened.load().unwrap();
        assert_eq!(loaded.records, snapshot.records);
        assert_eq!(loaded.loans, snapshot.loans);
    }

    #[test]
    fn corrupt_document_loads_empty() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("catalog.json");
        fs::write(&path, b"{ not json at all").unwrap();

        let mut store: JsonFileStore<Book> = JsonFileStore::open(&path);
        let snapshot = store.load().unwrap();
        assert!(snapshot.records.is_empty());
    }

    #[test]
    fn save_leaves_no_temp_file_behind() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("catalog.json");

        let mut store: JsonFileStore<Book> = JsonFileStore::open(&path);
        store.save(&sample_snapshot()).unwrap();

        assert!(path.exists());
        assert!(!path.with_extension("tmp").exists());
    }

    #[test]
    fn save_creates_parent_directories() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("nested").join("deep").join("catalog.json");

        let mut store: JsonFileStore<Book> = JsonFileStore::open(&path);
        store.save(&sample_snapshot()).unwrap();
        assert!(path.exists());
    }
}
