//! The catalog service: in-memory record sequence, loan ledger, and the
//! persistence boundary.

use crate::error::{CatalogError, CatalogResult};
use herdbook_model::{CatalogRecord, Lendable, LoanEntry, LoanStatus, Lookup};
use herdbook_store::{CatalogStore, Snapshot};
use tracing::warn;

/// Outcome of a partial update.
#[derive(Debug, Clone)]
pub struct Updated<R> {
    /// The record after the patch.
    pub record: R,
    /// Names of supplied fields the record's subtype does not declare.
    /// They were left untouched.
    pub skipped: Vec<&'static str>,
}

/// The registry of one record family.
///
/// Owns the ordered in-memory sequence plus the loan ledger and mirrors
/// both to a [`CatalogStore`] after every mutation. Lookups are linear
/// scans - by identifier, or case-insensitively by display name, first
/// match wins - which is the right trade for catalogs measured in
/// hundreds of records.
///
/// There is no rollback: when a persist fails the operation reports
/// [`CatalogError::Persist`] and the in-memory state keeps the mutation,
/// now ahead of durable state.
pub struct Catalog<R: CatalogRecord> {
    snapshot: Snapshot<R>,
    store: Box<dyn CatalogStore<R>>,
}

impl<R: CatalogRecord> Catalog<R> {
    /// Opens a catalog over the given store, loading it once.
    ///
    /// Load trouble never propagates: an unavailable or unreadable store
    /// degrades to an empty catalog with a warning, and the process
    /// keeps running.
    pub fn open(mut store: Box<dyn CatalogStore<R>>) -> Self {
        let snapshot = match store.load() {
            Ok(snapshot) => snapshot,
            Err(e) => {
                warn!("catalog storage unavailable ({e}), starting empty");
                Snapshot::default()
            }
        };

        Self { snapshot, store }
    }

    /// Returns the records in catalog order.
    ///
    /// This is a read-only view; mutation goes through the operations.
    #[must_use]
    pub fn records(&self) -> &[R] {
        &self.snapshot.records
    }

    /// Returns an iterator over the records in catalog order.
    pub fn iter(&self) -> impl Iterator<Item = &R> {
        self.snapshot.records.iter()
    }

    /// Returns the number of records.
    #[must_use]
    pub fn len(&self) -> usize {
        self.snapshot.records.len()
    }

    /// Returns `true` when the catalog holds no records.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.snapshot.records.is_empty()
    }

    /// Returns the loan ledger, oldest entry first.
    #[must_use]
    pub fn loans(&self) -> &[LoanEntry] {
        &self.snapshot.loans
    }

    fn position(&self, lookup: &Lookup<R::Key>) -> Option<usize> {
        self.snapshot.records.iter().position(|record| match lookup {
            Lookup::Key(key) => record.key() == key,
            Lookup::Name(name) => record.display_name().eq_ignore_ascii_case(name),
        })
    }

    fn locate(&self, lookup: &Lookup<R::Key>) -> CatalogResult<usize> {
        self.position(lookup).ok_or_else(|| CatalogError::NotFound {
            lookup: lookup.to_string(),
        })
    }

    /// Finds the first record matching the lookup.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError::NotFound`] when nothing matches.
    pub fn find(&self, lookup: &Lookup<R::Key>) -> CatalogResult<&R> {
        let index = self.locate(lookup)?;
        Ok(&self.snapshot.records[index])
    }

    /// Adds a record and persists it.
    ///
    /// Auto-incrementing families get their key assigned here as
    /// `max existing + 1`; natural-key families must arrive with their
    /// key already set. Returns the record as stored, including the
    /// assigned key.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError::DuplicateKey`] when the identifier is
    /// already taken, or [`CatalogError::Persist`] when the write fails
    /// (the record stays in memory).
    pub fn add(&mut self, mut record: R) -> CatalogResult<R> {
        let next = self
            .snapshot
            .records
            .iter()
            .filter_map(|r| r.sequence())
            .max()
            .unwrap_or(0)
            + 1;
        record.claim_key(next);

        if self
            .snapshot
            .records
            .iter()
            .any(|r| r.key() == record.key())
        {
            return Err(CatalogError::DuplicateKey {
                key: record.key_text(),
            });
        }

        self.snapshot.records.push(record.clone());
        self.store.insert(&record, &self.snapshot)?;
        Ok(record)
    }

    /// Applies a partial update to the first matching record and
    /// persists it.
    ///
    /// Supplied fields the record's subtype does not declare are left
    /// untouched and reported in [`Updated::skipped`], with a warning
    /// logged.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError::NotFound`] or [`CatalogError::Persist`].
    pub fn update(&mut self, lookup: &Lookup<R::Key>, patch: R::Patch) -> CatalogResult<Updated<R>> {
        let index = self.locate(lookup)?;

        let skipped = self.snapshot.records[index].apply(patch);
        let record = self.snapshot.records[index].clone();
        if !skipped.is_empty() {
            warn!(
                "update of record {} ignored fields it does not declare: {}",
                record.key_text(),
                skipped.join(", ")
            );
        }

        self.store.update(&record, &self.snapshot)?;
        Ok(Updated { record, skipped })
    }

    /// Removes the first matching record and persists the removal.
    ///
    /// Returns the removed record.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError::NotFound`] or [`CatalogError::Persist`].
    pub fn delete(&mut self, lookup: &Lookup<R::Key>) -> CatalogResult<R> {
        let index = self.locate(lookup)?;
        let record = self.snapshot.records.remove(index);
        self.store.remove(&record, &self.snapshot)?;
        Ok(record)
    }
}

impl<R: Lendable> Catalog<R> {
    /// Borrows the first matching record for `borrower`.
    ///
    /// Only legal from `available`; flips the status to `borrowed` and
    /// appends a ledger entry.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError::InvalidTransition`] when the record is
    /// already borrowed, [`CatalogError::NotFound`], or
    /// [`CatalogError::Persist`].
    pub fn check_out(&mut self, lookup: &Lookup<R::Key>, borrower: &str) -> CatalogResult<R> {
        let index = self.locate(lookup)?;

        let status = self.snapshot.records[index].status();
        if status != LoanStatus::Available {
            return Err(CatalogError::InvalidTransition {
                key: self.snapshot.records[index].key_text(),
                action: "borrow",
                status,
            });
        }

        self.snapshot.records[index].set_status(LoanStatus::Borrowed);
        let record = self.snapshot.records[index].clone();

        let entry = LoanEntry {
            record: record.key_text(),
            title: record.display_name().to_string(),
            borrower: borrower.to_string(),
            status: LoanStatus::Borrowed,
        };
        self.snapshot.loans.push(entry.clone());

        self.store.update(&record, &self.snapshot)?;
        self.store.append_loan(&entry, &self.snapshot)?;
        Ok(record)
    }

    /// Returns the first matching record to the shelf.
    ///
    /// Only legal from `borrowed`. The ledger entry closing the loan
    /// carries the borrower recorded by the matching check-out.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError::InvalidTransition`] when the record is
    /// not borrowed, [`CatalogError::NotFound`], or
    /// [`CatalogError::Persist`].
    pub fn check_in(&mut self, lookup: &Lookup<R::Key>) -> CatalogResult<R> {
        let index = self.locate(lookup)?;

        let status = self.snapshot.records[index].status();
        if status != LoanStatus::Borrowed {
            return Err(CatalogError::InvalidTransition {
                key: self.snapshot.records[index].key_text(),
                action: "return",
                status,
            });
        }

        self.snapshot.records[index].set_status(LoanStatus::Available);
        let record = self.snapshot.records[index].clone();

        let key_text = record.key_text();
        let borrower = self
            .snapshot
            .loans
            .iter()
            .rev()
            .find(|e| e.record == key_text && e.status == LoanStatus::Borrowed)
            .map(|e| e.borrower.clone())
            .unwrap_or_default();

        let entry = LoanEntry {
            record: key_text,
            title: record.display_name().to_string(),
            borrower,
            status: LoanStatus::Available,
        };
        self.snapshot.loans.push(entry.clone());

        self.store.update(&record, &self.snapshot)?;
        self.store.append_loan(&entry, &self.snapshot)?;
        Ok(record)
    }
}
