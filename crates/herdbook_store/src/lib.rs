//! # Herdbook Store
//!
//! Persistence backends for Herdbook catalogs.
//!
//! This crate provides the [`CatalogStore`] trait - the boundary between
//! the in-memory catalog and its durable representation - and four
//! interchangeable implementations:
//!
//! - [`MemoryStore`] - for testing and ephemeral catalogs
//! - [`JsonFileStore`] - one JSON document per catalog, rewritten
//!   atomically after every mutation
//! - [`SledStore`] - the whole catalog under a single entry of an
//!   embedded key-value store, CBOR-encoded
//! - [`SqliteStore`] - one flat table per record family with targeted
//!   row mutations; the table stays the source of truth
//!
//! All backends share two load rules: a store that does not exist yet
//! loads as an empty catalog, and a store whose content cannot be parsed
//! loads as an empty catalog with a warning. Neither case is an error.
//!
//! ## Example
//!
//! ```rust
//! use herdbook_model::Book;
//! use herdbook_store::{CatalogStore, MemoryStore, Snapshot};
//!
//! let mut store: MemoryStore<Book> = MemoryStore::new();
//! let mut snapshot = store.load().unwrap();
//! snapshot.records.push(Book::printed("Dune", "Frank Herbert", 1965, 412, 540));
//! store.save(&snapshot).unwrap();
//! assert_eq!(store.load().unwrap().records.len(), 1);
//! ```

#![deny(unsafe_code)]
#![warn(missing_docs)]

mod backend;
mod error;
mod json;
mod kv;
mod memory;
mod sqlite;

pub use backend::{CatalogStore, Snapshot};
pub use error::{StoreError, StoreResult};
pub use json::JsonFileStore;
pub use kv::SledStore;
pub use memory::MemoryStore;
pub use sqlite::{SqlRecord, SqliteStore};
