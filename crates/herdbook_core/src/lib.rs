//! # Herdbook Core
//!
//! Catalog service for Herdbook record families.
//!
//! A [`Catalog`] owns the in-memory record sequence and the loan ledger,
//! delegates durability to a boxed [`herdbook_store::CatalogStore`], and
//! guards the borrow/return lifecycle. It is single-threaded and
//! synchronous: one operation at a time, each mutation persisted before
//! the call returns.
//!
//! ## Example
//!
//! ```rust
//! use herdbook_core::Catalog;
//! use herdbook_model::{Book, Lookup};
//! use herdbook_store::MemoryStore;
//!
//! let mut catalog = Catalog::open(Box::new(MemoryStore::new()));
//! let stored = catalog
//!     .add(Book::printed("Dune", "Frank Herbert", 1965, 412, 540))
//!     .unwrap();
//!
//! catalog.check_out(&Lookup::Key(stored.id), "Paul").unwrap();
//! assert!(catalog.check_out(&Lookup::Key(stored.id), "Leto").is_err());
//! ```

#![deny(unsafe_code)]
#![warn(missing_docs)]

mod catalog;
mod error;

pub use catalog::{Catalog, Updated};
pub use error::{CatalogError, CatalogResult};
