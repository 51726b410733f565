//! # Herdbook Model
//!
//! Record model for Herdbook catalogs.
//!
//! This crate provides:
//! - The [`CatalogRecord`] trait - the seam between record families, the
//!   catalog service, and the persistence backends
//! - The [`Lendable`] trait for records with a borrow/return lifecycle
//! - Two concrete record families: [`Book`] (library catalog) and
//!   [`Animal`] (farm register)
//! - Loan ledger vocabulary: [`LoanStatus`], [`LoanEntry`]
//!
//! The model is deliberately permissive: it coerces shapes, it does not
//! validate content. Constraints such as non-empty titles or positive
//! counts are enforced by callers before construction.

#![deny(unsafe_code)]
#![warn(missing_docs)]

mod animal;
mod book;
mod loan;
mod record;

pub use animal::{Animal, AnimalKind, AnimalPatch};
pub use book::{Book, BookPatch, Edition};
pub use loan::{LoanEntry, LoanStatus};
pub use record::{CatalogRecord, FieldValue, Lendable, Lookup};
