//! The record trait shared by every catalog family.

use crate::loan::LoanStatus;
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::fmt;

/// A single cell of a record's tabular projection.
///
/// Fields another subtype declares but this record does not carry are
/// projected as [`FieldValue::Null`].
#[derive(Debug, Clone, PartialEq)]
pub enum FieldValue {
    /// Free text.
    Text(String),
    /// A whole number.
    Integer(i64),
    /// A decimal number.
    Real(f64),
    /// The field does not apply to this record's subtype.
    Null,
}

impl fmt::Display for FieldValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Text(text) => f.write_str(text),
            Self::Integer(value) => write!(f, "{value}"),
            Self::Real(value) => write!(f, "{value}"),
            Self::Null => f.write_str("-"),
        }
    }
}

/// How a record is located in a catalog.
///
/// Lookups are resolved by a linear scan; the first match wins. Name
/// matching is case-insensitive and exact.
#[derive(Debug, Clone, PartialEq)]
pub enum Lookup<K> {
    /// Match on the identifier.
    Key(K),
    /// Match on the display name, ignoring ASCII case.
    Name(String),
}

impl<K> Lookup<K> {
    /// Builds a name lookup.
    pub fn name(name: impl Into<String>) -> Self {
        Self::Name(name.into())
    }
}

impl<K: fmt::Display> fmt::Display for Lookup<K> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Key(key) => write!(f, "key {key}"),
            Self::Name(name) => write!(f, "name {name:?}"),
        }
    }
}

/// A record that can live in a catalog.
///
/// Implementations are plain data: the trait exposes identity, the display
/// name used for lookups, a tabular projection, and partial-update
/// application. No validation happens here - the catalog and its callers
/// own every constraint.
pub trait CatalogRecord:
    Clone + fmt::Debug + Serialize + DeserializeOwned + Send + 'static
{
    /// The identifier type. Unique within a catalog.
    type Key: Clone + PartialEq + fmt::Debug + fmt::Display;

    /// Partial-update carrier accepted by [`CatalogRecord::apply`].
    type Patch;

    /// Returns the record's identifier.
    fn key(&self) -> &Self::Key;

    /// Returns the identifier in display form, as used by logs and the
    /// loan ledger.
    fn key_text(&self) -> String {
        self.key().to_string()
    }

    /// Returns the name or title matched by [`Lookup::Name`].
    fn display_name(&self) -> &str;

    /// Returns the numeric value of the key for auto-incrementing key
    /// schemes, or `None` when keys are caller-supplied.
    fn sequence(&self) -> Option<u64> {
        None
    }

    /// Claims `next` as this record's key if the key scheme is
    /// auto-incrementing and no key has been assigned yet.
    ///
    /// The default is a no-op, which is correct for natural-key records.
    fn claim_key(&mut self, next: u64) {
        let _ = next;
    }

    /// Projects the record into `(field name, value)` pairs for tabular
    /// display. Subtype fields the record does not carry appear as
    /// [`FieldValue::Null`].
    fn describe(&self) -> Vec<(&'static str, FieldValue)>;

    /// Overwrites every supplied field the record's subtype declares.
    ///
    /// Returns the names of supplied fields the subtype does NOT declare;
    /// those are left untouched and reported so the caller can warn
    /// instead of silently dropping input.
    fn apply(&mut self, patch: Self::Patch) -> Vec<&'static str>;
}

/// A record with a borrow/return lifecycle.
///
/// Families without a lifecycle (the farm register) simply do not
/// implement this, so borrowing them is a compile error rather than a
/// runtime rejection.
pub trait Lendable: CatalogRecord {
    /// Returns the current loan status.
    fn status(&self) -> LoanStatus;

    /// Overwrites the loan status. Transition guards live in the catalog.
    fn set_status(&mut self, status: LoanStatus);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn field_value_display() {
        assert_eq!(FieldValue::Text("Dune".into()).to_string(), "Dune");
        assert_eq!(FieldValue::Integer(42).to_string(), "42");
        assert_eq!(FieldValue::Real(3.5).to_string(), "3.5");
        assert_eq!(FieldValue::Null.to_string(), "-");
    }

    #[test]
    fn lookup_display_names_the_criterion() {
        assert_eq!(Lookup::Key(7u64).to_string(), "key 7");
        assert_eq!(Lookup::<u64>::name("Dune").to_string(), "name \"Dune\"");
    }
}
