//! Loan status and the append-only loan ledger entry.

use serde::{Deserialize, Serialize};
use std::fmt;

/// The lifecycle state of a lendable record.
///
/// There are exactly two states. The catalog service guards the two legal
/// transitions (`Available -> Borrowed` on borrow, `Borrowed -> Available`
/// on return); the machine has no terminal state and cycles indefinitely.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LoanStatus {
    /// The record is on the shelf and can be borrowed.
    Available,
    /// The record is out with a borrower.
    Borrowed,
}

impl LoanStatus {
    /// Returns the lowercase label used in durable storage and display.
    #[must_use]
    pub fn label(&self) -> &'static str {
        match self {
            Self::Available => "available",
            Self::Borrowed => "borrowed",
        }
    }

    /// Parses a storage label back into a status.
    #[must_use]
    pub fn from_label(label: &str) -> Option<Self> {
        match label {
            "available" => Some(Self::Available),
            "borrowed" => Some(Self::Borrowed),
            _ => None,
        }
    }
}

impl fmt::Display for LoanStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// One row of the append-only loan ledger.
///
/// An entry is written on every borrow and every return. `status` records
/// the state the record was left in by the event, so a `Borrowed` entry is
/// an open loan and an `Available` entry closes it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoanEntry {
    /// The record identifier in display form.
    pub record: String,
    /// The record's title or name at the time of the event.
    pub title: String,
    /// Who borrowed the record.
    pub borrower: String,
    /// The status the record was left in.
    pub status: LoanStatus,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn labels_round_trip() {
        for status in [LoanStatus::Available, LoanStatus::Borrowed] {
            assert_eq!(LoanStatus::from_label(status.label()), Some(status));
        }
    }

    #[test]
    fn unknown_label_is_rejected() {
        assert_eq!(LoanStatus::from_label("lost"), None);
        assert_eq!(LoanStatus::from_label(""), None);
    }

    #[test]
    fn status_serializes_as_lowercase_string() {
        let json = serde_json::to_string(&LoanStatus::Borrowed).unwrap();
        assert_eq!(json, "\"borrowed\"");

        let back: LoanStatus = serde_json::from_str("\"available\"").unwrap();
        assert_eq!(back, LoanStatus::Available);
    }
}
