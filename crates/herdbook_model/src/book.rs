//! The library-catalog record family: books with a digital or printed
//! edition and a borrow/return lifecycle.

use crate::loan::LoanStatus;
use crate::record::{CatalogRecord, FieldValue, Lendable};
use serde::{Deserialize, Serialize};

/// Edition-specific fields of a [`Book`].
///
/// The durable representation is untagged: which variant a stored object
/// is follows from which subtype-only fields are present (`format` and
/// `size_kb` for digital, `pages` and `weight_g` for printed).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Edition {
    /// A digital edition.
    Digital {
        /// File format, e.g. `epub` or `pdf`.
        format: String,
        /// File size in kilobytes.
        size_kb: u64,
    },
    /// A printed edition.
    Printed {
        /// Page count.
        pages: u32,
        /// Weight in grams.
        weight_g: u32,
    },
}

/// One entry of the library catalog.
///
/// The edition is fixed at construction: editing changes field values,
/// never the variant. Keys are auto-incrementing; a freshly constructed
/// book carries `id == 0` (unassigned) until the catalog stores it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Book {
    /// Identifier, assigned by the catalog on add. `0` means unassigned.
    pub id: u64,
    /// Title, matched case-insensitively by name lookups.
    pub title: String,
    /// Author.
    pub author: String,
    /// Publication year.
    pub year: u16,
    /// Borrow/return lifecycle state.
    pub status: LoanStatus,
    /// Edition-specific fields.
    pub edition: Edition,
}

impl Book {
    /// Builds an unassigned, available digital book.
    pub fn digital(
        title: impl Into<String>,
        author: impl Into<String>,
        year: u16,
        format: impl Into<String>,
        size_kb: u64,
    ) -> Self {
        Self {
            id: 0,
            title: title.into(),
            author: author.into(),
            year,
            status: LoanStatus::Available,
            edition: Edition::Digital {
                format: format.into(),
                size_kb,
            },
        }
    }

    /// Builds an unassigned, available printed book.
    pub fn printed(
        title: impl Into<String>,
        author: impl Into<String>,
        year: u16,
        pages: u32,
        weight_g: u32,
    ) -> Self {
        Self {
            id: 0,
            title: title.into(),
            author: author.into(),
            year,
            status: LoanStatus::Available,
            edition: Edition::Printed { pages, weight_g },
        }
    }
}

/// Partial update for a [`Book`].
///
/// Carries every field of both editions; applying a field the book's own
/// edition does not declare leaves the book untouched and reports the
/// field name back.
#[derive(Debug, Clone, Default)]
pub struct BookPatch {
    /// New title.
    pub title: Option<String>,
    /// New author.
    pub author: Option<String>,
    /// New publication year.
    pub year: Option<u16>,
    /// New file format (digital editions only).
    pub format: Option<String>,
    /// New file size in kilobytes (digital editions only).
    pub size_kb: Option<u64>,
    /// New page count (printed editions only).
    pub pages: Option<u32>,
    /// New weight in grams (printed editions only).
    pub weight_g: Option<u32>,
}

impl CatalogRecord for Book {
    type Key = u64;
    type Patch = BookPatch;

    fn key(&self) -> &u64 {
        &self.id
    }

    fn display_name(&self) -> &str {
        &self.title
    }

    fn sequence(&self) -> Option<u64> {
        Some(self.id)
    }

    fn claim_key(&mut self, next: u64) {
        if self.id == 0 {
            self.id = next;
        }
    }

    fn describe(&self) -> Vec<(&'static str, FieldValue)> {
        let (format, size_kb, pages, weight_g) = match &self.edition {
            Edition::Digital { format, size_kb } => (
                FieldValue::Text(format.clone()),
                FieldValue::Integer(*size_kb as i64),
                FieldValue::Null,
                FieldValue::Null,
            ),
            Edition::Printed { pages, weight_g } => (
                FieldValue::Null,
                FieldValue::Null,
                FieldValue::Integer(i64::from(*pages)),
                FieldValue::Integer(i64::from(*weight_g)),
            ),
        };

        vec![
            ("id", FieldValue::Integer(self.id as i64)),
            ("title", FieldValue::Text(self.title.clone())),
            ("author", FieldValue::Text(self.author.clone())),
            ("year", FieldValue::Integer(i64::from(self.year))),
            ("status", FieldValue::Text(self.status.label().to_string())),
            ("format", format),
            ("size_kb", size_kb),
            ("pages", pages),
            ("weight_g", weight_g),
        ]
    }

    fn apply(&mut self, patch: BookPatch) -> Vec<&'static str> {
        let mut skipped = Vec::new();

        if let Some(title) = patch.title {
            self.title = title;
        }
        if let Some(author) = patch.author {
            self.author = author;
        }
        if let Some(year) = patch.year {
            self.year = year;
        }

        match &mut self.edition {
            Edition::Digital { format, size_kb } => {
                if let Some(new_format) = patch.format {
                    *format = new_format;
                }
                if let Some(new_size) = patch.size_kb {
                    *size_kb = new_size;
                }
                if patch.pages.is_some() {
                    skipped.push("pages");
                }
                if patch.weight_g.is_some() {
                    skipped.push("weight_g");
                }
            }
            Edition::Printed { pages, weight_g } => {
                if let Some(new_pages) = patch.pages {
                    *pages = new_pages;
                }
                if let Some(new_weight) = patch.weight_g {
                    *weight_g = new_weight;
                }
                if patch.format.is_some() {
                    skipped.push("format");
                }
                if patch.size_kb.is_some() {
                    skipped.push("size_kb");
                }
            }
        }

        skipped
    }
}

impl Lendable for Book {
    fn status(&self) -> LoanStatus {
        self.status
    }

    fn set_status(&mut self, status: LoanStatus) {
        self.status = status;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn claim_key_only_when_unassigned() {
        let mut book = Book::printed("Dune", "Frank Herbert", 1965, 412, 540);
        book.claim_key(7);
        assert_eq!(book.id, 7);

        book.claim_key(9);
        assert_eq!(book.id, 7, "an assigned key must not change");
    }

    #[test]
    fn describe_nulls_the_other_editions_fields() {
        let digital = Book::digital("Dune", "Frank Herbert", 1965, "epub", 2048);
        let fields: Vec<_> = digital.describe();

        let value = |name: &str| {
            fields
                .iter()
                .find(|(n, _)| *n == name)
                .map(|(_, v)| v.clone())
                .unwrap()
        };

        assert_eq!(value("format"), FieldValue::Text("epub".into()));
        assert_eq!(value("size_kb"), FieldValue::Integer(2048));
        assert_eq!(value("pages"), FieldValue::Null);
        assert_eq!(value("weight_g"), FieldValue::Null);
    }

    #[test]
    fn patch_skips_fields_of_the_other_edition() {
        let mut printed = Book::printed("Dune", "Frank Herbert", 1965, 412, 540);
        let before = printed.clone();

        let skipped = printed.apply(BookPatch {
            format: Some("pdf".into()),
            size_kb: Some(99),
            ..BookPatch::default()
        });

        assert_eq!(skipped, vec!["format", "size_kb"]);
        assert_eq!(printed, before, "printed fields must be unchanged");
    }

    #[test]
    fn patch_updates_declared_fields() {
        let mut book = Book::printed("Dune", "Frank Herbert", 1965, 412, 540);
        let skipped = book.apply(BookPatch {
            title: Some("Dune Messiah".into()),
            pages: Some(256),
            ..BookPatch::default()
        });

        assert!(skipped.is_empty());
        assert_eq!(book.title, "Dune Messiah");
        assert_eq!(
            book.edition,
            Edition::Printed {
                pages: 256,
                weight_g: 540
            }
        );
    }

    #[test]
    fn edition_is_discriminated_by_field_presence() {
        let digital: Book = serde_json::from_str(
            r#"{"id":1,"title":"Dune","author":"Frank Herbert","year":1965,
                "status":"available","edition":{"format":"epub","size_kb":2048}}"#,
        )
        .unwrap();
        assert!(matches!(digital.edition, Edition::Digital { .. }));

        let printed: Book = serde_json::from_str(
            r#"{"id":2,"title":"Dune","author":"Frank Herbert","year":1965,
                "status":"borrowed","edition":{"pages":412,"weight_g":540}}"#,
        )
        .unwrap();
        assert!(matches!(printed.edition, Edition::Printed { .. }));
        assert_eq!(printed.status, LoanStatus::Borrowed);
    }
}
