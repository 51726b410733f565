//! Command implementations and shared plumbing.

pub mod animals;
pub mod books;

use clap::ValueEnum;
use herdbook_core::Catalog;
use herdbook_model::CatalogRecord;
use herdbook_store::{JsonFileStore, SledStore, SqlRecord, SqliteStore};
use std::error::Error;
use std::path::PathBuf;

/// Which persistence backend to open.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum StoreKind {
    /// One JSON document, rewritten atomically on every mutation.
    Json,
    /// Embedded key-value store holding the catalog under one entry.
    Sled,
    /// Single-table SQLite database with targeted row mutations.
    Sqlite,
}

/// Opens a catalog over the selected backend.
///
/// `stem` names the default store file (`<stem>.json`, `<stem>.sled` or
/// `<stem>.db`) when no explicit path is given.
pub fn open_catalog<R: SqlRecord>(
    kind: StoreKind,
    path: Option<PathBuf>,
    stem: &str,
) -> Result<Catalog<R>, Box<dyn Error>> {
    let catalog = match kind {
        StoreKind::Json => {
            let path = path.unwrap_or_else(|| PathBuf::from(format!("{stem}.json")));
            Catalog::open(Box::new(JsonFileStore::open(path)))
        }
        StoreKind::Sled => {
            let path = path.unwrap_or_else(|| PathBuf::from(format!("{stem}.sled")));
            Catalog::open(Box::new(SledStore::open(path)?))
        }
        StoreKind::Sqlite => {
            let path = path.unwrap_or_else(|| PathBuf::from(format!("{stem}.db")));
            Catalog::open(Box::new(SqliteStore::open(path)?))
        }
    };
    Ok(catalog)
}

/// Prints one record as a `field: value` block.
pub fn print_record<R: CatalogRecord>(record: &R) {
    for (name, value) in record.describe() {
        println!("{name:>10}: {value}");
    }
}

/// Prints records as an aligned table, one row per record.
pub fn print_table<R: CatalogRecord>(records: &[R]) {
    if records.is_empty() {
        println!("(no records)");
        return;
    }

    let header: Vec<String> = records[0]
        .describe()
        .iter()
        .map(|(name, _)| name.to_string())
        .collect();
    let rows: Vec<Vec<String>> = records
        .iter()
        .map(|record| {
            record
                .describe()
                .into_iter()
                .map(|(_, value)| value.to_string())
                .collect()
        })
        .collect();

    let mut widths: Vec<usize> = header.iter().map(|h| h.len()).collect();
    for row in &rows {
        for (i, cell) in row.iter().enumerate() {
            widths[i] = widths[i].max(cell.len());
        }
    }

    let render = |cells: &[String]| {
        cells
            .iter()
            .zip(widths.iter().copied())
            .map(|(cell, width)| format!("{cell:<width$}"))
            .collect::<Vec<_>>()
            .join("  ")
    };

    println!("{}", render(&header));
    for row in &rows {
        println!("{}", render(row));
    }
}
