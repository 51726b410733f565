//! Single-table relational store backed by SQLite.

use crate::backend::{CatalogStore, Snapshot};
use crate::error::StoreResult;
use herdbook_model::{Animal, AnimalKind, Book, CatalogRecord, Edition, LoanEntry, LoanStatus};
use rusqlite::types::{Type, Value};
use rusqlite::{params, params_from_iter, Connection, Row};
use std::marker::PhantomData;
use std::path::Path;

const LOANS_SCHEMA: &str = "CREATE TABLE IF NOT EXISTS loans (
    record_key TEXT NOT NULL,
    title TEXT NOT NULL,
    borrower TEXT NOT NULL,
    status TEXT NOT NULL
)";

const INSERT_LOAN: &str =
    "INSERT INTO loans (record_key, title, borrower, status) VALUES (?1, ?2, ?3, ?4)";

/// Column mapping between a record family and its flat table.
///
/// Every subtype field is a nullable column; which columns are non-null
/// in a row decides the subtype on the way back, mirroring the
/// field-presence discrimination of the document stores. `COLUMNS[0]`
/// is the primary key.
pub trait SqlRecord: CatalogRecord {
    /// Table name.
    const TABLE: &'static str;

    /// `CREATE TABLE IF NOT EXISTS` statement for the table.
    const SCHEMA: &'static str;

    /// Column names, primary key first, in `to_row` order.
    const COLUMNS: &'static [&'static str];

    /// The primary key as a SQL value.
    fn key_value(&self) -> Value;

    /// Projects the record into one value per column.
    fn to_row(&self) -> Vec<Value>;

    /// Rebuilds a record from a row selected with [`SqlRecord::COLUMNS`].
    ///
    /// # Errors
    ///
    /// Returns an error if a column cannot be converted back.
    fn from_row(row: &Row<'_>) -> rusqlite::Result<Self>;
}

fn status_from_sql(index: usize, label: &str) -> rusqlite::Result<LoanStatus> {
    LoanStatus::from_label(label).ok_or_else(|| {
        rusqlite::Error::FromSqlConversionFailure(
            index,
            Type::Text,
            format!("unknown status {label:?}").into(),
        )
    })
}

/// A store that keeps one flat table per record family.
///
/// Unlike the document stores, mutations do not rewrite everything:
/// adds issue `INSERT`, edits issue `UPDATE`, removals issue `DELETE`,
/// and ledger entries are appended, all targeted by identifier. The
/// table is the source of truth; `save` exists as the whole-catalog
/// fallback and rewrite path.
///
/// Opening a path that does not hold a database yet initializes the
/// empty schema instead of failing.
pub struct SqliteStore<R> {
    conn: Connection,
    select_sql: String,
    insert_sql: String,
    update_sql: String,
    delete_sql: String,
    _marker: PhantomData<R>,
}

impl<R: SqlRecord> SqliteStore<R> {
    /// Opens or creates the database file at the given path.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be opened or the schema
    /// cannot be created.
    pub fn open(path: impl AsRef<Path>) -> StoreResult<Self> {
        Self::from_connection(Connection::open(path)?)
    }

    /// Opens a private in-memory database, mainly for tests.
    ///
    /// # Errors
    ///
    /// Returns an error if the schema cannot be created.
    pub fn open_in_memory() -> StoreResult<Self> {
        Self::from_connection(Connection::open_in_memory()?)
    }

    fn from_connection(conn: Connection) -> StoreResult<Self> {
        conn.execute_batch(R::SCHEMA)?;
        conn.execute_batch(LOANS_SCHEMA)?;

        let columns = R::COLUMNS.join(", ");
        let placeholders = (1..=R::COLUMNS.len())
            .map(|i| format!("?{i}"))
            .collect::<Vec<_>>()
            .join(", ");
        // UPDATE keeps the rowid, so the on-disk order stays the catalog
        // order. Placeholders line up with to_row: ?1 is the key.
        let assignments = R::COLUMNS[1..]
            .iter()
            .enumerate()
            .map(|(i, column)| format!("{column} = ?{}", i + 2))
            .collect::<Vec<_>>()
            .join(", ");

        Ok(Self {
            select_sql: format!("SELECT {columns} FROM {} ORDER BY rowid", R::TABLE),
            insert_sql: format!(
                "INSERT INTO {} ({columns}) VALUES ({placeholders})",
                R::TABLE
            ),
            update_sql: format!(
                "UPDATE {} SET {assignments} WHERE {} = ?1",
                R::TABLE,
                R::COLUMNS[0]
            ),
            delete_sql: format!("DELETE FROM {} WHERE {} = ?1", R::TABLE, R::COLUMNS[0]),
            conn,
            _marker: PhantomData,
        })
    }
}

impl<R: SqlRecord> CatalogStore<R> for SqliteStore<R> {
    fn load(&mut self) -> StoreResult<Snapshot<R>> {
        let records = {
            let mut stmt = self.conn.prepare(&self.select_sql)?;
            let rows = stmt.query_map([], |row| R::from_row(row))?;
            rows.collect::<Result<Vec<_>, _>>()?
        };

        let loans = {
            let mut stmt = self
                .conn
                .prepare("SELECT record_key, title, borrower, status FROM loans ORDER BY rowid")?;
            let rows = stmt.query_map([], |row| {
                let status: String = row.get(3)?;
                Ok(LoanEntry {
                    record: row.get(0)?,
                    title: row.get(1)?,
                    borrower: row.get(2)?,
                    status: status_from_sql(3, &status)?,
                })
            })?;
            rows.collect::<Result<Vec<_>, _>>()?
        };

        Ok(Snapshot { records, loans })
    }

    fn save(&mut self, snapshot: &Snapshot<R>) -> StoreResult<()> {
        let tx = self.conn.transaction()?;

        tx.execute(&format!("DELETE FROM {}", R::TABLE), [])?;
        {
            let mut stmt = tx.prepare(&self.insert_sql)?;
            for record in &snapshot.records {
                stmt.execute(params_from_iter(record.to_row()))?;
            }
        }

        tx.execute("DELETE FROM loans", [])?;
        {
            let mut stmt = tx.prepare(INSERT_LOAN)?;
            for entry in &snapshot.loans {
                stmt.execute(params![
                    entry.record,
                    entry.title,
                    entry.borrower,
                    entry.status.label()
                ])?;
            }
        }

        tx.commit()?;
        Ok(())
    }

    fn insert(&mut self, record: &R, _snapshot: &Snapshot<R>) -> StoreResult<()> {
        self.conn
            .execute(&self.insert_sql, params_from_iter(record.to_row()))?;
        Ok(())
    }

    fn update(&mut self, record: &R, _snapshot: &Snapshot<R>) -> StoreResult<()> {
        self.conn
            .execute(&self.update_sql, params_from_iter(record.to_row()))?;
        Ok(())
    }

    fn remove(&mut self, record: &R, _snapshot: &Snapshot<R>) -> StoreResult<()> {
        self.conn.execute(&self.delete_sql, [record.key_value()])?;
        Ok(())
    }

    fn append_loan(&mut self, entry: &LoanEntry, _snapshot: &Snapshot<R>) -> StoreResult<()> {
        self.conn.execute(
            INSERT_LOAN,
            params![
                entry.record,
                entry.title,
                entry.borrower,
                entry.status.label()
            ],
        )?;
        Ok(())
    }
}

impl SqlRecord for Book {
    const TABLE: &'static str = "books";

    const SCHEMA: &'static str = "CREATE TABLE IF NOT EXISTS books (
        id INTEGER PRIMARY KEY,
        title TEXT NOT NULL,
        author TEXT NOT NULL,
        year INTEGER NOT NULL,
        status TEXT NOT NULL,
        format TEXT,
        size_kb INTEGER,
        pages INTEGER,
        weight_g INTEGER
    )";

    const COLUMNS: &'static [&'static str] = &[
        "id", "title", "author", "year", "status", "format", "size_kb", "pages", "weight_g",
    ];

    fn key_value(&self) -> Value {
        Value::Integer(self.id as i64)
    }

    fn to_row(&self) -> Vec<Value> {
        let (format, size_kb, pages, weight_g) = match &self.edition {
            Edition::Digital { format, size_kb } => (
                Value::Text(format.clone()),
                Value::Integer(*size_kb as i64),
                Value::Null,
                Value::Null,
            ),
            Edition::Printed { pages, weight_g } => (
                Value::Null,
                Value::Null,
                Value::Integer(i64::from(*pages)),
                Value::Integer(i64::from(*weight_g)),
            ),
        };

        vec![
            Value::Integer(self.id as i64),
            Value::Text(self.title.clone()),
            Value::Text(self.author.clone()),
            Value::Integer(i64::from(self.year)),
            Value::Text(self.status.label().to_string()),
            format,
            size_kb,
            pages,
            weight_g,
        ]
    }

    fn from_row(row: &Row<'_>) -> rusqlite::Result<Self> {
        let status: String = row.get(4)?;
        let format: Option<String> = row.get(5)?;
        let size_kb: Option<i64> = row.get(6)?;
        let pages: Option<i64> = row.get(7)?;
        let weight_g: Option<i64> = row.get(8)?;

        let edition = match (format, pages) {
            (Some(format), _) => Edition::Digital {
                format,
                size_kb: size_kb.unwrap_or(0) as u64,
            },
            (None, Some(pages)) => Edition::Printed {
                pages: pages as u32,
                weight_g: weight_g.unwrap_or(0) as u32,
            },
            (None, None) => {
                return Err(rusqlite::Error::FromSqlConversionFailure(
                    5,
                    Type::Text,
                    "row carries neither digital nor printed fields".into(),
                ))
            }
        };

        Ok(Book {
            id: row.get::<_, i64>(0)? as u64,
            title: row.get(1)?,
            author: row.get(2)?,
            year: row.get::<_, i64>(3)? as u16,
            status: status_from_sql(4, &status)?,
            edition,
        })
    }
}

impl SqlRecord for Animal {
    const TABLE: &'static str = "animals";

    const SCHEMA: &'static str = "CREATE TABLE IF NOT EXISTS animals (
        tag TEXT PRIMARY KEY,
        name TEXT NOT NULL,
        age_years INTEGER NOT NULL,
        weight_kg REAL NOT NULL,
        species TEXT NOT NULL,
        breed TEXT,
        fur_colour TEXT
    )";

    const COLUMNS: &'static [&'static str] = &[
        "tag",
        "name",
        "age_years",
        "weight_kg",
        "species",
        "breed",
        "fur_colour",
    ];

    fn key_value(&self) -> Value {
        Value::Text(self.tag.clone())
    }

    fn to_row(&self) -> Vec<Value> {
        let text_or_null = |value: Option<&str>| {
            value
                .map(|v| Value::Text(v.to_string()))
                .unwrap_or(Value::Null)
        };

        vec![
            Value::Text(self.tag.clone()),
            Value::Text(self.name.clone()),
            Value::Integer(i64::from(self.age_years)),
            Value::Real(self.weight_kg),
            Value::Text(self.kind.species().to_string()),
            text_or_null(self.kind.breed()),
            text_or_null(self.kind.fur_colour()),
        ]
    }

    fn from_row(row: &Row<'_>) -> rusqlite::Result<Self> {
        let species: String = row.get(4)?;
        let breed: Option<String> = row.get(5)?;
        let fur_colour: Option<String> = row.get(6)?;

        let detail = breed.or(fur_colour).unwrap_or_default();
        let kind = AnimalKind::from_parts(&species, detail).ok_or_else(|| {
            rusqlite::Error::FromSqlConversionFailure(
                4,
                Type::Text,
                format!("unknown species {species:?}").into(),
            )
        })?;

        Ok(Animal {
            tag: row.get(0)?,
            name: row.get(1)?,
            age_years: row.get::<_, i64>(2)? as u32,
            weight_kg: row.get(3)?,
            kind,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    fn book(id: u64, title: &str) -> Book {
        let mut book = Book::printed(title, "Frank Herbert", 1965, 412, 540);
        book.id = id;
        book
    }

    #[test]
    fn fresh_database_loads_empty() {
        let mut store: SqliteStore<Book> = SqliteStore::open_in_memory().unwrap();
        let snapshot = store.load().unwrap();
        assert!(snapshot.records.is_empty());
        assert!(snapshot.loans.is_empty());
    }

    #[test]
    fn targeted_mutations_match_the_snapshot() {
        let mut store: SqliteStore<Book> = SqliteStore::open_in_memory().unwrap();
        let empty = Snapshot::default();

        let first = book(1, "Dune");
        let second = book(2, "Dune Messiah");
        store.insert(&first, &empty).unwrap();
        store.insert(&second, &empty).unwrap();

        let mut edited = first.clone();
        edited.status = LoanStatus::Borrowed;
        store.update(&edited, &empty).unwrap();

        // Updating must not move the record to the end of the table.
        let loaded = store.load().unwrap();
        assert_eq!(loaded.records, vec![edited.clone(), second.clone()]);

        store.remove(&second, &empty).unwrap();

        let loaded = store.load().unwrap();
        assert_eq!(loaded.records, vec![edited]);
    }

    #[test]
    fn both_editions_round_trip_through_nullable_columns() {
        let mut store: SqliteStore<Book> = SqliteStore::open_in_memory().unwrap();
        let empty = Snapshot::default();

        let mut digital = Book::digital("Dune", "Frank Herbert", 1965, "epub", 2048);
        digital.id = 1;
        store.insert(&digital, &empty).unwrap();
        store.insert(&book(2, "Dune Messiah"), &empty).unwrap();

        let loaded = store.load().unwrap();
        assert!(matches!(loaded.records[0].edition, Edition::Digital { .. }));
        assert!(matches!(loaded.records[1].edition, Edition::Printed { .. }));
    }

    #[test]
    fn loan_entries_append_in_order() {
        let mut store: SqliteStore<Book> = SqliteStore::open_in_memory().unwrap();
        let empty = Snapshot::default();

        for (borrower, status) in [("Paul", LoanStatus::Borrowed), ("Paul", LoanStatus::Available)]
        {
            store
                .append_loan(
                    &LoanEntry {
                        record: "1".into(),
                        title: "Dune".into(),
                        borrower: borrower.into(),
                        status,
                    },
                    &empty,
                )
                .unwrap();
        }

        let loaded = store.load().unwrap();
        assert_eq!(loaded.loans.len(), 2);
        assert_eq!(loaded.loans[0].status, LoanStatus::Borrowed);
        assert_eq!(loaded.loans[1].status, LoanStatus::Available);
    }

    #[test]
    fn save_rewrites_the_whole_table() {
        let mut store: SqliteStore<Book> = SqliteStore::open_in_memory().unwrap();
        store.insert(&book(9, "Stale"), &Snapshot::default()).unwrap();

        let snapshot = Snapshot {
            records: vec![book(1, "Dune")],
            loans: Vec::new(),
        };
        store.save(&snapshot).unwrap();

        let loaded = store.load().unwrap();
        assert_eq!(loaded.records, snapshot.records);
    }

    #[test]
    fn catalog_survives_reopen() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("register.db");

        {
            let mut store: SqliteStore<Animal> = SqliteStore::open(&path).unwrap();
            let animal = Animal::new(
                "C-01",
                "Misha",
                3,
                4.2,
                AnimalKind::Cat {
                    fur_colour: "grey".into(),
                },
            );
            store.insert(&animal, &Snapshot::default()).unwrap();
        }

        let mut reopened: SqliteStore<Animal> = SqliteStore::open(&path).unwrap();
        let loaded = reopened.load().unwrap();
        assert_eq!(loaded.records.len(), 1);
        assert_eq!(loaded.records[0].kind.fur_colour(), Some("grey"));
    }
}
