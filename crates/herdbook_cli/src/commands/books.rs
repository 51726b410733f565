//! Library catalog commands.

use super::{open_catalog, print_record, print_table, StoreKind};
use clap::Subcommand;
use herdbook_core::Catalog;
use herdbook_model::{Book, BookPatch, Lookup};
use std::error::Error;
use std::path::PathBuf;

/// Subcommands over the book catalog.
#[derive(Subcommand)]
pub enum BookCommand {
    /// Add a book; give either digital or printed edition fields
    Add {
        /// Title
        #[arg(long)]
        title: String,

        /// Author
        #[arg(long)]
        author: String,

        /// Publication year
        #[arg(long)]
        year: u16,

        /// File format, e.g. epub (digital editions)
        #[arg(long)]
        format: Option<String>,

        /// File size in kilobytes (digital editions)
        #[arg(long)]
        size_kb: Option<u64>,

        /// Page count (printed editions)
        #[arg(long)]
        pages: Option<u32>,

        /// Weight in grams (printed editions)
        #[arg(long)]
        weight_g: Option<u32>,
    },

    /// List every book
    List,

    /// Find a book by id or title
    Find {
        /// Numeric id, or a title matched case-insensitively
        query: String,
    },

    /// Edit fields of a book
    Update {
        /// Numeric id, or a title matched case-insensitively
        query: String,

        /// New title
        #[arg(long)]
        title: Option<String>,

        /// New author
        #[arg(long)]
        author: Option<String>,

        /// New publication year
        #[arg(long)]
        year: Option<u16>,

        /// New file format (digital editions only)
        #[arg(long)]
        format: Option<String>,

        /// New file size in kilobytes (digital editions only)
        #[arg(long)]
        size_kb: Option<u64>,

        /// New page count (printed editions only)
        #[arg(long)]
        pages: Option<u32>,

        /// New weight in grams (printed editions only)
        #[arg(long)]
        weight_g: Option<u32>,
    },

    /// Delete a book
    Delete {
        /// Numeric id, or a title matched case-insensitively
        query: String,
    },

    /// Borrow a book
    Borrow {
        /// Numeric id, or a title matched case-insensitively
        query: String,

        /// Who is borrowing it
        #[arg(long)]
        borrower: String,
    },

    /// Return a borrowed book
    Return {
        /// Numeric id, or a title matched case-insensitively
        query: String,
    },

    /// Show the loan ledger
    Loans,
}

fn lookup(query: &str) -> Lookup<u64> {
    match query.parse::<u64>() {
        Ok(id) => Lookup::Key(id),
        Err(_) => Lookup::name(query),
    }
}

/// Runs a book subcommand against the selected store.
pub fn run(
    store: StoreKind,
    path: Option<PathBuf>,
    command: BookCommand,
) -> Result<(), Box<dyn Error>> {
    let mut catalog: Catalog<Book> = open_catalog(store, path, "books")?;

    match command {
        BookCommand::Add {
            title,
            author,
            year,
            format,
            size_kb,
            pages,
            weight_g,
        } => {
            let book = match (format, pages) {
                (Some(format), None) => {
                    Book::digital(title, author, year, format, size_kb.unwrap_or(0))
                }
                (None, Some(pages)) => {
                    Book::printed(title, author, year, pages, weight_g.unwrap_or(0))
                }
                _ => {
                    return Err(
                        "give either --format/--size-kb (digital) or --pages/--weight-g (printed)"
                            .into(),
                    )
                }
            };

            match catalog.add(book) {
                Ok(stored) => {
                    println!("added book {}", stored.id);
                    print_record(&stored);
                }
                Err(e) => println!("{e}"),
            }
        }

        BookCommand::List => print_table(catalog.records()),

        BookCommand::Find { query } => match catalog.find(&lookup(&query)) {
            Ok(book) => print_record(book),
            Err(e) => println!("{e}"),
        },

        BookCommand::Update {
            query,
            title,
            author,
            year,
            format,
            size_kb,
            pages,
            weight_g,
        } => {
            let patch = BookPatch {
                title,
                author,
                year,
                format,
                size_kb,
                pages,
                weight_g,
            };
            match catalog.update(&lookup(&query), patch) {
                Ok(outcome) => {
                    if !outcome.skipped.is_empty() {
                        println!(
                            "note: this edition does not carry {}",
                            outcome.skipped.join(", ")
                        );
                    }
                    print_record(&outcome.record);
                }
                Err(e) => println!("{e}"),
            }
        }

        BookCommand::Delete { query } => match catalog.delete(&lookup(&query)) {
            Ok(book) => println!("deleted book {} ({})", book.id, book.title),
            Err(e) => println!("{e}"),
        },

        BookCommand::Borrow { query, borrower } => {
            match catalog.check_out(&lookup(&query), &borrower) {
                Ok(book) => println!("{} is now borrowed by {borrower}", book.title),
                Err(e) => println!("{e}"),
            }
        }

        BookCommand::Return { query } => match catalog.check_in(&lookup(&query)) {
            Ok(book) => println!("{} is back on the shelf", book.title),
            Err(e) => println!("{e}"),
        },

        BookCommand::Loans => {
            if catalog.loans().is_empty() {
                println!("(no loan history)");
            }
            for entry in catalog.loans() {
                println!(
                    "{:>6}  {:<30}  {:<20}  {}",
                    entry.record, entry.title, entry.borrower, entry.status
                );
            }
        }
    }

    Ok(())
}
