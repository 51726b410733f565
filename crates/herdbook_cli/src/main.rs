//! Herdbook CLI
//!
//! Command-line frontend for Herdbook catalogs.
//!
//! # Commands
//!
//! - `books` - manage the library catalog (add, list, find, update,
//!   delete, borrow, return, loans)
//! - `animals` - manage the farm register (add, list, find, update,
//!   delete)
//!
//! The backend is chosen with `--store json|sled|sqlite`; each backend
//! gets a sensible default path next to the current directory.

mod commands;

use clap::{Parser, Subcommand};
use commands::StoreKind;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

/// Herdbook command-line catalog tools.
#[derive(Parser)]
#[command(name = "herdbook")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Storage backend holding the catalog
    #[arg(global = true, short, long, value_enum, default_value = "json")]
    store: StoreKind,

    /// Path to the catalog store (defaults to a per-backend file name)
    #[arg(global = true, short, long)]
    path: Option<PathBuf>,

    /// Enable verbose output
    #[arg(global = true, short, long)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Manage the library catalog
    Books {
        #[command(subcommand)]
        command: commands::books::BookCommand,
    },

    /// Manage the farm register
    Animals {
        #[command(subcommand)]
        command: commands::animals::AnimalCommand,
    },
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    // Initialize logging
    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("info")
    };
    tracing_subscriber::fmt().with_env_filter(filter).init();

    match cli.command {
        Commands::Books { command } => commands::books::run(cli.store, cli.path, command)?,
        Commands::Animals { command } => commands::animals::run(cli.store, cli.path, command)?,
    }

    Ok(())
}
