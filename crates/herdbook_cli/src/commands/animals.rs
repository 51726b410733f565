//! Farm register commands.

use super::{open_catalog, print_record, print_table, StoreKind};
use clap::Subcommand;
use herdbook_core::Catalog;
use herdbook_model::{Animal, AnimalKind, AnimalPatch, Lookup};
use std::error::Error;
use std::path::PathBuf;

/// Subcommands over the animal register.
#[derive(Subcommand)]
pub enum AnimalCommand {
    /// Register an animal
    Add {
        /// Ear tag, the identifier
        #[arg(long)]
        tag: String,

        /// Given name
        #[arg(long)]
        name: String,

        /// Age in whole years
        #[arg(long)]
        age_years: u32,

        /// Weight in kilograms
        #[arg(long)]
        weight_kg: f64,

        /// Species, e.g. dog, cat, cow, sheep
        #[arg(long)]
        species: String,

        /// Breed (most species)
        #[arg(long)]
        breed: Option<String>,

        /// Fur colour (cats and rabbits)
        #[arg(long)]
        fur_colour: Option<String>,
    },

    /// List every animal
    List,

    /// Find an animal by tag or name
    Find {
        /// Ear tag, or a name matched case-insensitively
        query: String,
    },

    /// Edit fields of an animal
    Update {
        /// Ear tag, or a name matched case-insensitively
        query: String,

        /// New given name
        #[arg(long)]
        name: Option<String>,

        /// New age in whole years
        #[arg(long)]
        age_years: Option<u32>,

        /// New weight in kilograms
        #[arg(long)]
        weight_kg: Option<f64>,

        /// New breed (breed-carrying species only)
        #[arg(long)]
        breed: Option<String>,

        /// New fur colour (cats and rabbits only)
        #[arg(long)]
        fur_colour: Option<String>,
    },

    /// Remove an animal from the register
    Delete {
        /// Ear tag, or a name matched case-insensitively
        query: String,
    },
}

/// Resolves a query string: an exact tag wins, otherwise it is treated
/// as a name.
fn lookup(catalog: &Catalog<Animal>, query: &str) -> Lookup<String> {
    let by_tag = Lookup::Key(query.to_string());
    if catalog.find(&by_tag).is_ok() {
        by_tag
    } else {
        Lookup::name(query)
    }
}

/// Runs an animal subcommand against the selected store.
pub fn run(
    store: StoreKind,
    path: Option<PathBuf>,
    command: AnimalCommand,
) -> Result<(), Box<dyn Error>> {
    let mut catalog: Catalog<Animal> = open_catalog(store, path, "animals")?;

    match command {
        AnimalCommand::Add {
            tag,
            name,
            age_years,
            weight_kg,
            species,
            breed,
            fur_colour,
        } => {
            let detail = breed.or(fur_colour).unwrap_or_default();
            let Some(kind) = AnimalKind::from_parts(&species, detail) else {
                return Err(format!("unknown species {species:?}").into());
            };

            match catalog.add(Animal::new(tag, name, age_years, weight_kg, kind)) {
                Ok(stored) => {
                    println!("registered {}", stored.tag);
                    print_record(&stored);
                }
                Err(e) => println!("{e}"),
            }
        }

        AnimalCommand::List => print_table(catalog.records()),

        AnimalCommand::Find { query } => {
            let lookup = lookup(&catalog, &query);
            match catalog.find(&lookup) {
                Ok(animal) => print_record(animal),
                Err(e) => println!("{e}"),
            }
        }

        AnimalCommand::Update {
            query,
            name,
            age_years,
            weight_kg,
            breed,
            fur_colour,
        } => {
            let patch = AnimalPatch {
                name,
                age_years,
                weight_kg,
                breed,
                fur_colour,
            };
            let lookup = lookup(&catalog, &query);
            match catalog.update(&lookup, patch) {
                Ok(outcome) => {
                    if !outcome.skipped.is_empty() {
                        println!(
                            "note: this species does not carry {}",
                            outcome.skipped.join(", ")
                        );
                    }
                    print_record(&outcome.record);
                }
                Err(e) => println!("{e}"),
            }
        }

        AnimalCommand::Delete { query } => {
            let lookup = lookup(&catalog, &query);
            match catalog.delete(&lookup) {
                Ok(animal) => println!("removed {} ({})", animal.tag, animal.name),
                Err(e) => println!("{e}"),
            }
        }
    }

    Ok(())
}
