//! The farm-register record family: animals keyed by ear tag, one variant
//! per species, no borrow/return lifecycle.

use crate::record::{CatalogRecord, FieldValue};
use serde::{Deserialize, Serialize};

/// Species-specific fields of an [`Animal`].
///
/// Cats and rabbits are described by fur colour; every other species
/// carries a breed. The variant is fixed at construction.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
#[allow(missing_docs)]
pub enum AnimalKind {
    Dog { breed: String },
    Cat { fur_colour: String },
    Cow { breed: String },
    Goat { breed: String },
    Chicken { breed: String },
    Sheep { breed: String },
    Rabbit { fur_colour: String },
    Duck { breed: String },
    Horse { breed: String },
    Pig { breed: String },
    Elephant { breed: String },
    Lion { breed: String },
}

impl AnimalKind {
    /// Returns the lowercase species label used in storage and display.
    #[must_use]
    pub fn species(&self) -> &'static str {
        match self {
            Self::Dog { .. } => "dog",
            Self::Cat { .. } => "cat",
            Self::Cow { .. } => "cow",
            Self::Goat { .. } => "goat",
            Self::Chicken { .. } => "chicken",
            Self::Sheep { .. } => "sheep",
            Self::Rabbit { .. } => "rabbit",
            Self::Duck { .. } => "duck",
            Self::Horse { .. } => "horse",
            Self::Pig { .. } => "pig",
            Self::Elephant { .. } => "elephant",
            Self::Lion { .. } => "lion",
        }
    }

    /// Returns the breed for breed-carrying species.
    #[must_use]
    pub fn breed(&self) -> Option<&str> {
        match self {
            Self::Dog { breed }
            | Self::Cow { breed }
            | Self::Goat { breed }
            | Self::Chicken { breed }
            | Self::Sheep { breed }
            | Self::Duck { breed }
            | Self::Horse { breed }
            | Self::Pig { breed }
            | Self::Elephant { breed }
            | Self::Lion { breed } => Some(breed),
            Self::Cat { .. } | Self::Rabbit { .. } => None,
        }
    }

    /// Returns the fur colour for the fur-described species.
    #[must_use]
    pub fn fur_colour(&self) -> Option<&str> {
        match self {
            Self::Cat { fur_colour } | Self::Rabbit { fur_colour } => Some(fur_colour),
            _ => None,
        }
    }

    /// Rebuilds a kind from a species label and its single descriptive
    /// detail (breed or fur colour, whichever the species declares).
    ///
    /// Returns `None` for an unknown species label.
    #[must_use]
    pub fn from_parts(species: &str, detail: String) -> Option<Self> {
        Some(match species {
            "dog" => Self::Dog { breed: detail },
            "cat" => Self::Cat { fur_colour: detail },
            "cow" => Self::Cow { breed: detail },
            "goat" => Self::Goat { breed: detail },
            "chicken" => Self::Chicken { breed: detail },
            "sheep" => Self::Sheep { breed: detail },
            "rabbit" => Self::Rabbit { fur_colour: detail },
            "duck" => Self::Duck { breed: detail },
            "horse" => Self::Horse { breed: detail },
            "pig" => Self::Pig { breed: detail },
            "elephant" => Self::Elephant { breed: detail },
            "lion" => Self::Lion { breed: detail },
            _ => return None,
        })
    }
}

/// One entry of the farm register.
///
/// Animals are keyed by a caller-supplied ear tag (a natural key, never
/// auto-assigned) and have no loan lifecycle: the register is plain CRUD.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Animal {
    /// Ear tag, the caller-supplied identifier.
    pub tag: String,
    /// Given name, matched case-insensitively by name lookups.
    pub name: String,
    /// Age in whole years.
    pub age_years: u32,
    /// Weight in kilograms.
    pub weight_kg: f64,
    /// Species-specific fields.
    pub kind: AnimalKind,
}

impl Animal {
    /// Builds a register entry.
    pub fn new(
        tag: impl Into<String>,
        name: impl Into<String>,
        age_years: u32,
        weight_kg: f64,
        kind: AnimalKind,
    ) -> Self {
        Self {
            tag: tag.into(),
            name: name.into(),
            age_years,
            weight_kg,
            kind,
        }
    }
}

/// Partial update for an [`Animal`].
///
/// `breed` and `fur_colour` apply only to the species that declare them;
/// the other one is reported back as skipped.
#[derive(Debug, Clone, Default)]
pub struct AnimalPatch {
    /// New given name.
    pub name: Option<String>,
    /// New age in whole years.
    pub age_years: Option<u32>,
    /// New weight in kilograms.
    pub weight_kg: Option<f64>,
    /// New breed (breed-carrying species only).
    pub breed: Option<String>,
    /// New fur colour (cats and rabbits only).
    pub fur_colour: Option<String>,
}

impl CatalogRecord for Animal {
    type Key = String;
    type Patch = AnimalPatch;

    fn key(&self) -> &String {
        &self.tag
    }

    fn display_name(&self) -> &str {
        &self.name
    }

    fn describe(&self) -> Vec<(&'static str, FieldValue)> {
        let breed = self
            .kind
            .breed()
            .map(|b| FieldValue::Text(b.to_string()))
            .unwrap_or(FieldValue::Null);
        let fur_colour = self
            .kind
            .fur_colour()
            .map(|c| FieldValue::Text(c.to_string()))
            .unwrap_or(FieldValue::Null);

        vec![
            ("tag", FieldValue::Text(self.tag.clone())),
            ("name", FieldValue::Text(self.name.clone())),
            ("species", FieldValue::Text(self.kind.species().to_string())),
            ("age_years", FieldValue::Integer(i64::from(self.age_years))),
            ("weight_kg", FieldValue::Real(self.weight_kg)),
            ("breed", breed),
            ("fur_colour", fur_colour),
        ]
    }

    fn apply(&mut self, patch: AnimalPatch) -> Vec<&'static str> {
        let mut skipped = Vec::new();

        if let Some(name) = patch.name {
            self.name = name;
        }
        if let Some(age) = patch.age_years {
            self.age_years = age;
        }
        if let Some(weight) = patch.weight_kg {
            self.weight_kg = weight;
        }

        match &mut self.kind {
            AnimalKind::Cat { fur_colour } | AnimalKind::Rabbit { fur_colour } => {
                if let Some(new_colour) = patch.fur_colour {
                    *fur_colour = new_colour;
                }
                if patch.breed.is_some() {
                    skipped.push("breed");
                }
            }
            AnimalKind::Dog { breed }
            | AnimalKind::Cow { breed }
            | AnimalKind::Goat { breed }
            | AnimalKind::Chicken { breed }
            | AnimalKind::Sheep { breed }
            | AnimalKind::Duck { breed }
            | AnimalKind::Horse { breed }
            | AnimalKind::Pig { breed }
            | AnimalKind::Elephant { breed }
            | AnimalKind::Lion { breed } => {
                if let Some(new_breed) = patch.breed {
                    *breed = new_breed;
                }
                if patch.fur_colour.is_some() {
                    skipped.push("fur_colour");
                }
            }
        }

        skipped
    }
}
