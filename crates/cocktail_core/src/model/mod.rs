//! Catalog domain model.
//!
//! # Responsibility
//! - Define the records stored by the catalog (ingredients, cocktails and
//!   their association rows) and the payloads used to create or patch them.
//! - Provide wire-name mapping for the closed enumerations.
//!
//! # Invariants
//! - Ids are store-generated and never reused.
//! - A `CocktailIngredient` never outlives its parent cocktail.
//! - An `Ingredient` is referenced, never owned, by association rows.

use std::error::Error;
use std::fmt::{Display, Formatter};

pub mod cocktail;
pub mod ingredient;
pub mod validation;

/// Error returned when a wire string does not name a known enum member.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownVariant {
    /// Name of the enumeration, e.g. `cocktail category`.
    pub kind: &'static str,
    /// Rejected input value.
    pub value: String,
}

impl UnknownVariant {
    pub(crate) fn new(kind: &'static str, value: &str) -> Self {
        Self {
            kind,
            value: value.to_string(),
        }
    }
}

impl Display for UnknownVariant {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "unknown {}: `{}`", self.kind, self.value)
    }
}

impl Error for UnknownVariant {}
