//! Ingredient domain model.
//!
//! # Responsibility
//! - Define the stored ingredient record and its create/patch payloads.
//! - Define the read model that lists the cocktails using an ingredient.
//!
//! # Invariants
//! - `description` is always present on stored records (empty when omitted
//!   at creation).
//! - `photo` is an absolute http/https URL.

use crate::model::cocktail::Cocktail;
use crate::model::validation::{require_photo_url, require_text, CatalogValidationError};
use crate::model::UnknownVariant;
use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter};
use std::str::FromStr;

/// Store-generated ingredient identifier.
pub type IngredientId = i64;

/// Alcohol classification of an ingredient.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum IngredientType {
    Alcoholic,
    NonAlcoholic,
}

impl IngredientType {
    /// Every member, in declaration order.
    pub const ALL: [IngredientType; 2] = [Self::Alcoholic, Self::NonAlcoholic];

    /// Wire and storage representation.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Alcoholic => "ALCOHOLIC",
            Self::NonAlcoholic => "NON_ALCOHOLIC",
        }
    }
}

impl Display for IngredientType {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for IngredientType {
    type Err = UnknownVariant;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|kind| kind.as_str() == value)
            .ok_or_else(|| UnknownVariant::new("ingredient type", value))
    }
}

/// Stored ingredient record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Ingredient {
    pub id: IngredientId,
    pub name: String,
    pub description: String,
    /// Serialized as `type` to match external schema naming.
    #[serde(rename = "type")]
    pub kind: IngredientType,
    pub photo: String,
    /// Epoch milliseconds, assigned by the store.
    pub created_at: i64,
    /// Epoch milliseconds, refreshed on every update.
    pub updated_at: i64,
}

/// Payload for creating one ingredient.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewIngredient {
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(rename = "type")]
    pub kind: IngredientType,
    pub photo: String,
}

impl NewIngredient {
    pub fn new(name: impl Into<String>, kind: IngredientType, photo: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: None,
            kind,
            photo: photo.into(),
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Checks field-level constraints before persistence.
    pub fn validate(&self) -> Result<(), CatalogValidationError> {
        require_text("name", &self.name)?;
        require_photo_url(&self.photo)
    }
}

/// Partial update for one ingredient. `None` leaves the field unchanged.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct IngredientPatch {
    pub name: Option<String>,
    pub description: Option<String>,
    #[serde(rename = "type")]
    pub kind: Option<IngredientType>,
    pub photo: Option<String>,
}

impl IngredientPatch {
    /// Returns whether the patch carries no field at all.
    pub fn is_empty(&self) -> bool {
        self.name.is_none()
            && self.description.is_none()
            && self.kind.is_none()
            && self.photo.is_none()
    }

    pub fn validate(&self) -> Result<(), CatalogValidationError> {
        if let Some(name) = self.name.as_deref() {
            require_text("name", name)?;
        }
        if let Some(photo) = self.photo.as_deref() {
            require_photo_url(photo)?;
        }
        Ok(())
    }
}

/// One cocktail using an ingredient, with the quantity it calls for.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IngredientUsage {
    pub quantity: String,
    pub cocktail: Cocktail,
}

/// Ingredient together with every cocktail that references it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IngredientDetail {
    #[serde(flatten)]
    pub ingredient: Ingredient,
    /// Ordered by cocktail id.
    pub cocktails: Vec<IngredientUsage>,
}
