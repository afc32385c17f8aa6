//! Cocktail domain model.
//!
//! # Responsibility
//! - Define the stored cocktail record, its category vocabulary and the
//!   expanded read model carrying association rows.
//! - Define create/patch payloads, including the ingredient replacement list.
//!
//! # Invariants
//! - `CocktailCategory` is a closed vocabulary mirrored by a schema `CHECK`.
//! - `CocktailPatch::ingredients == None` keeps associations untouched;
//!   `Some(vec![])` removes all of them.

use crate::model::ingredient::{Ingredient, IngredientId};
use crate::model::validation::{require_text, require_unique_lines, CatalogValidationError};
use crate::model::UnknownVariant;
use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter};
use std::str::FromStr;

/// Store-generated cocktail identifier.
pub type CocktailId = i64;

/// Closed cocktail category vocabulary.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum CocktailCategory {
    OrdinaryDrink,
    Cocktail,
    Shake,
    OtherUnknown,
    Cocoa,
    Shot,
    CoffeeTea,
    HomemadeLiqueur,
    PunchPartyDrink,
    Beer,
    SoftDrink,
}

impl CocktailCategory {
    /// Every member, in declaration order.
    pub const ALL: [CocktailCategory; 11] = [
        Self::OrdinaryDrink,
        Self::Cocktail,
        Self::Shake,
        Self::OtherUnknown,
        Self::Cocoa,
        Self::Shot,
        Self::CoffeeTea,
        Self::HomemadeLiqueur,
        Self::PunchPartyDrink,
        Self::Beer,
        Self::SoftDrink,
    ];

    /// Wire and storage representation.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::OrdinaryDrink => "ORDINARY_DRINK",
            Self::Cocktail => "COCKTAIL",
            Self::Shake => "SHAKE",
            Self::OtherUnknown => "OTHER_UNKNOWN",
            Self::Cocoa => "COCOA",
            Self::Shot => "SHOT",
            Self::CoffeeTea => "COFFEE_TEA",
            Self::HomemadeLiqueur => "HOMEMADE_LIQUEUR",
            Self::PunchPartyDrink => "PUNCH_PARTY_DRINK",
            Self::Beer => "BEER",
            Self::SoftDrink => "SOFT_DRINK",
        }
    }
}

impl Display for CocktailCategory {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for CocktailCategory {
    type Err = UnknownVariant;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|category| category.as_str() == value)
            .ok_or_else(|| UnknownVariant::new("cocktail category", value))
    }
}

/// Stored cocktail record without its associations.
///
/// Also used as the cocktail summary inside ingredient usage listings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Cocktail {
    pub id: CocktailId,
    pub name: String,
    pub category: CocktailCategory,
    pub instruction: String,
    pub created_at: i64,
    pub updated_at: i64,
}

/// One ingredient entry of a create/replace payload.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IngredientLine {
    pub ingredient_id: IngredientId,
    /// Free-form amount such as `60 ml` or `2 dashes`.
    pub quantity: String,
}

impl IngredientLine {
    pub fn new(ingredient_id: IngredientId, quantity: impl Into<String>) -> Self {
        Self {
            ingredient_id,
            quantity: quantity.into(),
        }
    }
}

/// Association row with the referenced ingredient expanded.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CocktailIngredient {
    pub cocktail_id: CocktailId,
    pub ingredient_id: IngredientId,
    pub quantity: String,
    pub ingredient: Ingredient,
}

/// Cocktail with all association rows expanded.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CocktailDetail {
    #[serde(flatten)]
    pub cocktail: Cocktail,
    /// Ordered by ingredient id.
    pub ingredients: Vec<CocktailIngredient>,
}

impl CocktailDetail {
    /// Returns `(ingredient_id, quantity)` pairs in stored order.
    pub fn lines(&self) -> Vec<IngredientLine> {
        self.ingredients
            .iter()
            .map(|row| IngredientLine::new(row.ingredient_id, row.quantity.clone()))
            .collect()
    }
}

/// Payload for creating one cocktail with its ingredient lines.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewCocktail {
    pub name: String,
    pub category: CocktailCategory,
    pub instruction: String,
    #[serde(default)]
    pub ingredients: Vec<IngredientLine>,
}

impl NewCocktail {
    pub fn new(
        name: impl Into<String>,
        category: CocktailCategory,
        instruction: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            category,
            instruction: instruction.into(),
            ingredients: Vec::new(),
        }
    }

    pub fn with_ingredient(
        mut self,
        ingredient_id: IngredientId,
        quantity: impl Into<String>,
    ) -> Self {
        self.ingredients
            .push(IngredientLine::new(ingredient_id, quantity));
        self
    }

    pub fn validate(&self) -> Result<(), CatalogValidationError> {
        require_text("name", &self.name)?;
        require_text("instruction", &self.instruction)?;
        validate_lines(&self.ingredients)
    }
}

/// Partial update for one cocktail. `None` leaves the field unchanged.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CocktailPatch {
    pub name: Option<String>,
    pub category: Option<CocktailCategory>,
    pub instruction: Option<String>,
    /// Full replacement set when present.
    pub ingredients: Option<Vec<IngredientLine>>,
}

impl CocktailPatch {
    /// Returns whether any scalar column is touched.
    pub fn has_scalar_changes(&self) -> bool {
        self.name.is_some() || self.category.is_some() || self.instruction.is_some()
    }

    pub fn validate(&self) -> Result<(), CatalogValidationError> {
        if let Some(name) = self.name.as_deref() {
            require_text("name", name)?;
        }
        if let Some(instruction) = self.instruction.as_deref() {
            require_text("instruction", instruction)?;
        }
        match self.ingredients.as_deref() {
            Some(lines) => validate_lines(lines),
            None => Ok(()),
        }
    }
}

fn validate_lines(lines: &[IngredientLine]) -> Result<(), CatalogValidationError> {
    require_unique_lines(
        lines
            .iter()
            .map(|line| (line.ingredient_id, line.quantity.as_str())),
    )
}

#[cfg(test)]
mod tests {
    use super::{CocktailCategory, IngredientLine, NewCocktail};
    use crate::model::validation::CatalogValidationError;

    #[test]
    fn with_ingredient_accepts_borrowed_and_owned_quantities() {
        let measured = format!("{} ml", 45);
        let input = NewCocktail::new("Daiquiri", CocktailCategory::OrdinaryDrink, "Shake.")
            .with_ingredient(1, measured)
            .with_ingredient(2, "25 ml");

        assert_eq!(
            input.ingredients,
            vec![
                IngredientLine::new(1, "45 ml"),
                IngredientLine::new(2, "25 ml"),
            ]
        );
        assert!(input.validate().is_ok());
    }

    #[test]
    fn blank_owned_quantity_is_rejected() {
        let input = NewCocktail::new("Daiquiri", CocktailCategory::OrdinaryDrink, "Shake.")
            .with_ingredient(7, String::from("  "));
        assert_eq!(
            input.validate(),
            Err(CatalogValidationError::BlankQuantity { ingredient_id: 7 })
        );
    }
}
