//! Input validation for create/patch payloads.
//!
//! Payloads reaching the repositories have already passed these checks:
//! non-blank text fields, http(s) photo URLs and unique ingredient ids per
//! cocktail. Existence of referenced ids is not checked here.

use crate::model::ingredient::IngredientId;
use once_cell::sync::Lazy;
use regex::Regex;
use std::collections::HashSet;
use std::error::Error;
use std::fmt::{Display, Formatter};

static PHOTO_URL_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)^https?://[^\s/$.?#][^\s]*$").expect("valid photo url regex")
});

/// Validation failures for catalog payloads.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CatalogValidationError {
    /// A required text field is empty after trim.
    BlankField(&'static str),
    /// `photo` is not an absolute http/https URL.
    InvalidPhotoUrl(String),
    /// An ingredient line has a blank quantity.
    BlankQuantity { ingredient_id: IngredientId },
    /// The same ingredient appears twice in one cocktail payload.
    DuplicateIngredient(IngredientId),
}

impl Display for CatalogValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::BlankField(field) => write!(f, "`{field}` must not be blank"),
            Self::InvalidPhotoUrl(value) => write!(f, "`photo` must be an http(s) url: `{value}`"),
            Self::BlankQuantity { ingredient_id } => {
                write!(f, "quantity for ingredient {ingredient_id} must not be blank")
            }
            Self::DuplicateIngredient(id) => {
                write!(f, "ingredient {id} is listed more than once")
            }
        }
    }
}

impl Error for CatalogValidationError {}

pub(crate) fn require_text(field: &'static str, value: &str) -> Result<(), CatalogValidationError> {
    if value.trim().is_empty() {
        return Err(CatalogValidationError::BlankField(field));
    }
    Ok(())
}

pub(crate) fn require_photo_url(value: &str) -> Result<(), CatalogValidationError> {
    if !PHOTO_URL_RE.is_match(value.trim()) {
        return Err(CatalogValidationError::InvalidPhotoUrl(value.to_string()));
    }
    Ok(())
}

/// Checks quantities and rejects repeated ingredient ids.
///
/// The association table is keyed by `(cocktail_id, ingredient_id)`, so a
/// repeated id would otherwise fail as a store constraint mid-transaction.
pub(crate) fn require_unique_lines<'a>(
    lines: impl IntoIterator<Item = (IngredientId, &'a str)>,
) -> Result<(), CatalogValidationError> {
    let mut seen = HashSet::new();
    for (ingredient_id, quantity) in lines {
        if quantity.trim().is_empty() {
            return Err(CatalogValidationError::BlankQuantity { ingredient_id });
        }
        if !seen.insert(ingredient_id) {
            return Err(CatalogValidationError::DuplicateIngredient(ingredient_id));
        }
    }
    Ok(())
}
