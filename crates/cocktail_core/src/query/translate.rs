//! Predicate tree and ordering derived from list filters.
//!
//! # Invariants
//! - The predicate is a conjunction; an empty conjunction matches every row.
//! - `sort_order` alone (without `sort_by`) yields no ordering.
//! - When both `ingredient_id` and `ingredient_type` are given for a cocktail
//!   list they form ONE relational condition: the cocktail must have at least
//!   one ingredient that matches both.

use crate::model::cocktail::CocktailCategory;
use crate::model::ingredient::{IngredientId, IngredientType};
use crate::model::UnknownVariant;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Sort direction.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortOrder {
    #[default]
    Asc,
    Desc,
}

impl FromStr for SortOrder {
    type Err = UnknownVariant;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "asc" => Ok(Self::Asc),
            "desc" => Ok(Self::Desc),
            other => Err(UnknownVariant::new("sort order", other)),
        }
    }
}

/// Sortable ingredient fields.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum IngredientSortField {
    Name,
    CreatedAt,
}

impl FromStr for IngredientSortField {
    type Err = UnknownVariant;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "name" => Ok(Self::Name),
            "createdAt" => Ok(Self::CreatedAt),
            other => Err(UnknownVariant::new("ingredient sort field", other)),
        }
    }
}

/// Sortable cocktail fields.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum CocktailSortField {
    Name,
    CreatedAt,
    Category,
}

impl FromStr for CocktailSortField {
    type Err = UnknownVariant;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "name" => Ok(Self::Name),
            "createdAt" => Ok(Self::CreatedAt),
            "category" => Ok(Self::Category),
            other => Err(UnknownVariant::new("cocktail sort field", other)),
        }
    }
}

/// List criteria for ingredients.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct IngredientFilter {
    #[serde(rename = "type")]
    pub kind: Option<IngredientType>,
    pub sort_by: Option<IngredientSortField>,
    pub sort_order: Option<SortOrder>,
}

/// List criteria for cocktails.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct CocktailFilter {
    pub ingredient_id: Option<IngredientId>,
    pub category: Option<CocktailCategory>,
    pub ingredient_type: Option<IngredientType>,
    pub sort_by: Option<CocktailSortField>,
    pub sort_order: Option<SortOrder>,
}

/// Column-level sort key understood by the repositories.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortField {
    Name,
    CreatedAt,
    Category,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Ordering {
    pub field: SortField,
    pub order: SortOrder,
}

/// One conjunct of a list predicate.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Condition {
    /// Ingredient row has the given type.
    IngredientTypeIs(IngredientType),
    /// Cocktail row has exactly the given category.
    CategoryIs(CocktailCategory),
    /// Cocktail has at least one association whose ingredient satisfies every
    /// supplied constraint.
    HasIngredient {
        ingredient_id: Option<IngredientId>,
        ingredient_type: Option<IngredientType>,
    },
}

/// Conjunction of conditions.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Predicate {
    pub conditions: Vec<Condition>,
}

impl Predicate {
    pub fn is_empty(&self) -> bool {
        self.conditions.is_empty()
    }
}

/// Translated list request handed to a repository.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ListQuery {
    pub predicate: Predicate,
    pub ordering: Option<Ordering>,
}

pub fn translate_ingredient_filter(filter: &IngredientFilter) -> ListQuery {
    let mut predicate = Predicate::default();
    if let Some(kind) = filter.kind {
        predicate.conditions.push(Condition::IngredientTypeIs(kind));
    }

    let ordering = filter.sort_by.map(|field| Ordering {
        field: match field {
            IngredientSortField::Name => SortField::Name,
            IngredientSortField::CreatedAt => SortField::CreatedAt,
        },
        order: filter.sort_order.unwrap_or_default(),
    });

    ListQuery {
        predicate,
        ordering,
    }
}

pub fn translate_cocktail_filter(filter: &CocktailFilter) -> ListQuery {
    let mut predicate = Predicate::default();
    if let Some(category) = filter.category {
        predicate.conditions.push(Condition::CategoryIs(category));
    }
    if filter.ingredient_id.is_some() || filter.ingredient_type.is_some() {
        predicate.conditions.push(Condition::HasIngredient {
            ingredient_id: filter.ingredient_id,
            ingredient_type: filter.ingredient_type,
        });
    }

    let ordering = filter.sort_by.map(|field| Ordering {
        field: match field {
            CocktailSortField::Name => SortField::Name,
            CocktailSortField::CreatedAt => SortField::CreatedAt,
            CocktailSortField::Category => SortField::Category,
        },
        order: filter.sort_order.unwrap_or_default(),
    });

    ListQuery {
        predicate,
        ordering,
    }
}
