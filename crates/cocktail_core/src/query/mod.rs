//! Filter/sort translation for list use-cases.
//!
//! # Responsibility
//! - Turn optional list criteria into a store-agnostic predicate tree and a
//!   single-field ordering.
//!
//! # Invariants
//! - Translation is pure: no I/O, no validation beyond the type system.
//! - Absent criteria contribute nothing to the predicate.

pub mod translate;

pub use translate::{
    translate_cocktail_filter, translate_ingredient_filter, CocktailFilter, CocktailSortField,
    Condition, IngredientFilter, IngredientSortField, ListQuery, Ordering, Predicate, SortField,
    SortOrder,
};
