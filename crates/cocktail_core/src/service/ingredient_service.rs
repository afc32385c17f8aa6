//! Ingredient use-case service.
//!
//! # Responsibility
//! - Provide create/list/get/update/delete entry points for ingredients.
//! - Enforce the referential guard: an ingredient used by any cocktail cannot
//!   be deleted.
//!
//! # Invariants
//! - Existence is checked before every mutation, inside the same transaction
//!   as the mutation.
//! - A rejected delete leaves the ingredient and its associations untouched.

use crate::model::ingredient::{
    Ingredient, IngredientDetail, IngredientId, IngredientPatch, NewIngredient,
};
use crate::model::validation::CatalogValidationError;
use crate::query::{translate_ingredient_filter, IngredientFilter};
use crate::repo::ingredient_repo::IngredientRepository;
use crate::repo::store::{CatalogStore, RepoError};
use log::{info, warn};
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Service error for ingredient use-cases.
#[derive(Debug)]
pub enum IngredientServiceError {
    /// Payload failed field-level validation.
    Validation(CatalogValidationError),
    /// Target ingredient does not exist.
    NotFound(IngredientId),
    /// Ingredient is still referenced by `cocktail_count` cocktails.
    InUse {
        ingredient_id: IngredientId,
        cocktail_count: u64,
    },
    /// Persistence-layer failure.
    Repo(RepoError),
    /// Internal consistency mismatch between write and read-back.
    InconsistentState(&'static str),
}

impl Display for IngredientServiceError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Validation(err) => write!(f, "{err}"),
            Self::NotFound(id) => write!(f, "ingredient with id {id} not found"),
            Self::InUse {
                ingredient_id,
                cocktail_count,
            } => write!(
                f,
                "cannot delete ingredient {ingredient_id} as it is used in {cocktail_count} cocktails"
            ),
            Self::Repo(err) => write!(f, "{err}"),
            Self::InconsistentState(details) => {
                write!(f, "inconsistent ingredient state: {details}")
            }
        }
    }
}

impl Error for IngredientServiceError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Validation(err) => Some(err),
            Self::Repo(err) => Some(err),
            _ => None,
        }
    }
}

impl From<RepoError> for IngredientServiceError {
    fn from(value: RepoError) -> Self {
        match value {
            RepoError::NotFound {
                entity: "ingredient",
                id,
            } => Self::NotFound(id),
            other => Self::Repo(other),
        }
    }
}

impl From<CatalogValidationError> for IngredientServiceError {
    fn from(value: CatalogValidationError) -> Self {
        Self::Validation(value)
    }
}

type ServiceResult<T> = Result<T, IngredientServiceError>;

/// Ingredient service facade over a catalog store.
pub struct IngredientService<S: CatalogStore> {
    store: S,
}

impl<S: CatalogStore> IngredientService<S> {
    /// Creates a service using the provided store handle.
    pub fn new(store: S) -> Self {
        Self { store }
    }

    /// Persists one ingredient and returns the stored row.
    pub fn create(&self, input: &NewIngredient) -> ServiceResult<Ingredient> {
        input.validate()?;

        let ingredient = self.store.atomically(|store| -> ServiceResult<Ingredient> {
            let id = store.ingredients().create_ingredient(input)?;
            store
                .ingredients()
                .find_ingredient(id)?
                .ok_or(IngredientServiceError::InconsistentState(
                    "created ingredient not found in read-back",
                ))
        })?;

        info!(
            "event=ingredient_create module=service status=ok ingredient_id={}",
            ingredient.id
        );
        Ok(ingredient)
    }

    /// Lists ingredients with optional type filter and single-field sort.
    pub fn list(&self, filter: &IngredientFilter) -> ServiceResult<Vec<Ingredient>> {
        let query = translate_ingredient_filter(filter);
        Ok(self.store.ingredients().find_ingredients(&query)?)
    }

    /// Gets one ingredient with the cocktails that use it.
    pub fn get(&self, id: IngredientId) -> ServiceResult<IngredientDetail> {
        let ingredient = self
            .store
            .ingredients()
            .find_ingredient(id)?
            .ok_or(IngredientServiceError::NotFound(id))?;
        let cocktails = self.store.ingredients().find_usages(id)?;
        Ok(IngredientDetail {
            ingredient,
            cocktails,
        })
    }

    /// Applies the fields present in `patch`.
    pub fn update(&self, id: IngredientId, patch: &IngredientPatch) -> ServiceResult<Ingredient> {
        patch.validate()?;

        let ingredient = self.store.atomically(|store| -> ServiceResult<Ingredient> {
            let repo = store.ingredients();
            let current = repo
                .find_ingredient(id)?
                .ok_or(IngredientServiceError::NotFound(id))?;
            if patch.is_empty() {
                return Ok(current);
            }

            repo.update_ingredient(id, patch)?;
            repo.find_ingredient(id)?
                .ok_or(IngredientServiceError::InconsistentState(
                    "updated ingredient not found in read-back",
                ))
        })?;

        info!(
            "event=ingredient_update module=service status=ok ingredient_id={}",
            id
        );
        Ok(ingredient)
    }

    /// Deletes an unused ingredient and returns the deleted row.
    ///
    /// # Errors
    /// - `NotFound` when `id` does not exist.
    /// - `InUse` when any cocktail still references the ingredient.
    pub fn delete(&self, id: IngredientId) -> ServiceResult<Ingredient> {
        let result = self.store.atomically(|store| -> ServiceResult<Ingredient> {
            let repo = store.ingredients();
            let current = repo
                .find_ingredient(id)?
                .ok_or(IngredientServiceError::NotFound(id))?;

            let cocktail_count = repo.count_usages(id)?;
            if cocktail_count > 0 {
                return Err(IngredientServiceError::InUse {
                    ingredient_id: id,
                    cocktail_count,
                });
            }

            repo.delete_ingredient(id)?;
            Ok(current)
        });

        match &result {
            Ok(_) => info!(
                "event=ingredient_delete module=service status=ok ingredient_id={}",
                id
            ),
            Err(IngredientServiceError::InUse { cocktail_count, .. }) => warn!(
                "event=ingredient_delete module=service status=rejected ingredient_id={} cocktail_count={}",
                id, cocktail_count
            ),
            Err(_) => {}
        }
        result
    }
}
