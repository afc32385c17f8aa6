//! Cocktail use-case service.
//!
//! # Responsibility
//! - Provide create/list/get/update/delete entry points for cocktails.
//! - Own the association lifecycle: create-with-lines, replace-all-lines on
//!   update, delete-lines-then-cocktail on delete.
//!
//! # Invariants
//! - Every multi-step operation runs in one store transaction; on failure no
//!   cocktail or association row is changed.
//! - `CocktailPatch::ingredients == Some(_)` replaces the whole association
//!   set, it never merges.
//! - Referenced ingredient ids are checked before any association insert and
//!   reported as `IngredientNotFound`.

use crate::model::cocktail::{
    CocktailDetail, CocktailId, CocktailPatch, IngredientLine, NewCocktail,
};
use crate::model::ingredient::IngredientId;
use crate::model::validation::CatalogValidationError;
use crate::query::{translate_cocktail_filter, CocktailFilter};
use crate::repo::cocktail_repo::CocktailRepository;
use crate::repo::ingredient_repo::IngredientRepository;
use crate::repo::store::{CatalogStore, RepoError};
use log::info;
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Service error for cocktail use-cases.
#[derive(Debug)]
pub enum CocktailServiceError {
    /// Payload failed field-level validation.
    Validation(CatalogValidationError),
    /// Target cocktail does not exist.
    NotFound(CocktailId),
    /// An ingredient line references a missing ingredient.
    IngredientNotFound(IngredientId),
    /// Persistence-layer failure.
    Repo(RepoError),
    /// Internal consistency mismatch between write and read-back.
    InconsistentState(&'static str),
}

impl Display for CocktailServiceError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Validation(err) => write!(f, "{err}"),
            Self::NotFound(id) => write!(f, "cocktail with id {id} not found"),
            Self::IngredientNotFound(id) => write!(f, "ingredient with id {id} not found"),
            Self::Repo(err) => write!(f, "{err}"),
            Self::InconsistentState(details) => write!(f, "inconsistent cocktail state: {details}"),
        }
    }
}

impl Error for CocktailServiceError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Validation(err) => Some(err),
            Self::Repo(err) => Some(err),
            _ => None,
        }
    }
}

impl From<RepoError> for CocktailServiceError {
    fn from(value: RepoError) -> Self {
        match value {
            RepoError::NotFound {
                entity: "cocktail",
                id,
            } => Self::NotFound(id),
            RepoError::NotFound {
                entity: "ingredient",
                id,
            } => Self::IngredientNotFound(id),
            other => Self::Repo(other),
        }
    }
}

impl From<CatalogValidationError> for CocktailServiceError {
    fn from(value: CatalogValidationError) -> Self {
        Self::Validation(value)
    }
}

type ServiceResult<T> = Result<T, CocktailServiceError>;

/// Cocktail service facade over a catalog store.
pub struct CocktailService<S: CatalogStore> {
    store: S,
}

impl<S: CatalogStore> CocktailService<S> {
    /// Creates a service using the provided store handle.
    pub fn new(store: S) -> Self {
        Self { store }
    }

    /// Creates a cocktail and its association rows, returning the expanded
    /// result.
    pub fn create(&self, input: &NewCocktail) -> ServiceResult<CocktailDetail> {
        input.validate()?;

        let created = self.store.atomically(|store| -> ServiceResult<CocktailDetail> {
            ensure_ingredients_exist(store, &input.ingredients)?;
            let id = store.cocktails().create_cocktail(input)?;
            store.cocktails().insert_lines(id, &input.ingredients)?;
            store
                .cocktails()
                .find_cocktail(id)?
                .ok_or(CocktailServiceError::InconsistentState(
                    "created cocktail not found in read-back",
                ))
        })?;

        info!(
            "event=cocktail_create module=service status=ok cocktail_id={} ingredient_count={}",
            created.cocktail.id,
            created.ingredients.len()
        );
        Ok(created)
    }

    /// Lists cocktails matching every supplied filter.
    pub fn list(&self, filter: &CocktailFilter) -> ServiceResult<Vec<CocktailDetail>> {
        let query = translate_cocktail_filter(filter);
        Ok(self.store.cocktails().find_cocktails(&query)?)
    }

    /// Gets one cocktail with ingredients expanded.
    pub fn get(&self, id: CocktailId) -> ServiceResult<CocktailDetail> {
        self.store
            .cocktails()
            .find_cocktail(id)?
            .ok_or(CocktailServiceError::NotFound(id))
    }

    /// Applies the fields present in `patch`.
    ///
    /// When `patch.ingredients` is present every existing association row is
    /// deleted and the supplied lines are inserted in its place.
    pub fn update(&self, id: CocktailId, patch: &CocktailPatch) -> ServiceResult<CocktailDetail> {
        patch.validate()?;

        let (updated, replaced) = self
            .store
            .atomically(|store| -> ServiceResult<(CocktailDetail, Option<usize>)> {
                let repo = store.cocktails();
                let current = repo
                    .find_cocktail(id)?
                    .ok_or(CocktailServiceError::NotFound(id))?;

                let mut replaced = None;
                if let Some(lines) = patch.ingredients.as_deref() {
                    ensure_ingredients_exist(store, lines)?;
                    replaced = Some(repo.delete_lines(id)?);
                    repo.insert_lines(id, lines)?;
                }

                if !patch.has_scalar_changes() && replaced.is_none() {
                    return Ok((current, None));
                }

                repo.update_cocktail(id, patch)?;
                let updated = repo
                    .find_cocktail(id)?
                    .ok_or(CocktailServiceError::InconsistentState(
                        "updated cocktail not found in read-back",
                    ))?;
                Ok((updated, replaced))
            })?;

        match replaced {
            Some(removed) => info!(
                "event=cocktail_update module=service status=ok cocktail_id={} lines_removed={} lines_inserted={}",
                id,
                removed,
                updated.ingredients.len()
            ),
            None => info!(
                "event=cocktail_update module=service status=ok cocktail_id={}",
                id
            ),
        }
        Ok(updated)
    }

    /// Deletes a cocktail and all of its association rows, returning the
    /// cocktail as it was before deletion.
    pub fn delete(&self, id: CocktailId) -> ServiceResult<CocktailDetail> {
        let (deleted, lines_removed) =
            self.store
                .atomically(|store| -> ServiceResult<(CocktailDetail, usize)> {
                    let repo = store.cocktails();
                    let current = repo
                        .find_cocktail(id)?
                        .ok_or(CocktailServiceError::NotFound(id))?;
                    let lines_removed = repo.delete_lines(id)?;
                    repo.delete_cocktail(id)?;
                    Ok((current, lines_removed))
                })?;

        info!(
            "event=cocktail_delete module=service status=ok cocktail_id={} lines_removed={}",
            id, lines_removed
        );
        Ok(deleted)
    }
}

fn ensure_ingredients_exist<S: CatalogStore>(
    store: &S,
    lines: &[IngredientLine],
) -> ServiceResult<()> {
    for line in lines {
        if store
            .ingredients()
            .find_ingredient(line.ingredient_id)?
            .is_none()
        {
            return Err(CocktailServiceError::IngredientNotFound(
                line.ingredient_id,
            ));
        }
    }
    Ok(())
}
