//! Catalog-wide maintenance use-cases.
//!
//! # Responsibility
//! - Report entity counts.
//! - Clear the whole catalog in one transaction.

use crate::repo::cocktail_repo::CocktailRepository;
use crate::repo::ingredient_repo::IngredientRepository;
use crate::repo::store::{CatalogStore, RepoResult};
use log::info;
use serde::{Deserialize, Serialize};
use std::time::{SystemTime, UNIX_EPOCH};

/// Row counts reported by `CatalogService::stats`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CatalogStats {
    pub cocktails: u64,
    pub ingredients: u64,
    /// Epoch milliseconds at which the counts were taken.
    pub generated_at: i64,
}

/// Rows removed by `CatalogService::clear_all`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClearSummary {
    pub cocktails_removed: usize,
    pub ingredients_removed: usize,
}

pub struct CatalogService<S: CatalogStore> {
    store: S,
}

impl<S: CatalogStore> CatalogService<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    pub fn stats(&self) -> RepoResult<CatalogStats> {
        Ok(CatalogStats {
            cocktails: self.store.cocktails().count_cocktails()?,
            ingredients: self.store.ingredients().count_ingredients()?,
            generated_at: now_epoch_ms(),
        })
    }

    /// Removes every association row, cocktail and ingredient.
    pub fn clear_all(&self) -> RepoResult<ClearSummary> {
        let summary = self.store.atomically(|store| {
            let cocktails_removed = store.cocktails().delete_all_cocktails()?;
            let ingredients_removed = store.ingredients().delete_all_ingredients()?;
            RepoResult::Ok(ClearSummary {
                cocktails_removed,
                ingredients_removed,
            })
        })?;

        info!(
            "event=catalog_clear module=service status=ok cocktails_removed={} ingredients_removed={}",
            summary.cocktails_removed, summary.ingredients_removed
        );
        Ok(summary)
    }
}

fn now_epoch_ms() -> i64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map_or(0, |elapsed| i64::try_from(elapsed.as_millis()).unwrap_or(i64::MAX))
}
