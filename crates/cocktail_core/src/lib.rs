//! Core domain logic for the cocktail catalog.
//! This crate is the single source of truth for catalog invariants.

pub mod config;
pub mod db;
pub mod logging;
pub mod model;
pub mod query;
pub mod repo;
pub mod seed;
pub mod service;

pub use config::{CatalogConfig, ConfigError, DatabaseConfig, LoggingConfig, DB_PATH_ENV};
pub use db::{open_db, open_db_in_memory, DbError, DbResult};
pub use logging::{default_log_level, init_logging, logging_status, LogTarget};
pub use model::cocktail::{
    Cocktail, CocktailCategory, CocktailDetail, CocktailId, CocktailIngredient, CocktailPatch,
    IngredientLine, NewCocktail,
};
pub use model::ingredient::{
    Ingredient, IngredientDetail, IngredientId, IngredientPatch, IngredientType, IngredientUsage,
    NewIngredient,
};
pub use model::validation::CatalogValidationError;
pub use model::UnknownVariant;
pub use query::{
    CocktailFilter, CocktailSortField, IngredientFilter, IngredientSortField, SortOrder,
};
pub use repo::cocktail_repo::{CocktailRepository, SqliteCocktailRepository};
pub use repo::ingredient_repo::{IngredientRepository, SqliteIngredientRepository};
pub use repo::store::{CatalogStore, RepoError, RepoResult, SqliteCatalogStore};
pub use seed::{seed_demo_catalog, SeedError, SeedSummary};
pub use service::catalog_service::{CatalogService, CatalogStats, ClearSummary};
pub use service::cocktail_service::{CocktailService, CocktailServiceError};
pub use service::ingredient_service::{IngredientService, IngredientServiceError};

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
