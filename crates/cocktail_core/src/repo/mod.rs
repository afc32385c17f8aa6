//! Repository layer abstractions and persistence implementations.
//!
//! # Responsibility
//! - Define per-entity data access contracts (create, find, update, delete,
//!   count) plus association row primitives.
//! - Isolate SQLite query details from service orchestration.
//!
//! # Invariants
//! - Repositories do not enforce business rules (in-use guards, existence
//!   pre-checks); services do, inside `CatalogStore::atomically`.
//! - Update/delete on an absent row returns `RepoError::NotFound`.

pub mod cocktail_repo;
pub mod ingredient_repo;
mod sql;
pub mod store;
