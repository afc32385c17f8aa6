//! Store handle shared by the catalog services.
//!
//! # Responsibility
//! - Bundle the per-entity repositories behind one explicitly constructed
//!   handle.
//! - Provide the transaction scope used by multi-step service operations.
//! - Define the repository-level error type.
//!
//! # Invariants
//! - A store is built from a migrated connection; `try_new` rejects
//!   connections missing catalog tables.
//! - `atomically` commits only when the work closure returns `Ok`; any error
//!   rolls back every statement issued inside the closure.

use crate::db::DbError;
use crate::repo::cocktail_repo::{CocktailRepository, SqliteCocktailRepository};
use crate::repo::ingredient_repo::{IngredientRepository, SqliteIngredientRepository};
use rusqlite::{Connection, Transaction, TransactionBehavior};
use std::error::Error;
use std::fmt::{Display, Formatter};

const REQUIRED_TABLES: [&str; 3] = ["ingredients", "cocktails", "cocktail_ingredients"];

pub type RepoResult<T> = Result<T, RepoError>;

/// Repository error for catalog persistence and query operations.
#[derive(Debug)]
pub enum RepoError {
    Db(DbError),
    /// Update/delete touched no row.
    NotFound { entity: &'static str, id: i64 },
    /// A stored value cannot be mapped back to the domain model.
    InvalidData(String),
    /// A predicate condition does not apply to the queried entity.
    UnsupportedCondition(&'static str),
    MissingRequiredTable(&'static str),
}

impl Display for RepoError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Db(err) => write!(f, "{err}"),
            Self::NotFound { entity, id } => write!(f, "{entity} not found: {id}"),
            Self::InvalidData(message) => write!(f, "invalid persisted catalog data: {message}"),
            Self::UnsupportedCondition(condition) => {
                write!(f, "condition `{condition}` is not supported for this entity")
            }
            Self::MissingRequiredTable(table) => write!(f, "required table `{table}` is missing"),
        }
    }
}

impl Error for RepoError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Db(err) => Some(err),
            _ => None,
        }
    }
}

impl From<DbError> for RepoError {
    fn from(value: DbError) -> Self {
        Self::Db(value)
    }
}

impl From<rusqlite::Error> for RepoError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Db(DbError::Sqlite(value))
    }
}

/// Data access handle consumed by the catalog services.
pub trait CatalogStore {
    type Ingredients: IngredientRepository;
    type Cocktails: CocktailRepository;

    fn ingredients(&self) -> &Self::Ingredients;
    fn cocktails(&self) -> &Self::Cocktails;

    /// Runs `work` inside one store transaction.
    fn atomically<T, E>(&self, work: impl FnOnce(&Self) -> Result<T, E>) -> Result<T, E>
    where
        E: From<RepoError>;
}

/// SQLite-backed catalog store borrowing one connection.
#[derive(Clone, Copy)]
pub struct SqliteCatalogStore<'conn> {
    conn: &'conn Connection,
    ingredients: SqliteIngredientRepository<'conn>,
    cocktails: SqliteCocktailRepository<'conn>,
}

impl<'conn> SqliteCatalogStore<'conn> {
    /// Constructs a store from a migrated connection.
    pub fn try_new(conn: &'conn Connection) -> RepoResult<Self> {
        for table in REQUIRED_TABLES {
            if !table_exists(conn, table)? {
                return Err(RepoError::MissingRequiredTable(table));
            }
        }

        Ok(Self {
            conn,
            ingredients: SqliteIngredientRepository::new(conn),
            cocktails: SqliteCocktailRepository::new(conn),
        })
    }
}

impl<'conn> CatalogStore for SqliteCatalogStore<'conn> {
    type Ingredients = SqliteIngredientRepository<'conn>;
    type Cocktails = SqliteCocktailRepository<'conn>;

    fn ingredients(&self) -> &Self::Ingredients {
        &self.ingredients
    }

    fn cocktails(&self) -> &Self::Cocktails {
        &self.cocktails
    }

    fn atomically<T, E>(&self, work: impl FnOnce(&Self) -> Result<T, E>) -> Result<T, E>
    where
        E: From<RepoError>,
    {
        // Repositories keep issuing statements through the shared connection;
        // SQLite scopes them to the open transaction.
        let tx = Transaction::new_unchecked(self.conn, TransactionBehavior::Immediate)
            .map_err(RepoError::from)?;
        let value = work(self)?;
        tx.commit().map_err(RepoError::from)?;
        Ok(value)
    }
}

fn table_exists(conn: &Connection, table: &str) -> RepoResult<bool> {
    let exists: i64 = conn.query_row(
        "SELECT EXISTS(
            SELECT 1
            FROM sqlite_master
            WHERE type = 'table' AND name = ?1
        );",
        [table],
        |row| row.get(0),
    )?;
    Ok(exists == 1)
}
