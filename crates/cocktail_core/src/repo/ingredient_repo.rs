//! Ingredient repository contract and SQLite implementation.
//!
//! # Responsibility
//! - Provide typed CRUD and count APIs over the `ingredients` table.
//! - Expose the association lookups needed by the referential guard.
//!
//! # Invariants
//! - Read paths reject invalid persisted enum values instead of masking them.
//! - Updates only touch columns present in the patch, plus `updated_at`.

use crate::model::ingredient::{
    Ingredient, IngredientId, IngredientPatch, IngredientUsage, NewIngredient,
};
use crate::query::{Condition, ListQuery};
use crate::repo::sql::{cocktail_from_row, ingredient_from_row, order_by, NOW_MS_SQL};
use crate::repo::store::{RepoError, RepoResult};
use rusqlite::types::Value;
use rusqlite::{params, params_from_iter, Connection};

const INGREDIENT_SELECT_SQL: &str = "SELECT
    i.id AS id,
    i.name AS name,
    i.description AS description,
    i.type AS type,
    i.photo AS photo,
    i.created_at AS created_at,
    i.updated_at AS updated_at
FROM ingredients i";

/// Repository interface for ingredient persistence.
pub trait IngredientRepository {
    fn create_ingredient(&self, input: &NewIngredient) -> RepoResult<IngredientId>;
    fn find_ingredients(&self, query: &ListQuery) -> RepoResult<Vec<Ingredient>>;
    fn find_ingredient(&self, id: IngredientId) -> RepoResult<Option<Ingredient>>;
    fn update_ingredient(&self, id: IngredientId, patch: &IngredientPatch) -> RepoResult<()>;
    fn delete_ingredient(&self, id: IngredientId) -> RepoResult<()>;
    fn count_ingredients(&self) -> RepoResult<u64>;
    /// Lists association rows referencing the ingredient, ordered by cocktail id.
    fn find_usages(&self, id: IngredientId) -> RepoResult<Vec<IngredientUsage>>;
    /// Counts cocktails referencing the ingredient.
    fn count_usages(&self, id: IngredientId) -> RepoResult<u64>;
    /// Deletes every ingredient row. Fails while any association remains.
    fn delete_all_ingredients(&self) -> RepoResult<usize>;
}

/// SQLite-backed ingredient repository.
#[derive(Clone, Copy)]
pub struct SqliteIngredientRepository<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteIngredientRepository<'conn> {
    pub fn new(conn: &'conn Connection) -> Self {
        Self { conn }
    }
}

impl IngredientRepository for SqliteIngredientRepository<'_> {
    fn create_ingredient(&self, input: &NewIngredient) -> RepoResult<IngredientId> {
        self.conn.execute(
            "INSERT INTO ingredients (name, description, type, photo)
             VALUES (?1, ?2, ?3, ?4);",
            params![
                input.name.as_str(),
                input.description.as_deref().unwrap_or(""),
                input.kind.as_str(),
                input.photo.as_str(),
            ],
        )?;

        Ok(self.conn.last_insert_rowid())
    }

    fn find_ingredients(&self, query: &ListQuery) -> RepoResult<Vec<Ingredient>> {
        let mut sql = format!("{INGREDIENT_SELECT_SQL} WHERE 1 = 1");
        let mut bind_values: Vec<Value> = Vec::new();

        for condition in &query.predicate.conditions {
            match condition {
                Condition::IngredientTypeIs(kind) => {
                    sql.push_str(" AND i.type = ?");
                    bind_values.push(Value::Text(kind.as_str().to_string()));
                }
                Condition::CategoryIs(_) => {
                    return Err(RepoError::UnsupportedCondition("category"));
                }
                Condition::HasIngredient { .. } => {
                    return Err(RepoError::UnsupportedCondition("has_ingredient"));
                }
            }
        }

        sql.push_str(&order_by("i", query.ordering));

        let mut stmt = self.conn.prepare(&sql)?;
        let mut rows = stmt.query(params_from_iter(bind_values))?;
        let mut ingredients = Vec::new();
        while let Some(row) = rows.next()? {
            ingredients.push(ingredient_from_row(row, "")?);
        }

        Ok(ingredients)
    }

    fn find_ingredient(&self, id: IngredientId) -> RepoResult<Option<Ingredient>> {
        let mut stmt = self
            .conn
            .prepare(&format!("{INGREDIENT_SELECT_SQL} WHERE i.id = ?1;"))?;
        let mut rows = stmt.query([id])?;
        match rows.next()? {
            Some(row) => Ok(Some(ingredient_from_row(row, "")?)),
            None => Ok(None),
        }
    }

    fn update_ingredient(&self, id: IngredientId, patch: &IngredientPatch) -> RepoResult<()> {
        let mut assignments = vec![format!("updated_at = {NOW_MS_SQL}")];
        let mut bind_values: Vec<Value> = Vec::new();

        if let Some(name) = patch.name.as_ref() {
            assignments.push("name = ?".to_string());
            bind_values.push(Value::Text(name.clone()));
        }
        if let Some(description) = patch.description.as_ref() {
            assignments.push("description = ?".to_string());
            bind_values.push(Value::Text(description.clone()));
        }
        if let Some(kind) = patch.kind {
            assignments.push("type = ?".to_string());
            bind_values.push(Value::Text(kind.as_str().to_string()));
        }
        if let Some(photo) = patch.photo.as_ref() {
            assignments.push("photo = ?".to_string());
            bind_values.push(Value::Text(photo.clone()));
        }
        bind_values.push(Value::Integer(id));

        let sql = format!(
            "UPDATE ingredients SET {} WHERE id = ?;",
            assignments.join(", ")
        );
        let changed = self.conn.execute(&sql, params_from_iter(bind_values))?;
        if changed == 0 {
            return Err(RepoError::NotFound {
                entity: "ingredient",
                id,
            });
        }

        Ok(())
    }

    fn delete_ingredient(&self, id: IngredientId) -> RepoResult<()> {
        let changed = self
            .conn
            .execute("DELETE FROM ingredients WHERE id = ?1;", [id])?;
        if changed == 0 {
            return Err(RepoError::NotFound {
                entity: "ingredient",
                id,
            });
        }

        Ok(())
    }

    fn count_ingredients(&self) -> RepoResult<u64> {
        Ok(self.conn.query_row(
            "SELECT COUNT(*) FROM ingredients;",
            [],
            |row| row.get::<_, u64>(0),
        )?)
    }

    fn find_usages(&self, id: IngredientId) -> RepoResult<Vec<IngredientUsage>> {
        let mut stmt = self.conn.prepare(
            "SELECT
                ci.quantity,
                c.id AS cocktail_id,
                c.name AS cocktail_name,
                c.category AS cocktail_category,
                c.instruction AS cocktail_instruction,
                c.created_at AS cocktail_created_at,
                c.updated_at AS cocktail_updated_at
             FROM cocktail_ingredients ci
             INNER JOIN cocktails c ON c.id = ci.cocktail_id
             WHERE ci.ingredient_id = ?1
             ORDER BY c.id ASC;",
        )?;
        let mut rows = stmt.query([id])?;
        let mut usages = Vec::new();
        while let Some(row) = rows.next()? {
            usages.push(IngredientUsage {
                quantity: row.get("quantity")?,
                cocktail: cocktail_from_row(row, "cocktail_")?,
            });
        }

        Ok(usages)
    }

    fn count_usages(&self, id: IngredientId) -> RepoResult<u64> {
        Ok(self.conn.query_row(
            "SELECT COUNT(DISTINCT cocktail_id)
             FROM cocktail_ingredients
             WHERE ingredient_id = ?1;",
            [id],
            |row| row.get::<_, u64>(0),
        )?)
    }

    fn delete_all_ingredients(&self) -> RepoResult<usize> {
        Ok(self.conn.execute("DELETE FROM ingredients;", [])?)
    }
}
