//! Cocktail repository contract and SQLite implementation.
//!
//! # Responsibility
//! - Provide typed CRUD and count APIs over `cocktails`.
//! - Own association row primitives (`insert_lines`, `delete_lines`).
//! - Read cocktails with their association rows and referenced ingredients
//!   expanded in a single joined query.
//!
//! # Invariants
//! - Expanded results keep association rows ordered by ingredient id.
//! - Scalar updates never touch association rows.

use crate::model::cocktail::{
    CocktailDetail, CocktailId, CocktailIngredient, CocktailPatch, IngredientLine, NewCocktail,
};
use crate::query::{Condition, ListQuery};
use crate::repo::sql::{cocktail_from_row, ingredient_from_row, order_by, NOW_MS_SQL};
use crate::repo::store::{RepoError, RepoResult};
use rusqlite::types::Value;
use rusqlite::{params, params_from_iter, Connection};

const EXPANDED_SELECT_SQL: &str = "SELECT
    c.id AS id,
    c.name AS name,
    c.category AS category,
    c.instruction AS instruction,
    c.created_at AS created_at,
    c.updated_at AS updated_at,
    ci.quantity AS quantity,
    i.id AS ingredient_id,
    i.name AS ingredient_name,
    i.description AS ingredient_description,
    i.type AS ingredient_type,
    i.photo AS ingredient_photo,
    i.created_at AS ingredient_created_at,
    i.updated_at AS ingredient_updated_at
FROM cocktails c
LEFT JOIN cocktail_ingredients ci ON ci.cocktail_id = c.id
LEFT JOIN ingredients i ON i.id = ci.ingredient_id";

/// Repository interface for cocktail persistence.
pub trait CocktailRepository {
    /// Inserts the cocktail row only; association rows go through
    /// `insert_lines`.
    fn create_cocktail(&self, input: &NewCocktail) -> RepoResult<CocktailId>;
    fn insert_lines(&self, cocktail_id: CocktailId, lines: &[IngredientLine]) -> RepoResult<()>;
    /// Bulk-deletes association rows of one cocktail and returns the count.
    fn delete_lines(&self, cocktail_id: CocktailId) -> RepoResult<usize>;
    fn find_cocktails(&self, query: &ListQuery) -> RepoResult<Vec<CocktailDetail>>;
    fn find_cocktail(&self, id: CocktailId) -> RepoResult<Option<CocktailDetail>>;
    /// Applies the scalar fields of `patch`; `patch.ingredients` is ignored.
    fn update_cocktail(&self, id: CocktailId, patch: &CocktailPatch) -> RepoResult<()>;
    fn delete_cocktail(&self, id: CocktailId) -> RepoResult<()>;
    fn count_cocktails(&self) -> RepoResult<u64>;
    /// Deletes every association row and every cocktail.
    fn delete_all_cocktails(&self) -> RepoResult<usize>;
}

/// SQLite-backed cocktail repository.
#[derive(Clone, Copy)]
pub struct SqliteCocktailRepository<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteCocktailRepository<'conn> {
    pub fn new(conn: &'conn Connection) -> Self {
        Self { conn }
    }

    fn query_expanded(&self, sql: &str, bind_values: Vec<Value>) -> RepoResult<Vec<CocktailDetail>> {
        let mut stmt = self.conn.prepare(sql)?;
        let mut rows = stmt.query(params_from_iter(bind_values))?;
        let mut cocktails: Vec<CocktailDetail> = Vec::new();

        // Rows of one cocktail are contiguous because `id` is always the
        // final sort key before the ingredient id.
        while let Some(row) = rows.next()? {
            let cocktail_id: CocktailId = row.get("id")?;
            let starts_new = cocktails
                .last()
                .map_or(true, |current| current.cocktail.id != cocktail_id);
            if starts_new {
                cocktails.push(CocktailDetail {
                    cocktail: cocktail_from_row(row, "")?,
                    ingredients: Vec::new(),
                });
            }

            let ingredient_id: Option<i64> = row.get("ingredient_id")?;
            if ingredient_id.is_none() {
                continue;
            }
            let ingredient = ingredient_from_row(row, "ingredient_")?;
            if let Some(current) = cocktails.last_mut() {
                current.ingredients.push(CocktailIngredient {
                    cocktail_id,
                    ingredient_id: ingredient.id,
                    quantity: row.get("quantity")?,
                    ingredient,
                });
            }
        }

        Ok(cocktails)
    }
}

impl CocktailRepository for SqliteCocktailRepository<'_> {
    fn create_cocktail(&self, input: &NewCocktail) -> RepoResult<CocktailId> {
        self.conn.execute(
            "INSERT INTO cocktails (name, category, instruction)
             VALUES (?1, ?2, ?3);",
            params![
                input.name.as_str(),
                input.category.as_str(),
                input.instruction.as_str(),
            ],
        )?;

        Ok(self.conn.last_insert_rowid())
    }

    fn insert_lines(&self, cocktail_id: CocktailId, lines: &[IngredientLine]) -> RepoResult<()> {
        let mut stmt = self.conn.prepare(
            "INSERT INTO cocktail_ingredients (cocktail_id, ingredient_id, quantity)
             VALUES (?1, ?2, ?3);",
        )?;
        for line in lines {
            stmt.execute(params![
                cocktail_id,
                line.ingredient_id,
                line.quantity.as_str()
            ])?;
        }
        Ok(())
    }

    fn delete_lines(&self, cocktail_id: CocktailId) -> RepoResult<usize> {
        Ok(self.conn.execute(
            "DELETE FROM cocktail_ingredients WHERE cocktail_id = ?1;",
            [cocktail_id],
        )?)
    }

    fn find_cocktails(&self, query: &ListQuery) -> RepoResult<Vec<CocktailDetail>> {
        let mut sql = format!("{EXPANDED_SELECT_SQL} WHERE 1 = 1");
        let mut bind_values: Vec<Value> = Vec::new();

        for condition in &query.predicate.conditions {
            match condition {
                Condition::CategoryIs(category) => {
                    sql.push_str(" AND c.category = ?");
                    bind_values.push(Value::Text(category.as_str().to_string()));
                }
                Condition::HasIngredient {
                    ingredient_id,
                    ingredient_type,
                } => {
                    sql.push_str(
                        " AND EXISTS (
                            SELECT 1
                            FROM cocktail_ingredients fci
                            INNER JOIN ingredients fi ON fi.id = fci.ingredient_id
                            WHERE fci.cocktail_id = c.id",
                    );
                    if let Some(ingredient_id) = ingredient_id {
                        sql.push_str(" AND fci.ingredient_id = ?");
                        bind_values.push(Value::Integer(*ingredient_id));
                    }
                    if let Some(kind) = ingredient_type {
                        sql.push_str(" AND fi.type = ?");
                        bind_values.push(Value::Text(kind.as_str().to_string()));
                    }
                    sql.push(')');
                }
                Condition::IngredientTypeIs(_) => {
                    return Err(RepoError::UnsupportedCondition("ingredient_type_is"));
                }
            }
        }

        sql.push_str(&order_by("c", query.ordering));
        sql.push_str(", ci.ingredient_id ASC");
        self.query_expanded(&sql, bind_values)
    }

    fn find_cocktail(&self, id: CocktailId) -> RepoResult<Option<CocktailDetail>> {
        let sql = format!("{EXPANDED_SELECT_SQL} WHERE c.id = ? ORDER BY ci.ingredient_id ASC");
        let mut found = self.query_expanded(&sql, vec![Value::Integer(id)])?;
        Ok(found.pop())
    }

    fn update_cocktail(&self, id: CocktailId, patch: &CocktailPatch) -> RepoResult<()> {
        let mut assignments = vec![format!("updated_at = {NOW_MS_SQL}")];
        let mut bind_values: Vec<Value> = Vec::new();

        if let Some(name) = patch.name.as_ref() {
            assignments.push("name = ?".to_string());
            bind_values.push(Value::Text(name.clone()));
        }
        if let Some(category) = patch.category {
            assignments.push("category = ?".to_string());
            bind_values.push(Value::Text(category.as_str().to_string()));
        }
        if let Some(instruction) = patch.instruction.as_ref() {
            assignments.push("instruction = ?".to_string());
            bind_values.push(Value::Text(instruction.clone()));
        }
        bind_values.push(Value::Integer(id));

        let sql = format!(
            "UPDATE cocktails SET {} WHERE id = ?;",
            assignments.join(", ")
        );
        let changed = self.conn.execute(&sql, params_from_iter(bind_values))?;
        if changed == 0 {
            return Err(RepoError::NotFound {
                entity: "cocktail",
                id,
            });
        }

        Ok(())
    }

    fn delete_cocktail(&self, id: CocktailId) -> RepoResult<()> {
        let changed = self
            .conn
            .execute("DELETE FROM cocktails WHERE id = ?1;", [id])?;
        if changed == 0 {
            return Err(RepoError::NotFound {
                entity: "cocktail",
                id,
            });
        }

        Ok(())
    }

    fn count_cocktails(&self) -> RepoResult<u64> {
        Ok(self.conn.query_row(
            "SELECT COUNT(*) FROM cocktails;",
            [],
            |row| row.get::<_, u64>(0),
        )?)
    }

    fn delete_all_cocktails(&self) -> RepoResult<usize> {
        self.conn.execute("DELETE FROM cocktail_ingredients;", [])?;
        Ok(self.conn.execute("DELETE FROM cocktails;", [])?)
    }
}
