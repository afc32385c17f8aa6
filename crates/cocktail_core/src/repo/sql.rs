//! SQL fragments shared by the catalog repositories.

use crate::model::cocktail::{Cocktail, CocktailCategory};
use crate::model::ingredient::{Ingredient, IngredientType};
use crate::query::{Ordering, SortField, SortOrder};
use crate::repo::store::{RepoError, RepoResult};
use rusqlite::Row;

/// Epoch-millisecond expression used for `updated_at` refreshes.
pub(crate) const NOW_MS_SQL: &str = "(strftime('%s', 'now') * 1000)";

/// Renders `ORDER BY` with `id ASC` as the final tie-break so repeated lists
/// return identical order.
pub(crate) fn order_by(alias: &str, ordering: Option<Ordering>) -> String {
    match ordering {
        Some(ordering) => {
            let column = match ordering.field {
                SortField::Name => "name",
                SortField::CreatedAt => "created_at",
                SortField::Category => "category",
            };
            let direction = match ordering.order {
                SortOrder::Asc => "ASC",
                SortOrder::Desc => "DESC",
            };
            format!(" ORDER BY {alias}.{column} {direction}, {alias}.id ASC")
        }
        None => format!(" ORDER BY {alias}.id ASC"),
    }
}

pub(crate) fn parse_ingredient_type(value: &str) -> RepoResult<IngredientType> {
    value.parse().map_err(|_| {
        RepoError::InvalidData(format!("invalid ingredient type `{value}` in ingredients.type"))
    })
}

pub(crate) fn parse_category(value: &str) -> RepoResult<CocktailCategory> {
    value.parse().map_err(|_| {
        RepoError::InvalidData(format!("invalid category `{value}` in cocktails.category"))
    })
}

/// Reads an ingredient from columns prefixed with `prefix`
/// (`""` for a plain `ingredients` select).
pub(crate) fn ingredient_from_row(row: &Row<'_>, prefix: &str) -> RepoResult<Ingredient> {
    let column = |name: &str| format!("{prefix}{name}");
    let type_text: String = row.get(column("type").as_str())?;

    Ok(Ingredient {
        id: row.get(column("id").as_str())?,
        name: row.get(column("name").as_str())?,
        description: row.get(column("description").as_str())?,
        kind: parse_ingredient_type(&type_text)?,
        photo: row.get(column("photo").as_str())?,
        created_at: row.get(column("created_at").as_str())?,
        updated_at: row.get(column("updated_at").as_str())?,
    })
}

/// Reads a cocktail from columns prefixed with `prefix`.
pub(crate) fn cocktail_from_row(row: &Row<'_>, prefix: &str) -> RepoResult<Cocktail> {
    let column = |name: &str| format!("{prefix}{name}");
    let category_text: String = row.get(column("category").as_str())?;

    Ok(Cocktail {
        id: row.get(column("id").as_str())?,
        name: row.get(column("name").as_str())?,
        category: parse_category(&category_text)?,
        instruction: row.get(column("instruction").as_str())?,
        created_at: row.get(column("created_at").as_str())?,
        updated_at: row.get(column("updated_at").as_str())?,
    })
}

#[cfg(test)]
mod tests {
    use super::order_by;
    use crate::query::{Ordering, SortField, SortOrder};

    #[test]
    fn order_by_always_ends_with_id_tie_break() {
        assert_eq!(order_by("c", None), " ORDER BY c.id ASC");
        assert_eq!(
            order_by(
                "i",
                Some(Ordering {
                    field: SortField::CreatedAt,
                    order: SortOrder::Desc,
                })
            ),
            " ORDER BY i.created_at DESC, i.id ASC"
        );
    }
}
