use cocktail_core::db::open_db_in_memory;
use cocktail_core::{
    CatalogStore, CatalogValidationError, CocktailCategory, CocktailRepository, CocktailService,
    IngredientFilter, IngredientPatch, IngredientRepository, IngredientService,
    IngredientServiceError, IngredientSortField, IngredientType, NewCocktail, NewIngredient,
    SortOrder, SqliteCatalogStore,
};
use rusqlite::Connection;

const PHOTO: &str = "https://example.com/photo.png";

fn store(conn: &Connection) -> SqliteCatalogStore<'_> {
    SqliteCatalogStore::try_new(conn).unwrap()
}

fn new_ingredient(name: &str, kind: IngredientType) -> NewIngredient {
    NewIngredient::new(name, kind, PHOTO)
}

fn names(ingredients: &[cocktail_core::Ingredient]) -> Vec<&str> {
    ingredients
        .iter()
        .map(|ingredient| ingredient.name.as_str())
        .collect()
}

#[test]
fn create_assigns_id_timestamps_and_default_description() {
    let conn = open_db_in_memory().unwrap();
    let service = IngredientService::new(store(&conn));

    let created = service
        .create(&new_ingredient("Rum", IngredientType::Alcoholic))
        .unwrap();

    assert!(created.id > 0);
    assert_eq!(created.name, "Rum");
    assert_eq!(created.description, "");
    assert_eq!(created.kind, IngredientType::Alcoholic);
    assert_eq!(created.photo, PHOTO);
    assert!(created.created_at > 0);
    assert_eq!(created.created_at, created.updated_at);
}

#[test]
fn create_rejects_blank_name_and_bad_photo_without_writing() {
    let conn = open_db_in_memory().unwrap();
    let service = IngredientService::new(store(&conn));

    let err = service
        .create(&new_ingredient("   ", IngredientType::Alcoholic))
        .unwrap_err();
    assert!(matches!(
        err,
        IngredientServiceError::Validation(CatalogValidationError::BlankField("name"))
    ));

    let err = service
        .create(&NewIngredient::new(
            "Gin",
            IngredientType::Alcoholic,
            "ftp://example.com/gin.png",
        ))
        .unwrap_err();
    assert!(matches!(
        err,
        IngredientServiceError::Validation(CatalogValidationError::InvalidPhotoUrl(_))
    ));

    assert!(service.list(&IngredientFilter::default()).unwrap().is_empty());
}

#[test]
fn list_filters_by_type_and_sorts_by_name() {
    let conn = open_db_in_memory().unwrap();
    let service = IngredientService::new(store(&conn));
    for (name, kind) in [
        ("Vodka", IngredientType::Alcoholic),
        ("Lime Juice", IngredientType::NonAlcoholic),
        ("Gin", IngredientType::Alcoholic),
        ("Soda Water", IngredientType::NonAlcoholic),
    ] {
        service.create(&new_ingredient(name, kind)).unwrap();
    }

    let all = service.list(&IngredientFilter::default()).unwrap();
    assert_eq!(names(&all), ["Vodka", "Lime Juice", "Gin", "Soda Water"]);

    let alcoholic_desc = service
        .list(&IngredientFilter {
            kind: Some(IngredientType::Alcoholic),
            sort_by: Some(IngredientSortField::Name),
            sort_order: Some(SortOrder::Desc),
        })
        .unwrap();
    assert_eq!(names(&alcoholic_desc), ["Vodka", "Gin"]);

    let by_name = service
        .list(&IngredientFilter {
            sort_by: Some(IngredientSortField::Name),
            ..IngredientFilter::default()
        })
        .unwrap();
    assert_eq!(
        names(&by_name),
        ["Gin", "Lime Juice", "Soda Water", "Vodka"]
    );
}

#[test]
fn list_sorts_by_created_at_with_id_tie_break() {
    let conn = open_db_in_memory().unwrap();
    let service = IngredientService::new(store(&conn));
    let first = service
        .create(&new_ingredient("First", IngredientType::Alcoholic))
        .unwrap();
    let second = service
        .create(&new_ingredient("Second", IngredientType::Alcoholic))
        .unwrap();
    let third = service
        .create(&new_ingredient("Third", IngredientType::Alcoholic))
        .unwrap();

    conn.execute(
        "UPDATE ingredients SET created_at = 3000 WHERE id = ?1;",
        [first.id],
    )
    .unwrap();
    conn.execute(
        "UPDATE ingredients SET created_at = 1000 WHERE id IN (?1, ?2);",
        [second.id, third.id],
    )
    .unwrap();

    let filter = IngredientFilter {
        sort_by: Some(IngredientSortField::CreatedAt),
        sort_order: Some(SortOrder::Desc),
        ..IngredientFilter::default()
    };
    let listed = service.list(&filter).unwrap();
    assert_eq!(names(&listed), ["First", "Second", "Third"]);
    assert_eq!(service.list(&filter).unwrap(), listed);
}

#[test]
fn sort_order_without_sort_field_is_ignored() {
    let conn = open_db_in_memory().unwrap();
    let service = IngredientService::new(store(&conn));
    service
        .create(&new_ingredient("B", IngredientType::Alcoholic))
        .unwrap();
    service
        .create(&new_ingredient("A", IngredientType::Alcoholic))
        .unwrap();

    let listed = service
        .list(&IngredientFilter {
            sort_order: Some(SortOrder::Desc),
            ..IngredientFilter::default()
        })
        .unwrap();
    assert_eq!(names(&listed), ["B", "A"]);
}

#[test]
fn get_includes_cocktails_using_the_ingredient() {
    let conn = open_db_in_memory().unwrap();
    let store = store(&conn);
    let ingredients = IngredientService::new(store);
    let cocktails = CocktailService::new(store);

    let rum = ingredients
        .create(&new_ingredient("Rum", IngredientType::Alcoholic))
        .unwrap();
    let unused = ingredients
        .create(&new_ingredient("Gin", IngredientType::Alcoholic))
        .unwrap();
    let mojito = cocktails
        .create(
            &NewCocktail::new("Mojito", CocktailCategory::Cocktail, "Muddle and stir.")
                .with_ingredient(rum.id, "60 ml"),
        )
        .unwrap();
    let daiquiri = cocktails
        .create(
            &NewCocktail::new("Daiquiri", CocktailCategory::OrdinaryDrink, "Shake.")
                .with_ingredient(rum.id, "45 ml"),
        )
        .unwrap();

    let detail = ingredients.get(rum.id).unwrap();
    assert_eq!(detail.ingredient, rum);
    let usages: Vec<(i64, &str, &str)> = detail
        .cocktails
        .iter()
        .map(|usage| {
            (
                usage.cocktail.id,
                usage.cocktail.name.as_str(),
                usage.quantity.as_str(),
            )
        })
        .collect();
    assert_eq!(
        usages,
        [
            (mojito.cocktail.id, "Mojito", "60 ml"),
            (daiquiri.cocktail.id, "Daiquiri", "45 ml"),
        ]
    );
    assert_eq!(
        detail.cocktails[1].cocktail.category,
        CocktailCategory::OrdinaryDrink
    );

    assert!(ingredients.get(unused.id).unwrap().cocktails.is_empty());
}

#[test]
fn get_missing_ingredient_is_not_found() {
    let conn = open_db_in_memory().unwrap();
    let service = IngredientService::new(store(&conn));

    let err = service.get(404).unwrap_err();
    assert!(matches!(err, IngredientServiceError::NotFound(404)));
    assert_eq!(err.to_string(), "ingredient with id 404 not found");
}

#[test]
fn update_applies_only_present_fields() {
    let conn = open_db_in_memory().unwrap();
    let service = IngredientService::new(store(&conn));
    let created = service
        .create(
            &new_ingredient("Lime", IngredientType::NonAlcoholic)
                .with_description("Fresh lime juice"),
        )
        .unwrap();
    conn.execute(
        "UPDATE ingredients SET updated_at = 1 WHERE id = ?1;",
        [created.id],
    )
    .unwrap();

    let updated = service
        .update(
            created.id,
            &IngredientPatch {
                name: Some("Lime Juice".to_string()),
                ..IngredientPatch::default()
            },
        )
        .unwrap();

    assert_eq!(updated.id, created.id);
    assert_eq!(updated.name, "Lime Juice");
    assert_eq!(updated.description, "Fresh lime juice");
    assert_eq!(updated.kind, IngredientType::NonAlcoholic);
    assert_eq!(updated.photo, PHOTO);
    assert_eq!(updated.created_at, created.created_at);
    assert!(updated.updated_at > 1);
}

#[test]
fn update_missing_ingredient_is_not_found() {
    let conn = open_db_in_memory().unwrap();
    let service = IngredientService::new(store(&conn));

    let err = service
        .update(
            9,
            &IngredientPatch {
                kind: Some(IngredientType::Alcoholic),
                ..IngredientPatch::default()
            },
        )
        .unwrap_err();
    assert!(matches!(err, IngredientServiceError::NotFound(9)));

    let err = service.update(9, &IngredientPatch::default()).unwrap_err();
    assert!(matches!(err, IngredientServiceError::NotFound(9)));
}

#[test]
fn delete_in_use_ingredient_is_rejected_and_keeps_row() {
    let conn = open_db_in_memory().unwrap();
    let store = store(&conn);
    let ingredients = IngredientService::new(store);
    let cocktails = CocktailService::new(store);

    let lime = ingredients
        .create(&new_ingredient("Lime Juice", IngredientType::NonAlcoholic))
        .unwrap();
    for name in ["Daiquiri", "Margarita"] {
        cocktails
            .create(
                &NewCocktail::new(name, CocktailCategory::OrdinaryDrink, "Shake with ice.")
                    .with_ingredient(lime.id, "25 ml"),
            )
            .unwrap();
    }

    let err = ingredients.delete(lime.id).unwrap_err();
    match &err {
        IngredientServiceError::InUse {
            ingredient_id,
            cocktail_count,
        } => {
            assert_eq!(*ingredient_id, lime.id);
            assert_eq!(*cocktail_count, 2);
        }
        other => panic!("unexpected error: {other}"),
    }
    assert_eq!(
        err.to_string(),
        format!(
            "cannot delete ingredient {} as it is used in 2 cocktails",
            lime.id
        )
    );

    assert_eq!(ingredients.get(lime.id).unwrap().cocktails.len(), 2);
}

#[test]
fn delete_unused_ingredient_returns_deleted_row() {
    let conn = open_db_in_memory().unwrap();
    let service = IngredientService::new(store(&conn));
    let gin = service
        .create(&new_ingredient("Gin", IngredientType::Alcoholic))
        .unwrap();

    let deleted = service.delete(gin.id).unwrap();
    assert_eq!(deleted, gin);

    assert!(matches!(
        service.get(gin.id).unwrap_err(),
        IngredientServiceError::NotFound(_)
    ));
    assert!(matches!(
        service.delete(gin.id).unwrap_err(),
        IngredientServiceError::NotFound(_)
    ));
}

#[test]
fn repository_counts_are_unsigned_row_counts() {
    let conn = open_db_in_memory().unwrap();
    let store = store(&conn);
    let ingredients = IngredientService::new(store);
    let cocktails = CocktailService::new(store);
    let repo = store.ingredients();

    assert_eq!(repo.count_ingredients().unwrap(), 0_u64);

    let rum = ingredients
        .create(&new_ingredient("Rum", IngredientType::Alcoholic))
        .unwrap();
    let mint = ingredients
        .create(&new_ingredient("Mint", IngredientType::NonAlcoholic))
        .unwrap();
    for name in ["Mojito", "Daiquiri", "Rum Punch"] {
        cocktails
            .create(
                &NewCocktail::new(name, CocktailCategory::PunchPartyDrink, "Build.")
                    .with_ingredient(rum.id, "45 ml"),
            )
            .unwrap();
    }

    assert_eq!(repo.count_ingredients().unwrap(), 2);
    assert_eq!(repo.count_usages(rum.id).unwrap(), 3);
    assert_eq!(repo.count_usages(mint.id).unwrap(), 0);
    assert_eq!(store.cocktails().count_cocktails().unwrap(), 3);
}
