use cocktail_core::db::{open_db, open_db_in_memory};
use cocktail_core::{
    seed_demo_catalog, CatalogConfig, CatalogService, CocktailCategory, CocktailFilter,
    CocktailService, IngredientFilter, IngredientService, IngredientServiceError,
    IngredientSortField, IngredientType, NewCocktail, NewIngredient, SqliteCatalogStore,
};

#[test]
fn stats_counts_cocktails_and_ingredients() {
    let conn = open_db_in_memory().unwrap();
    let store = SqliteCatalogStore::try_new(&conn).unwrap();
    let catalog = CatalogService::new(store);

    let empty = catalog.stats().unwrap();
    assert_eq!((empty.cocktails, empty.ingredients), (0, 0));

    let ingredients = IngredientService::new(store);
    let vodka = ingredients
        .create(&NewIngredient::new(
            "Vodka",
            IngredientType::Alcoholic,
            "https://example.com/vodka.png",
        ))
        .unwrap();
    ingredients
        .create(&NewIngredient::new(
            "Tonic",
            IngredientType::NonAlcoholic,
            "https://example.com/tonic.png",
        ))
        .unwrap();
    CocktailService::new(store)
        .create(
            &NewCocktail::new("Vodka Shot", CocktailCategory::Shot, "Pour and drink.")
                .with_ingredient(vodka.id, "40 ml"),
        )
        .unwrap();

    let stats = catalog.stats().unwrap();
    assert_eq!(stats.cocktails, 1);
    assert_eq!(stats.ingredients, 2);
    assert!(stats.generated_at > 0);
}

#[test]
fn clear_all_removes_every_row() {
    let conn = open_db_in_memory().unwrap();
    let store = SqliteCatalogStore::try_new(&conn).unwrap();
    seed_demo_catalog(store).unwrap();

    let summary = CatalogService::new(store).clear_all().unwrap();
    assert_eq!(summary.cocktails_removed, 6);
    assert_eq!(summary.ingredients_removed, 12);

    let stats = CatalogService::new(store).stats().unwrap();
    assert_eq!((stats.cocktails, stats.ingredients), (0, 0));
    let lines: i64 = conn
        .query_row("SELECT COUNT(*) FROM cocktail_ingredients;", [], |row| {
            row.get(0)
        })
        .unwrap();
    assert_eq!(lines, 0);
}

#[test]
fn seed_loads_demo_catalog_and_is_repeatable() {
    let conn = open_db_in_memory().unwrap();
    let store = SqliteCatalogStore::try_new(&conn).unwrap();

    let first = seed_demo_catalog(store).unwrap();
    let second = seed_demo_catalog(store).unwrap();
    assert_eq!(first, second);
    assert_eq!((first.ingredients, first.cocktails), (12, 6));

    let stats = CatalogService::new(store).stats().unwrap();
    assert_eq!((stats.ingredients, stats.cocktails), (12, 6));

    let cocktails = CocktailService::new(store)
        .list(&CocktailFilter::default())
        .unwrap();
    let mojito = cocktails
        .iter()
        .find(|detail| detail.cocktail.name == "Mojito")
        .expect("seed should include a mojito");
    assert_eq!(mojito.cocktail.category, CocktailCategory::Cocktail);
    assert_eq!(mojito.ingredients.len(), 4);
    assert!(mojito
        .ingredients
        .iter()
        .any(|row| row.ingredient.name == "Rum" && row.quantity == "60 ml"));
}

#[test]
fn seeded_ingredients_in_use_cannot_be_deleted() {
    let conn = open_db_in_memory().unwrap();
    let store = SqliteCatalogStore::try_new(&conn).unwrap();
    seed_demo_catalog(store).unwrap();

    let ingredients = IngredientService::new(store);
    let lime = ingredients
        .list(&IngredientFilter {
            kind: Some(IngredientType::NonAlcoholic),
            sort_by: Some(IngredientSortField::Name),
            ..IngredientFilter::default()
        })
        .unwrap()
        .into_iter()
        .find(|ingredient| ingredient.name == "Lime Juice")
        .expect("seed should include lime juice");

    match ingredients.delete(lime.id).unwrap_err() {
        IngredientServiceError::InUse { cocktail_count, .. } => assert_eq!(cocktail_count, 4),
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn configured_database_file_persists_between_connections() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("catalog.db");
    let config = CatalogConfig::from_toml_str(&format!(
        "[database]\npath = {:?}\n",
        path.display().to_string()
    ))
    .unwrap();

    {
        let conn = config.open_connection().unwrap();
        seed_demo_catalog(SqliteCatalogStore::try_new(&conn).unwrap()).unwrap();
    }

    let conn = open_db(&path).unwrap();
    let stats = CatalogService::new(SqliteCatalogStore::try_new(&conn).unwrap())
        .stats()
        .unwrap();
    assert_eq!((stats.ingredients, stats.cocktails), (12, 6));
}
