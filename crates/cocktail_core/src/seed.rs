//! Demo catalog seeding.
//!
//! # Responsibility
//! - Reset the catalog and load a fixed set of ingredients and cocktails.
//!
//! # Invariants
//! - Seeding goes through the services, so validation and referential checks
//!   apply to seed data too.
//! - Each entity is written in its own transaction; a failure mid-way leaves
//!   the rows written so far.

use crate::model::cocktail::{CocktailCategory, IngredientLine, NewCocktail};
use crate::model::ingredient::{IngredientId, IngredientType, NewIngredient};
use crate::repo::store::{CatalogStore, RepoError};
use crate::service::catalog_service::CatalogService;
use crate::service::cocktail_service::{CocktailService, CocktailServiceError};
use crate::service::ingredient_service::{IngredientService, IngredientServiceError};
use log::info;
use serde::Serialize;
use std::collections::HashMap;
use std::error::Error;
use std::fmt::{Display, Formatter};

const PHOTO_BASE_URL: &str = "https://www.thecocktaildb.com/images/ingredients";

struct SeedIngredient {
    name: &'static str,
    description: &'static str,
    kind: IngredientType,
    photo_slug: &'static str,
}

struct SeedCocktail {
    name: &'static str,
    category: CocktailCategory,
    instruction: &'static str,
    lines: &'static [(&'static str, &'static str)],
}

const INGREDIENTS: &[SeedIngredient] = &[
    SeedIngredient {
        name: "Vodka",
        description: "Distilled beverage composed primarily of water and ethanol.",
        kind: IngredientType::Alcoholic,
        photo_slug: "vodka",
    },
    SeedIngredient {
        name: "Gin",
        description: "Distilled alcoholic drink flavoured with juniper berries.",
        kind: IngredientType::Alcoholic,
        photo_slug: "gin",
    },
    SeedIngredient {
        name: "Rum",
        description: "Distilled alcoholic beverage made from sugarcane byproducts.",
        kind: IngredientType::Alcoholic,
        photo_slug: "rum",
    },
    SeedIngredient {
        name: "Tequila",
        description: "Distilled beverage made from the blue agave plant.",
        kind: IngredientType::Alcoholic,
        photo_slug: "tequila",
    },
    SeedIngredient {
        name: "Whiskey",
        description: "Distilled alcoholic beverage made from fermented grain mash.",
        kind: IngredientType::Alcoholic,
        photo_slug: "whiskey",
    },
    SeedIngredient {
        name: "Campari",
        description: "Italian bitter aperitif infused with herbs and fruit.",
        kind: IngredientType::Alcoholic,
        photo_slug: "campari",
    },
    SeedIngredient {
        name: "Sweet Vermouth",
        description: "Aromatised fortified wine flavoured with botanicals.",
        kind: IngredientType::Alcoholic,
        photo_slug: "sweet%20vermouth",
    },
    SeedIngredient {
        name: "Lime Juice",
        description: "Fresh squeezed lime juice.",
        kind: IngredientType::NonAlcoholic,
        photo_slug: "lime%20juice",
    },
    SeedIngredient {
        name: "Simple Syrup",
        description: "Sugar syrup for sweetening cocktails.",
        kind: IngredientType::NonAlcoholic,
        photo_slug: "sugar%20syrup",
    },
    SeedIngredient {
        name: "Soda Water",
        description: "Carbonated water.",
        kind: IngredientType::NonAlcoholic,
        photo_slug: "soda%20water",
    },
    SeedIngredient {
        name: "Ginger Beer",
        description: "Sweetened and carbonated ginger drink.",
        kind: IngredientType::NonAlcoholic,
        photo_slug: "ginger%20beer",
    },
    SeedIngredient {
        name: "Angostura Bitters",
        description: "Concentrated bitters made of gentian, herbs and spices.",
        kind: IngredientType::NonAlcoholic,
        photo_slug: "angostura%20bitters",
    },
];

const COCKTAILS: &[SeedCocktail] = &[
    SeedCocktail {
        name: "Mojito",
        category: CocktailCategory::Cocktail,
        instruction: "Muddle mint leaves with sugar and lime juice. Add a splash of soda water and fill the glass with cracked ice. Pour the rum and top with soda water.",
        lines: &[
            ("Rum", "60 ml"),
            ("Lime Juice", "30 ml"),
            ("Simple Syrup", "20 ml"),
            ("Soda Water", "top up"),
        ],
    },
    SeedCocktail {
        name: "Old Fashioned",
        category: CocktailCategory::Cocktail,
        instruction: "Saturate a sugar cube with bitters, add a dash of water and muddle. Fill the glass with ice and add whiskey.",
        lines: &[("Whiskey", "45 ml"), ("Angostura Bitters", "2 dashes")],
    },
    SeedCocktail {
        name: "Negroni",
        category: CocktailCategory::OrdinaryDrink,
        instruction: "Stir into glass over ice, garnish and serve.",
        lines: &[
            ("Gin", "30 ml"),
            ("Campari", "30 ml"),
            ("Sweet Vermouth", "30 ml"),
        ],
    },
    SeedCocktail {
        name: "Daiquiri",
        category: CocktailCategory::OrdinaryDrink,
        instruction: "Pour all ingredients into shaker with ice cubes. Shake well. Strain in chilled cocktail glass.",
        lines: &[
            ("Rum", "45 ml"),
            ("Lime Juice", "25 ml"),
            ("Simple Syrup", "15 ml"),
        ],
    },
    SeedCocktail {
        name: "Margarita",
        category: CocktailCategory::OrdinaryDrink,
        instruction: "Rub the rim of the glass with lime and dip in salt. Shake the other ingredients with ice, then carefully pour into the glass.",
        lines: &[("Tequila", "50 ml"), ("Lime Juice", "25 ml")],
    },
    SeedCocktail {
        name: "Moscow Mule",
        category: CocktailCategory::PunchPartyDrink,
        instruction: "Combine vodka and ginger beer in a highball glass filled with ice. Add lime juice. Stir gently.",
        lines: &[
            ("Vodka", "45 ml"),
            ("Ginger Beer", "120 ml"),
            ("Lime Juice", "10 ml"),
        ],
    },
];

/// Rows written by `seed_demo_catalog`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct SeedSummary {
    pub ingredients: usize,
    pub cocktails: usize,
}

#[derive(Debug)]
pub enum SeedError {
    Repo(RepoError),
    Ingredient(IngredientServiceError),
    Cocktail(CocktailServiceError),
    /// A seed cocktail names an ingredient missing from the seed list.
    UnknownIngredient(&'static str),
}

impl Display for SeedError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Repo(err) => write!(f, "{err}"),
            Self::Ingredient(err) => write!(f, "{err}"),
            Self::Cocktail(err) => write!(f, "{err}"),
            Self::UnknownIngredient(name) => write!(f, "seed ingredient `{name}` is not defined"),
        }
    }
}

impl Error for SeedError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Repo(err) => Some(err),
            Self::Ingredient(err) => Some(err),
            Self::Cocktail(err) => Some(err),
            Self::UnknownIngredient(_) => None,
        }
    }
}

impl From<RepoError> for SeedError {
    fn from(value: RepoError) -> Self {
        Self::Repo(value)
    }
}

impl From<IngredientServiceError> for SeedError {
    fn from(value: IngredientServiceError) -> Self {
        Self::Ingredient(value)
    }
}

impl From<CocktailServiceError> for SeedError {
    fn from(value: CocktailServiceError) -> Self {
        Self::Cocktail(value)
    }
}

/// Clears the catalog and loads the demo ingredients and cocktails.
pub fn seed_demo_catalog<S: CatalogStore + Clone>(store: S) -> Result<SeedSummary, SeedError> {
    CatalogService::new(store.clone()).clear_all()?;

    let ingredients = IngredientService::new(store.clone());
    let mut ids: HashMap<&'static str, IngredientId> = HashMap::new();
    for seed in INGREDIENTS {
        let input = NewIngredient::new(
            seed.name,
            seed.kind,
            format!("{PHOTO_BASE_URL}/{}.png", seed.photo_slug),
        )
        .with_description(seed.description);
        let created = ingredients.create(&input)?;
        ids.insert(seed.name, created.id);
    }

    let cocktails = CocktailService::new(store);
    for seed in COCKTAILS {
        let mut input = NewCocktail::new(seed.name, seed.category, seed.instruction);
        for &(ingredient_name, quantity) in seed.lines {
            let ingredient_id = ids
                .get(ingredient_name)
                .copied()
                .ok_or(SeedError::UnknownIngredient(ingredient_name))?;
            input
                .ingredients
                .push(IngredientLine::new(ingredient_id, quantity));
        }
        cocktails.create(&input)?;
    }

    let summary = SeedSummary {
        ingredients: INGREDIENTS.len(),
        cocktails: COCKTAILS.len(),
    };
    info!(
        "event=catalog_seed module=seed status=ok ingredients={} cocktails={}",
        summary.ingredients, summary.cocktails
    );
    Ok(summary)
}
