//! Cocktail catalog operator CLI.
//!
//! # Responsibility
//! - Open the configured catalog database and run one maintenance or listing
//!   command against it.
//! - Print results as JSON on stdout; diagnostics go to the logger.
//!
//! # Invariants
//! - A database file is required; the CLI never falls back to an in-memory
//!   catalog.

use clap::{Args, Parser, Subcommand};
use cocktail_core::{
    init_logging, open_db, seed_demo_catalog, CatalogConfig, CatalogService, CocktailCategory,
    CocktailFilter, CocktailService, CocktailSortField, IngredientFilter, IngredientId,
    IngredientService, IngredientSortField, IngredientType, SortOrder, SqliteCatalogStore,
};
use log::info;
use serde::Serialize;
use std::path::PathBuf;

#[derive(Debug, Parser)]
#[command(name = "cocktails")]
#[command(about = "Cocktail catalog maintenance and queries", long_about = None)]
struct Cli {
    /// TOML configuration file
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// SQLite database path; overrides config and environment
    #[arg(long, global = true)]
    db: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Print cocktail and ingredient counts
    Stats,
    /// Replace the catalog with the demo data set
    Seed,
    /// Delete every cocktail and ingredient
    Clear,
    /// List cocktails with their ingredients
    Cocktails(CocktailArgs),
    /// List ingredients
    Ingredients(IngredientArgs),
}

#[derive(Debug, Args)]
struct CocktailArgs {
    /// Category wire name, e.g. COCKTAIL
    #[arg(long)]
    category: Option<CocktailCategory>,
    #[arg(long)]
    ingredient_id: Option<IngredientId>,
    /// ALCOHOLIC or NON_ALCOHOLIC
    #[arg(long)]
    ingredient_type: Option<IngredientType>,
    /// name, createdAt or category
    #[arg(long)]
    sort_by: Option<CocktailSortField>,
    /// asc or desc
    #[arg(long)]
    sort_order: Option<SortOrder>,
}

#[derive(Debug, Args)]
struct IngredientArgs {
    /// ALCOHOLIC or NON_ALCOHOLIC
    #[arg(long = "type")]
    kind: Option<IngredientType>,
    /// name or createdAt
    #[arg(long)]
    sort_by: Option<IngredientSortField>,
    /// asc or desc
    #[arg(long)]
    sort_order: Option<SortOrder>,
}

impl Commands {
    fn name(&self) -> &'static str {
        match self {
            Self::Stats => "stats",
            Self::Seed => "seed",
            Self::Clear => "clear",
            Self::Cocktails(_) => "cocktails",
            Self::Ingredients(_) => "ingredients",
        }
    }
}

impl From<CocktailArgs> for CocktailFilter {
    fn from(args: CocktailArgs) -> Self {
        Self {
            ingredient_id: args.ingredient_id,
            category: args.category,
            ingredient_type: args.ingredient_type,
            sort_by: args.sort_by,
            sort_order: args.sort_order,
        }
    }
}

impl From<IngredientArgs> for IngredientFilter {
    fn from(args: IngredientArgs) -> Self {
        Self {
            kind: args.kind,
            sort_by: args.sort_by,
            sort_order: args.sort_order,
        }
    }
}

fn main() {
    let cli = Cli::parse();

    if let Err(e) = run(cli) {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    let mut config = match cli.config.as_ref() {
        Some(path) => CatalogConfig::load(path)?,
        None => CatalogConfig::default(),
    }
    .with_env_overrides();
    if let Some(db) = cli.db {
        config.database.path = Some(db);
    }

    init_logging(&config.logging)?;

    let conn = open_db(config.require_database_path()?)?;
    let store = SqliteCatalogStore::try_new(&conn)?;
    info!(
        "event=cli_command module=cli status=start command={}",
        cli.command.name()
    );

    match cli.command {
        Commands::Stats => print_json(&CatalogService::new(store).stats()?),
        Commands::Seed => print_json(&seed_demo_catalog(store)?),
        Commands::Clear => print_json(&CatalogService::new(store).clear_all()?),
        Commands::Cocktails(args) => {
            print_json(&CocktailService::new(store).list(&args.into())?)
        }
        Commands::Ingredients(args) => {
            print_json(&IngredientService::new(store).list(&args.into())?)
        }
    }
}

fn print_json<T: Serialize>(value: &T) -> Result<(), Box<dyn std::error::Error>> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}
