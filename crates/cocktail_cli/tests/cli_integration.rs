//! End-to-end tests for the `cocktails` binary.
//!
//! Each test runs the compiled CLI against a throwaway database file and
//! checks the JSON it prints.

use serde_json::Value;
use std::path::Path;
use std::process::{Command, Output};
use tempfile::TempDir;

fn run_cli(temp_dir: &TempDir, db_path: &Path, args: &[&str]) -> Output {
    let cli_bin = env!("CARGO_BIN_EXE_cocktails");
    Command::new(cli_bin)
        .current_dir(temp_dir.path())
        .env_remove("COCKTAIL_DB_PATH")
        .arg("--db")
        .arg(db_path)
        .args(args)
        .output()
        .expect("Failed to execute CLI")
}

fn stdout_json(output: &Output) -> Value {
    assert!(
        output.status.success(),
        "CLI command should succeed. Stderr: {}",
        String::from_utf8_lossy(&output.stderr)
    );
    serde_json::from_slice(&output.stdout).expect("stdout should be JSON")
}

fn names(listing: &Value) -> Vec<&str> {
    listing
        .as_array()
        .expect("listing should be an array")
        .iter()
        .map(|row| row["name"].as_str().unwrap())
        .collect()
}

#[test]
fn seed_then_query_the_persisted_catalog() {
    let temp_dir = TempDir::new().unwrap();
    let db_path = temp_dir.path().join("catalog.db");

    let seeded = stdout_json(&run_cli(&temp_dir, &db_path, &["seed"]));
    assert_eq!(seeded["ingredients"], 12);
    assert_eq!(seeded["cocktails"], 6);
    assert!(db_path.exists(), "seed should write the database file");

    // Each command is a separate process, so these reads prove persistence.
    let stats = stdout_json(&run_cli(&temp_dir, &db_path, &["stats"]));
    assert_eq!(stats["cocktails"], 6);
    assert_eq!(stats["ingredients"], 12);
    assert!(stats["generatedAt"].as_i64().unwrap() > 0);

    let cocktails = stdout_json(&run_cli(
        &temp_dir,
        &db_path,
        &["cocktails", "--category", "COCKTAIL"],
    ));
    assert_eq!(names(&cocktails), ["Mojito", "Old Fashioned"]);
    let mojito = &cocktails[0];
    assert_eq!(mojito["category"], "COCKTAIL");
    let mojito_lines: Vec<(&str, &str)> = mojito["ingredients"]
        .as_array()
        .unwrap()
        .iter()
        .map(|line| {
            (
                line["ingredient"]["name"].as_str().unwrap(),
                line["quantity"].as_str().unwrap(),
            )
        })
        .collect();
    assert_eq!(
        mojito_lines,
        [
            ("Rum", "60 ml"),
            ("Lime Juice", "30 ml"),
            ("Simple Syrup", "20 ml"),
            ("Soda Water", "top up"),
        ]
    );

    let ingredients = stdout_json(&run_cli(
        &temp_dir,
        &db_path,
        &["ingredients", "--type", "NON_ALCOHOLIC", "--sort-by", "name"],
    ));
    assert_eq!(
        names(&ingredients),
        [
            "Angostura Bitters",
            "Ginger Beer",
            "Lime Juice",
            "Simple Syrup",
            "Soda Water",
        ]
    );
    assert!(ingredients
        .as_array()
        .unwrap()
        .iter()
        .all(|row| row["type"] == "NON_ALCOHOLIC"));
}

#[test]
fn clear_empties_the_database_file() {
    let temp_dir = TempDir::new().unwrap();
    let db_path = temp_dir.path().join("catalog.db");
    stdout_json(&run_cli(&temp_dir, &db_path, &["seed"]));

    let cleared = stdout_json(&run_cli(&temp_dir, &db_path, &["clear"]));
    assert_eq!(cleared["cocktailsRemoved"], 6);
    assert_eq!(cleared["ingredientsRemoved"], 12);

    let stats = stdout_json(&run_cli(&temp_dir, &db_path, &["stats"]));
    assert_eq!(stats["cocktails"], 0);
    assert_eq!(stats["ingredients"], 0);
}

#[test]
fn missing_config_file_exits_with_error() {
    let temp_dir = TempDir::new().unwrap();
    let db_path = temp_dir.path().join("catalog.db");
    let missing = temp_dir.path().join("absent.toml");

    let output = run_cli(
        &temp_dir,
        &db_path,
        &["--config", missing.to_str().unwrap(), "stats"],
    );

    assert_eq!(output.status.code(), Some(1));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(
        stderr.lines().any(|line| line.starts_with("Error:")),
        "stderr should carry an Error line. Stderr: {stderr}"
    );
    assert!(stderr.contains("absent.toml"));
    assert!(output.stdout.is_empty());
    assert!(!db_path.exists(), "no database should be created");
}

#[test]
fn missing_database_path_exits_with_error() {
    let temp_dir = TempDir::new().unwrap();

    let output = Command::new(env!("CARGO_BIN_EXE_cocktails"))
        .current_dir(temp_dir.path())
        .env_remove("COCKTAIL_DB_PATH")
        .arg("seed")
        .output()
        .expect("Failed to execute CLI");

    assert_eq!(output.status.code(), Some(1));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(
        stderr.contains("Error: no database path configured"),
        "Stderr: {stderr}"
    );
    assert!(output.stdout.is_empty());
}

#[test]
fn database_path_can_come_from_config_file() {
    let temp_dir = TempDir::new().unwrap();
    let db_path = temp_dir.path().join("from_config.db");
    let config_path = temp_dir.path().join("cocktails.toml");
    std::fs::write(
        &config_path,
        format!("[database]\npath = {:?}\n", db_path.display().to_string()),
    )
    .unwrap();

    let output = Command::new(env!("CARGO_BIN_EXE_cocktails"))
        .current_dir(temp_dir.path())
        .env_remove("COCKTAIL_DB_PATH")
        .args(["--config", config_path.to_str().unwrap(), "seed"])
        .output()
        .expect("Failed to execute CLI");

    let seeded = stdout_json(&output);
    assert_eq!(seeded["cocktails"], 6);
    assert!(db_path.exists());
}
