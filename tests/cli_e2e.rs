//! End-to-end CLI tests for the cookbook binary.

use std::io::Write;

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::{NamedTempFile, TempDir};

const RECIPES_CSV: &str = "\
Dish,Category,Image url,Notes
Tomato Soup,\"Soup, Vegetarian\",https://img.example/soup.jpg,
Beef Stew,Meat,,Slow cooker
";

fn csv_file(content: &str) -> NamedTempFile {
    let mut file = NamedTempFile::new().expect("failed to create temp file");
    file.write_all(content.as_bytes())
        .expect("failed to write CSV");
    file
}

/// Binary with no ambient sheet link and an empty config directory.
fn cookbook(config_home: &TempDir) -> Command {
    let mut cmd = Command::cargo_bin("cookbook").unwrap();
    cmd.env_remove("COOKBOOK_SHEET_URL")
        .env_remove("RUST_LOG")
        .env("XDG_CONFIG_HOME", config_home.path());
    cmd
}

/// Test that --help displays usage information and exits with code 0.
#[test]
fn test_binary_help_displays_usage() {
    let home = TempDir::new().unwrap();
    cookbook(&home)
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("Browse a recipe spreadsheet"));
}

/// Test that --version displays version and exits with code 0.
#[test]
fn test_binary_version_displays_version() {
    let home = TempDir::new().unwrap();
    cookbook(&home)
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("cookbook"));
}

/// Test that a missing subcommand prints help and fails.
#[test]
fn test_binary_without_command_shows_help() {
    let home = TempDir::new().unwrap();
    cookbook(&home)
        .assert()
        .failure()
        .stderr(predicate::str::contains("Usage"));
}

/// Test that invalid flags cause non-zero exit.
#[test]
fn test_binary_invalid_flag_returns_error() {
    let home = TempDir::new().unwrap();
    cookbook(&home)
        .args(["tags", "--invalid-flag"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("error"));
}

#[test]
fn test_tags_prints_sorted_vocabulary() {
    let home = TempDir::new().unwrap();
    let csv = csv_file(RECIPES_CSV);
    cookbook(&home)
        .arg("--csv")
        .arg(csv.path())
        .arg("tags")
        .assert()
        .success()
        .stdout("Meat\nSoup\nVegetarian\n");
}

#[test]
fn test_list_filters_by_tag() {
    let home = TempDir::new().unwrap();
    let csv = csv_file(RECIPES_CSV);
    cookbook(&home)
        .arg("--csv")
        .arg(csv.path())
        .args(["list", "--tag", "Soup"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Tomato Soup  [Soup, Vegetarian]"))
        .stdout(predicate::str::contains("photo: https://img.example/soup.jpg"))
        .stdout(predicate::str::contains("Beef Stew").not());
}

#[test]
fn test_list_search_without_matches() {
    let home = TempDir::new().unwrap();
    let csv = csv_file(RECIPES_CSV);
    cookbook(&home)
        .arg("--csv")
        .arg(csv.path())
        .args(["list", "--search", "pizza"])
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "No recipes found. Try a different search!",
        ));
}

#[test]
fn test_list_json_is_source_ordered_array() {
    let home = TempDir::new().unwrap();
    let csv = csv_file(RECIPES_CSV);
    let output = cookbook(&home)
        .arg("--csv")
        .arg(csv.path())
        .args(["-q", "list", "--json"])
        .output()
        .unwrap();
    assert!(output.status.success());

    let recipes: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(recipes[0]["dish"], "Tomato Soup");
    assert_eq!(recipes[0]["has_image"], true);
    assert_eq!(recipes[1]["dish"], "Beef Stew");
    assert_eq!(recipes[1]["notes"], "Slow cooker");
}

#[test]
fn test_surprise_prints_a_recipe() {
    let home = TempDir::new().unwrap();
    let csv = csv_file(RECIPES_CSV);
    cookbook(&home)
        .arg("--csv")
        .arg(csv.path())
        .arg("surprise")
        .assert()
        .success()
        .stdout(predicate::str::starts_with("How about this?"))
        .stdout(predicate::str::contains("Tomato Soup").or(predicate::str::contains("Beef Stew")));
}

#[test]
fn test_surprise_on_empty_sheet_fails() {
    let home = TempDir::new().unwrap();
    let csv = csv_file("Dish,Category,Image url,Notes\n");
    cookbook(&home)
        .arg("--csv")
        .arg(csv.path())
        .arg("surprise")
        .assert()
        .failure()
        .stderr(predicate::str::contains("cookbook is empty"));
}

#[test]
fn test_missing_source_fails_with_suggestion() {
    let home = TempDir::new().unwrap();
    cookbook(&home)
        .arg("tags")
        .assert()
        .failure()
        .stderr(predicate::str::contains("no recipe source configured"))
        .stderr(predicate::str::contains("COOKBOOK_SHEET_URL"));
}

#[test]
fn test_missing_column_fails_with_field_name() {
    let home = TempDir::new().unwrap();
    let csv = csv_file("Dish,Category,Notes\nSoup,Soup,\n");
    cookbook(&home)
        .arg("--csv")
        .arg(csv.path())
        .arg("list")
        .assert()
        .failure()
        .stderr(predicate::str::contains("required column 'ImageUrl'"));
}

#[test]
fn test_config_file_supplies_source() {
    let home = TempDir::new().unwrap();
    let csv = csv_file(RECIPES_CSV);
    let mut config = NamedTempFile::new().unwrap();
    writeln!(config, "[source]\ncsv_path = {:?}", csv.path().display().to_string()).unwrap();

    cookbook(&home)
        .arg("--config")
        .arg(config.path())
        .arg("tags")
        .assert()
        .success()
        .stdout(predicate::str::contains("Vegetarian"));
}

#[test]
fn test_default_config_location_is_used() {
    let home = TempDir::new().unwrap();
    let csv = csv_file(RECIPES_CSV);
    let dir = home.path().join("cookbook");
    std::fs::create_dir_all(&dir).unwrap();
    std::fs::write(
        dir.join("config.toml"),
        format!("[source]\ncsv_path = {:?}\n", csv.path().display().to_string()),
    )
    .unwrap();

    cookbook(&home)
        .args(["list", "--search", "STEW"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Beef Stew"));
}

#[test]
fn test_invalid_config_value_fails() {
    let home = TempDir::new().unwrap();
    let csv = csv_file(RECIPES_CSV);
    let mut config = NamedTempFile::new().unwrap();
    writeln!(config, "[page]\ncolumns = 12").unwrap();

    cookbook(&home)
        .arg("--config")
        .arg(config.path())
        .arg("--csv")
        .arg(csv.path())
        .arg("tags")
        .assert()
        .failure()
        .stderr(predicate::str::contains("page.columns"));
}

#[test]
fn test_env_sheet_link_beats_config_csv_path() {
    let home = TempDir::new().unwrap();
    let csv = csv_file(RECIPES_CSV);
    let mut config = NamedTempFile::new().unwrap();
    writeln!(config, "[source]\ncsv_path = {:?}", csv.path().display().to_string()).unwrap();

    cookbook(&home)
        .env("COOKBOOK_SHEET_URL", "ftp://example.com/recipes.csv")
        .arg("--config")
        .arg(config.path())
        .arg("tags")
        .assert()
        .failure()
        .stderr(predicate::str::contains("Invalid recipe sheet link"));
}

#[test]
fn test_list_shuffle_keeps_every_filtered_recipe() {
    let home = TempDir::new().unwrap();
    let csv = csv_file(RECIPES_CSV);
    let output = cookbook(&home)
        .arg("--csv")
        .arg(csv.path())
        .args(["-q", "list", "--shuffle", "--json"])
        .output()
        .unwrap();
    assert!(output.status.success());

    let recipes: Vec<serde_json::Value> = serde_json::from_slice(&output.stdout).unwrap();
    let mut dishes: Vec<&str> = recipes
        .iter()
        .filter_map(|recipe| recipe["dish"].as_str())
        .collect();
    dishes.sort_unstable();
    assert_eq!(dishes, ["Beef Stew", "Tomato Soup"]);
}
