//! CLI command handlers.

mod list;
mod serve;
mod surprise;
mod tags;

pub use list::run_list_command;
pub use serve::run_serve_command;
pub use surprise::run_surprise_command;
pub use tags::run_tags_command;

use anyhow::{Context, Result, bail};
use cookbook_core::{CsvFileSource, FileConfig, Recipe, RecipeBook, RecipeSource, SheetSource};
use tracing::debug;

use crate::cli::SourceArgs;

/// Picks the recipe source: `--csv`, then `--sheet-url`/`COOKBOOK_SHEET_URL`,
/// then the config file's `csv_path`, then its `sheet_url`.
pub fn build_source(args: &SourceArgs, config: &FileConfig) -> Result<Box<dyn RecipeSource>> {
    let worksheet = args
        .worksheet
        .as_deref()
        .or(config.source.worksheet.as_deref());

    if let Some(path) = &args.csv {
        if args.sheet_url.is_some() {
            debug!("Both --csv and a sheet link given; using the CSV file");
        }
        return Ok(Box::new(CsvFileSource::new(path.clone())));
    }
    if let Some(sheet_url) = args.sheet_url.as_deref() {
        return sheet_source(sheet_url, worksheet, config);
    }
    if let Some(path) = &config.source.csv_path {
        return Ok(Box::new(CsvFileSource::new(path.clone())));
    }
    if let Some(sheet_url) = config.source.sheet_url.as_deref() {
        return sheet_source(sheet_url, worksheet, config);
    }

    bail!(
        "no recipe source configured\n  Suggestion: Pass --sheet-url <URL>, set COOKBOOK_SHEET_URL, or pass --csv <PATH>"
    )
}

fn sheet_source(
    sheet_url: &str,
    worksheet: Option<&str>,
    config: &FileConfig,
) -> Result<Box<dyn RecipeSource>> {
    let source = SheetSource::new(sheet_url, worksheet, config.http.timeouts())
        .context("Invalid recipe sheet link")?;
    Ok(Box::new(source))
}

/// Builds the source and loads the whole cookbook once.
pub async fn load_book(args: &SourceArgs, config: &FileConfig) -> Result<RecipeBook> {
    let source = build_source(args, config)?;
    RecipeBook::load(source.as_ref(), &config.fields)
        .await
        .with_context(|| format!("Failed to load recipes from {}", source.describe()))
}

/// One recipe as indented plain text.
pub(crate) fn format_recipe(recipe: &Recipe) -> String {
    let mut text = recipe.dish.clone().unwrap_or_else(|| "Untitled recipe".to_string());
    if let Some(category) = recipe.category.as_deref() {
        text.push_str(&format!("  [{category}]"));
    }
    if let Some(image) = recipe.image() {
        text.push_str(&format!("\n    photo: {image}"));
    }
    if let Some(notes) = recipe.notes.as_deref() {
        text.push_str(&format!("\n    notes: {notes}"));
    }
    text
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn test_build_source_prefers_csv_flag() {
        let args = SourceArgs {
            sheet_url: Some("https://example.com/r.csv".to_string()),
            csv: Some(PathBuf::from("local.csv")),
            worksheet: None,
        };
        let source = build_source(&args, &FileConfig::default()).unwrap();
        assert_eq!(source.describe(), "file local.csv");
    }

    #[test]
    fn test_build_source_flag_overrides_config_file() {
        let mut config = FileConfig::default();
        config.source.sheet_url = Some("https://example.com/from-file.csv".to_string());
        let args = SourceArgs {
            sheet_url: Some("https://example.com/from-flag.csv".to_string()),
            ..SourceArgs::default()
        };
        let source = build_source(&args, &config).unwrap();
        assert!(source.describe().contains("from-flag.csv"));
    }

    #[test]
    fn test_build_source_sheet_flag_beats_config_csv_path() {
        let mut config = FileConfig::default();
        config.source.csv_path = Some(PathBuf::from("from-file.csv"));
        let args = SourceArgs {
            sheet_url: Some("https://example.com/from-flag.csv".to_string()),
            ..SourceArgs::default()
        };
        let source = build_source(&args, &config).unwrap();
        assert!(
            source.describe().contains("from-flag.csv"),
            "got {}",
            source.describe()
        );
    }

    #[test]
    fn test_build_source_config_csv_path_beats_config_sheet_url() {
        let mut config = FileConfig::default();
        config.source.csv_path = Some(PathBuf::from("book.csv"));
        config.source.sheet_url = Some("https://example.com/from-file.csv".to_string());
        let source = build_source(&SourceArgs::default(), &config).unwrap();
        assert_eq!(source.describe(), "file book.csv");
    }

    #[test]
    fn test_build_source_falls_back_to_config_file() {
        let mut config = FileConfig::default();
        config.source.csv_path = Some(PathBuf::from("book.csv"));
        let source = build_source(&SourceArgs::default(), &config).unwrap();
        assert_eq!(source.describe(), "file book.csv");
    }

    #[test]
    fn test_build_source_requires_some_source() {
        let err = build_source(&SourceArgs::default(), &FileConfig::default())
            .err()
            .unwrap();
        assert!(err.to_string().contains("no recipe source configured"));
    }

    #[test]
    fn test_build_source_rejects_bad_link() {
        let args = SourceArgs {
            sheet_url: Some("ftp://example.com/r.csv".to_string()),
            ..SourceArgs::default()
        };
        assert!(build_source(&args, &FileConfig::default()).is_err());
    }

    #[test]
    fn test_format_recipe_lists_present_fields() {
        let recipe = Recipe::new("Beef Stew", "Meat")
            .with_image_url("https://img.example/stew.jpg")
            .with_notes("Slow cooker");
        assert_eq!(
            format_recipe(&recipe),
            "Beef Stew  [Meat]\n    photo: https://img.example/stew.jpg\n    notes: Slow cooker"
        );

        let bare = Recipe {
            category: Some("Soup".to_string()),
            ..Recipe::default()
        };
        assert_eq!(format_recipe(&bare), "Untitled recipe  [Soup]");
    }
}
