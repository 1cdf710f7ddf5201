//! List command handler: print recipes matching tag and name filters.

use anyhow::{Context, Result};
use cookbook_core::{FileConfig, Recipe, RecipeFilter, RecipeView};
use tracing::info;

use super::{format_recipe, load_book};
use crate::cli::{ListArgs, SourceArgs};

pub async fn run_list_command(
    args: &ListArgs,
    source: &SourceArgs,
    config: &FileConfig,
) -> Result<()> {
    let book = load_book(source, config).await?;
    let filter = RecipeFilter::new(args.tags.iter().cloned(), args.search.clone());

    let recipes: Vec<&Recipe> = if args.shuffle {
        book.filter_ordered(&filter, &book.shuffled_order())
    } else {
        book.filter(&filter)
    };
    info!(shown = recipes.len(), total = book.len(), "Filtered recipes");

    if args.json {
        let views: Vec<RecipeView<'_>> = recipes.iter().map(|recipe| recipe.view()).collect();
        let json = serde_json::to_string_pretty(&views).context("Failed to encode recipes")?;
        println!("{json}");
        return Ok(());
    }

    if recipes.is_empty() {
        println!("No recipes found. Try a different search!");
        return Ok(());
    }

    for recipe in recipes {
        println!("{}", format_recipe(recipe));
    }
    Ok(())
}
