//! Surprise command handler: print one random recipe.

use anyhow::{Context, Result};
use cookbook_core::FileConfig;

use super::{format_recipe, load_book};
use crate::cli::{SourceArgs, SurpriseArgs};

pub async fn run_surprise_command(
    args: &SurpriseArgs,
    source: &SourceArgs,
    config: &FileConfig,
) -> Result<()> {
    let book = load_book(source, config).await?;
    let recipe = book.pick()?;

    if args.json {
        let json =
            serde_json::to_string_pretty(&recipe.view()).context("Failed to encode recipe")?;
        println!("{json}");
    } else {
        println!("How about this?\n{}", format_recipe(recipe));
    }
    Ok(())
}
