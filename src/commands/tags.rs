//! Tags command handler: print the tag vocabulary.

use anyhow::Result;
use cookbook_core::FileConfig;

use super::load_book;
use crate::cli::SourceArgs;

pub async fn run_tags_command(source: &SourceArgs, config: &FileConfig) -> Result<()> {
    let book = load_book(source, config).await?;
    for tag in book.tags() {
        println!("{tag}");
    }
    Ok(())
}
