//! CLI entry point for the cookbook tool.

use anyhow::{Context, Result};
use clap::Parser;
use tracing::debug;

mod cli;
mod commands;

use cli::{Cli, Command};

#[tokio::main]
async fn main() -> Result<()> {
    // Parse CLI arguments first (before tracing, so --help works without logs)
    let cli = Cli::parse();

    // Priority: RUST_LOG env var > quiet flag > verbose flag > default (info)
    let default_level = if cli.quiet {
        "error"
    } else {
        match cli.verbose {
            0 => "info",
            1 => "debug",
            _ => "trace",
        }
    };

    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(default_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    debug!(?cli, "CLI arguments parsed");

    let config = cookbook_core::load_config(cli.config.as_deref())
        .context("Failed to load configuration")?;

    match &cli.command {
        Command::Serve(args) => commands::run_serve_command(args, &cli.source, config).await,
        Command::List(args) => commands::run_list_command(args, &cli.source, &config).await,
        Command::Tags => commands::run_tags_command(&cli.source, &config).await,
        Command::Surprise(args) => {
            commands::run_surprise_command(args, &cli.source, &config).await
        }
    }
}
