//! CLI argument definitions using clap derive macros.

use std::net::IpAddr;
use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

/// Browse a recipe spreadsheet as a photo gallery.
///
/// Cookbook reads a Google Sheet (or any CSV export) with Dish, Category,
/// Image URL and Notes columns, and serves it as a filterable gallery with a
/// "surprise me" pick.
#[derive(Parser, Debug)]
#[command(name = "cookbook")]
#[command(author, version, about)]
#[command(subcommand_required = true, arg_required_else_help = true)]
pub struct Cli {
    /// Increase output verbosity (-v for debug, -vv for trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress non-error output
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Config file (default: $XDG_CONFIG_HOME/cookbook/config.toml)
    #[arg(long, value_name = "PATH", global = true)]
    pub config: Option<PathBuf>,

    #[command(flatten)]
    pub source: SourceArgs,

    #[command(subcommand)]
    pub command: Command,
}

/// Where the recipe table comes from.
#[derive(Args, Debug, Default, Clone, PartialEq, Eq)]
pub struct SourceArgs {
    /// Link to the recipe sheet (a Google Sheets link or any CSV URL)
    #[arg(long, value_name = "URL", env = "COOKBOOK_SHEET_URL", global = true)]
    pub sheet_url: Option<String>,

    /// Read recipes from a local CSV export (takes precedence over a sheet link)
    #[arg(long, value_name = "PATH", global = true)]
    pub csv: Option<PathBuf>,

    /// Worksheet (tab) name inside the sheet
    #[arg(long, value_name = "NAME", global = true)]
    pub worksheet: Option<String>,
}

/// Top-level commands.
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Serve the recipe gallery over HTTP
    Serve(ServeArgs),
    /// Print recipes matching the filters
    List(ListArgs),
    /// Print every category tag, one per line
    Tags,
    /// Print one random recipe
    Surprise(SurpriseArgs),
}

#[derive(Args, Debug, Default, Clone, PartialEq, Eq)]
pub struct ServeArgs {
    /// Address to listen on (default from config, else 0.0.0.0)
    #[arg(long, value_name = "ADDR")]
    pub bind: Option<IpAddr>,

    /// Port to listen on (default from config, else 8501)
    #[arg(short, long, value_name = "PORT")]
    pub port: Option<u16>,
}

#[derive(Args, Debug, Default, Clone, PartialEq, Eq)]
pub struct ListArgs {
    /// Only recipes whose category contains this tag (repeatable)
    #[arg(short, long = "tag", value_name = "TAG")]
    pub tags: Vec<String>,

    /// Only recipes whose name contains this text (case-insensitive)
    #[arg(short, long, value_name = "TEXT", default_value = "")]
    pub search: String,

    /// Print in random order
    #[arg(long)]
    pub shuffle: bool,

    /// Emit JSON instead of text
    #[arg(long)]
    pub json: bool,
}

#[derive(Args, Debug, Default, Clone, PartialEq, Eq)]
pub struct SurpriseArgs {
    /// Emit JSON instead of text
    #[arg(long)]
    pub json: bool,
}
