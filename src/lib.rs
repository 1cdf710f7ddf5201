//! Cookbook Core Library
//!
//! A personal recipe browser backed by a spreadsheet. The sheet is fetched
//! as CSV, normalized into [`Recipe`] records, and browsed through tag and
//! name filters, a per-visitor shuffled order, and a "surprise me" pick.
//!
//! # Architecture
//!
//! The library is organized into the following modules:
//! - [`source`] - Fetching the raw table from a sheet URL or CSV file
//! - [`normalize`] - Mapping drifting column names onto recipe fields
//! - [`tags`] - Tag vocabulary from the category column
//! - [`filter`] - Tag and name-search filtering
//! - [`random`] - Shuffles and random picks
//! - [`suggestion`] - The "surprise me" panel state
//! - [`book`] - A loaded set of recipes
//! - [`config`] - TOML config file
//! - [`web`] - The browser-facing gallery server

// Clippy lints - strict for library code
#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod book;
pub mod config;
pub mod error;
pub mod filter;
pub mod normalize;
pub mod random;
pub mod recipe;
pub mod source;
pub mod suggestion;
pub mod tags;
pub mod web;

// Re-export commonly used types
pub use book::RecipeBook;
pub use config::{ConfigError, FileConfig, PageConfig, load_config};
pub use error::CookbookError;
pub use filter::RecipeFilter;
pub use normalize::{FieldAliases, SchemaError, normalize_table};
pub use random::{EmptyCollection, pick_one, shuffled_order};
pub use recipe::{Recipe, RecipeView};
pub use source::{CsvFileSource, HttpTimeouts, RecipeSource, SheetSource, SourceError, Table};
pub use suggestion::Suggestion;
pub use tags::extract_tags;
