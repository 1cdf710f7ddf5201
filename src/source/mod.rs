//! Data source adapters producing the raw recipe table.
//!
//! # Architecture
//!
//! - [`RecipeSource`] - Async trait every source implements
//! - [`SheetSource`] - Google Sheet (or any CSV URL) fetched over HTTP
//! - [`CsvFileSource`] - Local CSV export
//! - [`Table`] - Header row plus rows of optional cells
//!
//! Sources only move bytes into a [`Table`]; field mapping happens in
//! [`crate::normalize`].

mod csv_file;
mod error;
mod http_client;
mod sheet;
mod table;

pub use csv_file::CsvFileSource;
pub use error::SourceError;
pub use http_client::{
    DEFAULT_CONNECT_TIMEOUT_SECS, DEFAULT_READ_TIMEOUT_SECS, HttpTimeouts,
    build_source_http_client, default_user_agent,
};
pub use sheet::{SheetSource, csv_export_url};
pub use table::Table;

use async_trait::async_trait;

/// A place recipe rows can be read from.
///
/// Held as `Box<dyn RecipeSource>` by the server, hence `async_trait`.
#[async_trait]
pub trait RecipeSource: Send + Sync {
    /// Human-readable description for logs and error pages.
    fn describe(&self) -> String;

    /// Reads the whole table.
    async fn fetch_table(&self) -> Result<Table, SourceError>;
}
