//! Shared HTTP client construction policy for remote sheet fetches.
//!
//! Centralizes timeout, user-agent and compression defaults so every source
//! built from config behaves the same way.

use std::time::Duration;

use reqwest::Client;

use super::SourceError;

/// Default connect timeout for sheet fetches.
pub const DEFAULT_CONNECT_TIMEOUT_SECS: u64 = 10;

/// Default total request timeout for sheet fetches.
pub const DEFAULT_READ_TIMEOUT_SECS: u64 = 30;

/// Connect and read timeouts applied to the sheet HTTP client.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HttpTimeouts {
    pub connect_secs: u64,
    pub read_secs: u64,
}

impl Default for HttpTimeouts {
    fn default() -> Self {
        Self {
            connect_secs: DEFAULT_CONNECT_TIMEOUT_SECS,
            read_secs: DEFAULT_READ_TIMEOUT_SECS,
        }
    }
}

/// User-Agent sent with sheet requests (identifies the tool and version).
#[must_use]
pub fn default_user_agent() -> String {
    let version = env!("CARGO_PKG_VERSION");
    format!("cookbook/{version} (recipe-browser)")
}

/// Builds the HTTP client used by [`super::SheetSource`].
///
/// # Errors
///
/// Returns [`SourceError::Client`] when the builder rejects the configuration.
pub fn build_source_http_client(timeouts: HttpTimeouts) -> Result<Client, SourceError> {
    Client::builder()
        .connect_timeout(Duration::from_secs(timeouts.connect_secs))
        .timeout(Duration::from_secs(timeouts.read_secs))
        .user_agent(default_user_agent())
        .gzip(true)
        .build()
        .map_err(|error| SourceError::Client {
            reason: error.to_string(),
        })
}
