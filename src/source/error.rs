//! Error types for recipe source operations.

use std::path::PathBuf;

use thiserror::Error;

/// Errors that can occur while fetching the recipe table.
///
/// Any of these means the data source is unavailable for this load; the
/// caller surfaces the message and does not retry.
#[derive(Debug, Error)]
pub enum SourceError {
    /// Network-level error (DNS resolution, connection refused, TLS errors, etc.)
    #[error("network error fetching {url}: {source}")]
    Network {
        /// The URL that failed.
        url: String,
        /// The underlying network error.
        #[source]
        source: reqwest::Error,
    },

    /// Request timed out before completion.
    #[error("timeout fetching {url}")]
    Timeout {
        /// The URL that timed out.
        url: String,
    },

    /// Non-success HTTP response.
    #[error("HTTP {status} fetching {url}")]
    HttpStatus {
        /// The URL that returned an error status.
        url: String,
        /// The HTTP status code.
        status: u16,
    },

    /// The server answered with a web page instead of CSV data.
    #[error(
        "{url} returned {content_type} instead of CSV\n  Suggestion: Share the sheet as \"Anyone with the link can view\""
    )]
    NotCsv {
        /// The URL that was fetched.
        url: String,
        /// The content type the server sent.
        content_type: String,
    },

    /// The configured sheet URL cannot be used.
    #[error("invalid sheet URL '{url}': {reason}\n  Suggestion: Paste the full https:// link of the sheet")]
    InvalidUrl {
        /// The rejected URL.
        url: String,
        /// Why it was rejected.
        reason: String,
    },

    /// The HTTP client could not be constructed.
    #[error("HTTP client construction failed: {reason}")]
    Client {
        /// Builder failure description.
        reason: String,
    },

    /// The response or file is not well-formed CSV.
    #[error("malformed CSV from {origin}: {source}")]
    Csv {
        /// URL or path the data came from.
        origin: String,
        /// The underlying decoder error.
        #[source]
        source: csv::Error,
    },

    /// Local CSV export could not be read.
    #[error("IO error reading {path}: {source}")]
    Io {
        /// The file that failed to read.
        path: PathBuf,
        /// The underlying IO error.
        #[source]
        source: std::io::Error,
    },
}

impl SourceError {
    /// Classifies a reqwest error into a timeout or network failure.
    pub fn from_reqwest(url: impl Into<String>, source: reqwest::Error) -> Self {
        let url = url.into();
        if source.is_timeout() {
            Self::Timeout { url }
        } else {
            Self::Network { url, source }
        }
    }

    /// Creates an HTTP status error.
    pub fn http_status(url: impl Into<String>, status: u16) -> Self {
        Self::HttpStatus {
            url: url.into(),
            status,
        }
    }

    /// Creates an invalid URL error.
    pub fn invalid_url(url: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::InvalidUrl {
            url: url.into(),
            reason: reason.into(),
        }
    }

    /// Creates a CSV decoding error.
    pub fn csv(origin: impl Into<String>, source: csv::Error) -> Self {
        Self::Csv {
            origin: origin.into(),
            source,
        }
    }

    /// Creates an IO error.
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_http_status_message() {
        let err = SourceError::http_status("https://sheets.example/export", 404);
        let msg = err.to_string();
        assert!(msg.contains("404"));
        assert!(msg.contains("sheets.example"));
    }

    #[test]
    fn test_not_csv_message_suggests_sharing() {
        let err = SourceError::NotCsv {
            url: "https://docs.google.com/x".to_string(),
            content_type: "text/html".to_string(),
        };
        let msg = err.to_string();
        assert!(msg.contains("text/html"));
        assert!(msg.contains("Anyone with the link"));
    }

    #[test]
    fn test_io_message_names_path() {
        let err = SourceError::io(
            "/tmp/recipes.csv",
            std::io::Error::new(std::io::ErrorKind::NotFound, "gone"),
        );
        assert!(err.to_string().contains("/tmp/recipes.csv"));
    }
}
