//! Top-level error for loading a cookbook.

use thiserror::Error;

use crate::normalize::SchemaError;
use crate::source::SourceError;

/// Failures that abort rendering the gallery for a session.
#[derive(Debug, Error)]
pub enum CookbookError {
    /// The sheet is missing a required column.
    #[error("recipe sheet is misconfigured: {0}")]
    Schema(#[from] SchemaError),

    /// The sheet could not be fetched or decoded.
    #[error("recipe source unavailable: {0}")]
    SourceUnavailable(#[from] SourceError),
}

impl CookbookError {
    /// Returns true when the fix is in the sheet or config rather than the network.
    #[must_use]
    pub fn is_configuration_problem(&self) -> bool {
        match self {
            Self::Schema(_) => true,
            Self::SourceUnavailable(error) => matches!(
                error,
                SourceError::InvalidUrl { .. } | SourceError::NotCsv { .. }
            ),
        }
    }
}
