//! Error type for schema normalization.

use thiserror::Error;

/// A required column is absent from the source table.
///
/// Fatal for the load: the gallery cannot be rendered without every logical
/// field, and retrying will not help until the sheet or config changes.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("required column '{field}' not found (columns: {found})\n  Suggestion: {suggestion}")]
pub struct SchemaError {
    /// Canonical name of the missing field.
    pub field: &'static str,
    /// Comma-joined header row as read from the source.
    pub found: String,
    /// How to fix the sheet or config.
    pub suggestion: String,
}

impl SchemaError {
    /// Creates an error for `field`, listing the headers that were present.
    #[must_use]
    pub fn missing_field(field: &'static str, headers: &[String], closest: Option<&str>) -> Self {
        let found = if headers.is_empty() {
            "none".to_string()
        } else {
            headers
                .iter()
                .map(|header| format!("'{}'", header.trim()))
                .collect::<Vec<_>>()
                .join(", ")
        };

        let suggestion = match closest {
            Some(header) => format!(
                "Did you mean '{}'? Rename the column to '{field}' or list it under [fields] in the config",
                header.trim()
            ),
            None => format!(
                "Add a '{field}' column to the sheet or map an existing column under [fields] in the config"
            ),
        };

        Self {
            field,
            found,
            suggestion,
        }
    }
}
