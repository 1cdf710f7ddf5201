//! Column-name normalization from a raw [`Table`] into [`Recipe`] records.
//!
//! Spreadsheet headers drift: `Image url`, `Image URL` and `image_url` all
//! mean the same column. Headers are compared through a key that keeps only
//! lowercased letters and digits, so any case or spacing variant of a known
//! field maps onto its canonical name. Extra spellings can be configured
//! through [`FieldAliases`].

mod error;

pub use error::SchemaError;

use serde::Deserialize;
use tracing::{debug, instrument, warn};

use crate::recipe::Recipe;
use crate::source::Table;

/// Minimum similarity for a header to be offered as a "did you mean" hint.
const SUGGESTION_THRESHOLD: f64 = 0.6;

/// The logical recipe fields, in canonical order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Field {
    Dish,
    Category,
    ImageUrl,
    Notes,
}

impl Field {
    /// Every field, in canonical order.
    pub const ALL: [Self; 4] = [Self::Dish, Self::Category, Self::ImageUrl, Self::Notes];

    /// Canonical field name.
    #[must_use]
    pub fn canonical_name(self) -> &'static str {
        match self {
            Self::Dish => "Dish",
            Self::Category => "Category",
            Self::ImageUrl => "ImageUrl",
            Self::Notes => "Notes",
        }
    }

    fn index(self) -> usize {
        match self {
            Self::Dish => 0,
            Self::Category => 1,
            Self::ImageUrl => 2,
            Self::Notes => 3,
        }
    }
}

/// Additional header spellings accepted for each field.
///
/// Aliases go through the same case/spacing normalization as headers, so
/// `"Photo Link"` also matches `photo_link`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct FieldAliases {
    pub dish: Vec<String>,
    pub category: Vec<String>,
    pub image_url: Vec<String>,
    pub notes: Vec<String>,
}

impl FieldAliases {
    fn for_field(&self, field: Field) -> &[String] {
        match field {
            Field::Dish => &self.dish,
            Field::Category => &self.category,
            Field::ImageUrl => &self.image_url,
            Field::Notes => &self.notes,
        }
    }

    fn matches(&self, field: Field, key: &str) -> bool {
        header_key(field.canonical_name()) == key
            || self
                .for_field(field)
                .iter()
                .any(|alias| header_key(alias) == key)
    }
}

/// Reduces a header to its comparison key: lowercased letters and digits only.
///
/// ```
/// use cookbook_core::normalize::header_key;
///
/// assert_eq!(header_key(" Image URL "), "imageurl");
/// assert_eq!(header_key("image_url"), "imageurl");
/// ```
#[must_use]
pub fn header_key(raw: &str) -> String {
    raw.chars()
        .filter(|c| c.is_alphanumeric())
        .flat_map(char::to_lowercase)
        .collect()
}

/// Position of each logical field within the table's header row.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ColumnMap {
    columns: [usize; 4],
}

impl ColumnMap {
    /// Maps every logical field to a header index.
    ///
    /// When two headers map to the same field the first one wins.
    ///
    /// # Errors
    ///
    /// Returns [`SchemaError`] naming the first field with no matching header.
    pub fn resolve(headers: &[String], aliases: &FieldAliases) -> Result<Self, SchemaError> {
        let mut columns: [Option<usize>; 4] = [None; 4];

        for (index, header) in headers.iter().enumerate() {
            let key = header_key(header);
            if key.is_empty() {
                continue;
            }

            let Some(field) = Field::ALL
                .into_iter()
                .find(|field| aliases.matches(*field, &key))
            else {
                debug!(header = %header, "Ignoring unrecognized column");
                continue;
            };

            if let Some(existing) = columns[field.index()] {
                warn!(
                    field = field.canonical_name(),
                    kept = %headers[existing],
                    ignored = %header,
                    "Duplicate column for field; keeping the first"
                );
            } else {
                columns[field.index()] = Some(index);
            }
        }

        let mut resolved = [0; 4];
        for field in Field::ALL {
            let Some(index) = columns[field.index()] else {
                let claimed: Vec<usize> = columns.iter().flatten().copied().collect();
                let closest = closest_header(field, headers, &claimed);
                return Err(SchemaError::missing_field(
                    field.canonical_name(),
                    headers,
                    closest,
                ));
            };
            resolved[field.index()] = index;
        }

        Ok(Self { columns: resolved })
    }

    /// Header index holding `field`.
    #[must_use]
    pub fn column(&self, field: Field) -> usize {
        self.columns[field.index()]
    }

    fn cell(&self, row: &[Option<String>], field: Field) -> Option<String> {
        row.get(self.column(field)).cloned().flatten()
    }
}

/// Converts a raw table into recipe records.
///
/// Rows with every mapped cell missing are skipped as blank spreadsheet rows.
///
/// # Errors
///
/// Returns [`SchemaError`] when a logical field has no column.
#[instrument(skip(table, aliases), fields(rows = table.len()))]
pub fn normalize_table(table: &Table, aliases: &FieldAliases) -> Result<Vec<Recipe>, SchemaError> {
    let columns = ColumnMap::resolve(&table.headers, aliases)?;

    let recipes: Vec<Recipe> = table
        .rows
        .iter()
        .map(|row| Recipe {
            dish: columns.cell(row, Field::Dish),
            category: columns.cell(row, Field::Category),
            image_url: columns.cell(row, Field::ImageUrl),
            notes: columns.cell(row, Field::Notes),
        })
        .filter(|recipe| !recipe.is_blank())
        .collect();

    let skipped = table.len() - recipes.len();
    if skipped > 0 {
        debug!(skipped, "Skipped blank rows");
    }

    Ok(recipes)
}

fn closest_header<'a>(field: Field, headers: &'a [String], claimed: &[usize]) -> Option<&'a str> {
    let target = header_key(field.canonical_name());

    headers
        .iter()
        .enumerate()
        .filter(|(index, _)| !claimed.contains(index))
        .map(|(_, header)| {
            let score = strsim::normalized_levenshtein(&target, &header_key(header));
            (header.as_str(), score)
        })
        .filter(|(_, score)| *score >= SUGGESTION_THRESHOLD)
        .max_by(|a, b| a.1.total_cmp(&b.1))
        .map(|(header, _)| header)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn headers(names: &[&str]) -> Vec<String> {
        names.iter().map(ToString::to_string).collect()
    }

    fn cells(values: &[Option<&str>]) -> Vec<Option<String>> {
        values.iter().map(|v| v.map(str::to_string)).collect()
    }

    #[test]
    fn test_header_key_strips_case_and_spacing() {
        assert_eq!(header_key("  Dish "), "dish");
        assert_eq!(header_key("Image url"), "imageurl");
        assert_eq!(header_key("IMAGE-URL"), "imageurl");
        assert_eq!(header_key("ImageUrl"), "imageurl");
    }

    #[test]
    fn test_resolve_accepts_header_variants() {
        let map = ColumnMap::resolve(
            &headers(&[" notes", "Image URL", "CATEGORY ", "dish"]),
            &FieldAliases::default(),
        )
        .unwrap();

        assert_eq!(map.column(Field::Dish), 3);
        assert_eq!(map.column(Field::Category), 2);
        assert_eq!(map.column(Field::ImageUrl), 1);
        assert_eq!(map.column(Field::Notes), 0);
    }

    #[test]
    fn test_resolve_missing_field_is_schema_error() {
        let err = ColumnMap::resolve(
            &headers(&["Dish", "Category", "Notes"]),
            &FieldAliases::default(),
        )
        .unwrap_err();

        assert_eq!(err.field, "ImageUrl");
        assert!(err.found.contains("'Category'"));
    }

    #[test]
    fn test_resolve_suggests_closest_unclaimed_header() {
        let err = ColumnMap::resolve(
            &headers(&["Dishes", "Category", "Image url", "Notes"]),
            &FieldAliases::default(),
        )
        .unwrap_err();

        assert_eq!(err.field, "Dish");
        assert!(err.suggestion.contains("Did you mean 'Dishes'?"));
    }

    #[test]
    fn test_resolve_no_suggestion_for_unrelated_headers() {
        let err = ColumnMap::resolve(
            &headers(&["Category", "Image url", "Notes", "Rating"]),
            &FieldAliases::default(),
        )
        .unwrap_err();

        assert!(err.suggestion.starts_with("Add a 'Dish' column"));
    }

    #[test]
    fn test_resolve_uses_configured_aliases() {
        let aliases = FieldAliases {
            dish: vec!["Recipe Name".to_string()],
            image_url: vec!["Photo".to_string()],
            ..FieldAliases::default()
        };
        let map = ColumnMap::resolve(
            &headers(&["recipe_name", "Category", "photo", "Notes"]),
            &aliases,
        )
        .unwrap();

        assert_eq!(map.column(Field::Dish), 0);
        assert_eq!(map.column(Field::ImageUrl), 2);
    }

    #[test]
    fn test_resolve_duplicate_column_keeps_first() {
        let map = ColumnMap::resolve(
            &headers(&["Dish", "Category", "Image url", "Notes", "dish"]),
            &FieldAliases::default(),
        )
        .unwrap();
        assert_eq!(map.column(Field::Dish), 0);
    }

    #[test]
    fn test_normalize_table_maps_cells_and_skips_blank_rows() {
        let table = Table::new(
            headers(&["Dish", "Category", "Image url", "Notes", "Rating"]),
            vec![
                cells(&[Some("Tomato Soup"), Some("Soup, Vegetarian"), None, None, Some("5")]),
                cells(&[None, None, None, None, Some("3")]),
                cells(&[None, Some("Meat"), Some("http://img/stew.jpg"), None, None]),
            ],
        );

        let recipes = normalize_table(&table, &FieldAliases::default()).unwrap();

        assert_eq!(recipes.len(), 2);
        assert_eq!(recipes[0].dish.as_deref(), Some("Tomato Soup"));
        assert_eq!(recipes[0].category.as_deref(), Some("Soup, Vegetarian"));
        assert_eq!(recipes[0].image_url, None);
        assert_eq!(recipes[1].dish, None);
        assert!(recipes[1].has_image());
    }

    #[test]
    fn test_normalize_table_empty_headers_fails_on_dish() {
        let table = Table::default();
        let err = normalize_table(&table, &FieldAliases::default()).unwrap_err();
        assert_eq!(err.field, "Dish");
        assert_eq!(err.found, "none");
    }
}
