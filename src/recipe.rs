//! The recipe record and its presentation view.

use serde::Serialize;

/// Prefix an image link must carry to be rendered as an image.
const IMAGE_URL_PREFIX: &str = "http";

/// A single row of the recipe spreadsheet.
///
/// Every field is optional: spreadsheets routinely contain half-filled rows,
/// and a missing cell is a normal data state rather than an error.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Recipe {
    /// Display name of the dish.
    pub dish: Option<String>,
    /// Comma-separated category tags, as written in the sheet.
    pub category: Option<String>,
    /// Link to a photo of the dish.
    pub image_url: Option<String>,
    /// Free-text annotation.
    pub notes: Option<String>,
}

impl Recipe {
    /// Creates a recipe with only a dish name and category.
    #[must_use]
    pub fn new(dish: impl Into<String>, category: impl Into<String>) -> Self {
        Self {
            dish: Some(dish.into()),
            category: Some(category.into()),
            ..Self::default()
        }
    }

    /// Sets the image link.
    #[must_use]
    pub fn with_image_url(mut self, image_url: impl Into<String>) -> Self {
        self.image_url = Some(image_url.into());
        self
    }

    /// Sets the notes.
    #[must_use]
    pub fn with_notes(mut self, notes: impl Into<String>) -> Self {
        self.notes = Some(notes.into());
        self
    }

    /// Returns true when the image link is present and looks like a web URL.
    #[must_use]
    pub fn has_image(&self) -> bool {
        self.image_url
            .as_deref()
            .is_some_and(|url| url.starts_with(IMAGE_URL_PREFIX))
    }

    /// Returns the image link only when [`Recipe::has_image`] holds.
    #[must_use]
    pub fn image(&self) -> Option<&str> {
        if self.has_image() {
            self.image_url.as_deref()
        } else {
            None
        }
    }

    /// Splits the category field into trimmed, non-empty tags in sheet order.
    pub fn tags(&self) -> impl Iterator<Item = &str> {
        self.category
            .as_deref()
            .into_iter()
            .flat_map(|category| category.split(','))
            .map(str::trim)
            .filter(|tag| !tag.is_empty())
    }

    /// Returns true when every field is missing.
    #[must_use]
    pub fn is_blank(&self) -> bool {
        self.dish.is_none()
            && self.category.is_none()
            && self.image_url.is_none()
            && self.notes.is_none()
    }

    /// Builds the serializable view handed to the presentation layer.
    #[must_use]
    pub fn view(&self) -> RecipeView<'_> {
        RecipeView {
            dish: self.dish.as_deref(),
            category: self.category.as_deref(),
            image_url: self.image_url.as_deref(),
            notes: self.notes.as_deref(),
            has_image: self.has_image(),
        }
    }
}

/// Read-only projection of a [`Recipe`] with the derived image flag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct RecipeView<'a> {
    pub dish: Option<&'a str>,
    pub category: Option<&'a str>,
    pub image_url: Option<&'a str>,
    pub notes: Option<&'a str>,
    pub has_image: bool,
}
