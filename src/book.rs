//! A loaded, immutable set of recipes.

use tracing::{info, instrument};

use crate::error::CookbookError;
use crate::filter::RecipeFilter;
use crate::normalize::{FieldAliases, SchemaError, normalize_table};
use crate::random::{self, EmptyCollection};
use crate::recipe::Recipe;
use crate::source::{RecipeSource, Table};
use crate::tags::extract_tags;

/// Recipes fetched in one load, plus their tag vocabulary.
///
/// Never mutated after construction; views are produced by filtering and
/// reordering references into it.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RecipeBook {
    recipes: Vec<Recipe>,
    tags: Vec<String>,
}

impl RecipeBook {
    /// Builds a book from already-normalized recipes.
    #[must_use]
    pub fn new(recipes: Vec<Recipe>) -> Self {
        let tags = extract_tags(&recipes);
        Self { recipes, tags }
    }

    /// Normalizes a raw table into a book.
    ///
    /// # Errors
    ///
    /// Returns [`SchemaError`] when a required column is missing.
    pub fn from_table(table: &Table, aliases: &FieldAliases) -> Result<Self, SchemaError> {
        normalize_table(table, aliases).map(Self::new)
    }

    /// Fetches and normalizes the table from `source`.
    ///
    /// # Errors
    ///
    /// Returns [`CookbookError::SourceUnavailable`] when the fetch fails and
    /// [`CookbookError::Schema`] when a required column is missing.
    #[instrument(skip(source, aliases), fields(source = %source.describe()))]
    pub async fn load(
        source: &dyn RecipeSource,
        aliases: &FieldAliases,
    ) -> Result<Self, CookbookError> {
        let table = source.fetch_table().await?;
        let book = Self::from_table(&table, aliases)?;
        info!(recipes = book.len(), tags = book.tags.len(), "Loaded cookbook");
        Ok(book)
    }

    /// All recipes in source order.
    #[must_use]
    pub fn recipes(&self) -> &[Recipe] {
        &self.recipes
    }

    /// Sorted, distinct category tags.
    #[must_use]
    pub fn tags(&self) -> &[String] {
        &self.tags
    }

    /// Recipes matching `filter`, in source order.
    #[must_use]
    pub fn filter(&self, filter: &RecipeFilter) -> Vec<&Recipe> {
        filter.apply(&self.recipes)
    }

    /// Recipes matching `filter`, in the given index order.
    ///
    /// Indices outside the book are skipped.
    #[must_use]
    pub fn filter_ordered(&self, filter: &RecipeFilter, order: &[usize]) -> Vec<&Recipe> {
        order
            .iter()
            .filter_map(|index| self.recipes.get(*index))
            .filter(|recipe| filter.matches(recipe))
            .collect()
    }

    /// A fresh random display order for this book.
    #[must_use]
    pub fn shuffled_order(&self) -> Vec<usize> {
        random::shuffled_order(self.recipes.len())
    }

    /// One recipe drawn uniformly from the whole book, ignoring any filter.
    ///
    /// # Errors
    ///
    /// Returns [`EmptyCollection`] when the book has no recipes.
    pub fn pick(&self) -> Result<&Recipe, EmptyCollection> {
        random::pick_one(&self.recipes)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.recipes.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.recipes.is_empty()
    }
}
