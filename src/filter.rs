//! Combined category and name filtering.
//!
//! Two constraint kinds, AND-ed together:
//!
//! - **tags**: the raw category text contains at least one selected tag as a
//!   substring. Matching is against the unsplit field, so selecting `Soup`
//!   also matches `Spicy Soups`.
//! - **search**: the dish name contains the query, ignoring case.
//!
//! An inactive constraint (no tags selected, empty query) always passes.

use std::collections::BTreeSet;

use tracing::instrument;

use crate::recipe::Recipe;

/// The user's current filter selection.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RecipeFilter {
    tags: BTreeSet<String>,
    search: String,
}

impl RecipeFilter {
    /// Creates a filter from selected tags and a search query.
    ///
    /// Blank tags are dropped: an empty substring would match every category.
    #[must_use]
    pub fn new<I, S>(tags: I, search: impl Into<String>) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let tags = tags
            .into_iter()
            .map(Into::into)
            .filter(|tag: &String| !tag.trim().is_empty())
            .collect();
        Self {
            tags,
            search: search.into(),
        }
    }

    /// Selected tags, sorted.
    #[must_use]
    pub fn tags(&self) -> &BTreeSet<String> {
        &self.tags
    }

    /// The search query as entered.
    #[must_use]
    pub fn search(&self) -> &str {
        &self.search
    }

    /// Returns true when no constraint is active.
    #[must_use]
    pub fn is_identity(&self) -> bool {
        self.tags.is_empty() && self.search.is_empty()
    }

    /// Tests one recipe against both constraints.
    #[must_use]
    pub fn matches(&self, recipe: &Recipe) -> bool {
        self.matches_tags(recipe) && self.matches_search(recipe)
    }

    fn matches_tags(&self, recipe: &Recipe) -> bool {
        if self.tags.is_empty() {
            return true;
        }
        recipe
            .category
            .as_deref()
            .is_some_and(|category| self.tags.iter().any(|tag| category.contains(tag.as_str())))
    }

    fn matches_search(&self, recipe: &Recipe) -> bool {
        if self.search.is_empty() {
            return true;
        }
        let needle = self.search.to_lowercase();
        recipe
            .dish
            .as_deref()
            .is_some_and(|dish| dish.to_lowercase().contains(&needle))
    }

    /// Returns the matching recipes, preserving input order.
    #[must_use]
    #[instrument(skip(self, recipes), fields(count = recipes.len(), tags = self.tags.len()))]
    pub fn apply<'a>(&self, recipes: &'a [Recipe]) -> Vec<&'a Recipe> {
        recipes.iter().filter(|recipe| self.matches(recipe)).collect()
    }
}
