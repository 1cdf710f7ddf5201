//! Category tag vocabulary for the filter controls.

use std::collections::BTreeSet;

use tracing::instrument;

use crate::recipe::Recipe;

/// Collects the distinct category tags across all recipes.
///
/// Each category field is split on commas, pieces are trimmed and empty
/// pieces dropped. The result is sorted case-sensitively in byte order, so
/// capitalized tags come before lowercase ones (`"Zesty"` < `"apple"`).
/// Recipes without a category contribute nothing.
#[must_use]
#[instrument(skip(recipes), fields(count = recipes.len()))]
pub fn extract_tags(recipes: &[Recipe]) -> Vec<String> {
    recipes
        .iter()
        .flat_map(Recipe::tags)
        .collect::<BTreeSet<&str>>()
        .into_iter()
        .map(String::from)
        .collect()
}
