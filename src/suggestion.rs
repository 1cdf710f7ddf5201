//! The "surprise me" suggestion held for one session.

use tracing::debug;

use crate::random::{EmptyCollection, pick_one};
use crate::recipe::Recipe;

/// Session-scoped suggestion state.
///
/// `suggest` always lands in [`Suggestion::Showing`] (replacing any held
/// recipe) and `clear` always lands in [`Suggestion::Empty`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum Suggestion {
    #[default]
    Empty,
    Showing(Recipe),
}

impl Suggestion {
    /// Draws a recipe from the full, unfiltered `pool` and shows it.
    ///
    /// # Errors
    ///
    /// Returns [`EmptyCollection`] for an empty pool; the state is left unchanged.
    pub fn suggest(&mut self, pool: &[Recipe]) -> Result<(), EmptyCollection> {
        let picked = pick_one(pool)?.clone();
        debug!(dish = ?picked.dish, "Suggesting recipe");
        *self = Self::Showing(picked);
        Ok(())
    }

    /// Drops the held recipe.
    pub fn clear(&mut self) {
        *self = Self::Empty;
    }

    /// The held recipe, if any.
    #[must_use]
    pub fn current(&self) -> Option<&Recipe> {
        match self {
            Self::Showing(recipe) => Some(recipe),
            Self::Empty => None,
        }
    }

    /// Returns true while a recipe is shown.
    #[must_use]
    pub fn is_showing(&self) -> bool {
        matches!(self, Self::Showing(_))
    }
}
