//! Random ordering and picks.
//!
//! Every call draws from the thread-local RNG; results are intentionally not
//! reproducible.

use rand::seq::SliceRandom;
use thiserror::Error;

/// A random pick was requested from an empty collection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("cannot pick a recipe: the cookbook is empty\n  Suggestion: Add at least one row to the sheet")]
pub struct EmptyCollection;

/// Returns a random permutation of `0..len`.
#[must_use]
pub fn shuffled_order(len: usize) -> Vec<usize> {
    let mut order: Vec<usize> = (0..len).collect();
    order.shuffle(&mut rand::thread_rng());
    order
}

/// Picks one element uniformly at random.
///
/// # Errors
///
/// Returns [`EmptyCollection`] when `items` is empty.
pub fn pick_one<T>(items: &[T]) -> Result<&T, EmptyCollection> {
    items.choose(&mut rand::thread_rng()).ok_or(EmptyCollection)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_shuffled_order_is_a_permutation() {
        let mut order = shuffled_order(50);
        assert_eq!(order.len(), 50);
        order.sort_unstable();
        assert_eq!(order, (0..50).collect::<Vec<_>>());
    }

    #[test]
    fn test_shuffled_order_empty() {
        assert!(shuffled_order(0).is_empty());
    }

    #[test]
    fn test_pick_one_returns_member() {
        let items = vec![1, 2, 3];
        for _ in 0..100 {
            let picked = pick_one(&items).unwrap();
            assert!(items.contains(picked));
        }
    }

    #[test]
    fn test_pick_one_empty_is_error() {
        let items: Vec<u8> = Vec::new();
        assert_eq!(pick_one(&items), Err(EmptyCollection));
        assert!(EmptyCollection.to_string().contains("empty"));
    }

    #[test]
    fn test_pick_one_reaches_every_element() {
        let items = vec!['x', 'y'];
        let mut seen = std::collections::HashSet::new();
        for _ in 0..200 {
            seen.insert(*pick_one(&items).unwrap());
        }
        assert_eq!(seen.len(), 2);
    }
}
