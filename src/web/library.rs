//! Shared, time-bounded cache of the loaded cookbook.

use std::sync::Arc;
use std::time::{Duration, Instant};

use tokio::sync::Mutex;
use tracing::debug;

use crate::book::RecipeBook;
use crate::error::CookbookError;
use crate::normalize::FieldAliases;
use crate::source::RecipeSource;

#[derive(Debug)]
struct CachedBook {
    book: Arc<RecipeBook>,
    loaded_at: Instant,
}

/// Owns the recipe source and hands out the current [`RecipeBook`].
///
/// The book is re-fetched once it is older than the TTL; a zero TTL fetches
/// on every call. Concurrent callers wait on one fetch instead of issuing
/// their own.
pub struct Library {
    source: Box<dyn RecipeSource>,
    aliases: FieldAliases,
    ttl: Duration,
    cached: Mutex<Option<CachedBook>>,
}

impl Library {
    #[must_use]
    pub fn new(source: Box<dyn RecipeSource>, aliases: FieldAliases, ttl: Duration) -> Self {
        Self {
            source,
            aliases,
            ttl,
            cached: Mutex::new(None),
        }
    }

    /// Description of the underlying source.
    #[must_use]
    pub fn describe(&self) -> String {
        self.source.describe()
    }

    /// Returns the cached book, fetching a new one when stale.
    ///
    /// # Errors
    ///
    /// Returns [`CookbookError`] when the fetch or normalization fails. A
    /// failed refresh is not hidden behind a stale copy.
    pub async fn current(&self) -> Result<Arc<RecipeBook>, CookbookError> {
        let mut cached = self.cached.lock().await;

        if let Some(entry) = cached.as_ref()
            && entry.loaded_at.elapsed() < self.ttl
        {
            debug!("Serving cached cookbook");
            return Ok(Arc::clone(&entry.book));
        }

        let book = Arc::new(RecipeBook::load(self.source.as_ref(), &self.aliases).await?);
        *cached = Some(CachedBook {
            book: Arc::clone(&book),
            loaded_at: Instant::now(),
        });
        Ok(book)
    }
}
