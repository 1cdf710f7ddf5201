//! Per-visitor state: shuffled order and the held suggestion.
//!
//! Each browser gets an opaque random id in a cookie. Sessions never share
//! mutable state; the only shared piece is the read-only book snapshot taken
//! when the session starts.

use std::sync::Arc;
use std::time::{Duration, Instant};

use axum::http::HeaderMap;
use axum::http::header::COOKIE;
use dashmap::DashMap;
use tracing::{debug, info, warn};

use crate::book::RecipeBook;
use crate::error::CookbookError;
use crate::filter::RecipeFilter;
use crate::random::EmptyCollection;
use crate::recipe::Recipe;
use crate::suggestion::Suggestion;

use super::library::Library;

/// Name of the session cookie.
pub const SESSION_COOKIE: &str = "cookbook_session";

/// Live sessions kept before the least recently seen one is evicted.
pub const DEFAULT_MAX_SESSIONS: usize = 10_000;

/// Hex characters in a session id (128 bits).
const SESSION_ID_LEN: usize = 32;

/// One visitor's view state.
#[derive(Debug)]
pub struct Session {
    book: Arc<RecipeBook>,
    order: Vec<usize>,
    suggestion: Suggestion,
    last_seen: Instant,
}

impl Session {
    /// Starts a session on `book` with a fresh random display order.
    #[must_use]
    pub fn new(book: Arc<RecipeBook>) -> Self {
        let order = book.shuffled_order();
        Self {
            book,
            order,
            suggestion: Suggestion::default(),
            last_seen: Instant::now(),
        }
    }

    /// The book snapshot this session browses.
    #[must_use]
    pub fn book(&self) -> &RecipeBook {
        &self.book
    }

    /// Recipes passing `filter`, in this session's shuffled order.
    #[must_use]
    pub fn visible(&self, filter: &RecipeFilter) -> Vec<&Recipe> {
        self.book.filter_ordered(filter, &self.order)
    }

    #[must_use]
    pub fn suggestion(&self) -> &Suggestion {
        &self.suggestion
    }

    /// Picks a new suggestion from the whole book, ignoring filters.
    ///
    /// # Errors
    ///
    /// Returns [`EmptyCollection`] when the book is empty.
    pub fn suggest(&mut self) -> Result<(), EmptyCollection> {
        self.suggestion.suggest(self.book.recipes())
    }

    pub fn clear_suggestion(&mut self) {
        self.suggestion.clear();
    }
}

/// Result of [`SessionStore::open`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionHandle {
    pub id: String,
    /// True when a new session was started and the cookie must be set.
    pub created: bool,
}

/// Concurrent map of live sessions with idle expiry and a size cap.
#[derive(Debug)]
pub struct SessionStore {
    sessions: DashMap<String, Session>,
    idle_timeout: Duration,
    max_sessions: usize,
}

impl SessionStore {
    #[must_use]
    pub fn new(idle_timeout: Duration) -> Self {
        Self {
            sessions: DashMap::new(),
            idle_timeout,
            max_sessions: DEFAULT_MAX_SESSIONS,
        }
    }

    /// Caps the number of live sessions; values below 1 are treated as 1.
    #[must_use]
    pub fn with_max_sessions(mut self, max_sessions: usize) -> Self {
        self.max_sessions = max_sessions.max(1);
        self
    }

    /// Resumes the session named by `requested`, or starts a new one.
    ///
    /// Unknown, malformed or idle-expired ids start a new session. Starting
    /// a session loads the current book, prunes expired sessions and, at
    /// capacity, evicts the least recently seen one.
    ///
    /// # Errors
    ///
    /// Returns [`CookbookError`] when a new session needs a book and loading fails.
    pub async fn open(
        &self,
        requested: Option<&str>,
        library: &Library,
    ) -> Result<SessionHandle, CookbookError> {
        if let Some(id) = requested.filter(|id| is_valid_session_id(id)) {
            let alive = match self.sessions.get_mut(id) {
                Some(mut session) if session.last_seen.elapsed() <= self.idle_timeout => {
                    session.last_seen = Instant::now();
                    true
                }
                _ => false,
            };
            if alive {
                return Ok(SessionHandle {
                    id: id.to_string(),
                    created: false,
                });
            }
            self.sessions.remove(id);
        }

        let book = library.current().await?;
        self.prune_expired();
        self.evict_to_capacity();

        let id = new_session_id();
        self.sessions.insert(id.clone(), Session::new(book));
        info!(sessions = self.sessions.len(), "Started session");
        Ok(SessionHandle { id, created: true })
    }

    /// Runs `f` with exclusive access to the session, if it still exists.
    pub fn with_session<R>(&self, id: &str, f: impl FnOnce(&mut Session) -> R) -> Option<R> {
        self.sessions.get_mut(id).map(|mut session| f(session.value_mut()))
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.sessions.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.sessions.is_empty()
    }

    fn prune_expired(&self) {
        let before = self.sessions.len();
        self.sessions
            .retain(|_, session| session.last_seen.elapsed() <= self.idle_timeout);
        let pruned = before.saturating_sub(self.sessions.len());
        if pruned > 0 {
            debug!(pruned, "Pruned idle sessions");
        }
    }

    /// Makes room for one more session.
    fn evict_to_capacity(&self) {
        while self.sessions.len() >= self.max_sessions {
            let oldest = self
                .sessions
                .iter()
                .min_by_key(|entry| entry.value().last_seen)
                .map(|entry| entry.key().clone());
            let Some(id) = oldest else {
                break;
            };
            self.sessions.remove(&id);
            warn!(
                max_sessions = self.max_sessions,
                "Session limit reached; evicted least recently seen session"
            );
        }
    }
}

/// Reads the session id from the request's `Cookie` headers.
#[must_use]
pub fn session_id_from_headers(headers: &HeaderMap) -> Option<String> {
    headers
        .get_all(COOKIE)
        .iter()
        .filter_map(|value| value.to_str().ok())
        .flat_map(|value| value.split(';'))
        .filter_map(|pair| pair.trim().split_once('='))
        .find(|(name, _)| *name == SESSION_COOKIE)
        .map(|(_, value)| value.trim().to_string())
}

/// `Set-Cookie` value for a new session.
#[must_use]
pub fn session_cookie(id: &str) -> String {
    format!("{SESSION_COOKIE}={id}; Path=/; HttpOnly; SameSite=Lax")
}

fn new_session_id() -> String {
    format!("{:032x}", rand::random::<u128>())
}

fn is_valid_session_id(id: &str) -> bool {
    id.len() == SESSION_ID_LEN && id.chars().all(|c| c.is_ascii_hexdigit())
}
