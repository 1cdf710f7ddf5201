//! Browser-facing presenter: the gallery page, per-visitor sessions and a
//! small read-only JSON API.
//!
//! # Architecture
//!
//! - [`Library`] - Shared cache of the current [`crate::RecipeBook`]
//! - [`SessionStore`] - Shuffled order and suggestion for each visitor
//! - [`GalleryQuery`] - Filter controls carried in the query string
//! - `render` - HTML for the gallery and error pages
//! - `routes` - axum handlers

mod error;
mod library;
mod query;
mod render;
mod routes;
mod session;

pub use error::AppError;
pub use library::Library;
pub use query::GalleryQuery;
pub use render::{GalleryPage, render_error_page, render_gallery};
pub use session::{DEFAULT_MAX_SESSIONS, SESSION_COOKIE, Session, SessionHandle, SessionStore};

use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use axum::{
    Router,
    http::{Method, header::CONTENT_TYPE},
    routing::{get, post},
};
use tokio::net::TcpListener;
use tokio::signal::ctrl_c;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::{error, info};

use crate::config::PageConfig;

/// State shared by every handler.
pub struct AppState {
    pub library: Library,
    pub sessions: SessionStore,
    pub page: PageConfig,
}

impl AppState {
    #[must_use]
    pub fn new(library: Library, sessions: SessionStore, page: PageConfig) -> Self {
        Self {
            library,
            sessions,
            page,
        }
    }
}

/// Builds the full router: gallery, suggestion forms, API and health check.
pub fn build_router(state: Arc<AppState>) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([Method::GET, Method::OPTIONS])
        .allow_headers([CONTENT_TYPE])
        .max_age(Duration::from_secs(60 * 60));

    let api = Router::new()
        .route("/recipes", get(routes::api_recipes))
        .route("/tags", get(routes::api_tags))
        .route("/surprise", get(routes::api_surprise))
        .layer(cors);

    Router::new()
        .route("/", get(routes::gallery_handler))
        .route("/suggest", post(routes::suggest_handler))
        .route("/suggest/clear", post(routes::clear_handler))
        .route("/health", get(routes::health))
        .nest("/api", api)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Binds `address` and serves until Ctrl+C or SIGTERM.
///
/// # Errors
///
/// Returns the I/O error when binding or serving fails.
pub async fn serve(state: Arc<AppState>, address: SocketAddr) -> std::io::Result<()> {
    let listener = TcpListener::bind(address).await?;
    info!(address = %listener.local_addr()?, source = %state.library.describe(), "Serving cookbook");

    axum::serve(listener, build_router(state))
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Server shut down");
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        match ctrl_c().await {
            Ok(()) => info!("Received Ctrl+C, shutting down"),
            Err(err) => {
                error!(error = %err, "Failed to install Ctrl+C handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(unix)]
    let terminate = async {
        use tokio::signal::unix::{SignalKind, signal};

        match signal(SignalKind::terminate()) {
            Ok(mut stream) => {
                stream.recv().await;
                info!("Received terminate signal, shutting down");
            }
            Err(err) => {
                error!(error = %err, "Failed to install signal handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {},
        () = terminate => {},
    }
}
