use std::sync::Arc;

use axum::{
    Json,
    extract::{RawQuery, State},
    http::{HeaderMap, HeaderValue, StatusCode, header::SET_COOKIE},
    response::{Html, IntoResponse, Redirect, Response},
};
use tracing::{debug, warn};

use crate::error::CookbookError;
use crate::recipe::{Recipe, RecipeView};

use super::AppState;
use super::error::AppError;
use super::query::GalleryQuery;
use super::render::{GalleryPage, render_error_page, render_gallery};
use super::session::{SessionHandle, session_cookie, session_id_from_headers};

/// `GET /`: the gallery for this visitor's session.
pub async fn gallery_handler(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    RawQuery(raw): RawQuery,
) -> Response {
    let query = GalleryQuery::parse(raw.as_deref());
    let handle = match open_session(&state, &headers).await {
        Ok(handle) => handle,
        Err(error) => return error_page(&state, error),
    };

    let filter = query.filter();
    let html = state.sessions.with_session(&handle.id, |session| {
        let recipes = session.visible(&filter);
        render_gallery(&GalleryPage {
            page: &state.page,
            tags: session.book().tags(),
            query: &query,
            recipes: &recipes,
            suggestion: session.suggestion().current(),
        })
    });

    let Some(html) = html else {
        let html = render_error_page(
            &state.page,
            "Session expired",
            "Your session ended while the page was loading. Reload to start a new one.",
        );
        return (StatusCode::SERVICE_UNAVAILABLE, Html(html)).into_response();
    };

    with_cookie(Html(html).into_response(), &handle)
}

/// `POST /suggest`: picks a surprise recipe, then returns to the gallery.
pub async fn suggest_handler(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    RawQuery(raw): RawQuery,
) -> Response {
    let query = GalleryQuery::parse(raw.as_deref());
    let handle = match open_session(&state, &headers).await {
        Ok(handle) => handle,
        Err(error) => return error_page(&state, error),
    };

    let outcome = state.sessions.with_session(&handle.id, |session| session.suggest());
    if let Some(Err(error)) = outcome {
        debug!(%error, "No suggestion available");
    }

    with_cookie(Redirect::to(&query.location("/")).into_response(), &handle)
}

/// `POST /suggest/clear`: hides the suggestion panel.
pub async fn clear_handler(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    RawQuery(raw): RawQuery,
) -> Response {
    let query = GalleryQuery::parse(raw.as_deref());
    let handle = match open_session(&state, &headers).await {
        Ok(handle) => handle,
        Err(error) => return error_page(&state, error),
    };

    state
        .sessions
        .with_session(&handle.id, |session| session.clear_suggestion());

    with_cookie(Redirect::to(&query.location("/")).into_response(), &handle)
}

/// `GET /api/recipes`: recipes matching `tag`/`q`, in sheet order.
pub async fn api_recipes(
    State(state): State<Arc<AppState>>,
    RawQuery(raw): RawQuery,
) -> Result<Response, AppError> {
    let query = GalleryQuery::parse(raw.as_deref());
    let book = state.library.current().await?;

    let views: Vec<RecipeView<'_>> = book
        .filter(&query.filter())
        .into_iter()
        .map(Recipe::view)
        .collect();
    Ok(Json(views).into_response())
}

/// `GET /api/tags`: the sorted tag vocabulary.
pub async fn api_tags(State(state): State<Arc<AppState>>) -> Result<Response, AppError> {
    let book = state.library.current().await?;
    Ok(Json(book.tags()).into_response())
}

/// `GET /api/surprise`: one random recipe from the whole book.
pub async fn api_surprise(State(state): State<Arc<AppState>>) -> Result<Response, AppError> {
    let book = state.library.current().await?;
    let recipe = book.pick()?;
    Ok(Json(recipe.view()).into_response())
}

pub async fn health() -> impl IntoResponse {
    (StatusCode::OK, "ok")
}

async fn open_session(
    state: &AppState,
    headers: &HeaderMap,
) -> Result<SessionHandle, CookbookError> {
    let requested = session_id_from_headers(headers);
    state
        .sessions
        .open(requested.as_deref(), &state.library)
        .await
}

fn error_page(state: &AppState, error: CookbookError) -> Response {
    warn!(%error, source = %state.library.describe(), "Cannot show the cookbook");

    let heading = if error.is_configuration_problem() {
        "The recipe sheet needs attention"
    } else {
        "Recipes are unavailable right now"
    };
    let html = render_error_page(&state.page, heading, &error.to_string());
    let status = AppError::from(error).status();
    (status, Html(html)).into_response()
}

fn with_cookie(mut response: Response, handle: &SessionHandle) -> Response {
    if handle.created
        && let Ok(value) = HeaderValue::from_str(&session_cookie(&handle.id))
    {
        response.headers_mut().insert(SET_COOKIE, value);
    }
    response
}
