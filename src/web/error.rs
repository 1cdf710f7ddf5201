use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use thiserror::Error;

use crate::error::CookbookError;
use crate::random::EmptyCollection;

/// Errors surfaced by the JSON and form handlers.
#[derive(Error, Debug)]
pub enum AppError {
    #[error(transparent)]
    Cookbook(#[from] CookbookError),

    #[error(transparent)]
    Empty(#[from] EmptyCollection),
}

impl AppError {
    #[must_use]
    pub fn status(&self) -> StatusCode {
        match self {
            AppError::Cookbook(error) if error.is_configuration_problem() => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
            AppError::Cookbook(_) => StatusCode::SERVICE_UNAVAILABLE,
            AppError::Empty(_) => StatusCode::NOT_FOUND,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        (self.status(), self.to_string()).into_response()
    }
}
