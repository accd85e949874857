//! Application error types and HTTP response mapping.
//!
//! Defines `AppError` for all error conditions and implements Axum's
//! `IntoResponse` to convert errors to HTTP responses with JSON bodies.
//!
//! Error mappings:
//! - `RepoNotFound`, `PathNotFound` → 404
//! - `InvalidUri` → 400
//! - `Git`, `Internal` → 500
//!
//! Attribution failures never surface through these mappings: the selection
//! pipeline logs them and renders "no decoration" instead (see
//! `attribution::BlameAttributor`).

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::json;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum AppError {
    #[error("Git error: {0}")]
    Git(#[from] git2::Error),

    #[error("Repository not found: {0}")]
    RepoNotFound(String),

    #[error("Path not found: {0}")]
    PathNotFound(String),

    #[error("Invalid document URI: {0}")]
    InvalidUri(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, error_message) = match &self {
            AppError::Git(e) => (StatusCode::INTERNAL_SERVER_ERROR, e.to_string()),
            AppError::RepoNotFound(path) => (
                StatusCode::NOT_FOUND,
                format!("Repository not found: {}", path),
            ),
            AppError::PathNotFound(path) => {
                (StatusCode::NOT_FOUND, format!("Path not found: {}", path))
            }
            AppError::InvalidUri(uri) => (
                StatusCode::BAD_REQUEST,
                format!("Invalid document URI: {}", uri),
            ),
            AppError::Internal(msg) => (StatusCode::INTERNAL_SERVER_ERROR, msg.clone()),
        };

        let body = Json(json!({
            "error": error_message,
        }));

        (status, body).into_response()
    }
}

pub type Result<T> = std::result::Result<T, AppError>;
