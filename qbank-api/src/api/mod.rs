//! HTTP API handlers for qbank-api

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;

pub mod admin;
pub mod auth;
pub mod health;
pub mod questions;
pub mod refresh;
pub mod ui;

pub use auth::{admin_login, admin_middleware};
pub use health::health_routes;

/// Error envelope for the read and refresh endpoints.
///
/// Surfaced pipeline errors map to 500; bad request parameters to 400.
#[derive(Debug)]
pub enum ApiError {
    BadRequest(String),
    Internal(String),
}

impl From<qbank_common::Error> for ApiError {
    fn from(e: qbank_common::Error) -> Self {
        ApiError::Internal(e.to_string())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            ApiError::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg),
            ApiError::Internal(msg) => (StatusCode::INTERNAL_SERVER_ERROR, msg),
        };

        let body = Json(json!({
            "error": message,
        }));

        (status, body).into_response()
    }
}
