//! Admin authentication
//!
//! Login checks the configured credentials and hands out the fixed
//! `token-<username>` token; the middleware requires that token in
//! the `Authorization` header on admin routes. Validation failures
//! map to 401.

use axum::{
    extract::{Request, State},
    http::{header, StatusCode},
    middleware::Next,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};
use serde_json::json;
use tracing::warn;

use crate::AppState;

/// Login request body
#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

/// Successful login response
#[derive(Debug, Serialize)]
pub struct LoginResponse {
    pub success: bool,
    pub token: String,
}

/// POST /api/admin/login
///
/// Validates credentials against the configured admin account. An
/// empty configured password disables admin login entirely.
pub async fn admin_login(
    State(state): State<AppState>,
    Json(request): Json<LoginRequest>,
) -> Result<Json<LoginResponse>, AuthError> {
    if state.admin_password.is_empty() {
        warn!("Admin login attempted but no admin password is configured");
        return Err(AuthError::BadCredentials);
    }

    if request.username != state.admin_username || request.password != state.admin_password {
        return Err(AuthError::BadCredentials);
    }

    Ok(Json(LoginResponse {
        success: true,
        token: format!("token-{}", request.username),
    }))
}

/// Authentication middleware for admin routes
///
/// Requires `Authorization: token-<username>` matching the configured
/// admin username. Returns 401 otherwise.
pub async fn admin_middleware(
    State(state): State<AppState>,
    request: Request,
    next: Next,
) -> Result<Response, AuthError> {
    let expected = format!("token-{}", state.admin_username);
    let provided = request
        .headers()
        .get(header::AUTHORIZATION)
        .and_then(|v| v.to_str().ok());

    match provided {
        Some(token) if token == expected => Ok(next.run(request).await),
        _ => Err(AuthError::BadToken),
    }
}

/// Authentication error types for HTTP responses
#[derive(Debug)]
pub enum AuthError {
    BadCredentials,
    BadToken,
}

impl IntoResponse for AuthError {
    fn into_response(self) -> Response {
        let message = match self {
            AuthError::BadCredentials => "Invalid username or password",
            AuthError::BadToken => "Missing or invalid authorization token",
        };

        let body = Json(json!({
            "error": message,
        }));

        (StatusCode::UNAUTHORIZED, body).into_response()
    }
}
