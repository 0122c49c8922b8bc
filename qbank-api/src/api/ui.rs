//! UI serving and visit counting
//!
//! Serves the embedded landing page and counts visits on it. A
//! request without the session cookie counts as a new session and
//! gets the cookie set on the response.

use axum::{
    extract::{Request, State},
    http::{header, HeaderValue},
    middleware::Next,
    response::{Html, Response},
};

use crate::AppState;

const INDEX_HTML: &str = include_str!("../ui/index.html");

const SESSION_COOKIE: &str = "qbank_session";

/// GET /
///
/// Serves the landing page
pub async fn serve_index() -> Html<&'static str> {
    Html(INDEX_HTML)
}

/// Visit counting middleware for the UI routes
pub async fn visit_middleware(
    State(state): State<AppState>,
    request: Request,
    next: Next,
) -> Response {
    let has_session = request
        .headers()
        .get(header::COOKIE)
        .and_then(|v| v.to_str().ok())
        .map(|cookies| cookies.contains(SESSION_COOKIE))
        .unwrap_or(false);

    state.visits.record_visit(!has_session);

    let mut response = next.run(request).await;
    if !has_session {
        response.headers_mut().insert(
            header::SET_COOKIE,
            HeaderValue::from_static("qbank_session=1; Path=/"),
        );
    }
    response
}
