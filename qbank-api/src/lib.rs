//! qbank-api library - HTTP service over the quiz question pipeline
//!
//! The data pipeline (fetch, normalize, merge, cache) lives under
//! `services`; the HTTP surface under `api` is thin plumbing that
//! calls into it.

use axum::Router;
use std::sync::Arc;

pub mod api;
pub mod services;

use services::{QuestionCache, VisitLog};

/// Application state shared across HTTP handlers
#[derive(Clone)]
pub struct AppState {
    /// TTL cache over the merged question dataset
    pub cache: Arc<QuestionCache>,
    /// Visit counters, incremented by the UI routes only
    pub visits: Arc<VisitLog>,
    /// Configured admin account
    pub admin_username: String,
    /// Empty password disables admin login
    pub admin_password: String,
}

impl AppState {
    pub fn new(
        cache: Arc<QuestionCache>,
        visits: Arc<VisitLog>,
        admin_username: String,
        admin_password: String,
    ) -> Self {
        Self {
            cache,
            visits,
            admin_username,
            admin_password,
        }
    }
}

/// Build application router
pub fn build_router(state: AppState) -> Router {
    use axum::middleware;
    use axum::routing::{get, post, put};
    use tower_http::cors::CorsLayer;
    use tower_http::trace::TraceLayer;

    // Admin routes (require the admin token)
    let admin = Router::new()
        .route("/api/admin/stats", get(api::admin::visit_stats))
        .route("/api/admin/questions", post(api::admin::read_only_notice))
        .route(
            "/api/admin/questions/:id",
            put(api::admin::read_only_notice).delete(api::admin::read_only_notice),
        )
        .layer(middleware::from_fn_with_state(
            state.clone(),
            api::admin_middleware,
        ));

    // Public API routes
    let public = Router::new()
        .route("/api/refresh", post(api::refresh::refresh_questions))
        .route("/api/years", get(api::questions::list_years))
        .route("/api/questions/:year", get(api::questions::questions_for_year))
        .route("/api/tags/:tag", get(api::questions::questions_for_tag))
        .route("/api/admin/login", post(api::admin_login))
        .merge(api::health_routes());

    // UI routes with visit counting
    let ui = Router::new()
        .route("/", get(api::ui::serve_index))
        .layer(middleware::from_fn_with_state(
            state.clone(),
            api::ui::visit_middleware,
        ));

    Router::new()
        .merge(admin)
        .merge(public)
        .merge(ui)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}
