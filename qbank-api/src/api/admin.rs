//! Admin endpoints
//!
//! Visit statistics plus the legacy write endpoints, which are kept
//! routable but always answer with a fixed read-only notice: the
//! question data is managed in the source spreadsheet now.

use axum::{extract::State, http::StatusCode, Json};
use serde_json::{json, Value};

use crate::services::VisitCounters;
use crate::AppState;

/// Fixed notice returned by all legacy write endpoints
pub const READ_ONLY_NOTICE: &str =
    "This API is read-only; questions are managed in the source spreadsheet";

/// GET /api/admin/stats
///
/// Current visit counters.
pub async fn visit_stats(State(state): State<AppState>) -> Json<VisitCounters> {
    Json(state.visits.snapshot())
}

/// Legacy write endpoints (create/update/delete question)
///
/// Always 400 with the fixed read-only notice.
pub async fn read_only_notice() -> (StatusCode, Json<Value>) {
    (
        StatusCode::BAD_REQUEST,
        Json(json!({
            "error": READ_ONLY_NOTICE,
        })),
    )
}
