//! Manual cache invalidation endpoint

use axum::{extract::State, Json};
use serde::Serialize;

use crate::AppState;

use super::ApiError;

/// Refresh outcome
#[derive(Debug, Serialize)]
pub struct RefreshResponse {
    pub success: bool,
    pub count: usize,
    pub message: String,
}

/// POST /api/refresh
///
/// Forces a refresh regardless of cache age. Fails with 500 only
/// when no data is available by any path (fetch, base, stale cache).
pub async fn refresh_questions(
    State(state): State<AppState>,
) -> Result<Json<RefreshResponse>, ApiError> {
    let dataset = state.cache.get_questions(true).await?;
    let count = dataset.len();

    Ok(Json(RefreshResponse {
        success: true,
        count,
        message: format!("Question data refreshed ({} questions)", count),
    }))
}
