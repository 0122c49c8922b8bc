//! Read endpoints over the question dataset

use axum::{
    extract::{Path, Query, State},
    Json,
};
use qbank_common::model::Question;
use serde::Deserialize;

use crate::services::queries::{self, YearEntry};
use crate::AppState;

use super::ApiError;

/// Query parameters for the year endpoint
#[derive(Debug, Deserialize)]
pub struct YearQuery {
    /// Comma-separated tag filter terms (substring match)
    pub tags: Option<String>,
}

/// GET /api/years
///
/// Distinct non-zero quiz years, descending.
pub async fn list_years(
    State(state): State<AppState>,
) -> Result<Json<Vec<YearEntry>>, ApiError> {
    let dataset = state.cache.get_questions(false).await?;
    Ok(Json(queries::list_years(&dataset)))
}

/// GET /api/questions/:year?tags=a,b
///
/// Questions for one year, optionally narrowed by tag substring
/// filter terms.
pub async fn questions_for_year(
    State(state): State<AppState>,
    Path(year): Path<String>,
    Query(query): Query<YearQuery>,
) -> Result<Json<Vec<Question>>, ApiError> {
    let year: u32 = year
        .parse()
        .map_err(|_| ApiError::BadRequest(format!("Invalid year: {}", year)))?;

    let dataset = state.cache.get_questions(false).await?;
    Ok(Json(queries::questions_for_year(
        &dataset,
        year,
        query.tags.as_deref(),
    )))
}

/// GET /api/tags/:tag
///
/// Questions carrying the tag (case-insensitive exact match).
pub async fn questions_for_tag(
    State(state): State<AppState>,
    Path(tag): Path<String>,
) -> Result<Json<Vec<Question>>, ApiError> {
    let dataset = state.cache.get_questions(false).await?;
    Ok(Json(queries::questions_for_tag(&dataset, &tag)))
}
