//! Read queries over the merged dataset
//!
//! Pure filters; all read endpoints go through these. Note the
//! intentional asymmetry between the year endpoint's tag filter
//! (case-insensitive substring) and the tag endpoint (case-insensitive
//! exact match).

use qbank_common::model::{Dataset, Question};
use serde::Serialize;

/// One entry of the year listing
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct YearEntry {
    #[serde(rename = "_id")]
    pub id: String,
    /// Serialized as a string for API consumers
    pub year: String,
    pub description: String,
}

/// Distinct non-zero years, strictly descending
pub fn list_years(dataset: &Dataset) -> Vec<YearEntry> {
    let mut years: Vec<u32> = dataset
        .questions()
        .iter()
        .map(|q| q.year)
        .filter(|year| *year != 0)
        .collect();
    years.sort_unstable_by(|a, b| b.cmp(a));
    years.dedup();

    years
        .into_iter()
        .map(|year| YearEntry {
            id: year.to_string(),
            year: year.to_string(),
            description: format!("Quiz Year {}", year),
        })
        .collect()
}

/// Questions for an exact year, optionally narrowed by a
/// comma-separated tag filter.
///
/// A question survives the filter when any of its tags contains any
/// filter term as a case-insensitive substring.
pub fn questions_for_year(
    dataset: &Dataset,
    year: u32,
    tag_filter: Option<&str>,
) -> Vec<Question> {
    let terms: Vec<String> = tag_filter
        .map(|filter| {
            filter
                .split(',')
                .map(|t| t.trim().to_lowercase())
                .filter(|t| !t.is_empty())
                .collect()
        })
        .unwrap_or_default();

    dataset
        .questions()
        .iter()
        .filter(|q| q.year == year)
        .filter(|q| {
            terms.is_empty()
                || q.tags.iter().any(|tag| {
                    let tag = tag.to_lowercase();
                    terms.iter().any(|term| tag.contains(term.as_str()))
                })
        })
        .cloned()
        .collect()
}

/// Questions carrying the tag, case-insensitive exact match
pub fn questions_for_tag(dataset: &Dataset, tag: &str) -> Vec<Question> {
    let needle = tag.trim().to_lowercase();
    dataset
        .questions()
        .iter()
        .filter(|q| q.tags.iter().any(|t| t.trim().to_lowercase() == needle))
        .cloned()
        .collect()
}
