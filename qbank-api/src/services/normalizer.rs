//! Feed row normalization
//!
//! Converts raw CSV rows into canonical `RowUpdate` records. Header
//! matching is driven by a declarative alias table and is tolerant of
//! casing, stray whitespace, and dropped underscores. A malformed
//! field degrades to "absent", never to an error: normalization of a
//! row cannot fail, only produce fewer fields.

use csv::StringRecord;
use qbank_common::model::{AnswerOptionsUpdate, RowUpdate};
use qbank_common::{Error, Result};
use std::collections::HashMap;
use tracing::warn;

/// Accepted header aliases per canonical field. Matching is done on
/// lowercased, trimmed header names; first match wins.
const ID_ALIASES: &[&str] = &["id", "_id"];
const YEAR_ALIASES: &[&str] = &["year", "quiz_year", "quizyear"];
const QUESTION_TEXT_ALIASES: &[&str] = &["question_text", "questiontext", "question"];
const OPTION_A_ALIASES: &[&str] = &["option_a", "optiona", "a"];
const OPTION_B_ALIASES: &[&str] = &["option_b", "optionb", "b"];
const OPTION_C_ALIASES: &[&str] = &["option_c", "optionc", "c"];
const OPTION_D_ALIASES: &[&str] = &["option_d", "optiond", "d"];
const CORRECT_ANSWER_ALIASES: &[&str] = &["correct_answer", "correctanswer", "answer"];
const EXPLANATION_ALIASES: &[&str] = &["explanation"];
const TAGS_ALIASES: &[&str] = &["tags", "tag"];

/// Parse a full CSV feed body into normalized row updates.
///
/// Rows whose id does not resolve to a non-empty string are dropped.
/// Individual unreadable rows are skipped with a warning; only an
/// unreadable header row fails the whole feed.
pub fn parse_feed(body: &str) -> Result<Vec<RowUpdate>> {
    let mut reader = csv::ReaderBuilder::new()
        .flexible(true)
        .has_headers(true)
        .from_reader(body.as_bytes());

    let headers = reader
        .headers()
        .map_err(|e| Error::Parse(format!("Failed to read feed header row: {}", e)))?
        .clone();

    let mut updates = Vec::new();
    for (idx, result) in reader.records().enumerate() {
        match result {
            Ok(record) => {
                if let Some(update) = normalize_row(&headers, &record) {
                    updates.push(update);
                }
            }
            Err(e) => {
                // Header row is line 1
                warn!("Skipping unreadable feed row {}: {}", idx + 2, e);
            }
        }
    }

    Ok(updates)
}

/// Normalize one raw row into a `RowUpdate`.
///
/// Returns `None` when the row has no resolvable id.
pub fn normalize_row(headers: &StringRecord, record: &StringRecord) -> Option<RowUpdate> {
    let row: HashMap<String, &str> = headers
        .iter()
        .zip(record.iter())
        .map(|(key, value)| (key.trim().to_lowercase(), value))
        .collect();

    let id = lookup(&row, ID_ALIASES)
        .map(str::trim)
        .filter(|v| !v.is_empty())?
        .to_string();

    Some(RowUpdate {
        id,
        year: lookup(&row, YEAR_ALIASES).and_then(parse_leading_year),
        question_text: text_field(&row, QUESTION_TEXT_ALIASES),
        options: AnswerOptionsUpdate {
            a: text_field(&row, OPTION_A_ALIASES),
            b: text_field(&row, OPTION_B_ALIASES),
            c: text_field(&row, OPTION_C_ALIASES),
            d: text_field(&row, OPTION_D_ALIASES),
        },
        correct_answer: text_field(&row, CORRECT_ANSWER_ALIASES)
            .map(|v| v.to_uppercase()),
        explanation: text_field(&row, EXPLANATION_ALIASES),
        tags: lookup(&row, TAGS_ALIASES).and_then(parse_tags),
    })
}

/// Find the first alias present in the row
fn lookup<'a>(row: &'a HashMap<String, &str>, aliases: &[&str]) -> Option<&'a str> {
    aliases.iter().find_map(|alias| row.get(*alias).copied())
}

/// Trimmed string value; whitespace-only cells count as absent
fn text_field(row: &HashMap<String, &str>, aliases: &[&str]) -> Option<String> {
    lookup(row, aliases)
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(str::to_string)
}

/// Parse the leading integer of a year cell.
///
/// Non-numeric or zero values count as absent (0 means "unknown" in
/// the canonical record, so it never overrides a base year).
fn parse_leading_year(value: &str) -> Option<u32> {
    let digits: String = value
        .trim()
        .chars()
        .take_while(|c| c.is_ascii_digit())
        .collect();
    digits.parse().ok().filter(|y| *y != 0)
}

/// Split a `|`-delimited tag cell, trimming pieces and dropping
/// empties while preserving order
fn parse_tags(value: &str) -> Option<Vec<String>> {
    let tags: Vec<String> = value
        .split('|')
        .map(str::trim)
        .filter(|t| !t.is_empty())
        .map(str::to_string)
        .collect();
    if tags.is_empty() {
        None
    } else {
        Some(tags)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(values: &[&str]) -> StringRecord {
        StringRecord::from(values.to_vec())
    }

    #[test]
    fn normalizes_a_full_row() {
        let headers = record(&[
            "id",
            "year",
            "question_text",
            "option_a",
            "option_b",
            "option_c",
            "option_d",
            "correct_answer",
            "explanation",
            "tags",
        ]);
        let row = record(&[
            "q1",
            "2020",
            "What is H2O?",
            "Water",
            "Salt",
            "Sugar",
            "Sand",
            " b ",
            "Common chemistry shorthand.",
            "Chemistry|General Science",
        ]);

        let update = normalize_row(&headers, &row).unwrap();
        assert_eq!(update.id, "q1");
        assert_eq!(update.year, Some(2020));
        assert_eq!(update.question_text.as_deref(), Some("What is H2O?"));
        assert_eq!(update.options.b.as_deref(), Some("Salt"));
        assert_eq!(update.correct_answer.as_deref(), Some("B"));
        assert_eq!(
            update.tags,
            Some(vec!["Chemistry".to_string(), "General Science".to_string()])
        );
    }

    #[test]
    fn header_matching_tolerates_case_and_spacing() {
        let headers = record(&[" ID ", "QuestionText", "OptionA", "Answer"]);
        let row = record(&["q2", "Pick one", "First", "a"]);

        let update = normalize_row(&headers, &row).unwrap();
        assert_eq!(update.id, "q2");
        assert_eq!(update.question_text.as_deref(), Some("Pick one"));
        assert_eq!(update.options.a.as_deref(), Some("First"));
        assert_eq!(update.correct_answer.as_deref(), Some("A"));
    }

    #[test]
    fn rows_without_id_are_dropped() {
        let headers = record(&["id", "question_text"]);
        assert!(normalize_row(&headers, &record(&["", "orphan"])).is_none());
        assert!(normalize_row(&headers, &record(&["   ", "orphan"])).is_none());

        let headers = record(&["question_text"]);
        assert!(normalize_row(&headers, &record(&["no id column"])).is_none());
    }

    #[test]
    fn year_parses_leading_integer_only() {
        assert_eq!(parse_leading_year("2020"), Some(2020));
        assert_eq!(parse_leading_year(" 2019 "), Some(2019));
        assert_eq!(parse_leading_year("2018/rev2"), Some(2018));
        assert_eq!(parse_leading_year("unknown"), None);
        assert_eq!(parse_leading_year(""), None);
        assert_eq!(parse_leading_year("0"), None);
    }

    #[test]
    fn empty_cells_become_absent_not_empty() {
        let headers = record(&["id", "year", "explanation", "tags"]);
        let row = record(&["q3", "", "  ", " | | "]);

        let update = normalize_row(&headers, &row).unwrap();
        assert_eq!(update.year, None);
        assert_eq!(update.explanation, None);
        assert_eq!(update.tags, None);
    }

    #[test]
    fn tags_preserve_order_and_drop_empty_pieces() {
        assert_eq!(
            parse_tags("Physics| |Optics |Physics"),
            Some(vec![
                "Physics".to_string(),
                "Optics".to_string(),
                "Physics".to_string()
            ])
        );
    }

    #[test]
    fn parse_feed_handles_variant_headers_and_short_rows() {
        let body = "ID,Year,QuestionText,OptionA,OptionB,Answer,Tags\n\
                    q1,2020,First?,yes,no,a,History\n\
                    ,2019,dropped - no id,x,y,b,\n\
                    q2,bad-year,Second?,up,down,B,Maths|Algebra\n";

        let updates = parse_feed(body).unwrap();
        assert_eq!(updates.len(), 2);
        assert_eq!(updates[0].id, "q1");
        assert_eq!(updates[0].year, Some(2020));
        assert_eq!(updates[1].id, "q2");
        assert_eq!(updates[1].year, None);
        assert_eq!(
            updates[1].tags,
            Some(vec!["Maths".to_string(), "Algebra".to_string()])
        );
    }

    #[test]
    fn parse_feed_of_empty_body_yields_no_rows() {
        assert!(parse_feed("").unwrap().is_empty());
    }
}
