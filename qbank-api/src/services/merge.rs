//! Merge engine
//!
//! Reconciles the base dataset with freshly fetched rows by identity
//! key. Merge strategy: incoming values overwrite base values,
//! base values preserved when the incoming field is absent.
//!
//! Pure function over its inputs; no cache, file, or network access.

use qbank_common::model::{Dataset, Question, RowUpdate};
use std::collections::HashMap;

/// Merge incoming feed rows into the base dataset.
///
/// Existing ids are updated field-by-field (fill-in-if-present); new
/// ids are appended as brand-new questions. Result order is base
/// order first, then new entries in incoming order.
pub fn merge(base: &Dataset, incoming: Vec<RowUpdate>) -> Dataset {
    let mut questions: Vec<Question> = base.questions().to_vec();
    let mut index: HashMap<String, usize> = questions
        .iter()
        .enumerate()
        .map(|(i, q)| (q.id.clone(), i))
        .collect();

    for update in incoming {
        if update.id.is_empty() {
            continue;
        }
        match index.get(&update.id) {
            Some(&i) => apply_update(&mut questions[i], &update),
            None => {
                index.insert(update.id.clone(), questions.len());
                questions.push(update.into_question());
            }
        }
    }

    Dataset::from_questions(questions)
}

/// Overwrite each field of an existing question independently, only
/// when the incoming row supplied a value for it
fn apply_update(question: &mut Question, update: &RowUpdate) {
    if let Some(year) = update.year {
        question.year = year;
    }
    if let Some(text) = &update.question_text {
        question.question_text = text.clone();
    }
    if let Some(a) = &update.options.a {
        question.options.a = a.clone();
    }
    if let Some(b) = &update.options.b {
        question.options.b = b.clone();
    }
    if let Some(c) = &update.options.c {
        question.options.c = c.clone();
    }
    if let Some(d) = &update.options.d {
        question.options.d = d.clone();
    }
    if let Some(answer) = &update.correct_answer {
        question.correct_answer = answer.clone();
    }
    if let Some(explanation) = &update.explanation {
        question.explanation = explanation.clone();
    }
    if let Some(tags) = &update.tags {
        question.tags = tags.clone();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use qbank_common::model::{AnswerOptions, AnswerOptionsUpdate};

    fn base_question(id: &str, year: u32) -> Question {
        Question {
            id: id.to_string(),
            year,
            question_text: format!("Question {}", id),
            options: AnswerOptions {
                a: "A1".to_string(),
                b: "B1".to_string(),
                c: "C1".to_string(),
                d: "D1".to_string(),
            },
            correct_answer: "A".to_string(),
            explanation: format!("Explanation {}", id),
            tags: vec!["Base".to_string()],
        }
    }

    fn base_dataset() -> Dataset {
        Dataset::from_questions(vec![base_question("q1", 2019), base_question("q2", 2020)])
    }

    #[test]
    fn merge_with_no_incoming_is_identity() {
        let base = base_dataset();
        assert_eq!(merge(&base, vec![]), base);
    }

    #[test]
    fn absent_fields_preserve_base_values() {
        let base = base_dataset();
        let incoming = vec![RowUpdate {
            id: "q1".to_string(),
            question_text: Some("Updated text".to_string()),
            ..Default::default()
        }];

        let merged = merge(&base, incoming);
        let q1 = &merged.questions()[0];
        assert_eq!(q1.question_text, "Updated text");
        // Everything the row did not supply stays as in base
        assert_eq!(q1.year, 2019);
        assert_eq!(q1.explanation, "Explanation q1");
        assert_eq!(q1.correct_answer, "A");
        assert_eq!(q1.tags, vec!["Base".to_string()]);
        assert_eq!(q1.options.b, "B1");
    }

    #[test]
    fn options_merge_per_letter() {
        let base = base_dataset();
        let incoming = vec![RowUpdate {
            id: "q2".to_string(),
            options: AnswerOptionsUpdate {
                b: Some("B2".to_string()),
                d: Some("D2".to_string()),
                ..Default::default()
            },
            ..Default::default()
        }];

        let merged = merge(&base, incoming);
        let q2 = &merged.questions()[1];
        assert_eq!(q2.options.a, "A1");
        assert_eq!(q2.options.b, "B2");
        assert_eq!(q2.options.c, "C1");
        assert_eq!(q2.options.d, "D2");
    }

    #[test]
    fn new_ids_are_appended_after_base_entries() {
        let base = base_dataset();
        let incoming = vec![
            RowUpdate {
                id: "q9".to_string(),
                year: Some(2021),
                ..Default::default()
            },
            RowUpdate {
                id: "q8".to_string(),
                ..Default::default()
            },
        ];

        let merged = merge(&base, incoming);
        let ids: Vec<&str> = merged.questions().iter().map(|q| q.id.as_str()).collect();
        assert_eq!(ids, vec!["q1", "q2", "q9", "q8"]);
        // New entry materialized with zero values for absent fields
        let q8 = &merged.questions()[3];
        assert_eq!(q8.year, 0);
        assert_eq!(q8.question_text, "");
    }

    #[test]
    fn no_base_entries_are_lost() {
        let base = base_dataset();
        let incoming = vec![
            RowUpdate {
                id: "q1".to_string(),
                year: Some(2022),
                ..Default::default()
            },
            RowUpdate {
                id: "q3".to_string(),
                ..Default::default()
            },
        ];

        let merged = merge(&base, incoming);
        assert_eq!(merged.len(), 3);
        assert_eq!(merged.questions()[0].year, 2022);
        assert_eq!(merged.questions()[1], base.questions()[1]);
    }

    #[test]
    fn incoming_rows_without_id_are_skipped() {
        let base = base_dataset();
        let incoming = vec![RowUpdate {
            id: String::new(),
            year: Some(2030),
            ..Default::default()
        }];

        assert_eq!(merge(&base, incoming), base);
    }

    #[test]
    fn repeated_incoming_id_updates_the_same_entry() {
        let base = Dataset::default();
        let incoming = vec![
            RowUpdate {
                id: "q1".to_string(),
                question_text: Some("First".to_string()),
                ..Default::default()
            },
            RowUpdate {
                id: "q1".to_string(),
                explanation: Some("Added later".to_string()),
                ..Default::default()
            },
        ];

        let merged = merge(&base, incoming);
        assert_eq!(merged.len(), 1);
        let q1 = &merged.questions()[0];
        assert_eq!(q1.question_text, "First");
        assert_eq!(q1.explanation, "Added later");
    }
}
