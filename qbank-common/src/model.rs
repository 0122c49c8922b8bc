//! Canonical question records and the in-memory dataset
//!
//! A `Question` is the normalized record shape served by the API.
//! A `RowUpdate` is one incoming feed row with explicit per-field
//! presence: a field the row did not supply is `None`, never an empty
//! string, so the merge engine can distinguish "not supplied" from
//! "legitimately empty".

use serde::{Deserialize, Serialize};

/// The four fixed answer options of a question.
///
/// All four keys are always present; an unset option is an empty
/// string, never a missing key.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnswerOptions {
    #[serde(rename = "A", default)]
    pub a: String,
    #[serde(rename = "B", default)]
    pub b: String,
    #[serde(rename = "C", default)]
    pub c: String,
    #[serde(rename = "D", default)]
    pub d: String,
}

/// One canonical quiz question.
///
/// Deserialization is tolerant of missing fields so a hand-edited
/// base file degrades to zero values instead of failing to load.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Question {
    /// Identity key; questions with an empty id cannot participate in merge
    #[serde(default, alias = "_id")]
    pub id: String,
    /// Quiz year; 0 means unknown and is excluded from year listings
    #[serde(default)]
    pub year: u32,
    #[serde(default)]
    pub question_text: String,
    #[serde(default)]
    pub options: AnswerOptions,
    /// Normalized to trimmed uppercase
    #[serde(default)]
    pub correct_answer: String,
    #[serde(default)]
    pub explanation: String,
    /// Ordered, non-empty, trimmed; case-sensitive storage
    #[serde(default)]
    pub tags: Vec<String>,
}

/// Per-option incoming values for one feed row.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AnswerOptionsUpdate {
    pub a: Option<String>,
    pub b: Option<String>,
    pub c: Option<String>,
    pub d: Option<String>,
}

/// One normalized feed row with explicit field presence.
///
/// Only the id is required; every other field is `Option` so the
/// merge engine overwrites a base value only when the feed actually
/// supplied one.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RowUpdate {
    pub id: String,
    pub year: Option<u32>,
    pub question_text: Option<String>,
    pub options: AnswerOptionsUpdate,
    pub correct_answer: Option<String>,
    pub explanation: Option<String>,
    pub tags: Option<Vec<String>>,
}

impl RowUpdate {
    /// Materialize a brand-new question from this row, with zero
    /// values for every field the row did not supply.
    pub fn into_question(self) -> Question {
        Question {
            id: self.id,
            year: self.year.unwrap_or(0),
            question_text: self.question_text.unwrap_or_default(),
            options: AnswerOptions {
                a: self.options.a.unwrap_or_default(),
                b: self.options.b.unwrap_or_default(),
                c: self.options.c.unwrap_or_default(),
                d: self.options.d.unwrap_or_default(),
            },
            correct_answer: self.correct_answer.unwrap_or_default(),
            explanation: self.explanation.unwrap_or_default(),
            tags: self.tags.unwrap_or_default(),
        }
    }
}

/// The full collection of questions, unique by id, in deterministic
/// order (base order first, then newly merged entries).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Dataset {
    questions: Vec<Question>,
}

impl Dataset {
    /// Build a dataset from a list of questions.
    ///
    /// Entries with an empty id are skipped; on duplicate ids the
    /// first entry wins (base data is assumed already clean, this
    /// just enforces the uniqueness invariant).
    pub fn from_questions(questions: Vec<Question>) -> Self {
        let mut seen = std::collections::HashSet::new();
        let questions = questions
            .into_iter()
            .filter(|q| !q.id.is_empty() && seen.insert(q.id.clone()))
            .collect();
        Self { questions }
    }

    pub fn questions(&self) -> &[Question] {
        &self.questions
    }

    pub fn into_questions(self) -> Vec<Question> {
        self.questions
    }

    pub fn len(&self) -> usize {
        self.questions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.questions.is_empty()
    }
}
