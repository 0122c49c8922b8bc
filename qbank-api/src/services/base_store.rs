//! Local base dataset storage
//!
//! The base dataset is a JSON array of question-shaped objects,
//! authoritative when the remote feed is unavailable. A missing or
//! malformed file surfaces as `Error::LocalRead`, which the cache
//! controller treats as "empty base", not as fatal.

use qbank_common::model::Question;
use qbank_common::{Error, Result};
use std::path::PathBuf;

use super::question_cache::BaseStore;

/// File-backed base dataset store
pub struct JsonBaseStore {
    path: PathBuf,
}

impl JsonBaseStore {
    pub fn new(path: PathBuf) -> Self {
        Self { path }
    }
}

impl BaseStore for JsonBaseStore {
    fn load(&self) -> Result<Vec<Question>> {
        let bytes = std::fs::read(&self.path).map_err(|e| {
            Error::LocalRead(format!("Failed to read {}: {}", self.path.display(), e))
        })?;
        serde_json::from_slice(&bytes).map_err(|e| {
            Error::LocalRead(format!("Failed to parse {}: {}", self.path.display(), e))
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn loads_question_array() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("questions.json");
        std::fs::write(
            &path,
            r#"[{"id":"q1","year":2020,"question_text":"First?","tags":["History"]}]"#,
        )
        .unwrap();

        let questions = JsonBaseStore::new(path).load().unwrap();
        assert_eq!(questions.len(), 1);
        assert_eq!(questions[0].id, "q1");
        assert_eq!(questions[0].year, 2020);
        // Missing fields degrade to zero values
        assert_eq!(questions[0].options.a, "");
    }

    #[test]
    fn missing_file_is_a_local_read_error() {
        let dir = tempfile::tempdir().unwrap();
        let store = JsonBaseStore::new(dir.path().join("nope.json"));
        assert!(matches!(store.load(), Err(Error::LocalRead(_))));
    }

    #[test]
    fn malformed_json_is_a_local_read_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("questions.json");
        std::fs::write(&path, "{not json").unwrap();
        assert!(matches!(
            JsonBaseStore::new(path).load(),
            Err(Error::LocalRead(_))
        ));
    }
}
