//! Visit counter persistence
//!
//! Tracks page visits and distinct sessions in a small JSON file.
//! Read and incremented by the HTTP layer only; the data pipeline
//! never touches it. Persistence is best-effort: a write failure is
//! logged and the in-memory counters keep counting.

use chrono::Utc;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::sync::Mutex;
use tracing::warn;

/// Persisted counter shape
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VisitCounters {
    pub total: u64,
    pub sessions: u64,
    #[serde(rename = "lastReset")]
    pub last_reset: String,
}

impl VisitCounters {
    fn fresh() -> Self {
        Self {
            total: 0,
            sessions: 0,
            last_reset: Utc::now().to_rfc3339(),
        }
    }
}

/// File-backed visit log
pub struct VisitLog {
    path: PathBuf,
    counters: Mutex<VisitCounters>,
}

impl VisitLog {
    /// Open the visit log, starting from the persisted counters when
    /// the file exists and parses, and from zero otherwise.
    pub fn open(path: PathBuf) -> Self {
        let counters = match std::fs::read(&path) {
            Ok(bytes) => serde_json::from_slice(&bytes).unwrap_or_else(|e| {
                warn!("Malformed visit log {}, resetting: {}", path.display(), e);
                VisitCounters::fresh()
            }),
            Err(_) => VisitCounters::fresh(),
        };

        Self {
            path,
            counters: Mutex::new(counters),
        }
    }

    /// Record one visit, counting a new session when the request
    /// carried no session cookie.
    pub fn record_visit(&self, new_session: bool) {
        let snapshot = {
            let mut counters = self
                .counters
                .lock()
                .unwrap_or_else(|poisoned| poisoned.into_inner());
            counters.total += 1;
            if new_session {
                counters.sessions += 1;
            }
            counters.clone()
        };
        self.persist(&snapshot);
    }

    /// Current counters for the stats endpoint
    pub fn snapshot(&self) -> VisitCounters {
        self.counters
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .clone()
    }

    fn persist(&self, counters: &VisitCounters) {
        if let Some(parent) = self.path.parent() {
            let _ = std::fs::create_dir_all(parent);
        }
        let json = match serde_json::to_vec_pretty(counters) {
            Ok(json) => json,
            Err(e) => {
                warn!("Failed to serialize visit counters: {}", e);
                return;
            }
        };
        if let Err(e) = std::fs::write(&self.path, json) {
            warn!("Failed to persist visit log {}: {}", self.path.display(), e);
        }
    }
}
