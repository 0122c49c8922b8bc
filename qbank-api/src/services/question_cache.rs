//! Cache/refresh controller for question data
//!
//! Owns the single cached dataset slot shared across all requests and
//! decides when to re-fetch the remote feed. The feed, base store,
//! and clock are injected behind traits so the refresh logic is
//! testable without real network, file, or time dependencies.
//!
//! The slot lives behind a `tokio::sync::Mutex`, which also gives
//! single-flight refreshes: concurrent cache misses queue behind one
//! refresh and then observe the fresh cache.

use async_trait::async_trait;
use qbank_common::model::{Dataset, Question};
use qbank_common::Result;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::sync::Mutex;
use tracing::{error, info, warn};

use super::{merge, normalizer};

/// Remote question feed returning a raw CSV body
#[async_trait]
pub trait QuestionFeed: Send + Sync {
    async fn fetch(&self) -> Result<String>;
}

/// Locally persisted base dataset
pub trait BaseStore: Send + Sync {
    fn load(&self) -> Result<Vec<Question>>;
}

/// Time source for TTL checks
pub trait Clock: Send + Sync {
    fn now(&self) -> Instant;
}

/// Wall-clock production time source
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> Instant {
        Instant::now()
    }
}

#[derive(Default)]
struct CacheSlot {
    data: Option<Dataset>,
    fetched_at: Option<Instant>,
}

/// TTL cache over the merged question dataset
pub struct QuestionCache {
    feed: Arc<dyn QuestionFeed>,
    base: Arc<dyn BaseStore>,
    clock: Arc<dyn Clock>,
    ttl: Duration,
    slot: Mutex<CacheSlot>,
}

impl QuestionCache {
    pub fn new(
        feed: Arc<dyn QuestionFeed>,
        base: Arc<dyn BaseStore>,
        clock: Arc<dyn Clock>,
        ttl: Duration,
    ) -> Self {
        Self {
            feed,
            base,
            clock,
            ttl,
            slot: Mutex::new(CacheSlot::default()),
        }
    }

    /// Return the current dataset, refreshing it when forced or when
    /// the cache is empty or older than the TTL.
    ///
    /// Fails only when no usable data exists by any path: fresh
    /// fetch, base data, or a prior stale cache.
    pub async fn get_questions(&self, force_refresh: bool) -> Result<Dataset> {
        let mut slot = self.slot.lock().await;

        if !force_refresh {
            if let (Some(data), Some(at)) = (slot.data.as_ref(), slot.fetched_at) {
                if self.clock.now().duration_since(at) < self.ttl {
                    return Ok(data.clone());
                }
            }
        }

        // Base load is best-effort: a missing or malformed file means
        // merging against an empty base, not a fatal error.
        let (base, base_loaded) = match self.base.load() {
            Ok(questions) => (Dataset::from_questions(questions), true),
            Err(e) => {
                warn!("Base dataset unavailable, merging against empty base: {}", e);
                (Dataset::default(), false)
            }
        };

        match self.fetch_and_merge(&base).await {
            Ok(merged) => {
                info!("Refreshed question data ({} questions)", merged.len());
                slot.data = Some(merged.clone());
                slot.fetched_at = Some(self.clock.now());
                Ok(merged)
            }
            Err(e) => {
                error!("Question feed refresh failed: {}", e);
                if base_loaded {
                    // Commit base with a fresh timestamp so an
                    // unreachable remote is not retried on every request
                    slot.data = Some(base.clone());
                    slot.fetched_at = Some(self.clock.now());
                    Ok(base)
                } else if let Some(stale) = slot.data.as_ref() {
                    // Keep the old timestamp: the next access retries
                    warn!("Serving stale cached question data");
                    Ok(stale.clone())
                } else {
                    Err(e)
                }
            }
        }
    }

    async fn fetch_and_merge(&self, base: &Dataset) -> Result<Dataset> {
        let body = self.feed.fetch().await?;
        let updates = normalizer::parse_feed(&body)?;
        Ok(merge::merge(base, updates))
    }
}
