//! Remote spreadsheet feed client
//!
//! Fetches the published spreadsheet as CSV over HTTP. Transport
//! errors and non-2xx responses surface as `Error::Fetch`; the
//! cache controller decides how to fall back.

use async_trait::async_trait;
use qbank_common::{Error, Result};
use std::time::Duration;

use super::question_cache::QuestionFeed;

const USER_AGENT: &str = concat!("qbank-api/", env!("CARGO_PKG_VERSION"));
const FETCH_TIMEOUT: Duration = Duration::from_secs(30);

/// HTTP client for the published question sheet
pub struct SheetFeed {
    http_client: reqwest::Client,
    url: String,
}

impl SheetFeed {
    /// Create a feed client for the given CSV URL. An empty URL is
    /// allowed and makes every fetch fail, leaving the service to
    /// run from base data alone.
    pub fn new(url: String) -> Result<Self> {
        let http_client = reqwest::Client::builder()
            .user_agent(USER_AGENT)
            .timeout(FETCH_TIMEOUT)
            .build()
            .map_err(|e| Error::Config(format!("Failed to build HTTP client: {}", e)))?;

        Ok(Self { http_client, url })
    }
}

#[async_trait]
impl QuestionFeed for SheetFeed {
    async fn fetch(&self) -> Result<String> {
        if self.url.is_empty() {
            return Err(Error::Fetch("No feed URL configured".to_string()));
        }

        tracing::debug!(url = %self.url, "Fetching question feed");

        let response = self
            .http_client
            .get(&self.url)
            .send()
            .await
            .map_err(|e| Error::Fetch(format!("Feed request failed: {}", e)))?;

        let status = response.status();
        if !status.is_success() {
            return Err(Error::Fetch(format!("Feed returned HTTP {}", status)));
        }

        response
            .text()
            .await
            .map_err(|e| Error::Fetch(format!("Failed to read feed body: {}", e)))
    }
}
