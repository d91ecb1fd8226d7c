//! Catalog page fetching over blocking HTTP.
//!
//! This module provides [`PageFetcher`], which owns one reusable HTTP
//! client for the duration of a run and retrieves listing pages with a
//! bounded retry budget. Fetching is deliberately synchronous: pages are
//! requested one at a time, in order, and the collector throttles between
//! them.

use std::thread;
use std::time::Duration;

use reqwest::blocking::Client;
use url::Url;

use crate::{Result, VestioError};

/// Root URL of the catalog site. Page 1 lives here, page N at `/pageN`.
pub const BASE_URL: &str = "https://fashion-studio.dicoding.dev/";

/// HTTP client configuration for fetching catalog pages.
#[derive(Debug, Clone)]
pub struct FetchConfig {
    /// Catalog root URL.
    pub base_url: String,
    /// Request timeout in seconds, applied per attempt.
    pub timeout: u64,
    /// Identifying User-Agent sent with every request.
    pub user_agent: String,
    /// Total attempts per page before giving up.
    pub retries: u32,
    /// Backoff unit; attempt N waits `backoff * N` before retrying.
    pub backoff: Duration,
}

impl Default for FetchConfig {
    fn default() -> Self {
        Self {
            base_url: BASE_URL.to_string(),
            timeout: 10,
            user_agent: "Mozilla/5.0 (compatible; ETL-Bot/1.0)".to_string(),
            retries: 3,
            backoff: Duration::from_secs(1),
        }
    }
}

/// Fetches catalog pages with retry and linear backoff.
///
/// One `PageFetcher` holds one connection-pooling client, reused across
/// every page of a run.
pub struct PageFetcher {
    client: Client,
    config: FetchConfig,
}

impl PageFetcher {
    /// Builds a fetcher, validating the base URL and constructing the
    /// underlying HTTP client.
    pub fn new(config: FetchConfig) -> Result<Self> {
        let parsed = Url::parse(&config.base_url).map_err(|e| VestioError::InvalidUrl(e.to_string()))?;
        if !matches!(parsed.scheme(), "http" | "https") {
            return Err(VestioError::InvalidUrl(format!(
                "base URL must be http or https, got {}",
                parsed.scheme()
            )));
        }

        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout))
            .user_agent(&config.user_agent)
            .build()?;

        Ok(Self { client, config })
    }

    /// Builds the URL for a page index: the catalog root for page 1,
    /// `{base}/page{N}` for later pages.
    pub fn page_url(&self, page: u32) -> String {
        let base = self.config.base_url.trim_end_matches('/');
        if page <= 1 { format!("{}/", base) } else { format!("{}/page{}", base, page) }
    }

    /// Fetches one page, returning the raw HTML body.
    ///
    /// Transport failures and non-2xx statuses both count as failed
    /// attempts. Attempt N sleeps `backoff * N` before the next try; once
    /// the budget is exhausted the error carries the URL and last cause.
    /// Fatal for this page only, not for the run.
    pub fn fetch_page(&self, page: u32) -> Result<String> {
        let url = self.page_url(page);
        let mut attempt = 1u32;

        loop {
            match self.get(&url) {
                Ok(body) => return Ok(body),
                Err(source) => {
                    if attempt >= self.config.retries {
                        return Err(VestioError::Fetch { url, attempts: attempt, source });
                    }
                    thread::sleep(self.config.backoff * attempt);
                    attempt += 1;
                }
            }
        }
    }

    fn get(&self, url: &str) -> std::result::Result<String, reqwest::Error> {
        self.client.get(url).send()?.error_for_status()?.text()
    }
}
