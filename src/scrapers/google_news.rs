//! Google News RSS search fetcher.
//!
//! One GET per keyword against the search feed, with a browser-like
//! `User-Agent` and a fixed timeout. Failures never propagate: they come
//! back as [`FetchOutcome::Failed`] with a [`SkipReason`] the driver records.
//!
//! # URL Pattern
//!
//! `https://news.google.com/rss/search?q=<keyword>&hl=ko&gl=KR&ceid=KR:ko`

use reqwest::Client;
use std::time::Duration;
use tracing::{debug, info, instrument, warn};

use super::rss::{RawEntry, parse_feed};
use crate::error::NewsError;
use crate::models::SkipReason;

pub const DEFAULT_FEED_URL: &str = "https://news.google.com/rss/search";

/// Browser identity sent with feed requests; the feed throttles obvious bots.
pub const USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/124.0 Safari/537.36";

pub const FEED_TIMEOUT: Duration = Duration::from_secs(10);

/// Result of fetching one keyword.
#[derive(Debug)]
pub enum FetchOutcome {
    Fetched(Vec<RawEntry>),
    Failed(SkipReason),
}

/// Client for the search feed, parameterized by UI language and country.
#[derive(Debug, Clone)]
pub struct GoogleNewsFeed {
    client: Client,
    base_url: String,
    language: String,
    country: String,
}

impl GoogleNewsFeed {
    /// Build a feed client.
    ///
    /// # Errors
    ///
    /// Returns [`NewsError::Http`] if the HTTP client cannot be constructed.
    pub fn new(base_url: &str, language: &str, country: &str) -> Result<Self, NewsError> {
        let client = Client::builder()
            .user_agent(USER_AGENT)
            .timeout(FEED_TIMEOUT)
            .build()?;
        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            language: language.to_string(),
            country: country.to_string(),
        })
    }

    /// Search URL for `keyword`.
    pub fn search_url(&self, keyword: &str) -> String {
        format!(
            "{}?q={}&hl={}&gl={}&ceid={}:{}",
            self.base_url,
            urlencoding::encode(keyword),
            self.language,
            self.country,
            self.country,
            self.language
        )
    }

    /// Fetch up to `max` raw entries for `keyword`. Single attempt, no retry.
    #[instrument(level = "info", skip(self))]
    pub async fn fetch(&self, keyword: &str, max: usize) -> FetchOutcome {
        let url = self.search_url(keyword);
        match self.fetch_entries(&url, max).await {
            Ok(entries) => {
                info!(count = entries.len(), "Fetched feed entries");
                FetchOutcome::Fetched(entries)
            }
            Err(e) => {
                warn!(%url, error = %e, "Feed fetch failed; skipping keyword");
                FetchOutcome::Failed(skip_reason(e))
            }
        }
    }

    async fn fetch_entries(&self, url: &str, max: usize) -> Result<Vec<RawEntry>, NewsError> {
        let response = self.client.get(url).send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(NewsError::Status {
                status: status.as_u16(),
                url: url.to_string(),
            });
        }
        let body = response.text().await?;
        debug!(bytes = body.len(), "Downloaded feed body");
        parse_feed(&body, max)
    }
}

fn skip_reason(err: NewsError) -> SkipReason {
    match err {
        NewsError::Status { status, .. } => SkipReason::Status(status),
        NewsError::Feed(e) => SkipReason::Feed(e.to_string()),
        other => SkipReason::Request(other.to_string()),
    }
}
