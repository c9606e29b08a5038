//! Data models for the news pipeline.
//!
//! This module defines the values that flow between pipeline stages:
//! - [`NewsItem`]: an enriched, publishable news record
//! - [`Skip`] / [`SkipReason`]: why a keyword fetch or a feed entry was dropped
//! - [`Collection`]: the accumulator threaded from collection to ranking
//!
//! Field order on [`NewsItem`] matches the object layout the page script
//! expects inside `NEWS_DATA`.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Maximum number of keyword tags carried by a [`NewsItem`].
pub const MAX_KEYWORDS: usize = 3;

/// A single news record as published in the page's `NEWS_DATA` block.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct NewsItem {
    /// 1-based position in the published list. Zero until ranking is done.
    pub id: u32,
    /// The article headline.
    pub title: String,
    /// The outlet that published the article.
    pub source: String,
    /// A taxonomy label such as `llm` or `research`.
    pub category: String,
    /// Collection date in `YYYY-MM-DD` format.
    pub date: String,
    /// Relative age at collection time, e.g. `3시간 전`.
    pub time: String,
    /// Importance score in `[7.0, 9.5]`.
    pub importance: f64,
    /// Plain-text summary, at most 200 characters plus an ellipsis.
    pub description: String,
    /// Link to the original article.
    pub link: String,
    /// Up to [`MAX_KEYWORDS`] tags.
    pub keywords: Vec<String>,
}

/// Why a unit of work was skipped instead of producing items.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SkipReason {
    /// The request never produced a response (DNS, connect, timeout, body read).
    Request(String),
    /// The feed answered with a non-success status code.
    Status(u16),
    /// The response body was not a readable RSS document.
    Feed(String),
    /// The entry had no usable title.
    MissingTitle,
}

impl fmt::Display for SkipReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SkipReason::Request(e) => write!(f, "request failed: {e}"),
            SkipReason::Status(code) => write!(f, "feed returned HTTP {code}"),
            SkipReason::Feed(e) => write!(f, "unreadable feed: {e}"),
            SkipReason::MissingTitle => f.write_str("entry has no title"),
        }
    }
}

/// A skipped keyword fetch or feed entry, kept so runs can be audited.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Skip {
    /// The search keyword being processed when the skip happened.
    pub keyword: String,
    /// Link of the skipped entry, `None` when the whole keyword was skipped.
    pub link: Option<String>,
    pub reason: SkipReason,
}

/// Items gathered across all keywords, in arrival order, plus what was skipped.
#[derive(Debug, Default)]
pub struct Collection {
    pub items: Vec<NewsItem>,
    pub skipped: Vec<Skip>,
}

impl Collection {
    pub fn push_item(&mut self, item: NewsItem) {
        self.items.push(item);
    }

    pub fn push_skip(&mut self, keyword: &str, link: Option<String>, reason: SkipReason) {
        self.skipped.push(Skip {
            keyword: keyword.to_string(),
            link,
            reason,
        });
    }
}
