//! News feed scrapers.
//!
//! Collection follows a two-step pattern:
//!
//! 1. **Fetching**: [`google_news`] downloads the RSS search feed for one
//!    keyword and decodes its `<item>` elements
//! 2. **Parsing**: [`rss::parse_entry`] normalizes each raw entry
//!
//! # Supported Sources
//!
//! | Source | Module | Method | Notes |
//! |--------|--------|--------|-------|
//! | Google News | [`google_news`] | RSS search | Keyword query, localized with `hl`/`gl`/`ceid` |
//!
//! Failed fetches are reported as [`google_news::FetchOutcome::Failed`] and
//! skipped; they never abort the run.

pub mod google_news;
pub mod rss;

pub use google_news::{FetchOutcome, GoogleNewsFeed};
pub use rss::{ParsedEntry, parse_entry};
