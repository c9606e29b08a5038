//! RSS document decoding and per-entry normalization.
//!
//! The feed body is deserialized with `quick-xml`'s serde support into
//! [`RawEntry`] values, which keep whatever the feed provided. [`parse_entry`]
//! then turns one raw entry into a [`ParsedEntry`] with defaults filled in,
//! markup removed and the publish date rendered as a relative age.

use chrono::{DateTime, Utc};
use serde::Deserialize;

use crate::error::NewsError;
use crate::models::SkipReason;
use crate::utils::{relative_age, strip_markup, truncate_with_ellipsis};

/// Maximum description length in characters, before the ellipsis.
pub const DESCRIPTION_LIMIT: usize = 200;

/// Source label used when an entry names no outlet.
pub const UNKNOWN_SOURCE: &str = "News";

#[derive(Debug, Deserialize)]
struct Rss {
    channel: Channel,
}

#[derive(Debug, Deserialize)]
struct Channel {
    #[serde(rename = "item", default)]
    items: Vec<RawEntry>,
}

/// The `<source url="...">Outlet</source>` element of an item. Only the
/// outlet name is kept.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawSource {
    #[serde(rename = "$text", default)]
    pub name: String,
}

/// One `<item>` exactly as the feed delivered it.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawEntry {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub link: Option<String>,
    #[serde(rename = "pubDate", default)]
    pub pub_date: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub source: Option<RawSource>,
}

/// A feed entry after normalization.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedEntry {
    pub title: String,
    pub link: String,
    /// The publish date string as delivered, possibly empty.
    pub published: String,
    /// Plain-text description, at most [`DESCRIPTION_LIMIT`] chars plus an ellipsis.
    pub description: String,
    pub source: String,
    /// Relative age of `published` at parse time.
    pub age: String,
}

/// Decode an RSS document into its items, keeping at most `max`.
///
/// # Errors
///
/// Returns [`NewsError::Feed`] if the body is not an RSS document.
pub fn parse_feed(xml: &str, max: usize) -> Result<Vec<RawEntry>, NewsError> {
    let rss: Rss = quick_xml::de::from_str(xml)?;
    let mut items = rss.channel.items;
    items.truncate(max);
    Ok(items)
}

/// Normalize one raw entry.
///
/// # Errors
///
/// Returns [`SkipReason::MissingTitle`] when the title is absent or blank.
pub fn parse_entry(raw: &RawEntry, now: DateTime<Utc>) -> Result<ParsedEntry, SkipReason> {
    let title = raw.title.as_deref().map(str::trim).unwrap_or_default();
    if title.is_empty() {
        return Err(SkipReason::MissingTitle);
    }

    let source = raw
        .source
        .as_ref()
        .map(|s| s.name.trim())
        .filter(|s| !s.is_empty())
        .unwrap_or(UNKNOWN_SOURCE);

    let published = raw.pub_date.as_deref().unwrap_or_default().trim().to_string();
    let description = raw
        .description
        .as_deref()
        .map(strip_markup)
        .map(|d| truncate_with_ellipsis(&d, DESCRIPTION_LIMIT))
        .unwrap_or_default();

    Ok(ParsedEntry {
        title: title.to_string(),
        link: raw.link.as_deref().unwrap_or_default().trim().to_string(),
        age: relative_age(&published, now),
        published,
        description,
        source: source.to_string(),
    })
}
