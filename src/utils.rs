//! Utility functions for text cleanup, truncation and relative dates.
//!
//! This module provides helper functions used throughout the application:
//! - Markup stripping for feed descriptions
//! - Character-safe truncation for descriptions and log previews
//! - Relative-age strings ("3시간 전") from RFC-2822 publish dates
//! - The collection date stamp

use chrono::{DateTime, Local, Utc};
use scraper::Html;

/// Literal used when a publish date cannot be parsed ("recently").
pub const RECENTLY: &str = "최근";

/// Ellipsis appended to truncated descriptions.
pub const ELLIPSIS: &str = "...";

/// Today's local date as `YYYY-MM-DD`.
pub fn today() -> String {
    Local::now().format("%Y-%m-%d").to_string()
}

/// Truncate a string for logging purposes.
///
/// Long strings are cut to `max` characters and a `"…(+N bytes)"` marker
/// is appended so log lines stay bounded.
///
/// # Examples
///
/// ```ignore
/// assert_eq!(truncate_for_log("short", 100), "short");
/// assert_eq!(truncate_for_log(&"a".repeat(500), 10), "aaaaaaaaaa…(+490 bytes)");
/// ```
pub fn truncate_for_log(s: &str, max: usize) -> String {
    match s.char_indices().nth(max) {
        None => s.to_string(),
        Some((cut, _)) => format!("{}…(+{} bytes)", &s[..cut], s.len() - cut),
    }
}

/// Cut `s` to `max` characters, appending [`ELLIPSIS`] if anything was removed.
pub fn truncate_with_ellipsis(s: &str, max: usize) -> String {
    match s.char_indices().nth(max) {
        None => s.to_string(),
        Some((cut, _)) => format!("{}{}", &s[..cut], ELLIPSIS),
    }
}

/// Remove HTML markup and collapse runs of whitespace.
///
/// Google News descriptions are HTML fragments (`<a href=..>headline</a>
/// &nbsp;<font>Outlet</font>`). Parsing the fragment also decodes entities.
pub fn strip_markup(html: &str) -> String {
    if !html.contains('<') && !html.contains('&') {
        return collapse_whitespace(html);
    }
    let fragment = Html::parse_fragment(html);
    let text = fragment.root_element().text().collect::<Vec<_>>().join(" ");
    collapse_whitespace(&text)
}

fn collapse_whitespace(s: &str) -> String {
    s.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Describe how long ago `published` (RFC 2822) was, relative to `now`.
///
/// Buckets use floor arithmetic: under an hour reports minutes, under a
/// day reports hours, otherwise days. Dates in the future count as zero
/// minutes. Unparseable input yields [`RECENTLY`].
pub fn relative_age(published: &str, now: DateTime<Utc>) -> String {
    let Ok(published) = DateTime::parse_from_rfc2822(published.trim()) else {
        return RECENTLY.to_string();
    };
    let elapsed = now.signed_duration_since(published.with_timezone(&Utc));
    let minutes = elapsed.num_minutes().max(0);

    if minutes < 60 {
        format!("{minutes}분 전")
    } else if minutes < 24 * 60 {
        format!("{}시간 전", minutes / 60)
    } else {
        format!("{}일 전", minutes / (24 * 60))
    }
}
