//! Rewrites the `NEWS_DATA` block of the static page.
//!
//! The page is treated as text, not parsed. Two patterns are substituted:
//!
//! ```text
//! const NEWS_DATA = [ ...anything, across lines... ];   -> the new JSON array
//! date: 'YYYY-MM-DD'                                    -> today's date
//! ```
//!
//! Everything else in the document is left byte-for-byte intact.

use once_cell::sync::Lazy;
use regex::{NoExpand, Regex};
use serde::Serialize;
use serde_json::ser::{PrettyFormatter, Serializer};
use std::path::Path;
use tokio::fs;
use tracing::{info, instrument, warn};

use crate::error::NewsError;
use crate::models::NewsItem;

static NEWS_DATA_BLOCK: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?s)const NEWS_DATA = \[.*?\];").expect("NEWS_DATA pattern"));

static DATE_MARKER: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"date: '\d{4}-\d{2}-\d{2}'").expect("date marker pattern"));

/// Indentation used for the embedded JSON, matching the page's script block.
const JSON_INDENT: &[u8] = b"            ";

/// Serialize items as a pretty JSON array. Non-ASCII text is written as-is.
///
/// Every `;` is written as `\u003b`. Outside strings JSON never contains a
/// `;`, so the only `];` in the rendered block is its terminator and the
/// next run's block match ends there.
///
/// # Errors
///
/// Returns [`NewsError::Json`] or [`NewsError::Utf8`] if serialization fails.
pub fn render_news_data(items: &[NewsItem]) -> Result<String, NewsError> {
    let mut buf = Vec::new();
    let mut serializer = Serializer::with_formatter(&mut buf, PrettyFormatter::with_indent(JSON_INDENT));
    items.serialize(&mut serializer)?;
    let json = String::from_utf8(buf)?;
    Ok(json.replace(';', "\\u003b"))
}

/// The document after substitution, and whether a `NEWS_DATA` block was found.
#[derive(Debug)]
pub struct Spliced {
    pub document: String,
    pub replaced_block: bool,
}

/// Substitute the `NEWS_DATA` block(s) and date marker(s) in `document`.
///
/// The replacement is inserted literally, so `$` inside item text is safe.
pub fn splice_document(document: &str, news_json: &str, date: &str) -> Spliced {
    let replaced_block = NEWS_DATA_BLOCK.is_match(document);
    let block = format!("const NEWS_DATA = {news_json};");
    let document = NEWS_DATA_BLOCK.replace_all(document, NoExpand(block.as_str()));

    let marker = format!("date: '{date}'");
    let document = DATE_MARKER.replace_all(&document, NoExpand(marker.as_str())).into_owned();

    Spliced {
        document,
        replaced_block,
    }
}

/// Rewrite the page at `path` in place with `items`.
///
/// # Errors
///
/// Returns [`NewsError::Io`] if the page cannot be read or written, and
/// [`NewsError::Json`] if the items cannot be serialized.
#[instrument(level = "info", skip(path, items), fields(path = %path.display(), count = items.len()))]
pub async fn publish(path: &Path, items: &[NewsItem], date: &str) -> Result<(), NewsError> {
    let template = fs::read_to_string(path)
        .await
        .map_err(|e| NewsError::io(path, e))?;

    let news_json = render_news_data(items)?;
    let spliced = splice_document(&template, &news_json, date);
    if !spliced.replaced_block {
        warn!("No `const NEWS_DATA = [...];` block found; only date markers were updated");
    }

    fs::write(path, spliced.document)
        .await
        .map_err(|e| NewsError::io(path, e))?;
    info!("Updated page");
    Ok(())
}
