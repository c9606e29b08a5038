//! Deduplication, ranking and truncation of collected items.

use itertools::Itertools;
use sha2::{Digest, Sha256};
use std::cmp::Ordering;
use tracing::debug;

use crate::models::NewsItem;

/// Lowercase hex SHA-256 of a title.
pub fn title_hash(title: &str) -> String {
    format!("{:x}", Sha256::digest(title.as_bytes()))
}

/// Keep the first item seen for each distinct title hash, in input order.
pub fn dedup_by_title(items: Vec<NewsItem>) -> Vec<NewsItem> {
    let before = items.len();
    let unique: Vec<NewsItem> = items
        .into_iter()
        .unique_by(|item| title_hash(&item.title))
        .collect();
    debug!(before, after = unique.len(), "Deduplicated by title hash");
    unique
}

/// Sort by importance, highest first. Equal scores keep their relative order.
pub fn rank(items: &mut [NewsItem]) {
    items.sort_by(|a, b| {
        b.importance
            .partial_cmp(&a.importance)
            .unwrap_or(Ordering::Equal)
    });
}

/// Dedup, rank, cut to `max` and number the survivors from 1.
pub fn finalize(items: Vec<NewsItem>, max: usize) -> Vec<NewsItem> {
    let mut items = dedup_by_title(items);
    rank(&mut items);
    items.truncate(max);
    for (n, item) in (1u32..).zip(items.iter_mut()) {
        item.id = n;
    }
    items
}
