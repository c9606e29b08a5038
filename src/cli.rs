//! Command-line interface definitions for the AI news updater.
//!
//! This module defines the CLI arguments and options using the `clap` crate.
//! Every option has a default, so a bare invocation performs the standard
//! daily refresh of `./index.html`.

use clap::Parser;
use clap::builder::RangedU64ValueParser;
use std::path::PathBuf;
use std::time::Duration;

use crate::config::{
    DEFAULT_KEYWORD_LIMIT, DEFAULT_MAX_ITEMS, DEFAULT_PER_KEYWORD, PipelineConfig,
};
use crate::scrapers::google_news::DEFAULT_FEED_URL;
use crate::translate::DEFAULT_TRANSLATE_URL;

/// Command-line arguments for the AI news updater.
///
/// # Examples
///
/// ```sh
/// # Daily refresh of ./index.html
/// ai_news_updater
///
/// # Larger archive page with Korean translation
/// ai_news_updater -t archive.html -n 100 --keyword-limit 13 --translate
///
/// # Prefer a local outlet
/// ai_news_updater --prefer-source "AI타임스"
/// ```
#[derive(Parser, Debug)]
#[command(author, version, about)]
pub struct Cli {
    /// Page whose NEWS_DATA block is rewritten in place
    #[arg(short, long, env = "NEWS_TEMPLATE", default_value = "index.html")]
    pub template: PathBuf,

    /// Maximum number of items published
    #[arg(short = 'n', long, default_value_t = DEFAULT_MAX_ITEMS, value_parser = at_least_one())]
    pub max_items: usize,

    /// How many keywords from the built-in list are searched
    #[arg(long, default_value_t = DEFAULT_KEYWORD_LIMIT, value_parser = at_least_one())]
    pub keyword_limit: usize,

    /// Entries requested from the feed per keyword
    #[arg(long, default_value_t = DEFAULT_PER_KEYWORD, value_parser = at_least_one())]
    pub per_keyword: usize,

    /// Pause between keyword fetches, in milliseconds
    #[arg(long, default_value_t = 2000)]
    pub delay_ms: u64,

    /// Translate titles and descriptions from English to Korean
    #[arg(long)]
    pub translate: bool,

    /// Pause between translation calls, in milliseconds
    #[arg(long, default_value_t = 500)]
    pub translate_delay_ms: u64,

    /// Feed interface language (hl)
    #[arg(long, default_value = "ko")]
    pub language: String,

    /// Feed country (gl)
    #[arg(long, default_value = "KR")]
    pub country: String,

    /// Outlet that earns the preferred-source bonus (repeatable)
    #[arg(long = "prefer-source")]
    pub prefer_sources: Vec<String>,

    /// RSS search endpoint
    #[arg(long, default_value = DEFAULT_FEED_URL)]
    pub feed_url: String,

    /// Translation endpoint
    #[arg(long, default_value = DEFAULT_TRANSLATE_URL)]
    pub translate_url: String,
}

/// Counts where zero would publish or fetch nothing.
fn at_least_one() -> RangedU64ValueParser<usize> {
    RangedU64ValueParser::<usize>::new().range(1..)
}

impl Cli {
    /// Resolve the arguments into a [`PipelineConfig`].
    pub fn into_config(self) -> PipelineConfig {
        PipelineConfig {
            template: self.template,
            keyword_limit: self.keyword_limit,
            per_keyword: self.per_keyword,
            max_items: self.max_items,
            keyword_delay: Duration::from_millis(self.delay_ms),
            translate: self.translate,
            translate_delay: Duration::from_millis(self.translate_delay_ms),
            feed_url: self.feed_url,
            translate_url: self.translate_url,
            language: self.language,
            country: self.country,
            preferred_sources: self.prefer_sources,
            ..PipelineConfig::default()
        }
    }
}
