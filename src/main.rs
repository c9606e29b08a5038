//! # AI News Updater
//!
//! A batch job that refreshes the news block of a static AI news page.
//! It searches an RSS news feed for a fixed list of AI keywords, scores
//! and classifies the results, and rewrites the page's embedded
//! `NEWS_DATA` array with the top items.
//!
//! ## Usage
//!
//! ```sh
//! ai_news_updater -t ./index.html
//! ```
//!
//! ## Architecture
//!
//! The application follows a pipeline architecture:
//! 1. **Fetching**: Query the Google News RSS search feed once per keyword
//! 2. **Parsing**: Normalize each `<item>` (defaults, markup, relative age)
//! 3. **Enrichment**: Classify, score, optionally translate to Korean
//! 4. **Ranking**: Drop duplicate titles, sort by importance, keep the top N
//! 5. **Output**: Splice the JSON into the page and update its date stamp
//!
//! Everything runs sequentially on a single thread, with fixed pauses
//! between requests.

use clap::Parser;
use std::error::Error;
use std::process::ExitCode;
use tracing::{debug, error, info};
use tracing_subscriber::{EnvFilter, fmt as tfmt};

mod classify;
mod cli;
mod config;
mod error;
mod models;
mod outputs;
mod pipeline;
mod rank;
mod scoring;
mod scrapers;
mod translate;
mod utils;

use cli::Cli;

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    // --- Tracing init ---
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tfmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_file(false)
        .with_line_number(false)
        .with_timer(tracing_subscriber::fmt::time::UtcTime::rfc_3339())
        .init();

    let start_time = std::time::Instant::now();
    info!("ai_news_updater starting up");

    let config = Cli::parse().into_config();
    debug!(?config.template, config.max_items, config.translate, "Parsed CLI arguments");

    match pipeline::run(&config).await {
        Ok(summary) => {
            let elapsed = start_time.elapsed();
            info!(
                published = summary.published,
                collected = summary.collected,
                skipped = summary.skipped,
                used_fallback = summary.used_fallback,
                secs = elapsed.as_secs(),
                millis = elapsed.subsec_millis(),
                "Update complete"
            );
            ExitCode::SUCCESS
        }
        Err(e) => {
            error!(error = %e, "Update failed");
            let mut source = e.source();
            while let Some(cause) = source {
                error!(cause = %cause, "Caused by");
                source = cause.source();
            }
            ExitCode::FAILURE
        }
    }
}
