//! Run configuration resolved from the command line.
//!
//! [`PipelineConfig`] carries every tunable the pipeline reads. Its
//! [`Default`] reproduces the stock daily run: the first five keywords of
//! [`DEFAULT_KEYWORDS`], a 12-item page, no translation.

use std::path::PathBuf;
use std::time::Duration;

use crate::classify::Taxonomy;
use crate::scoring::ScoringRules;
use crate::scrapers::google_news::DEFAULT_FEED_URL;
use crate::translate::DEFAULT_TRANSLATE_URL;

/// Search keywords in priority order. Only the first `keyword_limit` are used.
pub const DEFAULT_KEYWORDS: &[&str] = &[
    "AI 뉴스",
    "ChatGPT",
    "Claude",
    "OpenAI",
    "Anthropic",
    "Google AI",
    "DeepSeek",
    "인공지능",
    "LLM",
    "Gemini",
    "AI 연구",
    "AI 투자",
    "AI 규제",
];

pub const DEFAULT_MAX_ITEMS: usize = 12;
pub const DEFAULT_KEYWORD_LIMIT: usize = 5;
pub const DEFAULT_PER_KEYWORD: usize = 10;
pub const DEFAULT_KEYWORD_DELAY: Duration = Duration::from_secs(2);
pub const DEFAULT_TRANSLATE_DELAY: Duration = Duration::from_millis(500);

#[derive(Debug, Clone)]
pub struct PipelineConfig {
    /// Page whose `NEWS_DATA` block is rewritten.
    pub template: PathBuf,
    pub keywords: Vec<String>,
    pub keyword_limit: usize,
    /// Entries requested from the feed per keyword.
    pub per_keyword: usize,
    /// Size of the published list.
    pub max_items: usize,
    /// Pause between keyword fetches.
    pub keyword_delay: Duration,
    pub translate: bool,
    /// Pause between per-item translation calls.
    pub translate_delay: Duration,
    pub feed_url: String,
    pub translate_url: String,
    /// Feed UI language (`hl`), e.g. `ko`.
    pub language: String,
    /// Feed country (`gl`), e.g. `KR`.
    pub country: String,
    /// Outlets that earn the preferred-source bonus.
    pub preferred_sources: Vec<String>,
    pub taxonomy: Taxonomy,
    pub scoring: ScoringRules,
}

impl PipelineConfig {
    /// Keywords actually searched this run.
    pub fn active_keywords(&self) -> &[String] {
        let n = self.keyword_limit.min(self.keywords.len());
        &self.keywords[..n]
    }

    /// Whether `source` is one of the preferred outlets (case-insensitive).
    pub fn is_preferred(&self, source: &str) -> bool {
        self.preferred_sources
            .iter()
            .any(|p| p.eq_ignore_ascii_case(source.trim()))
    }
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            template: PathBuf::from("index.html"),
            keywords: DEFAULT_KEYWORDS.iter().map(|k| (*k).to_string()).collect(),
            keyword_limit: DEFAULT_KEYWORD_LIMIT,
            per_keyword: DEFAULT_PER_KEYWORD,
            max_items: DEFAULT_MAX_ITEMS,
            keyword_delay: DEFAULT_KEYWORD_DELAY,
            translate: false,
            translate_delay: DEFAULT_TRANSLATE_DELAY,
            feed_url: DEFAULT_FEED_URL.to_string(),
            translate_url: DEFAULT_TRANSLATE_URL.to_string(),
            language: "ko".to_string(),
            country: "KR".to_string(),
            preferred_sources: Vec::new(),
            taxonomy: Taxonomy::default(),
            scoring: ScoringRules::default(),
        }
    }
}
