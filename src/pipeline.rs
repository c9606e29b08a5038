//! Pipeline orchestration: collect → enrich → finalize → publish.
//!
//! The run is strictly sequential. Each keyword is fetched, parsed and
//! enriched before the next one starts, with a fixed pause in between to
//! stay under the feed's rate limits.
//!
//! Keyword and entry failures are recorded in the [`Collection`] and
//! skipped. Only publishing can fail the run.

use chrono::{DateTime, Utc};
use std::time::Duration;
use tokio::time::sleep;
use tracing::{debug, info, instrument, warn};

use crate::config::PipelineConfig;
use crate::error::NewsError;
use crate::models::{Collection, MAX_KEYWORDS, NewsItem};
use crate::outputs::html;
use crate::rank;
use crate::scrapers::rss::DESCRIPTION_LIMIT;
use crate::scrapers::{FetchOutcome, GoogleNewsFeed, ParsedEntry, parse_entry};
use crate::translate::Translator;
use crate::utils::{today, truncate_with_ellipsis};

/// What a completed run published.
#[derive(Debug)]
pub struct RunSummary {
    pub published: usize,
    pub collected: usize,
    pub skipped: usize,
    pub used_fallback: bool,
}

/// Fetch, parse and enrich items for every active keyword.
///
/// Items are appended in arrival order and stamped with `date`; nothing is
/// deduplicated here.
#[instrument(level = "info", skip_all, fields(keywords = config.active_keywords().len()))]
pub async fn collect(
    feed: &GoogleNewsFeed,
    translator: Option<&Translator>,
    config: &PipelineConfig,
    date: &str,
) -> Collection {
    let mut collection = Collection::default();
    let keywords = config.active_keywords();

    for (i, keyword) in keywords.iter().enumerate() {
        if i > 0 {
            pause(config.keyword_delay).await;
        }

        let entries = match feed.fetch(keyword, config.per_keyword).await {
            FetchOutcome::Fetched(entries) => entries,
            FetchOutcome::Failed(reason) => {
                collection.push_skip(keyword, None, reason);
                continue;
            }
        };

        let now = Utc::now();
        let before = collection.items.len();
        for raw in &entries {
            match parse_entry(raw, now) {
                Ok(parsed) => {
                    let item = enrich(parsed, keyword, date, translator, config).await;
                    collection.push_item(item);
                }
                Err(reason) => {
                    warn!(%keyword, link = ?raw.link, %reason, "Skipping feed entry");
                    collection.push_skip(keyword, raw.link.clone(), reason);
                }
            }
        }
        info!(
            %keyword,
            added = collection.items.len() - before,
            total = collection.items.len(),
            "Collected keyword"
        );
    }

    collection
}

/// Turn a parsed entry into a [`NewsItem`]: classify, score, translate, tag.
pub async fn enrich(
    entry: ParsedEntry,
    keyword: &str,
    date: &str,
    translator: Option<&Translator>,
    config: &PipelineConfig,
) -> NewsItem {
    let text = format!("{} {}", entry.title, entry.description);
    let category = config.taxonomy.classify(&text).to_string();
    let preferred = config.is_preferred(&entry.source);
    let importance = config.scoring.score(&entry.title, &entry.source, preferred);
    let keywords = item_keywords(keyword, &config.taxonomy.matched_phrases(&text));

    let (title, description) = match translator {
        Some(translator) => {
            let title = translate_paced(translator, &entry.title, config.translate_delay).await;
            let description =
                translate_paced(translator, &entry.description, config.translate_delay).await;
            (title, truncate_with_ellipsis(&description, DESCRIPTION_LIMIT))
        }
        None => (entry.title, entry.description),
    };

    debug!(%title, published = %entry.published, %category, importance, "Enriched item");
    NewsItem {
        id: 0,
        title,
        source: entry.source,
        category,
        date: date.to_string(),
        time: entry.age,
        importance,
        description,
        link: entry.link,
        keywords,
    }
}

/// Translate `text`, pausing afterwards only if a request was made.
async fn translate_paced(translator: &Translator, text: &str, delay: Duration) -> String {
    if text.trim().is_empty() {
        return text.to_string();
    }
    let translated = translator.translate(text).await;
    pause(delay).await;
    translated
}

async fn pause(delay: Duration) {
    if !delay.is_zero() {
        sleep(delay).await;
    }
}

/// The search keyword first, then matched taxonomy phrases, without
/// case-insensitive repeats, capped at [`MAX_KEYWORDS`].
fn item_keywords(keyword: &str, matched: &[&str]) -> Vec<String> {
    let mut tags: Vec<String> = Vec::with_capacity(MAX_KEYWORDS);
    for tag in std::iter::once(keyword).chain(matched.iter().copied()) {
        if tags.len() == MAX_KEYWORDS {
            break;
        }
        if !tags.iter().any(|t| t.to_lowercase() == tag.to_lowercase()) {
            tags.push(tag.to_string());
        }
    }
    tags
}

/// Built-in items published when a run collects nothing.
pub fn default_news(date: &str) -> Vec<NewsItem> {
    vec![
        NewsItem {
            id: 1,
            title: "OpenAI, 최신 AI 모델 발표".to_string(),
            source: "TechCrunch".to_string(),
            category: "llm".to_string(),
            date: date.to_string(),
            time: "2시간 전".to_string(),
            importance: 9.5,
            description: "OpenAI가 최신 AI 모델을 공개하며 업계에 새로운 기준을 제시했습니다."
                .to_string(),
            link: "https://www.google.com/search?q=OpenAI+latest+news".to_string(),
            keywords: vec!["OpenAI".to_string(), "AI".to_string(), "LLM".to_string()],
        },
        NewsItem {
            id: 2,
            title: "Google Gemini 업데이트 발표".to_string(),
            source: "The Verge".to_string(),
            category: "llm".to_string(),
            date: date.to_string(),
            time: "4시간 전".to_string(),
            importance: 8.8,
            description: "Google이 Gemini의 대규모 업데이트를 발표했습니다.".to_string(),
            link: "https://www.google.com/search?q=Google+Gemini+news".to_string(),
            keywords: vec!["Google".to_string(), "Gemini".to_string(), "AI".to_string()],
        },
    ]
}

/// Final list for a collection: ranked top items, or the built-in set if empty.
///
/// `max` is floored at one so a published page is never emptied.
pub fn select(collection: Collection, max: usize, date: &str) -> (Vec<NewsItem>, bool) {
    let max = max.max(1);
    let items = rank::finalize(collection.items, max);
    if items.is_empty() {
        warn!("No news collected; publishing built-in items");
        let mut fallback = default_news(date);
        fallback.truncate(max);
        (fallback, true)
    } else {
        (items, false)
    }
}

/// Execute one full refresh of the configured page.
///
/// # Errors
///
/// Returns an error if the HTTP clients cannot be built or the page cannot
/// be read, rendered or written.
#[instrument(level = "info", skip_all, fields(template = %config.template.display()))]
pub async fn run(config: &PipelineConfig) -> Result<RunSummary, NewsError> {
    let started: DateTime<Utc> = Utc::now();
    let feed = GoogleNewsFeed::new(&config.feed_url, &config.language, &config.country)?;
    let translator = if config.translate {
        Some(Translator::new(&config.translate_url, "en", "ko")?)
    } else {
        None
    };

    let date = today();
    let collection = collect(&feed, translator.as_ref(), config, &date).await;
    let collected = collection.items.len();
    let skipped = collection.skipped.len();
    for skip in &collection.skipped {
        debug!(keyword = %skip.keyword, link = ?skip.link, reason = %skip.reason, "Skipped");
    }

    let (items, used_fallback) = select(collection, config.max_items, &date);
    html::publish(&config.template, &items, &date).await?;

    let summary = RunSummary {
        published: items.len(),
        collected,
        skipped,
        used_fallback,
    };
    info!(
        published = summary.published,
        collected,
        skipped,
        used_fallback,
        elapsed_secs = (Utc::now() - started).num_seconds(),
        "Run complete"
    );
    Ok(summary)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::SkipReason;
    use wiremock::matchers::{method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    const PAGE: &str = "<script>\n    const NEWS_DATA = [\n        { id: 1 }\n    ];\n    const UPDATED = { date: '2024-01-01' };\n</script>\n";

    fn feed_xml(items: &[(&str, &str)]) -> String {
        let body: String = items
            .iter()
            .map(|(title, source)| {
                format!(
                    "<item><title>{title}</title><link>https://example.com/{}</link>\
                     <pubDate>Mon, 19 Oct 2026 09:30:00 GMT</pubDate>\
                     <description>&lt;b&gt;{title}&lt;/b&gt;</description>\
                     <source url=\"https://example.com\">{source}</source></item>",
                    title.len()
                )
            })
            .collect();
        format!("<?xml version=\"1.0\"?><rss version=\"2.0\"><channel><title>t</title>{body}</channel></rss>")
    }

    fn test_config(server: &MockServer, keywords: &[&str]) -> PipelineConfig {
        PipelineConfig {
            keywords: keywords.iter().map(|k| (*k).to_string()).collect(),
            keyword_limit: keywords.len(),
            keyword_delay: Duration::ZERO,
            translate_delay: Duration::ZERO,
            feed_url: format!("{}/rss/search", server.uri()),
            translate_url: format!("{}/translate_a/single", server.uri()),
            ..PipelineConfig::default()
        }
    }

    async fn mount_feed(server: &MockServer, keyword: &str, status: u16, body: String) {
        Mock::given(method("GET"))
            .and(path("/rss/search"))
            .and(query_param("q", keyword))
            .respond_with(ResponseTemplate::new(status).set_body_string(body))
            .mount(server)
            .await;
    }

    #[test]
    fn test_item_keywords_caps_and_dedups() {
        assert_eq!(
            item_keywords("OpenAI", &["OpenAI", "GPT", "Claude", "Gemini"]),
            vec!["OpenAI", "GPT", "Claude"]
        );
        assert_eq!(item_keywords("llm", &["LLM"]), vec!["llm"]);
        assert_eq!(item_keywords("AI 뉴스", &[]), vec!["AI 뉴스"]);
    }

    #[test]
    fn test_default_news_is_small_and_valid() {
        let items = default_news("2026-10-19");
        assert_eq!(items.len(), 2);
        assert!(items.iter().all(|i| i.date == "2026-10-19"));
        assert!(items.iter().all(|i| i.keywords.len() <= MAX_KEYWORDS));
        assert_eq!(items[0].id, 1);
        assert_eq!(items[1].id, 2);
    }

    #[test]
    fn test_select_falls_back_on_empty() {
        let (items, used_fallback) = select(Collection::default(), 12, "2026-10-19");
        assert!(used_fallback);
        assert_eq!(items.len(), 2);
        assert_eq!(items[0].title, "OpenAI, 최신 AI 모델 발표");
    }

    #[test]
    fn test_select_never_publishes_nothing() {
        let mut item = default_news("2026-10-19").remove(1);
        item.id = 0;
        let collection = Collection {
            items: vec![item],
            skipped: Vec::new(),
        };
        let (items, used_fallback) = select(collection, 0, "2026-10-19");
        assert!(!used_fallback);
        assert_eq!(items.len(), 1);
        assert_eq!(items[0].title, "Google Gemini 업데이트 발표");

        let (items, used_fallback) = select(Collection::default(), 0, "2026-10-19");
        assert!(used_fallback);
        assert_eq!(items.len(), 1);
    }

    fn english_entry(description: &str) -> ParsedEntry {
        ParsedEntry {
            title: "Anthropic releases Claude".to_string(),
            link: "https://example.com/claude".to_string(),
            published: String::new(),
            description: description.to_string(),
            source: "Reuters".to_string(),
            age: "1시간 전".to_string(),
        }
    }

    #[tokio::test]
    async fn test_enrich_truncates_translated_description() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/translate_a/single"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(serde_json::json!([[["가".repeat(300), "x"]]])),
            )
            .expect(2)
            .mount(&server)
            .await;

        let config = test_config(&server, &["Claude"]);
        let translator = Translator::new(&config.translate_url, "en", "ko").unwrap();
        let item = enrich(
            english_entry("Anthropic released a model today"),
            "Claude",
            "2026-10-19",
            Some(&translator),
            &config,
        )
        .await;

        assert_eq!(item.description.chars().count(), DESCRIPTION_LIMIT + 3);
        assert!(item.description.ends_with("..."));
        assert_eq!(item.title.chars().count(), 300);
    }

    #[tokio::test]
    async fn test_enrich_skips_blank_description_translation() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/translate_a/single"))
            .and(query_param("q", "Anthropic releases Claude"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(serde_json::json!([[["앤트로픽, 클로드 출시", "x"]]])),
            )
            .expect(1)
            .mount(&server)
            .await;

        let config = PipelineConfig {
            translate_delay: Duration::from_millis(500),
            ..test_config(&server, &["Claude"])
        };
        let translator = Translator::new(&config.translate_url, "en", "ko").unwrap();
        let started = std::time::Instant::now();
        let item = enrich(english_entry(""), "Claude", "2026-10-19", Some(&translator), &config).await;
        let elapsed = started.elapsed();

        assert!(elapsed >= Duration::from_millis(500), "{elapsed:?}");
        assert!(elapsed < Duration::from_millis(1000), "paused twice: {elapsed:?}");
        assert_eq!(item.title, "앤트로픽, 클로드 출시");
        assert_eq!(item.description, "");
    }

    #[tokio::test]
    async fn test_enrich_scores_and_classifies() {
        let config = PipelineConfig::default();
        let entry = ParsedEntry {
            title: "DeepSeek unveils new AI model".to_string(),
            link: "https://example.com/ds".to_string(),
            published: String::new(),
            description: "논문과 함께 공개".to_string(),
            source: "TechCrunch".to_string(),
            age: "최근".to_string(),
        };
        let item = enrich(entry, "DeepSeek", "2026-10-19", None, &config).await;
        assert_eq!(item.importance, 9.5);
        assert_eq!(item.category, "research");
        assert_eq!(item.keywords, vec!["DeepSeek", "논문"]);
        assert_eq!(item.date, "2026-10-19");
        assert_eq!(item.time, "최근");
    }

    #[tokio::test]
    async fn test_collect_continues_past_failed_keyword() {
        let server = MockServer::start().await;
        mount_feed(&server, "broken", 500, String::new()).await;
        mount_feed(
            &server,
            "OpenAI",
            200,
            feed_xml(&[("OpenAI launches agents", "Reuters"), ("Google Gemini update", "Blog")]),
        )
        .await;

        let config = test_config(&server, &["broken", "OpenAI"]);
        let feed = GoogleNewsFeed::new(&config.feed_url, "ko", "KR").unwrap();
        let collection = collect(&feed, None, &config, "2026-10-19").await;

        assert_eq!(collection.items.len(), 2);
        assert!(collection.items.iter().all(|i| i.date == "2026-10-19"));
        assert_eq!(collection.skipped.len(), 1);
        assert_eq!(collection.skipped[0].keyword, "broken");
        assert_eq!(collection.skipped[0].reason, SkipReason::Status(500));
    }

    #[tokio::test]
    async fn test_collect_records_untitled_entries() {
        let server = MockServer::start().await;
        let body = "<rss><channel><item><link>https://example.com/x</link></item>\
                    <item><title>Claude update</title><link>https://example.com/y</link></item></channel></rss>"
            .to_string();
        mount_feed(&server, "Claude", 200, body).await;

        let config = test_config(&server, &["Claude"]);
        let feed = GoogleNewsFeed::new(&config.feed_url, "ko", "KR").unwrap();
        let collection = collect(&feed, None, &config, "2026-10-19").await;

        assert_eq!(collection.items.len(), 1);
        assert_eq!(collection.skipped[0].reason, SkipReason::MissingTitle);
        assert_eq!(collection.skipped[0].link.as_deref(), Some("https://example.com/x"));
    }

    #[tokio::test]
    async fn test_collect_translates_when_enabled() {
        let server = MockServer::start().await;
        mount_feed(&server, "Gemini", 200, feed_xml(&[("Google Gemini update", "The Verge")])).await;
        Mock::given(method("GET"))
            .and(path("/translate_a/single"))
            .and(query_param("q", "Google Gemini update"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(serde_json::json!([[["구글 제미나이 업데이트", "x"]]])),
            )
            .mount(&server)
            .await;

        let config = test_config(&server, &["Gemini"]);
        let feed = GoogleNewsFeed::new(&config.feed_url, "ko", "KR").unwrap();
        let translator = Translator::new(&config.translate_url, "en", "ko").unwrap();
        let collection = collect(&feed, Some(&translator), &config, "2026-10-19").await;

        assert_eq!(collection.items[0].title, "구글 제미나이 업데이트");
        assert_eq!(collection.items[0].importance, 8.8);
    }

    #[tokio::test]
    async fn test_run_dedups_ranks_and_publishes() {
        let server = MockServer::start().await;
        mount_feed(
            &server,
            "Gemini",
            200,
            feed_xml(&[("Google Gemini update", "The Verge"), ("AI weekly roundup", "Blog")]),
        )
        .await;
        mount_feed(
            &server,
            "Google AI",
            200,
            feed_xml(&[("Google Gemini update", "Reuters"), ("DeepSeek unveils new AI model", "TechCrunch")]),
        )
        .await;

        let dir = tempfile::tempdir().unwrap();
        let template = dir.path().join("index.html");
        tokio::fs::write(&template, PAGE).await.unwrap();

        let config = PipelineConfig {
            template: template.clone(),
            ..test_config(&server, &["Gemini", "Google AI"])
        };
        let summary = run(&config).await.unwrap();

        assert_eq!(summary.collected, 4);
        assert_eq!(summary.published, 3);
        assert!(!summary.used_fallback);

        let page = tokio::fs::read_to_string(&template).await.unwrap();
        let start = page.find("const NEWS_DATA = ").unwrap() + "const NEWS_DATA = ".len();
        let end = page[start..].find("];").unwrap() + start + 1;
        let items: Vec<NewsItem> = serde_json::from_str(&page[start..end]).unwrap();

        let titles: Vec<&str> = items.iter().map(|i| i.title.as_str()).collect();
        assert_eq!(
            titles,
            vec!["DeepSeek unveils new AI model", "Google Gemini update", "AI weekly roundup"]
        );
        assert_eq!(items[1].source, "The Verge");
        assert_eq!(items.iter().map(|i| i.id).collect::<Vec<_>>(), vec![1, 2, 3]);
        assert!(page.contains(&format!("date: '{}'", today())));
    }

    #[tokio::test]
    async fn test_run_with_nothing_collected_uses_fallback() {
        let server = MockServer::start().await;
        mount_feed(&server, "OpenAI", 503, String::new()).await;

        let dir = tempfile::tempdir().unwrap();
        let template = dir.path().join("index.html");
        tokio::fs::write(&template, PAGE).await.unwrap();

        let config = PipelineConfig {
            template: template.clone(),
            ..test_config(&server, &["OpenAI"])
        };
        let summary = run(&config).await.unwrap();

        assert!(summary.used_fallback);
        assert_eq!(summary.published, 2);
        let page = tokio::fs::read_to_string(&template).await.unwrap();
        assert!(page.contains("Google Gemini 업데이트 발표"));
    }

    #[tokio::test]
    async fn test_run_missing_template_fails() {
        let server = MockServer::start().await;
        mount_feed(&server, "OpenAI", 200, feed_xml(&[("OpenAI launches agents", "Reuters")])).await;

        let dir = tempfile::tempdir().unwrap();
        let config = PipelineConfig {
            template: dir.path().join("nope.html"),
            ..test_config(&server, &["OpenAI"])
        };
        assert!(matches!(run(&config).await, Err(NewsError::Io { .. })));
    }
}
