//! English → Korean translation through the public Google Translate endpoint.
//!
//! Translation is best effort. [`Translator::translate`] always returns
//! text: the translation when the call succeeds, otherwise the input
//! unchanged. Failures are logged at `debug` and never reach the caller.
//!
//! # Response Shape
//!
//! ```text
//! [[["번역된 문장.","Translated sentence.",null,null,10], ["...", "...", ...]], null, "en", ...]
//! ```
//!
//! The translated text is the concatenation of `[0][i][0]`.

use reqwest::Client;
use serde_json::Value;
use std::time::{Duration, Instant};
use tracing::{debug, instrument};
use url::Url;

use crate::error::NewsError;
use crate::utils::truncate_for_log;

pub const DEFAULT_TRANSLATE_URL: &str = "https://translate.googleapis.com/translate_a/single";

pub const TRANSLATE_TIMEOUT: Duration = Duration::from_secs(5);

/// Stateless client for a `translate_a/single`-style endpoint.
#[derive(Debug, Clone)]
pub struct Translator {
    client: Client,
    endpoint: String,
    source_lang: String,
    target_lang: String,
}

impl Translator {
    /// Build a translator from `source_lang` to `target_lang` (e.g. `en` → `ko`).
    ///
    /// # Errors
    ///
    /// Returns [`NewsError::Http`] if the HTTP client cannot be constructed.
    pub fn new(endpoint: &str, source_lang: &str, target_lang: &str) -> Result<Self, NewsError> {
        let client = Client::builder().timeout(TRANSLATE_TIMEOUT).build()?;
        Ok(Self {
            client,
            endpoint: endpoint.to_string(),
            source_lang: source_lang.to_string(),
            target_lang: target_lang.to_string(),
        })
    }

    /// Translate `text`, falling back to `text` itself on any failure.
    ///
    /// Blank input is returned as-is without a request.
    #[instrument(level = "debug", skip_all, fields(chars = text.chars().count()))]
    pub async fn translate(&self, text: &str) -> String {
        if text.trim().is_empty() {
            return text.to_string();
        }

        let t0 = Instant::now();
        match self.request(text).await {
            Ok(translated) => {
                debug!(elapsed_ms = t0.elapsed().as_millis() as u64, "Translated text");
                translated
            }
            Err(e) => {
                debug!(
                    error = %e,
                    text = %truncate_for_log(text, 60),
                    "Translation failed; keeping original text"
                );
                text.to_string()
            }
        }
    }

    async fn request(&self, text: &str) -> Result<String, NewsError> {
        let url = Url::parse_with_params(
            &self.endpoint,
            &[
                ("client", "gtx"),
                ("sl", self.source_lang.as_str()),
                ("tl", self.target_lang.as_str()),
                ("dt", "t"),
                ("q", text),
            ],
        )
        .map_err(|e| NewsError::Translation(format!("bad endpoint {}: {e}", self.endpoint)))?;

        let response = self.client.get(url).send().await?;
        let status = response.status();
        if status != reqwest::StatusCode::OK {
            return Err(NewsError::Status {
                status: status.as_u16(),
                url: self.endpoint.clone(),
            });
        }

        let body: Value = serde_json::from_str(&response.text().await?)?;
        extract_translation(&body)
    }
}

/// Concatenate the translated segments of a `translate_a/single` response.
///
/// # Errors
///
/// Returns [`NewsError::Translation`] if the body has no segment list or
/// no segment carries text.
pub fn extract_translation(body: &Value) -> Result<String, NewsError> {
    let segments = body
        .get(0)
        .and_then(Value::as_array)
        .ok_or_else(|| NewsError::Translation("response has no segment list".to_string()))?;

    let translated: String = segments
        .iter()
        .filter_map(|segment| segment.get(0).and_then(Value::as_str))
        .collect();

    if translated.is_empty() {
        return Err(NewsError::Translation("response has no translated text".to_string()));
    }
    Ok(translated)
}
