//! Keyword-based category classification.
//!
//! A [`Taxonomy`] is an ordered list of categories, each with the phrases
//! that vote for it. Order matters: when two categories match the same
//! number of phrases, the one defined first wins.

use tracing::trace;

/// One category label and the phrases that indicate it.
#[derive(Debug, Clone)]
pub struct Category {
    pub label: String,
    pub phrases: Vec<String>,
}

/// Ordered category definitions plus the label used when nothing matches.
#[derive(Debug, Clone)]
pub struct Taxonomy {
    categories: Vec<Category>,
    default_label: String,
}

impl Taxonomy {
    /// Build a taxonomy from `(label, phrases)` pairs in priority order.
    ///
    /// If `default_label` is not one of the labels it is appended as an
    /// empty category, so [`Taxonomy::classify`] only ever returns a key
    /// of this taxonomy.
    pub fn new<L, P>(entries: &[(L, &[P])], default_label: &str) -> Self
    where
        L: AsRef<str>,
        P: AsRef<str>,
    {
        let mut categories: Vec<Category> = entries
            .iter()
            .map(|(label, phrases)| Category {
                label: label.as_ref().to_string(),
                phrases: phrases.iter().map(|p| p.as_ref().to_string()).collect(),
            })
            .collect();

        if !categories.iter().any(|c| c.label == default_label) {
            categories.push(Category {
                label: default_label.to_string(),
                phrases: Vec::new(),
            });
        }

        Self {
            categories,
            default_label: default_label.to_string(),
        }
    }

    /// Pick the category whose phrases occur most often in `text`.
    ///
    /// Matching is a case-insensitive substring test; each phrase counts
    /// at most once. Ties keep the earlier category. Zero matches yield the
    /// default label.
    pub fn classify(&self, text: &str) -> &str {
        let haystack = text.to_lowercase();
        let mut best: Option<(&str, usize)> = None;

        for category in &self.categories {
            let hits = category
                .phrases
                .iter()
                .filter(|p| haystack.contains(&p.to_lowercase()))
                .count();
            if hits > 0 && best.is_none_or(|(_, top)| hits > top) {
                best = Some((category.label.as_str(), hits));
            }
        }

        let label = best.map_or(self.default_label.as_str(), |(label, _)| label);
        trace!(label, "Classified text");
        label
    }

    /// Phrases found in `text`, in taxonomy order, with their defined casing.
    pub fn matched_phrases<'a>(&'a self, text: &str) -> Vec<&'a str> {
        let haystack = text.to_lowercase();
        self.categories
            .iter()
            .flat_map(|c| c.phrases.iter())
            .filter(|p| haystack.contains(&p.to_lowercase()))
            .map(String::as_str)
            .collect()
    }
}

impl Default for Taxonomy {
    /// The AI news taxonomy used by the published page.
    fn default() -> Self {
        Taxonomy::new(
            &[
                (
                    "llm",
                    &[
                        "ChatGPT", "GPT", "Claude", "Gemini", "LLM", "OpenAI", "Anthropic",
                        "대형언어모델",
                    ][..],
                ),
                (
                    "industry",
                    &["AI 투자", "AI 스타트업", "삼성", "LG", "NVIDIA", "구글", "AI 기업"][..],
                ),
                (
                    "research",
                    &["AI 연구", "DeepSeek", "논문", "알고리즘", "MIT", "Stanford"][..],
                ),
                (
                    "ml_dl",
                    &["머신러닝", "딥러닝", "신경망", "Machine Learning", "Deep Learning"][..],
                ),
                (
                    "application",
                    &["AI 활용", "AI 서비스", "신약", "의료", "자율주행"][..],
                ),
            ],
            "llm",
        )
    }
}
