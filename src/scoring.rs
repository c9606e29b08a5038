//! Heuristic importance scoring from title wording and outlet reputation.
//!
//! Scores are computed in integer tenths and converted to `f64` once, so a
//! result always has exactly one decimal digit. The additive order is fixed:
//! base, high-impact term, medium-impact term, premium source, preferred
//! source, then the clamp.

/// Term lists and weights for [`ScoringRules::score`]. Weights are in tenths.
#[derive(Debug, Clone)]
pub struct ScoringRules {
    pub base: u32,
    pub high_impact_terms: Vec<String>,
    pub high_impact_bonus: u32,
    pub medium_impact_terms: Vec<String>,
    pub medium_impact_bonus: u32,
    pub premium_sources: Vec<String>,
    pub premium_bonus: u32,
    pub preferred_bonus: u32,
    pub max: u32,
}

fn owned(list: &[&str]) -> Vec<String> {
    list.iter().map(|s| (*s).to_string()).collect()
}

impl Default for ScoringRules {
    fn default() -> Self {
        Self {
            base: 70,
            high_impact_terms: owned(&[
                "breakthrough",
                "launch",
                "unveil",
                "release",
                "introduces",
                "first",
                "record",
                "출시",
                "공개",
                "발표",
            ]),
            high_impact_bonus: 15,
            medium_impact_terms: owned(&[
                "update",
                "announces",
                "partnership",
                "funding",
                "expands",
                "업데이트",
                "투자",
                "협력",
            ]),
            medium_impact_bonus: 8,
            premium_sources: owned(&[
                "TechCrunch",
                "The Verge",
                "MIT Technology Review",
                "Reuters",
                "Bloomberg",
                "Nature",
                "Wired",
                "Ars Technica",
                "VentureBeat",
                "Forbes",
            ]),
            premium_bonus: 10,
            preferred_bonus: 15,
            max: 95,
        }
    }
}

impl ScoringRules {
    /// Score a title from `source`.
    ///
    /// Only the first matching high-impact term and the first matching
    /// medium-impact term count; the two bonuses stack. `preferred` adds a
    /// further bonus on top of the premium-source one.
    pub fn score(&self, title: &str, source: &str, preferred: bool) -> f64 {
        let title = title.to_lowercase();
        let source = source.to_lowercase();
        let mut tenths = self.base;

        if self
            .high_impact_terms
            .iter()
            .any(|t| title.contains(&t.to_lowercase()))
        {
            tenths += self.high_impact_bonus;
        }
        if self
            .medium_impact_terms
            .iter()
            .any(|t| title.contains(&t.to_lowercase()))
        {
            tenths += self.medium_impact_bonus;
        }
        if self.is_premium(&source) {
            tenths += self.premium_bonus;
        }
        if preferred {
            tenths += self.preferred_bonus;
        }

        f64::from(tenths.min(self.max)) / 10.0
    }

    fn is_premium(&self, source_lower: &str) -> bool {
        !source_lower.is_empty()
            && self
                .premium_sources
                .iter()
                .any(|p| source_lower.contains(&p.to_lowercase()))
    }
}
