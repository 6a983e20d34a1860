//! Heuristic fake-probability scoring.
//!
//! Scans a claim for weighted indicator patterns and a few hard-coded
//! co-occurrence pairs. Every rule that fires contributes its weight; there is
//! no early exit. The sum is clamped to `[0, 1]`.

use regex::Regex;
use serde::{Deserialize, Serialize};

/// Default indicator patterns, case-insensitive, with their weights.
const INDICATOR_PATTERNS: &[(&str, f64)] = &[
    (r"never|fake|hoax|scam|lie", 0.3),
    (r"secret|hidden|cover.?up|conspiracy", 0.25),
    (r"they don't want you to know", 0.4),
    (r"mainstream media|msm.*lie", 0.2),
    (r"wake up|sheep|sheeple", 0.3),
    (r"100%|always|never.*true", 0.15),
    (r"proven.*false|debunked", -0.2),
];

/// Default co-occurrence boosts: both substrings must appear in the lowercased text.
const CO_OCCURRENCE_BOOSTS: &[(&str, &str, f64)] = &[
    ("moon landing", "fake", 0.4),
    ("vaccine", "microchip", 0.5),
    ("earth", "flat", 0.6),
    ("5g", "covid", 0.4),
];

/// A weighted regular-expression indicator.
#[derive(Debug, Clone)]
pub struct Indicator {
    pub pattern: Regex,
    pub weight: f64,
}

/// A weighted pair of substrings that must both occur.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CoOccurrence {
    pub first: String,
    pub second: String,
    pub weight: f64,
}

/// Result of scoring with the contributing rules listed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoreBreakdown {
    /// Clamped score in `[0, 1]`.
    pub score: f64,
    /// Sum of all fired weights before clamping.
    pub raw_score: f64,
    /// Labels of every rule that fired, in evaluation order.
    pub fired: Vec<String>,
}

/// Pattern-based fake-probability scorer. Pure: same text, same score.
#[derive(Debug, Clone)]
pub struct FakeProbabilityScorer {
    indicators: Vec<Indicator>,
    boosts: Vec<CoOccurrence>,
}

impl Default for FakeProbabilityScorer {
    fn default() -> Self {
        Self::new()
    }
}

impl FakeProbabilityScorer {
    /// Create a scorer with the built-in rule set.
    pub fn new() -> Self {
        let indicators = INDICATOR_PATTERNS
            .iter()
            .filter_map(|(pat, weight)| {
                Regex::new(&format!("(?i){pat}"))
                    .ok()
                    .map(|pattern| Indicator {
                        pattern,
                        weight: *weight,
                    })
            })
            .collect();
        let boosts = CO_OCCURRENCE_BOOSTS
            .iter()
            .map(|(first, second, weight)| CoOccurrence {
                first: first.to_string(),
                second: second.to_string(),
                weight: *weight,
            })
            .collect();
        Self { indicators, boosts }
    }

    /// Create a scorer from explicit rules.
    pub fn with_rules(indicators: Vec<Indicator>, boosts: Vec<CoOccurrence>) -> Self {
        Self { indicators, boosts }
    }

    /// Probability in `[0, 1]` that the text is disinformation.
    pub fn score(&self, text: &str) -> f64 {
        self.explain(text).score
    }

    /// Score the text and report which rules fired.
    pub fn explain(&self, text: &str) -> ScoreBreakdown {
        let lower = text.to_lowercase();
        let mut raw_score = 0.0;
        let mut fired = Vec::new();

        for indicator in &self.indicators {
            if indicator.pattern.is_match(text) {
                raw_score += indicator.weight;
                fired.push(indicator.pattern.as_str().trim_start_matches("(?i)").to_string());
            }
        }

        for boost in &self.boosts {
            if lower.contains(&boost.first) && lower.contains(&boost.second) {
                raw_score += boost.weight;
                fired.push(format!("{}+{}", boost.first, boost.second));
            }
        }

        ScoreBreakdown {
            score: raw_score.clamp(0.0, 1.0),
            raw_score,
            fired,
        }
    }
}
