//! Fundamental types used throughout ClaimGuard.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

/// Topic assigned when nothing in the lexicon matches.
pub const GENERAL_TOPIC: &str = "general";

/// Probability above which a claim counts as disinformation.
pub const FAKE_THRESHOLD: f64 = 0.5;

/// Overall tone of a claim.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Sentiment {
    Positive,
    Negative,
    #[default]
    Neutral,
}

impl fmt::Display for Sentiment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Sentiment::Positive => write!(f, "positive"),
            Sentiment::Negative => write!(f, "negative"),
            Sentiment::Neutral => write!(f, "neutral"),
        }
    }
}

/// Heuristically detected claim language.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    #[default]
    En,
    Ru,
}

impl Language {
    pub fn code(&self) -> &'static str {
        match self {
            Language::En => "en",
            Language::Ru => "ru",
        }
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

/// Which path produced an [`AnalysisResult`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AnalysisMethod {
    /// Parsed from the generative service's reply.
    Generative,
    /// Local pattern-based analysis.
    Heuristic,
    /// Fixed neutral answer used when nothing else is available.
    Default,
}

/// Classification of a single claim.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisResult {
    pub is_fake: bool,
    /// Probability in `[0, 1]` that the claim is disinformation.
    pub fake_probability: f64,
    /// Confidence in `[0, 1]` of the producing path.
    pub confidence: f64,
    pub topic: String,
    pub entity: Option<String>,
    pub entities: Vec<String>,
    pub sentiment: Sentiment,
    pub keywords: Vec<String>,
    pub language: Language,
    pub reasoning: String,
    pub method: AnalysisMethod,
}

impl AnalysisResult {
    /// The fixed answer returned when the generative service is unavailable
    /// and the orchestrator runs in neutral degraded mode.
    pub fn service_unavailable() -> Self {
        Self {
            is_fake: false,
            fake_probability: 0.1,
            confidence: 0.3,
            topic: GENERAL_TOPIC.to_string(),
            entity: None,
            entities: Vec::new(),
            sentiment: Sentiment::Neutral,
            keywords: Vec::new(),
            language: Language::En,
            reasoning: "Service unavailable".to_string(),
            method: AnalysisMethod::Default,
        }
    }

    pub fn severity(&self) -> Severity {
        Severity::from_probability(self.fake_probability)
    }
}

/// Risk grade derived from the fake probability.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Low,
    Medium,
    High,
}

impl Severity {
    pub fn from_probability(p: f64) -> Self {
        if p > 0.7 {
            Severity::High
        } else if p > 0.4 {
            Severity::Medium
        } else {
            Severity::Low
        }
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Severity::Low => write!(f, "low"),
            Severity::Medium => write!(f, "medium"),
            Severity::High => write!(f, "high"),
        }
    }
}

/// A reference record supporting or refuting a claim's topic.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FactSource {
    pub source: String,
    pub url: String,
    /// Relevance to the topic in `[0, 1]`.
    pub relevance: f64,
    pub summary: String,
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub published_at: Option<DateTime<Utc>>,
}

/// Everything the pipeline produced for one claim.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClaimReport {
    pub id: Uuid,
    pub text: String,
    pub analysis: AnalysisResult,
    /// Always `analysis.fake_probability > 0.5`, whatever the analysis path said.
    pub is_fake: bool,
    pub severity: Severity,
    pub fact_sources: Vec<FactSource>,
    pub counter_narrative: Option<String>,
    pub hashtags: Vec<String>,
    pub mentions: Vec<String>,
    pub processed_at: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_severity_thresholds() {
        assert_eq!(Severity::from_probability(0.0), Severity::Low);
        assert_eq!(Severity::from_probability(0.4), Severity::Low);
        assert_eq!(Severity::from_probability(0.41), Severity::Medium);
        assert_eq!(Severity::from_probability(0.7), Severity::Medium);
        assert_eq!(Severity::from_probability(0.71), Severity::High);
        assert!(Severity::High > Severity::Low);
    }

    #[test]
    fn test_service_unavailable_defaults() {
        let a = AnalysisResult::service_unavailable();
        assert!(!a.is_fake);
        assert!((a.fake_probability - 0.1).abs() < f64::EPSILON);
        assert!((a.confidence - 0.3).abs() < f64::EPSILON);
        assert_eq!(a.topic, "general");
        assert_eq!(a.reasoning, "Service unavailable");
        assert_eq!(a.method, AnalysisMethod::Default);
        assert_eq!(a.severity(), Severity::Low);
    }

    #[test]
    fn test_analysis_serializes_camel_case() {
        let json = serde_json::to_value(AnalysisResult::service_unavailable()).unwrap();
        assert_eq!(json["isFake"], false);
        assert_eq!(json["fakeProbability"], 0.1);
        assert_eq!(json["sentiment"], "neutral");
        assert_eq!(json["language"], "en");
        assert_eq!(json["method"], "default");
        assert!(json["entity"].is_null());
    }

    #[test]
    fn test_fact_source_omits_missing_date() {
        let source = FactSource {
            source: "IPCC".into(),
            url: "https://www.ipcc.ch/reports/".into(),
            relevance: 0.98,
            summary: "Reports".into(),
            title: "Climate".into(),
            published_at: None,
        };
        let json = serde_json::to_value(&source).unwrap();
        assert!(json.get("publishedAt").is_none());
        let back: FactSource = serde_json::from_value(json).unwrap();
        assert_eq!(back, source);
    }
}
