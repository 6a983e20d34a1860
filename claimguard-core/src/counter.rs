//! Counter-narrative generation.
//!
//! The generative service writes the rebuttal. When it is disabled or fails,
//! a template for the claim's topic is picked at random and, if fact
//! sources were supplied, the first one is cited.

use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{RngCore, SeedableRng};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::sync::{Arc, LazyLock, Mutex};
use tracing::{debug, warn};

use crate::config::CounterConfig;
use crate::error::GenerativeError;
use crate::prompts;
use crate::providers::{GenerateRequest, GenerativeProvider, SamplingOptions};
use crate::types::FactSource;

const ELLIPSIS: &str = "...";

static LEADING_LABEL: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)^(Counter-narrative:|Response:|Answer:)\s*").expect("valid regex")
});

const SPACE_TEMPLATES: &[&str] = &[
    "NASA's Apollo missions are well-documented with evidence including lunar samples, retroreflectors placed on the moon, and independent verification from multiple countries.",
    "Space missions have been independently verified by multiple space agencies worldwide, including recent lunar missions from China and India.",
    "Physical evidence from moon landings includes 842 pounds of lunar samples analyzed by scientists globally.",
];

const HEALTH_TEMPLATES: &[&str] = &[
    "Medical information should be verified with healthcare professionals and official health organizations like WHO and CDC.",
    "Vaccines undergo rigorous testing and monitoring by health authorities worldwide before approval.",
    "Scientific consensus is based on peer-reviewed research and evidence from multiple independent studies.",
];

const CLIMATE_TEMPLATES: &[&str] = &[
    "Climate change is supported by overwhelming scientific evidence from thousands of researchers worldwide.",
    "Temperature records, ice core data, and satellite measurements all confirm human impact on climate.",
    "The IPCC represents the consensus of climate scientists from 195 countries.",
];

const SCIENCE_TEMPLATES: &[&str] = &[
    "Scientific facts are established through rigorous peer review and reproducible experiments.",
    "Multiple independent sources of evidence support established scientific principles.",
    "Scientific theories are based on extensive observation, testing, and verification.",
];

const TECHNOLOGY_TEMPLATES: &[&str] = &[
    "Technology safety standards are established by regulatory agencies based on extensive research.",
    "Electromagnetic radiation from consumer devices operates within safe limits set by international standards.",
    "Health claims about technology should be verified through peer-reviewed scientific studies.",
];

const GENERIC_TEMPLATES: &[&str] = &[
    "This claim should be verified through reliable sources and fact-checking organizations.",
    "It's important to check multiple credible sources before accepting information as fact.",
    "Consider the source and look for evidence-based information from authoritative organizations.",
];

/// Per-topic rebuttal templates with a generic set for everything else.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TemplateTable {
    topics: HashMap<String, Vec<String>>,
    generic: Vec<String>,
}

impl Default for TemplateTable {
    fn default() -> Self {
        let owned = |list: &[&str]| list.iter().map(|s| s.to_string()).collect::<Vec<_>>();
        let topics = [
            ("space", SPACE_TEMPLATES),
            ("health", HEALTH_TEMPLATES),
            ("climate", CLIMATE_TEMPLATES),
            ("science", SCIENCE_TEMPLATES),
            ("technology", TECHNOLOGY_TEMPLATES),
        ]
        .into_iter()
        .map(|(topic, list)| (topic.to_string(), owned(list)))
        .collect();
        Self {
            topics,
            generic: owned(GENERIC_TEMPLATES),
        }
    }
}

impl TemplateTable {
    /// Templates for `topic`, or the generic set when the topic has none.
    pub fn templates_for(&self, topic: &str) -> &[String] {
        self.topics
            .get(topic)
            .filter(|list| !list.is_empty())
            .unwrap_or(&self.generic)
    }
}

/// Produces a short rebuttal for a claim. Always returns usable text.
pub struct CounterNarrativeGenerator {
    provider: Option<Arc<dyn GenerativeProvider>>,
    templates: TemplateTable,
    settings: CounterConfig,
    rng: Mutex<Box<dyn RngCore + Send>>,
}

impl CounterNarrativeGenerator {
    pub fn new(
        provider: Option<Arc<dyn GenerativeProvider>>,
        templates: TemplateTable,
        settings: CounterConfig,
    ) -> Self {
        Self {
            provider,
            templates,
            settings,
            rng: Mutex::new(Box::new(StdRng::from_entropy())),
        }
    }

    /// Template-only generator.
    pub fn offline(settings: CounterConfig) -> Self {
        Self::new(None, TemplateTable::default(), settings)
    }

    /// Replace the template picker's random source.
    pub fn with_rng(mut self, rng: impl RngCore + Send + 'static) -> Self {
        self.rng = Mutex::new(Box::new(rng));
        self
    }

    pub fn templates(&self) -> &TemplateTable {
        &self.templates
    }

    pub async fn generate_counter_narrative(
        &self,
        text: &str,
        topic: &str,
        sources: &[FactSource],
    ) -> String {
        match self.generate_remote(text, topic, sources).await {
            Ok(narrative) => narrative,
            Err(GenerativeError::Disabled) => {
                debug!(topic = %topic, "Generative service disabled, using template");
                self.fallback_narrative(topic, sources)
            }
            Err(e) => {
                warn!(
                    topic = %topic,
                    kind = %e.kind(),
                    error = %e,
                    "Counter-narrative generation failed, using template"
                );
                self.fallback_narrative(topic, sources)
            }
        }
    }

    /// The generative path alone. A reply that is empty after cleanup is
    /// reported as [`GenerativeError::EmptyResponse`].
    pub async fn generate_remote(
        &self,
        text: &str,
        topic: &str,
        sources: &[FactSource],
    ) -> Result<String, GenerativeError> {
        let provider = self.provider.as_ref().ok_or(GenerativeError::Disabled)?;
        let request = GenerateRequest::new(prompts::counter_narrative_prompt(text, topic, sources))
            .with_options(SamplingOptions {
                temperature: self.settings.temperature,
                top_p: self.settings.top_p,
                max_tokens: self.settings.max_tokens,
            });
        let raw = provider.generate(request).await?;
        let cleaned = clean_narrative(&raw, self.settings.max_chars);
        if cleaned.is_empty() {
            return Err(GenerativeError::EmptyResponse);
        }
        Ok(cleaned)
    }

    /// A random template for `topic`, citing the first source if any.
    pub fn fallback_narrative(&self, topic: &str, sources: &[FactSource]) -> String {
        let templates = self.templates.templates_for(topic);
        let picked = {
            let mut rng = self.rng.lock().unwrap_or_else(|e| e.into_inner());
            templates.choose(&mut **rng).cloned()
        };
        let mut narrative = picked.unwrap_or_else(|| GENERIC_TEMPLATES[0].to_string());
        if let Some(first) = sources.first() {
            narrative.push_str(&format!(" Source: {} - {}", first.source, first.title));
        }
        narrative
    }
}

/// Trim, drop a leading label, and cap at `max_chars` characters (the
/// ellipsis included).
pub fn clean_narrative(raw: &str, max_chars: usize) -> String {
    let stripped = LEADING_LABEL.replace(raw.trim(), "");
    let text = stripped.trim();
    if text.chars().count() <= max_chars {
        return text.to_string();
    }
    let keep = max_chars.saturating_sub(ELLIPSIS.len());
    let mut truncated: String = text.chars().take(keep).collect();
    truncated.push_str(ELLIPSIS);
    truncated
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::providers::MockGenerativeProvider;

    fn nasa() -> FactSource {
        FactSource {
            source: "NASA".into(),
            url: "https://www.nasa.gov/mission_pages/apollo/".into(),
            relevance: 0.95,
            summary: String::new(),
            title: "Apollo Program Overview".into(),
            published_at: None,
        }
    }

    fn generator(mock: MockGenerativeProvider) -> CounterNarrativeGenerator {
        CounterNarrativeGenerator::new(
            Some(Arc::new(mock)),
            TemplateTable::default(),
            CounterConfig::default(),
        )
        .with_rng(StdRng::seed_from_u64(7))
    }

    #[test]
    fn test_template_table_fallback_to_generic() {
        let table = TemplateTable::default();
        assert_eq!(table.templates_for("space").len(), 3);
        assert_eq!(table.templates_for("politics"), table.templates_for("general"));
        assert_eq!(table.templates_for("general")[0], GENERIC_TEMPLATES[0]);
    }

    #[test]
    fn test_clean_strips_labels() {
        assert_eq!(
            clean_narrative("  Counter-narrative: The moon landing happened.  ", 500),
            "The moon landing happened."
        );
        assert_eq!(clean_narrative("ANSWER:   Yes.", 500), "Yes.");
        assert_eq!(clean_narrative("response:x", 500), "x");
        // Only a leading label is removed.
        assert_eq!(clean_narrative("The Answer: 42", 500), "The Answer: 42");
    }

    #[test]
    fn test_clean_truncates_on_chars() {
        let long = "é".repeat(600);
        let cleaned = clean_narrative(&long, 500);
        assert_eq!(cleaned.chars().count(), 500);
        assert!(cleaned.ends_with("..."));

        let exact = "a".repeat(500);
        assert_eq!(clean_narrative(&exact, 500), exact);
    }

    #[tokio::test]
    async fn test_remote_reply_cleaned_and_options_sent() {
        let mock = Arc::new(MockGenerativeProvider::with_response(
            "Response: Apollo samples were studied worldwide.",
        ));
        let generator = CounterNarrativeGenerator::new(
            Some(mock.clone()),
            TemplateTable::default(),
            CounterConfig::default(),
        );
        let text = generator
            .generate_counter_narrative("The moon landing was faked", "space", &[nasa()])
            .await;
        assert_eq!(text, "Apollo samples were studied worldwide.");

        let requests = mock.requests();
        assert_eq!(requests.len(), 1);
        assert!(requests[0].prompt.contains("- NASA: Apollo Program Overview"));
        let opts = requests[0].options.unwrap();
        assert!((opts.temperature - 0.4).abs() < 1e-6);
        assert!((opts.top_p - 0.8).abs() < 1e-6);
        assert_eq!(opts.max_tokens, 300);
    }

    #[tokio::test]
    async fn test_failure_uses_template_with_source() {
        let text = generator(MockGenerativeProvider::failing())
            .generate_counter_narrative("The moon landing was faked", "space", &[nasa()])
            .await;
        let suffix = " Source: NASA - Apollo Program Overview";
        assert!(text.ends_with(suffix));
        let body = text.trim_end_matches(suffix);
        assert!(SPACE_TEMPLATES.contains(&body));
    }

    #[tokio::test]
    async fn test_blank_reply_uses_template() {
        let mock = MockGenerativeProvider::with_response("Answer:   ");
        let text = generator(mock)
            .generate_counter_narrative("Some claim here", "health", &[])
            .await;
        assert!(HEALTH_TEMPLATES.contains(&text.as_str()));
    }

    #[tokio::test]
    async fn test_unknown_topic_generic_without_sources() {
        let generator = CounterNarrativeGenerator::offline(CounterConfig::default())
            .with_rng(StdRng::seed_from_u64(1));
        let text = generator
            .generate_counter_narrative("Something odd", "politics", &[])
            .await;
        assert!(GENERIC_TEMPLATES.contains(&text.as_str()));
    }

    #[test]
    fn test_seeded_rng_is_repeatable() {
        let a = CounterNarrativeGenerator::offline(CounterConfig::default())
            .with_rng(StdRng::seed_from_u64(42));
        let b = CounterNarrativeGenerator::offline(CounterConfig::default())
            .with_rng(StdRng::seed_from_u64(42));
        for _ in 0..5 {
            assert_eq!(
                a.fallback_narrative("climate", &[]),
                b.fallback_narrative("climate", &[])
            );
        }
    }
}
