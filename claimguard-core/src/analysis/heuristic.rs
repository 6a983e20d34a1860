//! Network-free analysis built from the extractor and the scorer.

use crate::extractor::TopicExtractor;
use crate::scorer::FakeProbabilityScorer;
use crate::types::{AnalysisMethod, AnalysisResult, FAKE_THRESHOLD};

/// Confidence reported for pattern-based results.
const HEURISTIC_CONFIDENCE: f64 = 0.6;

/// Composes [`TopicExtractor`] and [`FakeProbabilityScorer`] into a full
/// [`AnalysisResult`]. `is_fake` is always `fake_probability > 0.5`.
#[derive(Debug, Clone, Default)]
pub struct HeuristicAnalyzer {
    extractor: TopicExtractor,
    scorer: FakeProbabilityScorer,
}

impl HeuristicAnalyzer {
    pub fn new(extractor: TopicExtractor, scorer: FakeProbabilityScorer) -> Self {
        Self { extractor, scorer }
    }

    pub fn extractor(&self) -> &TopicExtractor {
        &self.extractor
    }

    pub fn scorer(&self) -> &FakeProbabilityScorer {
        &self.scorer
    }

    pub fn analyze(&self, text: &str) -> AnalysisResult {
        let breakdown = self.scorer.explain(text);
        let reasoning = if breakdown.fired.is_empty() {
            "Pattern-based analysis (generative service unavailable); no indicators matched"
                .to_string()
        } else {
            format!(
                "Pattern-based analysis (generative service unavailable); matched: {}",
                breakdown.fired.join(", ")
            )
        };

        AnalysisResult {
            is_fake: breakdown.score > FAKE_THRESHOLD,
            fake_probability: breakdown.score,
            confidence: HEURISTIC_CONFIDENCE,
            topic: self.extractor.extract_topic(text),
            entity: self.extractor.extract_entity(text),
            entities: self.extractor.extract_entities(text),
            sentiment: self.extractor.analyze_sentiment(text),
            keywords: self.extractor.extract_keywords(text),
            language: self.extractor.detect_language(text),
            reasoning,
            method: AnalysisMethod::Heuristic,
        }
    }
}
