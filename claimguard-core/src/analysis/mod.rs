//! Claim analysis: generative classification with local fallback.
//!
//! [`AnalysisOrchestrator::analyze`] tries the generative service first. Any
//! failure (unreachable, non-2xx, empty or unparsable reply) is logged and
//! replaced by the configured degraded result, so `analyze` always answers.

pub mod heuristic;
pub mod reply;

use std::sync::Arc;
use tracing::{debug, warn};

use crate::config::{AnalysisConfig, DegradedMode};
use crate::error::GenerativeError;
use crate::prompts;
use crate::providers::{GenerateRequest, GenerativeProvider};
use crate::types::AnalysisResult;

pub use heuristic::HeuristicAnalyzer;
pub use reply::parse_analysis_reply;

/// Routes a claim through the generative service or the degraded path.
pub struct AnalysisOrchestrator {
    provider: Option<Arc<dyn GenerativeProvider>>,
    heuristic: HeuristicAnalyzer,
    settings: AnalysisConfig,
}

impl AnalysisOrchestrator {
    /// `provider` is `None` when the generative service is disabled.
    pub fn new(
        provider: Option<Arc<dyn GenerativeProvider>>,
        heuristic: HeuristicAnalyzer,
        settings: AnalysisConfig,
    ) -> Self {
        Self {
            provider,
            heuristic,
            settings,
        }
    }

    /// An orchestrator that never calls out.
    pub fn offline(settings: AnalysisConfig) -> Self {
        Self::new(None, HeuristicAnalyzer::default(), settings)
    }

    pub fn heuristic(&self) -> &HeuristicAnalyzer {
        &self.heuristic
    }

    /// Classify a claim. Never fails.
    pub async fn analyze(&self, text: &str) -> AnalysisResult {
        match self.analyze_remote(text).await {
            Ok(result) => {
                debug!(
                    topic = %result.topic,
                    fake_probability = result.fake_probability,
                    "Generative analysis succeeded"
                );
                result
            }
            Err(GenerativeError::Disabled) => {
                debug!(
                    degraded_mode = %self.settings.degraded_mode,
                    "Generative service disabled, using degraded result"
                );
                self.degraded(text)
            }
            Err(e) => {
                warn!(
                    kind = %e.kind(),
                    error = %e,
                    degraded_mode = %self.settings.degraded_mode,
                    "Generative analysis failed, using degraded result"
                );
                self.degraded(text)
            }
        }
    }

    /// The generative path alone, with its error surfaced.
    pub async fn analyze_remote(&self, text: &str) -> Result<AnalysisResult, GenerativeError> {
        let provider = self.provider.as_ref().ok_or(GenerativeError::Disabled)?;
        let raw = provider
            .generate(GenerateRequest::new(prompts::analysis_prompt(text)))
            .await?;
        let mut result = parse_analysis_reply(&raw, self.heuristic.extractor())?;

        if self.settings.enrich_remote_results {
            let ex = self.heuristic.extractor();
            result.entity = ex.extract_entity(text);
            result.entities = ex.extract_entities(text);
            result.sentiment = ex.analyze_sentiment(text);
            result.keywords = ex.extract_keywords(text);
            result.language = ex.detect_language(text);
        }
        Ok(result)
    }

    fn degraded(&self, text: &str) -> AnalysisResult {
        match self.settings.degraded_mode {
            DegradedMode::Heuristic => self.heuristic.analyze(text),
            DegradedMode::Neutral => AnalysisResult::service_unavailable(),
        }
    }
}
