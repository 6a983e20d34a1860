//! End-to-end claim processing.
//!
//! [`ClaimPipeline::process`] runs the three stages in order: analysis, fact
//! lookup for the resulting topic, then a counter-narrative when the claim is
//! risky. Only claim validation can fail; every remote failure degrades
//! inside its stage.

use chrono::Utc;
use tracing::{info, instrument};
use uuid::Uuid;

use crate::analysis::{AnalysisOrchestrator, HeuristicAnalyzer};
use crate::config::{ClaimGuardConfig, PipelineConfig};
use crate::counter::{CounterNarrativeGenerator, TemplateTable};
use crate::error::{ClaimError, ConfigError};
use crate::facts::{FactSourceAggregator, SourceCatalog, create_lookup};
use crate::providers::create_provider;
use crate::types::{AnalysisResult, ClaimReport, FAKE_THRESHOLD, FactSource, Severity};

/// The analysis, aggregation and counter-narrative stages wired together.
pub struct ClaimPipeline {
    orchestrator: AnalysisOrchestrator,
    aggregator: FactSourceAggregator,
    generator: CounterNarrativeGenerator,
    settings: PipelineConfig,
}

impl ClaimPipeline {
    pub fn new(
        orchestrator: AnalysisOrchestrator,
        aggregator: FactSourceAggregator,
        generator: CounterNarrativeGenerator,
        settings: PipelineConfig,
    ) -> Self {
        Self {
            orchestrator,
            aggregator,
            generator,
            settings,
        }
    }

    /// Build the pipeline with real clients. The generative provider is
    /// shared by analysis and counter-narrative generation.
    pub fn from_config(config: &ClaimGuardConfig) -> Result<Self, ConfigError> {
        let provider = create_provider(&config.generative)?;
        let lookup = create_lookup(&config.encyclopedia)?;

        let orchestrator = AnalysisOrchestrator::new(
            provider.clone(),
            HeuristicAnalyzer::default(),
            config.analysis.clone(),
        );
        let aggregator = FactSourceAggregator::new(lookup, SourceCatalog::default());
        let generator =
            CounterNarrativeGenerator::new(provider, TemplateTable::default(), config.counter.clone());

        Ok(Self::new(
            orchestrator,
            aggregator,
            generator,
            config.pipeline.clone(),
        ))
    }

    pub fn orchestrator(&self) -> &AnalysisOrchestrator {
        &self.orchestrator
    }

    pub fn aggregator(&self) -> &FactSourceAggregator {
        &self.aggregator
    }

    pub fn generator(&self) -> &CounterNarrativeGenerator {
        &self.generator
    }

    pub async fn analyze(&self, text: &str) -> AnalysisResult {
        self.orchestrator.analyze(text).await
    }

    pub async fn find_fact_sources(&self, topic: &str) -> Vec<FactSource> {
        self.aggregator.find_fact_sources(topic).await
    }

    pub async fn generate_counter_narrative(
        &self,
        text: &str,
        topic: &str,
        sources: &[FactSource],
    ) -> String {
        self.generator
            .generate_counter_narrative(text, topic, sources)
            .await
    }

    /// Reject claims whose trimmed text is shorter than the configured minimum.
    pub fn validate_claim<'a>(&self, text: &'a str) -> Result<&'a str, ClaimError> {
        let trimmed = text.trim();
        let actual = trimmed.chars().count();
        if actual < self.settings.min_claim_chars {
            return Err(ClaimError::TooShort {
                min: self.settings.min_claim_chars,
                actual,
            });
        }
        Ok(trimmed)
    }

    #[instrument(skip_all, fields(chars = text.chars().count()))]
    pub async fn process(&self, text: &str) -> Result<ClaimReport, ClaimError> {
        let claim = self.validate_claim(text)?;

        let analysis = self.analyze(claim).await;
        let fact_sources = self.find_fact_sources(&analysis.topic).await;

        let counter_narrative = if analysis.fake_probability > self.settings.counter_threshold {
            Some(
                self.generate_counter_narrative(claim, &analysis.topic, &fact_sources)
                    .await,
            )
        } else {
            None
        };

        let extractor = self.orchestrator.heuristic().extractor();
        let report = ClaimReport {
            id: Uuid::new_v4(),
            text: claim.to_string(),
            is_fake: analysis.fake_probability > FAKE_THRESHOLD,
            severity: Severity::from_probability(analysis.fake_probability),
            hashtags: extractor.extract_hashtags(claim),
            mentions: extractor.extract_mentions(claim),
            analysis,
            fact_sources,
            counter_narrative,
            processed_at: Utc::now(),
        };

        info!(
            id = %report.id,
            topic = %report.analysis.topic,
            method = ?report.analysis.method,
            severity = %report.severity,
            sources = report.fact_sources.len(),
            countered = report.counter_narrative.is_some(),
            "Claim processed"
        );
        Ok(report)
    }
}
