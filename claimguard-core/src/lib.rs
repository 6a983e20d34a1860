//! # ClaimGuard Core
//!
//! Core library for ClaimGuard, a disinformation triage pipeline.
//! Provides claim analysis (generative classification with a pattern-based
//! fallback), fact-source aggregation, counter-narrative generation,
//! configuration, and the shared result types.

pub mod analysis;
pub mod analytics;
pub mod config;
pub mod counter;
pub mod error;
pub mod extractor;
pub mod facts;
pub mod lexicon;
pub mod pipeline;
pub mod prompts;
pub mod providers;
pub mod scorer;
pub mod types;

// Re-export commonly used types at the crate root.
pub use analysis::{AnalysisOrchestrator, HeuristicAnalyzer};
pub use analytics::AnalyticsSummary;
pub use config::{ClaimGuardConfig, DegradedMode};
pub use counter::{CounterNarrativeGenerator, TemplateTable};
pub use error::{ClaimError, ClaimGuardError, FailureKind, Result};
pub use extractor::TopicExtractor;
pub use facts::{EncyclopediaLookup, FactSourceAggregator, SourceCatalog, WikipediaClient};
pub use lexicon::Lexicon;
pub use pipeline::ClaimPipeline;
pub use providers::{GenerativeProvider, MockGenerativeProvider, OllamaProvider};
pub use scorer::FakeProbabilityScorer;
pub use types::{
    AnalysisMethod, AnalysisResult, ClaimReport, FactSource, Language, Sentiment, Severity,
};
