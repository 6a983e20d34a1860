//! Fact-source aggregation.
//!
//! [`FactSourceAggregator::find_fact_sources`] merges one encyclopedic
//! summary (when the lookup succeeds) with the curated entries for a topic.
//! Lookup failures are logged and contribute nothing.

pub mod catalog;
pub mod wikipedia;

use async_trait::async_trait;
use std::collections::VecDeque;
use std::sync::{Arc, Mutex};
use tracing::{debug, warn};

use crate::config::EncyclopediaConfig;
use crate::error::{ConfigError, LookupError};
use crate::types::FactSource;

pub use catalog::SourceCatalog;
pub use wikipedia::{ENCYCLOPEDIA_RELEVANCE, EncyclopediaLookup, WikipediaClient};

/// Create an encyclopedic lookup from configuration.
///
/// Returns `Ok(None)` when lookups are disabled.
pub fn create_lookup(
    config: &EncyclopediaConfig,
) -> Result<Option<Arc<dyn EncyclopediaLookup>>, ConfigError> {
    if !config.enabled {
        return Ok(None);
    }
    Ok(Some(Arc::new(WikipediaClient::new(config)?)))
}

/// Combines the encyclopedic lookup with the curated catalog.
pub struct FactSourceAggregator {
    lookup: Option<Arc<dyn EncyclopediaLookup>>,
    catalog: SourceCatalog,
}

impl FactSourceAggregator {
    pub fn new(lookup: Option<Arc<dyn EncyclopediaLookup>>, catalog: SourceCatalog) -> Self {
        Self { lookup, catalog }
    }

    /// Curated sources only.
    pub fn offline() -> Self {
        Self::new(None, SourceCatalog::default())
    }

    pub fn catalog(&self) -> &SourceCatalog {
        &self.catalog
    }

    /// Sources for `topic`: the encyclopedic summary first, then curated
    /// entries in table order. Never fails.
    pub async fn find_fact_sources(&self, topic: &str) -> Vec<FactSource> {
        let mut sources = Vec::new();

        match self.lookup_summary(topic).await {
            Ok(source) => sources.push(source),
            Err(LookupError::Disabled) => {}
            Err(e) => warn!(
                topic = %topic,
                kind = %e.kind(),
                error = %e,
                "Encyclopedic lookup yielded no source"
            ),
        }

        sources.extend_from_slice(self.catalog.sources_for(topic));
        debug!(topic = %topic, count = sources.len(), "Fact sources collected");
        sources
    }

    async fn lookup_summary(&self, topic: &str) -> Result<FactSource, LookupError> {
        let lookup = self.lookup.as_ref().ok_or(LookupError::Disabled)?;
        lookup.summary(topic).await
    }
}

/// A scripted lookup for tests. Once the queue is empty every call returns
/// [`LookupError::NoResult`]. Requested topics are recorded.
#[derive(Default)]
pub struct MockEncyclopediaLookup {
    replies: Mutex<VecDeque<Result<FactSource, LookupError>>>,
    topics: Mutex<Vec<String>>,
}

impl MockEncyclopediaLookup {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn queue_source(&self, source: FactSource) {
        self.replies
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .push_back(Ok(source));
    }

    pub fn queue_error(&self, error: LookupError) {
        self.replies
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .push_back(Err(error));
    }

    pub fn topics(&self) -> Vec<String> {
        self.topics.lock().unwrap_or_else(|e| e.into_inner()).clone()
    }
}

#[async_trait]
impl EncyclopediaLookup for MockEncyclopediaLookup {
    async fn summary(&self, topic: &str) -> Result<FactSource, LookupError> {
        self.topics
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .push(topic.to_string());
        self.replies
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .pop_front()
            .unwrap_or_else(|| {
                Err(LookupError::NoResult {
                    topic: topic.to_string(),
                })
            })
    }
}
