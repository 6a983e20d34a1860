//! Curated per-topic fact sources.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use crate::types::FactSource;

/// (topic, source, url, relevance, summary, title)
const CURATED: &[(&str, &str, &str, f64, &str, &str)] = &[
    (
        "space",
        "NASA",
        "https://www.nasa.gov/mission_pages/apollo/",
        0.95,
        "Official NASA documentation of Apollo missions with extensive evidence and data.",
        "Apollo Program Overview",
    ),
    (
        "health",
        "WHO",
        "https://www.who.int/news-room/feature-stories/detail/the-race-for-a-covid-19-vaccine-explained",
        0.95,
        "World Health Organization official information about vaccine safety and efficacy.",
        "Vaccine Safety and Efficacy",
    ),
    (
        "climate",
        "IPCC",
        "https://www.ipcc.ch/reports/",
        0.98,
        "Intergovernmental Panel on Climate Change scientific reports on climate change.",
        "Climate Change Scientific Evidence",
    ),
    (
        "science",
        "NASA Earth Science",
        "https://www.nasa.gov/audience/forstudents/k-4/stories/nasa-knows/what-is-earth-k4.html",
        0.99,
        "Scientific evidence for Earth's spherical shape from multiple sources.",
        "Earth's Shape: Scientific Evidence",
    ),
    (
        "technology",
        "FCC",
        "https://www.fcc.gov/consumers/guides/wireless-devices-and-health-concerns",
        0.92,
        "Federal Communications Commission information on wireless technology safety.",
        "5G Technology Safety Standards",
    ),
];

/// Static table of curated sources keyed by topic. Entry order within a
/// topic is preserved.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SourceCatalog {
    entries: HashMap<String, Vec<FactSource>>,
}

impl Default for SourceCatalog {
    fn default() -> Self {
        let mut catalog = Self::empty();
        for (topic, source, url, relevance, summary, title) in CURATED {
            catalog.insert(
                topic,
                FactSource {
                    source: source.to_string(),
                    url: url.to_string(),
                    relevance: *relevance,
                    summary: summary.to_string(),
                    title: title.to_string(),
                    published_at: None,
                },
            );
        }
        catalog
    }
}

impl SourceCatalog {
    pub fn empty() -> Self {
        Self {
            entries: HashMap::new(),
        }
    }

    /// Append a source to a topic's list.
    pub fn insert(&mut self, topic: &str, source: FactSource) {
        self.entries.entry(topic.to_string()).or_default().push(source);
    }

    /// Sources for `topic`; empty for unknown topics.
    pub fn sources_for(&self, topic: &str) -> &[FactSource] {
        self.entries.get(topic).map(Vec::as_slice).unwrap_or(&[])
    }
}
