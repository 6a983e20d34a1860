//! Aggregate statistics over processed claims.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::types::{ClaimReport, FAKE_THRESHOLD, Severity};

/// Counts over a batch of [`ClaimReport`]s.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalyticsSummary {
    pub total_claims: usize,
    pub disinformation_detected: usize,
    pub counter_narratives_generated: usize,
    pub high_risk: usize,
    /// Share of claims flagged as disinformation, as a rounded percentage.
    pub disinformation_rate: u32,
    pub by_topic: BTreeMap<String, usize>,
}

impl AnalyticsSummary {
    pub fn from_reports(reports: &[ClaimReport]) -> Self {
        let mut summary = Self {
            total_claims: reports.len(),
            ..Self::default()
        };

        for report in reports {
            let p = report.analysis.fake_probability;
            if p > FAKE_THRESHOLD {
                summary.disinformation_detected += 1;
            }
            if Severity::from_probability(p) == Severity::High {
                summary.high_risk += 1;
            }
            if report.counter_narrative.is_some() {
                summary.counter_narratives_generated += 1;
            }
            *summary
                .by_topic
                .entry(report.analysis.topic.clone())
                .or_insert(0) += 1;
        }

        if summary.total_claims > 0 {
            let rate =
                summary.disinformation_detected as f64 / summary.total_claims as f64 * 100.0;
            summary.disinformation_rate = rate.round() as u32;
        }
        summary
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::AnalysisResult;
    use chrono::Utc;
    use pretty_assertions::assert_eq;
    use uuid::Uuid;

    fn report(topic: &str, p: f64, countered: bool) -> ClaimReport {
        let mut analysis = AnalysisResult::service_unavailable();
        analysis.topic = topic.to_string();
        analysis.fake_probability = p;
        ClaimReport {
            id: Uuid::new_v4(),
            text: "placeholder claim".into(),
            is_fake: p > FAKE_THRESHOLD,
            severity: Severity::from_probability(p),
            analysis,
            fact_sources: Vec::new(),
            counter_narrative: countered.then(|| "rebuttal".to_string()),
            hashtags: Vec::new(),
            mentions: Vec::new(),
            processed_at: Utc::now(),
        }
    }

    #[test]
    fn test_empty_batch() {
        assert_eq!(AnalyticsSummary::from_reports(&[]), AnalyticsSummary::default());
    }

    #[test]
    fn test_counts() {
        let reports = vec![
            report("space", 0.92, true),
            report("health", 0.6, true),
            report("health", 0.2, false),
        ];
        let summary = AnalyticsSummary::from_reports(&reports);
        assert_eq!(summary.total_claims, 3);
        assert_eq!(summary.disinformation_detected, 2);
        assert_eq!(summary.counter_narratives_generated, 2);
        assert_eq!(summary.high_risk, 1);
        assert_eq!(summary.disinformation_rate, 67);
        assert_eq!(summary.by_topic.get("health"), Some(&2));
        assert_eq!(summary.by_topic.get("space"), Some(&1));
    }

    #[test]
    fn test_boundary_probability_not_counted() {
        let summary = AnalyticsSummary::from_reports(&[report("science", 0.5, false)]);
        assert_eq!(summary.disinformation_detected, 0);
        assert_eq!(summary.disinformation_rate, 0);
    }
}
