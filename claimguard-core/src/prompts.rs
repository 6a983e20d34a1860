//! Prompt templates for the generative service.

use crate::types::FactSource;

/// Prompt asking for a single JSON classification object.
pub fn analysis_prompt(claim: &str) -> String {
    format!(
        r#"Analyze this text for disinformation. Return only JSON:
{{
  "isFake": true/false,
  "fakeProbability": 0.0-1.0,
  "confidence": 0.0-1.0,
  "topic": "health|politics|science|technology|space|climate|economy|general",
  "reasoning": "explanation"
}}

Text: "{claim}""#
    )
}

/// Prompt asking for a short factual rebuttal that cites the given sources.
pub fn counter_narrative_prompt(claim: &str, topic: &str, sources: &[FactSource]) -> String {
    let fact_context = if sources.is_empty() {
        String::new()
    } else {
        let lines: Vec<String> = sources
            .iter()
            .map(|s| format!("- {}: {} ({})", s.source, s.title, s.url))
            .collect();
        format!("\n\nReliable sources to reference:\n{}", lines.join("\n"))
    };

    format!(
        r#"You are a fact-checker. Generate a concise, factual counter-narrative to address potential misinformation.

Original claim: "{claim}"
Topic: {topic}{fact_context}

Requirements:
- Be factual and evidence-based
- Keep it under 200 characters
- Be respectful and educational
- Include source references if available
- Use the same language as the original text

Generate a counter-narrative:"#
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn source(name: &str, title: &str, url: &str) -> FactSource {
        FactSource {
            source: name.into(),
            url: url.into(),
            relevance: 0.9,
            summary: String::new(),
            title: title.into(),
            published_at: None,
        }
    }

    #[test]
    fn test_analysis_prompt_embeds_claim_and_fields() {
        let prompt = analysis_prompt("The moon is cheese");
        assert!(prompt.contains("Text: \"The moon is cheese\""));
        for field in ["isFake", "fakeProbability", "confidence", "topic", "reasoning"] {
            assert!(prompt.contains(field), "missing {field}");
        }
    }

    #[test]
    fn test_counter_prompt_lists_every_source() {
        let sources = vec![
            source("Wikipedia", "Vaccine", "https://en.wikipedia.org/wiki/Vaccine"),
            source("WHO", "Vaccine Safety and Efficacy", "https://www.who.int/"),
        ];
        let prompt = counter_narrative_prompt("Vaccines contain microchips", "health", &sources);
        assert!(prompt.contains("Topic: health"));
        assert!(prompt.contains("- Wikipedia: Vaccine (https://en.wikipedia.org/wiki/Vaccine)"));
        assert!(prompt.contains("- WHO: Vaccine Safety and Efficacy (https://www.who.int/)"));
        assert!(prompt.contains("under 200 characters"));
        assert!(prompt.contains("same language"));
    }

    #[test]
    fn test_counter_prompt_without_sources() {
        let prompt = counter_narrative_prompt("claim", "general", &[]);
        assert!(!prompt.contains("Reliable sources"));
    }
}
