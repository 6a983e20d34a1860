//! Validation of the generative service's classification reply.
//!
//! The reply is untrusted free text. The first flat `{...}` block is pulled
//! out, parsed, and each field is coerced into its typed form. The result is
//! either a complete [`AnalysisResult`] or `GenerativeError::ResponseParse`.

use regex::Regex;
use serde_json::{Map, Value};
use std::sync::LazyLock;

use crate::error::GenerativeError;
use crate::extractor::TopicExtractor;
use crate::types::{AnalysisMethod, AnalysisResult, FAKE_THRESHOLD, Language, Sentiment};

const DEFAULT_CONFIDENCE: f64 = 0.7;
const DEFAULT_REASONING: &str = "Analysis completed";

static JSON_OBJECT: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\{[^}]*\}").expect("valid regex"));

/// The first `{...}` substring without nested braces, or the whole trimmed text.
pub fn extract_json_object(raw: &str) -> &str {
    let trimmed = raw.trim();
    JSON_OBJECT
        .find(trimmed)
        .map(|m| m.as_str())
        .unwrap_or(trimmed)
}

/// Parse a classification reply into a typed result.
///
/// A reply must carry at least one of `isFake` or `fakeProbability`.
/// The topic is normalized against the extractor's vocabulary.
pub fn parse_analysis_reply(
    raw: &str,
    extractor: &TopicExtractor,
) -> Result<AnalysisResult, GenerativeError> {
    let candidate = extract_json_object(raw);
    let value: Value =
        serde_json::from_str(candidate).map_err(|e| GenerativeError::ResponseParse {
            message: format!("Invalid JSON: {}", e),
        })?;
    let obj = value
        .as_object()
        .ok_or_else(|| GenerativeError::ResponseParse {
            message: "Reply is not a JSON object".to_string(),
        })?;

    let is_fake_field = obj.get("isFake").filter(|v| !v.is_null());
    let probability_field = obj.get("fakeProbability").filter(|v| !v.is_null());
    if is_fake_field.is_none() && probability_field.is_none() {
        return Err(GenerativeError::ResponseParse {
            message: "Reply has neither isFake nor fakeProbability".to_string(),
        });
    }

    let fake_probability = probability_field
        .and_then(coerce_number)
        .map(|p| p.clamp(0.0, 1.0))
        .unwrap_or(0.0);
    let is_fake = is_fake_field
        .map(coerce_bool)
        .unwrap_or(fake_probability > FAKE_THRESHOLD);
    let confidence = obj
        .get("confidence")
        .and_then(coerce_number)
        .filter(|c| *c != 0.0)
        .map(|c| c.clamp(0.0, 1.0))
        .unwrap_or(DEFAULT_CONFIDENCE);
    let topic = extractor.normalize_topic(string_field(obj, "topic").unwrap_or_default());
    let reasoning = string_field(obj, "reasoning")
        .unwrap_or(DEFAULT_REASONING)
        .to_string();

    Ok(AnalysisResult {
        is_fake,
        fake_probability,
        confidence,
        topic,
        entity: None,
        entities: Vec::new(),
        sentiment: Sentiment::Neutral,
        keywords: Vec::new(),
        language: Language::En,
        reasoning,
        method: AnalysisMethod::Generative,
    })
}

fn coerce_number(value: &Value) -> Option<f64> {
    let n = match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse::<f64>().ok(),
        Value::Bool(b) => Some(if *b { 1.0 } else { 0.0 }),
        _ => None,
    }?;
    n.is_finite().then_some(n)
}

fn coerce_bool(value: &Value) -> bool {
    match value {
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|f| f != 0.0),
        Value::String(s) => matches!(s.trim().to_lowercase().as_str(), "true" | "yes" | "1"),
        _ => false,
    }
}

fn string_field<'a>(obj: &'a Map<String, Value>, key: &str) -> Option<&'a str> {
    obj.get(key)
        .and_then(Value::as_str)
        .map(str::trim)
        .filter(|s| !s.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(raw: &str) -> Result<AnalysisResult, GenerativeError> {
        parse_analysis_reply(raw, &TopicExtractor::new())
    }

    #[test]
    fn test_extract_json_object_from_prose() {
        let raw = "Here you go:\n{\"isFake\": true}\nThanks";
        assert_eq!(extract_json_object(raw), "{\"isFake\": true}");
        assert_eq!(extract_json_object("  no braces  "), "no braces");
    }

    #[test]
    fn test_full_reply() {
        let result = parse(
            r#"{"isFake": false, "fakeProbability": 0.2, "confidence": 0.9, "topic": "Climate", "reasoning": "Consistent with IPCC"}"#,
        )
        .unwrap();
        assert!(!result.is_fake);
        assert!((result.fake_probability - 0.2).abs() < 1e-9);
        assert!((result.confidence - 0.9).abs() < 1e-9);
        assert_eq!(result.topic, "climate");
        assert_eq!(result.reasoning, "Consistent with IPCC");
        assert_eq!(result.method, AnalysisMethod::Generative);
    }

    #[test]
    fn test_defaults_for_missing_fields() {
        let result = parse(r#"{"fakeProbability": 0.8}"#).unwrap();
        assert!(result.is_fake);
        assert!((result.confidence - DEFAULT_CONFIDENCE).abs() < 1e-9);
        assert_eq!(result.topic, "general");
        assert_eq!(result.reasoning, DEFAULT_REASONING);
    }

    #[test]
    fn test_zero_confidence_uses_default() {
        let result = parse(r#"{"isFake": true, "confidence": 0}"#).unwrap();
        assert!((result.confidence - DEFAULT_CONFIDENCE).abs() < 1e-9);
        assert_eq!(result.fake_probability, 0.0);
        // isFake comes straight from the reply, even against the probability.
        assert!(result.is_fake);
    }

    #[test]
    fn test_string_coercions() {
        let result =
            parse(r#"{"isFake": "yes", "fakeProbability": "0.65", "confidence": "0.5"}"#).unwrap();
        assert!(result.is_fake);
        assert!((result.fake_probability - 0.65).abs() < 1e-9);
        assert!((result.confidence - 0.5).abs() < 1e-9);

        let result = parse(r#"{"isFake": "false", "fakeProbability": "n/a"}"#).unwrap();
        assert!(!result.is_fake);
        assert_eq!(result.fake_probability, 0.0);
    }

    #[test]
    fn test_out_of_range_values_clamped() {
        let result = parse(r#"{"isFake": 1, "fakeProbability": 7.5, "confidence": -2}"#).unwrap();
        assert!(result.is_fake);
        assert_eq!(result.fake_probability, 1.0);
        assert_eq!(result.confidence, 0.0);
    }

    #[test]
    fn test_unknown_topic_normalized() {
        let result = parse(r#"{"isFake": false, "topic": "astrology"}"#).unwrap();
        assert_eq!(result.topic, "general");
    }

    #[test]
    fn test_malformed_replies() {
        assert!(matches!(
            parse("The claim is false."),
            Err(GenerativeError::ResponseParse { .. })
        ));
        assert!(matches!(
            parse("{not json}"),
            Err(GenerativeError::ResponseParse { .. })
        ));
        assert!(matches!(
            parse(r#"{"topic": "health", "reasoning": "no verdict"}"#),
            Err(GenerativeError::ResponseParse { .. })
        ));
        assert!(matches!(
            parse(r#"{"isFake": null, "fakeProbability": null}"#),
            Err(GenerativeError::ResponseParse { .. })
        ));
    }
}
