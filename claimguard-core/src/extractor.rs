//! Topic, entity, sentiment, keyword and language extraction.
//!
//! Everything here is table lookups over a [`Lexicon`] plus a handful of
//! regular expressions. First match wins wherever a table is ordered.

use regex::Regex;
use std::collections::HashSet;
use std::sync::LazyLock;

use crate::lexicon::Lexicon;
use crate::types::{GENERAL_TOPIC, Language, Sentiment};

/// Maximum number of keywords returned by [`TopicExtractor::extract_keywords`].
pub const MAX_KEYWORDS: usize = 10;

// `\w` and `\b` are Unicode-aware: Cyrillic words count as words, and a run
// ending in a non-ASCII letter ("Café") has no word boundary to stop at.
static CAPITALIZED_RUN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\b[A-Z][a-z]+(?:\s+[A-Z][a-z]+)*\b").expect("valid regex"));
static MENTION: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"@\w+").expect("valid regex"));
static HASHTAG: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"#\w+").expect("valid regex"));
static WORD: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\w+").expect("valid regex"));

/// Keyword-table extractor.
#[derive(Debug, Clone, Default)]
pub struct TopicExtractor {
    lexicon: Lexicon,
}

impl TopicExtractor {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_lexicon(lexicon: Lexicon) -> Self {
        Self { lexicon }
    }

    pub fn lexicon(&self) -> &Lexicon {
        &self.lexicon
    }

    /// First topic whose keywords occur in the text, or `"general"`.
    pub fn extract_topic(&self, text: &str) -> String {
        let lower = text.to_lowercase();
        self.lexicon
            .topics
            .iter()
            .find(|group| group.matches(&lower))
            .map(|group| group.name.clone())
            .unwrap_or_else(|| GENERAL_TOPIC.to_string())
    }

    /// Map a free-form topic label onto the known vocabulary.
    ///
    /// Unknown or empty labels become `"general"`.
    pub fn normalize_topic(&self, topic: &str) -> String {
        let lower = topic.trim().to_lowercase();
        if self.lexicon.is_known_topic(&lower) {
            lower
        } else {
            GENERAL_TOPIC.to_string()
        }
    }

    /// Canonical entity name of the first matching entity group.
    pub fn extract_entity(&self, text: &str) -> Option<String> {
        let lower = text.to_lowercase();
        self.lexicon
            .entities
            .iter()
            .find(|group| group.matches(&lower))
            .map(|group| group.name.clone())
    }

    /// Capitalized word runs, then `@mentions`, then `#hashtags`, deduplicated
    /// in first-occurrence order.
    pub fn extract_entities(&self, text: &str) -> Vec<String> {
        let matches = CAPITALIZED_RUN
            .find_iter(text)
            .chain(MENTION.find_iter(text))
            .chain(HASHTAG.find_iter(text))
            .map(|m| m.as_str());
        dedup_in_order(matches)
    }

    pub fn extract_hashtags(&self, text: &str) -> Vec<String> {
        dedup_in_order(HASHTAG.find_iter(text).map(|m| m.as_str()))
    }

    pub fn extract_mentions(&self, text: &str) -> Vec<String> {
        dedup_in_order(MENTION.find_iter(text).map(|m| m.as_str()))
    }

    /// Majority of positive vs negative word hits; ties are neutral.
    pub fn analyze_sentiment(&self, text: &str) -> Sentiment {
        let lower = text.to_lowercase();
        let positive = count_hits(&self.lexicon.positive_words, &lower);
        let negative = count_hits(&self.lexicon.negative_words, &lower);
        match positive.cmp(&negative) {
            std::cmp::Ordering::Greater => Sentiment::Positive,
            std::cmp::Ordering::Less => Sentiment::Negative,
            std::cmp::Ordering::Equal => Sentiment::Neutral,
        }
    }

    /// Up to [`MAX_KEYWORDS`] lowercase words in document order, skipping
    /// stop-words and words of three characters or fewer.
    pub fn extract_keywords(&self, text: &str) -> Vec<String> {
        let lower = text.to_lowercase();
        WORD.find_iter(&lower)
            .map(|m| m.as_str())
            .filter(|w| w.chars().count() > 3)
            .filter(|w| !self.lexicon.stop_words.iter().any(|s| s == w))
            .take(MAX_KEYWORDS)
            .map(str::to_string)
            .collect()
    }

    /// Russian only when it has strictly more marker hits than English.
    pub fn detect_language(&self, text: &str) -> Language {
        let lower = text.to_lowercase();
        let russian = count_hits(&self.lexicon.russian_markers, &lower);
        let english = count_hits(&self.lexicon.english_markers, &lower);
        if russian > english {
            Language::Ru
        } else {
            Language::En
        }
    }
}

fn count_hits(words: &[String], lower: &str) -> usize {
    words.iter().filter(|w| lower.contains(w.as_str())).count()
}

fn dedup_in_order<'a>(items: impl Iterator<Item = &'a str>) -> Vec<String> {
    let mut seen = HashSet::new();
    items
        .filter(|item| seen.insert(*item))
        .map(str::to_string)
        .collect()
}
