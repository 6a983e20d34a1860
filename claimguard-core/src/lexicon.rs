//! Keyword tables driving topic, entity, sentiment and language extraction.
//!
//! The tables are plain data. [`Lexicon::default`] builds them from the
//! built-in literals below; callers can construct or deserialize a different
//! `Lexicon` and hand it to [`TopicExtractor::with_lexicon`](crate::extractor::TopicExtractor::with_lexicon).

use serde::{Deserialize, Serialize};

const TOPIC_KEYWORDS: &[(&str, &[&str])] = &[
    (
        "health",
        &[
            "vaccine", "covid", "virus", "medicine", "doctor", "hospital", "disease", "treatment",
        ],
    ),
    (
        "politics",
        &[
            "election",
            "vote",
            "government",
            "president",
            "politician",
            "policy",
            "democracy",
        ],
    ),
    (
        "science",
        &[
            "research",
            "study",
            "scientist",
            "experiment",
            "theory",
            "evidence",
            "earth",
            "flat",
        ],
    ),
    (
        "technology",
        &[
            "5g",
            "internet",
            "phone",
            "computer",
            "ai",
            "artificial intelligence",
            "tech",
        ],
    ),
    (
        "space",
        &[
            "nasa",
            "moon",
            "space",
            "rocket",
            "astronaut",
            "satellite",
            "mars",
        ],
    ),
    (
        "climate",
        &[
            "climate",
            "global warming",
            "environment",
            "carbon",
            "temperature",
            "weather",
        ],
    ),
    (
        "economy",
        &[
            "money",
            "bank",
            "economy",
            "financial",
            "market",
            "investment",
            "crypto",
        ],
    ),
];

const ENTITY_KEYWORDS: &[(&str, &[&str])] = &[
    ("NASA", &["nasa"]),
    ("WHO", &["who", "world health organization"]),
    ("CDC", &["cdc", "centers for disease control"]),
    ("vaccines", &["vaccine", "vaccination"]),
    ("COVID-19", &["covid", "coronavirus"]),
    ("Earth", &["earth"]),
    ("5G", &["5g"]),
    ("climate change", &["climate change", "global warming"]),
];

const POSITIVE_WORDS: &[&str] = &[
    "good",
    "great",
    "excellent",
    "amazing",
    "wonderful",
    "fantastic",
];

const NEGATIVE_WORDS: &[&str] = &[
    "bad", "terrible", "awful", "horrible", "fake", "false", "lie", "scam",
];

const STOP_WORDS: &[&str] = &[
    "the", "a", "an", "and", "or", "but", "in", "on", "at", "to", "for", "of", "with", "by",
];

const ENGLISH_MARKERS: &[&str] = &[
    "the", "and", "that", "have", "for", "not", "with", "you", "this", "but",
];

const RUSSIAN_MARKERS: &[&str] = &[
    "это", "что", "как", "или", "для", "все", "был", "она", "так", "его",
];

/// A named keyword set. Matching is case-insensitive substring matching.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct KeywordGroup {
    pub name: String,
    pub keywords: Vec<String>,
}

impl KeywordGroup {
    pub fn new(name: impl Into<String>, keywords: &[&str]) -> Self {
        Self {
            name: name.into(),
            keywords: keywords.iter().map(|k| k.to_string()).collect(),
        }
    }

    /// Whether any keyword occurs in `lower`, which must already be lowercased.
    pub fn matches(&self, lower: &str) -> bool {
        self.keywords.iter().any(|k| lower.contains(k.as_str()))
    }
}

/// All keyword tables used by the extractor. Group order is match priority.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Lexicon {
    pub topics: Vec<KeywordGroup>,
    pub entities: Vec<KeywordGroup>,
    pub positive_words: Vec<String>,
    pub negative_words: Vec<String>,
    pub stop_words: Vec<String>,
    pub english_markers: Vec<String>,
    pub russian_markers: Vec<String>,
}

impl Default for Lexicon {
    fn default() -> Self {
        Self {
            topics: groups(TOPIC_KEYWORDS),
            entities: groups(ENTITY_KEYWORDS),
            positive_words: words(POSITIVE_WORDS),
            negative_words: words(NEGATIVE_WORDS),
            stop_words: words(STOP_WORDS),
            english_markers: words(ENGLISH_MARKERS),
            russian_markers: words(RUSSIAN_MARKERS),
        }
    }
}

impl Lexicon {
    /// Names of all known topics, in priority order.
    pub fn topic_names(&self) -> impl Iterator<Item = &str> {
        self.topics.iter().map(|g| g.name.as_str())
    }

    /// Whether `topic` is one of the known topics.
    pub fn is_known_topic(&self, topic: &str) -> bool {
        self.topic_names().any(|t| t == topic)
    }
}

fn groups(table: &[(&str, &[&str])]) -> Vec<KeywordGroup> {
    table
        .iter()
        .map(|(name, keywords)| KeywordGroup::new(*name, keywords))
        .collect()
}

fn words(list: &[&str]) -> Vec<String> {
    list.iter().map(|w| w.to_string()).collect()
}
