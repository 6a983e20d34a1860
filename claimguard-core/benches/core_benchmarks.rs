use claimguard_core::analysis::reply::parse_analysis_reply;
use claimguard_core::{FakeProbabilityScorer, HeuristicAnalyzer, TopicExtractor};
use criterion::{Criterion, black_box, criterion_group, criterion_main};

const FLAT_EARTH: &str = "The Earth is flat, not round as scientists claim.";
const CONSPIRACY: &str =
    "Wake up sheeple! The secret they don't want you to know: the moon landing was fake.";
const BENIGN: &str = "Great weather for the picnic today";

fn bench_scorer(c: &mut Criterion) {
    let scorer = FakeProbabilityScorer::new();

    c.bench_function("scorer_benign", |b| b.iter(|| scorer.score(black_box(BENIGN))));

    c.bench_function("scorer_conspiracy", |b| {
        b.iter(|| scorer.score(black_box(CONSPIRACY)))
    });

    let long_input = "the quick brown fox ".repeat(1000);
    c.bench_function("scorer_long_input", |b| {
        b.iter(|| scorer.score(black_box(&long_input)))
    });
}

fn bench_extractor(c: &mut Criterion) {
    let extractor = TopicExtractor::new();

    c.bench_function("extract_topic", |b| {
        b.iter(|| extractor.extract_topic(black_box(FLAT_EARTH)))
    });

    c.bench_function("extract_keywords", |b| {
        b.iter(|| extractor.extract_keywords(black_box(CONSPIRACY)))
    });

    c.bench_function("extract_entities", |b| {
        b.iter(|| {
            extractor.extract_entities(black_box("NASA said Neil Armstrong walked on the Moon"))
        })
    });
}

fn bench_analysis(c: &mut Criterion) {
    let analyzer = HeuristicAnalyzer::default();
    c.bench_function("heuristic_analyze", |b| {
        b.iter(|| analyzer.analyze(black_box(CONSPIRACY)))
    });

    let extractor = TopicExtractor::new();
    let reply = r#"Sure. {"isFake": true, "fakeProbability": 0.9, "confidence": 0.8, "topic": "space", "reasoning": "Apollo evidence"}"#;
    c.bench_function("parse_analysis_reply", |b| {
        b.iter(|| parse_analysis_reply(black_box(reply), &extractor))
    });
}

criterion_group!(benches, bench_scorer, bench_extractor, bench_analysis);
criterion_main!(benches);
