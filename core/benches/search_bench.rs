use criterion::{criterion_group, criterion_main, Criterion};
use sift_core::tokenizer::tokenize;
use sift_core::{RankingMode, SearchEngine};

const SAMPLE: &str = "The quick brown fox jumps over the lazy dog while running \
happily through example queries and ranked results by the river bank ";

fn bench_tokenize(c: &mut Criterion) {
    let text = SAMPLE.repeat(200);
    c.bench_function("tokenize_sample", |b| b.iter(|| tokenize(&text)));
}

fn bench_search(c: &mut Criterion) {
    let mut engine = SearchEngine::new();
    for i in 0..100 {
        let text = SAMPLE.repeat(1 + i % 7);
        engine.index_document(&format!("doc{i}"), &text);
    }
    c.bench_function("search_frequency", |b| {
        b.iter(|| engine.search_ranked("example query", RankingMode::Frequency))
    });
    c.bench_function("search_bm25", |b| {
        b.iter(|| engine.search_ranked("example query", RankingMode::Bm25))
    });
}

criterion_group!(benches, bench_tokenize, bench_search);
criterion_main!(benches);
