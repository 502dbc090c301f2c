use criterion::{criterion_group, criterion_main, Criterion};
use sift_core::records::from_texts;
use sift_core::tokenizer::{analyze, tokenize};
use sift_core::{IndexConfig, Snapshot, TokenizerVariant};

const TEXT: &str = "The quick brown fox jumps over the lazy dog. Running runners run through \
    the connected connections of an inverted index, where every posting counts once.";

fn bench_tokenize(c: &mut Criterion) {
    c.bench_function("tokenize_simple", |b| b.iter(|| tokenize(TEXT, TokenizerVariant::Simple, true)));
    let stemmed = IndexConfig::new(TokenizerVariant::WithoutStopWords, true, true);
    c.bench_function("analyze_stemmed", |b| b.iter(|| analyze(TEXT, &stemmed)));
}

fn bench_build(c: &mut Criterion) {
    let texts: Vec<String> = (0..1_000).map(|i| format!("{TEXT} doc{i}")).collect();
    let config = IndexConfig::new(TokenizerVariant::Simple, false, true);
    c.bench_function("build_1k_docs", |b| {
        b.iter(|| Snapshot::build(from_texts(texts.iter().cloned()), config).unwrap())
    });
}

criterion_group!(benches, bench_tokenize, bench_build);
criterion_main!(benches);
