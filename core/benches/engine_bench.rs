use boolir_core::{evaluate, tokenize, InvertedIndex};
use criterion::{criterion_group, criterion_main, Criterion};

fn corpus() -> Vec<(String, String)> {
    let words = ["cat", "dog", "sat", "mat", "log", "the", "on", "rust", "search", "index"];
    (0..500)
        .map(|i| {
            let text: Vec<&str> = (0..200).map(|j| words[(i * 7 + j * 3) % words.len()]).collect();
            (format!("Document {}", i + 1), text.join(" "))
        })
        .collect()
}

fn bench_engine(c: &mut Criterion) {
    let docs = corpus();
    c.bench_function("tokenize_doc", |b| b.iter(|| tokenize(&docs[0].1)));
    c.bench_function("build_index", |b| b.iter(|| InvertedIndex::build(docs.iter().map(|(id, t)| (id.as_str(), t.as_str())))));

    let idx = InvertedIndex::build(docs.iter().map(|(id, t)| (id.as_str(), t.as_str())));
    c.bench_function("evaluate_and", |b| b.iter(|| evaluate(&idx, "cat and dog and rust")));
    c.bench_function("evaluate_terms", |b| b.iter(|| evaluate(&idx, "cat dog rust")));
}

criterion_group!(benches, bench_engine);
criterion_main!(benches);
