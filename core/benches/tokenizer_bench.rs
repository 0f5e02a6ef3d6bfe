use criterion::{criterion_group, criterion_main, Criterion};
use pildoras_core::tokenizer::extract_keywords;

fn bench_extract_keywords(c: &mut Criterion) {
    let html = include_str!("../tests/fixtures/ssh.html");
    c.bench_function("extract_keywords_fixture", |b| b.iter(|| extract_keywords(html, "Bastionado de SSH")));
}

criterion_group!(benches, bench_extract_keywords);
criterion_main!(benches);
