use std::path::Path;

use criterion::{black_box, criterion_group, criterion_main, Criterion};

use meritscope_core::model::StudentScores;
use meritscope_core::parser::{parse_catalog_str, parse_quiz_bank_str, validate_catalog};

const CATALOG: &str = include_str!("../../../data/catalog.toml");
const QUIZ: &str = include_str!("../../../data/quiz.toml");

fn bench_parse_data(c: &mut Criterion) {
    let mut group = c.benchmark_group("parse_data");

    group.bench_function("catalog", |b| {
        b.iter(|| parse_catalog_str(black_box(CATALOG), Path::new("catalog.toml")))
    });

    group.bench_function("quiz_bank", |b| {
        b.iter(|| parse_quiz_bank_str(black_box(QUIZ), Path::new("quiz.toml")))
    });

    let catalog = parse_catalog_str(CATALOG, Path::new("catalog.toml")).unwrap();
    group.bench_function("validate_catalog", |b| {
        b.iter(|| validate_catalog(black_box(&catalog)))
    });

    group.finish();
}

fn bench_parse_scores(c: &mut Criterion) {
    let mut group = c.benchmark_group("parse_scores");

    group.bench_function("valid", |b| {
        b.iter(|| StudentScores::parse(black_box("88.5"), black_box("150"), black_box("200")))
    });

    group.bench_function("invalid", |b| {
        b.iter(|| StudentScores::parse(black_box("eighty"), black_box("150"), black_box("200")))
    });

    group.finish();
}

criterion_group!(benches, bench_parse_data, bench_parse_scores);
criterion_main!(benches);
