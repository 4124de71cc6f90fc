//! Criterion benchmarks for formula parsing and canonicalization

use criterion::{black_box, criterion_group, criterion_main, Criterion};
use matstract_formula::{
    is_simple_formula, normalize, normalize_to_canonical, parse, DEFAULT_MAX_DENOMINATOR,
};
use std::time::Duration;

fn custom_criterion() -> Criterion {
    Criterion::default()
        .sample_size(20)
        .warm_up_time(Duration::from_millis(100))
        .measurement_time(Duration::from_secs(1))
        .nresamples(1000)
        .noise_threshold(0.05)
}

fn bench_parse(c: &mut Criterion) {
    c.bench_function("parse_simple", |b| {
        b.iter(|| parse(black_box("TiO2")).unwrap())
    });

    c.bench_function("parse_nested_fractional", |b| {
        b.iter(|| parse(black_box("Li(Ni0.5Mn1.5)O4")).unwrap())
    });

    c.bench_function("parse_hydrate", |b| {
        b.iter(|| parse(black_box("CuSO4·5H2O")).unwrap())
    });
}

fn bench_normalize(c: &mut Criterion) {
    let composition = parse("Li0.33Co0.333Ni0.3333Mn0.25O2").unwrap();

    c.bench_function("normalize_bounded_denominator", |b| {
        b.iter(|| normalize(black_box(&composition), DEFAULT_MAX_DENOMINATOR))
    });

    c.bench_function("normalize_to_canonical", |b| {
        b.iter(|| normalize_to_canonical(black_box("K4(Fe(CN)6)"), DEFAULT_MAX_DENOMINATOR).unwrap())
    });
}

fn bench_classifier(c: &mut Criterion) {
    let tokens = [
        "The", "TiO2", "nanoparticles", "were", "annealed", "at", "500", "K", "in", "Ag(III)",
        "LiFePO4", "PV",
    ];

    c.bench_function("classify_sentence", |b| {
        b.iter(|| {
            tokens
                .iter()
                .filter(|t| is_simple_formula(black_box(t)))
                .count()
        })
    });
}

criterion_group! {
    name = benches;
    config = custom_criterion();
    targets = bench_parse, bench_normalize, bench_classifier
}
criterion_main!(benches);
