//! Benchmarks for normalization and validation.

use criterion::{black_box, criterion_group, criterion_main, Criterion};
use crf_fields::{
    normalize_constraints, EngineConfig, FieldDefinition, FieldType, Validator,
};
use serde_json::json;

fn normalize_benchmark(c: &mut Criterion) {
    let raw = json!({
        "required": "true",
        "min": "0",
        "max": 10,
        "step": 2.5,
        "marks": [{"value": 2.4, "label": "low"}, {"value": 9.9, "label": "high"}],
        "bogus": [1, 2, 3]
    });

    c.bench_function("normalize_slider", |b| {
        b.iter(|| normalize_constraints(black_box(FieldType::Slider), black_box(&raw)))
    });
}

fn validate_benchmark(c: &mut Criterion) {
    let field = FieldDefinition::new(
        FieldType::Number,
        "Dose",
        vec![],
        &json!({"min": 0, "max": 500, "maxDigits": 3}),
    );
    let value = json!(250);

    let cached = Validator::default();
    c.bench_function("validate_cached", |b| {
        b.iter(|| cached.validate(black_box(&field), black_box(&value)))
    });

    let uncached = Validator::new(EngineConfig::new().with_schema_cache_capacity(0));
    c.bench_function("validate_uncached", |b| {
        b.iter(|| uncached.validate(black_box(&field), black_box(&value)))
    });
}

criterion_group!(benches, normalize_benchmark, validate_benchmark);
criterion_main!(benches);
