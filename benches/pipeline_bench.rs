//! Criterion benchmarks for the region filter / price extraction pipeline

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use gcp_pricing::services::applies_to_region;
use gcp_pricing::types::{CatalogSku, SkuRecord};
use std::path::PathBuf;

/// Fixture SKUs repeated until there are at least `count`
fn load_skus(count: usize) -> Vec<CatalogSku> {
    let mut skus = Vec::new();
    for page in ["skus-page-1.json", "skus-page-2.json"] {
        let path = PathBuf::from(env!("CARGO_MANIFEST_DIR"))
            .join("tests")
            .join("fixtures")
            .join(page);
        let content = std::fs::read_to_string(&path).expect("fixture page");
        let value: serde_json::Value = serde_json::from_str(&content).expect("fixture json");
        let page_skus: Vec<CatalogSku> =
            serde_json::from_value(value["skus"].clone()).expect("fixture skus");
        skus.extend(page_skus);
    }

    skus.iter().cycle().take(count.max(skus.len())).cloned().collect()
}

fn flatten(skus: &[CatalogSku], region: &str) -> Vec<SkuRecord> {
    skus.iter()
        .filter(|sku| applies_to_region(&sku.service_regions, region))
        .cloned()
        .map(SkuRecord::from_catalog)
        .collect()
}

fn bench_flatten(c: &mut Criterion) {
    let mut group = c.benchmark_group("pipeline");

    for count in [5usize, 5000] {
        let skus = load_skus(count);
        group.throughput(Throughput::Elements(skus.len() as u64));
        group.bench_with_input(BenchmarkId::new("flatten", count), &skus, |b, skus| {
            b.iter(|| flatten(black_box(skus), black_box("me-central2")));
        });
    }

    group.finish();
}

fn bench_serialize(c: &mut Criterion) {
    let records = flatten(&load_skus(5000), "me-central2");

    let mut group = c.benchmark_group("pipeline");
    group.throughput(Throughput::Elements(records.len() as u64));
    group.bench_function("serialize_pretty", |b| {
        b.iter(|| serde_json::to_string_pretty(black_box(&records)));
    });
    group.finish();
}

criterion_group!(benches, bench_flatten, bench_serialize);
criterion_main!(benches);
