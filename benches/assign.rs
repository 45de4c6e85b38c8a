//! Benchmarks for identifier assignment
//!
//! Full feed sized input: ~2000 symbols, half already mapped.

use criterion::{black_box, criterion_group, criterion_main, Criterion};
use update_coins::core::{Asset, IdentifierAssigner, IdentifierMapping};

fn make_symbols(count: usize) -> Vec<String> {
    (0..count).map(|i| format!("C{:05}", i * 7919 % 100_000)).collect()
}

fn bench_assign(c: &mut Criterion) {
    let symbols = make_symbols(2000);
    let assigner = IdentifierAssigner::new();

    let assets: Vec<Asset> = symbols.iter().map(|s| Asset::new(s.clone(), "")).collect();
    let seeded = assigner.assign(assets[..1000].to_vec(), IdentifierMapping::new());

    c.bench_function("assign_first_run", |b| {
        b.iter(|| assigner.assign(black_box(assets.clone()), IdentifierMapping::new()))
    });

    c.bench_function("assign_half_mapped", |b| {
        b.iter(|| assigner.assign(black_box(assets.clone()), black_box(seeded.mapping.clone())))
    });
}

criterion_group!(benches, bench_assign);
criterion_main!(benches);
