use std::collections::HashSet;

use criterion::{black_box, criterion_group, criterion_main, Criterion};

use bm_core::suffix::{cmp_names, has_suffix};

fn reference_set() -> HashSet<String> {
    (0..50_000).map(|i| format!("tracker{}.example{}.com", i, i % 97)).collect()
}

fn bench_has_suffix(c: &mut Criterion) {
    let names = reference_set();

    c.bench_function("has_suffix_miss", |b| {
        b.iter(|| has_suffix(&names, black_box("a.b.c.not-listed.org")))
    });

    c.bench_function("has_suffix_hit", |b| {
        b.iter(|| has_suffix(&names, black_box("cdn.tracker42.example42.com")))
    });
}

fn bench_sort(c: &mut Criterion) {
    let names: Vec<String> = reference_set().into_iter().take(5_000).collect();

    c.bench_function("sort_by_reversed_labels", |b| {
        b.iter(|| {
            let mut sorted = names.clone();
            sorted.sort_by(|a, b| cmp_names(a, b));
            sorted
        })
    });
}

criterion_group!(benches, bench_has_suffix, bench_sort);
criterion_main!(benches);
