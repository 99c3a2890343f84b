//! Benchmarks for suggestion ranking.

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use eventsite_search::{score, suggest, Catalog, CatalogEntry, EntryKind, ScoreWeights};

fn create_test_entries(count: usize) -> Vec<CatalogEntry> {
    let cities = ["Hyderabad", "Guntur", "Nellore", "Vijayawada", "Tirupati", "Warangal"];
    (0..count)
        .map(|i| {
            let city = cities[i % cities.len()];
            CatalogEntry::new(
                format!("entry-{i}"),
                EntryKind::ALL[i % EntryKind::ALL.len()],
                format!("Celebration {i} in {city}"),
                "Decor, catering and photography",
                (i % 101) as u8,
            )
        })
        .collect()
}

fn bench_single_score(c: &mut Criterion) {
    c.bench_function("score_single", |b| {
        b.iter(|| {
            score(
                black_box("brthdy"),
                black_box("Birthday Party Themes Balloons, cakes and confetti"),
                &ScoreWeights::DEFAULT,
            )
        })
    });
}

fn bench_builtin_keystrokes(c: &mut Criterion) {
    let entries = Catalog::builtin().entries();
    let mut group = c.benchmark_group("builtin_keystrokes");

    for query in ["", "w", "wed", "wedding", "xyz123"] {
        let label = if query.is_empty() { "<empty>" } else { query };
        group.bench_with_input(BenchmarkId::from_parameter(label), query, |b, q| {
            b.iter(|| suggest(black_box(q), entries, 6))
        });
    }

    group.finish();
}

fn bench_catalog_sizes(c: &mut Criterion) {
    let mut group = c.benchmark_group("catalog_sizes");

    for size in [10, 100, 1000, 10000].iter() {
        let entries = create_test_entries(*size);
        group.bench_with_input(BenchmarkId::new("suggest", size), size, |b, _| {
            b.iter(|| suggest(black_box("gun"), black_box(&entries), 6))
        });
    }

    group.finish();
}

criterion_group!(
    benches,
    bench_single_score,
    bench_builtin_keystrokes,
    bench_catalog_sizes
);
criterion_main!(benches);
