//! Performance benchmarks

use std::sync::Arc;

use criterion::{black_box, criterion_group, criterion_main, Criterion};
use stepvis::{BinaryTreeAdt, CodeCursor, Pacer};

fn benchmark_replace(c: &mut Criterion) {
    let values: Vec<i64> = (0..1000).collect();

    c.bench_function("replace_n=1000_perfect", |b| {
        b.iter(|| {
            let mut tree = BinaryTreeAdt::new(Arc::new(Pacer::instant()), CodeCursor::new());
            tree.replace(black_box(values.clone()), true);
            black_box(tree.height());
        });
    });

    c.bench_function("replace_n=1000_skewed", |b| {
        b.iter(|| {
            let mut tree = BinaryTreeAdt::new(Arc::new(Pacer::instant()), CodeCursor::new())
                .with_seed(1);
            tree.replace(black_box(values.clone()), false);
            black_box(tree.height());
        });
    });
}

criterion_group!(benches, benchmark_replace);
criterion_main!(benches);
