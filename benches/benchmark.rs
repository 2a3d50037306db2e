use criterion::{black_box, criterion_group, criterion_main, Criterion};
use rand::{rngs::StdRng, Rng, SeedableRng};

use avl_tree::Tree;

const N: usize = 100_000;

pub fn benchmarks(c: &mut Criterion) {
    let mut rng = StdRng::seed_from_u64(0);
    let values: Vec<i32> = (1..=N).map(|_| rng.gen()).collect();

    c.bench_function("tree_insert", |b| {
        let mut tree = Tree::new();
        b.iter(|| {
            for value in &values {
                tree.insert(*value, *value);
            }
        })
    });

    let tree: Tree<_, _> = values.iter().map(|&value| (value, value)).collect();

    c.bench_function("tree_search", |b| {
        b.iter(|| {
            for value in &values {
                black_box(tree.search(value));
            }
        })
    });

    c.bench_function("tree_traverse", |b| {
        b.iter(|| {
            tree.for_each(|k, v| {
                black_box((k, v));
            })
        })
    });

    c.bench_function("tree_remove", |b| {
        let mut tree = tree.clone();
        b.iter(|| {
            for value in &values {
                tree.remove(value);
            }
        })
    });
}

criterion_group!(benches, benchmarks);
criterion_main!(benches);
