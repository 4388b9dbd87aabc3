//! Benchmarks for graph construction and the greedy walk

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use navgraph::cover::greedy;
use navgraph::graph::builder::MngBuilder;
use navgraph::graph::walk::{greedy_walk_with_scratch, WalkScratch};
use navgraph::points::PointSet;
use navgraph::matrix;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

fn uniform_points(n: usize, dimension: usize) -> PointSet {
    let mut rng = StdRng::seed_from_u64(0);
    let vectors: Vec<Vec<f32>> = (0..n)
        .map(|_| (0..dimension).map(|_| rng.gen::<f32>()).collect())
        .collect();
    PointSet::from_vecs(vectors).unwrap()
}

fn benchmark_preprocessing(c: &mut Criterion) {
    let mut group = c.benchmark_group("preprocessing");
    group.sample_size(10);

    for &n in &[250, 500, 1000] {
        let points = uniform_points(n, 8);
        group.bench_with_input(BenchmarkId::new("points", n), &points, |b, points| {
            b.iter(|| matrix::preprocess(black_box(points)).unwrap());
        });
    }

    group.finish();
}

fn benchmark_mng_construction(c: &mut Criterion) {
    let mut group = c.benchmark_group("mng_construction");
    group.sample_size(10);

    for &n in &[250, 500, 1000] {
        let points = uniform_points(n, 8);
        group.bench_with_input(BenchmarkId::new("points", n), &points, |b, points| {
            b.iter(|| MngBuilder::new().build(black_box(points)).unwrap());
        });
    }

    group.finish();
}

fn benchmark_greedy_cover(c: &mut Criterion) {
    let mut group = c.benchmark_group("greedy_cover");
    group.sample_size(10);

    let points = uniform_points(500, 8);
    let (_, permutations, ranks) = matrix::preprocess(&points).unwrap();
    group.bench_function("points_500", |b| {
        b.iter(|| greedy::greedy_adjacency_lists(black_box(&permutations), &ranks).unwrap());
    });

    group.finish();
}

fn benchmark_greedy_walk(c: &mut Criterion) {
    let mut group = c.benchmark_group("greedy_walk");

    let points = uniform_points(1000, 8);
    let adjlists = MngBuilder::new().build(&points).unwrap();
    let mut scratch = WalkScratch::new(points.len());

    group.bench_function("dataset_queries", |b| {
        let mut target = 0usize;
        b.iter(|| {
            target = (target + 1) % points.len();
            greedy_walk_with_scratch(
                &adjlists,
                &points,
                0,
                black_box(points.point(target)),
                &mut scratch,
            )
        });
    });

    group.finish();
}

criterion_group!(
    build_benches,
    benchmark_preprocessing,
    benchmark_mng_construction,
    benchmark_greedy_cover,
    benchmark_greedy_walk
);

criterion_main!(build_benches);
