// Copyright 2025 the Bracken Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use bracken_quadtree::QuadTree;
use criterion::{BatchSize, Criterion, Throughput, black_box, criterion_group, criterion_main};
use kurbo::Point;

const WORLD: f64 = 2000.0;

#[derive(Clone)]
struct Rng(u64);

impl Rng {
    fn new(seed: u64) -> Self {
        Self(seed)
    }
    fn next_u64(&mut self) -> u64 {
        let mut x = self.0;
        x ^= x << 13;
        x ^= x >> 7;
        x ^= x << 17;
        self.0 = x;
        x
    }
    fn next_f64(&mut self) -> f64 {
        let v = self.next_u64() >> 11;
        (v as f64) / ((1u64 << 53) as f64)
    }
}

fn gen_uniform_points(count: usize) -> Vec<Point> {
    let mut out = Vec::with_capacity(count);
    let mut rng = Rng::new(0xCAFE_F00D_DEAD_BEEF);
    for _ in 0..count {
        out.push(Point::new(rng.next_f64() * WORLD, rng.next_f64() * WORLD));
    }
    out
}

fn gen_clustered_points(n_clusters: usize, per_cluster: usize, spread: f64) -> Vec<Point> {
    let mut out = Vec::with_capacity(n_clusters * per_cluster);
    let mut rng = Rng::new(0xC1A5_7E55_9999_ABCD);
    let mut centers = Vec::with_capacity(n_clusters);
    for _ in 0..n_clusters {
        centers.push((rng.next_f64() * WORLD, rng.next_f64() * WORLD));
    }
    for (cx, cy) in centers {
        for _ in 0..per_cluster {
            let dx = (rng.next_f64() - 0.5) * spread;
            let dy = (rng.next_f64() - 0.5) * spread;
            out.push(Point::new(
                (cx + dx).clamp(0.0, WORLD),
                (cy + dy).clamp(0.0, WORLD),
            ));
        }
    }
    out
}

fn world_tree() -> QuadTree<Point> {
    QuadTree::new(Point::new(WORLD / 2.0, WORLD / 2.0), WORLD, 16, 10)
}

fn build_tree(points: &[Point]) -> QuadTree<Point> {
    let mut tree = world_tree();
    for p in points {
        let _ = tree.insert(*p);
    }
    tree
}

fn bench_insert(c: &mut Criterion) {
    let mut group = c.benchmark_group("quadtree_insert");
    for &n in &[1024usize, 8192, 65536] {
        let points = gen_uniform_points(n);
        group.throughput(Throughput::Elements(n as u64));
        group.bench_function(format!("uniform_n{}", n), |b| {
            b.iter_batched(
                world_tree,
                |mut tree| {
                    for p in &points {
                        let _ = tree.insert(*p);
                    }
                    black_box(tree.n_leafs());
                },
                BatchSize::SmallInput,
            )
        });
    }
    let points = gen_clustered_points(64, 256, 50.0);
    group.bench_function("clustered_64x256", |b| {
        b.iter_batched(
            world_tree,
            |mut tree| {
                for p in &points {
                    let _ = tree.insert(*p);
                }
                black_box(tree.n_leafs());
            },
            BatchSize::SmallInput,
        )
    });
    group.finish();
}

fn bench_query(c: &mut Criterion) {
    let mut group = c.benchmark_group("quadtree_query");
    for &n in &[8192usize, 65536] {
        let points = gen_uniform_points(n);
        let tree = build_tree(&points);
        let ll = Point::new(800.0, 800.0);
        let ur = Point::new(1200.0, 1200.0);
        group.throughput(Throughput::Elements(n as u64));

        group.bench_function(format!("tree_window_n{}", n), |b| {
            let mut found = Vec::new();
            b.iter(|| {
                found.clear();
                let _ = tree.query_rect(black_box(ll), black_box(ur), &mut found);
                black_box(found.len());
            })
        });

        // Baseline the pruning is supposed to beat.
        group.bench_function(format!("brute_force_window_n{}", n), |b| {
            let mut found = Vec::new();
            b.iter(|| {
                found.clear();
                for p in &points {
                    if p.x >= ll.x && p.y >= ll.y && p.x <= ur.x && p.y <= ur.y {
                        found.push(*p);
                    }
                }
                black_box(found.len());
            })
        });
    }
    group.finish();
}

fn bench_churn(c: &mut Criterion) {
    let mut group = c.benchmark_group("quadtree_churn");
    let points = gen_uniform_points(8192);
    group.throughput(Throughput::Elements(points.len() as u64));
    // Remove and re-insert every item; exercises merge and re-split paths.
    group.bench_function("remove_reinsert_n8192", |b| {
        b.iter_batched(
            || build_tree(&points),
            |mut tree| {
                for p in &points {
                    let _ = tree.remove(p);
                }
                for p in &points {
                    let _ = tree.insert(*p);
                }
                black_box(tree.len());
            },
            BatchSize::SmallInput,
        )
    });
    group.finish();
}

criterion_group!(benches, bench_insert, bench_query, bench_churn);
criterion_main!(benches);
