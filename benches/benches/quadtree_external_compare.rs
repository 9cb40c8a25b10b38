// Copyright 2025 the Bracken Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

#![cfg(feature = "compare_rstar")]

use bracken_quadtree::QuadTree;
use criterion::{BatchSize, Criterion, Throughput, black_box, criterion_group, criterion_main};
use kurbo::Point;

use rstar::{AABB, RTree};

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

fn to_rstar_points(v: &[Point]) -> Vec<[f64; 2]> {
    v.iter().map(|p| [p.x, p.y]).collect()
}

fn bench_quadtree_external_compare(c: &mut Criterion) {
    let mut group = c.benchmark_group("quadtree_external_compare");
    for &n in &[8192usize, 65536] {
        let points = gen_uniform_points(n);
        let ll = Point::new(800.0, 800.0);
        let ur = Point::new(1200.0, 1200.0);
        group.throughput(Throughput::Elements(n as u64));

        group.bench_function(format!("bracken_build_query_n{}", n), |b| {
            b.iter_batched(
                || QuadTree::new(Point::new(WORLD / 2.0, WORLD / 2.0), WORLD, 16, 10),
                |mut tree| {
                    for p in &points {
                        let _ = tree.insert(*p);
                    }
                    let mut found = Vec::new();
                    let _ = tree.query_rect(ll, ur, &mut found);
                    black_box(found.len());
                },
                BatchSize::SmallInput,
            )
        });

        group.bench_function(format!("rstar_build_query_bulk_n{}", n), |b| {
            b.iter_batched(
                || to_rstar_points(&points),
                |pts| {
                    let tree = RTree::bulk_load(pts);
                    let aabb = AABB::from_corners([ll.x, ll.y], [ur.x, ur.y]);
                    let hits: usize = tree.locate_in_envelope(&aabb).count();
                    black_box(hits);
                },
                BatchSize::SmallInput,
            )
        });
    }
    group.finish();
}

criterion_group!(benches, bench_quadtree_external_compare);
criterion_main!(benches);
