// Copyright 2025 the Bracken Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Simplex scene.
//!
//! Build a scene mixing vertices, edges, triangles, and quads, index every
//! simplex by its anchor, and query rectangular windows of the scene.
//!
//! Run:
//! - `cargo run -p bracken_demos --example simplex_scene`

use bracken_quadtree::{Anchor, QuadTree};
use bracken_simplex::{Locator, SimplexKind, SimplexSet};
use kurbo::Point;

fn main() {
    let mut set = SimplexSet::new();

    // A 3x3 grid of vertices, 10 units apart.
    let mut grid = [[None; 3]; 3];
    for (j, row) in grid.iter_mut().enumerate() {
        for (i, slot) in row.iter_mut().enumerate() {
            let at = Point::new(10.0 + 10.0 * i as f64, 10.0 + 10.0 * j as f64);
            *slot = Some(set.insert_vertex(at));
        }
    }
    let v = |i: usize, j: usize| grid[j][i].unwrap();

    // Horizontal edges along the bottom row, two triangles in the middle
    // cell, one quad covering the top-right cell.
    set.insert_edge(v(0, 0), v(1, 0)).unwrap();
    set.insert_edge(v(1, 0), v(2, 0)).unwrap();
    set.insert_triangle(v(0, 1), v(1, 1), v(0, 2)).unwrap();
    set.insert_triangle(v(1, 1), v(1, 2), v(0, 2)).unwrap();
    set.insert_quad(v(1, 1), v(2, 1), v(2, 2), v(1, 2)).unwrap();

    // Everything fits inside [0, 40]^2.
    let mut tree: QuadTree<Locator> = QuadTree::new(Point::new(20.0, 20.0), 40.0, 3, 5);
    for loc in set.locators() {
        assert!(tree.insert(loc));
    }
    println!(
        "indexed {} simplices across {} leaves",
        tree.len(),
        tree.n_leafs()
    );

    let windows = [
        (Point::new(10.0, 10.0), Point::new(30.0, 10.0)), // bottom row band
        (Point::new(12.0, 12.0), Point::new(28.0, 28.0)), // middle region
        (Point::new(0.0, 0.0), Point::new(40.0, 40.0)),   // everything
    ];
    for (ll, ur) in windows {
        let mut found = Vec::new();
        tree.query_rect(ll, ur, &mut found);
        println!(
            "window ({}, {})..({}, {}): {} hits",
            ll.x,
            ll.y,
            ur.x,
            ur.y,
            found.len()
        );
        for f in &found {
            let kind = match set.get(f.id).map(bracken_simplex::Simplex::kind) {
                Some(SimplexKind::Vertex) => "vertex",
                Some(SimplexKind::Edge(_)) => "edge",
                Some(SimplexKind::Triangle(_)) => "triangle",
                Some(SimplexKind::Quad(_)) => "quad",
                None => "?",
            };
            println!("  {kind} @ ({}, {})", f.anchor().x, f.anchor().y);
        }
    }
}
