// Copyright 2025 the Bracken Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Quadtree basics.
//!
//! Fill a small vertex scene, watch specific leaves split as items arrive,
//! dump the leaves, run a range query, and watch the same paths collapse as
//! items leave.
//!
//! Run:
//! - `cargo run -p bracken_demos --example quadtree_basics`

use bracken_quadtree::{QuadTree, Quadrant};
use bracken_simplex::{Locator, SimplexSet};
use kurbo::Point;

fn main() {
    // A 12x12 region centered at (6, 6): two items per leaf, four levels.
    let mut tree: QuadTree<Locator> = QuadTree::new(Point::new(6.0, 6.0), 12.0, 2, 4);

    let mut vertices = SimplexSet::new();
    let coords = [
        (2.0, 2.0),
        (10.0, 8.0),
        (8.0, 4.0),
        (3.0, 9.0),
        (4.0, 4.0),
        (10.0, 2.0),
        (8.0, 10.0),
        (1.0, 11.0),
        (1.0, 5.0),
        (7.0, 1.0),
        (10.0, 1.0),
        (11.0, 1.0),
    ];
    let ids: Vec<_> = coords
        .iter()
        .map(|&(x, y)| vertices.insert_vertex(Point::new(x, y)))
        .collect();
    let loc = |set: &SimplexSet, i: usize| set.locator(ids[i]).unwrap();

    assert!(tree.insert(loc(&vertices, 0)));
    assert!(tree.insert(loc(&vertices, 1)));

    // Third item splits the root.
    assert!(tree.insert(loc(&vertices, 2)));
    assert!(tree.is_split());

    for i in 3..8 {
        assert!(tree.insert(loc(&vertices, i)));
    }

    // Ninth item splits the south-west child.
    assert!(tree.insert(loc(&vertices, 8)));
    assert!(tree.root().child(Quadrant::SouthWest).unwrap().is_split());

    // Tenth item splits the south-east child.
    assert!(tree.insert(loc(&vertices, 9)));
    assert!(tree.root().child(Quadrant::SouthEast).unwrap().is_split());
    assert!(tree.insert(loc(&vertices, 10)));

    // Twelfth item splits the south-east grandchild.
    assert!(tree.insert(loc(&vertices, 11)));
    let se = tree.root().child(Quadrant::SouthEast).unwrap();
    assert!(se.child(Quadrant::SouthEast).unwrap().is_split());

    println!("VERTICES {}", vertices.len());
    for (_, s) in vertices.iter() {
        println!("{:.5},{:.5}", s.anchor().x, s.anchor().y);
    }

    println!("QTREE {}", tree.n_leafs());
    print!("{tree}");

    // Items in the upper-right window.
    let mut found = Vec::new();
    tree.query_rect(Point::new(7.0, 7.0), Point::new(10.0, 10.0), &mut found);
    print!("# Found objects: ");
    for f in &found {
        print!("{}  ", vertices.display(f.id).unwrap());
    }
    println!();

    // Remove in reverse; the same paths collapse again.
    assert!(tree.remove(&loc(&vertices, 11)));
    let se = tree.root().child(Quadrant::SouthEast).unwrap();
    assert!(!se.child(Quadrant::SouthEast).unwrap().is_split());
    assert!(tree.remove(&loc(&vertices, 10)));

    assert!(tree.remove(&loc(&vertices, 9)));
    assert!(!tree.root().child(Quadrant::SouthEast).unwrap().is_split());

    assert!(tree.remove(&loc(&vertices, 8)));
    assert!(!tree.root().child(Quadrant::SouthWest).unwrap().is_split());

    println!("QTREE {}", tree.n_leafs());
    print!("{tree}");
}
