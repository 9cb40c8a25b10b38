// Copyright 2025 the Bracken Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

// After you edit the crate's doc comment, run this command, then check README.md for any missing links
// cargo rdme --workspace-project=bracken_quadtree --heading-base-level=0

//! Bracken Quadtree: a Kurbo-native adaptive region quadtree.
//!
//! Bracken Quadtree is a reusable building block for spatial lookups over
//! point-like data: mesh entities, scene markers, particles.
//!
//! - Insert and remove items dynamically; nodes split when a leaf outgrows its
//!   capacity and collapse again when removals empty a subtree out.
//! - Query by axis-aligned rectangle, boundary-inclusive.
//! - A small [geometry kernel](geom) of orientation, segment, and rectangle
//!   predicates backs the tree and is exported for callers with adjacent
//!   needs.
//!
//! The tree holds lightweight `Copy` values (a bare [`kurbo::Point`], or a
//! caller-defined handle implementing [`Anchor`]); ownership of the entities
//! they stand for stays with the caller. Coordinates must be stable while an
//! item is held.
//!
//! # Example
//!
//! ```rust
//! use bracken_quadtree::QuadTree;
//! use kurbo::Point;
//!
//! // A 12x12 region centered at (6, 6); leaves split past two items,
//! // down to at most four levels.
//! let mut tree: QuadTree<Point> = QuadTree::new(Point::new(6.0, 6.0), 12.0, 2, 4);
//!
//! assert!(tree.insert(Point::new(2.0, 2.0)));
//! assert!(tree.insert(Point::new(10.0, 8.0)));
//! assert!(tree.insert(Point::new(8.0, 4.0)));
//!
//! // The third insert split the root.
//! assert!(tree.is_split());
//!
//! // Out-of-region inserts are rejected, not an error.
//! assert!(!tree.insert(Point::new(20.0, 20.0)));
//!
//! let mut found = Vec::new();
//! tree.query_rect(Point::new(6.0, 0.0), Point::new(12.0, 6.0), &mut found);
//! assert_eq!(found, vec![Point::new(8.0, 4.0)]);
//!
//! // Removal collapses the split again.
//! assert!(tree.remove(&Point::new(8.0, 4.0)));
//! assert!(!tree.is_split());
//! ```
//!
//! # Structure
//!
//! Nodes are either leaves holding an ordered item list or internal nodes with
//! exactly four half-scale children in NE/NW/SW/SE order. A leaf holding more
//! than `max_items` items splits while its depth allows; at `max_depth` it
//! grows unboundedly instead. An internal node whose subtree count falls to
//! `max_items` or below collapses its (by then leaf) children back into
//! itself. Nodes live in a flat arena with parent links used only for subtree
//! count propagation.
//!
//! Expected-case rejections (out-of-region insert, removal of an absent item)
//! are boolean results. Violations of the partition or count invariants are
//! programming faults and panic.
//!
//! This crate is `no_std` and uses `alloc`.

#![no_std]

extern crate alloc;

pub mod geom;
pub mod tree;

pub use geom::Orientation;
pub use tree::{Anchor, NodeRef, QuadTree, Quadrant, Region};
