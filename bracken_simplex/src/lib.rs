// Copyright 2025 the Bracken Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

// After you edit the crate's doc comment, run this command, then check README.md for any missing links
// cargo rdme --workspace-project=bracken_simplex --heading-base-level=0

//! Bracken Simplex: the two-dimensional simplex family and its owning
//! container.
//!
//! - [`Simplex`]: a vertex, edge, triangle, or quad. Every simplex carries a
//!   stable representative coordinate — the vertex position, or the
//!   midpoint/centroid of the referenced vertices, computed once at
//!   construction.
//! - [`SimplexSet`]: owns simplices in generational slots with stable
//!   [`SimplexId`] handles, O(1) removal, and slot-order iteration.
//! - [`Locator`]: a `Copy` handle pairing a [`SimplexId`] with its anchor,
//!   implementing [`bracken_quadtree::Anchor`] so it can be stored in a
//!   [`bracken_quadtree::QuadTree`] while the set keeps ownership.
//!
//! # Example
//!
//! ```rust
//! use bracken_simplex::SimplexSet;
//! use bracken_quadtree::QuadTree;
//! use kurbo::Point;
//!
//! let mut set = SimplexSet::new();
//! let a = set.insert_vertex(Point::new(0.0, 0.0));
//! let b = set.insert_vertex(Point::new(4.0, 0.0));
//! let c = set.insert_vertex(Point::new(0.0, 4.0));
//! let t = set.insert_triangle(a, b, c).unwrap();
//!
//! // The triangle is anchored at its centroid.
//! assert!((set.get(t).unwrap().anchor().x - 4.0 / 3.0).abs() < 1e-12);
//!
//! // Index the whole scene; the set stays the owner.
//! let mut tree = QuadTree::new(Point::new(2.0, 2.0), 8.0, 4, 4);
//! for loc in set.locators() {
//!     assert!(tree.insert(loc));
//! }
//! assert_eq!(tree.len(), set.len());
//!
//! // Remove from the tree first, then from the set.
//! let loc = set.locator(t).unwrap();
//! assert!(tree.remove(&loc));
//! assert!(set.remove(t).is_some());
//! ```
//!
//! This crate is `no_std` and uses `alloc`.

#![no_std]

extern crate alloc;

use alloc::vec::Vec;
use core::fmt;

use bracken_quadtree::Anchor;
use kurbo::Point;

/// Generational handle of a simplex in a [`SimplexSet`].
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub struct SimplexId(u32, u32);

impl SimplexId {
    fn new(idx: u32, generation: u32) -> Self {
        Self(idx, generation)
    }

    fn idx(self) -> usize {
        self.0 as usize
    }
}

/// Which member of the simplex family an entry is, with its vertex references.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum SimplexKind {
    /// A bare point.
    Vertex,
    /// A segment between two vertices.
    Edge([SimplexId; 2]),
    /// A triangle over three vertices.
    Triangle([SimplexId; 3]),
    /// A quadrilateral over four vertices.
    Quad([SimplexId; 4]),
}

/// A two-dimensional simplex with a cached representative coordinate.
///
/// The anchor is the vertex position itself, an edge's midpoint, or a
/// triangle's/quad's vertex centroid, fixed at construction. Higher-order
/// simplices reference their vertices by id; removing a referenced vertex
/// from the set does not update dependents (their anchors stay valid, their
/// references dangle — callers remove dependents first).
#[derive(Clone, Debug, PartialEq)]
pub struct Simplex {
    kind: SimplexKind,
    anchor: Point,
}

impl Simplex {
    /// Which member of the family this is.
    pub fn kind(&self) -> &SimplexKind {
        &self.kind
    }

    /// The cached representative coordinate.
    pub fn anchor(&self) -> Point {
        self.anchor
    }
}

impl Anchor for Simplex {
    fn anchor(&self) -> Point {
        self.anchor
    }
}

/// Copyable handle pairing a simplex id with its anchor.
///
/// This is what gets stored in a [`QuadTree`](bracken_quadtree::QuadTree):
/// the set keeps ownership, the tree holds only these. Two locators are equal
/// when both id (index and generation) and anchor match, so a handle from a
/// recycled slot never matches a previous occupant.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Locator {
    /// Id of the simplex in its set.
    pub id: SimplexId,
    /// The simplex's anchor at the time the locator was taken.
    pub xy: Point,
}

impl Anchor for Locator {
    fn anchor(&self) -> Point {
        self.xy
    }
}

/// Owning container for simplices with stable generational ids.
///
/// Slots are recycled through a free list; a recycled slot bumps its
/// generation so stale ids miss instead of aliasing the new occupant.
/// Iteration yields live entries in slot order.
#[derive(Clone, Debug, Default)]
pub struct SimplexSet {
    slots: Vec<Option<Simplex>>,
    generations: Vec<u32>, // last generation per slot (persists across frees)
    free_list: Vec<usize>,
    len: usize,
}

impl SimplexSet {
    /// Create an empty set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of live simplices.
    pub fn len(&self) -> usize {
        self.len
    }

    /// Whether the set holds no simplices.
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Insert a vertex at `at`.
    pub fn insert_vertex(&mut self, at: Point) -> SimplexId {
        self.insert_raw(Simplex {
            kind: SimplexKind::Vertex,
            anchor: at,
        })
    }

    /// Insert an edge between two vertices, anchored at their midpoint.
    ///
    /// Returns `None` when either id is dead or does not refer to a vertex.
    pub fn insert_edge(&mut self, a: SimplexId, b: SimplexId) -> Option<SimplexId> {
        let pa = self.vertex_at(a)?;
        let pb = self.vertex_at(b)?;
        Some(self.insert_raw(Simplex {
            kind: SimplexKind::Edge([a, b]),
            anchor: pa.midpoint(pb),
        }))
    }

    /// Insert a triangle over three vertices, anchored at their centroid.
    ///
    /// Returns `None` when any id is dead or does not refer to a vertex.
    pub fn insert_triangle(
        &mut self,
        a: SimplexId,
        b: SimplexId,
        c: SimplexId,
    ) -> Option<SimplexId> {
        let pa = self.vertex_at(a)?;
        let pb = self.vertex_at(b)?;
        let pc = self.vertex_at(c)?;
        let centroid = ((pa.to_vec2() + pb.to_vec2() + pc.to_vec2()) / 3.0).to_point();
        Some(self.insert_raw(Simplex {
            kind: SimplexKind::Triangle([a, b, c]),
            anchor: centroid,
        }))
    }

    /// Insert a quadrilateral over four vertices, anchored at their centroid.
    ///
    /// Returns `None` when any id is dead or does not refer to a vertex.
    pub fn insert_quad(
        &mut self,
        a: SimplexId,
        b: SimplexId,
        c: SimplexId,
        d: SimplexId,
    ) -> Option<SimplexId> {
        let pa = self.vertex_at(a)?;
        let pb = self.vertex_at(b)?;
        let pc = self.vertex_at(c)?;
        let pd = self.vertex_at(d)?;
        let centroid =
            ((pa.to_vec2() + pb.to_vec2() + pc.to_vec2() + pd.to_vec2()) * 0.25).to_point();
        Some(self.insert_raw(Simplex {
            kind: SimplexKind::Quad([a, b, c, d]),
            anchor: centroid,
        }))
    }

    /// The simplex behind `id`, if it is still live.
    pub fn get(&self, id: SimplexId) -> Option<&Simplex> {
        let s = self.slots.get(id.idx())?.as_ref()?;
        if self.generations[id.idx()] != id.1 {
            return None;
        }
        Some(s)
    }

    /// Remove and return the simplex behind `id`.
    ///
    /// O(1); ids of other entries are unaffected. Returns `None` for a dead
    /// or stale id.
    pub fn remove(&mut self, id: SimplexId) -> Option<Simplex> {
        self.get(id)?;
        let s = self.slots[id.idx()].take();
        self.free_list.push(id.idx());
        self.len -= 1;
        s
    }

    /// A [`Locator`] for `id`, if it is still live.
    pub fn locator(&self, id: SimplexId) -> Option<Locator> {
        self.get(id).map(|s| Locator {
            id,
            xy: s.anchor(),
        })
    }

    /// Live entries in slot order.
    pub fn iter(&self) -> impl Iterator<Item = (SimplexId, &Simplex)> + '_ {
        self.slots.iter().enumerate().filter_map(|(i, s)| {
            s.as_ref().map(|sx| {
                #[allow(
                    clippy::cast_possible_truncation,
                    reason = "SimplexId uses 32-bit indices by design."
                )]
                (SimplexId::new(i as u32, self.generations[i]), sx)
            })
        })
    }

    /// Locators of every live entry, in slot order.
    pub fn locators(&self) -> impl Iterator<Item = Locator> + '_ {
        self.iter().map(|(id, s)| Locator {
            id,
            xy: s.anchor(),
        })
    }

    /// Display adapter for `id`, resolving vertex references the way the
    /// entries print themselves.
    pub fn display(&self, id: SimplexId) -> Option<SimplexDisplay<'_>> {
        self.get(id)?;
        Some(SimplexDisplay { set: self, id })
    }

    fn insert_raw(&mut self, simplex: Simplex) -> SimplexId {
        self.len += 1;
        if let Some(idx) = self.free_list.pop() {
            let generation = self.generations[idx].saturating_add(1);
            self.generations[idx] = generation;
            self.slots[idx] = Some(simplex);
            #[allow(
                clippy::cast_possible_truncation,
                reason = "SimplexId uses 32-bit indices by design."
            )]
            SimplexId::new(idx as u32, generation)
        } else {
            let generation = 1_u32;
            self.slots.push(Some(simplex));
            self.generations.push(generation);
            #[allow(
                clippy::cast_possible_truncation,
                reason = "SimplexId uses 32-bit indices by design."
            )]
            SimplexId::new((self.slots.len() - 1) as u32, generation)
        }
    }

    // Position behind `id` when it is a live vertex.
    fn vertex_at(&self, id: SimplexId) -> Option<Point> {
        let s = self.get(id)?;
        match s.kind {
            SimplexKind::Vertex => Some(s.anchor),
            _ => None,
        }
    }
}

/// Borrowed display adapter returned by [`SimplexSet::display`].
///
/// Vertices print as `V: (x, y)`; higher-order simplices chain their vertex
/// prints with ` -> `, a dead reference printing as `V: ?`.
#[derive(Debug)]
pub struct SimplexDisplay<'a> {
    set: &'a SimplexSet,
    id: SimplexId,
}

impl SimplexDisplay<'_> {
    fn write_vertex(&self, f: &mut fmt::Formatter<'_>, id: SimplexId) -> fmt::Result {
        match self.set.vertex_at(id) {
            Some(p) => write!(f, "V: {p}"),
            None => write!(f, "V: ?"),
        }
    }

    fn write_chain(&self, f: &mut fmt::Formatter<'_>, ids: &[SimplexId]) -> fmt::Result {
        for (i, id) in ids.iter().enumerate() {
            if i > 0 {
                write!(f, " -> ")?;
            }
            self.write_vertex(f, *id)?;
        }
        Ok(())
    }
}

impl fmt::Display for SimplexDisplay<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // `display` checked liveness; the set is borrowed, so it still holds.
        let Some(s) = self.set.get(self.id) else {
            return write!(f, "?");
        };
        match s.kind() {
            SimplexKind::Vertex => write!(f, "V: {}", s.anchor()),
            SimplexKind::Edge(v) => self.write_chain(f, v),
            SimplexKind::Triangle(v) => self.write_chain(f, v),
            SimplexKind::Quad(v) => self.write_chain(f, v),
        }
    }
}
