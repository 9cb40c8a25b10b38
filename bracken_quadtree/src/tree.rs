// Copyright 2025 the Bracken Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Adaptive region quadtree: structure, insertion/removal, range queries.

use alloc::vec::Vec;
use core::fmt;
use core::fmt::Debug;

use kurbo::Point;

use crate::geom::{in_on_rect, rect_overlap};

/// Capability the index requires of a stored item: a stable representative
/// 2-D coordinate.
///
/// The coordinate must not change while the item is held by a tree; routing,
/// redistribution on split, and removal all re-read it.
pub trait Anchor {
    /// Representative coordinate of the item.
    fn anchor(&self) -> Point;
}

impl Anchor for Point {
    fn anchor(&self) -> Point {
        *self
    }
}

/// Axis-aligned square region given by its center and full side length.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Region {
    center: Point,
    scale: f64,
}

impl Region {
    /// Create a region centered at `center` with side length `scale`.
    pub const fn new(center: Point, scale: f64) -> Self {
        Self { center, scale }
    }

    /// Center of the square.
    pub const fn center(&self) -> Point {
        self.center
    }

    /// Full side length of the square.
    pub const fn scale(&self) -> f64 {
        self.scale
    }

    /// Lower-left corner.
    pub fn lowleft(&self) -> Point {
        let h = 0.5 * self.scale;
        Point::new(self.center.x - h, self.center.y - h)
    }

    /// Upper-right corner.
    pub fn upright(&self) -> Point {
        let h = 0.5 * self.scale;
        Point::new(self.center.x + h, self.center.y + h)
    }

    /// Whether `v` lies inside the region or on its boundary.
    pub fn contains(&self, v: Point) -> bool {
        in_on_rect(v, self.lowleft(), self.upright())
    }

    /// Whether the region overlaps the rectangle `(ll, ur)`, boundaries
    /// included.
    pub fn overlaps(&self, ll: Point, ur: Point) -> bool {
        rect_overlap(self.lowleft(), self.upright(), ll, ur)
    }

    /// The half-scale child region for quadrant `q`.
    pub fn quadrant(&self, q: Quadrant) -> Self {
        let h = 0.25 * self.scale;
        let (sx, sy) = q.signs();
        Self {
            center: Point::new(self.center.x + sx * h, self.center.y + sy * h),
            scale: 0.5 * self.scale,
        }
    }
}

/// The four quadrants of a split region, in child-slot order.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Quadrant {
    /// Child slot 0: upper right.
    NorthEast,
    /// Child slot 1: upper left.
    NorthWest,
    /// Child slot 2: lower left.
    SouthWest,
    /// Child slot 3: lower right.
    SouthEast,
}

impl Quadrant {
    /// All quadrants in child-slot order.
    pub const ALL: [Self; 4] = [
        Self::NorthEast,
        Self::NorthWest,
        Self::SouthWest,
        Self::SouthEast,
    ];

    const fn slot(self) -> usize {
        self as usize
    }

    const fn signs(self) -> (f64, f64) {
        match self {
            Self::NorthEast => (1.0, 1.0),
            Self::NorthWest => (-1.0, 1.0),
            Self::SouthWest => (-1.0, -1.0),
            Self::SouthEast => (1.0, -1.0),
        }
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
struct NodeIdx(usize);

impl NodeIdx {
    const fn new(i: usize) -> Self {
        Self(i)
    }

    const fn get(self) -> usize {
        self.0
    }
}

const ROOT: NodeIdx = NodeIdx::new(0);

#[derive(Clone, Debug)]
enum NodeKind<T> {
    Leaf(Vec<T>),
    Internal([NodeIdx; 4]),
}

#[derive(Clone, Debug)]
struct Node<T> {
    region: Region,
    depth: usize,
    // Upward-only link used to propagate subtree counts; never used to reach
    // siblings or mutate parent structure.
    parent: Option<NodeIdx>,
    n_items: usize,
    kind: NodeKind<T>,
}

impl<T> Node<T> {
    fn leaf(region: Region, depth: usize, parent: Option<NodeIdx>) -> Self {
        Self {
            region,
            depth,
            parent,
            n_items: 0,
            kind: NodeKind::Leaf(Vec::new()),
        }
    }
}

/// Adaptive region quadtree over point-like items.
///
/// Each node covers an axis-aligned square and is either a leaf holding an
/// ordered list of items or an internal node with exactly four half-scale
/// children (NE, NW, SW, SE). A leaf splits when it exceeds `max_items` below
/// `max_depth`; an internal node collapses back into a leaf when a removal
/// brings its subtree count to `max_items` or less. At `max_depth` a leaf
/// grows without bound instead of splitting.
///
/// Items are lightweight `Copy` values (a bare [`Point`], or a handle carrying
/// its anchor); the tree never owns the entities they refer to. Removal
/// matches by `PartialEq`.
///
/// Nodes live in a flat arena and reference each other by index; child slots
/// are created by a split and returned to a free list by the matching merge.
pub struct QuadTree<T: Anchor + Copy + PartialEq + Debug> {
    arena: Vec<Node<T>>,
    free_list: Vec<usize>,
    max_items: usize,
    max_depth: usize,
}

impl<T: Anchor + Copy + PartialEq + Debug> QuadTree<T> {
    /// Create a tree whose root leaf covers the square at `center` with side
    /// length `scale`.
    ///
    /// `max_items` and `max_depth` are fixed for the tree's lifetime. Items
    /// outside the root region are rejected by [`insert`](Self::insert).
    pub fn new(center: Point, scale: f64, max_items: usize, max_depth: usize) -> Self {
        let mut arena = Vec::new();
        arena.push(Node::leaf(Region::new(center, scale), 0, None));
        Self {
            arena,
            free_list: Vec::new(),
            max_items,
            max_depth,
        }
    }

    /// Total number of items held anywhere in the tree.
    pub fn len(&self) -> usize {
        self.arena[ROOT.get()].n_items
    }

    /// Whether the tree holds no items.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Whether the root node has split.
    pub fn is_split(&self) -> bool {
        self.root().is_split()
    }

    /// Maximum number of items a leaf holds before splitting (unless depth
    /// limited).
    pub const fn max_items(&self) -> usize {
        self.max_items
    }

    /// Maximum node depth; leaves at this depth grow beyond `max_items`.
    pub const fn max_depth(&self) -> usize {
        self.max_depth
    }

    /// The root region.
    pub fn region(&self) -> Region {
        self.arena[ROOT.get()].region
    }

    /// Borrowed view of the root node.
    pub fn root(&self) -> NodeRef<'_, T> {
        NodeRef {
            tree: self,
            idx: ROOT,
        }
    }

    /// Number of nodes currently in leaf state.
    pub fn n_leafs(&self) -> usize {
        self.leafs_below(ROOT)
    }

    /// Insert an item.
    ///
    /// Returns `false`, without mutating, when the item's anchor lies outside
    /// the root region (boundary-inclusive). May split one or more leaves.
    ///
    /// # Panics
    ///
    /// Panics if the partition invariant is already broken: an in-bounds item
    /// every child refuses, or a split unable to relocate every held item.
    pub fn insert(&mut self, item: T) -> bool {
        self.insert_at(ROOT, item)
    }

    /// Remove an item by equality.
    ///
    /// Returns `false` when the anchor lies outside the root region or no
    /// equal item is held; removing an absent item is a no-op. May collapse
    /// internal nodes back into leaves.
    ///
    /// # Panics
    ///
    /// Panics if a merge is triggered while a child is still split, which
    /// indicates broken count bookkeeping.
    pub fn remove(&mut self, item: &T) -> bool {
        self.remove_at(ROOT, item)
    }

    /// Collect every held item whose anchor lies within or on the boundary of
    /// the rectangle `(lowleft, upright)` into `found`.
    ///
    /// Appends to `found` without clearing it. Within one leaf, items keep
    /// their insertion order; no order is guaranteed across leaves. Returns
    /// whether this call appended anything.
    pub fn query_rect(&self, lowleft: Point, upright: Point, found: &mut Vec<T>) -> bool {
        self.query_at(ROOT, lowleft, upright, found)
    }

    // --- internals ---

    fn node(&self, idx: NodeIdx) -> &Node<T> {
        &self.arena[idx.get()]
    }

    // Children of `idx`, or None for a leaf.
    fn children(&self, idx: NodeIdx) -> Option<[NodeIdx; 4]> {
        match self.node(idx).kind {
            NodeKind::Internal(children) => Some(children),
            NodeKind::Leaf(_) => None,
        }
    }

    fn alloc(&mut self, node: Node<T>) -> NodeIdx {
        if let Some(slot) = self.free_list.pop() {
            self.arena[slot] = node;
            NodeIdx::new(slot)
        } else {
            self.arena.push(node);
            NodeIdx::new(self.arena.len() - 1)
        }
    }

    // Add `delta` to the subtree count of `idx` and every ancestor.
    fn adjust_counts(&mut self, idx: NodeIdx, delta: isize) {
        let mut at = Some(idx);
        while let Some(i) = at {
            let node = &mut self.arena[i.get()];
            node.n_items = node
                .n_items
                .checked_add_signed(delta)
                .expect("subtree count out of range");
            at = node.parent;
        }
    }

    fn insert_at(&mut self, idx: NodeIdx, item: T) -> bool {
        if !self.node(idx).region.contains(item.anchor()) {
            return false;
        }

        if let Some(children) = self.children(idx) {
            for child in children {
                if self.insert_at(child, item) {
                    return true;
                }
            }
            // The item is inside this region, so exactly one child region
            // must contain it.
            panic!("no child accepted an in-bounds item: partition invariant broken");
        }

        let (len, depth) = {
            let node = &mut self.arena[idx.get()];
            let NodeKind::Leaf(items) = &mut node.kind else {
                unreachable!("checked leaf above")
            };
            items.push(item);
            (items.len(), node.depth)
        };
        self.adjust_counts(idx, 1);

        if len > self.max_items && depth < self.max_depth {
            self.split(idx);
        }

        true
    }

    fn split(&mut self, idx: NodeIdx) {
        let (region, depth) = {
            let node = self.node(idx);
            (node.region, node.depth)
        };

        let mut children = [ROOT; 4];
        for q in Quadrant::ALL {
            children[q.slot()] = self.alloc(Node::leaf(region.quadrant(q), depth + 1, Some(idx)));
        }

        let NodeKind::Leaf(items) = core::mem::replace(
            &mut self.arena[idx.get()].kind,
            NodeKind::Internal(children),
        ) else {
            unreachable!("split is only invoked on leaves")
        };

        for item in items {
            let mut placed = false;
            for child in children {
                if self.insert_at(child, item) {
                    // The child insert counted the item again along this
                    // node's ancestor chain; compensate so only the child
                    // subtree gains.
                    self.adjust_counts(idx, -1);
                    placed = true;
                    break;
                }
            }
            if !placed {
                panic!("split failed to relocate an item: partition invariant broken");
            }
        }

        debug_assert_eq!(
            self.node(idx).n_items,
            children.iter().map(|c| self.node(*c).n_items).sum::<usize>(),
            "internal count must equal the sum of its children"
        );
    }

    fn remove_at(&mut self, idx: NodeIdx, item: &T) -> bool {
        if !self.node(idx).region.contains(item.anchor()) {
            return false;
        }

        if let Some(children) = self.children(idx) {
            let mut removed = false;
            for child in children {
                if self.remove_at(child, item) {
                    removed = true;
                    break;
                }
            }
            if removed && self.node(idx).n_items <= self.max_items {
                self.merge(idx);
            }
            return removed;
        }

        let node = &mut self.arena[idx.get()];
        let NodeKind::Leaf(items) = &mut node.kind else {
            unreachable!("checked leaf above")
        };
        let Some(pos) = items.iter().position(|held| held == item) else {
            return false;
        };
        items.remove(pos);
        self.adjust_counts(idx, -1);
        true
    }

    // Collapse the four children of `idx` back into it. Children collapse
    // before parents during removal, so every child is a leaf here.
    fn merge(&mut self, idx: NodeIdx) {
        let Some(children) = self.children(idx) else {
            unreachable!("merge is only invoked on internal nodes")
        };

        let mut merged: Vec<T> = Vec::with_capacity(self.node(idx).n_items);
        for child in children {
            let NodeKind::Leaf(items) = &mut self.arena[child.get()].kind else {
                panic!("merge attempted while a child is still split: count bookkeeping broken");
            };
            merged.append(items);
            self.free_list.push(child.get());
        }

        debug_assert_eq!(
            merged.len(),
            self.node(idx).n_items,
            "merged items must match the subtree count"
        );
        self.arena[idx.get()].kind = NodeKind::Leaf(merged);
    }

    fn query_at(&self, idx: NodeIdx, ll: Point, ur: Point, found: &mut Vec<T>) -> bool {
        let node = self.node(idx);
        if !node.region.overlaps(ll, ur) {
            return false;
        }

        match &node.kind {
            NodeKind::Internal(children) => {
                let mut any = false;
                for child in children {
                    any |= self.query_at(*child, ll, ur, found);
                }
                any
            }
            NodeKind::Leaf(items) => {
                let before = found.len();
                for item in items {
                    if in_on_rect(item.anchor(), ll, ur) {
                        found.push(*item);
                    }
                }
                found.len() > before
            }
        }
    }

    fn leafs_below(&self, idx: NodeIdx) -> usize {
        match &self.node(idx).kind {
            NodeKind::Leaf(_) => 1,
            NodeKind::Internal(children) => {
                children.iter().map(|c| self.leafs_below(*c)).sum()
            }
        }
    }

    fn fmt_leafs(&self, idx: NodeIdx, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.node(idx).kind {
            NodeKind::Internal(children) => {
                for child in children {
                    self.fmt_leafs(*child, f)?;
                }
                Ok(())
            }
            NodeKind::Leaf(items) => {
                let region = self.node(idx).region;
                writeln!(
                    f,
                    "{:.5},{:.5},{:.5},{}",
                    region.center().x,
                    region.center().y,
                    region.scale(),
                    items.len()
                )
            }
        }
    }
}

impl<T: Anchor + Copy + PartialEq + Debug> Debug for QuadTree<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("QuadTree")
            .field("max_items", &self.max_items)
            .field("max_depth", &self.max_depth)
            .field("len", &self.len())
            .field("n_leafs", &self.n_leafs())
            .field("arena_nodes", &self.arena.len())
            .field("free", &self.free_list.len())
            .finish_non_exhaustive()
    }
}

/// Diagnostic dump: one line per leaf with `center.x,center.y,scale,count` at
/// fixed five-decimal precision, leaves walked in child-slot order.
impl<T: Anchor + Copy + PartialEq + Debug> fmt::Display for QuadTree<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.fmt_leafs(ROOT, f)
    }
}

/// Borrowed read-only view of one node, for diagnostics and tests.
#[derive(Copy, Clone)]
pub struct NodeRef<'a, T: Anchor + Copy + PartialEq + Debug> {
    tree: &'a QuadTree<T>,
    idx: NodeIdx,
}

impl<'a, T: Anchor + Copy + PartialEq + Debug> NodeRef<'a, T> {
    /// Whether this node has split into four children.
    pub fn is_split(&self) -> bool {
        matches!(self.node().kind, NodeKind::Internal(_))
    }

    /// Total items in the subtree rooted here.
    pub fn len(&self) -> usize {
        self.node().n_items
    }

    /// Whether the subtree rooted here holds no items.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Depth of this node; 0 at the root.
    pub fn depth(&self) -> usize {
        self.node().depth
    }

    /// The node's region.
    pub fn region(&self) -> Region {
        self.node().region
    }

    /// Items held directly by this node; empty for a split node.
    pub fn items(&self) -> &'a [T] {
        match &self.tree.arena[self.idx.get()].kind {
            NodeKind::Leaf(items) => items,
            NodeKind::Internal(_) => &[],
        }
    }

    /// The child in quadrant `q`, or `None` for a leaf.
    pub fn child(&self, q: Quadrant) -> Option<Self> {
        match self.node().kind {
            NodeKind::Internal(children) => Some(Self {
                tree: self.tree,
                idx: children[q.slot()],
            }),
            NodeKind::Leaf(_) => None,
        }
    }

    fn node(&self) -> &'a Node<T> {
        &self.tree.arena[self.idx.get()]
    }
}

impl<T: Anchor + Copy + PartialEq + Debug> Debug for NodeRef<'_, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("NodeRef")
            .field("region", &self.region())
            .field("depth", &self.depth())
            .field("split", &self.is_split())
            .field("len", &self.len())
            .finish()
    }
}
