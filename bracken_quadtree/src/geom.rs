// Copyright 2025 the Bracken Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Geometry kernel: pure predicates over [`kurbo::Point`].
//!
//! Everything in this module is a side-effect-free numeric test. Rectangles
//! are passed as lower-left / upper-right corner pairs and all rectangle
//! membership tests come in inclusive (`in_on_*`) and exclusive (`in_*`)
//! variants.

use kurbo::Point;

// Tolerance on the squared doubled triangle area below which three points are
// treated as colinear. Absolute, sized to dominate f64 rounding rather than
// geometric scale; callers needing scale-invariant behavior must pre-normalize.
const AREA_EPS: f64 = 1.0e-17;

/// Winding of an ordered point triple.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Orientation {
    /// Negative signed area.
    Clockwise,
    /// Positive signed area.
    CounterClockwise,
    /// Signed area within tolerance of zero.
    Colinear,
}

/// Orientation of the triple `(p, q, r)`, from twice the signed area of the
/// triangle they span.
pub fn orientation(p: Point, q: Point, r: Point) -> Orientation {
    let area2 = (p.x - r.x) * (q.y - r.y) - (q.x - r.x) * (p.y - r.y);

    if area2 * area2 < AREA_EPS {
        return Orientation::Colinear;
    }

    if area2 > 0.0 {
        Orientation::CounterClockwise
    } else {
        Orientation::Clockwise
    }
}

/// Whether `r` lies strictly to the left of the directed segment `(p, q)`.
pub fn is_left(p: Point, q: Point, r: Point) -> bool {
    orientation(p, q, r) == Orientation::CounterClockwise
}

/// Whether `r` lies to the left of, or on, the directed segment `(p, q)`.
pub fn is_lefton(p: Point, q: Point, r: Point) -> bool {
    orientation(p, q, r) != Orientation::Clockwise
}

// Projection parameter of r onto the segment (p, q): 0 at p, 1 at q.
// NaN when p == q, which fails every range test below.
fn segment_param(p: Point, q: Point, r: Point) -> f64 {
    let d_qp = q - p;
    let d_rp = r - p;
    d_rp.dot(d_qp) / d_qp.hypot2()
}

/// Whether `r` lies strictly inside the segment `(p, q)` (colinear and between
/// the endpoints, excluding them).
pub fn in_segment(p: Point, q: Point, r: Point) -> bool {
    if orientation(p, q, r) != Orientation::Colinear {
        return false;
    }

    let t = segment_param(p, q, r);
    t > 0.0 && t < 1.0
}

/// Whether `r` lies on the segment `(p, q)`, endpoints included.
pub fn in_on_segment(p: Point, q: Point, r: Point) -> bool {
    if orientation(p, q, r) != Orientation::Colinear {
        return false;
    }

    let t = segment_param(p, q, r);
    (0.0..=1.0).contains(&t)
}

/// Whether the segments `(p1, q1)` and `(p2, q2)` intersect.
///
/// True when the segments properly cross (each pair of endpoints straddles the
/// other segment's supporting line), or when an endpoint of one segment is
/// colinear with and strictly inside the other. Segments that only share an
/// endpoint do not intersect.
pub fn line_intersection(p1: Point, q1: Point, p2: Point, q2: Point) -> bool {
    let o1 = orientation(p1, q1, p2);
    let o2 = orientation(p1, q1, q2);
    let o3 = orientation(p2, q2, p1);
    let o4 = orientation(p2, q2, q1);

    let straddles = |a: Orientation, b: Orientation| {
        (a == Orientation::CounterClockwise && b == Orientation::Clockwise)
            || (a == Orientation::Clockwise && b == Orientation::CounterClockwise)
    };

    if straddles(o1, o2) && straddles(o3, o4) {
        return true;
    }

    (o1 == Orientation::Colinear && in_segment(p1, q1, p2))
        || (o2 == Orientation::Colinear && in_segment(p1, q1, q2))
        || (o3 == Orientation::Colinear && in_segment(p2, q2, p1))
        || (o4 == Orientation::Colinear && in_segment(p2, q2, q1))
}

/// Whether two axis-aligned rectangles overlap, boundaries included.
///
/// Each rectangle is given by its lower-left and upper-right corners. Used by
/// the quadtree to prune subtrees whose region cannot intersect a query
/// rectangle.
pub fn rect_overlap(a_ll: Point, a_ur: Point, b_ll: Point, b_ur: Point) -> bool {
    a_ll.x <= b_ur.x && b_ll.x <= a_ur.x && a_ll.y <= b_ur.y && b_ll.y <= a_ur.y
}

/// Whether `v` lies inside the rectangle `(ll, ur)` or on its boundary.
pub fn in_on_rect(v: Point, ll: Point, ur: Point) -> bool {
    v.x >= ll.x && v.y >= ll.y && v.x <= ur.x && v.y <= ur.y
}

/// Whether `v` lies strictly inside the rectangle `(ll, ur)`.
pub fn in_rect(v: Point, ll: Point, ur: Point) -> bool {
    v.x > ll.x && v.y > ll.y && v.x < ur.x && v.y < ur.y
}
