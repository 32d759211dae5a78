//! Planar predicates used by the path search: orientation, segment
//! intersection and the turn angle at a vertex.

use serde::{Deserialize, Serialize};

use crate::cone::Point;

/// Turn direction of an ordered point triplet.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Orientation {
    Collinear,
    Clockwise,
    CounterClockwise,
}

/// Orientation of the triplet `(a, b, c)`.
///
/// Uses the sign of the cross product of `b - a` and `c - b` with an exact
/// zero test, so only truly collinear input reports [`Orientation::Collinear`].
#[inline]
pub fn orientation(a: Point, b: Point, c: Point) -> Orientation {
    let val = (b.y - a.y) * (c.x - b.x) - (b.x - a.x) * (c.y - b.y);
    if val > 0.0 {
        Orientation::Clockwise
    } else if val < 0.0 {
        Orientation::CounterClockwise
    } else {
        Orientation::Collinear
    }
}

/// True if `b` lies inside the axis-aligned bounding box of `a` and `c`.
///
/// Only meaningful when `(a, b, c)` are collinear, where it separates real
/// overlap from points further along the same line.
#[inline]
pub fn on_segment(a: Point, b: Point, c: Point) -> bool {
    b.x <= a.x.max(c.x) && b.x >= a.x.min(c.x) && b.y <= a.y.max(c.y) && b.y >= a.y.min(c.y)
}

/// Test whether segments `p1-p2` and `p3-p4` intersect.
///
/// A segment shorter than `tolerance` never intersects anything, whatever
/// its position. Touching endpoints and collinear overlap count as
/// intersections.
pub fn segments_intersect(p1: Point, p2: Point, p3: Point, p4: Point, tolerance: f64) -> bool {
    if nalgebra::distance(&p1, &p2) < tolerance || nalgebra::distance(&p3, &p4) < tolerance {
        return false;
    }

    let o1 = orientation(p1, p2, p3);
    let o2 = orientation(p1, p2, p4);
    let o3 = orientation(p3, p4, p1);
    let o4 = orientation(p3, p4, p2);

    if o1 != o2 && o3 != o4 {
        return true;
    }

    (o1 == Orientation::Collinear && on_segment(p1, p3, p2))
        || (o2 == Orientation::Collinear && on_segment(p1, p4, p2))
        || (o3 == Orientation::Collinear && on_segment(p3, p1, p4))
        || (o4 == Orientation::Collinear && on_segment(p3, p2, p4))
}

/// Angle at vertex `b` between the rays `b -> a` and `b -> c`, in radians.
///
/// Returns `None` when either ray has zero length.
pub fn try_angle_between(a: Point, b: Point, c: Point) -> Option<f64> {
    let ba = a - b;
    let bc = c - b;
    let (na, nc) = (ba.norm(), bc.norm());
    if na == 0.0 || nc == 0.0 {
        return None;
    }
    Some((ba.dot(&bc) / (na * nc)).clamp(-1.0, 1.0).acos())
}

/// Angle at vertex `b` between the rays `b -> a` and `b -> c`, in radians,
/// in `[0, π]`.
///
/// A zero-length ray yields `0`, the same value as a full reversal, so
/// callers pruning sharp turns also reject coincident points.
#[inline]
pub fn angle_between(a: Point, b: Point, c: Point) -> f64 {
    try_angle_between(a, b, c).unwrap_or(0.0)
}
