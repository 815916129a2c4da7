//! Pure 2D geometry on point lists.
//!
//! Everything here is synchronous and bounded by the input size. Functions
//! that rewrite points do so in place so shapes keep their identity while
//! being dragged.

#[cfg(test)]
#[path = "geometry_test.rs"]
mod geometry_test;

use std::f64::consts::TAU;

use serde::{Deserialize, Serialize};

use crate::camera::Point;
use crate::consts::{EXPAND_ARC_SEGMENTS, GEOMETRY_EPSILON};

/// Axis-aligned bounding rectangle, grown one point at a time.
///
/// A fresh rectangle is empty; the first [`BoundingRect::bound`] call makes
/// it a degenerate rectangle around that point.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct BoundingRect {
    bounds: Option<(Point, Point)>,
}

impl BoundingRect {
    #[must_use]
    pub fn empty() -> Self {
        Self::default()
    }

    /// Bounding rectangle of a point list; empty when the list is.
    #[must_use]
    pub fn from_points(points: &[Point]) -> Self {
        let mut rect = Self::empty();
        for p in points {
            rect.bound(*p);
        }
        rect
    }

    /// Grow the rectangle to include `p`.
    pub fn bound(&mut self, p: Point) {
        self.bounds = Some(match self.bounds {
            None => (p, p),
            Some((min, max)) => (
                Point::new(min.x.min(p.x), min.y.min(p.y)),
                Point::new(max.x.max(p.x), max.y.max(p.y)),
            ),
        });
    }

    /// Grow the rectangle to include all of `other`.
    pub fn union(&mut self, other: &BoundingRect) {
        if let Some((min, max)) = other.bounds {
            self.bound(min);
            self.bound(max);
        }
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.bounds.is_none()
    }

    #[must_use]
    pub fn min(&self) -> Option<Point> {
        self.bounds.map(|(min, _)| min)
    }

    #[must_use]
    pub fn max(&self) -> Option<Point> {
        self.bounds.map(|(_, max)| max)
    }

    #[must_use]
    pub fn width(&self) -> f64 {
        self.bounds.map_or(0.0, |(min, max)| max.x - min.x)
    }

    #[must_use]
    pub fn height(&self) -> f64 {
        self.bounds.map_or(0.0, |(min, max)| max.y - min.y)
    }

    #[must_use]
    pub fn center(&self) -> Option<Point> {
        self.bounds.map(|(min, max)| min.midpoint(max))
    }

    /// The `max - min` vector; zero while empty.
    #[must_use]
    pub fn diagonal(&self) -> Point {
        self.bounds.map_or(Point::default(), |(min, max)| max - min)
    }

    #[must_use]
    pub fn diagonal_length(&self) -> f64 {
        self.diagonal().length()
    }
}

/// Edges of a closed polygon, including the closing edge from last to first.
fn edges(polygon: &[Point]) -> impl Iterator<Item = (Point, Point)> + '_ {
    polygon
        .iter()
        .copied()
        .zip(polygon.iter().copied().cycle().skip(1))
}

/// Z component of `(a - o) × (b - o)`; positive for a left turn in a y-up frame.
fn cross(o: Point, a: Point, b: Point) -> f64 {
    (a.x - o.x) * (b.y - o.y) - (a.y - o.y) * (b.x - o.x)
}

/// Convex hull via Andrew's monotone chain.
///
/// The result is counter-clockwise in a y-up frame and starts at the point
/// with the lowest x (then lowest y). Collinear points are dropped. Duplicate
/// points collapse; one or two distinct points come back sorted, and a fully
/// collinear input yields its two extremes.
#[must_use]
pub fn convex_hull(points: &[Point]) -> Vec<Point> {
    let mut sorted = points.to_vec();
    sorted.sort_by(|a, b| a.x.total_cmp(&b.x).then(a.y.total_cmp(&b.y)));
    sorted.dedup();
    if sorted.len() < 3 {
        return sorted;
    }

    let mut lower: Vec<Point> = Vec::with_capacity(sorted.len());
    for &p in &sorted {
        while lower.len() >= 2 && cross(lower[lower.len() - 2], lower[lower.len() - 1], p) <= 0.0 {
            lower.pop();
        }
        lower.push(p);
    }

    let mut upper: Vec<Point> = Vec::with_capacity(sorted.len());
    for &p in sorted.iter().rev() {
        while upper.len() >= 2 && cross(upper[upper.len() - 2], upper[upper.len() - 1], p) <= 0.0 {
            upper.pop();
        }
        upper.push(p);
    }

    lower.pop();
    upper.pop();
    lower.extend(upper);
    lower
}

/// Grow a polygon outward by `distance`, rounding the corners.
///
/// Computed as the hull of a disc swept around every vertex, so the result is
/// always convex. Empty input or a non-positive distance returns the input.
#[must_use]
pub fn expand_polygon(points: &[Point], distance: f64) -> Vec<Point> {
    if points.is_empty() || !distance.is_finite() || distance <= 0.0 {
        return points.to_vec();
    }

    let step = TAU / f64::from(EXPAND_ARC_SEGMENTS);
    let swept: Vec<Point> = points
        .iter()
        .flat_map(|&p| {
            (0..EXPAND_ARC_SEGMENTS).map(move |i| {
                let angle = step * f64::from(i);
                p + Point::new(angle.cos(), angle.sin()) * distance
            })
        })
        .collect();
    convex_hull(&swept)
}

fn on_segment(p: Point, a: Point, b: Point) -> bool {
    let ab = b - a;
    let ap = p - a;
    let len = ab.length();
    if len < GEOMETRY_EPSILON {
        return ap.length() <= GEOMETRY_EPSILON;
    }
    let off_line = (ab.x * ap.y - ab.y * ap.x) / len;
    if off_line.abs() > GEOMETRY_EPSILON {
        return false;
    }
    let along = (ab.x * ap.x + ab.y * ap.y) / len;
    (-GEOMETRY_EPSILON..=len + GEOMETRY_EPSILON).contains(&along)
}

/// Whether `point` lies inside `polygon` (convex or not).
///
/// Points on the boundary count as inside. Polygons with fewer than three
/// vertices contain only their boundary.
#[must_use]
pub fn point_in_polygon(polygon: &[Point], point: Point) -> bool {
    if edges(polygon).any(|(a, b)| on_segment(point, a, b)) {
        return true;
    }
    if polygon.len() < 3 {
        return false;
    }

    // Even-odd ray cast toward +x.
    let mut inside = false;
    for (a, b) in edges(polygon) {
        if (a.y > point.y) != (b.y > point.y) {
            let x_cross = (b.x - a.x) * (point.y - a.y) / (b.y - a.y) + a.x;
            if point.x < x_cross {
                inside = !inside;
            }
        }
    }
    inside
}

/// Translate every point by `to - from`.
pub fn translate_points(points: &mut [Point], from: Point, to: Point) {
    let delta = to - from;
    for p in points {
        *p = *p + delta;
    }
}

/// Rotate, uniformly scale and translate `points` so that the segment
/// `from1→from2` lands on `to1→to2`.
///
/// Angles and length ratios are preserved. A degenerate source segment
/// falls back to translating by the midpoint displacement.
pub fn transform_points_two(points: &mut [Point], from1: Point, from2: Point, to1: Point, to2: Point) {
    let src = from2 - from1;
    let dst = to2 - to1;
    let src_len_sq = src.x * src.x + src.y * src.y;
    if src_len_sq < GEOMETRY_EPSILON * GEOMETRY_EPSILON {
        translate_points(points, from1.midpoint(from2), to1.midpoint(to2));
        return;
    }

    // dst / src as complex numbers: the rotation-and-scale factor.
    let re = (dst.x * src.x + dst.y * src.y) / src_len_sq;
    let im = (dst.y * src.x - dst.x * src.y) / src_len_sq;
    for p in points {
        let d = *p - from1;
        *p = to1 + Point::new(re * d.x - im * d.y, re * d.y + im * d.x);
    }
}
