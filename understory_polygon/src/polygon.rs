// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use alloc::vec::Vec;

#[cfg(not(feature = "std"))]
use kurbo::common::FloatFuncs as _;
use kurbo::{Point, Rect, Vec2};

/// Added to every reported penetration depth so that moving by
/// [`Intersection::overlap`] clears the contact instead of leaving the shapes touching.
pub const OVERLAP_EPSILON: f64 = 0.001;

/// Result of a successful [`Polygon::intersects_with`] test.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Intersection {
    /// Smallest penetration depth over all tested axes, plus [`OVERLAP_EPSILON`].
    pub overlap: f64,
    /// Unit normal of the axis with the smallest penetration.
    pub axis: Vec2,
}

/// A polygon stored as vertex offsets around a center point.
///
/// Vertices are kept in order and are expected to describe a simple polygon.
/// [`Polygon::intersects_with`] additionally requires convexity.
#[derive(Clone, Debug, PartialEq)]
pub struct Polygon {
    /// Absolute position the vertex offsets are relative to.
    pub center: Point,
    points: Vec<Vec2>,
}

impl Polygon {
    /// Creates an empty polygon around `center`.
    #[must_use]
    pub fn new(center: Point) -> Self {
        Self {
            center,
            points: Vec::new(),
        }
    }

    /// An axis-aligned box with the given half extents, vertices in clockwise
    /// screen order starting at the top-left corner.
    #[must_use]
    pub fn centered_box(center: Point, half_extents: Vec2) -> Self {
        let (w2, h2) = (half_extents.x, half_extents.y);
        let mut polygon = Self::new(center);
        polygon.add_point(Vec2::new(-w2, -h2));
        polygon.add_point(Vec2::new(w2, -h2));
        polygon.add_point(Vec2::new(w2, h2));
        polygon.add_point(Vec2::new(-w2, h2));
        polygon
    }

    /// The polygon covering `rect`, centered on the rect's center.
    #[must_use]
    pub fn from_rect(rect: Rect) -> Self {
        Self::centered_box(rect.center(), Vec2::new(rect.width() / 2.0, rect.height() / 2.0))
    }

    /// Builds a polygon from absolute vertices, centered on their bounding box.
    #[must_use]
    pub fn from_points(points: &[Point]) -> Self {
        let mut min = Point::new(f64::INFINITY, f64::INFINITY);
        let mut max = Point::new(f64::NEG_INFINITY, f64::NEG_INFINITY);
        for p in points {
            min.x = min.x.min(p.x);
            min.y = min.y.min(p.y);
            max.x = max.x.max(p.x);
            max.y = max.y.max(p.y);
        }
        let center = if points.is_empty() {
            Point::ORIGIN
        } else {
            min.midpoint(max)
        };
        let mut polygon = Self::new(center);
        for &p in points {
            polygon.add_absolute_point(p);
        }
        polygon
    }

    /// Appends a vertex given relative to the center.
    pub fn add_point(&mut self, offset: Vec2) {
        self.points.push(offset);
    }

    /// Appends a vertex given in absolute coordinates.
    pub fn add_absolute_point(&mut self, p: Point) {
        self.points.push(p - self.center);
    }

    /// Number of sides, equal to the number of vertices.
    #[must_use]
    pub fn len(&self) -> usize {
        self.points.len()
    }

    /// Returns `true` if the polygon has no vertices.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Center-relative vertex offsets.
    #[must_use]
    pub fn points(&self) -> &[Vec2] {
        &self.points
    }

    /// Rotates every vertex offset around the center. The center stays put.
    pub fn rotate(&mut self, radians: f64) {
        let (sin, cos) = radians.sin_cos();
        for p in &mut self.points {
            let (x, y) = (p.x, p.y);
            p.x = cos * x - sin * y;
            p.y = sin * x + cos * y;
        }
    }

    /// Moves the polygon by `delta` without changing its shape.
    pub fn translate(&mut self, delta: Vec2) {
        self.center += delta;
    }

    /// A copy with center and offsets scaled by `scale`.
    #[must_use]
    pub fn multiply_scalar(&self, scale: f64) -> Self {
        Self {
            center: (self.center.to_vec2() * scale).to_point(),
            points: self.points.iter().map(|p| *p * scale).collect(),
        }
    }

    /// Iterates vertices in absolute coordinates.
    pub fn absolute_points(&self) -> impl Iterator<Item = Point> + '_ {
        self.points.iter().map(move |p| self.center + *p)
    }

    /// Absolute vertices flattened as `[x0, y0, x1, y1, ...]`.
    #[must_use]
    pub fn flat_absolute_points(&self) -> Vec<f64> {
        let mut out = Vec::with_capacity(self.points.len() * 2);
        for p in self.absolute_points() {
            out.push(p.x);
            out.push(p.y);
        }
        out
    }

    /// Even-odd ray-casting containment test against the absolute vertices.
    #[must_use]
    pub fn contains_point(&self, pt: Point) -> bool {
        let n = self.points.len();
        if n == 0 {
            return false;
        }
        let mut inside = false;
        let mut j = n - 1;
        for i in 0..n {
            let vi = self.center + self.points[i];
            let vj = self.center + self.points[j];
            if (vi.y > pt.y) != (vj.y > pt.y)
                && pt.x < (vj.x - vi.x) * (pt.y - vi.y) / (vj.y - vi.y) + vi.x
            {
                inside = !inside;
            }
            j = i;
        }
        inside
    }

    /// Separating Axis Theorem test against `other`.
    ///
    /// Every edge normal of both polygons is used as a projection axis. If any
    /// axis separates the projections, the polygons do not intersect and `None`
    /// is returned. Otherwise the smallest penetration depth and its axis are
    /// reported; moving one polygon by `overlap` along `axis` (in the right
    /// direction) separates them.
    ///
    /// Zero-length edges contribute no axis. Polygons without vertices never
    /// intersect anything.
    #[must_use]
    pub fn intersects_with(&self, other: &Self) -> Option<Intersection> {
        if self.points.is_empty() || other.points.is_empty() {
            return None;
        }
        let mut smallest: Option<Intersection> = None;
        for axis in self.edge_normals().chain(other.edge_normals()) {
            let (min_a, max_a) = self.project(axis);
            let (min_b, max_b) = other.project(axis);
            if max_a < min_b || min_a > max_b {
                return None;
            }
            let overlap = if max_a > max_b {
                max_b - min_a
            } else {
                max_a - min_b
            };
            if smallest.is_none_or(|s| overlap < s.overlap) {
                smallest = Some(Intersection { overlap, axis });
            }
        }
        smallest.map(|s| Intersection {
            overlap: s.overlap + OVERLAP_EPSILON,
            axis: s.axis,
        })
    }

    /// Unit normals of all non-degenerate edges. Edge `i` runs from vertex
    /// `i - 1` (wrapping) to vertex `i`.
    fn edge_normals(&self) -> impl Iterator<Item = Vec2> + '_ {
        let n = self.points.len();
        (0..n).filter_map(move |side| {
            let prev = self.points[(side + n - 1) % n];
            let cur = self.points[side];
            let normal = Vec2::new(prev.y - cur.y, cur.x - prev.x);
            let len = normal.hypot();
            (len > 0.0).then(|| normal / len)
        })
    }

    /// Projects the absolute vertices onto `axis`, returning `(min, max)`.
    fn project(&self, axis: Vec2) -> (f64, f64) {
        let mut min = f64::INFINITY;
        let mut max = f64::NEG_INFINITY;
        for p in &self.points {
            let d = p.dot(axis);
            min = min.min(d);
            max = max.max(d);
        }
        let offset = self.center.to_vec2().dot(axis);
        (min + offset, max + offset)
    }
}
