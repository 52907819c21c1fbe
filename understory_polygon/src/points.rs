// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Point helpers that kurbo does not provide directly.
//!
//! kurbo already covers `add`, `subtract`, `multiply_scalar` (`*`), `negate`,
//! `length` ([`Vec2::hypot`]) and `distance` ([`Point::distance`]). The remaining
//! operations used by gesture code live here as free functions.

#[cfg(not(feature = "std"))]
use kurbo::common::FloatFuncs as _;
use kurbo::{Point, Vec2};

/// Lengths at or below this are treated as zero by [`try_normalize`].
pub const NORMALIZE_EPSILON: f64 = 1e-12;

/// Midpoint of `a` and `b`.
#[must_use]
pub fn mean(a: Point, b: Point) -> Point {
    Point::new((a.x + b.x) / 2.0, (a.y + b.y) / 2.0)
}

/// Bearing of `p1` as seen from `p2`, i.e. `atan2(p1.y - p2.y, p1.x - p2.x)`.
///
/// With y pointing down (screen coordinates) positive angles turn clockwise.
#[must_use]
pub fn angle(p1: Point, p2: Point) -> f64 {
    (p1.y - p2.y).atan2(p1.x - p2.x)
}

/// The point at `radius` from `p` along bearing `alpha`.
#[must_use]
pub fn arc(p: Point, alpha: f64, radius: f64) -> Point {
    Point::new(p.x + radius * alpha.cos(), p.y + radius * alpha.sin())
}

/// Component-wise product.
#[must_use]
pub fn multiply(a: Vec2, b: Vec2) -> Vec2 {
    Vec2::new(a.x * b.x, a.y * b.y)
}

/// Scales `v` to unit length.
///
/// A zero vector yields NaN components; use [`try_normalize`] when the input
/// may be degenerate.
#[must_use]
pub fn normalize(v: Vec2) -> Vec2 {
    v * (1.0 / v.hypot())
}

/// Scales `v` to unit length, or returns `None` if its length is at most
/// [`NORMALIZE_EPSILON`].
#[must_use]
pub fn try_normalize(v: Vec2) -> Option<Vec2> {
    let len = v.hypot();
    if len.is_finite() && len > NORMALIZE_EPSILON {
        Some(v * (1.0 / len))
    } else {
        None
    }
}

/// Arithmetic mean of all points, or `None` for an empty input.
#[must_use]
pub fn centroid(points: impl IntoIterator<Item = Point>) -> Option<Point> {
    let mut sum = Vec2::ZERO;
    let mut count = 0_u32;
    for p in points {
        sum += p.to_vec2();
        count += 1;
    }
    if count == 0 {
        None
    } else {
        Some((sum / f64::from(count)).to_point())
    }
}
