// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

// After you edit the crate's doc comment, run this command, then check README.md for any missing links
// cargo rdme --workspace-project=understory_polygon --heading-base-level=0

//! Understory Polygon: small geometry helpers for gesture and scatter code.
//!
//! This crate collects the handful of 2D primitives that multitouch gesture
//! recognition and scatter-style transforms need on top of [`kurbo`]:
//!
//! - [`points`]: bearing/arc helpers, centroids, and explicit normalization.
//! - [`angle`]: wrapping angles into a half-open turn and signed shortest differences.
//! - [`Polygon`]: a center-relative polygon with ray-cast containment and a
//!   Separating Axis Theorem (SAT) intersection test.
//!
//! Points are [`kurbo::Point`], displacements are [`kurbo::Vec2`]. Addition,
//! subtraction, scaling, negation, length and distance come straight from kurbo.
//!
//! ## SAT intersection
//!
//! ```rust
//! use kurbo::{Point, Rect, Vec2};
//! use understory_polygon::Polygon;
//!
//! let stage = Polygon::from_rect(Rect::new(0.0, 0.0, 800.0, 600.0));
//! let card = Polygon::centered_box(Point::new(790.0, 300.0), Vec2::new(50.0, 40.0));
//!
//! // The card reaches 60px into the stage across its right edge.
//! let hit = stage.intersects_with(&card).unwrap();
//! assert!((hit.overlap - 60.001).abs() < 1e-9);
//!
//! let far_away = Polygon::centered_box(Point::new(2000.0, 300.0), Vec2::new(50.0, 40.0));
//! assert!(stage.intersects_with(&far_away).is_none());
//! ```
//!
//! SAT is only meaningful for convex polygons. Concave input is accepted but
//! may report intersections for shapes that merely share a convex hull.
//!
//! This crate is `no_std`.

#![no_std]

extern crate alloc;
#[cfg(feature = "std")]
extern crate std;

pub mod angle;
pub mod points;
mod polygon;

pub use polygon::{Intersection, Polygon};
