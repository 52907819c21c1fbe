// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Angle helpers in radians and degrees.
//!
//! ```
//! use core::f64::consts::PI;
//! use understory_polygon::angle;
//!
//! // Shortest signed turn from 170° to -170° is +20°, not -340°.
//! let a = angle::degrees_to_radians(-170.0);
//! let b = angle::degrees_to_radians(170.0);
//! let d = angle::diff(a, b);
//! assert!((d - angle::degrees_to_radians(20.0)).abs() < 1e-12);
//! assert!(angle::normalize(3.0 * PI) <= PI);
//! ```

#[cfg(not(feature = "std"))]
use kurbo::common::FloatFuncs as _;

use core::f64::consts::{PI, TAU};

/// Wraps `angle` into `[-π, π]` by repeatedly adding or subtracting a full turn.
///
/// The wrap is iterative, so the cost grows with the magnitude of the input.
/// Gesture angles are always within a few turns. Non-finite input is returned
/// unchanged.
#[must_use]
pub fn normalize(mut angle: f64) -> f64 {
    if !angle.is_finite() {
        return angle;
    }
    while angle > PI {
        angle -= TAU;
    }
    while angle < -PI {
        angle += TAU;
    }
    angle
}

/// Wraps `angle` (degrees) into `[-180, 180]`.
#[must_use]
pub fn normalize_degrees(mut angle: f64) -> f64 {
    if !angle.is_finite() {
        return angle;
    }
    while angle > 180.0 {
        angle -= 360.0;
    }
    while angle < -180.0 {
        angle += 360.0;
    }
    angle
}

/// Shortest signed angular difference `a - b`.
#[must_use]
pub fn diff(a: f64, b: f64) -> f64 {
    normalize((a - b).sin().atan2((a - b).cos()))
}

/// Converts degrees to radians.
#[must_use]
pub fn degrees_to_radians(degrees: f64) -> f64 {
    PI * degrees / 180.0
}

/// Converts radians to degrees.
#[must_use]
pub fn radians_to_degrees(radians: f64) -> f64 {
    180.0 / PI * radians
}
