// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

/// Rejected scatter or container configuration.
#[derive(Copy, Clone, Debug, PartialEq, thiserror::Error)]
pub enum ScatterError {
    /// Both `rotation` and `rotation_degrees` were given.
    #[error("use `rotation` or `rotation_degrees` but not both")]
    ConflictingRotation,
    /// A required width or height was not given.
    #[error("missing {0}")]
    MissingDimension(&'static str),
    /// A size or scale is zero, negative or not finite.
    #[error("invalid {name}: {value}")]
    InvalidDimension {
        /// Option name.
        name: &'static str,
        /// Offending value.
        value: f64,
    },
    /// `min_scale` is not positive or exceeds `max_scale`.
    #[error("invalid scale limits: min {min}, max {max}")]
    InvalidScaleLimits {
        /// Configured `min_scale`.
        min: f64,
        /// Configured `max_scale`.
        max: f64,
    },
    /// `overdo_scaling` is zero, negative or not finite.
    #[error("overdo scaling must be positive, got {0}")]
    InvalidOverdoScaling(f64),
    /// The stage has no area.
    #[error("stage has no area")]
    EmptyStage,
}
