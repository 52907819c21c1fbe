// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use kurbo::Point;
use understory_gesture::{InputApi, TapThresholds, Timestamp};
use understory_polygon::angle;

use crate::ScatterError;

/// Configuration of one [`Scatter`](crate::Scatter).
///
/// `width` and `height` are required. Everything else defaults to the values
/// of a typical card on a multitouch table.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct ScatterOptions {
    /// Initial top-left corner of the unrotated, unscaled box.
    pub position: Point,
    /// Unscaled width.
    pub width: Option<f64>,
    /// Unscaled height.
    pub height: Option<f64>,
    /// Initial scale.
    pub start_scale: f64,
    /// Smallest scale at rest.
    pub min_scale: f64,
    /// Largest scale at rest.
    pub max_scale: f64,
    /// Widens the scale limits while a gesture is active: the scale may reach
    /// `min_scale / overdo_scaling` and `max_scale * overdo_scaling` before it
    /// bounces back.
    pub overdo_scaling: f64,
    /// Raise the scatter above its siblings when a gesture starts.
    pub auto_bring_to_front: bool,
    /// Keep moving with the release velocity after a gesture ends.
    pub auto_throw: bool,
    /// Allow translation.
    pub translatable: bool,
    /// Allow scaling.
    pub scalable: bool,
    /// Allow rotation.
    pub rotatable: bool,
    /// Report the scaled size through resize events after each transform.
    pub resizable: bool,
    /// Allow movement along x.
    pub movable_x: bool,
    /// Allow movement along y.
    pub movable_y: bool,
    /// Pixels of overlap with the stage that throws and bounces preserve.
    pub throw_visibility: f64,
    /// Per-frame velocity factor of a throw.
    pub throw_damping: f64,
    /// Velocity factor of a frame in which the scatter hit the stage edge.
    pub collision_damping: f64,
    /// Zoom factor of one wheel notch.
    pub mouse_zoom_factor: f64,
    /// Initial rotation in radians.
    pub rotation: Option<f64>,
    /// Initial rotation in degrees.
    pub rotation_degrees: Option<f64>,
    /// Number of velocity samples kept for throws.
    pub velocity_buffer: usize,
    /// Time span (ms) averaged into the release velocity.
    pub velocity_window: Timestamp,
}

impl Default for ScatterOptions {
    fn default() -> Self {
        Self {
            position: Point::ORIGIN,
            width: None,
            height: None,
            start_scale: 1.0,
            min_scale: 0.1,
            max_scale: 1.0,
            overdo_scaling: 1.5,
            auto_bring_to_front: true,
            auto_throw: true,
            translatable: true,
            scalable: true,
            rotatable: true,
            resizable: false,
            movable_x: true,
            movable_y: true,
            throw_visibility: 44.0,
            throw_damping: 0.95,
            collision_damping: 0.5,
            mouse_zoom_factor: 1.1,
            rotation: None,
            rotation_degrees: None,
            velocity_buffer: 5,
            velocity_window: 30,
        }
    }
}

impl ScatterOptions {
    /// Default options for a `width` × `height` scatter.
    #[must_use]
    pub fn sized(width: f64, height: f64) -> Self {
        Self {
            width: Some(width),
            height: Some(height),
            ..Self::default()
        }
    }

    /// Sets the initial top-left corner.
    #[must_use]
    pub fn at(mut self, position: Point) -> Self {
        self.position = position;
        self
    }

    /// Initial rotation in radians.
    pub fn initial_rotation(&self) -> Result<f64, ScatterError> {
        match (self.rotation, self.rotation_degrees) {
            (Some(_), Some(_)) => Err(ScatterError::ConflictingRotation),
            (Some(radians), None) => Ok(radians),
            (None, Some(degrees)) => Ok(angle::degrees_to_radians(degrees)),
            (None, None) => Ok(0.0),
        }
    }

    /// Checks the options and returns the validated `(width, height)`.
    pub fn validate(&self) -> Result<(f64, f64), ScatterError> {
        self.initial_rotation()?;
        let width = self.width.ok_or(ScatterError::MissingDimension("width"))?;
        let height = self.height.ok_or(ScatterError::MissingDimension("height"))?;
        positive("width", width)?;
        positive("height", height)?;
        positive("start_scale", self.start_scale)?;
        if !(self.min_scale > 0.0 && self.min_scale <= self.max_scale && self.max_scale.is_finite())
        {
            return Err(ScatterError::InvalidScaleLimits {
                min: self.min_scale,
                max: self.max_scale,
            });
        }
        if !(self.overdo_scaling > 0.0 && self.overdo_scaling.is_finite()) {
            return Err(ScatterError::InvalidOverdoScaling(self.overdo_scaling));
        }
        Ok((width, height))
    }
}

fn positive(name: &'static str, value: f64) -> Result<(), ScatterError> {
    if value > 0.0 && value.is_finite() {
        Ok(())
    } else {
        Err(ScatterError::InvalidDimension { name, value })
    }
}

/// Configuration of a [`ScatterContainer`](crate::ScatterContainer).
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct ContainerOptions {
    /// Event family the container listens to.
    pub api: InputApi,
    /// Tap and long-press thresholds.
    pub thresholds: TapThresholds,
    /// Stop propagation and default handling of events the container handles.
    pub stop_events: bool,
    /// Claim events that hit a scatter, so outer handlers can skip them.
    pub claim_events: bool,
}

impl Default for ContainerOptions {
    fn default() -> Self {
        Self {
            api: InputApi::Pointer,
            thresholds: TapThresholds::default(),
            stop_events: true,
            claim_events: true,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn both_rotation_forms_conflict() {
        let options = ScatterOptions {
            rotation: Some(0.5),
            rotation_degrees: Some(30.0),
            ..ScatterOptions::sized(10.0, 10.0)
        };
        assert_eq!(options.validate(), Err(ScatterError::ConflictingRotation));
    }

    #[test]
    fn degrees_are_converted() {
        let options = ScatterOptions {
            rotation_degrees: Some(90.0),
            ..ScatterOptions::sized(10.0, 10.0)
        };
        let r = options.initial_rotation().unwrap();
        assert!((r - core::f64::consts::FRAC_PI_2).abs() < 1e-12);
    }

    #[test]
    fn dimensions_are_required_and_positive() {
        assert_eq!(
            ScatterOptions::default().validate(),
            Err(ScatterError::MissingDimension("width"))
        );
        assert_eq!(
            ScatterOptions::sized(0.0, 10.0).validate(),
            Err(ScatterError::InvalidDimension {
                name: "width",
                value: 0.0
            })
        );
        assert_eq!(ScatterOptions::sized(20.0, 10.0).validate(), Ok((20.0, 10.0)));
    }

    #[test]
    fn scale_limits_are_checked() {
        let inverted = ScatterOptions {
            min_scale: 2.0,
            max_scale: 1.0,
            ..ScatterOptions::sized(10.0, 10.0)
        };
        assert!(matches!(
            inverted.validate(),
            Err(ScatterError::InvalidScaleLimits { .. })
        ));
        let no_overdo = ScatterOptions {
            overdo_scaling: 0.0,
            ..ScatterOptions::sized(10.0, 10.0)
        };
        assert_eq!(
            no_overdo.validate(),
            Err(ScatterError::InvalidOverdoScaling(0.0))
        );
    }
}
