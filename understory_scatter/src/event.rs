// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use core::fmt;

use kurbo::{Point, Vec2};
use understory_gesture::PointerKey;

/// Lifecycle marker of a [`TransformEvent`].
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum TransformEventKind {
    /// A gesture started.
    Start,
    /// A gesture moved the scatter without scaling or rotating it.
    Update,
    /// The last contact of a gesture was released.
    End,
    /// A wheel notch zoomed the scatter.
    Zoom,
    /// A throw came to rest, or a release without throw was handled.
    Complete,
}

/// Describes one change of a scatter.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct TransformEvent {
    /// Applied translation.
    pub translate: Vec2,
    /// Scale after the change, if reported.
    pub scale: Option<f64>,
    /// Applied rotation in radians.
    pub rotate: f64,
    /// Pivot of the change, if any.
    pub about: Option<Point>,
    /// Marks high-frequency events (drag frames) that consumers may throttle.
    pub fast: bool,
    /// Lifecycle marker. Plain transforms carry none.
    pub kind: Option<TransformEventKind>,
}

impl TransformEvent {
    /// An event that only reports the current scale.
    #[must_use]
    pub fn marker(kind: TransformEventKind, scale: f64) -> Self {
        Self {
            translate: Vec2::ZERO,
            scale: Some(scale),
            rotate: 0.0,
            about: None,
            fast: false,
            kind: Some(kind),
        }
    }
}

impl fmt::Display for TransformEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Event('scatterTransformed', scale: ")?;
        match self.scale {
            Some(scale) => write!(f, "{scale}")?,
            None => f.write_str("none")?,
        }
        if let Some(about) = self.about {
            write!(f, " about: {}, {}", about.x, about.y)?;
        }
        f.write_str(")")
    }
}

/// Scaled size of a resizable scatter after a transform.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct ResizeEvent {
    /// Scaled width.
    pub width: f64,
    /// Scaled height.
    pub height: f64,
}

/// A released contact that qualified as a tap.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct TapEvent {
    /// The contact.
    pub key: PointerKey,
    /// Release position in container coordinates.
    pub point: Point,
}

/// Geometry snapshot of a scatter.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ScatterState {
    /// Current scale.
    pub scale: f64,
    /// Top-left x of the unrotated, unscaled box.
    pub x: f64,
    /// Top-left y of the unrotated, unscaled box.
    pub y: f64,
    /// Rotation in radians.
    pub rotation: f64,
}
