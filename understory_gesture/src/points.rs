// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Per-contact position history and the gesture delta derived from it.

use alloc::collections::BTreeMap;
use core::fmt;

use kurbo::{Point, Vec2};
use smallvec::SmallVec;
use understory_polygon::{angle, points};

use crate::{PointMap, PointerKey, Timestamp, point_map::farthest_pair};

/// Pinch distances at or below this produce a zoom factor of exactly `1.0`.
pub const ZOOM_DISTANCE_EPSILON: f64 = 1e-9;

/// One of the four position maps kept by [`InteractionPoints`].
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Aspect {
    /// Latest known positions of active contacts.
    Current,
    /// Positions at the last [`InteractionPoints::update_previous`].
    Previous,
    /// Positions at which contacts first went down.
    Start,
    /// Release positions of contacts that went up.
    Ended,
}

/// Thresholds separating taps from long presses and drags.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct TapThresholds {
    /// A contact that travels this far (or farther) is never a tap.
    pub tap_distance: f64,
    /// Presses held longer than this (milliseconds) are long presses.
    pub long_press_time: Timestamp,
}

impl Default for TapThresholds {
    fn default() -> Self {
        Self {
            tap_distance: 10.0,
            long_press_time: 500,
        }
    }
}

/// Translation, zoom and rotation between two snapshots of the contacts.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct InteractionDelta {
    /// Movement of the gesture center.
    pub translate: Vec2,
    /// Ratio of the current to the previous pinch distance.
    pub zoom: f64,
    /// Signed rotation in radians, positive clockwise on screen.
    pub rotate: f64,
    /// Pivot for zoom and rotation.
    pub about: Point,
}

impl InteractionDelta {
    /// Returns `true` if the delta changes neither scale nor rotation.
    #[must_use]
    pub fn is_translation_only(&self) -> bool {
        self.zoom == 1.0 && self.rotate == 0.0
    }
}

impl fmt::Display for InteractionDelta {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "[InteractionDelta x:{}, y:{}, zoom:{}, rotate:{}, about:{{x:{}, y:{}}}]",
            self.translate.x, self.translate.y, self.zoom, self.rotate, self.about.x, self.about.y
        )
    }
}

/// Position history of every contact of one interaction.
///
/// A key that is present in `current` is also present in `previous` and
/// `start`. Stopping a key moves it from `current`/`previous` into `ended`,
/// finishing it forgets it entirely.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct InteractionPoints {
    current: PointMap,
    previous: PointMap,
    start: PointMap,
    ended: PointMap,
    started_at: BTreeMap<PointerKey, Timestamp>,
    ended_at: BTreeMap<PointerKey, Timestamp>,
}

impl InteractionPoints {
    /// Creates an empty history.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Latest positions.
    #[must_use]
    pub fn current(&self) -> &PointMap {
        &self.current
    }

    /// Positions at the last [`InteractionPoints::update_previous`].
    #[must_use]
    pub fn previous(&self) -> &PointMap {
        &self.previous
    }

    /// Down positions.
    #[must_use]
    pub fn start(&self) -> &PointMap {
        &self.start
    }

    /// Release positions of stopped contacts.
    #[must_use]
    pub fn ended(&self) -> &PointMap {
        &self.ended
    }

    /// The map named by `aspect`.
    #[must_use]
    pub fn aspect(&self, aspect: Aspect) -> &PointMap {
        match aspect {
            Aspect::Current => &self.current,
            Aspect::Previous => &self.previous,
            Aspect::Start => &self.start,
            Aspect::Ended => &self.ended,
        }
    }

    pub(crate) fn aspect_mut(&mut self, aspect: Aspect) -> &mut PointMap {
        match aspect {
            Aspect::Current => &mut self.current,
            Aspect::Previous => &mut self.previous,
            Aspect::Start => &mut self.start,
            Aspect::Ended => &mut self.ended,
        }
    }

    /// Time at which `key` went down.
    #[must_use]
    pub fn started_at(&self, key: PointerKey) -> Option<Timestamp> {
        self.started_at.get(&key).copied()
    }

    /// Time at which `key` was stopped.
    #[must_use]
    pub fn ended_at(&self, key: PointerKey) -> Option<Timestamp> {
        self.ended_at.get(&key).copied()
    }

    /// Records a new position for `key`.
    ///
    /// Returns `true` if `key` has no start position yet. A new key is
    /// seeded into `previous`, `start` and the start time. A stopped key
    /// keeps its start until it is finished.
    pub fn update(&mut self, key: PointerKey, point: Point, time: Timestamp) -> bool {
        let is_new = !self.start.contains_key(key);
        self.current.insert(key, point);
        if is_new {
            self.start.insert(key, point);
            self.previous.insert(key, point);
            self.started_at.insert(key, time);
        }
        is_new
    }

    /// Makes `previous` a copy of `current`.
    pub fn update_previous(&mut self) {
        self.previous.clone_from(&self.current);
    }

    /// Marks `key` as released at `point`.
    ///
    /// Unknown keys are ignored.
    pub fn stop(&mut self, key: PointerKey, point: Point, time: Timestamp) {
        if self.current.remove(key).is_some() {
            self.previous.remove(key);
            self.ended.insert(key, point);
            self.ended_at.insert(key, time);
        }
    }

    /// Forgets everything about `key`.
    pub fn finish(&mut self, key: PointerKey) {
        self.current.remove(key);
        self.previous.remove(key);
        self.start.remove(key);
        self.ended.remove(key);
        self.started_at.remove(&key);
        self.ended_at.remove(&key);
    }

    /// Returns `true` if no contact is active.
    #[must_use]
    pub fn is_finished(&self) -> bool {
        self.current.is_empty()
    }

    /// Returns `true` if fewer than two contacts remain active.
    #[must_use]
    pub fn is_no_longer_two_finger(&self) -> bool {
        self.current.len() < 2
    }

    /// Movement of `key` between `previous` and `current`.
    #[must_use]
    pub fn moved(&self, key: PointerKey) -> Option<Vec2> {
        Some(self.current.get(key)? - self.previous.get(key)?)
    }

    /// Mean movement of all contacts that have both a current and a previous
    /// position.
    #[must_use]
    pub fn mean_move(&self) -> Option<Vec2> {
        let moves = self.current.keys().filter_map(|k| self.moved(k));
        points::centroid(moves.map(Vec2::to_point)).map(Point::to_vec2)
    }

    /// Derives the gesture delta from `previous` to `current`.
    ///
    /// Only keys present in both maps take part. One such key yields a pure
    /// translation about its current position. Two or more yield a pinch: for
    /// more than two the pair farthest apart in `current` is used, and the
    /// same keys are looked up in `previous`. Returns `None` if no key is in
    /// both maps.
    #[must_use]
    pub fn delta(&self) -> Option<InteractionDelta> {
        let matched: SmallVec<[(PointerKey, Point); 4]> = self
            .current
            .iter()
            .filter(|(k, _)| self.previous.contains_key(*k))
            .collect();
        match matched.as_slice() {
            [] => None,
            [(key, c)] => {
                let p = self.previous.get(*key)?;
                Some(InteractionDelta {
                    translate: *c - p,
                    zoom: 1.0,
                    rotate: 0.0,
                    about: *c,
                })
            }
            [(k1, _), (k2, _)] => self.pinch(*k1, *k2),
            _ => {
                let (k1, k2) = farthest_pair(matched.iter().copied())?;
                self.pinch(k1, k2)
            }
        }
    }

    fn pinch(&self, k1: PointerKey, k2: PointerKey) -> Option<InteractionDelta> {
        let (c1, c2) = (self.current.get(k1)?, self.current.get(k2)?);
        let (p1, p2) = (self.previous.get(k1)?, self.previous.get(k2)?);
        let cm = points::mean(c1, c2);
        let pm = points::mean(p1, p2);
        let d1 = c1.distance(c2);
        let d2 = p1.distance(p2);
        let zoom = if d1 > ZOOM_DISTANCE_EPSILON && d2 > ZOOM_DISTANCE_EPSILON {
            d1 / d2
        } else {
            1.0
        };
        let rotate = angle::diff(points::angle(c2, c1), points::angle(p2, p1));
        Some(InteractionDelta {
            translate: cm - pm,
            zoom,
            rotate,
            about: cm,
        })
    }

    /// Returns `true` if `key` ended close to where it started, no later than
    /// `thresholds.long_press_time` after going down.
    #[must_use]
    pub fn is_tap(&self, key: PointerKey, thresholds: &TapThresholds) -> bool {
        self.press_duration(key, thresholds)
            .is_some_and(|held| held <= thresholds.long_press_time)
    }

    /// Like [`InteractionPoints::is_tap`] but for presses held longer than
    /// `thresholds.long_press_time`.
    #[must_use]
    pub fn is_long_press(&self, key: PointerKey, thresholds: &TapThresholds) -> bool {
        self.press_duration(key, thresholds)
            .is_some_and(|held| held > thresholds.long_press_time)
    }

    /// How long a stationary press of `key` was held, or `None` if `key` has
    /// not ended or moved at least `tap_distance`.
    fn press_duration(&self, key: PointerKey, thresholds: &TapThresholds) -> Option<Timestamp> {
        let start = self.start.get(key)?;
        let end = self.ended.get(key)?;
        if start.distance(end) >= thresholds.tap_distance {
            return None;
        }
        let began = self.started_at(key)?;
        let stopped = self.ended_at(key)?;
        Some(stopped.saturating_sub(began))
    }
}
