// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Root interaction with per-target sub-interactions.

use core::fmt::Debug;
use core::hash::Hash;

use hashbrown::HashMap;
use kurbo::Point;
use smallvec::SmallVec;

use crate::{
    Aspect, InteractionDelta, InteractionPoints, PointMap, PointerKey, TapThresholds, Timestamp,
};

/// All contacts of a widget's input, plus a sub-interaction per target.
///
/// Each contact may be mapped to one target `T`. A target's sub-interaction
/// exists while at least one contact maps to it, and holds positions
/// converted into the target's coordinate space by
/// [`Interaction::map_interaction`].
#[derive(Clone, Debug)]
pub struct Interaction<T = ()> {
    points: InteractionPoints,
    thresholds: TapThresholds,
    targets: HashMap<PointerKey, T>,
    ref_counts: HashMap<T, usize>,
    sub_interactions: HashMap<T, InteractionPoints>,
}

impl<T> Default for Interaction<T> {
    fn default() -> Self {
        Self {
            points: InteractionPoints::new(),
            thresholds: TapThresholds::default(),
            targets: HashMap::new(),
            ref_counts: HashMap::new(),
            sub_interactions: HashMap::new(),
        }
    }
}

impl<T> Interaction<T> {
    /// Creates an empty interaction classifying taps with `thresholds`.
    #[must_use]
    pub fn new(thresholds: TapThresholds) -> Self {
        Self {
            thresholds,
            ..Self::default()
        }
    }

    /// Root contact history in widget coordinates.
    #[must_use]
    pub fn points(&self) -> &InteractionPoints {
        &self.points
    }

    /// Tap thresholds in use.
    #[must_use]
    pub fn thresholds(&self) -> TapThresholds {
        self.thresholds
    }

    /// Root delta, see [`InteractionPoints::delta`].
    #[must_use]
    pub fn delta(&self) -> Option<InteractionDelta> {
        self.points.delta()
    }

    /// Returns `true` if no contact is active.
    #[must_use]
    pub fn is_finished(&self) -> bool {
        self.points.is_finished()
    }

    /// Returns `true` if `key` ended as a tap.
    #[must_use]
    pub fn is_tap(&self, key: PointerKey) -> bool {
        self.points.is_tap(key, &self.thresholds)
    }

    /// Returns `true` if `key` ended as a long press.
    #[must_use]
    pub fn is_long_press(&self, key: PointerKey) -> bool {
        self.points.is_long_press(key, &self.thresholds)
    }

    /// Returns `true` if any ended contact is a tap.
    #[must_use]
    pub fn is_any_tap(&self) -> bool {
        self.points.ended().keys().any(|key| self.is_tap(key))
    }

    /// Returns `true` if any ended contact is a long press.
    #[must_use]
    pub fn is_any_long_press(&self) -> bool {
        self.points.ended().keys().any(|key| self.is_long_press(key))
    }

    /// Returns `true` if `key` is the stylus.
    #[must_use]
    pub fn is_stylus(&self, key: PointerKey) -> bool {
        key.is_stylus()
    }

    /// Records a root position, see [`InteractionPoints::update`].
    pub fn update(&mut self, key: PointerKey, point: Point, time: Timestamp) -> bool {
        self.points.update(key, point, time)
    }

    /// Applies every contact of `extracted` and returns the ones that are new.
    pub fn update_all(
        &mut self,
        extracted: &PointMap,
        time: Timestamp,
    ) -> SmallVec<[(PointerKey, Point); 2]> {
        extracted
            .iter()
            .filter(|&(key, point)| self.points.update(key, point, time))
            .collect()
    }

    /// Root [`InteractionPoints::update_previous`].
    pub fn update_previous(&mut self) {
        self.points.update_previous();
    }

    /// Stops `key` in the root and in every sub-interaction.
    pub fn stop(&mut self, key: PointerKey, point: Point, time: Timestamp) {
        self.points.stop(key, point, time);
        for sub in self.sub_interactions.values_mut() {
            sub.stop(key, point, time);
        }
    }

    /// [`Interaction::stop`] for every contact of `extracted`.
    pub fn stop_all(&mut self, extracted: &PointMap, time: Timestamp) {
        for (key, point) in extracted {
            self.stop(key, point, time);
        }
    }
}

impl<T: Copy + Eq + Hash + Debug> Interaction<T> {
    /// Finishes `key` everywhere and unmaps it from its target.
    pub fn finish(&mut self, key: PointerKey) {
        self.points.finish(key);
        for sub in self.sub_interactions.values_mut() {
            sub.finish(key);
        }
        self.remove_target(key);
    }

    /// [`Interaction::finish`] for every contact of `extracted`.
    pub fn finish_all(&mut self, extracted: &PointMap) {
        for key in extracted.keys() {
            self.finish(key);
        }
    }

    /// Maps `key` to `target`.
    ///
    /// The first key mapped to a target creates a fresh sub-interaction for
    /// it. Remapping a key releases its old target first.
    pub fn add_target(&mut self, key: PointerKey, target: T) {
        if self.targets.get(&key) == Some(&target) {
            return;
        }
        self.remove_target(key);
        self.targets.insert(key, target);
        let count = self.ref_counts.entry(target).or_insert(0);
        *count += 1;
        if *count == 1 {
            log::trace!("sub-interaction opened for {target:?}");
            self.sub_interactions
                .insert(target, InteractionPoints::new());
        }
    }

    /// Unmaps `key`. The target's sub-interaction is dropped with its last key.
    pub fn remove_target(&mut self, key: PointerKey) -> Option<T> {
        let target = self.targets.remove(&key)?;
        if let Some(count) = self.ref_counts.get_mut(&target) {
            *count -= 1;
            if *count == 0 {
                self.ref_counts.remove(&target);
                self.sub_interactions.remove(&target);
                log::trace!("sub-interaction closed for {target:?}");
            }
        }
        Some(target)
    }

    /// Target of `key`, if mapped.
    #[must_use]
    pub fn target_of(&self, key: PointerKey) -> Option<T> {
        self.targets.get(&key).copied()
    }

    /// Number of keys mapped to `target`.
    #[must_use]
    pub fn ref_count(&self, target: T) -> usize {
        self.ref_counts.get(&target).copied().unwrap_or(0)
    }

    /// Number of targets with a sub-interaction.
    #[must_use]
    pub fn target_count(&self) -> usize {
        self.sub_interactions.len()
    }

    /// Sub-interaction of `target`.
    #[must_use]
    pub fn sub_interaction(&self, target: T) -> Option<&InteractionPoints> {
        self.sub_interactions.get(&target)
    }

    /// Mutable sub-interaction of `target`.
    pub fn sub_interaction_mut(&mut self, target: T) -> Option<&mut InteractionPoints> {
        self.sub_interactions.get_mut(&target)
    }

    /// Copies the `aspects` of each key in `keys` from the root into the
    /// sub-interaction of the key's target, converted by `mapping`.
    ///
    /// Returns the affected targets in first-seen order, without duplicates.
    /// Keys without a target are skipped.
    pub fn map_interaction(
        &mut self,
        keys: &PointMap,
        aspects: &[Aspect],
        mut mapping: impl FnMut(Point) -> Point,
    ) -> SmallVec<[T; 4]> {
        let mut mapped = SmallVec::new();
        for key in keys.keys() {
            let Some(&target) = self.targets.get(&key) else {
                continue;
            };
            let Some(sub) = self.sub_interactions.get_mut(&target) else {
                continue;
            };
            for &aspect in aspects {
                if let Some(point) = self.points.aspect(aspect).get(key) {
                    sub.aspect_mut(aspect).insert(key, mapping(point));
                }
            }
            if !mapped.contains(&target) {
                mapped.push(target);
            }
        }
        mapped
    }

    /// A view of the root interaction.
    #[must_use]
    pub fn view(&self) -> InteractionView<'_> {
        InteractionView {
            points: &self.points,
            root: &self.points,
            thresholds: self.thresholds,
        }
    }

    /// A view of `target`'s sub-interaction that classifies taps against the root.
    #[must_use]
    pub fn sub_view(&self, target: T) -> Option<InteractionView<'_>> {
        Some(InteractionView {
            points: self.sub_interactions.get(&target)?,
            root: &self.points,
            thresholds: self.thresholds,
        })
    }
}

/// What a target callback sees of an interaction.
///
/// Positions come from either the root or a target's sub-interaction. Tap
/// classification always consults the root, which carries the timestamps.
#[derive(Copy, Clone, Debug)]
pub struct InteractionView<'a> {
    points: &'a InteractionPoints,
    root: &'a InteractionPoints,
    thresholds: TapThresholds,
}

impl<'a> InteractionView<'a> {
    /// Positions visible to the callback.
    #[must_use]
    pub fn points(&self) -> &'a InteractionPoints {
        self.points
    }

    /// The root interaction.
    #[must_use]
    pub fn root(&self) -> &'a InteractionPoints {
        self.root
    }

    /// Delta of the visible positions.
    #[must_use]
    pub fn delta(&self) -> Option<InteractionDelta> {
        self.points.delta()
    }

    /// Active contacts of the visible positions.
    #[must_use]
    pub fn current(&self) -> &'a PointMap {
        self.points.current()
    }

    /// Release positions of the visible positions.
    #[must_use]
    pub fn ended(&self) -> &'a PointMap {
        self.points.ended()
    }

    /// Returns `true` if no visible contact is active.
    #[must_use]
    pub fn is_finished(&self) -> bool {
        self.points.is_finished()
    }

    /// Returns `true` if `key` ended as a tap.
    #[must_use]
    pub fn is_tap(&self, key: PointerKey) -> bool {
        self.root.is_tap(key, &self.thresholds)
    }

    /// Returns `true` if `key` ended as a long press.
    #[must_use]
    pub fn is_long_press(&self, key: PointerKey) -> bool {
        self.root.is_long_press(key, &self.thresholds)
    }

    /// Returns `true` if any visible ended contact is a tap.
    #[must_use]
    pub fn is_any_tap(&self) -> bool {
        self.ended().keys().any(|key| self.is_tap(key))
    }

    /// Returns `true` if any visible ended contact is a long press.
    #[must_use]
    pub fn is_any_long_press(&self) -> bool {
        self.ended().keys().any(|key| self.is_long_press(key))
    }

    /// Ended contacts in the visible positions that are taps.
    pub fn taps(&self) -> impl Iterator<Item = (PointerKey, Point)> + 'a {
        let root = self.root;
        let thresholds = self.thresholds;
        self.points
            .ended()
            .iter()
            .filter(move |&(key, _)| root.is_tap(key, &thresholds))
    }
}
