// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! A stage of scatters sharing one gesture router.

use alloc::collections::BTreeMap;
use core::fmt;

use kurbo::{Affine, Point, Rect};
use understory_gesture::{
    InputEvent, InputKind, Interaction, InteractionMapper, InteractionMapperTarget,
    InteractionTarget, InteractionView, PlatformRequest, PointerKey, Timestamp,
};

use crate::scatter::check_stage;
use crate::{ContainerOptions, Scatter, ScatterError, ScatterOptions};

/// First stacking value handed out by a container.
pub const FIRST_Z_INDEX: u64 = 1000;

/// Handle of a scatter in a [`ScatterContainer`].
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ScatterId(u64);

impl ScatterId {
    /// Wraps a raw id.
    #[must_use]
    pub const fn new(raw: u64) -> Self {
        Self(raw)
    }

    /// The raw id, also used as the claim token of events hitting the scatter.
    #[must_use]
    pub const fn get(self) -> u64 {
        self.0
    }
}

impl fmt::Display for ScatterId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "scatter#{}", self.0)
    }
}

/// Allocates [`ScatterId`]s. Ids must not repeat within one container.
pub trait IdSource {
    /// Returns a fresh id.
    fn next_id(&mut self) -> ScatterId;
}

/// Counts up from zero.
#[derive(Clone, Debug, Default)]
pub struct SequentialIds {
    next: u64,
}

impl SequentialIds {
    /// Starts counting at `first`.
    #[must_use]
    pub fn starting_at(first: u64) -> Self {
        Self { next: first }
    }
}

impl IdSource for SequentialIds {
    fn next_id(&mut self) -> ScatterId {
        let id = ScatterId(self.next);
        self.next += 1;
        id
    }
}

/// The scatters of a container, their stage and the page mapping.
///
/// This is the [`InteractionMapperTarget`] side of a [`ScatterContainer`]:
/// new contacts are assigned to the topmost scatter under them.
#[derive(Debug)]
pub struct ScatterStage<I = SequentialIds> {
    bounds: Rect,
    page_to_local: Affine,
    stop_events: bool,
    claim_events: bool,
    scatters: BTreeMap<ScatterId, Scatter>,
    ids: I,
    next_z: u64,
}

impl<I: IdSource> ScatterStage<I> {
    fn new(bounds: Rect, options: &ContainerOptions, ids: I) -> Self {
        Self {
            bounds,
            page_to_local: Affine::IDENTITY,
            stop_events: options.stop_events,
            claim_events: options.claim_events,
            scatters: BTreeMap::new(),
            ids,
            next_z: FIRST_Z_INDEX,
        }
    }

    fn raise(&mut self, id: ScatterId) {
        let z = self.next_z;
        if let Some(scatter) = self.scatters.get_mut(&id) {
            scatter.set_z_index(z);
            self.next_z += 1;
        }
    }

    /// Stage rectangle in local coordinates.
    #[must_use]
    pub fn bounds(&self) -> Rect {
        self.bounds
    }

    /// Mapping from host (page) coordinates to local coordinates.
    #[must_use]
    pub fn page_to_local(&self) -> Affine {
        self.page_to_local
    }

    /// The topmost scatter whose outline contains `local`.
    #[must_use]
    pub fn topmost_at(&self, local: Point) -> Option<ScatterId> {
        self.scatters
            .iter()
            .filter(|(_, scatter)| scatter.polygon().contains_point(local))
            .max_by_key(|(id, scatter)| (scatter.z_index(), **id))
            .map(|(id, _)| *id)
    }
}

impl<I: IdSource> InteractionMapperTarget for ScatterStage<I> {
    type Target = ScatterId;

    fn capture(&mut self, _event: &mut InputEvent) -> bool {
        true
    }

    fn find_target(
        &mut self,
        event: &mut InputEvent,
        local: Point,
        _global: Point,
    ) -> Option<ScatterId> {
        let id = self.topmost_at(local)?;
        if event.claimed_by.is_some_and(|owner| owner != id.get()) {
            log::trace!("{id} declines event claimed by {:?}", event.claimed_by);
            return None;
        }
        if self.claim_events {
            event.claim(id.get());
        }
        if self.stop_events {
            event.stop();
        }
        Some(id)
    }

    fn map_position_to_point(&self, point: Point) -> Point {
        self.page_to_local * point
    }

    fn on_start(&mut self, target: ScatterId, event: &InputEvent, view: InteractionView<'_>) {
        let raise = self
            .scatters
            .get(&target)
            .is_some_and(|scatter| scatter.options().auto_bring_to_front);
        if raise {
            self.raise(target);
        }
        if let Some(scatter) = self.scatters.get_mut(&target) {
            scatter.on_start(event, view);
        }
    }

    fn on_move(&mut self, target: ScatterId, event: &InputEvent, view: InteractionView<'_>) {
        if let Some(scatter) = self.scatters.get_mut(&target) {
            scatter.on_move(event, view);
        }
    }

    fn on_end(&mut self, target: ScatterId, event: &InputEvent, view: InteractionView<'_>) {
        if let Some(scatter) = self.scatters.get_mut(&target) {
            scatter.on_end(event, view);
        }
    }

    fn on_mouse_wheel(&mut self, target: Option<ScatterId>, event: &InputEvent) {
        let InputKind::Wheel(wheel) = &event.kind else {
            return;
        };
        let anchor = self.page_to_local * wheel.position;
        if let Some(scatter) = target.and_then(|id| self.scatters.get_mut(&id)) {
            scatter.wheel(wheel, anchor, event.time);
        }
    }
}

/// Scatters on a shared stage, driven by one [`InteractionMapper`].
///
/// Hosts feed every input event to [`ScatterContainer::handle`] and call
/// [`ScatterContainer::animate`] once per frame while it returns `true`.
///
/// ```rust
/// use kurbo::{Point, Rect};
/// use understory_gesture::{EventPhase, InputEvent, PointerType};
/// use understory_scatter::{ContainerOptions, ScatterContainer, ScatterOptions};
///
/// let stage = Rect::new(0.0, 0.0, 800.0, 600.0);
/// let mut container = ScatterContainer::new(stage, ContainerOptions::default()).unwrap();
/// let card = container
///     .add(ScatterOptions::sized(200.0, 100.0).at(Point::new(100.0, 100.0)))
///     .unwrap();
///
/// let finger = |time, phase, x| {
///     InputEvent::pointer(time, phase, 7, PointerType::Touch, Point::new(x, 150.0))
/// };
/// container.handle(&mut finger(0, EventPhase::Down, 150.0));
/// container.handle(&mut finger(16, EventPhase::Move, 180.0));
/// assert_eq!(container.get(card).unwrap().position(), Point::new(130.0, 100.0));
/// ```
#[derive(Debug)]
pub struct ScatterContainer<I = SequentialIds> {
    mapper: InteractionMapper<ScatterId>,
    stage: ScatterStage<I>,
}

impl ScatterContainer {
    /// Creates an empty container on `bounds` (local coordinates).
    pub fn new(bounds: Rect, options: ContainerOptions) -> Result<Self, ScatterError> {
        Self::with_ids(bounds, options, SequentialIds::default())
    }
}

impl<I: IdSource> ScatterContainer<I> {
    /// Creates an empty container that allocates ids from `ids`.
    pub fn with_ids(bounds: Rect, options: ContainerOptions, ids: I) -> Result<Self, ScatterError> {
        check_stage(bounds)?;
        Ok(Self {
            mapper: InteractionMapper::new(options.api, options.thresholds),
            stage: ScatterStage::new(bounds, &options, ids),
        })
    }

    /// Adds a scatter in front of the existing ones.
    pub fn add(&mut self, options: ScatterOptions) -> Result<ScatterId, ScatterError> {
        let mut scatter = Scatter::new(options, self.stage.bounds)?;
        let id = self.stage.ids.next_id();
        scatter.set_z_index(self.stage.next_z);
        self.stage.next_z += 1;
        log::debug!("added {id} at {:?}", scatter.position());
        self.stage.scatters.insert(id, scatter);
        Ok(id)
    }

    /// Removes a scatter. Contacts still mapped to it are ignored until
    /// released.
    pub fn remove(&mut self, id: ScatterId) -> Option<Scatter> {
        self.stage.scatters.remove(&id)
    }

    /// The scatter `id`.
    #[must_use]
    pub fn get(&self, id: ScatterId) -> Option<&Scatter> {
        self.stage.scatters.get(&id)
    }

    /// The scatter `id`, mutably.
    pub fn get_mut(&mut self, id: ScatterId) -> Option<&mut Scatter> {
        self.stage.scatters.get_mut(&id)
    }

    /// All scatters in id order.
    pub fn iter(&self) -> impl Iterator<Item = (ScatterId, &Scatter)> + '_ {
        self.stage.scatters.iter().map(|(id, scatter)| (*id, scatter))
    }

    /// Number of scatters.
    #[must_use]
    pub fn len(&self) -> usize {
        self.stage.scatters.len()
    }

    /// Returns `true` if the container holds no scatters.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.stage.scatters.is_empty()
    }

    /// The stage side of the container.
    #[must_use]
    pub fn stage(&self) -> &ScatterStage<I> {
        &self.stage
    }

    /// Stage rectangle in local coordinates.
    #[must_use]
    pub fn bounds(&self) -> Rect {
        self.stage.bounds
    }

    /// Replaces the stage rectangle of the container and all its scatters.
    pub fn set_bounds(&mut self, bounds: Rect) -> Result<(), ScatterError> {
        check_stage(bounds)?;
        self.stage.bounds = bounds;
        for scatter in self.stage.scatters.values_mut() {
            scatter.set_stage(bounds)?;
        }
        Ok(())
    }

    /// Sets the mapping from host (page) coordinates to local coordinates.
    pub fn set_page_transform(&mut self, page_to_local: Affine) {
        self.stage.page_to_local = page_to_local;
    }

    /// Routes one host event.
    pub fn handle(&mut self, event: &mut InputEvent) -> PlatformRequest {
        self.mapper.handle(&mut self.stage, event)
    }

    /// Local positions of the active contacts.
    pub fn current_touches(&self) -> impl Iterator<Item = (PointerKey, Point)> + '_ {
        let to_local = self.stage.page_to_local;
        self.mapper
            .interaction()
            .points()
            .current()
            .iter()
            .map(move |(key, point)| (key, to_local * point))
    }

    /// Advances the animations of all scatters to `now`.
    ///
    /// Returns `true` while any scatter needs another frame.
    pub fn animate(&mut self, now: Timestamp) -> bool {
        let mut running = false;
        for scatter in self.stage.scatters.values_mut() {
            running |= scatter.animate(now);
        }
        running
    }

    /// Gesture state of the router.
    #[must_use]
    pub fn interaction(&self) -> &Interaction<ScatterId> {
        self.mapper.interaction()
    }
}
