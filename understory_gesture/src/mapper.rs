// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Routing for a container of many interactive objects.

use core::fmt::Debug;
use core::hash::Hash;

use kurbo::Point;

use crate::{
    Aspect, InputApi, InputEvent, Interaction, InteractionView, PlatformRequest, PointerKey,
    TapThresholds,
    route::{self, Phases},
};

/// A container whose contacts are each routed to one of its children.
///
/// When a contact goes down (or first appears in a move), the mapper asks
/// [`find_target`](Self::find_target) which child it belongs to. From then on
/// the child receives callbacks with its own sub-interaction, whose
/// positions are converted by
/// [`map_position_to_point`](Self::map_position_to_point).
pub trait InteractionMapperTarget {
    /// Child handle.
    type Target: Copy + Eq + Hash + Debug;

    /// Decides whether a `Down` or wheel event is handled at all.
    fn capture(&mut self, event: &mut InputEvent) -> bool;

    /// Picks the child at `local` (container coordinates) for a contact at
    /// `global` (host coordinates).
    fn find_target(
        &mut self,
        event: &mut InputEvent,
        local: Point,
        global: Point,
    ) -> Option<Self::Target>;

    /// Converts a host position into container coordinates.
    fn map_position_to_point(&self, point: Point) -> Point {
        point
    }

    /// A contact of `target` went down.
    fn on_start(
        &mut self,
        target: Self::Target,
        event: &InputEvent,
        interaction: InteractionView<'_>,
    );

    /// A contact of `target` moved.
    fn on_move(
        &mut self,
        target: Self::Target,
        event: &InputEvent,
        interaction: InteractionView<'_>,
    );

    /// A contact of `target` was released.
    fn on_end(
        &mut self,
        target: Self::Target,
        event: &InputEvent,
        interaction: InteractionView<'_>,
    );

    /// A captured wheel notch, with the child under the pointer if any.
    fn on_mouse_wheel(&mut self, target: Option<Self::Target>, event: &InputEvent) {
        let _ = (target, event);
    }
}

/// Splits one stream of [`InputEvent`]s into per-child gestures.
#[derive(Clone, Debug)]
pub struct InteractionMapper<T> {
    interaction: Interaction<T>,
    api: InputApi,
}

impl<T: Copy + Eq + Hash + Debug> InteractionMapper<T> {
    /// Creates a mapper listening to `api`.
    #[must_use]
    pub fn new(api: InputApi, thresholds: TapThresholds) -> Self {
        Self {
            interaction: Interaction::new(thresholds),
            api,
        }
    }

    /// Current interaction state.
    #[must_use]
    pub fn interaction(&self) -> &Interaction<T> {
        &self.interaction
    }

    /// The API this mapper listens to.
    #[must_use]
    pub fn api(&self) -> InputApi {
        self.api
    }

    /// Routes one event to the children of `container`.
    pub fn handle<C>(&mut self, container: &mut C, event: &mut InputEvent) -> PlatformRequest
    where
        C: InteractionMapperTarget<Target = T> + ?Sized,
    {
        route::route(self, container, event)
    }

    /// Assigns a child to a new contact.
    fn interaction_started<C>(
        &mut self,
        container: &mut C,
        event: &mut InputEvent,
        key: PointerKey,
        point: Point,
    ) where
        C: InteractionMapperTarget<Target = T> + ?Sized,
    {
        let local = container.map_position_to_point(point);
        match container.find_target(event, local, point) {
            Some(target) => {
                log::trace!("contact {key} mapped to {target:?}");
                self.interaction.add_target(key, target);
            }
            None => log::trace!("contact {key} hit no target"),
        }
    }

    /// Registers the event's contact and starts its child.
    ///
    /// The child's sub-interaction is seeded with the current, previous and
    /// start positions, so a second contact can pinch on its first move.
    pub fn on_start<C>(&mut self, container: &mut C, event: &mut InputEvent)
    where
        C: InteractionMapperTarget<Target = T> + ?Sized,
    {
        let extracted = event.extract_points();
        for (key, point) in self.interaction.update_all(&extracted, event.time) {
            self.interaction_started(container, event, key, point);
        }
        let mapped = self
            .interaction
            .map_interaction(
                &extracted,
                &[Aspect::Current, Aspect::Previous, Aspect::Start],
                |p| container.map_position_to_point(p),
            );
        for target in mapped {
            if let Some(view) = self.interaction.sub_view(target) {
                container.on_start(target, event, view);
            }
        }
    }

    /// Updates the event's contact and moves its child.
    pub fn on_move<C>(&mut self, container: &mut C, event: &mut InputEvent)
    where
        C: InteractionMapperTarget<Target = T> + ?Sized,
    {
        let extracted = event.extract_points();
        for (key, point) in self.interaction.update_all(&extracted, event.time) {
            self.interaction_started(container, event, key, point);
        }
        let mapped = self
            .interaction
            .map_interaction(&extracted, &[Aspect::Current, Aspect::Previous], |p| {
                container.map_position_to_point(p)
            });
        for target in mapped {
            if let Some(view) = self.interaction.sub_view(target) {
                container.on_move(target, event, view);
            }
            if let Some(sub) = self.interaction.sub_interaction_mut(target) {
                sub.update_previous();
            }
        }
        self.interaction.update_previous();
    }

    /// Stops the event's contact, ends its child, then forgets the contact.
    pub fn on_end<C>(&mut self, container: &mut C, event: &mut InputEvent)
    where
        C: InteractionMapperTarget<Target = T> + ?Sized,
    {
        let extracted = event.extract_points();
        self.interaction.stop_all(&extracted, event.time);
        let mapped = self
            .interaction
            .map_interaction(&extracted, &[Aspect::Ended], |p| {
                container.map_position_to_point(p)
            });
        for target in mapped {
            if let Some(view) = self.interaction.sub_view(target) {
                container.on_end(target, event, view);
            }
        }
        self.interaction.finish_all(&extracted);
    }

    /// Forwards a captured wheel event with the child under the pointer.
    pub fn on_mouse_wheel<C>(&mut self, container: &mut C, event: &mut InputEvent)
    where
        C: InteractionMapperTarget<Target = T> + ?Sized,
    {
        if !container.capture(event) {
            return;
        }
        let global = event.position();
        let local = container.map_position_to_point(global);
        let found = container.find_target(event, local, global);
        container.on_mouse_wheel(found, event);
    }
}

impl<T, C> Phases<C> for InteractionMapper<T>
where
    T: Copy + Eq + Hash + Debug,
    C: InteractionMapperTarget<Target = T> + ?Sized,
{
    fn api(&self) -> InputApi {
        self.api
    }

    fn capture(&mut self, container: &mut C, event: &mut InputEvent) -> bool {
        container.capture(event)
    }

    fn start(&mut self, container: &mut C, event: &mut InputEvent) {
        self.on_start(container, event);
    }

    fn moved(&mut self, container: &mut C, event: &mut InputEvent) {
        self.on_move(container, event);
    }

    fn end(&mut self, container: &mut C, event: &mut InputEvent) {
        self.on_end(container, event);
    }

    fn wheel(&mut self, container: &mut C, event: &mut InputEvent) {
        self.on_mouse_wheel(container, event);
    }
}
