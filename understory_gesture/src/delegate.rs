// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Routing for a single interactive object.

use crate::{
    InputApi, InputEvent, Interaction, InteractionView, PlatformRequest, TapThresholds,
    route::{self, Phases},
};

/// An object that consumes whole gestures.
///
/// The callbacks see the root interaction in host coordinates.
pub trait InteractionTarget {
    /// Decides whether a `Down` event starts or joins the interaction.
    fn capture(&mut self, event: &mut InputEvent) -> bool;

    /// A contact went down.
    fn on_start(&mut self, event: &InputEvent, interaction: InteractionView<'_>);

    /// A contact moved.
    fn on_move(&mut self, event: &InputEvent, interaction: InteractionView<'_>);

    /// A contact was released. The contact is still in `ended` during this
    /// call and is forgotten right after.
    fn on_end(&mut self, event: &InputEvent, interaction: InteractionView<'_>);

    /// A wheel notch arrived and was captured.
    fn on_mouse_wheel(&mut self, event: &InputEvent) {
        let _ = event;
    }
}

/// Turns a stream of [`InputEvent`]s into gesture callbacks on one
/// [`InteractionTarget`].
///
/// The delegate owns the interaction state but not the target, which is
/// passed to [`InteractionDelegate::handle`] for each event.
#[derive(Clone, Debug)]
pub struct InteractionDelegate {
    interaction: Interaction,
    api: InputApi,
}

impl InteractionDelegate {
    /// Creates a delegate listening to `api`.
    #[must_use]
    pub fn new(api: InputApi, thresholds: TapThresholds) -> Self {
        Self {
            interaction: Interaction::new(thresholds),
            api,
        }
    }

    /// Current interaction state.
    #[must_use]
    pub fn interaction(&self) -> &Interaction {
        &self.interaction
    }

    /// The API this delegate listens to.
    #[must_use]
    pub fn api(&self) -> InputApi {
        self.api
    }

    /// Routes one event to `target`.
    pub fn handle<T: InteractionTarget + ?Sized>(
        &mut self,
        target: &mut T,
        event: &mut InputEvent,
    ) -> PlatformRequest {
        route::route(self, target, event)
    }

    /// Registers the event's contact and calls [`InteractionTarget::on_start`].
    pub fn on_start<T: InteractionTarget + ?Sized>(&mut self, target: &mut T, event: &InputEvent) {
        let extracted = event.extract_points();
        for (key, point) in self.interaction.update_all(&extracted, event.time) {
            log::trace!("contact {key} started at {point:?}");
        }
        target.on_start(event, self.interaction.view());
    }

    /// Updates the event's contact and calls [`InteractionTarget::on_move`].
    pub fn on_move<T: InteractionTarget + ?Sized>(&mut self, target: &mut T, event: &InputEvent) {
        let extracted = event.extract_points();
        self.interaction.update_all(&extracted, event.time);
        target.on_move(event, self.interaction.view());
        self.interaction.update_previous();
    }

    /// Stops the event's contact, calls [`InteractionTarget::on_end`], then
    /// forgets the contact.
    pub fn on_end<T: InteractionTarget + ?Sized>(&mut self, target: &mut T, event: &InputEvent) {
        let extracted = event.extract_points();
        self.interaction.stop_all(&extracted, event.time);
        target.on_end(event, self.interaction.view());
        self.interaction.finish_all(&extracted);
    }

    /// Forwards a captured wheel event.
    pub fn on_mouse_wheel<T: InteractionTarget + ?Sized>(
        &mut self,
        target: &mut T,
        event: &mut InputEvent,
    ) {
        if target.capture(event) {
            target.on_mouse_wheel(event);
        }
    }
}

impl<T: InteractionTarget + ?Sized> Phases<T> for InteractionDelegate {
    fn api(&self) -> InputApi {
        self.api
    }

    fn capture(&mut self, target: &mut T, event: &mut InputEvent) -> bool {
        target.capture(event)
    }

    fn start(&mut self, target: &mut T, event: &mut InputEvent) {
        self.on_start(target, event);
    }

    fn moved(&mut self, target: &mut T, event: &mut InputEvent) {
        self.on_move(target, event);
    }

    fn end(&mut self, target: &mut T, event: &mut InputEvent) {
        self.on_end(target, event);
    }

    fn wheel(&mut self, target: &mut T, event: &mut InputEvent) {
        self.on_mouse_wheel(target, event);
    }
}
