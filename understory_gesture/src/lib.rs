// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

// After you edit the crate's doc comment, run this command, then check README.md for any missing links
// cargo rdme --workspace-project=understory_gesture --heading-base-level=0

//! Understory Gesture: multi-pointer gesture tracking and routing.
//!
//! ## Overview
//!
//! This crate turns a stream of pointer, touch, mouse and wheel events into
//! gestures: per-frame translation, pinch zoom and two-finger rotation, plus
//! tap and long-press recognition when contacts are released.
//! It does not talk to any platform. Hosts translate native events into
//! [`InputEvent`] values and act on the returned [`PlatformRequest`].
//!
//! ## Contacts
//!
//! Each active contact is identified by a [`PointerKey`]. [`InteractionPoints`]
//! keeps four [`PointMap`]s per interaction (current, previous, start and
//! ended positions) together with down and release times. From these it
//! derives an [`InteractionDelta`]:
//!
//! - One contact: a pure translation about the contact.
//! - Two contacts: translation of their midpoint, the ratio of their
//!   distances as zoom, and the change of their bearing as rotation.
//! - More contacts: the two farthest apart in the current positions act as
//!   the pinch pair.
//!
//! A released contact is a tap if it moved less than
//! [`TapThresholds::tap_distance`] and was held at most
//! [`TapThresholds::long_press_time`], and a long press if it was held longer.
//!
//! ## Routing
//!
//! - [`InteractionDelegate`] feeds one [`InteractionTarget`] with the root
//!   interaction.
//! - [`InteractionMapper`] assigns each new contact to a child of an
//!   [`InteractionMapperTarget`] and keeps a sub-interaction per child, with
//!   positions converted into the container's coordinate space. A child's
//!   sub-interaction lives while at least one contact maps to it.
//!
//! Routers own the interaction state but not the target, which is passed by
//! `&mut` for each event.
//!
//! ```rust
//! use kurbo::Point;
//! use understory_gesture::{
//!     EventPhase, InputApi, InputEvent, InteractionDelegate, InteractionTarget,
//!     InteractionView, PointerType, TapThresholds,
//! };
//!
//! #[derive(Default)]
//! struct Card {
//!     offset: kurbo::Vec2,
//!     taps: usize,
//! }
//!
//! impl InteractionTarget for Card {
//!     fn capture(&mut self, _event: &mut InputEvent) -> bool {
//!         true
//!     }
//!     fn on_start(&mut self, _event: &InputEvent, _view: InteractionView<'_>) {}
//!     fn on_move(&mut self, _event: &InputEvent, view: InteractionView<'_>) {
//!         if let Some(delta) = view.delta() {
//!             self.offset += delta.translate;
//!         }
//!     }
//!     fn on_end(&mut self, _event: &InputEvent, view: InteractionView<'_>) {
//!         self.taps += view.taps().count();
//!     }
//! }
//!
//! let mut delegate = InteractionDelegate::new(InputApi::Pointer, TapThresholds::default());
//! let mut card = Card::default();
//! let finger = |time, phase, x| {
//!     InputEvent::pointer(time, phase, 1, PointerType::Touch, Point::new(x, 20.0))
//! };
//!
//! delegate.handle(&mut card, &mut finger(0, EventPhase::Down, 10.0));
//! delegate.handle(&mut card, &mut finger(16, EventPhase::Move, 40.0));
//! delegate.handle(&mut card, &mut finger(32, EventPhase::Up, 40.0));
//! assert_eq!(card.offset.x, 30.0);
//! assert_eq!(card.taps, 0);
//! ```
//!
//! This crate is `no_std`.

#![no_std]

extern crate alloc;
#[cfg(feature = "std")]
extern crate std;

mod delegate;
mod event;
mod interaction;
mod key;
mod mapper;
mod point_map;
mod points;
mod route;

pub use delegate::{InteractionDelegate, InteractionTarget};
pub use event::{
    EventPhase, InputApi, InputEvent, InputKind, MouseInput, PlatformRequest, PointerInput,
    PointerType, Timestamp, TouchInput, TouchType, WheelInput,
};
pub use interaction::{Interaction, InteractionView};
pub use key::PointerKey;
pub use mapper::{InteractionMapper, InteractionMapperTarget};
pub use point_map::{Iter, PointMap};
pub use points::{
    Aspect, InteractionDelta, InteractionPoints, TapThresholds, ZOOM_DISTANCE_EPSILON,
};
