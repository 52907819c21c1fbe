// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

// After you edit the crate's doc comment, run this command, then check README.md for any missing links
// cargo rdme --workspace-project=understory_scatter --heading-base-level=0

//! Understory Scatter: throwable, zoomable, rotatable objects on a stage.
//!
//! ## Overview
//!
//! A [`Scatter`] is a rectangle that follows multitouch gestures: it moves
//! with one finger, zooms and rotates about the pinch center with two, and
//! keeps gliding with its release velocity when thrown. Throws slow down by
//! [`ScatterOptions::throw_damping`] per frame and bounce off the stage edges,
//! so that at least [`ScatterOptions::throw_visibility`] pixels stay visible.
//!
//! During a gesture the scale may overshoot its limits by
//! [`ScatterOptions::overdo_scaling`]; afterwards it bounces back in small
//! steps. Mouse wheels zoom about the pointer, or rotate with Shift held.
//!
//! Changes are reported synchronously through [`Listeners`]:
//! [`TransformEvent`]s for every change, [`ResizeEvent`]s for resizable
//! scatters and [`TapEvent`]s for released taps.
//!
//! ## Containers
//!
//! A [`ScatterContainer`] owns the scatters of one stage together with an
//! [`InteractionMapper`](understory_gesture::InteractionMapper). Each new contact
//! is assigned to the topmost scatter under it, so several scatters can be
//! dragged at the same time. Host coordinates are converted with
//! [`ScatterContainer::set_page_transform`].
//!
//! Nothing here runs on its own: hosts call [`ScatterContainer::animate`]
//! (or [`Scatter::animate`]) once per frame while it returns `true`.
//!
//! ```rust
//! use kurbo::{Point, Rect};
//! use understory_gesture::{EventPhase, InputEvent, PointerType};
//! use understory_scatter::{ContainerOptions, ScatterContainer, ScatterOptions};
//!
//! let mut container =
//!     ScatterContainer::new(Rect::new(0.0, 0.0, 1000.0, 800.0), ContainerOptions::default())
//!         .unwrap();
//! let card = container
//!     .add(ScatterOptions::sized(200.0, 200.0).at(Point::new(400.0, 300.0)))
//!     .unwrap();
//!
//! // Fling the card to the right and let go.
//! let finger = |time, phase, x| {
//!     InputEvent::pointer(time, phase, 1, PointerType::Touch, Point::new(x, 400.0))
//! };
//! container.handle(&mut finger(0, EventPhase::Down, 450.0));
//! for frame in 1..=4 {
//!     container.handle(&mut finger(frame * 10, EventPhase::Move, 450.0 + 20.0 * frame as f64));
//! }
//! container.handle(&mut finger(40, EventPhase::Up, 530.0));
//! assert!(container.get(card).unwrap().is_throwing());
//!
//! let mut now = 40;
//! while container.animate(now) {
//!     now += 16;
//! }
//! let card = container.get(card).unwrap();
//! assert!(card.position().x > 480.0);
//! assert!(!card.is_outside());
//! ```
//!
//! This crate is `no_std`.

#![no_std]

extern crate alloc;
#[cfg(feature = "std")]
extern crate std;

mod container;
mod error;
mod event;
mod listeners;
mod options;
mod scatter;
mod velocity;

pub use container::{
    FIRST_Z_INDEX, IdSource, ScatterContainer, ScatterId, ScatterStage, SequentialIds,
};
pub use error::ScatterError;
pub use event::{ResizeEvent, ScatterState, TapEvent, TransformEvent, TransformEventKind};
pub use listeners::{ListenerId, Listeners, Subscription};
pub use options::{ContainerOptions, ScatterOptions};
pub use scatter::{
    GESTURE_BOUNCE_DELAY, IDENTITY_EPSILON, REST_VELOCITY, Scatter, WHEEL_BOUNCE_DELAY,
    WHEEL_ROTATION_DEGREES, ZOOM_BOUNCE_STEP,
};
pub use velocity::VelocityTracker;
