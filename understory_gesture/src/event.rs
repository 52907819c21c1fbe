// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Platform-neutral input events.
//!
//! Hosts translate their native pointer, touch, mouse and wheel events into
//! [`InputEvent`] values. One event describes one contact; a native touch
//! event listing several changed touches becomes several [`InputEvent`]s.

use kurbo::Point;

use crate::{PointMap, PointerKey};

/// Milliseconds on a monotonic clock chosen by the host.
pub type Timestamp = u64;

/// Which family of native events a router listens to.
///
/// Hosts that deliver several families for the same physical contact (for
/// example both pointer and compatibility mouse events) must pick one, or the
/// contact would be counted twice. Wheel events are accepted by every API.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum InputApi {
    /// Pointer events.
    Pointer,
    /// Touch events.
    Touch,
    /// Mouse events.
    Mouse,
}

impl InputApi {
    /// Picks the richest API the host supports: pointer, then touch, then mouse.
    #[must_use]
    pub fn detect(pointer_events: bool, touch_events: bool) -> Self {
        if pointer_events {
            Self::Pointer
        } else if touch_events {
            Self::Touch
        } else {
            Self::Mouse
        }
    }

    /// Returns `true` if events of `kind` are handled under this API.
    #[must_use]
    pub fn accepts(self, kind: &InputKind) -> bool {
        matches!(
            (self, kind),
            (_, InputKind::Wheel(_))
                | (Self::Pointer, InputKind::Pointer(_))
                | (Self::Touch, InputKind::Touch(_))
                | (Self::Mouse, InputKind::Mouse(_))
        )
    }
}

/// Device behind a pointer event.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum PointerType {
    /// A mouse.
    Mouse,
    /// A finger.
    Touch,
    /// A pen or stylus.
    Pen,
}

/// Kind of touch contact.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub enum TouchType {
    /// A finger.
    #[default]
    Direct,
    /// A stylus.
    Stylus,
}

/// Lifecycle step of a contact.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum EventPhase {
    /// The contact went down.
    Down,
    /// The contact moved.
    Move,
    /// The contact was released.
    Up,
    /// The platform cancelled the contact.
    Cancel,
    /// The pointer left the widget.
    ///
    /// `on_element` is `true` when it left onto the widget's own element (as
    /// opposed to a child), which ends the contact.
    Leave {
        /// Whether the pointer left the widget's own element.
        on_element: bool,
    },
    /// A wheel notch.
    Wheel,
}

/// Mouse event payload.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct MouseInput {
    /// Position in host (page) coordinates.
    pub position: Point,
    /// Bit mask of held buttons.
    pub buttons: u16,
    /// The button whose state changed (`1` for primary), `0` for none.
    ///
    /// On release `buttons` is already clear, so hosts must report the
    /// released button here for the release to be recognized.
    pub which: u16,
    /// Overrides the press test for hosts without button state.
    pub mouse_down_substitute: Option<bool>,
}

impl MouseInput {
    /// Returns `true` if the event counts as a pressed mouse.
    #[must_use]
    pub fn is_down(&self) -> bool {
        self.mouse_down_substitute
            .unwrap_or(self.buttons != 0 || self.which != 0)
    }
}

/// Pointer event payload.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct PointerInput {
    /// Pointer id assigned by the host.
    pub pointer_id: i64,
    /// Device kind.
    pub pointer_type: PointerType,
    /// Position in host (page) coordinates.
    pub position: Point,
    /// Bit mask of held buttons.
    pub buttons: u16,
}

/// Touch event payload for one touch.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct TouchInput {
    /// Touch identifier assigned by the host.
    pub identifier: i64,
    /// Finger or stylus.
    pub touch_type: TouchType,
    /// Position in host (page) coordinates.
    pub position: Point,
}

/// Wheel event payload.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct WheelInput {
    /// Pointer position in host (page) coordinates.
    pub position: Point,
    /// Vertical scroll amount; negative scrolls up.
    pub delta_y: f64,
    /// Whether Shift was held.
    pub shift: bool,
}

impl WheelInput {
    /// Returns `true` if the notch should zoom in (scroll up).
    #[must_use]
    pub fn is_zoom_in(&self) -> bool {
        self.delta_y < 0.0
    }
}

/// Device-specific part of an [`InputEvent`].
#[derive(Copy, Clone, Debug, PartialEq)]
pub enum InputKind {
    /// A mouse event.
    Mouse(MouseInput),
    /// A pointer event.
    Pointer(PointerInput),
    /// One touch of a touch event.
    Touch(TouchInput),
    /// A wheel event.
    Wheel(WheelInput),
}

/// One input event for one contact.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct InputEvent {
    /// Host time of the event.
    pub time: Timestamp,
    /// Lifecycle step.
    pub phase: EventPhase,
    /// Device payload.
    pub kind: InputKind,
    /// Token of the handler that claimed this event, if any.
    pub claimed_by: Option<u64>,
    /// Set by [`InputEvent::stop`]; hosts should stop native propagation.
    pub propagation_stopped: bool,
    /// Set by [`InputEvent::stop`]; hosts should suppress native defaults.
    pub default_prevented: bool,
}

impl InputEvent {
    /// Creates an unclaimed event.
    #[must_use]
    pub fn new(time: Timestamp, phase: EventPhase, kind: InputKind) -> Self {
        Self {
            time,
            phase,
            kind,
            claimed_by: None,
            propagation_stopped: false,
            default_prevented: false,
        }
    }

    /// A mouse event. `Up` events report the primary button as released.
    #[must_use]
    pub fn mouse(time: Timestamp, phase: EventPhase, position: Point) -> Self {
        let (buttons, which) = match phase {
            EventPhase::Down | EventPhase::Move => (1, 1),
            EventPhase::Up | EventPhase::Cancel | EventPhase::Leave { .. } => (0, 1),
            EventPhase::Wheel => (0, 0),
        };
        Self::new(
            time,
            phase,
            InputKind::Mouse(MouseInput {
                position,
                buttons,
                which,
                mouse_down_substitute: None,
            }),
        )
    }

    /// A pointer event. `Down` and `Move` report the primary button as held.
    #[must_use]
    pub fn pointer(
        time: Timestamp,
        phase: EventPhase,
        pointer_id: i64,
        pointer_type: PointerType,
        position: Point,
    ) -> Self {
        let buttons = u16::from(matches!(phase, EventPhase::Down | EventPhase::Move));
        Self::new(
            time,
            phase,
            InputKind::Pointer(PointerInput {
                pointer_id,
                pointer_type,
                position,
                buttons,
            }),
        )
    }

    /// A finger touch event.
    #[must_use]
    pub fn touch(time: Timestamp, phase: EventPhase, identifier: i64, position: Point) -> Self {
        Self::new(
            time,
            phase,
            InputKind::Touch(TouchInput {
                identifier,
                touch_type: TouchType::Direct,
                position,
            }),
        )
    }

    /// A wheel event.
    #[must_use]
    pub fn wheel(time: Timestamp, position: Point, delta_y: f64, shift: bool) -> Self {
        Self::new(
            time,
            EventPhase::Wheel,
            InputKind::Wheel(WheelInput {
                position,
                delta_y,
                shift,
            }),
        )
    }

    /// Position in host coordinates.
    #[must_use]
    pub fn position(&self) -> Point {
        match &self.kind {
            InputKind::Mouse(m) => m.position,
            InputKind::Pointer(p) => p.position,
            InputKind::Touch(t) => t.position,
            InputKind::Wheel(w) => w.position,
        }
    }

    /// Returns `true` if a mouse button (or any contact) is considered down.
    #[must_use]
    pub fn is_mouse_down(&self) -> bool {
        match &self.kind {
            InputKind::Mouse(m) => m.is_down(),
            InputKind::Pointer(p) => p.buttons != 0,
            InputKind::Touch(_) => true,
            InputKind::Wheel(_) => false,
        }
    }

    /// Returns `true` if the event came from a stylus.
    #[must_use]
    pub fn is_stylus(&self) -> bool {
        match &self.kind {
            InputKind::Touch(t) => t.touch_type == TouchType::Stylus,
            InputKind::Pointer(p) => p.pointer_type == PointerType::Pen,
            InputKind::Mouse(_) | InputKind::Wheel(_) => false,
        }
    }

    /// Pointer id for pointer events.
    #[must_use]
    pub fn pointer_id(&self) -> Option<i64> {
        match &self.kind {
            InputKind::Pointer(p) => Some(p.pointer_id),
            _ => None,
        }
    }

    /// The keyed contact carried by this event.
    ///
    /// Mouse events yield [`PointerKey::Mouse`] only while pressed, stylus
    /// touches yield [`PointerKey::Stylus`], wheel events yield nothing.
    #[must_use]
    pub fn extract_points(&self) -> PointMap {
        let mut points = PointMap::new();
        let entry = match &self.kind {
            InputKind::Mouse(m) => m.is_down().then_some((PointerKey::Mouse, m.position)),
            InputKind::Pointer(p) => Some((PointerKey::Id(p.pointer_id), p.position)),
            InputKind::Touch(t) => Some(match t.touch_type {
                TouchType::Stylus => (PointerKey::Stylus, t.position),
                TouchType::Direct => (PointerKey::Id(t.identifier), t.position),
            }),
            InputKind::Wheel(_) => None,
        };
        if let Some((key, point)) = entry {
            points.insert(key, point);
        }
        points
    }

    /// Marks the event as consumed.
    pub fn stop(&mut self) {
        self.propagation_stopped = true;
        self.default_prevented = true;
    }

    /// Records `token` as the claiming handler.
    pub fn claim(&mut self, token: u64) {
        self.claimed_by = Some(token);
    }

    /// Returns `true` if some handler claimed the event.
    #[must_use]
    pub fn is_claimed(&self) -> bool {
        self.claimed_by.is_some()
    }
}

/// Follow-up the host owes the platform after routing an event.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum PlatformRequest {
    /// Nothing to do.
    None,
    /// Capture the pointer with this id to the widget.
    CapturePointer(i64),
    /// Release the capture of the pointer with this id.
    ReleasePointer(i64),
}
