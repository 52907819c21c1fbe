// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Phase dispatch shared by the delegate and the mapper.

use crate::{EventPhase, InputApi, InputEvent, InputKind, PlatformRequest, PointerType};

/// The four entry points a router exposes for a target `T`.
pub(crate) trait Phases<T: ?Sized> {
    fn api(&self) -> InputApi;
    fn capture(&mut self, target: &mut T, event: &mut InputEvent) -> bool;
    fn start(&mut self, target: &mut T, event: &mut InputEvent);
    fn moved(&mut self, target: &mut T, event: &mut InputEvent);
    fn end(&mut self, target: &mut T, event: &mut InputEvent);
    fn wheel(&mut self, target: &mut T, event: &mut InputEvent);
}

/// Runs `event` through `router`.
pub(crate) fn route<T: ?Sized, R: Phases<T>>(
    router: &mut R,
    target: &mut T,
    event: &mut InputEvent,
) -> PlatformRequest {
    if !router.api().accepts(&event.kind) {
        log::trace!("ignoring {:?} under {:?}", event.kind, router.api());
        return PlatformRequest::None;
    }
    let pointer_id = event.pointer_id();
    match event.phase {
        EventPhase::Down => {
            if !router.capture(target, event) {
                return PlatformRequest::None;
            }
            router.start(target, event);
            pointer_id.map_or(PlatformRequest::None, PlatformRequest::CapturePointer)
        }
        EventPhase::Move => {
            if tracks_move(event) {
                router.moved(target, event);
            }
            PlatformRequest::None
        }
        EventPhase::Up | EventPhase::Cancel => {
            router.end(target, event);
            pointer_id.map_or(PlatformRequest::None, PlatformRequest::ReleasePointer)
        }
        EventPhase::Leave { on_element } => {
            if on_element {
                router.end(target, event);
            }
            PlatformRequest::None
        }
        EventPhase::Wheel => {
            router.wheel(target, event);
            PlatformRequest::None
        }
    }
}

/// Pointer moves count for fingers always, for mice and pens only while a
/// button is held.
fn tracks_move(event: &InputEvent) -> bool {
    match &event.kind {
        InputKind::Pointer(p) => p.pointer_type == PointerType::Touch || p.buttons != 0,
        InputKind::Mouse(_) | InputKind::Touch(_) => true,
        InputKind::Wheel(_) => false,
    }
}
