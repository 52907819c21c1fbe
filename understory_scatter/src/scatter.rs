// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! A throwable, zoomable, rotatable rectangle on a stage.

#[cfg(not(feature = "std"))]
use kurbo::common::FloatFuncs as _;
use kurbo::{Point, Rect, Vec2};
use understory_gesture::{
    InputEvent, InputKind, InteractionTarget, InteractionView, Timestamp, WheelInput,
};
use understory_polygon::{Polygon, angle, points};

use crate::{
    Listeners, ResizeEvent, ScatterError, ScatterOptions, ScatterState, TapEvent, TransformEvent,
    TransformEventKind, VelocityTracker,
};

/// Zoom factors and rotations within this of the identity are treated as
/// identity.
pub const IDENTITY_EPSILON: f64 = 1e-12;

/// Throws stop once the velocity (px/ms) drops to this.
pub const REST_VELOCITY: f64 = 0.01;

/// Per-frame scale change of the bounce back into the scale limits.
pub const ZOOM_BOUNCE_STEP: f64 = 0.01;

/// Delay (ms) of the scale bounce after a gesture.
pub const GESTURE_BOUNCE_DELAY: Timestamp = 100;

/// Delay (ms) of the scale bounce after a wheel zoom.
pub const WHEEL_BOUNCE_DELAY: Timestamp = 200;

/// Rotation of one shifted wheel notch, in degrees.
pub const WHEEL_ROTATION_DEGREES: f64 = 5.0;

/// Upper bound of one-pixel nudges per bounce.
const MAX_BOUNCE_STEPS: usize = 10_000;

#[derive(Copy, Clone, Debug, PartialEq)]
struct ZoomBounce {
    anchor: Point,
    due: Timestamp,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
enum Bounce {
    Visible,
    Recentered,
    Stuck,
}

/// A rectangle that follows gestures, keeps moving when thrown and stays
/// partly visible on its stage.
///
/// The scatter is positioned by the top-left corner of its unrotated,
/// unscaled box; scaling and rotation happen about the box center.
#[derive(Debug)]
pub struct Scatter {
    options: ScatterOptions,
    stage: Rect,
    position: Point,
    width: f64,
    height: f64,
    scale: f64,
    rotation: f64,
    throw_visibility: f64,
    z_index: u64,
    dragging: bool,
    velocity: VelocityTracker,
    throw_velocity: Option<Vec2>,
    interaction_anchor: Option<Point>,
    zoom_bounce: Option<ZoomBounce>,
    transform_listeners: Listeners<TransformEvent>,
    resize_listeners: Listeners<ResizeEvent>,
    tap_listeners: Listeners<TapEvent>,
}

impl Scatter {
    /// Creates a scatter on `stage` (container coordinates).
    pub fn new(options: ScatterOptions, stage: Rect) -> Result<Self, ScatterError> {
        let (width, height) = options.validate()?;
        check_stage(stage)?;
        let rotation = options.initial_rotation()?;
        Ok(Self {
            stage,
            position: options.position,
            width,
            height,
            scale: options.start_scale,
            rotation,
            throw_visibility: width.min(height).min(options.throw_visibility),
            z_index: 0,
            dragging: false,
            velocity: VelocityTracker::new(options.velocity_buffer, options.velocity_window),
            throw_velocity: None,
            interaction_anchor: None,
            zoom_bounce: None,
            transform_listeners: Listeners::new(),
            resize_listeners: Listeners::new(),
            tap_listeners: Listeners::new(),
            options,
        })
    }

    /// The options the scatter was created with.
    #[must_use]
    pub fn options(&self) -> &ScatterOptions {
        &self.options
    }

    /// Stage rectangle in container coordinates.
    #[must_use]
    pub fn stage(&self) -> Rect {
        self.stage
    }

    /// Replaces the stage.
    pub fn set_stage(&mut self, stage: Rect) -> Result<(), ScatterError> {
        check_stage(stage)?;
        self.stage = stage;
        Ok(())
    }

    /// Top-left corner of the unrotated, unscaled box.
    #[must_use]
    pub fn position(&self) -> Point {
        self.position
    }

    /// Unscaled width.
    #[must_use]
    pub fn width(&self) -> f64 {
        self.width
    }

    /// Unscaled height.
    #[must_use]
    pub fn height(&self) -> f64 {
        self.height
    }

    /// Current scale.
    #[must_use]
    pub fn scale(&self) -> f64 {
        self.scale
    }

    /// Current rotation in radians.
    #[must_use]
    pub fn rotation(&self) -> f64 {
        self.rotation
    }

    /// Current rotation in degrees.
    #[must_use]
    pub fn rotation_degrees(&self) -> f64 {
        angle::radians_to_degrees(self.rotation)
    }

    /// Required stage overlap in pixels.
    #[must_use]
    pub fn throw_visibility(&self) -> f64 {
        self.throw_visibility
    }

    /// Stacking order; larger is in front.
    #[must_use]
    pub fn z_index(&self) -> u64 {
        self.z_index
    }

    /// Sets the stacking order.
    pub fn set_z_index(&mut self, z_index: u64) {
        self.z_index = z_index;
    }

    /// Returns `true` while a gesture is in progress.
    #[must_use]
    pub fn is_dragging(&self) -> bool {
        self.dragging
    }

    /// Returns `true` while a throw is in progress.
    #[must_use]
    pub fn is_throwing(&self) -> bool {
        self.throw_velocity.is_some()
    }

    /// Current throw velocity in px/ms.
    #[must_use]
    pub fn throw_velocity(&self) -> Option<Vec2> {
        self.throw_velocity
    }

    /// Returns `true` if a scale bounce is scheduled or running.
    #[must_use]
    pub fn is_bouncing_scale(&self) -> bool {
        self.zoom_bounce.is_some()
    }

    /// Geometry snapshot.
    #[must_use]
    pub fn state(&self) -> ScatterState {
        ScatterState {
            scale: self.scale,
            x: self.position.x,
            y: self.position.y,
            rotation: self.rotation,
        }
    }

    /// Transform listeners.
    pub fn transform_listeners(&mut self) -> &mut Listeners<TransformEvent> {
        &mut self.transform_listeners
    }

    /// Resize listeners, notified for resizable scatters.
    pub fn resize_listeners(&mut self) -> &mut Listeners<ResizeEvent> {
        &mut self.resize_listeners
    }

    /// Tap listeners.
    pub fn tap_listeners(&mut self) -> &mut Listeners<TapEvent> {
        &mut self.tap_listeners
    }

    /// Center of the box, also the pivot of scaling and rotation.
    #[must_use]
    pub fn center(&self) -> Point {
        self.position + Vec2::new(self.width / 2.0, self.height / 2.0)
    }

    /// Where the box's own top-left corner is after scaling and rotation.
    #[must_use]
    pub fn origin(&self) -> Point {
        let half = Vec2::new(self.width, self.height) * (self.scale / 2.0);
        let (sin, cos) = self.rotation.sin_cos();
        let corner = Vec2::new(-half.x * cos + half.y * sin, -half.x * sin - half.y * cos);
        self.center() + corner
    }

    /// Outline on the stage.
    #[must_use]
    pub fn polygon(&self) -> Polygon {
        let half = Vec2::new(self.width, self.height) * (self.scale / 2.0);
        let mut polygon = Polygon::centered_box(self.center(), half);
        polygon.rotate(self.rotation);
        polygon
    }

    /// Axis-aligned bounds of the outline.
    #[must_use]
    pub fn bounds(&self) -> Rect {
        let polygon = self.polygon();
        let mut corners = polygon.absolute_points();
        let Some(first) = corners.next() else {
            return Rect::from_origin_size(self.center(), (0.0, 0.0));
        };
        corners.fold(Rect::from_points(first, first), |r, p| r.union_pt(p))
    }

    /// Clamps `scale` into the at-rest limits.
    #[must_use]
    pub fn valid_scale(&self, scale: f64) -> f64 {
        scale.max(self.options.min_scale).min(self.options.max_scale)
    }

    fn gate(&self, delta: Vec2) -> Vec2 {
        Vec2::new(
            if self.options.movable_x { delta.x } else { 0.0 },
            if self.options.movable_y { delta.y } else { 0.0 },
        )
    }

    fn move_raw(&mut self, delta: Vec2) {
        self.position += self.gate(delta);
    }

    fn emit_transform(&mut self, event: TransformEvent) {
        self.transform_listeners.emit(&event);
    }

    /// Applies a gesture step: `translate`, then `zoom` and `rotate` about
    /// `anchor`.
    ///
    /// Disabled kinds of transform are dropped. The resulting scale is
    /// clamped to the overdo limits; the anchor stays fixed on screen.
    pub fn transform(&mut self, translate: Vec2, zoom: f64, rotate: f64, anchor: Point) {
        let delta = if self.options.translatable {
            self.gate(translate)
        } else {
            Vec2::ZERO
        };
        let rotate = if self.options.rotatable { rotate } else { 0.0 };
        let mut zoom = if self.options.scalable { zoom } else { 1.0 };

        if (zoom - 1.0).abs() <= IDENTITY_EPSILON && rotate.abs() <= IDENTITY_EPSILON {
            self.move_raw(delta);
            self.emit_transform(TransformEvent {
                translate: delta,
                scale: Some(self.scale),
                rotate: 0.0,
                about: Some(anchor),
                fast: false,
                kind: Some(TransformEventKind::Update),
            });
            return;
        }

        let origin = self.center();
        let beta = points::angle(origin, anchor);
        let distance = origin.distance(anchor);
        let min_scale = self.options.min_scale / self.options.overdo_scaling;
        let max_scale = self.options.max_scale * self.options.overdo_scaling;
        let mut new_scale = self.scale * zoom;
        if new_scale < min_scale {
            new_scale = min_scale;
            zoom = new_scale / self.scale;
        }
        if new_scale > max_scale {
            new_scale = max_scale;
            zoom = new_scale / self.scale;
        }

        let new_origin = points::arc(anchor, beta + rotate, distance * zoom);
        self.move_raw((new_origin - origin) + delta);
        self.scale = new_scale;
        self.rotation += rotate;

        self.emit_transform(TransformEvent {
            translate: delta,
            scale: Some(new_scale),
            rotate,
            about: Some(anchor),
            fast: false,
            kind: None,
        });
        if self.options.resizable {
            let event = ResizeEvent {
                width: self.width * self.scale,
                height: self.height * self.scale,
            };
            self.resize_listeners.emit(&event);
        }
    }

    /// Moves by `delta` if translatable.
    pub fn move_by(&mut self, delta: Vec2) {
        if !self.options.translatable {
            return;
        }
        let delta = self.gate(delta);
        self.move_raw(delta);
        self.emit_transform(TransformEvent {
            translate: delta,
            scale: None,
            rotate: 0.0,
            about: None,
            fast: true,
            kind: None,
        });
    }

    /// Moves so that [`Scatter::origin`] lands on `point`.
    pub fn move_to(&mut self, point: Point) {
        self.move_by(point - self.origin());
    }

    /// Moves so that [`Scatter::center`] lands on `point`.
    pub fn center_at(&mut self, point: Point) {
        self.move_by(point - self.center());
    }

    /// Sets the scale directly (about the center), ignoring limits.
    pub fn zoom_to(&mut self, scale: f64) {
        if (scale - self.scale).abs() <= IDENTITY_EPSILON || !(scale > 0.0 && scale.is_finite()) {
            return;
        }
        self.scale = scale;
        let about = self.center();
        self.emit_transform(TransformEvent {
            translate: Vec2::ZERO,
            scale: Some(scale),
            rotate: 0.0,
            about: Some(about),
            fast: false,
            kind: None,
        });
    }

    /// Rotates by `radians` about `anchor`.
    pub fn rotate(&mut self, radians: f64, anchor: Point) {
        self.transform(Vec2::ZERO, 1.0, radians, anchor);
    }

    /// Rotates by `degrees` about `anchor`.
    pub fn rotate_degrees(&mut self, degrees: f64, anchor: Point) {
        self.rotate(angle::degrees_to_radians(degrees), anchor);
    }

    /// Restores the initial position, scale and rotation and stops animations.
    pub fn reset(&mut self) {
        self.kill_animation();
        self.zoom_bounce = None;
        self.dragging = false;
        self.position = self.options.position;
        self.scale = self.options.start_scale;
        // Validated on construction.
        self.rotation = self.options.initial_rotation().unwrap_or(0.0);
    }

    /// Stops a running throw and forgets the drag velocity.
    pub fn kill_animation(&mut self) {
        self.throw_velocity = None;
        self.velocity.clear();
    }

    fn required_visibility(&self) -> f64 {
        let scaled = self.width.min(self.height) * self.scale;
        self.throw_visibility.min(scaled)
    }

    fn overlaps_enough(&self, stage: &Polygon, polygon: &Polygon) -> bool {
        let required = self.required_visibility();
        stage
            .intersects_with(polygon)
            .is_some_and(|hit| hit.overlap >= required)
    }

    /// Returns `true` if less than the required overlap is on the stage.
    #[must_use]
    pub fn is_outside(&self) -> bool {
        !self.overlaps_enough(&Polygon::from_rect(self.stage), &self.polygon())
    }

    /// Unit vector from the center toward the stage center.
    #[must_use]
    pub fn recenter(&self) -> Option<Vec2> {
        points::try_normalize(self.stage.center() - self.center())
    }

    /// Nudges the scatter toward the stage center until enough of it is
    /// visible. Returns `true` if it moved.
    pub fn bouncing(&mut self) -> bool {
        self.bounce() != Bounce::Visible
    }

    fn bounce(&mut self) -> Bounce {
        let stage = Polygon::from_rect(self.stage);
        let mut polygon = self.polygon();
        if self.overlaps_enough(&stage, &polygon) {
            return Bounce::Visible;
        }
        let Some(step) = self.recenter().map(|step| self.gate(step)) else {
            return Bounce::Stuck;
        };
        if step == Vec2::ZERO {
            return Bounce::Stuck;
        }
        for _ in 0..MAX_BOUNCE_STEPS {
            self.move_raw(step);
            polygon.translate(step);
            if self.overlaps_enough(&stage, &polygon) {
                return Bounce::Recentered;
            }
        }
        log::warn!(
            "scatter at {:?} still outside the stage after {MAX_BOUNCE_STEPS} bounce steps",
            self.center()
        );
        Bounce::Stuck
    }

    /// Next throw velocity: damped, or reflected off the stage edges with the
    /// collision damping if the scatter had to be bounced back.
    pub fn keep_on_stage(&mut self, velocity: Vec2) -> Vec2 {
        if self.bounce() == Bounce::Visible {
            return velocity * self.options.throw_damping;
        }
        let center = self.center();
        let mut d = self.gate(velocity);
        let mut factor = self.options.throw_damping;
        if center.x < self.stage.x0 || center.x > self.stage.x1 {
            d.x = -d.x;
            factor = self.options.collision_damping;
        }
        if center.y < self.stage.y0 || center.y > self.stage.y1 {
            d.y = -d.y;
            factor = self.options.collision_damping;
        }
        d * factor
    }

    fn start_gesture(&mut self, now: Timestamp) {
        self.kill_animation();
        self.velocity.observe(now);
        self.dragging = true;
        self.interaction_anchor = None;
    }

    /// Applies the delta of `interaction` and records it as velocity.
    pub fn gesture(&mut self, interaction: InteractionView<'_>, now: Timestamp) {
        let Some(delta) = interaction.delta() else {
            return;
        };
        self.velocity.add(delta.translate, now);
        self.transform(delta.translate, delta.zoom, delta.rotate, delta.about);
        if self.options.scalable && (delta.zoom - 1.0).abs() > IDENTITY_EPSILON {
            self.interaction_anchor = Some(delta.about);
        }
    }

    /// Starts a throw with the release velocity, or completes the drag if
    /// throwing is off.
    pub fn start_throw(&mut self, now: Timestamp) {
        let velocity = self.velocity.mean(now);
        let velocity = self.keep_on_stage(velocity);
        if self.options.auto_throw {
            log::debug!("throw started at {velocity:?} px/ms");
            self.throw_velocity = Some(velocity);
        } else {
            self.drag_complete();
        }
    }

    fn drag_complete(&mut self) {
        let scale = self.scale;
        self.emit_transform(TransformEvent::marker(TransformEventKind::Complete, scale));
    }

    fn animate_throw(&mut self, now: Timestamp) -> bool {
        let Some(velocity) = self.throw_velocity else {
            return false;
        };
        let dt = now.saturating_sub(self.velocity.last_frame());
        self.velocity.observe(now);

        let bounce_before = self.is_outside();
        let mut next = self.keep_on_stage(velocity);
        let prev_len = velocity.hypot();
        let next_len = next.hypot();
        if next_len > prev_len {
            log::debug!("prevented throw acceleration from {prev_len} to {next_len} px/ms");
            next *= prev_len / next_len;
        }
        self.throw_velocity = Some(next);

        let d = next * dt as f64;
        self.move_raw(d);
        self.emit_transform(TransformEvent {
            translate: d,
            scale: Some(self.scale),
            rotate: 0.0,
            about: None,
            fast: true,
            kind: None,
        });

        let stuck = bounce_before && self.is_outside();
        if dt == 0 || next.hypot() > REST_VELOCITY || (self.is_outside() && !stuck) {
            return true;
        }
        log::debug!("throw finished at {:?}", self.center());
        self.throw_velocity = None;
        self.drag_complete();
        false
    }

    /// Schedules a bounce of the scale back into its limits, pivoting on
    /// `anchor`, `delay` ms after `now`. Replaces any pending bounce.
    ///
    /// Does nothing on a scatter that is not scalable.
    pub fn check_scaling(&mut self, anchor: Point, delay: Timestamp, now: Timestamp) {
        if !self.options.scalable {
            return;
        }
        self.zoom_bounce = Some(ZoomBounce {
            anchor,
            due: now.saturating_add(delay),
        });
    }

    fn animate_zoom_bounce(&mut self, now: Timestamp) -> bool {
        let Some(bounce) = self.zoom_bounce else {
            return false;
        };
        if now < bounce.due {
            return true;
        }
        let zoom = if self.scale < self.options.min_scale {
            1.0 + ZOOM_BOUNCE_STEP
        } else if self.scale > self.options.max_scale {
            1.0 - ZOOM_BOUNCE_STEP
        } else {
            log::debug!("scale settled at {}", self.scale);
            self.zoom_bounce = None;
            return false;
        };
        let before = self.scale;
        self.transform(Vec2::ZERO, zoom, 0.0, bounce.anchor);
        if self.scale == before {
            log::debug!("scale {} cannot bounce back into its limits", self.scale);
            self.zoom_bounce = None;
            return false;
        }
        true
    }

    /// Advances throw and scale bounce to `now`.
    ///
    /// Returns `true` while another frame is needed.
    pub fn animate(&mut self, now: Timestamp) -> bool {
        let throwing = self.animate_throw(now);
        let bouncing = self.animate_zoom_bounce(now);
        throwing || bouncing
    }

    /// Handles a wheel notch at `anchor` (container coordinates).
    ///
    /// With Shift the scatter rotates, otherwise it zooms and schedules a
    /// scale bounce.
    pub fn wheel(&mut self, wheel: &WheelInput, anchor: Point, now: Timestamp) {
        self.kill_animation();
        let zoom_in = wheel.is_zoom_in();
        if wheel.shift {
            let degrees = if zoom_in {
                WHEEL_ROTATION_DEGREES
            } else {
                -WHEEL_ROTATION_DEGREES
            };
            self.rotate_degrees(degrees, anchor);
            return;
        }
        let factor = self.options.mouse_zoom_factor;
        let zoom = if zoom_in { factor } else { 1.0 / factor };
        self.transform(Vec2::ZERO, zoom, 0.0, anchor);
        self.check_scaling(anchor, WHEEL_BOUNCE_DELAY, now);
        let scale = self.scale;
        self.emit_transform(TransformEvent::marker(TransformEventKind::Zoom, scale));
    }
}

pub(crate) fn check_stage(stage: Rect) -> Result<(), ScatterError> {
    if stage.width() > 0.0 && stage.height() > 0.0 && stage.area().is_finite() {
        Ok(())
    } else {
        Err(ScatterError::EmptyStage)
    }
}

impl InteractionTarget for Scatter {
    fn capture(&mut self, _event: &mut InputEvent) -> bool {
        true
    }

    fn on_start(&mut self, event: &InputEvent, _interaction: InteractionView<'_>) {
        self.start_gesture(event.time);
        let scale = self.scale;
        self.emit_transform(TransformEvent::marker(TransformEventKind::Start, scale));
    }

    fn on_move(&mut self, event: &InputEvent, interaction: InteractionView<'_>) {
        if self.dragging {
            self.gesture(interaction, event.time);
        }
    }

    fn on_end(&mut self, event: &InputEvent, interaction: InteractionView<'_>) {
        if interaction.is_finished() {
            self.start_throw(event.time);
            self.dragging = false;
            for (key, point) in interaction.taps() {
                self.tap_listeners.emit(&TapEvent { key, point });
            }
            let scale = self.scale;
            self.emit_transform(TransformEvent::marker(TransformEventKind::End, scale));
        }
        if let Some(anchor) = self.interaction_anchor {
            self.check_scaling(anchor, GESTURE_BOUNCE_DELAY, event.time);
        }
    }

    fn on_mouse_wheel(&mut self, event: &InputEvent) {
        if let InputKind::Wheel(wheel) = &event.kind {
            self.wheel(wheel, wheel.position, event.time);
        }
    }
}

#[cfg(test)]
mod tests {
    use alloc::rc::Rc;
    use alloc::vec::Vec;
    use core::cell::RefCell;
    use core::f64::consts::FRAC_PI_2;

    use super::*;

    const STAGE: Rect = Rect::new(0.0, 0.0, 1000.0, 800.0);

    fn close(a: Point, b: Point) -> bool {
        a.distance(b) < 1e-9
    }

    fn card(options: ScatterOptions) -> Scatter {
        Scatter::new(options, STAGE).unwrap()
    }

    fn record(scatter: &mut Scatter) -> Rc<RefCell<Vec<TransformEvent>>> {
        let seen = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&seen);
        scatter
            .transform_listeners()
            .subscribe_forever(move |e| sink.borrow_mut().push(*e));
        seen
    }

    #[test]
    fn geometry_follows_scale_and_rotation() {
        let mut s = card(ScatterOptions {
            max_scale: 4.0,
            ..ScatterOptions::sized(100.0, 50.0).at(Point::new(100.0, 100.0))
        });
        assert_eq!(s.center(), Point::new(150.0, 125.0));
        assert!(close(s.origin(), Point::new(100.0, 100.0)));
        assert_eq!(s.bounds(), Rect::new(100.0, 100.0, 200.0, 150.0));

        s.zoom_to(2.0);
        assert!(close(s.origin(), Point::new(50.0, 75.0)));
        s.rotate(FRAC_PI_2, s.center());
        // A quarter turn clockwise puts the top-left corner at the top-right.
        assert!(close(s.origin(), Point::new(200.0, 25.0)), "{:?}", s.origin());
        let b = s.bounds();
        assert!((b.width() - 100.0).abs() < 1e-9 && (b.height() - 200.0).abs() < 1e-9);
    }

    #[test]
    fn pure_translation_takes_the_fast_path() {
        let mut s = card(ScatterOptions::sized(100.0, 100.0));
        let seen = record(&mut s);
        s.transform(Vec2::new(10.0, 5.0), 1.0, 0.0, Point::ORIGIN);
        assert_eq!(s.position(), Point::new(10.0, 5.0));
        let seen = seen.borrow();
        assert_eq!(seen.len(), 1);
        assert_eq!(seen[0].kind, Some(TransformEventKind::Update));
        assert_eq!(seen[0].translate, Vec2::new(10.0, 5.0));
    }

    #[test]
    fn disabled_axes_and_kinds_are_ignored() {
        let mut s = card(ScatterOptions {
            movable_x: false,
            rotatable: false,
            ..ScatterOptions::sized(100.0, 100.0)
        });
        s.transform(Vec2::new(10.0, 5.0), 1.0, 1.0, Point::ORIGIN);
        assert_eq!(s.position(), Point::new(0.0, 5.0));
        assert_eq!(s.rotation(), 0.0);

        let mut fixed = card(ScatterOptions {
            translatable: false,
            scalable: false,
            ..ScatterOptions::sized(100.0, 100.0)
        });
        fixed.transform(Vec2::new(10.0, 5.0), 3.0, 0.0, Point::ORIGIN);
        fixed.move_by(Vec2::new(1.0, 1.0));
        assert_eq!(fixed.position(), Point::ORIGIN);
        assert_eq!(fixed.scale(), 1.0);
    }

    #[test]
    fn rotation_keeps_the_anchor_in_place() {
        let mut s = card(ScatterOptions::sized(100.0, 100.0));
        // Anchor at the middle of the right edge.
        s.rotate(FRAC_PI_2, Point::new(100.0, 50.0));
        assert!(close(s.center(), Point::new(100.0, 0.0)), "{:?}", s.center());
        assert!((s.rotation_degrees() - 90.0).abs() < 1e-9);
    }

    #[test]
    fn zoom_keeps_the_anchor_in_place() {
        let mut s = card(ScatterOptions {
            max_scale: 4.0,
            resizable: true,
            ..ScatterOptions::sized(100.0, 100.0)
        });
        let sizes = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&sizes);
        s.resize_listeners()
            .subscribe_forever(move |e| sink.borrow_mut().push(*e));

        s.transform(Vec2::ZERO, 2.0, 0.0, Point::new(100.0, 50.0));
        assert_eq!(s.scale(), 2.0);
        assert!(close(s.center(), Point::new(0.0, 50.0)), "{:?}", s.center());
        assert_eq!(
            *sizes.borrow(),
            [ResizeEvent {
                width: 200.0,
                height: 200.0
            }]
        );
    }

    #[test]
    fn gesture_scale_is_clamped_to_the_overdo_limits() {
        let mut s = card(ScatterOptions {
            min_scale: 0.5,
            max_scale: 2.0,
            overdo_scaling: 1.5,
            ..ScatterOptions::sized(100.0, 100.0)
        });
        s.transform(Vec2::ZERO, 10.0, 0.0, s.center());
        assert_eq!(s.scale(), 3.0);
        s.transform(Vec2::ZERO, 0.001, 0.0, s.center());
        assert!((s.scale() - 0.5 / 1.5).abs() < 1e-12);
        assert_eq!(s.valid_scale(s.scale()), 0.5);
    }

    #[test]
    fn scale_bounces_back_after_the_delay() {
        let mut s = card(ScatterOptions {
            max_scale: 1.0,
            overdo_scaling: 1.5,
            ..ScatterOptions::sized(100.0, 100.0).at(Point::new(400.0, 300.0))
        });
        let anchor = s.center();
        s.transform(Vec2::ZERO, 1.2, 0.0, anchor);
        s.check_scaling(anchor, 100, 0);
        assert!(s.animate(50));
        assert!((s.scale() - 1.2).abs() < 1e-12);

        let mut now = 100;
        while s.animate(now) {
            now += 16;
            assert!(now < 100 + 16 * 100, "bounce did not settle");
        }
        assert!(s.scale() <= 1.0 && s.scale() > 0.98, "{}", s.scale());
        assert!(!s.is_bouncing_scale());
    }

    #[test]
    fn fixed_scale_outside_the_limits_does_not_bounce() {
        let mut s = card(ScatterOptions {
            scalable: false,
            start_scale: 2.0,
            max_scale: 1.0,
            ..ScatterOptions::sized(100.0, 100.0).at(Point::new(400.0, 300.0))
        });
        let wheel = WheelInput {
            position: Point::new(450.0, 350.0),
            delta_y: -1.0,
            shift: false,
        };
        s.wheel(&wheel, s.center(), 0);
        assert!(!s.is_bouncing_scale());

        // A bounce scheduled directly gives up once the scale cannot move.
        s.zoom_bounce = Some(ZoomBounce {
            anchor: s.center(),
            due: 0,
        });
        let mut now = 200;
        while s.animate(now) {
            now += 16;
            assert!(now < 200 + 16 * 100, "bounce did not settle");
        }
        assert_eq!(s.scale(), 2.0);
        assert!(!s.is_bouncing_scale());
    }

    #[test]
    fn pending_bounce_is_replaced() {
        let mut s = card(ScatterOptions::sized(100.0, 100.0));
        s.check_scaling(Point::ORIGIN, 100, 0);
        s.check_scaling(Point::ORIGIN, 100, 500);
        // The first schedule would be due by now.
        assert!(s.animate(150));
        assert!(s.is_bouncing_scale());
        assert!(!s.animate(600));
    }

    #[test]
    fn bouncing_brings_a_lost_scatter_back() {
        let mut s = card(ScatterOptions::sized(100.0, 100.0).at(Point::new(2000.0, 350.0)));
        assert!(s.is_outside());
        assert!(s.bouncing());
        assert!(!s.is_outside());
        assert!(s.position().x < 2000.0);
        assert!(!s.bouncing());
    }

    #[test]
    fn edge_hits_reflect_and_damp_the_velocity() {
        let mut s = card(ScatterOptions::sized(100.0, 100.0).at(Point::new(990.0, 350.0)));
        let v = s.keep_on_stage(Vec2::new(2.0, 1.0));
        assert!(!s.is_outside());
        // The center is past the right edge: x flips with collision damping.
        assert_eq!(v, Vec2::new(-1.0, 0.5));

        let mut inside = card(ScatterOptions::sized(100.0, 100.0).at(Point::new(400.0, 300.0)));
        assert_eq!(inside.keep_on_stage(Vec2::new(2.0, 0.0)), Vec2::new(1.9, 0.0));
    }

    #[test]
    fn throw_without_auto_throw_completes_at_once() {
        let mut s = card(ScatterOptions {
            auto_throw: false,
            ..ScatterOptions::sized(100.0, 100.0).at(Point::new(400.0, 300.0))
        });
        let seen = record(&mut s);
        s.start_throw(10);
        assert!(!s.is_throwing());
        assert_eq!(
            seen.borrow().last().and_then(|e| e.kind),
            Some(TransformEventKind::Complete)
        );
    }

    #[test]
    fn shifted_wheel_rotates() {
        let mut s = card(ScatterOptions::sized(100.0, 100.0).at(Point::new(400.0, 300.0)));
        let wheel = WheelInput {
            position: Point::new(450.0, 350.0),
            delta_y: -1.0,
            shift: true,
        };
        s.wheel(&wheel, s.center(), 0);
        assert!((s.rotation_degrees() - 5.0).abs() < 1e-9);
        assert_eq!(s.scale(), 1.0);
        assert!(!s.is_bouncing_scale());
    }

    #[test]
    fn reset_restores_the_initial_state() {
        let mut s = card(ScatterOptions {
            rotation_degrees: Some(10.0),
            ..ScatterOptions::sized(100.0, 100.0).at(Point::new(40.0, 30.0))
        });
        let initial = s.state();
        s.move_by(Vec2::new(100.0, 100.0));
        s.rotate(1.0, Point::ORIGIN);
        s.zoom_to(0.5);
        assert_ne!(s.state(), initial);
        s.reset();
        assert_eq!(s.state(), initial);
    }

    #[test]
    fn move_to_and_center_at() {
        let mut s = card(ScatterOptions::sized(100.0, 50.0));
        s.move_to(Point::new(300.0, 200.0));
        assert!(close(s.origin(), Point::new(300.0, 200.0)));
        s.center_at(Point::new(500.0, 500.0));
        assert!(close(s.center(), Point::new(500.0, 500.0)));
    }

    #[test]
    fn empty_stage_is_rejected() {
        let err = Scatter::new(ScatterOptions::sized(10.0, 10.0), Rect::ZERO).unwrap_err();
        assert_eq!(err, ScatterError::EmptyStage);
    }
}
