// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Gestures routed through a [`ScatterContainer`] end to end.

use std::cell::RefCell;
use std::rc::Rc;

use kurbo::{Affine, Point, Rect, Vec2};
use understory_gesture::{EventPhase, InputApi, InputEvent, PointerKey, PointerType};
use understory_scatter::{
    ContainerOptions, ScatterContainer, ScatterId, ScatterOptions, TapEvent, TransformEvent,
    TransformEventKind,
};

const STAGE: Rect = Rect::new(0.0, 0.0, 1000.0, 800.0);

fn container() -> ScatterContainer {
    ScatterContainer::new(STAGE, ContainerOptions::default()).unwrap()
}

fn touch(time: u64, phase: EventPhase, id: i64, x: f64, y: f64) -> InputEvent {
    InputEvent::pointer(time, phase, id, PointerType::Touch, Point::new(x, y))
}

fn record(container: &mut ScatterContainer, id: ScatterId) -> Rc<RefCell<Vec<TransformEvent>>> {
    let seen = Rc::new(RefCell::new(Vec::new()));
    let sink = Rc::clone(&seen);
    container
        .get_mut(id)
        .unwrap()
        .transform_listeners()
        .subscribe_forever(move |e| sink.borrow_mut().push(*e));
    seen
}

/// Runs frames of 16ms from `now` until nothing animates.
fn settle(container: &mut ScatterContainer, mut now: u64) -> u64 {
    let mut frames = 0;
    while container.animate(now) {
        now += 16;
        frames += 1;
        assert!(frames < 2000, "animation did not settle");
    }
    now
}

#[test]
fn pinch_is_clamped_to_the_scale_limit() {
    let mut c = container();
    let id = c
        .add(ScatterOptions {
            min_scale: 0.5,
            max_scale: 1.0,
            overdo_scaling: 1.0,
            ..ScatterOptions::sized(300.0, 100.0).at(Point::new(50.0, 50.0))
        })
        .unwrap();

    c.handle(&mut touch(0, EventPhase::Down, 1, 100.0, 100.0));
    c.handle(&mut touch(0, EventPhase::Down, 2, 200.0, 100.0));
    assert_eq!(c.interaction().ref_count(id), 2);

    // The fingers spread from 100 to 200 apart: a zoom of 2.
    c.handle(&mut touch(10, EventPhase::Move, 2, 300.0, 100.0));
    assert_eq!(c.get(id).unwrap().scale(), 1.0);
}

#[test]
fn overdone_pinch_bounces_back_after_release() {
    let mut c = container();
    let id = c
        .add(ScatterOptions::sized(300.0, 100.0).at(Point::new(50.0, 50.0)))
        .unwrap();

    c.handle(&mut touch(0, EventPhase::Down, 1, 100.0, 100.0));
    c.handle(&mut touch(0, EventPhase::Down, 2, 200.0, 100.0));
    c.handle(&mut touch(10, EventPhase::Move, 2, 300.0, 100.0));
    // Default limits: max 1.0 widened by 1.5 during the gesture.
    assert_eq!(c.get(id).unwrap().scale(), 1.5);

    c.handle(&mut touch(20, EventPhase::Up, 2, 300.0, 100.0));
    c.handle(&mut touch(30, EventPhase::Up, 1, 100.0, 100.0));
    assert!(c.get(id).unwrap().is_bouncing_scale());
    settle(&mut c, 30);

    let scale = c.get(id).unwrap().scale();
    assert!(scale <= 1.0 && scale > 0.98, "{scale}");
    assert_eq!(c.interaction().target_count(), 0);
}

#[test]
fn flung_scatter_comes_to_rest_on_stage() {
    let mut c = container();
    let id = c
        .add(ScatterOptions::sized(200.0, 200.0).at(Point::new(600.0, 300.0)))
        .unwrap();
    let seen = record(&mut c, id);

    c.handle(&mut touch(0, EventPhase::Down, 1, 700.0, 400.0));
    for frame in 1..=4_u32 {
        let x = 700.0 + 40.0 * f64::from(frame);
        c.handle(&mut touch(u64::from(frame) * 10, EventPhase::Move, 1, x, 400.0));
    }
    c.handle(&mut touch(40, EventPhase::Up, 1, 860.0, 400.0));
    let throw = c.get(id).unwrap().throw_velocity().unwrap();
    assert!(throw.x > 3.0, "{throw:?}");

    settle(&mut c, 40);
    let scatter = c.get(id).unwrap();
    assert!(!scatter.is_throwing());
    assert!(!scatter.is_outside());
    // It hit the right edge and came back.
    assert!((0.0..956.0).contains(&scatter.position().x), "{:?}", scatter.position());

    let kinds: Vec<_> = seen.borrow().iter().filter_map(|e| e.kind).collect();
    assert_eq!(kinds.first(), Some(&TransformEventKind::Start));
    assert!(kinds.contains(&TransformEventKind::End));
    assert_eq!(kinds.last(), Some(&TransformEventKind::Complete));
    assert!(seen.borrow().iter().any(|e| e.fast));
}

#[test]
fn scatters_are_dragged_independently() {
    let mut c = container();
    let left = c
        .add(ScatterOptions::sized(100.0, 100.0).at(Point::new(100.0, 100.0)))
        .unwrap();
    let right = c
        .add(ScatterOptions::sized(100.0, 100.0).at(Point::new(500.0, 100.0)))
        .unwrap();

    c.handle(&mut touch(0, EventPhase::Down, 1, 150.0, 150.0));
    c.handle(&mut touch(0, EventPhase::Down, 2, 550.0, 150.0));
    c.handle(&mut touch(10, EventPhase::Move, 1, 150.0, 200.0));
    c.handle(&mut touch(10, EventPhase::Move, 2, 600.0, 150.0));

    assert_eq!(c.get(left).unwrap().position(), Point::new(100.0, 150.0));
    assert_eq!(c.get(right).unwrap().position(), Point::new(550.0, 100.0));
    assert_eq!(c.get(left).unwrap().scale(), 1.0);
    assert_eq!(c.get(right).unwrap().scale(), 1.0);
}

#[test]
fn taps_are_reported_in_local_coordinates() {
    let mut c = container();
    c.set_page_transform(Affine::translate(Vec2::new(-100.0, -100.0)));
    let id = c.add(ScatterOptions::sized(200.0, 200.0)).unwrap();
    let taps = Rc::new(RefCell::new(Vec::new()));
    let sink = Rc::clone(&taps);
    c.get_mut(id)
        .unwrap()
        .tap_listeners()
        .subscribe_forever(move |e: &TapEvent| sink.borrow_mut().push(*e));

    c.handle(&mut touch(0, EventPhase::Down, 3, 150.0, 150.0));
    c.handle(&mut touch(80, EventPhase::Up, 3, 152.0, 150.0));
    assert_eq!(
        *taps.borrow(),
        [TapEvent {
            key: PointerKey::Id(3),
            point: Point::new(52.0, 50.0)
        }]
    );

    // Held too long for a tap.
    c.handle(&mut touch(1000, EventPhase::Down, 4, 150.0, 150.0));
    c.handle(&mut touch(1600, EventPhase::Up, 4, 150.0, 150.0));
    assert_eq!(taps.borrow().len(), 1);
}

#[test]
fn wheel_zooms_the_scatter_under_the_pointer() {
    let mut c = container();
    let id = c
        .add(ScatterOptions::sized(200.0, 200.0).at(Point::new(100.0, 100.0)))
        .unwrap();
    let other = c
        .add(ScatterOptions::sized(100.0, 100.0).at(Point::new(600.0, 100.0)))
        .unwrap();
    let seen = record(&mut c, id);

    let mut wheel = InputEvent::wheel(0, Point::new(200.0, 200.0), -1.0, false);
    c.handle(&mut wheel);
    assert_eq!(wheel.claimed_by, Some(id.get()));
    assert_eq!(c.get(id).unwrap().scale(), 1.1);
    assert_eq!(c.get(other).unwrap().scale(), 1.0);
    assert_eq!(
        seen.borrow().last().and_then(|e| e.kind),
        Some(TransformEventKind::Zoom)
    );

    // The zoom past the limit is undone once the wheel is quiet.
    assert!(c.animate(100));
    assert_eq!(c.get(id).unwrap().scale(), 1.1);
    settle(&mut c, 200);
    assert!(c.get(id).unwrap().scale() <= 1.0);
}

#[test]
fn claimed_wheel_events_are_ignored() {
    let mut c = container();
    let id = c
        .add(ScatterOptions::sized(200.0, 200.0).at(Point::new(100.0, 100.0)))
        .unwrap();
    let mut wheel = InputEvent::wheel(0, Point::new(200.0, 200.0), 1.0, false);
    wheel.claim(99);
    c.handle(&mut wheel);
    assert_eq!(c.get(id).unwrap().scale(), 1.0);
    assert_eq!(wheel.claimed_by, Some(99));
}

#[test]
fn wheel_claimed_by_the_scatter_under_it_is_handled() {
    let mut c = container();
    let id = c
        .add(ScatterOptions::sized(200.0, 200.0).at(Point::new(100.0, 100.0)))
        .unwrap();
    let mut wheel = InputEvent::wheel(0, Point::new(200.0, 200.0), -1.0, false);
    wheel.claim(id.get());
    c.handle(&mut wheel);
    assert_eq!(c.get(id).unwrap().scale(), 1.1);
    assert_eq!(wheel.claimed_by, Some(id.get()));
}

#[test]
fn mouse_container_ignores_pointer_events() {
    let options = ContainerOptions {
        api: InputApi::Mouse,
        ..ContainerOptions::default()
    };
    let mut c = ScatterContainer::new(STAGE, options).unwrap();
    let id = c
        .add(ScatterOptions::sized(100.0, 100.0).at(Point::new(100.0, 100.0)))
        .unwrap();

    c.handle(&mut touch(0, EventPhase::Down, 1, 150.0, 150.0));
    c.handle(&mut touch(10, EventPhase::Move, 1, 250.0, 150.0));
    assert_eq!(c.get(id).unwrap().position(), Point::new(100.0, 100.0));

    c.handle(&mut InputEvent::mouse(20, EventPhase::Down, Point::new(150.0, 150.0)));
    c.handle(&mut InputEvent::mouse(30, EventPhase::Move, Point::new(170.0, 160.0)));
    assert_eq!(c.get(id).unwrap().position(), Point::new(120.0, 110.0));
    c.handle(&mut InputEvent::mouse(40, EventPhase::Up, Point::new(170.0, 160.0)));
    assert!(c.current_touches().next().is_none());
    assert!(!c.get(id).unwrap().is_dragging());
}
