// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use criterion::{BatchSize, Criterion, black_box, criterion_group, criterion_main};
use kurbo::Point;
use understory_gesture::{
    EventPhase, InputApi, InputEvent, InteractionDelegate, InteractionPoints, InteractionTarget,
    InteractionView, PointMap, PointerKey, PointerType, TapThresholds,
};

fn contacts(n: i64, spread: f64) -> PointMap {
    (0..n)
        .map(|i| {
            let t = i as f64;
            (PointerKey::Id(i), Point::new(t * spread, (t * 0.7).sin() * spread))
        })
        .collect()
}

struct Sink;

impl InteractionTarget for Sink {
    fn capture(&mut self, _event: &mut InputEvent) -> bool {
        true
    }
    fn on_start(&mut self, _event: &InputEvent, _view: InteractionView<'_>) {}
    fn on_move(&mut self, _event: &InputEvent, view: InteractionView<'_>) {
        black_box(view.delta());
    }
    fn on_end(&mut self, _event: &InputEvent, view: InteractionView<'_>) {
        black_box(view.is_any_tap());
    }
}

fn bench_gesture(c: &mut Criterion) {
    let mut group = c.benchmark_group("understory_gesture");

    for &n in &[2_i64, 5, 10] {
        let map = contacts(n, 37.0);
        group.bench_function(format!("farthests(n={n})"), |b| {
            b.iter(|| black_box(&map).farthests());
        });

        let mut points = InteractionPoints::new();
        for (key, point) in &map {
            points.update(key, point, 0);
        }
        points.update_previous();
        for (key, point) in &contacts(n, 41.0) {
            points.update(key, point, 16);
        }
        group.bench_function(format!("delta(n={n})"), |b| {
            b.iter(|| black_box(&points).delta());
        });
    }

    group.bench_function("delegate_drag_100_moves", |b| {
        b.iter_batched(
            || InteractionDelegate::new(InputApi::Pointer, TapThresholds::default()),
            |mut delegate| {
                let mut sink = Sink;
                let finger = |time: u64, phase, x: f64| {
                    InputEvent::pointer(time, phase, 1, PointerType::Touch, Point::new(x, 0.0))
                };
                delegate.handle(&mut sink, &mut finger(0, EventPhase::Down, 0.0));
                for i in 1..=100_u32 {
                    let t = u64::from(i) * 16;
                    delegate.handle(&mut sink, &mut finger(t, EventPhase::Move, f64::from(i)));
                }
                delegate.handle(&mut sink, &mut finger(1616, EventPhase::Up, 100.0));
                black_box(delegate);
            },
            BatchSize::SmallInput,
        );
    });

    group.finish();
}

criterion_group!(benches, bench_gesture);
criterion_main!(benches);
