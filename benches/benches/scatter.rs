// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use criterion::{BatchSize, Criterion, black_box, criterion_group, criterion_main};
use kurbo::{Point, Rect, Vec2};
use understory_gesture::{EventPhase, InputEvent, PointerType};
use understory_scatter::{ContainerOptions, Scatter, ScatterContainer, ScatterOptions};

const STAGE: Rect = Rect::new(0.0, 0.0, 1920.0, 1080.0);

fn grid(count: u32) -> ScatterContainer {
    let mut container = ScatterContainer::new(STAGE, ContainerOptions::default())
        .expect("stage has an area");
    for i in 0..count {
        let x = f64::from(i % 16) * 110.0;
        let y = f64::from(i / 16) * 110.0;
        container
            .add(ScatterOptions::sized(100.0, 100.0).at(Point::new(x, y)))
            .expect("valid options");
    }
    container
}

fn bench_scatter(c: &mut Criterion) {
    let mut group = c.benchmark_group("understory_scatter");

    group.bench_function("transform_pinch", |b| {
        b.iter_batched(
            || {
                let options = ScatterOptions {
                    max_scale: 4.0,
                    ..ScatterOptions::sized(200.0, 100.0).at(Point::new(800.0, 400.0))
                };
                Scatter::new(options, STAGE).expect("valid options")
            },
            |mut scatter| {
                for _ in 0..100 {
                    scatter.transform(Vec2::new(1.0, 0.5), 1.001, 0.01, Point::new(900.0, 450.0));
                }
                black_box(scatter);
            },
            BatchSize::SmallInput,
        );
    });

    group.bench_function("throw_until_rest", |b| {
        b.iter_batched(
            || {
                let mut container = grid(1);
                let finger = |time: u64, phase, x: f64| {
                    InputEvent::pointer(time, phase, 1, PointerType::Touch, Point::new(x, 50.0))
                };
                container.handle(&mut finger(0, EventPhase::Down, 50.0));
                for i in 1..=4_u32 {
                    let x = 50.0 + 40.0 * f64::from(i);
                    container.handle(&mut finger(u64::from(i) * 10, EventPhase::Move, x));
                }
                container.handle(&mut finger(40, EventPhase::Up, 210.0));
                container
            },
            |mut container| {
                let mut now = 40;
                while container.animate(now) {
                    now += 16;
                }
                black_box(container);
            },
            BatchSize::SmallInput,
        );
    });

    for &count in &[16_u32, 128] {
        let container = grid(count);
        let stage = container.stage();
        group.bench_function(format!("topmost_at(n={count})"), |b| {
            b.iter(|| stage.topmost_at(black_box(Point::new(555.0, 225.0))));
        });
    }

    group.finish();
}

criterion_group!(benches, bench_scatter);
criterion_main!(benches);
