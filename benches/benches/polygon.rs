// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use criterion::{Criterion, black_box, criterion_group, criterion_main};
use kurbo::{Point, Rect, Vec2};
use understory_polygon::Polygon;

fn regular(center: Point, radius: f64, sides: u32) -> Polygon {
    let mut polygon = Polygon::new(center);
    for i in 0..sides {
        let a = f64::from(i) * core::f64::consts::TAU / f64::from(sides);
        polygon.add_point(Vec2::new(radius * a.cos(), radius * a.sin()));
    }
    polygon
}

fn bench_polygon(c: &mut Criterion) {
    let mut group = c.benchmark_group("understory_polygon");

    let stage = Polygon::from_rect(Rect::new(0.0, 0.0, 1920.0, 1080.0));
    let mut card = Polygon::centered_box(Point::new(960.0, 540.0), Vec2::new(150.0, 100.0));
    card.rotate(0.3);
    group.bench_function("sat_box_vs_stage", |b| {
        b.iter(|| black_box(&stage).intersects_with(black_box(&card)));
    });

    let far = Polygon::centered_box(Point::new(5000.0, 540.0), Vec2::new(150.0, 100.0));
    group.bench_function("sat_separated", |b| {
        b.iter(|| black_box(&stage).intersects_with(black_box(&far)));
    });

    for &sides in &[8_u32, 32, 128] {
        let a = regular(Point::new(0.0, 0.0), 100.0, sides);
        let b_poly = regular(Point::new(50.0, 20.0), 100.0, sides);
        group.bench_function(format!("sat_regular(n={sides})"), |b| {
            b.iter(|| black_box(&a).intersects_with(black_box(&b_poly)));
        });
        group.bench_function(format!("contains_point(n={sides})"), |b| {
            b.iter(|| black_box(&a).contains_point(black_box(Point::new(10.0, 10.0))));
        });
    }

    group.finish();
}

criterion_group!(benches, bench_polygon);
criterion_main!(benches);
