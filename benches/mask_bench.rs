#![deny(warnings)]

use criterion::{BenchmarkId, Criterion, Throughput, criterion_group, criterion_main};
use polymask::*;
use std::{hint::black_box, time::Duration};

/// Star with `count` spikes inscribed in a circle of `radius` centered at `(center, center)`
fn star(count: usize, center: f64, radius: f64) -> Vec<(f64, f64)> {
    (0..2 * count)
        .map(|index| {
            let angle = std::f64::consts::PI * index as f64 / count as f64;
            let r = if index % 2 == 0 { radius } else { radius * 0.45 };
            (center + r * angle.cos(), center + r * angle.sin())
        })
        .collect()
}

fn geometries() -> Vec<(&'static str, Geometry)> {
    let square = |x: f64, y: f64, size: f64| {
        vec![vec![(x, y), (x + size, y), (x + size, y + size), (x, y + size)]]
    };
    vec![
        ("star", Geometry::polygon([star(12, 256.0, 256.0)])),
        (
            "squares",
            Geometry::multi_polygon((0..8).map(|i| square(i as f64 * 64.0, 0.0, 48.0))),
        ),
        (
            "holes",
            Geometry::polygon([star(7, 200.0, 200.0), star(5, 200.0, 60.0)]),
        ),
    ]
}

fn pipeline_benchmark(c: &mut Criterion) {
    let builders = [
        ("sequential", MaskBuilder::default().with_parallel(false)),
        ("parallel", MaskBuilder::default().with_parallel(true)),
    ];
    for (name, geometry) in geometries() {
        let bbox = BoundingBox::from_rings(geometry.rings()).expect("degenerate geometry");
        let mut group = c.benchmark_group(name);
        group.throughput(Throughput::Elements((bbox.width() * bbox.height()) as u64));
        for (mode, builder) in builders.iter() {
            group.bench_with_input(BenchmarkId::new("mask", mode), builder, |b, builder| {
                b.iter_with_large_drop(|| builder.build(black_box(&geometry)))
            });
        }
        group.finish();
    }
}

fn stage_benchmark(c: &mut Criterion) {
    let geometry = Geometry::polygon([star(12, 256.0, 256.0)]);
    let bbox = BoundingBox::from_rings(geometry.rings()).expect("degenerate geometry");
    let drawn =
        draw_outline(&LineOutline, geometry.rings(), bbox, 255).expect("failed to draw outline");
    let thinner = ZhangSuenThinner::default();
    let outline = thinner.thin(&drawn).expect("failed to thin outline");

    let mut group = c.benchmark_group("stages");
    group
        .throughput(Throughput::Elements((bbox.width() * bbox.height()) as u64))
        .bench_function("outline", |b| {
            b.iter_with_large_drop(|| draw_outline(&LineOutline, geometry.rings(), bbox, 255))
        })
        .bench_function("thin", |b| {
            b.iter_with_large_drop(|| thinner.thin(black_box(&drawn)))
        })
        .bench_function("fill", |b| {
            b.iter_with_large_drop(|| scanline_fill(black_box(&outline), Label::MAX, false))
        });
    group.finish()
}

criterion_group!(
    name = mask;
    config = Criterion::default().sample_size(10).warm_up_time(Duration::new(1, 0));
    targets = pipeline_benchmark, stage_benchmark
);
criterion_main!(mask);
