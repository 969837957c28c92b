// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! Performance benchmarks

use cellgrid::assembly::{CancellationToken, MeshAssembler, NoProgress};
use cellgrid::geometry::{koch, Primitive};
use cellgrid::shapes::{Circle, Hexagon};
use cellgrid::{GeneratorConfig, Shape, SurfaceSpec};
use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};

fn bench_primitives(c: &mut Criterion) {
    let mut group = c.benchmark_group("primitives");

    group.bench_function("hexagon_prism", |b| {
        b.iter(|| {
            Primitive::HexagonPrism {
                edge: black_box(1.0),
                height: black_box(1.0),
            }
            .to_mesh()
            .unwrap()
        });
    });

    for segments in [30u32, 128] {
        group.bench_with_input(
            BenchmarkId::new("circular_prism", segments),
            &segments,
            |b, &segments| {
                b.iter(|| {
                    Primitive::CircularPrism {
                        radius: 1.0,
                        height: 1.0,
                        segments: black_box(segments),
                    }
                    .to_mesh()
                    .unwrap()
                });
            },
        );
    }

    group.finish();
}

fn bench_koch(c: &mut Criterion) {
    let mut group = c.benchmark_group("koch");

    for iterations in [2u32, 4, 6] {
        group.bench_with_input(
            BenchmarkId::new("boundary", iterations),
            &iterations,
            |b, &iterations| {
                b.iter(|| koch::snowflake_boundary(black_box(1.0), iterations));
            },
        );
    }

    group.finish();
}

fn bench_tiling(c: &mut Criterion) {
    let mut group = c.benchmark_group("tiling");
    group.sample_size(20);

    let assembler = MeshAssembler::new(&GeneratorConfig::default()).unwrap();
    let cases = [
        (
            "honeycomb_100mm",
            Shape::Hexagon(Hexagon {
                edge_size: 1.0,
                height: 1.0,
                spacing: 0.25,
            }),
        ),
        (
            "circles_100mm",
            Shape::Circle(Circle {
                radius: 1.0,
                height: 1.0,
                spacing: 1.0,
                point_count: 30,
            }),
        ),
    ];
    let surface = SurfaceSpec::new(100.0, 100.0).unwrap();

    for (name, shape) in &cases {
        let placements = shape.grid().plan(&surface).unwrap();
        group.bench_function(*name, |b| {
            b.iter(|| {
                assembler.assemble(
                    black_box(shape),
                    black_box(&placements),
                    &mut NoProgress,
                    &CancellationToken::new(),
                )
            });
        });
    }

    group.finish();
}

criterion_group!(benches, bench_primitives, bench_koch, bench_tiling);
criterion_main!(benches);
