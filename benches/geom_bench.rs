//! Criterion benchmarks for the per-frame hot paths.
//! Polygon sizes: n in {4, 16, 64} vertices.

use std::hint::black_box;

use criterion::{BenchmarkId, Criterion, criterion_group, criterion_main};
use glam::Vec2;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;

use combat_geom::SolverSettings;
use combat_geom::combat::Weapon;
use combat_geom::geom::{Bounds, EntityHandle, get_collision_point};
use combat_geom::math::{get_point, trig};
use combat_geom::orbit::solve_kepler;

fn regular_polygon(n: usize, radius: f32) -> Bounds {
    let vertices: Vec<Vec2> = (0..n)
        .map(|i| get_point(Vec2::ZERO, radius, 360.0 * i as f32 / n as f32))
        .collect();
    Bounds::from_vertices(&vertices)
}

fn bench_trig(c: &mut Criterion) {
    let mut group = c.benchmark_group("trig");
    group.bench_function("sin", |b| b.iter(|| trig::sin(black_box(2.5))));
    group.bench_function("atan2", |b| {
        b.iter(|| trig::atan2(black_box(-0.7), black_box(0.3)))
    });
    group.finish();
}

fn bench_collision(c: &mut Criterion) {
    let mut group = c.benchmark_group("collision_point");
    for &n in &[4usize, 16, 64] {
        let bounds = regular_polygon(n, 50.0);
        let ship = EntityHandle::new(Vec2::new(200.0, 0.0), 30.0, 60.0).with_bounds(&bounds);
        group.bench_with_input(BenchmarkId::new("polygon", n), &ship, |b, ship| {
            b.iter(|| {
                get_collision_point(black_box(Vec2::ZERO), black_box(Vec2::new(400.0, 5.0)), ship)
            })
        });
    }
    group.finish();
}

fn bench_arc(c: &mut Criterion) {
    let weapon = Weapon::new(Vec2::ZERO, 10.0, 25.0, 800.0, 60.0);
    let mut rng = Pcg32::seed_from_u64(42);
    let targets: Vec<EntityHandle> = (0..256)
        .map(|_| {
            let p = Vec2::new(
                rng.random::<f32>() * 1600.0 - 800.0,
                rng.random::<f32>() * 1600.0 - 800.0,
            );
            EntityHandle::new(p, 0.0, 40.0)
        })
        .collect();

    c.bench_function("arc/is_within_arc_x256", |b| {
        b.iter(|| targets.iter().filter(|t| weapon.is_within_arc(t)).count())
    });
}

fn bench_kepler(c: &mut Criterion) {
    let settings = SolverSettings::default();
    let mut group = c.benchmark_group("kepler");
    for &e in &[0.1f32, 0.5, 0.95] {
        group.bench_with_input(BenchmarkId::new("solve", e), &e, |b, &e| {
            b.iter(|| solve_kepler(black_box(e), black_box(2.0), &settings))
        });
    }
    group.finish();
}

criterion_group!(benches, bench_trig, bench_collision, bench_arc, bench_kepler);
criterion_main!(benches);
