use criterion::{black_box, criterion_group, criterion_main, Criterion};
use critter_sim::{
    common::Material,
    config::SimConfig,
    drops::ControlDrop,
    math::Vector2D,
    objects::SimulatorObject,
    shapes::Polygon,
    states::{Dynamics, MotorMode, Omnidrive},
    world::Engine,
};

// --- Helper for building a world of drifting blocks inside four walls ---
fn build_arena(num_blocks: usize) -> Engine {
    let mut engine = Engine::with_standard_components(SimConfig::default());
    let size = 4.0 + num_blocks as f64;
    let walls = [
        (Vector2D::new(0.0, -size), 2.0 * size, 1.0),
        (Vector2D::new(0.0, size), 2.0 * size, 1.0),
        (Vector2D::new(-size, 0.0), 1.0, 2.0 * size),
        (Vector2D::new(size, 0.0), 1.0, 2.0 * size),
    ];
    let mut id = 0;
    for (center, w, h) in walls {
        let wall = SimulatorObject::new("wall", id)
            .at(center, 0.0)
            .with_shape(Polygon::rectangle(center, w, h))
            .with_state(Dynamics::fixed());
        if let Ok(wall) = wall {
            let _ = engine.add_object(wall);
        }
        id += 1;
    }

    for i in 0..num_blocks {
        let center = Vector2D::new(i as f64 * 1.5 - size / 2.0, (i % 3) as f64 - 1.0);
        let outline = Polygon::rectangle(center, 0.5, 0.5);
        // 1 kg blocks
        let mut dynamics =
            Dynamics::from_polygon(&outline, 4.0).with_material(Material::new(0.5, 0.2, 0.1));
        dynamics.set_velocity(Vector2D::new(1.0, if i % 2 == 0 { 0.5 } else { -0.5 }));
        let block = SimulatorObject::new("block", id)
            .at(center, 0.0)
            .with_shape(outline)
            .with_state(dynamics)
            .and_then(|b| b.with_state(Omnidrive::new()));
        if let Ok(block) = block {
            let _ = engine.add_object(block);
        }
        id += 1;
    }

    let control = ControlDrop {
        motor_mode: MotorMode::XyThetaSpace,
        velocities: [1, 0, 1],
        ..ControlDrop::default()
    };
    let _ = engine.apply_drop(&control.to_message());
    engine
}

// Benchmark for a full engine tick over a growing arena
fn bench_engine_step(c: &mut Criterion) {
    let mut group = c.benchmark_group("engine_step");

    for num_blocks in [10, 50, 100].iter() {
        group.bench_with_input(criterion::BenchmarkId::from_parameter(num_blocks), num_blocks, |b, &n| {
            b.iter(|| {
                let mut engine = build_arena(n);
                for _ in 0..30 {
                    engine.step(black_box(10));
                }
            });
        });
    }
    group.finish();
}

// Benchmark for the polygon intersection kernel
fn bench_polygon_intersections(c: &mut Criterion) {
    let mut group = c.benchmark_group("polygon_intersections");

    for sides in [4usize, 32, 128].iter() {
        let ring = |center: Vector2D, n: usize| {
            let mut polygon = Polygon::new(Vec::new());
            for k in 0..n {
                let angle = k as f64 * std::f64::consts::TAU / n as f64;
                let vertex = center + Vector2D::from_angle(angle);
                polygon.add_point(vertex.x, vertex.y);
            }
            polygon
        };
        let left = ring(Vector2D::ZERO, *sides);
        let right = ring(Vector2D::new(1.0, 0.0), *sides);
        group.bench_with_input(criterion::BenchmarkId::from_parameter(sides), sides, |b, _| {
            b.iter(|| black_box(&left).intersections(black_box(&right), 2));
        });
    }
    group.finish();
}

criterion_group!(benches, bench_engine_step, bench_polygon_intersections);
criterion_main!(benches);
