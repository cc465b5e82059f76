//! # Virtual Hexapod Update Benchmark

use criterion::{black_box, criterion_group, criterion_main, Criterion};

use hex_if::pose::{parse_pose_map, Measurements, PoseMap};
use hex_lib::kinematics::{find, VirtualHexapod};

fn update_benchmark(c: &mut Criterion) {
    // ---- Build the hexapod and poses ----

    let measurements = Measurements::new(100.0, 100.0, 100.0, 50.0, 80.0, 120.0);
    let mut hexapod = VirtualHexapod::from_measurements(measurements);

    let tripod = find("TRIPOD_A").unwrap().pose_map();
    let uniform = PoseMap::uniform(15.0, 30.0, -75.0);
    let partial_json = r#"{"right-front": {"coxia": 10, "femur": 20, "tibia": -30}, "4": {"femur": 45}}"#;

    // Bench the full rebuild and the leg only update
    c.bench_function("VirtualHexapod::with_pose", |b| {
        b.iter(|| VirtualHexapod::with_pose(black_box(measurements), &tripod))
    });

    c.bench_function("VirtualHexapod::update", |b| {
        b.iter(|| hexapod.update(black_box(&uniform)))
    });

    // Parsing a custom pose is on the same path when it comes from JSON
    c.bench_function("parse_pose_map", |b| {
        b.iter(|| parse_pose_map(black_box(partial_json)).unwrap())
    });
}

criterion_group!(benches, update_benchmark);
criterion_main!(benches);
