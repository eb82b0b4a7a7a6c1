use std::hint::black_box;

use criterion::{Criterion, criterion_group, criterion_main};
use predifix::pipeline::Artifacts;
use predifix::sensor::{ProductGrade, SensorReading};

fn bench_evaluate(c: &mut Criterion) {
    let artifacts = Artifacts::bundled().expect("bundled artifacts");
    let reading = SensorReading {
        grade: ProductGrade::M,
        ..SensorReading::default()
    };
    c.bench_function("evaluate_reading", |b| {
        b.iter(|| artifacts.evaluate(black_box(&reading)).expect("evaluate"))
    });
}

fn bench_slider_sweep(c: &mut Criterion) {
    let artifacts = Artifacts::bundled().expect("bundled artifacts");
    let readings: Vec<SensorReading> = (1100..=2900)
        .step_by(10)
        .map(|rpm| SensorReading {
            rotational_speed_rpm: f64::from(rpm),
            ..SensorReading::default()
        })
        .collect();
    c.bench_function("evaluate_rpm_sweep", |b| {
        b.iter(|| {
            for reading in &readings {
                black_box(artifacts.evaluate(reading).expect("evaluate"));
            }
        })
    });
}

criterion_group!(benches, bench_evaluate, bench_slider_sweep);
criterion_main!(benches);
