use criterion::{criterion_group, criterion_main, Criterion};
use geoborders_core::prelude::*;
use std::hint::black_box;

/// A grid of small square "countries" covering the globe, with every tenth
/// one pushed past the antimeridian.
fn synthetic_world() -> BoundaryDataset {
    let mut units = Vec::new();
    for i in 0..72 {
        for j in 0..34 {
            let lon = -180.0 + i as f64 * 5.0 + if (i + j) % 10 == 0 { 360.0 } else { 0.0 };
            let lat = -85.0 + j as f64 * 5.0;
            let ring: Ring = (0..=40)
                .map(|k| {
                    let t = (k % 40) as f64 / 40.0 * std::f64::consts::TAU;
                    (lon + 2.0 + 2.0 * t.cos(), lat + 2.0 - 2.0 * t.sin())
                })
                .collect();
            units.push(AdminUnit::new(Geometry::SinglePart(Polygon::new(ring, vec![]))));
        }
    }
    BoundaryDataset::new(units)
}

fn bench_pipeline(c: &mut Criterion) {
    let world = synthetic_world();
    let pipeline = BorderPipeline::default();
    let europe = BoundingBox::new(-25.0, 34.0, 45.0, 72.0).unwrap();

    c.bench_function("concatenated_world", |b| {
        b.iter(|| pipeline.concatenated(black_box(&world)))
    });

    c.bench_function("discrete_world", |b| {
        b.iter(|| pipeline.discrete(black_box(&world), Some(SubplotCell::new(1, 1))))
    });

    c.bench_function("filter_europe", |b| b.iter(|| black_box(&world).filter(&europe)));
}

criterion_group!(benches, bench_pipeline);
criterion_main!(benches);
