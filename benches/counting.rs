use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use fracdim::generator::{random_points, KochSnowflake};
use fracdim::{BoundingRegion, CountingMode, GridOccupancyCounter};

const RESOLUTIONS: [usize; 4] = [16, 64, 256, 1024];

fn benchmark_points_mode(c: &mut Criterion) {
    let region = BoundingRegion::from_corners(&[0.0, 0.0], &[100.0, 100.0]).unwrap();
    let points = random_points(&region, 100_000).unwrap();

    let mut group = c.benchmark_group("points_mode");
    for &n in &RESOLUTIONS {
        group.bench_with_input(BenchmarkId::from_parameter(n), &n, |b, &n| {
            let mut counter = GridOccupancyCounter::configure(region.clone(), n, CountingMode::Points).unwrap();
            b.iter(|| black_box(counter.calculate(&points).unwrap()))
        });
    }
    group.finish();
}

fn benchmark_lines_mode(c: &mut Criterion) {
    let polyline = KochSnowflake::construct(7).unwrap().closed_polyline();
    let region = BoundingRegion::enclosing(&polyline).unwrap();

    let mut group = c.benchmark_group("lines_mode");
    for &n in &RESOLUTIONS {
        group.bench_with_input(BenchmarkId::from_parameter(n), &n, |b, &n| {
            let mut counter = GridOccupancyCounter::configure(region.clone(), n, CountingMode::Lines).unwrap();
            b.iter(|| black_box(counter.calculate(&polyline).unwrap()))
        });
    }
    group.finish();
}

fn benchmark_lines_high_dimension(c: &mut Criterion) {
    let dim = 5;
    let region = BoundingRegion::from_corners(&vec![0.0; dim], &vec![1.0; dim]).unwrap();
    let cloud = random_points(&region, 10_000).unwrap();
    let mut counter = GridOccupancyCounter::configure(region, 12, CountingMode::Lines).unwrap();

    c.bench_function("lines_mode_5d_10000", |b| {
        b.iter(|| black_box(counter.calculate(&cloud).unwrap()))
    });
}

criterion_group!(benches, benchmark_points_mode, benchmark_lines_mode, benchmark_lines_high_dimension);
criterion_main!(benches);
