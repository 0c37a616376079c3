//! Marshaling Benchmarks
//!
//! Measures host-to-native matrix conversion for both layout conventions, at
//! the dataset sizes typical of the bundled algorithms.

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use mlbridge::marshal::{dense_from_native, dense_to_native, MatrixLayout};
use ndarray::Array2;

fn dataset(points: usize, dims: usize) -> Array2<f64> {
    Array2::from_shape_fn((points, dims), |(i, j)| (i * dims + j) as f64)
}

fn bench_dense_to_native(c: &mut Criterion) {
    let mut group = c.benchmark_group("dense_to_native");
    for &points in &[100usize, 1_000, 10_000] {
        let data = dataset(points, 16);
        group.bench_with_input(
            BenchmarkId::new("points_are_rows", points),
            &data,
            |b, data| b.iter(|| dense_to_native(black_box(data.view()), MatrixLayout::PointsAreRows)),
        );
        group.bench_with_input(
            BenchmarkId::new("points_are_columns", points),
            &data,
            |b, data| {
                b.iter(|| dense_to_native(black_box(data.view()), MatrixLayout::PointsAreColumns))
            },
        );
    }
    group.finish();
}

fn bench_dense_from_native(c: &mut Criterion) {
    let mut group = c.benchmark_group("dense_from_native");
    for &points in &[100usize, 1_000, 10_000] {
        let (buffer, rows, cols) = dense_to_native(dataset(points, 16).view(), MatrixLayout::PointsAreRows);
        group.bench_with_input(
            BenchmarkId::new("points_are_rows", points),
            &buffer,
            |b, buffer| {
                b.iter(|| {
                    dense_from_native(
                        black_box(buffer.clone()),
                        rows,
                        cols,
                        MatrixLayout::PointsAreRows,
                    )
                })
            },
        );
        group.bench_with_input(
            BenchmarkId::new("points_are_columns", points),
            &buffer,
            |b, buffer| {
                b.iter(|| {
                    dense_from_native(
                        black_box(buffer.clone()),
                        rows,
                        cols,
                        MatrixLayout::PointsAreColumns,
                    )
                })
            },
        );
    }
    group.finish();
}

criterion_group!(benches, bench_dense_to_native, bench_dense_from_native);
criterion_main!(benches);
