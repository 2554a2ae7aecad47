//! Benchmarks comparing the longest flow path algorithms

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use flowpath_algorithms::lfp::{
    double_drop_parallel, double_drop_seq, recursive_seq, recursive_task, top_down_max,
    top_down_single, top_down_single_parallel,
};
use flowpath_core::{CellLocation, FlowGrid};

/// Build a size x size basin draining to an outlet at the bottom center:
/// the last row funnels east/west toward the outlet column, everything
/// above drains south, and the westernmost column drains south-east so
/// path lengths are not all tied.
fn basin(size: usize) -> (FlowGrid, CellLocation) {
    let mut codes = vec![0u8; size * size];
    let middle = size / 2;
    for row in 0..size {
        for col in 0..size {
            let idx = row * size + col;
            codes[idx] = if row + 1 == size {
                match col {
                    c if c < middle => 1,
                    c if c > middle => 16,
                    _ => 0,
                }
            } else if col == 0 {
                2
            } else {
                4
            };
        }
    }
    let grid = FlowGrid::from_codes(codes, size, size).unwrap();
    (grid, CellLocation::new(size - 1, middle))
}

fn bench_recursive(c: &mut Criterion) {
    let mut group = c.benchmark_group("lfp/recursive");
    for size in [64, 128, 256] {
        let (grid, outlet) = basin(size);
        group.bench_with_input(BenchmarkId::new("seq", size), &size, |b, _| {
            b.iter(|| recursive_seq(black_box(&grid), outlet))
        });
        group.bench_with_input(BenchmarkId::new("task", size), &size, |b, _| {
            b.iter(|| recursive_task(black_box(&grid), outlet, 64))
        });
    }
    group.finish();
}

fn bench_top_down(c: &mut Criterion) {
    let mut group = c.benchmark_group("lfp/top_down");
    for size in [64, 128, 256, 512] {
        let (grid, outlet) = basin(size);
        let outlets = [outlet];
        group.bench_with_input(BenchmarkId::new("max_seq", size), &size, |b, _| {
            b.iter(|| top_down_max(black_box(&grid), &outlets))
        });
        group.bench_with_input(BenchmarkId::new("single_seq", size), &size, |b, _| {
            b.iter(|| top_down_single(black_box(&grid), &outlets))
        });
        group.bench_with_input(BenchmarkId::new("single_par", size), &size, |b, _| {
            b.iter(|| top_down_single_parallel(black_box(&grid), &outlets))
        });
    }
    group.finish();
}

fn bench_double_drop(c: &mut Criterion) {
    let mut group = c.benchmark_group("lfp/double_drop");
    for size in [64, 128, 256, 512] {
        let (grid, outlet) = basin(size);
        group.bench_with_input(BenchmarkId::new("seq", size), &size, |b, _| {
            b.iter(|| double_drop_seq(black_box(&grid), outlet))
        });
        group.bench_with_input(BenchmarkId::new("par", size), &size, |b, _| {
            b.iter(|| double_drop_parallel(black_box(&grid), outlet))
        });
    }
    group.finish();
}

criterion_group!(benches, bench_recursive, bench_top_down, bench_double_drop);
criterion_main!(benches);
