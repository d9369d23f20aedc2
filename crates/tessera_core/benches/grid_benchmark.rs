//! # Spatial Grid Benchmark
//!
//! Relocation churn and per-cell pair iteration.
//!
//! Run with: `cargo bench --package tessera_core --bench grid_benchmark`

// Benchmarks don't need docs
#![allow(missing_docs)]

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use tessera_core::{GridConfig, IdSequence, Occupant, Position, SpatialGrid};

const CONFIG: GridConfig = GridConfig {
    cell_size: 20.0,
    num_cells: 50,
};

/// Lays `count` occupants out on a deterministic lattice.
fn populate(count: usize) -> (SpatialGrid, Vec<Occupant>) {
    let mut grid = SpatialGrid::new(CONFIG);
    let mut ids = IdSequence::new();
    let extent = CONFIG.extent();
    let occupants: Vec<Occupant> = (0..count)
        .map(|i| {
            let x = (i as f64 * 7.3) % extent;
            let y = (i as f64 * 13.1) % extent;
            Occupant::new(ids.next_id().unwrap(), Position::new(x, y))
        })
        .collect();
    for occupant in &occupants {
        grid.place(occupant).unwrap();
    }
    (grid, occupants)
}

/// Benchmark: Move every occupant by a small step, wrapping at the edge.
fn bench_relocate(c: &mut Criterion) {
    let mut group = c.benchmark_group("grid_relocate_all");

    for count in [100usize, 1_000, 10_000] {
        group.bench_with_input(BenchmarkId::from_parameter(count), &count, |b, &count| {
            let (mut grid, mut occupants) = populate(count);
            let extent = CONFIG.extent();
            b.iter(|| {
                for occupant in &mut occupants {
                    let to = Position::new(
                        (occupant.position.x + 3.0) % extent,
                        (occupant.position.y + 1.5) % extent,
                    );
                    black_box(grid.move_occupant(occupant, to).unwrap());
                }
            });
        });
    }

    group.finish();
}

/// Benchmark: Count all same-cell pairs.
fn bench_cell_pairs(c: &mut Criterion) {
    let mut group = c.benchmark_group("grid_cell_pairs");

    for count in [100usize, 1_000, 10_000] {
        group.bench_with_input(BenchmarkId::from_parameter(count), &count, |b, &count| {
            let (grid, _) = populate(count);
            b.iter(|| {
                let mut pairs = 0u64;
                grid.for_each_cell_pair(|_, _| pairs += 1);
                black_box(pairs)
            });
        });
    }

    group.finish();
}

criterion_group!(benches, bench_relocate, bench_cell_pairs);
criterion_main!(benches);
