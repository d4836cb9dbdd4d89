//! Benchmark for path queries on generated boards.
//!
//! Run with: cargo bench --package hexvale_traversal --bench path_benchmark

use criterion::{black_box, criterion_group, criterion_main, Criterion};
use hexvale_procedural::{generate, HexBoard, TerrainConfig, TileCoord};
use hexvale_traversal::HexWorld;

fn benchmark_flat_crossing(c: &mut Criterion) {
    let world = HexWorld::new(HexBoard::new(40, 20));
    let start = TileCoord::new(0, 40);
    let goal = TileCoord::new(80, 40);

    c.bench_function("flat_radius40_crossing", |b| {
        b.iter(|| black_box(world.find_path(black_box(start), black_box(goal))));
    });
}

fn benchmark_generated_board(c: &mut Criterion) {
    let Ok(terrain) = generate(&TerrainConfig::with_seed("bench")) else {
        return;
    };
    let world = HexWorld::from_terrain(terrain);
    let start = TileCoord::new(20, 40);
    let goal = TileCoord::new(40, 20);

    c.bench_function("generated_radius40_query", |b| {
        b.iter(|| black_box(world.find_path(black_box(start), black_box(goal))));
    });
}

criterion_group!(benches, benchmark_flat_crossing, benchmark_generated_board);
criterion_main!(benches);
