//! Benchmark: sequential vs parallel safe-location queries.
//!
//! Buries query origins underground across a generated world so every search
//! has to climb to the surface, then compares a plain loop against
//! `teleport::find_many`.
//! Run with: `cargo run --release -p safespot-server --example bench_queries`

use std::time::Instant;

use safespot_engine::teleport::{self, Kernel, SearchParams};
use safespot_engine::world::World;
use safespot_engine::world::position::BlockPos;
use safespot_engine::world::view::WorldView;
use safespot_server::block;
use safespot_server::config::WorldConfig;
use safespot_server::worldgen;

fn main() {
    let config = WorldConfig {
        min_y: 0,
        max_y: 127,
        chunk_radius: 8,
        surface_y: 64,
    };
    let spacing = 4;
    // Three blocks under the grass: the first safe level is +4, past the
    // default height radius, so widen it.
    let depth = 3;

    println!("=== Safespot: Query Benchmark ===\n");

    let world = World::new();
    let t0 = Instant::now();
    worldgen::generate_flat(&world, &config);
    println!("  World: {} chunks generated in {:.2?}", world.chunk_count(), t0.elapsed());

    // Keep origins far enough from the edge that the scan box stays loaded.
    let edge = (config.chunk_radius as i64) * 16 - 10;
    let queries: Vec<SearchParams> = (-edge..edge)
        .step_by(spacing)
        .flat_map(|x| (-edge..edge).step_by(spacing).map(move |z| (x, z)))
        .map(|(x, z)| {
            SearchParams::new(BlockPos::new(x, config.surface_y - depth, z)).height(depth as i32 + 2)
        })
        .collect();
    println!("  {} queries, {} blocks below the surface\n", queries.len(), depth);

    let view = WorldView::new(&world, block::classify).with_bounds(config.min_y, config.max_y);
    let kernel = Kernel::Default;

    // --- Sequential ---
    let t0 = Instant::now();
    let seq: Vec<_> = queries
        .iter()
        .map(|params| teleport::find_safe_location(&view, params, &kernel))
        .collect();
    let dt_seq = t0.elapsed();
    println!("  Sequential: {:>8} queries in {:>8.2?}", seq.len(), dt_seq);

    // --- Parallel ---
    let t0 = Instant::now();
    let par = teleport::find_many(&view, &queries, &kernel);
    let dt_par = t0.elapsed();
    println!("  Parallel:   {:>8} queries in {:>8.2?}", par.len(), dt_par);

    let speedup = dt_seq.as_secs_f64() / dt_par.as_secs_f64();
    println!("\n  Speedup: {:.2}x", speedup);

    // --- Verify identical ---
    let mismatches = seq.iter().zip(&par).filter(|(a, b)| a != b).count();
    let found = par.iter().filter(|r| matches!(r, Ok(o) if o.is_found())).count();
    if mismatches == 0 {
        println!("  Verification: PASS ({} of {} found)", found, par.len());
    } else {
        println!("  Verification: FAIL ({} mismatches!)", mismatches);
    }
}
