use std::path::PathBuf;
use std::time::Instant;

use anyhow::{Context, Result};
use safespot_engine::teleport::{Kernel, SearchParams};
use safespot_engine::world::World;
use safespot_engine::world::position::BlockPos;
use safespot_engine::world::view::WorldView;
use safespot_server::config::Config;
use safespot_server::{block, query, worldgen};

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".parse().unwrap()),
        )
        .init();

    let args: Vec<String> = std::env::args().skip(1).collect();
    if let Err(e) = run(&args) {
        tracing::error!("{:#}", e);
        std::process::exit(1);
    }
}

/// Value following `flag`, if present.
fn flag_value<'a>(args: &'a [String], flag: &str) -> Option<&'a str> {
    args.iter()
        .skip_while(|a| *a != flag)
        .nth(1)
        .map(String::as_str)
}

/// Every value following an occurrence of a repeatable `flag`.
fn flag_values<'a>(args: &'a [String], flag: &str) -> Vec<&'a str> {
    args.windows(2)
        .filter(|w| w[0] == flag)
        .map(|w| w[1].as_str())
        .collect()
}

fn int_flag(args: &[String], flag: &str) -> Result<Option<i32>> {
    flag_value(args, flag)
        .map(|v| v.parse().with_context(|| format!("{flag} expects an integer, got {v:?}")))
        .transpose()
}

fn run(args: &[String]) -> Result<()> {
    let demo_mode = args.iter().any(|a| a == "--demo");
    let json = args.iter().any(|a| a == "--json");
    let config_path = flag_value(args, "--config").map(PathBuf::from);

    let mut config = Config::load(config_path.as_deref())?;
    if let Some(kernel) = flag_value(args, "--kernel") {
        config.search.kernel = kernel.to_string();
    }
    if let Some(height) = int_flag(args, "--height")? {
        config.search.height = height;
    }
    if let Some(width) = int_flag(args, "--width")? {
        config.search.width = width;
    }
    if let Some(max_drop) = int_flag(args, "--max-drop")? {
        config.search.max_drop = max_drop;
    }
    config.validate()?;

    tracing::info!("Safespot -- nearest safe location finder");

    // ── Build the world ──────────────────────────────────────────────────
    let world = World::new();
    let t0 = Instant::now();
    worldgen::generate_flat(&world, &config.world);
    tracing::info!(
        "Generated flat world: {} chunks in {:?}",
        world.chunk_count(),
        t0.elapsed()
    );

    let spawn = BlockPos::new(0, config.world.surface_y + 1, 0);
    let mut origins = flag_values(args, "--at")
        .into_iter()
        .map(query::parse_pos)
        .collect::<Result<Vec<_>>>()?;

    let kernels = if demo_mode {
        let landmarks = worldgen::carve_demo(&world, spawn);
        for landmark in &landmarks {
            tracing::info!("Demo landmark '{}' at {}", landmark.name, landmark.pos);
        }
        origins.extend(landmarks.iter().map(|l| l.pos));
        // Unless one was asked for, show how each kernel sees the landmarks.
        match flag_value(args, "--kernel") {
            Some(_) => vec![config.search.kernel()?],
            None => Kernel::ALL.to_vec(),
        }
    } else {
        vec![config.search.kernel()?]
    };
    if origins.is_empty() {
        origins.push(spawn);
    }

    // ── Answer queries ───────────────────────────────────────────────────
    let view = WorldView::new(&world, block::classify)
        .with_bounds(config.world.min_y, config.world.max_y);
    let queries: Vec<SearchParams> = origins
        .iter()
        .map(|&origin| config.search.params(origin))
        .collect();

    for kernel in kernels {
        let t0 = Instant::now();
        let reports = query::run(&view, &queries, kernel);
        tracing::info!(
            "{} queries with kernel {} in {:?}",
            reports.len(),
            kernel,
            t0.elapsed()
        );
        for report in &reports {
            if json {
                println!("{}", serde_json::to_string(report)?);
            } else {
                println!("{}", report.to_line());
            }
        }
    }

    Ok(())
}
