//! Safe-location search tests against the in-memory world, using a tiny
//! opaque block palette so no game layer is involved.

use safespot_engine::teleport::{
    self, Kernel, SafetyKernel, SearchOutcome, SearchParams, TeleportError,
};
use safespot_engine::world::block::{BlockId, BlockInfo, BlockTraits};
use safespot_engine::world::chunk::Chunk;
use safespot_engine::world::position::{BlockPos, ChunkPos};
use safespot_engine::world::view::{BlockView, ViewError, WorldView};
use safespot_engine::world::World;

// ---------------------------------------------------------------------------
// Palette + helpers
// ---------------------------------------------------------------------------

const AIR: BlockId = BlockId::AIR;
const STONE: BlockId = BlockId(1);
const WATER: BlockId = BlockId(2);
const LAVA: BlockId = BlockId(3);
const CACTUS: BlockId = BlockId(4);
const PORTAL: BlockId = BlockId(5);
const FLOWER: BlockId = BlockId(6);
const CAVE_AIR: BlockId = BlockId(7);
const VINE: BlockId = BlockId(8);

fn classify(id: BlockId) -> BlockTraits {
    match id {
        AIR | FLOWER | VINE => BlockTraits::PASSABLE,
        CAVE_AIR => BlockTraits::PASSABLE | BlockTraits::AIR,
        WATER => BlockTraits::LIQUID,
        LAVA => BlockTraits::LIQUID | BlockTraits::HARMFUL,
        CACTUS => BlockTraits::HARMFUL,
        PORTAL => BlockTraits::PASSABLE | BlockTraits::PORTAL,
        _ => BlockTraits::empty(),
    }
}

/// A world with every chunk in x/z -32..32 loaded (and empty).
fn loaded_world() -> World {
    let world = World::new();
    for cx in -2..2 {
        for cz in -2..2 {
            world.insert_chunk(ChunkPos::new(cx, cz), Chunk::new());
        }
    }
    world
}

fn fill(world: &World, min: (i64, i64, i64), max: (i64, i64, i64), block: BlockId) {
    for x in min.0..=max.0 {
        for y in min.1..=max.1 {
            for z in min.2..=max.2 {
                world.set_block(BlockPos::new(x, y, z), block);
            }
        }
    }
}

/// Loaded world with a stone floor at y=9 over x/z -12..=12.
fn floor_world() -> World {
    let world = loaded_world();
    fill(&world, (-12, 9, -12), (12, 9, 12), STONE);
    world
}

fn search(world: &World, params: SearchParams, kernel: Kernel) -> SearchOutcome {
    let view = WorldView::new(world, classify);
    teleport::find_safe_location(&view, &params, &kernel).unwrap()
}

fn origin() -> BlockPos {
    BlockPos::new(0, 10, 0)
}

// ---------------------------------------------------------------------------
// Origin handling
// ---------------------------------------------------------------------------

#[test]
fn safe_origin_is_returned_unchanged() {
    let world = floor_world();
    for kernel in Kernel::ALL {
        let outcome = search(&world, SearchParams::new(origin()), kernel);
        assert_eq!(outcome, SearchOutcome::Found(origin()), "kernel {kernel}");
    }
}

#[test]
fn default_entry_point_uses_default_kernel() {
    let world = floor_world();
    let view = WorldView::new(&world, classify);
    let outcome = teleport::find_safe_location_default(&view, origin()).unwrap();
    assert_eq!(outcome.found(), Some(origin()));
}

#[test]
fn zero_radii_only_check_the_origin() {
    let world = floor_world();
    let point = SearchParams::new(origin()).height(0).width(0);
    assert_eq!(search(&world, point, Kernel::Default), SearchOutcome::Found(origin()));

    // Block the origin; an open neighbour one block away must not be used.
    world.set_block(origin(), STONE);
    assert_eq!(search(&world, point, Kernel::Default), SearchOutcome::NotFound);
    assert!(search(&world, point.width(1), Kernel::Default).is_found());
}

// ---------------------------------------------------------------------------
// Scan order
// ---------------------------------------------------------------------------

#[test]
fn nearest_ring_wins_over_farther_safe_blocks() {
    let world = loaded_world();
    // Solid cube around the origin, with a single open pocket two blocks away.
    fill(&world, (-2, 5, -2), (2, 15, 2), STONE);
    fill(&world, (0, 10, 2), (0, 11, 2), AIR);
    // A farther pocket on the same level and a nearer one on the level above.
    fill(&world, (2, 10, -2), (2, 11, -2), AIR);
    fill(&world, (0, 11, 1), (0, 12, 1), AIR);

    let params = SearchParams::new(origin()).width(2);
    assert_eq!(
        search(&world, params, Kernel::Default),
        SearchOutcome::Found(BlockPos::new(0, 10, 2))
    );
}

#[test]
fn same_ring_ties_break_by_ascending_x_then_z() {
    let world = floor_world();
    world.set_block(origin(), STONE);

    let found = search(&world, SearchParams::new(origin()), Kernel::Default);
    assert_eq!(found, SearchOutcome::Found(BlockPos::new(-1, 10, -1)));
}

#[test]
fn repeated_searches_are_deterministic() {
    let world = patterned_world();
    let view = WorldView::new(&world, classify);
    let params = SearchParams::new(BlockPos::new(3, 12, -4)).height(4).width(6);

    let first = teleport::find_safe_location(&view, &params, &Kernel::Default).unwrap();
    for _ in 0..5 {
        let again = teleport::find_safe_location(&view, &params, &Kernel::Default).unwrap();
        assert_eq!(again, first);
    }
}

/// Mixed terrain with no structure beyond a fixed arithmetic pattern.
fn patterned_world() -> World {
    let world = loaded_world();
    let palette = [AIR, STONE, AIR, WATER, LAVA, AIR, CACTUS, FLOWER, AIR, STONE];
    for x in -20..20i64 {
        for y in 0..24i64 {
            for z in -20..20i64 {
                let idx = (x * 7 + y * 13 + z * 5).rem_euclid(palette.len() as i64);
                world.set_block(BlockPos::new(x, y, z), palette[idx as usize]);
            }
        }
    }
    world
}

#[test]
fn results_stay_inside_the_search_box() {
    let world = patterned_world();
    let view = WorldView::new(&world, classify);

    let mut found = 0;
    for x in (-8..8).step_by(3) {
        for z in (-8..8).step_by(3) {
            for y in [4, 9, 15] {
                let params = SearchParams::new(BlockPos::new(x, y, z)).height(2).width(3);
                for kernel in Kernel::ALL {
                    let outcome = teleport::find_safe_location(&view, &params, &kernel).unwrap();
                    if let SearchOutcome::Found(pos) = outcome {
                        found += 1;
                        assert!(params.contains(pos), "{pos} escaped box around {}", params.origin);
                    }
                }
            }
        }
    }
    assert!(found > 0, "pattern produced no safe spots at all");
}

// ---------------------------------------------------------------------------
// Floor handling
// ---------------------------------------------------------------------------

#[test]
fn zero_drop_requires_an_immediate_floor() {
    let world = loaded_world();
    // Floor two blocks under the origin.
    world.set_block(BlockPos::new(0, 8, 0), STONE);

    let params = SearchParams::new(origin()).height(0).width(0).max_drop(0);
    assert_eq!(search(&world, params, Kernel::Default), SearchOutcome::NotFound);
}

#[test]
fn drop_distance_settles_onto_lower_floor() {
    let world = loaded_world();
    // Origin column: floor two below the origin.
    world.set_block(BlockPos::new(0, 9, 0), STONE);
    // A ledge that only a higher candidate can stand on.
    world.set_block(BlockPos::new(1, 11, 1), STONE);
    let origin = BlockPos::new(0, 11, 0);
    let params = SearchParams::new(origin).height(1).width(1);

    assert_eq!(
        search(&world, params.max_drop(2), Kernel::Default),
        SearchOutcome::Found(BlockPos::new(0, 10, 0))
    );
    assert_eq!(
        search(&world, params.max_drop(0), Kernel::Default),
        SearchOutcome::Found(BlockPos::new(1, 12, 1))
    );
}

#[test]
fn descent_does_not_fall_through_harmful_blocks() {
    let world = loaded_world();
    world.set_block(BlockPos::new(0, 9, 0), CACTUS);
    world.set_block(BlockPos::new(0, 8, 0), STONE);

    let params = SearchParams::new(origin()).height(2).width(0).max_drop(3);
    // Standing on the cactus is unsafe, and so is falling past it; the only
    // other candidates in the column are above it.
    assert_eq!(search(&world, params, Kernel::Default), SearchOutcome::NotFound);
}

#[test]
fn water_counts_as_floor() {
    let world = loaded_world();
    fill(&world, (-3, 6, -3), (3, 9, 3), WATER);
    assert_eq!(
        search(&world, SearchParams::new(origin()), Kernel::Default),
        SearchOutcome::Found(origin())
    );
}

#[test]
fn all_lava_is_not_found_rather_than_an_error() {
    let world = loaded_world();
    fill(&world, (-4, 5, -4), (4, 15, 4), LAVA);

    let params = SearchParams::new(origin()).height(2).width(3);
    for kernel in Kernel::ALL {
        assert_eq!(search(&world, params, kernel), SearchOutcome::NotFound, "kernel {kernel}");
    }
}

// ---------------------------------------------------------------------------
// Kernel behaviour
// ---------------------------------------------------------------------------

#[test]
fn no_portal_skips_portal_bodies() {
    let world = floor_world();
    world.set_block(origin(), PORTAL);

    assert_eq!(
        search(&world, SearchParams::new(origin()), Kernel::Default),
        SearchOutcome::Found(origin())
    );
    assert_eq!(
        search(&world, SearchParams::new(origin()), Kernel::NoPortal),
        SearchOutcome::Found(BlockPos::new(-1, 10, -1))
    );
}

#[test]
fn no_portal_skips_candidates_resting_on_a_portal() {
    let world = floor_world();
    // Replace the floor under the origin with a portal sitting on stone.
    world.set_block(BlockPos::new(0, 9, 0), PORTAL);
    world.set_block(BlockPos::new(0, 8, 0), STONE);

    let params = SearchParams::new(origin()).height(1);
    assert_eq!(
        search(&world, params, Kernel::Default),
        SearchOutcome::Found(BlockPos::new(0, 9, 0))
    );
    assert_eq!(
        search(&world, params, Kernel::NoPortal),
        SearchOutcome::Found(BlockPos::new(-1, 10, -1))
    );
}

#[test]
fn surface_only_requires_open_sky() {
    let world = floor_world();
    world.set_block(BlockPos::new(0, 20, 0), STONE);

    assert_eq!(
        search(&world, SearchParams::new(origin()), Kernel::Default),
        SearchOutcome::Found(origin())
    );
    assert_eq!(
        search(&world, SearchParams::new(origin()), Kernel::SurfaceOnly),
        SearchOutcome::Found(BlockPos::new(-1, 10, -1))
    );
}

#[test]
fn flying_needs_no_floor_but_avoids_cactus() {
    let world = loaded_world();
    let params = SearchParams::new(origin()).height(1).width(1);

    assert_eq!(search(&world, params, Kernel::Flying), SearchOutcome::Found(origin()));
    assert_eq!(search(&world, params, Kernel::Default), SearchOutcome::NotFound);

    world.set_block(BlockPos::new(0, 9, 0), CACTUS);
    assert_eq!(
        search(&world, params, Kernel::Flying),
        SearchOutcome::Found(BlockPos::new(-1, 10, -1))
    );
}

#[test]
fn flying_swims_through_water() {
    let world = loaded_world();
    fill(&world, (-1, 5, -1), (1, 15, 1), WATER);
    let params = SearchParams::new(origin()).height(0).width(0);
    assert_eq!(search(&world, params, Kernel::Flying), SearchOutcome::Found(origin()));
    assert_eq!(search(&world, params, Kernel::Default), SearchOutcome::NotFound);
}

#[test]
fn flying_treats_classified_air_like_air() {
    let world = loaded_world();
    fill(&world, (-2, 8, -2), (2, 12, 2), CAVE_AIR);
    let params = SearchParams::new(origin()).height(1).width(1);

    assert_eq!(search(&world, params, Kernel::Flying), SearchOutcome::Found(origin()));
}

#[test]
fn surface_only_checks_where_the_drop_lands() {
    let world = loaded_world();
    fill(&world, (-12, 8, -12), (12, 8, 12), STONE);
    // Hanging vine: standing in it is fine, but it shades the block below.
    world.set_block(origin(), VINE);
    let view = WorldView::new(&world, classify);

    assert_eq!(
        search(&world, SearchParams::new(origin()), Kernel::Default),
        SearchOutcome::Found(BlockPos::new(0, 9, 0))
    );
    assert!(!view.can_see_sky(BlockPos::new(0, 9, 0)).unwrap());

    let landing = BlockPos::new(-1, 9, -1);
    assert_eq!(
        search(&world, SearchParams::new(origin()), Kernel::SurfaceOnly),
        SearchOutcome::Found(landing)
    );
    assert!(view.can_see_sky(landing).unwrap());
}

/// Only stands on stone, and only with flowers (or air) for a body.
struct Gardener;

impl SafetyKernel for Gardener {
    fn is_body_block(&self, block: BlockInfo) -> bool {
        block.id == FLOWER || block.is_air()
    }

    fn is_floor_block(&self, block: BlockInfo) -> bool {
        block.id == STONE
    }

    fn excludes(&self, view: &dyn BlockView, pos: BlockPos) -> Result<bool, ViewError> {
        Ok(view.block_at(pos)?.id != FLOWER)
    }
}

#[test]
fn custom_kernels_plug_into_the_same_scan() {
    let world = floor_world();
    world.set_block(BlockPos::new(1, 10, 0), FLOWER);
    let view = WorldView::new(&world, classify);

    let kernel: &dyn SafetyKernel = &Gardener;
    let outcome =
        teleport::find_safe_location(&view, &SearchParams::new(origin()), kernel).unwrap();
    assert_eq!(outcome, SearchOutcome::Found(BlockPos::new(1, 10, 0)));
}

// ---------------------------------------------------------------------------
// Errors and bounds
// ---------------------------------------------------------------------------

#[test]
fn negative_radius_is_rejected_before_scanning() {
    // No chunks at all: a scan would fail with ChunkNotLoaded instead.
    let world = World::new();
    let view = WorldView::new(&world, classify);
    let params = SearchParams::new(origin()).width(-1);
    assert_eq!(
        teleport::find_safe_location(&view, &params, &Kernel::Default),
        Err(TeleportError::NegativeRadius { height: 3, width: -1 })
    );
}

#[test]
fn unloaded_chunks_surface_as_errors() {
    let world = World::new();
    let view = WorldView::new(&world, classify);
    let result = teleport::find_safe_location_default(&view, origin());
    assert_eq!(
        result,
        Err(TeleportError::View(ViewError::ChunkNotLoaded(ChunkPos::new(0, 0))))
    );
}

#[test]
fn unloaded_neighbour_is_an_error_when_reached() {
    let world = floor_world();
    world.set_block(origin(), STONE);
    world.unload_chunk(ChunkPos::new(-1, -1));
    let view = WorldView::new(&world, classify);

    let result = teleport::find_safe_location_default(&view, origin());
    assert!(matches!(
        result,
        Err(TeleportError::View(ViewError::ChunkNotLoaded(_)))
    ));
}

#[test]
fn vertical_bounds_clamp_candidates() {
    let world = loaded_world();
    fill(&world, (-1, 0, -1), (1, 10, 1), STONE);
    let params = SearchParams::new(origin()).height(2).width(0);

    let unbounded = WorldView::new(&world, classify);
    assert_eq!(
        teleport::find_safe_location(&unbounded, &params, &Kernel::Default).unwrap(),
        SearchOutcome::Found(BlockPos::new(0, 11, 0))
    );

    let capped = WorldView::new(&world, classify).with_bounds(0, 10);
    assert_eq!(
        teleport::find_safe_location(&capped, &params, &Kernel::Default).unwrap(),
        SearchOutcome::NotFound
    );
}

#[test]
fn extreme_origins_scan_without_overflow() {
    let world = floor_world();
    let unbounded = WorldView::new(&world, classify);
    let bounded = WorldView::new(&world, classify).with_bounds(-64, 319);

    for y in [i64::MAX, i64::MIN] {
        let origin = BlockPos::new(0, y, 0);
        for view in [&unbounded, &bounded] {
            assert_eq!(
                teleport::find_safe_location_default(view, origin),
                Ok(SearchOutcome::NotFound),
                "origin {origin}"
            );
        }
    }

    let east = BlockPos::new(i64::MAX, 10, 0);
    assert_eq!(
        teleport::find_safe_location_default(&unbounded, east),
        Err(TeleportError::View(ViewError::ChunkNotLoaded(ChunkPos::new(i64::MAX >> 4, 0))))
    );
}

#[test]
fn far_origins_do_not_alias_onto_loaded_chunks() {
    let world = floor_world();
    let view = WorldView::new(&world, classify);
    // 2^36 blocks east is chunk 2^32, which would wrap to 0 in 32 bits.
    let far = BlockPos::new(1 << 36, 10, 0);
    assert_eq!(
        teleport::find_safe_location_default(&view, far),
        Err(TeleportError::View(ViewError::ChunkNotLoaded(ChunkPos::new(1 << 32, 0))))
    );
}

#[test]
fn sky_visibility_follows_column_contents() {
    let world = floor_world();
    world.set_block(BlockPos::new(2, 30, 2), STONE);
    let view = WorldView::new(&world, classify);

    assert!(view.can_see_sky(origin()).unwrap());
    assert!(!view.can_see_sky(BlockPos::new(2, 10, 2)).unwrap());
    assert!(view.can_see_sky(BlockPos::new(2, 30, 2)).unwrap());

    // Classified air is see-through, other passable blocks are not.
    world.set_block(BlockPos::new(0, 25, 0), CAVE_AIR);
    assert!(view.can_see_sky(origin()).unwrap());
    world.set_block(BlockPos::new(0, 25, 0), VINE);
    assert!(!view.can_see_sky(origin()).unwrap());
    assert_eq!(
        view.can_see_sky(BlockPos::new(100, 10, 100)),
        Err(ViewError::ChunkNotLoaded(ChunkPos::new(6, 6)))
    );
}

// ---------------------------------------------------------------------------
// Batch search
// ---------------------------------------------------------------------------

#[test]
fn batch_matches_individual_searches_in_order() {
    let world = patterned_world();
    let view = WorldView::new(&world, classify);

    let queries: Vec<SearchParams> = (-10..10i64)
        .map(|i| SearchParams::new(BlockPos::new(i, 8 + i.rem_euclid(5), -i)).height(2).width(4))
        .collect();

    let batch = teleport::find_many(&view, &queries, &Kernel::Default);
    assert_eq!(batch.len(), queries.len());
    for (params, result) in queries.iter().zip(batch) {
        let single = teleport::find_safe_location(&view, params, &Kernel::Default);
        assert_eq!(result, single);
    }
}
