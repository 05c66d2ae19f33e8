//! Generated worlds for the CLI and benchmarks.

use safespot_engine::world::World;
use safespot_engine::world::chunk::Chunk;
use safespot_engine::world::position::{BlockPos, ChunkPos, LocalBlockPos};

use crate::block;
use crate::config::WorldConfig;

/// Flat world: bedrock at `min_y`, stone up to `surface_y - 4`, three layers
/// of dirt, grass at `surface_y`. Entities stand at `surface_y + 1`.
pub fn generate_flat(world: &World, config: &WorldConfig) {
    let surface = config.surface_y;
    for cx in -config.chunk_radius..config.chunk_radius {
        for cz in -config.chunk_radius..config.chunk_radius {
            let mut chunk = Chunk::new();
            for x in 0..16u8 {
                for z in 0..16u8 {
                    chunk.set_block(LocalBlockPos { x, y: config.min_y, z }, block::BEDROCK);
                    for y in config.min_y + 1..surface - 3 {
                        chunk.set_block(LocalBlockPos { x, y, z }, block::STONE);
                    }
                    for y in (surface - 3).max(config.min_y + 1)..surface {
                        chunk.set_block(LocalBlockPos { x, y, z }, block::DIRT);
                    }
                    chunk.set_block(LocalBlockPos { x, y: surface, z }, block::GRASS_BLOCK);
                }
            }
            world.insert_chunk(ChunkPos::new(cx.into(), cz.into()), chunk);
        }
    }
}

/// A named spot in the demo world and why it is interesting.
#[derive(Debug, Clone, Copy)]
pub struct Landmark {
    pub name: &'static str,
    pub pos: BlockPos,
}

/// Carve hazards into a flat world around `center` (a standing position on
/// the surface) and return the points worth querying.
///
/// Layout, east of the centre along +x:
/// - a 5x5 lava pool replacing the grass,
/// - a cactus patch,
/// - a lit nether portal standing on the surface,
/// - a stone overhang that hides the sky.
pub fn carve_demo(world: &World, center: BlockPos) -> Vec<Landmark> {
    let surface = center.y - 1;
    let mut landmarks = vec![Landmark {
        name: "open field",
        pos: center,
    }];

    let pool = center.offset(8, 0, 0);
    for dx in -2..=2 {
        for dz in -2..=2 {
            world.set_block(BlockPos::new(pool.x + dx, surface, pool.z + dz), block::LAVA);
        }
    }
    landmarks.push(Landmark {
        name: "lava pool",
        pos: pool,
    });

    let cactus = center.offset(14, 0, 0);
    if let Some(id) = block::lookup("cactus", &[]) {
        for dx in -1..=1 {
            for dz in -1..=1 {
                world.set_block(BlockPos::new(cactus.x + dx, cactus.y, cactus.z + dz), id);
            }
        }
        landmarks.push(Landmark {
            name: "cactus patch",
            pos: cactus,
        });
    }

    let portal = center.offset(20, 0, 0);
    if let Some(id) = block::lookup("nether_portal", &[("axis", "x")]) {
        for dy in 0..3 {
            world.set_block(portal.offset(0, dy, 0), id);
        }
        landmarks.push(Landmark {
            name: "nether portal",
            pos: portal,
        });
    }

    let overhang = center.offset(26, 0, 0);
    for dx in -2..=2 {
        for dz in -2..=2 {
            world.set_block(BlockPos::new(overhang.x + dx, overhang.y + 3, overhang.z + dz), block::STONE);
        }
    }
    landmarks.push(Landmark {
        name: "under overhang",
        pos: overhang,
    });

    landmarks
}
