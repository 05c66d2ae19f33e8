//! Minecraft block constants and the block taxonomy used by safe-location
//! search.
//!
//! BlockId values are MC block state IDs (from azalea-block), so they can be
//! used directly in protocol chunk data without any mapping layer.

use std::collections::HashMap;
use std::sync::LazyLock;

use azalea_block::{BlockState, BlockTrait};
use safespot_engine::world::block::{BlockId, BlockTraits};

// -- MC block state IDs (from azalea-block for MC 1.21.11) --

pub const AIR: BlockId = BlockId(0);
pub const STONE: BlockId = BlockId(1);
pub const GRASS_BLOCK: BlockId = BlockId(9); // snowy=false
pub const DIRT: BlockId = BlockId(10);
pub const BEDROCK: BlockId = BlockId(85);
pub const WATER: BlockId = BlockId(86); // level=0
pub const LAVA: BlockId = BlockId(102); // level=0
pub const SAND: BlockId = BlockId(118);

/// One block state: its name (without the `minecraft:` prefix) and properties.
struct StateEntry {
    id: u16,
    properties: Vec<(String, String)>,
}

/// Every state, grouped by block name, in ascending state id.
static STATES_BY_NAME: LazyLock<HashMap<String, Vec<StateEntry>>> = LazyLock::new(|| {
    let mut map: HashMap<String, Vec<StateEntry>> = HashMap::new();
    for id in 0..=BlockState::MAX_STATE {
        let Ok(state) = BlockState::try_from(id as u32) else {
            continue;
        };
        let block: Box<dyn BlockTrait> = Box::<dyn BlockTrait>::from(state);
        let properties = block
            .property_map()
            .into_iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        map.entry(block.id().to_string())
            .or_default()
            .push(StateEntry { id, properties });
    }
    map
});

/// Traits for every state id, computed once.
static TRAITS: LazyLock<Vec<BlockTraits>> = LazyLock::new(|| {
    let mut table = vec![BlockTraits::empty(); BlockState::MAX_STATE as usize + 1];
    for (name, states) in STATES_BY_NAME.iter() {
        for state in states {
            table[state.id as usize] = traits_for(name, &state.properties);
        }
    }
    table
});

/// Classify a block state. Ids outside the registry count as solid.
///
/// Matches [`safespot_engine::world::block::ClassifyFn`].
pub fn classify(id: BlockId) -> BlockTraits {
    TRAITS.get(id.0 as usize).copied().unwrap_or_default()
}

/// The lowest state id for `name` whose properties include every pair in
/// `properties`. `name` may carry the `minecraft:` prefix.
pub fn lookup(name: &str, properties: &[(&str, &str)]) -> Option<BlockId> {
    let name = name.strip_prefix("minecraft:").unwrap_or(name);
    STATES_BY_NAME.get(name)?.iter().find_map(|state| {
        let matches = properties.iter().all(|(key, value)| {
            state
                .properties
                .iter()
                .any(|(k, v)| k == key && v == value)
        });
        matches.then_some(BlockId(state.id))
    })
}

/// Block name for a state id (e.g. `"stone"`), if the id is registered.
pub fn name_of(id: BlockId) -> Option<String> {
    let state = BlockState::try_from(id.0 as u32).ok()?;
    let block: Box<dyn BlockTrait> = Box::<dyn BlockTrait>::from(state);
    Some(block.id().to_string())
}

fn property<'a>(properties: &'a [(String, String)], key: &str) -> Option<&'a str> {
    properties
        .iter()
        .find(|(k, _)| k == key)
        .map(|(_, v)| v.as_str())
}

fn traits_for(name: &str, properties: &[(String, String)]) -> BlockTraits {
    let mut traits = BlockTraits::empty();
    let is_open = property(properties, "open") == Some("true");
    let is_lit = property(properties, "lit") == Some("true");

    if is_passable(name) || (is_openable(name) && is_open) {
        traits |= BlockTraits::PASSABLE;
    }
    if is_liquid(name) || property(properties, "waterlogged") == Some("true") {
        traits |= BlockTraits::LIQUID;
    }
    if is_harmful(name) || (name.ends_with("campfire") && is_lit) {
        traits |= BlockTraits::HARMFUL;
    }
    if matches!(name, "nether_portal" | "end_portal" | "end_gateway") {
        traits |= BlockTraits::PORTAL;
    }
    if matches!(name, "air" | "cave_air" | "void_air") {
        traits |= BlockTraits::AIR;
    }
    traits
}

fn is_passable(name: &str) -> bool {
    matches!(
        name,
        "air"
            | "cave_air"
            | "void_air"
            | "light"
            | "structure_void"
            | "short_grass"
            | "tall_grass"
            | "fern"
            | "large_fern"
            | "dead_bush"
            | "vine"
            | "glow_lichen"
            | "sculk_vein"
            | "cobweb"
            | "ladder"
            | "lever"
            | "redstone_wire"
            | "tripwire"
            | "tripwire_hook"
            | "sugar_cane"
            | "wheat"
            | "carrots"
            | "potatoes"
            | "beetroots"
            | "sweet_berry_bush"
            | "nether_sprouts"
            | "crimson_roots"
            | "warped_roots"
            | "hanging_roots"
            | "spore_blossom"
            | "pink_petals"
            | "dandelion"
            | "poppy"
            | "blue_orchid"
            | "allium"
            | "azure_bluet"
            | "oxeye_daisy"
            | "cornflower"
            | "lily_of_the_valley"
            | "wither_rose"
            | "torchflower"
            | "sunflower"
            | "lilac"
            | "rose_bush"
            | "peony"
            | "brown_mushroom"
            | "red_mushroom"
            | "fire"
            | "soul_fire"
            | "nether_portal"
            | "end_portal"
            | "end_gateway"
    ) || name.ends_with("_sapling")
        || name.ends_with("torch")
        || name.ends_with("_sign")
        || name.ends_with("_button")
        || name.ends_with("_pressure_plate")
        || name.ends_with("_banner")
        || name.ends_with("_tulip")
        || name.ends_with("rail")
        || name.ends_with("_vines")
        || name.ends_with("_vines_plant")
}

/// Doors, trapdoors and gates: passable only while open.
fn is_openable(name: &str) -> bool {
    name.ends_with("_door") || name.ends_with("_trapdoor") || name.ends_with("_fence_gate")
}

fn is_liquid(name: &str) -> bool {
    matches!(
        name,
        "water" | "lava" | "bubble_column" | "kelp" | "kelp_plant" | "seagrass" | "tall_seagrass"
    )
}

fn is_harmful(name: &str) -> bool {
    matches!(
        name,
        "lava"
            | "fire"
            | "soul_fire"
            | "cactus"
            | "magma_block"
            | "sweet_berry_bush"
            | "wither_rose"
            | "powder_snow"
            | "pointed_dripstone"
    )
}
