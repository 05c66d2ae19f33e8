use super::block::BlockId;
use super::position::LocalBlockPos;
use std::collections::HashMap;

/// Number of blocks along each axis of a chunk section.
pub const SECTION_SIZE: usize = 16;
/// Total block count in one section.
const SECTION_VOLUME: usize = SECTION_SIZE * SECTION_SIZE * SECTION_SIZE;

/// A 16x16x16 cube of blocks.
///
/// Stored as a flat array in XZY order so that a column (fixed x/z) is a
/// strided walk over `y`, which is what floor and sky lookups do. A section
/// that is entirely air is never allocated (see `Chunk`).
#[derive(Clone)]
pub struct ChunkSection {
    blocks: Box<[BlockId; SECTION_VOLUME]>,
}

impl ChunkSection {
    pub fn new_filled(block: BlockId) -> Self {
        Self {
            blocks: Box::new([block; SECTION_VOLUME]),
        }
    }

    pub fn new_empty() -> Self {
        Self::new_filled(BlockId::AIR)
    }

    #[inline]
    const fn index(x: u8, y: u8, z: u8) -> usize {
        (y as usize) * SECTION_SIZE * SECTION_SIZE + (z as usize) * SECTION_SIZE + (x as usize)
    }

    #[inline]
    pub fn get(&self, x: u8, y: u8, z: u8) -> BlockId {
        self.blocks[Self::index(x, y, z)]
    }

    #[inline]
    pub fn set(&mut self, x: u8, y: u8, z: u8, block: BlockId) {
        self.blocks[Self::index(x, y, z)] = block;
    }

    pub fn is_empty(&self) -> bool {
        self.blocks.iter().all(|b| *b == BlockId::AIR)
    }

    /// Highest section-local y in column (x, z) whose block satisfies `solid`.
    fn top_in_column(&self, x: u8, z: u8, solid: &impl Fn(BlockId) -> bool) -> Option<u8> {
        (0..SECTION_SIZE as u8)
            .rev()
            .find(|&y| solid(self.get(x, y, z)))
    }
}

/// A column of chunk sections, keyed by section index (y >> 4).
///
/// Only non-empty sections are stored (sparse).
pub struct Chunk {
    sections: HashMap<i64, ChunkSection>,
}

impl Chunk {
    pub fn new() -> Self {
        Self {
            sections: HashMap::new(),
        }
    }

    pub fn get_block(&self, pos: LocalBlockPos) -> BlockId {
        let section_idx = pos.section_index();
        match self.sections.get(&section_idx) {
            Some(section) => section.get(pos.x, pos.section_local_y(), pos.z),
            None => BlockId::AIR,
        }
    }

    pub fn set_block(&mut self, pos: LocalBlockPos, block: BlockId) {
        let section_idx = pos.section_index();

        if block == BlockId::AIR {
            if let Some(section) = self.sections.get_mut(&section_idx) {
                section.set(pos.x, pos.section_local_y(), pos.z, block);
                if section.is_empty() {
                    self.sections.remove(&section_idx);
                }
            }
        } else {
            let section = self
                .sections
                .entry(section_idx)
                .or_insert_with(ChunkSection::new_empty);
            section.set(pos.x, pos.section_local_y(), pos.z, block);
        }
    }

    /// Absolute y of the highest non-air block in column (x, z), if any.
    ///
    /// Walks sections top-down, so a tall empty sky costs nothing: empty
    /// sections are never stored.
    pub fn highest_block(&self, x: u8, z: u8) -> Option<i64> {
        self.highest_block_where(x, z, |id| id != BlockId::AIR)
    }

    /// Absolute y of the highest block in column (x, z) for which `solid`
    /// holds. Lets callers skip ids that act as air without being `AIR`.
    pub fn highest_block_where(&self, x: u8, z: u8, solid: impl Fn(BlockId) -> bool) -> Option<i64> {
        let mut indices: Vec<i64> = self.sections.keys().copied().collect();
        indices.sort_unstable_by(|a, b| b.cmp(a));

        indices.into_iter().find_map(|idx| {
            self.sections[&idx]
                .top_in_column(x, z, &solid)
                .map(|local_y| idx * SECTION_SIZE as i64 + local_y as i64)
        })
    }

    pub fn section_count(&self) -> usize {
        self.sections.len()
    }
}

impl Default for Chunk {
    fn default() -> Self {
        Self::new()
    }
}
