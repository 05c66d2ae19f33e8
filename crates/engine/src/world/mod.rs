pub mod block;
pub mod chunk;
pub mod position;
pub mod view;

use block::BlockId;
use chunk::Chunk;
use dashmap::DashMap;
use position::{BlockPos, ChunkPos};

/// The entire block world. Thread-safe, lock-sharded by chunk.
///
/// This is the raw spatial store. It knows nothing about what block ids mean;
/// [`view::WorldView`] pairs it with a classifier so searches can ask
/// "is this passable / harmful / a portal".
pub struct World {
    chunks: DashMap<ChunkPos, Chunk>,
}

impl World {
    pub fn new() -> Self {
        Self {
            chunks: DashMap::new(),
        }
    }

    /// Read a block at an absolute position. Returns AIR for unloaded chunks.
    pub fn get_block(&self, pos: BlockPos) -> BlockId {
        self.try_get_block(pos).unwrap_or(BlockId::AIR)
    }

    /// Read a block, distinguishing "unloaded" (`None`) from a loaded air block.
    pub fn try_get_block(&self, pos: BlockPos) -> Option<BlockId> {
        self.chunks
            .get(&pos.chunk())
            .map(|chunk| chunk.get_block(pos.local()))
    }

    /// Write a block at an absolute position. Creates the chunk if needed.
    ///
    /// Takes `&self` (not `&mut self`) because `DashMap` provides interior
    /// mutability via per-shard locking.
    pub fn set_block(&self, pos: BlockPos, block: BlockId) {
        self.chunks
            .entry(pos.chunk())
            .or_default()
            .set_block(pos.local(), block);
    }

    /// Y of the highest non-air block in the column through `pos`.
    ///
    /// `None` if the chunk is unloaded; `Some(None)` if the column is empty.
    pub fn column_top(&self, pos: BlockPos) -> Option<Option<i64>> {
        self.column_top_where(pos, |id| id != BlockId::AIR)
    }

    /// [`column_top`](Self::column_top), counting only blocks that satisfy
    /// `solid`.
    pub fn column_top_where(
        &self,
        pos: BlockPos,
        solid: impl Fn(BlockId) -> bool,
    ) -> Option<Option<i64>> {
        let local = pos.local();
        self.chunks
            .get(&pos.chunk())
            .map(|chunk| chunk.highest_block_where(local.x, local.z, solid))
    }

    pub fn has_chunk(&self, pos: ChunkPos) -> bool {
        self.chunks.contains_key(&pos)
    }

    /// Insert a chunk (used for generation/loading).
    pub fn insert_chunk(&self, pos: ChunkPos, chunk: Chunk) {
        self.chunks.insert(pos, chunk);
    }

    /// Drop a chunk from memory. Subsequent reads inside it report "unloaded".
    pub fn unload_chunk(&self, pos: ChunkPos) -> Option<Chunk> {
        self.chunks.remove(&pos).map(|(_, chunk)| chunk)
    }

    pub fn chunk_count(&self) -> usize {
        self.chunks.len()
    }
}

impl Default for World {
    fn default() -> Self {
        Self::new()
    }
}
