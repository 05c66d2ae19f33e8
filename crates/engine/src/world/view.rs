//! Read-only, classified access to a world.
//!
//! [`BlockView`] is the only thing the safe-location search consumes. The
//! engine ships [`WorldView`] (over the in-memory [`World`]); game servers can
//! implement the trait over their own storage.

use std::ops::RangeInclusive;

use thiserror::Error;

use super::block::{BlockId, BlockInfo, ClassifyFn};
use super::position::{BlockPos, ChunkPos};
use super::World;

/// A read against the world could not be answered.
///
/// Never folded into "the block is unsafe": an unloaded region says nothing
/// about what is actually there.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ViewError {
    #[error("chunk {0:?} is not loaded")]
    ChunkNotLoaded(ChunkPos),
}

/// Classified, read-only block lookups.
pub trait BlockView {
    fn block_at(&self, pos: BlockPos) -> Result<BlockInfo, ViewError>;

    /// True when nothing but air lies strictly above `pos`.
    fn can_see_sky(&self, pos: BlockPos) -> Result<bool, ViewError>;

    /// The y range that may hold blocks. Searches never pick a position
    /// outside it.
    fn vertical_bounds(&self) -> RangeInclusive<i64> {
        i64::MIN..=i64::MAX
    }
}

impl<V: BlockView + ?Sized> BlockView for &V {
    fn block_at(&self, pos: BlockPos) -> Result<BlockInfo, ViewError> {
        (**self).block_at(pos)
    }

    fn can_see_sky(&self, pos: BlockPos) -> Result<bool, ViewError> {
        (**self).can_see_sky(pos)
    }

    fn vertical_bounds(&self) -> RangeInclusive<i64> {
        (**self).vertical_bounds()
    }
}

/// A [`BlockView`] over the engine's own [`World`].
///
/// Positions outside `min_y..=max_y` read as air (open sky above the build
/// limit, void below it) without touching the chunk map.
#[derive(Clone, Copy)]
pub struct WorldView<'w> {
    world: &'w World,
    classify: ClassifyFn,
    min_y: i64,
    max_y: i64,
}

impl<'w> WorldView<'w> {
    /// An unbounded view.
    pub fn new(world: &'w World, classify: ClassifyFn) -> Self {
        Self {
            world,
            classify,
            min_y: i64::MIN,
            max_y: i64::MAX,
        }
    }

    pub fn with_bounds(mut self, min_y: i64, max_y: i64) -> Self {
        self.min_y = min_y;
        self.max_y = max_y;
        self
    }

    fn air(&self) -> BlockInfo {
        BlockInfo::new(BlockId::AIR, (self.classify)(BlockId::AIR))
    }
}

impl BlockView for WorldView<'_> {
    fn block_at(&self, pos: BlockPos) -> Result<BlockInfo, ViewError> {
        if pos.y < self.min_y || pos.y > self.max_y {
            return Ok(self.air());
        }
        let id = self
            .world
            .try_get_block(pos)
            .ok_or(ViewError::ChunkNotLoaded(pos.chunk()))?;
        Ok(BlockInfo::new(id, (self.classify)(id)))
    }

    fn can_see_sky(&self, pos: BlockPos) -> Result<bool, ViewError> {
        if pos.y >= self.max_y {
            return Ok(true);
        }
        let classify = self.classify;
        let top = self
            .world
            .column_top_where(pos, |id| !BlockInfo::new(id, classify(id)).is_air())
            .ok_or(ViewError::ChunkNotLoaded(pos.chunk()))?;
        Ok(top.is_none_or(|top| top <= pos.y))
    }

    fn vertical_bounds(&self) -> RangeInclusive<i64> {
        self.min_y..=self.max_y
    }
}
