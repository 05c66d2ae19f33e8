//! The bounded neighbourhood scan behind [`find_safe_location`](super::find_safe_location).
//!
//! Candidate order is fixed so that results are reproducible:
//!
//! 1. y-offsets `0, +1, -1, +2, -2, ...` up to the height radius;
//! 2. within a y-level, square rings of growing Chebyshev radius around the
//!    origin column, up to the width radius;
//! 3. within a ring, ascending x, then ascending z.
//!
//! The origin is therefore always the first candidate.

use std::cell::RefCell;
use std::collections::HashMap;
use std::ops::RangeInclusive;

use crate::world::block::BlockInfo;
use crate::world::position::BlockPos;
use crate::world::view::{BlockView, ViewError};

use super::kernel::SafetyKernel;
use super::{SearchOutcome, SearchParams, TeleportError};

/// Candidate offsets `(dx, dy, dz)` in scan order. Radii below zero are
/// treated as zero.
pub fn scan_order(width: i32, height: i32) -> impl Iterator<Item = (i64, i64, i64)> {
    let width = width.max(0) as i64;
    vertical_offsets(height).flat_map(move |dy| {
        (0..=width).flat_map(move |r| ring(r).map(move |(dx, dz)| (dx, dy, dz)))
    })
}

fn vertical_offsets(height: i32) -> impl Iterator<Item = i64> {
    let height = height.max(0) as i64;
    std::iter::once(0).chain((1..=height).flat_map(|d| [d, -d]))
}

/// Offsets with `max(|dx|, |dz|) == r`, ascending x then z.
fn ring(r: i64) -> impl Iterator<Item = (i64, i64)> {
    (-r..=r).flat_map(move |dx| {
        let zs: Vec<i64> = if dx.abs() == r {
            (-r..=r).collect()
        } else if r == 0 {
            vec![0]
        } else {
            vec![-r, r]
        };
        zs.into_iter().map(move |dz| (dx, dz))
    })
}

/// Memoises block reads for the duration of one search. Neighbouring
/// y-levels share body blocks and floor descents overlap, so most candidates
/// after the first few cost no world reads at all.
struct CachedView<'a, V: ?Sized> {
    inner: &'a V,
    blocks: RefCell<HashMap<BlockPos, BlockInfo>>,
}

impl<'a, V: BlockView + ?Sized> CachedView<'a, V> {
    fn new(inner: &'a V) -> Self {
        Self {
            inner,
            blocks: RefCell::new(HashMap::new()),
        }
    }
}

impl<V: BlockView + ?Sized> BlockView for CachedView<'_, V> {
    fn block_at(&self, pos: BlockPos) -> Result<BlockInfo, ViewError> {
        if let Some(info) = self.blocks.borrow().get(&pos) {
            return Ok(*info);
        }
        let info = self.inner.block_at(pos)?;
        self.blocks.borrow_mut().insert(pos, info);
        Ok(info)
    }

    fn can_see_sky(&self, pos: BlockPos) -> Result<bool, ViewError> {
        self.inner.can_see_sky(pos)
    }

    fn vertical_bounds(&self) -> RangeInclusive<i64> {
        self.inner.vertical_bounds()
    }
}

pub(super) fn search<V, K>(
    view: &V,
    params: &SearchParams,
    kernel: &K,
) -> Result<SearchOutcome, TeleportError>
where
    V: BlockView + ?Sized,
    K: SafetyKernel + ?Sized,
{
    params.validate()?;

    let cache = CachedView::new(view);
    let bounds = view.vertical_bounds();
    // Floor descent may not carry a result below the box.
    let lowest = params.origin.y.saturating_sub(params.height as i64);

    for (evaluated, (dx, dy, dz)) in scan_order(params.width, params.height).enumerate() {
        // Candidates (and the block above them) must exist in i64 space.
        let Some(candidate) = params.origin.checked_offset(dx, dy, dz) else {
            continue;
        };
        if !bounds.contains(&candidate.y) || candidate.y == i64::MAX {
            continue;
        }
        let depth = (params.max_drop.max(1) as i64)
            .min(candidate.y.saturating_sub(lowest).saturating_add(1))
            .min(candidate.y.saturating_sub(i64::MIN));
        if let Some(found) = evaluate(&cache, kernel, candidate, depth)? {
            tracing::debug!(
                "Safe location {} for origin {} (kernel {}, {} candidates)",
                found,
                params.origin,
                kernel.name(),
                evaluated + 1
            );
            return Ok(SearchOutcome::Found(found));
        }
    }

    tracing::debug!(
        "No safe location within {}x{} of {} (kernel {})",
        params.width,
        params.height,
        params.origin,
        kernel.name()
    );
    Ok(SearchOutcome::NotFound)
}

/// Judge one candidate. Returns the position an entity would come to rest at,
/// looking for a floor at most `depth` blocks below the candidate. The
/// kernel's exclusion applies to that resting position.
fn evaluate<K: SafetyKernel + ?Sized>(
    view: &dyn BlockView,
    kernel: &K,
    candidate: BlockPos,
    depth: i64,
) -> Result<Option<BlockPos>, ViewError> {
    if !kernel.is_safe_body(view, candidate)? {
        tracing::trace!("{}: body unsafe", candidate);
        return Ok(None);
    }

    for drop in 1..=depth {
        let floor = candidate.offset(0, -drop, 0);
        if kernel.is_safe_floor(view, floor)? {
            let landing = floor.above();
            if kernel.excludes(view, landing)? {
                tracing::trace!("{}: landing {} excluded by {}", candidate, landing, kernel.name());
                return Ok(None);
            }
            return Ok(Some(landing));
        }
        // Falling further means passing through this block.
        if !kernel.is_body_block(view.block_at(floor)?) {
            tracing::trace!("{}: blocked by unsafe floor at y={}", candidate, floor.y);
            return Ok(None);
        }
    }

    tracing::trace!("{}: no floor within {} blocks", candidate, depth);
    Ok(None)
}
