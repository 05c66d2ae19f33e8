//! Safe-location search: given a point in the world, find the nearest
//! position where an entity can stand without being hurt.
//!
//! ```text
//! origin ──► scan box (2w+1)×(2h+1)×(2w+1), nearest first
//!              │
//!              ├─ kernel.is_safe_body(target, target+1)?
//!              └─ floor within max_drop blocks below?
//!                   └─ kernel.excludes(landing)?
//!                        └─► Found(landing = one block above the floor)
//! ```
//!
//! The search owns no state between calls and takes the world by shared
//! reference, so any number of searches may run at once against the same
//! view (see [`find_many`]).

pub mod kernel;
pub mod scan;

use rayon::prelude::*;
use thiserror::Error;

use crate::world::position::BlockPos;
use crate::world::view::{BlockView, ViewError};

pub use kernel::{Kernel, SafetyKernel};
pub use scan::scan_order;

/// Default radius of blocks on the y axis to search.
pub const DEFAULT_HEIGHT: i32 = 3;
/// Default radius of blocks on the x and z axes to search.
pub const DEFAULT_WIDTH: i32 = 9;
/// Default number of blocks below a candidate checked for a floor.
pub const DEFAULT_MAX_DROP_DISTANCE: i32 = 2;

/// Where and how far to search.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SearchParams {
    pub origin: BlockPos,
    /// Radius on the y axis. Must be non-negative.
    pub height: i32,
    /// Radius on the x and z axes. Must be non-negative.
    pub width: i32,
    /// How many blocks below a candidate may hold its floor. Zero or less
    /// means the block directly below must already be a safe floor.
    pub max_drop: i32,
}

impl SearchParams {
    /// Search around `origin` with the default radii and drop distance.
    pub const fn new(origin: BlockPos) -> Self {
        Self {
            origin,
            height: DEFAULT_HEIGHT,
            width: DEFAULT_WIDTH,
            max_drop: DEFAULT_MAX_DROP_DISTANCE,
        }
    }

    pub const fn height(mut self, height: i32) -> Self {
        self.height = height;
        self
    }

    pub const fn width(mut self, width: i32) -> Self {
        self.width = width;
        self
    }

    pub const fn max_drop(mut self, max_drop: i32) -> Self {
        self.max_drop = max_drop;
        self
    }

    pub fn validate(&self) -> Result<(), TeleportError> {
        if self.height < 0 || self.width < 0 {
            return Err(TeleportError::NegativeRadius {
                height: self.height,
                width: self.width,
            });
        }
        Ok(())
    }

    /// Whether `pos` lies inside the scanned box.
    pub fn contains(&self, pos: BlockPos) -> bool {
        pos.y.abs_diff(self.origin.y) <= self.height.max(0) as u64
            && self.origin.horizontal_chebyshev(pos) <= self.width.max(0) as u64
    }
}

/// Result of a search that ran to completion.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SearchOutcome {
    Found(BlockPos),
    NotFound,
}

impl SearchOutcome {
    pub fn found(self) -> Option<BlockPos> {
        match self {
            SearchOutcome::Found(pos) => Some(pos),
            SearchOutcome::NotFound => None,
        }
    }

    pub fn is_found(&self) -> bool {
        matches!(self, SearchOutcome::Found(_))
    }
}

/// A search that could not run or could not finish.
///
/// "Nothing safe nearby" is not an error; see [`SearchOutcome::NotFound`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum TeleportError {
    #[error("search radii must be non-negative (height {height}, width {width})")]
    NegativeRadius { height: i32, width: i32 },
    #[error("world read failed during search: {0}")]
    View(#[from] ViewError),
}

/// Find the nearest safe location around `params.origin`.
///
/// Returns the origin itself when it is already safe. The scan order is
/// documented in [`scan`]; the first accepted candidate wins.
pub fn find_safe_location<V, K>(
    view: &V,
    params: &SearchParams,
    kernel: &K,
) -> Result<SearchOutcome, TeleportError>
where
    V: BlockView + ?Sized,
    K: SafetyKernel + ?Sized,
{
    scan::search(view, params, kernel)
}

/// [`find_safe_location`] with default radii, drop distance and kernel.
pub fn find_safe_location_default<V: BlockView + ?Sized>(
    view: &V,
    origin: BlockPos,
) -> Result<SearchOutcome, TeleportError> {
    find_safe_location(view, &SearchParams::new(origin), &Kernel::Default)
}

/// Run independent searches in parallel. Results come back in input order.
pub fn find_many<V, K>(
    view: &V,
    queries: &[SearchParams],
    kernel: &K,
) -> Vec<Result<SearchOutcome, TeleportError>>
where
    V: BlockView + Sync + ?Sized,
    K: SafetyKernel + ?Sized,
{
    let results: Vec<_> = queries
        .par_iter()
        .map(|params| find_safe_location(view, params, kernel))
        .collect();

    let found = results
        .iter()
        .filter(|r| matches!(r, Ok(SearchOutcome::Found(_))))
        .count();
    tracing::debug!(
        "Batch search: {} queries, {} found, kernel {}",
        queries.len(),
        found,
        kernel.name()
    );
    results
}
