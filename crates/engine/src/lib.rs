//! Game-agnostic voxel world store and safe-location search.
//!
//! - [`world`]: chunked block storage plus the classified [`world::view::BlockView`].
//! - [`teleport`]: the nearest-safe-position scan and its safety kernels.

pub mod teleport;
pub mod world;
