//! Safety kernels: what counts as a safe body position and a safe floor.

use std::collections::HashMap;
use std::sync::LazyLock;

use crate::world::block::BlockInfo;
use crate::world::position::BlockPos;
use crate::world::view::{BlockView, ViewError};

/// A pluggable notion of "safe".
///
/// Implementors decide per block whether a body may occupy it and whether it
/// can be stood on. The pairwise checks (`is_safe_body` covers the target and
/// the block above it) and the extra exclusion hook have defaults, so a custom
/// kernel usually only writes the two block predicates.
///
/// Kernels are shared across concurrent searches and must not hold mutable
/// state.
pub trait SafetyKernel: Send + Sync {
    /// Can an entity's body be inside this block?
    fn is_body_block(&self, block: BlockInfo) -> bool;

    /// Can an entity stand on top of this block?
    fn is_floor_block(&self, block: BlockInfo) -> bool;

    /// Used in logs.
    fn name(&self) -> &str {
        "CUSTOM"
    }

    /// Target block and the one above it both admit a body.
    fn is_safe_body(&self, view: &dyn BlockView, pos: BlockPos) -> Result<bool, ViewError> {
        Ok(self.is_body_block(view.block_at(pos)?)
            && self.is_body_block(view.block_at(pos.above())?))
    }

    /// `floor` itself (not the block above it) can be stood on.
    fn is_safe_floor(&self, view: &dyn BlockView, floor: BlockPos) -> Result<bool, ViewError> {
        Ok(self.is_floor_block(view.block_at(floor)?))
    }

    /// Reject an otherwise-safe candidate for kernel-specific reasons.
    fn excludes(&self, _view: &dyn BlockView, _pos: BlockPos) -> Result<bool, ViewError> {
        Ok(false)
    }
}

/// The built-in kernels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Kernel {
    /// Passable, harmless body blocks over a solid or liquid harmless floor.
    #[default]
    Default,
    /// Air or harmless liquid for the body; any floor that does not hurt.
    Flying,
    /// `Default`, but portals are neither a valid body nor a valid floor.
    NoPortal,
    /// `Default`, restricted to positions that can see the sky.
    SurfaceOnly,
}

static BY_NAME: LazyLock<HashMap<&'static str, Kernel>> =
    LazyLock::new(|| Kernel::ALL.iter().map(|k| (k.name_str(), *k)).collect());

impl Kernel {
    pub const ALL: [Kernel; 4] = [
        Kernel::Default,
        Kernel::Flying,
        Kernel::NoPortal,
        Kernel::SurfaceOnly,
    ];

    /// Look up a built-in by its canonical name. Case-insensitive; `-` and `_`
    /// are interchangeable (`no-portal` finds `NO_PORTAL`).
    pub fn from_name(name: &str) -> Option<Kernel> {
        let canonical = name.trim().to_ascii_uppercase().replace('-', "_");
        BY_NAME.get(canonical.as_str()).copied()
    }

    const fn name_str(&self) -> &'static str {
        match self {
            Kernel::Default => "DEFAULT",
            Kernel::Flying => "FLYING",
            Kernel::NoPortal => "NO_PORTAL",
            Kernel::SurfaceOnly => "SURFACE_ONLY",
        }
    }
}

impl std::fmt::Display for Kernel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name_str())
    }
}

fn default_body(block: BlockInfo) -> bool {
    block.is_passable() && !block.is_harmful()
}

fn default_floor(block: BlockInfo) -> bool {
    (block.is_solid() || block.is_liquid()) && !block.is_harmful()
}

impl SafetyKernel for Kernel {
    fn is_body_block(&self, block: BlockInfo) -> bool {
        match self {
            Kernel::Default | Kernel::SurfaceOnly => default_body(block),
            Kernel::Flying => block.is_air() || (block.is_liquid() && !block.is_harmful()),
            Kernel::NoPortal => default_body(block) && !block.is_portal(),
        }
    }

    fn is_floor_block(&self, block: BlockInfo) -> bool {
        match self {
            Kernel::Default | Kernel::SurfaceOnly => default_floor(block),
            Kernel::Flying => !block.is_harmful(),
            Kernel::NoPortal => default_floor(block) && !block.is_portal(),
        }
    }

    fn name(&self) -> &str {
        self.name_str()
    }

    fn excludes(&self, view: &dyn BlockView, pos: BlockPos) -> Result<bool, ViewError> {
        match self {
            Kernel::SurfaceOnly => Ok(!view.can_see_sky(pos)?),
            _ => Ok(false),
        }
    }
}
