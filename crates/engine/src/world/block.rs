use bitflags::bitflags;

/// Opaque block identifier. The engine stores these without interpreting them.
/// Game-specific layers assign meaning to specific IDs through a
/// [`ClassifyFn`].
///
/// The only semantic the engine enforces is that `BlockId::AIR` (0) is the
/// "empty" block: chunk sections filled entirely with AIR are deallocated, and
/// AIR never blocks the sky. Other ids count as air when classified with
/// [`BlockTraits::AIR`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct BlockId(pub u16);

impl BlockId {
    /// The universal "empty" block.
    pub const AIR: BlockId = BlockId(0);

    pub const fn new(id: u16) -> Self {
        Self(id)
    }
}

bitflags! {
    /// Physical properties of a block, as far as safe-location search cares.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct BlockTraits: u8 {
        /// An entity can stand inside this block (air, flowers, open doors...).
        const PASSABLE = 1 << 0;
        /// Water, lava and the like.
        const LIQUID = 1 << 1;
        /// Damages an entity that touches it (lava, fire, cactus, magma...).
        const HARMFUL = 1 << 2;
        /// Transports whatever enters it.
        const PORTAL = 1 << 3;
        /// Empty space under another id (cave air, void air). Implies nothing
        /// on its own; classifiers set it together with `PASSABLE`.
        const AIR = 1 << 4;
    }
}

/// Maps a block id to its traits. Supplied by the game layer; the engine owns
/// no block taxonomy of its own.
pub type ClassifyFn = fn(BlockId) -> BlockTraits;

/// A classified block, as returned by a [`BlockView`](super::view::BlockView).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct BlockInfo {
    pub id: BlockId,
    pub traits: BlockTraits,
}

impl BlockInfo {
    pub const fn new(id: BlockId, traits: BlockTraits) -> Self {
        Self { id, traits }
    }

    /// `BlockId::AIR`, or any id classified as [`BlockTraits::AIR`].
    #[inline]
    pub fn is_air(&self) -> bool {
        self.id == BlockId::AIR || self.traits.contains(BlockTraits::AIR)
    }

    #[inline]
    pub fn is_passable(&self) -> bool {
        self.traits.contains(BlockTraits::PASSABLE)
    }

    #[inline]
    pub fn is_liquid(&self) -> bool {
        self.traits.contains(BlockTraits::LIQUID)
    }

    #[inline]
    pub fn is_harmful(&self) -> bool {
        self.traits.contains(BlockTraits::HARMFUL)
    }

    #[inline]
    pub fn is_portal(&self) -> bool {
        self.traits.contains(BlockTraits::PORTAL)
    }

    /// Neither passable nor liquid: something you can stand on.
    #[inline]
    pub fn is_solid(&self) -> bool {
        !self.is_passable() && !self.is_liquid()
    }
}
