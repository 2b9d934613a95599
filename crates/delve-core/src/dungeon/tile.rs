//! Tile types and tile instances
//!
//! A [`TileType`] is an immutable archetype registered once in a
//! [`TileRegistry`](super::TileRegistry). Every [`Tile`] in a grid shares its
//! type through an `Arc` and carries a small overlay of per-cell flags
//! (room/hall membership, sealed state) on top of the type's own flags.

use std::sync::{Arc, LazyLock};

use bitflags::bitflags;
use strum::{Display, EnumIter};

bitflags! {
    /// Terrain and generation flags
    ///
    /// Used both for the fixed flags of a tile type and for the per-cell
    /// overlay of a tile instance.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct TileFlags: u16 {
        /// Unmodifiable bedrock
        const GRANITE = 0x0001;
        /// The generator has put something here
        const PLACED = 0x0002;
        /// Nothing can enter or be placed on this tile
        const IMPASSABLE = 0x0004;
        const WALK = 0x0008;
        const FLY = 0x0010;
        const SWIM = 0x0020;
        const TUNNEL = 0x0040;
        /// Considered wall by the generator
        const WALL = 0x0080;
        /// Considered floor by the generator
        const FLOOR = 0x0100;
        const DOORWAY = 0x0200;
        /// Belongs to a room
        const IS_ROOM = 0x0400;
        /// Belongs to a hallway
        const IS_HALL = 0x0800;
        const BLOCKS_LOS = 0x1000;
        /// Hallways may never be routed through this tile
        const SEALED = 0x2000;
    }
}

/// Identifiers of the built-in tile types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Display, EnumIter)]
#[repr(u8)]
pub enum TileTypeId {
    #[default]
    Void = 0,
    Granite = 1,
    Wall = 2,
    Floor = 3,
    Doorway = 4,
    FillerStone = 5,
    StairsUp = 6,
}

impl TileTypeId {
    pub const fn index(&self) -> usize {
        *self as usize
    }
}

/// Immutable terrain archetype
#[derive(Debug, PartialEq, Eq)]
pub struct TileType {
    id: TileTypeId,
    name: &'static str,
    title: &'static str,
    glyph: char,
    flags: TileFlags,
}

impl TileType {
    pub const fn new(
        id: TileTypeId,
        name: &'static str,
        title: &'static str,
        glyph: char,
        flags: TileFlags,
    ) -> Self {
        Self {
            id,
            name,
            title,
            glyph,
            flags,
        }
    }

    /// The empty tile every grid starts out with
    pub const fn void() -> Self {
        Self::new(TileTypeId::Void, "void", "Void Tile", ' ', TileFlags::IMPASSABLE)
    }

    pub fn id(&self) -> TileTypeId {
        self.id
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    /// Display name
    pub fn title(&self) -> &'static str {
        self.title
    }

    /// Character used by the ASCII dump
    pub fn glyph(&self) -> char {
        self.glyph
    }

    pub fn flags(&self) -> TileFlags {
        self.flags
    }
}

static VOID_TYPE: LazyLock<Arc<TileType>> = LazyLock::new(|| Arc::new(TileType::void()));

/// A single grid cell: a shared tile type plus per-cell flags
#[derive(Debug, Clone)]
pub struct Tile {
    kind: Arc<TileType>,
    overlay: TileFlags,
}

impl Tile {
    pub fn new(kind: Arc<TileType>) -> Self {
        Self {
            kind,
            overlay: TileFlags::empty(),
        }
    }

    /// The shared void tile type
    pub fn void_type() -> Arc<TileType> {
        Arc::clone(&VOID_TYPE)
    }

    /// Builder-style overlay: returns the tile with extra per-cell flags
    pub fn with_flags(mut self, flags: TileFlags) -> Self {
        self.overlay |= flags;
        self
    }

    pub fn kind(&self) -> &TileType {
        &self.kind
    }

    pub fn kind_id(&self) -> TileTypeId {
        self.kind.id
    }

    /// Per-cell flags only
    pub fn overlay(&self) -> TileFlags {
        self.overlay
    }

    /// Type flags combined with the per-cell overlay
    pub fn flags(&self) -> TileFlags {
        self.kind.flags | self.overlay
    }

    pub fn has(&self, flags: TileFlags) -> bool {
        self.flags().contains(flags)
    }

    pub fn insert_flags(&mut self, flags: TileFlags) {
        self.overlay |= flags;
    }

    pub fn is_placed(&self) -> bool {
        self.has(TileFlags::PLACED)
    }

    pub fn is_impassable(&self) -> bool {
        self.has(TileFlags::IMPASSABLE)
    }

    pub fn is_granite(&self) -> bool {
        self.has(TileFlags::GRANITE)
    }

    pub fn is_wall(&self) -> bool {
        self.has(TileFlags::WALL)
    }

    pub fn is_floor(&self) -> bool {
        self.has(TileFlags::FLOOR)
    }

    pub fn is_doorway(&self) -> bool {
        self.has(TileFlags::DOORWAY)
    }

    pub fn is_room(&self) -> bool {
        self.has(TileFlags::IS_ROOM)
    }

    pub fn is_hall(&self) -> bool {
        self.has(TileFlags::IS_HALL)
    }

    pub fn is_sealed(&self) -> bool {
        self.has(TileFlags::SEALED)
    }

    pub fn blocks_sight(&self) -> bool {
        self.has(TileFlags::BLOCKS_LOS)
    }

    /// Check if an actor on foot can stand here
    pub fn is_walkable(&self) -> bool {
        self.has(TileFlags::WALK) && !self.is_impassable()
    }

    /// Mark this tile so no later hallway is routed through it
    pub fn seal(&mut self) {
        self.overlay |= TileFlags::SEALED;
    }

    pub fn glyph(&self) -> char {
        self.kind.glyph
    }
}

impl Default for Tile {
    fn default() -> Self {
        Self::new(Tile::void_type())
    }
}

/// Two tiles are equal when they share the same registered type and carry
/// the same per-cell flags.
impl PartialEq for Tile {
    fn eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.kind, &other.kind) && self.overlay == other.overlay
    }
}

impl Eq for Tile {}
