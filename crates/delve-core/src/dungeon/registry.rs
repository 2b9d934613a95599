//! Tile type catalog
//!
//! The standard catalog is built once per process and never mutated
//! afterwards. Tiles handed out by it share the registered `Arc<TileType>`,
//! so equality between tiles from any standard registry is a pointer
//! comparison.

use std::sync::{Arc, LazyLock};

use strum::IntoEnumIterator;

use super::tile::{Tile, TileFlags, TileType, TileTypeId};

static STANDARD: LazyLock<TileRegistry> = LazyLock::new(|| TileRegistry {
    types: TileTypeId::iter()
        .map(|id| match id {
            // Shared with `Tile::default()` so default tiles compare equal
            TileTypeId::Void => Tile::void_type(),
            _ => Arc::new(standard_type(id)),
        })
        .collect(),
});

/// Immutable flyweight table of terrain archetypes, indexed by [`TileTypeId`]
#[derive(Debug, Clone)]
pub struct TileRegistry {
    types: Vec<Arc<TileType>>,
}

impl TileRegistry {
    /// The standard dungeon catalog, shared by every caller
    pub fn standard() -> Self {
        STANDARD.clone()
    }

    /// Look up a registered tile type
    pub fn get(&self, id: TileTypeId) -> &Arc<TileType> {
        &self.types[id.index()]
    }

    /// Create a fresh tile of the given type with no per-cell flags
    pub fn tile(&self, id: TileTypeId) -> Tile {
        Tile::new(Arc::clone(self.get(id)))
    }

    pub fn void(&self) -> Tile {
        self.tile(TileTypeId::Void)
    }

    pub fn granite(&self) -> Tile {
        self.tile(TileTypeId::Granite)
    }

    pub fn wall(&self) -> Tile {
        self.tile(TileTypeId::Wall)
    }

    pub fn floor(&self) -> Tile {
        self.tile(TileTypeId::Floor)
    }

    pub fn doorway(&self) -> Tile {
        self.tile(TileTypeId::Doorway)
    }

    pub fn filler_stone(&self) -> Tile {
        self.tile(TileTypeId::FillerStone)
    }

    pub fn stairs_up(&self) -> Tile {
        self.tile(TileTypeId::StairsUp)
    }

    /// All registered types in id order
    pub fn iter(&self) -> impl Iterator<Item = &TileType> {
        self.types.iter().map(|t| t.as_ref())
    }

    pub fn len(&self) -> usize {
        self.types.len()
    }

    pub fn is_empty(&self) -> bool {
        self.types.is_empty()
    }
}

impl Default for TileRegistry {
    fn default() -> Self {
        Self::standard()
    }
}

fn standard_type(id: TileTypeId) -> TileType {
    match id {
        TileTypeId::Void => TileType::void(),
        TileTypeId::Granite => TileType::new(
            id,
            "granite",
            "Granite Wall",
            'x',
            TileFlags::GRANITE
                | TileFlags::PLACED
                | TileFlags::IMPASSABLE
                | TileFlags::WALL
                | TileFlags::BLOCKS_LOS,
        ),
        TileTypeId::Wall => TileType::new(
            id,
            "stone_wall",
            "Stone Wall",
            '#',
            TileFlags::PLACED
                | TileFlags::IMPASSABLE
                | TileFlags::WALL
                | TileFlags::TUNNEL
                | TileFlags::BLOCKS_LOS,
        ),
        TileTypeId::Floor => TileType::new(
            id,
            "stone_floor",
            "Stone Floor",
            '.',
            TileFlags::PLACED | TileFlags::WALK | TileFlags::FLY | TileFlags::FLOOR,
        ),
        TileTypeId::Doorway => TileType::new(
            id,
            "doorway",
            "Doorway",
            '+',
            TileFlags::PLACED | TileFlags::WALK | TileFlags::FLY | TileFlags::DOORWAY,
        ),
        TileTypeId::FillerStone => TileType::new(
            id,
            "filler_stone",
            "Solid Stone",
            '%',
            TileFlags::PLACED | TileFlags::IMPASSABLE | TileFlags::TUNNEL | TileFlags::BLOCKS_LOS,
        ),
        TileTypeId::StairsUp => TileType::new(
            id,
            "stairs_up",
            "Stairs Up",
            '<',
            TileFlags::PLACED | TileFlags::WALK | TileFlags::FLOOR,
        ),
    }
}
