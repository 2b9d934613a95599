//! Dungeon system
//!
//! Tile model, grids, room synthesis, hallway carving and level generation.

mod corridor;
mod generation;
mod grid;
mod level;
mod rect;
mod registry;
mod room;
mod tile;

pub use corridor::{CarvedHall, HallGenerator, HallwayCost};
pub use generation::{GenerationStats, LevelGenerator};
pub use grid::TileGrid;
pub use level::{Level, LevelSummary, RoomSummary};
pub use rect::{Direction, Point, Rect};
pub use registry::TileRegistry;
pub use room::{RoomData, RoomGenerator, RoomId, RoomSize};
pub use tile::{Tile, TileFlags, TileType, TileTypeId};
