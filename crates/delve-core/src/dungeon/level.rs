//! Finished dungeon level
//!
//! Read-only once generated. Renderers and simulation code query tiles
//! through this type and never mutate the grid.

use core::fmt;

use serde::Serialize;

use super::generation::GenerationStats;
use super::grid::TileGrid;
use super::rect::{Point, Rect};
use super::room::{RoomData, RoomId, RoomSize};
use super::tile::Tile;

/// Serializable overview of a generated level
#[derive(Debug, Clone, Serialize)]
pub struct LevelSummary<'a> {
    pub name: &'a str,
    pub width: i32,
    pub height: i32,
    pub stairs_up: Option<Point>,
    pub stats: GenerationStats,
    pub rooms: Vec<RoomSummary>,
}

/// One placed room, in level coordinates
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RoomSummary {
    pub id: RoomId,
    pub size: RoomSize,
    pub area: Rect,
    pub floor_center: Point,
    pub connected: Vec<RoomId>,
}

/// A generated level: its grid, rooms and where the player arrives
#[derive(Debug, Clone)]
pub struct Level {
    name: String,
    grid: TileGrid,
    stairs_up: Option<Point>,
    rooms: Vec<RoomData>,
    stats: GenerationStats,
}

impl Level {
    pub(crate) fn new(
        name: String,
        grid: TileGrid,
        stairs_up: Option<Point>,
        rooms: Vec<RoomData>,
        stats: GenerationStats,
    ) -> Self {
        Self {
            name,
            grid,
            stairs_up,
            rooms,
            stats,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Tile at `p`; panics outside the level
    pub fn tile_at(&self, p: Point) -> &Tile {
        self.grid.get(p)
    }

    pub fn width(&self) -> i32 {
        self.grid.width()
    }

    pub fn height(&self) -> i32 {
        self.grid.height()
    }

    /// Arrival point, `None` when no room could be placed
    pub fn stairs_up(&self) -> Option<Point> {
        self.stairs_up
    }

    pub fn grid(&self) -> &TileGrid {
        &self.grid
    }

    /// Placed rooms in placement order
    pub fn rooms(&self) -> &[RoomData] {
        &self.rooms
    }

    pub fn stats(&self) -> &GenerationStats {
        &self.stats
    }

    /// ASCII rendering, one line per row
    pub fn dump(&self) -> String {
        self.grid.to_string()
    }

    pub fn summary(&self) -> LevelSummary<'_> {
        let rooms = self
            .rooms
            .iter()
            .enumerate()
            .filter_map(|(i, room)| {
                Some(RoomSummary {
                    id: RoomId(i),
                    size: room.size(),
                    area: room.world_total_area()?,
                    floor_center: room.world_floor_center()?,
                    connected: room.connected_rooms().to_vec(),
                })
            })
            .collect();

        LevelSummary {
            name: &self.name,
            width: self.width(),
            height: self.height(),
            stairs_up: self.stairs_up,
            stats: self.stats,
            rooms,
        }
    }
}

impl fmt::Display for Level {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.grid)
    }
}
