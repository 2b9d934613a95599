//! Irregular room synthesis
//!
//! A room is two overlapping walled rectangles carved into a private grid.
//! The first rectangle is carved plainly, the second with the merge rule so
//! the wall between them opens up, which gives L, T and cross shapes.

use core::fmt;

use serde::Serialize;
use strum::Display;

use super::grid::TileGrid;
use super::rect::{Point, Rect};
use super::registry::TileRegistry;
use super::tile::TileFlags;
use crate::consts::WALL_WIDTH;
use crate::rng::Random;

/// Size classes a room can be drawn from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Display)]
pub enum RoomSize {
    Small,
    Medium,
    Large,
    Huge,
}

impl RoomSize {
    pub const ALL: [RoomSize; 4] = [
        RoomSize::Small,
        RoomSize::Medium,
        RoomSize::Large,
        RoomSize::Huge,
    ];

    /// Inclusive bounds for each side of a carved rectangle
    pub const fn dimensions(&self) -> (i32, i32) {
        match self {
            RoomSize::Small => (3, 5),
            RoomSize::Medium => (4, 8),
            RoomSize::Large => (6, 11),
            RoomSize::Huge => (9, 14),
        }
    }

    /// Draw a size class using relative weights for small, medium, large
    /// and huge rooms
    pub fn random(rng: &mut Random, weights: &[u32; 4]) -> RoomSize {
        rng.weighted_index(weights)
            .map(|i| Self::ALL[i])
            .unwrap_or(RoomSize::Small)
    }
}

/// Index of a placed room in its level
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct RoomId(pub usize);

impl fmt::Display for RoomId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// A generated room
///
/// Geometry is in room-local coordinates: the total area starts at the
/// origin and the floor area at (1, 1). Once the room is placed,
/// `world_offset` translates local coordinates into level coordinates.
#[derive(Debug, Clone)]
pub struct RoomData {
    size: RoomSize,
    primary: Rect,
    overlap: Rect,
    floor_area: Rect,
    total_area: Rect,
    floor_center: Point,
    world_offset: Option<Point>,
    tiles: Option<TileGrid>,
    connected_rooms: Vec<RoomId>,
}

impl RoomData {
    pub fn size(&self) -> RoomSize {
        self.size
    }

    /// First carved rectangle
    pub fn primary(&self) -> Rect {
        self.primary
    }

    /// Second carved rectangle, always intersecting the primary one
    pub fn overlap(&self) -> Rect {
        self.overlap
    }

    /// Tight bounds of the walkable floor
    pub fn floor_area(&self) -> Rect {
        self.floor_area
    }

    /// Floor area plus its wall ring
    pub fn total_area(&self) -> Rect {
        self.total_area
    }

    /// A floor cell near the middle of the room
    pub fn floor_center(&self) -> Point {
        self.floor_center
    }

    pub fn world_offset(&self) -> Option<Point> {
        self.world_offset
    }

    pub fn is_placed(&self) -> bool {
        self.world_offset.is_some()
    }

    /// Floor center in level coordinates, once placed
    pub fn world_floor_center(&self) -> Option<Point> {
        self.world_offset.map(|o| self.floor_center + o)
    }

    /// Total area in level coordinates, once placed
    pub fn world_total_area(&self) -> Option<Rect> {
        self.world_offset.map(|o| self.total_area.translate(o))
    }

    /// The room's private grid; gone once the room is placed
    pub fn tiles(&self) -> Option<&TileGrid> {
        self.tiles.as_ref()
    }

    /// Rooms a hallway has been carved to
    pub fn connected_rooms(&self) -> &[RoomId] {
        &self.connected_rooms
    }

    /// Record the placement and hand over the private grid for copying
    pub(crate) fn place(&mut self, offset: Point) -> Option<TileGrid> {
        self.world_offset = Some(offset);
        self.tiles.take()
    }

    pub(crate) fn connect(&mut self, other: RoomId) {
        self.connected_rooms.push(other);
    }
}

/// Builds standalone rooms out of registry tiles
#[derive(Debug, Clone, Copy)]
pub struct RoomGenerator<'a> {
    registry: &'a TileRegistry,
}

impl<'a> RoomGenerator<'a> {
    pub fn new(registry: &'a TileRegistry) -> Self {
        Self { registry }
    }

    fn random_rect(rng: &mut Random, size: RoomSize) -> (i32, i32) {
        let (lo, hi) = size.dimensions();
        (rng.range_inclusive(lo, hi), rng.range_inclusive(lo, hi))
    }

    /// Generate one room of the given size class
    pub fn generate(&self, rng: &mut Random, size: RoomSize) -> RoomData {
        let (w, h) = Self::random_rect(rng, size);
        let (ow, oh) = Self::random_rect(rng, size);

        // Offset range keeps at least one column and one row in common
        let ox = rng.range_inclusive(-(ow - 1), w - 1);
        let oy = rng.range_inclusive(-(oh - 1), h - 1);

        let primary = Rect::new(0, 0, w, h);
        let overlap = Rect::new(ox, oy, ow, oh);
        let bounds = primary.union(&overlap);

        let shift = Point::new(WALL_WIDTH - bounds.x, WALL_WIDTH - bounds.y);
        let primary = primary.translate(shift);
        let overlap = overlap.translate(shift);
        let floor_area = bounds.translate(shift);
        let total_area = floor_area.inflate(WALL_WIDTH);

        let mut tiles = TileGrid::new(total_area.width, total_area.height);
        let wall = self.registry.wall().with_flags(TileFlags::IS_ROOM);
        let floor = self.registry.floor().with_flags(TileFlags::IS_ROOM);

        tiles.carve_room(&primary, WALL_WIDTH, &wall, &floor);
        tiles.carve_overlapping_room(&overlap, WALL_WIDTH, &wall, &floor);

        // Corners of the bounding box outside both rectangles
        let filler = self.registry.filler_stone();
        for p in total_area.points() {
            if !tiles.get(p).is_placed() {
                tiles.set(p, filler.clone());
            }
        }

        RoomData {
            size,
            primary,
            overlap,
            floor_area,
            total_area,
            floor_center: primary.approximate_center(),
            world_offset: None,
            tiles: Some(tiles),
            connected_rooms: Vec::new(),
        }
    }

    /// Generate a room with a size class drawn from `weights`
    pub fn generate_random(&self, rng: &mut Random, weights: &[u32; 4]) -> RoomData {
        let size = RoomSize::random(rng, weights);
        self.generate(rng, size)
    }
}
