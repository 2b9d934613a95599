//! Fixed-size tile grid
//!
//! Row-major storage of tiles with bounds-checked access and the carving
//! primitives used by room and level generation. Out-of-bounds access is a
//! bug in the caller's placement arithmetic and panics.

use core::fmt;

use super::rect::{Point, Rect};
use super::tile::Tile;

/// A `width` x `height` array of tiles
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TileGrid {
    width: i32,
    height: i32,
    tiles: Vec<Tile>,
}

impl TileGrid {
    /// Create a grid filled with void tiles
    pub fn new(width: i32, height: i32) -> Self {
        Self::filled(width, height, &Tile::default())
    }

    /// Create a grid with every cell set to a copy of `tile`
    pub fn filled(width: i32, height: i32, tile: &Tile) -> Self {
        assert!(
            width > 0 && height > 0,
            "tile grid must have positive dimensions, got {width}x{height}"
        );
        Self {
            width,
            height,
            tiles: vec![tile.clone(); (width * height) as usize],
        }
    }

    pub fn width(&self) -> i32 {
        self.width
    }

    pub fn height(&self) -> i32 {
        self.height
    }

    /// Rectangle covering the whole grid
    pub fn bounds(&self) -> Rect {
        Rect::sized(self.width, self.height)
    }

    pub fn in_bounds(&self, p: Point) -> bool {
        p.x >= 0 && p.y >= 0 && p.x < self.width && p.y < self.height
    }

    fn offset(&self, p: Point) -> usize {
        assert!(
            self.in_bounds(p),
            "point {p} is outside of {}x{} grid",
            self.width,
            self.height
        );
        (p.y * self.width + p.x) as usize
    }

    pub fn get(&self, p: Point) -> &Tile {
        &self.tiles[self.offset(p)]
    }

    pub fn get_mut(&mut self, p: Point) -> &mut Tile {
        let idx = self.offset(p);
        &mut self.tiles[idx]
    }

    /// Non-panicking read for lookups that may fall off the grid
    pub fn try_get(&self, p: Point) -> Option<&Tile> {
        if self.in_bounds(p) {
            Some(&self.tiles[(p.y * self.width + p.x) as usize])
        } else {
            None
        }
    }

    pub fn set(&mut self, p: Point, tile: Tile) {
        let idx = self.offset(p);
        self.tiles[idx] = tile;
    }

    /// Every cell with its position, row by row
    pub fn iter(&self) -> impl Iterator<Item = (Point, &Tile)> {
        let width = self.width;
        self.tiles
            .iter()
            .enumerate()
            .map(move |(i, t)| (Point::new(i as i32 % width, i as i32 / width), t))
    }

    /// True if no cell inside `area` has been placed by the generator
    pub fn is_area_empty(&self, area: &Rect) -> bool {
        assert!(
            self.bounds().contains(area),
            "area {area} does not fit inside {}x{} grid",
            self.width,
            self.height
        );
        area.points().all(|p| !self.get(p).is_placed())
    }

    /// Carve a walled room
    ///
    /// Fills `floor_area` with `floor` and surrounds it with a ring of `wall`
    /// that is `wall_width` cells thick. The ring must fit inside the grid.
    pub fn carve_room(&mut self, floor_area: &Rect, wall_width: i32, wall: &Tile, floor: &Tile) {
        self.carve(floor_area, wall_width, wall, floor, false);
    }

    /// Carve a walled room on top of an existing one
    ///
    /// Same as [`carve_room`](Self::carve_room), except that a cell already
    /// holding floor never gets a wall written over it. Carving two
    /// overlapping rectangles this way merges them into one room.
    pub fn carve_overlapping_room(
        &mut self,
        floor_area: &Rect,
        wall_width: i32,
        wall: &Tile,
        floor: &Tile,
    ) {
        self.carve(floor_area, wall_width, wall, floor, true);
    }

    fn carve(&mut self, floor_area: &Rect, wall_width: i32, wall: &Tile, floor: &Tile, merge: bool) {
        assert!(!floor_area.is_null(), "cannot carve empty room {floor_area}");
        assert!(wall_width >= 0, "negative wall width {wall_width}");

        let carve_bounds = floor_area.inflate(wall_width);
        assert!(
            self.bounds().contains(&carve_bounds),
            "room {carve_bounds} does not fit inside {}x{} grid",
            self.width,
            self.height
        );

        for p in carve_bounds.points() {
            if floor_area.contains_point(p) {
                self.set(p, floor.clone());
            } else if !(merge && self.get(p).is_floor()) {
                self.set(p, wall.clone());
            }
        }
    }

    /// Copy every cell of `source` into this grid with its top left corner
    /// at `upper_left`. The whole source must fit.
    pub fn insert(&mut self, upper_left: Point, source: &TileGrid) {
        let dest = source.bounds().translate(upper_left);
        assert!(
            self.bounds().contains(&dest),
            "{}x{} grid at {upper_left} does not fit inside {}x{} grid",
            source.width,
            source.height,
            self.width,
            self.height
        );

        for (p, tile) in source.iter() {
            self.set(p + upper_left, tile.clone());
        }
    }

    /// Number of cells matching a predicate
    pub fn count(&self, pred: impl Fn(&Tile) -> bool) -> usize {
        self.tiles.iter().filter(|t| pred(t)).count()
    }
}

impl fmt::Display for TileGrid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for y in 0..self.height {
            for x in 0..self.width {
                write!(f, "{}", self.get(Point::new(x, y)).glyph())?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}
