//! Level generation
//!
//! Rooms are placed by rejection sampling inside a granite border, then
//! joined in a ring (room i to room i + 1, the last back to the first) with
//! hallways. Running out of placement attempts or failing to route a
//! hallway degrades the level but never fails it.

use serde::Serialize;
use tracing::{debug, info, trace, warn};

use super::corridor::HallGenerator;
use super::grid::TileGrid;
use super::level::Level;
use super::rect::Point;
use super::registry::TileRegistry;
use super::room::{RoomData, RoomGenerator, RoomId};
use super::tile::TileFlags;
use crate::config::GeneratorConfig;
use crate::error::ConfigError;
use crate::rng::Random;

/// Counters collected while generating a level
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct GenerationStats {
    /// Room placements tried
    pub attempts: u32,
    pub rooms_placed: usize,
    pub halls_carved: usize,
    /// Room pairs the pathfinder could not join
    pub halls_failed: usize,
}

/// Builds complete levels from a validated configuration
#[derive(Debug, Clone)]
pub struct LevelGenerator {
    config: GeneratorConfig,
    registry: TileRegistry,
}

impl LevelGenerator {
    pub fn new(config: GeneratorConfig) -> Result<Self, ConfigError> {
        Self::with_registry(config, TileRegistry::standard())
    }

    /// Use an existing tile catalog, so tiles of the generated level compare
    /// equal to tiles handed out by `registry`
    pub fn with_registry(
        config: GeneratorConfig,
        registry: TileRegistry,
    ) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self { config, registry })
    }

    pub fn config(&self) -> &GeneratorConfig {
        &self.config
    }

    pub fn registry(&self) -> &TileRegistry {
        &self.registry
    }

    /// Generate a level named after the stream's seed
    pub fn generate(&self, rng: &mut Random) -> Level {
        let name = format!("Level {}", rng.seed());
        self.generate_named(name, rng)
    }

    pub fn generate_named(&self, name: impl Into<String>, rng: &mut Random) -> Level {
        let name = name.into();
        let mut stats = GenerationStats::default();

        let mut grid = TileGrid::new(self.config.width, self.config.height);
        self.carve_border(&mut grid);

        let mut rooms = self.place_rooms(&mut grid, rng, &mut stats);
        self.connect_rooms(&mut grid, &mut rooms, &mut stats);

        let stairs_up = rooms.first().and_then(RoomData::world_floor_center);
        if let Some(stairs) = stairs_up {
            grid.set(stairs, self.registry.stairs_up().with_flags(TileFlags::IS_ROOM));
        }

        info!(
            %name,
            rooms = stats.rooms_placed,
            attempts = stats.attempts,
            halls = stats.halls_carved,
            halls_failed = stats.halls_failed,
            "generated level"
        );

        Level::new(name, grid, stairs_up, rooms, stats)
    }

    fn carve_border(&self, grid: &mut TileGrid) {
        let bounds = grid.bounds();
        let granite = self.registry.granite();
        for p in bounds.points() {
            if bounds.is_border(p) {
                grid.set(p, granite.clone());
            }
        }
    }

    fn place_rooms(
        &self,
        grid: &mut TileGrid,
        rng: &mut Random,
        stats: &mut GenerationStats,
    ) -> Vec<RoomData> {
        let generator = RoomGenerator::new(&self.registry);
        let mut rooms = Vec::new();

        for attempt in 0..self.config.placement_attempts {
            stats.attempts += 1;
            let mut room = generator.generate_random(rng, &self.config.room_size_weights);
            let total = room.total_area();

            // Keep the whole footprint clear of the border
            let max_x = grid.width() - 1 - total.width;
            let max_y = grid.height() - 1 - total.height;
            if max_x < 1 || max_y < 1 {
                trace!(attempt, size = %room.size(), "room does not fit level");
                continue;
            }

            let offset = Point::new(rng.range_inclusive(1, max_x), rng.range_inclusive(1, max_y));
            let footprint = total.translate(offset);
            if !grid.is_area_empty(&footprint) {
                trace!(attempt, %footprint, "room placement rejected");
                continue;
            }

            let id = RoomId(rooms.len());
            if let Some(tiles) = room.place(offset) {
                grid.insert(offset, &tiles);
            }
            debug!(room = %id, size = %room.size(), %offset, "placed room");
            rooms.push(room);
        }

        stats.rooms_placed = rooms.len();
        rooms
    }

    fn connect_rooms(
        &self,
        grid: &mut TileGrid,
        rooms: &mut [RoomData],
        stats: &mut GenerationStats,
    ) {
        let n = rooms.len();
        if n < 2 {
            return;
        }

        let halls = HallGenerator::from_config(&self.registry, &self.config);
        for i in 0..n {
            let (a, b) = (RoomId(i), RoomId((i + 1) % n));
            match halls.connect(grid, rooms, a, b) {
                Ok(_) => stats.halls_carved += 1,
                Err(err) => {
                    warn!(from = %a, to = %b, %err, "could not carve hallway");
                    stats.halls_failed += 1;
                }
            }
        }
    }
}
