//! Level generator configuration
//!
//! Every field has a default, so a partial JSON document deserializes into a
//! complete configuration.

use serde::{Deserialize, Serialize};

use crate::consts::{
    HALL_BASE_COST, HALL_ROOM_WALL_COST, HALL_TURN_PENALTY, LEVEL_HEIGHT, LEVEL_WIDTH,
    MAX_SEARCH_STEPS, PLACEMENT_ATTEMPTS, ROOM_SIZE_WEIGHTS,
};
use crate::error::ConfigError;

/// Edge costs used when routing hallways
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct HallwayCosts {
    /// Cost of digging through untouched stone
    pub base: u32,
    /// Added whenever the hallway changes direction outside a room
    pub turn_penalty: u32,
    /// Cost of stepping onto a room wall, where a door will be cut
    pub room_wall: u32,
}

impl HallwayCosts {
    /// Cost of following an existing hallway
    pub fn reuse(&self) -> u32 {
        self.base / 3
    }
}

impl Default for HallwayCosts {
    fn default() -> Self {
        Self {
            base: HALL_BASE_COST,
            turn_penalty: HALL_TURN_PENALTY,
            room_wall: HALL_ROOM_WALL_COST,
        }
    }
}

/// Everything the level generator needs besides a seed
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneratorConfig {
    pub width: i32,
    pub height: i32,
    /// Rooms tried before placement stops
    pub placement_attempts: u32,
    /// Pathfinder expansion ceiling per hallway
    pub max_search_steps: usize,
    /// Relative weights of small, medium, large and huge rooms
    pub room_size_weights: [u32; 4],
    pub hallway: HallwayCosts,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            width: LEVEL_WIDTH,
            height: LEVEL_HEIGHT,
            placement_attempts: PLACEMENT_ATTEMPTS,
            max_search_steps: MAX_SEARCH_STEPS,
            room_size_weights: ROOM_SIZE_WEIGHTS,
            hallway: HallwayCosts::default(),
        }
    }
}

impl GeneratorConfig {
    /// Default configuration with different level dimensions
    pub fn with_size(width: i32, height: i32) -> Self {
        Self {
            width,
            height,
            ..Self::default()
        }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.width < 3 || self.height < 3 {
            return Err(ConfigError::LevelTooSmall {
                width: self.width,
                height: self.height,
            });
        }
        if self.placement_attempts == 0 {
            return Err(ConfigError::NoPlacementAttempts);
        }
        if self.max_search_steps == 0 {
            return Err(ConfigError::NoSearchSteps);
        }
        if self.hallway.reuse() == 0 {
            return Err(ConfigError::HallwayBaseCost {
                base: self.hallway.base,
            });
        }
        if self.room_size_weights.iter().all(|&w| w == 0) {
            return Err(ConfigError::NoRoomSizes);
        }
        Ok(())
    }
}
