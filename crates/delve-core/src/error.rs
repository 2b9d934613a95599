//! Recoverable generation errors
//!
//! Bounds and placement violations are programmer errors and panic. Only the
//! conditions below are reported to callers.

use thiserror::Error;

use crate::dungeon::Point;

/// Rejected generator configuration
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    #[error("Level must be at least 3x3, got {width}x{height}")]
    LevelTooSmall { width: i32, height: i32 },

    #[error("Placement attempt budget must be positive")]
    NoPlacementAttempts,

    #[error("Pathfinder step ceiling must be positive")]
    NoSearchSteps,

    #[error("Hallway base cost {base} leaves no positive reuse cost (base / 3)")]
    HallwayBaseCost { base: u32 },

    #[error("Room size weights must not all be zero")]
    NoRoomSizes,
}

/// Failure to carve a hallway between two rooms
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum HallError {
    #[error("No hallway route from {from} to {to}")]
    Unreachable { from: Point, to: Point },

    #[error("Room {0} has not been placed in the level")]
    Unplaced(usize),
}
