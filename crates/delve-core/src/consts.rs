//! Generation constants
//!
//! Defaults for level dimensions, search budgets and the movement cost model.

/// Default level dimensions
pub const LEVEL_WIDTH: i32 = 76;
pub const LEVEL_HEIGHT: i32 = 50;

/// Number of rooms the level generator tries to place before giving up
pub const PLACEMENT_ATTEMPTS: u32 = 150;

/// Pathfinder expansion ceiling
pub const MAX_SEARCH_STEPS: usize = 4096;

/// Thickness of the wall ring carved around every room
pub const WALL_WIDTH: i32 = 1;

/// Default pathfinder movement costs (scaled so diagonal is roughly sqrt(2))
pub const MOVE_STRAIGHT_COST: u32 = 10;
pub const MOVE_DIAGONAL_COST: u32 = 14;

/// Hallway carving costs
pub const HALL_BASE_COST: u32 = 30;
pub const HALL_TURN_PENALTY: u32 = 60;
pub const HALL_ROOM_WALL_COST: u32 = 90;

/// Relative weights of small, medium, large and huge rooms
pub const ROOM_SIZE_WEIGHTS: [u32; 4] = [3, 4, 2, 1];
