//! delve-core: procedural dungeon level generation
//!
//! This crate contains all generation logic with no I/O dependencies. A
//! level is built from a [`GeneratorConfig`] and a seeded [`Random`] stream;
//! the same seed and configuration always produce the same level.
//!
//! ```
//! use delve_core::{GeneratorConfig, LevelGenerator, Random};
//!
//! let generator = LevelGenerator::new(GeneratorConfig::default()).unwrap();
//! let level = generator.generate(&mut Random::new(42));
//! assert_eq!(level.width(), 76);
//! ```

pub mod config;
pub mod consts;
pub mod dungeon;
pub mod error;
pub mod pathfind;
pub mod rng;

pub use config::{GeneratorConfig, HallwayCosts};
pub use dungeon::{Level, LevelGenerator, Point, Rect, TileGrid, TileRegistry};
pub use error::{ConfigError, HallError};
pub use pathfind::{MovementCost, PathFinder, StepCost};
pub use rng::Random;
