pub mod config;
pub mod context;
pub mod error;
pub mod grid;
pub mod grid_dump;
pub mod mapgen;
pub mod movement;
pub mod pathfinding;
pub mod transform;
pub mod types;

pub use config::GenerationConfig;
pub use context::LevelContext;
pub use error::{ConfigError, GridDumpError, MapGenError};
pub use grid::{GRID_SIZE, TileGrid};
pub use mapgen::{MapGenerator, generate_level};
pub use movement::{FollowEvent, PathFollower};
pub use pathfinding::{AdaptivePathfinder, Path, SearchTarget};
pub use types::*;
