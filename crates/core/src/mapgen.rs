//! Procedural level generation split into one submodule per pipeline stage.

pub mod model;
pub mod templates;

pub(crate) mod assemble;
mod corridors;
mod generator;
mod partition;
mod roads;
mod seed;
mod spanning;
mod spawns;

pub use generator::MapGenerator;
pub use model::{EnemySpawn, PlayerStart, Road, TilePlacement, Zone, ZoneId, ZoneRect};
pub use roads::road_length;
pub use templates::{RoomTemplate, TemplateSet};

use crate::config::GenerationConfig;
use crate::context::LevelContext;
use crate::error::MapGenError;

/// Generates a level from the default configuration with the built-in templates.
pub fn generate_level(seed: u64) -> Result<LevelContext, MapGenError> {
    MapGenerator::new(GenerationConfig::with_seed(seed))?.generate()
}
