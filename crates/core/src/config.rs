//! Generation settings, loadable from TOML.

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;
use crate::grid::GRID_SIZE;

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GenerationConfig {
    pub seed: u64,
    pub region_width: i32,
    pub region_height: i32,
    /// Zones are split until neither side exceeds this.
    pub max_zone_size: i32,
    /// Each zone keeps one extra road with probability `1 / chance_to_add_road`.
    pub chance_to_add_road: u32,
    pub enemy_kinds: usize,
    pub template_dir: Option<PathBuf>,
}

impl Default for GenerationConfig {
    fn default() -> Self {
        Self {
            seed: 0,
            region_width: GRID_SIZE,
            region_height: GRID_SIZE,
            max_zone_size: 50,
            chance_to_add_road: 10,
            enemy_kinds: 1,
            template_dir: None,
        }
    }
}

impl GenerationConfig {
    pub fn with_seed(seed: u64) -> Self {
        Self { seed, ..Self::default() }
    }

    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path)
            .map_err(|source| ConfigError::Read { path: path.to_path_buf(), source })?;
        let config: Self = toml::from_str(&content)
            .map_err(|source| ConfigError::Parse { path: path.to_path_buf(), source })?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        let region_ok = (1..=GRID_SIZE).contains(&self.region_width)
            && (1..=GRID_SIZE).contains(&self.region_height);
        if !region_ok {
            return Err(ConfigError::RegionOutOfRange {
                width: self.region_width,
                height: self.region_height,
                limit: GRID_SIZE,
            });
        }
        if self.max_zone_size < 3 {
            return Err(ConfigError::MaxZoneSizeTooSmall(self.max_zone_size));
        }
        if self.chance_to_add_road == 0 {
            return Err(ConfigError::ZeroRoadChance);
        }
        if self.enemy_kinds == 0 {
            return Err(ConfigError::NoEnemyKinds);
        }
        Ok(())
    }
}
