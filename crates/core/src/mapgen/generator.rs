//! High-level map generation orchestration: partition, stamp, connect, carve, assemble.

use tracing::debug;

use crate::config::GenerationConfig;
use crate::context::LevelContext;
use crate::error::MapGenError;

use super::assemble::assemble_grid;
use super::corridors::carve_corridors;
use super::model::{Zone, ZoneId, ZoneRect};
use super::partition::partition_region;
use super::roads::build_road_graph;
use super::seed::{StageRng, Stream};
use super::spanning::{add_interest_roads, discard_unkept, select_spanning_tree};
use super::spawns::plan_spawns;
use super::templates::{TemplateSet, stamp_zones};

pub struct MapGenerator {
    config: GenerationConfig,
    templates: TemplateSet,
}

impl MapGenerator {
    /// Validates `config` and loads its templates, built-in ones unless a directory is set.
    pub fn new(config: GenerationConfig) -> Result<Self, MapGenError> {
        let templates = match &config.template_dir {
            Some(dir) => TemplateSet::load_dir(dir)?,
            None => TemplateSet::builtin()?,
        };
        Self::with_templates(config, templates)
    }

    pub fn with_templates(
        config: GenerationConfig,
        templates: TemplateSet,
    ) -> Result<Self, MapGenError> {
        config.validate()?;
        Ok(Self { config, templates })
    }

    pub fn config(&self) -> &GenerationConfig {
        &self.config
    }

    pub fn generate(&self) -> Result<LevelContext, MapGenError> {
        self.generate_with_seed(self.config.seed)
    }

    pub fn generate_with_seed(&self, seed: u64) -> Result<LevelContext, MapGenError> {
        let region = ZoneRect {
            x: 0,
            y: 0,
            width: self.config.region_width,
            height: self.config.region_height,
        };
        let mut partition_rng = StageRng::new(seed, Stream::Partition);
        let mut zones: Vec<Zone> =
            partition_region(region, self.config.max_zone_size, &mut partition_rng)
                .into_iter()
                .enumerate()
                .map(|(index, rect)| Zone::new(ZoneId(index), rect))
                .collect();
        debug!(seed, zones = zones.len(), "partitioned region");

        stamp_zones(&mut zones, &self.templates, &mut StageRng::new(seed, Stream::Templates));

        build_road_graph(&mut zones);
        let spanning = select_spanning_tree(&mut zones);
        let interest = add_interest_roads(
            &mut zones,
            self.config.chance_to_add_road,
            &mut StageRng::new(seed, Stream::Interest),
        );
        discard_unkept(&mut zones);
        debug!(
            candidates = spanning.candidates,
            tree_roads = spanning.unions,
            interest_roads = interest,
            "selected roads"
        );

        let corridors = carve_corridors(&mut zones)?;
        let grid = assemble_grid(&zones);
        debug!(corridors, passable = grid.passable_count(), "assembled grid");

        let spawns =
            plan_spawns(&zones, self.config.enemy_kinds, &mut StageRng::new(seed, Stream::Spawns));
        debug!(
            start_zone = spawns.player.zone.0,
            enemies = spawns.enemies.len(),
            "placed spawns"
        );

        Ok(LevelContext::new(seed, grid, zones, spawns.player, spawns.enemies))
    }
}
