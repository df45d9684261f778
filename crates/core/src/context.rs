//! The generated level handed to pathfinders and external collaborators.

use slotmap::SlotMap;
use xxhash_rust::xxh3::xxh3_64;

use crate::grid::TileGrid;
use crate::mapgen::assemble::tile_placements;
use crate::mapgen::model::{EnemySpawn, PlayerStart, Road, TilePlacement, Zone, ZoneId};
use crate::types::EnemyId;

/// Everything one generation run produced. Lives until the next regeneration.
#[derive(Clone, Debug)]
pub struct LevelContext {
    seed: u64,
    grid: TileGrid,
    zones: Vec<Zone>,
    player: PlayerStart,
    enemies: SlotMap<EnemyId, EnemySpawn>,
}

impl LevelContext {
    pub(crate) fn new(
        seed: u64,
        grid: TileGrid,
        zones: Vec<Zone>,
        player: PlayerStart,
        spawns: Vec<EnemySpawn>,
    ) -> Self {
        let mut enemies = SlotMap::with_key();
        for spawn in spawns {
            enemies.insert(spawn);
        }
        Self { seed, grid, zones, player, enemies }
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }

    pub fn grid(&self) -> &TileGrid {
        &self.grid
    }

    pub fn zones(&self) -> &[Zone] {
        &self.zones
    }

    pub fn zone(&self, id: ZoneId) -> Option<&Zone> {
        self.zones.get(id.0)
    }

    pub fn player(&self) -> &PlayerStart {
        &self.player
    }

    pub fn enemies(&self) -> &SlotMap<EnemyId, EnemySpawn> {
        &self.enemies
    }

    /// Hands a spawn over to the collaborator that instantiates it.
    pub fn take_enemy(&mut self, id: EnemyId) -> Option<EnemySpawn> {
        self.enemies.remove(id)
    }

    /// Both halves of every road that survived selection.
    pub fn kept_roads(&self) -> impl Iterator<Item = &Road> {
        self.zones.iter().flat_map(|zone| zone.roads.iter())
    }

    pub fn tile_placements(&self) -> Vec<TilePlacement> {
        tile_placements(&self.grid)
    }

    /// Little-endian encoding of the grid, zones, roads and spawns.
    pub fn canonical_bytes(&self) -> Vec<u8> {
        let mut bytes = Vec::with_capacity(self.grid.codes().len() * 2 + 1024);
        bytes.extend_from_slice(&self.seed.to_le_bytes());
        for code in self.grid.codes() {
            bytes.extend_from_slice(&code.to_le_bytes());
        }

        bytes.extend_from_slice(&(self.zones.len() as u32).to_le_bytes());
        for zone in &self.zones {
            for value in [zone.rect.x, zone.rect.y, zone.rect.width, zone.rect.height] {
                bytes.extend_from_slice(&value.to_le_bytes());
            }
            bytes.extend_from_slice(&(zone.roads.len() as u32).to_le_bytes());
            for road in &zone.roads {
                bytes.extend_from_slice(&(road.to.0 as u32).to_le_bytes());
                bytes.extend_from_slice(&road.length.to_le_bytes());
                bytes.push(road.side as u8);
                bytes.extend_from_slice(&road.crossing.x.to_le_bytes());
                bytes.extend_from_slice(&road.crossing.y.to_le_bytes());
                bytes.push(u8::from(road.kept) | (u8::from(road.tree) << 1));
            }
        }

        bytes.extend_from_slice(&(self.player.zone.0 as u32).to_le_bytes());
        bytes.extend_from_slice(&self.player.tile.x.to_le_bytes());
        bytes.extend_from_slice(&self.player.tile.y.to_le_bytes());
        for enemy in self.enemies.values() {
            bytes.extend_from_slice(&(enemy.kind as u32).to_le_bytes());
            bytes.extend_from_slice(&(enemy.zone.0 as u32).to_le_bytes());
            bytes.extend_from_slice(&enemy.tile.x.to_le_bytes());
            bytes.extend_from_slice(&enemy.tile.y.to_le_bytes());
        }
        bytes
    }

    pub fn fingerprint(&self) -> u64 {
        xxh3_64(&self.canonical_bytes())
    }
}
