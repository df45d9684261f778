//! Player start and enemy spawn placement.

use crate::transform::{actor_anchor, grid_to_world_f};
use crate::types::GridPos;

use super::model::{EnemySpawn, PlayerStart, Zone, ZoneId};
use super::seed::StageRng;

/// Offsets from the zone center, used in order.
const ENEMY_OFFSETS: [(i32, i32); 4] = [(2, 2), (2, -2), (-2, -2), (-2, 2)];
const MAX_ENEMIES_PER_ZONE: usize = 3;

pub(crate) struct SpawnPlan {
    pub(crate) player: PlayerStart,
    pub(crate) enemies: Vec<EnemySpawn>,
}

/// Picks the start zone, then fills every other zone with one to three enemies.
/// `zones` must not be empty.
pub(crate) fn plan_spawns(zones: &[Zone], enemy_kinds: usize, rng: &mut StageRng) -> SpawnPlan {
    let start = &zones[rng.index(zones.len())];
    let rect = start.rect;
    let player = PlayerStart {
        zone: start.id,
        tile: rect.center(),
        world: grid_to_world_f(
            rect.x as f32 + rect.width as f32 / 2.0,
            rect.y as f32 + rect.height as f32 / 2.0,
        ),
    };

    let mut enemies = Vec::new();
    for zone in zones.iter().filter(|zone| zone.id != start.id) {
        let count = rng.range_inclusive(1, MAX_ENEMIES_PER_ZONE);
        for &(dx, dy) in &ENEMY_OFFSETS[..count] {
            let center = zone.rect.center();
            let tile = GridPos::new(center.x + dx, center.y + dy);
            enemies.push(enemy_at(zone.id, tile, rng.index(enemy_kinds)));
        }
    }
    SpawnPlan { player, enemies }
}

fn enemy_at(zone: ZoneId, tile: GridPos, kind: usize) -> EnemySpawn {
    EnemySpawn { kind, zone, tile, world: actor_anchor(tile) }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mapgen::model::ZoneRect;
    use crate::mapgen::seed::Stream;
    use crate::transform::world_to_grid;

    fn zones() -> Vec<Zone> {
        (0..6)
            .map(|index| {
                let rect = ZoneRect { x: index * 30, y: 10, width: 21, height: 30 };
                Zone::new(ZoneId(index as usize), rect)
            })
            .collect()
    }

    #[test]
    fn start_zone_has_no_enemies_and_others_have_one_to_three() {
        let zones = zones();
        let mut rng = StageRng::new(8, Stream::Spawns);
        let plan = plan_spawns(&zones, 3, &mut rng);

        for zone in &zones {
            let count = plan.enemies.iter().filter(|enemy| enemy.zone == zone.id).count();
            if zone.id == plan.player.zone {
                assert_eq!(count, 0);
            } else {
                assert!((1..=3).contains(&count), "zone {:?} has {count} enemies", zone.id);
            }
        }
        assert!(plan.enemies.iter().all(|enemy| enemy.kind < 3));
    }

    #[test]
    fn enemies_stand_on_offset_tiles_around_the_center() {
        let zones = zones();
        let mut rng = StageRng::new(21, Stream::Spawns);
        let plan = plan_spawns(&zones, 1, &mut rng);

        for enemy in &plan.enemies {
            let center = zones[enemy.zone.0].rect.center();
            let offset = (enemy.tile.x - center.x, enemy.tile.y - center.y);
            assert!(ENEMY_OFFSETS.contains(&offset), "unexpected offset {offset:?}");
            assert_eq!(world_to_grid(enemy.world), enemy.tile);
        }
    }

    #[test]
    fn player_world_position_uses_the_fractional_center() {
        let zones = vec![Zone::new(ZoneId(0), ZoneRect { x: 10, y: 20, width: 21, height: 30 })];
        let mut rng = StageRng::new(0, Stream::Spawns);
        let plan = plan_spawns(&zones, 1, &mut rng);

        assert_eq!(plan.player.tile, GridPos::new(20, 35));
        assert_eq!(plan.player.world, grid_to_world_f(20.5, 35.0));
        assert!(plan.enemies.is_empty());
    }
}
