use std::rc::Rc;

use anyhow::{Context, Result, bail};
use clap::Parser;
use dungeon_core::pathfinding::{Locate, WorldAnchor};
use dungeon_core::{
    AdaptivePathfinder, FollowEvent, GenerationConfig, GridPos, LevelContext, MapGenerator, Path,
    PathFollower, SearchTarget, TileGrid,
};
use rand_chacha::{
    ChaCha8Rng,
    rand_core::{Rng, SeedableRng},
};
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

/// Chebyshev distance at which the ghost notices the hero.
const TRIGGER_RADIUS: u32 = 7;
const HERO_SPEED: f32 = 2.0;
const GHOST_SPEED: f32 = 2.4;

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Args {
    #[arg(short, long, default_value_t = 42)]
    seed: u64,
    #[arg(short, long, default_value_t = 6000)]
    ticks: u32,
    /// Seconds per tick
    #[arg(long, default_value_t = 0.05)]
    dt: f32,
}

#[derive(Debug, Default)]
struct ChaseStats {
    searches: u32,
    skipped: u32,
    expansions: usize,
    max_expansions: usize,
    ghost_steps: u32,
    hero_legs: u32,
    contacts: u32,
}

fn check_path(grid: &TileGrid, start: GridPos, path: &Path) -> Result<()> {
    let mut previous = start;
    for step in path.steps() {
        if !grid.is_passable(step) {
            bail!("path from {start:?} enters impassable tile {step:?}");
        }
        if previous.chebyshev(step) != 1 {
            bail!("path from {start:?} jumps from {previous:?} to {step:?}");
        }
        let corner_x = GridPos::new(step.x, previous.y);
        let corner_y = GridPos::new(previous.x, step.y);
        if !grid.is_passable(corner_x) || !grid.is_passable(corner_y) {
            bail!("path from {start:?} cuts the corner {previous:?} -> {step:?}");
        }
        previous = step;
    }
    Ok(())
}

fn hero_in_range(ghost: &PathFollower, anchor: &WorldAnchor) -> bool {
    ghost.tile().chebyshev(anchor.tile()) <= TRIGGER_RADIUS
}

/// The enemy spawn nearest to the player that stands on floor.
fn ghost_spawn(level: &LevelContext) -> Result<GridPos> {
    let player = level.player().tile;
    level
        .enemies()
        .values()
        .map(|enemy| enemy.tile)
        .filter(|&tile| level.grid().is_passable(tile))
        .min_by_key(|&tile| tile.chebyshev(player))
        .context("No enemy spawn stands on a floor tile")
}

fn main() -> Result<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt().with_env_filter(filter).init();

    let args = Args::parse();
    let level = MapGenerator::new(GenerationConfig::with_seed(args.seed))
        .context("Failed to set up the generator")?
        .generate()
        .context("Level generation failed")?;
    let grid = level.grid();
    let mut rng = ChaCha8Rng::seed_from_u64(args.seed);

    let mut hero = PathFollower::new(level.player().tile, HERO_SPEED);
    let mut hero_path = Path::default();
    let mut hero_router = AdaptivePathfinder::new(&level);
    let anchor = Rc::new(WorldAnchor::new(hero.position()));

    let spawn = ghost_spawn(&level)?;
    let mut ghost = PathFollower::new(spawn, GHOST_SPEED);
    let mut ghost_pathfinder = AdaptivePathfinder::new(&level);
    let mut target = SearchTarget::thing(anchor.clone());
    let mut in_contact = false;
    let mut stats = ChaseStats::default();

    println!("Chasing on seed {} for {} ticks from {spawn:?}", args.seed, args.ticks);
    for tick in 0..args.ticks {
        match hero.advance(args.dt, &mut hero_path) {
            FollowEvent::Finished => {
                let zones = level.zones();
                let goal = zones[rng.next_u64() as usize % zones.len()].rect.center();
                let from = hero.tile();
                let mut leg = SearchTarget::place(goal.x, goal.y);
                hero_path = hero_router.search(from.x, from.y, &mut leg).clone();
                check_path(grid, from, &hero_path)
                    .with_context(|| format!("hero leg at tick {tick}"))?;
                stats.hero_legs += 1;
            }
            // The ghost tracks the tile the hero last stood on.
            FollowEvent::Arrived(_) => anchor.set(hero.position()),
            FollowEvent::Moving => {}
        }

        if ghost.is_idle() && hero_in_range(&ghost, &anchor) {
            let from = ghost.tile();
            let steps = ghost_pathfinder.search(from.x, from.y, &mut target).len();
            let expansions = ghost_pathfinder.last_expansions();
            if expansions == 0 {
                stats.skipped += 1;
            } else {
                stats.searches += 1;
                stats.expansions += expansions;
                stats.max_expansions = stats.max_expansions.max(expansions);
            }
            check_path(grid, from, ghost_pathfinder.path())
                .with_context(|| format!("ghost search at tick {tick}"))?;
            debug!(tick, ?from, steps, expansions, "ghost searched");
        }
        if let FollowEvent::Arrived(_) = ghost.advance(args.dt, ghost_pathfinder.path_mut()) {
            stats.ghost_steps += 1;
        }

        let touching = ghost.tile().chebyshev(hero.tile()) <= 1;
        if touching && !in_contact {
            stats.contacts += 1;
        }
        in_contact = touching;
    }

    info!(?stats, "chase finished");
    println!("Searches: {} ({} skipped)", stats.searches, stats.skipped);
    if stats.searches > 0 {
        println!(
            "Expansions: {} total, {:.1} mean, {} max",
            stats.expansions,
            stats.expansions as f64 / f64::from(stats.searches),
            stats.max_expansions
        );
    }
    println!("Ghost steps: {}, hero legs: {}", stats.ghost_steps, stats.hero_legs);
    println!("Contacts: {}", stats.contacts);
    Ok(())
}

#[cfg(test)]
mod tests {
    use dungeon_core::generate_level;
    use dungeon_core::transform::actor_anchor;

    use super::*;

    #[test]
    fn ghost_notices_the_hero_only_inside_the_trigger_radius() {
        let ghost = PathFollower::new(GridPos::new(20, 20), GHOST_SPEED);
        let anchor = WorldAnchor::new(actor_anchor(GridPos::new(27, 14)));
        assert!(hero_in_range(&ghost, &anchor));

        anchor.set(actor_anchor(GridPos::new(28, 20)));
        assert!(!hero_in_range(&ghost, &anchor));
    }

    #[test]
    fn ghost_spawns_on_floor() {
        let level = generate_level(42).expect("level");
        let spawn = ghost_spawn(&level).expect("spawn");
        assert!(level.grid().is_passable(spawn));
    }
}
