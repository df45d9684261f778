use std::fs;
use std::io;
use std::path::PathBuf;

use anyhow::{Context, Result, bail};
use clap::{Parser, Subcommand};
use dungeon_core::grid_dump::{write_grid_dump, zone_outline};
use dungeon_core::{
    AdaptivePathfinder, GenerationConfig, GridPos, LevelContext, MapGenerator, SearchTarget,
};
use serde::Serialize;
use tracing::info;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "dungeon", author, version, about, long_about = None)]
struct Args {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Generate a level and print a summary
    Generate {
        /// Overrides the seed from the config file
        #[arg(short, long)]
        seed: Option<u64>,
        /// TOML generation config
        #[arg(short, long)]
        config: Option<PathBuf>,
        /// Write the tile grid dump here
        #[arg(long)]
        dump: Option<PathBuf>,
        /// Write the zone outline here
        #[arg(long)]
        outline: Option<PathBuf>,
        /// Print the summary as JSON
        #[arg(long)]
        json: bool,
    },
    /// Run a place search on a generated level and print the steps
    Path {
        #[arg(short, long, default_value_t = 42)]
        seed: u64,
        /// Start tile as X,Y
        #[arg(long, value_parser = parse_tile)]
        from: GridPos,
        /// Target tile as X,Y
        #[arg(long, value_parser = parse_tile)]
        to: GridPos,
    },
}

#[derive(Serialize)]
struct LevelSummary {
    seed: u64,
    zones: usize,
    kept_roads: usize,
    tree_roads: usize,
    passable_tiles: usize,
    player_tile: GridPos,
    enemies: usize,
    fingerprint: String,
}

impl LevelSummary {
    fn of(level: &LevelContext) -> Self {
        // Each road is stored once per zone it joins.
        let kept = level.kept_roads().count() / 2;
        let tree = level.kept_roads().filter(|road| road.tree).count() / 2;
        Self {
            seed: level.seed(),
            zones: level.zones().len(),
            kept_roads: kept,
            tree_roads: tree,
            passable_tiles: level.grid().passable_count(),
            player_tile: level.player().tile,
            enemies: level.enemies().len(),
            fingerprint: format!("{:016x}", level.fingerprint()),
        }
    }
}

fn parse_tile(text: &str) -> Result<GridPos, String> {
    let (x, y) = text.split_once(',').ok_or_else(|| format!("expected X,Y, got `{text}`"))?;
    let x = x.trim().parse().map_err(|err| format!("bad X in `{text}`: {err}"))?;
    let y = y.trim().parse().map_err(|err| format!("bad Y in `{text}`: {err}"))?;
    Ok(GridPos::new(x, y))
}

fn load_config(path: Option<&PathBuf>) -> Result<GenerationConfig> {
    match path {
        Some(path) => GenerationConfig::load(path)
            .with_context(|| format!("Failed to load config {}", path.display())),
        None => Ok(GenerationConfig::default()),
    }
}

fn generate(
    seed: Option<u64>,
    config: Option<PathBuf>,
    dump: Option<PathBuf>,
    outline: Option<PathBuf>,
    json: bool,
) -> Result<()> {
    let mut config = load_config(config.as_ref())?;
    if let Some(seed) = seed {
        config.seed = seed;
    }
    let (width, height) = (config.region_width, config.region_height);
    let generator = MapGenerator::new(config).context("Failed to set up the generator")?;
    let level = generator.generate().context("Level generation failed")?;
    info!(seed = level.seed(), zones = level.zones().len(), "generated level");

    if let Some(path) = dump {
        fs::write(&path, write_grid_dump(level.grid(), level.player().tile))
            .with_context(|| format!("Failed to write grid dump {}", path.display()))?;
    }
    if let Some(path) = outline {
        fs::write(&path, zone_outline(level.zones(), width, height))
            .with_context(|| format!("Failed to write zone outline {}", path.display()))?;
    }

    let summary = LevelSummary::of(&level);
    if json {
        serde_json::to_writer_pretty(io::stdout(), &summary)
            .context("Failed to serialize the summary")?;
        println!();
    } else {
        println!("Seed: {}", summary.seed);
        println!("Zones: {}", summary.zones);
        println!("Kept roads: {} ({} in the tree)", summary.kept_roads, summary.tree_roads);
        println!("Passable tiles: {}", summary.passable_tiles);
        println!("Player start: {:?}", summary.player_tile);
        println!("Enemies: {}", summary.enemies);
        println!("Fingerprint: {}", summary.fingerprint);
    }
    Ok(())
}

fn path(seed: u64, from: GridPos, to: GridPos) -> Result<()> {
    let generator = MapGenerator::new(GenerationConfig::with_seed(seed))
        .context("Failed to set up the generator")?;
    let level = generator.generate().context("Level generation failed")?;
    if !level.grid().is_passable(from) {
        bail!("start {from:?} is not a floor tile");
    }

    let mut pathfinder = AdaptivePathfinder::new(&level);
    let path = pathfinder.search(from.x, from.y, &mut SearchTarget::place(to.x, to.y));
    if path.is_empty() && from != to {
        bail!("no path from {from:?} to {to:?}");
    }
    println!("{} steps, cost {:.3}", path.len(), path.cost());
    for step in path.steps() {
        println!("{},{}", step.x, step.y);
    }
    info!(expansions = pathfinder.last_expansions(), "search finished");
    Ok(())
}

fn main() -> Result<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt().with_env_filter(filter).with_writer(io::stderr).init();

    match Args::parse().command {
        Command::Generate { seed, config, dump, outline, json } => {
            generate(seed, config, dump, outline, json)
        }
        Command::Path { seed, from, to } => path(seed, from, to),
    }
}
