use std::io;
use std::path::PathBuf;

use thiserror::Error;

use crate::types::Direction;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("region must be between 1x1 and {limit}x{limit}, got {width}x{height}")]
    RegionOutOfRange { width: i32, height: i32, limit: i32 },
    #[error("max_zone_size must be at least 3, got {0}")]
    MaxZoneSizeTooSmall(i32),
    #[error("chance_to_add_road must be at least 1")]
    ZeroRoadChance,
    #[error("enemy_kinds must be at least 1")]
    NoEnemyKinds,
    #[error("failed to read config {path}: {source}")]
    Read { path: PathBuf, source: io::Error },
    #[error("failed to parse config {path}: {source}")]
    Parse { path: PathBuf, source: toml::de::Error },
}

#[derive(Debug, Error)]
pub enum MapGenError {
    #[error("template `{template}` line {line} token {column}: `{token}` is not `..` or hex")]
    InvalidTemplateToken { template: String, line: usize, column: usize, token: String },
    #[error("no room templates available")]
    NoTemplates,
    #[error("failed to read templates from {path}: {source}")]
    TemplateIo { path: PathBuf, source: io::Error },
    #[error("road side {0:?} cannot be carved; only cardinal sides connect zones")]
    UnsupportedRoadSide(Direction),
    #[error(transparent)]
    Config(#[from] ConfigError),
}

#[derive(Debug, Error)]
pub enum GridDumpError {
    #[error("grid dump has {found} lines, expected {expected} grid lines plus an anchor line")]
    LineCount { found: usize, expected: usize },
    #[error("grid dump line {line} has {found} tokens, expected {expected}")]
    TokenCount { line: usize, found: usize, expected: usize },
    #[error("grid dump line {line} token {column}: `{token}` is not a tile code")]
    BadToken { line: usize, column: usize, token: String },
}
