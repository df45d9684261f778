//! Composites zone tile arrays into the global grid.

use crate::grid::TileGrid;
use crate::transform::grid_to_world;
use crate::types::{TileKind, VOID_TILE};

use super::model::{TilePlacement, Zone};

pub(crate) fn assemble_grid(zones: &[Zone]) -> TileGrid {
    let mut grid = TileGrid::new();
    for zone in zones {
        for (pos, code) in zone.global_cells() {
            if code != VOID_TILE {
                grid.set(pos, code);
            }
        }
    }
    grid
}

/// One placement per non-void cell, x-major.
pub(crate) fn tile_placements(grid: &TileGrid) -> Vec<TilePlacement> {
    grid.occupied()
        .map(|(pos, code)| TilePlacement {
            pos,
            code,
            kind: TileKind::classify(code),
            world: grid_to_world(pos),
        })
        .collect()
}
