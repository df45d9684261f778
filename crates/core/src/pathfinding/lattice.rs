//! Per-cell search cache, allocated for every passable tile and reused across searches.

use crate::grid::{GRID_SIZE, TileGrid};
use crate::types::{GridPos, is_floor_code};

#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub(super) struct LatticeCell {
    pub(super) pre: Option<GridPos>,
    pub(super) g: f64,
    pub(super) h: f64,
    /// Search generation that last wrote `g`/`h`; 0 means no usable history.
    pub(super) tag: usize,
}

pub(super) struct Lattice {
    cells: Vec<Option<LatticeCell>>,
}

impl Lattice {
    pub(super) fn new() -> Self {
        Self { cells: vec![None; (GRID_SIZE * GRID_SIZE) as usize] }
    }

    /// Drops all history and re-reads passability.
    pub(super) fn reset(&mut self, grid: &TileGrid) {
        for (slot, &code) in self.cells.iter_mut().zip(grid.codes()) {
            *slot = is_floor_code(code).then(LatticeCell::default);
        }
    }

    pub(super) fn is_passable(&self, pos: GridPos) -> bool {
        self.get(pos).is_some()
    }

    pub(super) fn get(&self, pos: GridPos) -> Option<&LatticeCell> {
        Self::index(pos).and_then(|index| self.cells[index].as_ref())
    }

    pub(super) fn get_mut(&mut self, pos: GridPos) -> Option<&mut LatticeCell> {
        Self::index(pos).and_then(|index| self.cells[index].as_mut())
    }

    fn index(pos: GridPos) -> Option<usize> {
        TileGrid::in_bounds(pos).then(|| (pos.y * GRID_SIZE + pos.x) as usize)
    }
}
