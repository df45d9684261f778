//! The global tile grid: single source of truth for rendering and passability.

use crate::types::{GridPos, TileCode, TileKind, VOID_TILE, is_floor_code};

pub const GRID_SIZE: i32 = 256;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TileGrid {
    codes: Vec<TileCode>,
}

impl Default for TileGrid {
    fn default() -> Self {
        Self::new()
    }
}

impl TileGrid {
    pub fn new() -> Self {
        Self { codes: vec![VOID_TILE; (GRID_SIZE * GRID_SIZE) as usize] }
    }

    pub fn in_bounds(pos: GridPos) -> bool {
        pos.x >= 0 && pos.y >= 0 && pos.x < GRID_SIZE && pos.y < GRID_SIZE
    }

    /// Out-of-grid reads are void.
    pub fn code(&self, pos: GridPos) -> TileCode {
        if !Self::in_bounds(pos) {
            return VOID_TILE;
        }
        self.codes[Self::index(pos)]
    }

    pub fn kind(&self, pos: GridPos) -> TileKind {
        TileKind::classify(self.code(pos))
    }

    pub fn is_passable(&self, pos: GridPos) -> bool {
        is_floor_code(self.code(pos))
    }

    pub fn set(&mut self, pos: GridPos, code: TileCode) {
        if !Self::in_bounds(pos) {
            return;
        }
        let index = Self::index(pos);
        self.codes[index] = code;
    }

    /// Fills the inclusive rectangle `from..=to`, clipped to the grid.
    pub fn fill_rect(&mut self, from: GridPos, to: GridPos, code: TileCode) {
        for x in from.x.min(to.x)..=from.x.max(to.x) {
            for y in from.y.min(to.y)..=from.y.max(to.y) {
                self.set(GridPos { x, y }, code);
            }
        }
    }

    /// Non-void cells in x-major order.
    pub fn occupied(&self) -> impl Iterator<Item = (GridPos, TileCode)> + '_ {
        (0..GRID_SIZE).flat_map(move |x| {
            (0..GRID_SIZE).filter_map(move |y| {
                let pos = GridPos { x, y };
                let code = self.code(pos);
                (code != VOID_TILE).then_some((pos, code))
            })
        })
    }

    /// Row-major codes, `y * GRID_SIZE + x`.
    pub fn codes(&self) -> &[TileCode] {
        &self.codes
    }

    pub fn passable_count(&self) -> usize {
        self.codes.iter().filter(|&&code| is_floor_code(code)).count()
    }

    fn index(pos: GridPos) -> usize {
        (pos.y as usize) * (GRID_SIZE as usize) + (pos.x as usize)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn out_of_grid_reads_are_void_and_writes_are_ignored() {
        let mut grid = TileGrid::new();
        grid.set(GridPos::new(-1, 4), 5);
        grid.set(GridPos::new(256, 0), 5);
        assert_eq!(grid.code(GridPos::new(-1, 4)), VOID_TILE);
        assert_eq!(grid.code(GridPos::new(0, 256)), VOID_TILE);
        assert_eq!(grid.occupied().count(), 0);
    }

    #[test]
    fn passability_follows_tile_codes() {
        let mut grid = TileGrid::new();
        grid.fill_rect(GridPos::new(2, 2), GridPos::new(4, 3), 12);
        grid.set(GridPos::new(3, 3), 226);
        assert!(grid.is_passable(GridPos::new(2, 2)));
        assert!(!grid.is_passable(GridPos::new(3, 3)));
        assert!(!grid.is_passable(GridPos::new(9, 9)));
        assert_eq!(grid.passable_count(), 5);
        assert_eq!(grid.occupied().count(), 6);
    }
}
