//! Public data models for zones, roads and spawn hand-offs.

use serde::{Deserialize, Serialize};

use crate::types::{Direction, GridPos, TileCode, TileKind, VOID_TILE, WorldPos};

/// Index of a zone in the generation arena.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct ZoneId(pub usize);

/// Axis-aligned rectangle with an exclusive far edge.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ZoneRect {
    pub x: i32,
    pub y: i32,
    pub width: i32,
    pub height: i32,
}

impl ZoneRect {
    pub fn right(self) -> i32 {
        self.x + self.width
    }

    pub fn top(self) -> i32 {
        self.y + self.height
    }

    /// Zone-local center, rounded down.
    pub fn local_center(self) -> (i32, i32) {
        (self.width / 2, self.height / 2)
    }

    pub fn center(self) -> GridPos {
        let (cx, cy) = self.local_center();
        GridPos { x: self.x + cx, y: self.y + cy }
    }

    pub fn contains(self, pos: GridPos) -> bool {
        pos.x >= self.x && pos.x < self.right() && pos.y >= self.y && pos.y < self.top()
    }

    pub fn area(self) -> i64 {
        i64::from(self.width) * i64::from(self.height)
    }
}

/// One half of a mirrored road pair, stored in the list of the zone it leaves.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Road {
    pub from: ZoneId,
    pub to: ZoneId,
    pub length: i32,
    /// Side of `from` the road leaves through.
    pub side: Direction,
    /// Boundary cell of `from` the road crosses.
    pub crossing: GridPos,
    pub kept: bool,
    /// Selected by the spanning tree rather than the interest pass.
    pub tree: bool,
}

impl Road {
    /// Crossing point of the mirrored road in the partner zone.
    pub fn mirror_crossing(&self) -> GridPos {
        self.crossing.step(self.side)
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Zone {
    pub id: ZoneId,
    pub rect: ZoneRect,
    pub roads: Vec<Road>,
    cells: Vec<TileCode>,
}

impl Zone {
    pub fn new(id: ZoneId, rect: ZoneRect) -> Self {
        let len = (rect.width.max(0) * rect.height.max(0)) as usize;
        Self { id, rect, roads: Vec::new(), cells: vec![VOID_TILE; len] }
    }

    /// Local read; anything outside the zone is void.
    pub fn cell(&self, x: i32, y: i32) -> TileCode {
        match self.local_index(x, y) {
            Some(index) => self.cells[index],
            None => VOID_TILE,
        }
    }

    /// Local write; writes outside the zone are dropped.
    pub fn set_cell(&mut self, x: i32, y: i32, code: TileCode) {
        if let Some(index) = self.local_index(x, y) {
            self.cells[index] = code;
        }
    }

    /// Every cell as (global position, code), void included.
    pub fn global_cells(&self) -> impl Iterator<Item = (GridPos, TileCode)> + '_ {
        let rect = self.rect;
        (0..rect.width).flat_map(move |x| {
            (0..rect.height)
                .map(move |y| (GridPos { x: rect.x + x, y: rect.y + y }, self.cell(x, y)))
        })
    }

    pub fn road_to(&self, other: ZoneId) -> Option<&Road> {
        self.roads.iter().find(|road| road.to == other)
    }

    fn local_index(&self, x: i32, y: i32) -> Option<usize> {
        if x < 0 || y < 0 || x >= self.rect.width || y >= self.rect.height {
            return None;
        }
        Some((y * self.rect.width + x) as usize)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct PlayerStart {
    pub zone: ZoneId,
    pub tile: GridPos,
    pub world: WorldPos,
}

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct EnemySpawn {
    /// Index into the enemy roster the spawn collaborator owns.
    pub kind: usize,
    pub zone: ZoneId,
    pub tile: GridPos,
    pub world: WorldPos,
}

/// One non-void grid cell, ready for the renderer.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct TilePlacement {
    pub pos: GridPos,
    pub code: TileCode,
    pub kind: TileKind,
    pub world: WorldPos,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zone_cells_start_void_and_ignore_outside_writes() {
        let mut zone = Zone::new(ZoneId(0), ZoneRect { x: 10, y: 20, width: 4, height: 3 });
        zone.set_cell(3, 2, 7);
        zone.set_cell(4, 0, 7);
        zone.set_cell(-1, 0, 7);
        assert_eq!(zone.cell(3, 2), 7);
        assert_eq!(zone.cell(4, 0), VOID_TILE);
        let filled: Vec<_> = zone.global_cells().filter(|(_, code)| *code != VOID_TILE).collect();
        assert_eq!(filled, vec![(GridPos::new(13, 22), 7)]);
    }

    #[test]
    fn rect_contains_uses_exclusive_far_edges() {
        let rect = ZoneRect { x: 5, y: 5, width: 10, height: 4 };
        assert!(rect.contains(GridPos::new(5, 5)));
        assert!(rect.contains(GridPos::new(14, 8)));
        assert!(!rect.contains(GridPos::new(15, 8)));
        assert!(!rect.contains(GridPos::new(14, 9)));
        assert_eq!(rect.center(), GridPos::new(10, 7));
    }
}
