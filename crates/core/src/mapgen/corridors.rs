//! Carves the in-zone half of every kept road: an L-shaped, two-wide corridor
//! from the zone center to the border crossing, edged with a lit wall.

use std::ops::RangeInclusive;

use crate::error::MapGenError;
use crate::types::{
    CORRIDOR_FLOOR, CORRIDOR_LIGHT_WALL, Direction, GridPos, TileCode, is_floor_code,
};

use super::model::Zone;

/// Carves every road of every zone; returns the number of corridors drawn.
pub(crate) fn carve_corridors(zones: &mut [Zone]) -> Result<usize, MapGenError> {
    let mut carved = 0;
    for zone in zones {
        let exits: Vec<_> = zone.roads.iter().map(|road| (road.side, road.crossing)).collect();
        for (side, crossing) in exits {
            carve_exit(zone, side, crossing)?;
            carved += 1;
        }
    }
    Ok(carved)
}

fn carve_exit(zone: &mut Zone, side: Direction, crossing: GridPos) -> Result<(), MapGenError> {
    let (cx, cy) = zone.rect.local_center();
    let (rx, ry) = (crossing.x - zone.rect.x, crossing.y - zone.rect.y);
    match side {
        Direction::Up if cx < rx => {
            run_x(zone, cx..=rx + 1, cy);
            run_y(zone, cy..=ry, rx);
        }
        Direction::Up => {
            run_x(zone, rx..=cx, cy);
            run_y(zone, cy - 1..=ry, rx);
        }
        Direction::Down if cx < rx => {
            run_y(zone, ry..=cy, rx);
            run_x(zone, cx..=rx + 1, cy);
        }
        Direction::Down => {
            run_x(zone, rx..=cx, cy);
            run_y(zone, ry..=cy, rx);
        }
        Direction::Right if cy < ry => {
            run_x(zone, cx..=rx, ry);
            run_y(zone, cy..=ry, cx);
        }
        Direction::Right => {
            run_x(zone, cx..=rx, ry);
            run_y(zone, ry - 1..=cy, cx);
        }
        Direction::Left if cy < ry => {
            run_x(zone, rx..=cx + 1, ry);
            run_y(zone, cy..=ry, cx);
        }
        Direction::Left => {
            run_x(zone, rx..=cx, ry);
            run_y(zone, ry - 1..=cy, cx);
        }
        diagonal => return Err(MapGenError::UnsupportedRoadSide(diagonal)),
    }
    Ok(())
}

/// Floor on rows `row` and `row - 1`, lit wall on `row + 1`.
fn run_x(zone: &mut Zone, xs: RangeInclusive<i32>, row: i32) {
    for x in xs {
        paint(zone, x, row, CORRIDOR_FLOOR);
        paint(zone, x, row - 1, CORRIDOR_FLOOR);
        paint(zone, x, row + 1, CORRIDOR_LIGHT_WALL);
    }
}

/// Floor on columns `column` and `column + 1`, lit wall on `column - 1`.
fn run_y(zone: &mut Zone, ys: RangeInclusive<i32>, column: i32) {
    for y in ys {
        paint(zone, column, y, CORRIDOR_FLOOR);
        paint(zone, column + 1, y, CORRIDOR_FLOOR);
        paint(zone, column - 1, y, CORRIDOR_LIGHT_WALL);
    }
}

/// Floor already present is never overwritten.
fn paint(zone: &mut Zone, x: i32, y: i32, code: TileCode) {
    if !is_floor_code(zone.cell(x, y)) {
        zone.set_cell(x, y, code);
    }
}
