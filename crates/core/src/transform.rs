//! Isometric world <-> grid conversion shared by the assembler, pathfinder and movers.
//! Renderers rely on these exact formulas for tile alignment.

use crate::types::{GridPos, WorldPos};

/// Vertical lift applied to actors standing on a tile.
pub const ACTOR_LIFT: f32 = 0.5;

pub fn grid_to_world(pos: GridPos) -> WorldPos {
    grid_to_world_f(pos.x as f32, pos.y as f32)
}

pub fn grid_to_world_f(x: f32, y: f32) -> WorldPos {
    WorldPos { x: x + y, y: -0.5 * x + 0.5 * y }
}

pub fn world_to_grid(world: WorldPos) -> GridPos {
    GridPos {
        x: (world.x / 2.0 - world.y).ceil() as i32,
        y: (world.x / 2.0 + world.y).floor() as i32,
    }
}

pub fn world_to_grid_f(world: WorldPos) -> (f32, f32) {
    (world.x / 2.0 - world.y, world.x / 2.0 + world.y)
}

/// Where an actor stands when it occupies `pos`.
pub fn actor_anchor(pos: GridPos) -> WorldPos {
    grid_to_world(pos).offset(0.0, ACTOR_LIFT)
}
