use serde::{Deserialize, Serialize};
use slotmap::new_key_type;

new_key_type! {
    /// Handle into a level's enemy registry.
    pub struct EnemyId;
}

/// Raw tile code as stored in zone arrays and the global grid.
pub type TileCode = i16;

pub const VOID_TILE: TileCode = -1;
/// First code of the wall family; everything below is floor.
pub const WALL_THRESHOLD: TileCode = 224;
/// First code of the lit-wall family.
pub const LIGHT_THRESHOLD: TileCode = 240;

pub const CORRIDOR_FLOOR: TileCode = 0;
pub const CORRIDOR_LIGHT_WALL: TileCode = 240;

#[derive(
    Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
pub struct GridPos {
    pub x: i32,
    pub y: i32,
}

impl GridPos {
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    pub fn chebyshev(self, other: Self) -> u32 {
        self.x.abs_diff(other.x).max(self.y.abs_diff(other.y))
    }

    pub fn step(self, direction: Direction) -> Self {
        let (dx, dy) = direction.offset();
        Self { x: self.x + dx, y: self.y + dy }
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct WorldPos {
    pub x: f32,
    pub y: f32,
}

impl WorldPos {
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    pub fn offset(self, dx: f32, dy: f32) -> Self {
        Self { x: self.x + dx, y: self.y + dy }
    }
}

/// Compass directions. `Up` is +Y, `Right` is +X in grid space.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Direction {
    Up,
    UpRight,
    Right,
    DownRight,
    Down,
    DownLeft,
    Left,
    UpLeft,
}

impl Direction {
    pub const CARDINAL: [Direction; 4] =
        [Direction::Up, Direction::Down, Direction::Right, Direction::Left];

    pub fn offset(self) -> (i32, i32) {
        match self {
            Direction::Up => (0, 1),
            Direction::UpRight => (1, 1),
            Direction::Right => (1, 0),
            Direction::DownRight => (1, -1),
            Direction::Down => (0, -1),
            Direction::DownLeft => (-1, -1),
            Direction::Left => (-1, 0),
            Direction::UpLeft => (-1, 1),
        }
    }

    pub fn opposite(self) -> Self {
        match self {
            Direction::Up => Direction::Down,
            Direction::UpRight => Direction::DownLeft,
            Direction::Right => Direction::Left,
            Direction::DownRight => Direction::UpLeft,
            Direction::Down => Direction::Up,
            Direction::DownLeft => Direction::UpRight,
            Direction::Left => Direction::Right,
            Direction::UpLeft => Direction::DownRight,
        }
    }
}

/// Passability classification of a tile code. Sprite selection belongs to the renderer.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TileKind {
    Void,
    Floor { variant: u8 },
    Wall { variant: u8, lit: bool },
}

impl TileKind {
    pub fn classify(code: TileCode) -> Self {
        match code {
            code if code < 0 => TileKind::Void,
            code if code < WALL_THRESHOLD => TileKind::Floor { variant: code as u8 },
            code => TileKind::Wall {
                variant: code.min(u8::MAX as TileCode) as u8,
                lit: code >= LIGHT_THRESHOLD,
            },
        }
    }

    pub fn is_passable(self) -> bool {
        matches!(self, TileKind::Floor { .. })
    }
}

pub fn is_floor_code(code: TileCode) -> bool {
    (0..WALL_THRESHOLD).contains(&code)
}
