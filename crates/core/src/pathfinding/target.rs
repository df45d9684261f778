//! What a search is aiming at: a fixed tile or something that moves.

use std::cell::Cell;
use std::fmt;
use std::rc::Rc;

use crate::transform::world_to_grid;
use crate::types::{GridPos, WorldPos};

/// Anything whose current tile can be queried between searches.
pub trait Locate {
    fn tile(&self) -> GridPos;
}

impl Locate for Cell<GridPos> {
    fn tile(&self) -> GridPos {
        self.get()
    }
}

/// Shared world-space position of an actor; its tile is derived on demand.
#[derive(Debug, Default)]
pub struct WorldAnchor {
    position: Cell<WorldPos>,
}

impl WorldAnchor {
    pub fn new(position: WorldPos) -> Self {
        Self { position: Cell::new(position) }
    }

    pub fn get(&self) -> WorldPos {
        self.position.get()
    }

    pub fn set(&self, position: WorldPos) {
        self.position.set(position);
    }
}

impl Locate for WorldAnchor {
    fn tile(&self) -> GridPos {
        world_to_grid(self.position.get())
    }
}

#[derive(Clone)]
pub enum Aim {
    Place(GridPos),
    Thing(Rc<dyn Locate>),
}

impl fmt::Debug for Aim {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Aim::Place(pos) => f.debug_tuple("Place").field(pos).finish(),
            Aim::Thing(handle) => f.debug_tuple("Thing").field(&handle.tile()).finish(),
        }
    }
}

#[derive(Clone, Debug)]
pub struct SearchTarget {
    aim: Aim,
    last_seen: GridPos,
    initialized: bool,
}

impl SearchTarget {
    pub fn place(x: i32, y: i32) -> Self {
        let pos = GridPos::new(x, y);
        Self { aim: Aim::Place(pos), last_seen: pos, initialized: false }
    }

    pub fn thing(handle: Rc<dyn Locate>) -> Self {
        let last_seen = handle.tile();
        Self { aim: Aim::Thing(handle), last_seen, initialized: false }
    }

    pub fn aim(&self) -> &Aim {
        &self.aim
    }

    pub fn is_thing(&self) -> bool {
        matches!(self.aim, Aim::Thing(_))
    }

    /// Tile observed at the start of the latest search.
    pub fn last_seen(&self) -> GridPos {
        self.last_seen
    }

    pub fn is_initialized(&self) -> bool {
        self.initialized
    }

    pub(super) fn current_tile(&self) -> GridPos {
        match &self.aim {
            Aim::Place(pos) => *pos,
            Aim::Thing(handle) => handle.tile(),
        }
    }

    pub(super) fn start_tracking(&mut self) {
        self.last_seen = self.current_tile();
        self.initialized = true;
    }

    /// Chebyshev distance moved since the last observation; updates the observation.
    pub(super) fn observe_movement(&mut self) -> u32 {
        let now = self.current_tile();
        let moved = self.last_seen.chebyshev(now);
        self.last_seen = now;
        moved
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::transform::actor_anchor;

    #[test]
    fn moving_target_reports_chebyshev_displacement_once() {
        let hero = Rc::new(Cell::new(GridPos::new(10, 10)));
        let mut target = SearchTarget::thing(hero.clone());
        target.start_tracking();

        hero.set(GridPos::new(13, 8));
        assert_eq!(target.observe_movement(), 3);
        assert_eq!(target.observe_movement(), 0);
        assert_eq!(target.last_seen(), GridPos::new(13, 8));
    }

    #[test]
    fn world_anchor_resolves_to_the_tile_under_the_actor() {
        let anchor = Rc::new(WorldAnchor::new(actor_anchor(GridPos::new(40, 12))));
        let target = SearchTarget::thing(anchor.clone());
        assert_eq!(target.last_seen(), GridPos::new(40, 12));

        anchor.set(actor_anchor(GridPos::new(41, 12)));
        assert_eq!(target.current_tile(), GridPos::new(41, 12));
    }

    #[test]
    fn place_target_never_moves() {
        let mut target = SearchTarget::place(4, 7);
        assert!(!target.is_thing());
        target.start_tracking();
        assert_eq!(target.observe_movement(), 0);
        assert!(target.is_initialized());
    }
}
