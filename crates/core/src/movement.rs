//! Walks an actor along a [`Path`] in world space, one waypoint at a time.

use serde::{Deserialize, Serialize};

use crate::pathfinding::Path;
use crate::transform::{actor_anchor, world_to_grid};
use crate::types::{GridPos, WorldPos};

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum Facing {
    Left,
    #[default]
    Right,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum FollowState {
    Idle,
    Moving { tile: GridPos, waypoint: WorldPos, velocity: WorldPos },
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FollowEvent {
    Moving,
    /// Snapped onto the anchor of this tile; the follower is idle again.
    Arrived(GridPos),
    /// Idle with nothing left to walk.
    Finished,
}

#[derive(Clone, Debug, PartialEq)]
pub struct PathFollower {
    position: WorldPos,
    speed: f32,
    facing: Facing,
    state: FollowState,
}

impl PathFollower {
    /// Places the follower on the anchor of `tile`; `speed` is world units per second.
    pub fn new(tile: GridPos, speed: f32) -> Self {
        Self {
            position: actor_anchor(tile),
            speed,
            facing: Facing::default(),
            state: FollowState::Idle,
        }
    }

    pub fn position(&self) -> WorldPos {
        self.position
    }

    pub fn tile(&self) -> GridPos {
        world_to_grid(self.position)
    }

    pub fn facing(&self) -> Facing {
        self.facing
    }

    pub fn state(&self) -> FollowState {
        self.state
    }

    pub fn is_idle(&self) -> bool {
        self.state == FollowState::Idle
    }

    /// Drops the current waypoint and snaps to `tile`.
    pub fn teleport(&mut self, tile: GridPos) {
        self.position = actor_anchor(tile);
        self.state = FollowState::Idle;
    }

    /// Advances by `dt` seconds, taking the next step off `path` when idle.
    pub fn advance(&mut self, dt: f32, path: &mut Path) -> FollowEvent {
        if self.state == FollowState::Idle {
            let Some(tile) = path.pop() else {
                return FollowEvent::Finished;
            };
            self.head_for(tile);
        }

        let FollowState::Moving { tile, waypoint, velocity } = self.state else {
            return FollowEvent::Finished;
        };
        self.position = self.position.offset(velocity.x * dt, velocity.y * dt);
        let remaining_x = waypoint.x - self.position.x;
        let remaining_y = waypoint.y - self.position.y;
        if remaining_x * velocity.x + remaining_y * velocity.y <= 0.0 {
            self.position = waypoint;
            self.state = FollowState::Idle;
            return FollowEvent::Arrived(tile);
        }
        FollowEvent::Moving
    }

    fn head_for(&mut self, tile: GridPos) {
        let waypoint = actor_anchor(tile);
        let dx = waypoint.x - self.position.x;
        let dy = waypoint.y - self.position.y;
        let distance = dx.hypot(dy);
        let velocity = if distance > 0.0 {
            WorldPos::new(dx / distance * self.speed, dy / distance * self.speed)
        } else {
            WorldPos::default()
        };
        if velocity.x < 0.0 {
            self.facing = Facing::Left;
        } else if velocity.x > 0.0 {
            self.facing = Facing::Right;
        }
        self.state = FollowState::Moving { tile, waypoint, velocity };
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grid::TileGrid;
    use crate::pathfinding::{AdaptivePathfinder, SearchTarget};

    fn walk(follower: &mut PathFollower, path: &mut Path) -> Vec<GridPos> {
        let mut arrivals = Vec::new();
        for _ in 0..10_000 {
            match follower.advance(0.05, path) {
                FollowEvent::Arrived(tile) => arrivals.push(tile),
                FollowEvent::Finished => return arrivals,
                FollowEvent::Moving => {}
            }
        }
        panic!("follower never finished");
    }

    #[test]
    fn follower_visits_every_step_and_ends_on_the_anchor() {
        let mut grid = TileGrid::new();
        grid.fill_rect(GridPos::new(0, 0), GridPos::new(7, 3), 2);
        let mut pathfinder = AdaptivePathfinder::for_grid(&grid);
        let mut path = pathfinder.search(0, 0, &mut SearchTarget::place(6, 2)).clone();
        let expected: Vec<_> = path.steps().collect();

        let mut follower = PathFollower::new(GridPos::new(0, 0), 3.0);
        let arrivals = walk(&mut follower, &mut path);

        assert_eq!(arrivals, expected);
        assert_eq!(follower.position(), actor_anchor(GridPos::new(6, 2)));
        assert_eq!(follower.tile(), GridPos::new(6, 2));
        assert!(follower.is_idle());
    }

    #[test]
    fn facing_follows_horizontal_direction() {
        let mut grid = TileGrid::new();
        grid.fill_rect(GridPos::new(0, 5), GridPos::new(9, 5), 0);
        let mut pathfinder = AdaptivePathfinder::for_grid(&grid);
        let mut follower = PathFollower::new(GridPos::new(5, 5), 2.0);
        assert_eq!(follower.advance(0.1, &mut Path::default()), FollowEvent::Finished);
        assert_eq!(follower.facing(), Facing::Right);

        // -X in grid space is -X in world space.
        let mut path = pathfinder.search(5, 5, &mut SearchTarget::place(4, 5)).clone();
        follower.advance(0.1, &mut path);
        assert_eq!(follower.facing(), Facing::Left);

        follower.teleport(GridPos::new(5, 5));
        let mut path = pathfinder.search(5, 5, &mut SearchTarget::place(6, 5)).clone();
        follower.advance(0.1, &mut path);
        assert_eq!(follower.facing(), Facing::Right);
    }

    #[test]
    fn overshooting_snaps_to_the_waypoint() {
        let mut grid = TileGrid::new();
        grid.fill_rect(GridPos::new(0, 0), GridPos::new(1, 0), 0);
        let mut pathfinder = AdaptivePathfinder::for_grid(&grid);
        let mut path = pathfinder.search(0, 0, &mut SearchTarget::place(1, 0)).clone();

        let mut follower = PathFollower::new(GridPos::new(0, 0), 100.0);
        assert_eq!(follower.advance(1.0, &mut path), FollowEvent::Arrived(GridPos::new(1, 0)));
        assert_eq!(follower.position(), actor_anchor(GridPos::new(1, 0)));
        assert_eq!(follower.advance(1.0, &mut path), FollowEvent::Finished);
    }
}
