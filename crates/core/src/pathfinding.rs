//! Adaptive A* over the level grid.
//!
//! One pathfinder serves one agent. Searches toward a moving target reuse the
//! costs of earlier searches to sharpen the heuristic; each search tags the
//! cells it writes with a generation number cycling through `1..=60`, and a
//! generation's stale cells are wiped when its number comes round again.
//! Searches toward a fixed place always start from a clean lattice.

mod history;
mod lattice;
mod search;
mod target;

use tracing::debug;

use crate::context::LevelContext;
use crate::grid::TileGrid;
use crate::types::GridPos;

use history::SearchHistory;
use lattice::Lattice;
use search::AStar;

pub use history::WINDOW as GENERATION_WINDOW;
pub use target::{Aim, Locate, SearchTarget, WorldAnchor};

/// Steps to walk, next step on top. Excludes the start tile.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Path {
    /// Reverse walking order so `pop` yields the next step.
    stack: Vec<GridPos>,
    cost: f64,
}

impl Path {
    pub fn next_step(&self) -> Option<GridPos> {
        self.stack.last().copied()
    }

    pub fn pop(&mut self) -> Option<GridPos> {
        self.stack.pop()
    }

    pub fn len(&self) -> usize {
        self.stack.len()
    }

    pub fn is_empty(&self) -> bool {
        self.stack.is_empty()
    }

    /// G of the searched target tile; 0 for an empty path.
    pub fn cost(&self) -> f64 {
        self.cost
    }

    /// Steps in walking order.
    pub fn steps(&self) -> impl DoubleEndedIterator<Item = GridPos> + '_ {
        self.stack.iter().rev().copied()
    }

    fn clear(&mut self) {
        self.stack.clear();
        self.cost = 0.0;
    }
}

pub struct AdaptivePathfinder<'a> {
    grid: &'a TileGrid,
    lattice: Lattice,
    history: SearchHistory,
    touched: Vec<GridPos>,
    /// 0 after a reset or a place search, otherwise the latest moving-target generation.
    generation: usize,
    path: Path,
    last_expansions: usize,
}

impl<'a> AdaptivePathfinder<'a> {
    pub fn new(level: &'a LevelContext) -> Self {
        Self::for_grid(level.grid())
    }

    pub fn for_grid(grid: &'a TileGrid) -> Self {
        Self {
            grid,
            lattice: Lattice::new(),
            history: SearchHistory::default(),
            touched: Vec::new(),
            generation: 0,
            path: Path::default(),
            last_expansions: 0,
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn path_mut(&mut self) -> &mut Path {
        &mut self.path
    }

    /// Cells expanded by the latest call to `search`; 0 when it was skipped.
    pub fn last_expansions(&self) -> usize {
        self.last_expansions
    }

    pub fn generation(&self) -> usize {
        self.generation
    }

    /// Searches from `(start_x, start_y)` toward `target`. An unreachable target
    /// or an impassable start leaves an empty path. A moving target that has not
    /// changed tile since the last search keeps the previous path untouched.
    pub fn search(&mut self, start_x: i32, start_y: i32, target: &mut SearchTarget) -> &Path {
        self.last_expansions = 0;
        if !self.begin(target) {
            debug!(tile = ?target.last_seen(), "target has not moved; keeping previous path");
            return &self.path;
        }

        let start = GridPos::new(start_x, start_y);
        let goal = target.last_seen();
        self.path.clear();
        if !self.lattice.is_passable(start) {
            debug!(?start, "search starts on an impassable tile");
            return &self.path;
        }

        let outcome = AStar {
            lattice: &mut self.lattice,
            history: &self.history,
            touched: &mut self.touched,
            generation: self.generation,
            goal,
        }
        .run(start);
        self.last_expansions = outcome.expansions;

        let Some(goal_cost) = outcome.goal_cost else {
            debug!(?start, ?goal, expansions = outcome.expansions, "target unreachable");
            return &self.path;
        };
        if target.is_thing() {
            self.history.record_cost(self.generation, goal_cost);
            if start != goal {
                self.trace_back(start, self.pre_of(goal));
            }
        } else {
            self.trace_back(start, Some(goal));
        }
        if !self.path.is_empty() {
            self.path.cost = goal_cost;
        }
        &self.path
    }

    /// Decides whether to search and advances the generation window.
    fn begin(&mut self, target: &mut SearchTarget) -> bool {
        let fresh = !target.is_thing() || !target.is_initialized() || self.generation == 0;
        if fresh {
            self.lattice.reset(self.grid);
            self.history.reset();
            self.touched.clear();
            self.generation = 0;
            target.start_tracking();
        } else {
            let moved = target.observe_movement();
            if moved == 0 {
                return false;
            }
            self.history.record_move(self.generation, moved);
        }

        if target.is_thing() {
            self.generation = self.generation % GENERATION_WINDOW + 1;
            self.history.forget_cost(self.generation);
            self.invalidate_generation(self.generation);
        }
        true
    }

    /// Clears the tag of every cell still carrying `generation` from a full window ago.
    fn invalidate_generation(&mut self, generation: usize) {
        let lattice = &mut self.lattice;
        self.touched.retain(|&pos| match lattice.get_mut(pos) {
            Some(cell) if cell.tag == generation => {
                cell.tag = 0;
                false
            }
            Some(_) => true,
            None => false,
        });
    }

    fn pre_of(&self, pos: GridPos) -> Option<GridPos> {
        self.lattice.get(pos).and_then(|cell| cell.pre)
    }

    /// Pushes `from` and its predecessors up to, not including, `start`;
    /// the step next to `start` ends up on top.
    fn trace_back(&mut self, start: GridPos, from: Option<GridPos>) {
        let mut cursor = from;
        while let Some(pos) = cursor {
            if pos == start {
                break;
            }
            self.path.stack.push(pos);
            cursor = self.pre_of(pos);
        }
    }
}
