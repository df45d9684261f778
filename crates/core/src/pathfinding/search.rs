//! One A* pass over the lattice with the adaptive heuristic.

use std::cmp::{Ordering, Reverse};
use std::collections::{BinaryHeap, HashSet};
use std::f64::consts::SQRT_2;

use crate::types::{Direction, GridPos};

use super::history::SearchHistory;
use super::lattice::{Lattice, LatticeCell};

/// Open-set key: priority, then X, then Y.
#[derive(Clone, Copy, Debug)]
struct OpenEntry {
    priority: f64,
    pos: GridPos,
}

impl PartialEq for OpenEntry {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for OpenEntry {}

impl PartialOrd for OpenEntry {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for OpenEntry {
    fn cmp(&self, other: &Self) -> Ordering {
        self.priority
            .total_cmp(&other.priority)
            .then(self.pos.x.cmp(&other.pos.x))
            .then(self.pos.y.cmp(&other.pos.y))
    }
}

const ORTHOGONAL: [Direction; 4] =
    [Direction::Up, Direction::Down, Direction::Right, Direction::Left];

/// Diagonal step and the indices into `ORTHOGONAL` that must both be passable.
const DIAGONAL: [(Direction, usize, usize); 4] = [
    (Direction::UpRight, 0, 2),
    (Direction::UpLeft, 0, 3),
    (Direction::DownRight, 1, 2),
    (Direction::DownLeft, 1, 3),
];

pub(super) struct SearchOutcome {
    /// G of the goal cell when it was reached.
    pub(super) goal_cost: Option<f64>,
    pub(super) expansions: usize,
}

pub(super) struct AStar<'s> {
    pub(super) lattice: &'s mut Lattice,
    pub(super) history: &'s SearchHistory,
    /// Cells carrying a non-zero tag, for window invalidation.
    pub(super) touched: &'s mut Vec<GridPos>,
    pub(super) generation: usize,
    pub(super) goal: GridPos,
}

impl AStar<'_> {
    /// Cells are closed as soon as they are discovered and never reopened.
    pub(super) fn run(mut self, start: GridPos) -> SearchOutcome {
        let mut open = BinaryHeap::new();
        let mut closed = HashSet::new();
        let mut expansions = 0;

        if let Some(cell) = self.lattice.get_mut(start) {
            let previous_tag = cell.tag;
            *cell = LatticeCell { pre: None, g: 0.0, h: 0.0, tag: self.generation };
            self.touch(start, previous_tag);
            open.push(Reverse(OpenEntry { priority: 0.0, pos: start }));
            closed.insert(start);
        }

        while let Some(Reverse(OpenEntry { pos: current, .. })) = open.pop() {
            let Some(&current_cell) = self.lattice.get(current) else {
                continue;
            };
            if current == self.goal {
                return SearchOutcome { goal_cost: Some(current_cell.g), expansions };
            }
            expansions += 1;

            let mut passable = [false; 4];
            for (flag, direction) in passable.iter_mut().zip(ORTHOGONAL) {
                let next = current.step(direction);
                *flag = self.lattice.is_passable(next);
                if *flag && closed.insert(next) {
                    open.push(Reverse(self.discover(next, current, current_cell.g + 1.0)));
                }
            }
            for (direction, first, second) in DIAGONAL {
                if !(passable[first] && passable[second]) {
                    continue;
                }
                let next = current.step(direction);
                if self.lattice.is_passable(next) && closed.insert(next) {
                    open.push(Reverse(self.discover(next, current, current_cell.g + SQRT_2)));
                }
            }
        }
        SearchOutcome { goal_cost: None, expansions }
    }

    /// Links `pos` to `from`, refreshes its heuristic from stale data, then stores the new G.
    fn discover(&mut self, pos: GridPos, from: GridPos, g: f64) -> OpenEntry {
        let plain = f64::from(pos.chebyshev(self.goal));
        let (generation, history) = (self.generation, self.history);
        let Some(cell) = self.lattice.get_mut(pos) else {
            return OpenEntry { priority: f64::INFINITY, pos };
        };
        let previous_tag = cell.tag;
        cell.pre = Some(from);
        cell.h = adaptive_heuristic(cell, plain, generation, history);
        cell.g = g;
        cell.tag = generation;
        let priority = cell.g * cell.g + cell.h * cell.h;
        self.touch(pos, previous_tag);
        OpenEntry { priority, pos }
    }

    fn touch(&mut self, pos: GridPos, previous_tag: usize) {
        if previous_tag == 0 && self.generation != 0 {
            self.touched.push(pos);
        }
    }
}

/// Chebyshev for fresh cells. Cells from an earlier generation lift their old H to
/// that search's realized cost, subtract how far the target has drifted since,
/// and never drop below Chebyshev. Not corrected for diagonal cost.
fn adaptive_heuristic(
    cell: &LatticeCell,
    plain: f64,
    generation: usize,
    history: &SearchHistory,
) -> f64 {
    if cell.tag == 0 || generation == 0 {
        return plain;
    }
    let mut h = cell.h;
    if let Some(cost) = history.path_cost(cell.tag)
        && cell.g + cell.h < cost
    {
        h = cost - cell.g;
    }
    h -= history.drift(generation) - history.drift(cell.tag);
    h.max(plain)
}
