//! Rolling window of realized path costs and target drift, one slot per search generation.

/// Generations cycle through `1..=WINDOW`; slot `n - 1` belongs to generation `n`.
pub const WINDOW: usize = 60;

const NO_COST: f64 = -1.0;

#[derive(Clone, Debug, PartialEq)]
pub(super) struct SearchHistory {
    path_cost: [f64; WINDOW],
    drift: [f64; WINDOW],
}

impl Default for SearchHistory {
    fn default() -> Self {
        Self { path_cost: [NO_COST; WINDOW], drift: [0.0; WINDOW] }
    }
}

impl SearchHistory {
    pub(super) fn reset(&mut self) {
        *self = Self::default();
    }

    /// Realized cost of `generation`, if that search reached its target.
    pub(super) fn path_cost(&self, generation: usize) -> Option<f64> {
        let cost = self.path_cost[generation - 1];
        (cost >= 0.0).then_some(cost)
    }

    pub(super) fn record_cost(&mut self, generation: usize, cost: f64) {
        self.path_cost[generation - 1] = cost;
    }

    pub(super) fn forget_cost(&mut self, generation: usize) {
        self.path_cost[generation - 1] = NO_COST;
    }

    pub(super) fn drift(&self, generation: usize) -> f64 {
        self.drift[generation - 1]
    }

    /// Accumulates `moved` into the slot of the generation after `generation`.
    /// On wrap-around the other slots are shifted down by the reused slot's new value;
    /// the reused slot itself keeps it.
    pub(super) fn record_move(&mut self, generation: usize, moved: u32) {
        let next = if generation == WINDOW { 0 } else { generation };
        self.drift[next] = self.drift[generation - 1] + f64::from(moved);
        if generation == WINDOW {
            let base = self.drift[0];
            for value in &mut self.drift[1..] {
                *value -= base;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn drift_accumulates_along_the_window() {
        let mut history = SearchHistory::default();
        history.record_move(1, 2);
        history.record_move(2, 3);
        assert_eq!(history.drift(1), 0.0);
        assert_eq!(history.drift(2), 2.0);
        assert_eq!(history.drift(3), 5.0);
    }

    #[test]
    fn wrap_shifts_every_slot_but_the_reused_one() {
        let mut history = SearchHistory::default();
        for generation in 1..WINDOW {
            history.record_move(generation, 1);
        }
        assert_eq!(history.drift(WINDOW), 59.0);
        let before = history.drift(WINDOW) - history.drift(30);
        history.record_move(WINDOW, 4);

        assert_eq!(history.drift(1), 63.0);
        assert_eq!(history.drift(2), -62.0);
        assert_eq!(history.drift(30), -34.0);
        assert_eq!(history.drift(WINDOW), -4.0);
        assert_eq!(history.drift(WINDOW) - history.drift(30), before);
    }

    #[test]
    fn unset_costs_read_as_none() {
        let mut history = SearchHistory::default();
        assert_eq!(history.path_cost(5), None);
        history.record_cost(5, 7.5);
        assert_eq!(history.path_cost(5), Some(7.5));
        history.forget_cost(5);
        assert_eq!(history.path_cost(5), None);
    }
}
