//! Population statistics.

use crate::types::Cell;
use serde::{Deserialize, Serialize};

/// Population counts, as of the last recomputation
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Stats {
    pub prey: usize,
    pub predators: usize,
    /// Total ticks run when these counts were taken
    pub tick: u64,
}

impl Stats {
    /// Count live cells by kind in a single pass
    pub fn compute(cells: &[Cell], tick: u64) -> Self {
        let mut stats = Self {
            tick,
            ..Self::default()
        };
        for cell in cells {
            match cell {
                Cell::Predator(_) => stats.predators += 1,
                Cell::Prey(_) => stats.prey += 1,
                Cell::Empty => {}
            }
        }
        stats
    }

    pub fn population(&self) -> usize {
        self.prey + self.predators
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_compute_counts_by_kind() {
        let cells = [
            Cell::Empty,
            Cell::Prey(10),
            Cell::Predator(50),
            Cell::Prey(1),
            Cell::Empty,
        ];
        let stats = Stats::compute(&cells, 7);
        assert_eq!(stats.prey, 2);
        assert_eq!(stats.predators, 1);
        assert_eq!(stats.tick, 7);
        assert_eq!(stats.population(), 3);
    }

    #[test]
    fn test_compute_empty_slice() {
        assert_eq!(Stats::compute(&[], 0), Stats::default());
    }
}
