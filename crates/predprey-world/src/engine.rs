//! Update rules for a single discrete tick.
//!
//! A tick runs in two raster-order passes over the grid: every prey first
//! grazes and moves, then every predator hunts or moves. Cells touched by an
//! action are marked handled so nothing acts twice within one tick.

use crate::grid::Grid;
use crate::neighbourhood::{neighbours, Neighbours};
use predprey_core::{Cell, CellKind, SimConfig};
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::ops::AddAssign;

/// Counts of what happened during one or more ticks
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TickSummary {
    pub prey_moves: u64,
    pub prey_births: u64,
    pub prey_deaths: u64,
    pub hunts: u64,
    pub predator_moves: u64,
    pub predator_births: u64,
    pub predator_deaths: u64,
}

impl AddAssign for TickSummary {
    fn add_assign(&mut self, other: Self) {
        self.prey_moves += other.prey_moves;
        self.prey_births += other.prey_births;
        self.prey_deaths += other.prey_deaths;
        self.hunts += other.hunts;
        self.predator_moves += other.predator_moves;
        self.predator_births += other.predator_births;
        self.predator_deaths += other.predator_deaths;
    }
}

/// A single state change, in the order it was applied.
///
/// `birth` is true when the source cell kept a child.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Action {
    Moved {
        kind: CellKind,
        from: usize,
        to: usize,
        birth: bool,
    },
    Hunted {
        from: usize,
        to: usize,
        birth: bool,
    },
    Died {
        kind: CellKind,
        at: usize,
    },
}

impl Action {
    /// Index of the cell that acted
    pub fn source(&self) -> usize {
        match *self {
            Action::Moved { from, .. } | Action::Hunted { from, .. } => from,
            Action::Died { at, .. } => at,
        }
    }

    pub fn destination(&self) -> Option<usize> {
        match *self {
            Action::Moved { to, .. } | Action::Hunted { to, .. } => Some(to),
            Action::Died { .. } => None,
        }
    }
}

struct Journal<'a> {
    summary: TickSummary,
    actions: Option<&'a mut Vec<Action>>,
}

impl<'a> Journal<'a> {
    fn new(actions: Option<&'a mut Vec<Action>>) -> Self {
        Self {
            summary: TickSummary::default(),
            actions,
        }
    }

    fn record(&mut self, action: Action) {
        let s = &mut self.summary;
        match action {
            Action::Moved { kind: CellKind::Prey, birth, .. } => {
                s.prey_moves += 1;
                s.prey_births += u64::from(birth);
            }
            Action::Moved { birth, .. } => {
                s.predator_moves += 1;
                s.predator_births += u64::from(birth);
            }
            Action::Hunted { birth, .. } => {
                s.hunts += 1;
                s.predator_births += u64::from(birth);
            }
            Action::Died { kind: CellKind::Prey, .. } => s.prey_deaths += 1,
            Action::Died { .. } => s.predator_deaths += 1,
        }

        if let Some(actions) = self.actions.as_deref_mut() {
            actions.push(action);
        }
    }
}

/// Advance `grid` by one tick under `config`, drawing neighbour order from `rng`
pub fn tick<R: Rng + ?Sized>(grid: &mut Grid, config: &SimConfig, rng: &mut R) -> TickSummary {
    run(grid, config, rng, Journal::new(None))
}

/// Same as [`tick`], additionally appending every applied action to `actions`
pub fn tick_recorded<R: Rng + ?Sized>(
    grid: &mut Grid,
    config: &SimConfig,
    rng: &mut R,
    actions: &mut Vec<Action>,
) -> TickSummary {
    run(grid, config, rng, Journal::new(Some(actions)))
}

fn run<R: Rng + ?Sized>(
    grid: &mut Grid,
    config: &SimConfig,
    rng: &mut R,
    mut journal: Journal<'_>,
) -> TickSummary {
    grid.clear_handled();
    prey_phase(grid, config, rng, &mut journal);
    predator_phase(grid, config, rng, &mut journal);
    journal.summary
}

fn prey_phase<R: Rng + ?Sized>(
    grid: &mut Grid,
    config: &SimConfig,
    rng: &mut R,
    journal: &mut Journal<'_>,
) {
    for index in 0..grid.len() {
        if grid.is_handled(index) {
            continue;
        }
        let Cell::Prey(health) = grid.at(index) else {
            continue;
        };

        let health = health
            .saturating_add(config.health_increment)
            .min(config.value_max);
        let around = neighbours_of(grid, config, index, rng);

        match first_of_kind(grid, &around, CellKind::Empty) {
            Some(to) => {
                let birth = relocate(
                    grid,
                    index,
                    to,
                    CellKind::Prey,
                    health,
                    config.health_min_for_birth,
                    config.health_penalty_for_birth,
                );
                journal.record(Action::Moved {
                    kind: CellKind::Prey,
                    from: index,
                    to,
                    birth,
                });
            }
            None => {
                // overcrowded
                grid.put(index, Cell::Empty);
                journal.record(Action::Died {
                    kind: CellKind::Prey,
                    at: index,
                });
            }
        }

        grid.mark_handled(index);
    }
}

fn predator_phase<R: Rng + ?Sized>(
    grid: &mut Grid,
    config: &SimConfig,
    rng: &mut R,
    journal: &mut Journal<'_>,
) {
    for index in 0..grid.len() {
        if grid.is_handled(index) {
            continue;
        }
        let Cell::Predator(satiety) = grid.at(index) else {
            continue;
        };

        let mut satiety = satiety.min(config.value_max);
        let around = neighbours_of(grid, config, index, rng);
        let mut acted = false;

        if satiety <= config.satiety_max_for_hunting {
            if let Some(to) = first_of_kind(grid, &around, CellKind::Prey) {
                let health = grid.at(to).vitality().unwrap_or(0);
                let gain = f64::from(config.satiety_to_health_ratio) * f64::from(health);
                let fed = (f64::from(satiety) + gain) as i32;
                satiety = fed.min(config.value_max);

                let birth = relocate(
                    grid,
                    index,
                    to,
                    CellKind::Predator,
                    satiety,
                    config.satiety_min_for_birth,
                    config.satiety_penalty_for_birth,
                );
                journal.record(Action::Hunted {
                    from: index,
                    to,
                    birth,
                });
                acted = true;
            }
        }

        if !acted {
            satiety -= config.satiety_decrement;
            if satiety > 0 {
                if let Some(to) = first_of_kind(grid, &around, CellKind::Empty) {
                    let birth = relocate(
                        grid,
                        index,
                        to,
                        CellKind::Predator,
                        satiety,
                        config.satiety_min_for_birth,
                        config.satiety_penalty_for_birth,
                    );
                    journal.record(Action::Moved {
                        kind: CellKind::Predator,
                        from: index,
                        to,
                        birth,
                    });
                    acted = true;
                }
            }
        }

        if !acted {
            grid.put(index, Cell::Empty);
            journal.record(Action::Died {
                kind: CellKind::Predator,
                at: index,
            });
        }

        grid.mark_handled(index);
    }
}

fn neighbours_of<R: Rng + ?Sized>(
    grid: &Grid,
    config: &SimConfig,
    index: usize,
    rng: &mut R,
) -> Neighbours {
    let pos = grid.index_to_pos(index);
    neighbours(config.topology, pos, grid.width(), grid.height(), rng)
}

fn first_of_kind(grid: &Grid, around: &[usize], kind: CellKind) -> Option<usize> {
    around.iter().copied().find(|&i| grid.at(i).kind() == kind)
}

/// Move a cell from `from` to `to` carrying `vitality`.
///
/// The birth threshold is checked against the moved value: at or above it the
/// source keeps a child weakened by `penalty`, otherwise the source is
/// vacated. Returns whether a child was left behind.
fn relocate(
    grid: &mut Grid,
    from: usize,
    to: usize,
    kind: CellKind,
    vitality: i32,
    min_for_birth: i32,
    penalty: i32,
) -> bool {
    grid.put(to, Cell::live(kind, vitality));

    let child = if vitality >= min_for_birth {
        Cell::live(kind, vitality - penalty)
    } else {
        Cell::Empty
    };
    grid.put(from, child);
    grid.mark_handled(to);

    !child.is_empty()
}
