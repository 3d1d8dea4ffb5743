//! Core type definitions for the simulation.

use serde::{Deserialize, Serialize};

/// 2D position on the grid
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Position {
    pub x: i32,
    pub y: i32,
}

impl Position {
    pub fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    pub fn add(&self, dx: i32, dy: i32) -> Self {
        Self {
            x: self.x + dx,
            y: self.y + dy,
        }
    }

    /// Apply toroidal wrapping for given grid dimensions
    pub fn wrap(&self, width: i32, height: i32) -> Self {
        Self {
            x: ((self.x % width) + width) % width,
            y: ((self.y % height) + height) % height,
        }
    }

    /// Whether the position lies inside `[0, width) x [0, height)`
    pub fn within(&self, width: usize, height: usize) -> bool {
        self.x >= 0 && self.y >= 0 && (self.x as usize) < width && (self.y as usize) < height
    }
}

/// What occupies a cell, without its vitality
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum CellKind {
    #[default]
    Empty,
    Predator,
    Prey,
}

/// Cell state.
///
/// The payload is the cell's vitality: satiety for a predator, health for a
/// prey. Live cells always carry a positive vitality.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Cell {
    #[default]
    Empty,
    Predator(i32),
    Prey(i32),
}

impl Cell {
    /// Build a live cell, collapsing to `Empty` when vitality is not positive
    pub fn live(kind: CellKind, vitality: i32) -> Self {
        if vitality <= 0 {
            return Cell::Empty;
        }
        match kind {
            CellKind::Empty => Cell::Empty,
            CellKind::Predator => Cell::Predator(vitality),
            CellKind::Prey => Cell::Prey(vitality),
        }
    }

    pub fn kind(&self) -> CellKind {
        match self {
            Cell::Empty => CellKind::Empty,
            Cell::Predator(_) => CellKind::Predator,
            Cell::Prey(_) => CellKind::Prey,
        }
    }

    /// Satiety or health; `None` for an empty cell
    pub fn vitality(&self) -> Option<i32> {
        match *self {
            Cell::Empty => None,
            Cell::Predator(v) | Cell::Prey(v) => Some(v),
        }
    }

    pub fn is_empty(&self) -> bool {
        matches!(self, Cell::Empty)
    }

    /// Same kind, vitality clamped to `value_max`; `Empty` if not positive
    pub fn clamped(self, value_max: i32) -> Self {
        match self.vitality() {
            Some(v) => Cell::live(self.kind(), v.min(value_max)),
            None => Cell::Empty,
        }
    }
}
