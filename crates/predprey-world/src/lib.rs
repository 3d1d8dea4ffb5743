//! World simulation engine.
//!
//! This crate implements the predator-prey grid, its update rules and the
//! fixed-timestep driver the presentation layer steps.

pub mod neighbourhood;
pub mod grid;
pub mod engine;
pub mod clock;
pub mod simulation;

pub use grid::Grid;
pub use engine::{Action, TickSummary};
pub use clock::Clock;
pub use simulation::Simulation;
