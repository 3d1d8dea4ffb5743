//! Configuration types for the simulation.

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};

/// Neighbour adjacency rule
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Topology {
    /// Orthogonal neighbours, clipped at the edges
    #[default]
    Four,
    /// Orthogonal neighbours, edges wrap toroidally
    FourWrapped,
    /// Moore neighbourhood, clipped at the edges
    Eight,
    /// Moore neighbourhood, edges wrap toroidally
    EightWrapped,
}

impl Topology {
    /// Neighbour count for a cell away from any edge
    pub fn max_neighbours(&self) -> usize {
        match self {
            Topology::Four | Topology::FourWrapped => 4,
            Topology::Eight | Topology::EightWrapped => 8,
        }
    }

    pub fn wraps(&self) -> bool {
        matches!(self, Topology::FourWrapped | Topology::EightWrapped)
    }
}

/// Simulation rules and balance coefficients, read at the start of every tick
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimConfig {
    /// Ticks per simulated second
    pub tick_rate: u32,
    /// Upper bound of satiety and health
    pub value_max: i32,
    /// Neighbourhood used for moving and hunting
    pub topology: Topology,

    /// Predator satiety needed to leave a child behind
    pub satiety_min_for_birth: i32,
    /// Predators only hunt at or below this satiety
    pub satiety_max_for_hunting: i32,
    /// Satiety lost on every tick without a successful hunt
    pub satiety_decrement: i32,
    /// Satiety subtracted from the child left behind
    pub satiety_penalty_for_birth: i32,
    /// Satiety gained per point of health of the consumed prey
    pub satiety_to_health_ratio: f32,

    /// Prey health needed to leave a child behind
    pub health_min_for_birth: i32,
    /// Health gained by grazing every tick
    pub health_increment: i32,
    /// Health subtracted from the child left behind
    pub health_penalty_for_birth: i32,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            tick_rate: 30,
            value_max: 100,
            topology: Topology::Four,
            satiety_min_for_birth: 60,
            satiety_max_for_hunting: 70,
            satiety_decrement: 7,
            satiety_penalty_for_birth: 30,
            satiety_to_health_ratio: 0.2,
            health_min_for_birth: 70,
            health_increment: 10,
            health_penalty_for_birth: 50,
        }
    }
}

impl SimConfig {
    /// Duration of one tick in seconds
    pub fn tick_duration(&self) -> f64 {
        1.0 / f64::from(self.tick_rate)
    }

    /// Reject configurations the engine cannot run with
    pub fn validate(&self) -> Result<()> {
        if self.tick_rate == 0 {
            return Err(Error::InvalidConfig(
                "tick_rate must be positive".to_string(),
            ));
        }

        if self.value_max <= 0 {
            return Err(Error::InvalidConfig(format!(
                "value_max must be positive, got {}",
                self.value_max
            )));
        }

        let coefficients = [
            ("satiety_min_for_birth", self.satiety_min_for_birth),
            ("satiety_max_for_hunting", self.satiety_max_for_hunting),
            ("satiety_decrement", self.satiety_decrement),
            ("satiety_penalty_for_birth", self.satiety_penalty_for_birth),
            ("health_min_for_birth", self.health_min_for_birth),
            ("health_increment", self.health_increment),
            ("health_penalty_for_birth", self.health_penalty_for_birth),
        ];
        for (name, value) in coefficients {
            if !(0..=self.value_max).contains(&value) {
                return Err(Error::InvalidConfig(format!(
                    "{} must be within [0, {}], got {}",
                    name, self.value_max, value
                )));
            }
        }

        if !self.satiety_to_health_ratio.is_finite() || self.satiety_to_health_ratio < 0.0 {
            return Err(Error::InvalidConfig(format!(
                "satiety_to_health_ratio must be a non-negative number, got {}",
                self.satiety_to_health_ratio
            )));
        }

        Ok(())
    }
}

/// Initial world layout
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WorldConfig {
    /// Width of the grid
    pub width: usize,
    /// Height of the grid
    pub height: usize,
    /// Random seed for reproducibility; drawn from the OS when absent
    pub seed: Option<u64>,
    /// Fraction of cells seeded with prey (0.0 to 1.0)
    pub prey_density: f32,
    /// Fraction of cells seeded with predators (0.0 to 1.0)
    pub predator_density: f32,
}

impl Default for WorldConfig {
    fn default() -> Self {
        Self {
            width: 100,
            height: 100,
            seed: None,
            prey_density: 0.0,
            predator_density: 0.0,
        }
    }
}

impl WorldConfig {
    pub fn validate(&self) -> Result<()> {
        if self.width == 0 || self.height == 0 {
            return Err(Error::InvalidConfig(format!(
                "grid must be at least 1x1, got {}x{}",
                self.width, self.height
            )));
        }

        validate_density("prey_density", self.prey_density)?;
        validate_density("predator_density", self.predator_density)?;
        if self.prey_density + self.predator_density > 1.0 {
            return Err(Error::InvalidConfig(
                "prey_density + predator_density must not exceed 1.0".to_string(),
            ));
        }

        Ok(())
    }
}

fn validate_density(name: &str, value: f32) -> Result<()> {
    if (0.0..=1.0).contains(&value) {
        Ok(())
    } else {
        Err(Error::InvalidConfig(format!(
            "{} must be within [0, 1], got {}",
            name, value
        )))
    }
}

/// Headless runner configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RunnerConfig {
    /// Number of frames to drive the simulation for
    pub frames: u64,
    /// Wall-clock time fed to the simulation per frame (seconds)
    pub frame_time_secs: f64,
    /// Log a population snapshot every this many frames
    pub stats_interval_frames: u64,
    /// World layout
    pub world: WorldConfig,
    /// Rules and balance coefficients
    pub sim: SimConfig,
}

impl Default for RunnerConfig {
    fn default() -> Self {
        Self {
            frames: 1_800,
            frame_time_secs: 1.0 / 60.0,
            stats_interval_frames: 60,
            world: WorldConfig {
                seed: Some(0),
                prey_density: 0.2,
                predator_density: 0.05,
                ..WorldConfig::default()
            },
            sim: SimConfig::default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_configs() {
        let sim = SimConfig::default();
        assert_eq!(sim.tick_rate, 30);
        assert_eq!(sim.value_max, 100);
        assert_eq!(sim.topology, Topology::Four);
        assert!(sim.validate().is_ok());

        let world = WorldConfig::default();
        assert_eq!(world.width, 100);
        assert_eq!(world.height, 100);
        assert!(world.validate().is_ok());

        let runner = RunnerConfig::default();
        assert!(runner.world.validate().is_ok());
        assert!(runner.sim.validate().is_ok());
    }

    #[test]
    fn test_zero_tick_rate_rejected() {
        let config = SimConfig {
            tick_rate: 0,
            ..Default::default()
        };
        assert!(matches!(config.validate(), Err(Error::InvalidConfig(_))));
    }

    #[test]
    fn test_coefficient_out_of_range_rejected() {
        let config = SimConfig {
            health_increment: 101,
            ..Default::default()
        };
        assert!(config.validate().is_err());

        let config = SimConfig {
            satiety_decrement: -1,
            ..Default::default()
        };
        assert!(config.validate().is_err());

        let config = SimConfig {
            satiety_to_health_ratio: f32::NAN,
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_world_validation() {
        let world = WorldConfig {
            width: 0,
            ..Default::default()
        };
        assert!(world.validate().is_err());

        let world = WorldConfig {
            prey_density: 0.7,
            predator_density: 0.5,
            ..Default::default()
        };
        assert!(world.validate().is_err());
    }

    #[test]
    fn test_tick_duration() {
        let config = SimConfig {
            tick_rate: 4,
            ..Default::default()
        };
        assert_eq!(config.tick_duration(), 0.25);
    }

    #[test]
    fn test_topology_properties() {
        assert_eq!(Topology::Four.max_neighbours(), 4);
        assert_eq!(Topology::EightWrapped.max_neighbours(), 8);
        assert!(Topology::FourWrapped.wraps());
        assert!(!Topology::Eight.wraps());
    }

    #[test]
    fn test_runner_config_partial_json() {
        let json = r#"{"frames": 10, "sim": {"topology": "eight_wrapped", "tick_rate": 60}}"#;
        let config: RunnerConfig = serde_json::from_str(json).unwrap();
        assert_eq!(config.frames, 10);
        assert_eq!(config.sim.topology, Topology::EightWrapped);
        assert_eq!(config.sim.tick_rate, 60);
        assert_eq!(config.sim.value_max, 100);
        assert_eq!(config.world.width, 100);
    }
}
