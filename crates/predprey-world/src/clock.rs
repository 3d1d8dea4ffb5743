//! Fixed-timestep accumulator.

use predprey_core::{Error, Result, SimConfig};

/// Converts elapsed wall-clock time into a whole number of ticks
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Clock {
    tick_duration: f64,
}

impl Clock {
    pub fn new(tick_rate: u32) -> Result<Self> {
        if tick_rate == 0 {
            return Err(Error::InvalidConfig(
                "tick_rate must be positive".to_string(),
            ));
        }
        Ok(Self {
            tick_duration: 1.0 / f64::from(tick_rate),
        })
    }

    pub fn from_config(config: &SimConfig) -> Result<Self> {
        Self::new(config.tick_rate)
    }

    pub fn tick_duration(&self) -> f64 {
        self.tick_duration
    }

    /// Call `on_tick` once for every whole tick contained in `elapsed` seconds.
    ///
    /// Returns the number of ticks run and the leftover time, which lies in
    /// `[0, tick_duration)` and should be added to the next call's input.
    /// Negative or non-finite input counts as no time at all.
    pub fn advance<F: FnMut()>(&self, elapsed: f64, mut on_tick: F) -> (u64, f64) {
        if !elapsed.is_finite() || elapsed <= 0.0 {
            return (0, 0.0);
        }

        let mut remaining = elapsed;
        let mut ticks = 0;
        while remaining >= self.tick_duration {
            remaining -= self.tick_duration;
            on_tick();
            ticks += 1;
        }
        (ticks, remaining)
    }
}
