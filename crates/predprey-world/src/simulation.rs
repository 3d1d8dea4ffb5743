//! Simulation facade driven by the presentation layer.

use crate::clock::Clock;
use crate::engine::{self, TickSummary};
use crate::grid::Grid;
use predprey_core::{Cell, CellKind, Position, Result, SimConfig, Stats, WorldConfig};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use tracing::{debug, info, instrument, trace};

/// A predator-prey world together with its rules and random source.
///
/// All state is owned here; the caller edits cells, changes the config
/// between steps and feeds elapsed time into [`Simulation::step`].
pub struct Simulation<R = ChaCha8Rng> {
    grid: Grid,
    config: SimConfig,
    rng: R,
    stats: Stats,
    tick: u64,
    totals: TickSummary,
}

impl Simulation<ChaCha8Rng> {
    /// Create a simulation seeded from `world.seed`, or from OS entropy when unset
    pub fn new(world: &WorldConfig, config: SimConfig) -> Result<Self> {
        let rng = match world.seed {
            Some(seed) => ChaCha8Rng::seed_from_u64(seed),
            None => ChaCha8Rng::from_entropy(),
        };
        Self::with_rng(world, config, rng)
    }

    /// 100x100 empty world with the default balance
    pub fn with_defaults() -> Result<Self> {
        Self::new(&WorldConfig::default(), SimConfig::default())
    }
}

impl<R: Rng> Simulation<R> {
    /// Create a simulation drawing all randomness from `rng`
    pub fn with_rng(world: &WorldConfig, config: SimConfig, rng: R) -> Result<Self> {
        world.validate()?;
        config.validate()?;

        let grid = Grid::new(world.width, world.height)?;
        let mut sim = Self {
            grid,
            config,
            rng,
            stats: Stats::default(),
            tick: 0,
            totals: TickSummary::default(),
        };

        if world.prey_density > 0.0 || world.predator_density > 0.0 {
            sim.populate(world.prey_density, world.predator_density)?;
        }

        info!(
            width = world.width,
            height = world.height,
            topology = ?sim.config.topology,
            prey = sim.stats.prey,
            predators = sim.stats.predators,
            "Created simulation"
        );

        Ok(sim)
    }

    /// Advance by `elapsed` seconds and return the time not yet consumed.
    ///
    /// Runs as many whole ticks as fit; population stats are recomputed once
    /// afterwards if any tick ran. An invalid config is rejected before
    /// anything changes.
    #[instrument(skip(self), fields(tick = self.tick))]
    pub fn step(&mut self, elapsed: f64) -> Result<f64> {
        self.config.validate()?;
        let clock = Clock::from_config(&self.config)?;

        let grid = &mut self.grid;
        let config = &self.config;
        let rng = &mut self.rng;
        let mut batch = TickSummary::default();
        let (ticks, leftover) = clock.advance(elapsed, || {
            let summary = engine::tick(grid, config, rng);
            trace!(?summary, "Tick complete");
            batch += summary;
        });

        if ticks > 0 {
            self.tick += ticks;
            self.totals += batch;
            self.refresh_stats();
            debug!(
                ticks,
                total_ticks = self.tick,
                prey = self.stats.prey,
                predators = self.stats.predators,
                hunts = batch.hunts,
                prey_births = batch.prey_births,
                predator_births = batch.predator_births,
                "Stepped simulation"
            );
        }

        Ok(leftover)
    }

    /// Run exactly one tick regardless of elapsed time
    pub fn tick_once(&mut self) -> Result<TickSummary> {
        self.config.validate()?;
        let summary = engine::tick(&mut self.grid, &self.config, &mut self.rng);
        self.tick += 1;
        self.totals += summary;
        self.refresh_stats();
        Ok(summary)
    }

    /// Place a full-vitality predator or prey, or empty the cell
    pub fn set_cell(&mut self, kind: CellKind, x: i32, y: i32) -> Result<()> {
        let cell = Cell::live(kind, self.config.value_max);
        self.grid.set(Position::new(x, y), cell)
    }

    pub fn clear_cell(&mut self, x: i32, y: i32) -> Result<()> {
        self.grid.set(Position::new(x, y), Cell::Empty)
    }

    /// Place a cell with explicit vitality, clamped to `value_max`
    pub fn put_cell(&mut self, x: i32, y: i32, cell: Cell) -> Result<()> {
        self.grid
            .set(Position::new(x, y), cell.clamped(self.config.value_max))
    }

    pub fn cell(&self, x: i32, y: i32) -> Result<Cell> {
        self.grid.get(Position::new(x, y))
    }

    pub fn resize(&mut self, width: usize, height: usize) -> Result<()> {
        let previous_capacity = self.grid.capacity();
        self.grid.resize(width, height)?;
        self.refresh_stats();
        info!(
            width,
            height,
            capacity = self.grid.capacity(),
            reallocated = self.grid.capacity() != previous_capacity,
            "Resized grid"
        );
        Ok(())
    }

    pub fn clear_all(&mut self) {
        self.grid.clear();
        self.refresh_stats();
        info!("Cleared grid");
    }

    /// Seed empty cells with full-vitality prey and predators.
    ///
    /// Each empty cell rolls once: below `prey_density` it becomes prey, below
    /// `prey_density + predator_density` a predator.
    pub fn populate(&mut self, prey_density: f32, predator_density: f32) -> Result<()> {
        WorldConfig {
            width: self.grid.width(),
            height: self.grid.height(),
            seed: None,
            prey_density,
            predator_density,
        }
        .validate()?;

        let value_max = self.config.value_max;
        for index in 0..self.grid.len() {
            if !self.grid.at(index).is_empty() {
                continue;
            }
            let roll = self.rng.gen::<f32>();
            if roll < prey_density {
                self.grid.put(index, Cell::Prey(value_max));
            } else if roll < prey_density + predator_density {
                self.grid.put(index, Cell::Predator(value_max));
            }
        }

        self.refresh_stats();
        Ok(())
    }

    fn refresh_stats(&mut self) {
        self.stats = Stats::compute(self.grid.cells(), self.tick);
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    /// Population counts as of the last recomputation
    pub fn stats(&self) -> Stats {
        self.stats
    }

    pub fn config(&self) -> &SimConfig {
        &self.config
    }

    /// Rules are read at the start of the next tick
    pub fn config_mut(&mut self) -> &mut SimConfig {
        &mut self.config
    }

    /// Total ticks run since creation
    pub fn tick_count(&self) -> u64 {
        self.tick
    }

    /// Action counts accumulated over every tick run
    pub fn totals(&self) -> TickSummary {
        self.totals
    }
}
