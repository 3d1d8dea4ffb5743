//! Headless runner that drives a simulation with a synthetic frame clock.
//!
//! Usage: `predprey-runner [config.json]`. Without a path the default
//! configuration is used.

mod telemetry;

use anyhow::{Context, Result};
use predprey_core::RunnerConfig;
use predprey_world::Simulation;
use std::path::Path;
use tracing::{debug, info};

fn main() -> Result<()> {
    telemetry::init_telemetry()?;

    let config = match std::env::args().nth(1) {
        Some(path) => load_config(Path::new(&path))?,
        None => RunnerConfig::default(),
    };

    info!(
        frames = config.frames,
        frame_time_secs = config.frame_time_secs,
        width = config.world.width,
        height = config.world.height,
        seed = ?config.world.seed,
        "Starting predator-prey run"
    );

    let mut sim = Simulation::new(&config.world, config.sim.clone())?;
    run(&mut sim, &config)?;

    let stats = sim.stats();
    let totals = sim.totals();
    info!(
        event = "run_summary",
        total_ticks = sim.tick_count(),
        prey = stats.prey,
        predators = stats.predators,
        hunts = totals.hunts,
        prey_births = totals.prey_births,
        predator_births = totals.predator_births,
        prey_deaths = totals.prey_deaths,
        predator_deaths = totals.predator_deaths,
        "Run complete"
    );

    let report = serde_json::json!({
        "ticks": sim.tick_count(),
        "stats": stats,
        "totals": totals,
    });
    println!("{}", serde_json::to_string_pretty(&report)?);

    Ok(())
}

fn load_config(path: &Path) -> Result<RunnerConfig> {
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("reading config {}", path.display()))?;
    let config = serde_json::from_str(&text)
        .with_context(|| format!("parsing config {}", path.display()))?;
    info!("Loaded config from {}", path.display());
    Ok(config)
}

fn run(sim: &mut Simulation, config: &RunnerConfig) -> Result<()> {
    let interval = config.stats_interval_frames.max(1);
    let mut elapsed = 0.0;

    for frame in 0..config.frames {
        elapsed += config.frame_time_secs;
        elapsed = sim.step(elapsed)?;

        let stats = sim.stats();
        if frame % interval == 0 {
            info!(
                event = "population_snapshot",
                frame,
                tick = stats.tick,
                prey = stats.prey,
                predators = stats.predators,
                "Population snapshot"
            );
        }

        if stats.tick > 0 && stats.population() == 0 {
            info!(frame, tick = stats.tick, "Grid is empty, stopping early");
            break;
        }
    }

    debug!(leftover = elapsed, "Frame loop finished");
    Ok(())
}
