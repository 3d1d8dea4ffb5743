//! Logging setup for the runner.

use anyhow::Result;
use tracing::info;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Install the global subscriber.
///
/// Filtering follows `RUST_LOG`; setting `PREDPREY_LOG_JSON` switches the
/// output to one JSON object per line.
pub fn init_telemetry() -> Result<()> {
    let json = std::env::var_os("PREDPREY_LOG_JSON").is_some();

    tracing_subscriber::registry()
        .with(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,predprey_runner=debug".into()),
        )
        .with(json.then(|| fmt::layer().json().with_target(true)))
        .with((!json).then(|| fmt::layer().with_target(true)))
        .try_init()?;

    info!("Telemetry initialized");
    Ok(())
}
