//! Boot: logging init, config load, state creation.

use std::sync::Arc;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use crate::conf::AppConfig;
use crate::state::{AppState, SharedState};

/// Initialise the tracing / logging subsystem.
///
/// Logs go to stderr; stdout carries command output only.
pub fn init_logging() {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "accesslog=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}

/// Load and validate config, then build shared state.
pub fn boot() -> Result<SharedState, Box<dyn std::error::Error>> {
    info!("Starting accesslog v{}", env!("CARGO_PKG_VERSION"));

    let config = AppConfig::load()?;
    config.validate()?;
    info!(
        "Store: max_records={:?}, materialize_results={}",
        config.store.max_records, config.store.materialize_results
    );

    let state = Arc::new(AppState::new(config)?);
    info!("Initialized shared application state");

    Ok(state)
}
