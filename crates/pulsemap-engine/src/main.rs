//! Engine binary for the Pulsemap attack map.
//!
//! Wires together the event lifecycle engine, the two event producers,
//! and the Observer API, then runs until interrupted. The renderer is a
//! separate browser application consuming the Observer's frame stream.
//!
//! # Startup Sequence
//!
//! 1. Load configuration from `pulsemap-config.yaml` (defaults if absent)
//! 2. Initialize structured logging (tracing)
//! 3. Build the country atlas and compute the phase schedule
//! 4. Create the shared store, log feed, and session control
//! 5. Start the Observer API server
//! 6. Spawn the synthetic generator and polling feed loops
//! 7. Spawn the render sampling loop
//! 8. Wait for Ctrl-C, request a stop, and drain every task

mod error;

use std::path::Path;
use std::sync::Arc;

use pulsemap_core::{
    EngineConfig, EventStore, LogFeed, PhaseSchedule, SessionControl, run_render_loop,
};
use pulsemap_ingest::{FeedClient, SyntheticGenerator, run_feed_loop, run_synthetic_loop};
use pulsemap_observer::state::AppState;
use pulsemap_observer::{ServerConfig, spawn_observer};
use pulsemap_world::CountryAtlas;
use tokio::sync::RwLock;
use tokio::task::JoinHandle;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use crate::error::EngineError;

/// Default configuration file looked up in the working directory.
const CONFIG_FILE: &str = "pulsemap-config.yaml";

/// Application entry point for the Pulsemap engine.
///
/// Initializes all subsystems, runs until a shutdown signal arrives,
/// then stops every loop and drains the tasks.
///
/// # Errors
///
/// Returns an error if any initialization step fails.
#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // 1. Load configuration (before logging so the configured level
    //    can seed the filter).
    let (config, config_found) = load_config()?;

    // 2. Initialize structured logging. RUST_LOG wins over the file.
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(&config.logging.level)),
        )
        .with_target(true)
        .init();

    info!("pulsemap-engine starting");
    if config_found {
        info!(path = CONFIG_FILE, "Configuration loaded");
    } else {
        info!("Config file not found, using defaults");
    }

    // 3. Build the atlas and the process-wide phase schedule.
    let atlas = Arc::new(CountryAtlas::new());
    let schedule = PhaseSchedule::from_config(&config.animation);
    info!(
        countries = atlas.len(),
        total_lifecycle_ms = schedule.total_lifecycle_ms,
        "Atlas and phase schedule ready"
    );

    // 4. Shared engine state.
    let store = Arc::new(RwLock::new(EventStore::new(config.store.max_events)));
    let logs = Arc::new(RwLock::new(LogFeed::new(config.logs.max_entries)));
    let control = Arc::new(SessionControl::new(config.render.frame_interval_ms));

    // 5. Observer API server.
    let app_state = Arc::new(AppState::new(
        Arc::clone(&store),
        Arc::clone(&logs),
        Arc::clone(&control),
    ));
    let server_config = ServerConfig {
        host: config.observer.host.clone(),
        port: config.observer.port,
    };
    let observer_handle = spawn_observer(server_config, Arc::clone(&app_state))
        .await
        .map_err(EngineError::from)?;

    // 6. Event producers.
    let mut producer_handles: Vec<JoinHandle<()>> = Vec::new();

    if config.synthetic.enabled {
        let generator = SyntheticGenerator::new(&config.synthetic);
        producer_handles.push(tokio::spawn(run_synthetic_loop(
            generator,
            Arc::clone(&atlas),
            Arc::clone(&store),
            Arc::clone(&logs),
            Arc::clone(&control),
            config.synthetic.interval_ms,
            config.synthetic.burst,
        )));
    } else {
        info!("Synthetic generator disabled");
    }

    if config.feed.enabled {
        let client = FeedClient::new(&config.feed).map_err(EngineError::from)?;
        producer_handles.push(tokio::spawn(run_feed_loop(
            client,
            Arc::clone(&store),
            Arc::clone(&logs),
            Arc::clone(&control),
            config.feed.poll_interval_ms,
        )));
    } else {
        info!("Feed polling disabled");
    }

    // 7. The render sampling loop.
    let render_handle = {
        let store = Arc::clone(&store);
        let control = Arc::clone(&control);
        let mut sink = app_state.frame_sink();
        tokio::spawn(async move { run_render_loop(store, &schedule, &control, &mut sink).await })
    };

    // 8. Run until interrupted, then stop everything.
    match tokio::signal::ctrl_c().await {
        Ok(()) => info!("Shutdown signal received"),
        Err(e) => warn!(error = %e, "Failed to listen for shutdown signal, stopping"),
    }
    control.request_stop();

    let stats = render_handle.await?;
    for handle in producer_handles {
        let _ = handle.await;
    }
    observer_handle.abort();

    info!(
        frames = stats.frames,
        events_pruned = stats.events_pruned,
        "pulsemap-engine shutdown complete"
    );

    Ok(())
}

/// Load the engine configuration from `pulsemap-config.yaml`.
///
/// Returns the config and whether the file existed; a missing file
/// yields defaults rather than an error.
fn load_config() -> Result<(EngineConfig, bool), EngineError> {
    let config_path = Path::new(CONFIG_FILE);
    if config_path.exists() {
        let config = EngineConfig::from_file(config_path)?;
        Ok((config, true))
    } else {
        Ok((EngineConfig::default(), false))
    }
}
