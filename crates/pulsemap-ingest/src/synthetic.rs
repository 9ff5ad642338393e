//! Synthetic event generator.
//!
//! Until a live collaborator is wired up (and alongside one, for demo
//! density), the engine invents plausible traffic: random
//! centroid-to-centroid arcs with a configurable share of self-attacks.
//! The RNG is seeded so a run is reproducible.

use std::sync::Arc;
use std::time::Duration;

use chrono::{DateTime, Utc};
use pulsemap_core::config::SyntheticConfig;
use pulsemap_core::{EventStore, LogFeed, SessionControl};
use pulsemap_types::{AttackEvent, LogEntry};
use pulsemap_world::{Country, CountryAtlas};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tokio::sync::RwLock;
use tracing::{debug, info};

/// Name the log panel shows for generated events.
const SYNTHETIC_SOURCE: &str = "Simulated";

/// Seeded generator of synthetic attack events.
#[derive(Debug)]
pub struct SyntheticGenerator {
    rng: StdRng,
    self_attack_chance: f64,
}

impl SyntheticGenerator {
    /// Create a generator from configuration.
    pub fn new(config: &SyntheticConfig) -> Self {
        Self {
            rng: StdRng::seed_from_u64(config.seed),
            self_attack_chance: config.self_attack_chance.clamp(0.0, 1.0),
        }
    }

    /// Generate `count` events stamped with `now`, paired with their
    /// log entries. Returns nothing when the atlas is empty.
    pub fn generate(
        &mut self,
        atlas: &CountryAtlas,
        count: usize,
        now: DateTime<Utc>,
    ) -> Vec<(AttackEvent, LogEntry)> {
        if atlas.is_empty() {
            return Vec::new();
        }

        (0..count)
            .filter_map(|_| {
                let source = self.pick(atlas)?;
                let target = if self.rng.random_bool(self.self_attack_chance) {
                    source
                } else {
                    self.pick(atlas)?
                };

                let event = AttackEvent::new(source.centroid, target.centroid, now);
                let log = LogEntry::new(
                    format!("Simulated attack from {} to {}", source.name, target.name),
                    SYNTHETIC_SOURCE.to_owned(),
                    Some(String::from("Simulated Attack")),
                    now,
                );
                Some((event, log))
            })
            .collect()
    }

    fn pick(&mut self, atlas: &CountryAtlas) -> Option<Country> {
        let index = self.rng.random_range(0..atlas.len());
        atlas.get(index).copied()
    }
}

/// Run the synthetic generation loop until a stop is requested.
///
/// Every `interval_ms` the generator appends `burst` events to the
/// store and matching entries to the log feed, interleaving freely
/// with the render loop's prune pass.
pub async fn run_synthetic_loop(
    mut generator: SyntheticGenerator,
    atlas: Arc<CountryAtlas>,
    store: Arc<RwLock<EventStore>>,
    logs: Arc<RwLock<LogFeed>>,
    control: Arc<SessionControl>,
    interval_ms: u64,
    burst: usize,
) {
    info!(interval_ms, burst, "Synthetic generator starting");

    loop {
        if control.is_stop_requested() {
            break;
        }

        let batch = generator.generate(&atlas, burst, Utc::now());
        if !batch.is_empty() {
            debug!(events = batch.len(), "Generated synthetic events");
            let mut store_guard = store.write().await;
            let mut logs_guard = logs.write().await;
            for (event, log) in batch {
                store_guard.add(event);
                logs_guard.push(log);
            }
        }

        tokio::select! {
            () = control.stopped() => break,
            () = tokio::time::sleep(Duration::from_millis(interval_ms)) => {}
        }
    }

    info!("Synthetic generator stopped");
}
