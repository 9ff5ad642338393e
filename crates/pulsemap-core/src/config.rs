//! Configuration loading and typed config structures.
//!
//! The canonical configuration lives in `pulsemap-config.yaml` at the
//! project root. This module defines strongly-typed structs mirroring
//! the YAML structure, with every field defaulted so a missing file or
//! a partial file both work. The animation defaults are the timing the
//! visualization was tuned with.

use std::path::Path;

use serde::Deserialize;

/// Errors that can occur when loading configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// Failed to read the configuration file from disk.
    #[error("failed to read config file: {source}")]
    Io {
        /// The underlying I/O error.
        #[from]
        source: std::io::Error,
    },

    /// Failed to parse YAML content.
    #[error("failed to parse config YAML: {source}")]
    Yaml {
        /// The underlying YAML parse error.
        source: serde_yml::Error,
    },
}

impl From<serde_yml::Error> for ConfigError {
    fn from(source: serde_yml::Error) -> Self {
        Self::Yaml { source }
    }
}

/// Top-level engine configuration.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct EngineConfig {
    /// Lifecycle animation durations.
    #[serde(default)]
    pub animation: AnimationConfig,

    /// Render loop pacing.
    #[serde(default)]
    pub render: RenderConfig,

    /// Event store bounds.
    #[serde(default)]
    pub store: StoreConfig,

    /// Log feed bounds.
    #[serde(default)]
    pub logs: LogConfig,

    /// Synthetic event generator settings.
    #[serde(default)]
    pub synthetic: SyntheticConfig,

    /// Polling feed client settings.
    #[serde(default)]
    pub feed: FeedConfig,

    /// Observer API server settings.
    #[serde(default)]
    pub observer: ObserverConfig,

    /// Logging configuration.
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl EngineConfig {
    /// Load configuration from a YAML file at the given path.
    ///
    /// The `FEED_URL` environment variable overrides `feed.url` so a
    /// deployment can point at its collaborator without editing the
    /// YAML file.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Io`] if the file cannot be read, or
    /// [`ConfigError::Yaml`] if the content is not valid YAML.
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        Self::parse(&contents)
    }

    /// Parse configuration from a YAML string.
    ///
    /// An empty document yields the defaults.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Yaml`] if the string is not valid YAML.
    pub fn parse(yaml: &str) -> Result<Self, ConfigError> {
        let mut config: Self = if yaml.trim().is_empty() {
            Self::default()
        } else {
            serde_yml::from_str(yaml)?
        };
        config.feed.apply_env_overrides();
        Ok(config)
    }
}

/// Lifecycle animation durations, all in milliseconds.
///
/// Zero is legal for any duration and collapses the corresponding phase
/// to an instantaneous jump.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct AnimationConfig {
    /// Fade-in duration of the endpoint flares.
    #[serde(default = "default_initial_flare_fade_in_ms")]
    pub initial_flare_fade_in_ms: u64,

    /// Fade-in duration of the arc.
    #[serde(default = "default_arc_fade_in_ms")]
    pub arc_fade_in_ms: u64,

    /// Fade-out duration shared by every element.
    #[serde(default = "default_element_fade_out_ms")]
    pub element_fade_out_ms: u64,

    /// Delay between the source flare appearing and the arc starting.
    #[serde(default = "default_arc_start_delay_ms")]
    pub arc_start_delay_ms: u64,

    /// Hold duration after the last element has fully appeared.
    #[serde(default = "default_hold_ms")]
    pub hold_ms: u64,
}

impl Default for AnimationConfig {
    fn default() -> Self {
        Self {
            initial_flare_fade_in_ms: default_initial_flare_fade_in_ms(),
            arc_fade_in_ms: default_arc_fade_in_ms(),
            element_fade_out_ms: default_element_fade_out_ms(),
            arc_start_delay_ms: default_arc_start_delay_ms(),
            hold_ms: default_hold_ms(),
        }
    }
}

/// Render loop pacing.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct RenderConfig {
    /// Milliseconds between render frames (16 approximates a display
    /// refresh tick).
    #[serde(default = "default_frame_interval_ms")]
    pub frame_interval_ms: u64,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            frame_interval_ms: default_frame_interval_ms(),
        }
    }
}

/// Event store bounds.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct StoreConfig {
    /// Maximum events retained; the oldest are evicted beyond this.
    #[serde(default = "default_max_events")]
    pub max_events: usize,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            max_events: default_max_events(),
        }
    }
}

/// Log feed bounds.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct LogConfig {
    /// Maximum log entries retained, newest first.
    #[serde(default = "default_max_log_entries")]
    pub max_entries: usize,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            max_entries: default_max_log_entries(),
        }
    }
}

/// Synthetic event generator settings.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct SyntheticConfig {
    /// Whether the generator runs.
    #[serde(default = "default_true")]
    pub enabled: bool,

    /// Milliseconds between generation ticks.
    #[serde(default = "default_synthetic_interval_ms")]
    pub interval_ms: u64,

    /// Events generated per tick.
    #[serde(default = "default_synthetic_burst")]
    pub burst: usize,

    /// Probability that a generated event is a self-attack.
    #[serde(default = "default_self_attack_chance")]
    pub self_attack_chance: f64,

    /// RNG seed for reproducible runs.
    #[serde(default = "default_seed")]
    pub seed: u64,
}

impl Default for SyntheticConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            interval_ms: default_synthetic_interval_ms(),
            burst: default_synthetic_burst(),
            self_attack_chance: default_self_attack_chance(),
            seed: default_seed(),
        }
    }
}

/// Polling feed client settings.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct FeedConfig {
    /// Whether the polling client runs.
    #[serde(default)]
    pub enabled: bool,

    /// Collaborator endpoint returning the `{ "logs": [...] }` payload.
    #[serde(default = "default_feed_url")]
    pub url: String,

    /// Milliseconds between polls.
    #[serde(default = "default_poll_interval_ms")]
    pub poll_interval_ms: u64,

    /// Per-request timeout; a timeout counts as "no events this tick".
    #[serde(default = "default_request_timeout_ms")]
    pub request_timeout_ms: u64,
}

impl FeedConfig {
    /// Override the feed URL with the `FEED_URL` environment variable
    /// when set.
    pub fn apply_env_overrides(&mut self) {
        if let Ok(val) = std::env::var("FEED_URL") {
            self.url = val;
        }
    }
}

impl Default for FeedConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            url: default_feed_url(),
            poll_interval_ms: default_poll_interval_ms(),
            request_timeout_ms: default_request_timeout_ms(),
        }
    }
}

/// Observer API server settings.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ObserverConfig {
    /// Host address to bind.
    #[serde(default = "default_observer_host")]
    pub host: String,

    /// TCP port to listen on.
    #[serde(default = "default_observer_port")]
    pub port: u16,
}

impl Default for ObserverConfig {
    fn default() -> Self {
        Self {
            host: default_observer_host(),
            port: default_observer_port(),
        }
    }
}

/// Logging configuration.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct LoggingConfig {
    /// Log level (trace, debug, info, warn, error).
    #[serde(default = "default_log_level")]
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
        }
    }
}

// ---------------------------------------------------------------------------
// Default value functions (serde default requires named functions)
// ---------------------------------------------------------------------------

const fn default_initial_flare_fade_in_ms() -> u64 {
    400
}

const fn default_arc_fade_in_ms() -> u64 {
    800
}

const fn default_element_fade_out_ms() -> u64 {
    400
}

const fn default_arc_start_delay_ms() -> u64 {
    100
}

const fn default_hold_ms() -> u64 {
    3500
}

const fn default_frame_interval_ms() -> u64 {
    16
}

const fn default_max_events() -> usize {
    500
}

const fn default_max_log_entries() -> usize {
    50
}

const fn default_synthetic_interval_ms() -> u64 {
    1000
}

const fn default_synthetic_burst() -> usize {
    1
}

const fn default_self_attack_chance() -> f64 {
    0.25
}

const fn default_seed() -> u64 {
    42
}

fn default_feed_url() -> String {
    "http://localhost:8000/logs".to_owned()
}

const fn default_poll_interval_ms() -> u64 {
    15_000
}

const fn default_request_timeout_ms() -> u64 {
    10_000
}

fn default_observer_host() -> String {
    "0.0.0.0".to_owned()
}

const fn default_observer_port() -> u16 {
    8080
}

fn default_log_level() -> String {
    "info".to_owned()
}

const fn default_true() -> bool {
    true
}
