//! Error type for the engine binary.

use pulsemap_core::ConfigError;
use pulsemap_ingest::IngestError;
use pulsemap_observer::startup::StartupError;

/// Errors that can abort engine startup.
///
/// Once the loops are running, failures are handled locally (a failed
/// poll is an empty tick, a lost subscriber is a debug log); only
/// startup problems surface here.
#[derive(Debug, thiserror::Error)]
pub enum EngineError {
    /// Configuration could not be loaded.
    #[error("config error: {source}")]
    Config {
        /// The underlying configuration error.
        #[from]
        source: ConfigError,
    },

    /// The feed client could not be constructed.
    #[error("ingest error: {source}")]
    Ingest {
        /// The underlying ingestion error.
        #[from]
        source: IngestError,
    },

    /// The Observer server could not be spawned.
    #[error("observer error: {source}")]
    Observer {
        /// The underlying startup error.
        #[from]
        source: StartupError,
    },
}
