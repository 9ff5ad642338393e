//! Ingestion error type.

/// Errors that can occur while fetching or decoding feed records.
///
/// Every variant is recoverable by design: the polling loop logs the
/// error and treats the tick as having produced zero events.
#[derive(Debug, thiserror::Error)]
pub enum IngestError {
    /// The HTTP client could not be constructed.
    #[error("failed to build feed client: {0}")]
    Client(String),

    /// The feed endpoint was unreachable, timed out, or returned an
    /// error status.
    #[error("feed request failed: {0}")]
    Http(String),

    /// The response body was not a valid feed payload.
    #[error("feed response parse failed: {source}")]
    Parse {
        /// The underlying JSON error.
        #[from]
        source: serde_json::Error,
    },
}
