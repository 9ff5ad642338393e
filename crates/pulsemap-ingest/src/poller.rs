//! Polling feed client.
//!
//! The collaborator is polled on a fixed interval; whatever it returns
//! since the last poll is converted and appended to the store and log
//! feed. Absence, timeouts, error statuses, and parse failures all
//! degrade to zero events for that tick -- the render path never sees
//! an ingestion failure. A fetch that completes after a stop was
//! requested is discarded rather than applied to a stale store.

use std::sync::Arc;
use std::time::Duration;

use chrono::Utc;
use pulsemap_core::config::FeedConfig;
use pulsemap_core::{EventStore, LogFeed, SessionControl};
use tokio::sync::RwLock;
use tracing::{debug, info, warn};

use crate::error::IngestError;
use crate::wire::{FeedRecord, FeedResponse, convert_record};

/// HTTP client for the collaborator's poll endpoint.
#[derive(Debug, Clone)]
pub struct FeedClient {
    client: reqwest::Client,
    url: String,
}

impl FeedClient {
    /// Build a client from feed configuration.
    ///
    /// # Errors
    ///
    /// Returns [`IngestError::Client`] if the underlying HTTP client
    /// cannot be constructed.
    pub fn new(config: &FeedConfig) -> Result<Self, IngestError> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_millis(config.request_timeout_ms))
            .build()
            .map_err(|e| IngestError::Client(format!("{e}")))?;

        Ok(Self {
            client,
            url: config.url.clone(),
        })
    }

    /// The endpoint this client polls.
    pub fn url(&self) -> &str {
        &self.url
    }

    /// Fetch one batch of feed records.
    ///
    /// An empty body is a valid "nothing new" response.
    ///
    /// # Errors
    ///
    /// Returns [`IngestError::Http`] on transport failures or error
    /// statuses, and [`IngestError::Parse`] when the body is not a
    /// valid feed payload.
    pub async fn fetch(&self) -> Result<FeedResponse, IngestError> {
        let response = self
            .client
            .get(&self.url)
            .send()
            .await
            .map_err(|e| IngestError::Http(format!("{e}")))?;

        let status = response.status();
        if !status.is_success() {
            return Err(IngestError::Http(format!("feed returned {status}")));
        }

        let body = response
            .text()
            .await
            .map_err(|e| IngestError::Http(format!("reading body failed: {e}")))?;

        if body.trim().is_empty() {
            return Ok(FeedResponse::default());
        }

        Ok(serde_json::from_str(&body)?)
    }
}

/// Run the polling loop until a stop is requested.
pub async fn run_feed_loop(
    client: FeedClient,
    store: Arc<RwLock<EventStore>>,
    logs: Arc<RwLock<LogFeed>>,
    control: Arc<SessionControl>,
    poll_interval_ms: u64,
) {
    info!(url = client.url(), poll_interval_ms, "Feed polling loop starting");

    loop {
        if control.is_stop_requested() {
            break;
        }

        match client.fetch().await {
            Ok(response) => {
                // The session may have been torn down while the request
                // was in flight; a late result must not touch the store.
                if control.is_stop_requested() {
                    debug!("discarding feed response that arrived after stop");
                    break;
                }
                let ingested = apply_records(&response.logs, &store, &logs).await;
                if ingested > 0 {
                    info!(events = ingested, "Feed events ingested");
                }
            }
            Err(err) => {
                warn!(error = %err, "Feed poll failed, no events this tick");
            }
        }

        tokio::select! {
            () = control.stopped() => break,
            () = tokio::time::sleep(Duration::from_millis(poll_interval_ms)) => {}
        }
    }

    info!("Feed polling loop stopped");
}

/// Convert and append a batch of records; returns how many were applied.
async fn apply_records(
    records: &[FeedRecord],
    store: &Arc<RwLock<EventStore>>,
    logs: &Arc<RwLock<LogFeed>>,
) -> usize {
    if records.is_empty() {
        return 0;
    }

    let now = Utc::now();
    let mut store_guard = store.write().await;
    let mut logs_guard = logs.write().await;
    for record in records {
        let ingested = convert_record(record, now);
        store_guard.add(ingested.event);
        logs_guard.push(ingested.log);
    }
    records.len()
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn unreachable_config() -> FeedConfig {
        FeedConfig {
            enabled: true,
            // Port 1 is essentially never listening; the connection is
            // refused immediately rather than timing out.
            url: String::from("http://127.0.0.1:1/logs"),
            poll_interval_ms: 10,
            request_timeout_ms: 500,
        }
    }

    #[tokio::test]
    async fn unreachable_feed_is_an_http_error() {
        let client = FeedClient::new(&unreachable_config()).unwrap();
        let result = client.fetch().await;
        assert!(matches!(result, Err(IngestError::Http(_))));
    }

    #[tokio::test]
    async fn failing_feed_never_adds_events_and_loop_stops_cleanly() {
        let client = FeedClient::new(&unreachable_config()).unwrap();
        let store = Arc::new(RwLock::new(EventStore::new(100)));
        let logs = Arc::new(RwLock::new(LogFeed::new(10)));
        let control = Arc::new(SessionControl::new(16));

        let handle = tokio::spawn(run_feed_loop(
            client,
            Arc::clone(&store),
            Arc::clone(&logs),
            Arc::clone(&control),
            10,
        ));

        tokio::time::sleep(Duration::from_millis(50)).await;
        control.request_stop();
        tokio::time::timeout(Duration::from_secs(2), handle)
            .await
            .unwrap()
            .unwrap();

        assert!(store.read().await.is_empty());
        assert!(logs.read().await.is_empty());
    }

    #[tokio::test]
    async fn apply_records_feeds_store_and_logs() {
        let response: FeedResponse = serde_json::from_str(
            r#"{"logs": [
                [{"source": "OTX"}, {"src": [1.0, 2.0], "dst": [3.0, 4.0]}, "one"],
                [{"source": "OTX"}, null, "two"]
            ]}"#,
        )
        .unwrap();

        let store = Arc::new(RwLock::new(EventStore::new(100)));
        let logs = Arc::new(RwLock::new(LogFeed::new(10)));

        let applied = apply_records(&response.logs, &store, &logs).await;
        assert_eq!(applied, 2);
        assert_eq!(store.read().await.len(), 2);
        assert_eq!(logs.read().await.len(), 2);
        // Newest-first: the second record leads the feed.
        assert_eq!(logs.read().await.recent().next().unwrap().summary, "two");
    }
}
