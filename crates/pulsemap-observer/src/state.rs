//! Shared application state for the Observer API server.
//!
//! [`AppState`] holds the broadcast channel for frame samples plus
//! handles to the event store, log feed, and session control that the
//! REST endpoints serve read-only. [`BroadcastSink`] is the adapter the
//! render loop writes through.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use pulsemap_core::runner::FrameSink;
use pulsemap_core::{EventStore, LogFeed, SessionControl};
use pulsemap_types::{ArcVisual, FrameSample, MarkerVisual};
use tokio::sync::{RwLock, broadcast};
use tracing::trace;

/// Capacity of the broadcast channel for frame samples.
///
/// If a subscriber falls behind by more than this many frames it will
/// receive a [`broadcast::error::RecvError::Lagged`] and skip to the
/// newest frame -- stale frames are worthless to a live map.
const BROADCAST_CAPACITY: usize = 256;

/// JSON-serializable frame pushed over the `WebSocket`.
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
pub struct FrameBroadcast {
    /// Monotonic frame counter for this session.
    pub frame_no: u64,
    /// Wall-clock time the frame was sampled.
    pub captured_at: DateTime<Utc>,
    /// Arcs to draw this frame.
    pub arcs: Vec<ArcVisual>,
    /// Endpoint markers to draw this frame.
    pub markers: Vec<MarkerVisual>,
}

/// Shared state for the Axum application.
///
/// Wrapped in [`Arc`] and injected via Axum's `State` extractor. The
/// broadcast sender fans frames out to all connected `WebSocket`
/// clients; the store and log feed are the same handles the engine's
/// loops write to.
#[derive(Clone)]
pub struct AppState {
    /// Broadcast sender for frame samples.
    pub tx: broadcast::Sender<FrameBroadcast>,
    /// The engine's event store (read-only here).
    pub store: Arc<RwLock<EventStore>>,
    /// The engine's log feed (read-only here).
    pub logs: Arc<RwLock<LogFeed>>,
    /// Shared session control (uptime, frame interval).
    pub control: Arc<SessionControl>,
}

impl AppState {
    /// Create application state over the engine's shared handles.
    pub fn new(
        store: Arc<RwLock<EventStore>>,
        logs: Arc<RwLock<LogFeed>>,
        control: Arc<SessionControl>,
    ) -> Self {
        let (tx, _) = broadcast::channel(BROADCAST_CAPACITY);
        Self {
            tx,
            store,
            logs,
            control,
        }
    }

    /// Subscribe to the frame broadcast channel.
    pub fn subscribe(&self) -> broadcast::Receiver<FrameBroadcast> {
        self.tx.subscribe()
    }

    /// Create the sink the render loop writes frames through.
    pub fn frame_sink(&self) -> BroadcastSink {
        BroadcastSink {
            tx: self.tx.clone(),
            frame_no: 0,
        }
    }
}

/// Render-loop sink that publishes each frame to the broadcast channel.
#[derive(Debug)]
pub struct BroadcastSink {
    tx: broadcast::Sender<FrameBroadcast>,
    frame_no: u64,
}

impl FrameSink for BroadcastSink {
    fn on_frame(&mut self, frame: &FrameSample) {
        self.frame_no = self.frame_no.saturating_add(1);
        let broadcast = FrameBroadcast {
            frame_no: self.frame_no,
            captured_at: Utc::now(),
            arcs: frame.arcs.clone(),
            markers: frame.markers.clone(),
        };
        // A send error only means nobody is connected right now.
        if self.tx.send(broadcast).is_err() {
            trace!("no frame subscribers connected");
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn make_state() -> AppState {
        AppState::new(
            Arc::new(RwLock::new(EventStore::new(100))),
            Arc::new(RwLock::new(LogFeed::new(10))),
            Arc::new(SessionControl::new(16)),
        )
    }

    #[tokio::test]
    async fn sink_publishes_numbered_frames_to_subscribers() {
        let state = make_state();
        let mut rx = state.subscribe();
        let mut sink = state.frame_sink();

        sink.on_frame(&FrameSample::default());
        sink.on_frame(&FrameSample::default());

        assert_eq!(rx.recv().await.unwrap().frame_no, 1);
        assert_eq!(rx.recv().await.unwrap().frame_no, 2);
    }

    #[test]
    fn sink_without_subscribers_does_not_panic() {
        let state = make_state();
        let mut sink = state.frame_sink();
        sink.on_frame(&FrameSample::default());
    }
}
