//! Shared session control state.
//!
//! One [`SessionControl`] is shared (via [`Arc`](std::sync::Arc)) by the
//! render loop, both event producers, and the shutdown path. Stopping the
//! visualization must halt all three loops and release their timers, so
//! the stop flag pairs an atomic with a [`Notify`] that wakes anything
//! sleeping between ticks. The frame interval is runtime-adjustable the
//! same way the tick interval is in a bounded simulation runner.

use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};

use chrono::{DateTime, Utc};
use tokio::sync::Notify;

/// Shared start/stop and pacing state for a visualization session.
#[derive(Debug)]
pub struct SessionControl {
    /// Whether a stop has been requested.
    stop_requested: AtomicBool,

    /// Wakes loops sleeping between ticks when a stop is requested.
    stop_notify: Notify,

    /// Milliseconds between render frames (runtime-adjustable).
    frame_interval_ms: AtomicU64,

    /// Wall-clock time when the session started.
    started_at: DateTime<Utc>,
}

impl SessionControl {
    /// Create a new control block with the given frame interval.
    pub fn new(frame_interval_ms: u64) -> Self {
        Self {
            stop_requested: AtomicBool::new(false),
            stop_notify: Notify::new(),
            frame_interval_ms: AtomicU64::new(frame_interval_ms),
            started_at: Utc::now(),
        }
    }

    /// Request a clean stop and wake every sleeping loop.
    pub fn request_stop(&self) {
        self.stop_requested.store(true, Ordering::Release);
        self.stop_notify.notify_waiters();
    }

    /// Check whether a stop has been requested.
    pub fn is_stop_requested(&self) -> bool {
        self.stop_requested.load(Ordering::Acquire)
    }

    /// Resolve once a stop has been requested.
    ///
    /// Returns immediately if the stop already happened. The notified
    /// future is registered before the flag check so a stop landing
    /// between the two cannot be missed.
    pub async fn stopped(&self) {
        loop {
            let notified = self.stop_notify.notified();
            if self.is_stop_requested() {
                return;
            }
            notified.await;
        }
    }

    /// Current frame interval in milliseconds.
    pub fn frame_interval_ms(&self) -> u64 {
        self.frame_interval_ms.load(Ordering::Acquire)
    }

    /// Adjust the frame interval at runtime.
    pub fn set_frame_interval_ms(&self, interval_ms: u64) {
        self.frame_interval_ms.store(interval_ms, Ordering::Release);
    }

    /// Wall-clock time the session started.
    pub const fn started_at(&self) -> DateTime<Utc> {
        self.started_at
    }

    /// Whole seconds since the session started.
    pub fn uptime_seconds(&self) -> u64 {
        let elapsed = (Utc::now() - self.started_at).num_seconds();
        u64::try_from(elapsed).unwrap_or(0)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::sync::Arc;
    use std::time::Duration;

    use super::*;

    #[test]
    fn stop_flag_starts_clear() {
        let control = SessionControl::new(16);
        assert!(!control.is_stop_requested());
        control.request_stop();
        assert!(control.is_stop_requested());
    }

    #[test]
    fn frame_interval_is_adjustable() {
        let control = SessionControl::new(16);
        assert_eq!(control.frame_interval_ms(), 16);
        control.set_frame_interval_ms(33);
        assert_eq!(control.frame_interval_ms(), 33);
    }

    #[tokio::test]
    async fn stopped_resolves_after_request() {
        let control = Arc::new(SessionControl::new(16));

        let waiter = {
            let control = Arc::clone(&control);
            tokio::spawn(async move {
                control.stopped().await;
            })
        };

        // Give the waiter a moment to park, then stop.
        tokio::time::sleep(Duration::from_millis(10)).await;
        control.request_stop();

        tokio::time::timeout(Duration::from_secs(1), waiter)
            .await
            .unwrap()
            .unwrap();
    }

    #[tokio::test]
    async fn stopped_returns_immediately_when_already_stopped() {
        let control = SessionControl::new(16);
        control.request_stop();
        tokio::time::timeout(Duration::from_millis(100), control.stopped())
            .await
            .unwrap();
    }
}
