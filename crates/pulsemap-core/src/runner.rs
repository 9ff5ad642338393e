//! The render sampling loop.
//!
//! A cooperative, timer-driven clock with an explicit start/stop
//! lifecycle. Once per frame it reads the wall clock, recomputes every
//! active event's visual state, hands the frame to a [`FrameSink`], and
//! prunes fully faded events. It performs no blocking I/O and never
//! waits on the producers feeding the store.

use std::sync::Arc;
use std::time::Duration;

use chrono::Utc;
use pulsemap_types::FrameSample;
use tokio::sync::RwLock;
use tracing::{debug, info};

use crate::control::SessionControl;
use crate::sampler::sample_frame;
use crate::schedule::PhaseSchedule;
use crate::store::EventStore;

/// Consumer of rendered frames.
///
/// Implementations forward each frame to whatever is displaying it --
/// a broadcast channel, a test probe. The engine itself never knows
/// what is on the other side.
pub trait FrameSink: Send {
    /// Called once per frame with the freshly sampled visual state.
    fn on_frame(&mut self, frame: &FrameSample);
}

/// A frame sink that discards everything, for tests and dry runs.
pub struct NoOpSink;

impl FrameSink for NoOpSink {
    fn on_frame(&mut self, _frame: &FrameSample) {}
}

/// Counters describing a completed render loop run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RenderLoopStats {
    /// Frames sampled and delivered to the sink.
    pub frames: u64,
    /// Events removed by age-based pruning across the run.
    pub events_pruned: u64,
}

/// Run the render sampling loop until a stop is requested.
///
/// Each iteration: read the wall clock, sample a [`FrameSample`] from
/// the store under a read lock, deliver it to `sink`, prune expired
/// events under a write lock, then sleep for the current frame
/// interval. Producers appending to the store interleave freely with
/// the prune pass; each store operation is atomic under its lock.
pub async fn run_render_loop(
    store: Arc<RwLock<EventStore>>,
    schedule: &PhaseSchedule,
    control: &SessionControl,
    sink: &mut dyn FrameSink,
) -> RenderLoopStats {
    info!(
        frame_interval_ms = control.frame_interval_ms(),
        total_lifecycle_ms = schedule.total_lifecycle_ms,
        "Render loop starting"
    );

    let mut stats = RenderLoopStats::default();

    loop {
        if control.is_stop_requested() {
            break;
        }

        let now = Utc::now();

        let frame = {
            let guard = store.read().await;
            sample_frame(guard.iter(), now, schedule)
        };
        sink.on_frame(&frame);
        stats.frames = stats.frames.saturating_add(1);

        let pruned = {
            let mut guard = store.write().await;
            guard.prune(now, schedule.total_lifecycle_ms)
        };
        if pruned > 0 {
            debug!(pruned, "Pruned fully faded events");
        }
        stats.events_pruned = stats.events_pruned.saturating_add(pruned as u64);

        let interval = Duration::from_millis(control.frame_interval_ms());
        tokio::select! {
            () = control.stopped() => break,
            () = tokio::time::sleep(interval) => {}
        }
    }

    info!(
        frames = stats.frames,
        events_pruned = stats.events_pruned,
        "Render loop stopped"
    );

    stats
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use chrono::TimeDelta;
    use pulsemap_types::{AttackEvent, GeoPoint};

    use super::*;
    use crate::config::AnimationConfig;

    /// Sink that counts frames and remembers the last one.
    struct ProbeSink {
        frames: u64,
        last: Option<FrameSample>,
    }

    impl FrameSink for ProbeSink {
        fn on_frame(&mut self, frame: &FrameSample) {
            self.frames = self.frames.saturating_add(1);
            self.last = Some(frame.clone());
        }
    }

    fn schedule() -> PhaseSchedule {
        PhaseSchedule::from_config(&AnimationConfig::default())
    }

    #[tokio::test]
    async fn loop_delivers_frames_and_stops_on_request() {
        let store = Arc::new(RwLock::new(EventStore::new(100)));
        {
            let mut guard = store.write().await;
            guard.add(AttackEvent::new(
                GeoPoint::new(2.35, 48.85),
                GeoPoint::new(139.69, 35.68),
                Utc::now(),
            ));
        }

        let control = Arc::new(SessionControl::new(5));
        let stopper = {
            let control = Arc::clone(&control);
            tokio::spawn(async move {
                tokio::time::sleep(Duration::from_millis(50)).await;
                control.request_stop();
            })
        };

        let mut sink = ProbeSink {
            frames: 0,
            last: None,
        };
        let stats = run_render_loop(store, &schedule(), &control, &mut sink).await;
        stopper.await.unwrap();

        assert!(stats.frames > 0);
        assert_eq!(stats.frames, sink.frames);
        // The event is seconds away from expiring, so the last frame
        // still carried its arc.
        assert!(!sink.last.unwrap().is_empty());
    }

    #[tokio::test]
    async fn loop_prunes_expired_events() {
        let store = Arc::new(RwLock::new(EventStore::new(100)));
        {
            let mut guard = store.write().await;
            // Created far enough in the past to be expired already.
            guard.add(AttackEvent::new(
                GeoPoint::new(2.35, 48.85),
                GeoPoint::new(139.69, 35.68),
                Utc::now() - TimeDelta::milliseconds(60_000),
            ));
        }

        let control = Arc::new(SessionControl::new(5));
        let stopper = {
            let control = Arc::clone(&control);
            tokio::spawn(async move {
                tokio::time::sleep(Duration::from_millis(30)).await;
                control.request_stop();
            })
        };

        let mut sink = NoOpSink;
        let stats = run_render_loop(Arc::clone(&store), &schedule(), &control, &mut sink).await;
        stopper.await.unwrap();

        assert_eq!(stats.events_pruned, 1);
        assert!(store.read().await.is_empty());
    }

    #[tokio::test]
    async fn loop_exits_immediately_when_already_stopped() {
        let store = Arc::new(RwLock::new(EventStore::new(100)));
        let control = SessionControl::new(5);
        control.request_stop();

        let mut sink = NoOpSink;
        let stats = run_render_loop(store, &schedule(), &control, &mut sink).await;
        assert_eq!(stats.frames, 0);
    }
}
