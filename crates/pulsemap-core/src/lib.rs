//! Event lifecycle animation engine for the Pulsemap attack map.
//!
//! This crate owns the time-driven function family that maps an event's
//! age to visual opacity/scale state across overlapping fade-in, hold,
//! and fade-out phases, applied independently to an arc and its two
//! endpoint markers with offset timing. It has no rendering dependency:
//! the render loop hands each frame's derived state to a [`FrameSink`]
//! and the renderer lives on the other side of that seam.
//!
//! # Modules
//!
//! - [`easing`] -- Quadratic ease-in-out smoothing curve.
//! - [`schedule`] -- Phase timing schedule computed once at startup.
//! - [`alpha`] -- Pure age-to-opacity evaluator.
//! - [`style`] -- Scale and style modulation (growth, pulse, ambient).
//! - [`store`] -- Ordered in-memory store of active events.
//! - [`logfeed`] -- Capped most-recent-first log entry feed.
//! - [`sampler`] -- Pure per-frame visual state recomputation.
//! - [`control`] -- Shared start/stop session control state.
//! - [`runner`] -- The cooperative render sampling loop.
//! - [`config`] -- YAML configuration loading.
//!
//! [`FrameSink`]: runner::FrameSink

pub mod alpha;
pub mod config;
pub mod control;
pub mod easing;
pub mod logfeed;
pub mod runner;
pub mod sampler;
pub mod schedule;
pub mod store;
pub mod style;

pub use alpha::{alpha_for_lifecycle, arc_alpha, flare_alpha};
pub use config::{AnimationConfig, ConfigError, EngineConfig};
pub use control::SessionControl;
pub use easing::ease;
pub use logfeed::LogFeed;
pub use runner::{FrameSink, NoOpSink, RenderLoopStats, run_render_loop};
pub use sampler::{EventVisual, sample_event, sample_frame};
pub use schedule::{Endpoint, PhaseSchedule, PhaseWindow};
pub use store::EventStore;
pub use style::EventShape;
