//! Observer API server for the Pulsemap engine.
//!
//! This crate provides the Axum server through which the renderer (a
//! browser map application) consumes the engine's output:
//!
//! - **`WebSocket` endpoint** (`/ws/frames`) streaming one
//!   [`FrameBroadcast`] per render frame via [`tokio::sync::broadcast`]
//! - **REST endpoints** for the scrolling log feed (`/api/logs`) and
//!   engine status (`/api/status`)
//! - **Info endpoint** (`GET /`) for liveness checks
//!
//! # Architecture
//!
//! The render loop pushes each sampled frame into a broadcast channel
//! through [`BroadcastSink`]; `WebSocket` clients subscribe with
//! automatic lag handling. REST reads take short read locks against the
//! shared store and log feed and never block the render loop for long.
//!
//! [`FrameBroadcast`]: state::FrameBroadcast
//! [`BroadcastSink`]: state::BroadcastSink

pub mod handlers;
pub mod router;
pub mod server;
pub mod startup;
pub mod state;
pub mod ws;

// Re-export primary types for convenience.
pub use router::build_router;
pub use server::{ServerConfig, ServerError, start_server};
pub use startup::spawn_observer;
pub use state::{AppState, BroadcastSink, FrameBroadcast};
