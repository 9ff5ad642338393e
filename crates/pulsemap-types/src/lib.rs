//! Shared type definitions for the Pulsemap attack-map engine.
//!
//! This crate is the single source of truth for the types that cross crate
//! boundaries in the Pulsemap workspace. Everything the renderer consumes
//! over the observer API is defined here and flows downstream to
//! `TypeScript` via `ts-rs`.
//!
//! # Modules
//!
//! - [`ids`] -- Type-safe UUID wrappers for entity identifiers
//! - [`geo`] -- Geographic coordinates and the unknown-coordinate sentinel
//! - [`events`] -- Attack events and human-readable log entries
//! - [`visual`] -- Per-frame derived visual state (arcs, markers, frames)

pub mod events;
pub mod geo;
pub mod ids;
pub mod visual;

// Re-export all public types at crate root for convenience.
pub use events::{AttackEvent, LogEntry};
pub use geo::GeoPoint;
pub use ids::{EventId, LogEntryId};
pub use visual::{ArcVisual, FrameSample, MarkerKind, MarkerVisual};

#[cfg(test)]
mod tests {
    //! Integration tests for type exports and `TypeScript` binding generation.

    #[test]
    fn export_bindings() {
        // ts-rs generates TypeScript bindings when types with
        // #[ts(export)] are used. Importing them here triggers generation.
        // The actual files are written to the `bindings/` directory
        // relative to the crate root.
        use ts_rs::TS;

        let _ = crate::ids::EventId::export_all();
        let _ = crate::ids::LogEntryId::export_all();

        let _ = crate::geo::GeoPoint::export_all();

        let _ = crate::events::AttackEvent::export_all();
        let _ = crate::events::LogEntry::export_all();

        let _ = crate::visual::MarkerKind::export_all();
        let _ = crate::visual::ArcVisual::export_all();
        let _ = crate::visual::MarkerVisual::export_all();
        let _ = crate::visual::FrameSample::export_all();
    }
}
