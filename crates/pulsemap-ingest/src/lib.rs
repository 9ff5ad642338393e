//! Event producers for the Pulsemap engine.
//!
//! Two independent, uncoordinated producers feed the event store: a
//! synthetic generator that invents plausible arcs from the country
//! atlas on a fixed interval, and a polling feed client that fetches
//! `(event, arc, summary)` records from an external collaborator. Both
//! run as cancellable async loops and degrade to "no events this tick"
//! on any failure -- ingestion problems never reach the render path.
//!
//! # Modules
//!
//! - [`wire`] -- Serde model of the feed payload and its conversion
//!   into engine events.
//! - [`poller`] -- Reqwest feed client and the polling loop.
//! - [`synthetic`] -- Seeded random event generator and its loop.
//! - [`error`] -- Ingestion error type.

pub mod error;
pub mod poller;
pub mod synthetic;
pub mod wire;

pub use error::IngestError;
pub use poller::{FeedClient, run_feed_loop};
pub use synthetic::{SyntheticGenerator, run_synthetic_loop};
pub use wire::{FeedArc, FeedEvent, FeedRecord, FeedResponse, IngestedRecord, convert_record};
