//! Asynchronous message passing between contexts
//!
//! The background coordinator, page context, popup, and sidebar run as
//! independent single-threaded event-driven contexts with no shared memory;
//! everything they exchange travels through this fabric as either a
//! fire-and-forget send or a request/response round-trip.

pub mod fabric;
pub mod message;

pub use fabric::{ContextId, Fabric, FabricError};
pub use message::{AnalysisData, Envelope, Message, Reply};
