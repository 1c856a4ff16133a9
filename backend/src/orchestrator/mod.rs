//! Orchestrator - day simulation loop
//!
//! Replays the event log against the client and table stores.
//!
//! See `engine.rs` for full implementation.

pub mod engine;

#[cfg(test)]
mod tests;

// Re-export main types for convenience
pub use engine::{Engine, SimulationError, VenueConfig};
