//! Domain models for the club simulator

pub mod client;
pub mod event;
pub mod table;
pub mod trace;

// Re-exports
pub use client::{Client, ClientStatus};
pub use event::{Event, EventKind};
pub use table::Table;
pub use trace::{RejectReason, SimulationOutput, TableSummary, TraceLine};
