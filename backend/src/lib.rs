//! Club Simulator Core - Rust Engine
//!
//! Replays one day of a pay-per-hour venue with numbered tables: clients
//! arrive, take tables, wait in a queue and leave; the engine produces an
//! annotated trace and a per-table revenue report.
//!
//! # Architecture
//!
//! - **core**: Time-of-day handling and working hours
//! - **models**: Domain types (Client, Table, Event, trace lines)
//! - **store**: Client and table registries behind swappable traits
//! - **billing**: Per-started-hour charge calculation
//! - **orchestrator**: Event dispatch, closing sweep, revenue report
//! - **input**: Day log reader
//!
//! # Critical Invariants
//!
//! 1. All money values are i64 whole currency units
//! 2. Events are processed strictly in time order, one at a time
//! 3. A table has at most one occupant at any simulated instant

// Module declarations
pub mod billing;
pub mod core;
pub mod input;
pub mod models;
pub mod orchestrator;
pub mod store;

// Re-exports for convenience
pub use crate::core::time::WorkingHours;
pub use input::{parse, InputError, ParsedInput};
pub use models::{
    client::{Client, ClientStatus},
    event::{Event, EventKind},
    table::Table,
    trace::{RejectReason, SimulationOutput, TableSummary, TraceLine},
};
pub use orchestrator::{Engine, SimulationError, VenueConfig};
pub use store::{
    ClientStore, ClientStoreError, MemoryClientStore, MemoryTableStore, TableStore, TableStoreError,
};
