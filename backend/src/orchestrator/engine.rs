//! Simulation Engine
//!
//! Replays one day of client events against the venue:
//! - Working-hours check (events outside hours are echoed and rejected)
//! - Per-kind dispatch (arrival, seat request, queue join, departure)
//! - Billing of every finished occupation
//! - Closing sweep (evict everyone still inside at closing time)
//! - Revenue report (one row per table id)
//!
//! # Architecture
//!
//! ```text
//! opening line
//! For each event (sorted by time):
//! 1. Outside working hours → echo + NotOpenYet, next event
//! 2. Echo the event
//! 3. Apply the kind's rules against both stores
//! 4. Append rejection / eviction / auto-seat lines
//! closing sweep (names ascending)
//! closing line
//! report rows 1..=table_count
//! ```
//!
//! Per-event failures (unknown client, busy table, ...) become `Rejected`
//! lines and the run continues. A failed accrual (a lost table record or a
//! revenue total past `i64::MAX`) aborts the run with
//! [`SimulationError::Accrual`].
//!
//! # Example
//!
//! ```rust
//! use chrono::NaiveTime;
//! use club_simulator_core::core::time::WorkingHours;
//! use club_simulator_core::models::Event;
//! use club_simulator_core::orchestrator::{Engine, VenueConfig};
//!
//! let at = |h, m| NaiveTime::from_hms_opt(h, m, 0).unwrap();
//! let config = VenueConfig {
//!     hours: WorkingHours::new(at(9, 0), at(19, 0)),
//!     hourly_price: 10,
//!     table_count: 3,
//! };
//!
//! let mut engine = Engine::with_memory_stores(config).unwrap();
//! let output = engine
//!     .run(&[
//!         Event::arrived(at(9, 0), "alice"),
//!         Event::seat_request(at(9, 5), "alice", 1),
//!         Event::departed(at(19, 0), "alice"),
//!     ])
//!     .unwrap();
//!
//! assert_eq!(output.report[0].to_string(), "1 100 09:55");
//! ```

use crate::core::time::WorkingHours;
use crate::models::{
    ClientStatus, Event, EventKind, RejectReason, SimulationOutput, TableSummary, TraceLine,
};
use crate::store::{
    ClientStore, ClientStoreError, MemoryClientStore, MemoryTableStore, TableStore, TableStoreError,
};
use chrono::NaiveTime;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, info, warn};

// ============================================================================
// Configuration Types
// ============================================================================

/// Venue configuration, fixed for the whole day
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct VenueConfig {
    /// Opening and closing time
    pub hours: WorkingHours,

    /// Price of one started hour at a table
    pub hourly_price: i64,

    /// Number of tables, numbered 1..=table_count
    pub table_count: usize,
}

impl VenueConfig {
    /// Reject configurations no venue could run with
    pub fn validate(&self) -> Result<(), SimulationError> {
        if self.hourly_price <= 0 {
            return Err(SimulationError::InvalidConfig(format!(
                "hourly_price must be positive, got {}",
                self.hourly_price
            )));
        }
        if self.table_count == 0 {
            return Err(SimulationError::InvalidConfig(
                "table_count must be positive".to_string(),
            ));
        }
        Ok(())
    }
}

/// Errors that abort a simulation run
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum SimulationError {
    #[error("Invalid config: {0}")]
    InvalidConfig(String),

    /// The table store could not bill an occupation the engine had just ended
    #[error("Accrual failed: {0}")]
    Accrual(#[source] TableStoreError),

    /// The client store lost a client during the closing sweep
    #[error("Client registry error: {0}")]
    Registry(#[from] ClientStoreError),
}

// ============================================================================
// Engine
// ============================================================================

/// Event-driven simulation of one day at the venue
///
/// The engine owns both stores for the lifetime of a run.
pub struct Engine<C = MemoryClientStore, T = MemoryTableStore> {
    config: VenueConfig,
    clients: C,
    tables: T,
}

impl Engine<MemoryClientStore, MemoryTableStore> {
    /// Engine backed by fresh in-memory stores
    pub fn with_memory_stores(config: VenueConfig) -> Result<Self, SimulationError> {
        Self::new(
            config,
            MemoryClientStore::new(),
            MemoryTableStore::new(config.table_count),
        )
    }
}

impl<C: ClientStore, T: TableStore> Engine<C, T> {
    /// Create an engine over the given stores
    ///
    /// # Errors
    ///
    /// `InvalidConfig` if the configuration fails validation or the table
    /// store's capacity disagrees with `table_count`.
    pub fn new(config: VenueConfig, clients: C, tables: T) -> Result<Self, SimulationError> {
        config.validate()?;
        if tables.capacity() != config.table_count {
            return Err(SimulationError::InvalidConfig(format!(
                "table store holds {} tables, config expects {}",
                tables.capacity(),
                config.table_count
            )));
        }
        Ok(Self {
            config,
            clients,
            tables,
        })
    }

    pub fn config(&self) -> &VenueConfig {
        &self.config
    }

    pub fn clients(&self) -> &C {
        &self.clients
    }

    pub fn tables(&self) -> &T {
        &self.tables
    }

    /// Replay `events` (already in time order), close the day and build the
    /// revenue report
    pub fn run(&mut self, events: &[Event]) -> Result<SimulationOutput, SimulationError> {
        info!(
            events = events.len(),
            tables = self.config.table_count,
            "simulation started"
        );

        let mut trace = Vec::with_capacity(events.len() * 2 + 2);
        trace.push(TraceLine::Opened {
            time: self.config.hours.open(),
        });

        for event in events {
            self.process_event(event, &mut trace)?;
        }

        self.handle_closing(&mut trace)?;
        trace.push(TraceLine::Closed {
            time: self.config.hours.close(),
        });

        let report = self.revenue_report();
        let output = SimulationOutput { trace, report };
        info!(
            lines = output.trace.len(),
            revenue = output.total_revenue(),
            "simulation finished"
        );
        Ok(output)
    }

    /// Apply a single event, appending its trace lines to `out`
    pub fn process_event(
        &self,
        event: &Event,
        out: &mut Vec<TraceLine>,
    ) -> Result<(), SimulationError> {
        if !self.config.hours.contains(event.time()) {
            debug!(time = %event.time(), client = event.client(), "event outside working hours");
            out.push(TraceLine::Incoming {
                event: event.clone(),
            });
            out.push(reject(event.time(), RejectReason::NotOpenYet));
            return Ok(());
        }

        let Some(kind) = event.kind() else {
            debug!(code = event.code(), "ignoring unrecognized event kind");
            return Ok(());
        };

        debug!(time = %event.time(), ?kind, client = event.client(), "dispatching event");
        match kind {
            EventKind::Arrived => self.handle_arrival(event, out),
            EventKind::SeatRequest => self.handle_seat_request(event, out)?,
            EventKind::QueueJoin => self.handle_queue_join(event, out),
            EventKind::Departed => self.handle_departure(event, out)?,
            EventKind::Evicted | EventKind::AutoSeated | EventKind::Rejected => {}
        }
        Ok(())
    }

    fn handle_arrival(&self, event: &Event, out: &mut Vec<TraceLine>) {
        echo(event, out);

        if let Err(err) = self.clients.add(event.client()) {
            out.push(reject(event.time(), RejectReason::from(&err)));
        }
    }

    fn handle_seat_request(
        &self,
        event: &Event,
        out: &mut Vec<TraceLine>,
    ) -> Result<(), SimulationError> {
        echo(event, out);

        let client = match self.clients.get(event.client()) {
            Ok(client) => client,
            Err(err) => {
                out.push(reject(event.time(), RejectReason::from(&err)));
                return Ok(());
            }
        };
        let name = client.username();

        if let Err(err) = self.clients.set_status(name, ClientStatus::Seated) {
            out.push(reject(event.time(), RejectReason::from(&err)));
        }

        // Changing tables ends the current occupation first.
        if let Some(current) = self.tables.table_of(name) {
            self.tables.release(name);
            self.accrue(current, event.time())?;
        }

        if let Err(err) = self.tables.assign(name, event.table(), event.time()) {
            out.push(reject(event.time(), RejectReason::from(&err)));
        }
        Ok(())
    }

    fn handle_queue_join(&self, event: &Event, out: &mut Vec<TraceLine>) {
        echo(event, out);

        let client = match self.clients.get(event.client()) {
            Ok(client) => client,
            Err(err) => {
                out.push(reject(event.time(), RejectReason::from(&err)));
                return;
            }
        };
        let name = client.username();

        if let Err(err) = self.clients.set_status(name, ClientStatus::Queued) {
            out.push(reject(event.time(), RejectReason::from(&err)));
        }

        if self.tables.empty_table_count() != 0 {
            out.push(reject(event.time(), RejectReason::ClientIsWaiting));
        }

        if self.clients.queued_clients().len() > self.config.table_count {
            if let Err(err) = self.clients.remove(name) {
                out.push(reject(event.time(), RejectReason::from(&err)));
            }
            debug!(client = name, "queue overflow, client evicted");
            out.push(TraceLine::Evicted {
                time: event.time(),
                client: name.to_string(),
                table: event.table(),
            });
        }
    }

    fn handle_departure(
        &self,
        event: &Event,
        out: &mut Vec<TraceLine>,
    ) -> Result<(), SimulationError> {
        echo(event, out);

        let client = match self.clients.get(event.client()) {
            Ok(client) => client,
            Err(err) => {
                out.push(reject(event.time(), RejectReason::from(&err)));
                return Ok(());
            }
        };
        let name = client.username();

        let freed = self.tables.release(name);

        if let Err(err) = self.clients.remove(name) {
            out.push(reject(event.time(), RejectReason::from(&err)));
        }

        let Some(table) = freed else {
            return Ok(());
        };
        self.accrue(table, event.time())?;

        if let Some(next) = self.clients.queued_clients().into_iter().next() {
            self.seat_from_queue(next.username(), table, event.time(), out);
        }
        Ok(())
    }

    /// Move the head of the queue onto a table freed at `time`
    fn seat_from_queue(&self, name: &str, table: usize, time: NaiveTime, out: &mut Vec<TraceLine>) {
        if let Err(err) = self.tables.assign(name, table, time) {
            out.push(reject(time, RejectReason::from(&err)));
        }
        if let Err(err) = self.clients.set_status(name, ClientStatus::Seated) {
            out.push(reject(time, RejectReason::from(&err)));
        }
        debug!(client = name, table, "seated from queue");
        out.push(TraceLine::AutoSeated {
            time,
            client: name.to_string(),
            table,
        });
    }

    /// Evict every remaining client at closing time, names ascending,
    /// billing any table they still hold
    fn handle_closing(&self, out: &mut Vec<TraceLine>) -> Result<(), SimulationError> {
        let close = self.config.hours.close();

        for name in self.clients.all_names() {
            out.push(TraceLine::Evicted {
                time: close,
                client: name.clone(),
                table: 0,
            });

            if let Some(table) = self.tables.table_of(&name) {
                self.accrue(table, close)?;
                self.tables.release(&name);
            }

            self.clients.remove(&name)?;
        }

        debug!(remaining = self.clients.len(), "closing sweep done");
        Ok(())
    }

    fn accrue(&self, table: usize, at: NaiveTime) -> Result<(), SimulationError> {
        match self.tables.accrue(table, self.config.hourly_price, at) {
            Ok(amount) => {
                debug!(table, amount, "occupation billed");
                Ok(())
            }
            Err(err) => {
                warn!(table, error = %err, "accrual failed, aborting run");
                Err(SimulationError::Accrual(err))
            }
        }
    }

    /// One row per table id, zero rows for tables nobody ever used
    pub fn revenue_report(&self) -> Vec<TableSummary> {
        let tables = self.tables.snapshot();
        (1..=self.config.table_count)
            .map(|id| match tables.get(&id) {
                Some(table) => TableSummary {
                    table: id,
                    revenue: table.revenue(),
                    occupied_minutes: table.occupied_minutes(),
                },
                None => TableSummary::unused(id),
            })
            .collect()
    }
}

fn echo(event: &Event, out: &mut Vec<TraceLine>) {
    out.push(TraceLine::Incoming {
        event: event.clone(),
    });
}

fn reject(time: NaiveTime, reason: RejectReason) -> TraceLine {
    TraceLine::Rejected { time, reason }
}
