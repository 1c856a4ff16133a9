//! Simulation trace and revenue report
//!
//! The engine records what happened as structured [`TraceLine`] values and
//! per-table [`TableSummary`] rows. Text rendering happens only at the
//! boundary through `Display`.

use crate::core::time::{clock_format, format_clock, format_duration};
use crate::models::event::{Event, EventKind};
use crate::store::{ClientStoreError, TableStoreError};
use chrono::NaiveTime;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Why an event was rejected
///
/// `Display` yields the reason token printed after kind `13`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RejectReason {
    /// Event outside working hours
    NotOpenYet,
    /// Arrival of a client already present
    AlreadyExists,
    /// Event for a client who is not present
    ClientUnknown,
    /// Requested table held by someone else
    PlaceIsBusy,
    /// Requested table beyond the venue's table count
    TablesFull,
    /// Queue join while a table is free
    ClientIsWaiting,
    /// Table record missing during accrual
    TableNotFound,
}

impl fmt::Display for RejectReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let token = match self {
            RejectReason::NotOpenYet => "NotOpenYet",
            RejectReason::AlreadyExists => "YouShallNotPass",
            RejectReason::ClientUnknown => "ClientUnknown",
            RejectReason::PlaceIsBusy => "PlaceIsBusy",
            RejectReason::TablesFull => "TablesFull",
            RejectReason::ClientIsWaiting => "ICanWaitNoLonger!",
            RejectReason::TableNotFound => "TableNotFound",
        };
        f.write_str(token)
    }
}

impl From<&ClientStoreError> for RejectReason {
    fn from(err: &ClientStoreError) -> Self {
        match err {
            ClientStoreError::AlreadyExists { .. } => RejectReason::AlreadyExists,
            ClientStoreError::NotFound { .. } => RejectReason::ClientUnknown,
        }
    }
}

impl From<&TableStoreError> for RejectReason {
    fn from(err: &TableStoreError) -> Self {
        match err {
            TableStoreError::PlaceIsBusy { .. } => RejectReason::PlaceIsBusy,
            TableStoreError::TablesFull { .. } => RejectReason::TablesFull,
            // Accrual errors abort the run and never reach a rejection line.
            TableStoreError::TableNotFound { .. } | TableStoreError::RevenueOverflow { .. } => {
                RejectReason::TableNotFound
            }
        }
    }
}

/// One line of the day's trace
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum TraceLine {
    /// Opening time, always first
    Opened {
        #[serde(with = "clock_format")]
        time: NaiveTime,
    },

    /// Echo of an incoming event
    Incoming { event: Event },

    /// Event rejected, state unchanged by the failing step
    Rejected {
        #[serde(with = "clock_format")]
        time: NaiveTime,
        reason: RejectReason,
    },

    /// Client forced out by queue overflow or closing time
    ///
    /// `table` is carried from the triggering event but not rendered.
    Evicted {
        #[serde(with = "clock_format")]
        time: NaiveTime,
        client: String,
        table: usize,
    },

    /// Queued client seated at a table freed by a departure
    AutoSeated {
        #[serde(with = "clock_format")]
        time: NaiveTime,
        client: String,
        table: usize,
    },

    /// Closing time, after the closing sweep
    Closed {
        #[serde(with = "clock_format")]
        time: NaiveTime,
    },
}

impl TraceLine {
    /// Kind of the line, None for the opening/closing markers
    pub fn kind(&self) -> Option<EventKind> {
        match self {
            TraceLine::Opened { .. } | TraceLine::Closed { .. } => None,
            TraceLine::Incoming { event } => event.kind(),
            TraceLine::Rejected { .. } => Some(EventKind::Rejected),
            TraceLine::Evicted { .. } => Some(EventKind::Evicted),
            TraceLine::AutoSeated { .. } => Some(EventKind::AutoSeated),
        }
    }

    pub fn time(&self) -> NaiveTime {
        match self {
            TraceLine::Incoming { event } => event.time(),
            TraceLine::Opened { time }
            | TraceLine::Closed { time }
            | TraceLine::Rejected { time, .. }
            | TraceLine::Evicted { time, .. }
            | TraceLine::AutoSeated { time, .. } => *time,
        }
    }
}

impl fmt::Display for TraceLine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TraceLine::Opened { time } | TraceLine::Closed { time } => {
                f.write_str(&format_clock(*time))
            }
            TraceLine::Incoming { event } => fmt::Display::fmt(event, f),
            TraceLine::Rejected { time, reason } => write!(
                f,
                "{} {} {}",
                format_clock(*time),
                EventKind::Rejected.code(),
                reason
            ),
            TraceLine::Evicted { time, client, .. } => write!(
                f,
                "{} {} {}",
                format_clock(*time),
                EventKind::Evicted.code(),
                client
            ),
            TraceLine::AutoSeated { time, client, table } => write!(
                f,
                "{} {} {} {}",
                format_clock(*time),
                EventKind::AutoSeated.code(),
                client,
                table
            ),
        }
    }
}

/// End-of-day usage of one table
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TableSummary {
    pub table: usize,
    pub revenue: i64,
    pub occupied_minutes: i64,
}

impl TableSummary {
    /// Row for a table nobody ever sat at
    pub fn unused(table: usize) -> Self {
        Self {
            table,
            revenue: 0,
            occupied_minutes: 0,
        }
    }
}

impl fmt::Display for TableSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {} {}",
            self.table,
            self.revenue,
            format_duration(self.occupied_minutes)
        )
    }
}

/// Everything a finished run produces
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SimulationOutput {
    pub trace: Vec<TraceLine>,
    pub report: Vec<TableSummary>,
}

impl SimulationOutput {
    /// Render the trace followed by the report, one record per line,
    /// without a trailing newline
    pub fn render(&self) -> String {
        self.trace
            .iter()
            .map(ToString::to_string)
            .chain(self.report.iter().map(ToString::to_string))
            .collect::<Vec<_>>()
            .join("\n")
    }

    /// Structured trace and report as pretty-printed JSON
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }

    /// Trace lines describing events, excluding opening/closing markers
    pub fn event_lines(&self) -> impl Iterator<Item = &TraceLine> {
        self.trace
            .iter()
            .filter(|line| !matches!(line, TraceLine::Opened { .. } | TraceLine::Closed { .. }))
    }

    /// Sum of every table's revenue, saturating at `i64::MAX`
    pub fn total_revenue(&self) -> i64 {
        self.report
            .iter()
            .fold(0, |total, row| total.saturating_add(row.revenue))
    }
}
