//! Client events
//!
//! Incoming events come from the day's log, one per line. Outgoing kinds are
//! synthesized by the engine and only ever appear in the trace.
//!
//! # Event Kinds
//!
//! - **Incoming**: `1` arrived, `2` seat request, `3` queue join, `4` departed
//! - **Outgoing**: `11` evicted, `12` auto-seated from queue, `13` rejected
//!
//! # Example
//!
//! ```rust
//! use chrono::NaiveTime;
//! use club_simulator_core::models::{Event, EventKind};
//!
//! let event = Event::seat_request(NaiveTime::from_hms_opt(9, 5, 0).unwrap(), "alice", 1);
//! assert_eq!(event.kind(), Some(EventKind::SeatRequest));
//! assert_eq!(event.to_string(), "09:05 2 alice 1");
//! ```

use crate::core::time::{clock_format, format_clock};
use chrono::NaiveTime;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Event kinds, incoming and synthesized
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EventKind {
    Arrived,
    SeatRequest,
    QueueJoin,
    Departed,
    Evicted,
    AutoSeated,
    Rejected,
}

impl EventKind {
    /// Numeric code used on the wire
    pub fn code(&self) -> u32 {
        match self {
            EventKind::Arrived => 1,
            EventKind::SeatRequest => 2,
            EventKind::QueueJoin => 3,
            EventKind::Departed => 4,
            EventKind::Evicted => 11,
            EventKind::AutoSeated => 12,
            EventKind::Rejected => 13,
        }
    }

    /// Map a wire code back to a kind
    pub fn from_code(code: u32) -> Option<Self> {
        match code {
            1 => Some(EventKind::Arrived),
            2 => Some(EventKind::SeatRequest),
            3 => Some(EventKind::QueueJoin),
            4 => Some(EventKind::Departed),
            11 => Some(EventKind::Evicted),
            12 => Some(EventKind::AutoSeated),
            13 => Some(EventKind::Rejected),
            _ => None,
        }
    }

    /// Whether this kind may appear in the input log
    pub fn is_incoming(&self) -> bool {
        self.code() <= 4
    }
}

/// One line of the day's event log
///
/// The kind is kept as its raw code: codes the engine does not recognize are
/// carried through untouched and skipped at dispatch.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Event {
    #[serde(with = "clock_format")]
    time: NaiveTime,
    code: u32,
    client: String,
    /// Requested table; 0 when the event carries none
    table: usize,
}

impl Event {
    /// Create an event from raw fields
    pub fn new(time: NaiveTime, code: u32, client: impl Into<String>, table: usize) -> Self {
        Self {
            time,
            code,
            client: client.into(),
            table,
        }
    }

    pub fn arrived(time: NaiveTime, client: impl Into<String>) -> Self {
        Self::new(time, EventKind::Arrived.code(), client, 0)
    }

    pub fn seat_request(time: NaiveTime, client: impl Into<String>, table: usize) -> Self {
        Self::new(time, EventKind::SeatRequest.code(), client, table)
    }

    pub fn queue_join(time: NaiveTime, client: impl Into<String>) -> Self {
        Self::new(time, EventKind::QueueJoin.code(), client, 0)
    }

    pub fn departed(time: NaiveTime, client: impl Into<String>) -> Self {
        Self::new(time, EventKind::Departed.code(), client, 0)
    }

    pub fn time(&self) -> NaiveTime {
        self.time
    }

    pub fn code(&self) -> u32 {
        self.code
    }

    /// Recognized incoming kind, None for anything else
    pub fn kind(&self) -> Option<EventKind> {
        EventKind::from_code(self.code).filter(EventKind::is_incoming)
    }

    pub fn client(&self) -> &str {
        &self.client
    }

    pub fn table(&self) -> usize {
        self.table
    }
}

impl fmt::Display for Event {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {} {}", format_clock(self.time), self.code, self.client)?;
        if self.table != 0 {
            write!(f, " {}", self.table)?;
        }
        Ok(())
    }
}

/// Stable sort by timestamp; events at the same minute keep log order
pub fn sort_chronologically(events: &mut [Event]) {
    events.sort_by_key(Event::time);
}
