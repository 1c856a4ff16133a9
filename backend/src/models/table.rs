//! Table model
//!
//! A table record is created the first time a client is seated at it and is
//! never removed. Freeing a table clears the occupant but keeps the
//! accumulated occupancy time and revenue for the end-of-day report.

use crate::core::time::{clock_format, format_duration};
use chrono::NaiveTime;
use serde::{Deserialize, Serialize};

/// A numbered table and its accumulated usage
///
/// # Example
/// ```
/// use chrono::NaiveTime;
/// use club_simulator_core::models::Table;
///
/// let table = Table::new(1, NaiveTime::from_hms_opt(9, 0, 0).unwrap());
/// assert!(table.is_free());
/// assert_eq!(table.revenue(), 0);
/// assert_eq!(table.occupied_formatted(), "00:00");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Table {
    /// Table number (1-based)
    id: usize,

    /// Username of the current occupant, None when free
    occupant: Option<String>,

    /// Start of the current (or most recent) occupation
    #[serde(with = "clock_format")]
    started_at: NaiveTime,

    /// Total occupied time over the day, in minutes
    occupied_minutes: i64,

    /// Total revenue over the day
    revenue: i64,
}

impl Table {
    /// Create a free table whose start time is `created_at`
    pub fn new(id: usize, created_at: NaiveTime) -> Self {
        Self {
            id,
            occupant: None,
            started_at: created_at,
            occupied_minutes: 0,
            revenue: 0,
        }
    }

    pub fn id(&self) -> usize {
        self.id
    }

    pub fn occupant(&self) -> Option<&str> {
        self.occupant.as_deref()
    }

    pub fn is_free(&self) -> bool {
        self.occupant.is_none()
    }

    pub fn is_held_by(&self, username: &str) -> bool {
        self.occupant.as_deref() == Some(username)
    }

    pub fn started_at(&self) -> NaiveTime {
        self.started_at
    }

    pub fn occupied_minutes(&self) -> i64 {
        self.occupied_minutes
    }

    pub fn revenue(&self) -> i64 {
        self.revenue
    }

    /// Accumulated occupancy as `HH:MM` (hours may exceed 24)
    pub fn occupied_formatted(&self) -> String {
        format_duration(self.occupied_minutes)
    }

    /// Seat `username` starting at `at`
    pub fn occupy(&mut self, username: &str, at: NaiveTime) {
        self.occupant = Some(username.to_string());
        self.started_at = at;
    }

    /// Clear the occupant; start time and totals are kept
    pub fn vacate(&mut self) {
        self.occupant = None;
    }

    /// Add one finished occupation to the running totals
    ///
    /// Returns None and leaves the totals untouched if either would overflow.
    pub fn record_usage(&mut self, minutes: i64, charge: i64) -> Option<()> {
        let occupied_minutes = self.occupied_minutes.checked_add(minutes)?;
        let revenue = self.revenue.checked_add(charge)?;
        self.occupied_minutes = occupied_minutes;
        self.revenue = revenue;
        Some(())
    }
}
