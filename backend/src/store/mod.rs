//! Client and table stores
//!
//! The engine talks to its two registries through the [`ClientStore`] and
//! [`TableStore`] traits so alternative backings can be swapped in without
//! touching the dispatch logic. The in-memory implementations guard their
//! state with a lock and can be shared with a multi-threaded host; the
//! engine itself drives them strictly sequentially.
//!
//! # Critical Invariants
//!
//! 1. **Unique clients**: a username is present at most once
//! 2. **Exclusive tables**: a table has at most one occupant at a time
//! 3. **Persistent tables**: table records are never removed once created

pub mod client_store;
pub mod table_store;

pub use client_store::MemoryClientStore;
pub use table_store::MemoryTableStore;

use crate::models::{Client, ClientStatus, Table};
use chrono::NaiveTime;
use std::collections::BTreeMap;
use thiserror::Error;

/// Errors raised by a [`ClientStore`]
///
/// The messages are the reason tokens printed in rejection lines.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ClientStoreError {
    #[error("YouShallNotPass")]
    AlreadyExists { username: String },

    #[error("ClientUnknown")]
    NotFound { username: String },
}

/// Errors raised by a [`TableStore`]
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum TableStoreError {
    #[error("PlaceIsBusy")]
    PlaceIsBusy { table: usize },

    #[error("TablesFull")]
    TablesFull { table: usize, capacity: usize },

    #[error("TableNotFound")]
    TableNotFound { table: usize },

    #[error("revenue of table {table} overflowed")]
    RevenueOverflow { table: usize },
}

/// Registry of clients currently in the venue
pub trait ClientStore: Send + Sync {
    /// Register a newly arrived client
    fn add(&self, username: &str) -> Result<(), ClientStoreError>;

    /// Look up a client by name
    fn get(&self, username: &str) -> Result<Client, ClientStoreError>;

    /// Remove a client from the venue
    fn remove(&self, username: &str) -> Result<(), ClientStoreError>;

    /// Replace a client's status
    fn set_status(&self, username: &str, status: ClientStatus) -> Result<(), ClientStoreError>;

    /// Queued clients ordered by username ascending
    fn queued_clients(&self) -> Vec<Client>;

    /// Names of every client present, ascending
    fn all_names(&self) -> Vec<String>;

    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Registry of tables, their occupants and accumulated usage
pub trait TableStore: Send + Sync {
    /// Fail with `TablesFull` when `table` is not in `1..=capacity`
    fn is_within_capacity(&self, table: usize) -> Result<(), TableStoreError>;

    /// Seat `username` at `table` from `at`, creating the record on first use
    ///
    /// Fails with `TablesFull` for an out-of-range table and `PlaceIsBusy`
    /// when another client holds it.
    fn assign(&self, username: &str, table: usize, at: NaiveTime) -> Result<(), TableStoreError>;

    /// Free the first table (lowest id) held by `username`
    ///
    /// Returns the freed table id, or None if the client held no table.
    fn release(&self, username: &str) -> Option<usize>;

    /// Table currently held by `username`, lowest id first
    fn table_of(&self, username: &str) -> Option<usize>;

    /// Bill the occupation of `table` that started at its recorded start time
    /// and ends at `at`; returns the amount charged
    ///
    /// Fails with `RevenueOverflow`, leaving the record untouched, when the
    /// charge or the table's running totals would not fit in an i64.
    fn accrue(
        &self,
        table: usize,
        hourly_price: i64,
        at: NaiveTime,
    ) -> Result<i64, TableStoreError>;

    /// Number of free tables
    ///
    /// Until every table id has been created at least once this reports the
    /// full table count rather than the true free count.
    fn empty_table_count(&self) -> usize;

    /// Copy of every table record, keyed by id
    fn snapshot(&self) -> BTreeMap<usize, Table>;

    /// Number of tables the venue has
    fn capacity(&self) -> usize;
}
