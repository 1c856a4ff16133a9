//! In-memory table store

use super::{TableStore, TableStoreError};
use crate::billing;
use crate::core::time::elapsed;
use crate::models::Table;
use chrono::NaiveTime;
use std::collections::BTreeMap;
use std::sync::{PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

/// Table registry for a venue with a fixed number of tables
///
/// Records are created lazily on first assignment and kept ordered by id,
/// so "first table held by a client" means the lowest id.
///
/// # Example
/// ```
/// use chrono::NaiveTime;
/// use club_simulator_core::store::{MemoryTableStore, TableStore};
///
/// let store = MemoryTableStore::new(2);
/// let nine = NaiveTime::from_hms_opt(9, 0, 0).unwrap();
/// let ten = NaiveTime::from_hms_opt(10, 30, 0).unwrap();
///
/// store.assign("alice", 1, nine).unwrap();
/// assert_eq!(store.release("alice"), Some(1));
/// assert_eq!(store.accrue(1, 10, ten).unwrap(), 20);
/// ```
#[derive(Debug)]
pub struct MemoryTableStore {
    tables: RwLock<BTreeMap<usize, Table>>,
    capacity: usize,
}

impl MemoryTableStore {
    /// Create a store for a venue with `capacity` tables
    pub fn new(capacity: usize) -> Self {
        Self {
            tables: RwLock::new(BTreeMap::new()),
            capacity,
        }
    }

    // Poisoning is ignored: every write leaves the map consistent.
    fn read(&self) -> RwLockReadGuard<'_, BTreeMap<usize, Table>> {
        self.tables.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write(&self) -> RwLockWriteGuard<'_, BTreeMap<usize, Table>> {
        self.tables.write().unwrap_or_else(PoisonError::into_inner)
    }
}

impl TableStore for MemoryTableStore {
    fn is_within_capacity(&self, table: usize) -> Result<(), TableStoreError> {
        if table == 0 || table > self.capacity {
            return Err(TableStoreError::TablesFull {
                table,
                capacity: self.capacity,
            });
        }
        Ok(())
    }

    fn assign(&self, username: &str, table: usize, at: NaiveTime) -> Result<(), TableStoreError> {
        self.is_within_capacity(table)?;

        let mut tables = self.write();
        let record = tables.entry(table).or_insert_with(|| Table::new(table, at));
        if !record.is_free() {
            return Err(TableStoreError::PlaceIsBusy { table });
        }
        record.occupy(username, at);
        Ok(())
    }

    fn release(&self, username: &str) -> Option<usize> {
        let mut tables = self.write();
        let record = tables.values_mut().find(|t| t.is_held_by(username))?;
        record.vacate();
        Some(record.id())
    }

    fn table_of(&self, username: &str) -> Option<usize> {
        self.read()
            .values()
            .find(|t| t.is_held_by(username))
            .map(Table::id)
    }

    fn accrue(
        &self,
        table: usize,
        hourly_price: i64,
        at: NaiveTime,
    ) -> Result<i64, TableStoreError> {
        let mut tables = self.write();
        let record = tables
            .get_mut(&table)
            .ok_or(TableStoreError::TableNotFound { table })?;

        let occupied = elapsed(record.started_at(), at);
        let amount = billing::charge(occupied, hourly_price)
            .ok_or(TableStoreError::RevenueOverflow { table })?;
        record
            .record_usage(occupied.num_minutes(), amount)
            .ok_or(TableStoreError::RevenueOverflow { table })?;
        Ok(amount)
    }

    fn empty_table_count(&self) -> usize {
        let tables = self.read();
        if tables.len() != self.capacity {
            return self.capacity;
        }
        tables.values().filter(|t| t.is_free()).count()
    }

    fn snapshot(&self) -> BTreeMap<usize, Table> {
        self.read().clone()
    }

    fn capacity(&self) -> usize {
        self.capacity
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn at(h: u32, m: u32) -> NaiveTime {
        NaiveTime::from_hms_opt(h, m, 0).unwrap()
    }

    #[test]
    fn test_capacity_is_checked_before_creation() {
        let store = MemoryTableStore::new(1);
        let err = store.assign("alice", 2, at(9, 0)).unwrap_err();
        assert_eq!(err.to_string(), "TablesFull");
        assert!(store.snapshot().is_empty());
    }

    #[test]
    fn test_table_zero_is_out_of_range() {
        let store = MemoryTableStore::new(2);
        assert_eq!(
            store.assign("alice", 0, at(9, 0)),
            Err(TableStoreError::TablesFull {
                table: 0,
                capacity: 2
            })
        );
        assert!(store.snapshot().is_empty());
    }

    #[test]
    fn test_release_without_table() {
        let store = MemoryTableStore::new(3);
        assert_eq!(store.release("nobody"), None);
    }

    #[test]
    fn test_accrue_unknown_table() {
        let store = MemoryTableStore::new(3);
        assert_eq!(
            store.accrue(2, 10, at(12, 0)),
            Err(TableStoreError::TableNotFound { table: 2 })
        );
    }
}
