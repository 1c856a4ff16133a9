//! In-memory client store

use super::{ClientStore, ClientStoreError};
use crate::models::{Client, ClientStatus};
use std::collections::BTreeMap;
use std::sync::{PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

/// Client registry backed by an ordered map
///
/// Keys are kept sorted so queue order and closing order fall out of
/// iteration order.
///
/// # Example
/// ```
/// use club_simulator_core::models::ClientStatus;
/// use club_simulator_core::store::{ClientStore, MemoryClientStore};
///
/// let store = MemoryClientStore::new();
/// store.add("bob").unwrap();
/// store.add("alice").unwrap();
/// store.set_status("bob", ClientStatus::Queued).unwrap();
///
/// assert_eq!(store.all_names(), vec!["alice", "bob"]);
/// assert_eq!(store.queued_clients().len(), 1);
/// ```
#[derive(Debug, Default)]
pub struct MemoryClientStore {
    clients: RwLock<BTreeMap<String, Client>>,
}

impl MemoryClientStore {
    pub fn new() -> Self {
        Self::default()
    }

    // Poisoning is ignored: every write leaves the map consistent.
    fn read(&self) -> RwLockReadGuard<'_, BTreeMap<String, Client>> {
        self.clients.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write(&self) -> RwLockWriteGuard<'_, BTreeMap<String, Client>> {
        self.clients.write().unwrap_or_else(PoisonError::into_inner)
    }
}

fn not_found(username: &str) -> ClientStoreError {
    ClientStoreError::NotFound {
        username: username.to_string(),
    }
}

impl ClientStore for MemoryClientStore {
    fn add(&self, username: &str) -> Result<(), ClientStoreError> {
        let mut clients = self.write();
        if clients.contains_key(username) {
            return Err(ClientStoreError::AlreadyExists {
                username: username.to_string(),
            });
        }
        clients.insert(username.to_string(), Client::new(username.to_string()));
        Ok(())
    }

    fn get(&self, username: &str) -> Result<Client, ClientStoreError> {
        self.read()
            .get(username)
            .cloned()
            .ok_or_else(|| not_found(username))
    }

    fn remove(&self, username: &str) -> Result<(), ClientStoreError> {
        self.write()
            .remove(username)
            .map(|_| ())
            .ok_or_else(|| not_found(username))
    }

    fn set_status(&self, username: &str, status: ClientStatus) -> Result<(), ClientStoreError> {
        let mut clients = self.write();
        let client = clients.get_mut(username).ok_or_else(|| not_found(username))?;
        client.set_status(status);
        Ok(())
    }

    fn queued_clients(&self) -> Vec<Client> {
        self.read()
            .values()
            .filter(|client| client.is_queued())
            .cloned()
            .collect()
    }

    fn all_names(&self) -> Vec<String> {
        self.read().keys().cloned().collect()
    }

    fn len(&self) -> usize {
        self.read().len()
    }
}
