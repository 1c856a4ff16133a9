//! Tests for the in-memory client store

use club_simulator_core::{ClientStatus, ClientStore, ClientStoreError, MemoryClientStore};
use std::sync::Arc;
use std::thread;

#[test]
fn test_add_get_remove() {
    let store = MemoryClientStore::new();
    store.add("alice").unwrap();

    let alice = store.get("alice").unwrap();
    assert_eq!(alice.username(), "alice");
    assert_eq!(alice.status(), ClientStatus::Arrived);

    store.remove("alice").unwrap();
    assert_eq!(
        store.get("alice"),
        Err(ClientStoreError::NotFound {
            username: "alice".to_string()
        })
    );
    assert!(store.is_empty());
}

#[test]
fn test_duplicate_add_fails() {
    let store = MemoryClientStore::new();
    store.add("alice").unwrap();
    assert!(matches!(
        store.add("alice"),
        Err(ClientStoreError::AlreadyExists { .. })
    ));
    assert_eq!(store.len(), 1);
}

#[test]
fn test_queue_is_ordered_by_name() {
    let store = MemoryClientStore::new();
    for name in ["dave", "carol", "bob", "alice"] {
        store.add(name).unwrap();
    }
    store.set_status("dave", ClientStatus::Queued).unwrap();
    store.set_status("bob", ClientStatus::Queued).unwrap();
    store.set_status("carol", ClientStatus::Seated).unwrap();

    let queue: Vec<String> = store
        .queued_clients()
        .iter()
        .map(|c| c.username().to_string())
        .collect();
    assert_eq!(queue, vec!["bob", "dave"]);
    assert_eq!(store.all_names(), vec!["alice", "bob", "carol", "dave"]);
}

#[test]
fn test_store_is_shareable_across_threads() {
    let store = Arc::new(MemoryClientStore::new());
    let handles: Vec<_> = (0..8)
        .map(|i| {
            let store = Arc::clone(&store);
            thread::spawn(move || store.add(&format!("client{i}")))
        })
        .collect();

    for handle in handles {
        handle.join().unwrap().unwrap();
    }
    assert_eq!(store.len(), 8);
}
