// Queue admission: joining while a table is free is flagged, and joining
// beyond the table count evicts the joiner on the spot.

use crate::core::time::WorkingHours;
use crate::models::{ClientStatus, Event, RejectReason, TraceLine};
use crate::orchestrator::engine::{Engine, VenueConfig};
use crate::store::ClientStore;
use chrono::NaiveTime;

fn at(h: u32, m: u32) -> NaiveTime {
    NaiveTime::from_hms_opt(h, m, 0).unwrap()
}

fn engine(table_count: usize) -> Engine {
    Engine::with_memory_stores(VenueConfig {
        hours: WorkingHours::new(at(9, 0), at(19, 0)),
        hourly_price: 10,
        table_count,
    })
    .unwrap()
}

fn replay(engine: &Engine, events: &[Event]) -> Vec<TraceLine> {
    let mut out = Vec::new();
    for event in events {
        engine.process_event(event, &mut out).unwrap();
    }
    out
}

#[test]
fn test_join_with_untouched_tables_is_flagged_but_client_stays_queued() {
    let engine = engine(2);
    let out = replay(
        &engine,
        &[
            Event::arrived(at(10, 0), "alice"),
            Event::seat_request(at(10, 0), "alice", 1),
            Event::arrived(at(10, 5), "bob"),
            Event::queue_join(at(10, 6), "bob"),
        ],
    );

    assert_eq!(
        out.last(),
        Some(&TraceLine::Rejected {
            time: at(10, 6),
            reason: RejectReason::ClientIsWaiting,
        })
    );
    assert_eq!(engine.clients().get("bob").unwrap().status(), ClientStatus::Queued);
}

#[test]
fn test_join_with_every_table_busy_is_accepted() {
    let engine = engine(1);
    let out = replay(
        &engine,
        &[
            Event::arrived(at(10, 0), "alice"),
            Event::seat_request(at(10, 0), "alice", 1),
            Event::arrived(at(10, 5), "bob"),
            Event::queue_join(at(10, 6), "bob"),
        ],
    );

    assert_eq!(out.len(), 4);
    assert!(out.iter().all(|line| matches!(line, TraceLine::Incoming { .. })));
}

#[test]
fn test_flag_and_eviction_on_same_join() {
    // One table, never seated: every join is flagged, the second one overflows.
    let engine = engine(1);
    let out = replay(
        &engine,
        &[
            Event::arrived(at(10, 0), "alice"),
            Event::arrived(at(10, 0), "bob"),
            Event::queue_join(at(10, 1), "alice"),
            Event::queue_join(at(10, 2), "bob"),
        ],
    );

    let rendered: Vec<String> = out.iter().map(ToString::to_string).collect();
    assert_eq!(
        rendered,
        vec![
            "10:00 1 alice",
            "10:00 1 bob",
            "10:01 3 alice",
            "10:01 13 ICanWaitNoLonger!",
            "10:02 3 bob",
            "10:02 13 ICanWaitNoLonger!",
            "10:02 11 bob",
        ]
    );
    assert!(engine.clients().get("bob").is_err());
}

#[test]
fn test_unknown_client_cannot_queue() {
    let engine = engine(1);
    let out = replay(&engine, &[Event::queue_join(at(10, 0), "ghost")]);
    assert_eq!(out[1].to_string(), "10:00 13 ClientUnknown");
}
