//! Tests for the closing-time sweep

use chrono::NaiveTime;
use club_simulator_core::{
    ClientStore, Engine, Event, TableStore, TraceLine, VenueConfig, WorkingHours,
};

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

#[test]
fn test_sweep_evicts_in_name_order_at_closing_time() {
    let mut engine = engine(2);
    let output = engine
        .run(&[
            Event::arrived(at(10, 0), "zara"),
            Event::arrived(at(10, 1), "mike"),
            Event::arrived(at(10, 2), "anna"),
            Event::seat_request(at(10, 3), "mike", 2),
        ])
        .unwrap();

    let evicted: Vec<String> = output
        .trace
        .iter()
        .filter(|line| matches!(line, TraceLine::Evicted { .. }))
        .map(ToString::to_string)
        .collect();
    assert_eq!(evicted, vec!["19:00 11 anna", "19:00 11 mike", "19:00 11 zara"]);

    assert!(engine.clients().is_empty());
    assert_eq!(engine.tables().table_of("mike"), None);
}

#[test]
fn test_sweep_bills_held_tables_up_to_closing() {
    let mut engine = engine(2);
    let output = engine
        .run(&[
            Event::arrived(at(10, 0), "mike"),
            Event::seat_request(at(10, 59), "mike", 2),
        ])
        .unwrap();

    assert_eq!(output.report[1].to_string(), "2 90 08:01");
    assert!(engine.tables().snapshot()[&2].is_free());
}

#[test]
fn test_sweep_lines_come_before_closing_line() {
    let mut engine = engine(1);
    let output = engine.run(&[Event::arrived(at(10, 0), "solo")]).unwrap();

    let rendered = output.render();
    let tail: Vec<&str> = rendered.lines().rev().take(3).collect();
    assert_eq!(tail, vec!["1 0 00:00", "19:00", "19:00 11 solo"]);
}

#[test]
fn test_empty_day() {
    let mut engine = engine(2);
    let output = engine.run(&[]).unwrap();
    assert_eq!(output.render(), "09:00\n19:00\n1 0 00:00\n2 0 00:00");
}
