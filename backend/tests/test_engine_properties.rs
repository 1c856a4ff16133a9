//! Property tests over random days
//!
//! Random logs mix every event kind, a small pool of names (so collisions,
//! duplicates and unknown clients are common) and some out-of-hours times.

use chrono::NaiveTime;
use club_simulator_core::core::time::{format_duration, parse_duration};
use club_simulator_core::models::event::sort_chronologically;
use club_simulator_core::{
    ClientStore, Engine, Event, TableStore, TraceLine, VenueConfig, WorkingHours,
};
use proptest::prelude::*;

const NAMES: [&str; 6] = ["ann", "bob", "cat", "dan", "eve", "fay"];
const PRICE: i64 = 7;

fn config(table_count: usize) -> VenueConfig {
    VenueConfig {
        hours: WorkingHours::new(
            NaiveTime::from_hms_opt(9, 0, 0).unwrap(),
            NaiveTime::from_hms_opt(19, 0, 0).unwrap(),
        ),
        hourly_price: PRICE,
        table_count,
    }
}

fn event_strategy(table_count: usize) -> impl Strategy<Value = Event> {
    (8 * 60u32..20 * 60, 1u32..=4, 0..NAMES.len(), 1..=table_count).prop_map(
        |(minute, code, name, table)| {
            let time = NaiveTime::from_hms_opt(minute / 60, minute % 60, 0).unwrap();
            let table = if code == 2 { table } else { 0 };
            Event::new(time, code, NAMES[name], table)
        },
    )
}

fn day_strategy() -> impl Strategy<Value = (usize, Vec<Event>)> {
    (1usize..=4).prop_flat_map(|tables| {
        (
            Just(tables),
            prop::collection::vec(event_strategy(tables), 0..60).prop_map(|mut events| {
                sort_chronologically(&mut events);
                events
            }),
        )
    })
}

proptest! {
    #[test]
    fn prop_every_event_is_echoed((tables, events) in day_strategy()) {
        let mut engine = Engine::with_memory_stores(config(tables)).unwrap();
        let output = engine.run(&events).unwrap();

        let echoed = output
            .trace
            .iter()
            .filter(|line| matches!(line, TraceLine::Incoming { .. }))
            .count();
        prop_assert_eq!(echoed, events.len());
        prop_assert!(output.event_lines().count() >= events.len());
    }

    #[test]
    fn prop_sweep_empties_the_venue((tables, events) in day_strategy()) {
        let mut engine = Engine::with_memory_stores(config(tables)).unwrap();
        engine.run(&events).unwrap();

        prop_assert!(engine.clients().is_empty());
        prop_assert!(engine.clients().all_names().is_empty());
    }

    #[test]
    fn prop_revenue_is_whole_hours((tables, events) in day_strategy()) {
        let mut engine = Engine::with_memory_stores(config(tables)).unwrap();
        let output = engine.run(&events).unwrap();

        prop_assert_eq!(output.report.len(), tables);
        for (idx, row) in output.report.iter().enumerate() {
            prop_assert_eq!(row.table, idx + 1);
            prop_assert!(row.revenue >= 0);
            prop_assert_eq!(row.revenue % PRICE, 0);
            prop_assert!(row.revenue >= (row.occupied_minutes + 59) / 60 * PRICE);
        }
    }

    #[test]
    fn prop_held_table_is_never_taken((tables, events) in day_strategy()) {
        let engine = Engine::with_memory_stores(config(tables)).unwrap();
        let mut out = Vec::new();
        for event in &events {
            let holder = engine
                .tables()
                .snapshot()
                .get(&event.table())
                .and_then(|t| t.occupant().map(str::to_string));

            engine.process_event(event, &mut out).unwrap();

            if let Some(holder) = holder.filter(|h| h != event.client()) {
                let after = engine.tables().snapshot();
                prop_assert_eq!(after[&event.table()].occupant(), Some(holder.as_str()));
            }
            prop_assert!(engine.tables().snapshot().len() <= tables);
        }
    }

    #[test]
    fn prop_duration_format_is_stable(minutes in 0i64..1_000_000) {
        let text = format_duration(minutes);
        prop_assert_eq!(parse_duration(&text), Some(minutes));
        prop_assert_eq!(format_duration(parse_duration(&text).unwrap()), text);
    }
}
