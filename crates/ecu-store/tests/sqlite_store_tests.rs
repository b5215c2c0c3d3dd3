//! Integration tests for the SQLite telemetry store
//!
//! The store is driven both directly and through `VehicleUnit`.

mod common;

use std::sync::Arc;

use common::{ecu_readings, jan1, seeded_store};
use ecu_core::{
    EcuError, ExErrorKind, InMemoryTelemetryStore, SensorReading, SimulatedEngine, TelemetryStore,
    VehicleUnit,
};
use ecu_store::SqliteTelemetryStore;
use proptest::prelude::*;
use rust_decimal::Decimal;

fn ids(readings: &[SensorReading]) -> Vec<i64> {
    readings.iter().map(|r| r.id).collect()
}

#[test]
fn test_vehicle_over_sqlite_store_returns_expected_counts() {
    let store = seeded_store();
    let cases = [
        (jan1(6, 5, 0), 3),
        (jan1(6, 4, 0), 4),
        (jan1(6, 3, 0), 5),
        (jan1(6, 1, 0), 7),
    ];

    for (since, expected) in cases {
        let mut engine = SimulatedEngine::default();
        let vehicle = VehicleUnit::new(&mut engine, &store);
        assert_eq!(vehicle.get_sensor_data(since).unwrap().len(), expected);
    }
}

#[test]
fn test_query_returns_readings_unchanged_and_ascending() {
    let store = seeded_store();

    let result = store.query(jan1(6, 5, 0)).unwrap();

    assert_eq!(ids(&result), vec![6, 7, 8]);
    assert_eq!(result, ecu_readings()[5..].to_vec());
}

#[test]
fn test_insertion_order_does_not_affect_query_order() {
    let store = SqliteTelemetryStore::open_in_memory().unwrap();
    let mut readings = ecu_readings();
    readings.reverse();
    store.insert_readings(&readings).unwrap();

    let result = store.query(jan1(6, 0, 0)).unwrap();

    assert_eq!(ids(&result), vec![1, 2, 3, 4, 5, 6, 7, 8]);
}

#[test]
fn test_equal_timestamps_are_ordered_by_id() {
    let store = SqliteTelemetryStore::open_in_memory().unwrap();
    let mut readings = ecu_readings();
    for r in readings.iter_mut() {
        r.timestamp = jan1(7, 0, 0);
    }
    readings.reverse();
    store.insert_readings(&readings).unwrap();

    let result = store.query(jan1(7, 0, 0)).unwrap();

    assert_eq!(ids(&result), vec![1, 2, 3, 4, 5, 6, 7, 8]);
}

#[test]
fn test_duplicate_id_is_rejected() {
    let store = seeded_store();
    let duplicate = ecu_readings()[0].clone();

    let err = store.insert_reading(&duplicate).unwrap_err();

    assert_eq!(err.kind(), ExErrorKind::InvalidInput);
    assert!(err.message().contains("Reading 1 already exists"));
}

#[test]
fn test_batch_insert_is_all_or_nothing() {
    let store = SqliteTelemetryStore::open_in_memory().unwrap();
    let mut readings = ecu_readings();
    readings.push(readings[0].clone());

    assert!(store.insert_readings(&readings).is_err());
    assert_eq!(store.count().unwrap(), 0);
}

#[test]
fn test_append_assigns_next_id() {
    let store = seeded_store();

    let appended = store
        .append_reading(Decimal::new(149, 1), Decimal::new(351, 1), jan1(6, 8, 0))
        .unwrap();

    assert_eq!(appended.id, 9);
    assert_eq!(store.count().unwrap(), 9);
    assert_eq!(store.query(jan1(6, 8, 0)).unwrap(), vec![appended]);
}

#[test]
fn test_readings_survive_reopen() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("ecu.db");

    {
        let store = SqliteTelemetryStore::open(&path).unwrap();
        store.insert_readings(&ecu_readings()).unwrap();
    }

    let reopened = SqliteTelemetryStore::open(&path).unwrap();
    assert_eq!(reopened.count().unwrap(), 8);
    assert_eq!(reopened.query(jan1(6, 6, 0)).unwrap().len(), 2);
}

#[test]
fn test_range_error_short_circuits_before_sqlite() {
    let store = seeded_store();
    let mut engine = SimulatedEngine::default();
    let vehicle = VehicleUnit::new(&mut engine, &store);

    let since = chrono::NaiveDate::from_ymd_opt(2017, 12, 31)
        .unwrap()
        .and_hms_opt(0, 0, 0)
        .unwrap();
    let err = vehicle.get_sensor_data(since).unwrap_err();

    assert!(matches!(err, EcuError::TelemetryRangeError { .. }));
    assert!(err.to_string().starts_with("The sinceTime"));
}

#[test]
fn test_missing_table_surfaces_as_store_failure() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("broken.db");
    let store = SqliteTelemetryStore::open(&path).unwrap();

    // drop the table behind the store's back
    rusqlite::Connection::open(&path)
        .unwrap()
        .execute_batch("DROP TABLE sensor_readings")
        .unwrap();

    let result = store.query(jan1(6, 0, 0));

    match result {
        Err(EcuError::TelemetryStoreFailure { reason }) => {
            assert!(reason.contains("ERR_PERSISTENCE"));
        }
        other => panic!("unexpected result: {other:?}"),
    }
}

#[test]
fn test_store_is_shared_between_threads() {
    let store = Arc::new(seeded_store());

    let handles: Vec<_> = [jan1(6, 5, 0), jan1(6, 3, 0), jan1(6, 1, 0)]
        .into_iter()
        .map(|since| {
            let store = Arc::clone(&store);
            std::thread::spawn(move || {
                let mut engine = SimulatedEngine::default();
                let vehicle = VehicleUnit::new(&mut engine, &store);
                vehicle.get_sensor_data(since).unwrap().len()
            })
        })
        .collect();

    let counts: Vec<usize> = handles.into_iter().map(|h| h.join().unwrap()).collect();
    assert_eq!(counts, vec![3, 5, 7]);
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn prop_sqlite_matches_in_memory_store(
        offsets in proptest::collection::vec(0i64..3_600, 0..30),
        since_offset in 0i64..3_600,
    ) {
        let readings: Vec<SensorReading> = offsets
            .iter()
            .enumerate()
            .map(|(i, off)| SensorReading::new(
                i as i64 + 1,
                Decimal::new(140 + (i as i64 % 10), 1),
                Decimal::new(1_001 + *off, 2),
                jan1(6, 0, 0) + chrono::Duration::seconds(*off),
            ))
            .collect();
        let sqlite = SqliteTelemetryStore::open_in_memory().unwrap();
        sqlite.insert_readings(&readings).unwrap();
        let memory = InMemoryTelemetryStore::with_readings(readings);
        let since = jan1(6, 0, 0) + chrono::Duration::seconds(since_offset);

        // ids ascend with insertion order, so both stores break ties the same way
        prop_assert_eq!(sqlite.query(since).unwrap(), memory.query(since).unwrap());
    }
}
