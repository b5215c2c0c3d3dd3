#![allow(dead_code)]

use std::path::PathBuf;

use chrono::NaiveDate;
use ecu_core::SensorReading;
use ecu_core_types::Timestamp;
use ecu_store::SqliteTelemetryStore;

/// Path of a fixture under tests/fixtures
pub fn fixture_path(name: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("fixtures")
        .join(name)
}

/// 2018-01-01 at the given wall-clock time
pub fn jan1(hour: u32, minute: u32, second: u32) -> Timestamp {
    NaiveDate::from_ymd_opt(2018, 1, 1)
        .unwrap()
        .and_hms_opt(hour, minute, second)
        .unwrap()
}

/// The eight-reading fixture, parsed
pub fn ecu_readings() -> Vec<SensorReading> {
    ecu_store::fixtures::load_readings_json(fixture_path("ecu_readings.json")).unwrap()
}

/// In-memory SQLite store seeded with the eight-reading fixture
pub fn seeded_store() -> SqliteTelemetryStore {
    let store = SqliteTelemetryStore::open_in_memory().unwrap();
    store.insert_readings(&ecu_readings()).unwrap();
    store
}
