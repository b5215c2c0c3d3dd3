#![allow(dead_code)]

use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::Arc;

use chrono::NaiveDate;
use ecu_core::{
    EcuError, EngineController, EngineStartFailure, InMemoryTelemetryStore, Result,
    SensorReading, TelemetryStore,
};
use ecu_core_types::Timestamp;
use rust_decimal::Decimal;

mockall::mock! {
    pub Engine {}

    impl EngineController for Engine {
        fn start(&mut self) -> std::result::Result<bool, EngineStartFailure>;
        fn shutdown(&mut self);
        fn is_running(&self) -> bool;
        fn set_running(&mut self, running: bool);
    }
}

/// Mock engine whose run flag behaves like a real property
///
/// `start` is expected exactly once and answers with `outcome`.
pub fn mock_engine(outcome: std::result::Result<bool, EngineStartFailure>) -> MockEngine {
    let running = Arc::new(AtomicBool::new(false));
    let mut engine = MockEngine::new();

    engine.expect_start().times(1).return_once(move || outcome);

    let flag = running.clone();
    engine
        .expect_set_running()
        .returning(move |value| flag.store(value, Ordering::SeqCst));

    let flag = running.clone();
    engine
        .expect_shutdown()
        .returning(move || flag.store(false, Ordering::SeqCst));

    engine
        .expect_is_running()
        .returning(move || running.load(Ordering::SeqCst));

    engine
}

/// 2018-01-01 at the given wall-clock time
pub fn jan1(hour: u32, minute: u32, second: u32) -> Timestamp {
    NaiveDate::from_ymd_opt(2018, 1, 1)
        .unwrap()
        .and_hms_opt(hour, minute, second)
        .unwrap()
}

pub fn date(year: i32, month: u32, day: u32) -> Timestamp {
    NaiveDate::from_ymd_opt(year, month, day)
        .unwrap()
        .and_hms_opt(0, 0, 0)
        .unwrap()
}

fn dec(s: &str) -> Decimal {
    s.parse().unwrap()
}

/// Eight readings, one per minute from 06:00 to 06:07 on 2018-01-01
pub fn ecu_readings() -> Vec<SensorReading> {
    vec![
        SensorReading::new(1, dec("14.5"), dec("10.1"), jan1(6, 0, 0)),
        SensorReading::new(2, dec("14.6"), dec("20.1"), jan1(6, 1, 0)),
        SensorReading::new(3, dec("14.8"), dec("30.1"), jan1(6, 2, 0)),
        SensorReading::new(4, dec("14.7"), dec("40.1"), jan1(6, 3, 0)),
        SensorReading::new(5, dec("14.7"), dec("50.1"), jan1(6, 4, 0)),
        SensorReading::new(6, dec("14.6"), dec("40.1"), jan1(6, 5, 0)),
        SensorReading::new(7, dec("14.8"), dec("50.1"), jan1(6, 6, 0)),
        SensorReading::new(8, dec("14.3"), dec("10.1"), jan1(6, 7, 0)),
    ]
}

pub fn ecu_store() -> InMemoryTelemetryStore {
    InMemoryTelemetryStore::with_readings(ecu_readings())
}

/// Store wrapper that counts queries
pub struct CountingStore<S> {
    inner: S,
    queries: AtomicUsize,
}

impl<S: TelemetryStore> CountingStore<S> {
    pub fn new(inner: S) -> Self {
        Self {
            inner,
            queries: AtomicUsize::new(0),
        }
    }

    pub fn queries(&self) -> usize {
        self.queries.load(Ordering::SeqCst)
    }
}

impl<S: TelemetryStore> TelemetryStore for CountingStore<S> {
    fn query(&self, since_inclusive: Timestamp) -> Result<Vec<SensorReading>> {
        self.queries.fetch_add(1, Ordering::SeqCst);
        self.inner.query(since_inclusive)
    }
}

/// Store that always fails
pub struct UnavailableStore;

impl TelemetryStore for UnavailableStore {
    fn query(&self, _since_inclusive: Timestamp) -> Result<Vec<SensorReading>> {
        Err(EcuError::store_failure("database is locked"))
    }
}
