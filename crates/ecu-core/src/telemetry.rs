//! Telemetry store contract and the list-backed implementation

use std::sync::Arc;

use ecu_core_types::Timestamp;

use crate::errors::Result;
use crate::model::SensorReading;

/// Queryable, time-ordered collection of sensor readings
///
/// Queries are read-only and must be safe to issue from several vehicles at
/// once, hence the `Send + Sync` bound.
pub trait TelemetryStore: Send + Sync {
    /// All readings with `timestamp >= since_inclusive`, oldest first
    ///
    /// Readings sharing a timestamp keep the order of the underlying source.
    ///
    /// # Errors
    ///
    /// Returns `EcuError::TelemetryStoreFailure` if the backing source fails.
    fn query(&self, since_inclusive: Timestamp) -> Result<Vec<SensorReading>>;
}

impl<T: TelemetryStore + ?Sized> TelemetryStore for Arc<T> {
    fn query(&self, since_inclusive: Timestamp) -> Result<Vec<SensorReading>> {
        (**self).query(since_inclusive)
    }
}

/// In-memory store over a plain list of readings
///
/// Insertion order is preserved and acts as the tie-break between readings
/// with identical timestamps.
#[derive(Debug, Clone, Default)]
pub struct InMemoryTelemetryStore {
    readings: Vec<SensorReading>,
}

impl InMemoryTelemetryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_readings(readings: Vec<SensorReading>) -> Self {
        Self { readings }
    }

    pub fn insert(&mut self, reading: SensorReading) {
        self.readings.push(reading);
    }

    pub fn len(&self) -> usize {
        self.readings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.readings.is_empty()
    }
}

impl Extend<SensorReading> for InMemoryTelemetryStore {
    fn extend<I: IntoIterator<Item = SensorReading>>(&mut self, iter: I) {
        self.readings.extend(iter);
    }
}

impl TelemetryStore for InMemoryTelemetryStore {
    fn query(&self, since_inclusive: Timestamp) -> Result<Vec<SensorReading>> {
        let mut matched: Vec<SensorReading> = self
            .readings
            .iter()
            .filter(|r| r.timestamp >= since_inclusive)
            .cloned()
            .collect();
        // stable: equal timestamps stay in insertion order
        matched.sort_by_key(|r| r.timestamp);
        Ok(matched)
    }
}
