//! JSON telemetry fixtures
//!
//! A fixture file is a JSON array of readings:
//!
//! ```json
//! [
//!   { "id": 1, "air_fuel_ratio": "14.5", "manifold_pressure_kpa": "10.1",
//!     "timestamp": "2018-01-01T06:00:00" }
//! ]
//! ```
//!
//! Ids must be unique within a file. Decimal values may be given as strings
//! or numbers.

use std::collections::HashSet;
use std::path::Path;

use ecu_core::SensorReading;

use crate::digest::sha256_hex;
use crate::errors::{fixture_validation, from_serde_json, io_error, Result};
use crate::sqlite_store::SqliteTelemetryStore;

/// Outcome of importing a fixture file
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImportSummary {
    /// Number of readings stored
    pub readings: usize,
    /// SHA-256 of the fixture file contents
    pub digest: String,
}

/// Parse fixture JSON into readings, rejecting duplicate ids
pub fn parse_readings_json(json: &str) -> Result<Vec<SensorReading>> {
    let readings: Vec<SensorReading> = serde_json::from_str(json).map_err(from_serde_json)?;

    let mut seen = HashSet::new();
    for reading in &readings {
        if !seen.insert(reading.id) {
            return Err(fixture_validation(&format!(
                "Duplicate reading id {} in fixture",
                reading.id
            )));
        }
    }

    Ok(readings)
}

/// Read and parse a fixture file
pub fn load_readings_json<P: AsRef<Path>>(path: P) -> Result<Vec<SensorReading>> {
    let json = std::fs::read_to_string(path.as_ref()).map_err(|e| io_error("fixture_read", e))?;
    parse_readings_json(&json)
}

/// Import a fixture file into a SQLite store in a single transaction
pub fn import_readings<P: AsRef<Path>>(
    store: &SqliteTelemetryStore,
    path: P,
) -> Result<ImportSummary> {
    let path = path.as_ref();
    let json = std::fs::read_to_string(path).map_err(|e| io_error("fixture_read", e))?;
    let readings = parse_readings_json(&json)?;

    let stored = store.insert_readings(&readings)?;
    let digest = sha256_hex(&json);

    tracing::debug!(
        path = %path.display(),
        readings = stored,
        digest = %digest,
        "imported telemetry fixture"
    );

    Ok(ImportSummary {
        readings: stored,
        digest,
    })
}
