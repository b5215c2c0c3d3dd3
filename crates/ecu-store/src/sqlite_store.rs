//! SQLite telemetry store
//!
//! Persists `SensorReading`s in the `sensor_readings` table and answers the
//! `TelemetryStore` contract from it.

use std::path::Path;
use std::str::FromStr;
use std::sync::{Mutex, MutexGuard};

use chrono::DateTime;
use ecu_core::{SensorReading, TelemetryStore};
use ecu_core_types::Timestamp;
use rust_decimal::Decimal;
use rusqlite::{Connection, ErrorCode};

use crate::db;
use crate::errors::{
    corrupt_row, duplicate_reading, from_rusqlite, lock_poisoned, to_ecu_error, Result,
};
use crate::migrations::apply_migrations;

/// Raw column values of one `sensor_readings` row
struct ReadingRow {
    id: i64,
    air_fuel_ratio: String,
    manifold_pressure_kpa: String,
    recorded_at: i64,
}

impl ReadingRow {
    fn into_reading(self) -> Result<SensorReading> {
        let air_fuel_ratio = Decimal::from_str(&self.air_fuel_ratio)
            .map_err(|e| corrupt_row(self.id, &format!("air_fuel_ratio: {}", e)))?;
        let manifold_pressure_kpa = Decimal::from_str(&self.manifold_pressure_kpa)
            .map_err(|e| corrupt_row(self.id, &format!("manifold_pressure_kpa: {}", e)))?;
        let timestamp = from_micros(self.recorded_at)
            .ok_or_else(|| corrupt_row(self.id, "recorded_at out of range"))?;

        Ok(SensorReading::new(
            self.id,
            air_fuel_ratio,
            manifold_pressure_kpa,
            timestamp,
        ))
    }
}

fn to_micros(ts: &Timestamp) -> i64 {
    ts.and_utc().timestamp_micros()
}

fn from_micros(micros: i64) -> Option<Timestamp> {
    DateTime::from_timestamp_micros(micros).map(|dt| dt.naive_utc())
}

/// Telemetry store over a single SQLite connection
///
/// The connection sits behind a mutex so the store can be shared between
/// vehicles on different threads. Queries are serialized on that lock.
pub struct SqliteTelemetryStore {
    conn: Mutex<Connection>,
}

impl SqliteTelemetryStore {
    /// Open (or create) a database file, configure it and apply migrations
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let conn = db::open(path)?;
        db::configure(&conn)?;
        Self::from_connection(conn)
    }

    /// Fresh in-memory database with the schema applied
    pub fn open_in_memory() -> Result<Self> {
        Self::from_connection(db::open_in_memory()?)
    }

    /// Wrap an existing connection, applying any pending migrations
    pub fn from_connection(mut conn: Connection) -> Result<Self> {
        apply_migrations(&mut conn)?;
        Ok(Self {
            conn: Mutex::new(conn),
        })
    }

    fn lock(&self) -> Result<MutexGuard<'_, Connection>> {
        self.conn.lock().map_err(|_| lock_poisoned())
    }

    /// Insert a reading under its own id
    ///
    /// # Errors
    ///
    /// `InvalidInput` if a reading with the same id already exists.
    pub fn insert_reading(&self, reading: &SensorReading) -> Result<()> {
        let conn = self.lock()?;
        insert_row(&conn, reading)
    }

    /// Insert a batch of readings in one transaction
    ///
    /// Either every reading is stored or none is.
    pub fn insert_readings(&self, readings: &[SensorReading]) -> Result<usize> {
        let mut conn = self.lock()?;
        let tx = conn.transaction().map_err(from_rusqlite)?;
        for reading in readings {
            insert_row(&tx, reading)?;
        }
        tx.commit().map_err(from_rusqlite)?;

        tracing::debug!(count = readings.len(), "inserted sensor readings");
        Ok(readings.len())
    }

    /// Record a new sample, letting the database assign its id
    pub fn append_reading(
        &self,
        air_fuel_ratio: Decimal,
        manifold_pressure_kpa: Decimal,
        timestamp: Timestamp,
    ) -> Result<SensorReading> {
        let conn = self.lock()?;
        conn.execute(
            "INSERT INTO sensor_readings (air_fuel_ratio, manifold_pressure_kpa, recorded_at)
             VALUES (?1, ?2, ?3)",
            rusqlite::params![
                air_fuel_ratio.to_string(),
                manifold_pressure_kpa.to_string(),
                to_micros(&timestamp),
            ],
        )
        .map_err(from_rusqlite)?;

        Ok(SensorReading::new(
            conn.last_insert_rowid(),
            air_fuel_ratio,
            manifold_pressure_kpa,
            timestamp,
        ))
    }

    /// Total number of stored readings
    pub fn count(&self) -> Result<usize> {
        let conn = self.lock()?;
        let count: i64 = conn
            .query_row("SELECT COUNT(*) FROM sensor_readings", [], |row| row.get(0))
            .map_err(from_rusqlite)?;
        Ok(count as usize)
    }

    /// Readings at or after `since_inclusive`, ordered by time then id
    pub fn readings_since(&self, since_inclusive: Timestamp) -> Result<Vec<SensorReading>> {
        let conn = self.lock()?;
        let mut stmt = conn
            .prepare(
                "SELECT id, air_fuel_ratio, manifold_pressure_kpa, recorded_at
                 FROM sensor_readings
                 WHERE recorded_at >= ?1
                 ORDER BY recorded_at ASC, id ASC",
            )
            .map_err(from_rusqlite)?;

        let rows = stmt
            .query_map([to_micros(&since_inclusive)], |row| {
                Ok(ReadingRow {
                    id: row.get(0)?,
                    air_fuel_ratio: row.get(1)?,
                    manifold_pressure_kpa: row.get(2)?,
                    recorded_at: row.get(3)?,
                })
            })
            .map_err(from_rusqlite)?
            .collect::<std::result::Result<Vec<_>, _>>()
            .map_err(from_rusqlite)?;

        let readings = rows
            .into_iter()
            .map(ReadingRow::into_reading)
            .collect::<Result<Vec<_>>>()?;

        tracing::debug!(count = readings.len(), "queried sensor readings");
        Ok(readings)
    }
}

fn insert_row(conn: &Connection, reading: &SensorReading) -> Result<()> {
    conn.execute(
        "INSERT INTO sensor_readings (id, air_fuel_ratio, manifold_pressure_kpa, recorded_at)
         VALUES (?1, ?2, ?3, ?4)",
        rusqlite::params![
            reading.id,
            reading.air_fuel_ratio.to_string(),
            reading.manifold_pressure_kpa.to_string(),
            to_micros(&reading.timestamp),
        ],
    )
    .map_err(|e| match e {
        rusqlite::Error::SqliteFailure(ref code, _)
            if code.code == ErrorCode::ConstraintViolation =>
        {
            duplicate_reading(reading.id)
        }
        other => from_rusqlite(other),
    })?;

    Ok(())
}

impl TelemetryStore for SqliteTelemetryStore {
    fn query(&self, since_inclusive: Timestamp) -> ecu_core::Result<Vec<SensorReading>> {
        self.readings_since(since_inclusive).map_err(to_ecu_error)
    }
}
