//! ECU Store - SQLite-backed telemetry persistence
//!
//! Provides:
//! - `SqliteTelemetryStore`, a `TelemetryStore` over a `sensor_readings` table
//! - Embedded schema migrations with checksums
//! - JSON telemetry fixture loading and import

pub mod db;
pub mod digest;
pub mod errors;
pub mod fixtures;
pub mod migrations;
pub mod sqlite_store;

// Re-export key types
pub use errors::Result;
pub use fixtures::ImportSummary;
pub use sqlite_store::SqliteTelemetryStore;
