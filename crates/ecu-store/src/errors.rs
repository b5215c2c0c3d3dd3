//! Error handling for ecu-store
//!
//! Wraps ecu-core ExError with store-specific helpers

use ecu_core::errors::{EcuError, ExError, ExErrorKind};

/// Result type alias using ExError
pub type Result<T> = std::result::Result<T, ExError>;

/// Create a migration error
pub fn migration_error(migration_id: &str, reason: &str) -> ExError {
    ExError::new(ExErrorKind::Persistence)
        .with_op("migration")
        .with_message(format!("Migration {} failed: {}", migration_id, reason))
}

/// Create a checksum mismatch error
pub fn checksum_mismatch(migration_id: &str, expected: &str, actual: &str) -> ExError {
    ExError::new(ExErrorKind::Persistence)
        .with_op("migration_checksum")
        .with_message(format!(
            "Checksum mismatch for migration {}: expected {}, got {}",
            migration_id, expected, actual
        ))
}

/// Create a fixture validation error
pub fn fixture_validation(reason: &str) -> ExError {
    ExError::new(ExErrorKind::InvalidInput)
        .with_op("fixture_parse")
        .with_message(reason.to_string())
}

/// Create a duplicate reading id error
pub fn duplicate_reading(reading_id: i64) -> ExError {
    ExError::new(ExErrorKind::InvalidInput)
        .with_op("sensor_reading_insert")
        .with_message(format!("Reading {} already exists", reading_id))
}

/// Create a corrupt-row error (a stored value that cannot be decoded)
pub fn corrupt_row(reading_id: i64, reason: &str) -> ExError {
    ExError::new(ExErrorKind::Persistence)
        .with_op("sensor_reading_decode")
        .with_message(format!("Reading {} is corrupt: {}", reading_id, reason))
}

/// Create a database error from rusqlite::Error
pub fn from_rusqlite(err: rusqlite::Error) -> ExError {
    ExError::new(ExErrorKind::Persistence)
        .with_op("sqlite")
        .with_message(err.to_string())
}

/// Create a serialization error from serde_json::Error
pub fn from_serde_json(err: serde_json::Error) -> ExError {
    ExError::new(ExErrorKind::Serialization)
        .with_op("fixture_parse")
        .with_message(err.to_string())
}

/// Create an IO error
pub fn io_error(operation: &str, err: std::io::Error) -> ExError {
    ExError::new(ExErrorKind::Io)
        .with_op(operation.to_string())
        .with_message(err.to_string())
}

/// Create an error for a poisoned connection lock
pub fn lock_poisoned() -> ExError {
    ExError::new(ExErrorKind::Internal)
        .with_op("sqlite_lock")
        .with_message("connection lock poisoned by a panicking thread")
}

/// Surface a store error through the telemetry contract
pub fn to_ecu_error(err: ExError) -> EcuError {
    EcuError::store_failure(err.to_string())
}
