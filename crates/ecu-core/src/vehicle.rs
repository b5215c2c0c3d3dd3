//! Vehicle facade over an engine controller and a telemetry store.
//!
//! ## Logging Ownership
//!
//! `VehicleUnit` owns lifecycle logging for its operations:
//! - `log_op_start!` at entry
//! - `log_op_end!` on success
//! - `log_op_error!` on failure
//!
//! Stores and engine drivers use only `tracing::debug!()` for internal details.

use chrono::NaiveDate;
use ecu_core_types::{format_timestamp, Timestamp};

use crate::engine::EngineController;
use crate::errors::{EcuError, Result};
use crate::model::SensorReading;
use crate::telemetry::TelemetryStore;
use crate::{log_op_end, log_op_error, log_op_start};

/// Manufacture date used by `VehicleUnit::new`: 2018-01-01 00:00
pub const DEFAULT_MANUFACTURE_DATE: Timestamp = match NaiveDate::from_ymd_opt(2018, 1, 1) {
    Some(date) => match date.and_hms_opt(0, 0, 0) {
        Some(ts) => ts,
        None => panic!("invalid default manufacture time"),
    },
    None => panic!("invalid default manufacture date"),
};

/// One vehicle: an engine it drives and a telemetry source it reads
///
/// The unit borrows both collaborators. The engine is borrowed mutably, so
/// exactly one unit drives a given controller at a time; the store is shared
/// and may back any number of units.
///
/// # Example
/// ```
/// use ecu_core::engine::{SimulatedEngine, StartBehavior};
/// use ecu_core::telemetry::InMemoryTelemetryStore;
/// use ecu_core::VehicleUnit;
///
/// let mut engine = SimulatedEngine::new(StartBehavior::Starts);
/// let store = InMemoryTelemetryStore::new();
/// let mut vehicle = VehicleUnit::new(&mut engine, &store);
///
/// assert_eq!(vehicle.start(), Ok(true));
/// assert!(vehicle.is_running());
/// assert_eq!(vehicle.calculate_current_range(10, 28), 280);
/// ```
pub struct VehicleUnit<'a> {
    manufacture_date: Timestamp,
    engine: &'a mut dyn EngineController,
    store: &'a dyn TelemetryStore,
}

impl<'a> VehicleUnit<'a> {
    /// Create a vehicle with the default manufacture date
    pub fn new(engine: &'a mut dyn EngineController, store: &'a dyn TelemetryStore) -> Self {
        Self::with_manufacture_date(engine, store, DEFAULT_MANUFACTURE_DATE)
    }

    /// Create a vehicle with an explicit manufacture date
    pub fn with_manufacture_date(
        engine: &'a mut dyn EngineController,
        store: &'a dyn TelemetryStore,
        manufacture_date: Timestamp,
    ) -> Self {
        Self {
            manufacture_date,
            engine,
            store,
        }
    }

    pub fn manufacture_date(&self) -> Timestamp {
        self.manufacture_date
    }

    /// Start the engine
    ///
    /// Returns `Ok(true)` once the controller reports success; the controller's
    /// run flag is then set. No retry is attempted.
    ///
    /// ## Errors
    ///
    /// - `VehicleStartFailure` with message "Something went wrong" when the
    ///   controller refuses (returns `false`)
    /// - `VehicleStartFailure` with message "Handled EngineStartException" when
    ///   the controller aborts; the abort is kept as the error's source
    pub fn start(&mut self) -> Result<bool> {
        log_op_start!("vehicle_start");
        let start = std::time::Instant::now();

        let result = self.start_impl().map_err(|e| {
            log_op_error!(
                "vehicle_start",
                e.clone(),
                duration_ms = start.elapsed().as_millis() as u64
            );
            e
        })?;

        log_op_end!(
            "vehicle_start",
            duration_ms = start.elapsed().as_millis() as u64
        );

        Ok(result)
    }

    fn start_impl(&mut self) -> Result<bool> {
        match self.engine.start() {
            Ok(true) => {
                self.engine.set_running(true);
                Ok(self.engine.is_running())
            }
            Ok(false) => Err(EcuError::engine_refused()),
            Err(abort) => {
                tracing::debug!(reason = %abort.reason, "engine aborted start");
                Err(EcuError::engine_aborted(abort))
            }
        }
    }

    /// Stop the engine
    pub fn shutdown(&mut self) {
        log_op_start!("vehicle_shutdown");
        let start = std::time::Instant::now();

        self.engine.shutdown();

        log_op_end!(
            "vehicle_shutdown",
            duration_ms = start.elapsed().as_millis() as u64
        );
    }

    /// Whether the engine is running, as reported by the controller
    pub fn is_running(&self) -> bool {
        self.engine.is_running()
    }

    /// Readings recorded at or after `since_time`, oldest first
    ///
    /// Blocks for the duration of the store query.
    ///
    /// ## Errors
    ///
    /// - `TelemetryRangeError` when `since_time` is before the manufacture
    ///   date; the store is not queried
    /// - `TelemetryStoreFailure` passed through from the store
    pub fn get_sensor_data(&self, since_time: Timestamp) -> Result<Vec<SensorReading>> {
        log_op_start!(
            "get_sensor_data",
            since = %format_timestamp(&since_time)
        );
        let start = std::time::Instant::now();

        let result = self.get_sensor_data_impl(since_time).map_err(|e| {
            log_op_error!(
                "get_sensor_data",
                e.clone(),
                duration_ms = start.elapsed().as_millis() as u64
            );
            e
        })?;

        log_op_end!(
            "get_sensor_data",
            duration_ms = start.elapsed().as_millis() as u64,
            reading_count = result.len() as u64
        );

        Ok(result)
    }

    fn get_sensor_data_impl(&self, since_time: Timestamp) -> Result<Vec<SensorReading>> {
        if since_time < self.manufacture_date {
            return Err(EcuError::telemetry_range(since_time, self.manufacture_date));
        }

        self.store.query(since_time)
    }

    /// Estimated travel range: `fuel_amount * economy_rating`
    ///
    /// Inputs are not validated; zero and negative values give the plain
    /// product. The result is widened so no pair of inputs can overflow.
    pub fn calculate_current_range(&self, fuel_amount: i32, economy_rating: i32) -> i64 {
        i64::from(fuel_amount) * i64::from(economy_rating)
    }
}
