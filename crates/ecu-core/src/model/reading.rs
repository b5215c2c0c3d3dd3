use ecu_core_types::Timestamp;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// One timestamped sample from the engine-control unit
///
/// Readings are owned by the telemetry store and handed out by value; the
/// vehicle never mutates them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SensorReading {
    /// Store-assigned identifier
    pub id: i64,

    /// Air-fuel ratio (mass of air per mass of fuel)
    pub air_fuel_ratio: Decimal,

    /// Intake manifold absolute pressure in kPa
    pub manifold_pressure_kpa: Decimal,

    /// When the sample was recorded
    pub timestamp: Timestamp,
}

impl SensorReading {
    pub fn new(
        id: i64,
        air_fuel_ratio: Decimal,
        manifold_pressure_kpa: Decimal,
        timestamp: Timestamp,
    ) -> Self {
        Self {
            id,
            air_fuel_ratio,
            manifold_pressure_kpa,
            timestamp,
        }
    }
}
