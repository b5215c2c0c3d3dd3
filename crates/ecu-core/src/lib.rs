//! ECU Core - vehicle facade over an engine and a telemetry store
//!
//! This crate provides:
//! - `VehicleUnit`, the facade that starts the engine, serves telemetry
//!   within the manufacture-date bound and estimates range
//! - The `EngineController` and `TelemetryStore` contracts it is built on,
//!   with a simulated engine and an in-memory store
//! - The error taxonomy and the structured error facility
//! - The structured logging facility

pub mod engine;
pub mod errors;
pub mod logging_facility;
pub mod model;
pub mod telemetry;
pub mod vehicle;

pub use ecu_core_types::schema;

// Re-export commonly used types
pub use engine::{EngineController, SimulatedEngine, StartBehavior};
pub use errors::{EcuError, EngineStartFailure, ExError, ExErrorKind, Result};
pub use model::SensorReading;
pub use telemetry::{InMemoryTelemetryStore, TelemetryStore};
pub use vehicle::{VehicleUnit, DEFAULT_MANUFACTURE_DATE};
