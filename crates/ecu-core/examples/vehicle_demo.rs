//! Vehicle demo
//!
//! Wires a simulated engine and an in-memory telemetry store into a
//! `VehicleUnit`, then exercises each operation.
//!
//! Run with: `cargo run -p ecu-core --example vehicle_demo`

use chrono::NaiveDate;
use ecu_core::logging_facility::{init, Profile};
use ecu_core::{InMemoryTelemetryStore, SensorReading, SimulatedEngine, StartBehavior, VehicleUnit};
use rust_decimal::Decimal;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    init(Profile::Development);

    let day = NaiveDate::from_ymd_opt(2018, 1, 1).ok_or("invalid date")?;
    let mut store = InMemoryTelemetryStore::new();
    for minute in 0..8u32 {
        let ts = day
            .and_hms_opt(6, minute, 0)
            .ok_or("invalid time")?;
        store.insert(SensorReading::new(
            i64::from(minute) + 1,
            Decimal::new(145 + i64::from(minute % 4), 1),
            Decimal::new(101 + 100 * i64::from(minute % 5), 1),
            ts,
        ));
    }

    println!("=== Start ===");
    let mut engine = SimulatedEngine::new(StartBehavior::Starts);
    {
        let mut vehicle = VehicleUnit::new(&mut engine, &store);
        println!("  started: {}", vehicle.start()?);
        println!("  running: {}", vehicle.is_running());

        println!("\n=== Telemetry since 06:05 ===");
        let since = day
            .and_hms_opt(6, 5, 0)
            .ok_or("invalid time")?;
        for reading in vehicle.get_sensor_data(since)? {
            println!(
                "  #{} {} afr={} map={}kPa",
                reading.id, reading.timestamp, reading.air_fuel_ratio, reading.manifold_pressure_kpa
            );
        }

        println!("\n=== Telemetry before manufacture ===");
        let too_early = NaiveDate::from_ymd_opt(2017, 12, 31)
            .and_then(|d| d.and_hms_opt(0, 0, 0))
            .ok_or("invalid date")?;
        if let Err(e) = vehicle.get_sensor_data(too_early) {
            println!("  rejected: {}", e);
        }

        println!("\n=== Range ===");
        println!("  10 units at 28 per unit: {}", vehicle.calculate_current_range(10, 28));

        vehicle.shutdown();
        println!("\n  running after shutdown: {}", vehicle.is_running());
    }

    println!("\n=== Failed starts ===");
    for behavior in [
        StartBehavior::Refuses,
        StartBehavior::Aborts("starter motor stalled".to_string()),
    ] {
        let mut engine = SimulatedEngine::new(behavior);
        let mut vehicle = VehicleUnit::new(&mut engine, &store);
        match vehicle.start() {
            Ok(_) => println!("  unexpected start"),
            Err(e) => {
                let cause = std::error::Error::source(&e)
                    .map(|c| c.to_string())
                    .unwrap_or_else(|| "none".to_string());
                println!("  {} (cause: {})", e, cause);
            }
        }
    }

    Ok(())
}
