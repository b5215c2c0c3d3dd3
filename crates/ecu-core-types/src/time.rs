//! Timestamp type used at every ECU boundary

use chrono::NaiveDateTime;

/// Wall-clock timestamp of a telemetry reading (no zone, as recorded by the ECU)
pub type Timestamp = NaiveDateTime;

/// Boundary display format: 24-hour clock, minute precision
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M";

/// Render a timestamp in the boundary display format
pub fn format_timestamp(ts: &Timestamp) -> String {
    ts.format(TIMESTAMP_FORMAT).to_string()
}
