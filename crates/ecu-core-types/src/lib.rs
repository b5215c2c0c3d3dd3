//! Core types shared across the ECU crates
//!
//! - **Time types**: the `Timestamp` alias and its boundary display format
//! - **Schema constants**: canonical field keys and event names for logging

pub mod schema;
pub mod time;

pub use time::{format_timestamp, Timestamp, TIMESTAMP_FORMAT};
