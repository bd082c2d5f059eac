//! Shared service helpers, currently just telemetry wiring.

pub mod telemetry;

pub use telemetry::*;
