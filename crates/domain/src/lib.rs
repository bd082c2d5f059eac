//! Domain-level building blocks shared by the watcher binary: configuration
//! loading, amount/alert modelling, and telemetry wiring.

pub mod config;
pub mod model;
pub mod services;

pub use config::{ConfigError, WatcherConfig};
pub use model::{format_btc, WhaleAlert, SATS_PER_BTC};
pub use services::telemetry::{init_telemetry, TelemetryConfig, TelemetryError, TelemetryGuard};
