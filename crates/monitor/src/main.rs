//! Watcher binary that tails an Esplora-style explorer for whale
//! transactions.

mod esplora;
mod pipeline;
mod worker;

use std::io;

use tracing::info;
use whale_watch_domain::config::WatcherConfig;
use whale_watch_domain::services::telemetry::{init_telemetry, TelemetryConfig};

use esplora::EsploraClient;
use worker::{run_monitor, MonitorError};

#[tokio::main]
async fn main() -> io::Result<()> {
    if let Err(err) = bootstrap().await {
        eprintln!("[watcher] bootstrap failed: {err}");
        return Err(io::Error::other(err.to_string()));
    }

    Ok(())
}

async fn bootstrap() -> Result<(), MonitorError> {
    let config = WatcherConfig::load_from_env()?;
    let telemetry_config = TelemetryConfig::from_env("WATCHER");
    let _telemetry = init_telemetry(&telemetry_config)?;
    let source = EsploraClient::new(config.esplora_base_url());

    tokio::select! {
        result = run_monitor(&config, &source) => result,
        _ = tokio::signal::ctrl_c() => {
            info!("interrupted, whale watcher shutting down");
            Ok(())
        }
    }
}
