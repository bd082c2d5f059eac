use metrics::{counter, gauge};
use thiserror::Error;
use tokio::time::sleep;
use tracing::{info, warn};

use whale_watch_domain::config::{ConfigError, WatcherConfig};
use whale_watch_domain::model::WhaleAlert;
use whale_watch_domain::services::telemetry::TelemetryError;

use crate::esplora::BlockSource;
use crate::pipeline::process_transaction;

#[derive(Debug, Error)]
pub enum MonitorError {
    #[error("config error: {0}")]
    Config(#[from] ConfigError),
    #[error("telemetry error: {0}")]
    Telemetry(#[from] TelemetryError),
    #[error("http error: {0}")]
    Http(String),
    #[error("malformed explorer response: {0}")]
    Decode(String),
}

impl From<reqwest::Error> for MonitorError {
    fn from(value: reqwest::Error) -> Self {
        if value.is_decode() {
            Self::Decode(value.to_string())
        } else {
            Self::Http(value.to_string())
        }
    }
}

/// Runs the watcher loop until the surrounding task is cancelled: fetch the
/// tip height, visit every height between the watermark and the tip exactly
/// once, sleep, repeat. Network failures are logged and retried on the next
/// cycle; the loop itself never terminates on error.
pub async fn run_monitor<S>(config: &WatcherConfig, source: &S) -> Result<(), MonitorError>
where
    S: BlockSource,
{
    let threshold_sats = config.threshold_sats();
    let mut last_checked = match config.start_height() {
        Some(height) => height,
        None => source.tip_height().await?,
    };

    info!(
        threshold_btc = config.threshold_btc(),
        last_checked, "whale watcher started"
    );

    loop {
        match source.tip_height().await {
            Ok(tip) => {
                counter!("watcher_tip_fetches_total", "result" => "ok").increment(1);
                if tip > last_checked {
                    last_checked = catch_up(source, last_checked, tip, threshold_sats).await;
                    gauge!("watcher_last_height").set(last_checked as f64);
                }
            }
            Err(err) => {
                counter!("watcher_tip_fetches_total", "result" => "error").increment(1);
                warn!(%err, "tip height fetch failed");
            }
        }
        sleep(config.poll_interval()).await;
    }
}

/// Visits heights `last_checked + 1 ..= tip` in ascending order, one height
/// fully processed before the next begins, and returns the new watermark.
///
/// A failing height is logged and skipped without advancing the watermark
/// past it, so the next cycle resumes from the failed height. Later heights
/// in the same cycle are still attempted.
pub async fn catch_up<S>(source: &S, last_checked: u64, tip: u64, threshold_sats: u64) -> u64
where
    S: BlockSource,
{
    let mut watermark = last_checked;
    let mut stalled = false;

    for height in last_checked + 1..=tip {
        match process_height(source, height, threshold_sats).await {
            Ok(_) => {
                counter!("watcher_heights_total", "result" => "ok").increment(1);
                if !stalled {
                    watermark = height;
                }
            }
            Err(err) => {
                counter!("watcher_heights_total", "result" => "error").increment(1);
                warn!(height, %err, "failed to process block");
                stalled = true;
            }
        }
    }

    watermark
}

/// Resolves a height to its block, then runs every transaction in the block
/// through the threshold pipeline. Any fetch or decode error propagates so
/// the caller can treat the whole height as failed.
pub async fn process_height<S>(
    source: &S,
    height: u64,
    threshold_sats: u64,
) -> Result<Vec<WhaleAlert>, MonitorError>
where
    S: BlockSource,
{
    let hash = source.block_hash(height).await?;
    let txids = source.block_txids(&hash).await?;
    info!(height, tx_count = txids.len(), "analyzing block");

    let mut alerts = Vec::new();
    for txid in &txids {
        let tx = source.transaction(txid).await?;
        if let Some(alert) = process_transaction(txid, &tx, threshold_sats) {
            alerts.push(alert);
        }
    }

    Ok(alerts)
}
