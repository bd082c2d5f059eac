//! Environment-driven configuration shared by the watcher binary.

use std::env;
use std::time::Duration;

use thiserror::Error;

/// Default explorer base URL when `ESPLORA_BASE_URL` is unset.
pub const DEFAULT_ESPLORA_BASE_URL: &str = "https://blockstream.info/api";
/// Default alert threshold in whole coin units.
pub const DEFAULT_THRESHOLD_BTC: u64 = 1000;
/// Default sleep between polling cycles, in seconds.
pub const DEFAULT_POLL_INTERVAL_SECS: u64 = 30;

const SATS_PER_BTC: u64 = crate::model::SATS_PER_BTC;

/// Key configuration derived from `.env`/process variables so the watcher
/// boots with documented defaults and only needs overrides for non-standard
/// deployments.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WatcherConfig {
    esplora_base_url: String,
    threshold_btc: u64,
    poll_interval_secs: u64,
    start_height: Option<u64>,
}

impl WatcherConfig {
    /// Loads configuration by hydrating `.env` (if present) and reading the
    /// optional process variables. Malformed entries surface as `ConfigError`
    /// so the binary can respond gracefully instead of booting with a bogus
    /// threshold.
    pub fn load_from_env() -> Result<Self, ConfigError> {
        hydrate_env_file()?;

        let esplora_base_url = get_optional_var("ESPLORA_BASE_URL")
            .unwrap_or_else(|| DEFAULT_ESPLORA_BASE_URL.to_string());
        let threshold_btc =
            parse_optional_var("WATCHER_THRESHOLD_BTC")?.unwrap_or(DEFAULT_THRESHOLD_BTC);
        let poll_interval_secs =
            parse_optional_var("WATCHER_POLL_INTERVAL_SECS")?.unwrap_or(DEFAULT_POLL_INTERVAL_SECS);
        let start_height = parse_optional_var("WATCHER_START_HEIGHT")?;

        Ok(Self {
            esplora_base_url,
            threshold_btc,
            poll_interval_secs,
            start_height,
        })
    }

    pub fn esplora_base_url(&self) -> &str {
        &self.esplora_base_url
    }

    /// Alert threshold in whole coin units; transactions must strictly exceed
    /// this to qualify.
    pub fn threshold_btc(&self) -> u64 {
        self.threshold_btc
    }

    /// Alert threshold converted to the smallest currency unit, so the loop
    /// can compare integer amounts without floating point.
    pub fn threshold_sats(&self) -> u64 {
        self.threshold_btc * SATS_PER_BTC
    }

    pub fn poll_interval(&self) -> Duration {
        Duration::from_secs(self.poll_interval_secs)
    }

    /// Explicit starting watermark; `None` means "start from the tip observed
    /// at boot".
    pub fn start_height(&self) -> Option<u64> {
        self.start_height
    }
}

fn get_optional_var(key: &'static str) -> Option<String> {
    env::var(key).ok().and_then(|value| {
        let trimmed = value.trim();
        if trimmed.is_empty() {
            None
        } else {
            Some(trimmed.to_string())
        }
    })
}

fn parse_optional_var(key: &'static str) -> Result<Option<u64>, ConfigError> {
    get_optional_var(key)
        .map(|value| {
            value
                .parse()
                .map_err(|source| ConfigError::InvalidNumber { key, source })
        })
        .transpose()
}

pub fn hydrate_env_file() -> Result<(), ConfigError> {
    if env::var_os("WHALE_WATCH_SKIP_DOTENV").is_some() {
        return Ok(());
    }
    match dotenvy::dotenv() {
        Ok(_) => {}
        Err(dotenvy::Error::Io(err)) if err.kind() == std::io::ErrorKind::NotFound => {}
        Err(err) => return Err(ConfigError::Dotenv { source: err }),
    }

    Ok(())
}

/// Errors emitted when `.env` hydration or environment parsing fails.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid integer in `{key}`: {source}")]
    InvalidNumber {
        key: &'static str,
        #[source]
        source: std::num::ParseIntError,
    },
    #[error("failed to load .env file: {source}")]
    Dotenv {
        #[from]
        source: dotenvy::Error,
    },
}
