use async_trait::async_trait;

use crate::worker::MonitorError;

mod types;

pub use types::{Transaction, TxOut};

/// Read-only view of the explorer the watcher loop needs. Kept as a trait so
/// tests can drive the loop with canned blocks.
#[async_trait]
pub trait BlockSource: Send + Sync {
    /// Height of the most recently mined block known to the explorer.
    async fn tip_height(&self) -> Result<u64, MonitorError>;
    /// Canonical block hash for the given height.
    async fn block_hash(&self, height: u64) -> Result<String, MonitorError>;
    /// All transaction ids in the block, in whatever order the explorer
    /// returns them.
    async fn block_txids(&self, hash: &str) -> Result<Vec<String>, MonitorError>;
    /// Full transaction detail.
    async fn transaction(&self, txid: &str) -> Result<Transaction, MonitorError>;
}

/// `BlockSource` over an Esplora-style REST API (e.g. blockstream.info).
pub struct EsploraClient {
    http: reqwest::Client,
    base_url: String,
}

impl EsploraClient {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            http: reqwest::Client::new(),
            base_url: base_url.into().trim_end_matches('/').to_string(),
        }
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path)
    }

    async fn get_text(&self, path: &str) -> Result<String, MonitorError> {
        let response = self
            .http
            .get(self.endpoint(path))
            .send()
            .await?
            .error_for_status()?;
        Ok(response.text().await?)
    }
}

#[async_trait]
impl BlockSource for EsploraClient {
    async fn tip_height(&self) -> Result<u64, MonitorError> {
        let body = self.get_text("blocks/tip/height").await?;
        body.trim()
            .parse()
            .map_err(|err| MonitorError::Decode(format!("tip height `{body}`: {err}")))
    }

    async fn block_hash(&self, height: u64) -> Result<String, MonitorError> {
        let body = self.get_text(&format!("block-height/{height}")).await?;
        Ok(body.trim().to_string())
    }

    async fn block_txids(&self, hash: &str) -> Result<Vec<String>, MonitorError> {
        let response = self
            .http
            .get(self.endpoint(&format!("block/{hash}/txids")))
            .send()
            .await?
            .error_for_status()?;
        Ok(response.json().await?)
    }

    async fn transaction(&self, txid: &str) -> Result<Transaction, MonitorError> {
        let response = self
            .http
            .get(self.endpoint(&format!("tx/{txid}")))
            .send()
            .await?
            .error_for_status()?;
        Ok(response.json().await?)
    }
}
