//! Data structures and helpers shared across the watcher modules.

use std::fmt;

/// Smallest currency units per whole coin.
pub const SATS_PER_BTC: u64 = 100_000_000;

/// Renders an amount in smallest units as whole coins with two decimal
/// places, rounding to the nearest hundredth. Display only; comparisons stay
/// in smallest units.
pub fn format_btc(sats: u64) -> String {
    let total_cents = (sats as u128 * 100 + (SATS_PER_BTC as u128) / 2) / SATS_PER_BTC as u128;
    format!("{}.{:02}", total_cents / 100, total_cents % 100)
}

/// One transaction whose summed outputs exceeded the configured threshold.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WhaleAlert {
    pub txid: String,
    pub total_sats: u64,
}

impl WhaleAlert {
    pub fn btc_display(&self) -> String {
        format_btc(self.total_sats)
    }
}

impl fmt::Display for WhaleAlert {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} BTC (txid: {})", self.btc_display(), self.txid)
    }
}
