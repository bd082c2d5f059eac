use metrics::counter;
use tracing::info;

use whale_watch_domain::model::WhaleAlert;

use crate::esplora::Transaction;

/// Sums every output value of the transaction, in smallest currency units.
/// Saturates on overflow so hostile output values cannot wrap the total back
/// under the threshold.
pub fn total_output_sats(tx: &Transaction) -> u64 {
    tx.vout
        .iter()
        .fold(0u64, |total, out| total.saturating_add(out.value))
}

/// Checks a single transaction against the threshold (strict `>`, compared in
/// smallest units) and emits the alert line on a hit. Depends only on the
/// supplied data, so re-processing the same block yields the same alerts.
pub fn process_transaction(txid: &str, tx: &Transaction, threshold_sats: u64) -> Option<WhaleAlert> {
    let total_sats = total_output_sats(tx);
    if total_sats <= threshold_sats {
        return None;
    }

    let alert = WhaleAlert {
        txid: txid.to_owned(),
        total_sats,
    };
    info!(
        txid,
        value_btc = %alert.btc_display(),
        "whale transaction detected"
    );
    counter!("watcher_alerts_total").increment(1);

    Some(alert)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::esplora::TxOut;

    const THRESHOLD_SATS: u64 = 100_000_000_000; // 1000 whole coins

    fn tx_with_outputs(values: &[u64]) -> Transaction {
        Transaction {
            vout: values.iter().map(|&value| TxOut { value }).collect(),
        }
    }

    #[test]
    fn sums_all_outputs() {
        let tx = tx_with_outputs(&[1_000, 2_000, 3_000]);
        assert_eq!(total_output_sats(&tx), 6_000);
    }

    #[test]
    fn empty_transaction_sums_to_zero() {
        assert_eq!(total_output_sats(&tx_with_outputs(&[])), 0);
    }

    #[test]
    fn output_sum_saturates_instead_of_wrapping() {
        let tx = tx_with_outputs(&[u64::MAX, 200_000_000_000]);
        assert_eq!(total_output_sats(&tx), u64::MAX);
        // A wrapped total would land under the threshold and drop the alert.
        assert!(process_transaction("tx1", &tx, THRESHOLD_SATS).is_some());
    }

    #[test]
    fn exact_threshold_does_not_alert() {
        // 1000.00 whole coins spread over two outputs.
        let tx = tx_with_outputs(&[60_000_000_000, 40_000_000_000]);
        assert!(process_transaction("tx1", &tx, THRESHOLD_SATS).is_none());
    }

    #[test]
    fn one_sat_above_threshold_alerts() {
        let tx = tx_with_outputs(&[THRESHOLD_SATS, 1]);
        let alert = process_transaction("tx1", &tx, THRESHOLD_SATS).expect("alert");
        assert_eq!(alert.total_sats, THRESHOLD_SATS + 1);
    }

    #[test]
    fn hundredth_of_a_coin_above_threshold_alerts() {
        // 1000.01 whole coins against a 1000 threshold.
        let tx = tx_with_outputs(&[100_001_000_000]);
        let alert = process_transaction("tx1", &tx, THRESHOLD_SATS).expect("alert");
        assert_eq!(alert.btc_display(), "1000.01");
    }

    #[test]
    fn alert_reports_two_decimal_value_and_txid() {
        let tx = tx_with_outputs(&[150_000_000_000]);
        let alert = process_transaction("whale-tx", &tx, THRESHOLD_SATS).expect("alert");
        assert_eq!(alert.to_string(), "1500.00 BTC (txid: whale-tx)");
    }

    #[test]
    fn reprocessing_yields_identical_alert() {
        let tx = tx_with_outputs(&[200_000_000_000]);
        let first = process_transaction("tx1", &tx, THRESHOLD_SATS);
        let second = process_transaction("tx1", &tx, THRESHOLD_SATS);
        assert_eq!(first, second);
    }
}
