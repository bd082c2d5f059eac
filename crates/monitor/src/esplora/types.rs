use serde::Deserialize;

/// Transaction detail as returned by `/tx/{txid}`. Only the outputs are
/// consumed; every other field the explorer sends is ignored.
#[derive(Debug, Clone, Deserialize)]
pub struct Transaction {
    #[serde(default)]
    pub vout: Vec<TxOut>,
}

/// One transaction output with its value in smallest currency units.
#[derive(Debug, Clone, Deserialize)]
pub struct TxOut {
    pub value: u64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decodes_transaction_ignoring_extra_fields() {
        let body = r#"{
            "txid": "f4184fc596403b9d638783cf57adfe4c75c605f6356fbc91338530e9831e9e16",
            "version": 1,
            "locktime": 0,
            "vin": [{"txid": "0000", "vout": 0}],
            "vout": [
                {"scriptpubkey": "76a914", "value": 1000000000},
                {"scriptpubkey": "76a915", "value": 4000000000}
            ],
            "fee": 0
        }"#;

        let tx: Transaction = serde_json::from_str(body).expect("decodes");
        assert_eq!(tx.vout.len(), 2);
        assert_eq!(tx.vout[0].value, 1_000_000_000);
        assert_eq!(tx.vout[1].value, 4_000_000_000);
    }

    #[test]
    fn missing_vout_decodes_as_empty() {
        let tx: Transaction = serde_json::from_str("{}").expect("decodes");
        assert!(tx.vout.is_empty());
    }
}
