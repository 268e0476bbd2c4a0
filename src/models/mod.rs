// Energy figures returned by the query surface.
// Every value is derived from a transaction's byte size, never stored on its own.

use serde::{Deserialize, Serialize};

/// Kilowatt-hours attributed to each byte of transaction data.
pub const ENERGY_PER_BYTE_KWH: f64 = 4.56;

/// Convert a transaction size into its estimated energy cost.
pub fn energy_for_size(size_bytes: u64) -> f64 {
    size_bytes as f64 * ENERGY_PER_BYTE_KWH
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TransactionEnergy {
    pub transaction_hash: String,
    pub size_bytes: u64,
    pub energy_kwh: f64,
}

impl TransactionEnergy {
    pub fn new(transaction_hash: String, size_bytes: u64) -> Self {
        Self {
            transaction_hash,
            size_bytes,
            energy_kwh: energy_for_size(size_bytes),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DailyEnergy {
    /// UTC calendar date of the snapshot, `YYYY-MM-DD`
    pub date: String,
    pub total_energy_kwh: f64,
    pub transaction_count: u64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WalletEnergy {
    pub address: String,
    pub total_energy_kwh: f64,
    pub transaction_count: u64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn energy_is_size_times_rate() {
        assert_eq!(energy_for_size(250), 1140.0);
        assert_eq!(energy_for_size(0), 0.0);

        let tx = TransactionEnergy::new("abc".to_string(), 300);
        assert_eq!(tx.energy_kwh, 300.0 * ENERGY_PER_BYTE_KWH);
    }

    #[test]
    fn serializes_with_camel_case_fields() {
        let tx = TransactionEnergy::new("abc".to_string(), 200);
        let json = serde_json::to_value(&tx).unwrap();

        assert_eq!(json["transactionHash"], "abc");
        assert_eq!(json["sizeBytes"], 200);
        assert!(json.get("energyKwh").is_some());
    }
}
