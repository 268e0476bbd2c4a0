//! Ledger lookup keys

use std::fmt;

/// Identity of one cacheable upstream lookup
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum LedgerKey {
    /// Full block, including its transaction list
    BlockHash(String),
    /// A single transaction
    TransactionHash(String),
    /// Address summary with its transaction list
    WalletAddress(String),
    /// Blocks reported for a millisecond timestamp
    DaySnapshot(i64),
}

impl LedgerKey {
    pub fn block(hash: &str) -> Self {
        Self::BlockHash(hash.to_string())
    }

    pub fn transaction(hash: &str) -> Self {
        Self::TransactionHash(hash.to_string())
    }

    pub fn wallet(address: &str) -> Self {
        Self::WalletAddress(address.to_string())
    }

    pub fn day_snapshot(timestamp_ms: i64) -> Self {
        Self::DaySnapshot(timestamp_ms)
    }
}

impl fmt::Display for LedgerKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::BlockHash(hash) => write!(f, "block:{}", hash),
            Self::TransactionHash(hash) => write!(f, "tx:{}", hash),
            Self::WalletAddress(address) => write!(f, "addr:{}", address),
            Self::DaySnapshot(timestamp) => write!(f, "day:{}", timestamp),
        }
    }
}
