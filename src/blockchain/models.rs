use crate::cache::LedgerKey;
use serde::{Deserialize, Serialize};

/// Transaction as listed on a block, an address summary or `rawtx`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RawTransaction {
    pub hash: String,
    pub size: u64,
}

/// Transaction reference on an address summary. The size is usually present
/// but the engine falls back to a `rawtx` lookup when it is not.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TransactionRef {
    pub hash: String,
    #[serde(default)]
    pub size: Option<u64>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RawBlock {
    pub hash: String,
    #[serde(default)]
    pub time: Option<i64>,
    #[serde(default)]
    pub height: Option<u64>,
    #[serde(default)]
    pub tx: Vec<RawTransaction>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BlockSummary {
    pub hash: String,
    #[serde(default)]
    pub height: Option<u64>,
    #[serde(default)]
    pub time: Option<i64>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RawAddress {
    pub address: String,
    #[serde(default)]
    pub n_tx: Option<u64>,
    #[serde(default)]
    pub txs: Vec<TransactionRef>,
}

/// The `blocks` endpoint has answered both as a bare list and wrapped in an
/// object over time.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub(crate) enum BlockListResponse {
    List(Vec<BlockSummary>),
    Wrapped { blocks: Vec<BlockSummary> },
}

impl BlockListResponse {
    pub(crate) fn into_blocks(self) -> Vec<BlockSummary> {
        match self {
            Self::List(blocks) => blocks,
            Self::Wrapped { blocks } => blocks,
        }
    }
}

/// Decoded upstream response, one variant per lookup shape
#[derive(Debug, Clone, PartialEq)]
pub enum LedgerPayload {
    Block(RawBlock),
    Transaction(RawTransaction),
    Address(RawAddress),
    Blocks(Vec<BlockSummary>),
}

impl LedgerPayload {
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Block(_) => "block",
            Self::Transaction(_) => "transaction",
            Self::Address(_) => "address",
            Self::Blocks(_) => "blocks",
        }
    }

    /// Whether this payload is the shape a lookup for `key` returns
    pub fn matches(&self, key: &LedgerKey) -> bool {
        matches!(
            (key, self),
            (LedgerKey::BlockHash(_), Self::Block(_))
                | (LedgerKey::TransactionHash(_), Self::Transaction(_))
                | (LedgerKey::WalletAddress(_), Self::Address(_))
                | (LedgerKey::DaySnapshot(_), Self::Blocks(_))
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn block_list_accepts_both_shapes() {
        let bare: BlockListResponse =
            serde_json::from_value(json!([{ "hash": "a", "height": 1, "time": 10 }])).unwrap();
        let wrapped: BlockListResponse =
            serde_json::from_value(json!({ "blocks": [{ "hash": "a" }, { "hash": "b" }] })).unwrap();

        assert_eq!(bare.into_blocks().len(), 1);
        let blocks = wrapped.into_blocks();
        assert_eq!(blocks[1].hash, "b");
        assert_eq!(blocks[1].height, None);
    }

    #[test]
    fn address_transactions_may_omit_size() {
        let address: RawAddress = serde_json::from_value(json!({
            "address": "1Abc",
            "n_tx": 2,
            "total_received": 5,
            "txs": [{ "hash": "t1", "size": 225 }, { "hash": "t2" }]
        }))
        .unwrap();

        assert_eq!(address.txs[0].size, Some(225));
        assert_eq!(address.txs[1].size, None);
    }

    #[test]
    fn payload_shape_matches_key() {
        let blocks = LedgerPayload::Blocks(Vec::new());

        assert!(blocks.matches(&LedgerKey::day_snapshot(1)));
        assert!(!blocks.matches(&LedgerKey::block("b")));
        assert!(!blocks.matches(&LedgerKey::wallet("1Abc")));
    }
}
