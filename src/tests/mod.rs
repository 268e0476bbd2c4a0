//! Shared fixtures: an in-memory ledger that counts upstream calls


use crate::blockchain::{
    models::{BlockSummary, RawAddress, RawBlock, RawTransaction, TransactionRef},
    ClientError, LedgerPayload, LedgerSource,
};
use crate::cache::LedgerKey;
use async_trait::async_trait;
use std::collections::{HashMap, HashSet};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;
use std::time::Duration;

#[derive(Default)]
pub struct MockLedger {
    payloads: Mutex<HashMap<LedgerKey, LedgerPayload>>,
    failing: Mutex<HashSet<LedgerKey>>,
    delays: Mutex<HashMap<LedgerKey, Duration>>,
    calls: Mutex<HashMap<LedgerKey, usize>>,
    /// Blocks served for any day snapshot without its own entry
    default_snapshot: Mutex<Option<Vec<BlockSummary>>>,
    /// Day snapshots currently being served
    snapshots_in_flight: AtomicUsize,
    max_snapshots_in_flight: AtomicUsize,
}

impl MockLedger {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&self, key: LedgerKey, payload: LedgerPayload) {
        self.payloads.lock().unwrap().insert(key, payload);
    }

    pub fn with_block(&self, hash: &str, sizes: &[u64]) {
        let tx = sizes
            .iter()
            .enumerate()
            .map(|(i, size)| RawTransaction {
                hash: format!("{}-tx{}", hash, i),
                size: *size,
            })
            .collect();
        self.insert(
            LedgerKey::block(hash),
            LedgerPayload::Block(RawBlock {
                hash: hash.to_string(),
                time: None,
                height: None,
                tx,
            }),
        );
    }

    pub fn with_snapshot(&self, timestamp: i64, block_hashes: &[&str]) {
        let blocks = block_hashes
            .iter()
            .map(|hash| BlockSummary {
                hash: hash.to_string(),
                height: None,
                time: None,
            })
            .collect();
        self.insert(LedgerKey::day_snapshot(timestamp), LedgerPayload::Blocks(blocks));
    }

    /// Serve `block_hashes` for every day snapshot not set explicitly
    pub fn with_any_snapshot(&self, block_hashes: &[&str]) {
        let blocks = block_hashes
            .iter()
            .map(|hash| BlockSummary {
                hash: hash.to_string(),
                height: None,
                time: None,
            })
            .collect();
        *self.default_snapshot.lock().unwrap() = Some(blocks);
    }

    pub fn with_wallet(&self, address: &str, txs: Vec<TransactionRef>) {
        self.insert(
            LedgerKey::wallet(address),
            LedgerPayload::Address(RawAddress {
                address: address.to_string(),
                n_tx: Some(txs.len() as u64),
                txs,
            }),
        );
    }

    pub fn with_transaction(&self, hash: &str, size: u64) {
        self.insert(
            LedgerKey::transaction(hash),
            LedgerPayload::Transaction(RawTransaction {
                hash: hash.to_string(),
                size,
            }),
        );
    }

    pub fn fail(&self, key: LedgerKey) {
        self.failing.lock().unwrap().insert(key);
    }

    pub fn recover(&self, key: &LedgerKey) {
        self.failing.lock().unwrap().remove(key);
    }

    pub fn delay(&self, key: LedgerKey, delay: Duration) {
        self.delays.lock().unwrap().insert(key, delay);
    }

    pub fn calls(&self, key: &LedgerKey) -> usize {
        self.calls.lock().unwrap().get(key).copied().unwrap_or(0)
    }

    pub fn total_calls(&self) -> usize {
        self.calls.lock().unwrap().values().sum()
    }

    pub fn max_snapshots_in_flight(&self) -> usize {
        self.max_snapshots_in_flight.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl LedgerSource for MockLedger {
    async fn fetch(&self, key: &LedgerKey) -> Result<LedgerPayload, ClientError> {
        *self.calls.lock().unwrap().entry(key.clone()).or_insert(0) += 1;

        let is_snapshot = matches!(key, LedgerKey::DaySnapshot(_));
        if is_snapshot {
            let now = self.snapshots_in_flight.fetch_add(1, Ordering::SeqCst) + 1;
            self.max_snapshots_in_flight.fetch_max(now, Ordering::SeqCst);
        }

        let delay = self.delays.lock().unwrap().get(key).copied();
        if let Some(delay) = delay {
            tokio::time::sleep(delay).await;
        } else {
            tokio::task::yield_now().await;
        }

        if is_snapshot {
            self.snapshots_in_flight.fetch_sub(1, Ordering::SeqCst);
        }

        if self.failing.lock().unwrap().contains(key) {
            return Err(ClientError::Status {
                status: 503,
                url: key.to_string(),
            });
        }

        let payload = self.payloads.lock().unwrap().get(key).cloned();
        let payload = payload.or_else(|| match key {
            LedgerKey::DaySnapshot(_) => self
                .default_snapshot
                .lock()
                .unwrap()
                .clone()
                .map(LedgerPayload::Blocks),
            _ => None,
        });

        payload.ok_or_else(|| ClientError::Status {
            status: 404,
            url: key.to_string(),
        })
    }
}
