//! Energy aggregation over cached ledger lookups
//!
//! Every figure is derived from transaction byte sizes reported upstream.
//! Only the raw ledger payloads are cached; aggregates are recomputed on
//! every call.

use crate::blockchain::{models::BlockSummary, LedgerPayload, LedgerSource};
use crate::cache::{LedgerCache, LedgerKey, UpstreamFetchError};
use crate::config::Config;
use crate::models::{energy_for_size, DailyEnergy, TransactionEnergy, WalletEnergy};
use chrono::{DateTime, Utc};
use futures::future::try_join_all;
use futures::{StreamExt, TryStreamExt};
use std::sync::Arc;
use tokio::sync::Semaphore;
use tracing::{debug, info, warn};

/// Fixed length of one step of the daily series
pub const DAY_MILLIS: i64 = 24 * 60 * 60 * 1000;

pub struct EnergyService {
    cache: LedgerCache,
    daily_concurrency: usize,
    block_concurrency: usize,
}

impl EnergyService {
    pub fn new(source: Arc<dyn LedgerSource>, config: &Config) -> Self {
        Self {
            cache: crate::cache::init_cache(config, source),
            daily_concurrency: config.daily_concurrency.max(1),
            block_concurrency: config.block_concurrency.max(1),
        }
    }

    pub fn cache(&self) -> &LedgerCache {
        &self.cache
    }

    /// Energy of every transaction in a block, in upstream order
    pub async fn block_energy(
        &self,
        block_hash: &str,
    ) -> Result<Vec<TransactionEnergy>, UpstreamFetchError> {
        let key = LedgerKey::block(block_hash);
        let payload = self.cache.fetch(key.clone()).await?;

        let block = match payload.as_ref() {
            LedgerPayload::Block(block) => block,
            other => return Err(UpstreamFetchError::unexpected(key, other)),
        };

        Ok(block
            .tx
            .iter()
            .map(|tx| TransactionEnergy::new(tx.hash.clone(), tx.size))
            .collect())
    }

    /// One entry per day for the last `days` days, most recent first
    pub async fn daily_energy(&self, days: u32) -> Result<Vec<DailyEnergy>, UpstreamFetchError> {
        self.daily_energy_at(Utc::now().timestamp_millis(), days)
            .await
    }

    /// Daily series anchored at `now_ms` instead of the wall clock
    pub async fn daily_energy_at(
        &self,
        now_ms: i64,
        days: u32,
    ) -> Result<Vec<DailyEnergy>, UpstreamFetchError> {
        info!("Computing daily energy for {} days", days);
        let slots = Semaphore::new(self.daily_concurrency);

        // try_join_all keeps results in input order, whatever order they finish in
        let series = try_join_all((0..days).map(|i| {
            let timestamp = now_ms - i64::from(i) * DAY_MILLIS;
            let slots = &slots;
            async move {
                // Permit drops on every exit path, failures included.
                // The semaphore is local and never closed.
                let _permit = slots.acquire().await.ok();
                self.day_energy(timestamp).await
            }
        }))
        .await?;

        Ok(series)
    }

    async fn day_energy(&self, timestamp: i64) -> Result<DailyEnergy, UpstreamFetchError> {
        let date = snapshot_date(timestamp).unwrap_or_else(|| {
            warn!("Timestamp {} is outside the calendar range, labelling by millis", timestamp);
            timestamp.to_string()
        });
        debug!("Fetching blocks for {} ({})", date, timestamp);

        let key = LedgerKey::day_snapshot(timestamp);
        let payload = self.cache.fetch(key.clone()).await?;
        let blocks: &[BlockSummary] = match payload.as_ref() {
            LedgerPayload::Blocks(blocks) => blocks,
            other => return Err(UpstreamFetchError::unexpected(key, other)),
        };

        // Owned hashes keep the fan-out future Send behind the router
        let hashes: Vec<String> = blocks.iter().map(|block| block.hash.clone()).collect();
        let per_block: Vec<Vec<TransactionEnergy>> = futures::stream::iter(hashes)
            .map(|hash| async move { self.block_energy(&hash).await })
            .buffered(self.block_concurrency)
            .try_collect()
            .await?;

        let mut total_energy_kwh = 0.0;
        let mut transaction_count = 0;
        for tx in per_block.iter().flatten() {
            total_energy_kwh += tx.energy_kwh;
            transaction_count += 1;
        }

        debug!(
            "{}: {} blocks, {} transactions, {} kWh",
            date,
            blocks.len(),
            transaction_count,
            total_energy_kwh
        );

        Ok(DailyEnergy {
            date,
            total_energy_kwh,
            transaction_count,
        })
    }

    /// Total energy of every transaction listed for an address
    pub async fn wallet_energy(&self, address: &str) -> Result<WalletEnergy, UpstreamFetchError> {
        let key = LedgerKey::wallet(address);
        let payload = self.cache.fetch(key.clone()).await?;
        let wallet = match payload.as_ref() {
            LedgerPayload::Address(wallet) => wallet,
            other => return Err(UpstreamFetchError::unexpected(key, other)),
        };

        let mut total_energy_kwh = 0.0;
        let mut transaction_count = 0;
        for tx in &wallet.txs {
            let size = match tx.size {
                Some(size) => size,
                None => self.transaction_size(&tx.hash).await?,
            };
            total_energy_kwh += energy_for_size(size);
            transaction_count += 1;
        }

        Ok(WalletEnergy {
            address: address.to_string(),
            total_energy_kwh,
            transaction_count,
        })
    }

    async fn transaction_size(&self, hash: &str) -> Result<u64, UpstreamFetchError> {
        let key = LedgerKey::transaction(hash);
        let payload = self.cache.fetch(key.clone()).await?;
        match payload.as_ref() {
            LedgerPayload::Transaction(tx) => Ok(tx.size),
            other => Err(UpstreamFetchError::unexpected(key, other)),
        }
    }
}

/// UTC calendar date of a millisecond timestamp, `YYYY-MM-DD`.
/// `None` when the timestamp has no calendar representation.
pub fn snapshot_date(timestamp_ms: i64) -> Option<String> {
    DateTime::<Utc>::from_timestamp_millis(timestamp_ms)
        .map(|dt| dt.format("%Y-%m-%d").to_string())
}
