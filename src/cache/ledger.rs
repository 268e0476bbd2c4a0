//! Ledger cache implementation using Moka

use super::keys::LedgerKey;
use crate::blockchain::{ClientError, LedgerPayload, LedgerSource};
use moka::future::Cache;
use std::sync::Arc;
use thiserror::Error;
use tracing::{debug, warn};

/// An upstream lookup failed. Nothing was cached for `key`.
#[derive(Error, Debug, Clone)]
#[error("Failed to fetch {key}: {cause}")]
pub struct UpstreamFetchError {
    pub key: LedgerKey,
    #[source]
    pub cause: Arc<ClientError>,
}

/// Caches decoded ledger payloads in front of a [`LedgerSource`].
///
/// Concurrent misses on the same key share a single upstream request, and
/// failed requests leave no entry behind, so the next caller retries.
#[derive(Clone)]
pub struct LedgerCache {
    source: Arc<dyn LedgerSource>,
    cache: Cache<LedgerKey, Arc<LedgerPayload>>,
}

impl LedgerCache {
    /// Create a new ledger cache holding at most `capacity` payloads
    pub fn new(source: Arc<dyn LedgerSource>, capacity: u64) -> Self {
        let cache = Cache::builder().max_capacity(capacity).build();

        Self { source, cache }
    }

    /// Return the payload for `key`, fetching it upstream on a miss
    pub async fn fetch(&self, key: LedgerKey) -> Result<Arc<LedgerPayload>, UpstreamFetchError> {
        let source = self.source.clone();
        let lookup = key.clone();

        let entry = self
            .cache
            .entry(key.clone())
            .or_try_insert_with(async move {
                // A payload of the wrong shape is a failed fetch and is never stored
                let payload = source.fetch(&lookup).await?;
                if !payload.matches(&lookup) {
                    return Err(ClientError::UnexpectedPayload {
                        found: payload.kind(),
                        key: lookup,
                    });
                }
                Ok::<_, ClientError>(Arc::new(payload))
            })
            .await
            .map_err(|cause| {
                warn!("Upstream fetch failed for {}: {}", key, cause);
                UpstreamFetchError {
                    key: key.clone(),
                    cause,
                }
            })?;

        if entry.is_fresh() {
            debug!("Cache miss for key: {}", key);
        } else {
            debug!("Cache hit for key: {}", key);
        }

        Ok(entry.into_value())
    }

    /// Cached payload for `key`, without going upstream
    #[cfg(test)]
    pub async fn get(&self, key: &LedgerKey) -> Option<Arc<LedgerPayload>> {
        self.cache.get(key).await
    }

    /// Approximate number of cached payloads
    pub fn entry_count(&self) -> u64 {
        self.cache.entry_count()
    }

    /// Flush pending cache maintenance so counts are exact
    pub async fn sync(&self) {
        self.cache.run_pending_tasks().await;
    }
}

impl UpstreamFetchError {
    /// A payload of the wrong shape came back for `key`
    pub(crate) fn unexpected(key: LedgerKey, payload: &LedgerPayload) -> Self {
        let cause = ClientError::UnexpectedPayload {
            key: key.clone(),
            found: payload.kind(),
        };
        Self {
            key,
            cause: Arc::new(cause),
        }
    }
}
