use crate::blockchain::models::{
    BlockListResponse, LedgerPayload, RawAddress, RawBlock, RawTransaction,
};
use crate::cache::LedgerKey;
use crate::config::Config;
use async_trait::async_trait;
use governor::{
    clock::DefaultClock,
    state::{InMemoryState, NotKeyed},
    Quota, RateLimiter,
};
use serde::de::DeserializeOwned;
use std::num::NonZeroU32;
use std::time::Instant;
use thiserror::Error;
use tracing::{debug, info, warn};

#[derive(Error, Debug)]
pub enum ClientError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Upstream returned {status} for {url}")]
    Status { status: u16, url: String },

    #[error("Invalid response body from {url}: {source}")]
    Decode {
        url: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("Unexpected {found} payload for {key}")]
    UnexpectedPayload { key: LedgerKey, found: &'static str },
}

/// Read-only access to ledger data, one request per key
#[async_trait]
pub trait LedgerSource: Send + Sync {
    async fn fetch(&self, key: &LedgerKey) -> Result<LedgerPayload, ClientError>;
}

type DirectLimiter = RateLimiter<NotKeyed, InMemoryState, DefaultClock>;

/// Client for the blockchain.info data API
pub struct BlockchainInfoClient {
    http: reqwest::Client,
    base_url: String,
    limiter: Option<DirectLimiter>,
}

impl BlockchainInfoClient {
    pub fn new(config: &Config) -> Result<Self, ClientError> {
        let http = reqwest::Client::builder()
            .timeout(config.upstream_timeout)
            .build()?;

        let limiter = config
            .upstream_rate_limit
            .and_then(NonZeroU32::new)
            .map(|per_second| RateLimiter::direct(Quota::per_second(per_second)));

        info!(
            "Initializing blockchain client with endpoint: {}, timeout: {:?}, rate limit: {:?}",
            config.blockchain_api_url, config.upstream_timeout, config.upstream_rate_limit
        );

        Ok(Self {
            http,
            base_url: config.blockchain_api_url.trim_end_matches('/').to_string(),
            limiter,
        })
    }

    /// Resolve a key to the upstream URL serving it
    pub fn url_for(&self, key: &LedgerKey) -> String {
        match key {
            LedgerKey::BlockHash(hash) => format!("{}/rawblock/{}", self.base_url, hash),
            LedgerKey::TransactionHash(hash) => format!("{}/rawtx/{}", self.base_url, hash),
            LedgerKey::WalletAddress(address) => format!("{}/rawaddr/{}", self.base_url, address),
            LedgerKey::DaySnapshot(timestamp) => {
                format!("{}/blocks/{}?format=json", self.base_url, timestamp)
            }
        }
    }

    async fn get_json<T: DeserializeOwned>(&self, url: &str) -> Result<T, ClientError> {
        if let Some(limiter) = &self.limiter {
            limiter.until_ready().await;
        }

        let started = Instant::now();
        let response = self.http.get(url).send().await.map_err(|e| {
            warn!("Request to {} failed: {}", url, e);
            ClientError::Http(e)
        })?;

        let status = response.status();
        if !status.is_success() {
            warn!("Upstream returned {} for {}", status, url);
            return Err(ClientError::Status {
                status: status.as_u16(),
                url: url.to_string(),
            });
        }

        let body = response.bytes().await?;
        debug!("Fetched {} bytes in {:?}: {}", body.len(), started.elapsed(), url);

        serde_json::from_slice(&body).map_err(|source| ClientError::Decode {
            url: url.to_string(),
            source,
        })
    }
}

#[async_trait]
impl LedgerSource for BlockchainInfoClient {
    async fn fetch(&self, key: &LedgerKey) -> Result<LedgerPayload, ClientError> {
        let url = self.url_for(key);

        let payload = match key {
            LedgerKey::BlockHash(_) => LedgerPayload::Block(self.get_json::<RawBlock>(&url).await?),
            LedgerKey::TransactionHash(_) => {
                LedgerPayload::Transaction(self.get_json::<RawTransaction>(&url).await?)
            }
            LedgerKey::WalletAddress(_) => {
                LedgerPayload::Address(self.get_json::<RawAddress>(&url).await?)
            }
            LedgerKey::DaySnapshot(_) => {
                let blocks = self.get_json::<BlockListResponse>(&url).await?;
                LedgerPayload::Blocks(blocks.into_blocks())
            }
        };

        Ok(payload)
    }
}
