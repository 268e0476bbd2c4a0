pub mod api;
pub mod blockchain;
pub mod cache;
pub mod config;
pub mod models;
pub mod service;
pub mod validation;
pub mod state;

#[cfg(test)]
pub mod tests;

// Re-export specific items for convenience
pub use api::error::ApiError;
pub use api::response::ApiResponse;
pub use api::route::{create_router, DailyQuery};
pub use blockchain::{BlockchainInfoClient, ClientError, LedgerSource};
pub use cache::{LedgerCache, LedgerKey, UpstreamFetchError};
pub use models::{DailyEnergy, TransactionEnergy, WalletEnergy, ENERGY_PER_BYTE_KWH};
pub use service::EnergyService;
pub use validation::{validate_bitcoin_address, validate_block_hash, validate_days};
