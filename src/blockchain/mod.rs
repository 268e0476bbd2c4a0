pub mod client;
pub mod models;

// Re-exports for convenience
pub use client::{BlockchainInfoClient, ClientError, LedgerSource};
pub use models::LedgerPayload;
