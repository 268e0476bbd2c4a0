use bitcoin_energy_service::{config::Config, BlockchainInfoClient, EnergyService};
use std::{sync::Arc, time::Instant};
use tracing::{error, info, Level};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Setup tracing
    tracing_subscriber::fmt()
        .with_max_level(Level::DEBUG)
        .init();

    info!("Starting upstream integration test...");

    let config = Config::from_env();
    let client = Arc::new(BlockchainInfoClient::new(&config)?);
    let service = EnergyService::new(client, &config);

    // 1. Block energy, twice to exercise the cache
    let block_hash = std::env::args()
        .nth(1)
        .unwrap_or_else(|| "00000000000000000002a7c4c1e48d76c5a37902165a270156b7a8d72728a054".to_string());

    for attempt in 1..=2 {
        let started = Instant::now();
        match service.block_energy(&block_hash).await {
            Ok(transactions) => {
                let total: f64 = transactions.iter().map(|tx| tx.energy_kwh).sum();
                info!(
                    "✅ Attempt {}: block {} has {} transactions, {:.2} kWh ({:?})",
                    attempt,
                    block_hash,
                    transactions.len(),
                    total,
                    started.elapsed()
                );
            }
            Err(e) => error!("❌ Failed to compute block energy: {}", e),
        }
    }

    // 2. Daily series for the last two days
    match service.daily_energy(2).await {
        Ok(series) => {
            for day in series {
                info!(
                    "✅ {}: {} transactions, {:.2} kWh",
                    day.date, day.transaction_count, day.total_energy_kwh
                );
            }
        }
        Err(e) => error!("❌ Failed to compute daily energy: {}", e),
    }

    // 3. Wallet energy
    let address = std::env::args()
        .nth(2)
        .unwrap_or_else(|| "1A1zP1eP5QGefi2DMPTfTL5SLmv7DivfNa".to_string());

    match service.wallet_energy(&address).await {
        Ok(wallet) => info!(
            "✅ Wallet {}: {} transactions, {:.2} kWh",
            wallet.address, wallet.transaction_count, wallet.total_energy_kwh
        ),
        Err(e) => error!("❌ Failed to compute wallet energy: {}", e),
    }

    service.cache().sync().await;
    info!("Cached entries: {}", service.cache().entry_count());

    Ok(())
}
