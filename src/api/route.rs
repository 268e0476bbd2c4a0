use crate::{
    api::{error::ApiError, response::ApiResponse},
    models::{DailyEnergy, TransactionEnergy, WalletEnergy},
    state::AppState,
    validation::{validate_bitcoin_address, validate_block_hash, validate_days},
};
use axum::{
    extract::{Path, Query, State},
    routing::get,
    Router,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::info;

// GET /energy/daily query parameters
#[derive(Deserialize)]
pub struct DailyQuery {
    days: Option<String>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HealthStatus {
    status: &'static str,
    cached_entries: u64,
}

// Create router with all routes
pub fn create_router(app_state: Arc<AppState>) -> Router {
    Router::new()
        .route("/energy/block/{block_hash}", get(block_energy))
        .route("/energy/daily", get(daily_energy))
        .route("/energy/wallet/{address}", get(wallet_energy))
        .route("/health", get(health))
        .with_state(app_state)
}

// GET /energy/block/{block_hash} handler
async fn block_energy(
    State(state): State<Arc<AppState>>,
    Path(block_hash): Path<String>,
) -> Result<ApiResponse<Vec<TransactionEnergy>>, ApiError> {
    validate_block_hash(&block_hash)?;
    info!("Processing block energy request for {}", block_hash);

    let transactions = state.service.block_energy(&block_hash).await?;
    Ok(ApiResponse::new(transactions))
}

// GET /energy/daily handler
async fn daily_energy(
    State(state): State<Arc<AppState>>,
    Query(params): Query<DailyQuery>,
) -> Result<ApiResponse<Vec<DailyEnergy>>, ApiError> {
    let days = validate_days(params.days.as_deref().unwrap_or(""), state.config.max_days)?;
    info!("Processing daily energy request for {} days", days);

    let series = state.service.daily_energy(days).await?;
    Ok(ApiResponse::new(series))
}

// GET /energy/wallet/{address} handler
async fn wallet_energy(
    State(state): State<Arc<AppState>>,
    Path(address): Path<String>,
) -> Result<ApiResponse<WalletEnergy>, ApiError> {
    validate_bitcoin_address(&address)?;
    info!("Processing wallet energy request for {}", address);

    let wallet = state.service.wallet_energy(&address).await?;
    Ok(ApiResponse::new(wallet))
}

async fn health(State(state): State<Arc<AppState>>) -> ApiResponse<HealthStatus> {
    ApiResponse::new(HealthStatus {
        status: "ok",
        cached_entries: state.service.cache().entry_count(),
    })
}
