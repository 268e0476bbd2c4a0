use crate::config::Config;
use crate::service::EnergyService;
use std::sync::Arc;

pub struct AppState {
    pub config: Config,
    pub service: Arc<EnergyService>,
}
