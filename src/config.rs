// Configuration for:
// - Server listening address/port
// - Upstream ledger API endpoint, timeout and rate limit
// - Ledger cache capacity
// - Fan-out limits for the daily series

use dotenv::dotenv;
use std::env;
use std::str::FromStr;
use std::time::Duration;

#[derive(Debug, Clone)]
pub struct Config {
    pub server_host: String,
    pub server_port: u16,
    pub blockchain_api_url: String,
    pub upstream_timeout: Duration,
    pub upstream_rate_limit: Option<u32>,
    pub cache_max_capacity: u64,
    /// Day snapshots processed at the same time
    pub daily_concurrency: usize,
    /// Block fetches in flight within one day
    pub block_concurrency: usize,
    pub max_days: u32,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            server_host: "127.0.0.1".to_string(),
            server_port: 8080,
            blockchain_api_url: "https://blockchain.info".to_string(),
            upstream_timeout: Duration::from_secs(10),
            upstream_rate_limit: None,
            cache_max_capacity: 10_000,
            daily_concurrency: 5,
            block_concurrency: 4,
            max_days: 365,
        }
    }
}

fn env_or<T: FromStr>(name: &str, default: T) -> T {
    env::var(name)
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(default)
}

impl Config {
    pub fn from_env() -> Self {
        dotenv().ok();
        let defaults = Self::default();

        let server_host = env::var("SERVER_HOST").unwrap_or(defaults.server_host);
        let server_port = env_or("SERVER_PORT", defaults.server_port);
        let blockchain_api_url =
            env::var("BLOCKCHAIN_API_URL").unwrap_or(defaults.blockchain_api_url);
        let upstream_timeout = env::var("UPSTREAM_TIMEOUT_SECS")
            .ok()
            .and_then(|v| v.parse().ok())
            .map(Duration::from_secs)
            .unwrap_or(defaults.upstream_timeout);
        let upstream_rate_limit = env::var("UPSTREAM_RATE_LIMIT")
            .map(|v| v.parse().ok())
            .unwrap_or(None);
        let cache_max_capacity = env_or("CACHE_MAX_CAPACITY", defaults.cache_max_capacity);
        let daily_concurrency = env_or("DAILY_CONCURRENCY", defaults.daily_concurrency).max(1);
        let block_concurrency = env_or("BLOCK_CONCURRENCY", defaults.block_concurrency).max(1);
        let max_days = env_or("MAX_DAYS", defaults.max_days);

        Self {
            server_host,
            server_port,
            blockchain_api_url,
            upstream_timeout,
            upstream_rate_limit,
            cache_max_capacity,
            daily_concurrency,
            block_concurrency,
            max_days,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_upstream_contract() {
        let config = Config::default();

        assert_eq!(config.upstream_timeout, Duration::from_secs(10));
        assert_eq!(config.daily_concurrency, 5);
        assert_eq!(config.blockchain_api_url, "https://blockchain.info");
        assert!(config.upstream_rate_limit.is_none());
    }

    #[test]
    fn unset_values_fall_back() {
        assert_eq!(env_or("ENERGY_TEST_UNSET_VARIABLE", 7u32), 7);
    }

    #[test]
    fn unparsable_values_fall_back() {
        env::set_var("ENERGY_TEST_UNPARSABLE_VARIABLE", "not-a-number");
        assert_eq!(env_or("ENERGY_TEST_UNPARSABLE_VARIABLE", 7u32), 7);

        env::set_var("ENERGY_TEST_PARSABLE_VARIABLE", "12");
        assert_eq!(env_or("ENERGY_TEST_PARSABLE_VARIABLE", 7u32), 12);
    }
}
