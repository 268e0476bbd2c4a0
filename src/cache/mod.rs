pub mod keys;
pub mod ledger;

use crate::{blockchain::LedgerSource, config::Config};
use std::sync::Arc;

pub use keys::LedgerKey;
pub use ledger::{LedgerCache, UpstreamFetchError};

pub fn init_cache(config: &Config, source: Arc<dyn LedgerSource>) -> LedgerCache {
    LedgerCache::new(source, config.cache_max_capacity)
}
