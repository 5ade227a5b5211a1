//! Labstock storage collaborators: inventory dump fetching and caching, and
//! the re-order ledger.

pub mod cache;
pub mod fetch;
pub mod inventory;
pub mod ledger;

pub use cache::{CacheConfig, DumpCache};
pub use fetch::DumpFetcher;
pub use inventory::InventoryStore;
pub use ledger::ReorderLedger;

use labstock_utils::{InventoryConfig, LabstockResult, LedgerConfig};
use std::time::Duration;

/// Builds the fetch-through inventory store described by `config`
pub fn create_inventory_store(config: &InventoryConfig) -> LabstockResult<InventoryStore> {
    let fetcher = DumpFetcher::new(Duration::from_secs(config.fetch_timeout_seconds))?;
    let cache = DumpCache::new(CacheConfig {
        ttl: Duration::from_secs(config.cache_ttl_seconds),
    });
    Ok(InventoryStore::new(fetcher, cache))
}

pub fn create_ledger(config: &LedgerConfig) -> ReorderLedger {
    ReorderLedger::new(&config.directory)
}
