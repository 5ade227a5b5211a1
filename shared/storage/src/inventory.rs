//! Inventory Store
//!
//! Fetch-through cache in front of the dump fetcher. Produces the
//! [`SourceDump`]s the search engine works on, in source order.

use labstock_models::{InventorySource, SourceDump};
use labstock_utils::{is_fetch_failure, LabstockError, LabstockResult};
use tracing::{info, warn};

use crate::cache::DumpCache;
use crate::fetch::DumpFetcher;

#[derive(Debug, Clone)]
pub struct InventoryStore {
    fetcher: DumpFetcher,
    cache: DumpCache,
}

impl InventoryStore {
    pub fn new(fetcher: DumpFetcher, cache: DumpCache) -> Self {
        Self { fetcher, cache }
    }

    pub fn cache(&self) -> &DumpCache {
        &self.cache
    }

    /// Dump for one source, from cache when fresh. Failed fetches are
    /// returned as sentinel text and not cached.
    pub async fn load(&self, source: &InventorySource) -> SourceDump {
        if let Some(text) = self.cache.get(&source.name).await {
            return SourceDump::new(source.name.clone(), text);
        }

        let text = self.fetcher.fetch(source).await;
        if is_fetch_failure(&text) {
            warn!(source = %source.name, reason = %text, "Inventory source unavailable");
        } else {
            self.cache.set(&source.name, text.clone()).await;
        }

        SourceDump::new(source.name.clone(), text)
    }

    /// Dumps for all `sources`, fetched concurrently, returned in the order given.
    pub async fn load_all(&self, sources: &[InventorySource]) -> LabstockResult<Vec<SourceDump>> {
        let handles: Vec<_> = sources
            .iter()
            .cloned()
            .map(|source| {
                let store = self.clone();
                tokio::spawn(async move { store.load(&source).await })
            })
            .collect();

        let mut dumps = Vec::with_capacity(handles.len());
        for handle in handles {
            let dump = handle
                .await
                .map_err(|error| LabstockError::internal(format!("Inventory fetch task failed: {}", error)))?;
            dumps.push(dump);
        }

        Ok(dumps)
    }

    /// Forgets cached dumps: one source when named, otherwise all.
    /// Returns the number of entries dropped.
    pub async fn refresh(&self, name: Option<&str>) -> usize {
        let removed = match name {
            Some(name) => usize::from(self.cache.invalidate(name).await),
            None => self.cache.clear().await,
        };
        info!(source = name.unwrap_or("*"), removed, "Inventory cache invalidated");
        removed
    }
}
