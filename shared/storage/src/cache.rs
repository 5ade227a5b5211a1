//! Dump Cache
//!
//! In-memory cache of fetched inventory dumps, keyed by source name. Entries
//! expire after a fixed TTL; callers can also invalidate them explicitly when
//! they know a dump has been regenerated.

use std::collections::HashMap;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::sync::RwLock;

#[derive(Debug, Clone)]
pub struct CacheConfig {
    pub ttl: Duration,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            ttl: Duration::from_secs(3600),
        }
    }
}

#[derive(Debug, Clone)]
struct CachedDump {
    text: String,
    fetched_at: Instant,
}

/// Shared dump cache; clones share the same entries
#[derive(Debug, Clone)]
pub struct DumpCache {
    entries: Arc<RwLock<HashMap<String, CachedDump>>>,
    ttl: Duration,
}

impl DumpCache {
    pub fn new(config: CacheConfig) -> Self {
        Self {
            entries: Arc::new(RwLock::new(HashMap::new())),
            ttl: config.ttl,
        }
    }

    /// Cached dump for `name` unless it has expired
    pub async fn get(&self, name: &str) -> Option<String> {
        let entries = self.entries.read().await;
        entries
            .get(name)
            .filter(|entry| entry.fetched_at.elapsed() < self.ttl)
            .map(|entry| entry.text.clone())
    }

    pub async fn set(&self, name: &str, text: String) {
        let mut entries = self.entries.write().await;
        entries.insert(
            name.to_string(),
            CachedDump {
                text,
                fetched_at: Instant::now(),
            },
        );
    }

    /// Drops the entry for `name`; returns whether one existed
    pub async fn invalidate(&self, name: &str) -> bool {
        self.entries.write().await.remove(name).is_some()
    }

    /// Drops every entry; returns how many were removed
    pub async fn clear(&self) -> usize {
        let mut entries = self.entries.write().await;
        let removed = entries.len();
        entries.clear();
        removed
    }

    /// Number of entries that have not expired
    pub async fn fresh_count(&self) -> usize {
        let entries = self.entries.read().await;
        entries
            .values()
            .filter(|entry| entry.fetched_at.elapsed() < self.ttl)
            .count()
    }
}

impl Default for DumpCache {
    fn default() -> Self {
        Self::new(CacheConfig::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_set_and_get() {
        let cache = DumpCache::default();
        assert_eq!(cache.get("workshop").await, None);

        cache.set("workshop", "Image: a".to_string()).await;
        assert_eq!(cache.get("workshop").await.as_deref(), Some("Image: a"));
        assert_eq!(cache.fresh_count().await, 1);
    }

    #[tokio::test]
    async fn test_entries_expire() {
        let cache = DumpCache::new(CacheConfig { ttl: Duration::ZERO });
        cache.set("workshop", "Image: a".to_string()).await;
        assert_eq!(cache.get("workshop").await, None);
        assert_eq!(cache.fresh_count().await, 0);
    }

    #[tokio::test]
    async fn test_invalidate_and_clear() {
        let cache = DumpCache::default();
        cache.set("workshop", "a".to_string()).await;
        cache.set("marcel", "b".to_string()).await;

        assert!(cache.invalidate("workshop").await);
        assert!(!cache.invalidate("workshop").await);
        assert_eq!(cache.get("marcel").await.as_deref(), Some("b"));

        assert_eq!(cache.clear().await, 1);
        assert_eq!(cache.get("marcel").await, None);
    }

    #[tokio::test]
    async fn test_clones_share_entries() {
        let cache = DumpCache::default();
        let other = cache.clone();
        other.set("hemal", "c".to_string()).await;
        assert_eq!(cache.get("hemal").await.as_deref(), Some("c"));
    }
}
