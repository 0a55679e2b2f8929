//! In-process cache backend.
//!
//! Entries expire on the tokio clock, so paused-time tests can step past
//! the TTL without sleeping.

use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::RwLock;
use tokio::time::{Duration, Instant};

use super::cache::{CacheResult, CacheStore};

struct Entry {
    value: String,
    expires_at: Instant,
}

/// Map-backed `CacheStore` with per-entry expiry.
#[derive(Default)]
pub struct MemoryCache {
    entries: RwLock<HashMap<String, Entry>>,
}

impl MemoryCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of entries that have not expired yet.
    pub async fn len(&self) -> usize {
        let now = Instant::now();
        self.entries
            .read()
            .await
            .values()
            .filter(|entry| entry.expires_at > now)
            .count()
    }

    pub async fn is_empty(&self) -> bool {
        self.len().await == 0
    }
}

#[async_trait]
impl CacheStore for MemoryCache {
    async fn get(&self, key: &str) -> CacheResult<Option<String>> {
        let now = Instant::now();
        {
            let entries = self.entries.read().await;
            match entries.get(key) {
                Some(entry) if entry.expires_at > now => return Ok(Some(entry.value.clone())),
                Some(_) => {}
                None => return Ok(None),
            }
        }

        // Expired: drop it unless a concurrent set replaced it.
        let mut entries = self.entries.write().await;
        if entries
            .get(key)
            .is_some_and(|entry| entry.expires_at <= now)
        {
            entries.remove(key);
        }
        Ok(None)
    }

    async fn set_ex(&self, key: &str, value: String, ttl_seconds: u64) -> CacheResult<()> {
        let now = Instant::now();
        let entry = Entry {
            value,
            expires_at: now + Duration::from_secs(ttl_seconds),
        };

        let mut entries = self.entries.write().await;
        // Keys that are never read again would otherwise stay forever
        entries.retain(|_, existing| existing.expires_at > now);
        entries.insert(key.to_string(), entry);
        Ok(())
    }

    async fn delete(&self, key: &str) -> CacheResult<()> {
        self.entries.write().await.remove(key);
        Ok(())
    }

    async fn ping(&self) -> CacheResult<()> {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio_test::assert_ok;

    #[tokio::test]
    async fn test_set_then_get() {
        let cache = MemoryCache::new();
        assert_ok!(cache.set_ex("1", "one".to_string(), 60).await);

        assert_eq!(cache.get("1").await.unwrap(), Some("one".to_string()));
        assert_eq!(cache.get("2").await.unwrap(), None);
        assert_eq!(cache.len().await, 1);
    }

    #[tokio::test]
    async fn test_delete_is_idempotent() {
        let cache = MemoryCache::new();
        cache.set_ex("1", "one".to_string(), 60).await.unwrap();

        assert_ok!(cache.delete("1").await);
        assert_ok!(cache.delete("1").await);
        assert!(cache.is_empty().await);
    }

    #[tokio::test(start_paused = true)]
    async fn test_entries_expire_after_ttl() {
        let cache = MemoryCache::new();
        cache.set_ex("1", "one".to_string(), 3600).await.unwrap();

        tokio::time::advance(Duration::from_secs(3599)).await;
        assert_eq!(cache.get("1").await.unwrap(), Some("one".to_string()));

        tokio::time::advance(Duration::from_secs(1)).await;
        assert_eq!(cache.get("1").await.unwrap(), None);
        assert!(cache.is_empty().await);
    }

    #[tokio::test(start_paused = true)]
    async fn test_set_sweeps_expired_entries() {
        let cache = MemoryCache::new();
        cache.set_ex("1", "one".to_string(), 10).await.unwrap();
        cache.set_ex("2", "two".to_string(), 100).await.unwrap();

        tokio::time::advance(Duration::from_secs(11)).await;
        cache.set_ex("3", "three".to_string(), 10).await.unwrap();

        let entries = cache.entries.read().await;
        assert_eq!(entries.len(), 2);
        assert!(!entries.contains_key("1"));
        assert!(entries.contains_key("2"));
    }

    #[tokio::test(start_paused = true)]
    async fn test_set_refreshes_ttl() {
        let cache = MemoryCache::new();
        cache.set_ex("1", "old".to_string(), 10).await.unwrap();

        tokio::time::advance(Duration::from_secs(8)).await;
        cache.set_ex("1", "new".to_string(), 10).await.unwrap();

        tokio::time::advance(Duration::from_secs(8)).await;
        assert_eq!(cache.get("1").await.unwrap(), Some("new".to_string()));
    }
}
