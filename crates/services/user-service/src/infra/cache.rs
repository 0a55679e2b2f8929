//! Key-value cache for user data.
//!
//! `CacheStore` is the raw backend (Redis in production, an in-process map
//! for tests and local runs). `Cache` sits on top of it: it renders user ids
//! as keys, JSON-encodes values and applies the configured TTL.

use std::sync::Arc;

use async_trait::async_trait;
use redis::{aio::ConnectionManager, AsyncCommands, RedisError};
use serde::Serialize;
use thiserror::Error;
use tracing::{debug, info, warn};

use domain::user_cache_key;

#[cfg(any(test, feature = "test-utils"))]
use mockall::automock;

/// Cache failures. Callers decide whether to surface or log them.
#[derive(Error, Debug)]
pub enum CacheError {
    #[error("Redis error: {0}")]
    Redis(#[from] RedisError),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

pub type CacheResult<T> = Result<T, CacheError>;

/// Raw key-value backend.
#[cfg_attr(any(test, feature = "test-utils"), automock)]
#[async_trait]
pub trait CacheStore: Send + Sync {
    /// Get the raw value stored under `key`, `None` on a miss.
    async fn get(&self, key: &str) -> CacheResult<Option<String>>;

    /// Store `value` under `key`, expiring after `ttl_seconds`.
    async fn set_ex(&self, key: &str, value: String, ttl_seconds: u64) -> CacheResult<()>;

    /// Remove `key`. Removing a missing key is not an error.
    async fn delete(&self, key: &str) -> CacheResult<()>;

    /// Check backend connectivity.
    async fn ping(&self) -> CacheResult<()>;
}

// =============================================================================
// Redis backend
// =============================================================================

/// Redis backend over a shared connection manager.
#[derive(Clone)]
pub struct RedisCache {
    conn: ConnectionManager,
}

impl RedisCache {
    /// Connect to Redis and verify it answers `PING`.
    pub async fn connect(url: &str) -> CacheResult<Self> {
        debug!("Connecting to Redis");
        let client = redis::Client::open(url)?;
        let conn = ConnectionManager::new(client).await?;

        let cache = Self { conn };
        cache.ping().await?;

        info!("Redis cache connected");
        Ok(cache)
    }
}

#[async_trait]
impl CacheStore for RedisCache {
    async fn get(&self, key: &str) -> CacheResult<Option<String>> {
        let mut conn = self.conn.clone();
        let value: Option<String> = conn.get(key).await?;
        Ok(value)
    }

    async fn set_ex(&self, key: &str, value: String, ttl_seconds: u64) -> CacheResult<()> {
        let mut conn = self.conn.clone();
        conn.set_ex::<_, _, ()>(key, value, ttl_seconds).await?;
        Ok(())
    }

    async fn delete(&self, key: &str) -> CacheResult<()> {
        let mut conn = self.conn.clone();
        conn.del::<_, ()>(key).await?;
        Ok(())
    }

    async fn ping(&self) -> CacheResult<()> {
        let mut conn = self.conn.clone();
        let _pong: String = redis::cmd("PING").query_async(&mut conn).await?;
        Ok(())
    }
}

// =============================================================================
// User cache adapter
// =============================================================================

/// User cache keyed by id, shared across requests.
#[derive(Clone)]
pub struct Cache {
    store: Arc<dyn CacheStore>,
    ttl_seconds: u64,
}

impl Cache {
    /// Create a cache over `store` with a fixed TTL for every entry.
    pub fn new(store: Arc<dyn CacheStore>, ttl_seconds: u64) -> Self {
        Self { store, ttl_seconds }
    }

    /// JSON-encode `value` and store it under the id.
    pub async fn set<T: Serialize + ?Sized>(&self, key: i64, value: &T) -> CacheResult<()> {
        let cache_key = user_cache_key(key);
        let json = serde_json::to_string(value).map_err(|e| {
            warn!(key = %cache_key, error = %e, "Unable to encode element for cache");
            CacheError::from(e)
        })?;

        self.store
            .set_ex(&cache_key, json, self.ttl_seconds)
            .await
            .map_err(|e| {
                warn!(key = %cache_key, error = %e, "Unable to set element in cache");
                e
            })
    }

    /// Get the raw JSON stored under the id.
    pub async fn get(&self, key: i64) -> CacheResult<Option<String>> {
        let cache_key = user_cache_key(key);
        self.store.get(&cache_key).await.map_err(|e| {
            warn!(key = %cache_key, error = %e, "Unable to get element from cache");
            e
        })
    }

    /// Invalidate the entry for the id.
    pub async fn delete(&self, key: i64) -> CacheResult<()> {
        let cache_key = user_cache_key(key);
        self.store.delete(&cache_key).await.map_err(|e| {
            warn!(key = %cache_key, error = %e, "Unable to delete element from cache");
            e
        })
    }

    pub async fn ping(&self) -> CacheResult<()> {
        self.store.ping().await
    }
}
