//! Infrastructure layer - database and cache connections.

pub mod cache;
mod db;
mod memory_cache;

pub use cache::{Cache, CacheError, CacheResult, CacheStore, RedisCache};
pub use db::Database;
pub use memory_cache::MemoryCache;

#[cfg(any(test, feature = "test-utils"))]
pub use cache::MockCacheStore;
