use serde::{Deserialize, Serialize};
use std::time::Duration;
use thiserror::Error;

/// Errors that can occur with cache operations
#[derive(Debug, Error)]
pub enum CacheError {
    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("Cache miss: {0}")]
    CacheMiss(String),
}

/// In-memory TTL cache for directory snapshots
///
/// The matching core is pure over an already-fetched pool, so caching lives
/// entirely at this layer: a short TTL keeps repeat requests from hammering
/// the directory without the core ever seeing a stale-vs-fresh distinction.
pub struct CacheManager {
    cache: moka::future::Cache<String, Vec<u8>>,
}

impl CacheManager {
    /// Create a new cache manager with the given capacity and TTL
    pub fn new(capacity: u64, ttl_secs: u64) -> Self {
        let cache = moka::future::CacheBuilder::new(capacity)
            .time_to_live(Duration::from_secs(ttl_secs))
            .build();

        Self { cache }
    }

    /// Get a value from the cache
    pub async fn get<T>(&self, key: &str) -> Result<T, CacheError>
    where
        T: for<'de> Deserialize<'de>,
    {
        if let Some(bytes) = self.cache.get(key).await {
            tracing::trace!("Cache hit: {}", key);
            return Ok(serde_json::from_slice(&bytes)?);
        }

        tracing::trace!("Cache miss: {}", key);
        Err(CacheError::CacheMiss(key.to_string()))
    }

    /// Set a value in the cache
    pub async fn set<T>(&self, key: &str, value: &T) -> Result<(), CacheError>
    where
        T: Serialize,
    {
        let bytes = serde_json::to_vec(value)?;
        self.cache.insert(key.to_string(), bytes).await;
        tracing::trace!("Cache set: {}", key);
        Ok(())
    }

    /// Delete a value from the cache
    pub async fn delete(&self, key: &str) {
        self.cache.invalidate(key).await;
    }
}

/// Cache key builder
pub struct CacheKey;

impl CacheKey {
    /// Key for a user's profile lookup
    pub fn profile(user_id: &str) -> String {
        format!("profile:{}", user_id)
    }

    /// Key for a user's active-candidate pool snapshot
    pub fn pool(user_id: &str) -> String {
        format!("pool:{}", user_id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_cache_set_get_delete() {
        let cache = CacheManager::new(100, 60);

        let key = "test_key";
        let value = "test_value".to_string();

        cache.set(key, &value).await.unwrap();
        let result: String = cache.get(key).await.unwrap();
        assert_eq!(result, value);

        cache.delete(key).await;
        assert!(cache.get::<String>(key).await.is_err());
    }

    #[test]
    fn test_cache_key_builder() {
        assert_eq!(CacheKey::profile("user123"), "profile:user123");
        assert_eq!(CacheKey::pool("user123"), "pool:user123");
    }
}
