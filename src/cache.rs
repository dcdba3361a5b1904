// src/cache.rs

//! Key/value cache for content fetched from the content provider.
//!
//! Values are stored as JSON so any serializable model can be cached under a
//! string key. Every operation is fallible: a broken cache surfaces as a
//! `CacheError` carrying the backend's message.

use std::{future::Future, sync::Arc, time::Duration};

use async_trait::async_trait;
use moka::future::Cache as MokaCache;
use serde::{Serialize, de::DeserializeOwned};
use serde_json::Value;

use crate::error::AppError;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{message}")]
pub struct CacheError {
    message: String,
}

impl CacheError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

#[async_trait]
pub trait Cache: Send + Sync {
    async fn get(&self, key: &str) -> Result<Option<Value>, CacheError>;

    async fn set(&self, key: &str, value: Value) -> Result<(), CacheError>;

    async fn del(&self, key: &str) -> Result<(), CacheError>;

    async fn flush_all(&self) -> Result<(), CacheError>;
}

/// In-process cache backed by moka.
#[derive(Debug, Clone)]
pub struct MemoryCache {
    inner: MokaCache<String, Value>,
}

impl MemoryCache {
    const MAX_CAPACITY: u64 = 10_000;

    pub fn new() -> Self {
        Self {
            inner: MokaCache::new(Self::MAX_CAPACITY),
        }
    }

    /// Entries expire `ttl` after insertion.
    pub fn with_ttl(ttl: Duration) -> Self {
        Self {
            inner: MokaCache::builder()
                .max_capacity(Self::MAX_CAPACITY)
                .time_to_live(ttl)
                .build(),
        }
    }
}

impl Default for MemoryCache {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Cache for MemoryCache {
    async fn get(&self, key: &str) -> Result<Option<Value>, CacheError> {
        Ok(self.inner.get(key).await)
    }

    async fn set(&self, key: &str, value: Value) -> Result<(), CacheError> {
        self.inner.insert(key.to_string(), value).await;
        Ok(())
    }

    async fn del(&self, key: &str) -> Result<(), CacheError> {
        self.inner.invalidate(key).await;
        Ok(())
    }

    async fn flush_all(&self) -> Result<(), CacheError> {
        self.inner.invalidate_all();
        Ok(())
    }
}

/// Returns the value cached under `key`, or runs `fetch`, caches its result
/// and returns it.
///
/// A failing cache read aborts before `fetch` runs.
pub async fn read_through<T, F, Fut>(cache: &Arc<dyn Cache>, key: &str, fetch: F) -> Result<T, AppError>
where
    T: Serialize + DeserializeOwned,
    F: FnOnce() -> Fut,
    Fut: Future<Output = Result<T, AppError>>,
{
    if let Some(cached) = cache.get(key).await? {
        tracing::debug!(key, "cache hit");
        return serde_json::from_value(cached)
            .map_err(|e| AppError::InternalServerError(e.to_string()));
    }

    tracing::debug!(key, "cache miss");
    let value = fetch().await?;

    let serialized =
        serde_json::to_value(&value).map_err(|e| AppError::InternalServerError(e.to_string()))?;
    cache.set(key, serialized).await?;

    Ok(value)
}
