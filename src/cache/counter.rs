//! Call Counter Module
//!
//! Decorator counting store calls in a store-side counter.

use std::sync::Arc;

use async_trait::async_trait;
use tracing::debug;

use crate::backend::Backend;
use crate::cache::{decode_int, CacheValue, Store};
use crate::error::Result;

// == Call Counter ==
/// Increments the counter `key` before every call to the inner store.
pub struct CallCounter<S> {
    inner: S,
    backend: Arc<dyn Backend>,
    key: String,
}

impl<S: Store> CallCounter<S> {
    // == Constructor ==
    /// Wraps `inner`, counting calls under `key` in `backend`.
    pub fn new(inner: S, backend: Arc<dyn Backend>, key: impl Into<String>) -> Self {
        Self {
            inner,
            backend,
            key: key.into(),
        }
    }

    /// Returns the wrapped store.
    pub fn inner(&self) -> &S {
        &self.inner
    }

    /// Returns the counter key.
    pub fn key(&self) -> &str {
        &self.key
    }

    // == Count ==
    /// Returns the current call count, zero if never called.
    pub async fn count(&self) -> Result<i64> {
        match self.backend.get(&self.key).await? {
            Some(raw) => decode_int(raw),
            None => Ok(0),
        }
    }
}

#[async_trait]
impl<S: Store> Store for CallCounter<S> {
    async fn store(&self, data: CacheValue) -> Result<String> {
        let calls = self.backend.incr(&self.key).await?;
        debug!(counter = %self.key, calls, "INCR");
        self.inner.store(data).await
    }
}

// == Unit Tests ==
#[cfg(test)]
mod tests {
    use super::*;
    use crate::backend::MemoryBackend;
    use crate::cache::Cache;
    use crate::error::CacheError;

    async fn counted() -> CallCounter<Cache> {
        let cache = Cache::new(Arc::new(MemoryBackend::new())).await.unwrap();
        let backend = cache.backend();
        CallCounter::new(cache, backend, "Cache.store")
    }

    #[tokio::test]
    async fn test_count_starts_at_zero() {
        let counter = counted().await;
        assert_eq!(counter.count().await.unwrap(), 0);
    }

    #[tokio::test]
    async fn test_count_tracks_calls() {
        let counter = counted().await;

        for i in 0..5 {
            counter.store(i.into()).await.unwrap();
        }

        assert_eq!(counter.count().await.unwrap(), 5);
        assert_eq!(counter.key(), "Cache.store");
    }

    #[tokio::test]
    async fn test_counter_returns_inner_result() {
        let counter = counted().await;

        let key = counter.store("value".into()).await.unwrap();
        let value = counter.inner().get_str(&key).await.unwrap();
        assert_eq!(value, Some("value".to_string()));
    }

    #[tokio::test]
    async fn test_failed_increment_skips_inner_call() {
        let memory = Arc::new(MemoryBackend::new());
        let cache = Cache::new(memory.clone()).await.unwrap();
        let counter = CallCounter::new(cache, memory.clone(), "Cache.store");

        // A list under the counter key makes INCR fail
        memory.rpush("Cache.store", b"x".to_vec()).await.unwrap();

        let result = counter.store("value".into()).await;
        assert!(matches!(result, Err(CacheError::WrongType(_))));
        assert_eq!(memory.len().await, 1);
    }
}
