//! Cache Store Module
//!
//! The cache itself: stores values under fresh UUID keys and reads them back,
//! optionally decoding the raw bytes.

use std::sync::Arc;

use async_trait::async_trait;
use tracing::{debug, info};
use uuid::Uuid;

use crate::backend::{self, Backend};
use crate::cache::{CacheValue, CallCounter, CallHistory};
use crate::config::Config;
use crate::error::{CacheError, Result};

// == Store Trait ==
/// The store operation, implemented by [`Cache`] and by the decorators that
/// wrap it.
#[async_trait]
pub trait Store: Send + Sync {
    /// Stores `data` under a newly generated key and returns the key.
    async fn store(&self, data: CacheValue) -> Result<String>;
}

/// Decorator stack built by [`Cache::instrument`].
pub type InstrumentedCache = CallCounter<CallHistory<Cache>>;

// == Cache ==
/// Cache over a key-value backend.
///
/// Clones share the same backend.
#[derive(Clone)]
pub struct Cache {
    backend: Arc<dyn Backend>,
}

impl Cache {
    // == Constructor ==
    /// Creates a cache over `backend`, flushing every key it holds.
    pub async fn new(backend: Arc<dyn Backend>) -> Result<Self> {
        backend.flush_all().await?;
        info!("Cache initialized, store flushed");
        Ok(Self { backend })
    }

    /// Opens the backend named by `config` and creates a cache over it.
    pub async fn connect(config: &Config) -> Result<Self> {
        let backend = backend::open(config).await?;
        Self::new(backend).await
    }

    /// Returns a handle to the backend.
    pub fn backend(&self) -> Arc<dyn Backend> {
        Arc::clone(&self.backend)
    }

    // == Instrument ==
    /// Wraps the cache with call history and call counting under `name`.
    ///
    /// The counter is outermost, so a store call issues `INCR`, then `SET`,
    /// then the history append.
    pub fn instrument(self, name: impl Into<String>) -> InstrumentedCache {
        let name = name.into();
        let backend = self.backend();
        let history = CallHistory::new(self, Arc::clone(&backend), name.clone());
        CallCounter::new(history, backend, name)
    }

    // == Get ==
    /// Returns the raw bytes stored under `key`, or `None` if absent.
    pub async fn get(&self, key: &str) -> Result<Option<Vec<u8>>> {
        let value = self.backend.get(key).await?;
        debug!(key, found = value.is_some(), "GET");
        Ok(value)
    }

    /// Returns the value under `key` passed through `decode`.
    ///
    /// `decode` only runs when the key exists; its error is returned as is.
    pub async fn get_with<T, F>(&self, key: &str, decode: F) -> Result<Option<T>>
    where
        F: FnOnce(Vec<u8>) -> Result<T>,
    {
        self.get(key).await?.map(decode).transpose()
    }

    /// Returns the value under `key` as UTF-8 text.
    pub async fn get_str(&self, key: &str) -> Result<Option<String>> {
        self.get_with(key, decode_str).await
    }

    /// Returns the value under `key` parsed as an integer.
    pub async fn get_int(&self, key: &str) -> Result<Option<i64>> {
        self.get_with(key, decode_int).await
    }

    /// Returns the value under `key` parsed as a floating-point number.
    pub async fn get_float(&self, key: &str) -> Result<Option<f64>> {
        self.get_with(key, decode_float).await
    }
}

impl InstrumentedCache {
    /// Returns the undecorated cache, for reads and uncounted stores.
    pub fn cache(&self) -> &Cache {
        self.inner().inner()
    }
}

impl std::fmt::Debug for Cache {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Cache").finish_non_exhaustive()
    }
}

#[async_trait]
impl Store for Cache {
    async fn store(&self, data: CacheValue) -> Result<String> {
        let key = Uuid::new_v4().to_string();
        self.backend.set(&key, data.to_bytes()).await?;
        debug!(key = %key, "SET");
        Ok(key)
    }
}

// == Decoders ==
/// Decodes raw bytes as UTF-8 text.
pub fn decode_str(raw: Vec<u8>) -> Result<String> {
    String::from_utf8(raw).map_err(|e| CacheError::Decode(e.to_string()))
}

/// Decodes raw bytes as a decimal integer.
pub fn decode_int(raw: Vec<u8>) -> Result<i64> {
    let text = decode_str(raw)?;
    text.trim()
        .parse()
        .map_err(|_| CacheError::Decode(format!("invalid integer: {:?}", text)))
}

/// Decodes raw bytes as a floating-point number.
pub fn decode_float(raw: Vec<u8>) -> Result<f64> {
    let text = decode_str(raw)?;
    text.trim()
        .parse()
        .map_err(|_| CacheError::Decode(format!("invalid float: {:?}", text)))
}
