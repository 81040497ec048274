//! Backend Module
//!
//! The command interface to the key-value store, with a Redis implementation
//! and an in-process implementation sharing the same semantics.

mod entry;
mod memory;
mod remote;

use std::sync::Arc;

use async_trait::async_trait;
use tracing::info;

use crate::config::Config;
use crate::error::Result;

pub use entry::StoredValue;
pub use memory::MemoryBackend;
pub use remote::RedisBackend;

// == Backend Trait ==
/// Minimal command set of the key-value store.
///
/// Each method maps onto one store command and is atomic on its own.
#[async_trait]
pub trait Backend: Send + Sync {
    /// `FLUSHALL`: removes every key.
    async fn flush_all(&self) -> Result<()>;

    /// `SET key value`: unconditional overwrite-or-create.
    async fn set(&self, key: &str, value: Vec<u8>) -> Result<()>;

    /// `GET key`: the raw bytes, or `None` if the key is absent.
    async fn get(&self, key: &str) -> Result<Option<Vec<u8>>>;

    /// `INCR key`: increments by one, creating the counter at zero if absent.
    async fn incr(&self, key: &str) -> Result<i64>;

    /// `RPUSH key value`: appends to a list and returns its new length.
    async fn rpush(&self, key: &str, value: Vec<u8>) -> Result<usize>;

    /// Appends to two lists as a single atomic step.
    async fn push_pair(
        &self,
        first_key: &str,
        first: Vec<u8>,
        second_key: &str,
        second: Vec<u8>,
    ) -> Result<()>;

    /// `LRANGE key start stop`, with negative indexes counting from the end.
    async fn lrange(&self, key: &str, start: isize, stop: isize) -> Result<Vec<Vec<u8>>>;
}

// == Open ==
/// Opens the backend named by `config.store_url`.
///
/// `memory://` selects [`MemoryBackend`]; any other URL is handed to the Redis
/// client. An unreachable server fails here and is not retried.
pub async fn open(config: &Config) -> Result<Arc<dyn Backend>> {
    if config.is_memory() {
        info!("Using in-process memory backend");
        return Ok(Arc::new(MemoryBackend::new()));
    }

    let backend = RedisBackend::connect(&config.store_url).await?;
    info!("Connected to Redis at {}", config.store_url);
    Ok(Arc::new(backend))
}
