//! Redis Cache - An instrumented cache over a key-value store
//!
//! Stores scalar values under random keys, reads them back with optional
//! decoding, and records call counts and call history for the store operation.

pub mod backend;
pub mod cache;
pub mod config;
pub mod error;

pub use backend::{Backend, MemoryBackend, RedisBackend};
pub use cache::{Cache, CacheValue, CallCounter, CallHistory, InstrumentedCache, Store};
pub use config::Config;
pub use error::{CacheError, Result};
