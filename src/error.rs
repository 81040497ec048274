//! Error types for the cache
//!
//! Provides unified error handling using thiserror.

use thiserror::Error;

// == Cache Error Enum ==
/// Unified error type for the cache and its backends.
#[derive(Error, Debug)]
pub enum CacheError {
    /// Connection or command failure reported by the Redis client
    #[error("Store error: {0}")]
    Store(#[from] redis::RedisError),

    /// Command issued against a key holding the wrong kind of value
    #[error("Wrong type: {0}")]
    WrongType(String),

    /// Stored bytes rejected by a decoder
    #[error("Decode error: {0}")]
    Decode(String),

    /// Call history could not be serialized
    #[error("Serialize error: {0}")]
    Serialize(#[from] serde_json::Error),
}

// == Result Type Alias ==
/// Convenience Result type for the cache.
pub type Result<T> = std::result::Result<T, CacheError>;
