//! Configuration Module
//!
//! Handles loading cache configuration from environment variables.

use std::env;

use crate::cache::DEFAULT_METHOD_NAME;

/// URL scheme selecting the in-process backend.
pub const MEMORY_URL_SCHEME: &str = "memory://";

const DEFAULT_STORE_URL: &str = "redis://127.0.0.1:6379/";

/// Cache configuration parameters.
///
/// All values can be configured via environment variables with sensible defaults.
#[derive(Debug, Clone)]
pub struct Config {
    /// Store connection URL (`redis://...` or `memory://`)
    pub store_url: String,
    /// Name used as the counter key and the history key prefix
    pub method_name: String,
}

impl Config {
    /// Creates a new Config by loading values from environment variables.
    ///
    /// # Environment Variables
    /// - `CACHE_STORE_URL` - Store URL (default: redis://127.0.0.1:6379/)
    /// - `CACHE_METHOD_NAME` - Instrumentation key name (default: Cache.store)
    pub fn from_env() -> Self {
        Self {
            store_url: env::var("CACHE_STORE_URL")
                .ok()
                .filter(|v| !v.is_empty())
                .unwrap_or_else(|| DEFAULT_STORE_URL.to_string()),
            method_name: env::var("CACHE_METHOD_NAME")
                .ok()
                .filter(|v| !v.is_empty())
                .unwrap_or_else(|| DEFAULT_METHOD_NAME.to_string()),
        }
    }

    /// Returns true if the store URL selects the in-process backend.
    pub fn is_memory(&self) -> bool {
        self.store_url.starts_with(MEMORY_URL_SCHEME)
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            store_url: DEFAULT_STORE_URL.to_string(),
            method_name: DEFAULT_METHOD_NAME.to_string(),
        }
    }
}
