//! Memory Backend Module
//!
//! In-process key-value store following the command semantics of Redis.

use std::collections::{HashMap, VecDeque};

use async_trait::async_trait;
use tokio::sync::RwLock;
use tracing::debug;

use crate::backend::{Backend, StoredValue};
use crate::error::{CacheError, Result};

// == Memory Backend ==
/// HashMap-backed store. Each command holds the lock for its whole duration,
/// so commands are serialized the way a Redis server serializes them.
#[derive(Debug, Default)]
pub struct MemoryBackend {
    /// Key-value storage
    entries: RwLock<HashMap<String, StoredValue>>,
}

impl MemoryBackend {
    // == Constructor ==
    /// Creates an empty store.
    pub fn new() -> Self {
        Self {
            entries: RwLock::new(HashMap::new()),
        }
    }

    // == Length ==
    /// Returns the current number of keys.
    pub async fn len(&self) -> usize {
        self.entries.read().await.len()
    }

    // == Is Empty ==
    /// Returns true if the store holds no keys.
    pub async fn is_empty(&self) -> bool {
        self.entries.read().await.is_empty()
    }
}

fn push(entries: &mut HashMap<String, StoredValue>, key: &str, value: Vec<u8>) -> Result<usize> {
    let list = entries
        .entry(key.to_string())
        .or_insert_with(|| StoredValue::List(VecDeque::new()))
        .as_list_mut()?;
    list.push_back(value);
    Ok(list.len())
}

/// Resolves an `LRANGE` index pair against a list of `len` elements.
///
/// Returns `None` when the range selects nothing.
fn resolve_range(len: usize, start: isize, stop: isize) -> Option<(usize, usize)> {
    let len = len as isize;
    let start = if start < 0 { (len + start).max(0) } else { start };
    let stop = if stop < 0 { len + stop } else { stop.min(len - 1) };

    if len == 0 || start > stop || start >= len {
        None
    } else {
        Some((start as usize, stop as usize))
    }
}

#[async_trait]
impl Backend for MemoryBackend {
    async fn flush_all(&self) -> Result<()> {
        let mut entries = self.entries.write().await;
        let removed = entries.len();
        entries.clear();
        debug!("FLUSHALL removed {} keys", removed);
        Ok(())
    }

    async fn set(&self, key: &str, value: Vec<u8>) -> Result<()> {
        let mut entries = self.entries.write().await;
        entries.insert(key.to_string(), StoredValue::Bytes(value));
        Ok(())
    }

    async fn get(&self, key: &str) -> Result<Option<Vec<u8>>> {
        let entries = self.entries.read().await;
        match entries.get(key) {
            Some(value) => Ok(Some(value.as_bytes()?.to_vec())),
            None => Ok(None),
        }
    }

    async fn incr(&self, key: &str) -> Result<i64> {
        let mut entries = self.entries.write().await;
        let current = match entries.get(key) {
            Some(value) => value.as_integer()?,
            None => 0,
        };

        let next = current
            .checked_add(1)
            .ok_or_else(|| CacheError::WrongType("increment or decrement would overflow".to_string()))?;
        entries.insert(key.to_string(), StoredValue::Bytes(next.to_string().into_bytes()));
        Ok(next)
    }

    async fn rpush(&self, key: &str, value: Vec<u8>) -> Result<usize> {
        let mut entries = self.entries.write().await;
        push(&mut entries, key, value)
    }

    async fn push_pair(
        &self,
        first_key: &str,
        first: Vec<u8>,
        second_key: &str,
        second: Vec<u8>,
    ) -> Result<()> {
        let mut entries = self.entries.write().await;

        // Check both keys before touching either, so a type error leaves no half-written pair
        for key in [first_key, second_key] {
            if let Some(value) = entries.get(key) {
                value.as_list()?;
            }
        }

        push(&mut entries, first_key, first)?;
        push(&mut entries, second_key, second)?;
        Ok(())
    }

    async fn lrange(&self, key: &str, start: isize, stop: isize) -> Result<Vec<Vec<u8>>> {
        let entries = self.entries.read().await;
        let list = match entries.get(key) {
            Some(value) => value.as_list()?,
            None => return Ok(Vec::new()),
        };

        Ok(match resolve_range(list.len(), start, stop) {
            Some((from, to)) => list.range(from..=to).cloned().collect(),
            None => Vec::new(),
        })
    }
}
