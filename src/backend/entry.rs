//! Stored Value Module
//!
//! Defines the kinds of value the in-process backend holds under a key.

use std::collections::VecDeque;

use crate::error::{CacheError, Result};

const WRONG_TYPE_MSG: &str = "Operation against a key holding the wrong kind of value";

// == Stored Value ==
/// A value held by the in-process backend.
#[derive(Debug, Clone, PartialEq)]
pub enum StoredValue {
    /// Plain string value (`SET`, `INCR`)
    Bytes(Vec<u8>),
    /// Ordered list (`RPUSH`)
    List(VecDeque<Vec<u8>>),
}

impl StoredValue {
    // == Accessors ==
    /// Returns the raw bytes, failing if the key holds a list.
    pub fn as_bytes(&self) -> Result<&[u8]> {
        match self {
            StoredValue::Bytes(bytes) => Ok(bytes),
            StoredValue::List(_) => Err(CacheError::WrongType(WRONG_TYPE_MSG.to_string())),
        }
    }

    /// Returns the list, failing if the key holds a plain value.
    pub fn as_list_mut(&mut self) -> Result<&mut VecDeque<Vec<u8>>> {
        match self {
            StoredValue::List(list) => Ok(list),
            StoredValue::Bytes(_) => Err(CacheError::WrongType(WRONG_TYPE_MSG.to_string())),
        }
    }

    /// Returns the list, failing if the key holds a plain value.
    pub fn as_list(&self) -> Result<&VecDeque<Vec<u8>>> {
        match self {
            StoredValue::List(list) => Ok(list),
            StoredValue::Bytes(_) => Err(CacheError::WrongType(WRONG_TYPE_MSG.to_string())),
        }
    }

    // == Integer ==
    /// Parses the value as a decimal integer, the way `INCR` reads it.
    pub fn as_integer(&self) -> Result<i64> {
        let bytes = self.as_bytes()?;
        std::str::from_utf8(bytes)
            .ok()
            .and_then(|s| s.parse::<i64>().ok())
            .ok_or_else(|| {
                CacheError::WrongType("value is not an integer or out of range".to_string())
            })
    }
}
