//! Cache Value Module
//!
//! Scalar values accepted by the cache and their byte encoding in the store.

use serde::{Serialize, Serializer};

// == Cache Value ==
/// A scalar that can be stored in the cache.
///
/// Serializes untagged, so `Text("foo")` becomes `"foo"` and `Int(42)` becomes
/// `42` in call history. Non-finite floats serialize as the text they are
/// stored as (`"NaN"`, `"inf"`, `"-inf"`), since JSON has no literal for them.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum CacheValue {
    /// UTF-8 text
    Text(String),
    /// Raw bytes, stored unchanged
    Bytes(Vec<u8>),
    /// Signed integer
    Int(i64),
    /// Floating-point number
    #[serde(serialize_with = "serialize_float")]
    Float(f64),
}

impl CacheValue {
    // == Encode ==
    /// Returns the byte representation written to the store.
    ///
    /// Numbers are written as decimal text, which is what `INCR` and the
    /// numeric getters read back. Integral floats keep a fractional digit
    /// (`1.0`), so they never read back as integers.
    pub fn to_bytes(&self) -> Vec<u8> {
        match self {
            CacheValue::Text(text) => text.as_bytes().to_vec(),
            CacheValue::Bytes(bytes) => bytes.clone(),
            CacheValue::Int(n) => n.to_string().into_bytes(),
            CacheValue::Float(x) => format_float(*x).into_bytes(),
        }
    }
}

/// Decimal text of a float, with `.0` appended to finite integral values.
fn format_float(x: f64) -> String {
    let mut text = x.to_string();
    if x.is_finite() && !text.contains('.') {
        text.push_str(".0");
    }
    text
}

fn serialize_float<S: Serializer>(x: &f64, serializer: S) -> Result<S::Ok, S::Error> {
    if x.is_finite() {
        serializer.serialize_f64(*x)
    } else {
        serializer.serialize_str(&format_float(*x))
    }
}

impl From<&str> for CacheValue {
    fn from(value: &str) -> Self {
        CacheValue::Text(value.to_string())
    }
}

impl From<String> for CacheValue {
    fn from(value: String) -> Self {
        CacheValue::Text(value)
    }
}

impl From<&[u8]> for CacheValue {
    fn from(value: &[u8]) -> Self {
        CacheValue::Bytes(value.to_vec())
    }
}

impl<const N: usize> From<&[u8; N]> for CacheValue {
    fn from(value: &[u8; N]) -> Self {
        CacheValue::Bytes(value.to_vec())
    }
}

impl From<Vec<u8>> for CacheValue {
    fn from(value: Vec<u8>) -> Self {
        CacheValue::Bytes(value)
    }
}

impl From<i64> for CacheValue {
    fn from(value: i64) -> Self {
        CacheValue::Int(value)
    }
}

impl From<i32> for CacheValue {
    fn from(value: i32) -> Self {
        CacheValue::Int(i64::from(value))
    }
}

impl From<f64> for CacheValue {
    fn from(value: f64) -> Self {
        CacheValue::Float(value)
    }
}
