//! Replay Module
//!
//! Reads back the call count and call history recorded for a decorated store.

use std::fmt;

use crate::backend::Backend;
use crate::cache::history::{inputs_key, outputs_key, read_list};
use crate::cache::decode_int;
use crate::error::Result;

// == Replay ==
/// Recorded calls of one decorated operation.
#[derive(Debug, Clone, PartialEq)]
pub struct Replay {
    /// Name the operation was instrumented under
    pub name: String,
    /// Value of the call counter
    pub calls: i64,
    /// Serialized (inputs, output) pairs, oldest first
    pub entries: Vec<(String, String)>,
}

/// Loads the replay for `name`.
///
/// History lists of unequal length are zipped, dropping the surplus.
pub async fn replay(backend: &dyn Backend, name: &str) -> Result<Replay> {
    let calls = match backend.get(name).await? {
        Some(raw) => decode_int(raw)?,
        None => 0,
    };

    let inputs = read_list(backend, &inputs_key(name)).await?;
    let outputs = read_list(backend, &outputs_key(name)).await?;

    Ok(Replay {
        name: name.to_string(),
        calls,
        entries: inputs.into_iter().zip(outputs).collect(),
    })
}

impl fmt::Display for Replay {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} was called {} times:", self.name, self.calls)?;
        for (input, output) in &self.entries {
            write!(f, "\n{}(*{}) -> {}", self.name, input, output)?;
        }
        Ok(())
    }
}
