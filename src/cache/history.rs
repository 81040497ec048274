//! Call History Module
//!
//! Decorator recording the inputs and outputs of every store call in two
//! store-side lists, `<name>:inputs` and `<name>:outputs`.

use std::sync::Arc;

use async_trait::async_trait;
use tracing::debug;

use crate::backend::Backend;
use crate::cache::{decode_str, CacheValue, Store};
use crate::error::Result;

// == Key Helpers ==
/// Key of the inputs list for `name`.
pub fn inputs_key(name: &str) -> String {
    format!("{}:inputs", name)
}

/// Key of the outputs list for `name`.
pub fn outputs_key(name: &str) -> String {
    format!("{}:outputs", name)
}

// == Call History ==
/// Records each call's arguments and result around the inner store.
///
/// Arguments are recorded as a JSON array (`["foo"]`), results as the bare
/// key text. Both are appended together once the inner call returns, so
/// the two lists stay index-aligned even under concurrent callers. A failed
/// inner call records nothing.
pub struct CallHistory<S> {
    inner: S,
    backend: Arc<dyn Backend>,
    inputs_key: String,
    outputs_key: String,
}

impl<S: Store> CallHistory<S> {
    // == Constructor ==
    /// Wraps `inner`, recording history under `name` in `backend`.
    pub fn new(inner: S, backend: Arc<dyn Backend>, name: impl Into<String>) -> Self {
        let name = name.into();
        Self {
            inner,
            backend,
            inputs_key: inputs_key(&name),
            outputs_key: outputs_key(&name),
        }
    }

    /// Returns the wrapped store.
    pub fn inner(&self) -> &S {
        &self.inner
    }

    // == Read Back ==
    /// Returns every recorded argument list, oldest first.
    pub async fn inputs(&self) -> Result<Vec<String>> {
        read_list(self.backend.as_ref(), &self.inputs_key).await
    }

    /// Returns every recorded result, oldest first.
    pub async fn outputs(&self) -> Result<Vec<String>> {
        read_list(self.backend.as_ref(), &self.outputs_key).await
    }
}

/// Reads a whole list as text.
pub(crate) async fn read_list(backend: &dyn Backend, key: &str) -> Result<Vec<String>> {
    backend
        .lrange(key, 0, -1)
        .await?
        .into_iter()
        .map(decode_str)
        .collect()
}

#[async_trait]
impl<S: Store> Store for CallHistory<S> {
    async fn store(&self, data: CacheValue) -> Result<String> {
        let input = serde_json::to_vec(&[&data])?;
        let key = self.inner.store(data).await?;
        let output = key.clone().into_bytes();

        self.backend
            .push_pair(&self.inputs_key, input, &self.outputs_key, output)
            .await?;
        debug!(history = %self.inputs_key, "RPUSH pair");

        Ok(key)
    }
}
