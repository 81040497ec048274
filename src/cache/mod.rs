//! Cache Module
//!
//! Stores scalar values under random keys in a key-value backend, with
//! optional call counting and call history around the store operation.

mod counter;
mod history;
mod playback;
mod store;
mod value;


// Re-export public types
pub use counter::CallCounter;
pub use history::{inputs_key, outputs_key, CallHistory};
pub use playback::{replay, Replay};
pub use store::{decode_float, decode_int, decode_str, Cache, InstrumentedCache, Store};
pub use value::CacheValue;

// == Public Constants ==
/// Default name for the counter key and history key prefix
pub const DEFAULT_METHOD_NAME: &str = "Cache.store";
