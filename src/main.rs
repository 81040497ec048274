//! Redis Cache - An instrumented cache over a key-value store
//!
//! Stores each command-line argument through an instrumented cache, prints
//! the generated keys and logs the recorded call history.

use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use redis_cache::cache::replay;
use redis_cache::{Cache, CacheValue, Config, Store};

/// Main entry point.
///
/// # Sequence
/// 1. Initialize tracing subscriber for logging
/// 2. Load configuration from environment variables
/// 3. Connect to the store and flush it
/// 4. Store each argument through the instrumented cache
/// 5. Log the replay of recorded calls
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Defaults to "info" level, can be overridden with RUST_LOG env var
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "redis_cache=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = Config::from_env();
    info!(
        "Configuration loaded: store_url={}, method_name={}",
        config.store_url, config.method_name
    );

    let cache = Cache::connect(&config).await?;
    let backend = cache.backend();
    let cache = cache.instrument(config.method_name.clone());

    for arg in std::env::args().skip(1) {
        let key = cache.store(parse_value(&arg)).await?;
        println!("{}", key);
    }

    let replay = replay(backend.as_ref(), &config.method_name).await?;
    for line in replay.to_string().lines() {
        info!("{}", line);
    }

    Ok(())
}

/// Integers and floats are stored as numbers, anything else as text.
fn parse_value(arg: &str) -> CacheValue {
    if let Ok(n) = arg.parse::<i64>() {
        CacheValue::Int(n)
    } else if let Ok(x) = arg.parse::<f64>() {
        CacheValue::Float(x)
    } else {
        CacheValue::Text(arg.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_value() {
        assert_eq!(parse_value("42"), CacheValue::Int(42));
        assert_eq!(parse_value("2.5"), CacheValue::Float(2.5));
        assert_eq!(parse_value("hello"), CacheValue::Text("hello".to_string()));
    }
}
