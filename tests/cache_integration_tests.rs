//! Integration Tests for the Cache
//!
//! Exercises the public API end to end against the in-process backend.
//! The Redis-backed test needs a live server and is ignored by default.

use std::sync::Arc;

use async_trait::async_trait;
use redis_cache::cache::{replay, DEFAULT_METHOD_NAME};
use redis_cache::{
    Backend, Cache, CacheError, CacheValue, CallCounter, CallHistory, Config, MemoryBackend,
    Store,
};

// == Helper Functions ==

async fn memory_cache() -> Cache {
    let config = Config {
        store_url: "memory://".to_string(),
        ..Config::default()
    };
    Cache::connect(&config).await.unwrap()
}

/// Store that always fails, for checking what decorators record on error.
struct FailingStore;

#[async_trait]
impl Store for FailingStore {
    async fn store(&self, _data: CacheValue) -> redis_cache::Result<String> {
        Err(CacheError::Decode("refused".to_string()))
    }
}

// == Round-trip Tests ==

#[tokio::test]
async fn test_roundtrip_all_scalar_kinds() {
    let cache = memory_cache().await;

    let text = cache.store("hello".into()).await.unwrap();
    let bytes = cache.store(b"raw-bytes".into()).await.unwrap();
    let int = cache.store(42.into()).await.unwrap();
    let float = cache.store(3.75.into()).await.unwrap();

    assert_eq!(cache.get_str(&text).await.unwrap(), Some("hello".to_string()));
    assert_eq!(cache.get(&bytes).await.unwrap(), Some(b"raw-bytes".to_vec()));
    assert_eq!(cache.get_int(&int).await.unwrap(), Some(42));
    assert_eq!(cache.get_float(&float).await.unwrap(), Some(3.75));

    // Numbers are readable as text too
    assert_eq!(cache.get_str(&int).await.unwrap(), Some("42".to_string()));
}

#[tokio::test]
async fn test_get_missing_key_is_absent_not_error() {
    let cache = memory_cache().await;
    assert_eq!(cache.get("nonexistent-key").await.unwrap(), None);
}

#[tokio::test]
async fn test_decoder_failure_propagates() {
    let cache = memory_cache().await;

    let key = cache.store("forty-two".into()).await.unwrap();
    let result = cache.get_int(&key).await;
    assert!(matches!(result, Err(CacheError::Decode(_))));
}

// == Instrumentation Tests ==

#[tokio::test]
async fn test_instrumented_cache_counts_and_records() {
    let cache = memory_cache().await;
    let backend = cache.backend();
    let cache = cache.instrument(DEFAULT_METHOD_NAME);

    let keys = vec![
        cache.store("first".into()).await.unwrap(),
        cache.store("second".into()).await.unwrap(),
        cache.store("third".into()).await.unwrap(),
    ];

    assert_eq!(cache.count().await.unwrap(), 3);

    let history = cache.inner();
    assert_eq!(
        history.inputs().await.unwrap(),
        vec![r#"["first"]"#, r#"["second"]"#, r#"["third"]"#]
    );
    assert_eq!(history.outputs().await.unwrap(), keys);

    // Values are still reachable through the undecorated cache
    assert_eq!(
        cache.cache().get_str(&keys[1]).await.unwrap(),
        Some("second".to_string())
    );

    let replay = replay(backend.as_ref(), DEFAULT_METHOD_NAME).await.unwrap();
    assert_eq!(replay.calls, 3);
    assert_eq!(replay.entries.len(), 3);
}

#[tokio::test]
async fn test_separate_names_do_not_share_counters() {
    let cache = memory_cache().await;
    let backend = cache.backend();

    let a = CallCounter::new(cache.clone(), Arc::clone(&backend), "a.store");
    let b = CallCounter::new(cache, backend, "b.store");

    a.store(1.into()).await.unwrap();
    a.store(2.into()).await.unwrap();
    b.store(3.into()).await.unwrap();

    assert_eq!(a.count().await.unwrap(), 2);
    assert_eq!(b.count().await.unwrap(), 1);
}

#[tokio::test]
async fn test_failed_call_leaves_no_history() {
    let backend: Arc<dyn Backend> = Arc::new(MemoryBackend::new());
    let counter = CallCounter::new(
        CallHistory::new(FailingStore, Arc::clone(&backend), "failing"),
        Arc::clone(&backend),
        "failing",
    );

    assert!(counter.store("x".into()).await.is_err());

    // The increment happened before the failing call, the history did not
    assert_eq!(counter.count().await.unwrap(), 1);
    assert!(counter.inner().inputs().await.unwrap().is_empty());
    assert!(counter.inner().outputs().await.unwrap().is_empty());
}

#[tokio::test]
async fn test_new_cache_flushes_previous_session() {
    let backend: Arc<dyn Backend> = Arc::new(MemoryBackend::new());

    let first = Cache::new(Arc::clone(&backend))
        .await
        .unwrap()
        .instrument(DEFAULT_METHOD_NAME);
    let key = first.store("old".into()).await.unwrap();

    let second = Cache::new(Arc::clone(&backend)).await.unwrap();
    assert_eq!(second.get(&key).await.unwrap(), None);

    let replay = replay(backend.as_ref(), DEFAULT_METHOD_NAME).await.unwrap();
    assert_eq!(replay.calls, 0);
    assert!(replay.entries.is_empty());
}

// == Redis Tests ==

#[tokio::test]
async fn test_connect_unreachable_store_fails() {
    let config = Config {
        store_url: "redis://127.0.0.1:1/".to_string(),
        ..Config::default()
    };

    let result = Cache::connect(&config).await;
    assert!(matches!(result, Err(CacheError::Store(_))));
}

#[tokio::test]
#[ignore = "requires a Redis server at CACHE_STORE_URL or redis://127.0.0.1:6379/"]
async fn test_redis_backend_end_to_end() {
    let config = Config::from_env();
    let cache = Cache::connect(&config).await.unwrap();
    let backend = cache.backend();
    let cache = cache.instrument(DEFAULT_METHOD_NAME);

    let key = cache.store(b"raw-bytes".into()).await.unwrap();
    let num = cache.store(42.into()).await.unwrap();

    let plain = cache.cache();
    assert_eq!(plain.get(&key).await.unwrap(), Some(b"raw-bytes".to_vec()));
    assert_eq!(plain.get_int(&num).await.unwrap(), Some(42));
    assert_eq!(plain.get("nonexistent-key").await.unwrap(), None);
    assert_eq!(cache.count().await.unwrap(), 2);

    let replay = replay(backend.as_ref(), DEFAULT_METHOD_NAME).await.unwrap();
    assert_eq!(replay.entries.len(), 2);
}
