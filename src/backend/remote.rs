//! Redis Backend Module
//!
//! Issues the backend commands against a Redis server through a tokio
//! `ConnectionManager`, which reconnects on its own after transient failures.

use async_trait::async_trait;
use redis::aio::ConnectionManager;
use redis::AsyncCommands;
use tracing::debug;

use crate::backend::Backend;
use crate::error::Result;

// == Redis Backend ==
/// Backend talking to a Redis server.
#[derive(Clone)]
pub struct RedisBackend {
    /// Multiplexed connection, cloned per command
    conn: ConnectionManager,
}

impl RedisBackend {
    // == Connect ==
    /// Opens a managed connection to the server at `url`.
    ///
    /// Fails if the URL does not parse or the server is unreachable. The
    /// reachability check is a single attempt; reconnects after that are
    /// left to the manager.
    pub async fn connect(url: &str) -> Result<Self> {
        let client = redis::Client::open(url)?;
        client.get_multiplexed_async_connection().await?;
        let conn = ConnectionManager::new(client).await?;
        Ok(Self { conn })
    }

    fn conn(&self) -> ConnectionManager {
        self.conn.clone()
    }
}

impl std::fmt::Debug for RedisBackend {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RedisBackend").finish_non_exhaustive()
    }
}

#[async_trait]
impl Backend for RedisBackend {
    async fn flush_all(&self) -> Result<()> {
        let mut conn = self.conn();
        let _: () = redis::cmd("FLUSHALL").query_async(&mut conn).await?;
        debug!("FLUSHALL issued");
        Ok(())
    }

    async fn set(&self, key: &str, value: Vec<u8>) -> Result<()> {
        let mut conn = self.conn();
        let _: () = conn.set(key, value).await?;
        Ok(())
    }

    async fn get(&self, key: &str) -> Result<Option<Vec<u8>>> {
        let mut conn = self.conn();
        let value: Option<Vec<u8>> = conn.get(key).await?;
        Ok(value)
    }

    async fn incr(&self, key: &str) -> Result<i64> {
        let mut conn = self.conn();
        let value: i64 = conn.incr(key, 1).await?;
        Ok(value)
    }

    async fn rpush(&self, key: &str, value: Vec<u8>) -> Result<usize> {
        let mut conn = self.conn();
        let len: usize = conn.rpush(key, value).await?;
        Ok(len)
    }

    async fn push_pair(
        &self,
        first_key: &str,
        first: Vec<u8>,
        second_key: &str,
        second: Vec<u8>,
    ) -> Result<()> {
        let mut conn = self.conn();
        let _: () = redis::pipe()
            .atomic()
            .rpush(first_key, first)
            .ignore()
            .rpush(second_key, second)
            .ignore()
            .query_async(&mut conn)
            .await?;
        Ok(())
    }

    async fn lrange(&self, key: &str, start: isize, stop: isize) -> Result<Vec<Vec<u8>>> {
        let mut conn = self.conn();
        let values: Vec<Vec<u8>> = conn.lrange(key, start, stop).await?;
        Ok(values)
    }
}
