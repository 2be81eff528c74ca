//! Redis-backed counter store.
//!
//! Counters live under namespaced keys with a TTL applied at creation, so
//! expiry is handled by Redis itself. `INCR` gives the atomic
//! increment-and-read the limiter's admission decision relies on.

use std::time::Duration;

use async_trait::async_trait;
use bb8_redis::RedisConnectionManager;
use bb8_redis::bb8::Pool;
use bb8_redis::redis::AsyncCommands;

use crate::domain::ports::{CounterStore, CounterStoreError};

/// Key namespace so limiter state cannot collide with other tenants of the
/// same Redis database.
const KEY_PREFIX: &str = "trust:rl:";

/// Connection-pooled Redis counter store.
#[derive(Clone)]
pub struct RedisCounterStore {
    pool: Pool<RedisConnectionManager>,
}

impl RedisCounterStore {
    /// Connect a pool against the given Redis URL.
    ///
    /// # Errors
    ///
    /// Returns [`CounterStoreError::Unavailable`] when the URL is invalid or
    /// the pool cannot be built.
    pub async fn connect(url: &str) -> Result<Self, CounterStoreError> {
        let manager = RedisConnectionManager::new(url)
            .map_err(|err| CounterStoreError::unavailable(format!("invalid redis url: {err}")))?;
        let pool = Pool::builder()
            .build(manager)
            .await
            .map_err(|err| CounterStoreError::unavailable(format!("redis pool build failed: {err}")))?;
        Ok(Self { pool })
    }

    async fn connection(
        &self,
    ) -> Result<bb8_redis::bb8::PooledConnection<'_, RedisConnectionManager>, CounterStoreError>
    {
        self.pool
            .get()
            .await
            .map_err(|err| CounterStoreError::unavailable(format!("redis checkout failed: {err}")))
    }

    fn key(token: &str) -> String {
        format!("{KEY_PREFIX}{token}")
    }
}

#[async_trait]
impl CounterStore for RedisCounterStore {
    async fn get(&self, token: &str) -> Result<Option<u64>, CounterStoreError> {
        let mut conn = self.connection().await?;
        conn.get(Self::key(token))
            .await
            .map_err(|err| CounterStoreError::unavailable(format!("redis GET failed: {err}")))
    }

    async fn put(&self, token: &str, count: u64, ttl: Duration) -> Result<(), CounterStoreError> {
        let mut conn = self.connection().await?;
        conn.set_ex(Self::key(token), count, ttl.as_secs().max(1))
            .await
            .map_err(|err| CounterStoreError::unavailable(format!("redis SETEX failed: {err}")))
    }

    async fn increment(&self, token: &str) -> Result<u64, CounterStoreError> {
        let mut conn = self.connection().await?;
        conn.incr(Self::key(token), 1_u64)
            .await
            .map_err(|err| CounterStoreError::unavailable(format!("redis INCR failed: {err}")))
    }
}
