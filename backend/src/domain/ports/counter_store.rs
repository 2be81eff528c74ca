//! Driven port for the keyed rate-limit counter store.
//!
//! The store holds (token → count) pairs with implicit TTL expiry. The only
//! concurrency requirement is that [`CounterStore::increment`] is atomic:
//! two concurrent increments on the same token must observe distinct values.

use std::time::Duration;

use async_trait::async_trait;

/// Errors surfaced by the counter store.
///
/// The limiter applies one uniform policy to all of them (fail-closed), so a
/// single variant carries the whole failure surface.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CounterStoreError {
    /// The store is unreachable or the operation failed.
    #[error("counter store unavailable: {message}")]
    Unavailable {
        /// Failure description.
        message: String,
    },
}

impl CounterStoreError {
    /// Store unreachable or operation failed.
    pub fn unavailable(message: impl Into<String>) -> Self {
        Self::Unavailable {
            message: message.into(),
        }
    }
}

/// Port for the keyed counter store backing the rate limiter.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CounterStore: Send + Sync {
    /// Read the current count for a token; `None` for unknown or expired.
    async fn get(&self, token: &str) -> Result<Option<u64>, CounterStoreError>;

    /// Store a count under a token with a TTL, overwriting any prior value.
    async fn put(&self, token: &str, count: u64, ttl: Duration) -> Result<(), CounterStoreError>;

    /// Atomically increment a token's count and return the new value.
    async fn increment(&self, token: &str) -> Result<u64, CounterStoreError>;
}

/// Fixture store that remembers nothing and therefore admits everything.
#[derive(Debug, Clone, Copy, Default)]
pub struct FixtureCounterStore;

#[async_trait]
impl CounterStore for FixtureCounterStore {
    async fn get(&self, _token: &str) -> Result<Option<u64>, CounterStoreError> {
        Ok(None)
    }

    async fn put(
        &self,
        _token: &str,
        _count: u64,
        _ttl: Duration,
    ) -> Result<(), CounterStoreError> {
        Ok(())
    }

    async fn increment(&self, _token: &str) -> Result<u64, CounterStoreError> {
        Ok(1)
    }
}
