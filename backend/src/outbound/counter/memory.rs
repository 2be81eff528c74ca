//! In-memory counter store.
//!
//! Backs the rate limiter in tests and in deployments that run without a
//! shared store. Expiry is enforced lazily: expired entries are purged on
//! access, and every operation holds the map lock for its full duration, so
//! increments are atomic with respect to each other.

use std::collections::HashMap;
use std::sync::Mutex;
use std::time::{Duration, Instant};

use async_trait::async_trait;

use crate::domain::ports::{CounterStore, CounterStoreError};

#[derive(Debug, Clone, Copy)]
struct Entry {
    count: u64,
    expires_at: Option<Instant>,
}

impl Entry {
    fn expired(&self, now: Instant) -> bool {
        self.expires_at.is_some_and(|deadline| deadline <= now)
    }
}

/// Process-local counter store with TTL semantics.
#[derive(Debug, Default)]
pub struct InMemoryCounterStore {
    entries: Mutex<HashMap<String, Entry>>,
}

impl InMemoryCounterStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> Result<std::sync::MutexGuard<'_, HashMap<String, Entry>>, CounterStoreError> {
        self.entries
            .lock()
            .map_err(|_| CounterStoreError::unavailable("counter map lock poisoned"))
    }
}

#[async_trait]
impl CounterStore for InMemoryCounterStore {
    async fn get(&self, token: &str) -> Result<Option<u64>, CounterStoreError> {
        let now = Instant::now();
        let mut entries = self.lock()?;
        match entries.get(token) {
            Some(entry) if entry.expired(now) => {
                entries.remove(token);
                Ok(None)
            }
            Some(entry) => Ok(Some(entry.count)),
            None => Ok(None),
        }
    }

    async fn put(&self, token: &str, count: u64, ttl: Duration) -> Result<(), CounterStoreError> {
        let entry = Entry {
            count,
            expires_at: Instant::now().checked_add(ttl),
        };
        self.lock()?.insert(token.to_owned(), entry);
        Ok(())
    }

    async fn increment(&self, token: &str) -> Result<u64, CounterStoreError> {
        let now = Instant::now();
        let mut entries = self.lock()?;
        let entry = entries
            .entry(token.to_owned())
            .and_modify(|entry| {
                if entry.expired(now) {
                    // A fresh window starts when an expired key is revived.
                    entry.count = 0;
                    entry.expires_at = None;
                }
            })
            .or_insert(Entry {
                count: 0,
                expires_at: None,
            });
        entry.count += 1;
        Ok(entry.count)
    }
}
