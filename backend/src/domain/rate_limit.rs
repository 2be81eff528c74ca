//! Per-caller admission control over a keyed counter store.
//!
//! Fixed-window limiting: each caller carries an opaque token whose counter
//! lives in the store under a TTL. Admission for a known token uses a single
//! atomic increment-and-read, never read-then-write, so concurrent requests
//! on the same token cannot lose updates. A token already at the limit is
//! rejected without any write, leaving the stored counter untouched.
//!
//! Store outages fail closed: the limiter exists to protect the externally
//! rate-limited provider, and admitting unmetered traffic while the store is
//! down would remove that protection exactly when the deployment is
//! degraded.

use std::sync::Arc;
use std::time::Duration;

use tracing::{debug, warn};
use uuid::Uuid;

use super::ports::{CounterStore, CounterStoreError};
use crate::domain::Error;

/// Admission policy knobs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RateLimitConfig {
    /// Requests admitted per token per window.
    pub limit: u64,
    /// Window length; counters expire implicitly after this.
    pub ttl: Duration,
}

impl Default for RateLimitConfig {
    fn default() -> Self {
        Self {
            limit: 2,
            ttl: Duration::from_secs(60),
        }
    }
}

/// Outcome of an admitted request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Admission {
    /// The caller's token; freshly minted when `fresh` is true.
    pub token: String,
    /// Requests counted against the token so far, this one included.
    pub count: u64,
    /// Whether the token was issued by this admission.
    pub fresh: bool,
}

/// Fixed-window rate limiter gating the whole pipeline.
#[derive(Clone)]
pub struct RateLimiter {
    store: Arc<dyn CounterStore>,
    config: RateLimitConfig,
}

impl RateLimiter {
    /// Create a limiter over the given store.
    pub fn new(store: Arc<dyn CounterStore>, config: RateLimitConfig) -> Self {
        Self { store, config }
    }

    /// The configured window length.
    pub fn ttl(&self) -> Duration {
        self.config.ttl
    }

    /// Decide admission for a caller-supplied token.
    ///
    /// `None` or an unknown (expired) token mints a fresh one with its
    /// counter at 1. A known token below the limit is incremented
    /// atomically and admitted iff the post-increment value stays within the
    /// limit; at or above the limit the request is rejected with no write.
    ///
    /// # Errors
    ///
    /// `rate_limited` on rejection; `service_unavailable` when the store is
    /// unreachable (fail-closed).
    pub async fn admit(&self, token: Option<&str>) -> Result<Admission, Error> {
        let Some(token) = token else {
            return self.issue().await;
        };

        match self.store.get(token).await.map_err(map_store_error)? {
            None => {
                // Unknown or expired: the caller gets a new identity rather
                // than reviving an arbitrary key it presented.
                debug!("unknown rate-limit token, issuing a fresh one");
                self.issue().await
            }
            Some(count) if count >= self.config.limit => Err(self.rejection(count)),
            Some(_) => {
                let count = self
                    .store
                    .increment(token)
                    .await
                    .map_err(map_store_error)?;
                if count > self.config.limit {
                    // A concurrent request won the race for the last slot.
                    return Err(self.rejection(count));
                }
                Ok(Admission {
                    token: token.to_owned(),
                    count,
                    fresh: false,
                })
            }
        }
    }

    async fn issue(&self) -> Result<Admission, Error> {
        let token = Uuid::new_v4().to_string();
        self.store
            .put(&token, 1, self.config.ttl)
            .await
            .map_err(map_store_error)?;
        Ok(Admission {
            token,
            count: 1,
            fresh: true,
        })
    }

    fn rejection(&self, count: u64) -> Error {
        debug!(count, limit = self.config.limit, "admission rejected");
        Error::rate_limited("request quota exhausted, retry after the window expires")
    }
}

fn map_store_error(error: CounterStoreError) -> Error {
    warn!(%error, "counter store unreachable, failing closed");
    Error::service_unavailable("admission control is unavailable")
}
