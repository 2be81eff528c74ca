//! Identity resolution: arbitrary account reference → canonical id.

use std::sync::Arc;

use tracing::debug;

use super::account::{AccountId, AccountReference, AccountReferenceParseError};
use super::map_provider_error;
use super::ports::ProfileProvider;
use crate::domain::Error;

/// Resolves caller-supplied account references to canonical ids.
///
/// Canonical and raw-id shapes resolve locally; only the vanity shape costs a
/// provider call, so resolution performs at most one network round trip.
#[derive(Clone)]
pub struct IdentityResolver<P> {
    provider: Arc<P>,
}

impl<P> IdentityResolver<P> {
    /// Create a resolver over the given provider.
    pub fn new(provider: Arc<P>) -> Self {
        Self { provider }
    }
}

impl<P> IdentityResolver<P>
where
    P: ProfileProvider,
{
    /// Resolve a raw reference string into a canonical [`AccountId`].
    ///
    /// Resolution is idempotent: a canonical id resolves to itself, and the
    /// same reference always yields the same id.
    ///
    /// # Errors
    ///
    /// `invalid_reference` for unrecognised input, `not_found` when a vanity
    /// name has no matching profile, `upstream_unavailable` when the
    /// resolution call fails.
    pub async fn resolve(&self, reference: &str) -> Result<AccountId, Error> {
        match AccountReference::parse(reference).map_err(map_parse_error)? {
            AccountReference::Canonical(id) => Ok(id),
            AccountReference::Vanity(name) => {
                debug!(vanity = %name, "resolving vanity name upstream");
                self.provider
                    .resolve_vanity(&name)
                    .await
                    .map_err(map_provider_error)
            }
        }
    }
}

fn map_parse_error(error: AccountReferenceParseError) -> Error {
    Error::invalid_reference(error.to_string())
}
