//! Domain types and services.
//!
//! Everything in this module is transport- and storage-agnostic. Adapters
//! live under `outbound/` and `inbound/`; they talk to the domain through
//! the traits in [`ports`].

pub mod account;
pub mod aggregator;
pub mod ban_lookup;
pub mod error;
pub mod features;
pub mod pipeline;
pub mod ports;
pub mod rate_limit;
pub mod resolver;
pub mod score;
pub mod sentiment;

pub use self::account::{AccountId, AccountReference};
pub use self::error::{Error, ErrorCode};
pub use self::features::{BanRecord, FeatureVector, GameLibrary, ProfileSummary, TrustReport, Visibility};
pub use self::pipeline::TrustReportPipeline;
pub use self::rate_limit::{Admission, RateLimitConfig, RateLimiter};
pub use self::score::trust_score;

use self::ports::ProviderError;

/// Map a provider failure into the domain error taxonomy.
///
/// Not-found keeps its identity; everything else an upstream call can throw
/// is an upstream failure from the caller's point of view, and is not
/// retried.
pub(crate) fn map_provider_error(error: ProviderError) -> Error {
    match error {
        ProviderError::NotFound { message } => Error::not_found(message),
        other => Error::upstream_unavailable(other.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn provider_not_found_keeps_its_identity() {
        let err = map_provider_error(ProviderError::not_found("no player found"));
        assert_eq!(err.code(), ErrorCode::NotFound);
    }

    #[test]
    fn other_provider_failures_map_to_upstream_unavailable() {
        for error in [
            ProviderError::transport("reset"),
            ProviderError::timeout("deadline"),
            ProviderError::rate_limited("429"),
            ProviderError::decode("bad json"),
            ProviderError::permission_denied("private"),
            ProviderError::status(500, "boom"),
        ] {
            assert_eq!(
                map_provider_error(error).code(),
                ErrorCode::UpstreamUnavailable
            );
        }
    }
}
