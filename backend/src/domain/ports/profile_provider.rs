//! Driven port for the game-platform profile data provider.
//!
//! The domain owns the request and response shapes so orchestration stays
//! adapter-agnostic. One trait covers the whole provider surface: every
//! operation hits the same upstream API family and shares its failure modes.

use async_trait::async_trait;
use chrono::TimeZone;
use chrono::Utc;

use crate::domain::account::AccountId;
use crate::domain::features::{BanRecord, GameLibrary, ProfileSummary, Visibility};

/// Upstream per-call ceiling on ban-record batch size.
pub const BAN_BATCH_LIMIT: usize = 100;

/// Errors surfaced while calling the provider.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ProviderError {
    /// Network transport failed before receiving a response.
    #[error("provider transport failed: {message}")]
    Transport {
        /// Transport failure description.
        message: String,
    },
    /// The call exceeded its timeout.
    #[error("provider call timed out: {message}")]
    Timeout {
        /// Timeout description.
        message: String,
    },
    /// The provider rate-limited the request.
    #[error("provider rate limited the request: {message}")]
    RateLimited {
        /// Rate-limit description.
        message: String,
    },
    /// The response could not be decoded into domain types.
    #[error("provider response decode failed: {message}")]
    Decode {
        /// Decode failure description.
        message: String,
    },
    /// The requested account does not exist upstream.
    #[error("profile not found: {message}")]
    NotFound {
        /// Lookup description.
        message: String,
    },
    /// The provider denied access to the requested data.
    #[error("provider denied access: {message}")]
    PermissionDenied {
        /// Denial description.
        message: String,
    },
    /// The provider answered with an unexpected status.
    #[error("provider returned status {status}: {message}")]
    Status {
        /// HTTP status code.
        status: u16,
        /// Response description.
        message: String,
    },
}

impl ProviderError {
    /// Network transport failure.
    pub fn transport(message: impl Into<String>) -> Self {
        Self::Transport {
            message: message.into(),
        }
    }

    /// Call timed out.
    pub fn timeout(message: impl Into<String>) -> Self {
        Self::Timeout {
            message: message.into(),
        }
    }

    /// Upstream rate limiting.
    pub fn rate_limited(message: impl Into<String>) -> Self {
        Self::RateLimited {
            message: message.into(),
        }
    }

    /// Response decoding failure.
    pub fn decode(message: impl Into<String>) -> Self {
        Self::Decode {
            message: message.into(),
        }
    }

    /// Missing account.
    pub fn not_found(message: impl Into<String>) -> Self {
        Self::NotFound {
            message: message.into(),
        }
    }

    /// Access denied.
    pub fn permission_denied(message: impl Into<String>) -> Self {
        Self::PermissionDenied {
            message: message.into(),
        }
    }

    /// Unexpected status.
    pub fn status(status: u16, message: impl Into<String>) -> Self {
        Self::Status {
            status,
            message: message.into(),
        }
    }
}

/// Port for the external profile-data provider.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ProfileProvider: Send + Sync {
    /// Resolve a vanity profile name into a canonical account id.
    async fn resolve_vanity(&self, name: &str) -> Result<AccountId, ProviderError>;

    /// Fetch the account summary (visibility, creation time, display data).
    async fn player_summary(&self, id: &AccountId) -> Result<ProfileSummary, ProviderError>;

    /// Fetch the account's platform level.
    async fn steam_level(&self, id: &AccountId) -> Result<u32, ProviderError>;

    /// Fetch owned-game count and target-game playtime.
    async fn owned_games(&self, id: &AccountId) -> Result<GameLibrary, ProviderError>;

    /// Fetch the account's friend list as account ids.
    ///
    /// A friends-only or private list surfaces as
    /// [`ProviderError::PermissionDenied`]; the caller decides whether that
    /// is fatal.
    async fn friend_ids(&self, id: &AccountId) -> Result<Vec<AccountId>, ProviderError>;

    /// Fetch ban records for up to [`BAN_BATCH_LIMIT`] accounts in one call.
    ///
    /// Callers chunk larger sets; implementations may reject oversized input.
    async fn ban_records(&self, ids: &[AccountId]) -> Result<Vec<BanRecord>, ProviderError>;

    /// Fetch the plain text of the account's profile comment thread.
    async fn comment_text(&self, id: &AccountId) -> Result<String, ProviderError>;
}

/// Fixture provider returning a deterministic public profile.
///
/// Useful for wiring tests and store-less smoke runs.
#[derive(Debug, Clone, Copy, Default)]
pub struct FixtureProfileProvider;

impl FixtureProfileProvider {
    fn account(id: &AccountId) -> AccountId {
        id.clone()
    }
}

#[async_trait]
impl ProfileProvider for FixtureProfileProvider {
    async fn resolve_vanity(&self, _name: &str) -> Result<AccountId, ProviderError> {
        AccountId::new("76561198000000001")
            .map_err(|err| ProviderError::decode(format!("fixture id invalid: {err}")))
    }

    async fn player_summary(&self, id: &AccountId) -> Result<ProfileSummary, ProviderError> {
        let created_at = Utc
            .with_ymd_and_hms(2015, 6, 1, 12, 0, 0)
            .single()
            .ok_or_else(|| ProviderError::decode("fixture timestamp invalid"))?;
        Ok(ProfileSummary {
            account_id: Self::account(id),
            visibility: Visibility::Public,
            created_at: Some(created_at),
            persona_name: Some("fixture".to_owned()),
            avatar_url: None,
        })
    }

    async fn steam_level(&self, _id: &AccountId) -> Result<u32, ProviderError> {
        Ok(10)
    }

    async fn owned_games(&self, _id: &AccountId) -> Result<GameLibrary, ProviderError> {
        Ok(GameLibrary {
            game_count: 42,
            playtime_minutes: 60_000,
            linux_playtime_minutes: 0,
        })
    }

    async fn friend_ids(&self, _id: &AccountId) -> Result<Vec<AccountId>, ProviderError> {
        Ok(Vec::new())
    }

    async fn ban_records(&self, ids: &[AccountId]) -> Result<Vec<BanRecord>, ProviderError> {
        Ok(ids
            .iter()
            .map(|id| BanRecord {
                account_id: id.clone(),
                vac_banned: false,
                vac_ban_count: 0,
            })
            .collect())
    }

    async fn comment_text(&self, _id: &AccountId) -> Result<String, ProviderError> {
        Ok(String::new())
    }
}
