//! Profile signals and the derived feature vector.
//!
//! The aggregator fetches raw signals ([`ProfileSummary`], [`BanRecord`],
//! [`GameLibrary`], friend ids, comment text) and reduces them into one
//! [`FeatureVector`]. Every field of the vector is always present; "unknown"
//! or "not applicable" is an explicit zero or sentinel, never field absence.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use super::account::AccountId;
use super::sentiment::NO_SIGNAL;

/// Profile visibility as reported by the provider.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum Visibility {
    /// Profile details are readable by anyone.
    Public,
    /// Profile details are hidden.
    Private,
    /// Friends-only or any other non-public state.
    Restricted,
}

impl Visibility {
    /// Whether detail endpoints will return usable data.
    pub fn is_public(self) -> bool {
        matches!(self, Self::Public)
    }
}

/// Account summary returned by the provider's summary endpoint.
#[derive(Debug, Clone, PartialEq)]
pub struct ProfileSummary {
    /// Canonical account identifier.
    pub account_id: AccountId,
    /// Profile visibility state.
    pub visibility: Visibility,
    /// Account creation time; absent on non-public profiles.
    pub created_at: Option<DateTime<Utc>>,
    /// Display name.
    pub persona_name: Option<String>,
    /// Avatar image URL.
    pub avatar_url: Option<String>,
}

/// Ban state for one account.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BanRecord {
    /// Account the record belongs to.
    pub account_id: AccountId,
    /// Whether the account carries an active VAC ban.
    pub vac_banned: bool,
    /// Number of VAC bans on record.
    pub vac_ban_count: u32,
}

/// Owned-game count and target-game playtime, filtered by the adapter to the
/// configured target app.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct GameLibrary {
    /// Number of owned games.
    pub game_count: u32,
    /// Total target-game playtime in minutes.
    pub playtime_minutes: u64,
    /// Target-game playtime on Linux in minutes.
    pub linux_playtime_minutes: u64,
}

/// The aggregated record consumed by the trust scorer.
///
/// Derived fields are only fully populated when `visible` is true; a hidden
/// profile yields [`FeatureVector::hidden`] and no further provider calls.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct FeatureVector {
    /// Whether the profile is public.
    pub visible: bool,
    /// Days since account creation, rounded up.
    pub account_age_days: i64,
    /// Platform level.
    pub level: u32,
    /// Owned-game count.
    pub game_count: u32,
    /// Friend-list size.
    pub friend_count: u32,
    /// Share of friends with a VAC ban; 1.0 when the friend list is empty or
    /// unobservable.
    pub friend_ban_ratio: f64,
    /// Total target-game hours, floored.
    pub total_hours: u64,
    /// Target-game hours on Linux, floored.
    pub linux_hours: u64,
    /// Linux share of total playtime; 0 when total playtime is zero.
    pub linux_ratio: f64,
    /// Whether the account carries an active VAC ban.
    pub vac_banned: bool,
    /// Number of VAC bans on record.
    pub vac_ban_count: u32,
    /// Comment polarity in [-1, 1]; -1 also stands for "no usable signal".
    pub sentiment: f64,
}

impl FeatureVector {
    /// Minimal vector for a non-public profile.
    ///
    /// Ban fields keep their fetched values; every derived field is zero and
    /// sentiment holds the no-signal sentinel.
    pub fn hidden(ban: &BanRecord) -> Self {
        Self {
            visible: false,
            account_age_days: 0,
            level: 0,
            game_count: 0,
            friend_count: 0,
            friend_ban_ratio: 0.0,
            total_hours: 0,
            linux_hours: 0,
            linux_ratio: 0.0,
            vac_banned: ban.vac_banned,
            vac_ban_count: ban.vac_ban_count,
            sentiment: NO_SIGNAL,
        }
    }
}

/// The computed report: the feature vector plus its score, keyed by account.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrustReport {
    /// Account the report describes.
    pub account_id: AccountId,
    /// Aggregated signals.
    pub features: FeatureVector,
    /// Deterministic penalty-based score; unclamped.
    pub trust_score: i32,
    /// When the report was computed.
    pub generated_at: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ban(banned: bool, count: u32) -> BanRecord {
        BanRecord {
            account_id: AccountId::new("76561198030958226").expect("valid id"),
            vac_banned: banned,
            vac_ban_count: count,
        }
    }

    #[test]
    fn hidden_vector_keeps_ban_fields() {
        let vector = FeatureVector::hidden(&ban(true, 3));
        assert!(!vector.visible);
        assert!(vector.vac_banned);
        assert_eq!(vector.vac_ban_count, 3);
        assert_eq!(vector.account_age_days, 0);
        assert_eq!(vector.sentiment, NO_SIGNAL);
    }

    #[test]
    fn feature_vector_serialises_camel_case() {
        let value =
            serde_json::to_value(FeatureVector::hidden(&ban(false, 0))).expect("serialise vector");
        assert!(value.get("friendBanRatio").is_some());
        assert!(value.get("accountAgeDays").is_some());
        assert!(value.get("friend_ban_ratio").is_none());
    }
}
