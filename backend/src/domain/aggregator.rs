//! Phased, concurrent aggregation of profile signals.
//!
//! Phase 1 fetches the account summary and ban record concurrently. A
//! non-public profile short-circuits there: the detail endpoints would not
//! return usable data, and every avoided call is quota saved against the
//! externally rate-limited provider. Phase 2 fans out over level, game
//! library, friend list, and comment text; Phase 3 resolves the friend-ban
//! ratio from the Phase-2 friend list.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use tracing::debug;

use super::account::AccountId;
use super::ban_lookup::BanLookup;
use super::features::{BanRecord, FeatureVector, GameLibrary};
use super::map_provider_error;
use super::ports::{ProfileProvider, ProviderError};
use super::sentiment;
use crate::domain::Error;

const MINUTES_PER_HOUR: u64 = 60;
const SECONDS_PER_DAY: i64 = 86_400;

/// Ratio assigned when the friend list is empty or unobservable.
///
/// An unobservable social graph is treated as maximally untrustworthy, not
/// as a missing value.
const UNOBSERVABLE_FRIEND_RATIO: f64 = 1.0;

/// Orchestrates the multi-source fetch and composes the feature vector.
#[derive(Clone)]
pub struct ProfileAggregator<P> {
    provider: Arc<P>,
    bans: BanLookup<P>,
}

impl<P> ProfileAggregator<P> {
    /// Create an aggregator over the given provider.
    pub fn new(provider: Arc<P>) -> Self {
        let bans = BanLookup::new(Arc::clone(&provider));
        Self { provider, bans }
    }
}

impl<P> ProfileAggregator<P>
where
    P: ProfileProvider,
{
    /// Collect all signals for one account into a [`FeatureVector`].
    ///
    /// Sibling failures inside a phase abort the remaining siblings and fail
    /// the request, with two deliberate exceptions: a permission-denied
    /// friend list degrades to an empty list, and an empty game library is a
    /// valid zero, not an error.
    pub async fn collect(&self, id: &AccountId) -> Result<FeatureVector, Error> {
        let (summary, ban) = tokio::try_join!(
            self.provider.player_summary(id),
            self.bans.single(id),
        )
        .map_err(map_provider_error)?;

        if !summary.visibility.is_public() {
            debug!(account_id = %id, visibility = ?summary.visibility, "profile hidden, skipping detail fetch");
            return Ok(FeatureVector::hidden(&ban));
        }

        let created_at = summary.created_at.ok_or_else(|| {
            Error::upstream_unavailable("public profile summary is missing its creation timestamp")
        })?;

        let (level, library, friends, comment_text) = tokio::try_join!(
            self.provider.steam_level(id),
            self.provider.owned_games(id),
            self.friend_ids_or_empty(id),
            self.provider.comment_text(id),
        )
        .map_err(map_provider_error)?;

        let friend_ban_ratio = self.friend_ban_ratio(&friends).await?;
        let sentiment = sentiment::score(&comment_text);

        Ok(compose(
            created_at,
            Utc::now(),
            level,
            library,
            u32::try_from(friends.len()).unwrap_or(u32::MAX),
            friend_ban_ratio,
            &ban,
            sentiment,
        ))
    }

    /// Friend list, with permission-denied degraded to an empty list.
    async fn friend_ids_or_empty(&self, id: &AccountId) -> Result<Vec<AccountId>, ProviderError> {
        match self.provider.friend_ids(id).await {
            Ok(friends) => Ok(friends),
            Err(ProviderError::PermissionDenied { message }) => {
                debug!(account_id = %id, %message, "friend list inaccessible, treating as empty");
                Ok(Vec::new())
            }
            Err(err) => Err(err),
        }
    }

    /// Share of friends carrying a VAC ban; the sentinel for an empty list.
    async fn friend_ban_ratio(&self, friends: &[AccountId]) -> Result<f64, Error> {
        if friends.is_empty() {
            return Ok(UNOBSERVABLE_FRIEND_RATIO);
        }
        let records = self
            .bans
            .records(friends)
            .await
            .map_err(map_provider_error)?;
        let banned = records.iter().filter(|record| record.vac_banned).count();
        Ok(banned as f64 / friends.len() as f64)
    }
}

/// Derive the final vector from fetched signals. Pure, clock passed in.
#[allow(
    clippy::too_many_arguments,
    reason = "one-shot composition of independent signals"
)]
fn compose(
    created_at: DateTime<Utc>,
    now: DateTime<Utc>,
    level: u32,
    library: GameLibrary,
    friend_count: u32,
    friend_ban_ratio: f64,
    ban: &BanRecord,
    sentiment: f64,
) -> FeatureVector {
    FeatureVector {
        visible: true,
        account_age_days: account_age_days(created_at, now),
        level,
        game_count: library.game_count,
        friend_count,
        friend_ban_ratio,
        total_hours: library.playtime_minutes / MINUTES_PER_HOUR,
        linux_hours: library.linux_playtime_minutes / MINUTES_PER_HOUR,
        linux_ratio: linux_ratio(&library),
        vac_banned: ban.vac_banned,
        vac_ban_count: ban.vac_ban_count,
        sentiment,
    }
}

/// Days since creation, rounded up; never negative.
fn account_age_days(created_at: DateTime<Utc>, now: DateTime<Utc>) -> i64 {
    let seconds = (now - created_at).num_seconds();
    if seconds <= 0 {
        return 0;
    }
    // `i64::div_ceil` is still unstable (rust-lang/rust#88581); both operands are
    // strictly positive here (the `<= 0` guard above), so the unsigned `div_ceil`
    // gives an identical result.
    (seconds as u64).div_ceil(SECONDS_PER_DAY as u64) as i64
}

/// Linux share of total playtime, with the zero-playtime division guarded.
fn linux_ratio(library: &GameLibrary) -> f64 {
    if library.playtime_minutes == 0 {
        return 0.0;
    }
    library.linux_playtime_minutes as f64 / library.playtime_minutes as f64
}

#[cfg(test)]
#[path = "aggregator_tests.rs"]
mod tests;
