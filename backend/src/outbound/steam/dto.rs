//! DTOs for decoding provider JSON responses.
//!
//! The adapter decodes into these transport DTOs first, then maps into
//! domain records in one pass. Field names mirror the wire format exactly;
//! anything the upstream may omit is an `Option` here so that missing data
//! becomes a named decode error instead of an implicit panic.

use chrono::{DateTime, TimeZone, Utc};
use serde::Deserialize;

use crate::domain::account::AccountId;
use crate::domain::features::{BanRecord, GameLibrary, ProfileSummary, Visibility};

/// Wire value for a fully public profile.
const VISIBILITY_PUBLIC: i32 = 3;
/// Wire value for a private profile.
const VISIBILITY_PRIVATE: i32 = 1;

#[derive(Debug, Deserialize)]
pub(super) struct VanityEnvelopeDto {
    pub(super) response: VanityResponseDto,
}

#[derive(Debug, Deserialize)]
pub(super) struct VanityResponseDto {
    pub(super) success: i32,
    pub(super) steamid: Option<String>,
}

impl VanityResponseDto {
    /// Wire value signalling a successful vanity match.
    pub(super) const MATCH: i32 = 1;
}

#[derive(Debug, Deserialize)]
pub(super) struct SummariesEnvelopeDto {
    pub(super) response: SummariesResponseDto,
}

#[derive(Debug, Deserialize)]
pub(super) struct SummariesResponseDto {
    #[serde(default)]
    pub(super) players: Vec<PlayerSummaryDto>,
}

#[derive(Debug, Deserialize)]
pub(super) struct PlayerSummaryDto {
    pub(super) steamid: String,
    pub(super) communityvisibilitystate: Option<i32>,
    pub(super) timecreated: Option<i64>,
    pub(super) personaname: Option<String>,
    pub(super) avatarfull: Option<String>,
}

impl PlayerSummaryDto {
    pub(super) fn into_domain(self) -> Result<ProfileSummary, String> {
        let account_id = AccountId::new(self.steamid)
            .map_err(|err| format!("summary carries an invalid steamid: {err}"))?;
        let visibility = match self.communityvisibilitystate {
            Some(VISIBILITY_PUBLIC) => Visibility::Public,
            Some(VISIBILITY_PRIVATE) | None => Visibility::Private,
            Some(_) => Visibility::Restricted,
        };
        let created_at = match self.timecreated {
            Some(epoch) => Some(epoch_to_utc(epoch)?),
            None => None,
        };
        Ok(ProfileSummary {
            account_id,
            visibility,
            created_at,
            persona_name: self.personaname,
            avatar_url: self.avatarfull,
        })
    }
}

fn epoch_to_utc(epoch: i64) -> Result<DateTime<Utc>, String> {
    Utc.timestamp_opt(epoch, 0)
        .single()
        .ok_or_else(|| format!("timecreated {epoch} is out of range"))
}

#[derive(Debug, Deserialize)]
pub(super) struct LevelEnvelopeDto {
    pub(super) response: LevelResponseDto,
}

#[derive(Debug, Deserialize)]
pub(super) struct LevelResponseDto {
    pub(super) player_level: Option<u32>,
}

#[derive(Debug, Deserialize)]
pub(super) struct OwnedGamesEnvelopeDto {
    pub(super) response: OwnedGamesResponseDto,
}

/// The upstream returns an entirely empty object for a hidden library, so
/// every field defaults.
#[derive(Debug, Deserialize, Default)]
pub(super) struct OwnedGamesResponseDto {
    pub(super) game_count: Option<u32>,
    #[serde(default)]
    pub(super) games: Vec<OwnedGameDto>,
}

#[derive(Debug, Deserialize)]
pub(super) struct OwnedGameDto {
    pub(super) appid: u32,
    #[serde(default)]
    pub(super) playtime_forever: u64,
    #[serde(default)]
    pub(super) playtime_linux_forever: u64,
}

impl OwnedGamesResponseDto {
    /// Reduce the library to the counts the feature vector consumes,
    /// filtered to one target app. An absent target game is a valid zero.
    pub(super) fn into_domain(self, target_app_id: u32) -> GameLibrary {
        let target = self.games.iter().find(|game| game.appid == target_app_id);
        GameLibrary {
            game_count: self.game_count.unwrap_or(0),
            playtime_minutes: target.map_or(0, |game| game.playtime_forever),
            linux_playtime_minutes: target.map_or(0, |game| game.playtime_linux_forever),
        }
    }
}

#[derive(Debug, Deserialize)]
pub(super) struct FriendsEnvelopeDto {
    pub(super) friendslist: FriendsListDto,
}

#[derive(Debug, Deserialize)]
pub(super) struct FriendsListDto {
    #[serde(default)]
    pub(super) friends: Vec<FriendDto>,
}

#[derive(Debug, Deserialize)]
pub(super) struct FriendDto {
    pub(super) steamid: String,
}

impl FriendsListDto {
    pub(super) fn into_domain(self) -> Result<Vec<AccountId>, String> {
        self.friends
            .into_iter()
            .map(|friend| {
                AccountId::new(friend.steamid)
                    .map_err(|err| format!("friend list carries an invalid steamid: {err}"))
            })
            .collect()
    }
}

#[derive(Debug, Deserialize)]
pub(super) struct BansEnvelopeDto {
    #[serde(default)]
    pub(super) players: Vec<PlayerBanDto>,
}

#[derive(Debug, Deserialize)]
pub(super) struct PlayerBanDto {
    #[serde(rename = "SteamId")]
    pub(super) steam_id: String,
    #[serde(rename = "VACBanned")]
    pub(super) vac_banned: bool,
    #[serde(rename = "NumberOfVACBans")]
    pub(super) number_of_vac_bans: u32,
}

impl PlayerBanDto {
    pub(super) fn into_domain(self) -> Result<BanRecord, String> {
        let account_id = AccountId::new(self.steam_id)
            .map_err(|err| format!("ban record carries an invalid steamid: {err}"))?;
        Ok(BanRecord {
            account_id,
            vac_banned: self.vac_banned,
            vac_ban_count: self.number_of_vac_bans,
        })
    }
}

/// Rendered comment-thread payload.
#[derive(Debug, Deserialize)]
pub(super) struct CommentRenderDto {
    pub(super) success: bool,
    pub(super) comments_html: Option<String>,
    pub(super) error: Option<String>,
}
