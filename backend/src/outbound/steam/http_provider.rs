//! Reqwest-backed provider adapter for the Steam Web API.
//!
//! This adapter owns transport details only: endpoint layout, query
//! serialisation, timeout and HTTP error mapping, and JSON decoding into
//! domain records. The comment endpoint additionally extracts plain text
//! from the rendered markup before handing it to the domain.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, StatusCode, Url};
use scraper::{Html, Selector};
use serde::de::DeserializeOwned;

use super::dto::{
    BansEnvelopeDto, CommentRenderDto, FriendsEnvelopeDto, LevelEnvelopeDto, OwnedGamesEnvelopeDto,
    SummariesEnvelopeDto, VanityEnvelopeDto, VanityResponseDto,
};
use crate::domain::account::AccountId;
use crate::domain::features::{BanRecord, GameLibrary, ProfileSummary};
use crate::domain::ports::{ProfileProvider, ProviderError};

const DEFAULT_API_BASE: &str = "https://api.steampowered.com";
const DEFAULT_COMMUNITY_BASE: &str = "https://steamcommunity.com";
/// App the playtime features are measured against (Team Fortress 2).
const DEFAULT_TARGET_APP_ID: u32 = 440;
const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);
/// Page size requested from the comment render endpoint.
const COMMENT_PAGE_SIZE: u32 = 1000;

/// CSS selector for comment bodies in the rendered thread markup.
const COMMENT_TEXT_SELECTOR: &str = "div.commentthread_comment_text";

/// Connection settings for [`SteamHttpProvider`].
#[derive(Debug, Clone)]
pub struct SteamProviderSettings {
    /// API key sent with every Web API call.
    pub api_key: String,
    /// Base URL of the Web API host.
    pub api_base: Url,
    /// Base URL of the community host serving comment threads.
    pub community_base: Url,
    /// App the playtime features are filtered to.
    pub target_app_id: u32,
    /// Per-call HTTP timeout.
    pub timeout: Duration,
}

impl SteamProviderSettings {
    /// Settings with production hosts and default timeout.
    ///
    /// # Errors
    ///
    /// Returns an error when the built-in base URLs fail to parse, which
    /// indicates a build-level defect rather than a runtime condition.
    pub fn new(api_key: impl Into<String>) -> Result<Self, url::ParseError> {
        Ok(Self {
            api_key: api_key.into(),
            api_base: Url::parse(DEFAULT_API_BASE)?,
            community_base: Url::parse(DEFAULT_COMMUNITY_BASE)?,
            target_app_id: DEFAULT_TARGET_APP_ID,
            timeout: DEFAULT_TIMEOUT,
        })
    }
}

/// Provider adapter performing HTTP GET requests against the Web API.
pub struct SteamHttpProvider {
    client: Client,
    settings: SteamProviderSettings,
}

impl SteamHttpProvider {
    /// Build an adapter with its own connection pool and request timeout.
    ///
    /// # Errors
    ///
    /// Returns an error when the reqwest client cannot be constructed.
    pub fn new(settings: SteamProviderSettings) -> Result<Self, reqwest::Error> {
        let client = Client::builder().timeout(settings.timeout).build()?;
        Ok(Self { client, settings })
    }

    fn api_url(&self, path: &str) -> Result<Url, ProviderError> {
        self.settings
            .api_base
            .join(path)
            .map_err(|err| ProviderError::decode(format!("invalid endpoint path {path}: {err}")))
    }

    async fn get_json<T>(&self, url: Url, params: &[(&str, String)]) -> Result<T, ProviderError>
    where
        T: DeserializeOwned,
    {
        let response = self
            .client
            .get(url)
            .query(params)
            .send()
            .await
            .map_err(map_transport_error)?;

        let status = response.status();
        if !status.is_success() {
            return Err(map_status_error(status));
        }

        response
            .json::<T>()
            .await
            .map_err(|err| ProviderError::decode(format!("invalid JSON payload: {err}")))
    }

    fn key_param(&self) -> (&'static str, String) {
        ("key", self.settings.api_key.clone())
    }
}

#[async_trait]
impl ProfileProvider for SteamHttpProvider {
    async fn resolve_vanity(&self, name: &str) -> Result<AccountId, ProviderError> {
        let url = self.api_url("ISteamUser/ResolveVanityURL/v1/")?;
        let envelope: VanityEnvelopeDto = self
            .get_json(url, &[self.key_param(), ("vanityurl", name.to_owned())])
            .await?;

        if envelope.response.success != VanityResponseDto::MATCH {
            return Err(ProviderError::not_found(format!(
                "no profile matches vanity name {name}"
            )));
        }
        let steamid = envelope
            .response
            .steamid
            .ok_or_else(|| ProviderError::decode("vanity response is missing its steamid"))?;
        AccountId::new(steamid)
            .map_err(|err| ProviderError::decode(format!("vanity resolved to an invalid id: {err}")))
    }

    async fn player_summary(&self, id: &AccountId) -> Result<ProfileSummary, ProviderError> {
        let url = self.api_url("ISteamUser/GetPlayerSummaries/v2/")?;
        let envelope: SummariesEnvelopeDto = self
            .get_json(url, &[self.key_param(), ("steamids", id.to_string())])
            .await?;

        envelope
            .response
            .players
            .into_iter()
            .next()
            .ok_or_else(|| ProviderError::not_found("no player found"))?
            .into_domain()
            .map_err(ProviderError::decode)
    }

    async fn steam_level(&self, id: &AccountId) -> Result<u32, ProviderError> {
        let url = self.api_url("IPlayerService/GetSteamLevel/v1/")?;
        let envelope: LevelEnvelopeDto = self
            .get_json(url, &[self.key_param(), ("steamid", id.to_string())])
            .await?;

        envelope
            .response
            .player_level
            .ok_or_else(|| ProviderError::decode("level response is missing player_level"))
    }

    async fn owned_games(&self, id: &AccountId) -> Result<GameLibrary, ProviderError> {
        let url = self.api_url("IPlayerService/GetOwnedGames/v1/")?;
        let envelope: OwnedGamesEnvelopeDto = self
            .get_json(
                url,
                &[
                    self.key_param(),
                    ("steamid", id.to_string()),
                    ("format", "json".to_owned()),
                    ("include_appinfo", "1".to_owned()),
                    ("include_played_free_games", "1".to_owned()),
                ],
            )
            .await?;

        Ok(envelope.response.into_domain(self.settings.target_app_id))
    }

    async fn friend_ids(&self, id: &AccountId) -> Result<Vec<AccountId>, ProviderError> {
        let url = self.api_url("ISteamUser/GetFriendList/v1/")?;
        let envelope: FriendsEnvelopeDto = self
            .get_json(
                url,
                &[
                    self.key_param(),
                    ("steamid", id.to_string()),
                    ("relationship", "friend".to_owned()),
                ],
            )
            .await?;

        envelope.friendslist.into_domain().map_err(ProviderError::decode)
    }

    async fn ban_records(&self, ids: &[AccountId]) -> Result<Vec<BanRecord>, ProviderError> {
        let steamids = ids
            .iter()
            .map(AccountId::as_str)
            .collect::<Vec<_>>()
            .join(",");
        let url = self.api_url("ISteamUser/GetPlayerBans/v1/")?;
        let envelope: BansEnvelopeDto = self
            .get_json(
                url,
                &[
                    self.key_param(),
                    ("steamids", steamids),
                    ("format", "json".to_owned()),
                ],
            )
            .await?;

        envelope
            .players
            .into_iter()
            .map(|player| player.into_domain().map_err(ProviderError::decode))
            .collect()
    }

    async fn comment_text(&self, id: &AccountId) -> Result<String, ProviderError> {
        let url = self
            .settings
            .community_base
            .join(&format!("comment/Profile/render/{id}/-1/"))
            .map_err(|err| ProviderError::decode(format!("invalid comment path: {err}")))?;
        let envelope: CommentRenderDto = self
            .get_json(
                url,
                &[
                    ("start", "0".to_owned()),
                    ("count", COMMENT_PAGE_SIZE.to_string()),
                    ("totalcount", COMMENT_PAGE_SIZE.to_string()),
                ],
            )
            .await?;

        if !envelope.success {
            let reason = envelope
                .error
                .unwrap_or_else(|| "comment thread is not accessible".to_owned());
            return Err(ProviderError::permission_denied(reason));
        }

        let html = envelope.comments_html.unwrap_or_default();
        extract_comment_text(&html)
    }
}

/// Pull the visible text out of the rendered comment markup.
fn extract_comment_text(html: &str) -> Result<String, ProviderError> {
    if html.is_empty() {
        return Ok(String::new());
    }
    let selector = Selector::parse(COMMENT_TEXT_SELECTOR)
        .map_err(|err| ProviderError::decode(format!("invalid comment selector: {err}")))?;
    let fragment = Html::parse_fragment(html);
    Ok(fragment
        .select(&selector)
        .flat_map(|element| element.text())
        .collect::<Vec<_>>()
        .join(" "))
}

fn map_transport_error(error: reqwest::Error) -> ProviderError {
    if error.is_timeout() {
        ProviderError::timeout(error.to_string())
    } else {
        ProviderError::transport(error.to_string())
    }
}

fn map_status_error(status: StatusCode) -> ProviderError {
    match status {
        StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => {
            ProviderError::permission_denied(format!("provider denied the call ({status})"))
        }
        StatusCode::NOT_FOUND => ProviderError::not_found("provider has no such resource"),
        StatusCode::TOO_MANY_REQUESTS => {
            ProviderError::rate_limited("provider throttled the call")
        }
        other => ProviderError::status(other.as_u16(), "unexpected provider status"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn comment_text_extraction_keeps_only_comment_bodies() {
        let html = r#"
            <div class="commentthread_comment">
                <div class="commentthread_comment_author">someone</div>
                <div class="commentthread_comment_text"> nice player </div>
            </div>
            <div class="commentthread_comment_text">+rep <b>great</b> trade</div>
        "#;
        let text = extract_comment_text(html).expect("extraction succeeds");
        assert!(text.contains("nice player"));
        assert!(text.contains("great"));
        assert!(!text.contains("someone"));
    }

    #[test]
    fn empty_markup_extracts_to_empty_text() {
        assert_eq!(extract_comment_text("").expect("empty ok"), "");
    }

    #[test]
    fn status_mapping_distinguishes_denials() {
        assert!(matches!(
            map_status_error(StatusCode::UNAUTHORIZED),
            ProviderError::PermissionDenied { .. }
        ));
        assert!(matches!(
            map_status_error(StatusCode::TOO_MANY_REQUESTS),
            ProviderError::RateLimited { .. }
        ));
        assert!(matches!(
            map_status_error(StatusCode::BAD_GATEWAY),
            ProviderError::Status { status: 502, .. }
        ));
    }

    #[test]
    fn settings_default_to_production_hosts() {
        let settings = SteamProviderSettings::new("key").expect("valid defaults");
        assert_eq!(settings.api_base.as_str(), "https://api.steampowered.com/");
        assert_eq!(settings.target_app_id, DEFAULT_TARGET_APP_ID);
    }
}
