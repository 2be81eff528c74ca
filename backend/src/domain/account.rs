//! Account identity primitives.
//!
//! An [`AccountId`] is the canonical 17-digit numeric identifier used by the
//! platform. Callers rarely supply it directly; [`AccountReference::parse`]
//! accepts the three shapes the public profile surface exposes and classifies
//! them so the resolver knows whether a network call is needed.

use serde::{Deserialize, Serialize};
use url::Url;
use utoipa::ToSchema;

/// Number of digits in a canonical account identifier (SteamID64).
const ID_DIGITS: usize = 17;

/// Host serving community profile pages.
const COMMUNITY_HOST: &str = "steamcommunity.com";

/// Canonical numeric account identifier.
///
/// Immutable once constructed; the inner string is exactly 17 ASCII digits.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[serde(transparent)]
#[schema(example = "76561198030958226")]
pub struct AccountId(String);

/// Validation failures raised when constructing an [`AccountId`].
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum AccountIdValidationError {
    /// The identifier is not exactly 17 characters long.
    #[error("account id must be {ID_DIGITS} digits, got {got}")]
    Length {
        /// Observed character count.
        got: usize,
    },
    /// The identifier contains a non-digit character.
    #[error("account id must contain only ASCII digits")]
    NonDigit,
}

impl AccountId {
    /// Validate and wrap a raw identifier string.
    pub fn new(raw: impl Into<String>) -> Result<Self, AccountIdValidationError> {
        let raw = raw.into();
        if raw.len() != ID_DIGITS {
            return Err(AccountIdValidationError::Length { got: raw.len() });
        }
        if !raw.bytes().all(|b| b.is_ascii_digit()) {
            return Err(AccountIdValidationError::NonDigit);
        }
        Ok(Self(raw))
    }

    /// Borrow the identifier as a string slice.
    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

impl std::fmt::Display for AccountId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for AccountId {
    type Err = AccountIdValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}

/// A caller-supplied reference to an account, classified by how it resolves.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AccountReference {
    /// Already canonical; resolves locally without a network call.
    Canonical(AccountId),
    /// Vanity profile name; needs one provider call to resolve.
    Vanity(String),
}

/// Failures raised while classifying an account reference.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum AccountReferenceParseError {
    /// The input matches none of the recognised shapes.
    #[error("unrecognised account reference")]
    Unrecognised,
    /// The input looks like a profile URL but carries an invalid identifier.
    #[error("profile URL carries an invalid account id: {0}")]
    InvalidId(#[from] AccountIdValidationError),
}

impl AccountReference {
    /// Classify a raw reference string.
    ///
    /// Recognised shapes:
    /// - raw 17-digit numeric id,
    /// - `https://steamcommunity.com/profiles/<id>/`,
    /// - `https://steamcommunity.com/id/<vanity-name>/`.
    ///
    /// # Errors
    ///
    /// Returns [`AccountReferenceParseError::Unrecognised`] for anything else.
    pub fn parse(input: &str) -> Result<Self, AccountReferenceParseError> {
        let trimmed = input.trim();
        if trimmed.len() == ID_DIGITS && trimmed.bytes().all(|b| b.is_ascii_digit()) {
            return Ok(Self::Canonical(AccountId::new(trimmed)?));
        }

        let url = Url::parse(trimmed).map_err(|_| AccountReferenceParseError::Unrecognised)?;
        if !matches!(url.scheme(), "http" | "https") || url.host_str() != Some(COMMUNITY_HOST) {
            return Err(AccountReferenceParseError::Unrecognised);
        }

        let segments: Vec<&str> = url
            .path_segments()
            .map(|path| path.filter(|segment| !segment.is_empty()).collect())
            .unwrap_or_default();
        match segments.as_slice() {
            ["profiles", id] => Ok(Self::Canonical(AccountId::new(*id)?)),
            ["id", name] => Ok(Self::Vanity((*name).to_owned())),
            _ => Err(AccountReferenceParseError::Unrecognised),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    const RAW_ID: &str = "76561198030958226";

    #[test]
    fn accepts_raw_numeric_id() {
        let reference = AccountReference::parse(RAW_ID).expect("raw id parses");
        assert_eq!(
            reference,
            AccountReference::Canonical(AccountId::new(RAW_ID).expect("valid id"))
        );
    }

    #[rstest]
    #[case("https://steamcommunity.com/profiles/76561198030958226/")]
    #[case("https://steamcommunity.com/profiles/76561198030958226")]
    #[case("http://steamcommunity.com/profiles/76561198030958226/")]
    fn accepts_canonical_profile_urls(#[case] input: &str) {
        let reference = AccountReference::parse(input).expect("canonical url parses");
        assert!(matches!(reference, AccountReference::Canonical(_)));
    }

    #[test]
    fn accepts_vanity_url() {
        let reference = AccountReference::parse("https://steamcommunity.com/id/dr_pepper/")
            .expect("vanity url parses");
        assert_eq!(reference, AccountReference::Vanity("dr_pepper".to_owned()));
    }

    #[rstest]
    #[case("")]
    #[case("        ")]
    #[case("not-a-reference")]
    #[case("12345")]
    #[case("https://example.com/profiles/76561198030958226/")]
    #[case("https://steamcommunity.com/market/listings/440/thing")]
    #[case("ftp://steamcommunity.com/id/someone/")]
    fn rejects_unrecognised_shapes(#[case] input: &str) {
        assert!(matches!(
            AccountReference::parse(input),
            Err(AccountReferenceParseError::Unrecognised)
        ));
    }

    #[test]
    fn rejects_profile_url_with_short_id() {
        assert!(matches!(
            AccountReference::parse("https://steamcommunity.com/profiles/1234/"),
            Err(AccountReferenceParseError::InvalidId(_))
        ));
    }

    #[test]
    fn account_id_rejects_non_digits() {
        assert_eq!(
            AccountId::new("7656119803095822x"),
            Err(AccountIdValidationError::NonDigit)
        );
    }
}
