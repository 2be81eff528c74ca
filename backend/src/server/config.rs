//! Process configuration from environment variables.
//!
//! Everything the bootstrap wires together is read once here; nothing else
//! in the crate touches the environment.

use std::env;
use std::net::SocketAddr;
use std::time::Duration;

use reqwest::Url;

use crate::domain::RateLimitConfig;
use crate::outbound::steam::SteamProviderSettings;

const DEFAULT_BIND_ADDR: &str = "0.0.0.0:8080";

/// Errors raised while reading configuration.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConfigError {
    /// A required variable is absent.
    #[error("missing required environment variable {name}")]
    Missing {
        /// Variable name.
        name: &'static str,
    },
    /// A variable is present but unparseable.
    #[error("invalid value for {name}: {message}")]
    Invalid {
        /// Variable name.
        name: &'static str,
        /// Parse failure description.
        message: String,
    },
}

impl ConfigError {
    fn missing(name: &'static str) -> Self {
        Self::Missing { name }
    }

    fn invalid(name: &'static str, message: impl Into<String>) -> Self {
        Self::Invalid {
            name,
            message: message.into(),
        }
    }
}

/// Resolved application configuration.
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// Socket the HTTP server binds to.
    pub bind_addr: SocketAddr,
    /// Whether the admission cookie is marked `Secure`.
    pub cookie_secure: bool,
    /// Provider connection settings.
    pub provider: SteamProviderSettings,
    /// Admission policy.
    pub rate_limit: RateLimitConfig,
    /// Ceiling on one request's aggregation work.
    pub request_deadline: Duration,
    /// Redis URL for the counter store; in-memory fallback when absent.
    pub redis_url: Option<String>,
    /// PostgreSQL URL for report persistence; discard-writes fallback when
    /// absent.
    pub database_url: Option<String>,
}

impl AppConfig {
    /// Read configuration from the process environment.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] when `STEAM_API_KEY` is missing or any
    /// present variable fails to parse.
    pub fn from_env() -> Result<Self, ConfigError> {
        let api_key =
            env::var("STEAM_API_KEY").map_err(|_| ConfigError::missing("STEAM_API_KEY"))?;
        let mut provider = SteamProviderSettings::new(api_key)
            .map_err(|err| ConfigError::invalid("STEAM_API_KEY", err.to_string()))?;

        if let Ok(base) = env::var("STEAM_API_BASE") {
            provider.api_base = Url::parse(&base)
                .map_err(|err| ConfigError::invalid("STEAM_API_BASE", err.to_string()))?;
        }
        if let Ok(base) = env::var("STEAM_COMMUNITY_BASE") {
            provider.community_base = Url::parse(&base)
                .map_err(|err| ConfigError::invalid("STEAM_COMMUNITY_BASE", err.to_string()))?;
        }
        if let Ok(app_id) = env::var("TARGET_APP_ID") {
            provider.target_app_id = app_id
                .parse()
                .map_err(|err| ConfigError::invalid("TARGET_APP_ID", format!("{err}")))?;
        }
        provider.timeout = duration_var("UPSTREAM_TIMEOUT_SECS", provider.timeout)?;

        let bind_addr = env::var("BIND_ADDR")
            .unwrap_or_else(|_| DEFAULT_BIND_ADDR.to_owned())
            .parse()
            .map_err(|err| ConfigError::invalid("BIND_ADDR", format!("{err}")))?;

        let default_rate = RateLimitConfig::default();
        let rate_limit = RateLimitConfig {
            limit: integer_var("RATE_LIMIT", default_rate.limit)?,
            ttl: duration_var("RATE_LIMIT_TTL_SECS", default_rate.ttl)?,
        };

        Ok(Self {
            bind_addr,
            cookie_secure: env::var("COOKIE_SECURE").map(|v| v != "0").unwrap_or(true),
            provider,
            rate_limit,
            request_deadline: duration_var(
                "REQUEST_DEADLINE_SECS",
                crate::domain::pipeline::DEFAULT_DEADLINE,
            )?,
            redis_url: env::var("REDIS_URL").ok(),
            database_url: env::var("DATABASE_URL").ok(),
        })
    }
}

fn integer_var(name: &'static str, default: u64) -> Result<u64, ConfigError> {
    match env::var(name) {
        Ok(value) => value
            .parse()
            .map_err(|err| ConfigError::invalid(name, format!("{err}"))),
        Err(_) => Ok(default),
    }
}

fn duration_var(name: &'static str, default: Duration) -> Result<Duration, ConfigError> {
    Ok(Duration::from_secs(integer_var(
        name,
        default.as_secs(),
    )?))
}
