use std::str::FromStr;

use axum::http::HeaderValue;
use chrono::FixedOffset;
use eventhub_core::booking::UnmatchedTierPolicy;

use crate::auth::jwt::JwtConfig;

/// A required variable is missing or a value does not parse.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("{name} must be set in the environment")]
    Missing { name: &'static str },

    #[error("{name} has an invalid value '{value}'")]
    Invalid { name: &'static str, value: String },
}

/// Server configuration loaded from environment variables.
///
/// Everything except `JWT_SECRET` has a default suitable for local
/// development.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Bind address (default: `0.0.0.0`).
    pub host: String,
    /// Bind port (default: `3000`).
    pub port: u16,
    /// Allowed CORS origins, parsed from comma-separated `CORS_ORIGINS`.
    pub cors_origins: Vec<HeaderValue>,
    /// HTTP request timeout in seconds (default: `30`).
    pub request_timeout_secs: u64,
    /// JWT token configuration (secret, expiry durations).
    pub jwt: JwtConfig,
    /// Reference calendar for "same day" event status decisions.
    pub event_timezone: FixedOffset,
    /// Pricing for ticket types an event does not offer.
    pub unmatched_tier_policy: UnmatchedTierPolicy,
    /// Minimum password length for signup and password changes.
    pub password_min_length: usize,
    /// How often the status sweep runs, in seconds.
    pub status_sweep_interval_secs: u64,
    /// Account promoted to admin at startup, if any.
    pub admin_email: Option<String>,
}

impl ServerConfig {
    /// Load configuration from environment variables with defaults.
    ///
    /// | Env Var                         | Default                 |
    /// |---------------------------------|-------------------------|
    /// | `HOST`                          | `0.0.0.0`               |
    /// | `PORT`                          | `3000`                  |
    /// | `CORS_ORIGINS`                  | `http://localhost:5173` |
    /// | `REQUEST_TIMEOUT_SECS`          | `30`                    |
    /// | `EVENT_TIMEZONE_OFFSET_MINUTES` | `0`                     |
    /// | `STRICT_TICKET_TYPES`           | `true`                  |
    /// | `PASSWORD_MIN_LENGTH`           | `8`                     |
    /// | `STATUS_SWEEP_INTERVAL_SECS`    | `300`                   |
    /// | `ADMIN_EMAIL`                   | unset                   |
    ///
    /// JWT variables are documented on [`JwtConfig::from_env`].
    pub fn from_env() -> Result<Self, ConfigError> {
        let host = std::env::var("HOST").unwrap_or_else(|_| "0.0.0.0".into());
        let port: u16 = env_or("PORT", 3000)?;

        let cors_origins = std::env::var("CORS_ORIGINS")
            .unwrap_or_else(|_| "http://localhost:5173".into())
            .split(',')
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(|origin| {
                origin.parse::<HeaderValue>().map_err(|_| ConfigError::Invalid {
                    name: "CORS_ORIGINS",
                    value: origin.to_string(),
                })
            })
            .collect::<Result<Vec<_>, _>>()?;

        let request_timeout_secs: u64 = env_or("REQUEST_TIMEOUT_SECS", 30)?;

        let offset_minutes: i32 = env_or("EVENT_TIMEZONE_OFFSET_MINUTES", 0)?;
        let event_timezone =
            FixedOffset::east_opt(offset_minutes * 60).ok_or_else(|| ConfigError::Invalid {
                name: "EVENT_TIMEZONE_OFFSET_MINUTES",
                value: offset_minutes.to_string(),
            })?;

        let unmatched_tier_policy = if env_or("STRICT_TICKET_TYPES", true)? {
            UnmatchedTierPolicy::Reject
        } else {
            UnmatchedTierPolicy::PriceAtZero
        };

        let password_min_length: usize = env_or("PASSWORD_MIN_LENGTH", 8)?;
        let status_sweep_interval_secs: u64 = env_or("STATUS_SWEEP_INTERVAL_SECS", 300)?;
        if status_sweep_interval_secs == 0 {
            return Err(ConfigError::Invalid {
                name: "STATUS_SWEEP_INTERVAL_SECS",
                value: "0".into(),
            });
        }

        let admin_email = std::env::var("ADMIN_EMAIL")
            .ok()
            .filter(|v| !v.trim().is_empty());

        Ok(Self {
            host,
            port,
            cors_origins,
            request_timeout_secs,
            jwt: JwtConfig::from_env()?,
            event_timezone,
            unmatched_tier_policy,
            password_min_length,
            status_sweep_interval_secs,
            admin_email,
        })
    }
}

/// Parse `name` from the environment, falling back to `default` when unset.
pub(crate) fn env_or<T: FromStr>(name: &'static str, default: T) -> Result<T, ConfigError> {
    match std::env::var(name) {
        Ok(value) => value
            .trim()
            .parse()
            .map_err(|_| ConfigError::Invalid { name, value }),
        Err(_) => Ok(default),
    }
}
