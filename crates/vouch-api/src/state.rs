//! # Application State & Configuration
//!
//! Shared state for the Axum application, passed to all route handlers via
//! the `State` extractor.
//!
//! Everything in `AppState` is immutable after startup: the token authority
//! (wrapping the process-wide signing key), the mail transport, and the
//! service configuration. There is deliberately no store of issued or
//! redeemed credentials — the service validates anything it is presented
//! with from the key, the bytes, and the clock alone.

use std::sync::Arc;

use url::Url;
use vouch_token::{TokenAuthority, DEFAULT_CLAIM_TTL_SECS};
use vouch_mail::Mailer;

/// Service configuration, loaded once from the environment.
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// Listen port.
    pub port: u16,
    /// Fixed corporate domain confirmation emails are sent into.
    pub mail_domain: String,
    /// Public base URL used to compose clickable claim links.
    pub base_url: Url,
}

/// Configuration loading failure. Fatal at startup.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// A required environment variable is not set.
    #[error("missing environment variable {0}")]
    Missing(&'static str),

    /// An environment variable is set but unusable.
    #[error("invalid value for {name}: {reason}")]
    Invalid {
        /// The offending variable.
        name: &'static str,
        /// Why it was rejected.
        reason: String,
    },
}

impl AppConfig {
    /// Load configuration from the environment.
    ///
    /// - `PORT` — listen port, default 8080.
    /// - `VOUCH_MAIL_DOMAIN` — required; must not contain `@`.
    /// - `VOUCH_BASE_URL` — required; must parse as an absolute URL.
    pub fn from_env() -> Result<Self, ConfigError> {
        let port = match std::env::var("PORT") {
            Ok(raw) => raw.parse().map_err(|e| ConfigError::Invalid {
                name: "PORT",
                reason: format!("{e}"),
            })?,
            Err(_) => 8080,
        };

        let mail_domain = std::env::var("VOUCH_MAIL_DOMAIN")
            .map_err(|_| ConfigError::Missing("VOUCH_MAIL_DOMAIN"))?;
        if mail_domain.is_empty() || mail_domain.contains('@') {
            return Err(ConfigError::Invalid {
                name: "VOUCH_MAIL_DOMAIN",
                reason: "must be a bare domain name".to_string(),
            });
        }

        let base_url = std::env::var("VOUCH_BASE_URL")
            .map_err(|_| ConfigError::Missing("VOUCH_BASE_URL"))?;
        let base_url = Url::parse(&base_url).map_err(|e| ConfigError::Invalid {
            name: "VOUCH_BASE_URL",
            reason: format!("{e}"),
        })?;

        Ok(Self {
            port,
            mail_domain,
            base_url,
        })
    }
}

/// Read the claim TTL from `VOUCH_CLAIM_TTL_SECS`, defaulting to 5 minutes.
pub fn claim_ttl_from_env() -> Result<i64, ConfigError> {
    match std::env::var("VOUCH_CLAIM_TTL_SECS") {
        Ok(raw) => {
            let ttl: i64 = raw.parse().map_err(|e| ConfigError::Invalid {
                name: "VOUCH_CLAIM_TTL_SECS",
                reason: format!("{e}"),
            })?;
            if ttl <= 0 {
                return Err(ConfigError::Invalid {
                    name: "VOUCH_CLAIM_TTL_SECS",
                    reason: "must be positive".to_string(),
                });
            }
            Ok(ttl)
        }
        Err(_) => Ok(DEFAULT_CLAIM_TTL_SECS),
    }
}

/// Shared application state. Cloned per request; all fields are shared by
/// reference or themselves cheaply cloneable.
#[derive(Clone, Debug)]
pub struct AppState {
    /// The credential issuer/verifier holding the process-wide key.
    pub authority: TokenAuthority,
    /// Outbound mail transport.
    pub mailer: Mailer,
    /// Immutable service configuration.
    pub config: Arc<AppConfig>,
}

impl AppState {
    /// Assemble application state from its parts.
    pub fn new(authority: TokenAuthority, mailer: Mailer, config: AppConfig) -> Self {
        Self {
            authority,
            mailer,
            config: Arc::new(config),
        }
    }
}
