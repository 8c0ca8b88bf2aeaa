//! # vouch-api — Binary Entry Point
//!
//! Starts the Axum HTTP server for the Vouch credential service.
//! Binds to configurable port (default 8080).

use vouch_api::state::{claim_ttl_from_env, AppConfig, AppState};
use vouch_crypto::SigningKey;
use vouch_mail::{Mailer, SmtpConfig};
use vouch_token::TokenAuthority;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize structured tracing.
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    // Build configuration from environment.
    let config = AppConfig::from_env().map_err(|e| {
        tracing::error!("Configuration failed: {e}");
        e
    })?;

    // The process-wide signing key. Without it no credential can be
    // produced, so a missing or bad seed is fatal at startup rather than a
    // per-request SigningError.
    let seed = std::env::var("VOUCH_SIGNING_SEED")
        .map_err(|_| "VOUCH_SIGNING_SEED must be set (64 hex chars)")?;
    let signing_key = SigningKey::from_hex_seed(&seed).map_err(|e| {
        tracing::error!("Signing key rejected: {e}");
        e
    })?;
    let authority = TokenAuthority::new(signing_key, claim_ttl_from_env()?);
    tracing::info!(
        verifying_key = %authority.verifying_key(),
        claim_ttl_secs = authority.claim_ttl_secs(),
        "token authority initialized"
    );

    // Attempt to create the SMTP mailer from environment.
    let mailer = match std::env::var("VOUCH_SMTP_RELAY") {
        Ok(relay) => {
            let smtp = SmtpConfig {
                relay,
                username: std::env::var("VOUCH_SMTP_USERNAME").unwrap_or_default(),
                password: std::env::var("VOUCH_SMTP_PASSWORD").unwrap_or_default(),
                from: std::env::var("VOUCH_MAIL_FROM")
                    .unwrap_or_else(|_| format!("no-reply@{}", config.mail_domain)),
            };
            tracing::info!(relay = %smtp.relay, "SMTP mailer configured");
            Mailer::smtp(&smtp).map_err(|e| {
                tracing::error!("Failed to create SMTP mailer: {e}");
                e
            })?
        }
        Err(_) => {
            tracing::warn!(
                "VOUCH_SMTP_RELAY not set. Confirmation emails will be recorded in memory, not delivered."
            );
            Mailer::recording()
        }
    };

    let port = config.port;
    let state = AppState::new(authority, mailer, config);
    let app = vouch_api::app(state);

    let addr = std::net::SocketAddr::from(([0, 0, 0, 0], port));
    tracing::info!("Vouch API listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
