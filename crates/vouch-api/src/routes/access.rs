//! # Access Endpoints
//!
//! The three legs of the protocol:
//!
//! - `POST /v1/request-access` — issue a claim credential and email it as a
//!   clickable link to `<email_name>@<mail_domain>`.
//! - `GET  /v1/claim-access/{token}` — redeem a claim credential for a
//!   grant credential.
//! - `POST /v1/verify-access` — validate a presented grant credential, for
//!   sister services enforcing access with these tokens.
//!
//! ## Information Discipline
//!
//! Verification failures all map to one constant 401 body; the specific
//! failure kind goes to server-side logs only. The email name is used to
//! route the confirmation message and is never logged or stored.

use axum::extract::{Path, State};
use axum::routing::{get, post};
use axum::{Json, Router};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use vouch_core::Timestamp;
use vouch_mail::compose_claim_email;
use vouch_token::{wire, ClaimError, Credential};

use crate::error::AppError;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Request / Response types
// ---------------------------------------------------------------------------

/// Request body for `POST /v1/request-access`.
#[derive(Debug, Deserialize, ToSchema)]
pub struct RequestAccessBody {
    /// Local part of the corporate email address. The fixed domain is
    /// appended server-side; embedded `@` is rejected.
    pub email_name: String,
}

/// Response from `POST /v1/request-access`.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct RequestAccessResponse {
    /// Always `"sent"` — success means the confirmation email was handed
    /// to the relay.
    pub status: String,
}

/// Response from `GET /v1/claim-access/{token}`.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct GrantResponse {
    /// The grant credential in wire form, ready to present to
    /// `/v1/verify-access`.
    pub token: String,
    /// The decoded grant credential (`purpose`, `issued_at`, `proof`).
    #[schema(value_type = Object)]
    pub credential: Credential,
}

/// Request body for `POST /v1/verify-access`.
#[derive(Debug, Deserialize, ToSchema)]
pub struct VerifyAccessBody {
    /// A grant credential in wire form.
    pub token: String,
}

/// Response from `POST /v1/verify-access`.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct VerifyAccessResponse {
    /// Always `"valid"` — invalid tokens get the constant 401 instead.
    pub status: String,
}

// ---------------------------------------------------------------------------
// Router
// ---------------------------------------------------------------------------

/// Build the access router.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/v1/request-access", post(request_access))
        .route("/v1/claim-access/:token", get(claim_access))
        .route("/v1/verify-access", post(verify_access))
}

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

/// POST /v1/request-access — issue a claim and email the clickable link.
///
/// The identifier exists only for the duration of this handler: it routes
/// the email and is gone. Nothing about it enters the credential, the logs,
/// or any store.
#[utoipa::path(
    post,
    path = "/v1/request-access",
    request_body = RequestAccessBody,
    responses(
        (status = 200, description = "Confirmation email sent", body = RequestAccessResponse),
        (status = 400, description = "Unparseable request body", body = crate::error::ErrorBody),
        (status = 422, description = "Unacceptable email name", body = crate::error::ErrorBody),
        (status = 502, description = "Delivery failed", body = crate::error::ErrorBody),
    ),
    tag = "access"
)]
pub(crate) async fn request_access(
    State(state): State<AppState>,
    body: Json<serde_json::Value>,
) -> Result<Json<RequestAccessResponse>, AppError> {
    // Parse the body manually to give better error messages.
    let req: RequestAccessBody = serde_json::from_value(body.0)
        .map_err(|e| AppError::BadRequest(format!("invalid request body: {e}")))?;

    validate_email_name(&req.email_name)?;

    let token = state.authority.issue_claim_token(Timestamp::now())?;
    let message = compose_claim_email(
        &req.email_name,
        &state.config.mail_domain,
        &state.config.base_url,
        &token,
    )?;

    state.mailer.send(message).await?;
    tracing::info!("confirmation email enqueued");

    Ok(Json(RequestAccessResponse {
        status: "sent".to_string(),
    }))
}

/// GET /v1/claim-access/{token} — redeem a claim for a grant.
///
/// Runs the four verification checks in order; on success mints the
/// non-expiring grant credential. Any failure produces the constant
/// access-denied response, with the real reason logged server-side.
#[utoipa::path(
    get,
    path = "/v1/claim-access/{token}",
    params(("token" = String, Path, description = "Claim credential in wire form")),
    responses(
        (status = 200, description = "Access granted", body = GrantResponse),
        (status = 401, description = "Access denied", body = crate::error::ErrorBody),
    ),
    tag = "access"
)]
pub(crate) async fn claim_access(
    State(state): State<AppState>,
    Path(token): Path<String>,
) -> Result<Json<GrantResponse>, AppError> {
    let now = Timestamp::now();

    state
        .authority
        .verify_claim(&token, now)
        .map_err(access_denied)?;

    let grant = state.authority.issue_grant(now)?;
    let token = wire::encode(&grant)?;
    tracing::info!("claim redeemed, grant issued");

    Ok(Json(GrantResponse {
        token,
        credential: grant,
    }))
}

/// POST /v1/verify-access — validate a presented grant credential.
///
/// For sister services gating their own endpoints on Vouch grants: 200 if
/// the token is a valid grant, the constant 401 otherwise.
#[utoipa::path(
    post,
    path = "/v1/verify-access",
    request_body = VerifyAccessBody,
    responses(
        (status = 200, description = "Token is a valid grant", body = VerifyAccessResponse),
        (status = 400, description = "Unparseable request body", body = crate::error::ErrorBody),
        (status = 401, description = "Access denied", body = crate::error::ErrorBody),
    ),
    tag = "access"
)]
pub(crate) async fn verify_access(
    State(state): State<AppState>,
    body: Json<serde_json::Value>,
) -> Result<Json<VerifyAccessResponse>, AppError> {
    let req: VerifyAccessBody = serde_json::from_value(body.0)
        .map_err(|e| AppError::BadRequest(format!("invalid request body: {e}")))?;

    state
        .authority
        .verify_grant(&req.token, Timestamp::now())
        .map_err(access_denied)?;

    Ok(Json(VerifyAccessResponse {
        status: "valid".to_string(),
    }))
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

/// Collapse a verification failure into the constant access-denied error,
/// logging the distinct kind for operators first.
fn access_denied(err: ClaimError) -> AppError {
    tracing::warn!(kind = err.kind(), detail = %err, "credential verification failed");
    AppError::AccessDenied
}

const MAX_EMAIL_NAME_LEN: usize = 64;

/// Reject identifiers that cannot be a bare local part.
///
/// These failures are plain input validation with no security sensitivity,
/// so they surface with detail.
fn validate_email_name(email_name: &str) -> Result<(), AppError> {
    if email_name.is_empty() {
        return Err(AppError::Validation("email_name must not be empty".into()));
    }
    if email_name.len() > MAX_EMAIL_NAME_LEN {
        return Err(AppError::Validation(format!(
            "email_name must not exceed {MAX_EMAIL_NAME_LEN} characters"
        )));
    }
    if email_name.contains('@') {
        return Err(AppError::Validation(
            "email_name must be the local part only, without '@'".into(),
        ));
    }
    if email_name.chars().any(|c| c.is_whitespace() || c.is_control()) {
        return Err(AppError::Validation(
            "email_name must not contain whitespace or control characters".into(),
        ));
    }
    Ok(())
}
