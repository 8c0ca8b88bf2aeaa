//! # API Error Types
//!
//! Structured error type implementing `axum::response::IntoResponse`.
//!
//! Two error classes never expose detail to the network caller:
//!
//! - `AccessDenied` — every credential verification failure collapses into
//!   one constant response. Differential errors would let an attacker
//!   fingerprint which check failed and iterate toward a forged or stolen
//!   token. The specific failure kind is logged server-side at the call
//!   site before this variant is constructed.
//! - `Internal` / `DeliveryFailed` — operational detail goes to logs only.
//!
//! Malformed request bodies carry no security sensitivity and keep their
//! detail in the response.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use utoipa::ToSchema;

/// Structured JSON error response body.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ErrorBody {
    pub error: ErrorDetail,
}

/// Inner error detail.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ErrorDetail {
    /// Machine-readable error code (e.g. "ACCESS_DENIED").
    pub code: String,
    /// Human-readable error message.
    pub message: String,
}

/// Application-level error type that implements [`IntoResponse`] for Axum.
#[derive(Error, Debug)]
pub enum AppError {
    /// Request body could not be parsed (400).
    #[error("bad request: {0}")]
    BadRequest(String),

    /// Request parsed but a field is unacceptable (422).
    #[error("validation error: {0}")]
    Validation(String),

    /// A presented credential failed verification (401). Deliberately
    /// carries nothing: the reason was logged where the failure happened.
    #[error("access denied")]
    AccessDenied,

    /// The confirmation email could not be delivered (502). Message is
    /// logged but not returned to the client.
    #[error("delivery failed: {0}")]
    DeliveryFailed(String),

    /// Internal server error (500). Message is logged but not returned.
    #[error("internal error: {0}")]
    Internal(String),
}

impl AppError {
    /// HTTP status code and machine-readable error code for this error.
    fn status_and_code(&self) -> (StatusCode, &'static str) {
        match self {
            Self::BadRequest(_) => (StatusCode::BAD_REQUEST, "BAD_REQUEST"),
            Self::Validation(_) => (StatusCode::UNPROCESSABLE_ENTITY, "VALIDATION_ERROR"),
            Self::AccessDenied => (StatusCode::UNAUTHORIZED, "ACCESS_DENIED"),
            Self::DeliveryFailed(_) => (StatusCode::BAD_GATEWAY, "DELIVERY_FAILED"),
            Self::Internal(_) => (StatusCode::INTERNAL_SERVER_ERROR, "INTERNAL_ERROR"),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code) = self.status_and_code();

        let message = match &self {
            Self::AccessDenied => "access denied".to_string(),
            Self::DeliveryFailed(_) => "confirmation email could not be sent".to_string(),
            Self::Internal(_) => "an internal error occurred".to_string(),
            other => other.to_string(),
        };

        match &self {
            Self::Internal(detail) => {
                tracing::error!(detail = %detail, "internal server error");
            }
            Self::DeliveryFailed(detail) => {
                tracing::error!(detail = %detail, "confirmation email delivery failed");
            }
            _ => {}
        }

        let body = ErrorBody {
            error: ErrorDetail {
                code: code.to_string(),
                message,
            },
        };

        (status, Json(body)).into_response()
    }
}

impl From<vouch_token::SigningError> for AppError {
    fn from(err: vouch_token::SigningError) -> Self {
        Self::Internal(format!("credential signing failed: {err}"))
    }
}

impl From<vouch_mail::DeliveryError> for AppError {
    fn from(err: vouch_mail::DeliveryError) -> Self {
        Self::DeliveryFailed(err.to_string())
    }
}
