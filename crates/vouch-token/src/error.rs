//! # Error Types
//!
//! The verification taxonomy is deliberately small: four distinct failure
//! classes, checked in order, each logged distinctly server-side while the
//! client-facing response stays undifferentiated (the HTTP layer owns that
//! collapse).

use thiserror::Error;
use vouch_core::{CanonicalizationError, Timestamp, TimestampError};

use crate::credential::Purpose;

/// A credential could not be produced.
///
/// Fatal to the request — there is no fallback issuance path.
#[derive(Error, Debug)]
pub enum SigningError {
    /// The signing input could not be canonicalized.
    #[error("canonicalization failed: {0}")]
    Canonicalization(#[from] CanonicalizationError),

    /// The credential could not be serialized for transport.
    #[error("credential serialization failed: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Expiry computation left the representable time range.
    #[error("expiry computation failed: {0}")]
    Expiry(#[from] TimestampError),
}

/// A presented credential failed verification.
///
/// Variants are ordered by the verification sequence: structure, signature,
/// purpose, expiry. Verification short-circuits on the first failure.
#[derive(Error, Debug)]
pub enum ClaimError {
    /// The token's encoding or structure is invalid.
    #[error("malformed token: {0}")]
    Malformed(String),

    /// The signature does not match the signing key — tampering or a
    /// wrong-key forgery.
    #[error("invalid signature: {0}")]
    InvalidSignature(String),

    /// A credential of a different type was presented to this check.
    #[error("wrong purpose: expected {expected}, got {got}")]
    WrongPurpose {
        /// The purpose this endpoint accepts.
        expected: Purpose,
        /// The purpose the credential carries.
        got: Purpose,
    },

    /// The credential's validity window has lapsed.
    #[error("credential expired at {expired_at}")]
    Expired {
        /// When the credential stopped being valid.
        expired_at: Timestamp,
    },
}

impl ClaimError {
    /// Stable, machine-readable kind for structured logs.
    ///
    /// This is what operators see; the network caller only ever sees a
    /// generic access-denied outcome.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Malformed(_) => "malformed_token",
            Self::InvalidSignature(_) => "invalid_signature",
            Self::WrongPurpose { .. } => "wrong_purpose",
            Self::Expired { .. } => "expired",
        }
    }
}
