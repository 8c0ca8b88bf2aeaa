//! # Token Authority
//!
//! [`TokenAuthority`] is the single owner of the process-wide signing key
//! and implements the three protocol operations: issue a claim, verify a
//! claim, issue a grant (plus grant verification for sister services).
//!
//! Every operation is a pure function of its explicit inputs — the key,
//! the token bytes, and the caller-supplied clock reading. The authority
//! holds no registry and mutates nothing, so concurrent requests need no
//! coordination. Handlers clone it freely; the key lives behind an `Arc`.

use std::sync::Arc;

use vouch_core::Timestamp;
use vouch_crypto::{SigningKey, VerifyingKey};

use crate::credential::{Credential, Purpose};
use crate::error::{ClaimError, SigningError};
use crate::wire;

/// Default claim validity window: five minutes.
pub const DEFAULT_CLAIM_TTL_SECS: i64 = 300;

/// Issues and verifies Vouch credentials with a process-wide Ed25519 key.
///
/// Constructed once at startup from configuration and shared by reference;
/// read-only thereafter.
#[derive(Clone)]
pub struct TokenAuthority {
    signing_key: Arc<SigningKey>,
    verifying_key: VerifyingKey,
    claim_ttl_secs: i64,
}

impl std::fmt::Debug for TokenAuthority {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TokenAuthority")
            .field("verifying_key", &self.verifying_key)
            .field("claim_ttl_secs", &self.claim_ttl_secs)
            .finish()
    }
}

impl TokenAuthority {
    /// Create an authority from a signing key and claim TTL in seconds.
    pub fn new(signing_key: SigningKey, claim_ttl_secs: i64) -> Self {
        let verifying_key = signing_key.verifying_key();
        Self {
            signing_key: Arc::new(signing_key),
            verifying_key,
            claim_ttl_secs,
        }
    }

    /// The public key credentials verify against.
    pub fn verifying_key(&self) -> &VerifyingKey {
        &self.verifying_key
    }

    /// The configured claim validity window in seconds.
    pub fn claim_ttl_secs(&self) -> i64 {
        self.claim_ttl_secs
    }

    /// Issue a claim credential: `purpose = claim_access`, valid from `now`
    /// until `now + ttl`.
    ///
    /// Deliberately takes no identifier — the credential proves that a
    /// claim was issued, never for whom. The caller uses the identifier
    /// only to route the delivery email.
    pub fn issue_claim(&self, now: Timestamp) -> Result<Credential, SigningError> {
        let expires_at = now.checked_add_secs(self.claim_ttl_secs)?;
        let mut credential = Credential {
            purpose: Purpose::ClaimAccess,
            issued_at: now,
            expires_at: Some(expires_at),
            proof: None,
        };
        credential.sign(&self.signing_key, now)?;
        tracing::debug!(expires_at = %expires_at, "issued claim credential");
        Ok(credential)
    }

    /// Issue a claim credential already in wire form.
    pub fn issue_claim_token(&self, now: Timestamp) -> Result<String, SigningError> {
        wire::encode(&self.issue_claim(now)?)
    }

    /// Issue a grant credential: `purpose = access_granted`, no expiry.
    ///
    /// Invoked only after [`verify_claim`](Self::verify_claim) succeeds.
    pub fn issue_grant(&self, now: Timestamp) -> Result<Credential, SigningError> {
        let mut credential = Credential {
            purpose: Purpose::AccessGranted,
            issued_at: now,
            expires_at: None,
            proof: None,
        };
        credential.sign(&self.signing_key, now)?;
        tracing::debug!("issued grant credential");
        Ok(credential)
    }

    /// Verify a redeemed claim token.
    ///
    /// Checks run in order and short-circuit on first failure:
    /// decode, signature, purpose, expiry.
    pub fn verify_claim(&self, token: &str, now: Timestamp) -> Result<Credential, ClaimError> {
        self.verify(token, Purpose::ClaimAccess, now)
    }

    /// Verify a presented grant token.
    ///
    /// Same checks as claim verification with the expected purpose flipped.
    /// Grants carry no expiry today; if one is ever present it is honored,
    /// keeping the decoder single for both shapes.
    pub fn verify_grant(&self, token: &str, now: Timestamp) -> Result<Credential, ClaimError> {
        self.verify(token, Purpose::AccessGranted, now)
    }

    fn verify(
        &self,
        token: &str,
        expected: Purpose,
        now: Timestamp,
    ) -> Result<Credential, ClaimError> {
        let credential = wire::decode(token)?;

        credential.verify_signature(&self.verifying_key)?;

        if credential.purpose != expected {
            return Err(ClaimError::WrongPurpose {
                expected,
                got: credential.purpose,
            });
        }

        if let Some(expired_at) = credential.expires_at.filter(|&e| now > e) {
            return Err(ClaimError::Expired { expired_at });
        }

        Ok(credential)
    }
}
