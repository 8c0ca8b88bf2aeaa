//! # Credential Envelope
//!
//! The signed, self-contained credential structure. One envelope serves
//! both credential shapes — claim and grant — distinguished by the
//! `purpose` field, so a single decoder handles anything presented to the
//! service.
//!
//! ## Security Invariants
//!
//! - **Signing** canonicalizes the credential body (with `proof` removed)
//!   via [`CanonicalBytes`], signs the result with Ed25519, and attaches a
//!   [`Proof`] object. No raw `serde_json::to_vec()` in the signing path.
//!
//! - **Verification** recomputes the canonical body (without `proof`) and
//!   verifies the signature, so re-serialization with different key order
//!   cannot break or forge a credential.
//!
//! - The envelope is rigid (`deny_unknown_fields`): nothing can be smuggled
//!   into a signed credential, and no identity field exists to smuggle.

use serde::{Deserialize, Serialize};
use vouch_core::{CanonicalBytes, Timestamp};
use vouch_crypto::{Ed25519Signature, SigningKey, VerifyingKey};

use crate::error::{ClaimError, SigningError};

/// The discriminant distinguishing credential shapes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Purpose {
    /// Short-lived credential proving a claim-access request was issued.
    ClaimAccess,
    /// Long-lived credential proving a claim was successfully redeemed.
    AccessGranted,
}

impl Purpose {
    /// The string representation used on the wire.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::ClaimAccess => "claim_access",
            Self::AccessGranted => "access_granted",
        }
    }
}

impl std::fmt::Display for Purpose {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The type of cryptographic proof attached to a credential.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ProofType {
    /// Ed25519 signature over the JCS-canonical credential body.
    Ed25519Signature2020,
}

/// A cryptographic proof attached to a credential.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Proof {
    /// The proof type.
    #[serde(rename = "type")]
    pub proof_type: ProofType,
    /// When the proof was created.
    pub created: Timestamp,
    /// The signature as a 128-character hex string.
    pub proof_value: String,
}

/// A signed, self-contained bearer credential.
///
/// Carries no identifier: possession is the whole story. The claim shape
/// sets `expires_at`; the grant shape omits it and is valid indefinitely.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Credential {
    /// What this credential asserts.
    pub purpose: Purpose,
    /// When it was issued.
    pub issued_at: Timestamp,
    /// When it stops being valid. Absent on grant credentials.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub expires_at: Option<Timestamp>,
    /// The attached signature. Absent only between construction and signing.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub proof: Option<Proof>,
}

impl Credential {
    /// Compute the canonical signing input: the credential body with the
    /// `proof` field removed, in JCS-canonical bytes.
    pub fn signing_input(&self) -> Result<CanonicalBytes, SigningError> {
        let mut val = serde_json::to_value(self)?;
        if let Some(obj) = val.as_object_mut() {
            obj.remove("proof");
        }
        Ok(CanonicalBytes::from_value(val)?)
    }

    /// Sign this credential, attaching the proof.
    ///
    /// Replaces any existing proof: a credential carries exactly one
    /// signature from the process-wide key.
    pub fn sign(&mut self, key: &SigningKey, now: Timestamp) -> Result<(), SigningError> {
        self.proof = None;
        let canonical = self.signing_input()?;
        let signature = key.sign(&canonical);
        self.proof = Some(Proof {
            proof_type: ProofType::Ed25519Signature2020,
            created: now,
            proof_value: signature.to_hex(),
        });
        Ok(())
    }

    /// Verify the attached proof against a verifying key.
    ///
    /// This is the integrity / non-repudiation check only; purpose and
    /// expiry are the caller's next steps.
    pub fn verify_signature(&self, key: &VerifyingKey) -> Result<(), ClaimError> {
        let proof = self
            .proof
            .as_ref()
            .ok_or_else(|| ClaimError::InvalidSignature("credential carries no proof".into()))?;

        let canonical = self
            .signing_input()
            .map_err(|e| ClaimError::Malformed(format!("uncanonicalizable body: {e}")))?;

        let signature = Ed25519Signature::from_hex(&proof.proof_value)
            .map_err(|e| ClaimError::InvalidSignature(e.to_string()))?;

        key.verify(&canonical, &signature)
            .map_err(|e| ClaimError::InvalidSignature(e.to_string()))
    }

    /// Whether the credential's validity window has lapsed at `now`.
    ///
    /// A credential without `expires_at` never expires.
    pub fn is_expired(&self, now: Timestamp) -> bool {
        match self.expires_at {
            Some(expires_at) => now > expires_at,
            None => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ts(s: &str) -> Timestamp {
        Timestamp::parse(s).unwrap()
    }

    fn unsigned_claim() -> Credential {
        Credential {
            purpose: Purpose::ClaimAccess,
            issued_at: ts("2026-08-06T12:00:00Z"),
            expires_at: Some(ts("2026-08-06T12:05:00Z")),
            proof: None,
        }
    }

    #[test]
    fn purpose_wire_names() {
        assert_eq!(
            serde_json::to_string(&Purpose::ClaimAccess).unwrap(),
            "\"claim_access\""
        );
        assert_eq!(
            serde_json::to_string(&Purpose::AccessGranted).unwrap(),
            "\"access_granted\""
        );
    }

    #[test]
    fn signing_input_excludes_proof() {
        let mut cred = unsigned_claim();
        let before = cred.signing_input().unwrap();

        cred.proof = Some(Proof {
            proof_type: ProofType::Ed25519Signature2020,
            created: ts("2026-08-06T12:00:00Z"),
            proof_value: "00".repeat(64),
        });

        let after = cred.signing_input().unwrap();
        assert_eq!(before.as_bytes(), after.as_bytes());
    }

    #[test]
    fn signing_input_is_deterministic() {
        let cred = unsigned_claim();
        assert_eq!(
            cred.signing_input().unwrap().as_bytes(),
            cred.signing_input().unwrap().as_bytes()
        );
    }

    #[test]
    fn sign_and_verify_roundtrip() {
        let key = SigningKey::generate();
        let mut cred = unsigned_claim();
        cred.sign(&key, cred.issued_at).unwrap();

        assert!(cred.proof.is_some());
        cred.verify_signature(&key.verifying_key())
            .expect("own signature should verify");
    }

    #[test]
    fn verify_fails_with_wrong_key() {
        let key = SigningKey::generate();
        let other = SigningKey::generate();
        let mut cred = unsigned_claim();
        cred.sign(&key, cred.issued_at).unwrap();

        assert!(cred.verify_signature(&other.verifying_key()).is_err());
    }

    #[test]
    fn verify_fails_with_tampered_body() {
        let key = SigningKey::generate();
        let mut cred = unsigned_claim();
        cred.sign(&key, cred.issued_at).unwrap();

        cred.expires_at = Some(ts("2026-08-06T13:00:00Z"));

        assert!(cred.verify_signature(&key.verifying_key()).is_err());
    }

    #[test]
    fn verify_fails_without_proof() {
        let key = SigningKey::generate();
        let cred = unsigned_claim();
        let err = cred.verify_signature(&key.verifying_key()).unwrap_err();
        assert!(matches!(err, ClaimError::InvalidSignature(_)));
    }

    #[test]
    fn resigning_replaces_proof() {
        let key = SigningKey::generate();
        let mut cred = unsigned_claim();
        cred.sign(&key, cred.issued_at).unwrap();
        let first = cred.proof.clone().unwrap();
        cred.sign(&key, ts("2026-08-06T12:01:00Z")).unwrap();
        let second = cred.proof.clone().unwrap();

        // Ed25519 is deterministic and `created` is outside the signing
        // input, so only the created stamp moves.
        assert_eq!(first.proof_value, second.proof_value);
        assert_ne!(first.created, second.created);
    }

    #[test]
    fn expiry_window() {
        let cred = unsigned_claim();
        assert!(!cred.is_expired(ts("2026-08-06T12:00:00Z")));
        assert!(!cred.is_expired(ts("2026-08-06T12:05:00Z"))); // inclusive bound
        assert!(cred.is_expired(ts("2026-08-06T12:05:01Z")));
    }

    #[test]
    fn grant_never_expires() {
        let cred = Credential {
            purpose: Purpose::AccessGranted,
            issued_at: ts("2026-08-06T12:00:00Z"),
            expires_at: None,
            proof: None,
        };
        assert!(!cred.is_expired(ts("2126-08-06T12:00:00Z")));
    }

    #[test]
    fn serde_roundtrip_preserves_fields() {
        let key = SigningKey::generate();
        let mut cred = unsigned_claim();
        cred.sign(&key, cred.issued_at).unwrap();

        let json = serde_json::to_string(&cred).unwrap();
        let back: Credential = serde_json::from_str(&json).unwrap();
        assert_eq!(cred, back);
    }

    #[test]
    fn grant_serialization_omits_expires_at() {
        let cred = Credential {
            purpose: Purpose::AccessGranted,
            issued_at: ts("2026-08-06T12:00:00Z"),
            expires_at: None,
            proof: None,
        };
        let json = serde_json::to_string(&cred).unwrap();
        assert!(!json.contains("expires_at"));
    }

    #[test]
    fn unknown_fields_rejected() {
        let json = r#"{
            "purpose": "claim_access",
            "issued_at": "2026-08-06T12:00:00Z",
            "subject": "alice"
        }"#;
        let result: Result<Credential, _> = serde_json::from_str(json);
        assert!(result.is_err());
    }

    #[test]
    fn reordered_json_still_verifies() {
        let key = SigningKey::generate();
        let mut cred = unsigned_claim();
        cred.sign(&key, cred.issued_at).unwrap();

        // Rebuild the JSON with keys in a different order.
        let val = serde_json::to_value(&cred).unwrap();
        let obj = val.as_object().unwrap();
        let mut reordered = String::from("{");
        let mut keys: Vec<_> = obj.keys().collect();
        keys.reverse();
        for (i, k) in keys.iter().enumerate() {
            if i > 0 {
                reordered.push(',');
            }
            reordered.push_str(&format!(
                "{}:{}",
                serde_json::to_string(k).unwrap(),
                serde_json::to_string(&obj[*k]).unwrap()
            ));
        }
        reordered.push('}');

        let back: Credential = serde_json::from_str(&reordered).unwrap();
        back.verify_signature(&key.verifying_key())
            .expect("canonicalization makes key order irrelevant");
    }
}
