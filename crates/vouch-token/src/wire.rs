//! # Wire Codec
//!
//! URL-safe transport encoding for credentials. A token must survive being
//! pasted into an email link and arriving as a single URL path segment, so
//! the compact JSON envelope is wrapped in unpadded URL-safe base64.
//!
//! Encoding is deterministic: struct field order is fixed, timestamps are
//! second-precision strings, and base64 has a single valid form without
//! padding.

use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use base64::Engine;

use crate::credential::Credential;
use crate::error::{ClaimError, SigningError};

/// Encode a credential for transport in a URL path segment.
pub fn encode(credential: &Credential) -> Result<String, SigningError> {
    let json = serde_json::to_vec(credential)?;
    Ok(URL_SAFE_NO_PAD.encode(json))
}

/// Decode a credential from its transport form.
///
/// Fails with [`ClaimError::Malformed`] on anything that is not unpadded
/// URL-safe base64 wrapping a valid credential envelope. This is the first
/// of the four verification checks; no cryptography happens here.
pub fn decode(token: &str) -> Result<Credential, ClaimError> {
    let bytes = URL_SAFE_NO_PAD
        .decode(token.as_bytes())
        .map_err(|e| ClaimError::Malformed(format!("base64 decode failed: {e}")))?;

    serde_json::from_slice(&bytes)
        .map_err(|e| ClaimError::Malformed(format!("envelope decode failed: {e}")))
}
