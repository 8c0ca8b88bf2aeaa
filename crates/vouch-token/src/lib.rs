//! # vouch-token — The Credential Protocol
//!
//! Implements the bearer-credential protocol at the heart of Vouch:
//!
//! - **Credential** (`credential.rs`): the rigid signed envelope — purpose,
//!   issuance time, optional expiry, attached proof.
//!
//! - **Wire codec** (`wire.rs`): URL-safe encoding so a credential can ride
//!   inside a URL path segment and an email link.
//!
//! - **Authority** (`authority.rs`): [`TokenAuthority`], the single place
//!   that holds the process-wide signing key and implements claim issuance,
//!   claim verification, and grant issuance.
//!
//! ## Trust Model
//!
//! Credential validity is decidable locally and statelessly: from the
//! signing key, the credential bytes, and the current time. There is no
//! registry of issued or redeemed credentials, and no identity inside the
//! token — a claim credential proves only that *a* claim was issued, not
//! for whom.

pub mod authority;
pub mod credential;
pub mod error;
pub mod wire;

pub use authority::{TokenAuthority, DEFAULT_CLAIM_TTL_SECS};
pub use credential::{Credential, Proof, ProofType, Purpose};
pub use error::{ClaimError, SigningError};
