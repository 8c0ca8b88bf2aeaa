//! # vouch-crypto — Ed25519 Primitives
//!
//! The cryptographic layer for Vouch credentials:
//!
//! - **Ed25519** signing and verification (`ed25519.rs`), with signing input
//!   restricted to [`CanonicalBytes`](vouch_core::CanonicalBytes) at the
//!   type level.
//!
//! ## Security Invariant
//!
//! Private key material is never serialized, logged, or exposed through
//! `Debug`. The seed is zeroized when parsed from configuration.

pub mod ed25519;
pub mod error;

pub use ed25519::{Ed25519Signature, SigningKey, VerifyingKey};
pub use error::CryptoError;
