//! # vouch-core — Foundational Types
//!
//! Shared building blocks for the Vouch credential service:
//!
//! - **Canonical serialization** (`canonical.rs`): `CanonicalBytes`, the sole
//!   construction path for token signing input. RFC 8785 (JCS) output —
//!   sorted keys, compact separators, deterministic byte sequence.
//!
//! - **Temporal types** (`temporal.rs`): `Timestamp`, a UTC-only timestamp
//!   truncated to seconds so that the same instant always canonicalizes to
//!   the same bytes.
//!
//! ## Crate Policy
//!
//! - No dependencies on other workspace crates; everything else depends on
//!   this.
//! - No I/O, no clocks beyond `Timestamp::now()`, no key material.

pub mod canonical;
pub mod error;
pub mod temporal;

pub use canonical::CanonicalBytes;
pub use error::{CanonicalizationError, TimestampError};
pub use temporal::Timestamp;
