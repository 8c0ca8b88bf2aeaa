//! # Error Types
//!
//! Errors for the foundational layer. All errors use `thiserror` for
//! derive-based `Display` and `Error` implementations.

use thiserror::Error;

/// Error during canonical serialization of a signing input.
#[derive(Error, Debug)]
pub enum CanonicalizationError {
    /// Float values are not permitted in signing inputs. Timestamps are
    /// ISO 8601 strings and counters are integers; a float would have
    /// non-deterministic canonical number edge cases.
    #[error("float values are not permitted in canonical signing input: {0}")]
    FloatRejected(f64),

    /// JSON serialization failed.
    #[error("serialization failed: {0}")]
    SerializationFailed(#[from] serde_json::Error),
}

/// Error constructing or parsing a timestamp.
#[derive(Error, Debug)]
pub enum TimestampError {
    /// The string is not valid RFC 3339 or does not use the Z suffix.
    #[error("invalid timestamp {input:?}: {reason}")]
    Invalid {
        /// The rejected input.
        input: String,
        /// Why it was rejected.
        reason: String,
    },

    /// Arithmetic on the timestamp overflowed the representable range.
    #[error("timestamp arithmetic out of range")]
    OutOfRange,
}
