//! # Error Types
//!
//! Delivery failures. These surface to the request-access caller as a
//! server-side failure; they carry no verification-relevant detail.

use thiserror::Error;

/// Email delivery failed.
#[derive(Error, Debug)]
pub enum DeliveryError {
    /// The recipient or sender address could not be parsed.
    #[error("invalid mail address: {0}")]
    Address(#[from] lettre::address::AddressError),

    /// The message could not be assembled.
    #[error("message assembly failed: {0}")]
    Assembly(#[from] lettre::error::Error),

    /// The SMTP relay rejected the message or the connection failed.
    #[error("smtp transport failed: {0}")]
    Transport(#[from] lettre::transport::smtp::Error),

    /// The claim link could not be composed from the configured base URL.
    #[error("claim link composition failed: {0}")]
    Link(String),
}
