//! # Middleware
//!
//! Tower/Axum middleware applied across the API surface.

pub mod rate_limit;
