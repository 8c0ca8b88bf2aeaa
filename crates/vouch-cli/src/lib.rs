//! # vouch-cli — Operator Tooling
//!
//! Subcommand implementations for the `vouch` binary:
//!
//! - `keygen` — generate an Ed25519 seed for `VOUCH_SIGNING_SEED`.
//! - `token` — mint, inspect, and verify credentials offline, against the
//!   same codec and checks the service runs.

pub mod keygen;
pub mod token;
