//! # Token Subcommand
//!
//! Mint, inspect, and verify credentials from the command line — the same
//! codec and check sequence the service runs, for relay-free debugging and
//! for sister-service operators validating a token they were handed.

use std::path::PathBuf;

use anyhow::{bail, Context};
use clap::{Args, Subcommand, ValueEnum};

use vouch_core::Timestamp;
use vouch_crypto::{SigningKey, VerifyingKey};
use vouch_token::{wire, Purpose, TokenAuthority, DEFAULT_CLAIM_TTL_SECS};

/// Arguments for the token subcommand.
#[derive(Args, Debug)]
pub struct TokenArgs {
    #[command(subcommand)]
    pub action: TokenAction,
}

/// Token operations.
#[derive(Subcommand, Debug)]
pub enum TokenAction {
    /// Mint a credential with a signing seed.
    Issue(IssueArgs),
    /// Decode a token and print its envelope without verifying.
    Inspect(InspectArgs),
    /// Run the full verification sequence against a public key.
    Verify(VerifyArgs),
}

/// Which credential shape to operate on.
#[derive(ValueEnum, Clone, Copy, Debug)]
pub enum Kind {
    /// Short-lived claim credential.
    Claim,
    /// Non-expiring grant credential.
    Grant,
}

/// Arguments for `token issue`.
#[derive(Args, Debug)]
pub struct IssueArgs {
    /// Credential shape to mint.
    #[arg(long, value_enum)]
    pub kind: Kind,

    /// File containing the 64-char hex signing seed.
    #[arg(long)]
    pub seed_file: PathBuf,

    /// Claim validity window in seconds.
    #[arg(long, default_value_t = DEFAULT_CLAIM_TTL_SECS)]
    pub ttl: i64,
}

/// Arguments for `token inspect`.
#[derive(Args, Debug)]
pub struct InspectArgs {
    /// The token in wire form.
    pub token: String,
}

/// Arguments for `token verify`.
#[derive(Args, Debug)]
pub struct VerifyArgs {
    /// The token in wire form.
    pub token: String,

    /// The service's public key as 64-char hex.
    #[arg(long)]
    pub public_key: String,

    /// Purpose the token is expected to carry.
    #[arg(long, value_enum)]
    pub purpose: Kind,
}

/// Run a token operation.
pub fn run_token(args: TokenArgs) -> anyhow::Result<()> {
    match args.action {
        TokenAction::Issue(args) => issue(args),
        TokenAction::Inspect(args) => inspect(args),
        TokenAction::Verify(args) => verify(args),
    }
}

fn load_authority(seed_file: &PathBuf, ttl: i64) -> anyhow::Result<TokenAuthority> {
    let seed_hex = std::fs::read_to_string(seed_file)
        .with_context(|| format!("cannot read {}", seed_file.display()))?;
    let key = SigningKey::from_hex_seed(seed_hex.trim())
        .context("seed file does not contain a valid hex seed")?;
    Ok(TokenAuthority::new(key, ttl))
}

fn issue(args: IssueArgs) -> anyhow::Result<()> {
    let authority = load_authority(&args.seed_file, args.ttl)?;
    let now = Timestamp::now();
    let credential = match args.kind {
        Kind::Claim => authority.issue_claim(now)?,
        Kind::Grant => authority.issue_grant(now)?,
    };
    println!("{}", wire::encode(&credential)?);
    Ok(())
}

fn inspect(args: InspectArgs) -> anyhow::Result<()> {
    let credential =
        wire::decode(&args.token).context("token does not decode as a credential")?;
    println!("{}", serde_json::to_string_pretty(&credential)?);
    Ok(())
}

fn verify(args: VerifyArgs) -> anyhow::Result<()> {
    let key = VerifyingKey::from_hex(&args.public_key).context("invalid public key")?;
    let now = Timestamp::now();

    let credential = wire::decode(&args.token)?;
    credential.verify_signature(&key)?;

    let expected = match args.purpose {
        Kind::Claim => Purpose::ClaimAccess,
        Kind::Grant => Purpose::AccessGranted,
    };
    if credential.purpose != expected {
        bail!(
            "wrong purpose: expected {expected}, got {}",
            credential.purpose
        );
    }
    if credential.is_expired(now) {
        bail!("credential expired");
    }

    println!("valid {} credential issued at {}", expected, credential.issued_at);
    Ok(())
}
