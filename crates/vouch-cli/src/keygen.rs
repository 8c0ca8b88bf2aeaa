//! # Keygen Subcommand
//!
//! Generates the process-wide Ed25519 signing seed. The seed is the one
//! secret in the whole system; it goes to a file (or stdout for piping into
//! a secret store), while the derived public key prints to stderr for
//! operator records.

use std::io::Write;
use std::path::PathBuf;

use anyhow::Context;
use clap::Args;
use rand_core::{OsRng, RngCore};
use vouch_crypto::SigningKey;

/// Arguments for the keygen subcommand.
#[derive(Args, Debug)]
pub struct KeygenArgs {
    /// Write the hex seed to this file instead of stdout.
    #[arg(long)]
    pub out: Option<PathBuf>,
}

/// Run key generation.
pub fn run_keygen(args: KeygenArgs) -> anyhow::Result<()> {
    let mut seed = [0u8; 32];
    OsRng.fill_bytes(&mut seed);
    let seed_hex = hex_encode(&seed);

    let key = SigningKey::from_seed(&seed);
    eprintln!("public key: {}", key.verifying_key().to_hex());

    match args.out {
        Some(path) => {
            let mut file = std::fs::File::create(&path)
                .with_context(|| format!("cannot create {}", path.display()))?;
            writeln!(file, "{seed_hex}")?;
            eprintln!("seed written to {}", path.display());
        }
        None => println!("{seed_hex}"),
    }

    Ok(())
}

fn hex_encode(bytes: &[u8]) -> String {
    bytes.iter().map(|b| format!("{b:02x}")).collect()
}
