use anyhow::{Context, Result};
use clap::Args;
use serde::Serialize;
use std::path::PathBuf;
use tracing::info;
use zeroize::Zeroize;

use mars_airdrop::address::{compressed_pubkey, pubkey_to_address, SOURCE_PREFIX, TARGET_PREFIX};
use mars_airdrop::signing::{claim_message, parse_signing_key, read_signing_key, sign_message};
use mars_airdrop::{hex_encode, write_file_atomic};

#[derive(Args, Debug)]
pub struct Cli {
    /// Private key (hex format, with or without 0x prefix)
    /// Alternatively, use "-" to read from stdin (more secure)
    #[arg(short = 'k', long, env = "AIRDROP_PRIVATE_KEY", hide_env_values = true)]
    private_key: String,

    /// Claim amount as listed in the airdrop
    #[arg(short = 'n', long)]
    amount: u128,

    /// Prefix of the account listed in the airdrop
    #[arg(long, default_value = SOURCE_PREFIX)]
    source_prefix: String,

    /// Prefix of the account receiving the tokens
    #[arg(long, default_value = TARGET_PREFIX)]
    target_prefix: String,

    /// Optional output JSON file
    #[arg(short, long)]
    output: Option<PathBuf>,
}

#[derive(Debug, Serialize)]
struct SignOutput {
    pubkey: String,
    source_acct: String,
    target_acct: String,
    amount: String,
    message: String,
    signature: String,
}

pub fn run(cli: &Cli) -> Result<()> {
    info!("Parsing private key...");
    let signing_key = if cli.private_key == "-" {
        read_signing_key(std::io::stdin().lock()).context("Failed to read private key from stdin")?
    } else {
        let mut key_str = cli.private_key.clone();
        let key = parse_signing_key(&key_str);
        key_str.zeroize();
        key.context("Invalid private key")?
    };

    let verifying_key = signing_key.verifying_key();
    let source_acct = pubkey_to_address(verifying_key, &cli.source_prefix)
        .context("Failed to derive source address")?;
    let target_acct = pubkey_to_address(verifying_key, &cli.target_prefix)
        .context("Failed to derive target address")?;

    let message = claim_message(&source_acct, cli.amount, &target_acct);
    info!("Signing claim message...");
    let signature = sign_message(&signing_key, &message).context("Failed to sign message")?;

    let output = SignOutput {
        pubkey: hex_encode(compressed_pubkey(verifying_key)),
        source_acct,
        target_acct,
        amount: cli.amount.to_string(),
        message,
        signature,
    };

    let json_output = serde_json::to_string_pretty(&output).context("Failed to serialize JSON")?;
    if let Some(path) = &cli.output {
        info!("Writing signature to {:?}...", path);
        write_file_atomic(path, &json_output).context("Failed to write signature file")?;
    }
    println!("{}", json_output);
    Ok(())
}
