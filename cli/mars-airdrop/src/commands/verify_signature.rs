use anyhow::{Context, Result};
use clap::Args;

use mars_airdrop::address::{parse_pubkey, pubkey_to_address, SOURCE_PREFIX};
use mars_airdrop::signing::{claim_message, verify_signature};

#[derive(Args, Debug)]
pub struct Cli {
    /// Claimant's secp256k1 public key (hex)
    #[arg(short, long)]
    pubkey: String,

    /// Account the tokens are released to
    #[arg(short, long)]
    target_acct: String,

    /// Claim amount
    #[arg(short = 'n', long)]
    amount: u128,

    /// Compact signature (hex)
    #[arg(short, long)]
    signature: String,

    /// Prefix of the account listed in the airdrop
    #[arg(long, default_value = SOURCE_PREFIX)]
    source_prefix: String,
}

pub fn run(cli: &Cli) -> Result<()> {
    let key = parse_pubkey(&cli.pubkey).context("Invalid public key")?;
    let source_acct =
        pubkey_to_address(&key, &cli.source_prefix).context("Failed to derive source address")?;
    let message = claim_message(&source_acct, cli.amount, &cli.target_acct);

    if !verify_signature(&cli.pubkey, &message, &cli.signature)
        .context("Failed to verify signature")?
    {
        anyhow::bail!("invalid signature for message: {}", message);
    }
    println!("valid signature from {}", source_acct);
    Ok(())
}
