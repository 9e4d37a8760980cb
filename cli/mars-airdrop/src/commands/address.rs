use anyhow::{Context, Result};
use clap::Args;

use mars_airdrop::address::{parse_pubkey, pubkey_to_address, SOURCE_PREFIX, TARGET_PREFIX};

#[derive(Args, Debug)]
pub struct Cli {
    /// secp256k1 public key (hex, compressed or uncompressed)
    #[arg(short, long)]
    pubkey: String,

    /// Bech32 prefixes to derive addresses for
    #[arg(long = "prefix", default_values = [SOURCE_PREFIX, TARGET_PREFIX])]
    prefixes: Vec<String>,
}

pub fn run(cli: &Cli) -> Result<()> {
    let key = parse_pubkey(&cli.pubkey).context("Invalid public key")?;
    for prefix in &cli.prefixes {
        let address = pubkey_to_address(&key, prefix)
            .with_context(|| format!("Failed to encode address with prefix '{}'", prefix))?;
        println!("{} address: {}", prefix, address);
    }
    Ok(())
}
