use anyhow::{Context, Result};
use clap::Args;
use std::path::PathBuf;
use tracing::{info, warn};

use mars_airdrop::claims::load_claims;
use mars_airdrop::{parse_digest, verify_claim, EligibilityRecord};

#[derive(Args, Debug)]
pub struct Cli {
    /// Merkle root (hex format)
    #[arg(short, long, env = "AIRDROP_MERKLE_ROOT")]
    root: String,

    /// Proofs file written by `generate-proofs`; every entry is checked
    #[arg(short, long, conflicts_with_all = ["address", "amount", "proof"])]
    claims: Option<PathBuf>,

    /// Claimant address
    #[arg(short, long, requires = "amount", required_unless_present = "claims")]
    address: Option<String>,

    /// Claim amount
    #[arg(short = 'n', long, requires = "address")]
    amount: Option<u128>,

    /// Proof siblings in hex, leaf level first
    #[arg(short, long, num_args = 0..)]
    proof: Vec<String>,
}

pub fn run(cli: &Cli) -> Result<()> {
    let root = parse_digest(&cli.root).context("Invalid Merkle root")?;

    if let Some(path) = &cli.claims {
        let entries = load_claims(path).context("Failed to load proofs file")?;
        let mut failed = 0usize;
        for (index, entry) in entries.iter().enumerate() {
            if !verify_claim(&entry.record(), &entry.merkle_proof, &root) {
                warn!(index, address = %entry.address, "proof does not verify");
                failed += 1;
            }
        }
        info!(total = entries.len(), failed, "verified proofs file");
        if failed > 0 {
            anyhow::bail!("{} of {} proofs failed verification", failed, entries.len());
        }
        println!("all {} proofs valid", entries.len());
        return Ok(());
    }

    let (Some(address), Some(amount)) = (&cli.address, cli.amount) else {
        anyhow::bail!("either --claims or both --address and --amount are required");
    };
    let record = EligibilityRecord::new(address.clone(), amount);
    if !verify_claim(&record, &cli.proof, &root) {
        anyhow::bail!("proof for {} of {} does not verify", address, amount);
    }
    println!("valid");
    Ok(())
}
