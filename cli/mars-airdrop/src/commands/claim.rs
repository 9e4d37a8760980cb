use anyhow::{Context, Result};
use clap::Args;
use std::fs;
use std::path::PathBuf;
use tracing::info;

use mars_airdrop::claims::claim_for;
use mars_airdrop::{parse_digest, write_file_atomic, EligibilityRecord, MerkleTree};

#[derive(Args, Debug)]
pub struct Cli {
    /// Path to Merkle tree dump written by `build-tree --tree-output`
    #[arg(short = 't', long)]
    tree: PathBuf,

    /// Claimant address as listed in the airdrop
    #[arg(short, long)]
    address: String,

    /// Claim amount as listed in the airdrop
    #[arg(short = 'n', long)]
    amount: u128,

    /// Expected Merkle root; the tree is rejected if it does not match
    #[arg(short, long, env = "AIRDROP_MERKLE_ROOT")]
    root: Option<String>,

    /// Output JSON file
    #[arg(short, long)]
    output: PathBuf,
}

pub fn run(cli: &Cli) -> Result<()> {
    info!("Loading Merkle tree...");
    let dump = fs::read_to_string(&cli.tree).context("Failed to read Merkle tree file")?;
    let tree = MerkleTree::parse(&dump).context("Failed to load Merkle tree")?;

    if let Some(expected) = &cli.root {
        let expected = parse_digest(expected).context("Invalid Merkle root")?;
        if expected != tree.root() {
            anyhow::bail!("Merkle tree root does not match the expected root");
        }
    }

    let record = EligibilityRecord::new(cli.address.clone(), cli.amount);
    info!("Generating Merkle proof...");
    let claim = claim_for(&tree, &record)
        .context("Failed to generate Merkle proof")?
        .context("Address and amount not found in the airdrop tree")?;

    info!("Writing claim JSON to {:?}...", cli.output);
    let json_output = serde_json::to_string_pretty(&claim).context("Failed to serialize JSON")?;
    write_file_atomic(&cli.output, &json_output).context("Failed to write claim file")?;

    info!(
        leaf_index = claim.leaf_index,
        proof_len = claim.merkle_proof.len(),
        "claim generated"
    );
    println!("{}", json_output);
    Ok(())
}
