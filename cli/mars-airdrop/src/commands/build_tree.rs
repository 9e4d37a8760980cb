use anyhow::{Context, Result};
use clap::Args;
use std::path::PathBuf;
use tracing::{info, warn};

use mars_airdrop::claims::load_records;
use mars_airdrop::{hex_encode, write_file_atomic, MerkleTree};

#[derive(Args, Debug)]
pub struct Cli {
    /// Input JSON file: array of {"address", "amount"} records
    #[arg(short, long)]
    input: PathBuf,

    /// Output file for Merkle root
    #[arg(short, long)]
    root_output: PathBuf,

    /// Output file for the full tree dump (used by `claim`)
    #[arg(short, long)]
    tree_output: Option<PathBuf>,
}

pub fn run(cli: &Cli) -> Result<()> {
    let records = load_records(&cli.input).context("Failed to load airdrop records")?;

    info!("Building Merkle tree...");
    let tree = MerkleTree::from_records(&records).context("Failed to build Merkle tree")?;
    let root = hex_encode(tree.root());
    info!(leaves = tree.leaf_count(), depth = tree.depth(), "Merkle tree built");

    write_file_atomic(&cli.root_output, &format!("{}\n", root))
        .context("Failed to write root file")?;

    if let Some(tree_path) = &cli.tree_output {
        info!("Writing Merkle tree to {:?}...", tree_path);
        write_file_atomic(tree_path, &tree.render()).context("Failed to write tree file")?;
    }

    match records
        .iter()
        .try_fold(0u128, |acc, r| acc.checked_add(r.amount))
    {
        Some(total) => info!(total_amount = %total, "total airdrop amount"),
        None => warn!("total airdrop amount overflows u128"),
    }

    println!("{}", root);
    Ok(())
}
