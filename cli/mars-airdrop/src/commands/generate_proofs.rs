use anyhow::{Context, Result};
use clap::Args;
use std::path::PathBuf;
use tracing::info;

use mars_airdrop::claims::{generate_claims, load_records, write_claims};
use mars_airdrop::{hex_encode, write_file_atomic};

#[derive(Args, Debug)]
pub struct Cli {
    /// Input JSON file: array of {"address", "amount"} records
    #[arg(short, long)]
    input: PathBuf,

    /// Output JSON file: records with their `merkle_proof`
    #[arg(short, long)]
    output: PathBuf,

    /// Also write the Merkle root to this file
    #[arg(short, long)]
    root_output: Option<PathBuf>,
}

pub fn run(cli: &Cli) -> Result<()> {
    let records = load_records(&cli.input).context("Failed to load airdrop records")?;

    info!("Generating Merkle proofs...");
    let claims = generate_claims(&records).context("Failed to generate Merkle proofs")?;
    let root = hex_encode(claims.root);
    info!(count = claims.entries.len(), "generated proofs");

    info!("Writing proofs to {:?}...", cli.output);
    write_claims(&cli.output, &claims.entries).context("Failed to write proofs file")?;

    if let Some(root_path) = &cli.root_output {
        write_file_atomic(root_path, &format!("{}\n", root))
            .context("Failed to write root file")?;
    }

    println!("{}", root);
    Ok(())
}
