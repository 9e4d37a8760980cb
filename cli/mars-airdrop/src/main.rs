#![forbid(unsafe_code)]
#![allow(unreachable_pub)]

use clap::{Parser, Subcommand};
use mars_airdrop::logging::{self, LogLevel};

mod commands;

use commands::{address, build_tree, claim, generate_proofs, sign, verify, verify_signature};

#[derive(Parser, Debug)]
#[command(name = "mars-airdrop")]
#[command(about = "Merkle tree, proof and signature tools for the Mars airdrop", long_about = None)]
#[command(version)]
struct Cli {
    /// Increase log verbosity (-v debug, -vv trace); RUST_LOG overrides
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Build the Merkle tree over an airdrop list and write its root
    BuildTree(build_tree::Cli),
    /// Write a proof for every record of an airdrop list
    GenerateProofs(generate_proofs::Cli),
    /// Generate one claimant's proof from a tree dump
    Claim(claim::Cli),
    /// Verify Merkle proofs against a root
    Verify(verify::Cli),
    /// Derive bech32 addresses from a public key
    Address(address::Cli),
    /// Sign a claim message with a private key
    Sign(sign::Cli),
    /// Verify a claim message signature
    VerifySignature(verify_signature::Cli),
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    logging::try_init(LogLevel::from_verbosity(cli.verbose)).map_err(anyhow::Error::msg)?;

    match cli.command {
        Commands::BuildTree(args) => build_tree::run(&args)?,
        Commands::GenerateProofs(args) => generate_proofs::run(&args)?,
        Commands::Claim(args) => claim::run(&args)?,
        Commands::Verify(args) => verify::run(&args)?,
        Commands::Address(args) => address::run(&args)?,
        Commands::Sign(args) => sign::run(&args)?,
        Commands::VerifySignature(args) => verify_signature::run(&args)?,
    }

    Ok(())
}
