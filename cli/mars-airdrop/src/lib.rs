#![forbid(unsafe_code)]

pub mod address;
pub mod claims;
pub mod common;
pub mod error;
pub mod leaf;
pub mod logging;
pub mod proof;
pub mod signing;
pub mod tree;

pub use common::{hash_sorted_pair, hex_encode, parse_digest, sha256, write_file_atomic, Digest};
pub use error::{AirdropError, Result};
pub use leaf::{build_leaf, canonical_encode, EligibilityRecord};
pub use proof::{generate_proof, verify_claim, verify_hex_proof, verify_proof, Proof};
pub use tree::{build_tree, MerkleTree};
