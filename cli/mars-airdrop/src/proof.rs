//! Inclusion proofs: generation against a built tree, and stand-alone
//! verification that needs nothing but the leaf, the siblings and the root.

use tracing::trace;

use crate::common::{hash_sorted_pair, hex_encode, parse_digest, Digest};
use crate::error::{AirdropError, Result};
use crate::leaf::{build_leaf, EligibilityRecord};
use crate::tree::MerkleTree;

/// Sibling digests from the leaf level towards the root.
///
/// Carries no left/right bits: every step hashes the pair in sorted order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Proof(Vec<Digest>);

impl Proof {
    pub fn new(siblings: Vec<Digest>) -> Self {
        Self(siblings)
    }

    pub fn siblings(&self) -> &[Digest] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Lowercase hex form used in proof-output files and contract messages.
    pub fn to_hex(&self) -> Vec<String> {
        self.0.iter().map(hex_encode).collect()
    }

    /// Parses a hex proof, failing on the first malformed sibling.
    pub fn from_hex<S: AsRef<str>>(siblings: &[S]) -> Result<Self> {
        siblings
            .iter()
            .map(|s| parse_digest(s.as_ref()))
            .collect::<Result<Vec<_>>>()
            .map(Self)
    }

    pub fn into_inner(self) -> Vec<Digest> {
        self.0
    }
}

/// Generates the inclusion proof for the leaf at `leaf_index`.
///
/// Levels where the node is an unpaired carry contribute no sibling, so the
/// proof can be shorter than the tree depth.
///
/// # Errors
/// Returns `IndexOutOfRange` if `leaf_index >= tree.leaf_count()`
pub fn generate_proof(tree: &MerkleTree, leaf_index: usize) -> Result<Proof> {
    let leaf_count = tree.leaf_count();
    if leaf_index >= leaf_count {
        return Err(AirdropError::IndexOutOfRange {
            index: leaf_index,
            leaf_count,
        });
    }

    let levels = tree.levels();
    let mut siblings = Vec::with_capacity(tree.depth());
    let mut current_index = leaf_index;

    // The root level has no sibling.
    for level in &levels[..levels.len() - 1] {
        let sibling_index = current_index ^ 1;
        if let Some(sibling) = level.get(sibling_index) {
            siblings.push(*sibling);
        }
        current_index /= 2;
    }

    trace!(leaf_index, siblings = siblings.len(), "generated proof");
    Ok(Proof(siblings))
}

/// Verifies that `leaf` is included under `root`.
///
/// Folds the proof into a running digest with [`hash_sorted_pair`] and
/// compares the result against `root`. A failed check is a normal outcome
/// and is reported as `false`.
pub fn verify_proof(leaf: &Digest, proof: &[Digest], root: &Digest) -> bool {
    let computed = proof
        .iter()
        .fold(*leaf, |running, sibling| hash_sorted_pair(&running, sibling));
    computed == *root
}

/// Like [`verify_proof`], for a proof given as hex strings.
///
/// A sibling that is not valid 32-byte hex makes the proof fail rather than
/// raising an error.
pub fn verify_hex_proof<S: AsRef<str>>(leaf: &Digest, proof: &[S], root: &Digest) -> bool {
    match Proof::from_hex(proof) {
        Ok(proof) => verify_proof(leaf, proof.siblings(), root),
        Err(e) => {
            trace!(error = %e, "rejecting malformed proof");
            false
        }
    }
}

/// Checks a claimant's record and hex proof against a root, recomputing the
/// leaf from the record. An invalid record fails verification.
pub fn verify_claim<S: AsRef<str>>(record: &EligibilityRecord, proof: &[S], root: &Digest) -> bool {
    match build_leaf(record) {
        Ok(leaf) => verify_hex_proof(&leaf, proof, root),
        Err(_) => false,
    }
}
