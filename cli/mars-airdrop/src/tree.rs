//! Binary Merkle tree over claim leaves.
//!
//! Internal nodes: `SHA256(min(left, right) || max(left, right))`.
//! An odd node at the end of a level is carried up unchanged; it is never
//! duplicated or hashed with itself. Published roots depend on this rule.

use tracing::{debug, trace};

use crate::common::{hash_sorted_pair, hex_encode, parse_digest, Digest};
use crate::error::{AirdropError, Result};
use crate::leaf::{build_leaves, EligibilityRecord};
use crate::proof::{generate_proof, Proof};

/// A Merkle tree with every level kept in memory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MerkleTree {
    /// All nodes level by level, bottom-up. `levels[0]` = leaves in input order.
    levels: Vec<Vec<Digest>>,
}

/// Builds a tree from leaf digests in input order.
///
/// # Errors
/// Returns `EmptyInput` if `leaves` is empty
pub fn build_tree(leaves: Vec<Digest>) -> Result<MerkleTree> {
    if leaves.is_empty() {
        return Err(AirdropError::EmptyInput);
    }

    let mut levels = vec![leaves];
    while let Some(level) = levels.last().filter(|level| level.len() > 1) {
        let next_level = reduce_level(level);
        trace!(width = next_level.len(), "reduced level");
        levels.push(next_level);
    }

    let tree = MerkleTree { levels };
    debug!(
        leaves = tree.leaf_count(),
        depth = tree.depth(),
        root = %hex_encode(tree.root()),
        "built merkle tree"
    );
    Ok(tree)
}

/// Pairs consecutive nodes into parents, carrying an odd last node up as-is.
fn reduce_level(level: &[Digest]) -> Vec<Digest> {
    level
        .chunks(2)
        .map(|chunk| match chunk {
            [left, right] => hash_sorted_pair(left, right),
            [carry] => *carry,
            _ => unreachable!("chunks(2) yields one or two nodes"),
        })
        .collect()
}

impl MerkleTree {
    /// Builds a tree directly from eligibility records.
    pub fn from_records(records: &[EligibilityRecord]) -> Result<Self> {
        build_tree(build_leaves(records)?)
    }

    /// Rebuilds a tree from previously dumped levels, checking that every
    /// parent really is derived from its children.
    pub fn from_levels(levels: Vec<Vec<Digest>>) -> Result<Self> {
        let Some(leaves) = levels.first() else {
            return Err(AirdropError::EmptyInput);
        };
        if leaves.is_empty() {
            return Err(AirdropError::EmptyInput);
        }

        for (level_num, pair) in levels.windows(2).enumerate() {
            let expected = reduce_level(&pair[0]);
            if pair[1].len() != expected.len() {
                return Err(AirdropError::MalformedTree(format!(
                    "level {} has {} nodes but expected {} based on level {}",
                    level_num + 1,
                    pair[1].len(),
                    expected.len(),
                    level_num
                )));
            }
            if let Some(index) = expected.iter().zip(&pair[1]).position(|(a, b)| a != b) {
                return Err(AirdropError::MalformedTree(format!(
                    "node {} at level {} does not match its children",
                    index,
                    level_num + 1
                )));
            }
        }

        let top = levels.last().map_or(0, Vec::len);
        if top != 1 {
            return Err(AirdropError::MalformedTree(format!(
                "top level has {} nodes, expected a single root",
                top
            )));
        }

        Ok(Self { levels })
    }

    /// Parses the `level:index:hex` dump produced by [`MerkleTree::render`].
    pub fn parse(dump: &str) -> Result<Self> {
        let mut levels: Vec<Vec<Digest>> = Vec::new();

        for (line_num, line) in dump.lines().enumerate() {
            let trimmed = line.trim();
            if trimmed.is_empty() {
                continue;
            }
            let parts: Vec<&str> = trimmed.split(':').collect();
            let [level, index, hash] = parts.as_slice() else {
                return Err(AirdropError::MalformedTree(format!(
                    "line {}: expected 'level:index:hash', got '{}'",
                    line_num + 1,
                    trimmed
                )));
            };
            let level: usize = level.parse().map_err(|_| {
                AirdropError::MalformedTree(format!("line {}: invalid level", line_num + 1))
            })?;
            let index: usize = index.parse().map_err(|_| {
                AirdropError::MalformedTree(format!("line {}: invalid index", line_num + 1))
            })?;
            let hash = parse_digest(hash)?;

            if level == levels.len() {
                levels.push(Vec::new());
            }
            let Some(nodes) = levels.get_mut(level) else {
                return Err(AirdropError::MalformedTree(format!(
                    "line {}: level {} appears before level {}",
                    line_num + 1,
                    level,
                    levels.len()
                )));
            };
            if index != nodes.len() {
                return Err(AirdropError::MalformedTree(format!(
                    "line {}: expected index {} at level {}, got {}",
                    line_num + 1,
                    nodes.len(),
                    level,
                    index
                )));
            }
            nodes.push(hash);
        }

        Self::from_levels(levels)
    }

    /// Renders every node as `level:index:hex`, one per line, bottom-up.
    pub fn render(&self) -> String {
        let mut out = String::new();
        for (level_num, level) in self.levels.iter().enumerate() {
            for (i, hash) in level.iter().enumerate() {
                out.push_str(&format!("{}:{}:{}\n", level_num, i, hex_encode(hash)));
            }
        }
        out
    }

    /// The root digest.
    pub fn root(&self) -> Digest {
        // `build_tree` and `from_levels` both guarantee a single-node top level.
        self.levels[self.levels.len() - 1][0]
    }

    /// Number of leaves.
    pub fn leaf_count(&self) -> usize {
        self.levels[0].len()
    }

    /// Number of levels above the leaves.
    pub fn depth(&self) -> usize {
        self.levels.len() - 1
    }

    pub fn leaves(&self) -> &[Digest] {
        &self.levels[0]
    }

    pub fn levels(&self) -> &[Vec<Digest>] {
        &self.levels
    }

    /// Index of the first leaf equal to `leaf`, if any.
    pub fn position(&self, leaf: &Digest) -> Option<usize> {
        self.leaves().iter().position(|candidate| candidate == leaf)
    }

    /// Inclusion proof for the leaf at `leaf_index`.
    pub fn proof(&self, leaf_index: usize) -> Result<Proof> {
        generate_proof(self, leaf_index)
    }
}
