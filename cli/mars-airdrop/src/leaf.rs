//! Leaf commitments for eligibility records.
//!
//! Leaf formula: `SHA256("{address}:{amount}")`, the amount rendered in base
//! 10. The airdrop contract recomputes exactly this string when it checks a
//! claim, so the encoding must not change.

use serde::{Deserialize, Serialize};

use crate::common::{sha256, Digest};
use crate::error::{AirdropError, Result};

/// One claimant entry of the airdrop list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EligibilityRecord {
    /// Claimant account address, opaque to the tree.
    pub address: String,
    /// Claim amount in the smallest denomination.
    pub amount: u128,
}

impl EligibilityRecord {
    pub fn new(address: impl Into<String>, amount: u128) -> Self {
        Self {
            address: address.into(),
            amount,
        }
    }
}

/// Renders the bytes a leaf commits to: `"{address}:{amount}"` as UTF-8.
pub fn canonical_encode(record: &EligibilityRecord) -> Vec<u8> {
    format!("{}:{}", record.address, record.amount).into_bytes()
}

/// Computes the leaf digest of a record.
///
/// # Errors
/// Returns `InvalidRecord` if the address is empty
pub fn build_leaf(record: &EligibilityRecord) -> Result<Digest> {
    if record.address.is_empty() {
        return Err(AirdropError::InvalidRecord(
            "address must not be empty".to_string(),
        ));
    }
    Ok(sha256(&canonical_encode(record)))
}

/// Computes leaves for a whole record list, preserving order.
///
/// The first invalid record aborts the whole batch.
pub fn build_leaves(records: &[EligibilityRecord]) -> Result<Vec<Digest>> {
    records
        .iter()
        .enumerate()
        .map(|(index, record)| {
            build_leaf(record).map_err(|e| match e {
                AirdropError::InvalidRecord(reason) => {
                    AirdropError::InvalidRecord(format!("record {}: {}", index, reason))
                }
                other => other,
            })
        })
        .collect()
}
