//! Airdrop list input and proof-output files.
//!
//! Input: a JSON array of `{ "address": string, "amount": integer }`.
//! Output: the same records, in the same order, each with its
//! `merkle_proof` as a list of hex digests.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::{debug, info};

use crate::common::{hex_encode, write_file_atomic, Digest};
use crate::error::{AirdropError, Result};
use crate::leaf::{build_leaf, EligibilityRecord};
use crate::tree::MerkleTree;

/// One element of the proof-output file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClaimEntry {
    pub address: String,
    pub amount: u128,
    pub merkle_proof: Vec<String>,
}

impl ClaimEntry {
    pub fn record(&self) -> EligibilityRecord {
        EligibilityRecord::new(self.address.clone(), self.amount)
    }
}

/// A single claimant's proof, as written by the `claim` command.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClaimOutput {
    pub merkle_root: String,
    pub address: String,
    pub amount: u128,
    pub leaf_index: usize,
    pub merkle_proof: Vec<String>,
}

/// Root plus one entry per input record.
#[derive(Debug, Clone)]
pub struct ClaimSet {
    pub root: Digest,
    pub entries: Vec<ClaimEntry>,
}

/// Parses the airdrop list from JSON text.
///
/// Amounts may be JSON integers or decimal digit strings (the on-chain
/// `Uint128` form). Negative, fractional and float-coerced amounts are
/// rejected, since their decimal rendering would not be exact.
///
/// # Errors
/// * `EmptyInput` - the array has no records
/// * `InvalidRecord` - a record is malformed; the message names its index
pub fn parse_records(json: &str) -> Result<Vec<EligibilityRecord>> {
    let values: Vec<Value> = serde_json::from_str(json)?;
    if values.is_empty() {
        return Err(AirdropError::EmptyInput);
    }

    values
        .iter()
        .enumerate()
        .map(|(index, value)| {
            parse_record(value).map_err(|reason| {
                AirdropError::InvalidRecord(format!("record {}: {}", index, reason))
            })
        })
        .collect()
}

fn parse_record(value: &Value) -> std::result::Result<EligibilityRecord, String> {
    let address = match value.get("address") {
        Some(Value::String(address)) if !address.is_empty() => address.clone(),
        Some(Value::String(_)) => return Err("address must not be empty".to_string()),
        Some(other) => return Err(format!("address must be a string, got {}", other)),
        None => return Err("missing address".to_string()),
    };
    let amount = match value.get("amount") {
        Some(amount) => parse_amount(amount)?,
        None => return Err("missing amount".to_string()),
    };
    Ok(EligibilityRecord { address, amount })
}

fn parse_amount(value: &Value) -> std::result::Result<u128, String> {
    match value {
        Value::Number(number) => number
            .as_u64()
            .map(u128::from)
            .ok_or_else(|| format!("amount {} is not a non-negative exact integer", number)),
        Value::String(digits) => {
            if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
                return Err(format!("amount '{}' is not a decimal integer", digits));
            }
            digits
                .parse::<u128>()
                .map_err(|_| format!("amount '{}' is out of range", digits))
        }
        other => Err(format!("amount must be a number, got {}", other)),
    }
}

/// Reads and parses the airdrop list from a file.
pub fn load_records(path: &Path) -> Result<Vec<EligibilityRecord>> {
    let contents = fs::read_to_string(path)?;
    let records = parse_records(&contents)?;
    info!(count = records.len(), path = %path.display(), "read airdrop records");
    Ok(records)
}

/// Builds the tree for `records` and a proof for every record.
pub fn generate_claims(records: &[EligibilityRecord]) -> Result<ClaimSet> {
    let tree = MerkleTree::from_records(records)?;

    let entries = records
        .iter()
        .enumerate()
        .map(|(index, record)| {
            let proof = tree.proof(index)?;
            debug!(index, address = %record.address, siblings = proof.len(), "generated proof");
            Ok(ClaimEntry {
                address: record.address.clone(),
                amount: record.amount,
                merkle_proof: proof.to_hex(),
            })
        })
        .collect::<Result<Vec<_>>>()?;

    Ok(ClaimSet {
        root: tree.root(),
        entries,
    })
}

/// Builds a single claimant's proof from a tree.
///
/// Returns `Ok(None)` when the record's leaf is not in the tree.
pub fn claim_for(tree: &MerkleTree, record: &EligibilityRecord) -> Result<Option<ClaimOutput>> {
    let leaf = build_leaf(record)?;
    let Some(leaf_index) = tree.position(&leaf) else {
        return Ok(None);
    };
    let proof = tree.proof(leaf_index)?;
    Ok(Some(ClaimOutput {
        merkle_root: hex_encode(tree.root()),
        address: record.address.clone(),
        amount: record.amount,
        leaf_index,
        merkle_proof: proof.to_hex(),
    }))
}

/// Writes the proof-output file, pretty-printed.
pub fn write_claims(path: &Path, entries: &[ClaimEntry]) -> Result<()> {
    let json = serde_json::to_string_pretty(entries)?;
    write_file_atomic(path, &json)
}

/// Reads a proof-output file.
pub fn load_claims(path: &Path) -> Result<Vec<ClaimEntry>> {
    let contents = fs::read_to_string(path)?;
    Ok(serde_json::from_str(&contents)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::common::parse_digest;
    use crate::proof::verify_claim;

    #[test]
    fn test_parse_records() {
        let json = r#"[
            {"address": "A", "amount": 12345},
            {"address": "B", "amount": "23456"}
        ]"#;
        let records = parse_records(json).unwrap();
        assert_eq!(
            records,
            vec![
                EligibilityRecord::new("A", 12345),
                EligibilityRecord::new("B", 23456),
            ]
        );
    }

    #[test]
    fn test_parse_records_large_string_amount() {
        let json = r#"[{"address": "A", "amount": "100000000000000000000000"}]"#;
        let records = parse_records(json).unwrap();
        assert_eq!(records[0].amount, 100_000_000_000_000_000_000_000u128);
    }

    #[test]
    fn test_parse_records_empty() {
        assert!(matches!(parse_records("[]"), Err(AirdropError::EmptyInput)));
    }

    fn assert_invalid(json: &str) {
        match parse_records(json) {
            Err(AirdropError::InvalidRecord(reason)) => assert!(reason.starts_with("record ")),
            other => panic!("expected InvalidRecord for {}, got {:?}", json, other),
        }
    }

    #[test]
    fn test_parse_records_rejects_negative_amount() {
        assert_invalid(r#"[{"address": "A", "amount": -1}]"#);
    }

    #[test]
    fn test_parse_records_rejects_fractional_amount() {
        assert_invalid(r#"[{"address": "A", "amount": 1.5}]"#);
    }

    #[test]
    fn test_parse_records_rejects_float_amount() {
        assert_invalid(r#"[{"address": "A", "amount": 1e3}]"#);
    }

    #[test]
    fn test_parse_records_rejects_garbage_string_amount() {
        assert_invalid(r#"[{"address": "A", "amount": "12a"}]"#);
        assert_invalid(r#"[{"address": "A", "amount": "-5"}]"#);
        assert_invalid(r#"[{"address": "A", "amount": ""}]"#);
    }

    #[test]
    fn test_parse_records_rejects_bad_address() {
        assert_invalid(r#"[{"address": "", "amount": 1}]"#);
        assert_invalid(r#"[{"address": 7, "amount": 1}]"#);
        assert_invalid(r#"[{"amount": 1}]"#);
    }

    #[test]
    fn test_parse_records_rejects_missing_amount() {
        assert_invalid(r#"[{"address": "A"}]"#);
        assert_invalid(r#"[{"address": "A", "amount": null}]"#);
    }

    #[test]
    fn test_parse_records_names_failing_index() {
        let json = r#"[{"address": "A", "amount": 1}, {"address": "B", "amount": -2}]"#;
        match parse_records(json) {
            Err(AirdropError::InvalidRecord(reason)) => assert!(reason.starts_with("record 1:")),
            other => panic!("expected InvalidRecord, got {:?}", other),
        }
    }

    #[test]
    fn test_parse_records_not_an_array() {
        assert!(matches!(
            parse_records(r#"{"address": "A"}"#),
            Err(AirdropError::Json(_))
        ));
    }

    #[test]
    fn test_generate_claims_verifies() {
        let records = vec![
            EligibilityRecord::new("A", 12345),
            EligibilityRecord::new("B", 23456),
            EligibilityRecord::new("C", 42069),
        ];
        let claims = generate_claims(&records).unwrap();
        assert_eq!(claims.entries.len(), 3);
        for (entry, record) in claims.entries.iter().zip(&records) {
            assert_eq!(&entry.record(), record);
            assert!(verify_claim(record, &entry.merkle_proof, &claims.root));
        }
    }

    #[test]
    fn test_claim_for_missing_record() {
        let records = vec![EligibilityRecord::new("A", 1), EligibilityRecord::new("B", 2)];
        let tree = MerkleTree::from_records(&records).unwrap();
        assert!(claim_for(&tree, &EligibilityRecord::new("A", 2))
            .unwrap()
            .is_none());
    }

    #[test]
    fn test_claim_for_member() {
        let records = vec![
            EligibilityRecord::new("A", 1),
            EligibilityRecord::new("B", 2),
            EligibilityRecord::new("C", 3),
        ];
        let tree = MerkleTree::from_records(&records).unwrap();
        let claim = claim_for(&tree, &records[2]).unwrap().unwrap();
        assert_eq!(claim.leaf_index, 2);
        assert_eq!(claim.merkle_proof.len(), 1);
        let root = parse_digest(&claim.merkle_root).unwrap();
        assert!(verify_claim(&records[2], &claim.merkle_proof, &root));
    }

    #[test]
    fn test_claims_file_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("proofs.json");
        let records = vec![EligibilityRecord::new("A", 1), EligibilityRecord::new("B", 2)];
        let claims = generate_claims(&records).unwrap();

        write_claims(&path, &claims.entries).unwrap();
        let loaded = load_claims(&path).unwrap();
        assert_eq!(loaded, claims.entries);

        let raw = fs::read_to_string(&path).unwrap();
        assert!(raw.contains("\"merkle_proof\""));
        assert!(raw.contains("\"amount\": 1"));
    }
}
