//! Claim message construction and secp256k1 signatures over it.
//!
//! A claimant proves control of the listed account by signing
//! `SHA256(claim_message(...))` with that account's key. Signatures are the
//! compact 64-byte `r || s` form, hex-encoded.

use std::io::BufRead;

use k256::ecdsa::signature::hazmat::{PrehashSigner, PrehashVerifier};
use k256::ecdsa::{Signature, SigningKey};
use zeroize::Zeroize;

use crate::address::parse_pubkey;
use crate::common::{hex_encode, sha256};
use crate::error::{AirdropError, Result};

/// Builds the message a claimant signs to release `amount` to `target_acct`.
pub fn claim_message(source_acct: &str, amount: u128, target_acct: &str) -> String {
    format!(
        "airdrop for {} of {} umars shall be released to {}",
        source_acct, amount, target_acct
    )
}

/// Parses a 32-byte private key from hex, zeroizing intermediate buffers.
///
/// # Arguments
/// * `key_str` - The key, with or without "0x" prefix
pub fn parse_signing_key(key_str: &str) -> Result<SigningKey> {
    let trimmed = key_str.trim();
    let cleaned = trimmed.strip_prefix("0x").unwrap_or(trimmed);
    if cleaned.is_empty() {
        return Err(AirdropError::InvalidKey("private key is empty".to_string()));
    }
    let mut key_bytes = hex::decode(cleaned)
        .map_err(|_| AirdropError::InvalidKey("invalid private key format".to_string()))?;
    if key_bytes.len() != 32 {
        let len = key_bytes.len();
        key_bytes.zeroize();
        return Err(AirdropError::InvalidKey(format!(
            "invalid private key length: expected 32 bytes, got {}",
            len
        )));
    }
    let signing_key = SigningKey::from_slice(&key_bytes)
        .map_err(|_| AirdropError::InvalidKey("private key is not a valid scalar".to_string()));
    key_bytes.zeroize();
    signing_key
}

/// Reads a hex private key from the first line of `reader`.
pub fn read_signing_key<R: BufRead>(mut reader: R) -> Result<SigningKey> {
    let mut buffer = String::new();
    reader.read_line(&mut buffer)?;
    let key = parse_signing_key(&buffer);
    buffer.zeroize();
    key
}

/// Signs `SHA256(message)` and returns the hex compact signature.
pub fn sign_message(key: &SigningKey, message: &str) -> Result<String> {
    let signature: Signature = key
        .sign_prehash(&sha256(message.as_bytes()))
        .map_err(|e| AirdropError::InvalidKey(format!("signing failed: {}", e)))?;
    Ok(hex_encode(signature.to_bytes()))
}

/// Checks a hex compact signature over `SHA256(message)`.
///
/// # Errors
/// Returns `InvalidKey` if the public key cannot be parsed. A malformed or
/// non-matching signature is `Ok(false)`.
pub fn verify_signature(pubkey_hex: &str, message: &str, signature_hex: &str) -> Result<bool> {
    let key = parse_pubkey(pubkey_hex)?;
    let trimmed = signature_hex.trim();
    let cleaned = trimmed.strip_prefix("0x").unwrap_or(trimmed);
    let Ok(sig_bytes) = hex::decode(cleaned) else {
        return Ok(false);
    };
    let Ok(signature) = Signature::from_slice(&sig_bytes) else {
        return Ok(false);
    };
    Ok(key
        .verify_prehash(&sha256(message.as_bytes()), &signature)
        .is_ok())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::address::{compressed_pubkey, pubkey_to_address, SOURCE_PREFIX, TARGET_PREFIX};

    const PUBKEY: &str = "02306e8b60d390b54aa36a79b825dfebc49b1f3483a110c448a36db2bdfebed248";
    const SOURCE: &str = "terra1757tkx08n0cqrw7p86ny9lnxsqeth0wgp0em95";
    const TARGET: &str = "mars1757tkx08n0cqrw7p86ny9lnxsqeth0wg6k6zj0";
    const SIGNATURE: &str = "a0927f2beea637682263e91afd39c2e11f987e41c3239cc6e6a6d8bb9f07decc27c69c02968da59567449d2baf8c24990ddf0a6457fb1e7c6187e1cc6723483e";

    #[test]
    fn test_claim_message() {
        assert_eq!(
            claim_message(SOURCE, 42069, TARGET),
            "airdrop for terra1757tkx08n0cqrw7p86ny9lnxsqeth0wgp0em95 of 42069 umars shall be released to mars1757tkx08n0cqrw7p86ny9lnxsqeth0wg6k6zj0"
        );
    }

    #[test]
    fn test_verify_known_signature() {
        let msg = claim_message(SOURCE, 42069, TARGET);
        assert!(verify_signature(PUBKEY, &msg, SIGNATURE).unwrap());
    }

    #[test]
    fn test_verify_rejects_wrong_amount() {
        let msg = claim_message(SOURCE, 69420, TARGET);
        assert!(!verify_signature(PUBKEY, &msg, SIGNATURE).unwrap());
    }

    #[test]
    fn test_verify_rejects_foreign_signature() {
        let msg = claim_message(SOURCE, 42069, TARGET);
        let bogus = "7f73595b39e4e8ed853e3fbe49ca32438e9a9b6f1f578dfa6acfda1d267c60953b749ba2b091b6058c0258db3f9231a4529651962b718b77db3e0ed8887e7cd1";
        assert!(!verify_signature(PUBKEY, &msg, bogus).unwrap());
    }

    #[test]
    fn test_verify_malformed_signature_is_false() {
        let msg = claim_message(SOURCE, 42069, TARGET);
        assert!(!verify_signature(PUBKEY, &msg, "nothex").unwrap());
        assert!(!verify_signature(PUBKEY, &msg, "abcd").unwrap());
    }

    #[test]
    fn test_verify_malformed_pubkey_is_error() {
        assert!(verify_signature("00", "msg", SIGNATURE).is_err());
    }

    #[test]
    fn test_sign_then_verify() {
        let key = parse_signing_key(&"42".repeat(32)).unwrap();
        let pubkey = hex_encode(compressed_pubkey(key.verifying_key()));
        let source = pubkey_to_address(key.verifying_key(), SOURCE_PREFIX).unwrap();
        let target = pubkey_to_address(key.verifying_key(), TARGET_PREFIX).unwrap();
        let msg = claim_message(&source, 42069, &target);

        let signature = sign_message(&key, &msg).unwrap();
        assert_eq!(signature.len(), 128);
        assert!(verify_signature(&pubkey, &msg, &signature).unwrap());
    }

    #[test]
    fn test_sign_deterministic() {
        let key = parse_signing_key(&"07".repeat(32)).unwrap();
        assert_eq!(
            sign_message(&key, "hello").unwrap(),
            sign_message(&key, "hello").unwrap()
        );
    }

    #[test]
    fn test_parse_signing_key_errors() {
        assert!(parse_signing_key("").is_err());
        assert!(parse_signing_key("0x").is_err());
        assert!(parse_signing_key("1234").is_err());
        assert!(parse_signing_key(&"zz".repeat(32)).is_err());
        assert!(parse_signing_key(&"00".repeat(32)).is_err());
    }

    #[test]
    fn test_read_signing_key_from_reader() {
        let input = format!("0x{}\n", "11".repeat(32));
        let key = read_signing_key(input.as_bytes()).unwrap();
        assert_eq!(key.to_bytes().as_slice(), &[0x11u8; 32]);
    }
}
