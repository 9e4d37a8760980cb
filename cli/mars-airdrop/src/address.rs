//! Account addresses derived from secp256k1 public keys.
//!
//! `raw = RIPEMD160(SHA256(compressed_pubkey))`, then bech32-encoded under a
//! chain prefix. The same raw bytes give the claimant's Terra account and the
//! Mars account their tokens are released to.

use bech32::{FromBase32, ToBase32, Variant};
use k256::ecdsa::VerifyingKey;
use ripemd::{Digest as _, Ripemd160};

use crate::common::sha256;
use crate::error::{AirdropError, Result};

/// Prefix of the source chain accounts listed in the airdrop.
pub const SOURCE_PREFIX: &str = "terra";
/// Prefix of the chain the airdrop pays out on.
pub const TARGET_PREFIX: &str = "mars";

/// Parses a SEC1-encoded secp256k1 public key from hex.
///
/// Accepts compressed (33 bytes) and uncompressed (65 bytes) encodings, with
/// or without a `0x` prefix.
pub fn parse_pubkey(pubkey_hex: &str) -> Result<VerifyingKey> {
    let trimmed = pubkey_hex.trim();
    let cleaned = trimmed.strip_prefix("0x").unwrap_or(trimmed);
    let bytes = hex::decode(cleaned)
        .map_err(|e| AirdropError::InvalidKey(format!("invalid public key hex: {}", e)))?;
    VerifyingKey::from_sec1_bytes(&bytes)
        .map_err(|_| AirdropError::InvalidKey("not a valid secp256k1 public key".to_string()))
}

/// Compressed SEC1 encoding of a public key.
pub fn compressed_pubkey(key: &VerifyingKey) -> Vec<u8> {
    key.to_encoded_point(true).as_bytes().to_vec()
}

/// 20-byte account identifier of a public key.
pub fn raw_address(key: &VerifyingKey) -> [u8; 20] {
    let digest = Ripemd160::digest(sha256(&compressed_pubkey(key)));
    digest.into()
}

/// Bech32-encodes raw account bytes under `prefix`.
pub fn encode_address(prefix: &str, raw: &[u8]) -> Result<String> {
    bech32::encode(prefix, raw.to_base32(), Variant::Bech32)
        .map_err(|e| AirdropError::Address(e.to_string()))
}

/// Decodes a bech32 address into its prefix and raw bytes.
pub fn decode_address(address: &str) -> Result<(String, Vec<u8>)> {
    let (prefix, data, variant) =
        bech32::decode(address).map_err(|e| AirdropError::Address(e.to_string()))?;
    if variant != Variant::Bech32 {
        return Err(AirdropError::Address(format!(
            "{} is not a bech32 address",
            address
        )));
    }
    let raw = Vec::<u8>::from_base32(&data).map_err(|e| AirdropError::Address(e.to_string()))?;
    Ok((prefix, raw))
}

/// Address of `key` under `prefix`.
pub fn pubkey_to_address(key: &VerifyingKey, prefix: &str) -> Result<String> {
    encode_address(prefix, &raw_address(key))
}

/// Re-encodes an address under another prefix, e.g. `terra1...` to `mars1...`.
pub fn convert_prefix(address: &str, prefix: &str) -> Result<String> {
    let (_, raw) = decode_address(address)?;
    encode_address(prefix, &raw)
}

#[cfg(test)]
mod tests {
    use super::*;

    const PUBKEY: &str = "02306e8b60d390b54aa36a79b825dfebc49b1f3483a110c448a36db2bdfebed248";

    #[test]
    fn test_raw_address() {
        let key = parse_pubkey(PUBKEY).unwrap();
        assert_eq!(
            hex::encode(raw_address(&key)),
            "f53cbb19e79bf001bbc13ea642fe668032bbbdc8"
        );
    }

    #[test]
    fn test_pubkey_to_address() {
        let key = parse_pubkey(PUBKEY).unwrap();
        assert_eq!(
            pubkey_to_address(&key, SOURCE_PREFIX).unwrap(),
            "terra1757tkx08n0cqrw7p86ny9lnxsqeth0wgp0em95"
        );
        assert_eq!(
            pubkey_to_address(&key, TARGET_PREFIX).unwrap(),
            "mars1757tkx08n0cqrw7p86ny9lnxsqeth0wg6k6zj0"
        );
    }

    #[test]
    fn test_second_pubkey() {
        let key = parse_pubkey(
            "0x02ef8bc2e2e1da64c941e2234ec260e59a708c8acc979890b2046985756bff6b21",
        )
        .unwrap();
        assert_eq!(
            pubkey_to_address(&key, SOURCE_PREFIX).unwrap(),
            "terra1sspv8dyfg2p4phxu29k28zm3t3kmx7x5ljw9ae"
        );
    }

    #[test]
    fn test_uncompressed_pubkey_same_address() {
        let key = parse_pubkey(PUBKEY).unwrap();
        let uncompressed = hex::encode(key.to_encoded_point(false).as_bytes());
        let reparsed = parse_pubkey(&uncompressed).unwrap();
        assert_eq!(raw_address(&key), raw_address(&reparsed));
    }

    #[test]
    fn test_parse_pubkey_invalid() {
        assert!(matches!(parse_pubkey("zz"), Err(AirdropError::InvalidKey(_))));
        assert!(matches!(
            parse_pubkey(&"02".repeat(10)),
            Err(AirdropError::InvalidKey(_))
        ));
    }

    #[test]
    fn test_convert_prefix() {
        assert_eq!(
            convert_prefix("terra1757tkx08n0cqrw7p86ny9lnxsqeth0wgp0em95", TARGET_PREFIX).unwrap(),
            "mars1757tkx08n0cqrw7p86ny9lnxsqeth0wg6k6zj0"
        );
    }

    #[test]
    fn test_decode_address_bad_checksum() {
        assert!(matches!(
            decode_address("terra1757tkx08n0cqrw7p86ny9lnxsqeth0wgp0em96"),
            Err(AirdropError::Address(_))
        ));
    }
}
