use thiserror::Error;

/// Errors raised by the airdrop library.
///
/// A failed proof or signature check is not an error; those return `bool`.
#[derive(Error, Debug)]
pub enum AirdropError {
    #[error("invalid record: {0}")]
    InvalidRecord(String),

    #[error("cannot build a Merkle tree from zero leaves")]
    EmptyInput,

    #[error("leaf index {index} is out of range for tree with {leaf_count} leaves")]
    IndexOutOfRange { index: usize, leaf_count: usize },

    #[error("invalid digest: {0}")]
    InvalidDigest(String),

    #[error("malformed tree: {0}")]
    MalformedTree(String),

    #[error("invalid key: {0}")]
    InvalidKey(String),

    #[error("address error: {0}")]
    Address(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, AirdropError>;
