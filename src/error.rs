//! Error types for transaction construction, encoding and signing

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TxError {
    #[error("Invalid Base58Check checksum")]
    InvalidChecksum,

    #[error("Unknown address version byte: 0x{0:02x}")]
    UnknownVersion(u8),

    #[error("Invalid length: expected {expected} bytes, got {actual}")]
    InvalidLength { expected: usize, actual: usize },

    #[error("Malformed variable-length integer")]
    MalformedLength,

    #[error("Non-canonical variable-length integer encoding of {0}")]
    NonCanonicalLength(u64),

    #[error("Script is shorter than its declared length")]
    TruncatedScript,

    #[error("Transaction input is truncated")]
    TruncatedInput,

    #[error("Transaction output is truncated")]
    TruncatedOutput,

    #[error("Transaction is truncated")]
    TruncatedTransaction,

    #[error("{0} trailing bytes after transaction")]
    TrailingBytes(usize),

    #[error("Unsupported address type")]
    UnsupportedAddressType,

    #[error("Redeem script is empty")]
    EmptyRedeemScript,

    #[error("Input {0} has no public key attached")]
    NotReadyToSign(usize),

    #[error("Input index {index} out of range ({len} inputs)")]
    IndexOutOfRange { index: usize, len: usize },

    #[error("Invalid Base58 string: {0}")]
    InvalidBase58(String),

    #[error("Invalid hex string: {0}")]
    InvalidHex(String),

    #[error("Invalid sighash type: 0x{0:08x}")]
    InvalidSighashType(u32),

    #[error("SIGHASH_SINGLE for input {index} but only {outputs} outputs")]
    NoMatchingOutput { index: usize, outputs: usize },

    #[error("Input {0} does not carry a signable script")]
    UnsignableScript(usize),

    #[error("Invalid private key: {0}")]
    InvalidPrivateKey(String),

    #[error("Signing failed: {0}")]
    Signing(String),

    #[error("Invalid amount: {0}")]
    InvalidAmount(String),

    #[error("Network mismatch: expected {expected}, got {actual}")]
    NetworkMismatch { expected: String, actual: String },

    #[error("Data of {0} bytes is too large to push")]
    PushTooLarge(usize),

    #[error("Configuration error: {0}")]
    Config(String),
}

pub type Result<T> = std::result::Result<T, TxError>;
