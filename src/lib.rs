//! # tx-forge
//!
//! Construction, serialization and signing of legacy (pre-SegWit) Bitcoin
//! transactions.
//!
//! ## Layers
//!
//! - Wire primitives: compact-size integers, little-endian fields ([`encode`])
//! - Addresses: Base58Check P2PKH / P2SH on mainnet and testnet ([`address`], [`network`])
//! - Scripts: length-prefixed opcode streams and their templates ([`script`], [`template`])
//! - Transactions: inputs, outputs, txid, strict decoding ([`transaction`])
//! - Signing: legacy signature hashes and pluggable signers ([`sighash`], [`signer`])
//! - Convenience: configuration and a builder ([`config`], [`builder`])
//!
//! Everything is synchronous and allocation-only; no I/O is performed.
//!
//! ## Usage
//!
//! ```rust
//! use tx_forge::{Address, Transaction, TransactionInput, TransactionOutput, OutPoint, Script};
//! use tx_forge::template::p2pkh_pubkey;
//!
//! let address: Address = "1BvBMSEYstWetqTFn5Au4m4GFg7xJaNVN2".parse().unwrap();
//! let mut tx = Transaction::new(1, 0);
//! tx.add_input(TransactionInput::new(OutPoint::new([0u8; 32], 0), Script::empty(), 0xffffffff));
//! tx.add_output(TransactionOutput::new(5_000_000_000, p2pkh_pubkey(&address).unwrap()));
//! assert_eq!(
//!     tx.txid_hex(),
//!     "e10af6609324e76ecda601d4bdad3b6a6454cab9686a8031fcf3ca162c3bfb8b"
//! );
//! ```

pub mod address;
pub mod builder;
pub mod config;
pub mod constants;
pub mod encode;
pub mod error;
pub mod hash;
pub mod network;
pub mod script;
pub mod sighash;
pub mod signer;
pub mod template;
pub mod transaction;
pub mod types;
pub mod units;

// Re-export commonly used types
pub use address::Address;
pub use builder::TransactionBuilder;
pub use config::TxConfig;
pub use error::{Result, TxError};
pub use network::{AddressKind, Network};
pub use script::{Script, ScriptKind};
pub use sighash::{SighashBase, SighashType};
pub use signer::{PrivateKey, Signer};
pub use transaction::{OutPoint, Transaction, TransactionInput, TransactionOutput};
pub use types::*;
