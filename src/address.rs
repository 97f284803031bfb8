//! Base58Check addresses: a version byte plus a 20-byte hash
//!
//! ```text
//! base58( version(1) || hash(20) || sha256d(version || hash)[..4] )
//! ```
//!
//! Only pay-to-public-key-hash and pay-to-script-hash addresses are modelled.
//! Private keys share the same Base58Check framing; see
//! [`PrivateKey::from_wif`](crate::signer::PrivateKey::from_wif).

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::constants::*;
use crate::error::{Result, TxError};
use crate::hash::{checksum, hash160};
use crate::network::{self, AddressKind, Network};
use crate::script::Script;
use crate::types::{ByteString, PubKeyHash};

/// A decoded P2PKH or P2SH address
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Address {
    version: u8,
    hash: PubKeyHash,
    network: Network,
    kind: AddressKind,
}

impl Address {
    /// Decode a Base58Check address string
    pub fn from_base58(s: &str) -> Result<Self> {
        let payload = decode_base58_check(s)?;
        if payload.len() != 1 + HASH160_SIZE {
            return Err(TxError::InvalidLength {
                expected: ADDRESS_PAYLOAD_SIZE,
                actual: payload.len() + CHECKSUM_SIZE,
            });
        }
        let version = payload[0];
        let (network, kind) = match network::lookup(version) {
            Some((net, kind)) if kind != AddressKind::PrivateKey => (net, kind),
            _ => return Err(TxError::UnknownVersion(version)),
        };
        let mut hash = [0u8; HASH160_SIZE];
        hash.copy_from_slice(&payload[1..]);
        Ok(Self { version, hash, network, kind })
    }

    /// Wrap a raw 20-byte hash
    pub fn from_hash(hash: &[u8], network: Network, kind: AddressKind) -> Result<Self> {
        if kind == AddressKind::PrivateKey {
            return Err(TxError::UnsupportedAddressType);
        }
        if hash.len() != HASH160_SIZE {
            return Err(TxError::InvalidLength {
                expected: HASH160_SIZE,
                actual: hash.len(),
            });
        }
        let mut fixed = [0u8; HASH160_SIZE];
        fixed.copy_from_slice(hash);
        Ok(Self {
            version: network.version_byte(kind),
            hash: fixed,
            network,
            kind,
        })
    }

    /// P2PKH address paying to `hash160(public_key)`
    pub fn from_public_key(public_key: &[u8], network: Network) -> Self {
        Self {
            version: network.version_byte(AddressKind::PubKeyHash),
            hash: hash160(public_key),
            network,
            kind: AddressKind::PubKeyHash,
        }
    }

    /// P2SH address paying to `hash160(redeem_script)`
    pub fn from_redeem_script(redeem_script: &Script, network: Network) -> Result<Self> {
        if redeem_script.is_empty() {
            return Err(TxError::EmptyRedeemScript);
        }
        Ok(Self {
            version: network.version_byte(AddressKind::ScriptHash),
            hash: hash160(redeem_script.data()),
            network,
            kind: AddressKind::ScriptHash,
        })
    }

    /// Recover the address a P2PKH or P2SH locking script pays to
    pub fn from_script_pubkey(script: &Script, network: Network) -> Result<Self> {
        let data = script.data();
        if data.len() == P2PKH_SCRIPT_SIZE
            && data[0] == OP_DUP
            && data[1] == OP_HASH160
            && data[2] == HASH160_SIZE as u8
            && data[23] == OP_EQUALVERIFY
            && data[24] == OP_CHECKSIG
        {
            return Self::from_hash(&data[3..23], network, AddressKind::PubKeyHash);
        }
        if data.len() == P2SH_SCRIPT_SIZE
            && data[0] == OP_HASH160
            && data[1] == HASH160_SIZE as u8
            && data[22] == OP_EQUAL
        {
            return Self::from_hash(&data[2..22], network, AddressKind::ScriptHash);
        }
        Err(TxError::UnsupportedAddressType)
    }

    /// Encode as Base58Check
    pub fn to_base58(&self) -> String {
        let mut payload = Vec::with_capacity(1 + HASH160_SIZE);
        payload.push(self.version);
        payload.extend_from_slice(&self.hash);
        encode_base58_check(&payload)
    }

    pub fn version(&self) -> u8 {
        self.version
    }

    pub fn hash(&self) -> &PubKeyHash {
        &self.hash
    }

    pub fn network(&self) -> Network {
        self.network
    }

    pub fn kind(&self) -> AddressKind {
        self.kind
    }
}

impl fmt::Display for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_base58())
    }
}

impl FromStr for Address {
    type Err = TxError;

    fn from_str(s: &str) -> Result<Self> {
        Self::from_base58(s)
    }
}

/// `base58(payload || checksum(payload))`
pub fn encode_base58_check(payload: &[u8]) -> String {
    let mut data = Vec::with_capacity(payload.len() + CHECKSUM_SIZE);
    data.extend_from_slice(payload);
    data.extend_from_slice(&checksum(payload));
    bs58::encode(data).into_string()
}

/// Decode Base58 and verify the trailing 4-byte checksum.
///
/// Returns the payload without the checksum.
pub fn decode_base58_check(s: &str) -> Result<ByteString> {
    let mut data = bs58::decode(s)
        .into_vec()
        .map_err(|e| TxError::InvalidBase58(e.to_string()))?;
    if data.len() < 1 + CHECKSUM_SIZE {
        return Err(TxError::InvalidLength {
            expected: ADDRESS_PAYLOAD_SIZE,
            actual: data.len(),
        });
    }
    let split = data.len() - CHECKSUM_SIZE;
    if checksum(&data[..split]) != data[split..] {
        log::debug!("Base58Check checksum mismatch for {}", s);
        return Err(TxError::InvalidChecksum);
    }
    data.truncate(split);
    Ok(data)
}
