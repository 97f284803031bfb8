//! Networks and the version-byte prefix table
//!
//! Prefixes from <https://en.bitcoin.it/wiki/List_of_address_prefixes>.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::TxError;

/// Bitcoin network an address or key belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Network {
    Mainnet,
    Testnet,
}

/// What a version byte says about the payload that follows it
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AddressKind {
    /// Pay to public key hash
    PubKeyHash,
    /// Pay to script hash
    ScriptHash,
    /// WIF-encoded private key
    PrivateKey,
}

/// Version byte for one (network, kind) pair
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Prefix {
    pub network: Network,
    pub kind: AddressKind,
    pub version: u8,
}

/// Prefix table: 𝒫 = Network × Kind → byte
pub const PREFIXES: [Prefix; 6] = [
    Prefix { network: Network::Mainnet, kind: AddressKind::PubKeyHash, version: 0x00 },
    Prefix { network: Network::Mainnet, kind: AddressKind::ScriptHash, version: 0x05 },
    Prefix { network: Network::Mainnet, kind: AddressKind::PrivateKey, version: 0x80 },
    Prefix { network: Network::Testnet, kind: AddressKind::PubKeyHash, version: 0x6f },
    Prefix { network: Network::Testnet, kind: AddressKind::ScriptHash, version: 0xc4 },
    Prefix { network: Network::Testnet, kind: AddressKind::PrivateKey, version: 0xef },
];

impl Network {
    /// Version byte used for `kind` on this network
    pub fn version_byte(self, kind: AddressKind) -> u8 {
        match (self, kind) {
            (Network::Mainnet, AddressKind::PubKeyHash) => 0x00,
            (Network::Mainnet, AddressKind::ScriptHash) => 0x05,
            (Network::Mainnet, AddressKind::PrivateKey) => 0x80,
            (Network::Testnet, AddressKind::PubKeyHash) => 0x6f,
            (Network::Testnet, AddressKind::ScriptHash) => 0xc4,
            (Network::Testnet, AddressKind::PrivateKey) => 0xef,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Network::Mainnet => "mainnet",
            Network::Testnet => "testnet",
        }
    }
}

/// Reverse lookup: which (network, kind) a version byte belongs to
pub fn lookup(version: u8) -> Option<(Network, AddressKind)> {
    PREFIXES
        .iter()
        .find(|p| p.version == version)
        .map(|p| (p.network, p.kind))
}

impl fmt::Display for Network {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Network {
    type Err = TxError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "mainnet" | "main" | "bitcoin" => Ok(Network::Mainnet),
            "testnet" | "test" => Ok(Network::Testnet),
            other => Err(TxError::Config(format!("unknown network: {}", other))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version_bytes() {
        assert_eq!(Network::Mainnet.version_byte(AddressKind::PubKeyHash), 0x00);
        assert_eq!(Network::Mainnet.version_byte(AddressKind::ScriptHash), 0x05);
        assert_eq!(Network::Mainnet.version_byte(AddressKind::PrivateKey), 0x80);
        assert_eq!(Network::Testnet.version_byte(AddressKind::PubKeyHash), 0x6f);
        assert_eq!(Network::Testnet.version_byte(AddressKind::ScriptHash), 0xc4);
        assert_eq!(Network::Testnet.version_byte(AddressKind::PrivateKey), 0xef);
    }

    #[test]
    fn test_lookup_inverts_table() {
        for prefix in PREFIXES.iter() {
            assert_eq!(lookup(prefix.version), Some((prefix.network, prefix.kind)));
        }
        assert_eq!(lookup(0x42), None);
    }

    #[test]
    fn test_version_byte_matches_table() {
        assert_eq!(PREFIXES.len(), 6);
        for prefix in PREFIXES.iter() {
            assert_eq!(prefix.network.version_byte(prefix.kind), prefix.version);
        }
    }

    #[test]
    fn test_network_from_str() {
        assert_eq!("mainnet".parse::<Network>().unwrap(), Network::Mainnet);
        assert_eq!("TESTNET".parse::<Network>().unwrap(), Network::Testnet);
        assert!("regtest".parse::<Network>().is_err());
    }

    #[test]
    fn test_network_serde() {
        let json = serde_json::to_string(&Network::Testnet).unwrap();
        assert_eq!(json, "\"testnet\"");
        let net: Network = serde_json::from_str("\"mainnet\"").unwrap();
        assert_eq!(net, Network::Mainnet);
    }
}
