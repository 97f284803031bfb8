//! Builder configuration
//!
//! ```json
//! { "network": "mainnet", "version": 2, "lock_time": 0, "sequence": 4294967295, "sighash": "all" }
//! ```
//!
//! Every field is optional; missing fields take the values of
//! [`TxConfig::default`].

use serde::{Deserialize, Serialize};

use crate::constants::*;
use crate::error::{Result, TxError};
use crate::network::Network;
use crate::sighash::SighashType;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct TxConfig {
    /// Network addresses must belong to
    pub network: Network,
    /// Transaction version
    pub version: i32,
    /// Transaction lock time
    pub lock_time: u32,
    /// Sequence number given to every new input
    pub sequence: u32,
    /// Hash type used when signing
    pub sighash: SighashType,
}

impl Default for TxConfig {
    fn default() -> Self {
        Self {
            network: Network::Testnet,
            version: DEFAULT_VERSION,
            lock_time: DEFAULT_LOCK_TIME,
            sequence: SEQUENCE_FINAL,
            sighash: SighashType::ALL,
        }
    }
}

impl TxConfig {
    pub fn from_json(json: &str) -> Result<Self> {
        serde_json::from_str(json).map_err(|e| TxError::Config(e.to_string()))
    }

    pub fn to_json(&self) -> Result<String> {
        serde_json::to_string_pretty(self).map_err(|e| TxError::Config(e.to_string()))
    }

    pub fn mainnet() -> Self {
        Self {
            network: Network::Mainnet,
            ..Self::default()
        }
    }
}
