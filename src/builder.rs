//! Transaction builder
//!
//! Wraps a [`Transaction`] under construction together with a [`TxConfig`]:
//! new inputs take the configured sequence, outputs are checked against the
//! configured network, and signing uses the configured sighash type.
//!
//! ```
//! use tx_forge::builder::TransactionBuilder;
//! use tx_forge::config::TxConfig;
//! use tx_forge::signer::PrivateKey;
//!
//! # fn main() -> tx_forge::Result<()> {
//! let key = PrivateKey::from_slice(&[0x11; 32], tx_forge::Network::Testnet)?;
//! let mut builder = TransactionBuilder::new(TxConfig::default());
//! builder
//!     .spend(&"ab".repeat(32), 0, key.public_key())?
//!     .pay_to("mrS8eVKXguwufwvsVe9GtgGb7fif9UQeAu", 90_000)?;
//! builder.sign_with_key(0, &key)?;
//! let tx = builder.build();
//! assert!(tx.is_complete());
//! # Ok(())
//! # }
//! ```

use crate::address::Address;
use crate::config::TxConfig;
use crate::error::{Result, TxError};
use crate::script::Script;
use crate::signer::{PrivateKey, Signer};
use crate::template::{p2pkh_pubkey, p2pkh_sig, p2sh_sig, script_pubkey_for};
use crate::transaction::{OutPoint, Transaction, TransactionInput, TransactionOutput};
use crate::types::ByteString;
use crate::units::btc_to_satoshi;

#[derive(Debug, Clone)]
pub struct TransactionBuilder {
    config: TxConfig,
    tx: Transaction,
}

impl TransactionBuilder {
    pub fn new(config: TxConfig) -> Self {
        let tx = Transaction::new(config.version, config.lock_time);
        Self { config, tx }
    }

    pub fn config(&self) -> &TxConfig {
        &self.config
    }

    /// The transaction as built so far
    pub fn transaction(&self) -> &Transaction {
        &self.tx
    }

    /// Spend a P2PKH output owned by `public_key`
    pub fn spend(
        &mut self,
        txid: &str,
        vout: u32,
        public_key: impl Into<ByteString>,
    ) -> Result<&mut Self> {
        let prevout = OutPoint::from_txid_hex(txid, vout)?;
        self.tx.add_input(TransactionInput::new(
            prevout,
            p2pkh_sig(Some(public_key.into())),
            self.config.sequence,
        ));
        Ok(self)
    }

    /// Spend a P2SH output by revealing `redeem_script` after `payment_script`
    pub fn spend_p2sh(
        &mut self,
        txid: &str,
        vout: u32,
        redeem_script: &Script,
        payment_script: &Script,
    ) -> Result<&mut Self> {
        let prevout = OutPoint::from_txid_hex(txid, vout)?;
        let script_sig = p2sh_sig(redeem_script, payment_script)?;
        self.tx
            .add_input(TransactionInput::new(prevout, script_sig, self.config.sequence));
        Ok(self)
    }

    /// Pay `satoshis` to a P2PKH or P2SH address on the configured network
    pub fn pay_to(&mut self, address: &str, satoshis: u64) -> Result<&mut Self> {
        let address: Address = address.parse()?;
        if address.network() != self.config.network {
            log::warn!(
                "refusing {} address {} on {}",
                address.network(),
                address,
                self.config.network
            );
            return Err(TxError::NetworkMismatch {
                expected: self.config.network.to_string(),
                actual: address.network().to_string(),
            });
        }
        let script_pubkey = script_pubkey_for(&address)?;
        self.tx.add_output(TransactionOutput::new(satoshis, script_pubkey));
        Ok(self)
    }

    pub fn pay_to_btc(&mut self, address: &str, btc: f64) -> Result<&mut Self> {
        self.pay_to(address, btc_to_satoshi(btc)?)
    }

    /// Sign input `index` against `subscript` with the configured sighash type
    pub fn sign<S: Signer + ?Sized>(
        &mut self,
        index: usize,
        subscript: &Script,
        signer: &S,
    ) -> Result<&mut Self> {
        self.tx
            .sign_input(index, subscript, signer, self.config.sighash)?;
        Ok(self)
    }

    /// Sign a P2PKH input whose spent output pays to `key`'s own address
    pub fn sign_with_key(&mut self, index: usize, key: &PrivateKey) -> Result<&mut Self> {
        let subscript = p2pkh_pubkey(&key.address())?;
        self.sign(index, &subscript, key)
    }

    pub fn build(self) -> Transaction {
        if !self.tx.is_complete() {
            log::debug!("building transaction {} with unsigned inputs", self.tx.txid_hex());
        }
        self.tx
    }
}
