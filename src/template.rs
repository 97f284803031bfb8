//! P2PKH and P2SH script templates
//!
//! Locking scripts:
//! - P2PKH: `OP_DUP OP_HASH160 <hash> OP_EQUALVERIFY OP_CHECKSIG`
//! - P2SH:  `OP_HASH160 <hash> OP_EQUAL`
//!
//! Unlocking scripts:
//! - P2PKH: `<signature || sighash byte> <public key>`, filled in by
//!   [`Transaction::sign_input`](crate::transaction::Transaction::sign_input)
//! - P2SH:  `<payment pushes...> <redeem script>` (BIP16)

use crate::address::Address;
use crate::constants::*;
use crate::error::{Result, TxError};
use crate::network::AddressKind;
use crate::script::{push_data, Script, ScriptKind};
use crate::types::ByteString;

/// P2PKH locking script for `address`
pub fn p2pkh_pubkey(address: &Address) -> Result<Script> {
    if address.kind() != AddressKind::PubKeyHash {
        return Err(TxError::UnsupportedAddressType);
    }
    let mut data = Vec::with_capacity(P2PKH_SCRIPT_SIZE);
    data.push(OP_DUP);
    data.push(OP_HASH160);
    push_data(&mut data, address.hash())?;
    data.push(OP_EQUALVERIFY);
    data.push(OP_CHECKSIG);
    Ok(Script::with_kind(
        ScriptKind::P2pkhPubKey { address: *address },
        data,
    ))
}

/// P2SH locking script for `address`
pub fn p2sh_pubkey(address: &Address) -> Result<Script> {
    if address.kind() != AddressKind::ScriptHash {
        return Err(TxError::UnsupportedAddressType);
    }
    let mut data = Vec::with_capacity(P2SH_SCRIPT_SIZE);
    data.push(OP_HASH160);
    push_data(&mut data, address.hash())?;
    data.push(OP_EQUAL);
    Ok(Script::with_kind(
        ScriptKind::P2shPubKey { address: *address },
        data,
    ))
}

/// Locking script matching the address kind
pub fn script_pubkey_for(address: &Address) -> Result<Script> {
    match address.kind() {
        AddressKind::PubKeyHash => p2pkh_pubkey(address),
        AddressKind::ScriptHash => p2sh_pubkey(address),
        AddressKind::PrivateKey => Err(TxError::UnsupportedAddressType),
    }
}

/// Unsigned P2PKH unlocking script.
///
/// The data stays empty until the owning transaction signs the input.
pub fn p2pkh_sig(public_key: Option<ByteString>) -> Script {
    Script::with_kind(
        ScriptKind::P2pkhSig {
            public_key,
            signature: None,
        },
        Vec::new(),
    )
}

/// Signed P2PKH unlocking script: `push(signature) || push(public_key)`
pub(crate) fn p2pkh_sig_signed(signature: ByteString, public_key: ByteString) -> Result<Script> {
    let mut data = Vec::with_capacity(signature.len() + public_key.len() + 2);
    push_data(&mut data, &signature)?;
    push_data(&mut data, &public_key)?;
    Ok(Script::with_kind(
        ScriptKind::P2pkhSig {
            public_key: Some(public_key),
            signature: Some(signature),
        },
        data,
    ))
}

/// P2SH unlocking script: the payment script followed by a push of the raw
/// redeem script
pub fn p2sh_sig(redeem_script: &Script, payment_script: &Script) -> Result<Script> {
    if redeem_script.is_empty() {
        return Err(TxError::EmptyRedeemScript);
    }
    let mut data = Vec::with_capacity(payment_script.len() + redeem_script.len() + 5);
    data.extend_from_slice(payment_script.data());
    push_data(&mut data, redeem_script.data())?;
    Ok(Script::with_kind(
        ScriptKind::P2shSig {
            redeem_script: redeem_script.data().to_vec(),
        },
        data,
    ))
}

impl Script {
    /// Attach the public key an unsigned P2PKH unlocking script will reveal.
    ///
    /// Returns `false` when the script is not an unsigned P2PKH unlocking
    /// script.
    pub(crate) fn set_public_key(&mut self, key: ByteString) -> bool {
        match &mut self.kind {
            ScriptKind::P2pkhSig {
                public_key,
                signature: None,
            } => {
                *public_key = Some(key);
                true
            }
            _ => false,
        }
    }

    /// Whether this is a P2PKH unlocking script still waiting for a signature
    pub fn needs_signature(&self) -> bool {
        matches!(
            self.kind(),
            ScriptKind::P2pkhSig {
                signature: None,
                ..
            }
        )
    }

    /// Signature and public key pushed by a signed P2PKH unlocking script,
    /// also when the script was read back from the wire
    pub fn p2pkh_sig_parts(&self) -> Option<(&[u8], &[u8])> {
        let pushes = self.pushes().ok()?;
        match pushes.as_slice() {
            [signature, public_key] if !signature.is_empty() && !public_key.is_empty() => {
                Some((signature, public_key))
            }
            _ => None,
        }
    }
}
