//! Legacy signature hashing
//!
//! The digest an input's signature commits to is computed over a modified
//! copy of the transaction:
//!
//! 1. every scriptSig is emptied, except the one at `index`, which is replaced
//!    by the subscript (normally the locking script of the spent output)
//! 2. the base type edits outputs and sequences:
//!    - `ALL`: nothing
//!    - `NONE`: outputs removed, other inputs' sequences zeroed
//!    - `SINGLE`: outputs truncated to `index + 1`, earlier outputs blanked
//!      (value `u64::MAX`, empty script), other inputs' sequences zeroed
//! 3. `ANYONECANPAY` keeps only the input at `index`
//! 4. `sha256d(serialize(copy) || sighash_type as u32 LE)`

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::{Result, TxError};
use crate::hash::sha256d;
use crate::script::Script;
use crate::transaction::{Transaction, TransactionOutput};
use crate::types::Hash;

/// Flag bit restricting the signature to a single input
pub const SIGHASH_ANYONECANPAY: u8 = 0x80;

/// Which outputs a signature commits to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SighashBase {
    All = 0x01,
    None = 0x02,
    Single = 0x03,
}

/// Signature hash type: base × anyone-can-pay flag
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct SighashType {
    pub base: SighashBase,
    pub anyone_can_pay: bool,
}

impl Default for SighashType {
    fn default() -> Self {
        Self::ALL
    }
}

impl SighashType {
    pub const ALL: SighashType = SighashType::new(SighashBase::All, false);
    pub const NONE: SighashType = SighashType::new(SighashBase::None, false);
    pub const SINGLE: SighashType = SighashType::new(SighashBase::Single, false);
    pub const ALL_ANYONECANPAY: SighashType = SighashType::new(SighashBase::All, true);
    pub const NONE_ANYONECANPAY: SighashType = SighashType::new(SighashBase::None, true);
    pub const SINGLE_ANYONECANPAY: SighashType = SighashType::new(SighashBase::Single, true);

    pub const fn new(base: SighashBase, anyone_can_pay: bool) -> Self {
        Self { base, anyone_can_pay }
    }

    /// The byte appended to a DER signature
    pub fn to_byte(self) -> u8 {
        let flag = if self.anyone_can_pay { SIGHASH_ANYONECANPAY } else { 0 };
        self.base as u8 | flag
    }

    /// The value appended to the serialized copy before hashing
    pub fn to_u32(self) -> u32 {
        self.to_byte() as u32
    }

    pub fn from_u8(byte: u8) -> Result<Self> {
        let anyone_can_pay = byte & SIGHASH_ANYONECANPAY != 0;
        let base = match byte & !SIGHASH_ANYONECANPAY {
            0x01 => SighashBase::All,
            0x02 => SighashBase::None,
            0x03 => SighashBase::Single,
            _ => return Err(TxError::InvalidSighashType(byte as u32)),
        };
        Ok(Self::new(base, anyone_can_pay))
    }

    pub fn from_u32(value: u32) -> Result<Self> {
        let byte = u8::try_from(value).map_err(|_| TxError::InvalidSighashType(value))?;
        Self::from_u8(byte)
    }
}

impl fmt::Display for SighashType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let base = match self.base {
            SighashBase::All => "all",
            SighashBase::None => "none",
            SighashBase::Single => "single",
        };
        if self.anyone_can_pay {
            write!(f, "{}|anyonecanpay", base)
        } else {
            f.write_str(base)
        }
    }
}

impl FromStr for SighashType {
    type Err = TxError;

    fn from_str(s: &str) -> Result<Self> {
        let lower = s.to_ascii_lowercase();
        let (base, anyone_can_pay) = match lower.split_once('|') {
            Some((base, "anyonecanpay")) => (base, true),
            Some(_) => return Err(TxError::Config(format!("unknown sighash type: {}", s))),
            None => (lower.as_str(), false),
        };
        let base = match base {
            "all" => SighashBase::All,
            "none" => SighashBase::None,
            "single" => SighashBase::Single,
            _ => return Err(TxError::Config(format!("unknown sighash type: {}", s))),
        };
        Ok(Self::new(base, anyone_can_pay))
    }
}

impl TryFrom<String> for SighashType {
    type Error = TxError;

    fn try_from(s: String) -> Result<Self> {
        s.parse()
    }
}

impl From<SighashType> for String {
    fn from(sighash: SighashType) -> Self {
        sighash.to_string()
    }
}

impl Transaction {
    /// Digest the signature of input `index` commits to.
    ///
    /// `self` is left untouched; all edits happen on a copy.
    pub fn signature_hash(
        &self,
        index: usize,
        subscript: &Script,
        sighash: SighashType,
    ) -> Result<Hash> {
        if index >= self.inputs.len() {
            return Err(TxError::IndexOutOfRange {
                index,
                len: self.inputs.len(),
            });
        }
        if sighash.base == SighashBase::Single && index >= self.outputs.len() {
            log::debug!(
                "SIGHASH_SINGLE for input {} with {} outputs",
                index,
                self.outputs.len()
            );
            return Err(TxError::NoMatchingOutput {
                index,
                outputs: self.outputs.len(),
            });
        }

        let mut copy = self.clone();
        for (i, input) in copy.inputs.iter_mut().enumerate() {
            input.script_sig = if i == index {
                subscript.clone()
            } else {
                Script::empty()
            };
        }

        match sighash.base {
            SighashBase::All => {}
            SighashBase::None => {
                copy.outputs.clear();
                zero_other_sequences(&mut copy, index);
            }
            SighashBase::Single => {
                copy.outputs.truncate(index + 1);
                for output in copy.outputs.iter_mut().take(index) {
                    *output = TransactionOutput::new(u64::MAX, Script::empty());
                }
                zero_other_sequences(&mut copy, index);
            }
        }

        if sighash.anyone_can_pay {
            let input = copy.inputs.swap_remove(index);
            copy.inputs = vec![input];
        }

        let mut preimage = copy.serialize();
        preimage.extend_from_slice(&sighash.to_u32().to_le_bytes());
        let hash = sha256d(&preimage);
        log::trace!(
            "sighash {} for input {}: {}",
            sighash,
            index,
            hex::encode(hash)
        );
        Ok(hash)
    }
}

fn zero_other_sequences(tx: &mut Transaction, index: usize) {
    for (i, input) in tx.inputs.iter_mut().enumerate() {
        if i != index {
            input.sequence = 0;
        }
    }
}
