//! Transactions, inputs and outputs in the legacy (pre-SegWit) wire format
//!
//! ```text
//! tx     = version(i32) || varlen(#in) || input* || varlen(#out) || output* || lock_time(u32)
//! input  = prev_hash(32, wire order) || prev_index(u32) || script_sig || sequence(u32)
//! output = value(u64) || script_pubkey
//! ```
//!
//! All fixed-width integers are little-endian. Hashes are stored in display
//! order (as block explorers print them) and reversed on the wire.

use serde::{Deserialize, Serialize};

use crate::constants::*;
use crate::encode::{compact_size_len, reversed, write_compact_size, Reader};
use crate::error::{Result, TxError};
use crate::hash::sha256d;
use crate::script::{Script, ScriptKind};
use crate::sighash::SighashType;
use crate::signer::Signer;
use crate::template::p2pkh_sig_signed;
use crate::types::{ByteString, Hash};
use crate::units::btc_to_satoshi;

/// Smallest possible serialized input: hash, index, empty script, sequence
const MIN_INPUT_SIZE: usize = 32 + 4 + 1 + 4;

/// Smallest possible serialized output: value and empty script
const MIN_OUTPUT_SIZE: usize = 8 + 1;

/// Report a failure inside a nested record as the enclosing record's
/// truncation, keeping non-canonical length errors as they are
fn enclosing(err: TxError, truncated: TxError) -> TxError {
    match err {
        err @ TxError::NonCanonicalLength(_) => err,
        _ => truncated,
    }
}

/// OutPoint: 𝒪 = 𝕊 × ℕ
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct OutPoint {
    /// Id of the funding transaction, display order
    pub hash: Hash,
    pub index: u32,
}

impl OutPoint {
    pub fn new(hash: Hash, index: u32) -> Self {
        Self { hash, index }
    }

    /// Parse a txid as printed by explorers and wallets
    pub fn from_txid_hex(txid: &str, index: u32) -> Result<Self> {
        let bytes = hex::decode(txid).map_err(|e| TxError::InvalidHex(e.to_string()))?;
        if bytes.len() != 32 {
            return Err(TxError::InvalidLength {
                expected: 32,
                actual: bytes.len(),
            });
        }
        let mut hash = [0u8; 32];
        hash.copy_from_slice(&bytes);
        Ok(Self { hash, index })
    }

    pub fn txid_hex(&self) -> String {
        hex::encode(self.hash)
    }
}

/// Transaction Input: ℐ = 𝒪 × 𝕊 × ℕ
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransactionInput {
    pub prevout: OutPoint,
    pub script_sig: Script,
    pub sequence: u32,
}

impl TransactionInput {
    pub fn new(prevout: OutPoint, script_sig: Script, sequence: u32) -> Self {
        Self {
            prevout,
            script_sig,
            sequence,
        }
    }

    pub fn serialized_len(&self) -> usize {
        32 + 4 + self.script_sig.serialized_len() + 4
    }

    pub fn serialize(&self) -> ByteString {
        let mut buf = Vec::with_capacity(self.serialized_len());
        self.serialize_into(&mut buf);
        buf
    }

    fn serialize_into(&self, buf: &mut ByteString) {
        buf.extend_from_slice(&reversed(&self.prevout.hash));
        buf.extend_from_slice(&self.prevout.index.to_le_bytes());
        self.script_sig.serialize_into(buf);
        buf.extend_from_slice(&self.sequence.to_le_bytes());
    }

    /// Read one input from the start of `bytes`.
    ///
    /// Returns the input and the number of bytes consumed.
    pub fn deserialize(bytes: &[u8]) -> Result<(Self, usize)> {
        let mut reader = Reader::new(bytes);
        let input = Self::read_from(&mut reader)?;
        Ok((input, reader.position()))
    }

    fn read_from(reader: &mut Reader<'_>) -> Result<Self> {
        let truncated = |_| TxError::TruncatedInput;
        let hash = reversed(&reader.read_array::<32>().map_err(truncated)?);
        let index = reader.read_u32_le().map_err(truncated)?;
        let script_sig = Script::read_from(reader)
            .map_err(|e| enclosing(e, TxError::TruncatedInput))?;
        let sequence = reader.read_u32_le().map_err(truncated)?;
        Ok(Self {
            prevout: OutPoint { hash, index },
            script_sig,
            sequence,
        })
    }
}

/// Transaction Output: 𝒯 = ℤ × 𝕊
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransactionOutput {
    /// Amount in satoshis
    pub value: u64,
    pub script_pubkey: Script,
}

impl TransactionOutput {
    pub fn new(value: u64, script_pubkey: Script) -> Self {
        Self {
            value,
            script_pubkey,
        }
    }

    /// Output carrying an amount given in BTC
    pub fn from_btc(btc: f64, script_pubkey: Script) -> Result<Self> {
        Ok(Self::new(btc_to_satoshi(btc)?, script_pubkey))
    }

    pub fn serialized_len(&self) -> usize {
        8 + self.script_pubkey.serialized_len()
    }

    pub fn serialize(&self) -> ByteString {
        let mut buf = Vec::with_capacity(self.serialized_len());
        self.serialize_into(&mut buf);
        buf
    }

    fn serialize_into(&self, buf: &mut ByteString) {
        buf.extend_from_slice(&self.value.to_le_bytes());
        self.script_pubkey.serialize_into(buf);
    }

    /// Read one output from the start of `bytes`.
    ///
    /// Returns the output and the number of bytes consumed.
    pub fn deserialize(bytes: &[u8]) -> Result<(Self, usize)> {
        let mut reader = Reader::new(bytes);
        let output = Self::read_from(&mut reader)?;
        Ok((output, reader.position()))
    }

    fn read_from(reader: &mut Reader<'_>) -> Result<Self> {
        let value = reader
            .read_u64_le()
            .map_err(|_| TxError::TruncatedOutput)?;
        let script_pubkey = Script::read_from(reader)
            .map_err(|e| enclosing(e, TxError::TruncatedOutput))?;
        Ok(Self {
            value,
            script_pubkey,
        })
    }
}

/// Transaction: 𝒯𝒳 = ℕ × ℐ* × 𝒯* × ℕ
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Transaction {
    pub version: i32,
    pub inputs: Vec<TransactionInput>,
    pub outputs: Vec<TransactionOutput>,
    pub lock_time: u32,
}

impl Default for Transaction {
    fn default() -> Self {
        Self::new(DEFAULT_VERSION, DEFAULT_LOCK_TIME)
    }
}

impl Transaction {
    /// Empty transaction with the given header fields
    pub fn new(version: i32, lock_time: u32) -> Self {
        Self {
            version,
            inputs: Vec::new(),
            outputs: Vec::new(),
            lock_time,
        }
    }

    pub fn add_input(&mut self, input: TransactionInput) {
        self.inputs.push(input);
    }

    pub fn add_output(&mut self, output: TransactionOutput) {
        self.outputs.push(output);
    }

    pub fn serialized_len(&self) -> usize {
        4 + compact_size_len(self.inputs.len() as u64)
            + self.inputs.iter().map(|i| i.serialized_len()).sum::<usize>()
            + compact_size_len(self.outputs.len() as u64)
            + self.outputs.iter().map(|o| o.serialized_len()).sum::<usize>()
            + 4
    }

    pub fn serialize(&self) -> ByteString {
        let mut buf = Vec::with_capacity(self.serialized_len());
        buf.extend_from_slice(&self.version.to_le_bytes());
        write_compact_size(&mut buf, self.inputs.len() as u64);
        for input in &self.inputs {
            input.serialize_into(&mut buf);
        }
        write_compact_size(&mut buf, self.outputs.len() as u64);
        for output in &self.outputs {
            output.serialize_into(&mut buf);
        }
        buf.extend_from_slice(&self.lock_time.to_le_bytes());
        buf
    }

    /// Parse a complete serialized transaction.
    ///
    /// Any shortfall fails with `TruncatedTransaction`; leftover bytes fail
    /// with `TrailingBytes`; a length or count not encoded minimally fails
    /// with `NonCanonicalLength`.
    pub fn deserialize(bytes: &[u8]) -> Result<Self> {
        let (tx, consumed) = Self::deserialize_prefix(bytes)?;
        if consumed != bytes.len() {
            log::debug!(
                "{} trailing bytes after transaction {}",
                bytes.len() - consumed,
                tx.txid_hex()
            );
            return Err(TxError::TrailingBytes(bytes.len() - consumed));
        }
        Ok(tx)
    }

    /// Parse a transaction from the start of `bytes`, ignoring what follows.
    ///
    /// Returns the transaction and the number of bytes consumed.
    pub fn deserialize_prefix(bytes: &[u8]) -> Result<(Self, usize)> {
        let mut reader = Reader::new(bytes);
        let tx = Self::read_from(&mut reader).map_err(|e| {
            log::trace!(
                "transaction rejected at byte {} of {}: {}",
                reader.position(),
                bytes.len(),
                e
            );
            e
        })?;
        Ok((tx, reader.position()))
    }

    fn read_from(reader: &mut Reader<'_>) -> Result<Self> {
        let truncated = |_| TxError::TruncatedTransaction;
        let version = reader.read_i32_le().map_err(truncated)?;

        let input_count = reader
            .read_compact_size()
            .map_err(|e| e.into_error(TxError::TruncatedTransaction))?;
        // a count larger than the remaining bytes could hold is a truncation
        if input_count > (reader.remaining() / MIN_INPUT_SIZE) as u64 {
            return Err(TxError::TruncatedTransaction);
        }
        let mut inputs = Vec::with_capacity(input_count as usize);
        for _ in 0..input_count {
            let input = TransactionInput::read_from(reader)
                .map_err(|e| enclosing(e, TxError::TruncatedTransaction))?;
            inputs.push(input);
        }

        let output_count = reader
            .read_compact_size()
            .map_err(|e| e.into_error(TxError::TruncatedTransaction))?;
        if output_count > (reader.remaining() / MIN_OUTPUT_SIZE) as u64 {
            return Err(TxError::TruncatedTransaction);
        }
        let mut outputs = Vec::with_capacity(output_count as usize);
        for _ in 0..output_count {
            let output = TransactionOutput::read_from(reader)
                .map_err(|e| enclosing(e, TxError::TruncatedTransaction))?;
            outputs.push(output);
        }

        let lock_time = reader.read_u32_le().map_err(truncated)?;
        Ok(Self {
            version,
            inputs,
            outputs,
            lock_time,
        })
    }

    /// Transaction id in display order: `reverse(sha256d(serialize(tx)))`
    pub fn txid(&self) -> Hash {
        reversed(&sha256d(&self.serialize()))
    }

    pub fn txid_hex(&self) -> String {
        hex::encode(self.txid())
    }

    pub fn to_hex(&self) -> String {
        hex::encode(self.serialize())
    }

    pub fn from_hex(s: &str) -> Result<Self> {
        let bytes = hex::decode(s.trim()).map_err(|e| TxError::InvalidHex(e.to_string()))?;
        Self::deserialize(&bytes)
    }

    /// Whether every input carries a finished unlocking script
    pub fn is_complete(&self) -> bool {
        self.inputs
            .iter()
            .all(|input| !input.script_sig.is_empty() && !input.script_sig.needs_signature())
    }

    /// Attach the public key input `index` will reveal when signed
    pub fn attach_public_key(&mut self, index: usize, public_key: impl Into<ByteString>) -> Result<()> {
        let len = self.inputs.len();
        let input = self
            .inputs
            .get_mut(index)
            .ok_or(TxError::IndexOutOfRange { index, len })?;
        if input.script_sig.set_public_key(public_key.into()) {
            Ok(())
        } else {
            Err(TxError::UnsignableScript(index))
        }
    }

    /// Sign input `index` against `subscript` and install the P2PKH
    /// unlocking script `<signature || sighash byte> <public key>`.
    ///
    /// The input must carry a P2PKH unlocking script with a public key
    /// attached. The transaction is only modified once the signer succeeded.
    pub fn sign_input<S: Signer + ?Sized>(
        &mut self,
        index: usize,
        subscript: &Script,
        signer: &S,
        sighash: SighashType,
    ) -> Result<()> {
        let input = self.inputs.get(index).ok_or(TxError::IndexOutOfRange {
            index,
            len: self.inputs.len(),
        })?;
        let public_key = match input.script_sig.kind() {
            ScriptKind::P2pkhSig {
                public_key: Some(key),
                ..
            } => key.clone(),
            ScriptKind::P2pkhSig { public_key: None, .. } => {
                return Err(TxError::NotReadyToSign(index))
            }
            _ => return Err(TxError::UnsignableScript(index)),
        };

        let hash = self.signature_hash(index, subscript, sighash)?;
        let mut signature = signer.sign(&hash)?;
        signature.push(sighash.to_byte());
        let script_sig = p2pkh_sig_signed(signature, public_key)?;

        log::debug!(
            "signed input {} with {} ({} byte scriptSig)",
            index,
            sighash,
            script_sig.len()
        );
        self.inputs[index].script_sig = script_sig;
        Ok(())
    }
}
