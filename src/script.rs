//! Scripts: raw opcode streams with a length-prefixed wire form
//!
//! A [`Script`] stores exactly the bytes that appear on the wire after the
//! length prefix. Every template (P2PKH/P2SH, locking or unlocking) shares the
//! same serialization; only the construction of `data` differs, and the
//! [`ScriptKind`] tag records which template built it.

use serde::{Deserialize, Serialize};

use crate::address::Address;
use crate::constants::*;
use crate::encode::{compact_size_len, write_compact_size, Reader};
use crate::error::{Result, TxError};
use crate::types::ByteString;

/// Which template produced a script's data
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum ScriptKind {
    /// Arbitrary bytes, or a script read back from the wire
    Raw,
    /// Unlocking script for a P2PKH output
    P2pkhSig {
        public_key: Option<ByteString>,
        signature: Option<ByteString>,
    },
    /// Unlocking script for a P2SH output
    P2shSig { redeem_script: ByteString },
    /// Locking script paying to a public key hash
    P2pkhPubKey { address: Address },
    /// Locking script paying to a script hash
    P2shPubKey { address: Address },
}

/// Script: 𝕊 = kind × bytes
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Script {
    pub(crate) kind: ScriptKind,
    pub(crate) data: ByteString,
}

impl Default for Script {
    fn default() -> Self {
        Self::empty()
    }
}

impl Script {
    /// Empty raw script, serialized as a single `0x00` length byte
    pub fn empty() -> Self {
        Self {
            kind: ScriptKind::Raw,
            data: Vec::new(),
        }
    }

    /// Raw script over the given bytes
    pub fn from_bytes(data: impl Into<ByteString>) -> Self {
        Self {
            kind: ScriptKind::Raw,
            data: data.into(),
        }
    }

    pub(crate) fn with_kind(kind: ScriptKind, data: ByteString) -> Self {
        Self { kind, data }
    }

    pub fn kind(&self) -> &ScriptKind {
        &self.kind
    }

    pub fn data(&self) -> &[u8] {
        &self.data
    }

    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Size of the serialized form, length prefix included
    pub fn serialized_len(&self) -> usize {
        compact_size_len(self.data.len() as u64) + self.data.len()
    }

    /// `varlen(len(data)) || data`
    pub fn serialize(&self) -> ByteString {
        let mut buf = Vec::with_capacity(self.serialized_len());
        self.serialize_into(&mut buf);
        buf
    }

    pub(crate) fn serialize_into(&self, buf: &mut ByteString) {
        write_compact_size(buf, self.data.len() as u64);
        buf.extend_from_slice(&self.data);
    }

    /// Read a length-prefixed script from the start of `bytes`.
    ///
    /// Returns the script and the number of bytes consumed.
    pub fn deserialize(bytes: &[u8]) -> Result<(Script, usize)> {
        let mut reader = Reader::new(bytes);
        let script = Self::read_from(&mut reader)?;
        Ok((script, reader.position()))
    }

    pub(crate) fn read_from(reader: &mut Reader<'_>) -> Result<Script> {
        let declared = reader
            .read_compact_size()
            .map_err(|e| e.into_error(TxError::MalformedLength))?;
        if declared > reader.remaining() as u64 {
            log::trace!(
                "script declares {} bytes, {} remain",
                declared,
                reader.remaining()
            );
            return Err(TxError::TruncatedScript);
        }
        let data = reader
            .read_bytes(declared as usize)
            .map_err(|_| TxError::TruncatedScript)?;
        Ok(Script::from_bytes(data.to_vec()))
    }

    /// Iterate over opcodes and pushed operands
    pub fn instructions(&self) -> Instructions<'_> {
        Instructions {
            reader: Reader::new(&self.data),
            done: false,
        }
    }

    /// Operands of all push instructions, in order
    pub fn pushes(&self) -> Result<Vec<&[u8]>> {
        let mut out = Vec::new();
        for instruction in self.instructions() {
            if let Instruction::Push(data) = instruction? {
                out.push(data);
            }
        }
        Ok(out)
    }
}

/// Append a minimal push of `data` to `buf`.
///
/// Empty data is pushed as `OP_0`; 1..=75 bytes use a direct push; longer
/// operands use `OP_PUSHDATA1`, `OP_PUSHDATA2` or `OP_PUSHDATA4`.
pub fn push_data(buf: &mut ByteString, data: &[u8]) -> Result<()> {
    let len = data.len();
    if len == 0 {
        buf.push(OP_0);
        return Ok(());
    }
    if len <= OP_PUSHBYTES_MAX as usize {
        buf.push(len as u8);
    } else if len <= 0xff {
        buf.push(OP_PUSHDATA1);
        buf.push(len as u8);
    } else if len <= 0xffff {
        buf.push(OP_PUSHDATA2);
        buf.extend_from_slice(&(len as u16).to_le_bytes());
    } else if len <= 0xffff_ffff {
        buf.push(OP_PUSHDATA4);
        buf.extend_from_slice(&(len as u32).to_le_bytes());
    } else {
        return Err(TxError::PushTooLarge(len));
    }
    buf.extend_from_slice(data);
    Ok(())
}

/// One element of a script
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Instruction<'a> {
    /// Non-push opcode
    Op(u8),
    /// Operand pushed by `OP_0`, a direct push or `OP_PUSHDATA{1,2,4}`
    Push(&'a [u8]),
}

/// Iterator returned by [`Script::instructions`]
#[derive(Debug, Clone)]
pub struct Instructions<'a> {
    reader: Reader<'a>,
    /// Set after the first malformed push
    done: bool,
}

impl<'a> Instructions<'a> {
    fn next_instruction(&mut self, opcode: u8) -> Result<Instruction<'a>> {
        let len = match opcode {
            OP_0 => return Ok(Instruction::Push(&[])),
            1..=OP_PUSHBYTES_MAX => opcode as usize,
            OP_PUSHDATA1 => self.reader.read_u8().map_err(|_| TxError::TruncatedScript)? as usize,
            OP_PUSHDATA2 => {
                self.reader.read_u16_le().map_err(|_| TxError::TruncatedScript)? as usize
            }
            OP_PUSHDATA4 => {
                self.reader.read_u32_le().map_err(|_| TxError::TruncatedScript)? as usize
            }
            other => return Ok(Instruction::Op(other)),
        };
        let data = self
            .reader
            .read_bytes(len)
            .map_err(|_| TxError::TruncatedScript)?;
        Ok(Instruction::Push(data))
    }
}

impl<'a> Iterator for Instructions<'a> {
    type Item = Result<Instruction<'a>>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }
        let opcode = self.reader.read_u8().ok()?;
        let result = self.next_instruction(opcode);
        self.done = result.is_err();
        Some(result)
    }
}
