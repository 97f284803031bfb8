//! Wire primitives: compact-size integers and a little-endian byte cursor
//!
//! Every multi-byte integer on the wire is fixed-width little-endian, except
//! counts and lengths, which use the compact-size encoding:
//!
//! | value               | encoding                 |
//! |---------------------|--------------------------|
//! | `< 0xfd`            | 1 byte                   |
//! | `<= 0xffff`         | `0xfd` + 2 bytes LE      |
//! | `<= 0xffff_ffff`    | `0xfe` + 4 bytes LE      |
//! | otherwise           | `0xff` + 8 bytes LE      |

use crate::constants::*;
use crate::error::{Result, TxError};
use crate::types::{ByteString, Hash};

/// Ran out of bytes while decoding.
///
/// Each public decoder maps this to the error kind of its own boundary
/// (`TruncatedScript`, `TruncatedInput`, ...).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Shortfall {
    pub needed: usize,
    pub remaining: usize,
}

/// Why a compact-size integer could not be read
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CompactSizeError {
    /// Marker or payload cut short
    Shortfall(Shortfall),
    /// Value encoded with a wider marker than it needs
    NonCanonical(u64),
}

impl From<Shortfall> for CompactSizeError {
    fn from(shortfall: Shortfall) -> Self {
        CompactSizeError::Shortfall(shortfall)
    }
}

impl CompactSizeError {
    /// Map to a public error, using `truncated` for shortfalls
    pub fn into_error(self, truncated: TxError) -> TxError {
        match self {
            CompactSizeError::Shortfall(_) => truncated,
            CompactSizeError::NonCanonical(value) => TxError::NonCanonicalLength(value),
        }
    }
}

/// Number of bytes the compact-size encoding of `n` occupies
pub fn compact_size_len(n: u64) -> usize {
    match n {
        0..=0xfc => 1,
        0xfd..=0xffff => 3,
        0x1_0000..=0xffff_ffff => 5,
        _ => 9,
    }
}

/// Append the compact-size encoding of `n` to `buf`
pub fn write_compact_size(buf: &mut ByteString, n: u64) {
    match n {
        0..=0xfc => buf.push(n as u8),
        0xfd..=0xffff => {
            buf.push(COMPACT_SIZE_U16);
            buf.extend_from_slice(&(n as u16).to_le_bytes());
        }
        0x1_0000..=0xffff_ffff => {
            buf.push(COMPACT_SIZE_U32);
            buf.extend_from_slice(&(n as u32).to_le_bytes());
        }
        _ => {
            buf.push(COMPACT_SIZE_U64);
            buf.extend_from_slice(&n.to_le_bytes());
        }
    }
}

/// Compact-size encoding of `n` as a fresh byte string
pub fn compact_size(n: u64) -> ByteString {
    let mut buf = Vec::with_capacity(compact_size_len(n));
    write_compact_size(&mut buf, n);
    buf
}

/// Decode a compact-size integer from the start of `bytes`.
///
/// Returns the value and the number of bytes consumed. Fails with
/// `MalformedLength` when the bytes run out and `NonCanonicalLength` when the
/// value does not use the shortest encoding.
pub fn read_compact_size(bytes: &[u8]) -> Result<(u64, usize)> {
    let mut reader = Reader::new(bytes);
    let value = reader
        .read_compact_size()
        .map_err(|e| e.into_error(TxError::MalformedLength))?;
    Ok((value, reader.position()))
}

/// Reverse a hash between display order and wire order
pub fn reversed(hash: &Hash) -> Hash {
    let mut out = *hash;
    out.reverse();
    out
}

/// Forward-only cursor over a byte slice
#[derive(Debug, Clone)]
pub struct Reader<'a> {
    data: &'a [u8],
    pos: usize,
}

impl<'a> Reader<'a> {
    pub fn new(data: &'a [u8]) -> Self {
        Self { data, pos: 0 }
    }

    /// Bytes consumed so far
    pub fn position(&self) -> usize {
        self.pos
    }

    pub fn remaining(&self) -> usize {
        self.data.len() - self.pos
    }

    pub fn is_empty(&self) -> bool {
        self.remaining() == 0
    }

    /// The unread tail
    pub fn rest(&self) -> &'a [u8] {
        &self.data[self.pos..]
    }

    pub fn read_bytes(&mut self, n: usize) -> std::result::Result<&'a [u8], Shortfall> {
        if self.remaining() < n {
            return Err(Shortfall {
                needed: n,
                remaining: self.remaining(),
            });
        }
        let slice = &self.data[self.pos..self.pos + n];
        self.pos += n;
        Ok(slice)
    }

    pub fn read_array<const N: usize>(&mut self) -> std::result::Result<[u8; N], Shortfall> {
        let mut out = [0u8; N];
        out.copy_from_slice(self.read_bytes(N)?);
        Ok(out)
    }

    pub fn read_u8(&mut self) -> std::result::Result<u8, Shortfall> {
        Ok(self.read_array::<1>()?[0])
    }

    pub fn read_u16_le(&mut self) -> std::result::Result<u16, Shortfall> {
        Ok(u16::from_le_bytes(self.read_array()?))
    }

    pub fn read_u32_le(&mut self) -> std::result::Result<u32, Shortfall> {
        Ok(u32::from_le_bytes(self.read_array()?))
    }

    pub fn read_i32_le(&mut self) -> std::result::Result<i32, Shortfall> {
        Ok(i32::from_le_bytes(self.read_array()?))
    }

    pub fn read_u64_le(&mut self) -> std::result::Result<u64, Shortfall> {
        Ok(u64::from_le_bytes(self.read_array()?))
    }

    /// Only the minimal encoding of each value is accepted
    pub fn read_compact_size(&mut self) -> std::result::Result<u64, CompactSizeError> {
        let (value, min) = match self.read_u8()? {
            COMPACT_SIZE_U16 => (self.read_u16_le()? as u64, 0xfd),
            COMPACT_SIZE_U32 => (self.read_u32_le()? as u64, 0x1_0000),
            COMPACT_SIZE_U64 => (self.read_u64_le()?, 0x1_0000_0000),
            small => return Ok(small as u64),
        };
        if value < min {
            return Err(CompactSizeError::NonCanonical(value));
        }
        Ok(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_compact_size_boundaries() {
        assert_eq!(compact_size(0), vec![0x00]);
        assert_eq!(compact_size(0xfc), vec![0xfc]);
        assert_eq!(compact_size(0xfd), vec![0xfd, 0xfd, 0x00]);
        assert_eq!(compact_size(0xffff), vec![0xfd, 0xff, 0xff]);
        assert_eq!(compact_size(0x1_0000), vec![0xfe, 0x00, 0x00, 0x01, 0x00]);
        assert_eq!(compact_size(0xffff_ffff), vec![0xfe, 0xff, 0xff, 0xff, 0xff]);
        assert_eq!(
            compact_size(0x1_0000_0000),
            vec![0xff, 0x00, 0x00, 0x00, 0x00, 0x01, 0x00, 0x00, 0x00]
        );
    }

    #[test]
    fn test_compact_size_len_matches_encoding() {
        for n in [0u64, 252, 253, 65535, 65536, 0xffff_ffff, 0x1_0000_0000, u64::MAX] {
            assert_eq!(compact_size_len(n), compact_size(n).len());
        }
    }

    #[test]
    fn test_read_compact_size_values() {
        assert_eq!(read_compact_size(&[0xf0]).unwrap(), (0xf0, 1));
        assert_eq!(read_compact_size(&[0xfd, 0xf1, 0xf0]).unwrap(), (0xf0f1, 3));
        assert_eq!(
            read_compact_size(&[0xfe, 0xf3, 0xf2, 0xf1, 0xf0]).unwrap(),
            (0xf0f1f2f3, 5)
        );
        assert_eq!(
            read_compact_size(&[0xff, 0xf7, 0xf6, 0xf5, 0xf4, 0xf3, 0xf2, 0xf1, 0xf0]).unwrap(),
            (0xf0f1f2f3f4f5f6f7, 9)
        );
    }

    #[test]
    fn test_read_compact_size_ignores_trailing_data() {
        assert_eq!(read_compact_size(&[0x02, 0xaa, 0xbb]).unwrap(), (2, 1));
    }

    #[test]
    fn test_read_compact_size_malformed() {
        assert_eq!(read_compact_size(&[]), Err(TxError::MalformedLength));
        assert_eq!(read_compact_size(&[0xfd, 0x01]), Err(TxError::MalformedLength));
        assert_eq!(read_compact_size(&[0xfe, 0x01, 0x02, 0x03]), Err(TxError::MalformedLength));
        assert_eq!(read_compact_size(&[0xff; 8]), Err(TxError::MalformedLength));
    }

    #[test]
    fn test_read_compact_size_rejects_non_minimal() {
        assert_eq!(
            read_compact_size(&[0xfd, 0xfc, 0x00]),
            Err(TxError::NonCanonicalLength(0xfc))
        );
        assert_eq!(
            read_compact_size(&[0xfd, 0x00, 0x00]),
            Err(TxError::NonCanonicalLength(0))
        );
        assert_eq!(
            read_compact_size(&[0xfe, 0xff, 0xff, 0x00, 0x00]),
            Err(TxError::NonCanonicalLength(0xffff))
        );
        assert_eq!(
            read_compact_size(&[0xff, 0xff, 0xff, 0xff, 0xff, 0x00, 0x00, 0x00, 0x00]),
            Err(TxError::NonCanonicalLength(0xffff_ffff))
        );
    }

    #[test]
    fn test_read_compact_size_smallest_wide_values() {
        assert_eq!(read_compact_size(&[0xfd, 0xfd, 0x00]).unwrap(), (0xfd, 3));
        assert_eq!(
            read_compact_size(&[0xfe, 0x00, 0x00, 0x01, 0x00]).unwrap(),
            (0x1_0000, 5)
        );
        assert_eq!(
            read_compact_size(&[0xff, 0x00, 0x00, 0x00, 0x00, 0x01, 0x00, 0x00, 0x00]).unwrap(),
            (0x1_0000_0000, 9)
        );
    }

    #[test]
    fn test_reader_fixed_width() {
        let data = [0x03, 0x00, 0x00, 0x00, 0x40, 0x42, 0x0f, 0x00, 0x00, 0x00, 0x00, 0x00];
        let mut reader = Reader::new(&data);
        assert_eq!(reader.read_u32_le().unwrap(), 3);
        assert_eq!(reader.read_u64_le().unwrap(), 1_000_000);
        assert!(reader.is_empty());
        assert_eq!(
            reader.read_u8(),
            Err(Shortfall { needed: 1, remaining: 0 })
        );
    }

    #[test]
    fn test_reader_signed() {
        let mut reader = Reader::new(&[0xbc, 0xcc, 0xdd, 0xee]);
        assert_eq!(reader.read_i32_le().unwrap(), -0x11223344);
    }

    #[test]
    fn test_reversed() {
        let mut hash = [0u8; 32];
        for (i, b) in hash.iter_mut().enumerate() {
            *b = i as u8;
        }
        let wire = reversed(&hash);
        assert_eq!(wire[0], 31);
        assert_eq!(wire[31], 0);
        assert_eq!(reversed(&wire), hash);
    }
}
