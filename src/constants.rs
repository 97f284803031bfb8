//! Wire-format constants, opcodes and defaults

/// Default transaction version
pub const DEFAULT_VERSION: i32 = 1;

/// Default lock time: unlocked
pub const DEFAULT_LOCK_TIME: u32 = 0;

/// Sequence number for final transaction
pub const SEQUENCE_FINAL: u32 = 0xffffffff;

/// Satoshis per BTC
pub const SATOSHIS_PER_BTC: u64 = 100_000_000;

/// Maximum money supply: 21,000,000 BTC in satoshis
pub const MAX_MONEY: u64 = 21_000_000 * SATOSHIS_PER_BTC;

/// Size of a HASH160 digest
pub const HASH160_SIZE: usize = 20;

/// Size of a Base58Check checksum
pub const CHECKSUM_SIZE: usize = 4;

/// Version byte + hash + checksum
pub const ADDRESS_PAYLOAD_SIZE: usize = 1 + HASH160_SIZE + CHECKSUM_SIZE;

/// Size of a secp256k1 secret key
pub const PRIVATE_KEY_SIZE: usize = 32;

/// Trailing WIF byte marking a compressed public key
pub const WIF_COMPRESSED_FLAG: u8 = 0x01;

/// Compact-size markers
pub const COMPACT_SIZE_U16: u8 = 0xfd;
pub const COMPACT_SIZE_U32: u8 = 0xfe;
pub const COMPACT_SIZE_U64: u8 = 0xff;

// Opcodes used by the P2PKH / P2SH templates
pub const OP_0: u8 = 0x00;
/// Largest direct push: opcodes 0x01..=0x4b push that many bytes
pub const OP_PUSHBYTES_MAX: u8 = 0x4b;
pub const OP_PUSHDATA1: u8 = 0x4c;
pub const OP_PUSHDATA2: u8 = 0x4d;
pub const OP_PUSHDATA4: u8 = 0x4e;
pub const OP_DUP: u8 = 0x76;
pub const OP_EQUAL: u8 = 0x87;
pub const OP_EQUALVERIFY: u8 = 0x88;
pub const OP_HASH160: u8 = 0xa9;
pub const OP_CHECKSIG: u8 = 0xac;

/// Length of a P2PKH locking script
pub const P2PKH_SCRIPT_SIZE: usize = 25;

/// Length of a P2SH locking script
pub const P2SH_SCRIPT_SIZE: usize = 23;
