//! Primitive types shared across the crate

/// Hash type: 256-bit hash
pub type Hash = [u8; 32];

/// Byte string type
pub type ByteString = Vec<u8>;

/// HASH160 digest: RIPEMD160(SHA256(x))
pub type PubKeyHash = [u8; 20];
