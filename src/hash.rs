//! Hash primitives: double SHA-256, HASH160 and the Base58Check checksum

use crate::constants::CHECKSUM_SIZE;
use crate::types::{Hash, PubKeyHash};
use bitcoin_hashes::{sha256d, Hash as BitcoinHash, HashEngine};
use ripemd::Ripemd160;
use sha2::{Digest, Sha256};

/// SHA256(SHA256(x))
pub fn sha256d(data: &[u8]) -> Hash {
    let mut engine = sha256d::Hash::engine();
    engine.input(data);
    let result = sha256d::Hash::from_engine(engine);
    let mut hash = [0u8; 32];
    hash.copy_from_slice(&result);
    hash
}

/// RIPEMD160(SHA256(x))
pub fn hash160(data: &[u8]) -> PubKeyHash {
    let sha256_hash = Sha256::digest(data);
    let ripemd160_hash = Ripemd160::digest(sha256_hash);
    let mut hash = [0u8; 20];
    hash.copy_from_slice(&ripemd160_hash);
    hash
}

/// First four bytes of SHA256(SHA256(payload))
pub fn checksum(payload: &[u8]) -> [u8; CHECKSUM_SIZE] {
    let digest = sha256d(payload);
    let mut out = [0u8; CHECKSUM_SIZE];
    out.copy_from_slice(&digest[..CHECKSUM_SIZE]);
    out
}
