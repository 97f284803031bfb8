//! Signing capability and secp256k1 private keys
//!
//! [`Transaction::sign_input`](crate::transaction::Transaction::sign_input)
//! only needs something that turns a 32-byte digest into a DER signature, so
//! hardware wallets and remote signers plug in through [`Signer`]. Plain
//! closures implement it as well.

use secp256k1::ecdsa::Signature;
use secp256k1::{Message, PublicKey, Secp256k1, SecretKey};

use crate::address::{decode_base58_check, encode_base58_check, Address};
use crate::constants::*;
use crate::error::{Result, TxError};
use crate::network::{self, AddressKind, Network};
use crate::types::{ByteString, Hash};

/// Produces a DER-encoded ECDSA signature over a signature hash
pub trait Signer {
    fn sign(&self, hash: &Hash) -> Result<ByteString>;
}

impl<F> Signer for F
where
    F: Fn(&Hash) -> Result<ByteString>,
{
    fn sign(&self, hash: &Hash) -> Result<ByteString> {
        self(hash)
    }
}

/// secp256k1 secret key with its WIF metadata
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PrivateKey {
    secret: SecretKey,
    compressed: bool,
    network: Network,
}

impl PrivateKey {
    pub fn new(secret: SecretKey, compressed: bool, network: Network) -> Self {
        Self {
            secret,
            compressed,
            network,
        }
    }

    /// Key from 32 raw bytes; the public key is serialized compressed
    pub fn from_slice(bytes: &[u8], network: Network) -> Result<Self> {
        let secret =
            SecretKey::from_slice(bytes).map_err(|e| TxError::InvalidPrivateKey(e.to_string()))?;
        Ok(Self::new(secret, true, network))
    }

    /// Decode Wallet Import Format:
    /// `base58check(prefix || secret(32) [|| 0x01])`
    pub fn from_wif(wif: &str) -> Result<Self> {
        let payload = decode_base58_check(wif)?;
        let version = payload[0];
        let network = match network::lookup(version) {
            Some((net, AddressKind::PrivateKey)) => net,
            _ => return Err(TxError::UnknownVersion(version)),
        };
        let compressed = match payload.len() {
            n if n == 1 + PRIVATE_KEY_SIZE => false,
            n if n == 2 + PRIVATE_KEY_SIZE => {
                if payload[n - 1] != WIF_COMPRESSED_FLAG {
                    return Err(TxError::InvalidPrivateKey(format!(
                        "unexpected compression flag 0x{:02x}",
                        payload[n - 1]
                    )));
                }
                true
            }
            n => {
                return Err(TxError::InvalidLength {
                    expected: 2 + PRIVATE_KEY_SIZE,
                    actual: n,
                })
            }
        };
        let secret = SecretKey::from_slice(&payload[1..1 + PRIVATE_KEY_SIZE])
            .map_err(|e| TxError::InvalidPrivateKey(e.to_string()))?;
        Ok(Self::new(secret, compressed, network))
    }

    pub fn to_wif(&self) -> String {
        let mut payload = Vec::with_capacity(2 + PRIVATE_KEY_SIZE);
        payload.push(self.network.version_byte(AddressKind::PrivateKey));
        payload.extend_from_slice(&self.secret.secret_bytes());
        if self.compressed {
            payload.push(WIF_COMPRESSED_FLAG);
        }
        encode_base58_check(&payload)
    }

    pub fn secret_bytes(&self) -> [u8; PRIVATE_KEY_SIZE] {
        self.secret.secret_bytes()
    }

    pub fn is_compressed(&self) -> bool {
        self.compressed
    }

    pub fn network(&self) -> Network {
        self.network
    }

    /// Serialized public key: 33 bytes compressed, 65 uncompressed
    pub fn public_key(&self) -> ByteString {
        let secp = Secp256k1::signing_only();
        let public_key = PublicKey::from_secret_key(&secp, &self.secret);
        if self.compressed {
            public_key.serialize().to_vec()
        } else {
            public_key.serialize_uncompressed().to_vec()
        }
    }

    /// P2PKH address of this key on its network
    pub fn address(&self) -> Address {
        Address::from_public_key(&self.public_key(), self.network)
    }
}

impl Signer for PrivateKey {
    /// RFC6979 deterministic, low-S, DER encoded
    fn sign(&self, hash: &Hash) -> Result<ByteString> {
        let secp = Secp256k1::signing_only();
        let message =
            Message::from_digest_slice(hash).map_err(|e| TxError::Signing(e.to_string()))?;
        let signature = secp.sign_ecdsa(&message, &self.secret);
        Ok(signature.serialize_der().to_vec())
    }
}

/// Check a DER signature (without the sighash byte) against a public key
pub fn verify_signature(public_key: &[u8], hash: &Hash, signature: &[u8]) -> bool {
    let secp = Secp256k1::verification_only();
    let public_key = match PublicKey::from_slice(public_key) {
        Ok(pk) => pk,
        Err(_) => return false,
    };
    let signature = match Signature::from_der(signature) {
        Ok(sig) => sig,
        Err(_) => return false,
    };
    let message = match Message::from_digest_slice(hash) {
        Ok(msg) => msg,
        Err(_) => return false,
    };
    secp.verify_ecdsa(&message, &signature, &public_key).is_ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key_one(compressed: bool) -> PrivateKey {
        let mut bytes = [0u8; 32];
        bytes[31] = 1;
        let key = PrivateKey::from_slice(&bytes, Network::Mainnet).unwrap();
        PrivateKey::new(key.secret, compressed, Network::Mainnet)
    }

    #[test]
    fn test_wif_compressed() {
        let key = key_one(true);
        assert_eq!(
            key.to_wif(),
            "KwDiBf89QgGbjEhKnhXJuH7LrciVrZi3qYjgd9M7rFU73sVHnoWn"
        );
        assert_eq!(PrivateKey::from_wif(&key.to_wif()).unwrap(), key);
    }

    #[test]
    fn test_wif_uncompressed() {
        let key = PrivateKey::from_wif("5HpHagT65TZzG1PH3CSu63k8DbpvD8s5ip4nEB3kEsreAnchuDf").unwrap();
        assert!(!key.is_compressed());
        assert_eq!(key.network(), Network::Mainnet);
        assert_eq!(key, key_one(false));
        assert_eq!(key.public_key().len(), 65);
        assert_eq!(key.public_key()[0], 0x04);
    }

    #[test]
    fn test_wif_testnet_round_trip() {
        let key = PrivateKey::from_slice(&[0x11; 32], Network::Testnet).unwrap();
        let decoded = PrivateKey::from_wif(&key.to_wif()).unwrap();
        assert_eq!(decoded.network(), Network::Testnet);
        assert_eq!(decoded.secret_bytes(), [0x11; 32]);
    }

    #[test]
    fn test_wif_rejects_address_prefix() {
        assert_eq!(
            PrivateKey::from_wif("1BvBMSEYstWetqTFn5Au4m4GFg7xJaNVN2"),
            Err(TxError::UnknownVersion(0x00))
        );
    }

    #[test]
    fn test_wif_bad_compression_flag() {
        let mut payload = vec![0x80];
        payload.extend_from_slice(&[0x11; 32]);
        payload.push(0x02);
        let wif = encode_base58_check(&payload);
        assert!(matches!(
            PrivateKey::from_wif(&wif),
            Err(TxError::InvalidPrivateKey(_))
        ));
    }

    #[test]
    fn test_from_slice_rejects_zero() {
        assert!(matches!(
            PrivateKey::from_slice(&[0u8; 32], Network::Mainnet),
            Err(TxError::InvalidPrivateKey(_))
        ));
    }

    #[test]
    fn test_public_key_and_address() {
        let key = key_one(true);
        assert_eq!(
            hex::encode(key.public_key()),
            "0279be667ef9dcbbac55a06295ce870b07029bfcdb2dce28d959f2815b16f81798"
        );
        assert_eq!(key.address().to_base58(), "1BgGZ9tcN4rm9KBzDn7KprQz87SZ26SAMH");
    }

    #[test]
    fn test_sign_verifies() {
        let key = key_one(true);
        let hash = [0x42u8; 32];
        let signature = key.sign(&hash).unwrap();
        assert_eq!(signature[0], 0x30);
        assert!(verify_signature(&key.public_key(), &hash, &signature));
        assert!(!verify_signature(&key.public_key(), &[0x43u8; 32], &signature));
    }

    #[test]
    fn test_sign_is_deterministic() {
        let key = key_one(true);
        let hash = [0x07u8; 32];
        assert_eq!(key.sign(&hash).unwrap(), key.sign(&hash).unwrap());
    }

    #[test]
    fn test_closure_signer() {
        let signer = |hash: &Hash| -> Result<ByteString> { Ok(hash[..4].to_vec()) };
        assert_eq!(signer.sign(&[9u8; 32]).unwrap(), vec![9, 9, 9, 9]);
    }

    #[test]
    fn test_verify_rejects_garbage() {
        assert!(!verify_signature(&[0x02; 33], &[0u8; 32], &[0x30, 0x00]));
    }
}
