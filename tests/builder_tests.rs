//! Building transactions from configuration

use anyhow::Result;
use tx_forge::signer::verify_signature;
use tx_forge::template::p2pkh_pubkey;
use tx_forge::*;

const FUNDING_TXID: &str = "e10af6609324e76ecda601d4bdad3b6a6454cab9686a8031fcf3ca162c3bfb8b";

#[test]
fn test_build_and_sign_from_json_config() -> Result<()> {
    let config = TxConfig::from_json(
        r#"{ "network": "testnet", "version": 2, "lock_time": 2500000, "sequence": 4294967293 }"#,
    )?;
    let key = PrivateKey::from_slice(&[0x33; 32], Network::Testnet)?;
    let change = key.address().to_base58();

    let mut builder = TransactionBuilder::new(config);
    builder
        .spend(FUNDING_TXID, 1, key.public_key())?
        .pay_to("mrS8eVKXguwufwvsVe9GtgGb7fif9UQeAu", 60_000)?
        .pay_to_btc(&change, 0.0003)?;
    builder.sign_with_key(0, &key)?;
    let tx = builder.build();

    assert_eq!(tx.version, 2);
    assert_eq!(tx.lock_time, 2_500_000);
    assert_eq!(tx.inputs[0].sequence, 0xffff_fffd);
    assert_eq!(tx.outputs[1].value, 30_000);
    assert!(tx.is_complete());

    let subscript = p2pkh_pubkey(&key.address())?;
    let hash = tx.signature_hash(0, &subscript, SighashType::ALL)?;
    let (signature, public_key) = tx.inputs[0]
        .script_sig
        .p2pkh_sig_parts()
        .ok_or_else(|| anyhow::anyhow!("input 0 unsigned"))?;
    assert!(verify_signature(public_key, &hash, &signature[..signature.len() - 1]));

    let decoded = Transaction::from_hex(&tx.to_hex())?;
    assert_eq!(decoded.txid_hex(), tx.txid_hex());
    Ok(())
}

#[test]
fn test_builder_with_custom_signer() -> Result<()> {
    let key = PrivateKey::from_slice(&[0x44; 32], Network::Mainnet)?;
    let mut builder = TransactionBuilder::new(TxConfig::mainnet());
    builder
        .spend(FUNDING_TXID, 0, key.public_key())?
        .pay_to("1BvBMSEYstWetqTFn5Au4m4GFg7xJaNVN2", 10_000)?;

    // a remote signer only ever sees the digest
    let remote = |hash: &Hash| key.sign(hash);
    let subscript = p2pkh_pubkey(&key.address())?;
    builder.sign(0, &subscript, &remote)?;
    assert!(builder.transaction().is_complete());
    Ok(())
}

#[test]
fn test_builder_rejects_unsupported_amounts() {
    let mut builder = TransactionBuilder::new(TxConfig::default());
    assert!(matches!(
        builder
            .pay_to_btc("mrS8eVKXguwufwvsVe9GtgGb7fif9UQeAu", -1.0)
            .map(|_| ()),
        Err(TxError::InvalidAmount(_))
    ));
}

#[test]
fn test_builder_rejects_bad_address() {
    let mut builder = TransactionBuilder::new(TxConfig::default());
    assert!(matches!(
        builder
            .pay_to("mrS8eVKXguwufwvsVe9GtgGb7fif9UQeAv", 1)
            .map(|_| ()),
        Err(TxError::InvalidChecksum)
    ));
}

#[test]
fn test_builder_sign_out_of_range() {
    let key = PrivateKey::from_slice(&[0x44; 32], Network::Testnet).unwrap();
    let mut builder = TransactionBuilder::new(TxConfig::default());
    assert!(matches!(
        builder.sign_with_key(0, &key).map(|_| ()),
        Err(TxError::IndexOutOfRange { index: 0, len: 0 })
    ));
}
