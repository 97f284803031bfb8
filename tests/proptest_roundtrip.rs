use proptest::prelude::*;

use tx_forge::encode::{compact_size, read_compact_size};
use tx_forge::*;

/// Strategy to generate a random transaction with raw scripts.
fn arb_transaction() -> impl Strategy<Value = Transaction> {
    let arb_input = (
        prop::array::uniform32(any::<u8>()),
        any::<u32>(),
        prop::collection::vec(any::<u8>(), 0..300),
        any::<u32>(),
    )
        .prop_map(|(hash, index, script, sequence)| {
            TransactionInput::new(OutPoint::new(hash, index), Script::from_bytes(script), sequence)
        });

    let arb_output = (any::<u64>(), prop::collection::vec(any::<u8>(), 0..64))
        .prop_map(|(value, script)| TransactionOutput::new(value, Script::from_bytes(script)));

    (
        any::<i32>(),
        prop::collection::vec(arb_input, 0..4),
        prop::collection::vec(arb_output, 0..4),
        any::<u32>(),
    )
        .prop_map(|(version, inputs, outputs, lock_time)| {
            let mut tx = Transaction::new(version, lock_time);
            for input in inputs {
                tx.add_input(input);
            }
            for output in outputs {
                tx.add_output(output);
            }
            tx
        })
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn transaction_serialize_deserialize_roundtrip(tx in arb_transaction()) {
        let bytes = tx.serialize();
        let decoded = Transaction::deserialize(&bytes).unwrap();
        prop_assert_eq!(decoded.serialize(), bytes);
        prop_assert_eq!(decoded.txid(), tx.txid());
    }

    #[test]
    fn transaction_truncation_is_detected(tx in arb_transaction(), cut in any::<prop::sample::Index>()) {
        let bytes = tx.serialize();
        let cut = cut.index(bytes.len());
        prop_assert_eq!(
            Transaction::deserialize(&bytes[..cut]),
            Err(TxError::TruncatedTransaction)
        );
    }

    #[test]
    fn compact_size_prefix_sizes(n in any::<u64>()) {
        let encoded = compact_size(n);
        let expected = if n < 0xfd {
            1
        } else if n <= 0xffff {
            3
        } else if n <= 0xffff_ffff {
            5
        } else {
            9
        };
        prop_assert_eq!(encoded.len(), expected);
        prop_assert_eq!(read_compact_size(&encoded).unwrap(), (n, expected));
    }

    #[test]
    fn address_base58_roundtrip(
        hash in prop::array::uniform20(any::<u8>()),
        mainnet in any::<bool>(),
        script_hash in any::<bool>(),
    ) {
        let network = if mainnet { Network::Mainnet } else { Network::Testnet };
        let kind = if script_hash { AddressKind::ScriptHash } else { AddressKind::PubKeyHash };
        let address = Address::from_hash(&hash, network, kind).unwrap();
        let parsed = Address::from_base58(&address.to_base58()).unwrap();
        prop_assert_eq!(parsed, address);
        prop_assert_eq!(parsed.hash(), &hash);
    }

    #[test]
    fn sighash_is_deterministic(tx in arb_transaction(), sighash_byte in prop::sample::select(vec![0x01u8, 0x02, 0x81, 0x82])) {
        prop_assume!(!tx.inputs.is_empty());
        let sighash = SighashType::from_u8(sighash_byte).unwrap();
        let subscript = Script::from_bytes(vec![0x51]);
        let a = tx.signature_hash(0, &subscript, sighash).unwrap();
        let b = tx.clone().signature_hash(0, &subscript, sighash).unwrap();
        prop_assert_eq!(a, b);
    }
}
