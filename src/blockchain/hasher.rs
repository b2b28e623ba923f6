use serde::Serialize;
use sha2::{Digest, Sha256};

/// SHA-256 hex digest over the canonical JSON form of `value`.
///
/// Canonical form means object keys are sorted and no whitespace is emitted,
/// so two logically identical values hash the same no matter what order
/// their fields were inserted in. Routing through `serde_json::Value` gives
/// us the sorted keys (its object map is BTreeMap-backed).
pub fn hash_value<T: Serialize>(value: &T) -> String {
    let canonical = serde_json::to_value(value).expect("serialize for hashing");
    let bytes = serde_json::to_vec(&canonical).expect("encode canonical json");
    let mut hasher = Sha256::new();
    hasher.update(&bytes);
    hex::encode(hasher.finalize())
}

#[cfg(test)]
mod tests {
    use super::hash_value;
    use crate::transaction::Transaction;

    #[test]
    fn deterministic_for_same_value() {
        let tx = Transaction::new("A", "B", 10);
        assert_eq!(hash_value(&tx), hash_value(&tx));
    }

    #[test]
    fn independent_of_field_insertion_order() {
        let a: serde_json::Value =
            serde_json::from_str(r#"{"sender":"A","recipient":"B","amount":10}"#).unwrap();
        let b: serde_json::Value =
            serde_json::from_str(r#"{"amount":10,"recipient":"B","sender":"A"}"#).unwrap();
        assert_eq!(hash_value(&a), hash_value(&b));
    }

    #[test]
    fn sensitive_to_any_field_change() {
        let tx = Transaction::new("A", "B", 10);
        let tampered = Transaction::new("A", "B", 11);
        assert_ne!(hash_value(&tx), hash_value(&tampered));
    }

    #[test]
    fn digest_is_256_bit_hex() {
        assert_eq!(hash_value(&"genesis_block").len(), 64);
    }
}
