//! JSON canónico y hash de payloads.
//!
//! El hash identifica una recomendación persistida sin importar el orden de
//! claves con que se haya serializado.

use serde_json::Value;
use sha2::{Digest, Sha256};
use std::collections::BTreeMap;

/// Serializa un `Value` a JSON canónico: claves de objeto ordenadas,
/// arreglos en su orden original, sin espacios.
pub fn to_canonical_json(value: &Value) -> String {
    match value {
        Value::Null => "null".to_string(),
        Value::Bool(b) => b.to_string(),
        Value::Number(n) => n.to_string(),
        Value::String(s) => serde_json::to_string(s).unwrap(),
        Value::Array(arr) => {
            let items: Vec<String> = arr.iter().map(to_canonical_json).collect();
            format!("[{}]", items.join(","))
        }
        Value::Object(map) => {
            let mut tree = BTreeMap::new();
            for (k, v) in map {
                tree.insert(k, to_canonical_json(v));
            }
            let items: Vec<String> = tree
                .into_iter()
                .map(|(k, v)| format!("{}:{}", serde_json::to_string(&k).unwrap(), v))
                .collect();
            format!("{{{}}}", items.join(","))
        }
    }
}

/// SHA-256 en hex del JSON canónico de un payload.
pub fn payload_hash(value: &Value) -> String {
    let mut hasher = Sha256::new();
    hasher.update(to_canonical_json(value).as_bytes());
    format!("{:x}", hasher.finalize())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_canonical_json_sorts_keys() {
        let value = json!({"b": 1, "a": {"z": true, "m": [1, 2]}});
        assert_eq!(to_canonical_json(&value), r#"{"a":{"m":[1,2],"z":true},"b":1}"#);
    }

    #[test]
    fn test_payload_hash_stable_across_key_order() {
        let first = json!({"user_id": 16, "report": {"total": 3078.0, "roi": 8.1}});
        let second = json!({"report": {"roi": 8.1, "total": 3078.0}, "user_id": 16});
        assert_eq!(payload_hash(&first), payload_hash(&second));
    }

    #[test]
    fn test_payload_hash_distinguishes_content() {
        let first = json!({"total": 3078.0});
        let second = json!({"total": 3078.01});
        assert_ne!(payload_hash(&first), payload_hash(&second));
    }
}
