//! Response key extraction.
//!
//! Flattens a JSON value into dotted key paths. Only objects are descended
//! into: an array is recorded under its own key and its elements are not
//! visited.

use serde_json::Value;

/// Dotted key paths of every object key in `value`, parents before children.
pub fn flatten_keys(value: &Value) -> Vec<String> {
    let mut keys = Vec::new();
    collect(value, "", &mut keys);
    keys
}

fn collect(value: &Value, prefix: &str, keys: &mut Vec<String>) {
    let Value::Object(map) = value else {
        return;
    };

    for (key, child) in map {
        let full = if prefix.is_empty() {
            key.clone()
        } else {
            format!("{prefix}.{key}")
        };
        keys.push(full.clone());
        collect(child, &full, keys);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_nested_objects() {
        let value = json!({"data": {"user": {"id": 1}}, "ok": true});
        assert_eq!(
            flatten_keys(&value),
            vec!["data", "data.user", "data.user.id", "ok"]
        );
    }

    #[test]
    fn test_arrays_not_descended() {
        let value = json!({"data": {"token": "abc", "list": [1, 2, 3]}});
        assert_eq!(flatten_keys(&value), vec!["data", "data.token", "data.list"]);
    }

    #[test]
    fn test_objects_inside_arrays_ignored() {
        let value = json!({"items": [{"sku": "A1"}]});
        assert_eq!(flatten_keys(&value), vec!["items"]);
    }

    #[test]
    fn test_non_object_root() {
        assert!(flatten_keys(&json!([{"a": 1}])).is_empty());
        assert!(flatten_keys(&json!("text")).is_empty());
        assert!(flatten_keys(&json!({})).is_empty());
    }
}
