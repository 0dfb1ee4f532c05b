//! Lenient typed readers over a parsed JSON object.
//!
//! Each reader takes a key chain: the current key first, legacy aliases
//! after it. The first key *present* in the object wins, even when its value
//! has the wrong type; a mistyped value simply leaves the output untouched.
//! This is the crate's schema-evolution mechanism: renamed fields keep
//! loading from their old names, and junk never aborts a load.
//!
//! Readers return `true` when a well-typed value was actually applied, so
//! call sites can distinguish "field set" from "field left at its default"
//! (needed for all-or-nothing groups like the window placement shapes).

use serde_json::Value;

pub(crate) type JsonMap = serde_json::Map<String, Value>;

/// First value present under any of `keys`, current key first.
pub(crate) fn entry<'a>(obj: &'a JsonMap, keys: &[&str]) -> Option<&'a Value> {
    keys.iter().find_map(|key| obj.get(*key))
}

pub(crate) fn read_bool(obj: &JsonMap, keys: &[&str], out: &mut bool) -> bool {
    if let Some(value) = entry(obj, keys).and_then(Value::as_bool) {
        *out = value;
        return true;
    }
    false
}

pub(crate) fn read_u32(obj: &JsonMap, keys: &[&str], out: &mut u32) -> bool {
    if let Some(value) = entry(obj, keys).and_then(Value::as_u64) {
        if let Ok(value) = u32::try_from(value) {
            *out = value;
            return true;
        }
    }
    false
}

pub(crate) fn read_u16(obj: &JsonMap, keys: &[&str], out: &mut u16) -> bool {
    if let Some(value) = entry(obj, keys).and_then(Value::as_u64) {
        if let Ok(value) = u16::try_from(value) {
            *out = value;
            return true;
        }
    }
    false
}

pub(crate) fn read_i32(obj: &JsonMap, keys: &[&str], out: &mut i32) -> bool {
    if let Some(value) = entry(obj, keys).and_then(Value::as_i64) {
        if let Ok(value) = i32::try_from(value) {
            *out = value;
            return true;
        }
    }
    false
}

pub(crate) fn read_i64(obj: &JsonMap, keys: &[&str], out: &mut i64) -> bool {
    if let Some(value) = entry(obj, keys).and_then(Value::as_i64) {
        *out = value;
        return true;
    }
    false
}

pub(crate) fn read_f32(obj: &JsonMap, keys: &[&str], out: &mut f32) -> bool {
    if let Some(value) = entry(obj, keys).and_then(Value::as_f64) {
        *out = value as f32;
        return true;
    }
    false
}

pub(crate) fn read_string(obj: &JsonMap, keys: &[&str], out: &mut String) -> bool {
    if let Some(value) = entry(obj, keys).and_then(Value::as_str) {
        *out = value.to_owned();
        return true;
    }
    false
}

pub(crate) fn object<'a>(obj: &'a JsonMap, keys: &[&str]) -> Option<&'a JsonMap> {
    entry(obj, keys).and_then(Value::as_object)
}

pub(crate) fn array<'a>(obj: &'a JsonMap, keys: &[&str]) -> Option<&'a Vec<Value>> {
    entry(obj, keys).and_then(Value::as_array)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn obj(value: Value) -> JsonMap {
        value.as_object().unwrap().clone()
    }

    #[test]
    fn test_current_key_wins_over_legacy() {
        let map = obj(json!({"countdownSeconds": 4, "downCount": 2}));
        let mut out = 0u32;
        assert!(read_u32(&map, &["countdownSeconds", "downCount"], &mut out));
        assert_eq!(out, 4);
    }

    #[test]
    fn test_legacy_key_used_when_current_absent() {
        let map = obj(json!({"downCount": 2}));
        let mut out = 0u32;
        assert!(read_u32(&map, &["countdownSeconds", "downCount"], &mut out));
        assert_eq!(out, 2);
    }

    #[test]
    fn test_mistyped_current_key_blocks_legacy() {
        // Presence decides which key applies; a junk value under the current
        // key leaves the field at its default instead of resurrecting the
        // legacy value.
        let map = obj(json!({"countdownSeconds": "four", "downCount": 2}));
        let mut out = 9u32;
        assert!(!read_u32(&map, &["countdownSeconds", "downCount"], &mut out));
        assert_eq!(out, 9);
    }

    #[test]
    fn test_wrong_type_leaves_output_untouched() {
        let map = obj(json!({"flag": 1}));
        let mut out = true;
        assert!(!read_bool(&map, &["flag"], &mut out));
        assert!(out);
    }

    #[test]
    fn test_read_f32_accepts_integers() {
        let map = obj(json!({"rate": 60}));
        let mut out = 0.0f32;
        assert!(read_f32(&map, &["rate"], &mut out));
        assert_eq!(out, 60.0);
    }

    #[test]
    fn test_read_u32_rejects_negative_and_fractional() {
        let map = obj(json!({"a": -1, "b": 2.5}));
        let mut out = 7u32;
        assert!(!read_u32(&map, &["a"], &mut out));
        assert!(!read_u32(&map, &["b"], &mut out));
        assert_eq!(out, 7);
    }
}
