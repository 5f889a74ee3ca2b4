//! Snapshot validator
//!
//! Checks an arbitrary JSON document for the minimum shape required to be
//! treated as a snapshot. Used as a gate before restore and before accepting
//! an imported file; missing either marker rejects the whole document.

use serde_json::Value;

/// A document is a valid snapshot iff it is a JSON object carrying both a
/// `data` object and a `version` string. Emptiness of `data` is acceptable.
pub fn is_valid_snapshot(doc: &Value) -> bool {
    let Some(obj) = doc.as_object() else {
        return false;
    };

    obj.get("data").is_some_and(Value::is_object) && obj.get("version").is_some_and(Value::is_string)
}
