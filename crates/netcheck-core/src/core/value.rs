// crates/netcheck-core/src/core/value.rs
// ============================================================================
// Module: Netcheck Value Lookup
// Description: Dotted-path traversal over untrusted JSON device output.
// Purpose: Provide the uniform nested-mapping walk used by every check.
// Dependencies: serde_json
// ============================================================================

//! ## Overview
//! Device output is a nested JSON mapping of unknown shape. Lookup walks a
//! dot-separated key path, indexing objects by key and arrays by decimal
//! position, and returns `None` on any missing or mismatched segment so
//! callers decide between failure and error semantics.

// ============================================================================
// SECTION: Imports
// ============================================================================

use serde_json::Value;

// ============================================================================
// SECTION: Lookup
// ============================================================================

/// Resolves a dot-separated key path inside a JSON value.
///
/// Object segments index by key; array segments index by decimal position.
/// Returns `None` when any segment is absent or the shape does not match.
#[must_use]
pub fn get_value<'a>(value: &'a Value, path: &str) -> Option<&'a Value> {
    let mut current = value;
    for segment in path.split('.') {
        current = match current {
            Value::Object(map) => map.get(segment)?,
            Value::Array(items) => items.get(segment.parse::<usize>().ok()?)?,
            _ => return None,
        };
    }
    Some(current)
}

/// Resolves a path to a string slice.
#[must_use]
pub fn get_str<'a>(value: &'a Value, path: &str) -> Option<&'a str> {
    get_value(value, path).and_then(Value::as_str)
}

/// Resolves a path to an unsigned integer.
#[must_use]
pub fn get_u64(value: &Value, path: &str) -> Option<u64> {
    get_value(value, path).and_then(Value::as_u64)
}

/// Resolves a path to a floating-point number.
#[must_use]
pub fn get_f64(value: &Value, path: &str) -> Option<f64> {
    get_value(value, path).and_then(Value::as_f64)
}

/// Resolves a path to a boolean.
#[must_use]
pub fn get_bool(value: &Value, path: &str) -> Option<bool> {
    get_value(value, path).and_then(Value::as_bool)
}
