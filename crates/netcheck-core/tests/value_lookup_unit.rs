// crates/netcheck-core/tests/value_lookup_unit.rs
// ============================================================================
// Module: Value Lookup Unit Tests
// Description: Tests for dotted-path traversal over JSON values.
// Purpose: Ensure lookup resolves paths and fails closed on mismatches.
// ============================================================================

//! Unit tests for nested value lookup.

#![allow(
    clippy::panic,
    clippy::print_stdout,
    clippy::print_stderr,
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::use_debug,
    clippy::dbg_macro,
    clippy::panic_in_result_fn,
    clippy::unwrap_in_result,
    reason = "Test-only assertions and helpers are permitted."
)]

use netcheck_core::get_bool;
use netcheck_core::get_f64;
use netcheck_core::get_str;
use netcheck_core::get_u64;
use netcheck_core::get_value;
use serde_json::json;

/// Nested object keys resolve along the dotted path.
#[test]
fn lookup_resolves_nested_objects() {
    let value = json!({"detail": {"mlagState": "primary", "primaryPriority": 3276}});
    assert_eq!(get_str(&value, "detail.mlagState"), Some("primary"));
    assert_eq!(get_u64(&value, "detail.primaryPriority"), Some(3276));
}

/// Numeric segments index into arrays.
#[test]
fn lookup_indexes_arrays() {
    let value = json!({"messages": ["first", "second"]});
    assert_eq!(get_str(&value, "messages.0"), Some("first"));
    assert_eq!(get_str(&value, "messages.1"), Some("second"));
    assert_eq!(get_value(&value, "messages.2"), None);
}

/// Missing keys and shape mismatches resolve to nothing.
#[test]
fn lookup_fails_closed() {
    let value = json!({"state": "active", "count": 3});
    assert_eq!(get_value(&value, "missing"), None);
    assert_eq!(get_value(&value, "state.deeper"), None);
    assert_eq!(get_value(&value, "count.0"), None);
}

/// Keys containing dashes are plain segments.
#[test]
fn lookup_accepts_dashed_keys() {
    let value = json!({"mlagPorts": {"Active-partial": 0, "Inactive": 2}});
    assert_eq!(get_u64(&value, "mlagPorts.Active-partial"), Some(0));
    assert_eq!(get_u64(&value, "mlagPorts.Inactive"), Some(2));
}

/// Typed accessors reject values of the wrong type.
#[test]
fn typed_accessors_match_types() {
    let value = json!({"flag": true, "ratio": 0.25, "name": "spine1", "count": 7});
    assert_eq!(get_bool(&value, "flag"), Some(true));
    assert_eq!(get_f64(&value, "ratio"), Some(0.25));
    assert_eq!(get_str(&value, "name"), Some("spine1"));
    assert_eq!(get_u64(&value, "count"), Some(7));
    assert_eq!(get_u64(&value, "name"), None);
    assert_eq!(get_str(&value, "count"), None);
}

/// An empty path segment never matches an object key.
#[test]
fn lookup_empty_segments() {
    let value = json!({"a": {"b": 1}});
    assert_eq!(get_value(&value, "a."), None);
    assert_eq!(get_value(&value, ".a"), None);
}
