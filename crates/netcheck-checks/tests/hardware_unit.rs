// crates/netcheck-checks/tests/hardware_unit.rs
// ============================================================================
// Module: Hardware Check Unit Tests
// Description: Tests for drop and PCIe error counter thresholds.
// Purpose: Ensure counter diagnostics are exact and ordered.
// ============================================================================

//! Unit tests for hardware checks.

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

mod common;

use netcheck_checks::checks::hardware::AdverseDropCounters;
use netcheck_checks::checks::hardware::PcieErrorCounters;
use serde_json::json;

use crate::common::expect_error;
use crate::common::expect_failure;
use crate::common::expect_success;
use crate::common::run_json;

/// Counters at zero pass under default thresholds.
#[test]
fn adverse_drops_clean() {
    let check: AdverseDropCounters = serde_json::from_value(json!({})).unwrap();
    let output = json!({
        "dropEvents": {
            "ReassemblyErrors": {
                "dropInLastMinute": 0, "dropInLastTenMinute": 0, "dropInLastOneHour": 0,
                "dropInLastOneDay": 0, "dropInLastOneWeek": 0,
            },
        }
    });
    expect_success(&run_json(&check, output));
}

/// Counters above a window threshold fail with both values.
#[test]
fn adverse_drops_over_threshold() {
    let check: AdverseDropCounters =
        serde_json::from_value(json!({"thresholds": {"minute": 0, "day": 10}})).unwrap();
    let output = json!({
        "dropEvents": {
            "ReassemblyErrors": {
                "dropInLastMinute": 3, "dropInLastTenMinute": 0, "dropInLastOneHour": 0,
                "dropInLastOneDay": 12, "dropInLastOneWeek": 0,
            },
        }
    });
    expect_failure(
        &run_json(&check, output),
        &[
            "Counter: ReassemblyErrors Period: Last minute - Threshold exceeded - \
             Expected: <= 0 Actual: 3",
            "Counter: ReassemblyErrors Period: Last day - Threshold exceeded - \
             Expected: <= 10 Actual: 12",
        ],
    );
}

/// Threshold blocks accept the device-style counter aliases.
#[test]
fn adverse_drops_accepts_aliases() {
    let check: AdverseDropCounters =
        serde_json::from_value(json!({"thresholds": {"dropInLastMinute": 5}})).unwrap();
    let output = json!({
        "dropEvents": {"CoppDrops": {"dropInLastMinute": 4}}
    });
    expect_success(&run_json(&check, output));
}

/// A missing drop table is a check error.
#[test]
fn adverse_drops_missing_table() {
    let check: AdverseDropCounters = serde_json::from_value(json!({})).unwrap();
    expect_error(&run_json(&check, json!({"totalDrops": 0})), &["Invalid output: 'dropEvents' not found"]);
}

/// PCIe counters at zero pass under default thresholds.
#[test]
fn pcie_clean() {
    let check: PcieErrorCounters = serde_json::from_value(json!({})).unwrap();
    let output = json!({
        "pciIds": {
            "00:00.0": {"correctableErrors": 0, "nonFatalErrors": 0, "fatalErrors": 0, "name": "host bridge"},
        }
    });
    expect_success(&run_json(&check, output));
}

/// PCIe counters above their thresholds fail per counter, per device.
#[test]
fn pcie_over_threshold() {
    let check: PcieErrorCounters =
        serde_json::from_value(json!({"thresholds": {"correctable_errors": 2}})).unwrap();
    let output = json!({
        "pciIds": {
            "00:00.0": {"correctableErrors": 5, "nonFatalErrors": 0, "fatalErrors": 1},
            "06:00.0": {"correctableErrors": 1, "nonFatalErrors": 0, "fatalErrors": 0},
        }
    });
    expect_failure(
        &run_json(&check, output),
        &[
            "Device: 00:00.0 Counter: Correctable errors - Threshold exceeded - \
             Expected: <= 2 Actual: 5",
            "Device: 00:00.0 Counter: Fatal errors - Threshold exceeded - \
             Expected: <= 0 Actual: 1",
        ],
    );
}
