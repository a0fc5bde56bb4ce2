// crates/netcheck-checks/tests/software_unit.rs
// ============================================================================
// Module: Software Check Unit Tests
// Description: Tests for version lists and extension reconciliation.
// Purpose: Ensure software diagnostics are exact.
// ============================================================================

//! Unit tests for software checks.

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

use netcheck_checks::checks::software::EosExtensions;
use netcheck_checks::checks::software::EosVersion;
use netcheck_checks::checks::software::TerminAttrVersion;
use netcheck_core::CommandOutput;
use serde_json::json;

use crate::common::expect_failure;
use crate::common::expect_success;
use crate::common::run;
use crate::common::run_json;

/// A version within the accepted list passes.
#[test]
fn eos_version_accepted() {
    let check = EosVersion::new(vec!["4.27.0F".to_string(), "4.28.0F".to_string()]).unwrap();
    let output = json!({"modelName": "vEOS-lab", "internalVersion": "4.27.0F-24305004.4270F", "version": "4.27.0F"});
    expect_success(&run_json(&check, output));
}

/// A version outside the list fails with both sides.
#[test]
fn eos_version_rejected() {
    let check = EosVersion::new(vec!["4.27.1F".to_string()]).unwrap();
    let output = json!({"modelName": "vEOS-lab", "internalVersion": "4.27.0F-24305004.4270F", "version": "4.27.0F"});
    expect_failure(
        &run_json(&check, output),
        &["EOS version mismatch - Actual: 4.27.0F not in Expected: 4.27.1F"],
    );
}

/// A TerminAttr version within the accepted list passes.
#[test]
fn terminattr_version_accepted() {
    let check =
        TerminAttrVersion::new(vec!["v1.17.0".to_string(), "v1.18.1".to_string()]).unwrap();
    let output = json!({
        "imageFormatVersion": "1.0",
        "modelName": "vEOS-lab",
        "details": {"packages": {"TerminAttr-core": {"release": "1", "version": "v1.17.0"}}},
    });
    expect_success(&run_json(&check, output));
}

/// A TerminAttr version outside the list fails with both sides.
#[test]
fn terminattr_version_rejected() {
    let check =
        TerminAttrVersion::new(vec!["v1.17.1".to_string(), "v1.18.1".to_string()]).unwrap();
    let output = json!({
        "imageFormatVersion": "1.0",
        "modelName": "vEOS-lab",
        "details": {"packages": {"TerminAttr-core": {"release": "1", "version": "v1.17.0"}}},
    });
    expect_failure(
        &run_json(&check, output),
        &["TerminAttr version mismatch - Actual: v1.17.0 not in Expected: v1.17.1, v1.18.1"],
    );
}

/// No extensions anywhere passes.
#[test]
fn extensions_none() {
    let check = EosExtensions::new();
    let outputs = vec![
        CommandOutput::Json(json!({"extensions": {}, "extensionStoredDir": "flash:", "warnings": ["No extensions are available"]})),
        CommandOutput::Json(json!({"extensions": []})),
    ];
    expect_success(&run(&check, outputs));
}

/// Installed extensions matching boot extensions pass.
#[test]
fn extensions_matching() {
    let check = EosExtensions::new();
    let outputs = vec![
        CommandOutput::Json(json!({
            "extensions": {
                "AristaCloudGateway-1.0.1-1.swix": {"version": "1.0.1", "status": "installed", "boot": true},
            }
        })),
        CommandOutput::Json(json!({"extensions": ["AristaCloudGateway-1.0.1-1.swix"]})),
    ];
    expect_success(&run(&check, outputs));
}

/// An installed extension missing from boot configuration fails.
#[test]
fn extensions_not_configured_for_boot() {
    let check = EosExtensions::new();
    let outputs = vec![
        CommandOutput::Json(json!({
            "extensions": {
                "AristaCloudGateway-1.0.1-1.swix": {"version": "1.0.1", "status": "installed", "boot": false},
            }
        })),
        CommandOutput::Json(json!({"extensions": []})),
    ];
    expect_failure(
        &run(&check, outputs),
        &["EOS extensions mismatch - Installed: AristaCloudGateway-1.0.1-1.swix Configured: Not found"],
    );
}

/// Uninstalled extensions configured for boot fail with both lists.
#[test]
fn extensions_partially_installed() {
    let check = EosExtensions::new();
    let outputs = vec![
        CommandOutput::Json(json!({
            "extensions": {
                "AristaCloudGateway-1.0.1-1.swix": {"version": "1.0.1", "status": "installed", "boot": false},
                "EOS-4.33.0F-NDRSensor.swix": {"version": "4.33.0", "status": "notInstalled", "boot": true},
            }
        })),
        CommandOutput::Json(json!({"extensions": ["AristaCloudGateway-1.0.1-1.swix", "EOS-4.33.0F-NDRSensor.swix"]})),
    ];
    expect_failure(
        &run(&check, outputs),
        &[
            "EOS extensions mismatch - Installed: AristaCloudGateway-1.0.1-1.swix \
             Configured: AristaCloudGateway-1.0.1-1.swix, EOS-4.33.0F-NDRSensor.swix",
        ],
    );
}
