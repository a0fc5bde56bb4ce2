// crates/netcheck-checks/tests/vxlan_unit.rs
// ============================================================================
// Module: VXLAN Check Unit Tests
// Description: Tests for Vxlan1 health, sanity, bindings, and VTEP peers.
// Purpose: Ensure VXLAN diagnostics and skip semantics are exact.
// ============================================================================

//! Unit tests for VXLAN checks.

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

use netcheck_checks::checks::vxlan::VxlanConfigSanity;
use netcheck_checks::checks::vxlan::VxlanConnSettings;
use netcheck_checks::checks::vxlan::VxlanInterface;
use netcheck_checks::checks::vxlan::VxlanVniBinding;
use netcheck_checks::checks::vxlan::VxlanVtep;
use serde_json::Value;
use serde_json::json;

use crate::common::expect_failure;
use crate::common::expect_skipped;
use crate::common::expect_success;
use crate::common::run_json;

/// Binding tables for the VNI binding tests.
fn vni_output(vni_bindings: Value, vrf_bindings: Value) -> Value {
    json!({
        "vxlanIntfs": {
            "Vxlan1": {
                "vniBindings": vni_bindings,
                "vniBindingsToVrf": vrf_bindings,
            },
        }
    })
}

/// An up/up Vxlan1 interface passes.
#[test]
fn interface_up() {
    let output = json!({
        "interfaceDescriptions": {"Vxlan1": {"lineProtocolStatus": "up", "interfaceStatus": "up"}}
    });
    expect_success(&run_json(&VxlanInterface::new(), output));
}

/// A device without Vxlan1 skips.
#[test]
fn interface_skipped_when_absent() {
    let output = json!({
        "interfaceDescriptions": {"Loopback0": {"lineProtocolStatus": "up", "interfaceStatus": "up"}}
    });
    expect_skipped(&run_json(&VxlanInterface::new(), output), "Interface: Vxlan1 - Not configured");
}

/// Degraded states report both columns.
#[test]
fn interface_down() {
    let output = json!({
        "interfaceDescriptions": {"Vxlan1": {"lineProtocolStatus": "down", "interfaceStatus": "up"}}
    });
    expect_failure(
        &run_json(&VxlanInterface::new(), output),
        &["Interface: Vxlan1 - Incorrect Line protocol status/Status - Expected: up/up Actual: down/up"],
    );
}

/// Passing config-sanity categories succeed.
#[test]
fn config_sanity_success() {
    let output = json!({
        "categories": {
            "localVtep": {"description": "Local VTEP Configuration Check", "allCheckPass": true, "hasWarning": false, "items": []},
            "remoteVtep": {"description": "Remote VTEP Configuration Check", "allCheckPass": true, "hasWarning": false, "items": []},
        },
        "warnings": [],
    });
    expect_success(&run_json(&VxlanConfigSanity::new(), output));
}

/// A failing category is reported by name.
#[test]
fn config_sanity_failing_category() {
    let output = json!({
        "categories": {
            "localVtep": {"description": "Local VTEP Configuration Check", "allCheckPass": false, "hasWarning": true, "items": []},
            "remoteVtep": {"description": "Remote VTEP Configuration Check", "allCheckPass": true, "hasWarning": false, "items": []},
        },
        "warnings": ["Your configuration contains warnings."],
    });
    expect_failure(
        &run_json(&VxlanConfigSanity::new(), output),
        &["Vxlan Category: localVtep - Config sanity check is not passing"],
    );
}

/// An unconfigured VXLAN data plane skips.
#[test]
fn config_sanity_skipped_when_unconfigured() {
    expect_skipped(
        &run_json(&VxlanConfigSanity::new(), json!({"categories": {}})),
        "VXLAN is not configured",
    );
}

/// VLAN and VRF bindings matching the declaration pass.
#[test]
fn vni_binding_success() {
    let output = vni_output(
        json!({"10020": {"vlan": 20, "dynamicVlan": false, "source": "static"}}),
        json!({
            "500": {"vrfName": "TEST", "vlan": 1199, "source": "evpn"},
            "600": {"vrfName": "PROD", "vlan": 1198, "source": "evpn"},
        }),
    );
    let check: VxlanVniBinding = serde_json::from_value(json!({
        "bindings": {"10020": 20, "500": 1199, "600": "PROD"}
    }))
    .unwrap();
    expect_success(&run_json(&check, output));
}

/// Bindings are reported missing or mismatched per VNI, in numeric order.
#[test]
fn vni_binding_missing_and_wrong() {
    let output = vni_output(
        json!({"10020": {"vlan": 30, "dynamicVlan": false, "source": "static"}}),
        json!({"500": {"vrfName": "PROD", "vlan": 1199, "source": "evpn"}}),
    );
    let check: VxlanVniBinding = serde_json::from_value(json!({
        "bindings": {"10010": 10, "10020": 20, "500": 1199}
    }))
    .unwrap();
    expect_failure(
        &run_json(&check, output),
        &[
            "Interface: Vxlan1 VNI: 10010 - Binding not found",
            "Interface: Vxlan1 VNI: 10020 - Wrong VLAN binding - Expected: 20 Actual: 30",
        ],
    );
}

/// A VRF expectation never matches a VLAN-only binding.
#[test]
fn vni_binding_vrf_expectation_against_vlan_binding() {
    let output = vni_output(
        json!({"10020": {"vlan": 30, "dynamicVlan": false, "source": "static"}}),
        json!({"500": {"vrfName": "PROD", "vlan": 1199, "source": "evpn"}}),
    );
    let check: VxlanVniBinding = serde_json::from_value(json!({
        "bindings": {"10020": "PROD", "500": 30}
    }))
    .unwrap();
    expect_failure(
        &run_json(&check, output),
        &[
            "Interface: Vxlan1 VNI: 500 - Wrong VLAN binding - Expected: 30 Actual: 1199",
            "Interface: Vxlan1 VNI: 10020 - Binding not found",
        ],
    );
}

/// A wrong VRF binding names both VRFs.
#[test]
fn vni_binding_wrong_vrf() {
    let output = vni_output(
        json!({}),
        json!({"600": {"vrfName": "TEST", "vlan": 1199, "source": "evpn"}}),
    );
    let check: VxlanVniBinding =
        serde_json::from_value(json!({"bindings": {"600": "PROD"}})).unwrap();
    expect_failure(
        &run_json(&check, output),
        &["Interface: Vxlan1 VNI: 600 - Wrong VRF binding - Expected: PROD Actual: TEST"],
    );
}

/// A device without Vxlan1 skips binding checks.
#[test]
fn vni_binding_skipped_when_absent() {
    let check: VxlanVniBinding =
        serde_json::from_value(json!({"bindings": {"10020": 20}})).unwrap();
    expect_skipped(
        &run_json(&check, json!({"vxlanIntfs": {}})),
        "Interface: Vxlan1 - Not configured",
    );
}

/// A VTEP list equal to the expectation passes.
#[test]
fn vtep_success() {
    let output = json!({"vteps": {}, "interfaces": {"Vxlan1": {"vteps": ["10.1.1.5", "10.1.1.6"]}}});
    let check: VxlanVtep =
        serde_json::from_value(json!({"vteps": ["10.1.1.5", "10.1.1.6"]})).unwrap();
    expect_success(&run_json(&check, output));
}

/// Missing and unexpected peers are reported separately.
#[test]
fn vtep_missing_and_unexpected() {
    let output = json!({"vteps": {}, "interfaces": {"Vxlan1": {"vteps": ["10.1.1.6", "10.1.1.7", "10.1.1.8"]}}});
    let check: VxlanVtep =
        serde_json::from_value(json!({"vteps": ["10.1.1.5", "10.1.1.6"]})).unwrap();
    expect_failure(
        &run_json(&check, output),
        &[
            "The following VTEP peer(s) are missing from the Vxlan1 interface: 10.1.1.5",
            "Unexpected VTEP peer(s) on Vxlan1 interface: 10.1.1.7, 10.1.1.8",
        ],
    );
}

/// An empty expectation asserts no peers exist.
#[test]
fn vtep_none_expected() {
    let output = json!({"vteps": {}, "interfaces": {"Vxlan1": {"vteps": ["10.1.1.5"]}}});
    let check: VxlanVtep = serde_json::from_value(json!({"vteps": []})).unwrap();
    expect_failure(
        &run_json(&check, output),
        &["Unexpected VTEP peer(s) on Vxlan1 interface: 10.1.1.5"],
    );
}

/// Matching source interface and UDP port pass; short names canonicalize.
#[test]
fn conn_settings_success() {
    let output = json!({"interfaces": {"Vxlan1": {"srcIpIntf": "Loopback1", "udpPort": 4789}}});
    let check: VxlanConnSettings =
        serde_json::from_value(json!({"source_interface": "lo1", "udp_port": 4789})).unwrap();
    expect_success(&run_json(&check, output));
}

/// Wrong interface and port are reported per setting.
#[test]
fn conn_settings_mismatch() {
    let output = json!({"interfaces": {"Vxlan1": {"srcIpIntf": "Loopback10", "udpPort": 4789}}});
    let check: VxlanConnSettings =
        serde_json::from_value(json!({"source_interface": "Lo1", "udp_port": 4780})).unwrap();
    expect_failure(
        &run_json(&check, output),
        &[
            "Interface: Vxlan1 - Incorrect Source interface - Expected: Loopback1 Actual: Loopback10",
            "Interface: Vxlan1 - Incorrect UDP port - Expected: 4780 Actual: 4789",
        ],
    );
}

/// A device without Vxlan1 skips connection-settings checks.
#[test]
fn conn_settings_skipped_when_absent() {
    let check: VxlanConnSettings =
        serde_json::from_value(json!({"source_interface": "Loopback1", "udp_port": 4789}))
            .unwrap();
    expect_skipped(
        &run_json(&check, json!({"interfaces": {}})),
        "Interface: Vxlan1 - Not configured",
    );
}
