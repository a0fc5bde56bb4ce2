// crates/netcheck-checks/tests/connectivity_unit.rs
// ============================================================================
// Module: Connectivity Check Unit Tests
// Description: Tests for reachability probes and LLDP validation.
// Purpose: Ensure rendered commands and diagnostics are exact.
// ============================================================================

//! Unit tests for connectivity checks.

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

use netcheck_checks::checks::connectivity::LldpNeighbors;
use netcheck_checks::checks::connectivity::Reachability;
use netcheck_core::CommandOutput;
use netcheck_core::StateCheck;
use serde_json::Value;
use serde_json::json;

use crate::common::expect_failure;
use crate::common::expect_success;
use crate::common::run;
use crate::common::run_json;

/// Builds a reachability check from raw configuration.
fn reachability_from(hosts: Value) -> Reachability {
    serde_json::from_value(json!({"hosts": hosts})).unwrap()
}

/// Wraps a probe summary into the command output shape.
fn ping_output(message: &str) -> CommandOutput {
    CommandOutput::Json(json!({"messages": [message]}))
}

/// One command is rendered per host with source, size, and df-bit.
#[test]
fn reachability_renders_commands() {
    let check = reachability_from(json!([
        {"source": "Management0", "destination": "1.1.1.1", "vrf": "MGMT", "df_bit": true, "size": 100},
        {"destination": "8.8.8.8", "vrf": "default"},
    ]));
    let commands = check.commands();
    assert_eq!(commands.len(), 2);
    assert_eq!(
        commands[0].command,
        "ping vrf MGMT 1.1.1.1 source Management0 size 100 df-bit repeat 2"
    );
    assert_eq!(commands[1].command, "ping vrf default 8.8.8.8 size 100 repeat 2");
}

/// Full probe returns pass for reachable hosts.
#[test]
fn reachability_success() {
    let check = reachability_from(json!([
        {"destination": "10.0.0.1", "vrf": "default", "repeat": 2},
    ]));
    let outputs = vec![ping_output(
        "PING 10.0.0.1 (10.0.0.1) 72(100) bytes of data.\n\
         --- 10.0.0.1 ping statistics ---\n\
         2 packets transmitted, 2 received, 0% packet loss, time 10ms",
    )];
    expect_success(&run(&check, outputs));
}

/// Packet loss fails with transmitted and received counts.
#[test]
fn reachability_packet_loss() {
    let check = reachability_from(json!([
        {"destination": "10.0.0.1", "vrf": "default", "repeat": 2},
    ]));
    let outputs = vec![ping_output(
        "PING 10.0.0.1 (10.0.0.1) 72(100) bytes of data.\n\
         --- 10.0.0.1 ping statistics ---\n\
         2 packets transmitted, 1 received, 50% packet loss, time 10ms",
    )];
    expect_failure(
        &run(&check, outputs),
        &["Host: 10.0.0.1 VRF: default - Packet loss detected - Transmitted: 2 Received: 1"],
    );
}

/// An unreachable network fails hosts expected to answer.
#[test]
fn reachability_network_unreachable() {
    let check = reachability_from(json!([
        {"destination": "10.0.0.1", "vrf": "default"},
    ]));
    let outputs = vec![ping_output("connect: Network is unreachable")];
    expect_failure(&run(&check, outputs), &["Host: 10.0.0.1 VRF: default - Unreachable"]);
}

/// Hosts declared unreachable pass when nothing answers.
#[test]
fn reachability_expected_unreachable() {
    let check = reachability_from(json!([
        {"destination": "10.0.0.1", "vrf": "default", "reachable": false},
    ]));
    let outputs = vec![ping_output(
        "PING 10.0.0.1 (10.0.0.1) 72(100) bytes of data.\n\
         --- 10.0.0.1 ping statistics ---\n\
         2 packets transmitted, 0 received, 100% packet loss, time 10ms",
    )];
    expect_success(&run(&check, outputs));
}

/// Hosts declared unreachable fail when the destination answers.
#[test]
fn reachability_unexpectedly_reachable() {
    let check = reachability_from(json!([
        {"destination": "10.0.0.1", "vrf": "default", "reachable": false},
    ]));
    let outputs = vec![ping_output(
        "PING 10.0.0.1 (10.0.0.1) 72(100) bytes of data.\n\
         --- 10.0.0.1 ping statistics ---\n\
         2 packets transmitted, 2 received, 0% packet loss, time 10ms",
    )];
    expect_failure(
        &run(&check, outputs),
        &["Host: 10.0.0.1 VRF: default - Destination is expected to be unreachable but found reachable"],
    );
}

/// Expected neighbors on every port pass.
#[test]
fn lldp_success() {
    let check: LldpNeighbors = serde_json::from_value(json!({
        "neighbors": [
            {"port": "Ethernet1", "neighbor_device": "DC1-SPINE1", "neighbor_port": "Ethernet1"},
            {"port": "Ethernet2", "neighbor_device": "DC1-SPINE2", "neighbor_port": "Ethernet1"},
        ]
    }))
    .unwrap();
    let output = json!({
        "lldpNeighbors": {
            "Ethernet1": {"lldpNeighborInfo": [
                {"systemName": "DC1-SPINE1", "neighborInterfaceInfo": {"interfaceId_v2": "Ethernet1"}},
            ]},
            "Ethernet2": {"lldpNeighborInfo": [
                {"systemName": "DC1-SPINE2", "neighborInterfaceInfo": {"interfaceId_v2": "Ethernet1"}},
            ]},
        }
    });
    expect_success(&run_json(&check, output));
}

/// Missing ports, empty tables, and wrong neighbors are distinct.
#[test]
fn lldp_failures() {
    let check: LldpNeighbors = serde_json::from_value(json!({
        "neighbors": [
            {"port": "Ethernet1", "neighbor_device": "DC1-SPINE1", "neighbor_port": "Ethernet1"},
            {"port": "Ethernet2", "neighbor_device": "DC1-SPINE2", "neighbor_port": "Ethernet1"},
            {"port": "Ethernet3", "neighbor_device": "DC1-SPINE3", "neighbor_port": "Ethernet1"},
        ]
    }))
    .unwrap();
    let output = json!({
        "lldpNeighbors": {
            "Ethernet2": {"lldpNeighborInfo": []},
            "Ethernet3": {"lldpNeighborInfo": [
                {"systemName": "DC1-LEAF9", "neighborInterfaceInfo": {"interfaceId_v2": "Ethernet7"}},
            ]},
        }
    });
    expect_failure(
        &run_json(&check, output),
        &[
            "Port: Ethernet1 Neighbor: DC1-SPINE1 Neighbor Port: Ethernet1 - Port not found",
            "Port: Ethernet2 Neighbor: DC1-SPINE2 Neighbor Port: Ethernet1 - No LLDP neighbors",
            "Port: Ethernet3 Neighbor: DC1-SPINE3 Neighbor Port: Ethernet1 - \
             Wrong LLDP neighbors: DC1-LEAF9/Ethernet7",
        ],
    );
}
