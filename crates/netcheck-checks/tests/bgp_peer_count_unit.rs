// crates/netcheck-checks/tests/bgp_peer_count_unit.rs
// ============================================================================
// Module: BGP Peer Count Unit Tests
// Description: Tests for per-address-family peer counting.
// Purpose: Ensure counts, VRF scoping, and state filtering are correct.
// ============================================================================

//! Unit tests for the BGP peer-count check.

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

use netcheck_checks::checks::bgp::BgpPeerCount;
use serde_json::Value;
use serde_json::json;

use crate::common::expect_failure;
use crate::common::expect_success;
use crate::common::run_json;

/// Summary view with established sessions across two VRFs.
fn established_summary() -> Value {
    json!({
        "vrfs": {
            "default": {
                "vrf": "default",
                "routerId": "10.1.0.3",
                "asn": "65120",
                "peers": {
                    "10.1.0.1": {
                        "peerState": "Established",
                        "peerAsn": "65100",
                        "ipv4MplsVpn": {"afiSafiState": "advertised", "nlrisReceived": 0, "nlrisAccepted": 0},
                        "l2VpnEvpn": {"afiSafiState": "negotiated", "nlrisReceived": 42, "nlrisAccepted": 42},
                    },
                    "10.1.0.2": {
                        "peerState": "Established",
                        "peerAsn": "65100",
                        "ipv4MplsVpn": {"afiSafiState": "advertised", "nlrisReceived": 0, "nlrisAccepted": 0},
                        "l2VpnEvpn": {"afiSafiState": "negotiated", "nlrisReceived": 42, "nlrisAccepted": 42},
                    },
                    "10.1.254.1": {
                        "peerState": "Established",
                        "peerAsn": "65120",
                        "ipv4Unicast": {"afiSafiState": "negotiated", "nlrisReceived": 17, "nlrisAccepted": 17},
                    },
                    "10.1.255.0": {
                        "peerState": "Established",
                        "peerAsn": "65100",
                        "ipv4Unicast": {"afiSafiState": "negotiated", "nlrisReceived": 14, "nlrisAccepted": 14},
                    },
                    "10.1.255.2": {
                        "peerState": "Established",
                        "peerAsn": "65100",
                        "ipv4Unicast": {"afiSafiState": "negotiated", "nlrisReceived": 14, "nlrisAccepted": 14},
                    },
                },
            },
            "DEV": {
                "vrf": "DEV",
                "routerId": "10.1.0.3",
                "asn": "65120",
                "peers": {
                    "10.1.254.1": {
                        "peerState": "Established",
                        "peerAsn": "65120",
                        "ipv4Unicast": {"afiSafiState": "negotiated", "nlrisReceived": 4, "nlrisAccepted": 4},
                    },
                },
            },
        }
    })
}

/// Builds the check from raw configuration.
fn check_from(families: Value) -> BgpPeerCount {
    serde_json::from_value(json!({"address_families": families})).unwrap()
}

/// Idle peers still count when session state is not checked.
#[test]
fn peer_count_ignores_state_by_default() {
    let output = json!({
        "vrfs": {
            "default": {
                "vrf": "default",
                "routerId": "10.1.0.3",
                "asn": "65120",
                "peers": {
                    "10.1.0.1": {
                        "peerState": "Idle",
                        "peerAsn": "65100",
                        "ipv4Unicast": {"afiSafiState": "advertised", "nlrisReceived": 0, "nlrisAccepted": 0},
                        "l2VpnEvpn": {"afiSafiState": "negotiated", "nlrisReceived": 42, "nlrisAccepted": 42},
                    },
                    "10.1.0.2": {
                        "peerState": "Idle",
                        "peerAsn": "65100",
                        "ipv4Unicast": {"afiSafiState": "advertised", "nlrisReceived": 0, "nlrisAccepted": 0},
                        "l2VpnEvpn": {"afiSafiState": "negotiated", "nlrisReceived": 42, "nlrisAccepted": 42},
                    },
                },
            },
            "DEV": {
                "vrf": "DEV",
                "routerId": "10.1.0.3",
                "asn": "65120",
                "peers": {
                    "10.1.254.1": {
                        "peerState": "Idle",
                        "peerAsn": "65120",
                        "ipv4Unicast": {"afiSafiState": "negotiated", "nlrisReceived": 4, "nlrisAccepted": 4},
                    },
                },
            },
        }
    });
    let check = check_from(json!([
        {"afi": "evpn", "num_peers": 2},
        {"afi": "ipv4", "safi": "unicast", "vrf": "default", "num_peers": 2},
        {"afi": "ipv4", "safi": "unicast", "vrf": "DEV", "num_peers": 1},
    ]));
    expect_success(&run_json(&check, output));
}

/// State filtering requires established sessions and negotiated families.
#[test]
fn peer_count_with_state_check() {
    let check = check_from(json!([
        {"afi": "evpn", "num_peers": 2, "check_peer_state": true},
        {"afi": "ipv4", "safi": "unicast", "vrf": "default", "num_peers": 3, "check_peer_state": true},
        {"afi": "ipv4", "safi": "unicast", "vrf": "DEV", "num_peers": 1, "check_peer_state": true},
    ]));
    expect_success(&run_json(&check, established_summary()));
}

/// A family scoped to an unconfigured VRF fails.
#[test]
fn peer_count_vrf_not_configured() {
    let check = check_from(json!([
        {"afi": "evpn", "num_peers": 2, "check_peer_state": true},
        {"afi": "ipv4", "safi": "unicast", "vrf": "default", "num_peers": 3, "check_peer_state": true},
        {"afi": "ipv4", "safi": "unicast", "vrf": "PROD", "num_peers": 2, "check_peer_state": true},
    ]));
    expect_failure(
        &run_json(&check, established_summary()),
        &["AFI: ipv4 SAFI: unicast VRF: PROD - VRF not configured"],
    );
}

/// Count mismatches identify the family and both counts.
#[test]
fn peer_count_mismatch() {
    let check = check_from(json!([
        {"afi": "evpn", "num_peers": 3},
        {"afi": "vpn-ipv4", "num_peers": 2},
        {"afi": "ipv4", "safi": "unicast", "vrf": "DEV", "num_peers": 2},
    ]));
    expect_failure(
        &run_json(&check, established_summary()),
        &[
            "AFI: evpn - Peer count mismatch - Expected: 3 Actual: 2",
            "AFI: ipv4 SAFI: unicast VRF: DEV - Peer count mismatch - Expected: 2 Actual: 1",
        ],
    );
}

/// Advertised-only family state does not count under state checking.
#[test]
fn peer_count_state_check_excludes_advertised() {
    let check = check_from(json!([
        {"afi": "vpn-ipv4", "num_peers": 2, "check_peer_state": true},
    ]));
    expect_failure(
        &run_json(&check, established_summary()),
        &["AFI: vpn-ipv4 - Peer count mismatch - Expected: 2 Actual: 0"],
    );
}
