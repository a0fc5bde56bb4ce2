// crates/netcheck-checks/src/checks/bgp.rs
// ============================================================================
// Module: BGP Checks
// Description: Peer counts, session health, and per-peer configuration.
// Purpose: Validate BGP state against address-family and peer descriptors.
// Dependencies: crate::checks, crate::inputs::bgp, netcheck-core
// ============================================================================

//! ## Overview
//! Two output shapes back the BGP checks: the summary view
//! (`show bgp summary vrf all`, per-VRF peer maps keyed by address) and the
//! neighbor view (`show bgp neighbors vrf all`, per-VRF `peerList` arrays).
//! Peers may be identified by session address or, for unnumbered sessions,
//! by interface name.

// ============================================================================
// SECTION: Imports
// ============================================================================

use netcheck_core::CheckResult;
use netcheck_core::CommandOutput;
use netcheck_core::ShowCommand;
use netcheck_core::StateCheck;
use serde::Deserialize;
use serde_json::Value;

use crate::checks::bool_label;
use crate::checks::require_json;
use crate::inputs::InputError;
use crate::inputs::bgp::BgpAddressFamily;
use crate::inputs::bgp::BgpPeer;
use crate::inputs::bgp::PeerRef;

// ============================================================================
// SECTION: Constants
// ============================================================================

/// Session state a healthy peer reports.
const ESTABLISHED: &str = "Established";

// ============================================================================
// SECTION: Shared Lookup
// ============================================================================

/// Finds a peer entry in the neighbor view of a VRF.
fn find_peer<'a>(root: &'a Value, peer: &BgpPeer) -> Option<&'a Value> {
    let list = root.get("vrfs")?.get(&peer.vrf)?.get("peerList")?.as_array()?;
    list.iter().find(|entry| match &peer.peer {
        PeerRef::Address(address) => {
            entry.get("peerAddress").and_then(Value::as_str) == Some(address)
        }
        PeerRef::Interface(interface) => {
            entry.get("ifName").and_then(Value::as_str) == Some(interface)
        }
    })
}

/// Renders a numeric field, labeling absent values.
fn numeric_or_not_found(entry: &Value, key: &str) -> String {
    entry
        .get(key)
        .and_then(Value::as_u64)
        .map_or_else(|| "Not Found".to_string(), |value| value.to_string())
}

// ============================================================================
// SECTION: Peer Count
// ============================================================================

/// Raw input for the peer-count check.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
struct BgpPeerCountInput {
    /// Address families with expected peer counts.
    address_families: Vec<BgpAddressFamily>,
}

/// Verifies the peer count per address family and VRF.
#[derive(Debug, Clone, Deserialize)]
#[serde(try_from = "BgpPeerCountInput")]
pub struct BgpPeerCount {
    /// Address families with expected peer counts.
    address_families: Vec<BgpAddressFamily>,
}

impl BgpPeerCount {
    /// Creates the check after validating every family carries a count.
    ///
    /// # Errors
    ///
    /// Returns [`InputError`] when the list is empty or a family has no
    /// `num_peers`.
    pub fn new(address_families: Vec<BgpAddressFamily>) -> Result<Self, InputError> {
        if address_families.is_empty() {
            return Err(InputError::EmptyList("address_families"));
        }
        if address_families.iter().any(|family| family.num_peers.is_none()) {
            return Err(InputError::MissingField("num_peers"));
        }
        Ok(Self {
            address_families,
        })
    }
}

impl TryFrom<BgpPeerCountInput> for BgpPeerCount {
    type Error = InputError;

    fn try_from(input: BgpPeerCountInput) -> Result<Self, Self::Error> {
        Self::new(input.address_families)
    }
}

impl StateCheck for BgpPeerCount {
    fn name(&self) -> &'static str {
        "bgp_peer_count"
    }

    fn categories(&self) -> &'static [&'static str] {
        &["bgp"]
    }

    fn commands(&self) -> Vec<ShowCommand> {
        vec![ShowCommand::json_revision("show bgp summary vrf all", 1)]
    }

    fn verify(&self, outputs: &[CommandOutput], result: &mut CheckResult) {
        result.mark_success();
        let Some(root) = require_json(outputs, 0, result) else {
            return;
        };

        for family in &self.address_families {
            let Some(expected) = family.num_peers else {
                continue;
            };
            let Some(vrf_data) = root.get("vrfs").and_then(|vrfs| vrfs.get(&family.vrf))
            else {
                result.mark_failure(format!("{family} - VRF not configured"));
                continue;
            };
            let Some(peers) = vrf_data.get("peers").and_then(Value::as_object) else {
                result.mark_error(format!("{family} - Invalid output: 'peers' not found"));
                continue;
            };

            let count = peers
                .values()
                .filter(|peer| family_active(peer, family.eos_key(), family.check_peer_state))
                .count();
            let count = u64::try_from(count).unwrap_or(u64::MAX);
            if count != expected.get() {
                result.mark_failure(format!(
                    "{family} - Peer count mismatch - Expected: {expected} Actual: {count}"
                ));
            }
        }
    }
}

/// Decides whether a summary peer counts toward an address family.
fn family_active(peer: &Value, eos_key: &str, check_peer_state: bool) -> bool {
    let Some(family_data) = peer.get(eos_key) else {
        return false;
    };
    if !check_peer_state {
        return true;
    }
    peer.get("peerState").and_then(Value::as_str) == Some(ESTABLISHED)
        && family_data.get("afiSafiState").and_then(Value::as_str) == Some("negotiated")
}

// ============================================================================
// SECTION: Peer Session
// ============================================================================

/// Raw input for the peer-session check.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
struct BgpPeerSessionInput {
    /// Peers whose sessions are verified.
    bgp_peers: Vec<BgpPeer>,
    /// Require empty TCP message queues.
    #[serde(default = "default_true")]
    check_tcp_queues: bool,
    /// Minimum session duration in seconds.
    minimum_established_time: Option<u64>,
}

/// Verifies session establishment, queue drain, and session age per peer.
#[derive(Debug, Clone, Deserialize)]
#[serde(try_from = "BgpPeerSessionInput")]
pub struct BgpPeerSession {
    /// Peers whose sessions are verified.
    peers: Vec<BgpPeer>,
    /// Require empty TCP message queues.
    check_tcp_queues: bool,
    /// Minimum session duration in seconds.
    minimum_established_time: Option<u64>,
}

impl BgpPeerSession {
    /// Creates the check.
    ///
    /// # Errors
    ///
    /// Returns [`InputError`] when the peer list is empty.
    pub fn new(
        peers: Vec<BgpPeer>,
        check_tcp_queues: bool,
        minimum_established_time: Option<u64>,
    ) -> Result<Self, InputError> {
        if peers.is_empty() {
            return Err(InputError::EmptyList("bgp_peers"));
        }
        Ok(Self {
            peers,
            check_tcp_queues,
            minimum_established_time,
        })
    }
}

impl TryFrom<BgpPeerSessionInput> for BgpPeerSession {
    type Error = InputError;

    fn try_from(input: BgpPeerSessionInput) -> Result<Self, Self::Error> {
        Self::new(input.bgp_peers, input.check_tcp_queues, input.minimum_established_time)
    }
}

impl StateCheck for BgpPeerSession {
    fn name(&self) -> &'static str {
        "bgp_peer_session"
    }

    fn categories(&self) -> &'static [&'static str] {
        &["bgp"]
    }

    fn commands(&self) -> Vec<ShowCommand> {
        vec![ShowCommand::json_revision("show bgp neighbors vrf all", 3)]
    }

    fn verify(&self, outputs: &[CommandOutput], result: &mut CheckResult) {
        result.mark_success();
        let Some(root) = require_json(outputs, 0, result) else {
            return;
        };

        for peer in &self.peers {
            let Some(entry) = find_peer(root, peer) else {
                result.mark_failure(format!("{peer} - Not found"));
                continue;
            };

            let state = entry.get("state").and_then(Value::as_str).unwrap_or_default();
            if state != ESTABLISHED {
                result.mark_failure(format!(
                    "{peer} - Incorrect session state - Expected: {ESTABLISHED} Actual: {state}"
                ));
                continue;
            }

            if self.check_tcp_queues {
                let in_queue =
                    entry.get("peerTcpInfo").and_then(|info| info.get("inputQueueLength"));
                let out_queue =
                    entry.get("peerTcpInfo").and_then(|info| info.get("outputQueueLength"));
                let in_queue = in_queue.and_then(Value::as_u64).unwrap_or_default();
                let out_queue = out_queue.and_then(Value::as_u64).unwrap_or_default();
                if in_queue != 0 || out_queue != 0 {
                    result.mark_failure(format!(
                        "{peer} - Session has non-empty message queues - InQ: {in_queue} OutQ: {out_queue}"
                    ));
                }
            }

            if let Some(minimum) = self.minimum_established_time {
                let established =
                    entry.get("establishedTime").and_then(Value::as_u64).unwrap_or_default();
                if established < minimum {
                    result.mark_failure(format!(
                        "{peer} - BGP session not established for the minimum required duration - \
                         Expected: {minimum}s Actual: {established}s"
                    ));
                }
            }
        }
    }
}

// ============================================================================
// SECTION: Peer Capabilities
// ============================================================================

/// Raw input for the capability check.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
struct BgpPeerCapabilitiesInput {
    /// Peers with expected multiprotocol capabilities.
    bgp_peers: Vec<BgpPeer>,
}

/// Verifies multiprotocol capability negotiation per peer.
#[derive(Debug, Clone, Deserialize)]
#[serde(try_from = "BgpPeerCapabilitiesInput")]
pub struct BgpPeerCapabilities {
    /// Peers with expected multiprotocol capabilities.
    peers: Vec<BgpPeer>,
}

impl BgpPeerCapabilities {
    /// Creates the check after validating every peer declares capabilities.
    ///
    /// # Errors
    ///
    /// Returns [`InputError`] when the list is empty or a peer has no
    /// `capabilities`.
    pub fn new(peers: Vec<BgpPeer>) -> Result<Self, InputError> {
        if peers.is_empty() {
            return Err(InputError::EmptyList("bgp_peers"));
        }
        if peers.iter().any(|peer| peer.capabilities.is_none()) {
            return Err(InputError::MissingField("capabilities"));
        }
        Ok(Self {
            peers,
        })
    }
}

impl TryFrom<BgpPeerCapabilitiesInput> for BgpPeerCapabilities {
    type Error = InputError;

    fn try_from(input: BgpPeerCapabilitiesInput) -> Result<Self, Self::Error> {
        Self::new(input.bgp_peers)
    }
}

impl StateCheck for BgpPeerCapabilities {
    fn name(&self) -> &'static str {
        "bgp_peer_capabilities"
    }

    fn categories(&self) -> &'static [&'static str] {
        &["bgp"]
    }

    fn commands(&self) -> Vec<ShowCommand> {
        vec![ShowCommand::json_revision("show bgp neighbors vrf all", 3)]
    }

    fn verify(&self, outputs: &[CommandOutput], result: &mut CheckResult) {
        result.mark_success();
        let Some(root) = require_json(outputs, 0, result) else {
            return;
        };

        for peer in &self.peers {
            let Some(expected) = peer.capabilities.as_deref() else {
                continue;
            };
            let Some(entry) = find_peer(root, peer) else {
                result.mark_failure(format!("{peer} - Not found"));
                continue;
            };
            let caps = entry
                .get("neighborCapabilities")
                .and_then(|caps| caps.get("multiprotocolCaps"))
                .and_then(Value::as_object);
            let Some(caps) = caps else {
                result.mark_failure(format!("{peer} - Multiprotocol capabilities not found"));
                continue;
            };

            if peer.strict {
                let actual: Vec<&str> = caps.keys().map(String::as_str).collect();
                let matches = expected.len() == actual.len()
                    && expected.iter().all(|cap| actual.contains(&cap.as_str()));
                if !matches {
                    result.mark_failure(format!(
                        "{peer} - Mismatch - Expected: {} Actual: {}",
                        expected.join(", "),
                        actual.join(", ")
                    ));
                    continue;
                }
            }

            for capability in expected {
                let Some(capability_data) = caps.get(capability) else {
                    result.mark_failure(format!("{peer} - {capability} not found"));
                    continue;
                };
                let advertised =
                    capability_data.get("advertised").and_then(Value::as_bool).unwrap_or_default();
                let received =
                    capability_data.get("received").and_then(Value::as_bool).unwrap_or_default();
                let enabled =
                    capability_data.get("enabled").and_then(Value::as_bool).unwrap_or_default();
                if !(advertised && received && enabled) {
                    result.mark_failure(format!(
                        "{peer} - {capability} not negotiated - Advertised: {}, Received: {}, Enabled: {}",
                        bool_label(advertised),
                        bool_label(received),
                        bool_label(enabled)
                    ));
                }
            }
        }
    }
}

// ============================================================================
// SECTION: Peer Timers
// ============================================================================

/// Raw input for the timer check.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
struct BgpPeerTimersInput {
    /// Peers with expected hold and keepalive timers.
    bgp_peers: Vec<BgpPeer>,
}

/// Verifies negotiated hold and keepalive timers per peer.
#[derive(Debug, Clone, Deserialize)]
#[serde(try_from = "BgpPeerTimersInput")]
pub struct BgpPeerTimers {
    /// Peers with expected hold and keepalive timers.
    peers: Vec<BgpPeer>,
}

impl BgpPeerTimers {
    /// Creates the check after validating every peer declares both timers.
    ///
    /// # Errors
    ///
    /// Returns [`InputError`] when the list is empty or a peer omits
    /// `hold_time` or `keep_alive_time`.
    pub fn new(peers: Vec<BgpPeer>) -> Result<Self, InputError> {
        if peers.is_empty() {
            return Err(InputError::EmptyList("bgp_peers"));
        }
        if peers.iter().any(|peer| peer.hold_time.is_none()) {
            return Err(InputError::MissingField("hold_time"));
        }
        if peers.iter().any(|peer| peer.keep_alive_time.is_none()) {
            return Err(InputError::MissingField("keep_alive_time"));
        }
        Ok(Self {
            peers,
        })
    }
}

impl TryFrom<BgpPeerTimersInput> for BgpPeerTimers {
    type Error = InputError;

    fn try_from(input: BgpPeerTimersInput) -> Result<Self, Self::Error> {
        Self::new(input.bgp_peers)
    }
}

impl StateCheck for BgpPeerTimers {
    fn name(&self) -> &'static str {
        "bgp_peer_timers"
    }

    fn categories(&self) -> &'static [&'static str] {
        &["bgp"]
    }

    fn commands(&self) -> Vec<ShowCommand> {
        vec![ShowCommand::json_revision("show bgp neighbors vrf all", 3)]
    }

    fn verify(&self, outputs: &[CommandOutput], result: &mut CheckResult) {
        result.mark_success();
        let Some(root) = require_json(outputs, 0, result) else {
            return;
        };

        for peer in &self.peers {
            let (Some(hold_time), Some(keep_alive_time)) =
                (peer.hold_time, peer.keep_alive_time)
            else {
                continue;
            };
            let Some(entry) = find_peer(root, peer) else {
                result.mark_failure(format!("{peer} - Not found"));
                continue;
            };

            if entry.get("holdTime").and_then(Value::as_u64) != Some(hold_time) {
                result.mark_failure(format!(
                    "{peer} - Hold time mismatch - Expected: {hold_time} Actual: {}",
                    numeric_or_not_found(entry, "holdTime")
                ));
            }
            if entry.get("keepaliveTime").and_then(Value::as_u64) != Some(keep_alive_time) {
                result.mark_failure(format!(
                    "{peer} - Keepalive time mismatch - Expected: {keep_alive_time} Actual: {}",
                    numeric_or_not_found(entry, "keepaliveTime")
                ));
            }
        }
    }
}

// ============================================================================
// SECTION: Route Maps
// ============================================================================

/// Raw input for the route-map check.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
struct BgpRouteMapsInput {
    /// Peers with expected route-map bindings.
    bgp_peers: Vec<BgpPeer>,
}

/// Verifies inbound and outbound route-map bindings per peer.
#[derive(Debug, Clone, Deserialize)]
#[serde(try_from = "BgpRouteMapsInput")]
pub struct BgpRouteMaps {
    /// Peers with expected route-map bindings.
    peers: Vec<BgpPeer>,
}

impl BgpRouteMaps {
    /// Creates the check after validating every peer declares a direction.
    ///
    /// # Errors
    ///
    /// Returns [`InputError`] when the list is empty or a peer declares
    /// neither `inbound_route_map` nor `outbound_route_map`.
    pub fn new(peers: Vec<BgpPeer>) -> Result<Self, InputError> {
        if peers.is_empty() {
            return Err(InputError::EmptyList("bgp_peers"));
        }
        if peers
            .iter()
            .any(|peer| peer.inbound_route_map.is_none() && peer.outbound_route_map.is_none())
        {
            return Err(InputError::MissingAlternative {
                first: "inbound_route_map",
                second: "outbound_route_map",
            });
        }
        Ok(Self {
            peers,
        })
    }
}

impl TryFrom<BgpRouteMapsInput> for BgpRouteMaps {
    type Error = InputError;

    fn try_from(input: BgpRouteMapsInput) -> Result<Self, Self::Error> {
        Self::new(input.bgp_peers)
    }
}

impl StateCheck for BgpRouteMaps {
    fn name(&self) -> &'static str {
        "bgp_route_maps"
    }

    fn categories(&self) -> &'static [&'static str] {
        &["bgp"]
    }

    fn commands(&self) -> Vec<ShowCommand> {
        vec![ShowCommand::json_revision("show bgp neighbors vrf all", 3)]
    }

    fn verify(&self, outputs: &[CommandOutput], result: &mut CheckResult) {
        result.mark_success();
        let Some(root) = require_json(outputs, 0, result) else {
            return;
        };

        for peer in &self.peers {
            let Some(entry) = find_peer(root, peer) else {
                result.mark_failure(format!("{peer} - Not found"));
                continue;
            };

            for (expected, key, direction) in [
                (peer.inbound_route_map.as_deref(), "routeMapInbound", "Inbound"),
                (peer.outbound_route_map.as_deref(), "routeMapOutbound", "Outbound"),
            ] {
                let Some(expected) = expected else {
                    continue;
                };
                let actual = entry.get(key).and_then(Value::as_str);
                if actual != Some(expected) {
                    result.mark_failure(format!(
                        "{peer} - {direction} route-map mismatch - Expected: {expected} Actual: {}",
                        actual.unwrap_or("Not Configured")
                    ));
                }
            }
        }
    }
}

// ============================================================================
// SECTION: Route Limit
// ============================================================================

/// Raw input for the route-limit check.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
struct BgpPeerRouteLimitInput {
    /// Peers with expected route limits.
    bgp_peers: Vec<BgpPeer>,
}

/// Verifies the maximum-routes limit and warning limit per peer.
#[derive(Debug, Clone, Deserialize)]
#[serde(try_from = "BgpPeerRouteLimitInput")]
pub struct BgpPeerRouteLimit {
    /// Peers with expected route limits.
    peers: Vec<BgpPeer>,
}

impl BgpPeerRouteLimit {
    /// Creates the check after validating every peer declares a limit.
    ///
    /// # Errors
    ///
    /// Returns [`InputError`] when the list is empty or a peer has no
    /// `maximum_routes`.
    pub fn new(peers: Vec<BgpPeer>) -> Result<Self, InputError> {
        if peers.is_empty() {
            return Err(InputError::EmptyList("bgp_peers"));
        }
        if peers.iter().any(|peer| peer.maximum_routes.is_none()) {
            return Err(InputError::MissingField("maximum_routes"));
        }
        Ok(Self {
            peers,
        })
    }
}

impl TryFrom<BgpPeerRouteLimitInput> for BgpPeerRouteLimit {
    type Error = InputError;

    fn try_from(input: BgpPeerRouteLimitInput) -> Result<Self, Self::Error> {
        Self::new(input.bgp_peers)
    }
}

impl StateCheck for BgpPeerRouteLimit {
    fn name(&self) -> &'static str {
        "bgp_peer_route_limit"
    }

    fn categories(&self) -> &'static [&'static str] {
        &["bgp"]
    }

    fn commands(&self) -> Vec<ShowCommand> {
        vec![ShowCommand::json_revision("show bgp neighbors vrf all", 3)]
    }

    fn verify(&self, outputs: &[CommandOutput], result: &mut CheckResult) {
        result.mark_success();
        let Some(root) = require_json(outputs, 0, result) else {
            return;
        };

        for peer in &self.peers {
            let Some(maximum_routes) = peer.maximum_routes else {
                continue;
            };
            let Some(entry) = find_peer(root, peer) else {
                result.mark_failure(format!("{peer} - Not found"));
                continue;
            };

            let actual_max =
                entry.get("maxTotalRoutes").and_then(Value::as_u64).unwrap_or_default();
            if actual_max != maximum_routes {
                result.mark_failure(format!(
                    "{peer} - Maximum routes mismatch - Expected: {maximum_routes} Actual: {actual_max}"
                ));
            }

            if let Some(warning_limit) = peer.warning_limit {
                let actual_warn =
                    entry.get("totalRoutesWarnLimit").and_then(Value::as_u64).unwrap_or_default();
                if actual_warn != warning_limit {
                    result.mark_failure(format!(
                        "{peer} - Maximum routes warning limit mismatch - \
                         Expected: {warning_limit} Actual: {actual_warn}"
                    ));
                }
            }
        }
    }
}

// ============================================================================
// SECTION: Peer Group
// ============================================================================

/// Raw input for the peer-group check.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
struct BgpPeerGroupInput {
    /// Peers with expected peer-group membership.
    bgp_peers: Vec<BgpPeer>,
}

/// Verifies peer-group membership per peer.
#[derive(Debug, Clone, Deserialize)]
#[serde(try_from = "BgpPeerGroupInput")]
pub struct BgpPeerGroup {
    /// Peers with expected peer-group membership.
    peers: Vec<BgpPeer>,
}

impl BgpPeerGroup {
    /// Creates the check after validating every peer names a group.
    ///
    /// # Errors
    ///
    /// Returns [`InputError`] when the list is empty or a peer has no
    /// `peer_group`.
    pub fn new(peers: Vec<BgpPeer>) -> Result<Self, InputError> {
        if peers.is_empty() {
            return Err(InputError::EmptyList("bgp_peers"));
        }
        if peers.iter().any(|peer| peer.peer_group.is_none()) {
            return Err(InputError::MissingField("peer_group"));
        }
        Ok(Self {
            peers,
        })
    }
}

impl TryFrom<BgpPeerGroupInput> for BgpPeerGroup {
    type Error = InputError;

    fn try_from(input: BgpPeerGroupInput) -> Result<Self, Self::Error> {
        Self::new(input.bgp_peers)
    }
}

impl StateCheck for BgpPeerGroup {
    fn name(&self) -> &'static str {
        "bgp_peer_group"
    }

    fn categories(&self) -> &'static [&'static str] {
        &["bgp"]
    }

    fn commands(&self) -> Vec<ShowCommand> {
        vec![ShowCommand::json_revision("show bgp neighbors vrf all", 3)]
    }

    fn verify(&self, outputs: &[CommandOutput], result: &mut CheckResult) {
        result.mark_success();
        let Some(root) = require_json(outputs, 0, result) else {
            return;
        };

        for peer in &self.peers {
            let Some(expected) = peer.peer_group.as_deref() else {
                continue;
            };
            let Some(entry) = find_peer(root, peer) else {
                result.mark_failure(format!("{peer} - Not found"));
                continue;
            };

            let actual = entry.get("peerGroupName").and_then(Value::as_str);
            if actual != Some(expected) {
                result.mark_failure(format!(
                    "{peer} - Incorrect peer group configured - Expected: {expected} Actual: {}",
                    actual.unwrap_or("Not Found")
                ));
            }
        }
    }
}

// ============================================================================
// SECTION: Helpers
// ============================================================================

/// Returns true for serde defaults.
const fn default_true() -> bool {
    true
}
