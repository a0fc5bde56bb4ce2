// crates/netcheck-checks/src/inputs/bgp.rs
// ============================================================================
// Module: BGP Input Models
// Description: Address-family and peer descriptors for BGP checks.
// Purpose: Validate BGP expectations at configuration-parse time.
// Dependencies: crate::inputs, serde
// ============================================================================

//! ## Overview
//! BGP expectations come in two shapes: an address-family descriptor
//! (AFI/SAFI scope, VRF, expected peer count) and a peer descriptor
//! (address or interface, VRF, per-check expectations such as capabilities,
//! timers, and route-maps). Each address family maps to the stable key the
//! device uses in its JSON output.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::fmt;
use std::net::IpAddr;
use std::net::Ipv6Addr;
use std::num::NonZeroU64;

use serde::Deserialize;
use serde::Serialize;

use crate::inputs::InputError;

// ============================================================================
// SECTION: Constants
// ============================================================================

/// VRF used when a descriptor does not name one.
pub const DEFAULT_VRF: &str = "default";

/// Hold-time range accepted by the device, in seconds.
const HOLD_TIME_RANGE: std::ops::RangeInclusive<u64> = 3 ..= 7200;

/// Keepalive range accepted by the device, in seconds.
const KEEPALIVE_RANGE: std::ops::RangeInclusive<u64> = 0 ..= 7200;

/// Canonical multiprotocol capability keys as the device reports them.
const CAPABILITY_KEYS: &[&str] = &[
    "ipv4Unicast",
    "ipv4Multicast",
    "ipv4MplsLabels",
    "ipv4MplsVpn",
    "ipv4SrTe",
    "ipv6Unicast",
    "ipv6Multicast",
    "ipv6MplsLabels",
    "ipv6MplsVpn",
    "ipv6SrTe",
    "l2VpnEvpn",
    "l2VpnVpls",
    "linkState",
    "dps",
    "rtMembership",
];

// ============================================================================
// SECTION: Address Families
// ============================================================================

/// BGP Address-Family Identifier.
///
/// # Invariants
/// - Variants are stable for serialization and catalog matching.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Afi {
    /// IPv4 address family.
    Ipv4,
    /// IPv6 address family.
    Ipv6,
    /// VPN-IPv4 address family.
    VpnIpv4,
    /// VPN-IPv6 address family.
    VpnIpv6,
    /// EVPN address family.
    Evpn,
    /// Route-target membership address family.
    RtMembership,
    /// Dynamic path selection address family.
    PathSelection,
    /// BGP link-state address family.
    LinkState,
}

impl fmt::Display for Afi {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::Ipv4 => "ipv4",
            Self::Ipv6 => "ipv6",
            Self::VpnIpv4 => "vpn-ipv4",
            Self::VpnIpv6 => "vpn-ipv6",
            Self::Evpn => "evpn",
            Self::RtMembership => "rt-membership",
            Self::PathSelection => "path-selection",
            Self::LinkState => "link-state",
        };
        f.write_str(label)
    }
}

/// BGP Subsequent-Address-Family Identifier.
///
/// # Invariants
/// - Variants are stable for serialization and catalog matching.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Safi {
    /// Unicast routes.
    Unicast,
    /// Multicast routes.
    Multicast,
    /// Labeled-unicast routes.
    LabeledUnicast,
    /// SR-TE policy routes.
    SrTe,
}

impl fmt::Display for Safi {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::Unicast => "unicast",
            Self::Multicast => "multicast",
            Self::LabeledUnicast => "labeled-unicast",
            Self::SrTe => "sr-te",
        };
        f.write_str(label)
    }
}

/// Raw address-family descriptor prior to validation.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
struct BgpAddressFamilyRaw {
    /// Address-family identifier.
    afi: Afi,
    /// Subsequent-address-family identifier.
    safi: Option<Safi>,
    /// VRF the family is scoped to.
    #[serde(default = "default_vrf")]
    vrf: String,
    /// Expected number of peers.
    num_peers: Option<NonZeroU64>,
    /// Require established sessions and negotiated family state.
    #[serde(default)]
    check_peer_state: bool,
}

/// Validated address-family descriptor.
///
/// # Invariants
/// - `safi` is present exactly when `afi` is ipv4 or ipv6.
/// - Families other than ipv4/ipv6 are scoped to the default VRF.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(try_from = "BgpAddressFamilyRaw")]
pub struct BgpAddressFamily {
    /// Address-family identifier.
    pub afi: Afi,
    /// Subsequent-address-family identifier, for ipv4/ipv6 families.
    pub safi: Option<Safi>,
    /// VRF the family is scoped to.
    pub vrf: String,
    /// Expected number of peers, when the consuming check counts them.
    pub num_peers: Option<NonZeroU64>,
    /// Require established sessions and negotiated family state.
    pub check_peer_state: bool,
}

impl TryFrom<BgpAddressFamilyRaw> for BgpAddressFamily {
    type Error = InputError;

    fn try_from(raw: BgpAddressFamilyRaw) -> Result<Self, Self::Error> {
        let per_safi = matches!(raw.afi, Afi::Ipv4 | Afi::Ipv6);
        if per_safi && raw.safi.is_none() {
            return Err(InputError::MissingField("safi"));
        }
        if !per_safi {
            if raw.safi.is_some() {
                return Err(InputError::InvalidValue {
                    field: "safi",
                    value: format!("not applicable to afi '{}'", raw.afi),
                });
            }
            if raw.vrf != DEFAULT_VRF {
                return Err(InputError::InvalidValue {
                    field: "vrf",
                    value: format!("afi '{}' is only valid in the default VRF", raw.afi),
                });
            }
        }
        Ok(Self {
            afi: raw.afi,
            safi: raw.safi,
            vrf: raw.vrf,
            num_peers: raw.num_peers,
            check_peer_state: raw.check_peer_state,
        })
    }
}

impl BgpAddressFamily {
    /// Returns the key the device uses for this family in JSON output.
    #[must_use]
    pub const fn eos_key(&self) -> &'static str {
        match (self.afi, self.safi) {
            (Afi::Ipv4, Some(Safi::Multicast)) => "ipv4Multicast",
            (Afi::Ipv4, Some(Safi::LabeledUnicast)) => "ipv4MplsLabels",
            (Afi::Ipv4, Some(Safi::SrTe)) => "ipv4SrTe",
            (Afi::Ipv4, _) => "ipv4Unicast",
            (Afi::Ipv6, Some(Safi::Multicast)) => "ipv6Multicast",
            (Afi::Ipv6, Some(Safi::LabeledUnicast)) => "ipv6MplsLabels",
            (Afi::Ipv6, Some(Safi::SrTe)) => "ipv6SrTe",
            (Afi::Ipv6, _) => "ipv6Unicast",
            (Afi::VpnIpv4, _) => "ipv4MplsVpn",
            (Afi::VpnIpv6, _) => "ipv6MplsVpn",
            (Afi::Evpn, _) => "l2VpnEvpn",
            (Afi::RtMembership, _) => "rtMembership",
            (Afi::PathSelection, _) => "dps",
            (Afi::LinkState, _) => "linkState",
        }
    }
}

impl fmt::Display for BgpAddressFamily {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "AFI: {}", self.afi)?;
        if let Some(safi) = self.safi {
            write!(f, " SAFI: {safi}")?;
        }
        if matches!(self.afi, Afi::Ipv4 | Afi::Ipv6) {
            write!(f, " VRF: {}", self.vrf)?;
        }
        Ok(())
    }
}

// ============================================================================
// SECTION: Peer Reference
// ============================================================================

/// Identity of a BGP peer: a session address or an unnumbered interface.
///
/// # Invariants
/// - Addresses are plain IPv4/IPv6 or IPv6 with a `%zone` suffix.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PeerRef {
    /// Peer identified by session address.
    Address(String),
    /// Peer identified by interface (RFC 5549 unnumbered sessions).
    Interface(String),
}

impl fmt::Display for PeerRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Address(address) => write!(f, "Peer: {address}"),
            Self::Interface(interface) => write!(f, "Interface: {interface}"),
        }
    }
}

/// Validates a peer address, allowing IPv6 zone identifiers.
fn validate_peer_address(address: &str) -> Result<(), InputError> {
    let candidate = match address.split_once('%') {
        Some((prefix, zone)) if !zone.is_empty() => {
            return prefix.parse::<Ipv6Addr>().map(|_| ()).map_err(|_| {
                InputError::InvalidValue {
                    field: "peer_address",
                    value: address.to_string(),
                }
            });
        }
        Some(_) => {
            return Err(InputError::InvalidValue {
                field: "peer_address",
                value: address.to_string(),
            });
        }
        None => address,
    };
    candidate.parse::<IpAddr>().map(|_| ()).map_err(|_| InputError::InvalidValue {
        field: "peer_address",
        value: address.to_string(),
    })
}

// ============================================================================
// SECTION: Peer Descriptor
// ============================================================================

/// Raw peer descriptor prior to validation.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
struct BgpPeerRaw {
    /// Peer session address.
    peer_address: Option<String>,
    /// Peer interface for unnumbered sessions.
    interface: Option<String>,
    /// VRF the session lives in.
    #[serde(default = "default_vrf")]
    vrf: String,
    /// Expected multiprotocol capabilities.
    capabilities: Option<Vec<String>>,
    /// Reject capabilities beyond the expected set.
    #[serde(default)]
    strict: bool,
    /// Expected hold time in seconds.
    hold_time: Option<u64>,
    /// Expected keepalive time in seconds.
    keep_alive_time: Option<u64>,
    /// Expected inbound route-map name.
    inbound_route_map: Option<String>,
    /// Expected outbound route-map name.
    outbound_route_map: Option<String>,
    /// Expected maximum routes limit.
    maximum_routes: Option<u64>,
    /// Expected maximum routes warning limit.
    warning_limit: Option<u64>,
    /// Expected peer-group name.
    peer_group: Option<String>,
}

/// Validated peer descriptor.
///
/// # Invariants
/// - Exactly one of address or interface identifies the peer.
/// - Timers, when present, are within device-accepted ranges.
/// - Capabilities, when present, are non-empty canonical device keys.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(try_from = "BgpPeerRaw")]
pub struct BgpPeer {
    /// Peer identity.
    pub peer: PeerRef,
    /// VRF the session lives in.
    pub vrf: String,
    /// Expected multiprotocol capabilities, canonical device keys.
    pub capabilities: Option<Vec<String>>,
    /// Reject capabilities beyond the expected set.
    pub strict: bool,
    /// Expected hold time in seconds.
    pub hold_time: Option<u64>,
    /// Expected keepalive time in seconds.
    pub keep_alive_time: Option<u64>,
    /// Expected inbound route-map name.
    pub inbound_route_map: Option<String>,
    /// Expected outbound route-map name.
    pub outbound_route_map: Option<String>,
    /// Expected maximum routes limit.
    pub maximum_routes: Option<u64>,
    /// Expected maximum routes warning limit.
    pub warning_limit: Option<u64>,
    /// Expected peer-group name.
    pub peer_group: Option<String>,
}

impl TryFrom<BgpPeerRaw> for BgpPeer {
    type Error = InputError;

    fn try_from(raw: BgpPeerRaw) -> Result<Self, Self::Error> {
        let peer = match (raw.peer_address, raw.interface) {
            (Some(_), Some(_)) => {
                return Err(InputError::MutuallyExclusive {
                    first: "peer_address",
                    second: "interface",
                });
            }
            (None, None) => {
                return Err(InputError::MissingAlternative {
                    first: "peer_address",
                    second: "interface",
                });
            }
            (Some(address), None) => {
                validate_peer_address(&address)?;
                PeerRef::Address(address)
            }
            (None, Some(interface)) => {
                if interface.is_empty() {
                    return Err(InputError::InvalidValue {
                        field: "interface",
                        value: interface,
                    });
                }
                PeerRef::Interface(interface)
            }
        };

        if let Some(hold_time) = raw.hold_time
            && !HOLD_TIME_RANGE.contains(&hold_time)
        {
            return Err(InputError::OutOfRange {
                field: "hold_time",
                value: hold_time,
                range: "3..=7200",
            });
        }
        if let Some(keep_alive_time) = raw.keep_alive_time
            && !KEEPALIVE_RANGE.contains(&keep_alive_time)
        {
            return Err(InputError::OutOfRange {
                field: "keep_alive_time",
                value: keep_alive_time,
                range: "0..=7200",
            });
        }

        let capabilities = match raw.capabilities {
            None => None,
            Some(entries) => {
                if entries.is_empty() {
                    return Err(InputError::EmptyList("capabilities"));
                }
                let mut canonical = Vec::with_capacity(entries.len());
                for entry in &entries {
                    canonical.push(normalize_capability(entry)?.to_string());
                }
                Some(canonical)
            }
        };

        Ok(Self {
            peer,
            vrf: raw.vrf,
            capabilities,
            strict: raw.strict,
            hold_time: raw.hold_time,
            keep_alive_time: raw.keep_alive_time,
            inbound_route_map: raw.inbound_route_map,
            outbound_route_map: raw.outbound_route_map,
            maximum_routes: raw.maximum_routes,
            warning_limit: raw.warning_limit,
            peer_group: raw.peer_group,
        })
    }
}

impl fmt::Display for BgpPeer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} VRF: {}", self.peer, self.vrf)
    }
}

/// Normalizes a capability name to the canonical device key.
///
/// Spacing, underscores, dashes, and case differences are tolerated;
/// anything that does not resolve to a known capability is rejected.
fn normalize_capability(entry: &str) -> Result<&'static str, InputError> {
    let folded: String = entry
        .chars()
        .filter(|character| !matches!(character, ' ' | '_' | '-'))
        .collect::<String>()
        .to_ascii_lowercase();
    CAPABILITY_KEYS
        .iter()
        .find(|key| key.to_ascii_lowercase() == folded)
        .copied()
        .ok_or_else(|| InputError::InvalidValue {
            field: "capabilities",
            value: entry.to_string(),
        })
}

// ============================================================================
// SECTION: Helpers
// ============================================================================

/// Returns the default VRF name for serde defaults.
fn default_vrf() -> String {
    DEFAULT_VRF.to_string()
}
