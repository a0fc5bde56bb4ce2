// crates/netcheck-checks/src/inputs/connectivity.rs
// ============================================================================
// Module: Connectivity Input Models
// Description: Ping host and LLDP neighbor descriptors.
// Purpose: Validate connectivity expectations at configuration-parse time.
// Dependencies: crate::inputs, serde
// ============================================================================

//! ## Overview
//! A host descriptor drives one rendered ping command; an LLDP neighbor
//! descriptor names the device/port pair expected behind a local port.
//! Address-family agreement between source and destination is enforced at
//! construction.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::fmt;
use std::net::IpAddr;

use serde::Deserialize;

use crate::inputs::InputError;

// ============================================================================
// SECTION: Constants
// ============================================================================

/// Default ping repeat count.
const DEFAULT_REPEAT: u64 = 2;

/// Default ping payload size in bytes.
const DEFAULT_SIZE: u64 = 100;

/// Payload sizes accepted by the device, in bytes.
const SIZE_RANGE: std::ops::RangeInclusive<u64> = 36 ..= 18024;

// ============================================================================
// SECTION: Ping Hosts
// ============================================================================

/// Raw host descriptor prior to validation.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
struct HostRaw {
    /// Destination address to ping.
    destination: IpAddr,
    /// Source address or egress interface.
    source: Option<String>,
    /// VRF to ping in.
    #[serde(default = "default_vrf")]
    vrf: String,
    /// Number of probes per command.
    #[serde(default = "default_repeat")]
    repeat: u64,
    /// Probe payload size in bytes.
    #[serde(default = "default_size")]
    size: u64,
    /// Set the do-not-fragment bit.
    #[serde(default)]
    df_bit: bool,
    /// Expect the destination to answer; false asserts unreachability.
    #[serde(default = "default_reachable")]
    reachable: bool,
}

/// Validated host descriptor.
///
/// # Invariants
/// - A source given as an address shares the destination address family.
/// - `repeat` is at least 1 and `size` is within the device range.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(try_from = "HostRaw")]
pub struct Host {
    /// Destination address to ping.
    pub destination: IpAddr,
    /// Source address or egress interface.
    pub source: Option<String>,
    /// VRF to ping in.
    pub vrf: String,
    /// Number of probes per command.
    pub repeat: u64,
    /// Probe payload size in bytes.
    pub size: u64,
    /// Set the do-not-fragment bit.
    pub df_bit: bool,
    /// Expect the destination to answer; false asserts unreachability.
    pub reachable: bool,
}

impl TryFrom<HostRaw> for Host {
    type Error = InputError;

    fn try_from(raw: HostRaw) -> Result<Self, Self::Error> {
        if raw.repeat == 0 {
            return Err(InputError::OutOfRange {
                field: "repeat",
                value: raw.repeat,
                range: "1..",
            });
        }
        if !SIZE_RANGE.contains(&raw.size) {
            return Err(InputError::OutOfRange {
                field: "size",
                value: raw.size,
                range: "36..=18024",
            });
        }
        if let Some(source) = &raw.source {
            if source.is_empty() {
                return Err(InputError::InvalidValue {
                    field: "source",
                    value: source.clone(),
                });
            }
            if let Ok(address) = source.parse::<IpAddr>()
                && address.is_ipv4() != raw.destination.is_ipv4()
            {
                return Err(InputError::InvalidValue {
                    field: "source",
                    value: format!(
                        "address family does not match destination {}",
                        raw.destination
                    ),
                });
            }
        }
        Ok(Self {
            destination: raw.destination,
            source: raw.source,
            vrf: raw.vrf,
            repeat: raw.repeat,
            size: raw.size,
            df_bit: raw.df_bit,
            reachable: raw.reachable,
        })
    }
}

impl fmt::Display for Host {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Host: {}", self.destination)?;
        if let Some(source) = &self.source {
            write!(f, " Source: {source}")?;
        }
        write!(f, " VRF: {}", self.vrf)
    }
}

// ============================================================================
// SECTION: LLDP Neighbors
// ============================================================================

/// Raw LLDP neighbor descriptor prior to validation.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
struct LldpNeighborRaw {
    /// Local port name.
    port: String,
    /// Expected neighbor device name.
    neighbor_device: String,
    /// Expected neighbor port name.
    neighbor_port: String,
}

/// Validated LLDP neighbor descriptor.
///
/// # Invariants
/// - All three names are non-empty.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(try_from = "LldpNeighborRaw")]
pub struct LldpNeighbor {
    /// Local port name.
    pub port: String,
    /// Expected neighbor device name.
    pub neighbor_device: String,
    /// Expected neighbor port name.
    pub neighbor_port: String,
}

impl TryFrom<LldpNeighborRaw> for LldpNeighbor {
    type Error = InputError;

    fn try_from(raw: LldpNeighborRaw) -> Result<Self, Self::Error> {
        for (field, value) in [
            ("port", &raw.port),
            ("neighbor_device", &raw.neighbor_device),
            ("neighbor_port", &raw.neighbor_port),
        ] {
            if value.is_empty() {
                return Err(InputError::InvalidValue {
                    field,
                    value: value.clone(),
                });
            }
        }
        Ok(Self {
            port: raw.port,
            neighbor_device: raw.neighbor_device,
            neighbor_port: raw.neighbor_port,
        })
    }
}

impl fmt::Display for LldpNeighbor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Port: {} Neighbor: {} Neighbor Port: {}",
            self.port, self.neighbor_device, self.neighbor_port
        )
    }
}

// ============================================================================
// SECTION: Interface Names
// ============================================================================

/// Canonical interface name prefixes the device reports.
const INTERFACE_PREFIXES: &[&str] = &[
    "Ethernet",
    "Loopback",
    "Management",
    "Port-Channel",
    "Tunnel",
    "Vlan",
    "Vxlan",
];

/// Expands a short interface name to the canonical device form.
///
/// `lo1` and `Lo1` become `Loopback1`; names with no matching prefix are
/// returned unchanged.
#[must_use]
pub fn canonicalize_interface(name: &str) -> String {
    let split = name.find(|character: char| character.is_ascii_digit()).unwrap_or(name.len());
    let (prefix, suffix) = name.split_at(split);
    let folded: String =
        prefix.chars().filter(|character| *character != '-').collect::<String>().to_lowercase();
    if folded.is_empty() {
        return name.to_string();
    }
    INTERFACE_PREFIXES
        .iter()
        .find(|canonical| {
            canonical
                .chars()
                .filter(|character| *character != '-')
                .collect::<String>()
                .to_lowercase()
                .starts_with(&folded)
        })
        .map_or_else(|| name.to_string(), |canonical| format!("{canonical}{suffix}"))
}

// ============================================================================
// SECTION: Helpers
// ============================================================================

/// Returns the default VRF name for serde defaults.
fn default_vrf() -> String {
    "default".to_string()
}

/// Returns the default probe count for serde defaults.
const fn default_repeat() -> u64 {
    DEFAULT_REPEAT
}

/// Returns the default payload size for serde defaults.
const fn default_size() -> u64 {
    DEFAULT_SIZE
}

/// Returns the default reachability expectation for serde defaults.
const fn default_reachable() -> bool {
    true
}
