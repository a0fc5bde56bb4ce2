// crates/netcheck-checks/src/catalog.rs
// ============================================================================
// Module: Netcheck Catalog
// Description: YAML catalog of declarative check definitions.
// Purpose: Deserialize and validate user configuration into checks.
// Dependencies: crate::checks, netcheck-core, serde, serde_yaml
// ============================================================================

//! ## Overview
//! A catalog is a YAML list of externally tagged check records:
//!
//! ```yaml
//! checks:
//!   - bgp_peer_count:
//!       address_families:
//!         - afi: evpn
//!           num_peers: 2
//!   - mlag_status: {}
//! ```
//!
//! Every record is validated while the document is parsed; an invalid
//! expectation surfaces as a parse error, so a loaded catalog only contains
//! well-formed checks.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::path::Path;

use netcheck_core::StateCheck;
use serde::Deserialize;
use thiserror::Error;

use crate::checks::bgp::BgpPeerCapabilities;
use crate::checks::bgp::BgpPeerCount;
use crate::checks::bgp::BgpPeerGroup;
use crate::checks::bgp::BgpPeerRouteLimit;
use crate::checks::bgp::BgpPeerSession;
use crate::checks::bgp::BgpPeerTimers;
use crate::checks::bgp::BgpRouteMaps;
use crate::checks::connectivity::LldpNeighbors;
use crate::checks::connectivity::Reachability;
use crate::checks::hardware::AdverseDropCounters;
use crate::checks::hardware::PcieErrorCounters;
use crate::checks::mlag::MlagConfigSanity;
use crate::checks::mlag::MlagDualPrimary;
use crate::checks::mlag::MlagInterfaces;
use crate::checks::mlag::MlagPrimaryPriority;
use crate::checks::mlag::MlagReloadDelay;
use crate::checks::mlag::MlagStatus;
use crate::checks::software::EosExtensions;
use crate::checks::software::EosVersion;
use crate::checks::software::TerminAttrVersion;
use crate::checks::system::AgentCrashLogs;
use crate::checks::system::CoreDumps;
use crate::checks::system::CpuUtilization;
use crate::checks::system::DeviceUptime;
use crate::checks::system::FilesystemUtilization;
use crate::checks::system::MaintenanceMode;
use crate::checks::system::MemoryUtilization;
use crate::checks::system::NtpAssociations;
use crate::checks::system::NtpStatus;
use crate::checks::system::ReloadCause;
use crate::checks::vlan::DynamicVlanSource;
use crate::checks::vlan::VlanInternalPolicy;
use crate::checks::vxlan::VxlanConfigSanity;
use crate::checks::vxlan::VxlanConnSettings;
use crate::checks::vxlan::VxlanInterface;
use crate::checks::vxlan::VxlanVniBinding;
use crate::checks::vxlan::VxlanVtep;

// ============================================================================
// SECTION: Errors
// ============================================================================

/// Catalog loading errors.
///
/// # Invariants
/// - Variants are stable for programmatic handling.
#[derive(Debug, Error)]
pub enum CatalogError {
    /// Catalog file could not be read.
    #[error("catalog io error: {0}")]
    Io(#[from] std::io::Error),
    /// Catalog document is not valid YAML or fails input validation.
    #[error("catalog parse error: {0}")]
    Parse(#[from] serde_yaml::Error),
}

// ============================================================================
// SECTION: Check Specifications
// ============================================================================

/// One externally tagged check record in a catalog.
///
/// # Invariants
/// - Tags match the stable check names used in results.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "snake_case", deny_unknown_fields)]
pub enum CheckSpec {
    /// Adverse drop counter thresholds.
    AdverseDropCounters(AdverseDropCounters),
    /// Agent crash log absence.
    AgentCrashLogs(AgentCrashLogs),
    /// BGP multiprotocol capability negotiation.
    BgpPeerCapabilities(BgpPeerCapabilities),
    /// BGP peer count per address family.
    BgpPeerCount(BgpPeerCount),
    /// BGP peer-group membership.
    BgpPeerGroup(BgpPeerGroup),
    /// BGP maximum-routes limits.
    BgpPeerRouteLimit(BgpPeerRouteLimit),
    /// BGP session health.
    BgpPeerSession(BgpPeerSession),
    /// BGP negotiated timers.
    BgpPeerTimers(BgpPeerTimers),
    /// BGP route-map bindings.
    BgpRouteMaps(BgpRouteMaps),
    /// Core dump absence.
    CoreDumps(CoreDumps),
    /// CPU utilization threshold.
    CpuUtilization(CpuUtilization),
    /// Device uptime minimum.
    DeviceUptime(DeviceUptime),
    /// Dynamic VLAN source allocation.
    DynamicVlanSource(DynamicVlanSource),
    /// Installed versus boot extensions.
    EosExtensions(EosExtensions),
    /// Running EOS version.
    EosVersion(EosVersion),
    /// Filesystem utilization threshold.
    FilesystemUtilization(FilesystemUtilization),
    /// LLDP neighbor validation.
    LldpNeighbors(LldpNeighbors),
    /// Maintenance mode absence.
    MaintenanceMode(MaintenanceMode),
    /// MLAG config sanity.
    MlagConfigSanity(MlagConfigSanity),
    /// MLAG dual-primary detection.
    MlagDualPrimary(MlagDualPrimary),
    /// MLAG port health.
    MlagInterfaces(MlagInterfaces),
    /// MLAG primary priority.
    MlagPrimaryPriority(MlagPrimaryPriority),
    /// MLAG reload delays.
    MlagReloadDelay(MlagReloadDelay),
    /// MLAG overall health.
    MlagStatus(MlagStatus),
    /// Memory utilization threshold.
    MemoryUtilization(MemoryUtilization),
    /// NTP association conditions and strata.
    NtpAssociations(NtpAssociations),
    /// NTP synchronization status.
    NtpStatus(NtpStatus),
    /// PCIe error counter thresholds.
    PcieErrorCounters(PcieErrorCounters),
    /// Reachability probes.
    Reachability(Reachability),
    /// Last reload cause.
    ReloadCause(ReloadCause),
    /// TerminAttr agent version.
    #[serde(rename = "terminattr_version")]
    TerminAttrVersion(TerminAttrVersion),
    /// VLAN internal allocation policy.
    VlanInternalPolicy(VlanInternalPolicy),
    /// VXLAN config sanity.
    VxlanConfigSanity(VxlanConfigSanity),
    /// Vxlan1 connection settings.
    VxlanConnSettings(VxlanConnSettings),
    /// Vxlan1 interface health.
    VxlanInterface(VxlanInterface),
    /// VNI binding validation.
    VxlanVniBinding(VxlanVniBinding),
    /// VTEP peer list validation.
    VxlanVtep(VxlanVtep),
}

impl CheckSpec {
    /// Converts the record into an executable check.
    #[must_use]
    pub fn into_check(self) -> Box<dyn StateCheck> {
        match self {
            Self::AdverseDropCounters(check) => Box::new(check),
            Self::AgentCrashLogs(check) => Box::new(check),
            Self::BgpPeerCapabilities(check) => Box::new(check),
            Self::BgpPeerCount(check) => Box::new(check),
            Self::BgpPeerGroup(check) => Box::new(check),
            Self::BgpPeerRouteLimit(check) => Box::new(check),
            Self::BgpPeerSession(check) => Box::new(check),
            Self::BgpPeerTimers(check) => Box::new(check),
            Self::BgpRouteMaps(check) => Box::new(check),
            Self::CoreDumps(check) => Box::new(check),
            Self::CpuUtilization(check) => Box::new(check),
            Self::DeviceUptime(check) => Box::new(check),
            Self::DynamicVlanSource(check) => Box::new(check),
            Self::EosExtensions(check) => Box::new(check),
            Self::EosVersion(check) => Box::new(check),
            Self::FilesystemUtilization(check) => Box::new(check),
            Self::LldpNeighbors(check) => Box::new(check),
            Self::MaintenanceMode(check) => Box::new(check),
            Self::MlagConfigSanity(check) => Box::new(check),
            Self::MlagDualPrimary(check) => Box::new(check),
            Self::MlagInterfaces(check) => Box::new(check),
            Self::MlagPrimaryPriority(check) => Box::new(check),
            Self::MlagReloadDelay(check) => Box::new(check),
            Self::MlagStatus(check) => Box::new(check),
            Self::MemoryUtilization(check) => Box::new(check),
            Self::NtpAssociations(check) => Box::new(check),
            Self::NtpStatus(check) => Box::new(check),
            Self::PcieErrorCounters(check) => Box::new(check),
            Self::Reachability(check) => Box::new(check),
            Self::ReloadCause(check) => Box::new(check),
            Self::TerminAttrVersion(check) => Box::new(check),
            Self::VlanInternalPolicy(check) => Box::new(check),
            Self::VxlanConfigSanity(check) => Box::new(check),
            Self::VxlanConnSettings(check) => Box::new(check),
            Self::VxlanInterface(check) => Box::new(check),
            Self::VxlanVniBinding(check) => Box::new(check),
            Self::VxlanVtep(check) => Box::new(check),
        }
    }
}

// ============================================================================
// SECTION: Catalog
// ============================================================================

/// Parsed catalog of validated check records.
///
/// # Invariants
/// - Every record passed input validation during parsing.
/// - Record order is preserved from the source document.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Catalog {
    /// Check records in document order.
    #[serde(with = "serde_yaml::with::singleton_map_recursive")]
    checks: Vec<CheckSpec>,
}

impl Catalog {
    /// Parses a catalog from a YAML document.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError`] when the document is malformed or a record
    /// fails input validation.
    pub fn from_yaml(document: &str) -> Result<Self, CatalogError> {
        Ok(serde_yaml::from_str(document)?)
    }

    /// Reads and parses a catalog file.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError`] when the file cannot be read, the document
    /// is malformed, or a record fails input validation.
    pub fn from_path(path: &Path) -> Result<Self, CatalogError> {
        let document = std::fs::read_to_string(path)?;
        Self::from_yaml(&document)
    }

    /// Returns the number of check records.
    #[must_use]
    pub fn len(&self) -> usize {
        self.checks.len()
    }

    /// Returns true when the catalog holds no records.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.checks.is_empty()
    }

    /// Returns the parsed records in document order.
    #[must_use]
    pub fn specs(&self) -> &[CheckSpec] {
        &self.checks
    }

    /// Converts the catalog into executable checks in document order.
    #[must_use]
    pub fn into_checks(self) -> Vec<Box<dyn StateCheck>> {
        self.checks.into_iter().map(CheckSpec::into_check).collect()
    }
}
