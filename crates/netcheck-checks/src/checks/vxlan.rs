// crates/netcheck-checks/src/checks/vxlan.rs
// ============================================================================
// Module: VXLAN Checks
// Description: Vxlan1 health, config sanity, VNI bindings, and VTEP peers.
// Purpose: Validate VXLAN data-plane configuration and state.
// Dependencies: crate::checks, crate::inputs, netcheck-core
// ============================================================================

//! ## Overview
//! All VXLAN checks anchor on the Vxlan1 interface; a device without it
//! skips rather than fails. VNI bindings are declared as a map from VNI to
//! either a VLAN number or a VRF name, matching the two binding tables the
//! device reports.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::collections::BTreeMap;
use std::collections::BTreeSet;
use std::net::IpAddr;

use netcheck_core::CheckResult;
use netcheck_core::CommandOutput;
use netcheck_core::ShowCommand;
use netcheck_core::StateCheck;
use serde::Deserialize;
use serde_json::Value;

use crate::checks::require_json;
use crate::inputs::InputError;
use crate::inputs::connectivity::canonicalize_interface;

// ============================================================================
// SECTION: Constants
// ============================================================================

/// Highest assignable VXLAN Network Identifier.
const MAX_VNI: u32 = 16_777_215;

/// Message recorded when the Vxlan1 interface is absent.
const VXLAN1_NOT_CONFIGURED: &str = "Interface: Vxlan1 - Not configured";

// ============================================================================
// SECTION: Vxlan1 Interface
// ============================================================================

/// Verifies the Vxlan1 interface is operationally up.
#[derive(Debug, Clone, Copy, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct VxlanInterface {}

impl VxlanInterface {
    /// Creates the check.
    #[must_use]
    pub const fn new() -> Self {
        Self {}
    }
}

impl StateCheck for VxlanInterface {
    fn name(&self) -> &'static str {
        "vxlan_interface"
    }

    fn categories(&self) -> &'static [&'static str] {
        &["vxlan"]
    }

    fn commands(&self) -> Vec<ShowCommand> {
        vec![ShowCommand::json_revision("show interfaces description", 1)]
    }

    fn verify(&self, outputs: &[CommandOutput], result: &mut CheckResult) {
        result.mark_success();
        let Some(root) = require_json(outputs, 0, result) else {
            return;
        };
        let interface = root
            .get("interfaceDescriptions")
            .and_then(|descriptions| descriptions.get("Vxlan1"));
        let Some(interface) = interface else {
            result.mark_skipped(VXLAN1_NOT_CONFIGURED);
            return;
        };

        let line_protocol =
            interface.get("lineProtocolStatus").and_then(Value::as_str).unwrap_or_default();
        let status = interface.get("interfaceStatus").and_then(Value::as_str).unwrap_or_default();
        if line_protocol != "up" || status != "up" {
            result.mark_failure(format!(
                "Interface: Vxlan1 - Incorrect Line protocol status/Status - \
                 Expected: up/up Actual: {line_protocol}/{status}"
            ));
        }
    }
}

// ============================================================================
// SECTION: VXLAN Config Sanity
// ============================================================================

/// Verifies every VXLAN config-sanity category passes.
#[derive(Debug, Clone, Copy, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct VxlanConfigSanity {}

impl VxlanConfigSanity {
    /// Creates the check.
    #[must_use]
    pub const fn new() -> Self {
        Self {}
    }
}

impl StateCheck for VxlanConfigSanity {
    fn name(&self) -> &'static str {
        "vxlan_config_sanity"
    }

    fn categories(&self) -> &'static [&'static str] {
        &["vxlan"]
    }

    fn commands(&self) -> Vec<ShowCommand> {
        vec![ShowCommand::json_revision("show vxlan config-sanity", 1)]
    }

    fn verify(&self, outputs: &[CommandOutput], result: &mut CheckResult) {
        result.mark_success();
        let Some(root) = require_json(outputs, 0, result) else {
            return;
        };
        let categories = root.get("categories").and_then(Value::as_object);
        let Some(categories) = categories.filter(|categories| !categories.is_empty()) else {
            result.mark_skipped("VXLAN is not configured");
            return;
        };

        for (category, data) in categories {
            if data.get("allCheckPass").and_then(Value::as_bool) != Some(true) {
                result.mark_failure(format!(
                    "Vxlan Category: {category} - Config sanity check is not passing"
                ));
            }
        }
    }
}

// ============================================================================
// SECTION: VNI Bindings
// ============================================================================

/// Expected binding target for a VNI.
///
/// # Invariants
/// - A VLAN target matches the layer-2 binding table; a VRF target matches
///   the layer-3 binding table.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(untagged)]
pub enum VniBinding {
    /// VNI bound to a VLAN.
    Vlan(u64),
    /// VNI bound to a VRF.
    Vrf(String),
}

/// Raw input for the VNI binding check.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
struct VxlanVniBindingInput {
    /// Expected bindings keyed by VNI.
    bindings: BTreeMap<u32, VniBinding>,
}

/// Verifies VNI-to-VLAN and VNI-to-VRF bindings on Vxlan1.
#[derive(Debug, Clone, Deserialize)]
#[serde(try_from = "VxlanVniBindingInput")]
pub struct VxlanVniBinding {
    /// Expected bindings keyed by VNI.
    bindings: BTreeMap<u32, VniBinding>,
}

impl VxlanVniBinding {
    /// Creates the check after validating VNI values.
    ///
    /// # Errors
    ///
    /// Returns [`InputError`] when the map is empty or a VNI is out of range.
    pub fn new(bindings: BTreeMap<u32, VniBinding>) -> Result<Self, InputError> {
        if bindings.is_empty() {
            return Err(InputError::EmptyList("bindings"));
        }
        for vni in bindings.keys() {
            if *vni == 0 || *vni > MAX_VNI {
                return Err(InputError::OutOfRange {
                    field: "bindings",
                    value: u64::from(*vni),
                    range: "1..=16777215",
                });
            }
        }
        Ok(Self {
            bindings,
        })
    }
}

impl TryFrom<VxlanVniBindingInput> for VxlanVniBinding {
    type Error = InputError;

    fn try_from(input: VxlanVniBindingInput) -> Result<Self, Self::Error> {
        Self::new(input.bindings)
    }
}

impl StateCheck for VxlanVniBinding {
    fn name(&self) -> &'static str {
        "vxlan_vni_binding"
    }

    fn categories(&self) -> &'static [&'static str] {
        &["vxlan"]
    }

    fn commands(&self) -> Vec<ShowCommand> {
        vec![ShowCommand::json_revision("show vxlan vni", 1)]
    }

    fn verify(&self, outputs: &[CommandOutput], result: &mut CheckResult) {
        result.mark_success();
        let Some(root) = require_json(outputs, 0, result) else {
            return;
        };
        let vxlan1 = root.get("vxlanIntfs").and_then(|interfaces| interfaces.get("Vxlan1"));
        let Some(vxlan1) = vxlan1 else {
            result.mark_skipped(VXLAN1_NOT_CONFIGURED);
            return;
        };

        for (vni, expected) in &self.bindings {
            let key = vni.to_string();
            let layer2 = vxlan1.get("vniBindings").and_then(|bindings| bindings.get(&key));
            let layer3 =
                vxlan1.get("vniBindingsToVrf").and_then(|bindings| bindings.get(&key));
            match expected {
                VniBinding::Vlan(expected_vlan) => {
                    let Some(entry) = layer2.or(layer3) else {
                        result.mark_failure(format!(
                            "Interface: Vxlan1 VNI: {vni} - Binding not found"
                        ));
                        continue;
                    };
                    let actual = entry.get("vlan").and_then(Value::as_u64).unwrap_or_default();
                    if actual != *expected_vlan {
                        result.mark_failure(format!(
                            "Interface: Vxlan1 VNI: {vni} - Wrong VLAN binding - \
                             Expected: {expected_vlan} Actual: {actual}"
                        ));
                    }
                }
                VniBinding::Vrf(expected_vrf) => {
                    let Some(entry) = layer3 else {
                        result.mark_failure(format!(
                            "Interface: Vxlan1 VNI: {vni} - Binding not found"
                        ));
                        continue;
                    };
                    let actual =
                        entry.get("vrfName").and_then(Value::as_str).unwrap_or_default();
                    if actual != expected_vrf {
                        result.mark_failure(format!(
                            "Interface: Vxlan1 VNI: {vni} - Wrong VRF binding - \
                             Expected: {expected_vrf} Actual: {actual}"
                        ));
                    }
                }
            }
        }
    }
}

// ============================================================================
// SECTION: VTEP Peers
// ============================================================================

/// Raw input for the VTEP peer check.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
struct VxlanVtepInput {
    /// Expected VTEP peer addresses.
    vteps: Vec<IpAddr>,
}

/// Verifies the VTEP peer list on Vxlan1 matches the expected set.
#[derive(Debug, Clone, Deserialize)]
#[serde(try_from = "VxlanVtepInput")]
pub struct VxlanVtep {
    /// Expected VTEP peer addresses, rendered for comparison.
    vteps: BTreeSet<String>,
}

impl VxlanVtep {
    /// Creates the check; an empty set asserts no VTEP peers exist.
    #[must_use]
    pub fn new(vteps: &[IpAddr]) -> Self {
        Self {
            vteps: vteps.iter().map(IpAddr::to_string).collect(),
        }
    }
}

impl TryFrom<VxlanVtepInput> for VxlanVtep {
    type Error = InputError;

    fn try_from(input: VxlanVtepInput) -> Result<Self, Self::Error> {
        Ok(Self::new(&input.vteps))
    }
}

impl StateCheck for VxlanVtep {
    fn name(&self) -> &'static str {
        "vxlan_vtep"
    }

    fn categories(&self) -> &'static [&'static str] {
        &["vxlan"]
    }

    fn commands(&self) -> Vec<ShowCommand> {
        vec![ShowCommand::json_revision("show vxlan vtep", 1)]
    }

    fn verify(&self, outputs: &[CommandOutput], result: &mut CheckResult) {
        result.mark_success();
        let Some(root) = require_json(outputs, 0, result) else {
            return;
        };
        let vxlan1 = root.get("interfaces").and_then(|interfaces| interfaces.get("Vxlan1"));
        let Some(vxlan1) = vxlan1 else {
            result.mark_skipped(VXLAN1_NOT_CONFIGURED);
            return;
        };

        let actual: BTreeSet<String> = vxlan1
            .get("vteps")
            .and_then(Value::as_array)
            .map(|vteps| {
                vteps
                    .iter()
                    .filter_map(Value::as_str)
                    .map(ToString::to_string)
                    .collect()
            })
            .unwrap_or_default();

        let missing: Vec<&str> =
            self.vteps.difference(&actual).map(String::as_str).collect();
        if !missing.is_empty() {
            result.mark_failure(format!(
                "The following VTEP peer(s) are missing from the Vxlan1 interface: {}",
                missing.join(", ")
            ));
        }

        let unexpected: Vec<&str> =
            actual.difference(&self.vteps).map(String::as_str).collect();
        if !unexpected.is_empty() {
            result.mark_failure(format!(
                "Unexpected VTEP peer(s) on Vxlan1 interface: {}",
                unexpected.join(", ")
            ));
        }
    }
}

// ============================================================================
// SECTION: Connection Settings
// ============================================================================

/// Raw input for the connection-settings check.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
struct VxlanConnSettingsInput {
    /// Expected source interface, short names accepted.
    source_interface: String,
    /// Expected UDP port.
    udp_port: u16,
}

/// Verifies the Vxlan1 source interface and UDP port.
#[derive(Debug, Clone, Deserialize)]
#[serde(try_from = "VxlanConnSettingsInput")]
pub struct VxlanConnSettings {
    /// Expected source interface in canonical form.
    source_interface: String,
    /// Expected UDP port.
    udp_port: u16,
}

impl VxlanConnSettings {
    /// Creates the check, canonicalizing the interface name.
    ///
    /// # Errors
    ///
    /// Returns [`InputError`] when the interface name is empty.
    pub fn new(source_interface: &str, udp_port: u16) -> Result<Self, InputError> {
        if source_interface.is_empty() {
            return Err(InputError::InvalidValue {
                field: "source_interface",
                value: source_interface.to_string(),
            });
        }
        Ok(Self {
            source_interface: canonicalize_interface(source_interface),
            udp_port,
        })
    }
}

impl TryFrom<VxlanConnSettingsInput> for VxlanConnSettings {
    type Error = InputError;

    fn try_from(input: VxlanConnSettingsInput) -> Result<Self, Self::Error> {
        Self::new(&input.source_interface, input.udp_port)
    }
}

impl StateCheck for VxlanConnSettings {
    fn name(&self) -> &'static str {
        "vxlan_conn_settings"
    }

    fn categories(&self) -> &'static [&'static str] {
        &["vxlan"]
    }

    fn commands(&self) -> Vec<ShowCommand> {
        vec![ShowCommand::json("show interfaces Vxlan1")]
    }

    fn verify(&self, outputs: &[CommandOutput], result: &mut CheckResult) {
        result.mark_success();
        let Some(root) = require_json(outputs, 0, result) else {
            return;
        };
        let vxlan1 = root.get("interfaces").and_then(|interfaces| interfaces.get("Vxlan1"));
        let Some(vxlan1) = vxlan1 else {
            result.mark_skipped(VXLAN1_NOT_CONFIGURED);
            return;
        };

        let source = vxlan1.get("srcIpIntf").and_then(Value::as_str).unwrap_or_default();
        if source != self.source_interface {
            result.mark_failure(format!(
                "Interface: Vxlan1 - Incorrect Source interface - Expected: {} Actual: {source}",
                self.source_interface
            ));
        }

        let port = vxlan1.get("udpPort").and_then(Value::as_u64).unwrap_or_default();
        if port != u64::from(self.udp_port) {
            result.mark_failure(format!(
                "Interface: Vxlan1 - Incorrect UDP port - Expected: {} Actual: {port}",
                self.udp_port
            ));
        }
    }
}
