// crates/netcheck-checks/src/checks/vlan.rs
// ============================================================================
// Module: VLAN Checks
// Description: Internal allocation policy and dynamic VLAN sources.
// Purpose: Validate VLAN allocation configuration and state.
// Dependencies: crate::checks, netcheck-core
// ============================================================================

//! ## Overview
//! The internal allocation check compares three scalars against the declared
//! policy and range. The dynamic source check confirms each designated
//! source has VLANs allocated and, in strict mode, that nothing else does.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::fmt;

use netcheck_core::CheckResult;
use netcheck_core::CommandOutput;
use netcheck_core::ShowCommand;
use netcheck_core::StateCheck;
use serde::Deserialize;
use serde_json::Value;

use crate::checks::require_json;
use crate::inputs::InputError;

// ============================================================================
// SECTION: Constants
// ============================================================================

/// Highest assignable VLAN identifier.
const MAX_VLAN: u64 = 4094;

// ============================================================================
// SECTION: Internal Allocation Policy
// ============================================================================

/// Direction of the VLAN internal allocation policy.
///
/// # Invariants
/// - Variants are stable for serialization and catalog matching.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AllocationPolicy {
    /// Allocate from the bottom of the range upward.
    Ascending,
    /// Allocate from the top of the range downward.
    Descending,
}

impl fmt::Display for AllocationPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Ascending => f.write_str("ascending"),
            Self::Descending => f.write_str("descending"),
        }
    }
}

/// Raw input for the allocation-policy check.
#[derive(Debug, Clone, Copy, Deserialize)]
#[serde(deny_unknown_fields)]
struct VlanInternalPolicyInput {
    /// Expected allocation policy.
    policy: AllocationPolicy,
    /// First VLAN of the internal range.
    start_vlan_id: u64,
    /// Last VLAN of the internal range.
    end_vlan_id: u64,
}

/// Verifies the VLAN internal allocation policy and range.
#[derive(Debug, Clone, Copy, Deserialize)]
#[serde(try_from = "VlanInternalPolicyInput")]
pub struct VlanInternalPolicy {
    /// Expected allocation policy.
    policy: AllocationPolicy,
    /// First VLAN of the internal range.
    start_vlan_id: u64,
    /// Last VLAN of the internal range.
    end_vlan_id: u64,
}

impl VlanInternalPolicy {
    /// Creates the check after validating the VLAN range.
    ///
    /// # Errors
    ///
    /// Returns [`InputError`] when a bound is out of range or reversed.
    pub const fn new(
        policy: AllocationPolicy,
        start_vlan_id: u64,
        end_vlan_id: u64,
    ) -> Result<Self, InputError> {
        if start_vlan_id == 0 || start_vlan_id > MAX_VLAN {
            return Err(InputError::OutOfRange {
                field: "start_vlan_id",
                value: start_vlan_id,
                range: "1..=4094",
            });
        }
        if end_vlan_id == 0 || end_vlan_id > MAX_VLAN {
            return Err(InputError::OutOfRange {
                field: "end_vlan_id",
                value: end_vlan_id,
                range: "1..=4094",
            });
        }
        if start_vlan_id > end_vlan_id {
            return Err(InputError::OutOfRange {
                field: "end_vlan_id",
                value: end_vlan_id,
                range: "start_vlan_id..=4094",
            });
        }
        Ok(Self {
            policy,
            start_vlan_id,
            end_vlan_id,
        })
    }
}

impl TryFrom<VlanInternalPolicyInput> for VlanInternalPolicy {
    type Error = InputError;

    fn try_from(input: VlanInternalPolicyInput) -> Result<Self, Self::Error> {
        Self::new(input.policy, input.start_vlan_id, input.end_vlan_id)
    }
}

impl StateCheck for VlanInternalPolicy {
    fn name(&self) -> &'static str {
        "vlan_internal_policy"
    }

    fn categories(&self) -> &'static [&'static str] {
        &["vlan"]
    }

    fn commands(&self) -> Vec<ShowCommand> {
        vec![ShowCommand::json_revision("show vlan internal allocation policy", 1)]
    }

    fn verify(&self, outputs: &[CommandOutput], result: &mut CheckResult) {
        result.mark_success();
        let Some(root) = require_json(outputs, 0, result) else {
            return;
        };

        let policy = root.get("policy").and_then(Value::as_str).unwrap_or_default();
        if policy != self.policy.to_string() {
            result.mark_failure(format!(
                "VLAN internal allocation policy mismatch - Expected: {} Actual: {policy}",
                self.policy
            ));
        }

        let start = root.get("startVlanId").and_then(Value::as_u64).unwrap_or_default();
        if start != self.start_vlan_id {
            result.mark_failure(format!(
                "VLAN start ID mismatch - Expected: {} Actual: {start}",
                self.start_vlan_id
            ));
        }

        let end = root.get("endVlanId").and_then(Value::as_u64).unwrap_or_default();
        if end != self.end_vlan_id {
            result.mark_failure(format!(
                "VLAN end ID mismatch - Expected: {} Actual: {end}",
                self.end_vlan_id
            ));
        }
    }
}

// ============================================================================
// SECTION: Dynamic VLAN Sources
// ============================================================================

/// Sources that may allocate dynamic VLANs.
///
/// # Invariants
/// - Variants are stable for serialization and catalog matching.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DynamicVlanSourceKind {
    /// DANZ monitoring fabric.
    Dmf,
    /// EVPN service.
    Evpn,
    /// MLAG peer.
    Mlag,
    /// MLAG synchronization.
    Mlagsync,
    /// VCC BFD sessions.
    Vccbfd,
    /// Miscellaneous internal consumers.
    Misc,
}

impl DynamicVlanSourceKind {
    /// Returns the source name as the device reports it.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Dmf => "dmf",
            Self::Evpn => "evpn",
            Self::Mlag => "mlag",
            Self::Mlagsync => "mlagsync",
            Self::Vccbfd => "vccbfd",
            Self::Misc => "misc",
        }
    }
}

/// Raw input for the dynamic-source check.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
struct DynamicVlanSourceInput {
    /// Designated dynamic VLAN sources.
    sources: Vec<DynamicVlanSourceKind>,
    /// Forbid allocations from non-designated sources.
    #[serde(default)]
    strict: bool,
}

/// Verifies dynamic VLAN allocation for designated sources.
#[derive(Debug, Clone, Deserialize)]
#[serde(try_from = "DynamicVlanSourceInput")]
pub struct DynamicVlanSource {
    /// Designated dynamic VLAN sources.
    sources: Vec<DynamicVlanSourceKind>,
    /// Forbid allocations from non-designated sources.
    strict: bool,
}

impl DynamicVlanSource {
    /// Creates the check.
    ///
    /// # Errors
    ///
    /// Returns [`InputError`] when the source list is empty.
    pub fn new(sources: Vec<DynamicVlanSourceKind>, strict: bool) -> Result<Self, InputError> {
        if sources.is_empty() {
            return Err(InputError::EmptyList("sources"));
        }
        Ok(Self {
            sources,
            strict,
        })
    }
}

impl TryFrom<DynamicVlanSourceInput> for DynamicVlanSource {
    type Error = InputError;

    fn try_from(input: DynamicVlanSourceInput) -> Result<Self, Self::Error> {
        Self::new(input.sources, input.strict)
    }
}

impl StateCheck for DynamicVlanSource {
    fn name(&self) -> &'static str {
        "dynamic_vlan_source"
    }

    fn categories(&self) -> &'static [&'static str] {
        &["vlan"]
    }

    fn commands(&self) -> Vec<ShowCommand> {
        vec![ShowCommand::json_revision("show vlan dynamic", 1)]
    }

    fn verify(&self, outputs: &[CommandOutput], result: &mut CheckResult) {
        result.mark_success();
        let Some(root) = require_json(outputs, 0, result) else {
            return;
        };
        let dynamic_vlans = root.get("dynamicVlans").and_then(Value::as_object);

        let expected: Vec<&str> =
            self.sources.iter().map(|source| source.as_str()).collect();
        let expected_joined = expected.join(", ");

        let actual: Vec<&str> = dynamic_vlans
            .map(|vlans| {
                vlans
                    .iter()
                    .filter(|(_, data)| {
                        data.get("vlanIds")
                            .and_then(Value::as_array)
                            .is_some_and(|ids| !ids.is_empty())
                    })
                    .map(|(source, _)| source.as_str())
                    .collect()
            })
            .unwrap_or_default();
        if actual.is_empty() {
            result.mark_failure(format!(
                "Dynamic VLANs sources {expected_joined} not found in the configuration"
            ));
            return;
        }
        let actual_joined = actual.join(", ");

        let mut expected_sorted = expected.clone();
        expected_sorted.sort_unstable();
        let mut actual_sorted = actual.clone();
        actual_sorted.sort_unstable();
        if self.strict && expected_sorted != actual_sorted {
            result.mark_failure(format!(
                "Dynamic VLAN allocation expected only from sources \
                 `{expected_joined}` Actual: `{actual_joined}`"
            ));
            return;
        }

        let absent =
            expected.iter().any(|source| !actual.contains(source));
        if absent {
            result.mark_failure(format!(
                "Dynamic VLAN(s) sources mismatch - \
                 Expected: `{expected_joined}` Actual: `{actual_joined}`"
            ));
        }
    }
}
