// crates/netcheck-checks/src/checks/mlag.rs
// ============================================================================
// Module: MLAG Checks
// Description: MLAG health, ports, config sanity, delays, and priority.
// Purpose: Validate multi-chassis link aggregation state.
// Dependencies: crate::checks, netcheck-core
// ============================================================================

//! ## Overview
//! Every MLAG check is skipped when MLAG is disabled on the device; a
//! disabled feature is not a failure. The detail view (`show mlag detail`)
//! backs dual-primary and priority checks, the plain view backs the rest.

// ============================================================================
// SECTION: Imports
// ============================================================================

use netcheck_core::CheckResult;
use netcheck_core::CommandOutput;
use netcheck_core::ShowCommand;
use netcheck_core::StateCheck;
use netcheck_core::get_value;
use serde::Deserialize;
use serde_json::Value;

use crate::checks::require_json;
use crate::inputs::InputError;

// ============================================================================
// SECTION: Constants
// ============================================================================

/// Highest configurable MLAG primary priority.
const MAX_PRIMARY_PRIORITY: u64 = 32_767;

// ============================================================================
// SECTION: Shared Guards
// ============================================================================

/// Returns true when the MLAG state marks the feature disabled.
fn mlag_disabled(root: &Value, result: &mut CheckResult) -> bool {
    if root.get("state").and_then(Value::as_str) == Some("disabled") {
        result.mark_skipped("MLAG is disabled");
        return true;
    }
    false
}

// ============================================================================
// SECTION: MLAG Status
// ============================================================================

/// Verifies MLAG negotiation, local interface, and peer link health.
#[derive(Debug, Clone, Copy, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct MlagStatus {}

impl MlagStatus {
    /// Creates the check.
    #[must_use]
    pub const fn new() -> Self {
        Self {}
    }
}

impl StateCheck for MlagStatus {
    fn name(&self) -> &'static str {
        "mlag_status"
    }

    fn categories(&self) -> &'static [&'static str] {
        &["mlag"]
    }

    fn commands(&self) -> Vec<ShowCommand> {
        vec![ShowCommand::json_revision("show mlag", 2)]
    }

    fn verify(&self, outputs: &[CommandOutput], result: &mut CheckResult) {
        result.mark_success();
        let Some(root) = require_json(outputs, 0, result) else {
            return;
        };
        if mlag_disabled(root, result) {
            return;
        }

        let negotiation = root.get("negStatus").and_then(Value::as_str).unwrap_or_default();
        if negotiation != "connected" {
            result.mark_failure(format!(
                "MLAG negotiation status mismatch - Expected: connected Actual: {negotiation}"
            ));
        }

        let local_interface =
            root.get("localIntfStatus").and_then(Value::as_str).unwrap_or_default();
        if local_interface != "up" {
            result.mark_failure(format!(
                "Operational state of the MLAG local interface is not correct - \
                 Expected: up Actual: {local_interface}"
            ));
        }

        let peer_link = root.get("peerLinkStatus").and_then(Value::as_str).unwrap_or_default();
        if peer_link != "up" {
            result.mark_failure(format!(
                "Operational state of the MLAG peer link is not correct - \
                 Expected: up Actual: {peer_link}"
            ));
        }
    }
}

// ============================================================================
// SECTION: MLAG Interfaces
// ============================================================================

/// Verifies no inactive or active-partial MLAG ports exist.
#[derive(Debug, Clone, Copy, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct MlagInterfaces {}

impl MlagInterfaces {
    /// Creates the check.
    #[must_use]
    pub const fn new() -> Self {
        Self {}
    }
}

impl StateCheck for MlagInterfaces {
    fn name(&self) -> &'static str {
        "mlag_interfaces"
    }

    fn categories(&self) -> &'static [&'static str] {
        &["mlag"]
    }

    fn commands(&self) -> Vec<ShowCommand> {
        vec![ShowCommand::json_revision("show mlag", 2)]
    }

    fn verify(&self, outputs: &[CommandOutput], result: &mut CheckResult) {
        result.mark_success();
        let Some(root) = require_json(outputs, 0, result) else {
            return;
        };
        if mlag_disabled(root, result) {
            return;
        }

        let inactive = get_value(root, "mlagPorts.Inactive").and_then(Value::as_u64);
        let partial = get_value(root, "mlagPorts.Active-partial").and_then(Value::as_u64);
        let (Some(inactive), Some(partial)) = (inactive, partial) else {
            result.mark_error("Invalid output: MLAG port counters not found");
            return;
        };
        if inactive != 0 || partial != 0 {
            result.mark_failure(format!(
                "MLAG status is not ok - Inactive Ports: {inactive} Partial Active Ports: {partial}"
            ));
        }
    }
}

// ============================================================================
// SECTION: MLAG Config Sanity
// ============================================================================

/// Verifies no MLAG config-sanity inconsistencies are reported.
#[derive(Debug, Clone, Copy, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct MlagConfigSanity {}

impl MlagConfigSanity {
    /// Creates the check.
    #[must_use]
    pub const fn new() -> Self {
        Self {}
    }
}

impl StateCheck for MlagConfigSanity {
    fn name(&self) -> &'static str {
        "mlag_config_sanity"
    }

    fn categories(&self) -> &'static [&'static str] {
        &["mlag"]
    }

    fn commands(&self) -> Vec<ShowCommand> {
        vec![ShowCommand::json_revision("show mlag config-sanity", 1)]
    }

    fn verify(&self, outputs: &[CommandOutput], result: &mut CheckResult) {
        result.mark_success();
        let Some(root) = require_json(outputs, 0, result) else {
            return;
        };
        let Some(active) = root.get("mlagActive").and_then(Value::as_bool) else {
            result.mark_error("Invalid output: 'mlagActive' not found");
            return;
        };
        if !active {
            result.mark_skipped("MLAG is disabled");
            return;
        }

        let populated = |key: &str| {
            root.get(key).is_some_and(|section| match section {
                Value::Object(map) => !map.is_empty(),
                Value::Array(items) => !items.is_empty(),
                _ => false,
            })
        };
        if populated("globalConfiguration") {
            result.mark_failure("MLAG config-sanity found in global configuration");
        }
        if populated("interfaceConfiguration") {
            result.mark_failure("MLAG config-sanity found in interface configuration");
        }
    }
}

// ============================================================================
// SECTION: MLAG Reload Delay
// ============================================================================

/// Verifies MLAG reload-delay timers.
#[derive(Debug, Clone, Copy, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct MlagReloadDelay {
    /// Delay until MLAG ports are enabled after reboot, in seconds.
    reload_delay: u64,
    /// Delay until non-MLAG ports are enabled after reboot, in seconds.
    reload_delay_non_mlag: u64,
}

impl MlagReloadDelay {
    /// Creates the check.
    #[must_use]
    pub const fn new(reload_delay: u64, reload_delay_non_mlag: u64) -> Self {
        Self {
            reload_delay,
            reload_delay_non_mlag,
        }
    }
}

impl StateCheck for MlagReloadDelay {
    fn name(&self) -> &'static str {
        "mlag_reload_delay"
    }

    fn categories(&self) -> &'static [&'static str] {
        &["mlag"]
    }

    fn commands(&self) -> Vec<ShowCommand> {
        vec![ShowCommand::json_revision("show mlag", 2)]
    }

    fn verify(&self, outputs: &[CommandOutput], result: &mut CheckResult) {
        result.mark_success();
        let Some(root) = require_json(outputs, 0, result) else {
            return;
        };
        if mlag_disabled(root, result) {
            return;
        }

        let reload_delay = root.get("reloadDelay").and_then(Value::as_u64).unwrap_or_default();
        if reload_delay != self.reload_delay {
            result.mark_failure(format!(
                "MLAG reload-delay mismatch - Expected: {}s Actual: {reload_delay}s",
                self.reload_delay
            ));
        }

        let non_mlag =
            root.get("reloadDelayNonMlag").and_then(Value::as_u64).unwrap_or_default();
        if non_mlag != self.reload_delay_non_mlag {
            result.mark_failure(format!(
                "Delay for non-MLAG ports mismatch - Expected: {}s Actual: {non_mlag}s",
                self.reload_delay_non_mlag
            ));
        }
    }
}

// ============================================================================
// SECTION: MLAG Dual-Primary
// ============================================================================

/// Verifies dual-primary detection and its recovery parameters.
#[derive(Debug, Clone, Copy, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct MlagDualPrimary {
    /// Detection delay in seconds.
    detection_delay: u64,
    /// Errdisable all interfaces when dual-primary is detected.
    #[serde(default)]
    errdisabled: bool,
    /// Recovery delay for MLAG ports, in seconds.
    recovery_delay: u64,
    /// Recovery delay for non-MLAG ports, in seconds.
    recovery_delay_non_mlag: u64,
}

impl MlagDualPrimary {
    /// Creates the check.
    #[must_use]
    pub const fn new(
        detection_delay: u64,
        errdisabled: bool,
        recovery_delay: u64,
        recovery_delay_non_mlag: u64,
    ) -> Self {
        Self {
            detection_delay,
            errdisabled,
            recovery_delay,
            recovery_delay_non_mlag,
        }
    }
}

impl StateCheck for MlagDualPrimary {
    fn name(&self) -> &'static str {
        "mlag_dual_primary"
    }

    fn categories(&self) -> &'static [&'static str] {
        &["mlag"]
    }

    fn commands(&self) -> Vec<ShowCommand> {
        vec![ShowCommand::json_revision("show mlag detail", 2)]
    }

    fn verify(&self, outputs: &[CommandOutput], result: &mut CheckResult) {
        result.mark_success();
        let Some(root) = require_json(outputs, 0, result) else {
            return;
        };
        if mlag_disabled(root, result) {
            return;
        }

        if root.get("dualPrimaryDetectionState").and_then(Value::as_str) == Some("disabled") {
            result.mark_failure("Dual-primary detection is disabled");
            return;
        }

        let expected_action = if self.errdisabled { "errdisableAllInterfaces" } else { "none" };
        let action = get_value(root, "detail.dualPrimaryAction")
            .and_then(Value::as_str)
            .unwrap_or_default();
        if action != expected_action {
            result.mark_failure(format!(
                "Dual-primary action mismatch - Expected: {expected_action} Actual: {action}"
            ));
        }

        let detection_delay = get_value(root, "detail.dualPrimaryDetectionDelay")
            .and_then(Value::as_u64)
            .unwrap_or_default();
        if detection_delay != self.detection_delay {
            result.mark_failure(format!(
                "Dual-primary detection delay mismatch - Expected: {} Actual: {detection_delay}",
                self.detection_delay
            ));
        }

        let recovery_delay =
            root.get("dualPrimaryMlagRecoveryDelay").and_then(Value::as_u64).unwrap_or_default();
        if recovery_delay != self.recovery_delay {
            result.mark_failure(format!(
                "Dual-primary MLAG recovery delay mismatch - Expected: {} Actual: {recovery_delay}",
                self.recovery_delay
            ));
        }

        let non_mlag_recovery = root
            .get("dualPrimaryNonMlagRecoveryDelay")
            .and_then(Value::as_u64)
            .unwrap_or_default();
        if non_mlag_recovery != self.recovery_delay_non_mlag {
            result.mark_failure(format!(
                "Dual-primary non MLAG recovery delay mismatch - \
                 Expected: {} Actual: {non_mlag_recovery}",
                self.recovery_delay_non_mlag
            ));
        }
    }
}

// ============================================================================
// SECTION: MLAG Primary Priority
// ============================================================================

/// Raw input for the primary-priority check.
#[derive(Debug, Clone, Copy, Deserialize)]
#[serde(deny_unknown_fields)]
struct MlagPrimaryPriorityInput {
    /// Expected primary priority.
    primary_priority: u64,
}

/// Verifies the device is MLAG primary with the expected priority.
#[derive(Debug, Clone, Copy, Deserialize)]
#[serde(try_from = "MlagPrimaryPriorityInput")]
pub struct MlagPrimaryPriority {
    /// Expected primary priority.
    primary_priority: u64,
}

impl MlagPrimaryPriority {
    /// Creates the check.
    ///
    /// # Errors
    ///
    /// Returns [`InputError`] when the priority is outside the device range.
    pub const fn new(primary_priority: u64) -> Result<Self, InputError> {
        if primary_priority == 0 || primary_priority > MAX_PRIMARY_PRIORITY {
            return Err(InputError::OutOfRange {
                field: "primary_priority",
                value: primary_priority,
                range: "1..=32767",
            });
        }
        Ok(Self {
            primary_priority,
        })
    }
}

impl TryFrom<MlagPrimaryPriorityInput> for MlagPrimaryPriority {
    type Error = InputError;

    fn try_from(input: MlagPrimaryPriorityInput) -> Result<Self, Self::Error> {
        Self::new(input.primary_priority)
    }
}

impl StateCheck for MlagPrimaryPriority {
    fn name(&self) -> &'static str {
        "mlag_primary_priority"
    }

    fn categories(&self) -> &'static [&'static str] {
        &["mlag"]
    }

    fn commands(&self) -> Vec<ShowCommand> {
        vec![ShowCommand::json_revision("show mlag detail", 2)]
    }

    fn verify(&self, outputs: &[CommandOutput], result: &mut CheckResult) {
        result.mark_success();
        let Some(root) = require_json(outputs, 0, result) else {
            return;
        };
        if mlag_disabled(root, result) {
            return;
        }

        if get_value(root, "detail.mlagState").and_then(Value::as_str) != Some("primary") {
            result.mark_failure("The device is not set as MLAG primary");
        }

        let priority =
            get_value(root, "detail.primaryPriority").and_then(Value::as_u64).unwrap_or_default();
        if priority != self.primary_priority {
            result.mark_failure(format!(
                "MLAG primary priority mismatch - Expected: {} Actual: {priority}",
                self.primary_priority
            ));
        }
    }
}
