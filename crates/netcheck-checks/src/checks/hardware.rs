// crates/netcheck-checks/src/checks/hardware.rs
// ============================================================================
// Module: Hardware Checks
// Description: Adverse drop and PCIe error counter thresholds.
// Purpose: Validate hardware counters stay within declared limits.
// Dependencies: crate::checks, crate::inputs::hardware, netcheck-core
// ============================================================================

//! ## Overview
//! Hardware checks walk per-entity counter tables and compare each counter
//! against its declared threshold. Thresholds default to zero, so an
//! unconfigured check fails on any drop or error.

// ============================================================================
// SECTION: Imports
// ============================================================================

use netcheck_core::CheckResult;
use netcheck_core::CommandOutput;
use netcheck_core::ShowCommand;
use netcheck_core::StateCheck;
use serde::Deserialize;
use serde_json::Value;

use crate::checks::require_json;
use crate::inputs::hardware::AdverseDropThresholds;
use crate::inputs::hardware::PcieThresholds;

// ============================================================================
// SECTION: Adverse Drops
// ============================================================================

/// Verifies adverse drop counters stay within thresholds.
#[derive(Debug, Clone, Copy, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct AdverseDropCounters {
    /// Per-window drop thresholds.
    #[serde(default)]
    thresholds: AdverseDropThresholds,
}

impl AdverseDropCounters {
    /// Creates the check.
    #[must_use]
    pub const fn new(thresholds: AdverseDropThresholds) -> Self {
        Self {
            thresholds,
        }
    }
}

impl StateCheck for AdverseDropCounters {
    fn name(&self) -> &'static str {
        "adverse_drop_counters"
    }

    fn categories(&self) -> &'static [&'static str] {
        &["hardware"]
    }

    fn commands(&self) -> Vec<ShowCommand> {
        vec![ShowCommand::json_revision("show hardware counter drop", 1)]
    }

    fn verify(&self, outputs: &[CommandOutput], result: &mut CheckResult) {
        result.mark_success();
        let Some(root) = require_json(outputs, 0, result) else {
            return;
        };
        let Some(events) = root.get("dropEvents").and_then(Value::as_object) else {
            result.mark_error("Invalid output: 'dropEvents' not found");
            return;
        };

        for (counter, data) in events {
            for (key, label, limit) in self.thresholds.windows() {
                let value = data.get(key).and_then(Value::as_u64).unwrap_or_default();
                if value > limit {
                    result.mark_failure(format!(
                        "Counter: {counter} Period: {label} - Threshold exceeded - \
                         Expected: <= {limit} Actual: {value}"
                    ));
                }
            }
        }
    }
}

// ============================================================================
// SECTION: PCIe Errors
// ============================================================================

/// Verifies PCIe error counters stay within thresholds.
#[derive(Debug, Clone, Copy, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct PcieErrorCounters {
    /// Per-counter error thresholds.
    #[serde(default)]
    thresholds: PcieThresholds,
}

impl PcieErrorCounters {
    /// Creates the check.
    #[must_use]
    pub const fn new(thresholds: PcieThresholds) -> Self {
        Self {
            thresholds,
        }
    }
}

impl StateCheck for PcieErrorCounters {
    fn name(&self) -> &'static str {
        "pcie_error_counters"
    }

    fn categories(&self) -> &'static [&'static str] {
        &["hardware"]
    }

    fn commands(&self) -> Vec<ShowCommand> {
        vec![ShowCommand::json_revision("show pci", 1)]
    }

    fn verify(&self, outputs: &[CommandOutput], result: &mut CheckResult) {
        result.mark_success();
        let Some(root) = require_json(outputs, 0, result) else {
            return;
        };
        let Some(devices) = root.get("pciIds").and_then(Value::as_object) else {
            result.mark_error("Invalid output: 'pciIds' not found");
            return;
        };

        for (device, data) in devices {
            for (key, label, limit) in self.thresholds.counters() {
                let value = data.get(key).and_then(Value::as_u64).unwrap_or_default();
                if value > limit {
                    result.mark_failure(format!(
                        "Device: {device} Counter: {label} - Threshold exceeded - \
                         Expected: <= {limit} Actual: {value}"
                    ));
                }
            }
        }
    }
}
