// crates/netcheck-checks/src/checks/mod.rs
// ============================================================================
// Module: Netcheck Check Catalog
// Description: Verification routines grouped by device area.
// Purpose: Compare fetched device output against validated expectations.
// Dependencies: netcheck-core, serde_json
// ============================================================================

//! ## Overview
//! One module per device area. Every check follows the same pattern: look up
//! a key path in the fetched nested mapping, compare to the expected literal
//! or computed value, and emit one diagnostic per mismatch. Verification is
//! pure; checks hold only their validated inputs.

// ============================================================================
// SECTION: Imports
// ============================================================================

use netcheck_core::CheckResult;
use netcheck_core::CommandOutput;
use serde_json::Value;

// ============================================================================
// SECTION: Modules
// ============================================================================

pub mod bgp;
pub mod connectivity;
pub mod hardware;
pub mod mlag;
pub mod software;
pub mod system;
pub mod vlan;
pub mod vxlan;

// ============================================================================
// SECTION: Output Access
// ============================================================================

/// Resolves the indexed output as JSON, recording an error when absent.
pub(crate) fn require_json<'a>(
    outputs: &'a [CommandOutput],
    index: usize,
    result: &mut CheckResult,
) -> Option<&'a Value> {
    let value = outputs.get(index).and_then(CommandOutput::as_json);
    if value.is_none() {
        result.mark_error("Structured device output is missing");
    }
    value
}

/// Resolves the indexed output as text, recording an error when absent.
pub(crate) fn require_text<'a>(
    outputs: &'a [CommandOutput],
    index: usize,
    result: &mut CheckResult,
) -> Option<&'a str> {
    let text = outputs.get(index).and_then(CommandOutput::as_text);
    if text.is_none() {
        result.mark_error("Textual device output is missing");
    }
    text
}

/// Formats a boolean the way the device renders capability flags.
pub(crate) const fn bool_label(flag: bool) -> &'static str {
    if flag { "True" } else { "False" }
}
