// crates/netcheck-checks/src/checks/software.rs
// ============================================================================
// Module: Software Checks
// Description: Operating system, TerminAttr, and extension versions.
// Purpose: Validate running software against accepted version lists.
// Dependencies: crate::checks, netcheck-core
// ============================================================================

//! ## Overview
//! Version checks compare a single reported string against an accepted
//! list. The extension check compares two outputs: extensions installed on
//! the device against extensions configured to load at boot.

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
use crate::inputs::InputError;

// ============================================================================
// SECTION: EOS Version
// ============================================================================

/// Raw input for the EOS version check.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
struct EosVersionInput {
    /// Accepted version strings.
    versions: Vec<String>,
}

/// Verifies the running EOS version is within an accepted list.
#[derive(Debug, Clone, Deserialize)]
#[serde(try_from = "EosVersionInput")]
pub struct EosVersion {
    /// Accepted version strings.
    versions: Vec<String>,
}

impl EosVersion {
    /// Creates the check.
    ///
    /// # Errors
    ///
    /// Returns [`InputError`] when the version list is empty.
    pub fn new(versions: Vec<String>) -> Result<Self, InputError> {
        if versions.is_empty() {
            return Err(InputError::EmptyList("versions"));
        }
        Ok(Self {
            versions,
        })
    }
}

impl TryFrom<EosVersionInput> for EosVersion {
    type Error = InputError;

    fn try_from(input: EosVersionInput) -> Result<Self, Self::Error> {
        Self::new(input.versions)
    }
}

impl StateCheck for EosVersion {
    fn name(&self) -> &'static str {
        "eos_version"
    }

    fn categories(&self) -> &'static [&'static str] {
        &["software"]
    }

    fn commands(&self) -> Vec<ShowCommand> {
        vec![ShowCommand::json_revision("show version", 1)]
    }

    fn verify(&self, outputs: &[CommandOutput], result: &mut CheckResult) {
        result.mark_success();
        let Some(root) = require_json(outputs, 0, result) else {
            return;
        };
        let Some(version) = root.get("version").and_then(Value::as_str) else {
            result.mark_error("Invalid output: 'version' not found");
            return;
        };
        if !self.versions.iter().any(|accepted| accepted == version) {
            result.mark_failure(format!(
                "EOS version mismatch - Actual: {version} not in Expected: {}",
                self.versions.join(", ")
            ));
        }
    }
}

// ============================================================================
// SECTION: TerminAttr Version
// ============================================================================

/// Raw input for the TerminAttr version check.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
struct TerminAttrVersionInput {
    /// Accepted version strings.
    versions: Vec<String>,
}

/// Verifies the TerminAttr agent version is within an accepted list.
#[derive(Debug, Clone, Deserialize)]
#[serde(try_from = "TerminAttrVersionInput")]
pub struct TerminAttrVersion {
    /// Accepted version strings.
    versions: Vec<String>,
}

impl TerminAttrVersion {
    /// Creates the check.
    ///
    /// # Errors
    ///
    /// Returns [`InputError`] when the version list is empty.
    pub fn new(versions: Vec<String>) -> Result<Self, InputError> {
        if versions.is_empty() {
            return Err(InputError::EmptyList("versions"));
        }
        Ok(Self {
            versions,
        })
    }
}

impl TryFrom<TerminAttrVersionInput> for TerminAttrVersion {
    type Error = InputError;

    fn try_from(input: TerminAttrVersionInput) -> Result<Self, Self::Error> {
        Self::new(input.versions)
    }
}

impl StateCheck for TerminAttrVersion {
    fn name(&self) -> &'static str {
        "terminattr_version"
    }

    fn categories(&self) -> &'static [&'static str] {
        &["software"]
    }

    fn commands(&self) -> Vec<ShowCommand> {
        vec![ShowCommand::json_revision("show version detail", 1)]
    }

    fn verify(&self, outputs: &[CommandOutput], result: &mut CheckResult) {
        result.mark_success();
        let Some(root) = require_json(outputs, 0, result) else {
            return;
        };
        let version = root
            .get("details")
            .and_then(|details| details.get("packages"))
            .and_then(|packages| packages.get("TerminAttr-core"))
            .and_then(|package| package.get("version"))
            .and_then(Value::as_str);
        let Some(version) = version else {
            result.mark_error("Invalid output: TerminAttr version not found");
            return;
        };
        if !self.versions.iter().any(|accepted| accepted == version) {
            result.mark_failure(format!(
                "TerminAttr version mismatch - Actual: {version} not in Expected: {}",
                self.versions.join(", ")
            ));
        }
    }
}

// ============================================================================
// SECTION: EOS Extensions
// ============================================================================

/// Verifies installed extensions match boot extensions.
#[derive(Debug, Clone, Copy, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct EosExtensions {}

impl EosExtensions {
    /// Creates the check.
    #[must_use]
    pub const fn new() -> Self {
        Self {}
    }
}

impl StateCheck for EosExtensions {
    fn name(&self) -> &'static str {
        "eos_extensions"
    }

    fn categories(&self) -> &'static [&'static str] {
        &["software"]
    }

    fn commands(&self) -> Vec<ShowCommand> {
        vec![
            ShowCommand::json_revision("show extensions", 2),
            ShowCommand::json_revision("show boot-extensions", 1),
        ]
    }

    fn verify(&self, outputs: &[CommandOutput], result: &mut CheckResult) {
        result.mark_success();
        let Some(extensions_root) = require_json(outputs, 0, result) else {
            return;
        };
        let Some(boot_root) = require_json(outputs, 1, result) else {
            return;
        };

        let mut installed: Vec<&str> = extensions_root
            .get("extensions")
            .and_then(Value::as_object)
            .map(|extensions| {
                extensions
                    .iter()
                    .filter(|(_, data)| {
                        data.get("status").and_then(Value::as_str) == Some("installed")
                    })
                    .map(|(name, _)| name.as_str())
                    .collect()
            })
            .unwrap_or_default();
        installed.sort_unstable();

        let mut configured: Vec<&str> = boot_root
            .get("extensions")
            .and_then(Value::as_array)
            .map(|extensions| {
                extensions
                    .iter()
                    .filter_map(Value::as_str)
                    .filter(|name| !name.is_empty())
                    .collect()
            })
            .unwrap_or_default();
        configured.sort_unstable();

        if installed != configured {
            let installed_label = if installed.is_empty() {
                "Not found".to_string()
            } else {
                installed.join(", ")
            };
            let configured_label = if configured.is_empty() {
                "Not found".to_string()
            } else {
                configured.join(", ")
            };
            result.mark_failure(format!(
                "EOS extensions mismatch - Installed: {installed_label} \
                 Configured: {configured_label}"
            ));
        }
    }
}
