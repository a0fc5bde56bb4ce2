// crates/netcheck-core/src/interfaces/mod.rs
// ============================================================================
// Module: Netcheck Interfaces
// Description: Transport-agnostic seams between checks and devices.
// Purpose: Define the contract surfaces used by the check catalog.
// Dependencies: crate::core, thiserror
// ============================================================================

//! ## Overview
//! Interfaces separate pure verification logic from the device transport.
//! A check declares commands and verifies outputs; a command source fetches
//! outputs however it likes. Implementations must be deterministic and fail
//! closed: transport failures and output-shape mismatches become
//! error-status results, never panics.

// ============================================================================
// SECTION: Imports
// ============================================================================

use thiserror::Error;

use crate::core::command::CommandOutput;
use crate::core::command::OutputFormat;
use crate::core::command::ShowCommand;
use crate::core::result::CheckResult;

// ============================================================================
// SECTION: State Check
// ============================================================================

/// Declarative network-state check.
///
/// A check is stateless between executions: `commands` derives entirely from
/// the validated input model, and `verify` is a pure comparison of fetched
/// outputs against it.
pub trait StateCheck {
    /// Stable check name used in catalogs and results.
    fn name(&self) -> &'static str;

    /// Device areas the check belongs to.
    fn categories(&self) -> &'static [&'static str];

    /// Read-only commands the check needs, in verification order.
    fn commands(&self) -> Vec<ShowCommand>;

    /// Compares fetched outputs against the input model.
    ///
    /// `outputs` is aligned with `commands`; the runner guarantees matching
    /// length and per-command format before calling.
    fn verify(&self, outputs: &[CommandOutput], result: &mut CheckResult);
}

// ============================================================================
// SECTION: Command Source
// ============================================================================

/// Command collection errors.
///
/// # Invariants
/// - Variants are stable for programmatic handling.
#[derive(Debug, Error)]
pub enum CollectError {
    /// Transport-level failure reported by the source.
    #[error("command collection failed: {0}")]
    Transport(String),
    /// The source has no output recorded for a command.
    #[error("no output recorded for command: {0}")]
    MissingOutput(String),
}

/// Transport-agnostic source of command outputs.
pub trait CommandSource {
    /// Fetches one output per command, in command order.
    ///
    /// # Errors
    ///
    /// Returns [`CollectError`] when outputs cannot be fetched.
    fn collect(&self, commands: &[ShowCommand]) -> Result<Vec<CommandOutput>, CollectError>;
}

/// Replay source backed by recorded outputs.
///
/// # Invariants
/// - Outputs are consumed positionally; the nth command receives the nth
///   recorded output.
#[derive(Debug, Clone)]
pub struct StaticSource {
    /// Recorded outputs in command order.
    outputs: Vec<CommandOutput>,
}

impl StaticSource {
    /// Creates a replay source from recorded outputs.
    #[must_use]
    pub const fn new(outputs: Vec<CommandOutput>) -> Self {
        Self {
            outputs,
        }
    }
}

impl CommandSource for StaticSource {
    fn collect(&self, commands: &[ShowCommand]) -> Result<Vec<CommandOutput>, CollectError> {
        if commands.len() > self.outputs.len() {
            let missing = &commands[self.outputs.len()];
            return Err(CollectError::MissingOutput(missing.command.clone()));
        }
        Ok(self.outputs[.. commands.len()].to_vec())
    }
}

// ============================================================================
// SECTION: Check Execution
// ============================================================================

/// Executes one check against a command source.
///
/// Transport failures, output-count mismatches, and format mismatches are
/// recorded as error-status results; `verify` runs only on well-shaped
/// outputs. Checks never affect each other.
#[must_use]
pub fn run_check(check: &dyn StateCheck, source: &dyn CommandSource) -> CheckResult {
    let mut result = CheckResult::new(check.name());
    let commands = check.commands();

    let outputs = match source.collect(&commands) {
        Ok(outputs) => outputs,
        Err(error) => {
            result.mark_error(error.to_string());
            return result;
        }
    };

    if outputs.len() != commands.len() {
        result.mark_error(format!(
            "Output count mismatch - Expected: {} Actual: {}",
            commands.len(),
            outputs.len()
        ));
        return result;
    }

    for (command, output) in commands.iter().zip(&outputs) {
        if command.format != output.format() {
            let expected = format_label(command.format);
            let actual = format_label(output.format());
            result.mark_error(format!(
                "Output format mismatch for command '{}' - Expected: {expected} Actual: {actual}",
                command.command
            ));
            return result;
        }
    }

    check.verify(&outputs, &mut result);
    result
}

/// Returns a stable label for an output format.
const fn format_label(format: OutputFormat) -> &'static str {
    match format {
        OutputFormat::Json => "json",
        OutputFormat::Text => "text",
    }
}
