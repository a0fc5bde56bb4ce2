// crates/netcheck-core/tests/run_check_unit.rs
// ============================================================================
// Module: Check Execution Unit Tests
// Description: Tests for run_check glue over command sources.
// Purpose: Ensure transport and shape failures become error results.
// ============================================================================

//! Unit tests for check execution against replay sources.

#![allow(
    clippy::panic,
    clippy::print_stdout,
    clippy::print_stderr,
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::use_debug,
    clippy::dbg_macro,
    clippy::panic_in_result_fn,
    clippy::unwrap_in_result,
    reason = "Test-only assertions and helpers are permitted."
)]

use netcheck_core::CheckResult;
use netcheck_core::CheckStatus;
use netcheck_core::CollectError;
use netcheck_core::CommandOutput;
use netcheck_core::CommandSource;
use netcheck_core::ShowCommand;
use netcheck_core::StateCheck;
use netcheck_core::StaticSource;
use netcheck_core::run_check;
use serde_json::json;

/// Check asserting a fixed state flag in a single JSON output.
struct StateFlagCheck;

impl StateCheck for StateFlagCheck {
    fn name(&self) -> &'static str {
        "state_flag"
    }

    fn categories(&self) -> &'static [&'static str] {
        &["test"]
    }

    fn commands(&self) -> Vec<ShowCommand> {
        vec![ShowCommand::json_revision("show state", 1)]
    }

    fn verify(&self, outputs: &[CommandOutput], result: &mut CheckResult) {
        result.mark_success();
        let state = outputs[0]
            .as_json()
            .and_then(|root| root.get("state"))
            .and_then(serde_json::Value::as_str);
        if state != Some("active") {
            result.mark_failure(format!(
                "State mismatch - Expected: active Actual: {}",
                state.unwrap_or("Not Found")
            ));
        }
    }
}

/// Source that always fails at the transport layer.
struct BrokenSource;

impl CommandSource for BrokenSource {
    fn collect(&self, _commands: &[ShowCommand]) -> Result<Vec<CommandOutput>, CollectError> {
        Err(CollectError::Transport("device unreachable".to_string()))
    }
}

/// Matching output produces a success with no messages.
#[test]
fn run_check_success() {
    let source = StaticSource::new(vec![CommandOutput::Json(json!({"state": "active"}))]);
    let result = run_check(&StateFlagCheck, &source);
    assert_eq!(result.name, "state_flag");
    assert_eq!(result.status, CheckStatus::Success);
    assert!(result.messages.is_empty());
}

/// A mismatching output produces a failure diagnostic.
#[test]
fn run_check_failure() {
    let source = StaticSource::new(vec![CommandOutput::Json(json!({"state": "standby"}))]);
    let result = run_check(&StateFlagCheck, &source);
    assert_eq!(result.status, CheckStatus::Failure);
    assert_eq!(result.messages, vec!["State mismatch - Expected: active Actual: standby"]);
}

/// Transport failures surface as error results, not panics.
#[test]
fn run_check_transport_error() {
    let result = run_check(&StateFlagCheck, &BrokenSource);
    assert_eq!(result.status, CheckStatus::Error);
    assert_eq!(result.messages, vec!["command collection failed: device unreachable"]);
}

/// A replay source with no recorded output reports the missing command.
#[test]
fn run_check_missing_output() {
    let source = StaticSource::new(Vec::new());
    let result = run_check(&StateFlagCheck, &source);
    assert_eq!(result.status, CheckStatus::Error);
    assert_eq!(result.messages, vec!["no output recorded for command: show state"]);
}

/// Text output against a JSON declaration is a format error.
#[test]
fn run_check_format_mismatch() {
    let source = StaticSource::new(vec![CommandOutput::Text("state: active".to_string())]);
    let result = run_check(&StateFlagCheck, &source);
    assert_eq!(result.status, CheckStatus::Error);
    assert_eq!(
        result.messages,
        vec!["Output format mismatch for command 'show state' - Expected: json Actual: text"]
    );
}

/// Extra recorded outputs beyond the declared commands are ignored.
#[test]
fn run_check_extra_outputs_ignored() {
    let source = StaticSource::new(vec![
        CommandOutput::Json(json!({"state": "active"})),
        CommandOutput::Json(json!({"state": "leftover"})),
    ]);
    let result = run_check(&StateFlagCheck, &source);
    assert_eq!(result.status, CheckStatus::Success);
}
