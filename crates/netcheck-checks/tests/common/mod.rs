// crates/netcheck-checks/tests/common/mod.rs
// ============================================================================
// Module: Check Test Helpers
// Description: Replay helpers and assertion shorthands for check tests.
// Purpose: Run checks against canned device output fixtures.
// ============================================================================

//! Shared helpers for the check test suites.

#![allow(dead_code, reason = "Each test binary uses a subset of the helpers.")]
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
use netcheck_core::CommandOutput;
use netcheck_core::StateCheck;
use netcheck_core::StaticSource;
use netcheck_core::run_check;
use serde_json::Value;

/// Runs a check against recorded outputs.
pub fn run(check: &dyn StateCheck, outputs: Vec<CommandOutput>) -> CheckResult {
    run_check(check, &StaticSource::new(outputs))
}

/// Runs a check against a single JSON output.
pub fn run_json(check: &dyn StateCheck, root: Value) -> CheckResult {
    run(check, vec![CommandOutput::Json(root)])
}

/// Runs a check against a single textual output.
pub fn run_text(check: &dyn StateCheck, text: &str) -> CheckResult {
    run(check, vec![CommandOutput::Text(text.to_string())])
}

/// Asserts a success with no messages.
pub fn expect_success(result: &CheckResult) {
    assert_eq!(result.status, CheckStatus::Success, "messages: {:?}", result.messages);
    assert!(result.messages.is_empty(), "messages: {:?}", result.messages);
}

/// Asserts a failure with exactly the given messages, in order.
pub fn expect_failure(result: &CheckResult, messages: &[&str]) {
    assert_eq!(result.status, CheckStatus::Failure, "messages: {:?}", result.messages);
    assert_eq!(result.messages, messages);
}

/// Asserts a skip with exactly the given message.
pub fn expect_skipped(result: &CheckResult, message: &str) {
    assert_eq!(result.status, CheckStatus::Skipped, "messages: {:?}", result.messages);
    assert_eq!(result.messages, vec![message.to_string()]);
}

/// Asserts an error status with exactly the given messages, in order.
pub fn expect_error(result: &CheckResult, messages: &[&str]) {
    assert_eq!(result.status, CheckStatus::Error, "messages: {:?}", result.messages);
    assert_eq!(result.messages, messages);
}
