// crates/netcheck-core/src/core/result.rs
// ============================================================================
// Module: Netcheck Check Results
// Description: Per-check status and ordered diagnostic messages.
// Purpose: Record verification outcomes deterministically.
// Dependencies: serde
// ============================================================================

//! ## Overview
//! A check result starts unset and is driven by recording operations that
//! only escalate: success never overwrites a failure, a failure never
//! overwrites an error. Messages are append-only, so for a fixed input
//! ordering the diagnostic ordering is stable.

// ============================================================================
// SECTION: Imports
// ============================================================================

use serde::Deserialize;
use serde::Serialize;

// ============================================================================
// SECTION: Check Status
// ============================================================================

/// Final status of a completed check.
///
/// # Invariants
/// - Variants are stable for serialization and report matching.
/// - Declaration order is severity order; recording never lowers severity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CheckStatus {
    /// No outcome recorded yet.
    Unset,
    /// All expectations were met.
    Success,
    /// The check did not apply to the device state.
    Skipped,
    /// At least one expectation was not met.
    Failure,
    /// Device output was missing, malformed, or could not be fetched.
    Error,
}

// ============================================================================
// SECTION: Check Result
// ============================================================================

/// Outcome of a single check with ordered diagnostics.
///
/// # Invariants
/// - `messages` is append-only and ordered by recording sequence.
/// - `status` only escalates across recording operations.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CheckResult {
    /// Check name the result belongs to.
    pub name: String,
    /// Final status.
    pub status: CheckStatus,
    /// Human-readable diagnostics, one per mismatch.
    pub messages: Vec<String>,
}

impl CheckResult {
    /// Creates an unset result for the named check.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            status: CheckStatus::Unset,
            messages: Vec::new(),
        }
    }

    /// Records that all expectations were met so far.
    pub fn mark_success(&mut self) {
        self.escalate(CheckStatus::Success);
    }

    /// Records a skipped check with an explanatory message.
    pub fn mark_skipped(&mut self, message: impl Into<String>) {
        self.messages.push(message.into());
        self.escalate(CheckStatus::Skipped);
    }

    /// Records one unmet expectation.
    pub fn mark_failure(&mut self, message: impl Into<String>) {
        self.messages.push(message.into());
        self.escalate(CheckStatus::Failure);
    }

    /// Records malformed or missing device output.
    pub fn mark_error(&mut self, message: impl Into<String>) {
        self.messages.push(message.into());
        self.escalate(CheckStatus::Error);
    }

    /// Returns true when the check passed or did not apply.
    #[must_use]
    pub fn is_clean(&self) -> bool {
        matches!(self.status, CheckStatus::Success | CheckStatus::Skipped)
    }

    /// Escalates the status, never lowering severity.
    fn escalate(&mut self, status: CheckStatus) {
        if status > self.status {
            self.status = status;
        }
    }
}
