// crates/netcheck-core/src/core/report.rs
// ============================================================================
// Module: Netcheck Run Reports
// Description: Aggregation of check results across a run.
// Purpose: Collect statuses and messages per check deterministically.
// Dependencies: crate::core::result, serde
// ============================================================================

//! ## Overview
//! A run report collects results in submission order and derives per-status
//! counts. Aggregation is append-only; nothing in a report mutates the
//! results it holds.

// ============================================================================
// SECTION: Imports
// ============================================================================

use serde::Deserialize;
use serde::Serialize;

use crate::core::result::CheckResult;
use crate::core::result::CheckStatus;

// ============================================================================
// SECTION: Report Summary
// ============================================================================

/// Per-status counts for a run.
///
/// # Invariants
/// - Counts sum to the number of results in the report they summarize.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReportSummary {
    /// Results with no outcome recorded.
    pub unset: usize,
    /// Passing results.
    pub success: usize,
    /// Results that did not apply.
    pub skipped: usize,
    /// Results with unmet expectations.
    pub failure: usize,
    /// Results with malformed or missing output.
    pub error: usize,
}

// ============================================================================
// SECTION: Run Report
// ============================================================================

/// Append-only collection of check results.
///
/// # Invariants
/// - Results are ordered by submission and never reordered.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RunReport {
    /// Collected results in submission order.
    results: Vec<CheckResult>,
}

impl RunReport {
    /// Creates an empty report.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            results: Vec::new(),
        }
    }

    /// Appends a result to the report.
    pub fn push(&mut self, result: CheckResult) {
        self.results.push(result);
    }

    /// Returns the collected results in submission order.
    #[must_use]
    pub fn results(&self) -> &[CheckResult] {
        &self.results
    }

    /// Returns the number of collected results.
    #[must_use]
    pub fn len(&self) -> usize {
        self.results.len()
    }

    /// Returns true when no results have been collected.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.results.is_empty()
    }

    /// Returns the results recorded with the given status.
    pub fn with_status(&self, status: CheckStatus) -> impl Iterator<Item = &CheckResult> {
        self.results.iter().filter(move |result| result.status == status)
    }

    /// Derives per-status counts.
    #[must_use]
    pub fn summary(&self) -> ReportSummary {
        let mut summary = ReportSummary::default();
        for result in &self.results {
            match result.status {
                CheckStatus::Unset => summary.unset += 1,
                CheckStatus::Success => summary.success += 1,
                CheckStatus::Skipped => summary.skipped += 1,
                CheckStatus::Failure => summary.failure += 1,
                CheckStatus::Error => summary.error += 1,
            }
        }
        summary
    }

    /// Returns true when every result passed or did not apply.
    #[must_use]
    pub fn is_clean(&self) -> bool {
        self.results.iter().all(CheckResult::is_clean)
    }
}
