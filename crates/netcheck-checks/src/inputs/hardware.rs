// crates/netcheck-checks/src/inputs/hardware.rs
// ============================================================================
// Module: Hardware Input Models
// Description: Counter threshold descriptors for hardware checks.
// Purpose: Declare integer limits for adverse drop and PCIe error counters.
// Dependencies: serde
// ============================================================================

//! ## Overview
//! Threshold descriptors are named integer limits. Field aliases match the
//! counter keys the device reports, so a threshold block can be written in
//! either configuration style. All limits default to zero: any drop or
//! error is a failure unless explicitly tolerated.

// ============================================================================
// SECTION: Imports
// ============================================================================

use serde::Deserialize;

// ============================================================================
// SECTION: Adverse Drop Thresholds
// ============================================================================

/// Thresholds for adverse drop counters over five time windows.
///
/// # Invariants
/// - A counter value above a window's limit is a failure for that window.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct AdverseDropThresholds {
    /// Threshold for the last minute.
    #[serde(default, alias = "dropInLastMinute")]
    pub minute: u64,
    /// Threshold for the last ten minutes.
    #[serde(default, alias = "dropInLastTenMinute")]
    pub ten_minute: u64,
    /// Threshold for the last hour.
    #[serde(default, alias = "dropInLastOneHour")]
    pub hour: u64,
    /// Threshold for the last day.
    #[serde(default, alias = "dropInLastOneDay")]
    pub day: u64,
    /// Threshold for the last week.
    #[serde(default, alias = "dropInLastOneWeek")]
    pub week: u64,
}

impl AdverseDropThresholds {
    /// Returns (device key, window label, limit) triples in window order.
    #[must_use]
    pub const fn windows(&self) -> [(&'static str, &'static str, u64); 5] {
        [
            ("dropInLastMinute", "Last minute", self.minute),
            ("dropInLastTenMinute", "Last 10 minutes", self.ten_minute),
            ("dropInLastOneHour", "Last hour", self.hour),
            ("dropInLastOneDay", "Last day", self.day),
            ("dropInLastOneWeek", "Last week", self.week),
        ]
    }
}

// ============================================================================
// SECTION: PCIe Thresholds
// ============================================================================

/// Thresholds for PCIe device error counters.
///
/// # Invariants
/// - A counter value above its limit is a failure for that counter.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct PcieThresholds {
    /// Threshold for correctable errors.
    #[serde(default, alias = "correctableErrors")]
    pub correctable_errors: u64,
    /// Threshold for non-fatal errors.
    #[serde(default, alias = "nonFatalErrors")]
    pub non_fatal_errors: u64,
    /// Threshold for fatal errors.
    #[serde(default, alias = "fatalErrors")]
    pub fatal_errors: u64,
}

impl PcieThresholds {
    /// Returns (device key, counter label, limit) triples in counter order.
    #[must_use]
    pub const fn counters(&self) -> [(&'static str, &'static str, u64); 3] {
        [
            ("correctableErrors", "Correctable errors", self.correctable_errors),
            ("nonFatalErrors", "Non-fatal errors", self.non_fatal_errors),
            ("fatalErrors", "Fatal errors", self.fatal_errors),
        ]
    }
}
