// crates/netcheck-core/src/runtime/settings.rs
// ============================================================================
// Module: Netcheck Runner Settings
// Description: Environment-driven execution settings for check runners.
// Purpose: Validate and expose concurrency and file-descriptor bounds.
// Dependencies: thiserror
// ============================================================================

//! ## Overview
//! Runner settings expose two knobs: the maximum number of concurrently
//! dispatched checks and the target soft limit for process file
//! descriptors. Values come from the environment and are validated as
//! positive integers at construction. The settings object carries the
//! bounds; it never adjusts process limits itself.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::num::NonZeroU64;
use std::num::NonZeroUsize;

use thiserror::Error;

// ============================================================================
// SECTION: Constants
// ============================================================================

/// Default maximum number of concurrently dispatched checks.
pub const DEFAULT_MAX_CONCURRENCY: usize = 50_000;

/// Default target soft limit for process file descriptors.
pub const DEFAULT_NOFILE: u64 = 16_384;

/// Environment variable overriding the concurrency bound.
const MAX_CONCURRENCY_VAR: &str = "NETCHECK_MAX_CONCURRENCY";

/// Environment variable overriding the file-descriptor target.
const NOFILE_VAR: &str = "NETCHECK_NOFILE";

// ============================================================================
// SECTION: Errors
// ============================================================================

/// Settings validation errors.
///
/// # Invariants
/// - Variants are stable for programmatic handling.
#[derive(Debug, Error)]
pub enum SettingsError {
    /// An environment value failed to parse as a positive integer.
    #[error("invalid value for {name}: {value:?} (expected a positive integer)")]
    Invalid {
        /// Environment variable name.
        name: &'static str,
        /// Rejected raw value.
        value: String,
    },
}

// ============================================================================
// SECTION: Runner Settings
// ============================================================================

/// Validated execution settings for a check runner.
///
/// # Invariants
/// - Both bounds are positive; zero and negative values are rejected at
///   construction.
/// - Settings are read-only after construction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RunnerSettings {
    /// Maximum number of concurrently dispatched checks.
    max_concurrency: NonZeroUsize,
    /// Target soft limit for process file descriptors.
    nofile: NonZeroU64,
}

impl Default for RunnerSettings {
    fn default() -> Self {
        Self {
            // Both defaults are non-zero constants; the fallbacks are unreachable.
            max_concurrency: NonZeroUsize::new(DEFAULT_MAX_CONCURRENCY)
                .unwrap_or(NonZeroUsize::MIN),
            nofile: NonZeroU64::new(DEFAULT_NOFILE).unwrap_or(NonZeroU64::MIN),
        }
    }
}

impl RunnerSettings {
    /// Builds settings from the process environment.
    ///
    /// # Errors
    ///
    /// Returns [`SettingsError`] when an override is not a positive integer.
    pub fn from_env() -> Result<Self, SettingsError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Builds settings from an arbitrary variable lookup.
    ///
    /// The lookup seam keeps construction deterministic for tests and
    /// embedders that resolve configuration outside the process
    /// environment.
    ///
    /// # Errors
    ///
    /// Returns [`SettingsError`] when an override is not a positive integer.
    pub fn from_lookup(
        lookup: impl Fn(&str) -> Option<String>,
    ) -> Result<Self, SettingsError> {
        let mut settings = Self::default();
        if let Some(raw) = lookup(MAX_CONCURRENCY_VAR) {
            settings.max_concurrency = parse_bound(MAX_CONCURRENCY_VAR, &raw)?;
        }
        if let Some(raw) = lookup(NOFILE_VAR) {
            settings.nofile = parse_bound(NOFILE_VAR, &raw)?;
        }
        Ok(settings)
    }

    /// Returns the maximum number of concurrently dispatched checks.
    #[must_use]
    pub const fn max_concurrency(&self) -> usize {
        self.max_concurrency.get()
    }

    /// Returns the target soft limit for process file descriptors.
    #[must_use]
    pub const fn nofile(&self) -> u64 {
        self.nofile.get()
    }
}

// ============================================================================
// SECTION: Helpers
// ============================================================================

/// Parses a raw environment value into a positive bound.
fn parse_bound<T: std::str::FromStr>(
    name: &'static str,
    raw: &str,
) -> Result<T, SettingsError> {
    raw.trim().parse::<T>().map_err(|_| SettingsError::Invalid {
        name,
        value: raw.to_string(),
    })
}
