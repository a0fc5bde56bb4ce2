// crates/netcheck-checks/src/inputs/mod.rs
// ============================================================================
// Module: Netcheck Input Models
// Description: Validated expectation records shared by the check catalog.
// Purpose: Enforce field-level constraints at construction time.
// Dependencies: serde, thiserror
// ============================================================================

//! ## Overview
//! Input models are flat, validated assertion records: a peer descriptor, an
//! address-family descriptor, a threshold descriptor. Invariants are
//! field-level constraints (mutually exclusive fields, non-empty lists,
//! value ranges) enforced when configuration is deserialized, never later.
//! Models are constructed once and not mutated afterward.

// ============================================================================
// SECTION: Imports
// ============================================================================

use thiserror::Error;

// ============================================================================
// SECTION: Modules
// ============================================================================

pub mod bgp;
pub mod connectivity;
pub mod hardware;
pub mod system;

// ============================================================================
// SECTION: Validation Errors
// ============================================================================

/// Input-validation errors raised at configuration-parse time.
///
/// # Invariants
/// - Variants are stable for programmatic handling.
#[derive(Debug, Error)]
pub enum InputError {
    /// Two mutually exclusive fields were both provided.
    #[error("'{first}' and '{second}' cannot both be provided")]
    MutuallyExclusive {
        /// First conflicting field.
        first: &'static str,
        /// Second conflicting field.
        second: &'static str,
    },
    /// Neither of two alternative fields was provided.
    #[error("'{first}' or '{second}' must be provided")]
    MissingAlternative {
        /// First alternative field.
        first: &'static str,
        /// Second alternative field.
        second: &'static str,
    },
    /// A field required by the consuming check was not provided.
    #[error("'{0}' must be provided")]
    MissingField(&'static str),
    /// A list field was provided empty.
    #[error("'{0}' must not be empty")]
    EmptyList(&'static str),
    /// A numeric field fell outside its allowed range.
    #[error("'{field}' out of range: {value} (expected {range})")]
    OutOfRange {
        /// Field name.
        field: &'static str,
        /// Rejected value.
        value: u64,
        /// Allowed range description.
        range: &'static str,
    },
    /// A field value failed semantic validation.
    #[error("invalid '{field}': {value}")]
    InvalidValue {
        /// Field name.
        field: &'static str,
        /// Rejected value.
        value: String,
    },
}
