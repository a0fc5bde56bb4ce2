// crates/netcheck-core/src/lib.rs
// ============================================================================
// Module: Netcheck Core
// Description: Framework layer for declarative network-state checks.
// Purpose: Provide command, result, lookup, interface, and settings primitives.
// Dependencies: serde, serde_json, thiserror
// ============================================================================

//! ## Overview
//! Netcheck Core defines the framework a network-state check catalog is built
//! on: read-only show commands with declared output formats, check results
//! with ordered diagnostics, deterministic aggregation, nested-value lookup,
//! and the seams separating check logic from the device transport.
//!
//! Device output is untrusted; verification routines fail closed by reporting
//! errors on malformed output rather than panicking.

// ============================================================================
// SECTION: Modules
// ============================================================================

pub mod core;
pub mod interfaces;
pub mod runtime;

// ============================================================================
// SECTION: Re-exports
// ============================================================================

pub use crate::core::command::CommandOutput;
pub use crate::core::command::OutputFormat;
pub use crate::core::command::ShowCommand;
pub use crate::core::report::ReportSummary;
pub use crate::core::report::RunReport;
pub use crate::core::result::CheckResult;
pub use crate::core::result::CheckStatus;
pub use crate::core::value::get_bool;
pub use crate::core::value::get_f64;
pub use crate::core::value::get_str;
pub use crate::core::value::get_u64;
pub use crate::core::value::get_value;
pub use crate::interfaces::CollectError;
pub use crate::interfaces::CommandSource;
pub use crate::interfaces::StateCheck;
pub use crate::interfaces::StaticSource;
pub use crate::interfaces::run_check;
pub use crate::runtime::settings::DEFAULT_MAX_CONCURRENCY;
pub use crate::runtime::settings::DEFAULT_NOFILE;
pub use crate::runtime::settings::RunnerSettings;
pub use crate::runtime::settings::SettingsError;
