// crates/netcheck-core/src/core/command.rs
// ============================================================================
// Module: Netcheck Show Commands
// Description: Read-only device commands and their fetched outputs.
// Purpose: Declare what a check reads and carry what the device returned.
// Dependencies: serde, serde_json
// ============================================================================

//! ## Overview
//! Every check declares one or more read-only show commands with an expected
//! output format and, where the output schema has changed across firmware
//! versions, a pinned revision. Fetched outputs are either structured JSON
//! or raw text; checks select the accessor matching the declared format and
//! treat a mismatch as malformed output.

// ============================================================================
// SECTION: Imports
// ============================================================================

use serde::Deserialize;
use serde::Serialize;
use serde_json::Value;

// ============================================================================
// SECTION: Output Format
// ============================================================================

/// Output format declared for a show command.
///
/// # Invariants
/// - Variants are stable for serialization and catalog matching.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OutputFormat {
    /// Structured JSON output.
    Json,
    /// Raw textual output.
    Text,
}

// ============================================================================
// SECTION: Show Command
// ============================================================================

/// Read-only device command declared by a check.
///
/// # Invariants
/// - `command` is a show-class command; checks never declare mutations.
/// - `revision` pins the output schema where firmware revisions diverge.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShowCommand {
    /// Command string sent to the device.
    pub command: String,
    /// Declared output format.
    pub format: OutputFormat,
    /// Optional output schema revision.
    pub revision: Option<u8>,
}

impl ShowCommand {
    /// Declares a JSON command without a pinned revision.
    #[must_use]
    pub fn json(command: impl Into<String>) -> Self {
        Self {
            command: command.into(),
            format: OutputFormat::Json,
            revision: None,
        }
    }

    /// Declares a JSON command pinned to an output schema revision.
    #[must_use]
    pub fn json_revision(command: impl Into<String>, revision: u8) -> Self {
        Self {
            command: command.into(),
            format: OutputFormat::Json,
            revision: Some(revision),
        }
    }

    /// Declares a textual command.
    #[must_use]
    pub fn text(command: impl Into<String>) -> Self {
        Self {
            command: command.into(),
            format: OutputFormat::Text,
            revision: None,
        }
    }
}

// ============================================================================
// SECTION: Command Output
// ============================================================================

/// Output fetched for a single show command.
///
/// # Invariants
/// - The variant corresponds to the format the transport produced, which a
///   check compares against the format it declared.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "format", content = "data", rename_all = "snake_case")]
pub enum CommandOutput {
    /// Structured JSON output.
    Json(Value),
    /// Raw textual output.
    Text(String),
}

impl CommandOutput {
    /// Returns the JSON value when the output is structured.
    #[must_use]
    pub const fn as_json(&self) -> Option<&Value> {
        match self {
            Self::Json(value) => Some(value),
            Self::Text(_) => None,
        }
    }

    /// Returns the raw text when the output is textual.
    #[must_use]
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Self::Json(_) => None,
            Self::Text(text) => Some(text),
        }
    }

    /// Returns the format of the fetched output.
    #[must_use]
    pub const fn format(&self) -> OutputFormat {
        match self {
            Self::Json(_) => OutputFormat::Json,
            Self::Text(_) => OutputFormat::Text,
        }
    }
}
