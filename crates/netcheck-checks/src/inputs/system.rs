// crates/netcheck-checks/src/inputs/system.rs
// ============================================================================
// Module: System Input Models
// Description: NTP server and pool descriptors for system checks.
// Purpose: Validate NTP expectations at configuration-parse time.
// Dependencies: crate::inputs, serde
// ============================================================================

//! ## Overview
//! NTP expectations describe either explicit servers (each with a preferred
//! flag and expected stratum) or a pool (member addresses plus an accepted
//! stratum range). The consuming check enforces that servers and pool are
//! mutually exclusive; the models here enforce the per-record constraints.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::fmt;

use serde::Deserialize;

use crate::inputs::InputError;

// ============================================================================
// SECTION: Constants
// ============================================================================

/// Highest stratum level a clock can report.
const MAX_STRATUM: u64 = 16;

// ============================================================================
// SECTION: NTP Server
// ============================================================================

/// Raw NTP server descriptor prior to validation.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
struct NtpServerRaw {
    /// Server address or hostname.
    server_address: String,
    /// Primary server flag.
    #[serde(default)]
    preferred: bool,
    /// Expected stratum level.
    stratum: u64,
}

/// Validated NTP server descriptor.
///
/// # Invariants
/// - `server_address` is non-empty.
/// - `stratum` is at most 16.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(try_from = "NtpServerRaw")]
pub struct NtpServer {
    /// Server address or hostname.
    pub server_address: String,
    /// Primary server flag; the primary holds the `sys.peer` condition.
    pub preferred: bool,
    /// Expected stratum level.
    pub stratum: u64,
}

impl TryFrom<NtpServerRaw> for NtpServer {
    type Error = InputError;

    fn try_from(raw: NtpServerRaw) -> Result<Self, Self::Error> {
        if raw.server_address.is_empty() {
            return Err(InputError::InvalidValue {
                field: "server_address",
                value: raw.server_address,
            });
        }
        if raw.stratum > MAX_STRATUM {
            return Err(InputError::OutOfRange {
                field: "stratum",
                value: raw.stratum,
                range: "0..=16",
            });
        }
        Ok(Self {
            server_address: raw.server_address,
            preferred: raw.preferred,
            stratum: raw.stratum,
        })
    }
}

impl fmt::Display for NtpServer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "NTP Server: {}", self.server_address)
    }
}

// ============================================================================
// SECTION: NTP Pool
// ============================================================================

/// Raw NTP pool descriptor prior to validation.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
struct NtpPoolRaw {
    /// Pool member addresses or hostnames.
    server_addresses: Vec<String>,
    /// Accepted stratum range as a two-element [low, high] list.
    preferred_stratum_range: Vec<u64>,
}

/// Validated NTP pool descriptor.
///
/// # Invariants
/// - `server_addresses` is non-empty.
/// - The stratum range holds exactly two ordered bounds, each at most 16.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(try_from = "NtpPoolRaw")]
pub struct NtpPool {
    /// Pool member addresses or hostnames.
    pub server_addresses: Vec<String>,
    /// Accepted stratum range as ordered [low, high] bounds.
    pub preferred_stratum_range: [u64; 2],
}

impl TryFrom<NtpPoolRaw> for NtpPool {
    type Error = InputError;

    fn try_from(raw: NtpPoolRaw) -> Result<Self, Self::Error> {
        if raw.server_addresses.is_empty() {
            return Err(InputError::EmptyList("server_addresses"));
        }
        let &[low, high] = raw.preferred_stratum_range.as_slice() else {
            return Err(InputError::InvalidValue {
                field: "preferred_stratum_range",
                value: format!("{:?}", raw.preferred_stratum_range),
            });
        };
        if low > high || high > MAX_STRATUM {
            return Err(InputError::InvalidValue {
                field: "preferred_stratum_range",
                value: format!("[{low}, {high}]"),
            });
        }
        Ok(Self {
            server_addresses: raw.server_addresses,
            preferred_stratum_range: [low, high],
        })
    }
}
