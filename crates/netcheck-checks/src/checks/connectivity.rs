// crates/netcheck-checks/src/checks/connectivity.rs
// ============================================================================
// Module: Connectivity Checks
// Description: Reachability probes and LLDP neighbor validation.
// Purpose: Validate data-plane reachability and physical topology.
// Dependencies: crate::checks, crate::inputs::connectivity, netcheck-core
// ============================================================================

//! ## Overview
//! Reachability renders one ping command per declared host and reads the
//! probe summary back from the command output. LLDP validation matches each
//! local port against the expected neighbor device and port.

// ============================================================================
// SECTION: Imports
// ============================================================================

use netcheck_core::CheckResult;
use netcheck_core::CommandOutput;
use netcheck_core::ShowCommand;
use netcheck_core::StateCheck;
use serde::Deserialize;
use serde_json::Value;

use crate::checks::require_json;
use crate::inputs::InputError;
use crate::inputs::connectivity::Host;
use crate::inputs::connectivity::LldpNeighbor;

// ============================================================================
// SECTION: Reachability
// ============================================================================

/// Raw input for the reachability check.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
struct ReachabilityInput {
    /// Hosts to probe.
    hosts: Vec<Host>,
}

/// Verifies reachability to one or many destinations.
#[derive(Debug, Clone, Deserialize)]
#[serde(try_from = "ReachabilityInput")]
pub struct Reachability {
    /// Hosts to probe.
    hosts: Vec<Host>,
}

impl Reachability {
    /// Creates the check.
    ///
    /// # Errors
    ///
    /// Returns [`InputError`] when the host list is empty.
    pub fn new(hosts: Vec<Host>) -> Result<Self, InputError> {
        if hosts.is_empty() {
            return Err(InputError::EmptyList("hosts"));
        }
        Ok(Self {
            hosts,
        })
    }
}

impl TryFrom<ReachabilityInput> for Reachability {
    type Error = InputError;

    fn try_from(input: ReachabilityInput) -> Result<Self, Self::Error> {
        Self::new(input.hosts)
    }
}

impl StateCheck for Reachability {
    fn name(&self) -> &'static str {
        "reachability"
    }

    fn categories(&self) -> &'static [&'static str] {
        &["connectivity"]
    }

    fn commands(&self) -> Vec<ShowCommand> {
        self.hosts
            .iter()
            .map(|host| {
                let source = host
                    .source
                    .as_deref()
                    .map_or_else(String::new, |source| format!(" source {source}"));
                let df_bit = if host.df_bit { " df-bit" } else { "" };
                ShowCommand::json_revision(
                    format!(
                        "ping vrf {} {}{source} size {}{df_bit} repeat {}",
                        host.vrf, host.destination, host.size, host.repeat
                    ),
                    1,
                )
            })
            .collect()
    }

    fn verify(&self, outputs: &[CommandOutput], result: &mut CheckResult) {
        result.mark_success();
        for (index, host) in self.hosts.iter().enumerate() {
            let Some(root) = require_json(outputs, index, result) else {
                return;
            };
            let message = root
                .get("messages")
                .and_then(Value::as_array)
                .and_then(|messages| messages.first())
                .and_then(Value::as_str);
            let Some(message) = message else {
                result.mark_error(format!("{host} - Invalid output: ping messages not found"));
                continue;
            };

            let Some(received) = received_count(message) else {
                if message.contains("Network is unreachable") {
                    if host.reachable {
                        result.mark_failure(format!("{host} - Unreachable"));
                    }
                    continue;
                }
                result.mark_failure(format!(
                    "{host} - Ping failed with an unexpected message: {}",
                    message.trim_end()
                ));
                continue;
            };

            if host.reachable && received != host.repeat {
                result.mark_failure(format!(
                    "{host} - Packet loss detected - Transmitted: {} Received: {received}",
                    host.repeat
                ));
            }
            if !host.reachable && received != 0 {
                result.mark_failure(format!(
                    "{host} - Destination is expected to be unreachable but found reachable"
                ));
            }
        }
    }
}

/// Extracts the received-packet count from a probe summary line.
fn received_count(message: &str) -> Option<u64> {
    let index = message.find(" received")?;
    let digits: Vec<char> = message[.. index]
        .chars()
        .rev()
        .take_while(char::is_ascii_digit)
        .collect();
    if digits.is_empty() {
        return None;
    }
    digits.iter().rev().collect::<String>().parse().ok()
}

// ============================================================================
// SECTION: LLDP Neighbors
// ============================================================================

/// Raw input for the LLDP neighbor check.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
struct LldpNeighborsInput {
    /// Expected neighbors per local port.
    neighbors: Vec<LldpNeighbor>,
}

/// Verifies the connection status of declared LLDP neighbors.
#[derive(Debug, Clone, Deserialize)]
#[serde(try_from = "LldpNeighborsInput")]
pub struct LldpNeighbors {
    /// Expected neighbors per local port.
    neighbors: Vec<LldpNeighbor>,
}

impl LldpNeighbors {
    /// Creates the check.
    ///
    /// # Errors
    ///
    /// Returns [`InputError`] when the neighbor list is empty.
    pub fn new(neighbors: Vec<LldpNeighbor>) -> Result<Self, InputError> {
        if neighbors.is_empty() {
            return Err(InputError::EmptyList("neighbors"));
        }
        Ok(Self {
            neighbors,
        })
    }
}

impl TryFrom<LldpNeighborsInput> for LldpNeighbors {
    type Error = InputError;

    fn try_from(input: LldpNeighborsInput) -> Result<Self, Self::Error> {
        Self::new(input.neighbors)
    }
}

impl StateCheck for LldpNeighbors {
    fn name(&self) -> &'static str {
        "lldp_neighbors"
    }

    fn categories(&self) -> &'static [&'static str] {
        &["connectivity"]
    }

    fn commands(&self) -> Vec<ShowCommand> {
        vec![ShowCommand::json_revision("show lldp neighbors detail", 1)]
    }

    fn verify(&self, outputs: &[CommandOutput], result: &mut CheckResult) {
        result.mark_success();
        let Some(root) = require_json(outputs, 0, result) else {
            return;
        };
        let Some(table) = root.get("lldpNeighbors").and_then(Value::as_object) else {
            result.mark_error("Invalid output: 'lldpNeighbors' not found");
            return;
        };

        for neighbor in &self.neighbors {
            let Some(port_data) = table.get(&neighbor.port) else {
                result.mark_failure(format!("{neighbor} - Port not found"));
                continue;
            };
            let info = port_data
                .get("lldpNeighborInfo")
                .and_then(Value::as_array)
                .map(Vec::as_slice)
                .unwrap_or_default();
            if info.is_empty() {
                result.mark_failure(format!("{neighbor} - No LLDP neighbors"));
                continue;
            }

            let matched = info.iter().any(|entry| {
                entry.get("systemName").and_then(Value::as_str)
                    == Some(&neighbor.neighbor_device)
                    && entry
                        .get("neighborInterfaceInfo")
                        .and_then(|interface| interface.get("interfaceId_v2"))
                        .and_then(Value::as_str)
                        == Some(&neighbor.neighbor_port)
            });
            if !matched {
                let seen: Vec<String> = info
                    .iter()
                    .map(|entry| {
                        format!(
                            "{}/{}",
                            entry.get("systemName").and_then(Value::as_str).unwrap_or_default(),
                            entry
                                .get("neighborInterfaceInfo")
                                .and_then(|interface| interface.get("interfaceId_v2"))
                                .and_then(Value::as_str)
                                .unwrap_or_default()
                        )
                    })
                    .collect();
                result.mark_failure(format!(
                    "{neighbor} - Wrong LLDP neighbors: {}",
                    seen.join(", ")
                ));
            }
        }
    }
}
