// crates/netcheck-checks/src/checks/system.rs
// ============================================================================
// Module: System Checks
// Description: Uptime, reload, crash, utilization, NTP, and maintenance.
// Purpose: Validate system-level device health against thresholds.
// Dependencies: crate::checks, crate::inputs::system, netcheck-core
// ============================================================================

//! ## Overview
//! System checks mix structured and textual output: utilization and NTP
//! association data arrive as JSON, while crash logs, filesystem usage, and
//! NTP synchronization status are parsed from raw text. Thresholds follow
//! operational practice: 75% utilization bounds and a 25% free-memory floor.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::collections::BTreeSet;

use netcheck_core::CheckResult;
use netcheck_core::CommandOutput;
use netcheck_core::ShowCommand;
use netcheck_core::StateCheck;
use serde::Deserialize;
use serde_json::Value;

use crate::checks::require_json;
use crate::checks::require_text;
use crate::inputs::InputError;
use crate::inputs::system::NtpPool;
use crate::inputs::system::NtpServer;

// ============================================================================
// SECTION: Constants
// ============================================================================

/// Idle CPU percentage below which utilization is considered high.
const CPU_IDLE_THRESHOLD: f64 = 25.0;

/// Free/total memory ratio below which usage is considered high.
const MEMORY_THRESHOLD: f64 = 0.25;

/// Disk usage percentage above which a partition is considered full.
const DISK_SPACE_THRESHOLD: u64 = 75;

/// NTP conditions acceptable for pool members.
const POOL_CONDITIONS: [&str; 2] = ["sys.peer", "candidate"];

// ============================================================================
// SECTION: Device Uptime
// ============================================================================

/// Verifies the device uptime exceeds a minimum.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct DeviceUptime {
    /// Minimum uptime in seconds.
    minimum: u64,
}

impl DeviceUptime {
    /// Creates the check.
    #[must_use]
    pub const fn new(minimum: u64) -> Self {
        Self {
            minimum,
        }
    }
}

impl StateCheck for DeviceUptime {
    fn name(&self) -> &'static str {
        "device_uptime"
    }

    fn categories(&self) -> &'static [&'static str] {
        &["system"]
    }

    fn commands(&self) -> Vec<ShowCommand> {
        vec![ShowCommand::json_revision("show uptime", 1)]
    }

    fn verify(&self, outputs: &[CommandOutput], result: &mut CheckResult) {
        result.mark_success();
        let Some(root) = require_json(outputs, 0, result) else {
            return;
        };
        let Some(uptime) = root.get("upTime").and_then(Value::as_f64) else {
            result.mark_error("Invalid output: 'upTime' not found");
            return;
        };
        #[allow(clippy::cast_precision_loss, reason = "Uptime seconds fit f64 exactly.")]
        let minimum = self.minimum as f64;
        if uptime < minimum {
            result.mark_failure(format!(
                "Device uptime is incorrect - Expected: {}s Actual: {uptime}s",
                self.minimum
            ));
        }
    }
}

// ============================================================================
// SECTION: Reload Cause
// ============================================================================

/// Reload causes a device may legitimately report.
///
/// # Invariants
/// - Variants are stable for serialization and catalog matching.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum ReloadCauseKind {
    /// Operator-requested reload.
    User,
    /// Reload following an FPGA upgrade.
    Fpga,
    /// Reload driven by Zero Touch Provisioning.
    Ztp,
}

impl ReloadCauseKind {
    /// Returns the cause description as the device reports it.
    #[must_use]
    pub const fn description(self) -> &'static str {
        match self {
            Self::User => "Reload requested by the user.",
            Self::Fpga => "Reload requested after FPGA upgrade",
            Self::Ztp => "System reloaded due to Zero Touch Provisioning",
        }
    }
}

/// Verifies the last reload cause is within an allowed set.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ReloadCause {
    /// Allowed reload causes.
    #[serde(default = "default_allowed_causes")]
    allowed_causes: Vec<ReloadCauseKind>,
}

impl Default for ReloadCause {
    fn default() -> Self {
        Self {
            allowed_causes: default_allowed_causes(),
        }
    }
}

impl ReloadCause {
    /// Creates the check with an explicit allowed set.
    #[must_use]
    pub const fn new(allowed_causes: Vec<ReloadCauseKind>) -> Self {
        Self {
            allowed_causes,
        }
    }
}

impl StateCheck for ReloadCause {
    fn name(&self) -> &'static str {
        "reload_cause"
    }

    fn categories(&self) -> &'static [&'static str] {
        &["system"]
    }

    fn commands(&self) -> Vec<ShowCommand> {
        vec![ShowCommand::json_revision("show reload cause", 1)]
    }

    fn verify(&self, outputs: &[CommandOutput], result: &mut CheckResult) {
        let Some(root) = require_json(outputs, 0, result) else {
            return;
        };
        let Some(causes) = root.get("resetCauses").and_then(Value::as_array) else {
            result.mark_error("Invalid output: 'resetCauses' not found");
            return;
        };
        if causes.is_empty() {
            result.mark_success();
            return;
        }
        let Some(description) = causes[0].get("description").and_then(Value::as_str) else {
            result.mark_error("Invalid output: reload cause description not found");
            return;
        };
        if self.allowed_causes.iter().any(|cause| cause.description() == description) {
            result.mark_success();
        } else {
            result.mark_failure(format!("Reload cause is: {description}"));
        }
    }
}

/// Returns the default allowed reload causes for serde defaults.
fn default_allowed_causes() -> Vec<ReloadCauseKind> {
    vec![ReloadCauseKind::User, ReloadCauseKind::Fpga]
}

// ============================================================================
// SECTION: Core Dumps
// ============================================================================

/// Verifies no core dump files are present.
#[derive(Debug, Clone, Copy, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CoreDumps {}

impl CoreDumps {
    /// Creates the check.
    #[must_use]
    pub const fn new() -> Self {
        Self {}
    }
}

impl StateCheck for CoreDumps {
    fn name(&self) -> &'static str {
        "core_dumps"
    }

    fn categories(&self) -> &'static [&'static str] {
        &["system"]
    }

    fn commands(&self) -> Vec<ShowCommand> {
        vec![ShowCommand::json_revision("show system coredump", 1)]
    }

    fn verify(&self, outputs: &[CommandOutput], result: &mut CheckResult) {
        result.mark_success();
        let Some(root) = require_json(outputs, 0, result) else {
            return;
        };
        let Some(files) = root.get("coreFiles").and_then(Value::as_array) else {
            result.mark_error("Invalid output: 'coreFiles' not found");
            return;
        };
        // The minidump directory is populated by certain agents and is not a core dump.
        let files: Vec<&str> = files
            .iter()
            .filter_map(Value::as_str)
            .filter(|name| *name != "minidump")
            .collect();
        if !files.is_empty() {
            result.mark_failure(format!("Core dump(s) have been found: {}", files.join(", ")));
        }
    }
}

// ============================================================================
// SECTION: Agent Crash Logs
// ============================================================================

/// Verifies no agent crash reports are present.
#[derive(Debug, Clone, Copy, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct AgentCrashLogs {}

impl AgentCrashLogs {
    /// Creates the check.
    #[must_use]
    pub const fn new() -> Self {
        Self {}
    }
}

impl StateCheck for AgentCrashLogs {
    fn name(&self) -> &'static str {
        "agent_crash_logs"
    }

    fn categories(&self) -> &'static [&'static str] {
        &["system"]
    }

    fn commands(&self) -> Vec<ShowCommand> {
        vec![ShowCommand::text("show agent logs crash")]
    }

    fn verify(&self, outputs: &[CommandOutput], result: &mut CheckResult) {
        let Some(text) = require_text(outputs, 0, result) else {
            return;
        };
        if text.is_empty() {
            result.mark_success();
            return;
        }
        // Crash sections are delimited by `===> <agent log file> <===` headers.
        let agents: Vec<&str> = text
            .lines()
            .filter_map(|line| {
                line.strip_prefix("===> ").and_then(|rest| rest.strip_suffix(" <==="))
            })
            .collect();
        result.mark_failure(format!(
            "Device has reported agent crashes:\n * {}",
            agents.join("\n * ")
        ));
    }
}

// ============================================================================
// SECTION: CPU Utilization
// ============================================================================

/// Verifies CPU utilization is below 75%.
#[derive(Debug, Clone, Copy, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CpuUtilization {}

impl CpuUtilization {
    /// Creates the check.
    #[must_use]
    pub const fn new() -> Self {
        Self {}
    }
}

impl StateCheck for CpuUtilization {
    fn name(&self) -> &'static str {
        "cpu_utilization"
    }

    fn categories(&self) -> &'static [&'static str] {
        &["system"]
    }

    fn commands(&self) -> Vec<ShowCommand> {
        vec![ShowCommand::json_revision("show processes top once", 1)]
    }

    fn verify(&self, outputs: &[CommandOutput], result: &mut CheckResult) {
        result.mark_success();
        let Some(root) = require_json(outputs, 0, result) else {
            return;
        };
        let idle = root
            .get("cpuInfo")
            .and_then(|info| info.get("%Cpu(s)"))
            .and_then(|cpu| cpu.get("idle"))
            .and_then(Value::as_f64);
        let Some(idle) = idle else {
            result.mark_error("Invalid output: CPU idle percentage not found");
            return;
        };
        if idle < CPU_IDLE_THRESHOLD {
            result.mark_failure(format!(
                "Device has reported a high CPU utilization - Expected: < 75% Actual: {}%",
                100.0 - idle
            ));
        }
    }
}

// ============================================================================
// SECTION: Memory Utilization
// ============================================================================

/// Verifies memory utilization is below 75%.
#[derive(Debug, Clone, Copy, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct MemoryUtilization {}

impl MemoryUtilization {
    /// Creates the check.
    #[must_use]
    pub const fn new() -> Self {
        Self {}
    }
}

impl StateCheck for MemoryUtilization {
    fn name(&self) -> &'static str {
        "memory_utilization"
    }

    fn categories(&self) -> &'static [&'static str] {
        &["system"]
    }

    fn commands(&self) -> Vec<ShowCommand> {
        vec![ShowCommand::json_revision("show version", 1)]
    }

    fn verify(&self, outputs: &[CommandOutput], result: &mut CheckResult) {
        result.mark_success();
        let Some(root) = require_json(outputs, 0, result) else {
            return;
        };
        let free = root.get("memFree").and_then(Value::as_f64);
        let total = root.get("memTotal").and_then(Value::as_f64);
        let (Some(free), Some(total)) = (free, total) else {
            result.mark_error("Invalid output: memory counters not found");
            return;
        };
        if total <= 0.0 {
            result.mark_error("Invalid output: total memory is zero");
            return;
        }
        let ratio = free / total;
        if ratio < MEMORY_THRESHOLD {
            result.mark_failure(format!(
                "Device has reported a high memory usage - Expected: < 75% Actual: {:.2}%",
                (1.0 - ratio) * 100.0
            ));
        }
    }
}

// ============================================================================
// SECTION: Filesystem Utilization
// ============================================================================

/// Verifies no partition uses more than 75% of its disk space.
#[derive(Debug, Clone, Copy, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct FilesystemUtilization {}

impl FilesystemUtilization {
    /// Creates the check.
    #[must_use]
    pub const fn new() -> Self {
        Self {}
    }
}

impl StateCheck for FilesystemUtilization {
    fn name(&self) -> &'static str {
        "filesystem_utilization"
    }

    fn categories(&self) -> &'static [&'static str] {
        &["system"]
    }

    fn commands(&self) -> Vec<ShowCommand> {
        vec![ShowCommand::text("bash timeout 10 df -h")]
    }

    fn verify(&self, outputs: &[CommandOutput], result: &mut CheckResult) {
        result.mark_success();
        let Some(text) = require_text(outputs, 0, result) else {
            return;
        };
        for line in text.lines().skip(1) {
            if line.is_empty() || line.contains("loop") {
                continue;
            }
            let Some(percentage) = line
                .split_whitespace()
                .nth(4)
                .and_then(|column| column.strip_suffix('%'))
                .and_then(|digits| digits.parse::<u64>().ok())
            else {
                result.mark_error(format!("Invalid output: cannot parse mount line: {line}"));
                continue;
            };
            if percentage > DISK_SPACE_THRESHOLD {
                result.mark_failure(format!(
                    "Mount point: {line} - Higher disk space utilization - \
                     Expected: {DISK_SPACE_THRESHOLD}% Actual: {percentage}%"
                ));
            }
        }
    }
}

// ============================================================================
// SECTION: NTP Status
// ============================================================================

/// Verifies the clock is NTP synchronised.
#[derive(Debug, Clone, Copy, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct NtpStatus {}

impl NtpStatus {
    /// Creates the check.
    #[must_use]
    pub const fn new() -> Self {
        Self {}
    }
}

impl StateCheck for NtpStatus {
    fn name(&self) -> &'static str {
        "ntp_status"
    }

    fn categories(&self) -> &'static [&'static str] {
        &["system"]
    }

    fn commands(&self) -> Vec<ShowCommand> {
        vec![ShowCommand::text("show ntp status")]
    }

    fn verify(&self, outputs: &[CommandOutput], result: &mut CheckResult) {
        let Some(text) = require_text(outputs, 0, result) else {
            return;
        };
        let first_line = text.lines().next().unwrap_or_default();
        if first_line.split(' ').next() == Some("synchronised") {
            result.mark_success();
        } else {
            result.mark_failure(format!(
                "NTP status mismatch - Expected: synchronised Actual: {first_line}"
            ));
        }
    }
}

// ============================================================================
// SECTION: NTP Associations
// ============================================================================

/// Raw input for the NTP association check.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
struct NtpAssociationsInput {
    /// Explicit NTP servers.
    ntp_servers: Option<Vec<NtpServer>>,
    /// NTP pool membership.
    ntp_pool: Option<NtpPool>,
}

/// Expectation mode for NTP associations.
#[derive(Debug, Clone)]
enum NtpExpectation {
    /// Explicit servers with conditions and stratum levels.
    Servers(Vec<NtpServer>),
    /// Pool membership with a stratum range.
    Pool(NtpPool),
}

/// Verifies NTP associations against servers or a pool.
#[derive(Debug, Clone, Deserialize)]
#[serde(try_from = "NtpAssociationsInput")]
pub struct NtpAssociations {
    /// Validated expectation mode.
    expectation: NtpExpectation,
}

impl NtpAssociations {
    /// Creates a check over explicit servers.
    ///
    /// # Errors
    ///
    /// Returns [`InputError`] when the server list is empty.
    pub fn with_servers(servers: Vec<NtpServer>) -> Result<Self, InputError> {
        if servers.is_empty() {
            return Err(InputError::EmptyList("ntp_servers"));
        }
        Ok(Self {
            expectation: NtpExpectation::Servers(servers),
        })
    }

    /// Creates a check over pool membership.
    #[must_use]
    pub const fn with_pool(pool: NtpPool) -> Self {
        Self {
            expectation: NtpExpectation::Pool(pool),
        }
    }
}

impl TryFrom<NtpAssociationsInput> for NtpAssociations {
    type Error = InputError;

    fn try_from(input: NtpAssociationsInput) -> Result<Self, Self::Error> {
        match (input.ntp_servers, input.ntp_pool) {
            (Some(_), Some(_)) => Err(InputError::MutuallyExclusive {
                first: "ntp_servers",
                second: "ntp_pool",
            }),
            (None, None) => Err(InputError::MissingAlternative {
                first: "ntp_servers",
                second: "ntp_pool",
            }),
            (Some(servers), None) => Self::with_servers(servers),
            (None, Some(pool)) => Ok(Self::with_pool(pool)),
        }
    }
}

impl StateCheck for NtpAssociations {
    fn name(&self) -> &'static str {
        "ntp_associations"
    }

    fn categories(&self) -> &'static [&'static str] {
        &["system"]
    }

    fn commands(&self) -> Vec<ShowCommand> {
        vec![ShowCommand::json("show ntp associations")]
    }

    fn verify(&self, outputs: &[CommandOutput], result: &mut CheckResult) {
        result.mark_success();
        let Some(root) = require_json(outputs, 0, result) else {
            return;
        };
        let peers = root.get("peers").and_then(Value::as_object);
        let Some(peers) = peers.filter(|peers| !peers.is_empty()) else {
            result.mark_failure("No NTP peers configured");
            return;
        };

        match &self.expectation {
            NtpExpectation::Servers(servers) => {
                for server in servers {
                    verify_ntp_server(server, peers, result);
                }
            }
            NtpExpectation::Pool(pool) => {
                for (peer_key, details) in peers {
                    verify_ntp_pool_member(pool, peer_key, details, result);
                }
            }
        }
    }
}

/// Verifies one declared server against the association table.
fn verify_ntp_server(
    server: &NtpServer,
    peers: &serde_json::Map<String, Value>,
    result: &mut CheckResult,
) {
    // Peers are keyed by hostname; address input matches `peerIpAddr` instead.
    let matching = peers.iter().find(|(peer_key, details)| {
        details.get("peerIpAddr").and_then(Value::as_str)
            == Some(server.server_address.as_str())
            || peer_key.as_str() == server.server_address
    });
    let Some((_, details)) = matching else {
        result.mark_failure(format!("{server} - Not configured"));
        return;
    };

    let expected_condition = if server.preferred { "sys.peer" } else { "candidate" };
    let actual_condition =
        details.get("condition").and_then(Value::as_str).unwrap_or("Not Found");
    if actual_condition != expected_condition {
        result.mark_failure(format!(
            "{server} - Incorrect condition - Expected: {expected_condition} Actual: {actual_condition}"
        ));
    }

    let actual_stratum = details.get("stratumLevel").and_then(Value::as_u64);
    if actual_stratum != Some(server.stratum) {
        result.mark_failure(format!(
            "{server} - Incorrect stratum level - Expected: {} Actual: {}",
            server.stratum,
            actual_stratum.map_or_else(|| "Not Found".to_string(), |value| value.to_string())
        ));
    }
}

/// Verifies one associated peer against the declared pool.
fn verify_ntp_pool_member(
    pool: &NtpPool,
    peer_key: &str,
    details: &Value,
    result: &mut CheckResult,
) {
    let peer_ip = details.get("peerIpAddr").and_then(Value::as_str).unwrap_or("Not Found");
    let member = pool.server_addresses.iter().any(|address| address == peer_ip)
        || pool.server_addresses.iter().any(|address| address == peer_key);
    if !member {
        result.mark_failure(format!(
            "NTP Server: {peer_ip} Hostname: {peer_key} - Associated but not part of the provided NTP pool"
        ));
        return;
    }

    let condition = details.get("condition").and_then(Value::as_str).unwrap_or("Not Found");
    if !POOL_CONDITIONS.contains(&condition) {
        result.mark_failure(format!(
            "NTP Server: {peer_ip} Hostname: {peer_key} - Incorrect condition - \
             Expected: sys.peer, candidate Actual: {condition}"
        ));
    }

    let [low, high] = pool.preferred_stratum_range;
    let stratum = details.get("stratumLevel").and_then(Value::as_u64);
    if !stratum.is_some_and(|stratum| (low ..= high).contains(&stratum)) {
        result.mark_failure(format!(
            "NTP Server: {peer_ip} Hostname: {peer_key} - Incorrect stratum level - \
             Expected Stratum Range: {low} to {high} Actual: {}",
            stratum.map_or_else(|| "Not Found".to_string(), |value| value.to_string())
        ));
    }
}

// ============================================================================
// SECTION: Maintenance Mode
// ============================================================================

/// Verifies the device is not under or entering maintenance.
#[derive(Debug, Clone, Copy, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct MaintenanceMode {}

impl MaintenanceMode {
    /// Creates the check.
    #[must_use]
    pub const fn new() -> Self {
        Self {}
    }
}

impl StateCheck for MaintenanceMode {
    fn name(&self) -> &'static str {
        "maintenance_mode"
    }

    fn categories(&self) -> &'static [&'static str] {
        &["system"]
    }

    fn commands(&self) -> Vec<ShowCommand> {
        vec![ShowCommand::json_revision("show maintenance", 1)]
    }

    fn verify(&self, outputs: &[CommandOutput], result: &mut CheckResult) {
        result.mark_success();
        let Some(root) = require_json(outputs, 0, result) else {
            return;
        };
        let units = root.get("units").and_then(Value::as_object);
        let Some(units) = units.filter(|units| !units.is_empty()) else {
            return;
        };

        let mut under_maintenance = Vec::new();
        let mut entering_maintenance = Vec::new();
        let mut causes = BTreeSet::new();
        for (unit, info) in units {
            match info.get("state").and_then(Value::as_str) {
                Some("underMaintenance") => under_maintenance.push(unit.as_str()),
                Some("maintenanceModeEnter") => entering_maintenance.push(unit.as_str()),
                _ => {}
            }
            if info.get("adminState").and_then(Value::as_str) == Some("underMaintenance") {
                causes.insert("Quiesce is configured");
            }
            if info.get("onBootMaintenance").and_then(Value::as_bool) == Some(true) {
                causes.insert("On-boot maintenance is configured");
            }
            if info.get("intfsViolatingTrafficThreshold").and_then(Value::as_bool) == Some(true) {
                causes.insert("Interface traffic threshold violation");
            }
        }

        if !under_maintenance.is_empty() {
            result.mark_failure(format!(
                "Units under maintenance: '{}'",
                under_maintenance.join(", ")
            ));
        }
        if !entering_maintenance.is_empty() {
            result.mark_failure(format!(
                "Units entering maintenance: '{}'",
                entering_maintenance.join(", ")
            ));
        }
        if !causes.is_empty() {
            result.mark_failure(format!(
                "Possible causes: '{}'",
                causes.into_iter().collect::<Vec<_>>().join(", ")
            ));
        }
    }
}
