// ── Router system record ──

use chrono::{DateTime, TimeDelta, Utc};
use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::config::is_admin_level;
use crate::entity::EntityKey;

/// Firmware state the router reports when a newer image can be installed.
pub const FW_STATE_CAN_UPGRADE: &str = "can-upgrade";

/// Router-wide facts: identity, load, firmware, and the session's user level.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[allow(clippy::struct_excessive_bools)]
pub struct SystemData {
    pub hostname: Option<String>,
    pub timezone: Option<String>,
    pub product: Option<String>,
    pub fw_version: Option<String>,
    pub sw_version: Option<String>,
    /// CPU usage, percent.
    pub cpu: u64,
    /// Memory usage, percent.
    pub mem: u64,
    /// Seconds since boot, as last reported.
    pub uptime: u64,
    /// Boot time derived from `uptime`; unset until the first stats update.
    pub last_reset: Option<DateTime<Utc>>,
    pub upgrade_available: bool,
    pub upgrade_version: Option<String>,
    pub upgrade_url: Option<String>,
    /// Leases handed out across every DHCP subnet.
    pub leased_devices: u64,
    pub user_level: Option<String>,
    pub deep_packet_inspection: bool,
    pub traffic_analysis_export: bool,
    pub hardware_offload: bool,
    pub ipsec_offload: bool,
}

impl SystemData {
    /// Name the router is registered under: the upper-cased hostname.
    pub fn device_name(&self) -> Option<String> {
        self.hostname.as_deref().map(str::to_uppercase)
    }

    /// Admin flag of the session, `None` while the user level is unknown.
    pub fn is_admin(&self) -> Option<bool> {
        is_admin_level(self.user_level.as_deref())
    }

    /// Apply a live stats sample. `last_reset` moves only when the uptime
    /// changes, so repeated samples keep a stable boot time.
    pub fn update_stats(&mut self, cpu: u64, mem: u64, uptime: u64, now: DateTime<Utc>) {
        self.cpu = cpu;
        self.mem = mem;

        if uptime != self.uptime || self.last_reset.is_none() {
            self.uptime = uptime;
            self.last_reset = i64::try_from(uptime)
                .ok()
                .and_then(TimeDelta::try_seconds)
                .and_then(|delta| now.checked_sub_signed(delta));
        }
    }

    /// Record the latest firmware report from the router.
    pub fn update_firmware(
        &mut self,
        state: Option<&str>,
        version: Option<String>,
        url: Option<String>,
    ) {
        self.upgrade_available = state == Some(FW_STATE_CAN_UPGRADE);
        self.upgrade_version = version;
        self.upgrade_url = url;
    }

    /// Sum the per-subnet lease counts from the DHCP statistics.
    pub fn update_leased_devices(&mut self, leased_per_subnet: impl IntoIterator<Item = u64>) {
        self.leased_devices = leased_per_subnet.into_iter().sum();
    }

    /// Traffic tracking needs both DPI and traffic-analysis export.
    /// Logs a warning naming whichever is off; returns whether both are on.
    pub fn check_traffic_analysis(&self) -> bool {
        let mut disabled = Vec::new();
        if !self.deep_packet_inspection {
            disabled.push("DPI (deep packet inspection) is turned off");
        }
        if !self.traffic_analysis_export {
            disabled.push("Traffic Analysis Export is turned off");
        }

        if disabled.is_empty() {
            return true;
        }
        warn!(
            hostname = self.hostname.as_deref().unwrap_or("-"),
            "traffic will not be tracked correctly since {}",
            disabled.join(" and ")
        );
        false
    }

    /// Current state of a system sensor, `None` for keys this record doesn't back.
    pub fn state(&self, key: EntityKey) -> Option<serde_json::Value> {
        match key {
            EntityKey::CpuUsage => Some(self.cpu.into()),
            EntityKey::RamUsage => Some(self.mem.into()),
            EntityKey::Firmware => Some(self.upgrade_available.into()),
            EntityKey::LastRestart => self.last_reset.map(|at| at.to_rfc3339().into()),
            EntityKey::UnknownDevices => Some(self.leased_devices.into()),
            _ => None,
        }
    }
}
