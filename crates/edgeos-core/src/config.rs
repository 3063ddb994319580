// ── Integration settings ──
//
// Per-installation options: which devices and interfaces are monitored,
// polling intervals, and the unit used for traffic sensors. These types
// never touch disk; `edgeos-config` loads and saves them.

use std::time::Duration;

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::entity::DeviceType;
use crate::error::CoreError;
use crate::model::MacAddress;
use crate::units::Unit;

/// Upper bound for every interval setting, in seconds.
pub const MAX_INTERVAL_SECS: u64 = 600;

pub const DEFAULT_CONSIDER_AWAY_INTERVAL: u64 = 180;
pub const DEFAULT_UPDATE_ENTITIES_INTERVAL: u64 = 1;
pub const DEFAULT_UPDATE_API_INTERVAL: u64 = 30;

/// User level reported by the router for administrators.
pub const ADMIN_USER_LEVEL: &str = "admin";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct IntegrationSettings {
    pub log_incoming_messages: bool,
    /// Seconds without traffic before a device is considered away.
    pub consider_away_interval: u64,
    pub update_entities_interval: u64,
    pub update_api_interval: u64,
    pub unit: Unit,
    /// MAC address → monitoring enabled.
    pub monitored_devices: IndexMap<String, bool>,
    /// Interface name → monitoring enabled.
    pub monitored_interfaces: IndexMap<String, bool>,
}

impl Default for IntegrationSettings {
    fn default() -> Self {
        Self {
            log_incoming_messages: false,
            consider_away_interval: DEFAULT_CONSIDER_AWAY_INTERVAL,
            update_entities_interval: DEFAULT_UPDATE_ENTITIES_INTERVAL,
            update_api_interval: DEFAULT_UPDATE_API_INTERVAL,
            unit: Unit::default(),
            monitored_devices: IndexMap::new(),
            monitored_interfaces: IndexMap::new(),
        }
    }
}

impl IntegrationSettings {
    /// Editable scalar keys, as accepted by [`set_value`](Self::set_value).
    pub const KEYS: &'static [&'static str] = &[
        "log_incoming_messages",
        "consider_away_interval",
        "update_entities_interval",
        "update_api_interval",
        "unit",
    ];

    pub fn consider_away(&self) -> Duration {
        Duration::from_secs(self.consider_away_interval)
    }

    pub fn update_entities(&self) -> Duration {
        Duration::from_secs(self.update_entities_interval)
    }

    pub fn update_api(&self) -> Duration {
        Duration::from_secs(self.update_api_interval)
    }

    /// Monitoring flag for an item. System items are never monitored and
    /// unknown items default to off.
    pub fn is_monitored(&self, device_type: DeviceType, item_id: Option<&str>) -> bool {
        let Some(item_id) = item_id else {
            return false;
        };

        match device_type {
            DeviceType::Device => {
                let mac = MacAddress::new(item_id);
                self.monitored_devices
                    .get(mac.as_str())
                    .copied()
                    .unwrap_or(false)
            }
            DeviceType::Interface => self
                .monitored_interfaces
                .get(item_id)
                .copied()
                .unwrap_or(false),
            DeviceType::System => false,
        }
    }

    pub fn set_monitored_device(&mut self, mac: &MacAddress, monitored: bool) {
        self.monitored_devices.insert(mac.to_string(), monitored);
    }

    pub fn set_monitored_interface(&mut self, name: &str, monitored: bool) {
        self.monitored_interfaces.insert(name.to_owned(), monitored);
    }

    /// Check interval bounds.
    pub fn validate(&self) -> Result<(), CoreError> {
        for (field, value) in [
            ("consider_away_interval", self.consider_away_interval),
            ("update_entities_interval", self.update_entities_interval),
            ("update_api_interval", self.update_api_interval),
        ] {
            check_interval(field, value)?;
        }
        Ok(())
    }

    /// Set a scalar setting from its string form.
    pub fn set_value(&mut self, key: &str, value: &str) -> Result<(), CoreError> {
        match key {
            "log_incoming_messages" => {
                self.log_incoming_messages = parse_bool(key, value)?;
            }
            "consider_away_interval" => {
                self.consider_away_interval = parse_interval(key, value)?;
            }
            "update_entities_interval" => {
                self.update_entities_interval = parse_interval(key, value)?;
            }
            "update_api_interval" => {
                self.update_api_interval = parse_interval(key, value)?;
            }
            "unit" => {
                self.unit = value.parse().map_err(|_| CoreError::InvalidSetting {
                    field: key.into(),
                    reason: format!("expected one of {}, got '{value}'", Unit::NAMES.join(", ")),
                })?;
            }
            other => {
                return Err(CoreError::UnknownValue {
                    kind: "setting",
                    value: other.into(),
                });
            }
        }
        Ok(())
    }
}

/// Map a router user level to the admin flag used by entity validation.
/// `None` means the level is not known yet.
pub fn is_admin_level(user_level: Option<&str>) -> Option<bool> {
    user_level.map(|level| level == ADMIN_USER_LEVEL)
}

fn check_interval(field: &str, value: u64) -> Result<(), CoreError> {
    if value > MAX_INTERVAL_SECS {
        return Err(CoreError::InvalidSetting {
            field: field.into(),
            reason: format!("must be between 0 and {MAX_INTERVAL_SECS} seconds, got {value}"),
        });
    }
    Ok(())
}

fn parse_interval(field: &str, value: &str) -> Result<u64, CoreError> {
    let secs = value
        .trim()
        .parse::<u64>()
        .map_err(|_| CoreError::InvalidSetting {
            field: field.into(),
            reason: format!("expected whole seconds, got '{value}'"),
        })?;
    check_interval(field, secs)?;
    Ok(secs)
}

fn parse_bool(field: &str, value: &str) -> Result<bool, CoreError> {
    match value.trim().to_ascii_lowercase().as_str() {
        "true" | "on" | "yes" | "1" => Ok(true),
        "false" | "off" | "no" | "0" => Ok(false),
        _ => Err(CoreError::InvalidSetting {
            field: field.into(),
            reason: format!("expected true or false, got '{value}'"),
        }),
    }
}
