// ── Device registry ──
//
// MAC-keyed collection of device records, kept in discovery order.
// Identity is refreshed on every lease poll; counters survive refreshes
// and only change through `update_traffic`.

use std::time::Duration;

use chrono::{DateTime, Utc};
use indexmap::IndexMap;
use tracing::{debug, info};

use crate::error::CoreError;
use crate::model::{DeviceData, Direction, MacAddress};

#[derive(Debug, Clone, Default)]
pub struct DeviceRegistry {
    devices: IndexMap<MacAddress, DeviceData>,
}

impl DeviceRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a new device or refresh the identity of a known one.
    /// Returns `true` if the MAC was new.
    pub fn upsert(&mut self, device: DeviceData) -> bool {
        if let Some(existing) = self.devices.get_mut(device.unique_id()) {
            existing.hostname = device.hostname;
            existing.ip = device.ip;
            existing.domain = device.domain;
            existing.is_leased = device.is_leased;
            return false;
        }

        debug!(mac = %device.mac, hostname = %device.hostname, "discovered device");
        self.devices.insert(device.mac.clone(), device);
        true
    }

    pub fn get(&self, mac: &MacAddress) -> Option<&DeviceData> {
        self.devices.get(mac)
    }

    /// Record a traffic reading for a known device.
    pub fn update_traffic(
        &mut self,
        mac: &MacAddress,
        direction: Direction,
        total: u64,
        rate: f64,
        at: DateTime<Utc>,
    ) -> Result<(), CoreError> {
        let device = self
            .devices
            .get_mut(mac)
            .ok_or_else(|| CoreError::DeviceNotFound {
                identifier: mac.to_string(),
            })?;
        device.update(direction, total, rate, at);
        Ok(())
    }

    /// Remove a device, preserving the order of the others.
    pub fn remove(&mut self, mac: &MacAddress) -> Option<DeviceData> {
        self.devices.shift_remove(mac)
    }

    /// Evict every device whose lease is gone. Returns the evicted MACs.
    pub fn retain_leased(&mut self) -> Vec<MacAddress> {
        let mut evicted = Vec::new();
        self.devices.retain(|mac, device| {
            if !device.is_leased {
                evicted.push(mac.clone());
            }
            device.is_leased
        });

        if !evicted.is_empty() {
            info!(count = evicted.len(), "evicted devices without lease");
        }
        evicted
    }

    /// A device is home while its last activity is younger than `consider_away`.
    pub fn is_home(&self, mac: &MacAddress, consider_away: Duration, now: DateTime<Utc>) -> bool {
        self.devices
            .get(mac)
            .is_some_and(|device| device.last_activity_age_at(now) < consider_away.as_secs())
    }

    pub fn iter(&self) -> impl Iterator<Item = &DeviceData> {
        self.devices.values()
    }

    pub fn len(&self) -> usize {
        self.devices.len()
    }

    pub fn is_empty(&self) -> bool {
        self.devices.is_empty()
    }
}

impl FromIterator<DeviceData> for DeviceRegistry {
    fn from_iter<I: IntoIterator<Item = DeviceData>>(iter: I) -> Self {
        let mut registry = Self::new();
        for device in iter {
            registry.upsert(device);
        }
        registry
    }
}
