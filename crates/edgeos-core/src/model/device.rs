// ── Device domain types ──

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::net::IpAddr;
use tracing::debug;

use super::mac::MacAddress;
use super::traffic::{Direction, TrafficCounter};

/// Identity and lease information of a device, without traffic detail.
///
/// This is the "simple attributes" view handed to consumers that only
/// care about who the device is.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeviceAttributes {
    pub hostname: String,
    pub ip: IpAddr,
    pub mac: MacAddress,
    pub domain: Option<String>,
    pub is_leased: bool,
}

/// Serialization-ready view of a device: identity plus both counters.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DeviceSnapshot {
    #[serde(flatten)]
    pub attributes: DeviceAttributes,
    pub received: TrafficCounter,
    pub sent: TrafficCounter,
}

/// A device seen in the router's DHCP leases / traffic export.
#[derive(Debug, Clone, PartialEq)]
pub struct DeviceData {
    pub hostname: String,
    pub ip: IpAddr,
    pub mac: MacAddress,
    pub domain: Option<String>,
    pub is_leased: bool,
    received: TrafficCounter,
    sent: TrafficCounter,
}

impl DeviceData {
    pub fn new(
        hostname: impl Into<String>,
        ip: IpAddr,
        mac: MacAddress,
        domain: Option<String>,
        is_leased: bool,
    ) -> Self {
        Self {
            hostname: hostname.into(),
            ip,
            mac,
            domain,
            is_leased,
            received: TrafficCounter::new(Direction::Received),
            sent: TrafficCounter::new(Direction::Sent),
        }
    }

    pub fn unique_id(&self) -> &MacAddress {
        &self.mac
    }

    pub fn received(&self) -> &TrafficCounter {
        &self.received
    }

    pub fn sent(&self) -> &TrafficCounter {
        &self.sent
    }

    /// Record a new reading for one direction, replacing the previous one.
    pub fn update(&mut self, direction: Direction, total: u64, rate: f64, at: DateTime<Utc>) {
        let counter = match direction {
            Direction::Received => &mut self.received,
            Direction::Sent => &mut self.sent,
        };
        counter.update(total, rate, at);
    }

    /// Latest reading time across both directions.
    pub fn last_activity(&self) -> DateTime<Utc> {
        self.received.last_activity.max(self.sent.last_activity)
    }

    /// Whole seconds since [`last_activity`](Self::last_activity), measured now.
    pub fn last_activity_age(&self) -> u64 {
        self.last_activity_age_at(Utc::now())
    }

    /// Whole seconds between [`last_activity`](Self::last_activity) and `now`,
    /// truncated. A reading stamped after `now` (clock skew) yields 0.
    pub fn last_activity_age_at(&self, now: DateTime<Utc>) -> u64 {
        let elapsed = now.signed_duration_since(self.last_activity()).num_seconds();
        u64::try_from(elapsed).unwrap_or_else(|_| {
            debug!(mac = %self.mac, elapsed, "last activity is in the future, clamping age to 0");
            0
        })
    }

    pub fn attributes(&self) -> DeviceAttributes {
        DeviceAttributes {
            hostname: self.hostname.clone(),
            ip: self.ip,
            mac: self.mac.clone(),
            domain: self.domain.clone(),
            is_leased: self.is_leased,
        }
    }

    pub fn snapshot(&self) -> DeviceSnapshot {
        DeviceSnapshot {
            attributes: self.attributes(),
            received: self.received.clone(),
            sent: self.sent.clone(),
        }
    }
}

impl From<DeviceSnapshot> for DeviceData {
    fn from(snapshot: DeviceSnapshot) -> Self {
        let DeviceSnapshot {
            attributes,
            mut received,
            mut sent,
        } = snapshot;
        // Trust the field position over whatever direction tag was serialized.
        received.direction = Direction::Received;
        sent.direction = Direction::Sent;

        Self {
            hostname: attributes.hostname,
            ip: attributes.ip,
            mac: attributes.mac,
            domain: attributes.domain,
            is_leased: attributes.is_leased,
            received,
            sent,
        }
    }
}
