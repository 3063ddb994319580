// ── Directional traffic counters ──

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use strum::{AsRefStr, Display, EnumIter, EnumString};

/// Traffic direction, as seen from the monitored device.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    EnumIter,
    AsRefStr,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum Direction {
    Received,
    Sent,
}

/// Cumulative counter and instantaneous rate for one direction.
///
/// Written only by the poller. Monotonicity of `total` is the writer's
/// responsibility; an update simply replaces the previous reading.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrafficCounter {
    pub direction: Direction,
    /// Cumulative bytes.
    pub total: u64,
    /// Bytes per second at the time of the reading.
    pub rate: f64,
    #[serde(default)]
    pub packets: u64,
    #[serde(default)]
    pub errors: u64,
    #[serde(default)]
    pub dropped: u64,
    /// Time of the last reading; the UNIX epoch until the first update.
    pub last_activity: DateTime<Utc>,
}

impl TrafficCounter {
    pub fn new(direction: Direction) -> Self {
        Self {
            direction,
            total: 0,
            rate: 0.0,
            packets: 0,
            errors: 0,
            dropped: 0,
            last_activity: DateTime::<Utc>::UNIX_EPOCH,
        }
    }

    /// Replace the byte counter and rate with a new reading taken at `at`.
    pub fn update(&mut self, total: u64, rate: f64, at: DateTime<Utc>) {
        self.total = total;
        self.rate = rate;
        self.last_activity = at;
    }

    /// Replace the packet-level counters. Interfaces report these, devices don't.
    pub fn update_packets(&mut self, packets: u64, errors: u64, dropped: u64) {
        self.packets = packets;
        self.errors = errors;
        self.dropped = dropped;
    }

    /// Whether this counter has received at least one reading.
    pub fn has_activity(&self) -> bool {
        self.last_activity > DateTime::<Utc>::UNIX_EPOCH
    }
}
