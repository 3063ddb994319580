// ── Router interface domain types ──

use serde::{Deserialize, Serialize};
use strum::{AsRefStr, Display, EnumIter, EnumString, IntoEnumIterator};

use super::traffic::{Direction, TrafficCounter};

/// Interface type as reported by the router's configuration tree.
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
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum InterfaceType {
    Bridge,
    Loopback,
    Ethernet,
    Switch,
    #[serde(rename = "openvpn")]
    #[strum(serialize = "openvpn")]
    OpenVpn,
    Wireguard,
    Dynamic,
}

impl InterfaceType {
    /// Static types the integration creates entities for.
    pub fn is_supported(self) -> bool {
        matches!(
            self,
            Self::Bridge | Self::Ethernet | Self::Switch | Self::OpenVpn | Self::Wireguard
        )
    }
}

/// Name prefixes of interfaces that only appear at runtime (`dynamic` type).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumIter, AsRefStr)]
#[strum(serialize_all = "lowercase")]
pub enum DynamicInterfaceType {
    Pppoe,
    #[strum(serialize = "vtun")]
    VirtualTunnel,
    #[strum(serialize = "bond")]
    Bonding,
    #[strum(serialize = "imq")]
    IntermediateQueueing,
    #[strum(serialize = "npi")]
    NetworkProgramming,
    #[strum(serialize = "lo")]
    Loopback,
}

impl DynamicInterfaceType {
    /// Classify a dynamic interface by its name prefix (`pppoe0`, `vtun1`, ...).
    pub fn from_name(name: &str) -> Option<Self> {
        Self::iter().find(|prefix| name.starts_with(prefix.as_ref()))
    }

    pub fn is_supported(self) -> bool {
        matches!(self, Self::Pppoe | Self::VirtualTunnel)
    }
}

/// Serialization-ready view of an interface.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[allow(clippy::struct_excessive_bools)]
pub struct InterfaceSnapshot {
    pub name: String,
    pub description: Option<String>,
    #[serde(rename = "type")]
    pub interface_type: InterfaceType,
    pub is_supported: bool,
    pub duplex: Option<String>,
    pub speed: Option<String>,
    pub bridge_group: Option<String>,
    pub address: Option<Vec<String>>,
    pub aging: Option<String>,
    pub bridged_conntrack: Option<String>,
    pub hello_time: Option<String>,
    pub max_age: Option<String>,
    pub priority: Option<String>,
    pub promiscuous: Option<String>,
    pub stp: Option<bool>,
    pub multicast: Option<f64>,
    pub received: TrafficCounter,
    pub sent: TrafficCounter,
}

/// A network interface on the router.
#[derive(Debug, Clone, PartialEq)]
pub struct InterfaceData {
    pub name: String,
    interface_type: InterfaceType,
    is_supported: bool,
    pub description: Option<String>,
    pub duplex: Option<String>,
    pub speed: Option<String>,
    pub bridge_group: Option<String>,
    pub address: Option<Vec<String>>,
    pub aging: Option<String>,
    pub bridged_conntrack: Option<String>,
    pub hello_time: Option<String>,
    pub max_age: Option<String>,
    pub priority: Option<String>,
    pub promiscuous: Option<String>,
    pub stp: Option<bool>,
    pub multicast: Option<f64>,
    pub up: Option<bool>,
    pub l1up: Option<bool>,
    pub mac: Option<String>,
    received: TrafficCounter,
    sent: TrafficCounter,
}

impl InterfaceData {
    pub fn new(name: impl Into<String>, interface_type: InterfaceType) -> Self {
        let name = name.into();
        let is_supported = classify(&name, interface_type);

        Self {
            name,
            interface_type,
            is_supported,
            description: None,
            duplex: None,
            speed: None,
            bridge_group: None,
            address: None,
            aging: None,
            bridged_conntrack: None,
            hello_time: None,
            max_age: None,
            priority: None,
            promiscuous: None,
            stp: None,
            multicast: None,
            up: None,
            l1up: None,
            mac: None,
            received: TrafficCounter::new(Direction::Received),
            sent: TrafficCounter::new(Direction::Sent),
        }
    }

    pub fn unique_id(&self) -> &str {
        &self.name
    }

    pub fn interface_type(&self) -> InterfaceType {
        self.interface_type
    }

    pub fn is_supported(&self) -> bool {
        self.is_supported
    }

    /// Refine a `dynamic` interface once its concrete type is known.
    /// Interfaces with a static type keep it.
    pub fn update_interface_type(&mut self, interface_type: InterfaceType) {
        if self.interface_type == InterfaceType::Dynamic && self.interface_type != interface_type {
            self.interface_type = interface_type;
            self.is_supported = classify(&self.name, interface_type);
        }
    }

    pub fn received(&self) -> &TrafficCounter {
        &self.received
    }

    pub fn sent(&self) -> &TrafficCounter {
        &self.sent
    }

    pub fn counter_mut(&mut self, direction: Direction) -> &mut TrafficCounter {
        match direction {
            Direction::Received => &mut self.received,
            Direction::Sent => &mut self.sent,
        }
    }

    pub fn snapshot(&self) -> InterfaceSnapshot {
        InterfaceSnapshot {
            name: self.name.clone(),
            description: self.description.clone(),
            interface_type: self.interface_type,
            is_supported: self.is_supported,
            duplex: self.duplex.clone(),
            speed: self.speed.clone(),
            bridge_group: self.bridge_group.clone(),
            address: self.address.clone(),
            aging: self.aging.clone(),
            bridged_conntrack: self.bridged_conntrack.clone(),
            hello_time: self.hello_time.clone(),
            max_age: self.max_age.clone(),
            priority: self.priority.clone(),
            promiscuous: self.promiscuous.clone(),
            stp: self.stp,
            multicast: self.multicast,
            received: self.received.clone(),
            sent: self.sent.clone(),
        }
    }

    /// Flat attribute map: drops the counters, the support flag, and unset fields.
    pub fn attributes(&self) -> serde_json::Map<String, serde_json::Value> {
        let Ok(serde_json::Value::Object(mut map)) = serde_json::to_value(self.snapshot()) else {
            return serde_json::Map::new();
        };
        map.remove("received");
        map.remove("sent");
        map.remove("is_supported");
        map.retain(|_, value| !value.is_null());
        map
    }
}

fn classify(name: &str, interface_type: InterfaceType) -> bool {
    if interface_type == InterfaceType::Dynamic {
        return DynamicInterfaceType::from_name(name)
            .is_some_and(DynamicInterfaceType::is_supported);
    }
    interface_type.is_supported()
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};

    #[test]
    fn static_types_are_classified_by_type() {
        assert!(InterfaceData::new("eth0", InterfaceType::Ethernet).is_supported());
        assert!(InterfaceData::new("br0", InterfaceType::Bridge).is_supported());
        assert!(InterfaceData::new("wg0", InterfaceType::Wireguard).is_supported());
        assert!(!InterfaceData::new("lo", InterfaceType::Loopback).is_supported());
    }

    #[test]
    fn dynamic_types_are_classified_by_prefix() {
        assert!(InterfaceData::new("pppoe0", InterfaceType::Dynamic).is_supported());
        assert!(InterfaceData::new("vtun1", InterfaceType::Dynamic).is_supported());
        assert!(!InterfaceData::new("imq0", InterfaceType::Dynamic).is_supported());
        assert!(!InterfaceData::new("bond0", InterfaceType::Dynamic).is_supported());
        assert!(!InterfaceData::new("mystery0", InterfaceType::Dynamic).is_supported());
    }

    #[test]
    fn only_dynamic_interfaces_change_type() {
        let mut iface = InterfaceData::new("imq0", InterfaceType::Dynamic);
        iface.update_interface_type(InterfaceType::Ethernet);
        assert_eq!(iface.interface_type(), InterfaceType::Ethernet);
        assert!(iface.is_supported());

        let mut eth = InterfaceData::new("eth1", InterfaceType::Ethernet);
        eth.update_interface_type(InterfaceType::Loopback);
        assert_eq!(eth.interface_type(), InterfaceType::Ethernet);
        assert!(eth.is_supported());
    }

    #[test]
    fn attributes_drop_counters_support_flag_and_unset_fields() {
        let mut iface = InterfaceData::new("eth0", InterfaceType::Ethernet);
        iface.description = Some("WAN".into());
        iface.stp = Some(false);
        iface
            .counter_mut(Direction::Received)
            .update(10, 1.0, Utc.timestamp_opt(5, 0).unwrap());

        let attrs = iface.attributes();
        let mut keys: Vec<_> = attrs.keys().map(String::as_str).collect();
        keys.sort_unstable();

        assert_eq!(keys, ["description", "name", "stp", "type"]);
        assert_eq!(attrs["type"], "ethernet");
    }

    #[test]
    fn packet_counters_reach_the_snapshot() {
        let mut iface = InterfaceData::new("eth0", InterfaceType::Ethernet);
        iface.counter_mut(Direction::Received).update_packets(5, 1, 2);
        iface.counter_mut(Direction::Received).update_packets(9, 0, 3);
        iface.counter_mut(Direction::Sent).update_packets(4, 0, 0);

        let snapshot = iface.snapshot();
        assert_eq!(snapshot.received.packets, 9);
        assert_eq!(snapshot.received.errors, 0);
        assert_eq!(snapshot.received.dropped, 3);
        assert_eq!(snapshot.sent.packets, 4);
        assert!(!snapshot.received.has_activity());
    }

    #[test]
    fn interface_type_string_forms() {
        assert_eq!(InterfaceType::OpenVpn.to_string(), "openvpn");
        assert_eq!("wireguard".parse::<InterfaceType>().unwrap(), InterfaceType::Wireguard);
        assert_eq!(
            DynamicInterfaceType::from_name("lo0"),
            Some(DynamicInterfaceType::Loopback)
        );
    }
}
