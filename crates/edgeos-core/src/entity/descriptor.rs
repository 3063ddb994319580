// ── Entity descriptor types ──
//
// One descriptor per potentially exposed entity. The common envelope
// (key, device type, validation, icon, category) is shared; everything
// platform-specific lives in the `EntityKind` variant.

use serde::{Deserialize, Serialize};
use strum::{AsRefStr, Display, EnumIter, EnumString};

use super::validation::EntityValidation;
use crate::units::MeasurementUnit;

/// Host platform an entity is exposed through.
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
pub enum Platform {
    Sensor,
    BinarySensor,
    Switch,
    Number,
    Select,
    DeviceTracker,
}

/// Category of object an entity attaches to.
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
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
pub enum DeviceType {
    System,
    Interface,
    Device,
}

/// Stable entity identifiers. Not unique across platforms.
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
pub enum EntityKey {
    CpuUsage,
    RamUsage,
    Firmware,
    LastRestart,
    UnknownDevices,
    LogIncomingMessages,
    ConsiderAwayInterval,
    UpdateEntitiesInterval,
    UpdateApiInterval,
    Unit,

    InterfaceConnected,
    InterfaceReceivedDropped,
    InterfaceSentDropped,
    InterfaceReceivedErrors,
    InterfaceSentErrors,
    InterfaceReceivedPackets,
    InterfaceSentPackets,
    InterfaceReceivedRate,
    InterfaceSentRate,
    InterfaceReceivedTraffic,
    InterfaceSentTraffic,
    InterfaceMonitored,
    InterfaceStatus,

    DeviceReceivedRate,
    DeviceSentRate,
    DeviceReceivedTraffic,
    DeviceSentTraffic,
    DeviceTracker,
    DeviceMonitored,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum EntityCategory {
    Config,
    Diagnostic,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum SensorDeviceClass {
    Timestamp,
    DataRate,
    DataSize,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum StateClass {
    Measurement,
    TotalIncreasing,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum BinarySensorDeviceClass {
    Update,
    Connectivity,
}

/// Raw state value that means "on" for binary sensors and switches.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum OnValue {
    Bool(bool),
    Text(&'static str),
}

// ── Platform-specific hints ─────────────────────────────────────────

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct SensorHints {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub unit: Option<MeasurementUnit>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub device_class: Option<SensorDeviceClass>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub state_class: Option<StateClass>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct BinarySensorHints {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub device_class: Option<BinarySensorDeviceClass>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub on_value: Option<OnValue>,
    pub attributes: &'static [&'static str],
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct SwitchHints {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub on_value: Option<OnValue>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub action_name: Option<&'static str>,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct NumberHints {
    pub min: f64,
    pub max: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub unit: Option<MeasurementUnit>,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct SelectHints {
    pub options: &'static [&'static str],
}

/// Platform variant with its kind-specific hints.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(tag = "platform", rename_all = "snake_case")]
pub enum EntityKind {
    Sensor(SensorHints),
    BinarySensor(BinarySensorHints),
    Switch(SwitchHints),
    Number(NumberHints),
    Select(SelectHints),
    DeviceTracker,
}

impl EntityKind {
    pub fn platform(&self) -> Platform {
        match self {
            Self::Sensor(_) => Platform::Sensor,
            Self::BinarySensor(_) => Platform::BinarySensor,
            Self::Switch(_) => Platform::Switch,
            Self::Number(_) => Platform::Number,
            Self::Select(_) => Platform::Select,
            Self::DeviceTracker => Platform::DeviceTracker,
        }
    }
}

/// Immutable description of one potentially exposed entity.
///
/// Only `kind.platform()`, `device_type` and `entity_validation` take part
/// in selection; the remaining fields are carried through untouched.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct EntityDescriptor {
    pub key: EntityKey,
    pub device_type: DeviceType,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub entity_validation: Option<EntityValidation>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub icon: Option<&'static str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub entity_category: Option<EntityCategory>,
    #[serde(flatten)]
    pub kind: EntityKind,
}

impl EntityDescriptor {
    pub const fn new(key: EntityKey, device_type: DeviceType, kind: EntityKind) -> Self {
        Self {
            key,
            device_type,
            entity_validation: None,
            icon: None,
            entity_category: None,
            kind,
        }
    }

    pub const fn sensor(key: EntityKey, device_type: DeviceType, hints: SensorHints) -> Self {
        Self::new(key, device_type, EntityKind::Sensor(hints))
    }

    pub const fn binary_sensor(
        key: EntityKey,
        device_type: DeviceType,
        hints: BinarySensorHints,
    ) -> Self {
        Self::new(key, device_type, EntityKind::BinarySensor(hints))
    }

    pub const fn switch(key: EntityKey, device_type: DeviceType) -> Self {
        Self::new(
            key,
            device_type,
            EntityKind::Switch(SwitchHints {
                on_value: None,
                action_name: None,
            }),
        )
    }

    pub const fn validated(mut self, validation: EntityValidation) -> Self {
        self.entity_validation = Some(validation);
        self
    }

    pub const fn icon(mut self, icon: &'static str) -> Self {
        self.icon = Some(icon);
        self
    }

    pub const fn category(mut self, category: EntityCategory) -> Self {
        self.entity_category = Some(category);
        self
    }

    pub fn platform(&self) -> Platform {
        self.kind.platform()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn platform_follows_kind() {
        let d = EntityDescriptor::switch(EntityKey::InterfaceStatus, DeviceType::Interface);
        assert_eq!(d.platform(), Platform::Switch);
        let t = EntityDescriptor::new(
            EntityKey::DeviceTracker,
            DeviceType::Device,
            EntityKind::DeviceTracker,
        );
        assert_eq!(t.platform(), Platform::DeviceTracker);
    }

    #[test]
    fn serializes_platform_tag_inline() {
        let d = EntityDescriptor::sensor(
            EntityKey::CpuUsage,
            DeviceType::System,
            SensorHints {
                unit: Some(MeasurementUnit::Percentage),
                device_class: None,
                state_class: Some(StateClass::Measurement),
            },
        )
        .icon("mdi:chip");

        let json = serde_json::to_value(d).unwrap();
        assert_eq!(json["platform"], "sensor");
        assert_eq!(json["key"], "cpu_usage");
        assert_eq!(json["device_type"], "system");
        assert_eq!(json["unit"], "%");
        assert_eq!(json["icon"], "mdi:chip");
        assert!(json.get("entity_validation").is_none());
    }

    #[test]
    fn string_forms_parse_back() {
        assert_eq!("binary_sensor".parse::<Platform>().unwrap(), Platform::BinarySensor);
        assert_eq!("Interface".parse::<DeviceType>().unwrap(), DeviceType::Interface);
        assert_eq!(EntityKey::InterfaceStatus.to_string(), "interface_status");
    }
}
