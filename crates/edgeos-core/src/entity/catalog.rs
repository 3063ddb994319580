// ── Entity catalog and selection engine ──
//
// The catalog is fixed at process start and shared immutably. Selection
// hands out shallow copies (`Arc` clones) of the shared descriptors, so
// concurrent callers never alias a mutable working set.

use std::sync::{Arc, LazyLock};

use indexmap::IndexSet;
use tracing::debug;

use super::descriptor::{
    BinarySensorDeviceClass, BinarySensorHints, DeviceType, EntityCategory, EntityDescriptor,
    EntityKey, EntityKind, NumberHints, Platform, SelectHints, SensorDeviceClass, SensorHints,
    StateClass,
};
use super::validation::{EntityValidation, ValidationRegistry};
use crate::error::CatalogError;
use crate::units::{MeasurementUnit, Unit};

/// Ordered, immutable set of entity descriptors plus the rules that gate them.
#[derive(Debug, Clone)]
pub struct Catalog {
    descriptors: Vec<Arc<EntityDescriptor>>,
    platforms: Vec<Platform>,
    registry: ValidationRegistry,
}

impl Catalog {
    /// Build a catalog, refusing descriptors whose validation tag has no rule.
    pub fn new(
        descriptors: impl IntoIterator<Item = EntityDescriptor>,
        registry: ValidationRegistry,
    ) -> Result<Self, CatalogError> {
        let descriptors: Vec<Arc<EntityDescriptor>> =
            descriptors.into_iter().map(Arc::new).collect();

        for descriptor in &descriptors {
            if let Some(tag) = descriptor.entity_validation {
                if !registry.contains(tag) {
                    return Err(CatalogError::InvalidDescriptor {
                        key: descriptor.key,
                        tag,
                    });
                }
            }
        }

        let platforms: IndexSet<Platform> = descriptors.iter().map(|d| d.platform()).collect();

        debug!(
            descriptors = descriptors.len(),
            platforms = platforms.len(),
            "entity catalog built"
        );

        Ok(Self {
            descriptors,
            platforms: platforms.into_iter().collect(),
            registry,
        })
    }

    /// The built-in EdgeOS catalog, with the standard validation rules.
    pub fn builtin() -> Result<Self, CatalogError> {
        Self::new(BUILTIN_DESCRIPTORS.iter().copied(), ValidationRegistry::standard())
    }

    pub fn descriptors(&self) -> &[Arc<EntityDescriptor>] {
        &self.descriptors
    }

    pub fn len(&self) -> usize {
        self.descriptors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.descriptors.is_empty()
    }

    /// Distinct platforms, in order of first appearance.
    pub fn platforms(&self) -> &[Platform] {
        &self.platforms
    }

    /// Whether `descriptor` may be exposed for the given session flags.
    ///
    /// Descriptors built into this catalog always resolve; a foreign
    /// descriptor with an unknown tag is treated as not exposable.
    pub fn is_valid(
        &self,
        descriptor: &EntityDescriptor,
        is_monitored: Option<bool>,
        is_admin: Option<bool>,
    ) -> bool {
        self.registry
            .is_valid(descriptor, is_monitored, is_admin)
            .unwrap_or(false)
    }

    /// Descriptors for `platform` on `device_type` that are valid for the
    /// session flags, in catalog order. An empty result is a normal outcome.
    pub fn select(
        &self,
        platform: Platform,
        device_type: DeviceType,
        is_monitored: Option<bool>,
        is_admin: Option<bool>,
    ) -> Vec<Arc<EntityDescriptor>> {
        let selected: Vec<Arc<EntityDescriptor>> = self
            .descriptors
            .iter()
            .filter(|d| {
                d.platform() == platform
                    && d.device_type == device_type
                    && self.is_valid(d, is_monitored, is_admin)
            })
            .map(Arc::clone)
            .collect();

        debug!(
            %platform,
            %device_type,
            ?is_monitored,
            ?is_admin,
            selected = selected.len(),
            "selected entities"
        );

        selected
    }

    /// First descriptor with `key` on `platform`, ignoring validation.
    pub fn find(&self, key: EntityKey, platform: Platform) -> Option<Arc<EntityDescriptor>> {
        self.descriptors
            .iter()
            .find(|d| d.key == key && d.platform() == platform)
            .map(Arc::clone)
    }
}

static CATALOG: LazyLock<Catalog> = LazyLock::new(|| {
    Catalog::builtin()
        .unwrap_or_else(|err| panic!("built-in entity catalog is inconsistent: {err}"))
});

/// Process-wide built-in catalog.
pub fn catalog() -> &'static Catalog {
    &CATALOG
}

/// Platforms the host must register, in first-seen catalog order.
pub fn platforms() -> &'static [Platform] {
    CATALOG.platforms()
}

// ── Built-in descriptors ────────────────────────────────────────────

const fn measured(unit: MeasurementUnit) -> SensorHints {
    SensorHints {
        unit: Some(unit),
        device_class: None,
        state_class: Some(StateClass::Measurement),
    }
}

const fn data_rate() -> SensorHints {
    SensorHints {
        unit: None,
        device_class: Some(SensorDeviceClass::DataRate),
        state_class: Some(StateClass::Measurement),
    }
}

const fn data_size() -> SensorHints {
    SensorHints {
        unit: None,
        device_class: Some(SensorDeviceClass::DataSize),
        state_class: Some(StateClass::TotalIncreasing),
    }
}

const fn binary(device_class: Option<BinarySensorDeviceClass>) -> BinarySensorHints {
    BinarySensorHints {
        device_class,
        on_value: None,
        attributes: &[],
    }
}

const fn interval(key: EntityKey) -> EntityDescriptor {
    EntityDescriptor::new(
        key,
        DeviceType::System,
        EntityKind::Number(NumberHints {
            min: 0.0,
            max: 600.0,
            unit: Some(MeasurementUnit::Seconds),
        }),
    )
    .category(EntityCategory::Config)
}

/// Every entity the integration knows about, in declaration order.
///
/// `InterfaceStatus` appears twice: a read-only binary sensor for non-admin
/// sessions and a switch for admin sessions.
pub static BUILTIN_DESCRIPTORS: &[EntityDescriptor] = &[
    // ── System ──
    EntityDescriptor::sensor(
        EntityKey::CpuUsage,
        DeviceType::System,
        measured(MeasurementUnit::Percentage),
    )
    .icon("mdi:chip"),
    EntityDescriptor::sensor(
        EntityKey::RamUsage,
        DeviceType::System,
        measured(MeasurementUnit::Percentage),
    )
    .icon("mdi:memory"),
    EntityDescriptor::binary_sensor(
        EntityKey::Firmware,
        DeviceType::System,
        binary(Some(BinarySensorDeviceClass::Update)),
    ),
    EntityDescriptor::sensor(
        EntityKey::LastRestart,
        DeviceType::System,
        SensorHints {
            unit: None,
            device_class: Some(SensorDeviceClass::Timestamp),
            state_class: None,
        },
    ),
    EntityDescriptor::sensor(
        EntityKey::UnknownDevices,
        DeviceType::System,
        measured(MeasurementUnit::Devices),
    )
    .icon("mdi:help-network-outline"),
    EntityDescriptor::switch(EntityKey::LogIncomingMessages, DeviceType::System)
        .category(EntityCategory::Config)
        .icon("mdi:math-log"),
    interval(EntityKey::ConsiderAwayInterval),
    interval(EntityKey::UpdateEntitiesInterval),
    interval(EntityKey::UpdateApiInterval),
    EntityDescriptor::new(
        EntityKey::Unit,
        DeviceType::System,
        EntityKind::Select(SelectHints {
            options: Unit::NAMES,
        }),
    )
    .category(EntityCategory::Config),
    // ── Interface ──
    EntityDescriptor::binary_sensor(
        EntityKey::InterfaceConnected,
        DeviceType::Interface,
        binary(Some(BinarySensorDeviceClass::Connectivity)),
    ),
    EntityDescriptor::sensor(
        EntityKey::InterfaceReceivedDropped,
        DeviceType::Interface,
        measured(MeasurementUnit::Dropped),
    )
    .icon("mdi:package-variant-minus")
    .validated(EntityValidation::Monitored),
    EntityDescriptor::sensor(
        EntityKey::InterfaceSentDropped,
        DeviceType::Interface,
        measured(MeasurementUnit::Dropped),
    )
    .icon("mdi:package-variant-minus")
    .validated(EntityValidation::Monitored),
    EntityDescriptor::sensor(
        EntityKey::InterfaceReceivedErrors,
        DeviceType::Interface,
        measured(MeasurementUnit::Errors),
    )
    .icon("mdi:timeline-alert")
    .validated(EntityValidation::Monitored),
    EntityDescriptor::sensor(
        EntityKey::InterfaceSentErrors,
        DeviceType::Interface,
        measured(MeasurementUnit::Errors),
    )
    .icon("mdi:timeline-alert")
    .validated(EntityValidation::Monitored),
    EntityDescriptor::sensor(
        EntityKey::InterfaceReceivedPackets,
        DeviceType::Interface,
        measured(MeasurementUnit::Packets),
    )
    .icon("mdi:package-up")
    .validated(EntityValidation::Monitored),
    EntityDescriptor::sensor(
        EntityKey::InterfaceSentPackets,
        DeviceType::Interface,
        measured(MeasurementUnit::Packets),
    )
    .icon("mdi:package-up")
    .validated(EntityValidation::Monitored),
    EntityDescriptor::sensor(
        EntityKey::InterfaceReceivedRate,
        DeviceType::Interface,
        data_rate(),
    )
    .icon("mdi:download-network-outline")
    .validated(EntityValidation::Monitored),
    EntityDescriptor::sensor(EntityKey::InterfaceSentRate, DeviceType::Interface, data_rate())
        .icon("mdi:upload-network-outline")
        .validated(EntityValidation::Monitored),
    EntityDescriptor::sensor(
        EntityKey::InterfaceReceivedTraffic,
        DeviceType::Interface,
        data_size(),
    )
    .icon("mdi:download-network-outline")
    .validated(EntityValidation::Monitored),
    EntityDescriptor::sensor(
        EntityKey::InterfaceSentTraffic,
        DeviceType::Interface,
        data_size(),
    )
    .icon("mdi:upload-network-outline")
    .validated(EntityValidation::Monitored),
    EntityDescriptor::switch(EntityKey::InterfaceMonitored, DeviceType::Interface)
        .category(EntityCategory::Config)
        .icon("mdi:monitor-eye"),
    EntityDescriptor::binary_sensor(EntityKey::InterfaceStatus, DeviceType::Interface, binary(None))
        .icon("mdi:monitor-eye")
        .validated(EntityValidation::NonAdminOnly),
    EntityDescriptor::switch(EntityKey::InterfaceStatus, DeviceType::Interface)
        .icon("mdi:ethernet")
        .validated(EntityValidation::AdminOnly),
    // ── Device ──
    EntityDescriptor::sensor(EntityKey::DeviceReceivedRate, DeviceType::Device, data_rate())
        .icon("mdi:download-network-outline")
        .validated(EntityValidation::Monitored),
    EntityDescriptor::sensor(EntityKey::DeviceSentRate, DeviceType::Device, data_rate())
        .icon("mdi:upload-network-outline")
        .validated(EntityValidation::Monitored),
    EntityDescriptor::sensor(EntityKey::DeviceReceivedTraffic, DeviceType::Device, data_size())
        .icon("mdi:download-network-outline")
        .validated(EntityValidation::Monitored),
    EntityDescriptor::sensor(EntityKey::DeviceSentTraffic, DeviceType::Device, data_size())
        .icon("mdi:upload-network-outline")
        .validated(EntityValidation::Monitored),
    EntityDescriptor::new(
        EntityKey::DeviceTracker,
        DeviceType::Device,
        EntityKind::DeviceTracker,
    )
    .validated(EntityValidation::Monitored),
    EntityDescriptor::switch(EntityKey::DeviceMonitored, DeviceType::Device)
        .category(EntityCategory::Config)
        .icon("mdi:monitor-eye"),
];
