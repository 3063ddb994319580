// ── Entity catalog ──
//
// Static declaration of every entity the integration can expose, the
// validation rules gating them, and the selection engine on top.

pub mod catalog;
pub mod descriptor;
pub mod validation;

pub use catalog::{BUILTIN_DESCRIPTORS, Catalog, catalog, platforms};
pub use descriptor::{
    BinarySensorDeviceClass, BinarySensorHints, DeviceType, EntityCategory, EntityDescriptor,
    EntityKey, EntityKind, NumberHints, OnValue, Platform, SelectHints, SensorDeviceClass,
    SensorHints, StateClass, SwitchHints,
};
pub use validation::{EntityValidation, ValidationRegistry, ValidationRule};
