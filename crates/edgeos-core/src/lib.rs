// edgeos-core: Entity catalog, selection engine, and traffic model for
// EdgeOS router monitoring. Pure computation, no I/O.

pub mod config;
pub mod entity;
pub mod error;
pub mod model;
pub mod store;
pub mod units;

// ── Primary re-exports ──────────────────────────────────────────────
pub use config::{IntegrationSettings, is_admin_level};
pub use entity::{
    Catalog, DeviceType, EntityDescriptor, EntityKey, EntityKind, EntityValidation, Platform,
    ValidationRegistry, ValidationRule, catalog, platforms,
};
pub use error::{CatalogError, CoreError};
pub use store::DeviceRegistry;
pub use units::{MeasurementUnit, SensorFormat, Unit};

// Re-export model types at the crate root for ergonomics.
pub use model::{
    DeviceAttributes, DeviceData, DeviceSnapshot, Direction, DynamicInterfaceType, InterfaceData,
    InterfaceSnapshot, InterfaceType, MacAddress, SystemData, TrafficCounter,
};
