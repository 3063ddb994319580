// ── Monitored-object data model ──
//
// Records the poller keeps per physical or logical object on the router.
// Counters are mutated once per poll cycle; everything else here is a
// derived, read-only view.

pub mod device;
pub mod interface;
pub mod mac;
pub mod system;
pub mod traffic;

pub use device::{DeviceAttributes, DeviceData, DeviceSnapshot};
pub use interface::{DynamicInterfaceType, InterfaceData, InterfaceSnapshot, InterfaceType};
pub use mac::MacAddress;
pub use system::SystemData;
pub use traffic::{Direction, TrafficCounter};
