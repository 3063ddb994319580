// ── Device store ──
//
// In-memory registry of DHCP-discovered devices.

mod registry;

pub use registry::DeviceRegistry;
