// ── Domain model ──
//
// Per-port observations, the normalized MAC address they are joined on,
// and the per-run topology context that holds them.

pub mod mac;
pub mod port;
pub mod topology;

pub use mac::MacAddress;
pub use port::{DeviceType, PortGroups, PortRecord, Protocol};
pub use topology::{BmcMacMap, SwitchPorts, SwitchSummary, Topology};
