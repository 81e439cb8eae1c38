// swmap-core: Topology reconciliation between switch port data and BMC-reported MACs.

pub mod collector;
pub mod config;
pub mod convert;
pub mod error;
pub mod mapper;
pub mod model;
pub mod reconcile;
pub mod report;

// ── Primary re-exports ──────────────────────────────────────────────
pub use config::{BmcTarget, MapperConfig, SwitchTarget, TlsVerification};
pub use error::CoreError;
pub use mapper::{MapOutput, Mapper};
pub use reconcile::{cross_reference, merge_port_records};

// Re-export model types at the crate root for ergonomics.
pub use model::{
    BmcMacMap, DeviceType, MacAddress, PortGroups, PortRecord, Protocol, SwitchPorts,
    SwitchSummary, Topology,
};

// The API crate's envelope selector is part of `SwitchTarget`.
pub use swmap_api::NxApiFormat;
