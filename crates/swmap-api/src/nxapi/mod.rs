// NX-API client modules
//
// Cisco NX-OS exposes CLI show commands over HTTP at `/ins`. Responses come
// back either as JSON-RPC results or inside the older `ins_api` envelope;
// both are unwrapped to plain command bodies by `NxApiClient`.

pub mod client;
pub mod interfaces;
pub mod mac_table;
pub mod models;
pub mod neighbors;

pub use client::{NxApiClient, NxApiFormat};
pub use models::{CdpNeighbor, InterfaceStatus, LldpNeighbor, MacAddressEntry};
