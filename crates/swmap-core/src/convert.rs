// ── API-to-domain conversions ──
//
// Bridges raw `swmap_api` rows into `PortRecord`s. Interface names are
// shortened to the form the MAC table and LLDP use, MACs are normalized,
// and neighbors are classified against the configured switch signatures.

use swmap_api::nxapi::{CdpNeighbor, InterfaceStatus, LldpNeighbor, MacAddressEntry};

use crate::config::DEFAULT_SWITCH_SIGNATURE;
use crate::model::{DeviceType, MacAddress, PortRecord, Protocol};

// ── Helpers ────────────────────────────────────────────────────────

/// Shorten long NX-OS interface names: `Ethernet1/1` → `Eth1/1`,
/// `port-channel10` → `Po10`. Anything else passes through trimmed.
pub fn normalize_interface(name: &str) -> String {
    let name = name.trim();
    if let Some(rest) = name.strip_prefix("Ethernet") {
        format!("Eth{rest}")
    } else if let Some(rest) = name.strip_prefix("port-channel") {
        format!("Po{rest}")
    } else {
        name.to_owned()
    }
}

/// `show interface status` states that mean a live link.
pub fn is_active_state(state: &str) -> bool {
    matches!(state.trim().to_ascii_lowercase().as_str(), "connected" | "up")
}

/// Data-plane ports a per-interface MAC-table query makes sense for.
/// `mgmt0`, loopbacks and SVIs are rejected by `show mac address-table
/// interface`, and one rejected command fails its whole batch.
pub fn is_switchport(interface: &str) -> bool {
    interface.starts_with("Eth") || interface.starts_with("Po")
}

// ── Neighbor classification ────────────────────────────────────────

/// Classifies CDP/LLDP neighbors by platform string.
#[derive(Debug, Clone)]
pub struct Classifier {
    signatures: Vec<String>,
}

impl Default for Classifier {
    fn default() -> Self {
        Self::new(vec![DEFAULT_SWITCH_SIGNATURE.to_owned()])
    }
}

impl Classifier {
    /// Empty signatures are dropped; they would match every neighbor.
    pub fn new(signatures: Vec<String>) -> Self {
        Self {
            signatures: signatures.into_iter().filter(|s| !s.is_empty()).collect(),
        }
    }

    /// `Switch` when `descriptor` contains any signature, else `Unknown`.
    /// Never yields `Server`; only BMC cross-referencing does that.
    pub fn classify(&self, descriptor: &str) -> DeviceType {
        if self.signatures.iter().any(|sig| descriptor.contains(sig.as_str())) {
            DeviceType::Switch
        } else {
            DeviceType::Unknown
        }
    }

    pub fn cdp(&self, n: &CdpNeighbor) -> PortRecord {
        PortRecord::neighbor(
            normalize_interface(&n.intf_id),
            n.device_id.trim(),
            Protocol::Cdp,
            self.classify(&n.platform_id),
        )
    }

    /// LLDP also announces the neighbor's chassis id, which is its MAC.
    pub fn lldp(&self, n: &LldpNeighbor) -> PortRecord {
        let record = PortRecord::neighbor(
            normalize_interface(&n.l_port_id),
            n.sys_name.trim(),
            Protocol::Lldp,
            self.classify(&n.sys_desc),
        );
        match n.chassis_id.as_deref().map(str::trim) {
            Some(chassis) if !chassis.is_empty() => record.with_mac(MacAddress::new(chassis)),
            _ => record,
        }
    }
}

// ── MAC table ──────────────────────────────────────────────────────

impl From<MacAddressEntry> for PortRecord {
    fn from(e: MacAddressEntry) -> Self {
        PortRecord::mac_only(normalize_interface(&e.disp_port), MacAddress::new(&e.disp_mac_addr))
    }
}

/// Convert MAC-table rows, dropping rows with no port (router/CPU entries).
pub fn mac_records(entries: Vec<MacAddressEntry>) -> Vec<PortRecord> {
    entries
        .into_iter()
        .filter(|e| !e.disp_port.trim().is_empty())
        .map(PortRecord::from)
        .collect()
}

// ── Interface status ───────────────────────────────────────────────

/// `(interface, state)` with the interface name normalized.
pub fn interface_state(row: &InterfaceStatus) -> (String, String) {
    (normalize_interface(&row.interface), row.state.trim().to_owned())
}
