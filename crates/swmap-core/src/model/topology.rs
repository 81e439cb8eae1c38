use std::collections::HashMap;

use indexmap::IndexMap;
use serde::Serialize;
use tracing::warn;

use super::mac::MacAddress;
use super::port::{PortGroups, PortRecord};
use crate::reconcile;

// ── BMC MAC map ─────────────────────────────────────────────────────

/// MAC → server hostname, as reported by management controllers.
///
/// Last write wins when two BMCs report the same MAC. Empty MACs are
/// never stored and never found.
#[derive(Debug, Clone, Default)]
pub struct BmcMacMap {
    entries: HashMap<MacAddress, String>,
}

impl BmcMacMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Map `mac` to `hostname`, returning the hostname it replaced.
    pub fn insert(&mut self, mac: MacAddress, hostname: impl Into<String>) -> Option<String> {
        if mac.is_empty() {
            return None;
        }
        self.entries.insert(mac, hostname.into())
    }

    pub fn hostname_for(&self, mac: &MacAddress) -> Option<&str> {
        if mac.is_empty() {
            return None;
        }
        self.entries.get(mac).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<S: Into<String>> FromIterator<(MacAddress, S)> for BmcMacMap {
    fn from_iter<I: IntoIterator<Item = (MacAddress, S)>>(iter: I) -> Self {
        let mut map = Self::new();
        for (mac, hostname) in iter {
            map.insert(mac, hostname);
        }
        map
    }
}

// ── Per-switch record set ───────────────────────────────────────────

/// Everything learned about one switch in this run.
#[derive(Debug, Clone, Default, Serialize)]
pub struct SwitchPorts {
    pub hostname: String,
    /// Merged records: neighbor order first, then MAC-only entries.
    pub records: Vec<PortRecord>,
    /// Interface → operational state from `show interface status`.
    pub interface_states: IndexMap<String, String>,
}

impl SwitchPorts {
    pub fn groups(&self) -> PortGroups<'_> {
        PortGroups::from_records(&self.records)
    }
}

/// Record counts for one switch, by classification.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SwitchSummary {
    pub hostname: String,
    pub switches: usize,
    pub servers: usize,
    pub unknown: usize,
    pub active_ports: usize,
}

// ── Topology context ────────────────────────────────────────────────

/// The run-wide context: every switch's record set plus the BMC MAC map.
///
/// Built fresh by each discovery and passed explicitly through the
/// reconciliation steps; nothing survives between runs.
#[derive(Debug, Clone, Default)]
pub struct Topology {
    switches: IndexMap<String, SwitchPorts>,
    bmc_macs: BmcMacMap,
    unreachable: Vec<String>,
    resolved: usize,
}

impl Topology {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add (or replace) a switch's record set. Switches keep the position
    /// of their first insertion.
    pub fn insert_switch(&mut self, ports: SwitchPorts) {
        let hostname = ports.hostname.clone();
        if let Some(previous) = self.switches.insert(hostname.clone(), ports) {
            warn!(
                switch = %hostname,
                dropped = previous.records.len(),
                "switch hostname seen twice, replacing earlier record set"
            );
        }
    }

    pub fn mark_unreachable(&mut self, hostname: impl Into<String>) {
        self.unreachable.push(hostname.into());
    }

    pub fn set_bmc_macs(&mut self, map: BmcMacMap) {
        self.bmc_macs = map;
    }

    pub fn switch(&self, hostname: &str) -> Option<&SwitchPorts> {
        self.switches.get(hostname)
    }

    pub fn switches(&self) -> impl Iterator<Item = &SwitchPorts> {
        self.switches.values()
    }

    pub fn switch_count(&self) -> usize {
        self.switches.len()
    }

    /// Switches that could not be reached at all.
    pub fn unreachable(&self) -> &[String] {
        &self.unreachable
    }

    pub fn bmc_macs(&self) -> &BmcMacMap {
        &self.bmc_macs
    }

    /// Promote unknown ports whose MAC a BMC reported. Returns how many
    /// records changed.
    pub fn resolve_servers(&mut self) -> usize {
        let bmc_macs = &self.bmc_macs;
        let changed: usize = self
            .switches
            .values_mut()
            .map(|sw| reconcile::cross_reference(&mut sw.records, bmc_macs))
            .sum();
        self.resolved += changed;
        changed
    }

    /// Total ports promoted to server so far.
    pub fn resolved(&self) -> usize {
        self.resolved
    }

    pub fn summary(&self) -> Vec<SwitchSummary> {
        self.switches()
            .map(|sw| {
                let groups = sw.groups();
                SwitchSummary {
                    hostname: sw.hostname.clone(),
                    switches: groups.switches.len(),
                    servers: groups.servers.len(),
                    unknown: groups.unknown.len(),
                    active_ports: sw
                        .interface_states
                        .values()
                        .filter(|state| crate::convert::is_active_state(state))
                        .count(),
                }
            })
            .collect()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::model::{DeviceType, Protocol};

    #[test]
    fn bmc_map_last_write_wins() {
        let mut map = BmcMacMap::new();
        let mac = MacAddress::new("11:22:33:44:55:66");
        assert_eq!(map.insert(mac.clone(), "host-a"), None);
        assert_eq!(map.insert(mac.clone(), "host-b").as_deref(), Some("host-a"));
        assert_eq!(map.hostname_for(&mac), Some("host-b"));
        assert_eq!(map.len(), 1);
    }

    #[test]
    fn bmc_map_never_stores_or_finds_empty_mac() {
        let mut map = BmcMacMap::new();
        assert_eq!(map.insert(MacAddress::new(""), "ghost"), None);
        assert!(map.is_empty());
        assert_eq!(map.hostname_for(&MacAddress::new("")), None);
    }

    #[test]
    fn switches_keep_first_insertion_order() {
        let mut topo = Topology::new();
        for name in ["leaf-b", "leaf-a", "leaf-b"] {
            topo.insert_switch(SwitchPorts {
                hostname: name.into(),
                ..SwitchPorts::default()
            });
        }
        let names: Vec<_> = topo.switches().map(|s| s.hostname.as_str()).collect();
        assert_eq!(names, ["leaf-b", "leaf-a"]);
    }

    #[test]
    fn repeated_hostname_replaces_in_place() {
        let mut topo = Topology::new();
        topo.insert_switch(SwitchPorts {
            hostname: "leaf-a".into(),
            records: vec![PortRecord::mac_only("Eth1/1", MacAddress::new("00:00:00:00:00:01"))],
            ..SwitchPorts::default()
        });
        topo.insert_switch(SwitchPorts {
            hostname: "leaf-a".into(),
            ..SwitchPorts::default()
        });
        assert_eq!(topo.switch_count(), 1);
        assert!(topo.switch("leaf-a").unwrap().records.is_empty());
    }

    #[test]
    fn summary_counts_by_classification() {
        let mut topo = Topology::new();
        let mut states = IndexMap::new();
        states.insert("Eth1/1".to_owned(), "connected".to_owned());
        states.insert("Eth1/2".to_owned(), "notconnec".to_owned());
        topo.insert_switch(SwitchPorts {
            hostname: "leaf-1".into(),
            records: vec![
                PortRecord::neighbor("Eth1/1", "spine", Protocol::Cdp, DeviceType::Switch),
                PortRecord::mac_only("Eth1/5", MacAddress::new("aa:aa:aa:aa:aa:05")),
            ],
            interface_states: states,
        });

        let summary = topo.summary();
        assert_eq!(summary.len(), 1);
        assert_eq!(
            summary[0],
            SwitchSummary {
                hostname: "leaf-1".into(),
                switches: 1,
                servers: 0,
                unknown: 1,
                active_ports: 1,
            }
        );
    }
}
