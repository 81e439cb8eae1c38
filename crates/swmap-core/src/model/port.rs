use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};

use super::mac::MacAddress;

/// Neighbor-discovery protocol a record's identity came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumString, Serialize, Deserialize)]
#[strum(serialize_all = "UPPERCASE", ascii_case_insensitive)]
pub enum Protocol {
    Cdp,
    Lldp,
}

/// What sits on the far end of a switch port.
///
/// `Unknown` is the only state that changes: BMC cross-referencing can
/// promote it to `Server`. `Switch` and `Server` are final.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Display, EnumString, Serialize, Deserialize,
)]
#[strum(serialize_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum DeviceType {
    Switch,
    Server,
    #[default]
    Unknown,
}

/// One observation of a single switch port.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PortRecord {
    /// Local port (`Eth1/1`). Unique per switch once merged.
    pub interface: String,
    pub connected_device: Option<String>,
    pub mac_address: Option<MacAddress>,
    pub protocol: Option<Protocol>,
    pub device_type: DeviceType,
}

impl PortRecord {
    /// A record learned from CDP or LLDP. An empty device name is treated
    /// as absent.
    pub fn neighbor(
        interface: impl Into<String>,
        device: impl Into<String>,
        protocol: Protocol,
        device_type: DeviceType,
    ) -> Self {
        let device = device.into();
        Self {
            interface: interface.into(),
            connected_device: (!device.is_empty()).then_some(device),
            mac_address: None,
            protocol: Some(protocol),
            device_type,
        }
    }

    /// A record learned only from the MAC address table.
    pub fn mac_only(interface: impl Into<String>, mac: MacAddress) -> Self {
        Self {
            interface: interface.into(),
            connected_device: None,
            mac_address: Some(mac),
            protocol: None,
            device_type: DeviceType::Unknown,
        }
    }

    #[must_use]
    pub fn with_mac(mut self, mac: MacAddress) -> Self {
        self.mac_address = Some(mac);
        self
    }

    /// The record's MAC, if it has a non-empty one.
    pub fn mac(&self) -> Option<&MacAddress> {
        self.mac_address.as_ref().filter(|m| !m.is_empty())
    }
}

/// A switch's records split by classification, each group in record
/// order. Reporters render the groups switches, servers, unknown.
#[derive(Debug, Default)]
pub struct PortGroups<'a> {
    pub switches: Vec<&'a PortRecord>,
    pub servers: Vec<&'a PortRecord>,
    pub unknown: Vec<&'a PortRecord>,
}

impl<'a> PortGroups<'a> {
    pub fn from_records(records: &'a [PortRecord]) -> Self {
        let mut groups = Self::default();
        for record in records {
            match record.device_type {
                DeviceType::Switch => groups.switches.push(record),
                DeviceType::Server => groups.servers.push(record),
                DeviceType::Unknown => groups.unknown.push(record),
            }
        }
        groups
    }
}
