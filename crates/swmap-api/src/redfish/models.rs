// Redfish response types
//
// Only the handful of properties the BMC collectors read. Vendors disagree
// on MAC property casing, so all known spellings are captured and
// `EthernetInterface::mac` picks one.

use serde::Deserialize;

/// `{"@odata.id": "/redfish/v1/..."}`
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ODataLink {
    #[serde(rename = "@odata.id", default)]
    pub odata_id: String,
}

/// `GET /redfish/v1/Systems/{id}`
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ComputerSystem {
    #[serde(rename = "HostName", default)]
    pub host_name: Option<String>,
    #[serde(rename = "EthernetInterfaces", default)]
    pub ethernet_interfaces: Option<ODataLink>,
}

/// Any Redfish resource collection.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Collection {
    #[serde(rename = "Members", default)]
    pub members: Vec<ODataLink>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ResourceStatus {
    #[serde(rename = "State", default)]
    pub state: Option<String>,
}

/// `GET .../EthernetInterfaces/{id}`
#[derive(Debug, Clone, Default, Deserialize)]
pub struct EthernetInterface {
    #[serde(rename = "Name", default)]
    pub name: Option<String>,
    /// Redfish standard spelling (iLO).
    #[serde(rename = "MACAddress", default)]
    pub mac_address: Option<String>,
    /// iDRAC spelling.
    #[serde(rename = "MacAddress", default)]
    pub mac_address_alt: Option<String>,
    #[serde(rename = "PermanentMACAddress", default)]
    pub permanent_mac_address: Option<String>,
    #[serde(rename = "Status", default)]
    pub status: Option<ResourceStatus>,
}

impl EthernetInterface {
    /// MAC precedence: `MACAddress`, then `MacAddress`, then
    /// `PermanentMACAddress`. Blank values are skipped. Upper-cased.
    pub fn mac(&self) -> Option<String> {
        [
            &self.mac_address,
            &self.mac_address_alt,
            &self.permanent_mac_address,
        ]
        .into_iter()
        .flatten()
        .map(|m| m.trim())
        .find(|m| !m.is_empty())
        .map(str::to_uppercase)
    }
}
