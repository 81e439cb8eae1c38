// HPE iLO network discovery
//
// iLO firmware generations disagree on where NICs live. The system's own
// `EthernetInterfaces` link is tried first, then a fixed list of known
// paths until one of them yields interfaces.

use tracing::{debug, warn};

use crate::error::Error;
use crate::redfish::client::RedfishClient;
use crate::redfish::models::{ComputerSystem, EthernetInterface};
use crate::redfish::{BmcClient, BmcInterface, BmcNetworkInfo};

const SYSTEM_PATH: &str = "Systems/1";

const FALLBACK_PATHS: [&str; 3] = [
    "Systems/1/BaseNetworkAdapters",
    "Systems/1/EthernetInterfaces",
    "Systems/1/NetworkAdapters",
];

pub struct IloClient {
    redfish: RedfishClient,
}

impl IloClient {
    pub fn new(redfish: RedfishClient) -> Self {
        Self { redfish }
    }

    /// Only NICs that actually report a MAC are kept.
    fn to_interfaces(raw: Vec<EthernetInterface>) -> Vec<BmcInterface> {
        raw.into_iter()
            .filter_map(|nic| {
                let mac = nic.mac()?;
                Some(BmcInterface {
                    name: nic.name.unwrap_or_default(),
                    mac_address: mac,
                    status: nic
                        .status
                        .and_then(|s| s.state)
                        .unwrap_or_else(|| "OK".into()),
                })
            })
            .collect()
    }
}

impl BmcClient for IloClient {
    async fn network_info(&self) -> Result<BmcNetworkInfo, Error> {
        let system: ComputerSystem = self.redfish.get(SYSTEM_PATH).await?;
        let mut info = BmcNetworkInfo {
            hostname: system.host_name.unwrap_or_default(),
            interfaces: Vec::new(),
        };

        if let Some(link) = system.ethernet_interfaces.filter(|l| !l.odata_id.is_empty()) {
            match self.redfish.ethernet_interfaces(&link.odata_id).await {
                Ok(raw) => info.interfaces = Self::to_interfaces(raw),
                Err(e) => warn!(error = %e, path = %link.odata_id, "reading EthernetInterfaces failed"),
            }
        }

        if info.interfaces.is_empty() {
            for path in FALLBACK_PATHS {
                match self.redfish.ethernet_interfaces(path).await {
                    Ok(raw) => {
                        info.interfaces = Self::to_interfaces(raw);
                        if !info.interfaces.is_empty() {
                            debug!(path, "found NICs on fallback path");
                            break;
                        }
                    }
                    Err(e) => debug!(error = %e, path, "fallback path failed"),
                }
            }
        }

        Ok(info)
    }
}
