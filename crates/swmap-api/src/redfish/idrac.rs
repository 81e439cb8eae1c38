// Dell iDRAC network discovery

use crate::error::Error;
use crate::redfish::client::RedfishClient;
use crate::redfish::models::ComputerSystem;
use crate::redfish::{BmcClient, BmcInterface, BmcNetworkInfo};

const SYSTEM_PATH: &str = "Systems/System.Embedded.1";
const ETHERNET_PATH: &str = "Systems/System.Embedded.1/EthernetInterfaces";

pub struct IdracClient {
    redfish: RedfishClient,
}

impl IdracClient {
    pub fn new(redfish: RedfishClient) -> Self {
        Self { redfish }
    }
}

impl BmcClient for IdracClient {
    async fn network_info(&self) -> Result<BmcNetworkInfo, Error> {
        let system: ComputerSystem = self.redfish.get(SYSTEM_PATH).await?;
        let interfaces = self
            .redfish
            .ethernet_interfaces(ETHERNET_PATH)
            .await?
            .into_iter()
            .map(|nic| BmcInterface {
                mac_address: nic.mac().unwrap_or_default(),
                name: nic.name.unwrap_or_default(),
                status: nic
                    .status
                    .and_then(|s| s.state)
                    .unwrap_or_else(|| "Unknown".into()),
            })
            .collect();

        Ok(BmcNetworkInfo {
            hostname: system.host_name.unwrap_or_default(),
            interfaces,
        })
    }
}
