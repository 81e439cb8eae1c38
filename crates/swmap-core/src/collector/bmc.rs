// BMC collection: NIC MACs → server hostname.

use swmap_api::{BmcClient, BmcNetworkInfo, RedfishClient, create_bmc_client};
use tracing::{debug, info, warn};

use crate::config::BmcTarget;
use crate::error::CoreError;
use crate::model::{BmcMacMap, MacAddress};

/// Query every BMC in order and build the MAC map. A BMC that fails (or
/// carries an unsupported type tag) is logged and skipped.
pub async fn collect_bmc_macs(http: &reqwest::Client, targets: &[BmcTarget]) -> BmcMacMap {
    let mut map = BmcMacMap::new();

    for target in targets {
        match query_bmc(http, target).await {
            Ok(info) => {
                let added = absorb_network_info(&mut map, &target.host, info);
                info!(bmc = %target.host, macs = added, "collected BMC data");
            }
            Err(e) => warn!(bmc = %target.host, error = %e, "skipping BMC"),
        }
    }

    map
}

async fn query_bmc(http: &reqwest::Client, target: &BmcTarget) -> Result<BmcNetworkInfo, CoreError> {
    let redfish = RedfishClient::new(
        http.clone(),
        &target.host,
        target.username.clone(),
        target.password.clone(),
    )?;
    let bmc = create_bmc_client(&target.kind, redfish)?;
    Ok(bmc.network_info().await?)
}

/// Insert every non-empty MAC of `info` into `map`. A BMC that reports no
/// hostname is named after its address. Returns the number of MACs added.
pub fn absorb_network_info(map: &mut BmcMacMap, bmc_host: &str, info: BmcNetworkInfo) -> usize {
    let hostname = if info.hostname.trim().is_empty() {
        warn!(bmc = bmc_host, "BMC reported no hostname, using its address");
        bmc_host.to_owned()
    } else {
        info.hostname.trim().to_owned()
    };

    let mut added = 0;
    for iface in info.interfaces {
        let mac = MacAddress::new(&iface.mac_address);
        if mac.is_empty() {
            continue;
        }
        if let Some(previous) = map.insert(mac.clone(), hostname.clone()) {
            debug!(%mac, %previous, current = %hostname, "MAC reported by more than one BMC");
        }
        added += 1;
    }
    added
}
