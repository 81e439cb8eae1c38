// NX-API neighbor discovery endpoints
//
// CDP and LLDP detail tables. Classification of the neighbor happens in
// core; this layer only returns rows.

use tracing::debug;

use crate::error::Error;
use crate::nxapi::client::NxApiClient;
use crate::nxapi::models::{CdpNeighbor, CdpNeighborDetail, LldpNeighbor, LldpNeighborDetail};

impl NxApiClient {
    /// `show cdp neighbors detail`
    pub async fn cdp_neighbors(&self) -> Result<Vec<CdpNeighbor>, Error> {
        let rows = self
            .show_table::<CdpNeighborDetail>("show cdp neighbors detail")
            .await?;
        debug!(count = rows.len(), "cdp neighbors");
        Ok(rows)
    }

    /// `show lldp neighbors detail`
    pub async fn lldp_neighbors(&self) -> Result<Vec<LldpNeighbor>, Error> {
        let rows = self
            .show_table::<LldpNeighborDetail>("show lldp neighbors detail")
            .await?;
        debug!(count = rows.len(), "lldp neighbors");
        Ok(rows)
    }
}
