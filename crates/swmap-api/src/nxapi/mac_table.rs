// NX-API MAC address table endpoints

use tracing::debug;

use crate::error::Error;
use crate::nxapi::client::{NxApiClient, parse_table};
use crate::nxapi::models::{MacAddressEntry, MacAddressTable, NxTable};

impl NxApiClient {
    /// The whole table: `show mac address-table`.
    pub async fn mac_address_table(&self) -> Result<Vec<MacAddressEntry>, Error> {
        let rows = self
            .show_table::<MacAddressTable>("show mac address-table")
            .await?;
        debug!(count = rows.len(), "mac address table");
        Ok(rows)
    }

    /// One request carrying `show mac address-table interface <if>` for each
    /// interface. Callers keep the list short; NX-API caps request size.
    pub async fn mac_address_table_for(
        &self,
        interfaces: &[String],
    ) -> Result<Vec<MacAddressEntry>, Error> {
        let commands: Vec<String> = interfaces
            .iter()
            .map(|intf| format!("show mac address-table interface {intf}"))
            .collect();

        let mut rows = Vec::new();
        for body in self.show(&commands).await? {
            rows.extend(parse_table::<MacAddressTable>(body)?.into_rows());
        }
        debug!(interfaces = interfaces.len(), count = rows.len(), "mac address batch");
        Ok(rows)
    }
}
