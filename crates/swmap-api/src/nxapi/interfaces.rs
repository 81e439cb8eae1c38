// NX-API interface status endpoint

use crate::error::Error;
use crate::nxapi::client::NxApiClient;
use crate::nxapi::models::{InterfaceStatus, InterfaceStatusTable};

impl NxApiClient {
    /// `show interface status`
    pub async fn interface_status(&self) -> Result<Vec<InterfaceStatus>, Error> {
        self.show_table::<InterfaceStatusTable>("show interface status")
            .await
    }
}
