// swmap-api: Async clients for NX-API switches and Redfish BMCs

pub mod error;
pub mod nxapi;
pub mod redfish;
pub mod transport;

pub use error::Error;
pub use nxapi::{NxApiClient, NxApiFormat};
pub use redfish::{
    Bmc, BmcClient, BmcInterface, BmcNetworkInfo, BmcType, IdracClient, IloClient, RedfishClient,
    create_bmc_client,
};
pub use transport::{TlsMode, TransportConfig};
