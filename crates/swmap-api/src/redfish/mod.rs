// Redfish BMC clients
//
// One capability -- "report this server's hostname and NIC MACs" -- with a
// client per BMC vendor, chosen at runtime from the config's type tag.

pub mod client;
pub mod idrac;
pub mod ilo;
pub mod models;

use std::future::Future;

use serde::Serialize;
use strum::{Display, EnumString};

use crate::error::Error;

pub use client::RedfishClient;
pub use idrac::IdracClient;
pub use ilo::IloClient;

/// BMC vendor tag as written in the config file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, EnumString)]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum BmcType {
    /// HPE iLO
    Ilo,
    /// Dell iDRAC
    Idrac,
}

/// Normalized network view of one server, as reported by its BMC.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct BmcNetworkInfo {
    pub hostname: String,
    pub interfaces: Vec<BmcInterface>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BmcInterface {
    pub name: String,
    /// Upper-cased, may be empty when the BMC reports none.
    pub mac_address: String,
    pub status: String,
}

/// Anything that can produce a [`BmcNetworkInfo`] for one management controller.
pub trait BmcClient {
    fn network_info(&self) -> impl Future<Output = Result<BmcNetworkInfo, Error>> + Send;
}

/// A BMC client for any supported vendor.
pub enum Bmc {
    Ilo(IloClient),
    Idrac(IdracClient),
}

impl Bmc {
    pub fn bmc_type(&self) -> BmcType {
        match self {
            Self::Ilo(_) => BmcType::Ilo,
            Self::Idrac(_) => BmcType::Idrac,
        }
    }
}

impl BmcClient for Bmc {
    async fn network_info(&self) -> Result<BmcNetworkInfo, Error> {
        match self {
            Self::Ilo(c) => c.network_info().await,
            Self::Idrac(c) => c.network_info().await,
        }
    }
}

/// Build the client matching `bmc_type` (`ilo` / `idrac`, any case).
pub fn create_bmc_client(bmc_type: &str, redfish: RedfishClient) -> Result<Bmc, Error> {
    let kind: BmcType = bmc_type
        .parse()
        .map_err(|_| Error::UnsupportedBmcType(bmc_type.to_owned()))?;
    Ok(Bmc::from_redfish(kind, redfish))
}

impl Bmc {
    /// Wrap an already-built Redfish client.
    pub fn from_redfish(kind: BmcType, redfish: RedfishClient) -> Self {
        match kind {
            BmcType::Ilo => Self::Ilo(IloClient::new(redfish)),
            BmcType::Idrac => Self::Idrac(IdracClient::new(redfish)),
        }
    }
}
