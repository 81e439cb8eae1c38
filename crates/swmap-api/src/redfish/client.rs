// Redfish HTTP client
//
// Basic-auth GETs against `/redfish/v1/`. Paths may be relative to the
// service root (`Systems/1`) or absolute `@odata.id` links
// (`/redfish/v1/Systems/1/EthernetInterfaces`); both resolve correctly
// through `Url::join`.

use secrecy::{ExposeSecret, SecretString};
use serde::de::DeserializeOwned;
use tracing::debug;
use url::Url;

use crate::error::Error;
use crate::redfish::models::{Collection, EthernetInterface};

pub struct RedfishClient {
    http: reqwest::Client,
    service_root: Url,
    username: String,
    password: SecretString,
}

impl RedfishClient {
    /// Client for the BMC at `host`, sharing the given HTTP client.
    ///
    /// A bare host or `host:port` is reached over HTTPS; a full URL
    /// (`http://lab-bmc:8000`) is used as given.
    pub fn new(
        http: reqwest::Client,
        host: &str,
        username: String,
        password: SecretString,
    ) -> Result<Self, Error> {
        let base_url = if host.contains("://") {
            Url::parse(host)?
        } else {
            Url::parse(&format!("https://{host}"))?
        };
        Self::with_client(http, &base_url, username, password)
    }

    /// Client against an arbitrary base URL (tests point this at a mock
    /// server).
    pub fn with_client(
        http: reqwest::Client,
        base_url: &Url,
        username: String,
        password: SecretString,
    ) -> Result<Self, Error> {
        let service_root = base_url.join("/redfish/v1/")?;
        Ok(Self {
            http,
            service_root,
            username,
            password,
        })
    }

    pub fn service_root(&self) -> &Url {
        &self.service_root
    }

    /// GET a resource and deserialize it.
    pub async fn get<T: DeserializeOwned>(&self, path: &str) -> Result<T, Error> {
        let url = self.service_root.join(path)?;
        debug!("GET {}", url);

        let resp = self
            .http
            .get(url)
            .basic_auth(&self.username, Some(self.password.expose_secret()))
            .send()
            .await?;

        let status = resp.status();
        if status == reqwest::StatusCode::UNAUTHORIZED {
            return Err(Error::Authentication {
                message: "BMC rejected the configured credentials".into(),
            });
        }

        let body = resp.text().await?;
        if !status.is_success() {
            return Err(Error::Http {
                status: status.as_u16(),
                body,
            });
        }

        serde_json::from_str(&body).map_err(|e| Error::Deserialization {
            message: e.to_string(),
            body,
        })
    }

    /// Read an EthernetInterfaces-style collection and every member in it.
    pub async fn ethernet_interfaces(
        &self,
        collection_path: &str,
    ) -> Result<Vec<EthernetInterface>, Error> {
        let collection: Collection = self.get(collection_path).await?;
        let mut interfaces = Vec::with_capacity(collection.members.len());
        for member in collection.members {
            if member.odata_id.is_empty() {
                continue;
            }
            interfaces.push(self.get(&member.odata_id).await?);
        }
        Ok(interfaces)
    }
}
