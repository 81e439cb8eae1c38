#![allow(clippy::unwrap_used)]
// Integration tests for the Redfish BMC clients using wiremock.

use secrecy::SecretString;
use serde_json::json;
use url::Url;
use wiremock::matchers::{basic_auth, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use swmap_api::{Bmc, BmcClient, BmcType, Error, RedfishClient};

// ── Helpers ─────────────────────────────────────────────────────────

async fn setup(kind: BmcType) -> (MockServer, Bmc) {
    let server = MockServer::start().await;
    let base_url = Url::parse(&server.uri()).unwrap();
    let redfish = RedfishClient::with_client(
        reqwest::Client::new(),
        &base_url,
        "admin".into(),
        SecretString::from("bmc-pw".to_owned()),
    )
    .unwrap();
    (server, Bmc::from_redfish(kind, redfish))
}

async fn mount_json(server: &MockServer, at: &str, body: serde_json::Value) {
    Mock::given(method("GET"))
        .and(path(at))
        .and(basic_auth("admin", "bmc-pw"))
        .respond_with(ResponseTemplate::new(200).set_body_json(body))
        .mount(server)
        .await;
}

// ── iLO ─────────────────────────────────────────────────────────────

#[tokio::test]
async fn test_ilo_follows_system_ethernet_link() {
    let (server, bmc) = setup(BmcType::Ilo).await;

    mount_json(
        &server,
        "/redfish/v1/Systems/1",
        json!({
            "HostName": "esx-host-07",
            "EthernetInterfaces": { "@odata.id": "/redfish/v1/Systems/1/EthernetInterfaces" }
        }),
    )
    .await;
    mount_json(
        &server,
        "/redfish/v1/Systems/1/EthernetInterfaces",
        json!({
            "Members": [
                { "@odata.id": "/redfish/v1/Systems/1/EthernetInterfaces/1" },
                { "@odata.id": "/redfish/v1/Systems/1/EthernetInterfaces/2" }
            ]
        }),
    )
    .await;
    mount_json(
        &server,
        "/redfish/v1/Systems/1/EthernetInterfaces/1",
        json!({
            "Name": "Embedded LOM 1 Port 1",
            "MACAddress": "11:22:33:44:55:66",
            "Status": { "State": "Enabled" }
        }),
    )
    .await;
    // No MAC reported -- iLO drops these.
    mount_json(
        &server,
        "/redfish/v1/Systems/1/EthernetInterfaces/2",
        json!({ "Name": "Embedded LOM 1 Port 2" }),
    )
    .await;

    let info = bmc.network_info().await.unwrap();

    assert_eq!(info.hostname, "esx-host-07");
    assert_eq!(info.interfaces.len(), 1);
    assert_eq!(info.interfaces[0].name, "Embedded LOM 1 Port 1");
    assert_eq!(info.interfaces[0].mac_address, "11:22:33:44:55:66");
    assert_eq!(info.interfaces[0].status, "Enabled");
}

#[tokio::test]
async fn test_ilo_falls_back_to_known_paths() {
    let (server, bmc) = setup(BmcType::Ilo).await;

    // No EthernetInterfaces link on the system resource.
    mount_json(&server, "/redfish/v1/Systems/1", json!({ "HostName": "db-02" })).await;
    // BaseNetworkAdapters is not mounted -> 404, then EthernetInterfaces works.
    mount_json(
        &server,
        "/redfish/v1/Systems/1/EthernetInterfaces",
        json!({ "Members": [{ "@odata.id": "/redfish/v1/Systems/1/EthernetInterfaces/1" }] }),
    )
    .await;
    mount_json(
        &server,
        "/redfish/v1/Systems/1/EthernetInterfaces/1",
        json!({ "Name": "NIC 1", "MACAddress": "aa:bb:cc:dd:ee:01" }),
    )
    .await;

    let info = bmc.network_info().await.unwrap();

    assert_eq!(info.hostname, "db-02");
    assert_eq!(info.interfaces.len(), 1);
    assert_eq!(info.interfaces[0].mac_address, "AA:BB:CC:DD:EE:01");
    assert_eq!(info.interfaces[0].status, "OK");
}

#[tokio::test]
async fn test_ilo_system_failure_is_an_error() {
    let (server, bmc) = setup(BmcType::Ilo).await;

    Mock::given(method("GET"))
        .and(path("/redfish/v1/Systems/1"))
        .respond_with(ResponseTemplate::new(401))
        .mount(&server)
        .await;

    let result = bmc.network_info().await;

    assert!(
        matches!(result, Err(Error::Authentication { .. })),
        "expected Authentication error, got: {result:?}"
    );
}

// ── iDRAC ───────────────────────────────────────────────────────────

#[tokio::test]
async fn test_idrac_reads_embedded_system_nics() {
    let (server, bmc) = setup(BmcType::Idrac).await;

    mount_json(
        &server,
        "/redfish/v1/Systems/System.Embedded.1",
        json!({ "HostName": "r740-01" }),
    )
    .await;
    mount_json(
        &server,
        "/redfish/v1/Systems/System.Embedded.1/EthernetInterfaces",
        json!({
            "Members": [
                { "@odata.id": "/redfish/v1/Systems/System.Embedded.1/EthernetInterfaces/NIC.Integrated.1-1-1" },
                { "@odata.id": "/redfish/v1/Systems/System.Embedded.1/EthernetInterfaces/NIC.Integrated.1-2-1" }
            ]
        }),
    )
    .await;
    mount_json(
        &server,
        "/redfish/v1/Systems/System.Embedded.1/EthernetInterfaces/NIC.Integrated.1-1-1",
        json!({
            "Name": "System Ethernet Interface",
            "MacAddress": "f4:02:70:aa:bb:01",
            "Status": { "State": "Enabled" }
        }),
    )
    .await;
    mount_json(
        &server,
        "/redfish/v1/Systems/System.Embedded.1/EthernetInterfaces/NIC.Integrated.1-2-1",
        json!({ "Name": "System Ethernet Interface" }),
    )
    .await;

    let info = bmc.network_info().await.unwrap();

    assert_eq!(info.hostname, "r740-01");
    assert_eq!(info.interfaces.len(), 2);
    assert_eq!(info.interfaces[0].mac_address, "F4:02:70:AA:BB:01");
    assert_eq!(info.interfaces[0].status, "Enabled");
    // iDRAC keeps MAC-less NICs; consumers skip empty MACs.
    assert_eq!(info.interfaces[1].mac_address, "");
    assert_eq!(info.interfaces[1].status, "Unknown");
}

#[tokio::test]
async fn test_idrac_missing_collection_is_an_error() {
    let (server, bmc) = setup(BmcType::Idrac).await;

    mount_json(
        &server,
        "/redfish/v1/Systems/System.Embedded.1",
        json!({ "HostName": "r740-02" }),
    )
    .await;

    let result = bmc.network_info().await;

    assert!(
        matches!(&result, Err(e) if e.is_not_found()),
        "expected 404, got: {result:?}"
    );
}
