// NX-API wire types
//
// Request/response envelopes for both NX-API surfaces (JSON-RPC and the
// older `ins_api` cli_show format), plus the `TABLE_x.ROW_x` shapes of the
// show commands we issue. Row fields use `#[serde(default)]` throughout
// because NX-OS omits keys freely across releases.

use serde::{Deserialize, Serialize};
use serde_json::Value;

// ── Shared helpers ───────────────────────────────────────────────────

/// NX-OS emits a bare object when a table has a single row and an array
/// otherwise. `Many` is tried first so an array never lands in `One`.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum OneOrMany<T> {
    Many(Vec<T>),
    One(T),
}

impl<T> Default for OneOrMany<T> {
    fn default() -> Self {
        Self::Many(Vec::new())
    }
}

impl<T> OneOrMany<T> {
    pub fn into_vec(self) -> Vec<T> {
        match self {
            Self::Many(v) => v,
            Self::One(t) => vec![t],
        }
    }
}

/// A show-command body that flattens into a list of rows.
pub trait NxTable: Default + for<'de> Deserialize<'de> {
    type Row;

    fn into_rows(self) -> Vec<Self::Row>;
}

// ── JSON-RPC envelope ────────────────────────────────────────────────

/// One element of a JSON-RPC batch request.
///
/// ```json
/// {"jsonrpc":"2.0","method":"cli","params":{"cmd":"show version","version":1},"id":1}
/// ```
#[derive(Debug, Serialize)]
pub struct JsonRpcRequest<'a> {
    pub jsonrpc: &'static str,
    pub method: &'static str,
    pub params: JsonRpcParams<'a>,
    pub id: usize,
}

#[derive(Debug, Serialize)]
pub struct JsonRpcParams<'a> {
    pub cmd: &'a str,
    pub version: u8,
}

impl<'a> JsonRpcRequest<'a> {
    pub fn cli(cmd: &'a str, id: usize) -> Self {
        Self {
            jsonrpc: "2.0",
            method: "cli",
            params: JsonRpcParams { cmd, version: 1 },
            id,
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct JsonRpcResponse {
    #[serde(default)]
    pub result: Option<JsonRpcResult>,
    #[serde(default)]
    pub error: Option<JsonRpcError>,
    #[serde(default)]
    pub id: Option<Value>,
}

/// `result` is `null` when a show command produced no output.
#[derive(Debug, Deserialize)]
pub struct JsonRpcResult {
    #[serde(default)]
    pub body: Value,
}

#[derive(Debug, Deserialize)]
pub struct JsonRpcError {
    #[serde(default)]
    pub code: Option<i64>,
    #[serde(default)]
    pub message: String,
    #[serde(default)]
    pub data: Option<Value>,
}

impl JsonRpcError {
    /// NX-OS puts the useful CLI message under `data.msg`.
    pub fn detail(&self) -> String {
        self.data
            .as_ref()
            .and_then(|d| d.get("msg"))
            .and_then(Value::as_str)
            .map_or_else(|| self.message.clone(), |msg| format!("{}: {}", self.message, msg.trim()))
    }
}

// ── ins_api envelope ─────────────────────────────────────────────────

#[derive(Debug, Serialize)]
pub struct InsApiRequest<'a> {
    pub ins_api: InsApiInput<'a>,
}

#[derive(Debug, Serialize)]
pub struct InsApiInput<'a> {
    pub version: &'static str,
    #[serde(rename = "type")]
    pub kind: &'static str,
    pub chunk: &'static str,
    pub sid: &'static str,
    pub input: &'a str,
    pub output_format: &'static str,
}

impl<'a> InsApiRequest<'a> {
    pub fn cli_show(input: &'a str) -> Self {
        Self {
            ins_api: InsApiInput {
                version: "1.0",
                kind: "cli_show",
                chunk: "0",
                sid: "1",
                input,
                output_format: "json",
            },
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct InsApiResponse {
    pub ins_api: InsApiBody,
}

#[derive(Debug, Deserialize)]
pub struct InsApiBody {
    pub outputs: InsApiOutputs,
}

#[derive(Debug, Deserialize)]
pub struct InsApiOutputs {
    #[serde(default)]
    pub output: OneOrMany<InsApiOutput>,
}

/// Per-command result. `code` is `"200"` on success.
#[derive(Debug, Deserialize)]
pub struct InsApiOutput {
    #[serde(default)]
    pub input: Option<String>,
    pub code: String,
    #[serde(default)]
    pub msg: Option<String>,
    #[serde(default)]
    pub body: Value,
    #[serde(default)]
    pub clierror: Option<String>,
}

// ── show cdp neighbors detail ────────────────────────────────────────

#[derive(Debug, Default, Deserialize)]
pub struct CdpNeighborDetail {
    #[serde(rename = "TABLE_cdp_neighbor_detail_info", default)]
    pub table: Option<CdpNeighborRows>,
}

#[derive(Debug, Default, Deserialize)]
pub struct CdpNeighborRows {
    #[serde(rename = "ROW_cdp_neighbor_detail_info", default)]
    pub rows: OneOrMany<CdpNeighbor>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct CdpNeighbor {
    /// Local port, long form (`Ethernet1/1`).
    #[serde(default)]
    pub intf_id: String,
    #[serde(default)]
    pub device_id: String,
    #[serde(default)]
    pub platform_id: String,
    /// Remote port.
    #[serde(default)]
    pub port_id: String,
    #[serde(default)]
    pub v4mgmtaddr: Option<String>,
}

impl NxTable for CdpNeighborDetail {
    type Row = CdpNeighbor;

    fn into_rows(self) -> Vec<CdpNeighbor> {
        self.table.map(|t| t.rows.into_vec()).unwrap_or_default()
    }
}

// ── show lldp neighbors detail ───────────────────────────────────────

#[derive(Debug, Default, Deserialize)]
pub struct LldpNeighborDetail {
    #[serde(rename = "TABLE_nbor_detail", default)]
    pub table: Option<LldpNeighborRows>,
}

#[derive(Debug, Default, Deserialize)]
pub struct LldpNeighborRows {
    #[serde(rename = "ROW_nbor_detail", default)]
    pub rows: OneOrMany<LldpNeighbor>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct LldpNeighbor {
    /// Local port, short form (`Eth1/1`).
    #[serde(default)]
    pub l_port_id: String,
    #[serde(default)]
    pub sys_name: String,
    #[serde(default)]
    pub sys_desc: String,
    #[serde(default)]
    pub chassis_id: Option<String>,
    #[serde(default)]
    pub port_id: String,
}

impl NxTable for LldpNeighborDetail {
    type Row = LldpNeighbor;

    fn into_rows(self) -> Vec<LldpNeighbor> {
        self.table.map(|t| t.rows.into_vec()).unwrap_or_default()
    }
}

// ── show mac address-table ───────────────────────────────────────────

#[derive(Debug, Default, Deserialize)]
pub struct MacAddressTable {
    #[serde(rename = "TABLE_mac_address", default)]
    pub table: Option<MacAddressRows>,
}

#[derive(Debug, Default, Deserialize)]
pub struct MacAddressRows {
    #[serde(rename = "ROW_mac_address", default)]
    pub rows: OneOrMany<MacAddressEntry>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct MacAddressEntry {
    /// Cisco dotted form (`0050.56a1.b2c3`).
    #[serde(default)]
    pub disp_mac_addr: String,
    #[serde(default)]
    pub disp_port: String,
    #[serde(default)]
    pub disp_vlan: Option<String>,
    #[serde(default)]
    pub disp_type: Option<String>,
}

impl NxTable for MacAddressTable {
    type Row = MacAddressEntry;

    fn into_rows(self) -> Vec<MacAddressEntry> {
        self.table.map(|t| t.rows.into_vec()).unwrap_or_default()
    }
}

// ── show interface status ────────────────────────────────────────────

#[derive(Debug, Default, Deserialize)]
pub struct InterfaceStatusTable {
    #[serde(rename = "TABLE_interface", default)]
    pub table: Option<InterfaceStatusRows>,
}

#[derive(Debug, Default, Deserialize)]
pub struct InterfaceStatusRows {
    #[serde(rename = "ROW_interface", default)]
    pub rows: OneOrMany<InterfaceStatus>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct InterfaceStatus {
    #[serde(default)]
    pub interface: String,
    /// `connected`, `notconnec`, `disabled`, `sfpAbsent`, ...
    #[serde(default)]
    pub state: String,
    /// Port description.
    #[serde(default)]
    pub name: Option<String>,
}

impl NxTable for InterfaceStatusTable {
    type Row = InterfaceStatus;

    fn into_rows(self) -> Vec<InterfaceStatus> {
        self.table.map(|t| t.rows.into_vec()).unwrap_or_default()
    }
}
