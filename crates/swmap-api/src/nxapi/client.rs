// NX-API HTTP client
//
// Wraps `reqwest::Client` with the `/ins` endpoint, basic auth, and the two
// envelope formats NX-OS speaks. Show-command wrappers live in sibling
// files as inherent methods so this module stays about transport.

use secrecy::{ExposeSecret, SecretString};
use serde_json::Value;
use strum::{Display, EnumString};
use tracing::debug;
use url::Url;

use crate::error::Error;
use crate::nxapi::models::{
    InsApiRequest, InsApiResponse, JsonRpcRequest, JsonRpcResponse, NxTable, OneOrMany,
};

/// Which request/response envelope the switch expects.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Display, EnumString)]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
pub enum NxApiFormat {
    /// JSON-RPC 2.0 batches (`application/json-rpc`).
    #[default]
    JsonRpc,
    /// The original `ins_api` cli_show envelope (`application/json`).
    InsApi,
}

/// Raw HTTP client for one switch's NX-API endpoint.
///
/// Every call returns the per-command `body` values with the envelope
/// already stripped and errors surfaced as [`Error::NxApi`].
pub struct NxApiClient {
    http: reqwest::Client,
    url: Url,
    username: String,
    password: SecretString,
    format: NxApiFormat,
}

impl NxApiClient {
    /// Create a client for `host:port`, sharing the given HTTP client.
    ///
    /// Port 443 selects `https`; anything else speaks plain `http`, which is
    /// how NX-API is enabled out of the box.
    pub fn new(
        http: reqwest::Client,
        host: &str,
        port: u16,
        username: String,
        password: SecretString,
        format: NxApiFormat,
    ) -> Result<Self, Error> {
        let scheme = if port == 443 { "https" } else { "http" };
        let base_url = Url::parse(&format!("{scheme}://{host}:{port}"))?;
        Self::with_client(http, &base_url, username, password, format)
    }

    /// Create a client against an arbitrary base URL (tests point this at
    /// a mock server).
    pub fn with_client(
        http: reqwest::Client,
        base_url: &Url,
        username: String,
        password: SecretString,
        format: NxApiFormat,
    ) -> Result<Self, Error> {
        let url = base_url.join("/ins")?;
        Ok(Self {
            http,
            url,
            username,
            password,
            format,
        })
    }

    /// The `/ins` endpoint URL.
    pub fn url(&self) -> &Url {
        &self.url
    }

    pub fn format(&self) -> NxApiFormat {
        self.format
    }

    // ── Request helpers ──────────────────────────────────────────────

    /// Run one or more show commands in a single request and return each
    /// command's `body`, in request order.
    ///
    /// An error on any command fails the whole call.
    pub async fn show(&self, commands: &[String]) -> Result<Vec<Value>, Error> {
        if commands.is_empty() {
            return Ok(Vec::new());
        }
        debug!(url = %self.url, format = %self.format, ?commands, "POST");

        match self.format {
            NxApiFormat::JsonRpc => self.show_jsonrpc(commands).await,
            NxApiFormat::InsApi => self.show_ins_api(commands).await,
        }
    }

    /// Run a single show command and parse its body as an NX-OS table.
    pub(crate) async fn show_table<T: NxTable>(&self, command: &str) -> Result<Vec<T::Row>, Error> {
        let bodies = self.show(&[command.to_owned()]).await?;
        let mut rows = Vec::new();
        for body in bodies {
            rows.extend(parse_table::<T>(body)?.into_rows());
        }
        Ok(rows)
    }

    async fn show_jsonrpc(&self, commands: &[String]) -> Result<Vec<Value>, Error> {
        let batch: Vec<JsonRpcRequest<'_>> = commands
            .iter()
            .enumerate()
            .map(|(i, cmd)| JsonRpcRequest::cli(cmd, i + 1))
            .collect();

        let resp = self
            .http
            .post(self.url.clone())
            .basic_auth(&self.username, Some(self.password.expose_secret()))
            .header(reqwest::header::CONTENT_TYPE, "application/json-rpc")
            .json(&batch)
            .send()
            .await?;

        let body = read_body(resp).await?;
        let responses: OneOrMany<JsonRpcResponse> = parse_json(&body)?;

        responses
            .into_vec()
            .into_iter()
            .map(|r| match r.error {
                Some(err) => Err(Error::NxApi {
                    code: err.code.map(|c| c.to_string()),
                    message: err.detail(),
                }),
                None => Ok(r.result.map(|res| res.body).unwrap_or(Value::Null)),
            })
            .collect()
    }

    async fn show_ins_api(&self, commands: &[String]) -> Result<Vec<Value>, Error> {
        let input = commands.join(" ; ");
        let request = InsApiRequest::cli_show(&input);

        let resp = self
            .http
            .post(self.url.clone())
            .basic_auth(&self.username, Some(self.password.expose_secret()))
            .json(&request)
            .send()
            .await?;

        let body = read_body(resp).await?;
        let envelope: InsApiResponse = parse_json(&body)?;

        envelope
            .ins_api
            .outputs
            .output
            .into_vec()
            .into_iter()
            .map(|out| {
                if out.code == "200" {
                    Ok(out.body)
                } else {
                    Err(Error::NxApi {
                        message: out
                            .clierror
                            .or(out.msg)
                            .map(|m| m.trim().to_owned())
                            .unwrap_or_else(|| format!("command {:?} failed", out.input)),
                        code: Some(out.code),
                    })
                }
            })
            .collect()
    }
}

// ── Response helpers ─────────────────────────────────────────────────

/// Check the HTTP status and pull the body as text.
async fn read_body(resp: reqwest::Response) -> Result<String, Error> {
    let status = resp.status();

    if status == reqwest::StatusCode::UNAUTHORIZED {
        return Err(Error::Authentication {
            message: "switch rejected the configured credentials".into(),
        });
    }

    let body = resp.text().await?;

    if !status.is_success() {
        return Err(Error::Http {
            status: status.as_u16(),
            body,
        });
    }

    Ok(body)
}

fn parse_json<T: serde::de::DeserializeOwned>(body: &str) -> Result<T, Error> {
    serde_json::from_str(body).map_err(|e| Error::Deserialization {
        message: e.to_string(),
        body: body.to_owned(),
    })
}

/// An empty command produces `null` or `""` instead of an object.
pub(crate) fn parse_table<T: NxTable>(body: Value) -> Result<T, Error> {
    match body {
        Value::Null => Ok(T::default()),
        Value::String(s) if s.trim().is_empty() => Ok(T::default()),
        other => serde_json::from_value(other.clone()).map_err(|e| Error::Deserialization {
            message: e.to_string(),
            body: other.to_string(),
        }),
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::nxapi::models::InterfaceStatusTable;

    fn client_for(host: &str, port: u16) -> NxApiClient {
        NxApiClient::new(
            reqwest::Client::new(),
            host,
            port,
            "admin".into(),
            SecretString::from("pw".to_owned()),
            NxApiFormat::JsonRpc,
        )
        .unwrap()
    }

    #[test]
    fn https_only_on_port_443() {
        assert_eq!(client_for("10.0.0.1", 80).url().as_str(), "http://10.0.0.1/ins");
        assert_eq!(client_for("10.0.0.1", 443).url().as_str(), "https://10.0.0.1/ins");
        assert_eq!(client_for("sw1.lab", 8080).url().as_str(), "http://sw1.lab:8080/ins");
    }

    #[test]
    fn format_parses_case_insensitively() {
        assert_eq!("json_rpc".parse::<NxApiFormat>().unwrap(), NxApiFormat::JsonRpc);
        assert_eq!("INS_API".parse::<NxApiFormat>().unwrap(), NxApiFormat::InsApi);
    }

    #[test]
    fn empty_bodies_parse_as_empty_tables() {
        let t: InterfaceStatusTable = parse_table(Value::Null).unwrap();
        assert!(t.into_rows().is_empty());
        let t: InterfaceStatusTable = parse_table(Value::String(String::new())).unwrap();
        assert!(t.into_rows().is_empty());
    }

    #[test]
    fn wrong_shape_is_a_deserialization_error() {
        let result = parse_table::<InterfaceStatusTable>(serde_json::json!([1, 2, 3]));
        assert!(matches!(result, Err(Error::Deserialization { .. })));
    }
}
