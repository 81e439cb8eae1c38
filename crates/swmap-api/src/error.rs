use thiserror::Error;

/// Top-level error type for the `swmap-api` crate.
///
/// Covers every failure mode across both API surfaces: transport,
/// NX-API command envelopes, and Redfish BMC endpoints.
/// `swmap-core` maps these into domain diagnostics.
#[derive(Debug, Error)]
pub enum Error {
    // ── Authentication ──────────────────────────────────────────────
    /// Credentials rejected by the switch or BMC (HTTP 401).
    #[error("Authentication failed: {message}")]
    Authentication { message: String },

    // ── Transport ───────────────────────────────────────────────────
    /// HTTP transport error (connection refused, DNS failure, etc.)
    #[error("HTTP transport error: {0}")]
    Transport(#[from] reqwest::Error),

    /// URL parsing error.
    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    /// TLS handshake or certificate error.
    #[error("TLS error: {0}")]
    Tls(String),

    /// Non-success HTTP status that isn't an auth failure.
    #[error("HTTP {status}: {body}")]
    Http { status: u16, body: String },

    // ── NX-API ──────────────────────────────────────────────────────
    /// Error reported inside an NX-API envelope (JSON-RPC `error` object
    /// or an `ins_api` output whose code isn't 200).
    #[error("NX-API error{}: {message}", code.as_ref().map(|c| format!(" ({c})")).unwrap_or_default())]
    NxApi {
        code: Option<String>,
        message: String,
    },

    // ── Redfish ─────────────────────────────────────────────────────
    /// BMC type tag not recognised by the client factory.
    #[error("Unsupported BMC type: {0}")]
    UnsupportedBmcType(String),

    // ── Data ────────────────────────────────────────────────────────
    /// JSON deserialization failed, with the raw body for debugging.
    #[error("Deserialization error: {message}")]
    Deserialization { message: String, body: String },
}

impl Error {
    /// Returns `true` when the endpoint itself could not be reached or
    /// refused our credentials. Further calls to the same host are
    /// pointless after one of these.
    pub fn is_unreachable(&self) -> bool {
        match self {
            Self::Transport(e) => e.is_connect() || e.is_timeout(),
            Self::Authentication { .. } | Self::Tls(_) => true,
            _ => false,
        }
    }

    /// Returns `true` if this is a "not found" error.
    pub fn is_not_found(&self) -> bool {
        match self {
            Self::Transport(e) => e.status() == Some(reqwest::StatusCode::NOT_FOUND),
            Self::Http { status: 404, .. } => true,
            _ => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn nxapi_error_display_includes_code_when_present() {
        let err = Error::NxApi {
            code: Some("400".into()),
            message: "Syntax error while parsing".into(),
        };
        assert_eq!(err.to_string(), "NX-API error (400): Syntax error while parsing");

        let err = Error::NxApi {
            code: None,
            message: "Invalid command".into(),
        };
        assert_eq!(err.to_string(), "NX-API error: Invalid command");
    }

    #[test]
    fn auth_failures_count_as_unreachable() {
        let err = Error::Authentication {
            message: "bad password".into(),
        };
        assert!(err.is_unreachable());
        assert!(!Error::UnsupportedBmcType("xcc".into()).is_unreachable());
    }

    #[test]
    fn http_404_is_not_found() {
        let err = Error::Http {
            status: 404,
            body: String::new(),
        };
        assert!(err.is_not_found());
    }
}
