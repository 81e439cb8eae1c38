// ── Core error types ──
//
// User-facing errors from swmap-core. Consumers never see HTTP status
// codes or JSON parse failures directly; the `From<swmap_api::Error>` impl
// translates transport-layer errors into domain variants.

use thiserror::Error;

/// Unified error type for the core crate.
#[derive(Debug, Error)]
pub enum CoreError {
    // ── Connection errors ────────────────────────────────────────────
    #[error("Cannot connect to {host}: {reason}")]
    ConnectionFailed { host: String, reason: String },

    #[error("Authentication failed: {message}")]
    AuthenticationFailed { message: String },

    #[error("Request timed out")]
    Timeout,

    // ── Collection errors ────────────────────────────────────────────
    #[error("Unsupported BMC type: {kind}")]
    UnsupportedBmc { kind: String },

    #[error("Resource not found: {message}")]
    NotFound { message: String },

    // ── API errors (wrapped, not exposed raw) ────────────────────────
    #[error("API error: {message}")]
    Api {
        message: String,
        /// NX-API error code or JSON-RPC error number, when reported.
        code: Option<String>,
        /// HTTP status code (if applicable).
        status: Option<u16>,
    },

    // ── Configuration errors ─────────────────────────────────────────
    #[error("Configuration error: {message}")]
    Config { message: String },

    // ── Output errors ────────────────────────────────────────────────
    #[error("Diagram rendering failed: {message}")]
    Render { message: String },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    // ── Internal errors ──────────────────────────────────────────────
    #[error("Internal error: {0}")]
    Internal(String),
}

impl CoreError {
    /// `true` for failures that mean the endpoint is unusable for the rest
    /// of the run (unreachable host, bad credentials, TLS).
    pub fn is_unreachable(&self) -> bool {
        matches!(
            self,
            Self::ConnectionFailed { .. } | Self::AuthenticationFailed { .. } | Self::Timeout
        )
    }
}

// ── Conversion from transport-layer errors ───────────────────────────

impl From<swmap_api::Error> for CoreError {
    fn from(err: swmap_api::Error) -> Self {
        match err {
            swmap_api::Error::Authentication { message } => {
                CoreError::AuthenticationFailed { message }
            }
            swmap_api::Error::Transport(ref e) => {
                if e.is_timeout() {
                    CoreError::Timeout
                } else if e.is_connect() {
                    CoreError::ConnectionFailed {
                        host: e
                            .url()
                            .and_then(|u| u.host_str().map(str::to_owned))
                            .unwrap_or_else(|| "<unknown>".into()),
                        reason: e.to_string(),
                    }
                } else {
                    CoreError::Api {
                        message: e.to_string(),
                        code: None,
                        status: e.status().map(|s| s.as_u16()),
                    }
                }
            }
            swmap_api::Error::InvalidUrl(e) => CoreError::Config {
                message: format!("Invalid URL: {e}"),
            },
            swmap_api::Error::Tls(msg) => CoreError::ConnectionFailed {
                host: String::new(),
                reason: format!("TLS error: {msg}"),
            },
            swmap_api::Error::Http { status: 404, body } => CoreError::NotFound { message: body },
            swmap_api::Error::Http { status, body } => CoreError::Api {
                message: body,
                code: None,
                status: Some(status),
            },
            swmap_api::Error::NxApi { code, message } => CoreError::Api {
                message,
                code,
                status: None,
            },
            swmap_api::Error::UnsupportedBmcType(kind) => CoreError::UnsupportedBmc { kind },
            swmap_api::Error::Deserialization { message, body: _ } => {
                CoreError::Internal(format!("Deserialization error: {message}"))
            }
        }
    }
}
