//! CLI error types with miette diagnostics.
//!
//! Maps `CoreError` and `ConfigError` into user-facing errors with
//! actionable help text.

use miette::Diagnostic;
use thiserror::Error;

use swmap_config::ConfigError;
use swmap_core::CoreError;

/// Process exit codes.
pub mod exit_code {
    pub const SUCCESS: i32 = 0;
    pub const GENERAL: i32 = 1;
    pub const USAGE: i32 = 2;
    pub const AUTH: i32 = 3;
    pub const CONNECTION: i32 = 7;
}

#[derive(Debug, Error, Diagnostic)]
pub enum CliError {
    // ── Configuration ────────────────────────────────────────────────
    #[error("Invalid value for {field}: {reason}")]
    #[diagnostic(code(swmap::validation), help("Fix the entry in {path}"))]
    Validation {
        field: String,
        reason: String,
        path: String,
    },

    #[error("Could not load configuration from {path}")]
    #[diagnostic(
        code(swmap::config),
        help("Check the YAML syntax and field types. Delete the file to get a fresh sample.")
    )]
    Config {
        path: String,
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    #[error("No password configured for {target}")]
    #[diagnostic(
        code(swmap::no_credentials),
        help(
            "Set `password` or `password_env` in the config file,\n\
             or store it in the system keyring under service `swmap`, entry `{target}`."
        )
    )]
    NoCredentials { target: String },

    // ── Run ──────────────────────────────────────────────────────────
    #[error("Could not connect to {host}")]
    #[diagnostic(
        code(swmap::connection_failed),
        help("Check the address and that NX-API / Redfish is enabled. Reason: {reason}")
    )]
    ConnectionFailed { host: String, reason: String },

    #[error("TLS setup failed: {reason}")]
    #[diagnostic(
        code(swmap::tls_error),
        help(
            "Management endpoints usually present self-signed certificates.\n\
             Use --insecure (-k), or point settings.ca_cert at the issuing CA."
        )
    )]
    TlsError { reason: String },

    #[error("Authentication failed: {message}")]
    #[diagnostic(code(swmap::auth_failed), help("Verify the configured username and password."))]
    AuthFailed { message: String },

    #[error("Network mapping failed: {message}")]
    #[diagnostic(code(swmap::mapping_failed))]
    Mapping { message: String },

    // ── IO ───────────────────────────────────────────────────────────
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl CliError {
    /// Map this error to an exit code for process termination.
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::ConnectionFailed { .. } | Self::TlsError { .. } => exit_code::CONNECTION,
            Self::AuthFailed { .. } | Self::NoCredentials { .. } => exit_code::AUTH,
            Self::Validation { .. } | Self::Config { .. } => exit_code::USAGE,
            Self::Mapping { .. } | Self::Io(_) => exit_code::GENERAL,
        }
    }

    /// Attach the config file path to a `ConfigError`.
    pub fn from_config(err: ConfigError, path: &std::path::Path) -> Self {
        let path = path.display().to_string();
        match err {
            ConfigError::Validation { field, reason } => Self::Validation {
                field,
                reason,
                path,
            },
            ConfigError::NoCredentials { target } => Self::NoCredentials { target },
            ConfigError::Io(e) => Self::Io(e),
            ConfigError::Figment(e) => Self::Config {
                path,
                source: e,
            },
            ConfigError::Serialization(e) => Self::Config {
                path,
                source: Box::new(e),
            },
        }
    }
}

// ── CoreError → CliError mapping ─────────────────────────────────────

impl From<CoreError> for CliError {
    fn from(err: CoreError) -> Self {
        match err {
            CoreError::ConnectionFailed { host, reason } if host.is_empty() => {
                CliError::TlsError { reason }
            }
            CoreError::ConnectionFailed { host, reason } => {
                CliError::ConnectionFailed { host, reason }
            }
            CoreError::AuthenticationFailed { message } => CliError::AuthFailed { message },
            CoreError::Config { message } => CliError::Validation {
                field: "settings".into(),
                reason: message,
                path: String::from("the configuration file"),
            },
            CoreError::Io(e) => CliError::Io(e),
            other => CliError::Mapping {
                message: other.to_string(),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use std::path::Path;

    use super::*;

    #[test]
    fn exit_codes() {
        let auth = CliError::from(CoreError::AuthenticationFailed {
            message: "401".into(),
        });
        assert_eq!(auth.exit_code(), exit_code::AUTH);

        let tls = CliError::from(CoreError::ConnectionFailed {
            host: String::new(),
            reason: "TLS error: bad CA".into(),
        });
        assert!(matches!(tls, CliError::TlsError { .. }));
        assert_eq!(tls.exit_code(), exit_code::CONNECTION);

        let render = CliError::from(CoreError::Render {
            message: "dot missing".into(),
        });
        assert_eq!(render.exit_code(), exit_code::GENERAL);
    }

    #[test]
    fn config_errors_carry_the_path() {
        let err = CliError::from_config(
            ConfigError::Validation {
                field: "switches[0].port".into(),
                reason: "must not be 0".into(),
            },
            Path::new("lab.yaml"),
        );
        assert_eq!(err.exit_code(), exit_code::USAGE);
        assert!(matches!(err, CliError::Validation { ref path, .. } if path == "lab.yaml"));

        let err = CliError::from_config(
            ConfigError::NoCredentials {
                target: "bmc/10.0.0.5".into(),
            },
            Path::new("lab.yaml"),
        );
        assert_eq!(err.exit_code(), exit_code::AUTH);
    }
}
