//! Configuration for the swmap CLI.
//!
//! YAML file model, default-file creation, credential resolution
//! (env + keyring + plaintext), and translation to
//! `swmap_core::MapperConfig`.

use std::path::{Path, PathBuf};
use std::time::Duration;

use figment::{
    Figment,
    providers::{Env, Format, Serialized, Yaml},
};
use secrecy::SecretString;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use swmap_core::{BmcTarget, MapperConfig, NxApiFormat, SwitchTarget, TlsVerification};

/// Keyring service all stored passwords live under.
pub const KEYRING_SERVICE: &str = "swmap";

/// Default config file, relative to the working directory.
pub const DEFAULT_CONFIG_FILE: &str = "config.yaml";

// ── Error ───────────────────────────────────────────────────────────

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid {field}: {reason}")]
    Validation { field: String, reason: String },

    #[error("no password configured for {target}")]
    NoCredentials { target: String },

    #[error("failed to serialize config: {0}")]
    Serialization(#[from] serde_yaml::Error),

    #[error("config loading failed: {0}")]
    Figment(Box<figment::Error>),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<figment::Error> for ConfigError {
    fn from(err: figment::Error) -> Self {
        Self::Figment(Box::new(err))
    }
}

// ── YAML config structs ─────────────────────────────────────────────

/// Top-level YAML configuration.
#[derive(Debug, Default, Deserialize, Serialize)]
pub struct Config {
    #[serde(default)]
    pub switches: Vec<SwitchEntry>,

    #[serde(default)]
    pub bmcs: Vec<BmcEntry>,

    #[serde(default)]
    pub settings: Settings,
}

/// One NX-API switch.
#[derive(Debug, Deserialize, Serialize)]
pub struct SwitchEntry {
    pub hostname: String,

    /// Management address.
    pub ip: String,

    pub username: String,

    /// Plaintext password (prefer keyring or env var).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub password: Option<String>,

    /// Environment variable holding the password.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub password_env: Option<String>,

    /// `true`: JSON-RPC envelope. `false`: legacy `ins_api` envelope.
    #[serde(default = "default_true")]
    pub use_nxapi: bool,

    #[serde(default = "default_nxapi_port")]
    pub port: u16,
}

/// One BMC.
#[derive(Debug, Deserialize, Serialize)]
pub struct BmcEntry {
    /// Address, `host:port`, or a full base URL.
    pub ip: String,

    pub username: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub password: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub password_env: Option<String>,

    /// `ilo` or `idrac`.
    #[serde(rename = "type", default = "default_bmc_type")]
    pub kind: String,
}

#[derive(Debug, Deserialize, Serialize)]
pub struct Settings {
    /// Per-request timeout, seconds.
    #[serde(default = "default_timeout")]
    pub timeout: u64,

    /// Skip TLS verification (switch and BMC certificates are usually
    /// self-signed).
    #[serde(default = "default_true")]
    pub insecure: bool,

    /// CA bundle used when `insecure` is off.
    #[serde(default)]
    pub ca_cert: Option<PathBuf>,

    #[serde(default = "default_mac_batch_size")]
    pub mac_batch_size: usize,

    /// Pause between MAC-table batches, milliseconds.
    #[serde(default = "default_batch_delay_ms")]
    pub batch_delay_ms: u64,

    #[serde(default = "default_switch_signatures")]
    pub switch_signatures: Vec<String>,

    /// Graphviz executable.
    #[serde(default = "default_dot_command")]
    pub dot_command: String,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            timeout: default_timeout(),
            insecure: true,
            ca_cert: None,
            mac_batch_size: default_mac_batch_size(),
            batch_delay_ms: default_batch_delay_ms(),
            switch_signatures: default_switch_signatures(),
            dot_command: default_dot_command(),
        }
    }
}

fn default_true() -> bool {
    true
}
fn default_nxapi_port() -> u16 {
    80
}
fn default_bmc_type() -> String {
    "ilo".into()
}
fn default_timeout() -> u64 {
    30
}
fn default_mac_batch_size() -> usize {
    16
}
fn default_batch_delay_ms() -> u64 {
    1000
}
fn default_switch_signatures() -> Vec<String> {
    vec![swmap_core::config::DEFAULT_SWITCH_SIGNATURE.to_owned()]
}
fn default_dot_command() -> String {
    "dot".into()
}

impl Config {
    /// The file written when none exists: one switch and one BMC to edit.
    pub fn sample() -> Self {
        Self {
            switches: vec![SwitchEntry {
                hostname: "nexus9k-1".into(),
                ip: "192.168.1.1".into(),
                username: "admin".into(),
                password: Some("password".into()),
                password_env: None,
                use_nxapi: true,
                port: default_nxapi_port(),
            }],
            bmcs: vec![BmcEntry {
                ip: "192.168.1.100".into(),
                username: "admin".into(),
                password: Some("password".into()),
                password_env: None,
                kind: default_bmc_type(),
            }],
            settings: Settings::default(),
        }
    }
}

// ── Config file handling ────────────────────────────────────────────

/// Write the sample config to `path` unless a file is already there.
/// Returns `true` when a file was created.
pub fn ensure_config_file(path: &Path) -> Result<bool, ConfigError> {
    if path.exists() {
        return Ok(false);
    }
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)?;
    }
    std::fs::write(path, serde_yaml::to_string(&Config::sample())?)?;
    Ok(true)
}

/// Settings keys that may be overridden as `SWMAP_<KEY>`.
const ENV_SETTINGS: &[&str] = &[
    "timeout",
    "insecure",
    "ca_cert",
    "mac_batch_size",
    "batch_delay_ms",
    "dot_command",
];

/// Load and validate `path`, layered: built-in defaults, then the YAML
/// file, then `SWMAP_*` environment overrides of `settings`.
pub fn load_config(path: &Path) -> Result<Config, ConfigError> {
    let figment = Figment::new()
        .merge(Serialized::defaults(Config::default()))
        .merge(Yaml::file(path))
        .merge(
            Env::prefixed("SWMAP_")
                .only(ENV_SETTINGS)
                .map(|key| format!("settings.{key}").into()),
        );

    let config: Config = figment.extract()?;
    validate(&config)?;
    Ok(config)
}

fn invalid(field: impl Into<String>, reason: impl Into<String>) -> ConfigError {
    ConfigError::Validation {
        field: field.into(),
        reason: reason.into(),
    }
}

/// Reject entries the mapper cannot use. BMC type tags are left to the
/// client factory so one bad tag only costs that BMC.
pub fn validate(config: &Config) -> Result<(), ConfigError> {
    for (i, sw) in config.switches.iter().enumerate() {
        if sw.hostname.trim().is_empty() {
            return Err(invalid(format!("switches[{i}].hostname"), "must not be empty"));
        }
        if sw.ip.trim().is_empty() {
            return Err(invalid(format!("switches[{i}].ip"), "must not be empty"));
        }
        if sw.port == 0 {
            return Err(invalid(format!("switches[{i}].port"), "must not be 0"));
        }
        if let Some(first) = config
            .switches
            .iter()
            .take(i)
            .position(|other| other.hostname.trim() == sw.hostname.trim())
        {
            return Err(invalid(
                format!("switches[{i}].hostname"),
                format!("duplicates switches[{first}] ({})", sw.hostname.trim()),
            ));
        }
    }
    for (i, bmc) in config.bmcs.iter().enumerate() {
        if bmc.ip.trim().is_empty() {
            return Err(invalid(format!("bmcs[{i}].ip"), "must not be empty"));
        }
    }
    if config.settings.mac_batch_size == 0 {
        return Err(invalid("settings.mac_batch_size", "must be at least 1"));
    }
    Ok(())
}

// ── Credential resolution ───────────────────────────────────────────

/// Resolve a password: `password_env` variable, then the system keyring
/// (`swmap` / `entry`), then the plaintext value.
pub fn resolve_password(
    password: Option<&str>,
    password_env: Option<&str>,
    entry: &str,
) -> Result<SecretString, ConfigError> {
    // 1. Env var
    if let Some(env_name) = password_env {
        if let Ok(val) = std::env::var(env_name) {
            return Ok(SecretString::from(val));
        }
    }

    // 2. System keyring
    if let Ok(item) = keyring::Entry::new(KEYRING_SERVICE, entry) {
        if let Ok(secret) = item.get_password() {
            return Ok(SecretString::from(secret));
        }
    }

    // 3. Plaintext in config
    if let Some(pw) = password {
        return Ok(SecretString::from(pw.to_owned()));
    }

    Err(ConfigError::NoCredentials {
        target: entry.to_owned(),
    })
}

impl SwitchEntry {
    pub fn keyring_entry(&self) -> String {
        format!("switch/{}", self.hostname)
    }

    pub fn to_target(&self) -> Result<SwitchTarget, ConfigError> {
        let password = resolve_password(
            self.password.as_deref(),
            self.password_env.as_deref(),
            &self.keyring_entry(),
        )?;
        Ok(SwitchTarget {
            hostname: self.hostname.trim().to_owned(),
            host: self.ip.trim().to_owned(),
            port: self.port,
            username: self.username.clone(),
            password,
            format: if self.use_nxapi {
                NxApiFormat::JsonRpc
            } else {
                NxApiFormat::InsApi
            },
        })
    }
}

impl BmcEntry {
    pub fn keyring_entry(&self) -> String {
        format!("bmc/{}", self.ip)
    }

    pub fn to_target(&self) -> Result<BmcTarget, ConfigError> {
        let password = resolve_password(
            self.password.as_deref(),
            self.password_env.as_deref(),
            &self.keyring_entry(),
        )?;
        Ok(BmcTarget {
            host: self.ip.trim().to_owned(),
            username: self.username.clone(),
            password,
            kind: self.kind.clone(),
        })
    }
}

// ── Translation to core ─────────────────────────────────────────────

/// Build a `MapperConfig` from the loaded file.
pub fn to_mapper_config(config: &Config) -> Result<MapperConfig, ConfigError> {
    let switches = config
        .switches
        .iter()
        .map(SwitchEntry::to_target)
        .collect::<Result<Vec<_>, _>>()?;
    let bmcs = config
        .bmcs
        .iter()
        .map(BmcEntry::to_target)
        .collect::<Result<Vec<_>, _>>()?;

    let settings = &config.settings;
    let tls = if settings.insecure {
        TlsVerification::DangerAcceptInvalid
    } else if let Some(ref ca_path) = settings.ca_cert {
        TlsVerification::CustomCa(ca_path.clone())
    } else {
        TlsVerification::SystemDefaults
    };

    Ok(MapperConfig {
        switches,
        bmcs,
        tls,
        timeout: Duration::from_secs(settings.timeout),
        mac_batch_size: settings.mac_batch_size,
        batch_delay: Duration::from_millis(settings.batch_delay_ms),
        switch_signatures: settings.switch_signatures.clone(),
        keep_dot: false,
        dot_command: settings.dot_command.clone(),
    })
}
