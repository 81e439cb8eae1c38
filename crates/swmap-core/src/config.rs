// ── Runtime mapping configuration ──
//
// These types describe *what* to query and *how* to reach it. They carry
// credential data and collection tuning, but never touch disk. The CLI
// builds a `MapperConfig` from the YAML file and hands it in.

use std::path::PathBuf;
use std::time::Duration;

use secrecy::SecretString;
use swmap_api::{NxApiFormat, TlsMode, TransportConfig};

/// Platform substring that marks a CDP/LLDP neighbor as a peer switch.
pub const DEFAULT_SWITCH_SIGNATURE: &str = "N9K";

/// TLS verification strategy.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum TlsVerification {
    /// System CA store (strict).
    SystemDefaults,
    /// Custom CA certificate file.
    CustomCa(PathBuf),
    /// Skip verification. Default: switch and BMC management ports are
    /// almost always self-signed.
    #[default]
    DangerAcceptInvalid,
}

/// One switch to collect neighbor and MAC-table data from.
#[derive(Debug, Clone)]
pub struct SwitchTarget {
    /// Name the switch is reported under.
    pub hostname: String,
    /// Management address (IP or DNS name).
    pub host: String,
    pub port: u16,
    pub username: String,
    pub password: SecretString,
    pub format: NxApiFormat,
}

/// One management controller to collect NIC MACs from.
#[derive(Debug, Clone)]
pub struct BmcTarget {
    pub host: String,
    pub username: String,
    pub password: SecretString,
    /// Vendor tag as written by the user (`ilo`, `idrac`). Parsed by the
    /// client factory so an unknown tag only fails that one BMC.
    pub kind: String,
}

/// Everything one mapping run needs.
///
/// Built by the CLI, passed to `Mapper` -- core never reads config files.
#[derive(Debug, Clone)]
pub struct MapperConfig {
    pub switches: Vec<SwitchTarget>,
    pub bmcs: Vec<BmcTarget>,
    /// TLS verification strategy.
    pub tls: TlsVerification,
    /// Per-request timeout.
    pub timeout: Duration,
    /// Interfaces per MAC-table request.
    pub mac_batch_size: usize,
    /// Pause between consecutive MAC-table batches.
    pub batch_delay: Duration,
    /// Substrings of CDP platform / LLDP system description that classify
    /// a neighbor as a switch.
    pub switch_signatures: Vec<String>,
    /// Also write the Graphviz source next to the rendered diagram.
    pub keep_dot: bool,
    /// Graphviz `dot` executable used to render the PNG.
    pub dot_command: String,
}

impl Default for MapperConfig {
    fn default() -> Self {
        Self {
            switches: Vec::new(),
            bmcs: Vec::new(),
            tls: TlsVerification::default(),
            timeout: Duration::from_secs(30),
            mac_batch_size: 16,
            batch_delay: Duration::from_secs(1),
            switch_signatures: vec![DEFAULT_SWITCH_SIGNATURE.to_owned()],
            keep_dot: false,
            dot_command: "dot".into(),
        }
    }
}

impl MapperConfig {
    pub(crate) fn transport(&self) -> TransportConfig {
        TransportConfig {
            tls: tls_to_transport(&self.tls),
            timeout: self.timeout,
        }
    }
}

fn tls_to_transport(tls: &TlsVerification) -> TlsMode {
    match tls {
        TlsVerification::SystemDefaults => TlsMode::System,
        TlsVerification::CustomCa(path) => TlsMode::CustomCa(path.clone()),
        TlsVerification::DangerAcceptInvalid => TlsMode::DangerAcceptInvalid,
    }
}
