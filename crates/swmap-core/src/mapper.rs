// ── Run orchestration ──
//
// One `Mapper` drives one mapping run: collect every switch, collect every
// BMC, merge, cross-reference, then hand the topology to the reporters.
// Switches and BMCs are queried strictly one after another.

use std::path::{Path, PathBuf};

use serde::Serialize;
use swmap_api::NxApiClient;
use tracing::{info, warn};

use crate::collector::{SwitchCollector, collect_bmc_macs};
use crate::config::{MapperConfig, SwitchTarget};
use crate::convert::Classifier;
use crate::error::CoreError;
use crate::model::{SwitchPorts, SwitchSummary, Topology};
use crate::reconcile::merge_port_records;
use crate::report::{generate_text_report, render_diagram};

/// What a full run produces.
#[derive(Debug, Clone, Serialize)]
pub struct MapOutput {
    /// The rendered PNG, absent when rendering failed.
    pub diagram: Option<PathBuf>,
    pub report: String,
    pub summary: Vec<SwitchSummary>,
    /// Switches that could not be reached at all.
    pub unreachable: Vec<String>,
    /// Ports promoted from unknown to server.
    pub resolved: usize,
}

pub struct Mapper {
    config: MapperConfig,
    http: reqwest::Client,
    classifier: Classifier,
}

impl Mapper {
    /// Builds the shared HTTP client; fails on an unusable TLS setup.
    pub fn new(config: MapperConfig) -> Result<Self, CoreError> {
        if config.mac_batch_size == 0 {
            return Err(CoreError::Config {
                message: "mac_batch_size must be at least 1".into(),
            });
        }
        let http = config.transport().build_client()?;
        let classifier = Classifier::new(config.switch_signatures.clone());
        Ok(Self {
            config,
            http,
            classifier,
        })
    }

    pub fn config(&self) -> &MapperConfig {
        &self.config
    }

    /// Collect and reconcile. Never fails: unreachable sources simply
    /// contribute nothing.
    pub async fn discover(&self) -> Topology {
        let mut topology = Topology::new();

        self.gather_switch_data(&mut topology).await;

        let bmc_macs = collect_bmc_macs(&self.http, &self.config.bmcs).await;
        info!(bmcs = self.config.bmcs.len(), macs = bmc_macs.len(), "BMC collection complete");
        topology.set_bmc_macs(bmc_macs);

        let resolved = topology.resolve_servers();
        info!(resolved, "cross-referenced unknown ports against BMC MACs");

        topology
    }

    async fn gather_switch_data(&self, topology: &mut Topology) {
        let collector = SwitchCollector::new(
            &self.classifier,
            self.config.mac_batch_size,
            self.config.batch_delay,
        );

        for target in &self.config.switches {
            let client = match self.nxapi_client(target) {
                Ok(c) => c,
                Err(e) => {
                    warn!(switch = %target.hostname, error = %e, "skipping switch");
                    topology.mark_unreachable(&target.hostname);
                    continue;
                }
            };

            match collector.collect(&client, &target.hostname).await {
                Ok(obs) => {
                    let records = merge_port_records(obs.neighbors, obs.mac_entries);
                    info!(switch = %target.hostname, ports = records.len(), "merged port records");
                    topology.insert_switch(SwitchPorts {
                        hostname: target.hostname.clone(),
                        records,
                        interface_states: obs.interface_states,
                    });
                }
                Err(e) => {
                    warn!(switch = %target.hostname, error = %e, "switch unreachable, skipping");
                    topology.mark_unreachable(&target.hostname);
                }
            }
        }
    }

    fn nxapi_client(&self, target: &SwitchTarget) -> Result<NxApiClient, CoreError> {
        Ok(NxApiClient::new(
            self.http.clone(),
            &target.host,
            target.port,
            target.username.clone(),
            target.password.clone(),
            target.format,
        )?)
    }

    /// Full run: discover, then render `<output_base>.png` (best-effort)
    /// and the text report.
    pub async fn map_network(&self, output_base: &Path) -> Result<MapOutput, CoreError> {
        if output_base.file_name().is_none() {
            return Err(CoreError::Config {
                message: format!("invalid output name: {}", output_base.display()),
            });
        }

        let topology = self.discover().await;

        let diagram = match render_diagram(
            &topology,
            output_base,
            &self.config.dot_command,
            self.config.keep_dot,
        )
        .await
        {
            Ok(path) => Some(path),
            Err(e) => {
                warn!(error = %e, "diagram generation failed");
                None
            }
        };

        Ok(MapOutput {
            diagram,
            report: generate_text_report(&topology),
            summary: topology.summary(),
            unreachable: topology.unreachable().to_vec(),
            resolved: topology.resolved(),
        })
    }
}
