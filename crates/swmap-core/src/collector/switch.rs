// Per-switch neighbor, interface-status and MAC-table collection.

use std::time::Duration;

use indexmap::IndexMap;
use swmap_api::NxApiClient;
use tracing::{debug, info, warn};

use crate::convert::{self, Classifier};
use crate::error::CoreError;
use crate::model::PortRecord;

/// Everything read from one switch, before merging.
#[derive(Debug, Default)]
pub struct SwitchObservations {
    /// CDP records first, then LLDP.
    pub neighbors: Vec<PortRecord>,
    pub mac_entries: Vec<PortRecord>,
    pub interface_states: IndexMap<String, String>,
}

/// Queries one switch at a time: CDP, LLDP, interface status, MAC table.
pub struct SwitchCollector<'a> {
    classifier: &'a Classifier,
    batch_size: usize,
    batch_delay: Duration,
}

impl<'a> SwitchCollector<'a> {
    pub fn new(classifier: &'a Classifier, batch_size: usize, batch_delay: Duration) -> Self {
        Self {
            classifier,
            batch_size: batch_size.max(1),
            batch_delay,
        }
    }

    /// Collect from one switch.
    ///
    /// Fails only when the switch cannot be reached (or rejects the
    /// credentials) on the first query; later failures are logged and
    /// leave that part of the observations empty.
    pub async fn collect(
        &self,
        client: &NxApiClient,
        hostname: &str,
    ) -> Result<SwitchObservations, CoreError> {
        let mut obs = SwitchObservations::default();

        match client.cdp_neighbors().await {
            Ok(rows) => obs
                .neighbors
                .extend(rows.iter().map(|n| self.classifier.cdp(n))),
            Err(e) if e.is_unreachable() => return Err(e.into()),
            Err(e) => warn!(switch = hostname, error = %e, "CDP query failed"),
        }
        let cdp_count = obs.neighbors.len();

        match client.lldp_neighbors().await {
            Ok(rows) => obs
                .neighbors
                .extend(rows.iter().map(|n| self.classifier.lldp(n))),
            Err(e) => warn!(switch = hostname, error = %e, "LLDP query failed"),
        }

        match client.interface_status().await {
            Ok(rows) => {
                obs.interface_states = rows.iter().map(convert::interface_state).collect();
            }
            Err(e) => warn!(switch = hostname, error = %e, "interface status query failed"),
        }

        obs.mac_entries = self
            .mac_entries(client, hostname, &obs.interface_states)
            .await;

        info!(
            switch = hostname,
            cdp = cdp_count,
            lldp = obs.neighbors.len() - cdp_count,
            interfaces = obs.interface_states.len(),
            macs = obs.mac_entries.len(),
            "collected switch data"
        );
        Ok(obs)
    }

    /// MAC-table entries for the switch's live ports, queried in batches
    /// with a pause between batches. Falls back to one whole-table query
    /// when interface status is unavailable.
    async fn mac_entries(
        &self,
        client: &NxApiClient,
        hostname: &str,
        states: &IndexMap<String, String>,
    ) -> Vec<PortRecord> {
        if states.is_empty() {
            return match client.mac_address_table().await {
                Ok(rows) => convert::mac_records(rows),
                Err(e) => {
                    warn!(switch = hostname, error = %e, "MAC address table query failed");
                    Vec::new()
                }
            };
        }

        let active: Vec<String> = states
            .iter()
            .filter(|(intf, state)| convert::is_switchport(intf) && convert::is_active_state(state))
            .map(|(intf, _)| intf.clone())
            .collect();

        let mut records = Vec::new();
        for (i, batch) in active.chunks(self.batch_size).enumerate() {
            if i > 0 && !self.batch_delay.is_zero() {
                tokio::time::sleep(self.batch_delay).await;
            }
            match client.mac_address_table_for(batch).await {
                Ok(rows) => {
                    debug!(switch = hostname, batch = i, rows = rows.len(), "MAC batch");
                    records.extend(convert::mac_records(rows));
                }
                Err(e) => {
                    warn!(switch = hostname, batch = i, ?batch, error = %e, "MAC batch failed, continuing");
                }
            }
        }
        records
    }
}
