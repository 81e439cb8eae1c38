// ── Reconciliation ──
//
// Pass 1 folds MAC-table entries into the neighbor records of one switch.
// Pass 2 promotes unknown ports to servers using the BMC MAC map.

use tracing::debug;

use crate::model::{BmcMacMap, DeviceType, PortRecord};

/// Merge one switch's neighbor records (CDP then LLDP) with its MAC-table
/// records.
///
/// Each MAC entry updates the first record already in the result with the
/// same interface, overwriting only its MAC; neighbor identity, protocol
/// and classification are kept. Entries for interfaces not seen yet are
/// appended, so a later entry for the same port finds the appended record.
/// CDP and LLDP records for the same port are both kept.
pub fn merge_port_records(
    neighbors: Vec<PortRecord>,
    mac_entries: Vec<PortRecord>,
) -> Vec<PortRecord> {
    let mut merged = neighbors;

    for entry in mac_entries {
        match merged.iter_mut().find(|r| r.interface == entry.interface) {
            Some(existing) => existing.mac_address = entry.mac_address,
            None => merged.push(entry),
        }
    }

    merged
}

/// Promote `Unknown` records whose MAC a BMC reported to `Server`, named
/// after the BMC's host. Returns how many records changed.
///
/// `Switch` and `Server` records are left alone, as are records without a
/// non-empty MAC. Running it twice changes nothing the second time.
pub fn cross_reference(records: &mut [PortRecord], bmc_macs: &BmcMacMap) -> usize {
    let mut resolved = 0;

    for record in records.iter_mut() {
        if record.device_type != DeviceType::Unknown {
            continue;
        }
        let Some(hostname) = record.mac().and_then(|mac| bmc_macs.hostname_for(mac)) else {
            continue;
        };
        debug!(interface = %record.interface, %hostname, "resolved unknown port to server");
        record.connected_device = Some(hostname.to_owned());
        record.device_type = DeviceType::Server;
        resolved += 1;
    }

    resolved
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::model::{MacAddress, Protocol};

    fn mac(s: &str) -> MacAddress {
        MacAddress::new(s)
    }

    fn sw2_neighbor() -> PortRecord {
        PortRecord::neighbor("Eth1/1", "sw2", Protocol::Cdp, DeviceType::Switch)
    }

    fn mac_list() -> Vec<PortRecord> {
        vec![
            PortRecord::mac_only("Eth1/1", mac("AA:BB:CC:DD:EE:FF")),
            PortRecord::mac_only("Eth1/2", mac("11:22:33:44:55:66")),
        ]
    }

    fn bmc_map(entries: &[(&str, &str)]) -> BmcMacMap {
        entries.iter().map(|(m, h)| (mac(m), *h)).collect()
    }

    // ── Merge ────────────────────────────────────────────────────────

    #[test]
    fn merge_keeps_neighbor_identity_and_takes_table_mac() {
        let merged = merge_port_records(vec![sw2_neighbor()], mac_list());

        assert_eq!(
            merged,
            vec![
                PortRecord {
                    interface: "Eth1/1".into(),
                    connected_device: Some("sw2".into()),
                    mac_address: Some(mac("AA:BB:CC:DD:EE:FF")),
                    protocol: Some(Protocol::Cdp),
                    device_type: DeviceType::Switch,
                },
                PortRecord {
                    interface: "Eth1/2".into(),
                    connected_device: None,
                    mac_address: Some(mac("11:22:33:44:55:66")),
                    protocol: None,
                    device_type: DeviceType::Unknown,
                },
            ]
        );
    }

    #[test]
    fn merge_length_is_neighbors_plus_new_interfaces() {
        let neighbors = vec![
            PortRecord::neighbor("Eth1/1", "spine-1", Protocol::Cdp, DeviceType::Switch),
            PortRecord::neighbor("Eth1/1", "spine-1", Protocol::Lldp, DeviceType::Switch),
            PortRecord::neighbor("Eth1/7", "esx-1", Protocol::Lldp, DeviceType::Unknown),
        ];
        let macs = vec![
            PortRecord::mac_only("Eth1/1", mac("00:00:00:00:00:01")),
            PortRecord::mac_only("Eth1/7", mac("00:00:00:00:00:07")),
            PortRecord::mac_only("Eth1/8", mac("00:00:00:00:00:08")),
            PortRecord::mac_only("Eth1/9", mac("00:00:00:00:00:09")),
        ];

        let merged = merge_port_records(neighbors.clone(), macs);

        assert_eq!(merged.len(), neighbors.len() + 2);
        // Only the first Eth1/1 record takes the MAC; the LLDP duplicate is untouched.
        assert_eq!(merged[0].mac_address, Some(mac("00:00:00:00:00:01")));
        assert_eq!(merged[1].mac_address, None);
        assert_eq!(merged[3].interface, "Eth1/8");
        assert_eq!(merged[4].interface, "Eth1/9");
    }

    #[test]
    fn repeated_table_entries_update_the_appended_record() {
        let macs = vec![
            PortRecord::mac_only("Eth1/3", mac("00:00:00:00:00:31")),
            PortRecord::mac_only("Eth1/3", mac("00:00:00:00:00:32")),
        ];

        let merged = merge_port_records(Vec::new(), macs);

        assert_eq!(merged.len(), 1);
        assert_eq!(merged[0].mac_address, Some(mac("00:00:00:00:00:32")));
    }

    #[test]
    fn merging_twice_gives_the_same_macs() {
        let once = merge_port_records(vec![sw2_neighbor()], mac_list());
        let twice = merge_port_records(once.clone(), mac_list());

        assert_eq!(once, twice);
    }

    #[test]
    fn empty_inputs() {
        assert!(merge_port_records(Vec::new(), Vec::new()).is_empty());

        let only_neighbors = merge_port_records(vec![sw2_neighbor()], Vec::new());
        assert_eq!(only_neighbors, vec![sw2_neighbor()]);

        let only_macs = merge_port_records(Vec::new(), mac_list());
        assert!(only_macs.iter().all(|r| r.device_type == DeviceType::Unknown));
        assert_eq!(only_macs.len(), 2);
    }

    // ── Cross-reference ──────────────────────────────────────────────

    #[test]
    fn unknown_port_with_bmc_mac_becomes_server() {
        let mut records = merge_port_records(vec![sw2_neighbor()], mac_list());
        let bmc = bmc_map(&[("11:22:33:44:55:66", "esx-host-07")]);

        let changed = cross_reference(&mut records, &bmc);

        assert_eq!(changed, 1);
        assert_eq!(records[1].device_type, DeviceType::Server);
        assert_eq!(records[1].connected_device.as_deref(), Some("esx-host-07"));
        assert_eq!(records[0].device_type, DeviceType::Switch);
        assert_eq!(records[0].connected_device.as_deref(), Some("sw2"));
    }

    #[test]
    fn unmatched_unknown_port_is_unchanged() {
        let mut records = vec![PortRecord::mac_only("Eth1/2", mac("11:22:33:44:55:66"))];
        let before = records.clone();

        let changed = cross_reference(&mut records, &bmc_map(&[("99:99:99:99:99:99", "db-01")]));

        assert_eq!(changed, 0);
        assert_eq!(records, before);
        assert_eq!(records[0].connected_device, None);
    }

    #[test]
    fn switch_records_are_never_resolved() {
        let mut records = merge_port_records(vec![sw2_neighbor()], mac_list());
        let bmc = bmc_map(&[("AA:BB:CC:DD:EE:FF", "imposter")]);

        assert_eq!(cross_reference(&mut records, &bmc), 0);
        assert_eq!(records[0].connected_device.as_deref(), Some("sw2"));
        assert_eq!(records[0].device_type, DeviceType::Switch);
    }

    #[test]
    fn server_records_are_not_revisited() {
        let mut records = vec![PortRecord {
            device_type: DeviceType::Server,
            connected_device: Some("first".into()),
            ..PortRecord::mac_only("Eth1/4", mac("44:44:44:44:44:44"))
        }];

        cross_reference(&mut records, &bmc_map(&[("44:44:44:44:44:44", "second")]));

        assert_eq!(records[0].connected_device.as_deref(), Some("first"));
    }

    #[test]
    fn cross_reference_is_idempotent() {
        let mut records = merge_port_records(vec![sw2_neighbor()], mac_list());
        let bmc = bmc_map(&[("11:22:33:44:55:66", "esx-host-07")]);

        cross_reference(&mut records, &bmc);
        let after_once = records.clone();
        let changed = cross_reference(&mut records, &bmc);

        assert_eq!(changed, 0);
        assert_eq!(records, after_once);
    }

    #[test]
    fn empty_mac_never_matches() {
        let mut records = vec![
            PortRecord::mac_only("Eth1/5", mac("")),
            PortRecord::neighbor("Eth1/6", "", Protocol::Lldp, DeviceType::Unknown),
        ];
        let bmc = bmc_map(&[("", "ghost"), ("55:55:55:55:55:55", "real")]);

        assert_eq!(cross_reference(&mut records, &bmc), 0);
        assert!(records.iter().all(|r| r.device_type == DeviceType::Unknown));
        assert!(records.iter().all(|r| r.connected_device.is_none()));
    }

    #[test]
    fn matching_is_case_normalized() {
        let mut records = vec![PortRecord::mac_only("Eth1/9", mac("0050.56a1.b2c3"))];
        let bmc = bmc_map(&[("00:50:56:a1:b2:c3", "vm-host")]);

        assert_eq!(cross_reference(&mut records, &bmc), 1);
        assert_eq!(records[0].connected_device.as_deref(), Some("vm-host"));
    }
}
