use crate::model::{PortRecord, Topology};

const TITLE_RULE: usize = 50;
const SWITCH_RULE: usize = 30;

/// One report line: `  <interface>: [<device> ][(MAC: <mac>) ][[<protocol>]]`.
pub fn port_line(record: &PortRecord) -> String {
    let mut line = format!("  {}: ", record.interface);
    if let Some(device) = &record.connected_device {
        line.push_str(device);
        line.push(' ');
    }
    if let Some(mac) = record.mac() {
        line.push_str(&format!("(MAC: {mac}) "));
    }
    if let Some(protocol) = record.protocol {
        line.push_str(&format!("[{protocol}]"));
    }
    line
}

/// The plain-text connection report: per switch, its records grouped as
/// connected switches, connected servers, unknown devices (empty groups
/// omitted).
pub fn generate_text_report(topology: &Topology) -> String {
    let mut lines = vec![
        "Network Connection Report".to_owned(),
        "=".repeat(TITLE_RULE),
    ];

    for switch in topology.switches() {
        lines.push(format!("\nSwitch: {}", switch.hostname));
        lines.push("-".repeat(SWITCH_RULE));

        let groups = switch.groups();
        for (heading, records) in [
            ("Connected Switches", &groups.switches),
            ("Connected Servers", &groups.servers),
            ("Unknown Devices", &groups.unknown),
        ] {
            if records.is_empty() {
                continue;
            }
            lines.push(format!("\n  {heading}:"));
            lines.extend(records.iter().map(|r| port_line(r)));
        }
    }

    lines.join("\n")
}
