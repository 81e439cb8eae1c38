// ── Topology diagram ──
//
// Builds a petgraph `DiGraph` from the reconciled topology, writes it out
// as DOT and pipes that through Graphviz `dot -Tpng`. Layout is entirely
// Graphviz's business.

use std::collections::HashMap;
use std::ffi::OsString;
use std::fmt;
use std::path::{Path, PathBuf};
use std::process::Stdio;

use petgraph::dot::{Config, Dot};
use petgraph::graph::{DiGraph, NodeIndex};
use tokio::io::AsyncWriteExt;
use tokio::process::Command;
use tracing::debug;

use crate::error::CoreError;
use crate::model::{DeviceType, MacAddress, PortRecord, Topology};

/// What a diagram node stands for; drives its fill colour.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NodeKind {
    /// A switch we collected from.
    Switch,
    /// A peer switch seen only as a neighbor.
    Neighbor,
    Server,
    Unknown,
}

impl NodeKind {
    fn fill(self) -> Option<&'static str> {
        match self {
            Self::Switch => Some("lightblue"),
            Self::Server => Some("lightgreen"),
            Self::Unknown => Some("lightgray"),
            Self::Neighbor => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DiagramNode {
    pub label: String,
    pub kind: NodeKind,
}

impl DiagramNode {
    fn attributes(&self) -> String {
        let label = format!("label = \"{}\"", escape(&self.label));
        match self.kind.fill() {
            Some(color) => format!("{label} style = filled fillcolor = {color}"),
            None => label,
        }
    }
}

impl fmt::Display for DiagramNode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.label)
    }
}

/// Nodes are devices, edge weights are the edge labels.
pub type DiagramGraph = DiGraph<DiagramNode, String>;

#[derive(Default)]
struct GraphBuilder {
    graph: DiagramGraph,
    by_id: HashMap<String, NodeIndex>,
}

impl GraphBuilder {
    /// Get or add the node named `id`. A plain neighbor node seen again as
    /// something more specific takes the new kind.
    fn node(&mut self, id: &str, label: impl Into<String>, kind: NodeKind) -> NodeIndex {
        if let Some(&ix) = self.by_id.get(id) {
            if self.graph[ix].kind == NodeKind::Neighbor {
                self.graph[ix].kind = kind;
            }
            return ix;
        }
        let ix = self.graph.add_node(DiagramNode {
            label: label.into(),
            kind,
        });
        self.by_id.insert(id.to_owned(), ix);
        ix
    }
}

fn edge_label(record: &PortRecord) -> String {
    let mut label = record.interface.clone();
    if let Some(mac) = record.mac() {
        label.push_str(&format!("\nMAC: {mac}"));
    }
    if let Some(protocol) = record.protocol {
        label.push_str(&format!("\n{protocol}"));
    }
    label
}

/// One node per collected switch, plus one per neighbor switch and server
/// (shared across switches) and one per unknown device per switch port.
/// Records without a connected device are left out.
pub fn build_graph(topology: &Topology) -> DiagramGraph {
    let mut b = GraphBuilder::default();

    for sw in topology.switches() {
        b.node(&sw.hostname, format!("{}\nNexus 9K", sw.hostname), NodeKind::Switch);
    }

    for sw in topology.switches() {
        let from = b.node(&sw.hostname, sw.hostname.clone(), NodeKind::Switch);
        for record in &sw.records {
            let Some(device) = &record.connected_device else {
                continue;
            };
            let to = match record.device_type {
                DeviceType::Switch => b.node(device, device.clone(), NodeKind::Neighbor),
                DeviceType::Server => b.node(device, device.clone(), NodeKind::Server),
                DeviceType::Unknown => {
                    let mac = record.mac().map(MacAddress::to_string).unwrap_or_default();
                    b.node(
                        &format!("unknown:{}:{}", sw.hostname, record.interface),
                        format!("Unknown Device\n{mac}"),
                        NodeKind::Unknown,
                    )
                }
            };
            b.graph.add_edge(from, to, edge_label(record));
        }
    }

    b.graph
}

fn escape(s: &str) -> String {
    s.replace('\\', "\\\\")
        .replace('"', "\\\"")
        .replace('\n', "\\n")
}

/// Graphviz source for the graph, top-to-bottom with boxed nodes.
pub fn to_dot(graph: &DiagramGraph) -> String {
    format!(
        "digraph {{\n    rankdir=TB\n    node [shape=box]\n{}}}\n",
        Dot::with_attr_getters(
            graph,
            &[Config::NodeNoLabel, Config::EdgeNoLabel, Config::GraphContentOnly],
            &|_, edge| format!("label = \"{}\"", escape(edge.weight())),
            &|_, (_, node)| node.attributes(),
        )
    )
}

fn with_suffix(base: &Path, ext: &str) -> PathBuf {
    let mut path = OsString::from(base.as_os_str());
    path.push(".");
    path.push(ext);
    PathBuf::from(path)
}

/// Render `<output_base>.png` with the `dot` executable, and also keep
/// `<output_base>.dot` when asked. Returns the PNG path.
pub async fn render_diagram(
    topology: &Topology,
    output_base: &Path,
    dot_command: &str,
    keep_dot: bool,
) -> Result<PathBuf, CoreError> {
    let source = to_dot(&build_graph(topology));

    if keep_dot {
        let dot_path = with_suffix(output_base, "dot");
        tokio::fs::write(&dot_path, &source).await?;
        debug!(path = %dot_path.display(), "wrote DOT source");
    }

    let png = with_suffix(output_base, "png");
    let mut child = Command::new(dot_command)
        .arg("-Tpng")
        .arg("-o")
        .arg(&png)
        .stdin(Stdio::piped())
        .stdout(Stdio::null())
        .stderr(Stdio::piped())
        .kill_on_drop(true)
        .spawn()
        .map_err(|e| CoreError::Render {
            message: format!("cannot run `{dot_command}`: {e}"),
        })?;

    if let Some(mut stdin) = child.stdin.take() {
        stdin.write_all(source.as_bytes()).await?;
    }

    let output = child.wait_with_output().await?;
    if !output.status.success() {
        return Err(CoreError::Render {
            message: format!(
                "`{dot_command}` exited with {}: {}",
                output.status,
                String::from_utf8_lossy(&output.stderr).trim()
            ),
        });
    }

    debug!(path = %png.display(), "rendered diagram");
    Ok(png)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::model::{Protocol, SwitchPorts};

    fn topology() -> Topology {
        let mut topo = Topology::new();
        topo.insert_switch(SwitchPorts {
            hostname: "leaf-1".into(),
            records: vec![
                PortRecord::neighbor("Eth1/49", "spine-1", Protocol::Cdp, DeviceType::Switch)
                    .with_mac(MacAddress::new("aa:aa:aa:aa:aa:01")),
                PortRecord {
                    connected_device: Some("esx-07".into()),
                    device_type: DeviceType::Server,
                    ..PortRecord::mac_only("Eth1/2", MacAddress::new("11:22:33:44:55:66"))
                },
                PortRecord::neighbor("Eth1/3", "printer", Protocol::Lldp, DeviceType::Unknown),
                // No connected device: not drawn.
                PortRecord::mac_only("Eth1/4", MacAddress::new("44:44:44:44:44:44")),
            ],
            ..SwitchPorts::default()
        });
        topo.insert_switch(SwitchPorts {
            hostname: "leaf-2".into(),
            records: vec![
                PortRecord::neighbor("Eth1/3", "printer", Protocol::Lldp, DeviceType::Unknown),
                PortRecord {
                    connected_device: Some("esx-07".into()),
                    device_type: DeviceType::Server,
                    ..PortRecord::mac_only("Eth1/2", MacAddress::new("11:22:33:44:55:67"))
                },
            ],
            ..SwitchPorts::default()
        });
        topo
    }

    #[test]
    fn nodes_and_edges() {
        let graph = build_graph(&topology());

        // leaf-1, leaf-2, spine-1, esx-07, and one unknown node per switch port.
        assert_eq!(graph.node_count(), 6);
        assert_eq!(graph.edge_count(), 5);

        let kinds = |k| graph.node_weights().filter(|n| n.kind == k).count();
        assert_eq!(kinds(NodeKind::Switch), 2);
        assert_eq!(kinds(NodeKind::Neighbor), 1);
        assert_eq!(kinds(NodeKind::Server), 1);
        assert_eq!(kinds(NodeKind::Unknown), 2);

        assert!(graph.node_weights().any(|n| n.label == "leaf-1\nNexus 9K"));
        assert!(graph.node_weights().any(|n| n.label == "Unknown Device\n"));
        assert!(
            graph
                .edge_weights()
                .any(|e| e == "Eth1/49\nMAC: AA:AA:AA:AA:AA:01\nCDP")
        );
        assert!(graph.edge_weights().any(|e| e == "Eth1/3\nLLDP"));
    }

    #[test]
    fn neighbor_that_is_also_collected_reuses_the_switch_node() {
        let mut topo = Topology::new();
        topo.insert_switch(SwitchPorts {
            hostname: "leaf-1".into(),
            records: vec![PortRecord::neighbor(
                "Eth1/49",
                "leaf-2",
                Protocol::Cdp,
                DeviceType::Switch,
            )],
            ..SwitchPorts::default()
        });
        topo.insert_switch(SwitchPorts {
            hostname: "leaf-2".into(),
            ..SwitchPorts::default()
        });

        let graph = build_graph(&topo);
        assert_eq!(graph.node_count(), 2);
        assert!(graph.node_weights().all(|n| n.kind == NodeKind::Switch));
    }

    #[test]
    fn dot_source_styles_nodes() {
        let dot = to_dot(&build_graph(&topology()));

        assert!(dot.starts_with("digraph {\n    rankdir=TB\n    node [shape=box]\n"));
        assert!(dot.trim_end().ends_with('}'));
        assert!(dot.contains(r#"label = "leaf-1\nNexus 9K" style = filled fillcolor = lightblue"#));
        assert!(dot.contains(r#"label = "esx-07" style = filled fillcolor = lightgreen"#));
        assert!(dot.contains(r#"label = "Unknown Device\n" style = filled fillcolor = lightgray"#));
        assert!(dot.contains(r#"label = "Eth1/2\nMAC: 11:22:33:44:55:66""#));
        assert!(dot.contains("->"));
    }

    #[test]
    fn labels_are_escaped() {
        assert_eq!(escape("a\"b\\c\nd"), "a\\\"b\\\\c\\nd");
    }

    #[tokio::test]
    async fn missing_graphviz_is_a_render_error_but_dot_is_kept() {
        let dir = tempfile::tempdir().unwrap();
        let base = dir.path().join("net");

        let result = render_diagram(&topology(), &base, "/nonexistent/graphviz/dot", true).await;

        assert!(matches!(result, Err(CoreError::Render { .. })), "got: {result:?}");
        let source = std::fs::read_to_string(dir.path().join("net.dot")).unwrap();
        assert!(source.contains("leaf-2"));
        assert!(!dir.path().join("net.png").exists());
    }

    #[test]
    fn suffix_is_appended_not_replaced() {
        assert_eq!(
            with_suffix(Path::new("out/net.v2"), "png"),
            PathBuf::from("out/net.v2.png")
        );
    }
}
