// ── Reporters ──
//
// Read-only views over a reconciled `Topology`: the plain-text report and
// the Graphviz diagram.

pub mod diagram;
pub mod text;

pub use diagram::{DiagramGraph, build_graph, render_diagram, to_dot};
pub use text::{generate_text_report, port_line};
