//! Terminal output: completion messages, the per-switch summary table,
//! and the diagram warning.

use std::io::{self, IsTerminal, Write};
use std::path::Path;

use owo_colors::OwoColorize;
use tabled::{Table, Tabled, settings::Style};

use swmap_core::{MapOutput, SwitchSummary};

/// Color only on an interactive stdout, and never with `NO_COLOR` set.
pub fn should_color() -> bool {
    io::stdout().is_terminal() && std::env::var_os("NO_COLOR").is_none()
}

#[derive(Tabled)]
struct SummaryRow {
    #[tabled(rename = "Switch")]
    hostname: String,
    #[tabled(rename = "Switches")]
    switches: usize,
    #[tabled(rename = "Servers")]
    servers: usize,
    #[tabled(rename = "Unknown")]
    unknown: usize,
    #[tabled(rename = "Active ports")]
    active_ports: usize,
}

impl From<&SwitchSummary> for SummaryRow {
    fn from(s: &SwitchSummary) -> Self {
        Self {
            hostname: s.hostname.clone(),
            switches: s.switches,
            servers: s.servers,
            unknown: s.unknown,
            active_ports: s.active_ports,
        }
    }
}

pub fn render_summary(summary: &[SwitchSummary]) -> String {
    let rows: Vec<SummaryRow> = summary.iter().map(SummaryRow::from).collect();
    Table::new(rows).with(Style::rounded()).to_string()
}

/// Everything printed after a run. `output` is `None` when the run
/// itself failed and only the (empty) report was written.
pub fn render_completion(output: Option<&MapOutput>, report_path: &Path, quiet: bool) -> String {
    let mut lines = Vec::new();

    if !quiet {
        lines.push(String::new());
        lines.push("Network mapping complete!".to_owned());
        if let Some(diagram) = output.and_then(|o| o.diagram.as_ref()) {
            lines.push(format!("Diagram saved to: {}", diagram.display()));
        }
        lines.push(format!("Text report saved to: {}", report_path.display()));

        if let Some(out) = output {
            if !out.unreachable.is_empty() {
                lines.push(format!("Unreachable switches: {}", out.unreachable.join(", ")));
            }
            if !out.summary.is_empty() {
                lines.push(String::new());
                lines.push(render_summary(&out.summary));
            }
        }
    }

    lines.join("\n")
}

/// Printed whenever no diagram was produced, even in quiet mode.
pub fn diagram_warning(color: bool) -> String {
    let text = "Warning: Failed to generate diagram";
    if color {
        format!("\n{}", text.yellow().bold())
    } else {
        format!("\n{text}")
    }
}

/// Print to stdout, skipping empty output.
pub fn print_output(output: &str) {
    if output.is_empty() {
        return;
    }
    let mut stdout = io::stdout().lock();
    let _ = writeln!(stdout, "{output}");
}
