//! Clap derive structures for the `swmap` CLI.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

// ── Top-Level CLI ────────────────────────────────────────────────────

/// swmap -- map Nexus switch ports to the servers behind them
#[derive(Debug, Parser)]
#[command(
    name = "swmap",
    version,
    about = "Map Nexus switch connections and generate diagrams",
    long_about = "Collects CDP/LLDP neighbors and MAC address tables from NX-API switches,\n\
        resolves unknown ports to servers using NIC MACs reported by iLO/iDRAC\n\
        BMCs over Redfish, and writes a topology diagram plus a text report.",
    propagate_version = true
)]
pub struct Cli {
    #[command(flatten)]
    pub global: GlobalOpts,

    #[command(subcommand)]
    pub command: Option<Command>,
}

// ── Global Options ───────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct GlobalOpts {
    /// Path to configuration file (created with sample entries if missing)
    #[arg(long, short = 'c', env = "SWMAP_CONFIG", default_value = "config.yaml")]
    pub config: PathBuf,

    /// Output file base name (without extension)
    #[arg(long, short = 'o', default_value = "network_diagram")]
    pub output: PathBuf,

    /// Also keep the Graphviz source as <output>.dot
    #[arg(long)]
    pub keep_dot: bool,

    /// Accept self-signed TLS certificates (overrides settings.insecure)
    #[arg(long, short = 'k')]
    pub insecure: bool,

    /// Request timeout in seconds (overrides settings.timeout)
    #[arg(long)]
    pub timeout: Option<u64>,

    /// Increase verbosity (-v, -vv, -vvv)
    #[arg(long, short = 'v', action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress non-error output
    #[arg(long, short = 'q', global = true)]
    pub quiet: bool,
}

// ── Subcommands ──────────────────────────────────────────────────────

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Generate shell completions
    Completions(CompletionsArgs),
}

#[derive(Debug, Args)]
pub struct CompletionsArgs {
    /// Shell to generate completions for
    pub shell: clap_complete::Shell,
}
