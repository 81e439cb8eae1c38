mod cli;
mod config;
mod error;
mod output;

use std::ffi::OsString;
use std::path::{Path, PathBuf};

use clap::Parser;
use tracing_subscriber::EnvFilter;

use swmap_core::{CoreError, MapOutput, Mapper, MapperConfig};

use crate::cli::{Cli, Command, GlobalOpts};
use crate::error::{CliError, exit_code};

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    init_tracing(cli.global.verbose, cli.global.quiet);

    let code = match run(cli).await {
        Ok(()) => exit_code::SUCCESS,
        Err(err) => {
            let code = err.exit_code();
            eprintln!("{:?}", miette::Report::new(err));
            code
        }
    };
    std::process::exit(code);
}

fn init_tracing(verbosity: u8, quiet: bool) {
    let filter = match (quiet, verbosity) {
        (true, _) => "error",
        (false, 0) => "warn",
        (false, 1) => "info",
        (false, 2) => "debug",
        _ => "trace",
    };

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter)),
        )
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

async fn run(cli: Cli) -> Result<(), CliError> {
    match cli.command {
        Some(Command::Completions(args)) => {
            use clap::CommandFactory;
            use clap_complete::generate;

            let mut cmd = Cli::command();
            generate(args.shell, &mut cmd, "swmap", &mut std::io::stdout());
            Ok(())
        }
        None => map(&cli.global).await,
    }
}

/// `<output>_report.txt`
fn report_path(output: &Path) -> PathBuf {
    let mut path = OsString::from(output.as_os_str());
    path.push("_report.txt");
    PathBuf::from(path)
}

async fn map(global: &GlobalOpts) -> Result<(), CliError> {
    let mapper_config = config::build_mapper_config(global)?;

    let result = run_mapper(mapper_config, &global.output).await;

    // The report file is always written; empty when the run failed.
    let report_path = report_path(&global.output);
    let report = result.as_ref().map(|o| o.report.as_str()).unwrap_or_default();
    tokio::fs::write(&report_path, report).await?;

    let color = output::should_color();
    let mapped = result.as_ref().ok();
    output::print_output(&output::render_completion(mapped, &report_path, global.quiet));
    if mapped.and_then(|o| o.diagram.as_ref()).is_none() {
        output::print_output(&output::diagram_warning(color));
    }

    result.map(|_| ()).map_err(CliError::from)
}

async fn run_mapper(config: MapperConfig, output: &Path) -> Result<MapOutput, CoreError> {
    let mapper = Mapper::new(config)?;
    mapper.map_network(output).await
}
