//! Config file → `MapperConfig`, with command-line overrides applied.

use std::time::Duration;

use tracing::info;

use swmap_config::{ensure_config_file, load_config, to_mapper_config};
use swmap_core::{MapperConfig, TlsVerification};

use crate::cli::GlobalOpts;
use crate::error::CliError;

/// Load (creating a sample file first if needed) and apply CLI flags.
pub fn build_mapper_config(global: &GlobalOpts) -> Result<MapperConfig, CliError> {
    let path = &global.config;

    if ensure_config_file(path).map_err(|e| CliError::from_config(e, path))? {
        info!(path = %path.display(), "created default configuration");
        if !global.quiet {
            eprintln!("Created default configuration at {}", path.display());
        }
    }

    let cfg = load_config(path).map_err(|e| CliError::from_config(e, path))?;
    let mut mapper = to_mapper_config(&cfg).map_err(|e| CliError::from_config(e, path))?;
    apply_overrides(&mut mapper, global);

    info!(
        switches = mapper.switches.len(),
        bmcs = mapper.bmcs.len(),
        "loaded configuration"
    );
    Ok(mapper)
}

fn apply_overrides(mapper: &mut MapperConfig, global: &GlobalOpts) {
    if global.insecure {
        mapper.tls = TlsVerification::DangerAcceptInvalid;
    }
    if let Some(secs) = global.timeout {
        mapper.timeout = Duration::from_secs(secs);
    }
    mapper.keep_dot = global.keep_dot;
}

#[cfg(test)]
mod tests {
    use std::path::PathBuf;

    use super::*;

    fn opts() -> GlobalOpts {
        GlobalOpts {
            config: PathBuf::from("config.yaml"),
            output: PathBuf::from("network_diagram"),
            keep_dot: false,
            insecure: false,
            timeout: None,
            verbose: 0,
            quiet: true,
        }
    }

    #[test]
    fn flags_override_file_settings() {
        let mut mapper = MapperConfig {
            tls: TlsVerification::SystemDefaults,
            ..MapperConfig::default()
        };
        let global = GlobalOpts {
            insecure: true,
            timeout: Some(3),
            keep_dot: true,
            ..opts()
        };

        apply_overrides(&mut mapper, &global);

        assert_eq!(mapper.tls, TlsVerification::DangerAcceptInvalid);
        assert_eq!(mapper.timeout, Duration::from_secs(3));
        assert!(mapper.keep_dot);
    }

    #[test]
    fn absent_flags_keep_file_settings() {
        let mut mapper = MapperConfig {
            tls: TlsVerification::SystemDefaults,
            timeout: Duration::from_secs(12),
            ..MapperConfig::default()
        };

        apply_overrides(&mut mapper, &opts());

        assert_eq!(mapper.tls, TlsVerification::SystemDefaults);
        assert_eq!(mapper.timeout, Duration::from_secs(12));
        assert!(!mapper.keep_dot);
    }
}
