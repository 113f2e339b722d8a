//! Shared components for CLI commands
//!
//! This module contains the command summary type, logging setup, config
//! loading and input expansion used by the command implementations.

use crate::cli::args::CheckArgs;
use crate::config::MapperConfig;
use crate::{Error, Result};
use std::path::PathBuf;
use tracing::debug;

/// Summary returned by every command
#[derive(Debug, Clone, Default)]
pub struct CommandStats {
    /// Number of input files examined
    pub files_checked: usize,
    /// Files that could not be parsed
    pub files_failed: usize,
    /// Records bound across all files
    pub records_parsed: usize,
    /// Lines skipped in lenient mode
    pub lines_skipped: usize,
    /// Records that failed at least one constraint
    pub invalid_records: usize,
}

impl CommandStats {
    /// Whether the command should exit successfully
    pub fn is_success(&self) -> bool {
        self.files_failed == 0 && self.invalid_records == 0
    }
}

/// Set up structured logging on stderr
pub fn setup_logging(log_level: &str, quiet: bool) -> Result<()> {
    use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("record_binder={}", log_level)));

    let registry = tracing_subscriber::registry().with(filter);
    let result = if quiet {
        registry
            .with(
                fmt::layer()
                    .with_target(false)
                    .with_level(true)
                    .with_writer(std::io::stderr)
                    .compact(),
            )
            .try_init()
    } else {
        registry
            .with(
                fmt::layer()
                    .with_target(false)
                    .with_level(true)
                    .with_timer(fmt::time::uptime())
                    .with_writer(std::io::stderr),
            )
            .try_init()
    };
    result.map_err(|e| Error::configuration(format!("Failed to initialize logging: {}", e)))?;

    debug!("Logging initialized at level: {}", log_level);
    Ok(())
}

/// Load mapper configuration (file, then command-line overrides)
pub fn load_config(args: &CheckArgs) -> Result<MapperConfig> {
    let mut config = match &args.config_file {
        Some(path) => MapperConfig::from_file(path)?,
        None => MapperConfig::default(),
    };

    if args.lenient_booleans {
        config = config.with_lenient_booleans(true);
    }

    config.validate()?;
    debug!("Mapper configuration: {:?}", config);
    Ok(config)
}

/// Expand input arguments into file paths
///
/// Arguments containing glob metacharacters are expanded and must match at
/// least one file; other arguments are taken as literal paths.
pub fn expand_inputs(inputs: &[String]) -> Result<Vec<PathBuf>> {
    let mut files = Vec::new();

    for input in inputs {
        if !is_glob_pattern(input) {
            files.push(PathBuf::from(input));
            continue;
        }

        let entries = glob::glob(input).map_err(|e| {
            Error::configuration(format!("Invalid glob pattern '{}': {}", input, e))
        })?;

        let before = files.len();
        for entry in entries {
            match entry {
                Ok(path) if path.is_file() => files.push(path),
                Ok(_) => {}
                Err(e) => {
                    let message = format!("Failed to read {}", e.path().display());
                    return Err(Error::io(message, std::io::Error::from(e)));
                }
            }
        }

        if files.len() == before {
            return Err(Error::configuration(format!(
                "No files match pattern '{}'",
                input
            )));
        }
        debug!("Pattern '{}' matched {} file(s)", input, files.len() - before);
    }

    Ok(files)
}

fn is_glob_pattern(input: &str) -> bool {
    input.contains(['*', '?', '['])
}
