//! Command-line argument definitions for record binder
//!
//! This module defines the CLI interface using the clap derive API.

use crate::config::ParsingMode;
use crate::{Error, Result};
use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

/// CLI arguments for the record binder
///
/// Binds delimited text files to a TOML-described record layout and checks
/// every bound record against the layout's field constraints.
#[derive(Debug, Clone, Parser)]
#[command(
    name = "record-binder",
    version,
    about = "Bind delimited text files to typed records and validate them",
    long_about = "Parses delimited text files against a declarative TOML schema, converting each \
                  column to its declared type, and checks the resulting records against NotNull, \
                  Range and Regex constraints. Strict mode rejects a file at its first malformed \
                  line; lenient mode skips malformed lines and reports them."
)]
pub struct Args {
    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Available subcommands
#[derive(Debug, Clone, Subcommand)]
pub enum Commands {
    /// Parse and validate files against a schema document
    Check(CheckArgs),
    /// Show the bindings and constraints a schema document resolves to
    Schema(SchemaArgs),
}

/// Arguments for the check command
#[derive(Debug, Clone, Parser)]
pub struct CheckArgs {
    /// Input files or glob patterns
    #[arg(value_name = "FILES", required = true)]
    pub inputs: Vec<String>,

    /// Schema document describing the record layout
    #[arg(
        short = 's',
        long = "schema",
        value_name = "FILE",
        help = "Schema document (TOML format)"
    )]
    pub schema: PathBuf,

    /// Failure policy for malformed lines
    #[arg(
        short = 'm',
        long = "mode",
        value_enum,
        default_value_t = ParsingMode::Strict,
        help = "Parsing mode: strict aborts on the first bad line, lenient skips it"
    )]
    pub mode: ParsingMode,

    /// Only parse, do not run constraint checks
    #[arg(long = "no-validate", help = "Skip constraint validation")]
    pub no_validate: bool,

    /// Map unrecognized boolean tokens to false
    #[arg(
        long = "lenient-booleans",
        help = "Treat unrecognized boolean tokens as false instead of failing"
    )]
    pub lenient_booleans: bool,

    /// Report format
    #[arg(
        short = 'f',
        long = "format",
        value_enum,
        default_value = "human",
        help = "Output format for the check report"
    )]
    pub output_format: OutputFormat,

    /// Path to configuration file
    #[arg(
        short = 'c',
        long = "config",
        value_name = "FILE",
        help = "Path to configuration file (TOML format)"
    )]
    pub config_file: Option<PathBuf>,

    /// Logging verbosity level
    #[arg(
        short = 'v',
        long = "verbose",
        action = clap::ArgAction::Count,
        help = "Increase logging verbosity (-v: info, -vv: debug, -vvv: trace)"
    )]
    pub verbose: u8,

    /// Only show errors
    #[arg(
        short = 'q',
        long = "quiet",
        conflicts_with = "verbose",
        help = "Suppress all log output except errors"
    )]
    pub quiet: bool,
}

/// Arguments for the schema command
#[derive(Debug, Clone, Parser)]
pub struct SchemaArgs {
    /// Schema document to resolve
    #[arg(
        short = 's',
        long = "schema",
        value_name = "FILE",
        help = "Schema document (TOML format)"
    )]
    pub schema: PathBuf,

    /// Report format
    #[arg(
        short = 'f',
        long = "format",
        value_enum,
        default_value = "human",
        help = "Output format for the schema listing"
    )]
    pub output_format: OutputFormat,

    /// Logging verbosity level
    #[arg(
        short = 'v',
        long = "verbose",
        action = clap::ArgAction::Count,
        help = "Enable verbose logging (-v: info, -vv: debug, -vvv: trace)"
    )]
    pub verbose: u8,
}

/// Output format options
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable output
    Human,
    /// JSON format for scripting
    Json,
}

impl CheckArgs {
    /// Validate the check command arguments for consistency
    pub fn validate(&self) -> Result<()> {
        if !self.schema.exists() {
            return Err(Error::configuration(format!(
                "Schema file does not exist: {}",
                self.schema.display()
            )));
        }

        if let Some(config_file) = &self.config_file {
            if !config_file.exists() {
                return Err(Error::configuration(format!(
                    "Config file does not exist: {}",
                    config_file.display()
                )));
            }
        }

        if self.inputs.iter().any(|input| input.trim().is_empty()) {
            return Err(Error::configuration("Input paths must not be empty"));
        }

        Ok(())
    }

    /// Determine the appropriate log level based on verbosity flags
    pub fn get_log_level(&self) -> &'static str {
        if self.quiet {
            "error"
        } else {
            log_level(self.verbose)
        }
    }
}

impl SchemaArgs {
    /// Validate the schema command arguments
    pub fn validate(&self) -> Result<()> {
        if !self.schema.exists() {
            return Err(Error::configuration(format!(
                "Schema file does not exist: {}",
                self.schema.display()
            )));
        }
        Ok(())
    }

    pub fn get_log_level(&self) -> &'static str {
        log_level(self.verbose)
    }
}

fn log_level(verbose: u8) -> &'static str {
    match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    }
}
