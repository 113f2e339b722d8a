//! Configuration management and validation.
//!
//! Provides the parsing mode selector and the mapper configuration that
//! controls conversion leniency and how much error detail parse statistics
//! retain. Configuration can be loaded from a TOML file.

use crate::constants::{DEFAULT_MAX_RECORDED_ERRORS, MAX_RECORDED_ERRORS_LIMIT};
use crate::{Error, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::Path;
use tracing::debug;

/// Failure policy applied across a whole file
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, clap::ValueEnum,
)]
#[serde(rename_all = "lowercase")]
pub enum ParsingMode {
    /// Any malformed line aborts the parse and nothing is returned
    #[default]
    Strict,
    /// Malformed lines are logged and skipped
    Lenient,
}

impl fmt::Display for ParsingMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ParsingMode::Strict => f.write_str("strict"),
            ParsingMode::Lenient => f.write_str("lenient"),
        }
    }
}

/// Options forwarded to the type converter
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ConversionOptions {
    /// Map unrecognized boolean tokens to `false` instead of failing
    pub lenient_booleans: bool,
}

/// Record mapper configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MapperConfig {
    /// Converter behaviour
    #[serde(flatten)]
    pub conversion: ConversionOptions,

    /// Maximum number of error strings retained in parse statistics
    pub max_recorded_errors: usize,
}

impl Default for MapperConfig {
    fn default() -> Self {
        Self {
            conversion: ConversionOptions::default(),
            max_recorded_errors: DEFAULT_MAX_RECORDED_ERRORS,
        }
    }
}

impl MapperConfig {
    /// Load configuration from a TOML file and validate it
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            Error::io(format!("Failed to read config {}", path.display()), e)
        })?;
        let config = Self::from_toml_str(&content)?;
        debug!("Loaded mapper configuration from {}", path.display());
        Ok(config)
    }

    /// Parse configuration from TOML text and validate it
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let config: Self = toml::from_str(content)
            .map_err(|e| Error::configuration(format!("Invalid configuration: {}", e)))?;
        config.validate()?;
        Ok(config)
    }

    /// Enable or disable lenient boolean conversion
    pub fn with_lenient_booleans(mut self, lenient: bool) -> Self {
        self.conversion.lenient_booleans = lenient;
        self
    }

    /// Validate configuration values
    pub fn validate(&self) -> Result<()> {
        if self.max_recorded_errors > MAX_RECORDED_ERRORS_LIMIT {
            return Err(Error::configuration(format!(
                "max_recorded_errors must not exceed {} (got {})",
                MAX_RECORDED_ERRORS_LIMIT, self.max_recorded_errors
            )));
        }
        Ok(())
    }
}
