//! Configuration loading from disk.

use std::path::Path;
use std::fs;
use thiserror::Error;
use crate::config::schema::SwarmConfig;
use crate::config::validation::ValidationError;

/// Error type for configuration loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Parse error: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Validation failed: {}", join(.0))]
    Validation(Vec<ValidationError>),
}

fn join(errors: &[ValidationError]) -> String {
    errors.iter().map(|e| e.to_string()).collect::<Vec<_>>().join(", ")
}

/// Parse a TOML document without validating it.
pub fn parse_config(content: &str) -> Result<SwarmConfig, ConfigError> {
    Ok(toml::from_str(content)?)
}

/// Read and parse a TOML file, leaving validation to the caller.
///
/// CLI flags are applied on top before validating.
pub fn read_config(path: &Path) -> Result<SwarmConfig, ConfigError> {
    let content = fs::read_to_string(path)?;
    parse_config(&content)
}
