//! Configuration validation.
//!
//! # Responsibilities
//! - Semantic validation (serde handles syntactic)
//! - Check the target URL is usable
//! - Validate value ranges (users > 0, spawn rate > 0, timeouts > 0)
//! - Check profile names against the built-in catalogue
//!
//! # Design Decisions
//! - Returns all validation errors, not just first
//! - Validation is pure function: SwarmConfig → Result<(), Vec<ValidationError>>

use thiserror::Error;
use url::Url;
use crate::config::schema::SwarmConfig;
use crate::profile;

const LOG_LEVELS: &[&str] = &["trace", "debug", "info", "warn", "error"];

/// A single semantic problem with a config.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ValidationError {
    #[error("target.host '{0}' is not a valid URL")]
    InvalidHost(String),

    #[error("target.host '{0}' must use http or https")]
    UnsupportedScheme(String),

    #[error("target.{0} must be greater than zero")]
    ZeroTimeout(&'static str),

    #[error("run.users must be greater than zero")]
    ZeroUsers,

    #[error("run.spawn_rate must be a positive number, got {0}")]
    InvalidSpawnRate(f64),

    #[error("run.run_time_secs must be greater than zero when set")]
    ZeroRunTime,

    #[error("profiles.enabled must name at least one profile")]
    NoProfiles,

    #[error("unknown profile '{0}'")]
    UnknownProfile(String),

    #[error("profile '{0}' is listed more than once")]
    DuplicateProfile(String),

    #[error("observability.log_level '{0}' is not one of trace, debug, info, warn, error")]
    InvalidLogLevel(String),
}

/// Check a config, collecting every problem found.
pub fn validate_config(config: &SwarmConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    match Url::parse(&config.target.host) {
        Ok(url) if url.scheme() != "http" && url.scheme() != "https" => {
            errors.push(ValidationError::UnsupportedScheme(config.target.host.clone()));
        }
        Ok(_) => {}
        Err(_) => errors.push(ValidationError::InvalidHost(config.target.host.clone())),
    }
    if config.target.connect_timeout_secs == 0 {
        errors.push(ValidationError::ZeroTimeout("connect_timeout_secs"));
    }
    if config.target.request_timeout_secs == 0 {
        errors.push(ValidationError::ZeroTimeout("request_timeout_secs"));
    }

    if config.run.users == 0 {
        errors.push(ValidationError::ZeroUsers);
    }
    if !(config.run.spawn_rate.is_finite() && config.run.spawn_rate > 0.0) {
        errors.push(ValidationError::InvalidSpawnRate(config.run.spawn_rate));
    }
    if config.run.run_time_secs == Some(0) {
        errors.push(ValidationError::ZeroRunTime);
    }

    if config.profiles.enabled.is_empty() {
        errors.push(ValidationError::NoProfiles);
    }
    let mut seen: Vec<&str> = Vec::new();
    for name in &config.profiles.enabled {
        match profile::find(name) {
            None => errors.push(ValidationError::UnknownProfile(name.clone())),
            Some(p) if seen.contains(&p.name) => {
                errors.push(ValidationError::DuplicateProfile(name.clone()));
            }
            Some(p) => seen.push(p.name),
        }
    }

    let level = config.observability.log_level.to_ascii_lowercase();
    if !LOG_LEVELS.contains(&level.as_str()) {
        errors.push(ValidationError::InvalidLogLevel(config.observability.log_level.clone()));
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        assert_eq!(validate_config(&SwarmConfig::default()), Ok(()));
    }

    #[test]
    fn test_reports_every_error() {
        let mut config = SwarmConfig::default();
        config.target.host = "ftp://files.example.com".into();
        config.target.request_timeout_secs = 0;
        config.run.users = 0;
        config.run.spawn_rate = f64::NAN;
        config.run.run_time_secs = Some(0);
        config.profiles.enabled = vec!["power".into(), "POWER".into(), "admin".into()];
        config.observability.log_level = "loud".into();

        let errors = validate_config(&config).unwrap_err();
        assert_eq!(errors.len(), 8, "{:?}", errors);
        assert_eq!(errors[0], ValidationError::UnsupportedScheme("ftp://files.example.com".into()));
        assert!(errors.contains(&ValidationError::ZeroTimeout("request_timeout_secs")));
        assert!(errors.contains(&ValidationError::ZeroUsers));
        assert!(errors.iter().any(|e| matches!(e, ValidationError::InvalidSpawnRate(r) if r.is_nan())));
        assert!(errors.contains(&ValidationError::ZeroRunTime));
        assert!(errors.contains(&ValidationError::DuplicateProfile("POWER".into())));
        assert!(errors.contains(&ValidationError::UnknownProfile("admin".into())));
        assert!(errors.contains(&ValidationError::InvalidLogLevel("loud".into())));
    }

    #[test]
    fn test_unparseable_host_and_no_profiles() {
        let mut config = SwarmConfig::default();
        config.target.host = "localhost 4567".into();
        config.profiles.enabled.clear();
        assert_eq!(
            validate_config(&config),
            Err(vec![
                ValidationError::InvalidHost("localhost 4567".into()),
                ValidationError::NoProfiles,
            ])
        );
    }
}
