//! Configuration schema definitions.
//!
//! All types derive Serde traits for deserialization from config files.
//! Every section defaults, so an empty file is a valid config.

use serde::{Deserialize, Serialize};

/// Root configuration for a swarm run.
#[derive(Debug, Clone, Deserialize, Serialize, Default, PartialEq)]
#[serde(default)]
pub struct SwarmConfig {
    /// Where requests go.
    pub target: TargetConfig,

    /// How many users, how fast, how long.
    pub run: RunConfig,

    /// Which built-in profiles take part.
    pub profiles: ProfilesConfig,

    /// Observability settings.
    pub observability: ObservabilityConfig,
}

/// Target application settings.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
#[serde(default)]
pub struct TargetConfig {
    /// Base URL, e.g. "http://localhost:4567".
    pub host: String,

    /// Connection establishment timeout in seconds.
    pub connect_timeout_secs: u64,

    /// Whole-request timeout in seconds.
    pub request_timeout_secs: u64,
}

impl Default for TargetConfig {
    fn default() -> Self {
        Self {
            host: "http://localhost:4567".to_string(),
            connect_timeout_secs: 5,
            request_timeout_secs: 30,
        }
    }
}

/// Population and duration of a run.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
#[serde(default)]
pub struct RunConfig {
    /// Total simulated users across all profiles.
    pub users: usize,

    /// Users started per second.
    pub spawn_rate: f64,

    /// Stop after this many seconds. Unset runs until Ctrl+C.
    pub run_time_secs: Option<u64>,

    /// Seed for reproducible task and path choices.
    pub seed: Option<u64>,
}

impl Default for RunConfig {
    fn default() -> Self {
        Self {
            users: 10,
            spawn_rate: 1.0,
            run_time_secs: None,
            seed: None,
        }
    }
}

/// Profile selection.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
#[serde(default)]
pub struct ProfilesConfig {
    /// Names of the built-in profiles to run.
    pub enabled: Vec<String>,
}

impl Default for ProfilesConfig {
    fn default() -> Self {
        Self {
            enabled: crate::profile::builtin()
                .iter()
                .map(|p| p.name.to_string())
                .collect(),
        }
    }
}

/// Observability configuration.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
#[serde(default)]
pub struct ObservabilityConfig {
    /// Log level (trace, debug, info, warn, error).
    pub log_level: String,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
        }
    }
}
