//! User-behaviour profiles.
//!
//! # Data Flow
//! ```text
//! catalog.rs (built-in STANDARD / POWER / SLOW)
//!     → UserProfile::validate (weights, wait range, paths)
//!     → swarm allocates users by profile weight
//!     → selector picks a TaskEntry by task weight
//!     → task.rs resolves Steps into concrete GET paths
//!     → wait.rs samples the think time before the next pick
//! ```
//!
//! # Design Decisions
//! - Profiles are plain `'static` data; behaviour lives in the user loop
//! - Validation reports every problem, not just the first
//! - Error-status responses are expected for missing-page tasks, never fatal

pub mod catalog;
pub mod task;
pub mod wait;

pub use catalog::{builtin, find, POWER_USER, SLOW_USER, STANDARD_USER};
pub use task::{Step, TaskEntry};
pub use wait::WaitTime;

use thiserror::Error;

/// A named bundle of think time, spawn weight and weighted tasks.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct UserProfile {
    pub name: &'static str,
    pub description: &'static str,
    pub wait: WaitTime,
    /// Relative number of users spawned with this profile.
    pub weight: u32,
    pub tasks: &'static [TaskEntry],
}

/// A broken profile invariant.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ProfileError {
    #[error("profile '{profile}' has zero weight")]
    ZeroProfileWeight { profile: &'static str },

    #[error("profile '{profile}' declares no tasks")]
    NoTasks { profile: &'static str },

    #[error("profile '{profile}' has invalid wait range {wait}")]
    InvalidWait { profile: &'static str, wait: WaitTime },

    #[error("task '{task}' in profile '{profile}' has zero weight")]
    ZeroTaskWeight { profile: &'static str, task: &'static str },

    #[error("task '{task}' in profile '{profile}' issues no requests")]
    NoSteps { profile: &'static str, task: &'static str },

    #[error("task '{task}' in profile '{profile}' has path '{path}' not starting with '/'")]
    RelativePath {
        profile: &'static str,
        task: &'static str,
        path: &'static str,
    },
}

impl UserProfile {
    /// Task weights in declaration order.
    pub fn task_weights(&self) -> Vec<u32> {
        self.tasks.iter().map(|t| t.weight).collect()
    }

    pub fn task(&self, name: &str) -> Option<&'static TaskEntry> {
        self.tasks.iter().find(|t| t.name == name)
    }

    /// Check the profile invariants, collecting every violation.
    pub fn validate(&self) -> Result<(), Vec<ProfileError>> {
        let profile = self.name;
        let mut errors = Vec::new();

        if self.weight == 0 {
            errors.push(ProfileError::ZeroProfileWeight { profile });
        }
        if !self.wait.is_valid() {
            errors.push(ProfileError::InvalidWait { profile, wait: self.wait });
        }
        if self.tasks.is_empty() {
            errors.push(ProfileError::NoTasks { profile });
        }

        for task in self.tasks {
            if task.weight == 0 {
                errors.push(ProfileError::ZeroTaskWeight { profile, task: task.name });
            }
            if task.steps.is_empty() {
                errors.push(ProfileError::NoSteps { profile, task: task.name });
            }
            for step in task.steps {
                for &path in step.candidates() {
                    if !path.starts_with('/') {
                        errors.push(ProfileError::RelativePath {
                            profile,
                            task: task.name,
                            path,
                        });
                    }
                }
            }
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }
}
