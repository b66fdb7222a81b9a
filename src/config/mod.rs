//! Configuration management subsystem.
//!
//! # Data Flow
//! ```text
//! config file (TOML, optional)
//!     → loader.rs (parse & deserialize)
//!     → CLI flags override individual fields
//!     → validation.rs (semantic checks)
//!     → SwarmConfig (validated, immutable)
//!     → SwarmPlan for the run
//! ```
//!
//! # Design Decisions
//! - Config is immutable once the run starts
//! - All fields have defaults to allow minimal configs
//! - Validation separates syntactic (serde) from semantic checks

pub mod loader;
pub mod schema;
pub mod validation;

pub use loader::{parse_config, read_config, ConfigError};
pub use schema::{ObservabilityConfig, ProfilesConfig, RunConfig, SwarmConfig, TargetConfig};
pub use validation::{validate_config, ValidationError};
