//! Route Swarm Load Generator Library

pub mod paths;
pub mod profile;
pub mod selector;
pub mod client;
pub mod user;
pub mod swarm;
pub mod config;
pub mod lifecycle;
pub mod observability;

pub use config::SwarmConfig;
pub use lifecycle::Shutdown;
pub use swarm::{Swarm, SwarmPlan, TallySnapshot};
