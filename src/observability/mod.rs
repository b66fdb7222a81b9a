//! Observability subsystem.
//!
//! # Data Flow
//! ```text
//! user / swarm / client produce:
//!     → tracing events with structured fields (user, task, path, status)
//!     → logging.rs (subscriber, filter, formatting)
//! ```
//!
//! # Design Decisions
//! - Per-request events at debug, failures at warn, run summary at info
//! - No exporters; the run tally is the only aggregate

pub mod logging;
