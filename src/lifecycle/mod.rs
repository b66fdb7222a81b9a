//! Lifecycle management subsystem.
//!
//! # Data Flow
//! ```text
//! Shutdown (shutdown.rs):
//!     run-time deadline or signal → trigger → spawner stops → users exit → join
//!
//! Signals (signals.rs):
//!     SIGINT (Ctrl+C) → trigger graceful shutdown
//! ```
//!
//! # Design Decisions
//! - One broadcast for every stop reason; users don't care why
//! - In-flight requests are abandoned, not drained

pub mod shutdown;
pub mod signals;

pub use shutdown::Shutdown;
