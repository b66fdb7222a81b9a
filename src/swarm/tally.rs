//! Outcome tally for a run.

use std::sync::atomic::{AtomicU64, Ordering};
use serde::Serialize;
use crate::client::RequestOutcome;

/// Lock-free counters shared by every simulated user.
#[derive(Debug, Default)]
pub struct RunTally {
    requests: AtomicU64,
    success: AtomicU64,
    expected_errors: AtomicU64,
    unexpected_errors: AtomicU64,
    transport_failures: AtomicU64,
    tasks: AtomicU64,
}

/// Point-in-time copy of a [`RunTally`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct TallySnapshot {
    pub tasks: u64,
    pub requests: u64,
    pub success: u64,
    pub expected_errors: u64,
    pub unexpected_errors: u64,
    pub transport_failures: u64,
}

impl RunTally {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record_task(&self) {
        self.tasks.fetch_add(1, Ordering::Relaxed);
    }

    /// Count one request. `expects_error` marks tasks whose 4xx/5xx answers are the goal.
    pub fn record(&self, outcome: &RequestOutcome, expects_error: bool) {
        self.requests.fetch_add(1, Ordering::Relaxed);
        let bucket = match outcome {
            RequestOutcome::Failed { .. } => &self.transport_failures,
            o if o.is_error_status() && expects_error => &self.expected_errors,
            o if o.is_error_status() => &self.unexpected_errors,
            _ => &self.success,
        };
        bucket.fetch_add(1, Ordering::Relaxed);
    }

    pub fn snapshot(&self) -> TallySnapshot {
        TallySnapshot {
            tasks: self.tasks.load(Ordering::Relaxed),
            requests: self.requests.load(Ordering::Relaxed),
            success: self.success.load(Ordering::Relaxed),
            expected_errors: self.expected_errors.load(Ordering::Relaxed),
            unexpected_errors: self.unexpected_errors.load(Ordering::Relaxed),
            transport_failures: self.transport_failures.load(Ordering::Relaxed),
        }
    }
}

impl TallySnapshot {
    /// Requests that count against the target: unexpected error statuses and transport failures.
    pub fn failures(&self) -> u64 {
        self.unexpected_errors + self.transport_failures
    }
}
