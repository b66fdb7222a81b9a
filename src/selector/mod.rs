//! Weighted task selection.
//!
//! # Responsibilities
//! - Turn a profile's task weights into a sampling distribution
//! - Pick a task index per iteration: P(i) = w_i / Σw
//!
//! # Design Decisions
//! - Built once per simulated user, sampled many times
//! - Zero weights are rejected up front rather than silently never chosen
//! - The caller owns the RNG so seeded runs are reproducible

use rand::distributions::{Distribution, WeightedIndex};
use rand::Rng;
use thiserror::Error;

/// Reasons a weight list cannot be sampled.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SelectorError {
    #[error("no weights to select from")]
    Empty,

    #[error("weight at index {0} is zero")]
    ZeroWeight(usize),
}

/// Samples task indices proportionally to their weights.
#[derive(Debug, Clone)]
pub struct TaskSelector {
    index: WeightedIndex<u32>,
}

impl TaskSelector {
    pub fn new(weights: &[u32]) -> Result<Self, SelectorError> {
        if weights.is_empty() {
            return Err(SelectorError::Empty);
        }
        if let Some(pos) = weights.iter().position(|w| *w == 0) {
            return Err(SelectorError::ZeroWeight(pos));
        }
        // Non-empty and all positive, so WeightedIndex cannot fail except on overflow.
        let index = WeightedIndex::new(weights).map_err(|_| SelectorError::Empty)?;
        Ok(Self { index })
    }

    pub fn select<R: Rng + ?Sized>(&self, rng: &mut R) -> usize {
        self.index.sample(rng)
    }
}
