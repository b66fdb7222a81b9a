//! Swarm driver.
//!
//! # Data Flow
//! ```text
//! SwarmConfig
//!     → SwarmPlan (resolved profiles, user count, spawn rate, deadline, seed)
//!     → allocate_users (split users by profile weight)
//!     → spawn_order (interleave profiles)
//!     → one tokio task per SimulatedUser, paced by spawn_rate
//!     → deadline or Ctrl+C triggers Shutdown
//!     → join users → TallySnapshot
//! ```
//!
//! # Design Decisions
//! - Profiles are validated before the first user starts
//! - Largest-remainder allocation, ties go to the earlier profile
//! - Interleaved spawning so a partial ramp-up keeps the profile mix
//! - A seeded run gives user `i` the seed `seed + i`

pub mod tally;

use std::sync::Arc;
use std::time::{Duration, Instant};
use futures_util::future::join_all;
use thiserror::Error;

use crate::client::{ClientError, HttpSink, RequestSink};
use crate::config::SwarmConfig;
use crate::lifecycle::Shutdown;
use crate::profile::{self, ProfileError, UserProfile};
use crate::selector::SelectorError;
use crate::user::SimulatedUser;

pub use tally::{RunTally, TallySnapshot};

/// Errors that prevent a run from starting.
#[derive(Debug, Error)]
pub enum SwarmError {
    #[error("no profiles selected")]
    NoProfiles,

    #[error("unknown profile '{0}'")]
    UnknownProfile(String),

    #[error("invalid profile: {}", join_errors(.0))]
    InvalidProfile(Vec<ProfileError>),

    #[error(transparent)]
    Selector(#[from] SelectorError),

    #[error(transparent)]
    Client(#[from] ClientError),
}

fn join_errors(errors: &[ProfileError]) -> String {
    errors.iter().map(|e| e.to_string()).collect::<Vec<_>>().join(", ")
}

/// Resolved parameters for one run.
#[derive(Debug, Clone)]
pub struct SwarmPlan {
    pub profiles: Vec<&'static UserProfile>,
    pub users: usize,
    /// Users started per second.
    pub spawn_rate: f64,
    /// `None` runs until shutdown is triggered externally.
    pub run_time: Option<Duration>,
    pub seed: Option<u64>,
}

impl SwarmPlan {
    pub fn from_config(config: &SwarmConfig) -> Result<Self, SwarmError> {
        let profiles = config
            .profiles
            .enabled
            .iter()
            .map(|name| profile::find(name).ok_or_else(|| SwarmError::UnknownProfile(name.clone())))
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Self {
            profiles,
            users: config.run.users,
            spawn_rate: config.run.spawn_rate,
            run_time: config.run.run_time_secs.map(Duration::from_secs),
            seed: config.run.seed,
        })
    }
}

/// Split `total` users across weights by largest remainder.
pub fn allocate_users(total: usize, weights: &[u32]) -> Vec<usize> {
    let sum: u64 = weights.iter().map(|w| *w as u64).sum();
    if sum == 0 {
        return vec![0; weights.len()];
    }

    let total_u64 = total as u64;
    let mut counts: Vec<usize> = weights
        .iter()
        .map(|w| (total_u64 * *w as u64 / sum) as usize)
        .collect();

    let mut remainders: Vec<(u64, usize)> = weights
        .iter()
        .enumerate()
        .map(|(i, w)| ((total_u64 * *w as u64) % sum, i))
        .collect();
    remainders.sort_by(|a, b| b.0.cmp(&a.0).then(a.1.cmp(&b.1)));

    let assigned: usize = counts.iter().sum();
    for (_, i) in remainders.into_iter().take(total - assigned) {
        counts[i] += 1;
    }
    counts
}

/// Round-robin over profile indices until every allocation is used up.
pub fn spawn_order(counts: &[usize]) -> Vec<usize> {
    let mut remaining = counts.to_vec();
    let mut order = Vec::with_capacity(counts.iter().sum());
    while remaining.iter().any(|c| *c > 0) {
        for (i, left) in remaining.iter_mut().enumerate() {
            if *left > 0 {
                *left -= 1;
                order.push(i);
            }
        }
    }
    order
}

/// Delay between user starts for `rate` users per second.
///
/// Non-positive or non-finite rates spawn everyone at once; rates so small the
/// delay overflows a `Duration` wait forever (until shutdown).
pub fn spawn_interval(rate: f64) -> Duration {
    if !(rate.is_finite() && rate > 0.0) {
        return Duration::ZERO;
    }
    Duration::try_from_secs_f64(1.0 / rate).unwrap_or(Duration::MAX)
}

/// A population of simulated users sharing one sink and one tally.
pub struct Swarm<S: RequestSink> {
    plan: SwarmPlan,
    sink: Arc<S>,
    tally: Arc<RunTally>,
    shutdown: Arc<Shutdown>,
}

impl Swarm<HttpSink> {
    /// Build a swarm that sends real HTTP requests to the configured target.
    pub fn from_config(config: &SwarmConfig, shutdown: Arc<Shutdown>) -> Result<Self, SwarmError> {
        let sink = HttpSink::new(
            &config.target.host,
            Duration::from_secs(config.target.connect_timeout_secs),
            Duration::from_secs(config.target.request_timeout_secs),
        )?;
        Self::new(SwarmPlan::from_config(config)?, Arc::new(sink), shutdown)
    }
}

impl<S: RequestSink> Swarm<S> {
    pub fn new(plan: SwarmPlan, sink: Arc<S>, shutdown: Arc<Shutdown>) -> Result<Self, SwarmError> {
        if plan.profiles.is_empty() {
            return Err(SwarmError::NoProfiles);
        }

        let errors: Vec<ProfileError> = plan
            .profiles
            .iter()
            .filter_map(|p| p.validate().err())
            .flatten()
            .collect();
        if !errors.is_empty() {
            return Err(SwarmError::InvalidProfile(errors));
        }

        Ok(Self {
            plan,
            sink,
            tally: Arc::new(RunTally::new()),
            shutdown,
        })
    }

    pub fn tally(&self) -> Arc<RunTally> {
        self.tally.clone()
    }

    /// Spawn the users, wait for shutdown, join everyone and return the final tally.
    pub async fn run(self) -> Result<TallySnapshot, SwarmError> {
        let started = Instant::now();
        let weights: Vec<u32> = self.plan.profiles.iter().map(|p| p.weight).collect();
        let counts = allocate_users(self.plan.users, &weights);

        for (profile, count) in self.plan.profiles.iter().zip(&counts) {
            tracing::info!(profile = profile.name, users = count, wait = %profile.wait, "Profile allocation");
        }

        let mut control = self.shutdown.subscribe();

        let deadline = self.plan.run_time.map(|run_time| {
            let shutdown = self.shutdown.clone();
            let mut rx = shutdown.subscribe();
            tokio::spawn(async move {
                if shutdown.is_triggered() {
                    return;
                }
                tokio::select! {
                    _ = tokio::time::sleep(run_time) => {
                        tracing::info!(run_time_secs = run_time.as_secs_f64(), "Run time elapsed");
                        shutdown.trigger();
                    }
                    _ = rx.recv() => {}
                }
            })
        });

        let interval = spawn_interval(self.plan.spawn_rate);

        let mut handles = Vec::with_capacity(self.plan.users);
        for (id, profile_idx) in spawn_order(&counts).into_iter().enumerate() {
            if id > 0 && !interval.is_zero() {
                tokio::select! {
                    _ = control.recv() => break,
                    _ = tokio::time::sleep(interval) => {}
                }
            }

            let rx = self.shutdown.subscribe();
            if self.shutdown.is_triggered() {
                break;
            }

            let seed = self.plan.seed.map(|s| s.wrapping_add(id as u64));
            let user = SimulatedUser::new(
                id,
                self.plan.profiles[profile_idx],
                seed,
                self.sink.clone(),
                self.tally.clone(),
            )?;
            handles.push(tokio::spawn(user.run(rx)));
        }

        tracing::info!(
            spawned = handles.len(),
            elapsed_ms = started.elapsed().as_millis() as u64,
            "Spawning finished"
        );

        if !self.shutdown.is_triggered() {
            let _ = control.recv().await;
        }

        for result in join_all(handles).await {
            if let Err(e) = result {
                tracing::error!(error = %e, "User task panicked");
            }
        }
        if let Some(deadline) = deadline {
            let _ = deadline.await;
        }

        let snapshot = self.tally.snapshot();
        tracing::info!(
            duration_secs = started.elapsed().as_secs_f64(),
            tasks = snapshot.tasks,
            requests = snapshot.requests,
            success = snapshot.success,
            expected_errors = snapshot.expected_errors,
            unexpected_errors = snapshot.unexpected_errors,
            transport_failures = snapshot.transport_failures,
            failures = snapshot.failures(),
            "Run complete"
        );
        Ok(snapshot)
    }
}
