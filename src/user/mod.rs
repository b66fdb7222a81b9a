//! Simulated user.
//!
//! # Responsibilities
//! - Pick a task by weight, run its GETs in order, record each outcome
//! - Sleep the profile's think time between tasks
//! - Stop promptly on shutdown, mid-request or mid-wait

use std::sync::Arc;
use rand::rngs::StdRng;
use rand::SeedableRng;
use tokio::sync::broadcast;

use crate::client::{RequestOutcome, RequestSink};
use crate::profile::UserProfile;
use crate::selector::{SelectorError, TaskSelector};
use crate::swarm::RunTally;

/// What one task invocation did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaskRun {
    pub task: &'static str,
    pub requests: Vec<(&'static str, RequestOutcome)>,
}

/// One virtual user bound to a profile.
pub struct SimulatedUser<S: RequestSink> {
    id: usize,
    profile: &'static UserProfile,
    selector: TaskSelector,
    rng: StdRng,
    sink: Arc<S>,
    tally: Arc<RunTally>,
}

impl<S: RequestSink> SimulatedUser<S> {
    /// Build a user. A `seed` makes its task and path choices reproducible.
    pub fn new(
        id: usize,
        profile: &'static UserProfile,
        seed: Option<u64>,
        sink: Arc<S>,
        tally: Arc<RunTally>,
    ) -> Result<Self, SelectorError> {
        let selector = TaskSelector::new(&profile.task_weights())?;
        let rng = match seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        Ok(Self {
            id,
            profile,
            selector,
            rng,
            sink,
            tally,
        })
    }

    /// Select and run a single task.
    pub async fn run_once(&mut self) -> TaskRun {
        let task = &self.profile.tasks[self.selector.select(&mut self.rng)];
        let plan = task.plan(&mut self.rng);
        self.tally.record_task();

        let mut requests = Vec::with_capacity(plan.len());
        for path in plan {
            let outcome = self.sink.get(path).await;
            self.tally.record(&outcome, task.expects_error);

            match outcome {
                RequestOutcome::Status { code, elapsed } if outcome.is_error_status() && !task.expects_error => {
                    tracing::warn!(user = self.id, task = task.name, path = %path, status = code, elapsed_ms = elapsed.as_millis() as u64, "Error status");
                }
                RequestOutcome::Status { code, elapsed } => {
                    tracing::debug!(user = self.id, task = task.name, path = %path, status = code, elapsed_ms = elapsed.as_millis() as u64, "Request complete");
                }
                RequestOutcome::Failed { kind, elapsed } => {
                    tracing::warn!(user = self.id, task = task.name, path = %path, error = kind.as_str(), elapsed_ms = elapsed.as_millis() as u64, "Request failed");
                }
            }
            requests.push((path, outcome));
        }

        TaskRun {
            task: task.name,
            requests,
        }
    }

    /// Loop task → wait until shutdown is signalled.
    pub async fn run(mut self, mut shutdown: broadcast::Receiver<()>) {
        tracing::info!(user = self.id, profile = self.profile.name, "Starting load test user");

        loop {
            tokio::select! {
                _ = shutdown.recv() => break,
                _ = self.run_once() => {}
            }

            let wait = self.profile.wait.sample(&mut self.rng);
            tokio::select! {
                _ = shutdown.recv() => break,
                _ = tokio::time::sleep(wait) => {}
            }
        }

        tracing::debug!(user = self.id, profile = self.profile.name, "User stopped");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;
    use std::time::Duration;
    use crate::client::FailureKind;
    use crate::paths::{MISSING_ASSETS, KNOWN_ROUTES, MISSING_PAGES, PROXY_ROUTES};
    use crate::profile::{POWER_USER, SLOW_USER, STANDARD_USER};

    /// Records every path and answers like the demo app: 200 for known routes, 404 otherwise.
    #[derive(Default)]
    struct RecordingSink {
        paths: Mutex<Vec<&'static str>>,
    }

    impl RecordingSink {
        fn paths(&self) -> Vec<&'static str> {
            self.paths.lock().unwrap().clone()
        }
    }

    impl RequestSink for RecordingSink {
        async fn get(&self, path: &'static str) -> RequestOutcome {
            self.paths.lock().unwrap().push(path);
            let code = if KNOWN_ROUTES.contains(path) { 200 } else { 404 };
            RequestOutcome::Status { code, elapsed: Duration::from_millis(1) }
        }
    }

    struct DownSink;

    impl RequestSink for DownSink {
        async fn get(&self, _path: &'static str) -> RequestOutcome {
            RequestOutcome::Failed { kind: FailureKind::Connect, elapsed: Duration::ZERO }
        }
    }

    fn user<S: RequestSink>(profile: &'static UserProfile, sink: Arc<S>, tally: Arc<RunTally>) -> SimulatedUser<S> {
        SimulatedUser::new(0, profile, Some(17), sink, tally).unwrap()
    }

    #[tokio::test]
    async fn test_slow_user_issues_two_ordered_gets() {
        let sink = Arc::new(RecordingSink::default());
        let tally = Arc::new(RunTally::new());
        let mut slow = user(&SLOW_USER, sink.clone(), tally.clone());

        let run = slow.run_once().await;
        assert_eq!(run.task, "slow_browsing");

        let paths = sink.paths();
        assert_eq!(paths.len(), 2);
        assert_eq!(paths[0], "/");
        assert!(PROXY_ROUTES.contains(paths[1]));
        assert_eq!(tally.snapshot().requests, 2);
        assert_eq!(tally.snapshot().tasks, 1);
    }

    #[tokio::test]
    async fn test_standard_user_stays_in_catalogue() {
        let sink = Arc::new(RecordingSink::default());
        let tally = Arc::new(RunTally::new());
        let mut standard = user(&STANDARD_USER, sink.clone(), tally.clone());

        for _ in 0..1_000 {
            let run = standard.run_once().await;
            assert_eq!(run.requests.len(), 1);
            let (path, outcome) = run.requests[0];
            match run.task {
                "visit_random_404" => assert!(MISSING_PAGES.contains(path)),
                "simulate_browser_assets" => assert!(MISSING_ASSETS.contains(path)),
                _ => assert!(KNOWN_ROUTES.contains(path), "{} from {}", path, run.task),
            }
            assert_eq!(outcome.is_error_status(), !KNOWN_ROUTES.contains(path));
        }

        let snap = tally.snapshot();
        assert_eq!(snap.requests, 1_000);
        assert_eq!(snap.unexpected_errors, 0);
        assert!(snap.expected_errors > 0);
        assert_eq!(snap.success + snap.expected_errors, 1_000);
    }

    #[tokio::test]
    async fn test_failures_do_not_stop_the_user() {
        let tally = Arc::new(RunTally::new());
        let mut power = user(&POWER_USER, Arc::new(DownSink), tally.clone());
        for _ in 0..3 {
            power.run_once().await;
        }
        assert_eq!(tally.snapshot().transport_failures, 3);
    }

    #[tokio::test(start_paused = true)]
    async fn test_run_stops_on_shutdown() {
        let sink = Arc::new(RecordingSink::default());
        let tally = Arc::new(RunTally::new());
        let power = user(&POWER_USER, sink.clone(), tally.clone());

        let (tx, rx) = broadcast::channel(1);
        let handle = tokio::spawn(power.run(rx));

        // Power users wait 0.5..2s, so ten seconds covers several iterations.
        tokio::time::sleep(Duration::from_secs(10)).await;
        tx.send(()).unwrap();
        handle.await.unwrap();

        let done = tally.snapshot().requests;
        assert!(done >= 5, "only {} requests", done);
        assert!(sink.paths().iter().all(|p| KNOWN_ROUTES.contains(p)));
    }

    #[test]
    fn test_same_seed_same_choices() {
        let tally = Arc::new(RunTally::new());
        let mut a = user(&STANDARD_USER, Arc::new(RecordingSink::default()), tally.clone());
        let mut b = user(&STANDARD_USER, Arc::new(RecordingSink::default()), tally);
        let rt = tokio::runtime::Builder::new_current_thread().build().unwrap();
        let left: Vec<_> = (0..20).map(|_| rt.block_on(a.run_once()).task).collect();
        let right: Vec<_> = (0..20).map(|_| rt.block_on(b.run_once()).task).collect();
        assert_eq!(left, right);
    }
}
