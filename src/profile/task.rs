//! Weighted tasks and the request steps they issue.

use rand::Rng;
use crate::paths::PathSet;

/// One GET issued by a task.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Step {
    /// Always request this path.
    Get(&'static str),
    /// Request one path chosen uniformly from the set.
    GetAny(PathSet),
}

impl Step {
    pub fn resolve<R: Rng + ?Sized>(&self, rng: &mut R) -> Option<&'static str> {
        match self {
            Step::Get(path) => Some(path),
            Step::GetAny(set) => set.choose(rng),
        }
    }

    /// Every path this step could ever request.
    pub fn candidates(&self) -> &[&'static str] {
        match self {
            Step::Get(path) => std::slice::from_ref(path),
            Step::GetAny(set) => set.paths(),
        }
    }
}

/// A named, weighted unit of work inside a profile.
///
/// Steps run strictly in order; a task with two steps issues two sequential
/// GETs before the user waits again.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TaskEntry {
    pub name: &'static str,
    pub weight: u32,
    pub steps: &'static [Step],
    /// Error-status responses are the point of this task.
    pub expects_error: bool,
}

impl TaskEntry {
    pub const fn new(name: &'static str, weight: u32, steps: &'static [Step]) -> Self {
        Self {
            name,
            weight,
            steps,
            expects_error: false,
        }
    }

    pub const fn expecting_error(self) -> Self {
        Self {
            expects_error: true,
            ..self
        }
    }

    /// Resolve the concrete paths for one invocation.
    pub fn plan<R: Rng + ?Sized>(&self, rng: &mut R) -> Vec<&'static str> {
        self.steps.iter().filter_map(|step| step.resolve(rng)).collect()
    }
}
