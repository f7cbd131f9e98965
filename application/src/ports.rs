//! Ports the iteration driver use case depends on. Domain-level ports
//! (`AgentInvoker`, `AuthChecker`) are re-exported here for convenience;
//! the plan-repository and progress-sink ports are application-level
//! because they describe a use case's I/O shape rather than a pure
//! business rule.

use std::path::Path;

use aicof_domain::plan::Plan;
use aicof_domain::progress::ProgressEvent;

pub use aicof_domain::agent::{AgentInvoker, AuthChecker};

/// Loads and persists the plan document. Implemented by
/// `aicof_infrastructure::plan::store::JsonPlanStore`.
pub trait PlanRepository {
    fn load(&self, path: &Path) -> Result<Plan, String>;
    fn save(&self, path: &Path, plan: &mut Plan) -> Result<(), String>;
}

/// Appends one event to the progress log. Implemented by
/// `aicof_infrastructure::progress::FileProgressLog`.
pub trait ProgressSink {
    fn record(&self, event: ProgressEvent) -> Result<(), String>;
}

/// Callbacks invoked around each iteration for UI/logging purposes. Both
/// fields are optional and therefore nil-safe by construction — the
/// driver calls them through `Option::as_ref`/`as_deref`, never unwraps.
#[derive(Default)]
pub struct IterationCallbacks<'a> {
    pub on_iter_start: Option<Box<dyn Fn(u64, aicof_domain::orchestration::IterationKind) + 'a>>,
    pub on_iter_end: Option<Box<dyn Fn(u64, Option<&str>) + 'a>>,
}

impl<'a> IterationCallbacks<'a> {
    pub fn start(&self, iter: u64, kind: aicof_domain::orchestration::IterationKind) {
        if let Some(cb) = &self.on_iter_start {
            cb(iter, kind);
        }
    }

    pub fn end(&self, iter: u64, err: Option<&str>) {
        if let Some(cb) = &self.on_iter_end {
            cb(iter, err);
        }
    }
}
