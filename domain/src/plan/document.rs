//! The `Plan` aggregate: the whole of `prd.json` in memory.

use serde::{Deserialize, Serialize};

use super::config::PlanConfig;
use super::entities::{ProjectInfo, Progress, Task};
use crate::orchestration::IterationKind;

/// Schema version written to every plan document. Bump when the on-disk
/// shape changes in a way loaders must branch on.
pub const SCHEMA_VERSION: &str = "1.0";

/// The authoritative state of a project: one in-memory form of
/// `prd.json`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Plan {
    pub version: String,
    pub project: ProjectInfo,
    #[serde(default)]
    pub config: PlanConfig,
    #[serde(default)]
    pub tasks: Vec<Task>,
    #[serde(default)]
    pub progress: Progress,
}

impl Plan {
    pub fn new(project: ProjectInfo) -> Self {
        Plan {
            version: SCHEMA_VERSION.to_string(),
            project,
            config: PlanConfig::default(),
            tasks: Vec::new(),
            progress: Progress::default(),
        }
    }

    pub fn find_task(&self, id: &str) -> Option<&Task> {
        self.tasks.iter().find(|t| t.id == id)
    }

    pub fn find_task_mut(&mut self, id: &str) -> Option<&mut Task> {
        self.tasks.iter_mut().find(|t| t.id == id)
    }

    /// Recomputes `progress` from the current task list. Called by
    /// `Save` before writing, and is safe to call at any other time.
    pub fn recompute_progress(&mut self) {
        self.progress.recompute(&self.tasks);
    }

    /// Records that one driver iteration of `kind` just ran. The driver
    /// calls this once per iteration, then persists the plan — iteration
    /// counting is driver-owned state, not derived from the task list.
    pub fn record_iteration(&mut self, kind: IterationKind, iteration: u64, now: &str) {
        self.progress.record_iteration(kind, iteration, now);
    }
}
