//! Plan, Task, and progress entities — the persistent state machine's
//! data model (see `prd.json`).

use serde::{Deserialize, Serialize};

use super::id::deserialize_task_id;

/// Lifecycle state of a single task.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TaskStatus {
    Pending,
    InProgress,
    Completed,
    Skipped,
    Blocked,
}

impl TaskStatus {
    pub fn is_terminal(&self) -> bool {
        matches!(self, TaskStatus::Completed | TaskStatus::Skipped)
    }
}

impl Default for TaskStatus {
    fn default() -> Self {
        TaskStatus::Pending
    }
}

/// Scheduling priority. Unknown or missing values are treated as `Medium`
/// by callers that parse free-form input (see `Priority::parse_lenient`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Priority {
    Critical,
    High,
    Medium,
    Low,
}

impl Priority {
    /// Rank used for scheduling: lower sorts first. critical=0 .. low=3.
    pub fn rank(&self) -> u8 {
        match self {
            Priority::Critical => 0,
            Priority::High => 1,
            Priority::Medium => 2,
            Priority::Low => 3,
        }
    }

    /// Parses a priority from loosely-typed input, falling back to
    /// `Medium` for anything unrecognised rather than failing the whole
    /// document — priority is advisory for scheduling, not a validity
    /// gate.
    pub fn parse_lenient(raw: Option<&str>) -> Priority {
        match raw.map(str::to_ascii_lowercase).as_deref() {
            Some("critical") => Priority::Critical,
            Some("high") => Priority::High,
            Some("low") => Priority::Low,
            _ => Priority::Medium,
        }
    }
}

impl Default for Priority {
    fn default() -> Self {
        Priority::Medium
    }
}

/// Informational complexity estimate. Never affects scheduling.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Complexity {
    Simple,
    Medium,
    Complex,
}

impl Default for Complexity {
    fn default() -> Self {
        Complexity::Medium
    }
}

/// Provenance tag recording how a task entered the plan.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Source {
    Manual,
    Prd,
    PilotDiscovery,
}

impl Default for Source {
    fn default() -> Self {
        Source::Manual
    }
}

/// One atomic unit of work.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Task {
    #[serde(deserialize_with = "deserialize_task_id")]
    pub id: String,
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default)]
    pub status: TaskStatus,
    #[serde(default)]
    pub priority: Priority,
    #[serde(default)]
    pub complexity: Complexity,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parent_id: Option<String>,
    #[serde(default)]
    pub depends_on: Vec<String>,
    #[serde(default)]
    pub files_to_create: Vec<String>,
    #[serde(default)]
    pub files_to_modify: Vec<String>,
    #[serde(default)]
    pub guardrails: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub completed_at: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub commit_sha: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub iteration: Option<u64>,
    #[serde(default)]
    pub source: Source,
}

impl Task {
    /// Builds a new task with required fields; status defaults to
    /// `pending`, every other field empty.
    pub fn new(id: impl Into<String>, title: impl Into<String>) -> Self {
        Task {
            id: id.into(),
            title: title.into(),
            description: None,
            status: TaskStatus::Pending,
            priority: Priority::Medium,
            complexity: Complexity::Medium,
            parent_id: None,
            depends_on: Vec::new(),
            files_to_create: Vec::new(),
            files_to_modify: Vec::new(),
            guardrails: Vec::new(),
            completed_at: None,
            commit_sha: None,
            iteration: None,
            source: Source::Manual,
        }
    }

    pub fn with_priority(mut self, priority: Priority) -> Self {
        self.priority = priority;
        self
    }

    pub fn with_complexity(mut self, complexity: Complexity) -> Self {
        self.complexity = complexity;
        self
    }

    pub fn with_depends_on(mut self, depends_on: Vec<String>) -> Self {
        self.depends_on = depends_on;
        self
    }

    pub fn with_source(mut self, source: Source) -> Self {
        self.source = source;
        self
    }

    /// A task is ready to run if it is pending and every dependency is in
    /// `satisfied` (completed or skipped ids).
    pub fn is_ready(&self, satisfied: &[String]) -> bool {
        self.status == TaskStatus::Pending
            && self
                .depends_on
                .iter()
                .all(|dep| satisfied.iter().any(|s| s == dep))
    }

    pub fn mark_in_progress(&mut self) {
        self.status = TaskStatus::InProgress;
    }

    pub fn mark_completed(&mut self, commit_sha: impl Into<String>, iteration: u64, now: &str) {
        self.status = TaskStatus::Completed;
        self.commit_sha = Some(commit_sha.into());
        self.iteration = Some(iteration);
        self.completed_at = Some(now.to_string());
    }

    pub fn mark_skipped(&mut self) {
        self.status = TaskStatus::Skipped;
    }

    /// Clears completion fields and returns the task to `pending`.
    pub fn reset(&mut self) {
        self.status = TaskStatus::Pending;
        self.completed_at = None;
        self.commit_sha = None;
        self.iteration = None;
    }
}

/// Identifying metadata about the project the plan belongs to.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ProjectInfo {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source_prd: Option<String>,
    pub created_at: String,
    pub updated_at: String,
}

/// Overall run state, recomputed on every save.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PlanStatus {
    NotStarted,
    Running,
    Paused,
    Completed,
    Failed,
}

impl Default for PlanStatus {
    fn default() -> Self {
        PlanStatus::NotStarted
    }
}

/// Summary counters recomputed on every `Save`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Progress {
    #[serde(default)]
    pub total_tasks: usize,
    #[serde(default)]
    pub completed_tasks: usize,
    #[serde(default)]
    pub current_iteration: u64,
    #[serde(default)]
    pub total_iterations_run: u64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_iteration_at: Option<String>,
    #[serde(default)]
    pub status: PlanStatus,
    #[serde(default)]
    pub discovery_iterations: u64,
    #[serde(default)]
    pub implementation_iterations: u64,
}

impl Progress {
    /// Records that one iteration of the given kind just ran: advances
    /// `current_iteration`/`total_iterations_run`, the per-kind counter,
    /// and `last_iteration_at`. Called by the driver, which owns
    /// iteration counting — `recompute` below only ever derives from the
    /// task list, never from iteration history.
    pub fn record_iteration(&mut self, kind: crate::orchestration::IterationKind, iteration: u64, now: &str) {
        self.current_iteration = iteration;
        self.total_iterations_run += 1;
        match kind {
            crate::orchestration::IterationKind::Discovery => self.discovery_iterations += 1,
            crate::orchestration::IterationKind::Implementation => self.implementation_iterations += 1,
        }
        self.last_iteration_at = Some(now.to_string());
    }

    /// Recomputes counters from the task list, preserving the iteration
    /// counters which are owned by the driver, not the task list.
    pub fn recompute(&mut self, tasks: &[Task]) {
        self.total_tasks = tasks.len();
        self.completed_tasks = tasks
            .iter()
            .filter(|t| t.status == TaskStatus::Completed)
            .count();
        self.status = if self.total_tasks > 0 && self.completed_tasks == self.total_tasks {
            PlanStatus::Completed
        } else if self.status == PlanStatus::Completed {
            // A reset task moved the plan back out of completion.
            PlanStatus::Running
        } else {
            self.status
        };
    }
}
