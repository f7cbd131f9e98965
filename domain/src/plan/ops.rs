//! Plan mutation operations: `AddTask`, `CompleteTask`, `SkipTask`,
//! `ResetTask`, `Validate`.

use crate::core::CoreError;

use super::document::Plan;
use super::entities::TaskStatus;

/// Appends a task to the plan.
///
/// Precondition: `task.id` is non-empty and not already present.
/// Status is defaulted to `pending` only if the caller left it at the
/// default — an explicit `blocked` status set by the caller is
/// preserved, matching spec §4.1's `AddTask` postcondition.
pub fn add_task(plan: &mut Plan, task: super::entities::Task) -> Result<(), CoreError> {
    if task.id.is_empty() {
        return Err(CoreError::InvalidTaskId("task id must not be empty".into()));
    }
    if plan.find_task(&task.id).is_some() {
        return Err(CoreError::TaskAlreadyExists(task.id));
    }
    plan.tasks.push(task);
    plan.recompute_progress();
    Ok(())
}

/// Marks a task completed, recording the commit and iteration that
/// finished it.
pub fn complete_task(
    plan: &mut Plan,
    id: &str,
    commit_sha: impl Into<String>,
    iteration: u64,
    now: &str,
) -> Result<(), CoreError> {
    let task = plan
        .find_task_mut(id)
        .ok_or_else(|| CoreError::TaskNotFound(id.to_string()))?;
    task.mark_completed(commit_sha, iteration, now);
    plan.recompute_progress();
    Ok(())
}

/// Marks a task skipped. Skipped tasks still satisfy dependents.
pub fn skip_task(plan: &mut Plan, id: &str) -> Result<(), CoreError> {
    let task = plan
        .find_task_mut(id)
        .ok_or_else(|| CoreError::TaskNotFound(id.to_string()))?;
    task.mark_skipped();
    plan.recompute_progress();
    Ok(())
}

/// Clears completion fields and returns a task to `pending`. This is the
/// only operation that can decrease the set of completed task ids.
pub fn reset_task(plan: &mut Plan, id: &str) -> Result<(), CoreError> {
    let task = plan
        .find_task_mut(id)
        .ok_or_else(|| CoreError::TaskNotFound(id.to_string()))?;
    task.reset();
    plan.recompute_progress();
    Ok(())
}

/// Validates structural invariants across the whole plan, returning a
/// list of human-readable problems. An empty result means the plan is
/// valid.
pub fn validate(plan: &Plan) -> Vec<String> {
    let mut problems = Vec::new();
    let mut seen_ids = std::collections::HashSet::new();

    for task in &plan.tasks {
        if !seen_ids.insert(task.id.clone()) {
            problems.push(format!("duplicate task id: {}", task.id));
        }
    }

    let all_ids: std::collections::HashSet<&str> =
        plan.tasks.iter().map(|t| t.id.as_str()).collect();
    for task in &plan.tasks {
        for dep in &task.depends_on {
            if !all_ids.contains(dep.as_str()) {
                problems.push(format!(
                    "task {} depends on unknown task {}",
                    task.id, dep
                ));
            }
        }
    }

    if plan.progress.completed_tasks > plan.progress.total_tasks {
        problems.push(format!(
            "completed_tasks ({}) exceeds total_tasks ({})",
            plan.progress.completed_tasks, plan.progress.total_tasks
        ));
    }

    problems
}

/// Non-standard status values are rejected during strict parsing: this
/// helper is used by loaders that accept a raw string status before the
/// typed enum is constructed.
pub fn parse_status_strict(raw: &str) -> Result<TaskStatus, CoreError> {
    match raw {
        "pending" => Ok(TaskStatus::Pending),
        "in_progress" => Ok(TaskStatus::InProgress),
        "completed" => Ok(TaskStatus::Completed),
        "skipped" => Ok(TaskStatus::Skipped),
        "blocked" => Ok(TaskStatus::Blocked),
        other => Err(CoreError::InvalidPlan(format!(
            "unknown task status: {other}"
        ))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::plan::entities::{ProjectInfo, Task};

    fn plan() -> Plan {
        Plan::new(ProjectInfo {
            name: "demo".to_string(),
            description: None,
            source_prd: None,
            created_at: "t".to_string(),
            updated_at: "t".to_string(),
        })
    }

    #[test]
    fn add_task_rejects_empty_id() {
        let mut p = plan();
        let err = add_task(&mut p, Task::new("", "x")).unwrap_err();
        assert!(matches!(err, CoreError::InvalidTaskId(_)));
    }

    #[test]
    fn add_task_rejects_duplicate() {
        let mut p = plan();
        add_task(&mut p, Task::new("1", "a")).unwrap();
        let err = add_task(&mut p, Task::new("1", "b")).unwrap_err();
        assert!(matches!(err, CoreError::TaskAlreadyExists(_)));
    }

    #[test]
    fn add_task_preserves_explicit_blocked_status() {
        let mut p = plan();
        let mut t = Task::new("1", "a");
        t.status = TaskStatus::Blocked;
        add_task(&mut p, t).unwrap();
        assert_eq!(p.find_task("1").unwrap().status, TaskStatus::Blocked);
    }

    #[test]
    fn complete_task_updates_progress() {
        let mut p = plan();
        add_task(&mut p, Task::new("1", "a")).unwrap();
        complete_task(&mut p, "1", "sha", 1, "t").unwrap();
        assert_eq!(p.progress.completed_tasks, 1);
    }

    #[test]
    fn complete_task_missing_id_errors() {
        let mut p = plan();
        let err = complete_task(&mut p, "nope", "sha", 1, "t").unwrap_err();
        assert!(matches!(err, CoreError::TaskNotFound(_)));
    }

    #[test]
    fn reset_task_is_the_only_way_to_uncomplete() {
        let mut p = plan();
        add_task(&mut p, Task::new("1", "a")).unwrap();
        complete_task(&mut p, "1", "sha", 1, "t").unwrap();
        assert_eq!(p.progress.completed_tasks, 1);
        reset_task(&mut p, "1").unwrap();
        assert_eq!(p.progress.completed_tasks, 0);
        assert_eq!(p.find_task("1").unwrap().status, TaskStatus::Pending);
    }

    #[test]
    fn validate_flags_unknown_dependency() {
        let mut p = plan();
        add_task(&mut p, Task::new("1", "a").with_depends_on(vec!["999".to_string()])).unwrap();
        let problems = validate(&p);
        assert_eq!(problems.len(), 1);
        assert!(problems[0].contains("999"));
    }

    #[test]
    fn validate_empty_plan_is_valid() {
        let p = plan();
        assert!(validate(&p).is_empty());
    }
}
