//! `GetNextTask`: the scheduling algorithm that picks the next pending
//! task to hand to an agent.

use super::entities::{Task, TaskStatus};

/// Returns the highest-priority available pending task, or `None` if no
/// task is ready.
///
/// Algorithm (spec §4.1):
/// 1. `satisfied` = ids whose status is `completed` or `skipped` — a
///    skipped predecessor still satisfies its dependents.
/// 2. The available set is every `pending` task whose `depends_on` ids
///    are all in `satisfied`.
/// 3. Sort by priority rank ascending, breaking ties by ascending id
///    using a plain lexicographic string compare.
///
/// The lexicographic tie-break is the documented default (see
/// `DESIGN.md`); it is deliberately not numeric-aware, so ids like
/// `"1.10"` sort before `"1.2"`. Do not change this without coordinating
/// with plans already on disk that depend on the current ordering.
///
/// `in_progress` and `blocked` tasks are never selected; there is no
/// timeout that resurrects an `in_progress` task.
pub fn get_next_task(tasks: &[Task]) -> Option<&Task> {
    let satisfied: Vec<String> = tasks
        .iter()
        .filter(|t| matches!(t.status, TaskStatus::Completed | TaskStatus::Skipped))
        .map(|t| t.id.clone())
        .collect();

    tasks
        .iter()
        .filter(|t| t.is_ready(&satisfied))
        .min_by(|a, b| {
            a.priority
                .rank()
                .cmp(&b.priority.rank())
                .then_with(|| a.id.cmp(&b.id))
        })
}
