//! Prompt text assembly for the two agent invocation kinds.
//!
//! Both prompts are plain templates filled in with the project's
//! quality-check commands and an optional focus keyword — there is no
//! templating engine involved, matching the teacher's direct
//! string-building in `AgentContext::to_prompt_context`.

/// Inputs shared by both prompt kinds.
#[derive(Debug, Clone, Default)]
pub struct PromptContext {
    pub quality_checks: Vec<String>,
    pub max_discovery_tasks: u64,
    pub focus: Option<String>,
}

impl PromptContext {
    fn quality_checks_block(&self) -> String {
        if self.quality_checks.is_empty() {
            "No quality checks are configured for this project.".to_string()
        } else {
            self.quality_checks
                .iter()
                .map(|c| format!("  - {c}"))
                .collect::<Vec<_>>()
                .join("\n")
        }
    }

    fn focus_block(&self) -> String {
        match &self.focus {
            Some(f) => format!("Focus this iteration on: {f}.\n"),
            None => String::new(),
        }
    }
}

/// Renders the implementation-iteration prompt: pick one task, implement
/// it, check it, commit it, record it.
pub fn render_implementation_prompt(ctx: &PromptContext) -> String {
    format!(
        "You are operating autonomously on this repository.\n\n\
         1. Read CLAUDE.md and AGENTS.md if present for project conventions.\n\
         2. Read .claude/auto/progress.md for the history of prior iterations.\n\
         3. From .claude/auto/prd.json, pick the highest-priority pending task whose\n\
         dependencies are all completed or skipped.\n\
         4. Set that task's status to in_progress.\n\
         5. Implement the task.\n\
         6. Run the following quality checks and fix any failures before proceeding:\n{}\n\
         7. Commit your changes with a Conventional Commits message that includes the\n\
         task id, e.g. \"feat(task-<id>): <summary>\".\n\
         8. Set the task's status to completed, recording commit_sha and the current\n\
         iteration number.\n\
         9. Append a LEARNING entry to .claude/auto/progress.md summarising what you did.\n\n\
         {}Do not touch any task other than the one you selected.\n",
        ctx.quality_checks_block(),
        ctx.focus_block(),
    )
}

/// Renders the discovery-iteration prompt: analyse, propose tasks,
/// change nothing else.
pub fn render_discovery_prompt(ctx: &PromptContext) -> String {
    format!(
        "You are operating autonomously on this repository in discovery mode.\n\n\
         1. Analyse the repository's current state and existing tasks in\n\
         .claude/auto/prd.json.\n\
         2. Append new tasks for work you find worth doing, each with\n\
         source=\"pilot-discovery\" and status=\"pending\".\n\
         3. Do not propose more than {} new tasks this iteration.\n\
         4. Skip any area already covered by an existing task, whatever its status.\n\
         5. {}Make no changes to any file other than .claude/auto/prd.json and\n\
         .claude/auto/progress.md.\n\n\
         You must not modify source files in this iteration.\n",
        ctx.max_discovery_tasks,
        ctx.focus_block(),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn implementation_prompt_lists_quality_checks() {
        let ctx = PromptContext {
            quality_checks: vec!["cargo test".to_string(), "cargo clippy".to_string()],
            ..Default::default()
        };
        let prompt = render_implementation_prompt(&ctx);
        assert!(prompt.contains("cargo test"));
        assert!(prompt.contains("cargo clippy"));
        assert!(prompt.contains("Conventional Commits"));
    }

    #[test]
    fn discovery_prompt_forbids_source_changes() {
        let ctx = PromptContext {
            max_discovery_tasks: 5,
            ..Default::default()
        };
        let prompt = render_discovery_prompt(&ctx);
        assert!(prompt.contains("must not modify source files"));
        assert!(prompt.contains("5 new tasks"));
    }

    #[test]
    fn focus_keyword_is_surfaced_in_both_prompts() {
        let ctx = PromptContext {
            focus: Some("security".to_string()),
            ..Default::default()
        };
        assert!(render_implementation_prompt(&ctx).contains("Focus this iteration on: security"));
        assert!(render_discovery_prompt(&ctx).contains("Focus this iteration on: security"));
    }
}
