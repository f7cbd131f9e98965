//! Scheduling/runtime parameters carried inside the plan document
//! (`prd.json`'s `config` section).

use serde::{Deserialize, Serialize};

/// Runtime knobs persisted with the plan. Environment variables
/// (`PAUSE_SECONDS`, `MAX_CONSECUTIVE_FAILURES`) may override these at
/// load time — see `aicof_application::config::LoopConfigResolver`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlanConfig {
    pub pause_seconds: u64,
    pub max_consecutive_failures: u32,
    pub max_iterations: u64,
    pub pilot_mode: bool,
    pub discover_interval: u64,
    pub min_pending_tasks_for_discovery: u64,
    pub max_discovery_tasks: u64,
    pub ai_tool: String,
    pub quality_checks: Vec<String>,
    /// One of "none", "docker", "docker-sandbox" — see
    /// `aicof_domain::agent::SandboxMode`.
    pub sandbox_mode: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub docker_image: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub docker_sandbox_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub docker_sandbox_template: Option<String>,
}

impl Default for PlanConfig {
    fn default() -> Self {
        PlanConfig {
            pause_seconds: 2,
            max_consecutive_failures: 3,
            max_iterations: 100,
            pilot_mode: false,
            discover_interval: 5,
            min_pending_tasks_for_discovery: 2,
            max_discovery_tasks: 10,
            ai_tool: "claude".to_string(),
            quality_checks: Vec::new(),
            sandbox_mode: "none".to_string(),
            docker_image: None,
            docker_sandbox_name: None,
            docker_sandbox_template: None,
        }
    }
}

impl PlanConfig {
    pub fn with_pause_seconds(mut self, seconds: u64) -> Self {
        self.pause_seconds = seconds;
        self
    }

    pub fn with_max_consecutive_failures(mut self, n: u32) -> Self {
        self.max_consecutive_failures = n;
        self
    }

    pub fn with_max_iterations(mut self, n: u64) -> Self {
        self.max_iterations = n;
        self
    }

    pub fn with_pilot_mode(mut self, enabled: bool) -> Self {
        self.pilot_mode = enabled;
        self
    }

    pub fn with_ai_tool(mut self, tool: impl Into<String>) -> Self {
        self.ai_tool = tool.into();
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_spec() {
        let cfg = PlanConfig::default();
        assert_eq!(cfg.pause_seconds, 2);
        assert_eq!(cfg.max_consecutive_failures, 3);
        assert_eq!(cfg.min_pending_tasks_for_discovery, 2);
    }

    #[test]
    fn builder_overrides_fields() {
        let cfg = PlanConfig::default()
            .with_pause_seconds(5)
            .with_ai_tool("codex");
        assert_eq!(cfg.pause_seconds, 5);
        assert_eq!(cfg.ai_tool, "codex");
    }
}
