//! Resolves the plan's persisted `config` section plus ambient
//! environment variable overrides into the concrete `LoopConfig` the
//! iteration driver runs with.

use std::path::PathBuf;

use aicof_domain::agent::{AgentTool, DockerConfig, DockerSandboxConfig, SandboxMode};
use aicof_domain::core::CoreError;
use aicof_domain::plan::PlanConfig;

/// Fully-resolved settings for one run of the iteration driver.
#[derive(Debug, Clone)]
pub struct LoopConfig {
    pub project_dir: PathBuf,
    pub pause_seconds: u64,
    pub max_consecutive_failures: u32,
    pub max_iterations: u64,
    pub pilot_mode: bool,
    pub discover_interval: u64,
    pub min_pending_tasks_for_discovery: u64,
    pub max_discovery_tasks: u64,
    pub tool: AgentTool,
    pub sandbox: SandboxMode,
    pub quality_checks: Vec<String>,
}

/// Reads `PAUSE_SECONDS`/`MAX_CONSECUTIVE_FAILURES` from the process
/// environment, falling back to the plan's persisted values (which
/// themselves default to 2 and 3) when unset or unparsable.
pub struct LoopConfigResolver;

impl LoopConfigResolver {
    pub fn resolve(
        project_dir: PathBuf,
        plan_config: &PlanConfig,
    ) -> Result<LoopConfig, CoreError> {
        let pause_seconds = env_override_u64("PAUSE_SECONDS").unwrap_or(plan_config.pause_seconds);
        let max_consecutive_failures = env_override_u32("MAX_CONSECUTIVE_FAILURES")
            .unwrap_or(plan_config.max_consecutive_failures);

        let tool = AgentTool::parse(&plan_config.ai_tool)?;
        let sandbox = build_sandbox_mode(plan_config)?;

        Ok(LoopConfig {
            project_dir,
            pause_seconds,
            max_consecutive_failures,
            max_iterations: plan_config.max_iterations,
            pilot_mode: plan_config.pilot_mode,
            discover_interval: plan_config.discover_interval,
            min_pending_tasks_for_discovery: plan_config.min_pending_tasks_for_discovery,
            max_discovery_tasks: plan_config.max_discovery_tasks,
            tool,
            sandbox,
            quality_checks: plan_config.quality_checks.clone(),
        })
    }
}

fn build_sandbox_mode(plan_config: &PlanConfig) -> Result<SandboxMode, CoreError> {
    match plan_config.sandbox_mode.as_str() {
        "none" => Ok(SandboxMode::None),
        "docker" => {
            let image = plan_config
                .docker_image
                .clone()
                .ok_or_else(|| CoreError::InvalidSandboxMode("docker mode requires docker_image".into()))?;
            aicof_domain::agent::validate_image_reference(&image)?;
            Ok(SandboxMode::Docker(DockerConfig { image }))
        }
        "docker-sandbox" => Ok(SandboxMode::DockerSandbox(DockerSandboxConfig {
            name: plan_config.docker_sandbox_name.clone(),
            template: plan_config.docker_sandbox_template.clone(),
        })),
        other => Err(CoreError::InvalidSandboxMode(other.to_string())),
    }
}

fn env_override_u64(var: &str) -> Option<u64> {
    std::env::var(var).ok().and_then(|v| v.parse().ok())
}

fn env_override_u32(var: &str) -> Option<u32> {
    std::env::var(var).ok().and_then(|v| v.parse().ok())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn resolves_none_sandbox_without_env_overrides() {
        std::env::remove_var("PAUSE_SECONDS");
        std::env::remove_var("MAX_CONSECUTIVE_FAILURES");
        let plan_config = PlanConfig::default();
        let resolved = LoopConfigResolver::resolve(PathBuf::from("/tmp/project"), &plan_config).unwrap();
        assert_eq!(resolved.pause_seconds, 2);
        assert_eq!(resolved.max_consecutive_failures, 3);
        assert_eq!(resolved.sandbox, SandboxMode::None);
    }

    #[test]
    fn docker_mode_requires_image() {
        let mut plan_config = PlanConfig::default();
        plan_config.sandbox_mode = "docker".to_string();
        let err = LoopConfigResolver::resolve(PathBuf::from("/tmp/project"), &plan_config).unwrap_err();
        assert!(matches!(err, CoreError::InvalidSandboxMode(_)));
    }

    #[test]
    fn docker_mode_validates_image_reference() {
        let mut plan_config = PlanConfig::default();
        plan_config.sandbox_mode = "docker".to_string();
        plan_config.docker_image = Some("bad image; rm -rf".to_string());
        let err = LoopConfigResolver::resolve(PathBuf::from("/tmp/project"), &plan_config).unwrap_err();
        assert!(matches!(err, CoreError::InvalidImageReference(_)));
    }

    #[test]
    fn invalid_ai_tool_is_rejected() {
        let mut plan_config = PlanConfig::default();
        plan_config.ai_tool = "nonexistent-tool".to_string();
        let err = LoopConfigResolver::resolve(PathBuf::from("/tmp/project"), &plan_config).unwrap_err();
        assert!(matches!(err, CoreError::InvalidTool(_)));
    }
}
