//! Subprocess invocation of the external coding agent, one spawn per
//! sandbox mode. Stdin/stdout/stderr are always inherited — the driver
//! never captures or parses agent output, only the exit code.

use std::process::{Command, Stdio};

use aicof_application::ports::AgentInvoker;
use aicof_domain::agent::{InvocationOutcome, InvocationRequest, SandboxMode, DOCKER_ENV_ALLOWLIST};
use aicof_domain::core::CoreError;

/// Spawns the agent directly, via `docker run`, or via the host's
/// `docker sandbox run` plugin, depending on `InvocationRequest.sandbox`.
#[derive(Debug, Default, Clone, Copy)]
pub struct SubprocessAgentInvoker;

impl SubprocessAgentInvoker {
    pub fn new() -> Self {
        SubprocessAgentInvoker
    }
}

impl AgentInvoker for SubprocessAgentInvoker {
    fn invoke(&self, request: &InvocationRequest) -> Result<InvocationOutcome, CoreError> {
        // Re-validate the tool name against the whitelist immediately
        // before spawning, even though the caller already parsed it into
        // an `AgentTool` — this keeps the property true even if a caller
        // constructs a request by hand from untrusted config.
        aicof_domain::agent::AgentTool::parse(request.tool.as_str())?;

        let prompt_path = request.prompt_path.to_string_lossy().to_string();
        let args = request.tool.build_args(&prompt_path);

        let mut command = match &request.sandbox {
            SandboxMode::None => build_direct_command(request, &args),
            SandboxMode::Docker(cfg) => build_docker_command(request, cfg, &args)?,
            SandboxMode::DockerSandbox(cfg) => build_docker_sandbox_command(request, cfg, &args),
        };

        command.stdin(Stdio::inherit());
        command.stdout(Stdio::inherit());
        command.stderr(Stdio::inherit());

        let status = command
            .status()
            .map_err(|e| CoreError::SpawnFailed(e.to_string()))?;

        Ok(InvocationOutcome {
            exit_code: status.code().unwrap_or(-1),
        })
    }
}

fn build_direct_command(request: &InvocationRequest, args: &[String]) -> Command {
    let mut command = Command::new(request.tool.as_str());
    command.args(args);
    command.current_dir(&request.project_dir);
    command
}

fn build_docker_command(
    request: &InvocationRequest,
    cfg: &aicof_domain::agent::DockerConfig,
    tool_args: &[String],
) -> Result<Command, CoreError> {
    aicof_domain::agent::validate_image_reference(&cfg.image)?;

    let mut command = Command::new("docker");
    command.arg("run").arg("--rm").arg("--init");

    let mount = format!("{}:/workspace", request.project_dir.display());
    command.arg("-v").arg(mount);
    command.arg("-w").arg("/workspace");

    let (uid, gid) = host_uid_gid();
    command.arg("--user").arg(format!("{uid}:{gid}"));

    for var in DOCKER_ENV_ALLOWLIST {
        if let Ok(value) = std::env::var(var) {
            command.arg("-e").arg(format!("{var}={value}"));
        }
    }

    command.arg(&cfg.image);
    command.arg(request.tool.as_str());
    command.args(tool_args);

    Ok(command)
}

fn build_docker_sandbox_command(
    request: &InvocationRequest,
    cfg: &aicof_domain::agent::DockerSandboxConfig,
    tool_args: &[String],
) -> Command {
    let mut command = Command::new("docker");
    command.arg("sandbox").arg("run");

    if let Some(name) = &cfg.name {
        command.arg("--name").arg(name);
    }
    if let Some(template) = &cfg.template {
        command.arg("--template").arg(template);
    }

    command.arg("--");
    command.arg(request.tool.as_str());
    command.args(tool_args);
    command.current_dir(&request.project_dir);
    command
}

/// Resolves the invoking user's uid/gid by shelling out to `id`, since
/// this crate does not depend on `libc`. Falls back to `0:0` (root) if
/// the lookup fails — the docker daemon then creates files as root,
/// which is the pre-existing behaviour this flag exists to avoid, so a
/// failure here is logged rather than silently ignored.
fn host_uid_gid() -> (String, String) {
    let uid = run_id_command("-u");
    let gid = run_id_command("-g");
    match (uid, gid) {
        (Some(uid), Some(gid)) => (uid, gid),
        _ => {
            tracing::warn!("failed to resolve host uid/gid, docker container will run as root");
            ("0".to_string(), "0".to_string())
        }
    }
}

fn run_id_command(flag: &str) -> Option<String> {
    let output = Command::new("id").arg(flag).output().ok()?;
    if !output.status.success() {
        return None;
    }
    let text = String::from_utf8(output.stdout).ok()?;
    let trimmed = text.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use aicof_domain::agent::AgentTool;
    use std::path::PathBuf;

    #[test]
    fn direct_command_uses_tool_binary_and_project_dir() {
        let request = InvocationRequest {
            tool: AgentTool::Claude,
            sandbox: SandboxMode::None,
            project_dir: PathBuf::from("/tmp/project"),
            prompt_path: PathBuf::from("/tmp/project/.claude/auto/prompt.md"),
        };
        let args = request.tool.build_args(&request.prompt_path.to_string_lossy());
        let command = build_direct_command(&request, &args);
        assert_eq!(command.get_program(), "claude");
    }

    #[test]
    fn docker_command_rejects_invalid_image() {
        let request = InvocationRequest {
            tool: AgentTool::Claude,
            sandbox: SandboxMode::None,
            project_dir: PathBuf::from("/tmp/project"),
            prompt_path: PathBuf::from("/tmp/project/.claude/auto/prompt.md"),
        };
        let cfg = aicof_domain::agent::DockerConfig {
            image: "bad image".to_string(),
        };
        let err = build_docker_command(&request, &cfg, &[]).unwrap_err();
        assert!(matches!(err, CoreError::InvalidImageReference(_)));
    }
}
