//! Sandbox mode: the process-isolation strategy used to run the agent.
//!
//! Modeled as a tagged variant with a single dispatch point rather than
//! an inheritance hierarchy — each variant carries the configuration it
//! needs, and `aicof_infrastructure::agent::invoker` matches on it once.

use regex::Regex;
use std::sync::OnceLock;

use crate::core::CoreError;

/// Environment variables forwarded into a `docker` sandbox container,
/// but only those actually set on the host.
pub const DOCKER_ENV_ALLOWLIST: &[&str] = &[
    "ANTHROPIC_API_KEY",
    "OPENAI_API_KEY",
    "AMP_API_KEY",
    "AI_TOOL",
    "PAUSE_SECONDS",
    "HOME",
    "TERM",
    "PATH",
];

/// Configuration for the `docker` sandbox mode.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DockerConfig {
    /// Image reference, already validated against
    /// [`validate_image_reference`].
    pub image: String,
}

/// Configuration for the `docker-sandbox` mode (the host's docker
/// sandbox plugin, `docker sandbox run`).
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct DockerSandboxConfig {
    pub name: Option<String>,
    pub template: Option<String>,
}

/// The process-isolation strategy for an agent invocation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SandboxMode {
    /// Spawn the agent as a direct child process in the project
    /// directory.
    None,
    /// `docker run --rm --init`, mounting the project at `/workspace`.
    Docker(DockerConfig),
    /// Invoke the host's docker sandbox plugin.
    DockerSandbox(DockerSandboxConfig),
}

impl SandboxMode {
    pub fn parse(name: &str) -> Result<&'static str, CoreError> {
        match name {
            "none" | "docker" | "docker-sandbox" => Ok(match name {
                "none" => "none",
                "docker" => "docker",
                _ => "docker-sandbox",
            }),
            other => Err(CoreError::InvalidSandboxMode(other.to_string())),
        }
    }
}

fn image_reference_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        // A deliberately permissive but non-trivial approximation of the
        // Docker distribution spec's reference grammar: one or more
        // lowercase path components separated by `/`, an optional
        // `:tag`, an optional `@sha256:<64 hex>` digest.
        Regex::new(
            r"^[a-z0-9]+(?:[._-][a-z0-9]+)*(?:/[a-z0-9]+(?:[._-][a-z0-9]+)*)*(?::[A-Za-z0-9_][A-Za-z0-9_.-]{0,127})?(?:@sha256:[a-f0-9]{64})?$",
        )
        .expect("static docker image reference regex must compile")
    })
}

/// Validates a Docker image reference before it is passed to the
/// container runtime. This is a pure string check — it does not verify
/// the image exists or can be pulled.
pub fn validate_image_reference(reference: &str) -> Result<(), CoreError> {
    if reference.is_empty() || !image_reference_regex().is_match(reference) {
        return Err(CoreError::InvalidImageReference(reference.to_string()));
    }
    Ok(())
}
