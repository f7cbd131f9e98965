//! Agent invocation domain types: tool whitelist, sandbox modes, ports,
//! and prompt assembly.

mod invocation;
mod prompt;
mod sandbox;
mod tool;

pub use invocation::{AgentInvoker, AuthChecker, InvocationOutcome, InvocationRequest};
pub use prompt::{render_discovery_prompt, render_implementation_prompt, PromptContext};
pub use sandbox::{
    validate_image_reference, DockerConfig, DockerSandboxConfig, SandboxMode,
    DOCKER_ENV_ALLOWLIST,
};
pub use tool::AgentTool;
