//! Ports the application layer drives and infrastructure implements:
//! spawning the agent subprocess and checking its credentials.
//!
//! Defining these traits in the domain crate (rather than application or
//! infrastructure) follows this corpus's convention of putting the seam
//! where the business rule lives and letting the adapter depend on the
//! core, not the other way around.

use std::path::PathBuf;

use crate::core::CoreError;

use super::sandbox::SandboxMode;
use super::tool::AgentTool;

/// Everything `AgentInvoker::invoke` needs to spawn one agent
/// subprocess.
#[derive(Debug, Clone)]
pub struct InvocationRequest {
    pub tool: AgentTool,
    pub sandbox: SandboxMode,
    pub project_dir: PathBuf,
    pub prompt_path: PathBuf,
}

/// The outcome of one agent invocation. The driver inspects only
/// `exit_code`; it never parses subprocess output.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InvocationOutcome {
    pub exit_code: i32,
}

impl InvocationOutcome {
    pub fn succeeded(&self) -> bool {
        self.exit_code == 0
    }
}

/// Spawns the external coding agent and waits for it to exit. Stdin,
/// stdout, and stderr are inherited from the parent process; output is
/// never captured or parsed.
pub trait AgentInvoker {
    fn invoke(&self, request: &InvocationRequest) -> Result<InvocationOutcome, CoreError>;
}

/// Checks that credentials required by a tool are present before the
/// loop begins, so missing credentials fail fast rather than mid-run.
pub trait AuthChecker {
    fn check(&self, tool: AgentTool) -> Result<(), CoreError>;
}
