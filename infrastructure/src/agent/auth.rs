//! Authentication preflight: checked once before the loop begins so
//! missing credentials fail fast rather than partway through a long run.

use std::path::PathBuf;

use aicof_application::ports::AuthChecker;
use aicof_domain::agent::AgentTool;
use aicof_domain::core::CoreError;

/// Checks the tool-specific environment variable, with an additional
/// fallback for `claude`: an OAuth session file on disk, matching how
/// the Claude CLI itself authenticates outside of API-key mode.
#[derive(Debug, Default, Clone, Copy)]
pub struct EnvAuthChecker;

impl EnvAuthChecker {
    pub fn new() -> Self {
        EnvAuthChecker
    }

    fn claude_oauth_session_path() -> Option<PathBuf> {
        dirs::home_dir().map(|home| home.join(".claude").join(".credentials.json"))
    }
}

impl AuthChecker for EnvAuthChecker {
    fn check(&self, tool: AgentTool) -> Result<(), CoreError> {
        let var = tool.required_env_var();
        if std::env::var(var).is_ok() {
            return Ok(());
        }

        if tool == AgentTool::Claude {
            if let Some(path) = Self::claude_oauth_session_path() {
                if path.exists() {
                    return Ok(());
                }
            }
        }

        Err(CoreError::MissingCredential(var.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fails_fast_naming_the_missing_variable() {
        std::env::remove_var("AMP_API_KEY");
        let checker = EnvAuthChecker::new();
        let err = checker.check(AgentTool::Amp).unwrap_err();
        match err {
            CoreError::MissingCredential(var) => assert_eq!(var, "AMP_API_KEY"),
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn passes_when_env_var_is_set() {
        std::env::set_var("OPENAI_API_KEY", "sk-test");
        let checker = EnvAuthChecker::new();
        assert!(checker.check(AgentTool::Codex).is_ok());
        std::env::remove_var("OPENAI_API_KEY");
    }
}
