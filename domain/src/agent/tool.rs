//! The external coding-agent tool whitelist and its fixed argument
//! mapping.

use crate::core::CoreError;

/// The closed set of coding-agent tools the driver is permitted to
/// spawn. Unlike `core::model::Model`-style catalogs elsewhere in this
/// corpus, this enum has no open `Custom(String)` fallback: the
/// whitelist and the argument-mapping table below name exactly the same
/// four tools, so there is no "permitted but unmapped" case to model.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AgentTool {
    Claude,
    Amp,
    Cursor,
    Codex,
}

impl AgentTool {
    pub fn as_str(&self) -> &'static str {
        match self {
            AgentTool::Claude => "claude",
            AgentTool::Amp => "amp",
            AgentTool::Cursor => "cursor",
            AgentTool::Codex => "codex",
        }
    }

    /// Parses a tool name against the whitelist. This is re-run before
    /// every subprocess spawn — see `agent::invocation` — so that a
    /// tampered plan config cannot smuggle an arbitrary binary name
    /// through.
    pub fn parse(name: &str) -> Result<Self, CoreError> {
        match name {
            "claude" => Ok(AgentTool::Claude),
            "amp" => Ok(AgentTool::Amp),
            "cursor" => Ok(AgentTool::Cursor),
            "codex" => Ok(AgentTool::Codex),
            other => Err(CoreError::InvalidTool(other.to_string())),
        }
    }

    /// Environment variable whose presence the authentication preflight
    /// requires for this tool.
    pub fn required_env_var(&self) -> &'static str {
        match self {
            AgentTool::Claude => "ANTHROPIC_API_KEY",
            AgentTool::Codex => "OPENAI_API_KEY",
            AgentTool::Amp => "AMP_API_KEY",
            AgentTool::Cursor => "CURSOR_API_KEY",
        }
    }

    /// Builds the fixed argument vector for invoking this tool against a
    /// prompt file. Callers may not modify these mappings at runtime —
    /// they are a compiled-in table, not configuration.
    pub fn build_args(&self, prompt_path: &str) -> Vec<String> {
        match self {
            AgentTool::Claude => vec![
                "--print".to_string(),
                "--dangerously-skip-permissions".to_string(),
                prompt_path.to_string(),
            ],
            AgentTool::Codex => vec![
                "exec".to_string(),
                "--full-auto".to_string(),
                prompt_path.to_string(),
            ],
            AgentTool::Amp => vec!["--stream-json".to_string(), prompt_path.to_string()],
            AgentTool::Cursor => vec!["--agent".to_string(), prompt_path.to_string()],
        }
    }
}

impl std::fmt::Display for AgentTool {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_accepts_whitelisted_names() {
        assert_eq!(AgentTool::parse("claude").unwrap(), AgentTool::Claude);
        assert_eq!(AgentTool::parse("codex").unwrap(), AgentTool::Codex);
    }

    #[test]
    fn parse_rejects_unknown_tool() {
        let err = AgentTool::parse("rm -rf /").unwrap_err();
        assert!(matches!(err, CoreError::InvalidTool(_)));
    }

    #[test]
    fn build_args_includes_prompt_path() {
        let args = AgentTool::Claude.build_args("/tmp/prompt.md");
        assert!(args.contains(&"/tmp/prompt.md".to_string()));
        assert_eq!(args[0], "--print");
    }

    #[test]
    fn required_env_var_matches_tool() {
        assert_eq!(AgentTool::Claude.required_env_var(), "ANTHROPIC_API_KEY");
        assert_eq!(AgentTool::Codex.required_env_var(), "OPENAI_API_KEY");
        assert_eq!(AgentTool::Amp.required_env_var(), "AMP_API_KEY");
    }
}
