//! Core domain error type.

use thiserror::Error;

/// Errors raised by domain-level operations: plan validation, scheduling,
/// tool/sandbox selection. Infrastructure-specific errors (I/O, archive,
/// config parsing) live in their own crates and wrap this where needed.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum CoreError {
    #[error("invalid tool: {0}")]
    InvalidTool(String),

    #[error("invalid sandbox mode: {0}")]
    InvalidSandboxMode(String),

    #[error("invalid image reference: {0}")]
    InvalidImageReference(String),

    #[error("invalid plan: {0}")]
    InvalidPlan(String),

    #[error("invalid task id: {0}")]
    InvalidTaskId(String),

    #[error("task not found: {0}")]
    TaskNotFound(String),

    #[error("task already exists: {0}")]
    TaskAlreadyExists(String),

    #[error("missing credential: {0} is not set")]
    MissingCredential(String),

    #[error("agent subprocess exited non-zero: {0}")]
    SubprocessNonZeroExit(i32),

    #[error("failed to spawn agent subprocess: {0}")]
    SpawnFailed(String),

    #[error("{0} consecutive failures, circuit breaker tripped")]
    CircuitBreakerTripped(u32),
}

impl CoreError {
    /// True for errors that should never be retried by a caller — they
    /// indicate a malformed input, not a transient condition.
    pub fn is_validation_error(&self) -> bool {
        matches!(
            self,
            CoreError::InvalidTool(_)
                | CoreError::InvalidSandboxMode(_)
                | CoreError::InvalidImageReference(_)
                | CoreError::InvalidPlan(_)
                | CoreError::InvalidTaskId(_)
        )
    }
}
