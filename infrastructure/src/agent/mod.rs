//! Agent invocation adapters: subprocess spawning and auth preflight.

mod auth;
mod invoker;

pub use auth::EnvAuthChecker;
pub use invoker::SubprocessAgentInvoker;
