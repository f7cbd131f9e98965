//! Iteration-driver domain rules: circuit breaker and discovery
//! triggering. The loop itself lives in `aicof_application`; this module
//! holds only the pure decisions the loop consults.

mod circuit_breaker;
mod discovery;

pub use circuit_breaker::CircuitBreaker;
pub use discovery::{should_run_discovery, IterationKind, MIN_PENDING_TASKS_FOR_DISCOVERY};
