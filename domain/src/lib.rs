//! Domain layer for aicof: the persistent task-plan state machine,
//! scheduling rules, agent-invocation ports, and the static component
//! registry. No I/O, no process spawning, no environment reads — every
//! side effect lives in `aicof_infrastructure`.

pub mod agent;
pub mod core;
pub mod orchestration;
pub mod plan;
pub mod progress;
pub mod registry;
pub mod skill;

pub use core::CoreError;
