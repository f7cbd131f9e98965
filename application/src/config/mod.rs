//! Application-level configuration resolution.

mod loop_config;

pub use loop_config::{LoopConfig, LoopConfigResolver};
