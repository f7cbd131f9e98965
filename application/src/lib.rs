//! Application layer for aicof: the iteration driver use case and the
//! ports it depends on. Wires domain rules to infrastructure adapters
//! without owning any I/O itself.

pub mod config;
pub mod ports;
pub mod use_cases;
