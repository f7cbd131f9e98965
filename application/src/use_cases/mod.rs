//! Application use cases.

mod iteration_driver;

pub use iteration_driver::{run_loop, DriverError, RunPaths};
