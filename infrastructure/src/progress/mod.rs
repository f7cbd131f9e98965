//! Plain-text progress log adapter.

mod log;

pub use log::{tail, FileProgressLog};
