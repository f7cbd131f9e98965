//! Core cross-cutting domain types.

mod error;

pub use error::CoreError;
