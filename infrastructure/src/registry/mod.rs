//! Static component registry: the real catalogue data backing
//! `aicof_domain::registry::Registry`.

mod catalog;

pub use catalog::build_registry;
