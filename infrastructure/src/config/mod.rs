//! Project configuration file adapter: layered YAML loading and writing.

mod file_config;
mod loader;

pub use file_config::{ConfigValueError, InstalledComponents, ProjectFileConfig};
pub use loader::{write_config, ConfigLoadError, ConfigLoader};
